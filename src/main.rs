use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use tracing::warn;
use tracing_subscriber::EnvFilter;

use rpncalc::calculator::{
    copy_to_clipboard, evaluate_expression, evaluate_postfix_text, render_postfix, to_postfix,
};
use rpncalc::config::Config;
use rpncalc::repl::{Repl, write_result};

#[derive(Parser, Debug)]
#[command(name = "rpncalc")]
#[command(about = "Evaluate arithmetic expressions via postfix notation", long_about = None)]
struct Cli {
    /// Expression to evaluate. Starts an interactive session when omitted.
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    expression: Vec<String>,

    /// Only print the postfix notation
    #[arg(long, conflicts_with = "rpn")]
    postfix: bool,

    /// Treat the input as postfix notation, e.g. "3 4 + 2 *"
    #[arg(long)]
    rpn: bool,

    /// Print the result as JSON
    #[arg(long)]
    json: bool,

    /// Decimal places for non-integral results
    #[arg(long)]
    precision: Option<usize>,

    /// Do not print the postfix notation
    #[arg(long)]
    no_postfix: bool,

    /// Copy results to the clipboard
    #[arg(long)]
    copy: bool,

    /// Path to the configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    let mut config = Config::load(cli.config.as_deref())?;
    if cli.precision.is_some() {
        config.precision = cli.precision;
    }
    if cli.no_postfix {
        config.show_postfix = false;
    }
    if cli.copy {
        config.copy_results = true;
    }

    if cli.expression.is_empty() {
        let stdin = io::stdin();
        Repl::new(config).run(stdin.lock(), io::stdout())?;
        return Ok(ExitCode::SUCCESS);
    }

    let input = cli.expression.join(" ");
    let mut stdout = io::stdout().lock();

    if cli.postfix {
        return match to_postfix(&input) {
            Ok(tokens) => {
                writeln!(stdout, "{}", render_postfix(&tokens))?;
                Ok(ExitCode::SUCCESS)
            }
            Err(e) => {
                eprintln!("Error: {}", e);
                Ok(ExitCode::FAILURE)
            }
        };
    }

    let result = if cli.rpn {
        evaluate_postfix_text(&input, config.precision)
    } else {
        evaluate_expression(&input, config.precision)
    };

    if cli.json {
        let json = serde_json::to_string_pretty(&result).context("Failed to serialize result")?;
        writeln!(stdout, "{}", json)?;
    } else if result.is_success() {
        write_result(&result, config.show_postfix && !cli.rpn, &mut stdout)?;
    } else {
        if config.show_postfix
            && !cli.rpn
            && let Some(postfix) = result.postfix()
        {
            writeln!(stdout, "Postfix notation: {}", postfix)?;
        }
        eprintln!("Error: {}", result.display());
    }

    if config.copy_results
        && let Some(text) = result.clipboard()
        && let Err(e) = copy_to_clipboard(text)
    {
        warn!(error = %e, "failed to copy result");
    }

    Ok(if result.is_success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
