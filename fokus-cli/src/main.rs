//! fokus-check: runs the Fokus widget scenarios against the emulated
//! document and reports each one.
//!
//! Exit status is non-zero if any scenario fails.

mod scenarios;

use std::any::Any;
use std::panic;
use std::process::ExitCode;

use clap::Parser;
use owo_colors::OwoColorize;
use tracing_subscriber::EnvFilter;

use scenarios::{SCENARIOS, Scenario};

/// Run the Fokus widget scenarios
#[derive(Parser, Debug)]
#[command(name = "fokus-check")]
#[command(author, version, about, long_about = None)]
#[command(after_help = r#"EXAMPLES:
    # Run everything
    fokus-check

    # Only the context switcher
    fokus-check --filter context

    # Show dispatch and mount logs
    fokus-check -v
"#)]
struct Cli {
    /// Run only scenarios whose name contains this text
    #[arg(short, long, value_name = "SUBSTR")]
    filter: Option<String>,

    /// Print the scenario names and exit
    #[arg(long)]
    list: bool,

    /// Log at debug level when RUST_LOG is not set
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let selected: Vec<&Scenario> = SCENARIOS
        .iter()
        .filter(|s| cli.filter.as_deref().is_none_or(|f| s.name.contains(f)))
        .collect();

    if cli.list {
        for scenario in &selected {
            println!("{}", scenario.name);
        }
        return ExitCode::SUCCESS;
    }

    let failed = selected.iter().filter(|s| !run(s)).count();
    println!(
        "\n{} passed, {} failed",
        selected.len() - failed,
        failed
    );

    if failed == 0 {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Run one scenario, print its line and return whether it passed.
fn run(scenario: &Scenario) -> bool {
    tracing::debug!(name = scenario.name, "running scenario");
    match panic::catch_unwind(scenario.run) {
        Ok(Ok(())) => {
            println!("{} {}", "✅".green(), scenario.name);
            true
        }
        Ok(Err(err)) => {
            eprintln!("{} {}", "❌".red(), scenario.name.red());
            eprintln!("{err:?}");
            false
        }
        Err(payload) => {
            eprintln!("{} {}", "❌".red(), scenario.name.red());
            eprintln!("panicked: {}", panic_message(payload.as_ref()));
            false
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    payload
        .downcast_ref::<&str>()
        .copied()
        .or_else(|| payload.downcast_ref::<String>().map(String::as_str))
        .unwrap_or("non-string panic payload")
}
