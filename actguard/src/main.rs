use clap::Parser;
use tracing::debug;

use actguard::cli::Cli;
use actguard::config::Config;
use actguard::errors::display_error;
use actguard::output;
use actguard::report::VIOLATIONS_BANNER;
use actguard::run::{self, RunOutcome, exit_code};
use actguard::{tracing_init, version};

fn main() {
    let cli = Cli::parse();
    tracing_init::init_tracing();
    debug!(version = version::VERSION, "actguard starting");

    // Workflow commands only mean something to a real runner.
    let on_runner = std::env::var("GITHUB_ACTIONS").is_ok_and(|value| value == "true");

    let result = Config::resolve(&cli).and_then(|config| {
        let stdout = std::io::stdout();
        let mut out = stdout.lock();
        let outcome = run::run(&config, &mut out)?;
        Ok((config, outcome))
    });

    let code = match result {
        Ok((config, outcome)) => {
            if on_runner {
                annotate(&config, &outcome);
            }
            if outcome.failed(&config) {
                exit_code::FAILURE
            } else {
                exit_code::SUCCESS
            }
        }
        Err(err) => {
            if on_runner {
                println!("{}", output::error_command(&format!("{err:#}")));
            }
            display_error(&err, cli.verbose);
            exit_code::FAILURE
        }
    };
    std::process::exit(code);
}

/// Emit an `::error::` annotation for everything that failed the step.
fn annotate(config: &Config, outcome: &RunOutcome) {
    for failure in &outcome.failures {
        println!("{}", output::error_command(failure));
    }
    if config.fail_if_violations && !outcome.violations.is_empty() {
        println!("{}", output::error_command(VIOLATIONS_BANNER));
    }
}
