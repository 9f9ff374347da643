use anyhow::{Context, Result};
use clap::Parser;
use passgen::cli::Cli;
use passgen::{app, ui};
use std::io::{self, IsTerminal};
use std::process::ExitCode;

fn init_tracing(cli: &Cli) -> Result<()> {
    let subscriber = tracing_subscriber::fmt::Subscriber::builder()
        .with_max_level(cli.verbosity.tracing_level_filter())
        .with_writer(io::stderr)
        .with_ansi(io::stderr().is_terminal())
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to initialize logging")?;
    Ok(())
}

fn run(cli: Cli) -> Result<ExitCode> {
    init_tracing(&cli)?;

    let settings = cli.settings()?;

    if let Some(tagged) = cli.verify.as_deref() {
        let pepper = settings
            .pepper
            .as_ref()
            .context("--verify needs a pepper")?;
        let valid = app::verify(tagged, pepper);
        println!(
            "{}",
            ui::format_verification(valid, &ui::DisplayOptions::for_stdout())
        );
        return Ok(if valid {
            ExitCode::SUCCESS
        } else {
            ExitCode::FAILURE
        });
    }

    let mut rng = rand::rng();
    let mut stdout = io::stdout().lock();
    app::run(&settings, &mut rng, &mut stdout)?;

    Ok(ExitCode::SUCCESS)
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            e.print().ok();
            return if e.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            ui::report_error(&e);
            ExitCode::FAILURE
        }
    }
}
