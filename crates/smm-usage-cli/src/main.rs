mod commands;
mod logging;
mod progress;
mod prompt;

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use colored::*;
use commands::{Cli, Commands};
use dotenv::dotenv;
use progress::CliReporter;
use smm_usage_core::config::{self, AppConfig, EXAMPLE_ENV};
use smm_usage_core::render::{HtmlRenderer, Renderer, TerminalRenderer};
use smm_usage_core::storage::Database;
use smm_usage_core::{Error, GalleryService, IdentityResolver};
use tracing::{error, info};

fn main() -> ExitCode {
    dotenv().ok();

    let args = Cli::parse();
    if args.no_color {
        colored::control::set_override(false);
    }

    // Held until `run` returns so buffered file logs are flushed on every exit path.
    let _guard = logging::init_logger();

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(code) => code,
    }
}

fn run(args: Cli) -> Result<(), ExitCode> {
    let config = config::load_configuration().map_err(|err| {
        error!("Error loading configuration: {}", err);
        ExitCode::FAILURE
    })?;

    match args.command.unwrap_or(Commands::Interactive) {
        Commands::Users => list_users(&config),
        Commands::PrintConfig => print_config(&config).map_err(|err| {
            error!("Error: {:#}", err);
            ExitCode::FAILURE
        })?,
        Commands::Ping => {
            let db = connect(&config)?;
            println!(
                "{} MongoDB database '{}' is reachable",
                "✓".green(),
                db.name()
            );
            db.close();
        }
        Commands::Show { email, html } => {
            let service = GalleryService::from_config(connect(&config)?, &config);
            let result = run_show(&service, &email, html.as_deref());
            service.into_store().close();
            if let Err(err) = result {
                report_lookup_error(&err);
                return Err(ExitCode::FAILURE);
            }
        }
        Commands::Interactive => {
            let service = GalleryService::from_config(connect(&config)?, &config);
            let result = run_interactive(&service);
            service.into_store().close();
            if let Err(err) = result {
                error!("Error: {:#}", err);
                return Err(ExitCode::FAILURE);
            }
        }
    }
    Ok(())
}

/// Connect and ping, or explain what is wrong so the caller halts before accepting any input.
fn connect(config: &AppConfig) -> Result<Database, ExitCode> {
    let spinner = progress::spinner("Connecting to MongoDB...");
    let connected = Database::from_config(config);
    spinner.finish_and_clear();

    connected.map_err(|err| {
        error!("{}", err);
        eprintln!("{}", startup_failure_message(&err));
        ExitCode::FAILURE
    })
}

fn startup_failure_message(err: &Error) -> String {
    let hint = match err {
        Error::Configuration(_) => {
            "Please create a `.env` file with your MongoDB URI and restart the application."
        }
        _ => "Please check your MONGO_URL in the .env file.",
    };
    format!(
        "{} {}\n{}\n\n{}\n",
        "❌".red(),
        err.to_string().red(),
        hint,
        EXAMPLE_ENV.dimmed()
    )
}

fn run_show(
    service: &GalleryService<Database>,
    email: &str,
    html: Option<&Path>,
) -> anyhow::Result<()> {
    let lookup = {
        let reporter = CliReporter::new();
        service.lookup(email, &reporter)?
    };

    match html {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Cannot create {}", path.display()))?;
            let mut out = BufWriter::new(file);
            HtmlRenderer::new().render(&lookup, &mut out)?;
            out.flush()?;
            info!("Gallery for '{}' written to {}", email, path.display());
        }
        None => {
            let stdout = io::stdout();
            let mut out = stdout.lock();
            TerminalRenderer::new().render(&lookup, &mut out)?;
            out.flush()?;
        }
    }
    Ok(())
}

fn run_interactive(service: &GalleryService<Database>) -> anyhow::Result<()> {
    while let Some(email) = prompt::prompt_email("Enter User Email:")? {
        if let Err(err) = run_show(service, &email, None) {
            report_lookup_error(&err);
            if is_fatal(&err) {
                return Err(err);
            }
        }
    }
    Ok(())
}

/// Whether a lookup failure leaves the session unable to serve further lookups.
fn is_fatal(err: &anyhow::Error) -> bool {
    err.downcast_ref::<Error>().is_some_and(Error::is_fatal)
}

fn report_lookup_error(err: &anyhow::Error) {
    error!("Lookup failed: {:#}", err);
    eprintln!("{} {}", "❌".red(), format!("{:#}", err).red());
}

fn list_users(config: &AppConfig) {
    let identities = IdentityResolver::with_entries(&config.identities);
    for (email, user_id) in identities.entries() {
        println!("{:<36} {}", email, user_id.to_string().dimmed());
    }
    info!("{} known users", identities.len());
}

fn print_config(config: &AppConfig) -> anyhow::Result<()> {
    let rendered =
        toml::to_string_pretty(&config.redacted()).context("Cannot serialize configuration")?;
    println!("{}", rendered);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_url_message_includes_example_config() {
        colored::control::set_override(false);
        let message = startup_failure_message(&Error::Configuration(
            "MONGO_URL environment variable is not set".to_string(),
        ));
        assert!(message.contains("MONGO_URL environment variable is not set"));
        assert!(message.contains("Please create a `.env` file"));
        assert!(message.contains(EXAMPLE_ENV));
    }

    #[test]
    fn test_unreachable_server_message_includes_example_config() {
        colored::control::set_override(false);
        let err = Database::connect(
            "mongodb://127.0.0.1:1/?serverSelectionTimeoutMS=300",
            "prod",
            smm_usage_core::storage::CollectionNames {
                media: "media".to_string(),
                generations: "ai_generations".to_string(),
            },
        )
        .err()
        .expect("unreachable server must fail to connect");

        let message = startup_failure_message(&err);
        assert!(message.contains("Failed to connect to MongoDB"));
        assert!(message.contains("Please check your MONGO_URL"));
        assert!(message.contains(EXAMPLE_ENV));
    }

    #[test]
    fn test_only_startup_errors_stop_the_session() {
        let fatal = anyhow::Error::new(Error::Configuration("missing".to_string()));
        assert!(is_fatal(&fatal));

        let per_query = anyhow::Error::new(Error::MalformedDocument {
            collection: "media".to_string(),
            reason: "no _id".to_string(),
        });
        assert!(!is_fatal(&per_query));
        assert!(!is_fatal(&anyhow::anyhow!("stdout closed")));
    }
}
