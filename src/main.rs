// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;

use traducteur::app_config::Config;
use traducteur::auth::CredentialVerifier;
use traducteur::backends::MarianFactory;
use traducteur::database::{DatabaseConnection, Repository, TranslationDirection, TranslationRequest};
use traducteur::translation_service::TranslationService;

/// Command-line interface for the traducteur backend
#[derive(Parser, Debug)]
#[command(name = "traducteur", about = "French/English translation backend", version)]
struct Cli {
    /// Path to the configuration file
    #[arg(short, long, env = "TRADUCTEUR_CONFIG", default_value = "config.json")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Register a new user
    Register {
        /// Login name
        login: String,
        /// Password
        password: String,
    },

    /// Check a login/password pair
    Login {
        /// Login name
        login: String,
        /// Password
        password: String,
    },

    /// Translate a text and record the result
    Translate {
        /// Login name
        login: String,
        /// Password
        password: String,
        /// Direction tag: "fr>>en" or "en>>fr"
        direction: String,
        /// Text to translate
        text: String,
    },

    /// List stored translations for a user
    History {
        /// Login name
        login: String,
        /// Password
        password: String,
    },
}

/// Authenticate or bail; transport concerns stay out of the library
async fn authenticate(
    verifier: &CredentialVerifier,
    login: &str,
    password: &str,
) -> Result<i64> {
    let user = verifier.verify(login, password).await?;
    if !user.authenticated {
        return Err(anyhow!("Authentication denied for '{}'", login));
    }
    user.id
        .ok_or_else(|| anyhow!("Authenticated user '{}' has no id", login))
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::from_file_or_default(&cli.config)?;

    env_logger::Builder::new()
        .filter_level(config.log_level.to_level_filter())
        .init();

    let db = match &config.database.path {
        Some(path) => DatabaseConnection::new(path)?,
        None => DatabaseConnection::new_default()?,
    };
    let repository = Repository::new(db);
    let verifier = CredentialVerifier::new(repository.clone());

    match cli.command {
        Commands::Register { login, password } => {
            let id = repository.insert_user(&login, &password).await?;
            println!("Registered '{}' with id {}", login, id);
        }

        Commands::Login { login, password } => {
            let user = verifier.verify(&login, &password).await?;
            if user.authenticated {
                println!("Authenticated (id {})", user.id.unwrap_or_default());
            } else {
                println!("Authentication denied");
            }
        }

        Commands::Translate {
            login,
            password,
            direction,
            text,
        } => {
            let owner = authenticate(&verifier, &login, &password).await?;
            let direction: TranslationDirection = direction.parse()?;

            let factory = Arc::new(MarianFactory::new(config.backend.clone()));
            let service = TranslationService::new(factory, repository);

            let request = TranslationRequest::new(&text, direction, owner);
            let completed = service.translate_and_record(request).await?;
            println!(
                "{}",
                completed
                    .translated_text
                    .unwrap_or_else(|| "<no translation>".to_string())
            );
        }

        Commands::History { login, password } => {
            let owner = authenticate(&verifier, &login, &password).await?;
            let records = repository.list_for_user(owner).await?;

            if records.is_empty() {
                println!("No stored translations");
            } else {
                for record in records {
                    println!(
                        "[{}] {} -> {}",
                        record.direction,
                        record.source_text,
                        record.translated_text.unwrap_or_default()
                    );
                }
            }
        }
    }

    Ok(())
}
