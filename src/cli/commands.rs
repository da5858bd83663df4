use crate::cli::args::{Args, AuthCommand, Command, ConfigCommand};
use crate::cli::output::{ConsoleWriter, OutputWriter};
use crate::core::session::SessionManager;
use crate::domain::config::FintrackConfig;
use crate::domain::error::{FintrackError, FintrackResult};
use crate::infrastructure::config::ConfigManager;
use crate::infrastructure::credentials::CredentialStore;
use crate::infrastructure::http::ApiClient;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

/// Execute CLI command
pub async fn execute_command(args: Args) -> FintrackResult<()> {
    let writer = ConsoleWriter::new(args.output.clone());

    // Load configuration using ConfigManager
    let config_manager = ConfigManager::new()?;
    let config = if let Some(config_path) = &args.config {
        config_manager.load_config_from_path(config_path.as_ref())?
    } else {
        config_manager.load_config()?
    };

    // Initialize logging
    if !args.quiet {
        setup_logging(&config.global, args.verbose)?;
    }

    match args.command {
        Command::Auth(auth_args) => {
            execute_auth_command(auth_args.command, &writer, &config).await
        }
        Command::Config(config_args) => {
            execute_config_command(config_args.command, &writer, &config, &config_manager)
        }
        Command::Version => {
            writer.write_message(&format!("fintrack {}", env!("CARGO_PKG_VERSION")))?;
            Ok(())
        }
    }
}

async fn execute_auth_command(
    command: AuthCommand,
    writer: &ConsoleWriter,
    config: &FintrackConfig,
) -> FintrackResult<()> {
    let manager = build_session_manager(config)?;

    match command {
        AuthCommand::Login { email, password } => {
            manager.login(&email, &password).await?;

            writer.write_message("Logged in")?;
            if let Some(identity) = manager.snapshot().identity {
                writer.write_identity(&identity)?;
            }
            Ok(())
        }
        AuthCommand::Register { email, password } => {
            manager.register(&email, &password).await?;

            writer.write_message("Registered")?;
            if let Some(identity) = manager.snapshot().identity {
                writer.write_identity(&identity)?;
            }
            Ok(())
        }
        AuthCommand::Logout => {
            manager.logout().await;
            writer.write_message("Logged out")?;
            Ok(())
        }
        AuthCommand::Whoami => {
            // One-shot process: nothing tears the probe down early, so
            // the token stays untriggered
            manager.bootstrap(&CancellationToken::new()).await;

            let snapshot = manager.snapshot();
            if snapshot.is_authenticated() {
                writer.write_snapshot(&snapshot)?;
                Ok(())
            } else {
                Err(FintrackError::Authentication {
                    message: "Not logged in".to_string(),
                })
            }
        }
    }
}

fn execute_config_command(
    command: ConfigCommand,
    writer: &ConsoleWriter,
    config: &FintrackConfig,
    config_manager: &ConfigManager,
) -> FintrackResult<()> {
    match command {
        ConfigCommand::Show => {
            writer.write_config(config)?;
            Ok(())
        }
        ConfigCommand::Init { global } => {
            if global {
                config_manager.init_global_config()?;
                writer.write_message(&format!(
                    "Created global configuration at {}",
                    config_manager.get_global_config_path_ref().display()
                ))?;
            } else {
                let current_dir = std::env::current_dir().map_err(|e| FintrackError::Config {
                    message: format!("Could not determine current directory: {}", e),
                })?;
                config_manager.init_project_config(&current_dir)?;
                writer.write_message(&format!(
                    "Created project configuration at {}",
                    current_dir.join(".fintrack").join("config.toml").display()
                ))?;
            }
            Ok(())
        }
        ConfigCommand::Validate { file } => {
            let config_to_check = if let Some(path) = file {
                config_manager.load_config_from_path(path.as_ref())?
            } else {
                config.clone()
            };

            config_to_check
                .server
                .validate()
                .map_err(|message| FintrackError::Config { message })?;

            writer.write_message("Configuration is valid")?;
            Ok(())
        }
    }
}

/// Wire the session manager to the configured backend and credential
/// store
fn build_session_manager(config: &FintrackConfig) -> FintrackResult<SessionManager> {
    config
        .server
        .validate()
        .map_err(|message| FintrackError::Config { message })?;

    let credential_path = match &config.global.credential_file {
        Some(path) => path.clone(),
        None => CredentialStore::default_path()?,
    };
    let credentials = Arc::new(CredentialStore::open(credential_path)?);
    let client = ApiClient::new(&config.server, Arc::clone(&credentials))?;

    Ok(SessionManager::new(client, credentials))
}

fn setup_logging(
    config: &crate::domain::config::GlobalConfig,
    verbose: bool,
) -> FintrackResult<()> {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        match config.log_level.as_str() {
            "error" => tracing::Level::ERROR,
            "warn" => tracing::Level::WARN,
            "info" => tracing::Level::INFO,
            "debug" => tracing::Level::DEBUG,
            "trace" => tracing::Level::TRACE,
            _ => tracing::Level::INFO,
        }
    };

    crate::infrastructure::logging::init_logging(level).map_err(|e| FintrackError::Config {
        message: format!("Failed to initialize logging: {}", e),
    })
}
