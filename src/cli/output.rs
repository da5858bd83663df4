use crate::cli::args::OutputFormat;
use crate::core::session::{Identity, SessionSnapshot};
use crate::domain::config::FintrackConfig;
use std::io;

/// Output writer trait for different formats
pub trait OutputWriter {
    fn write_identity(&self, identity: &Identity) -> Result<(), OutputError>;
    fn write_snapshot(&self, snapshot: &SessionSnapshot) -> Result<(), OutputError>;
    fn write_config(&self, config: &FintrackConfig) -> Result<(), OutputError>;
    fn write_message(&self, message: &str) -> Result<(), OutputError>;
    fn write_error(&self, error: &str) -> Result<(), OutputError>;
}

/// Output formatting errors
#[derive(Debug, thiserror::Error)]
pub enum OutputError {
    #[error("JSON serialization error: {0}")]
    JsonError(#[from] serde_json::Error),
    #[error("TOML serialization error: {0}")]
    TomlError(#[from] toml::ser::Error),
    #[error("IO error: {0}")]
    IoError(#[from] io::Error),
}

impl From<OutputError> for crate::domain::error::FintrackError {
    fn from(err: OutputError) -> Self {
        Self::Output(err.to_string())
    }
}

/// Console output writer
pub struct ConsoleWriter {
    format: OutputFormat,
}

impl ConsoleWriter {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }
}

impl OutputWriter for ConsoleWriter {
    fn write_identity(&self, identity: &Identity) -> Result<(), OutputError> {
        match self.format {
            OutputFormat::Text => {
                println!("ID: {}", identity.id);
                println!("Email: {}", identity.email);
                if let Some(name) = &identity.name {
                    println!("Name: {}", name);
                }
                if !identity.roles.is_empty() {
                    println!("Roles: {}", identity.roles.join(", "));
                }
            }
            OutputFormat::Json => {
                let output = serde_json::to_string_pretty(identity)?;
                println!("{}", output);
            }
        }
        Ok(())
    }

    fn write_snapshot(&self, snapshot: &SessionSnapshot) -> Result<(), OutputError> {
        match self.format {
            OutputFormat::Text => {
                println!("Session: {}", snapshot.status);
                if let Some(identity) = &snapshot.identity {
                    self.write_identity(identity)?;
                }
            }
            OutputFormat::Json => {
                let output = serde_json::to_string_pretty(snapshot)?;
                println!("{}", output);
            }
        }
        Ok(())
    }

    fn write_config(&self, config: &FintrackConfig) -> Result<(), OutputError> {
        match self.format {
            OutputFormat::Text => {
                let output = toml::to_string_pretty(config)?;
                println!("{}", output);
            }
            OutputFormat::Json => {
                let output = serde_json::to_string_pretty(config)?;
                println!("{}", output);
            }
        }
        Ok(())
    }

    fn write_message(&self, message: &str) -> Result<(), OutputError> {
        println!("{}", message);
        Ok(())
    }

    fn write_error(&self, error: &str) -> Result<(), OutputError> {
        eprintln!("Error: {}", error);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::session::SessionStatus;

    fn test_identity() -> Identity {
        Identity {
            id: "1".to_string(),
            email: "a@x.com".to_string(),
            name: Some("Alex".to_string()),
            roles: vec!["member".to_string()],
        }
    }

    #[test]
    fn test_text_writer_does_not_fail() {
        let writer = ConsoleWriter::new(OutputFormat::Text);
        assert!(writer.write_identity(&test_identity()).is_ok());
        assert!(writer
            .write_snapshot(&SessionSnapshot::present(test_identity()))
            .is_ok());
        assert!(writer.write_config(&FintrackConfig::default()).is_ok());
        assert!(writer.write_message("hello").is_ok());
    }

    #[test]
    fn test_json_writer_does_not_fail() {
        let writer = ConsoleWriter::new(OutputFormat::Json);
        assert!(writer.write_identity(&test_identity()).is_ok());
        assert!(writer.write_snapshot(&SessionSnapshot::absent()).is_ok());
        assert!(writer.write_config(&FintrackConfig::default()).is_ok());
    }

    #[test]
    fn test_snapshot_serializes_status() {
        let snapshot = SessionSnapshot::absent();
        let json = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(json["status"], serde_json::json!("Absent"));
        assert_eq!(snapshot.status, SessionStatus::Absent);
    }
}
