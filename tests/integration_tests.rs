use fintrack::core::guard::{self, GuardDecision};
use fintrack::{FintrackConfig, FintrackError, Identity, SessionSnapshot, SessionStatus};

/// Integration tests for the Fintrack library
#[cfg(test)]
mod integration_tests {
    use super::*;

    #[test]
    fn test_config_serialization() {
        let config = FintrackConfig::default();
        let toml_str = toml::to_string(&config).expect("Failed to serialize config");
        let deserialized: FintrackConfig =
            toml::from_str(&toml_str).expect("Failed to deserialize config");

        assert_eq!(config.server.base_url, deserialized.server.base_url);
        assert_eq!(config.server.timeout_ms, deserialized.server.timeout_ms);
        assert_eq!(config.global.log_level, deserialized.global.log_level);
    }

    #[test]
    fn test_session_status_display() {
        assert_eq!(SessionStatus::Unresolved.to_string(), "Unresolved");
        assert_eq!(SessionStatus::Absent.to_string(), "Absent");
        assert_eq!(SessionStatus::Present.to_string(), "Present");
    }

    #[test]
    fn test_error_display() {
        let error = FintrackError::Config {
            message: "Invalid configuration".to_string(),
        };
        assert!(error.to_string().contains("Configuration error"));
        assert!(error.to_string().contains("Invalid configuration"));

        // Auth errors carry the server message verbatim for inline display
        let error = FintrackError::Authentication {
            message: "Invalid credentials".to_string(),
        };
        assert_eq!(error.to_string(), "Invalid credentials");
    }

    #[test]
    fn test_snapshot_lifecycle_states() {
        let snapshot = SessionSnapshot::unresolved();
        assert!(!snapshot.is_resolved());

        let identity = Identity {
            id: "1".to_string(),
            email: "a@x.com".to_string(),
            name: None,
            roles: Vec::new(),
        };
        let snapshot = SessionSnapshot::present(identity);
        assert!(snapshot.is_resolved());
        assert!(snapshot.is_authenticated());

        let snapshot = SessionSnapshot::absent();
        assert!(snapshot.is_resolved());
        assert!(!snapshot.is_authenticated());
    }

    #[test]
    fn test_guard_decisions_across_states() {
        assert_eq!(
            guard::evaluate(&SessionSnapshot::unresolved(), "/dashboard"),
            GuardDecision::Pending
        );

        let identity = Identity {
            id: "1".to_string(),
            email: "a@x.com".to_string(),
            name: None,
            roles: vec!["admin".to_string()],
        };
        assert_eq!(
            guard::evaluate(&SessionSnapshot::present(identity.clone()), "/dashboard"),
            GuardDecision::Allow
        );

        assert_eq!(
            guard::evaluate_with_roles(
                &SessionSnapshot::present(identity),
                "/reports",
                &["admin".to_string()]
            ),
            GuardDecision::Allow
        );
    }
}
