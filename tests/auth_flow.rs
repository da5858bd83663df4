use fintrack::core::guard::{self, GuardDecision, RouteGuard};
use fintrack::domain::config::ServerConfig;
use fintrack::{ApiClient, CredentialStore, SessionManager, SessionStatus};
use std::path::Path;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn manager_with_credentials(base_url: String, credential_path: &Path) -> SessionManager {
    let credentials = Arc::new(CredentialStore::open(credential_path.to_path_buf()).unwrap());
    let config = ServerConfig {
        base_url,
        timeout_ms: 5_000,
    };
    let client = ApiClient::new(&config, Arc::clone(&credentials)).unwrap();
    SessionManager::new(client, credentials)
}

fn user_body(id: &str, email: &str) -> serde_json::Value {
    serde_json::json!({ "user": { "id": id, "email": email } })
}

#[tokio::test]
async fn login_then_guard_grants_access() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(user_body("1", "a@x.com")))
        .mount(&server)
        .await;

    let temp_dir = tempfile::TempDir::new().unwrap();
    let manager = manager_with_credentials(server.uri(), &temp_dir.path().join("session"));

    manager.login("a@x.com", "pw").await.unwrap();

    let decision = guard::evaluate(&manager.snapshot(), "/dashboard");
    assert_eq!(decision, GuardDecision::Allow);
}

#[tokio::test]
async fn no_protected_content_before_bootstrap_resolves() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/auth/me"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let temp_dir = tempfile::TempDir::new().unwrap();
    let manager = manager_with_credentials(server.uri(), &temp_dir.path().join("session"));
    let mut route_guard = RouteGuard::new(manager.subscribe());

    // Any navigation before resolution blocks on the loading state
    for requested in ["/", "/dashboard", "/transactions", "/goals"] {
        assert_eq!(route_guard.check(requested), GuardDecision::Pending);
    }

    manager.bootstrap(&CancellationToken::new()).await;
    let snapshot = route_guard.wait_until_resolved().await;
    assert_eq!(snapshot.status, SessionStatus::Absent);

    assert_eq!(
        route_guard.check("/dashboard"),
        GuardDecision::Redirect {
            to: "/login".to_string(),
            from: "/dashboard".to_string(),
        }
    );
}

#[tokio::test]
async fn resolved_absent_session_redirects_with_origin_preserved() {
    let snapshot = fintrack::SessionSnapshot::absent();
    assert!(snapshot.is_resolved());

    let decision = guard::evaluate(&snapshot, "/dashboard");
    assert_eq!(
        decision,
        GuardDecision::Redirect {
            to: "/login".to_string(),
            from: "/dashboard".to_string(),
        }
    );
}

#[tokio::test]
async fn register_conflict_surfaces_server_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/register"))
        .respond_with(
            ResponseTemplate::new(409).set_body_json(serde_json::json!({
                "message": "Email taken"
            })),
        )
        .mount(&server)
        .await;

    let temp_dir = tempfile::TempDir::new().unwrap();
    let manager = manager_with_credentials(server.uri(), &temp_dir.path().join("session"));
    manager.bootstrap(&CancellationToken::new()).await;

    let error = manager.register("b@x.com", "pw2").await.unwrap_err();
    assert_eq!(error.to_string(), "Email taken");
    assert_eq!(manager.snapshot().status, SessionStatus::Absent);
}

#[tokio::test]
async fn persisted_cookie_rehydrates_session_across_processes() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("set-cookie", "sid=abc123; Path=/; HttpOnly")
                .set_body_json(user_body("1", "a@x.com")),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/auth/me"))
        .and(header("cookie", "sid=abc123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(user_body("1", "a@x.com")))
        .mount(&server)
        .await;

    let temp_dir = tempfile::TempDir::new().unwrap();
    let credential_path = temp_dir.path().join("session");

    // First process: log in, cookie is persisted
    let manager = manager_with_credentials(server.uri(), &credential_path);
    manager.login("a@x.com", "pw").await.unwrap();
    drop(manager);

    // Second process: the bootstrap probe finds the stored credential
    let manager = manager_with_credentials(server.uri(), &credential_path);
    assert_eq!(manager.snapshot().status, SessionStatus::Unresolved);

    manager.bootstrap(&CancellationToken::new()).await;
    let snapshot = manager.snapshot();
    assert_eq!(snapshot.status, SessionStatus::Present);
    assert_eq!(snapshot.identity.unwrap().email, "a@x.com");
}

#[tokio::test]
async fn logout_always_clears_local_session() {
    // Backend unreachable: logout still succeeds locally
    let temp_dir = tempfile::TempDir::new().unwrap();
    let credential_path = temp_dir.path().join("session");

    let credentials = Arc::new(CredentialStore::open(credential_path.clone()).unwrap());
    credentials.store("sid=dead".to_string()).unwrap();
    let config = ServerConfig {
        base_url: "http://127.0.0.1:1".to_string(),
        timeout_ms: 1_000,
    };
    let client = ApiClient::new(&config, Arc::clone(&credentials)).unwrap();
    let manager = SessionManager::new(client, Arc::clone(&credentials));

    manager.logout().await;

    assert_eq!(manager.snapshot().status, SessionStatus::Absent);
    assert!(credentials.cookie().is_none());
    assert!(!credential_path.exists());
}
