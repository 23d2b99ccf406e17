//! Manager API client.
//!
//! Attaches the operator's bearer token to every request, reading it from
//! the session store at call time so a logout is picked up by the next
//! call without rebuilding the client. Each failure surfaces exactly once
//! to the caller; there is no retry or backoff.

use crate::cache::{resource, ResponseCache};
use crate::config::Config;
use crate::errors::ApiError;
use crate::models::{
    Agent, AgentList, Alert, AlertList, AlertStatus, Case, CaseList, DashboardStats, LoginRequest,
    Rule, RuleList, Session, Severity,
};
use crate::session::SessionStore;
use anyhow::{Context, Result};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Path prefix shared by every manager endpoint.
const API_PREFIX: &str = "/api/v1";

pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    session: Arc<SessionStore>,
    cache: ResponseCache,
}

/// Server-side filters accepted by `GET /alerts`.
#[derive(Debug, Default, Clone, Copy)]
pub struct AlertFilter {
    pub severity: Option<Severity>,
    pub status: Option<AlertStatus>,
}

impl AlertFilter {
    fn to_query(self) -> Vec<(&'static str, String)> {
        let mut query = Vec::new();
        if let Some(severity) = self.severity {
            query.push(("severity", severity.to_string()));
        }
        if let Some(status) = self.status {
            query.push(("status", status.to_string()));
        }
        query
    }
}

impl ApiClient {
    pub fn new(config: &Config, session: Arc<SessionStore>, cache: ResponseCache) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(concat!("siemctl/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            http,
            base_url: config.server_url.trim_end_matches('/').to_string(),
            session,
            cache,
        })
    }

    /// Snapshot store for fallback rendering when the manager is down.
    pub fn cache(&self) -> &ResponseCache {
        &self.cache
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}{}", self.base_url, API_PREFIX, path)
    }

    /// Exchange credentials for a session. On success the session is
    /// established in the store; a rejected login leaves any previously
    /// stored session untouched.
    pub async fn login(&self, email: &str, password: &str) -> Result<Session, ApiError> {
        let body = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };

        debug!("POST {}", self.url("/auth/login"));
        let response = self
            .http
            .post(self.url("/auth/login"))
            .json(&body)
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(ApiError::Auth(error_message(response).await));
        }
        if !status.is_success() {
            return Err(ApiError::Http {
                status: status.as_u16(),
                message: error_message(response).await,
            });
        }

        let session: Session = response
            .json()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))?;
        if session.token.is_empty() {
            return Err(ApiError::Decode(
                "login response carried an empty token".to_string(),
            ));
        }

        self.session.establish(session.clone());
        Ok(session)
    }

    /// Authenticated GET, decoding the body into the endpoint schema.
    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, ApiError> {
        let mut request = self.http.get(self.url(path));
        if !query.is_empty() {
            request = request.query(query);
        }

        // Read the token at call time, not at construction: a login or
        // logout between calls applies to the next request.
        if let Some(token) = self.session.token() {
            request = request.bearer_auth(token);
        }

        debug!("GET {}", self.url(path));
        let response = request.send().await.map_err(transport_error)?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(ApiError::Auth(error_message(response).await));
        }
        if !status.is_success() {
            return Err(ApiError::Http {
                status: status.as_u16(),
                message: error_message(response).await,
            });
        }

        response
            .json::<T>()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))
    }

    pub async fn agents(&self) -> Result<Vec<Agent>, ApiError> {
        let list: AgentList = self.get_json("/agents", &[]).await?;
        self.cache.store(resource::AGENTS, &list.agents);
        Ok(list.agents)
    }

    pub async fn alerts(&self, filter: AlertFilter) -> Result<Vec<Alert>, ApiError> {
        let list: AlertList = self.get_json("/alerts", &filter.to_query()).await?;
        self.cache.store(resource::ALERTS, &list.alerts);
        Ok(list.alerts)
    }

    pub async fn rules(&self) -> Result<Vec<Rule>, ApiError> {
        let list: RuleList = self.get_json("/rules", &[]).await?;
        self.cache.store(resource::RULES, &list.rules);
        Ok(list.rules)
    }

    pub async fn cases(&self) -> Result<Vec<Case>, ApiError> {
        let list: CaseList = self.get_json("/cases", &[]).await?;
        self.cache.store(resource::CASES, &list.cases);
        Ok(list.cases)
    }

    pub async fn dashboard_stats(&self) -> Result<DashboardStats, ApiError> {
        let stats: DashboardStats = self.get_json("/dashboard/stats", &[]).await?;
        self.cache.store(resource::DASHBOARD_STATS, &stats);
        Ok(stats)
    }
}

fn transport_error(e: reqwest::Error) -> ApiError {
    if e.is_decode() {
        ApiError::Decode(e.to_string())
    } else {
        ApiError::Network(e.to_string())
    }
}

/// Pull the message out of the manager's `{"error": ...}` envelope,
/// falling back to the HTTP status line.
async fn error_message(response: reqwest::Response) -> String {
    let status = response.status();
    match response.json::<crate::models::ErrorBody>().await {
        Ok(body) if !body.error.is_empty() => body.error,
        _ => status
            .canonical_reason()
            .unwrap_or("request rejected")
            .to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::User;
    use axum::extract::Query;
    use axum::http::{HeaderMap, StatusCode};
    use axum::routing::{get, post};
    use axum::{Json, Router};
    use serde_json::json;
    use std::collections::HashMap;
    use std::net::SocketAddr;

    const TOKEN: &str = "tok123";

    async fn stub_login(Json(body): Json<serde_json::Value>) -> (StatusCode, Json<serde_json::Value>) {
        if body["email"] == "a@x.com" && body["password"] == "hunter2" {
            (
                StatusCode::OK,
                Json(json!({
                    "token": TOKEN,
                    "user": {
                        "id": "u1",
                        "email": "a@x.com",
                        "first_name": "Ada",
                        "last_name": "Byron"
                    }
                })),
            )
        } else {
            (
                StatusCode::UNAUTHORIZED,
                Json(json!({"error": "Invalid credentials"})),
            )
        }
    }

    fn bearer_ok(headers: &HeaderMap) -> bool {
        headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .map(|v| v == format!("Bearer {}", TOKEN))
            .unwrap_or(false)
    }

    async fn stub_agents(headers: HeaderMap) -> (StatusCode, Json<serde_json::Value>) {
        if !bearer_ok(&headers) {
            return (
                StatusCode::UNAUTHORIZED,
                Json(json!({"error": "Authorization required"})),
            );
        }
        (
            StatusCode::OK,
            Json(json!({"agents": [{"id": 1, "hostname": "H1", "status": "active"}]})),
        )
    }

    async fn stub_alerts(
        headers: HeaderMap,
        Query(params): Query<HashMap<String, String>>,
    ) -> (StatusCode, Json<serde_json::Value>) {
        if !bearer_ok(&headers) {
            return (
                StatusCode::UNAUTHORIZED,
                Json(json!({"error": "Authorization required"})),
            );
        }

        let critical = json!({
            "id": "al-1", "title": "Suspicious PowerShell Execution",
            "severity": "critical", "status": "open",
            "created_at": "2024-03-01T09:30:00Z"
        });
        let low = json!({
            "id": "al-2", "title": "Unusual Network Activity",
            "severity": "low", "status": "resolved",
            "created_at": "2024-03-01T10:00:00Z"
        });

        let alerts = match params.get("severity").map(String::as_str) {
            Some("critical") => vec![critical],
            Some(_) => vec![],
            None => vec![critical, low],
        };
        (StatusCode::OK, Json(json!({ "alerts": alerts })))
    }

    async fn stub_stats(headers: HeaderMap) -> (StatusCode, Json<serde_json::Value>) {
        if !bearer_ok(&headers) {
            return (
                StatusCode::UNAUTHORIZED,
                Json(json!({"error": "Authorization required"})),
            );
        }
        (
            StatusCode::OK,
            Json(json!({
                "TotalAgents": 4, "ActiveAgents": 3,
                "TotalAlerts": 9, "OpenAlerts": 2, "CriticalAlerts": 1,
                "TotalRules": 7, "EnabledRules": 5
            })),
        )
    }

    // Shape mismatch: the rules collection is not an array.
    async fn stub_bad_rules() -> Json<serde_json::Value> {
        Json(json!({"rules": "nope"}))
    }

    async fn stub_broken_cases() -> (StatusCode, Json<serde_json::Value>) {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({"error": "database down"})),
        )
    }

    async fn spawn_stub() -> SocketAddr {
        let app = Router::new()
            .route("/api/v1/auth/login", post(stub_login))
            .route("/api/v1/agents", get(stub_agents))
            .route("/api/v1/alerts", get(stub_alerts))
            .route("/api/v1/dashboard/stats", get(stub_stats))
            .route("/api/v1/rules", get(stub_bad_rules))
            .route("/api/v1/cases", get(stub_broken_cases));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        addr
    }

    fn client_for(addr: SocketAddr, dir: &tempfile::TempDir) -> (ApiClient, Arc<SessionStore>) {
        let session = Arc::new(SessionStore::open(dir.path().join("session.json")));
        let cache = ResponseCache::new(dir.path().join("snapshots"));
        let config = Config {
            server_url: format!("http://{}", addr),
            timeout_secs: 5,
        };
        let client = ApiClient::new(&config, session.clone(), cache).unwrap();
        (client, session)
    }

    fn stale_session(token: &str) -> Session {
        Session {
            token: token.to_string(),
            user: User {
                id: "u0".to_string(),
                email: "old@x.com".to_string(),
                first_name: String::new(),
                last_name: String::new(),
            },
        }
    }

    #[tokio::test]
    async fn test_login_success_establishes_session() {
        let addr = spawn_stub().await;
        let dir = tempfile::tempdir().unwrap();
        let (client, session) = client_for(addr, &dir);

        let established = client.login("a@x.com", "hunter2").await.unwrap();
        assert_eq!(established.user.email, "a@x.com");
        assert!(session.is_authenticated());
        assert_eq!(session.token().as_deref(), Some(TOKEN));
    }

    #[tokio::test]
    async fn test_rejected_login_leaves_stored_session_untouched() {
        let addr = spawn_stub().await;
        let dir = tempfile::tempdir().unwrap();
        let (client, session) = client_for(addr, &dir);
        session.establish(stale_session("oldtok"));

        let err = client.login("a@x.com", "wrong").await.unwrap_err();
        assert!(err.is_auth());
        assert!(session.is_authenticated());
        assert_eq!(session.token().as_deref(), Some("oldtok"));
    }

    #[tokio::test]
    async fn test_bearer_token_is_read_at_call_time() {
        let addr = spawn_stub().await;
        let dir = tempfile::tempdir().unwrap();
        let (client, session) = client_for(addr, &dir);

        client.login("a@x.com", "hunter2").await.unwrap();
        let agents = client.agents().await.unwrap();
        assert_eq!(agents.len(), 1);
        assert_eq!(agents[0].hostname, "H1");
        assert_eq!(agents[0].status, crate::models::AgentStatus::Active);

        // After the store is cleared the next request carries no token
        // and the manager rejects it.
        session.clear();
        let err = client.agents().await.unwrap_err();
        assert!(err.is_auth());
    }

    #[tokio::test]
    async fn test_unauthenticated_request_is_auth_error() {
        let addr = spawn_stub().await;
        let dir = tempfile::tempdir().unwrap();
        let (client, _session) = client_for(addr, &dir);

        let err = client.agents().await.unwrap_err();
        match err {
            ApiError::Auth(message) => assert_eq!(message, "Authorization required"),
            other => panic!("expected auth error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_alert_filter_maps_to_query_parameters() {
        let addr = spawn_stub().await;
        let dir = tempfile::tempdir().unwrap();
        let (client, _session) = client_for(addr, &dir);
        client.login("a@x.com", "hunter2").await.unwrap();

        let all = client.alerts(AlertFilter::default()).await.unwrap();
        assert_eq!(all.len(), 2);

        let filter = AlertFilter {
            severity: Some(Severity::Critical),
            status: None,
        };
        let critical = client.alerts(filter).await.unwrap();
        assert_eq!(critical.len(), 1);
        assert_eq!(critical[0].severity, Severity::Critical);
    }

    #[tokio::test]
    async fn test_dashboard_stats_decode_pascal_case() {
        let addr = spawn_stub().await;
        let dir = tempfile::tempdir().unwrap();
        let (client, _session) = client_for(addr, &dir);
        client.login("a@x.com", "hunter2").await.unwrap();

        let stats = client.dashboard_stats().await.unwrap();
        assert_eq!(stats.active_agents, 3);
        assert_eq!(stats.total_agents, 4);
        assert_eq!(stats.enabled_rules, 5);
    }

    #[tokio::test]
    async fn test_shape_mismatch_is_decode_error() {
        let addr = spawn_stub().await;
        let dir = tempfile::tempdir().unwrap();
        let (client, _session) = client_for(addr, &dir);
        client.login("a@x.com", "hunter2").await.unwrap();

        let err = client.rules().await.unwrap_err();
        assert!(matches!(err, ApiError::Decode(_)), "got {:?}", err);
    }

    #[tokio::test]
    async fn test_server_rejection_is_http_error_with_message() {
        let addr = spawn_stub().await;
        let dir = tempfile::tempdir().unwrap();
        let (client, _session) = client_for(addr, &dir);
        client.login("a@x.com", "hunter2").await.unwrap();

        let err = client.cases().await.unwrap_err();
        match err {
            ApiError::Http { status, message } => {
                assert_eq!(status, 500);
                assert_eq!(message, "database down");
            }
            other => panic!("expected http error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_unreachable_manager_is_network_error() {
        let dir = tempfile::tempdir().unwrap();
        let session = Arc::new(SessionStore::open(dir.path().join("session.json")));
        let cache = ResponseCache::new(dir.path().join("snapshots"));
        // Nothing listens on port 9 (discard).
        let config = Config {
            server_url: "http://127.0.0.1:9".to_string(),
            timeout_secs: 2,
        };
        let client = ApiClient::new(&config, session, cache).unwrap();

        let err = client.agents().await.unwrap_err();
        assert!(matches!(err, ApiError::Network(_)), "got {:?}", err);
    }

    #[tokio::test]
    async fn test_successful_fetch_writes_snapshot() {
        let addr = spawn_stub().await;
        let dir = tempfile::tempdir().unwrap();
        let (client, _session) = client_for(addr, &dir);
        client.login("a@x.com", "hunter2").await.unwrap();

        client.agents().await.unwrap();
        let (snapshot, _age) = client
            .cache()
            .load::<Vec<Agent>>(resource::AGENTS)
            .unwrap();
        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot[0].hostname, "H1");
    }
}
