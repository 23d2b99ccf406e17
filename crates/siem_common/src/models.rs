//! Wire models for the SIEM Plus manager API.
//!
//! Every endpoint payload is deserialized into an explicit schema at the
//! boundary. A shape mismatch surfaces as a decode error instead of a
//! dynamic field leaking into the views.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// Authenticated operator profile, carried inside the session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    #[serde(deserialize_with = "id_string_or_number")]
    pub id: String,
    pub email: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
}

impl User {
    /// Full display name, falling back to the email when names are blank.
    pub fn display_name(&self) -> String {
        let name = format!("{} {}", self.first_name, self.last_name);
        let name = name.trim();
        if name.is_empty() {
            self.email.clone()
        } else {
            name.to_string()
        }
    }
}

/// Login request body for `POST /auth/login`.
#[derive(Debug, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// A logged-in session: the bearer token plus the operator it belongs to.
///
/// This is both the login response payload and the state persisted by the
/// session store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
    pub user: User,
}

/// Agent lifecycle state as reported by the manager.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AgentStatus {
    Active,
    Offline,
    Pending,
    #[serde(other)]
    Unknown,
}

impl AgentStatus {
    pub fn label(self) -> &'static str {
        match self {
            AgentStatus::Active => "Active",
            AgentStatus::Offline => "Offline",
            AgentStatus::Pending => "Pending",
            AgentStatus::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for AgentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let wire = match self {
            AgentStatus::Active => "active",
            AgentStatus::Offline => "offline",
            AgentStatus::Pending => "pending",
            AgentStatus::Unknown => "unknown",
        };
        write!(f, "{}", wire)
    }
}

/// A monitored endpoint reporting into the platform.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Agent {
    #[serde(deserialize_with = "id_string_or_number")]
    pub id: String,
    pub hostname: String,
    pub status: AgentStatus,
    #[serde(default)]
    pub ip_address: Option<String>,
    #[serde(default)]
    pub os_type: Option<String>,
    #[serde(default)]
    pub agent_version: Option<String>,
    #[serde(default)]
    pub last_seen: Option<DateTime<Utc>>,
}

/// Detection severity, shared by alerts, rules and cases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Critical,
    High,
    Medium,
    Low,
    #[serde(other)]
    Unknown,
}

impl Severity {
    pub fn label(self) -> &'static str {
        match self {
            Severity::Critical => "Critical",
            Severity::High => "High",
            Severity::Medium => "Medium",
            Severity::Low => "Low",
            Severity::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let wire = match self {
            Severity::Critical => "critical",
            Severity::High => "high",
            Severity::Medium => "medium",
            Severity::Low => "low",
            Severity::Unknown => "unknown",
        };
        write!(f, "{}", wire)
    }
}

impl FromStr for Severity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "critical" => Ok(Severity::Critical),
            "high" => Ok(Severity::High),
            "medium" => Ok(Severity::Medium),
            "low" => Ok(Severity::Low),
            other => Err(format!(
                "unknown severity '{}' (expected critical, high, medium or low)",
                other
            )),
        }
    }
}

/// Alert triage state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertStatus {
    Open,
    Investigating,
    Resolved,
    FalsePositive,
    #[serde(other)]
    Unknown,
}

impl AlertStatus {
    pub fn label(self) -> &'static str {
        match self {
            AlertStatus::Open => "Open",
            AlertStatus::Investigating => "Investigating",
            AlertStatus::Resolved => "Resolved",
            AlertStatus::FalsePositive => "False Positive",
            AlertStatus::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for AlertStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let wire = match self {
            AlertStatus::Open => "open",
            AlertStatus::Investigating => "investigating",
            AlertStatus::Resolved => "resolved",
            AlertStatus::FalsePositive => "false_positive",
            AlertStatus::Unknown => "unknown",
        };
        write!(f, "{}", wire)
    }
}

impl FromStr for AlertStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "open" => Ok(AlertStatus::Open),
            "investigating" => Ok(AlertStatus::Investigating),
            "resolved" => Ok(AlertStatus::Resolved),
            "false_positive" => Ok(AlertStatus::FalsePositive),
            other => Err(format!(
                "unknown alert status '{}' (expected open, investigating, resolved or false_positive)",
                other
            )),
        }
    }
}

/// A detection event produced by a rule against agent telemetry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Alert {
    #[serde(deserialize_with = "id_string_or_number")]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub severity: Severity,
    pub status: AlertStatus,
    #[serde(default)]
    pub rule_name: Option<String>,
    #[serde(default)]
    pub hostname: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Case lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CaseStatus {
    Open,
    Investigating,
    Closed,
    #[serde(other)]
    Unknown,
}

impl CaseStatus {
    pub fn label(self) -> &'static str {
        match self {
            CaseStatus::Open => "Open",
            CaseStatus::Investigating => "Investigating",
            CaseStatus::Closed => "Closed",
            CaseStatus::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for CaseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let wire = match self {
            CaseStatus::Open => "open",
            CaseStatus::Investigating => "investigating",
            CaseStatus::Closed => "closed",
            CaseStatus::Unknown => "unknown",
        };
        write!(f, "{}", wire)
    }
}

/// A grouping of alerts under investigation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Case {
    #[serde(deserialize_with = "id_string_or_number")]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub severity: Severity,
    pub status: CaseStatus,
    #[serde(default)]
    pub alert_count: i64,
    #[serde(default)]
    pub assigned_to_email: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// A detection definition evaluated against telemetry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Rule {
    #[serde(deserialize_with = "id_string_or_number")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub rule_type: String,
    pub severity: Severity,
    pub enabled: bool,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Dashboard counters.
///
/// The manager emits these in PascalCase, unlike every other entity; the
/// wire casing is preserved here rather than normalized. `TotalCases` and
/// `OpenCases` are reported by newer managers only, so they default to
/// zero when absent.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct DashboardStats {
    pub total_agents: i64,
    pub active_agents: i64,
    pub total_alerts: i64,
    pub open_alerts: i64,
    pub critical_alerts: i64,
    pub total_cases: i64,
    pub open_cases: i64,
    pub total_rules: i64,
    pub enabled_rules: i64,
}

/// `GET /agents` envelope.
#[derive(Debug, Default, Deserialize)]
pub struct AgentList {
    #[serde(default)]
    pub agents: Vec<Agent>,
}

/// `GET /alerts` envelope.
#[derive(Debug, Default, Deserialize)]
pub struct AlertList {
    #[serde(default)]
    pub alerts: Vec<Alert>,
}

/// `GET /rules` envelope.
#[derive(Debug, Default, Deserialize)]
pub struct RuleList {
    #[serde(default)]
    pub rules: Vec<Rule>,
}

/// `GET /cases` envelope.
#[derive(Debug, Default, Deserialize)]
pub struct CaseList {
    #[serde(default)]
    pub cases: Vec<Case>,
}

/// Rejection envelope the manager attaches to non-2xx responses.
#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

/// Entity ids arrive as UUID strings from the manager but as integers in
/// some legacy payloads; accept both.
fn id_string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(i64),
        Text(String),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Number(n) => n.to_string(),
        Raw::Text(s) => s,
    })
}
