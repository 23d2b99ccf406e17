//! Command handlers for siemctl.
//!
//! Handlers catch API failures and surface them as rendered messages plus
//! exit codes instead of propagating into the caller; only unexpected
//! local errors bubble up as `anyhow`.

use crate::errors::{
    exit_code_for, EXIT_AUTH_REQUIRED, EXIT_GENERAL_ERROR, EXIT_SERVER_UNAVAILABLE, EXIT_SUCCESS,
};
use crate::guard::{Access, Route, RouteGuard};
use crate::prompt;
use crate::ui::{self, colors};
use crate::views;
use anyhow::{Context as _, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use siem_common::cache::resource;
use siem_common::models::{Agent, Alert, AlertStatus, Case, DashboardStats, Rule, Severity};
use siem_common::{AlertFilter, ApiClient, ApiError, Config, ResponseCache, SessionStore};
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Everything a command needs: the client, the session store it reads,
/// and the guard in front of the views. Built once per invocation.
pub struct Console {
    pub client: ApiClient,
    pub session: Arc<SessionStore>,
    pub guard: RouteGuard,
    pub server_url: String,
}

impl Console {
    pub fn init(server_override: Option<String>) -> Result<Self> {
        let mut config = Config::load();
        if let Some(server) = server_override {
            if !server.is_empty() {
                config.server_url = server;
            }
        }

        debug!("Using manager at {}", config.server_url);
        let session = Arc::new(SessionStore::open(SessionStore::default_path()));
        let cache = ResponseCache::new(ResponseCache::default_dir());
        let client = ApiClient::new(&config, session.clone(), cache)?;
        let guard = RouteGuard::new(session.clone());

        Ok(Self {
            client,
            session,
            guard,
            server_url: config.server_url,
        })
    }
}

/// Handle login command
pub async fn login(
    console: &Console,
    email: Option<String>,
    password: Option<String>,
) -> Result<i32> {
    if console.guard.resolve(Route::Login) == Access::RedirectToDefault {
        let who = console
            .session
            .current()
            .map(|s| s.user.email)
            .unwrap_or_default();
        println!(
            "  {}Already logged in as {}; showing dashboard{}",
            colors::DIM,
            who,
            colors::RESET
        );
        return dashboard(console, false).await;
    }

    let email = match email {
        Some(value) => value,
        None => prompt::read_email()?,
    };
    let password = match password {
        Some(value) => value,
        None => prompt::read_password()?,
    };

    if email.trim().is_empty() || password.is_empty() {
        ui::print_err("Email and password are required");
        return Ok(EXIT_GENERAL_ERROR);
    }

    match console.client.login(email.trim(), &password).await {
        Ok(session) => {
            ui::print_ok(&format!("Logged in as {}", session.user.email));
            Ok(EXIT_SUCCESS)
        }
        Err(ApiError::Auth(_)) => {
            ui::print_err("Invalid credentials");
            Ok(EXIT_AUTH_REQUIRED)
        }
        Err(err) => Ok(report_failure("log in", err)),
    }
}

/// Handle logout command. Always succeeds, regardless of prior state.
pub fn logout(console: &Console) -> Result<i32> {
    console.session.clear();
    ui::print_ok("Logged out");
    Ok(EXIT_SUCCESS)
}

/// Handle whoami command
pub fn whoami(console: &Console) -> Result<i32> {
    match console.session.current() {
        Some(session) => {
            print!("{}", views::session::render(&session, &console.server_url));
            Ok(EXIT_SUCCESS)
        }
        None => {
            ui::print_err("Not logged in. Run `siemctl login` first.");
            Ok(EXIT_AUTH_REQUIRED)
        }
    }
}

/// Handle dashboard command
pub async fn dashboard(console: &Console, json: bool) -> Result<i32> {
    if let Some(code) = require_auth(console, Route::Dashboard) {
        return Ok(code);
    }

    match console.client.dashboard_stats().await {
        Ok(stats) => emit(&stats, json, |s: &DashboardStats| views::dashboard::render(s)),
        Err(ApiError::Network(reason)) => network_fallback::<DashboardStats>(
            console,
            resource::DASHBOARD_STATS,
            &reason,
            json,
            |s| views::dashboard::render(s),
        ),
        Err(err) => Ok(auth_aware_failure(console, "load dashboard stats", err)),
    }
}

/// Handle agents command
pub async fn agents(console: &Console, json: bool) -> Result<i32> {
    if let Some(code) = require_auth(console, Route::Agents) {
        return Ok(code);
    }

    match console.client.agents().await {
        Ok(agents) => emit(&agents, json, |a: &Vec<Agent>| views::agents::render(a)),
        Err(ApiError::Network(reason)) => network_fallback::<Vec<Agent>>(
            console,
            resource::AGENTS,
            &reason,
            json,
            |a| views::agents::render(a),
        ),
        Err(err) => Ok(auth_aware_failure(console, "load agents", err)),
    }
}

/// Handle alerts command
pub async fn alerts(
    console: &Console,
    severity: Option<String>,
    status: Option<String>,
    json: bool,
) -> Result<i32> {
    if let Some(code) = require_auth(console, Route::Alerts) {
        return Ok(code);
    }

    let mut filter = AlertFilter::default();
    if let Some(raw) = severity {
        match raw.parse::<Severity>() {
            Ok(value) => filter.severity = Some(value),
            Err(message) => {
                ui::print_err(&message);
                return Ok(EXIT_GENERAL_ERROR);
            }
        }
    }
    if let Some(raw) = status {
        match raw.parse::<AlertStatus>() {
            Ok(value) => filter.status = Some(value),
            Err(message) => {
                ui::print_err(&message);
                return Ok(EXIT_GENERAL_ERROR);
            }
        }
    }

    match console.client.alerts(filter).await {
        Ok(alerts) => emit(&alerts, json, |a: &Vec<Alert>| views::alerts::render(a)),
        Err(ApiError::Network(reason)) => network_fallback::<Vec<Alert>>(
            console,
            resource::ALERTS,
            &reason,
            json,
            |a| views::alerts::render(a),
        ),
        Err(err) => Ok(auth_aware_failure(console, "load alerts", err)),
    }
}

/// Handle rules command
pub async fn rules(console: &Console, json: bool) -> Result<i32> {
    if let Some(code) = require_auth(console, Route::Rules) {
        return Ok(code);
    }

    match console.client.rules().await {
        Ok(rules) => emit(&rules, json, |r: &Vec<Rule>| views::rules::render(r)),
        Err(ApiError::Network(reason)) => network_fallback::<Vec<Rule>>(
            console,
            resource::RULES,
            &reason,
            json,
            |r| views::rules::render(r),
        ),
        Err(err) => Ok(auth_aware_failure(console, "load rules", err)),
    }
}

/// Handle cases command
pub async fn cases(console: &Console, json: bool) -> Result<i32> {
    if let Some(code) = require_auth(console, Route::Cases) {
        return Ok(code);
    }

    match console.client.cases().await {
        Ok(cases) => emit(&cases, json, |c: &Vec<Case>| views::cases::render(c)),
        Err(ApiError::Network(reason)) => network_fallback::<Vec<Case>>(
            console,
            resource::CASES,
            &reason,
            json,
            |c| views::cases::render(c),
        ),
        Err(err) => Ok(auth_aware_failure(console, "load cases", err)),
    }
}

/// Handle cache clear command
pub fn cache_clear(console: &Console) -> Result<i32> {
    let removed = console
        .client
        .cache()
        .invalidate_all()
        .context("Failed to clear snapshots")?;
    ui::print_ok(&format!(
        "Removed {} snapshot{}",
        removed,
        if removed == 1 { "" } else { "s" }
    ));
    Ok(EXIT_SUCCESS)
}

/// Gate a protected view on the session store.
fn require_auth(console: &Console, route: Route) -> Option<i32> {
    match console.guard.resolve(route) {
        Access::RedirectToLogin => {
            ui::print_err("Not logged in. Run `siemctl login` first.");
            Some(EXIT_AUTH_REQUIRED)
        }
        _ => None,
    }
}

fn emit<T: Serialize>(data: &T, json: bool, render: impl Fn(&T) -> String) -> Result<i32> {
    if json {
        let encoded = serde_json::to_string_pretty(data).context("Failed to encode JSON")?;
        println!("{}", encoded);
    } else {
        print!("{}", render(data));
    }
    Ok(EXIT_SUCCESS)
}

/// An auth rejection on an authenticated call drops the session; repeated
/// rejections transition at most once.
fn auth_aware_failure(console: &Console, action: &str, err: ApiError) -> i32 {
    if err.is_auth() {
        if console.guard.force_logout() {
            ui::print_err("Session rejected by the manager; logged out. Run `siemctl login` again.");
        } else {
            ui::print_err(&err.to_string());
        }
        return EXIT_AUTH_REQUIRED;
    }
    report_failure(action, err)
}

fn report_failure(action: &str, err: ApiError) -> i32 {
    ui::print_err(&format!("Failed to {}: {}", action, err));
    exit_code_for(&err)
}

/// When the manager is unreachable, fall back to the last snapshot,
/// clearly labeled as cached.
fn network_fallback<T: DeserializeOwned + Serialize>(
    console: &Console,
    key: &str,
    reason: &str,
    json: bool,
    render: impl Fn(&T) -> String,
) -> Result<i32> {
    match console.client.cache().load::<T>(key) {
        Some((snapshot, age)) => {
            ui::print_warn(&format!(
                "Manager unreachable ({}); showing snapshot from {} ago",
                reason,
                format_age(age)
            ));
            emit(&snapshot, json, render)
        }
        None => {
            ui::print_err(&format!("Failed to load {}: {}", key, reason));
            Ok(EXIT_SERVER_UNAVAILABLE)
        }
    }
}

fn format_age(age: Duration) -> String {
    let secs = age.as_secs();
    if secs < 60 {
        format!("{}s", secs)
    } else {
        format!("{}m {}s", secs / 60, secs % 60)
    }
}
