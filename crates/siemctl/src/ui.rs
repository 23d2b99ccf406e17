//! Terminal UI helpers for consistent output styling.

use siem_common::models::{AgentStatus, AlertStatus, CaseStatus, Severity};

/// ANSI color codes using true color (24-bit)
pub mod colors {
    pub const HEADER: &str = "\x1b[38;2;255;210;120m";
    pub const OK: &str = "\x1b[38;2;120;255;120m";
    pub const ERR: &str = "\x1b[38;2;255;100;100m";
    pub const WARN: &str = "\x1b[38;2;255;200;100m";
    pub const YELLOW: &str = "\x1b[38;2;240;220;100m";
    pub const DIM: &str = "\x1b[38;2;140;140;140m";
    pub const CYAN: &str = "\x1b[38;2;100;200;255m";
    pub const BOLD: &str = "\x1b[1m";
    pub const RESET: &str = "\x1b[0m";
}

/// Unicode symbols
pub mod symbols {
    pub const OK: &str = "✓";
    pub const ERR: &str = "✗";
    pub const WARN: &str = "!";
}

/// Horizontal rule
pub const HR: &str =
    "──────────────────────────────────────────────────────────────────────────────";

/// Wrap text in a color, resetting afterwards.
pub fn paint(text: &str, color: &str) -> String {
    format!("{}{}{}", color, text, colors::RESET)
}

/// Left-pad plain text to a column width. Pad before painting: escape
/// codes count toward `{:width$}` otherwise.
pub fn pad(text: &str, width: usize) -> String {
    format!("{:width$}", text, width = width)
}

/// Styled view header with horizontal rule.
pub fn header(title: &str) -> String {
    format!(
        "\n{}{}{}\n{}{}{}\n",
        colors::HEADER,
        title,
        colors::RESET,
        colors::DIM,
        HR,
        colors::RESET
    )
}

/// View footer with horizontal rule.
pub fn footer() -> String {
    format!("{}{}{}\n", colors::DIM, HR, colors::RESET)
}

/// Aligned key-value line for overview blocks.
pub fn kv(key: &str, value: &str, key_width: usize) -> String {
    format!("  {:width$} {}\n", key, value, width = key_width)
}

/// Print an OK line with checkmark
pub fn print_ok(message: &str) {
    println!(
        "  {}{}{} {}",
        colors::OK,
        symbols::OK,
        colors::RESET,
        message
    );
}

/// Print an error line with X
pub fn print_err(message: &str) {
    println!(
        "  {}{}{} {}",
        colors::ERR,
        symbols::ERR,
        colors::RESET,
        message
    );
}

/// Print a warning line
pub fn print_warn(message: &str) {
    println!(
        "  {}{}{} {}",
        colors::WARN,
        symbols::WARN,
        colors::RESET,
        message
    );
}

pub fn severity_color(severity: Severity) -> &'static str {
    match severity {
        Severity::Critical => colors::ERR,
        Severity::High => colors::WARN,
        Severity::Medium => colors::YELLOW,
        Severity::Low => colors::CYAN,
        Severity::Unknown => colors::DIM,
    }
}

pub fn severity_badge(severity: Severity) -> String {
    paint(severity.label(), severity_color(severity))
}

pub fn agent_status_color(status: AgentStatus) -> &'static str {
    match status {
        AgentStatus::Active => colors::OK,
        AgentStatus::Offline => colors::DIM,
        AgentStatus::Pending => colors::YELLOW,
        AgentStatus::Unknown => colors::DIM,
    }
}

pub fn alert_status_color(status: AlertStatus) -> &'static str {
    match status {
        AlertStatus::Open => colors::ERR,
        AlertStatus::Investigating => colors::YELLOW,
        AlertStatus::Resolved => colors::OK,
        AlertStatus::FalsePositive => colors::DIM,
        AlertStatus::Unknown => colors::DIM,
    }
}

pub fn alert_status_badge(status: AlertStatus) -> String {
    paint(status.label(), alert_status_color(status))
}

pub fn case_status_color(status: CaseStatus) -> &'static str {
    match status {
        CaseStatus::Open => colors::ERR,
        CaseStatus::Investigating => colors::YELLOW,
        CaseStatus::Closed => colors::OK,
        CaseStatus::Unknown => colors::DIM,
    }
}

pub fn case_status_badge(status: CaseStatus) -> String {
    paint(status.label(), case_status_color(status))
}
