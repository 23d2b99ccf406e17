//! Alert cards.

use super::format_ts;
use crate::ui::{self, colors};
use siem_common::models::Alert;

pub fn render(alerts: &[Alert]) -> String {
    let mut out = ui::header("Alerts");

    if alerts.is_empty() {
        out.push_str("  No alerts found\n");
        out.push_str(&format!(
            "  {}All systems are operating normally{}\n",
            colors::DIM,
            colors::RESET
        ));
        out.push_str(&ui::footer());
        return out;
    }

    for alert in alerts {
        out.push_str(&format!(
            "  {}{}{}  {}  {}\n",
            colors::BOLD,
            alert.title,
            colors::RESET,
            ui::severity_badge(alert.severity),
            ui::alert_status_badge(alert.status),
        ));

        if !alert.description.is_empty() {
            out.push_str(&format!(
                "  {}{}{}\n",
                colors::DIM,
                alert.description,
                colors::RESET
            ));
        }

        out.push_str(&format!(
            "  {}rule: {}   agent: {}   {}{}\n\n",
            colors::DIM,
            alert.rule_name.as_deref().unwrap_or("Unknown"),
            alert.hostname.as_deref().unwrap_or("N/A"),
            format_ts(&alert.created_at),
            colors::RESET
        ));
    }

    out.push_str(&ui::footer());
    out
}
