//! Security overview and key metrics.

use crate::ui::{self, colors};
use siem_common::models::DashboardStats;

pub fn render(stats: &DashboardStats) -> String {
    let mut out = ui::header("Dashboard");

    let kw = 15; // key width

    out.push_str(&ui::kv(
        "agents",
        &format!(
            "{}{}{} active / {} total",
            colors::OK,
            stats.active_agents,
            colors::RESET,
            stats.total_agents
        ),
        kw,
    ));

    out.push_str(&ui::kv(
        "alerts",
        &format!(
            "{}{}{} open / {} total",
            colors::WARN,
            stats.open_alerts,
            colors::RESET,
            stats.total_alerts
        ),
        kw,
    ));

    let critical_color = if stats.critical_alerts > 0 {
        colors::ERR
    } else {
        colors::OK
    };
    out.push_str(&ui::kv(
        "critical",
        &format!(
            "{}{}{} open critical",
            critical_color, stats.critical_alerts, colors::RESET
        ),
        kw,
    ));

    out.push_str(&ui::kv(
        "rules",
        &format!(
            "{}{}{} enabled / {} total",
            colors::OK,
            stats.enabled_rules,
            colors::RESET,
            stats.total_rules
        ),
        kw,
    ));

    out.push_str(&ui::kv(
        "cases",
        &format!(
            "{}{}{} open / {} total",
            colors::WARN,
            stats.open_cases,
            colors::RESET,
            stats.total_cases
        ),
        kw,
    ));

    out.push_str(&ui::footer());
    out
}
