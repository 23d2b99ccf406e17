//! Agent inventory table.

use super::{column_width, format_ts};
use crate::ui::{self, colors};
use siem_common::models::Agent;

pub fn render(agents: &[Agent]) -> String {
    let mut out = ui::header("Agents");

    if agents.is_empty() {
        out.push_str("  No agents found\n");
        out.push_str(&format!(
            "  {}Deploy your first agent to start monitoring{}\n",
            colors::DIM,
            colors::RESET
        ));
        out.push_str(&ui::footer());
        return out;
    }

    let host_w = column_width("AGENT", agents.iter().map(|a| a.hostname.as_str()));
    let status_w = column_width("STATUS", agents.iter().map(|a| a.status.label()));
    let ip_w = column_width(
        "IP ADDRESS",
        agents.iter().map(|a| a.ip_address.as_deref().unwrap_or("N/A")),
    );
    let os_w = column_width(
        "OS",
        agents.iter().map(|a| a.os_type.as_deref().unwrap_or("Unknown")),
    );
    let ver_w = column_width(
        "VERSION",
        agents
            .iter()
            .map(|a| a.agent_version.as_deref().unwrap_or("N/A")),
    );

    out.push_str(&format!(
        "  {}{}  {}  {}  {}  {}  {}{}\n",
        colors::DIM,
        ui::pad("AGENT", host_w),
        ui::pad("STATUS", status_w),
        ui::pad("IP ADDRESS", ip_w),
        ui::pad("OS", os_w),
        ui::pad("VERSION", ver_w),
        "LAST SEEN",
        colors::RESET
    ));

    for agent in agents {
        let last_seen = agent
            .last_seen
            .map(|ts| format_ts(&ts))
            .unwrap_or_else(|| "Never".to_string());

        out.push_str(&format!(
            "  {}  {}  {}  {}  {}  {}\n",
            ui::pad(&agent.hostname, host_w),
            ui::paint(
                &ui::pad(agent.status.label(), status_w),
                ui::agent_status_color(agent.status)
            ),
            ui::pad(agent.ip_address.as_deref().unwrap_or("N/A"), ip_w),
            ui::pad(agent.os_type.as_deref().unwrap_or("Unknown"), os_w),
            ui::pad(agent.agent_version.as_deref().unwrap_or("N/A"), ver_w),
            last_seen,
        ));
    }

    out.push_str(&ui::footer());
    out
}
