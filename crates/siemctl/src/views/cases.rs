//! Case cards.

use super::format_date;
use crate::ui::{self, colors};
use siem_common::models::Case;

pub fn render(cases: &[Case]) -> String {
    let mut out = ui::header("Cases");

    if cases.is_empty() {
        out.push_str("  No cases found\n");
        out.push_str(&format!(
            "  {}Create a case to track security incidents{}\n",
            colors::DIM,
            colors::RESET
        ));
        out.push_str(&ui::footer());
        return out;
    }

    for case in cases {
        out.push_str(&format!(
            "  {}{}{}  {}  {}\n",
            colors::BOLD,
            case.title,
            colors::RESET,
            ui::severity_badge(case.severity),
            ui::case_status_badge(case.status),
        ));

        if !case.description.is_empty() {
            out.push_str(&format!(
                "  {}{}{}\n",
                colors::DIM,
                case.description,
                colors::RESET
            ));
        }

        out.push_str(&format!(
            "  {}alerts: {}   assigned: {}   created: {}{}\n\n",
            colors::DIM,
            case.alert_count,
            case.assigned_to_email.as_deref().unwrap_or("Unassigned"),
            format_date(&case.created_at),
            colors::RESET
        ));
    }

    out.push_str(&ui::footer());
    out
}
