//! Detection rule table.

use super::column_width;
use crate::ui::{self, colors};
use siem_common::models::Rule;

/// Tags shown inline before collapsing into a +N suffix.
const MAX_INLINE_TAGS: usize = 3;

pub fn render(rules: &[Rule]) -> String {
    let mut out = ui::header("Detection Rules");

    if rules.is_empty() {
        out.push_str("  No detection rules configured\n");
        out.push_str(&format!(
            "  {}Create your first rule to start detecting threats{}\n",
            colors::DIM,
            colors::RESET
        ));
        out.push_str(&ui::footer());
        return out;
    }

    let name_w = column_width("RULE NAME", rules.iter().map(|r| r.name.as_str()));
    let type_w = column_width("TYPE", rules.iter().map(|r| r.rule_type.as_str()));
    let sev_w = column_width("SEVERITY", rules.iter().map(|r| r.severity.label()));
    let status_w = "Disabled".len();

    out.push_str(&format!(
        "  {}{}  {}  {}  {}  {}{}\n",
        colors::DIM,
        ui::pad("RULE NAME", name_w),
        ui::pad("TYPE", type_w),
        ui::pad("SEVERITY", sev_w),
        ui::pad("STATUS", status_w),
        "TAGS",
        colors::RESET
    ));

    for rule in rules {
        let status = if rule.enabled {
            ui::paint(&ui::pad("Enabled", status_w), colors::OK)
        } else {
            ui::paint(&ui::pad("Disabled", status_w), colors::DIM)
        };

        out.push_str(&format!(
            "  {}  {}  {}  {}  {}\n",
            ui::pad(&rule.name, name_w),
            ui::pad(&rule.rule_type, type_w),
            ui::paint(
                &ui::pad(rule.severity.label(), sev_w),
                ui::severity_color(rule.severity)
            ),
            status,
            format_tags(&rule.tags),
        ));

        if !rule.description.is_empty() {
            out.push_str(&format!(
                "  {}{}{}\n",
                colors::DIM,
                rule.description,
                colors::RESET
            ));
        }
    }

    out.push_str(&ui::footer());
    out
}

fn format_tags(tags: &[String]) -> String {
    if tags.is_empty() {
        return "-".to_string();
    }

    let shown = tags
        .iter()
        .take(MAX_INLINE_TAGS)
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(", ");

    if tags.len() > MAX_INLINE_TAGS {
        format!("{} +{}", shown, tags.len() - MAX_INLINE_TAGS)
    } else {
        shown
    }
}
