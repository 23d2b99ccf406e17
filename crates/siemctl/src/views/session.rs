//! Logged-in operator view.

use crate::ui;
use siem_common::models::Session;

/// Characters of the bearer token shown before truncation.
const TOKEN_PREVIEW_CHARS: usize = 8;

pub fn render(session: &Session, server_url: &str) -> String {
    let mut out = ui::header("Session");

    let kw = 15; // key width

    out.push_str(&ui::kv("operator", &session.user.display_name(), kw));
    out.push_str(&ui::kv("email", &session.user.email, kw));
    out.push_str(&ui::kv("user_id", &session.user.id, kw));
    out.push_str(&ui::kv("manager", server_url, kw));
    out.push_str(&ui::kv("token", &token_preview(&session.token), kw));

    out.push_str(&ui::footer());
    out
}

fn token_preview(token: &str) -> String {
    let preview: String = token.chars().take(TOKEN_PREVIEW_CHARS).collect();
    if token.chars().count() > TOKEN_PREVIEW_CHARS {
        format!("{}…", preview)
    } else {
        preview
    }
}
