//! Interactive login prompts.

use anyhow::{Context, Result};
use owo_colors::OwoColorize;
use std::io::{self, BufRead, Write};

/// Read the operator's email from stdin.
pub fn read_email() -> Result<String> {
    print!("{}: ", "email".bright_white());
    io::stdout().flush().context("Failed to flush prompt")?;

    let mut line = String::new();
    io::stdin()
        .lock()
        .read_line(&mut line)
        .context("Failed to read email")?;
    Ok(line.trim().to_string())
}

/// Read the password without echoing it back.
pub fn read_password() -> Result<String> {
    let term = console::Term::stderr();
    term.write_str(&format!("{}: ", "password".bright_white()))
        .context("Failed to write prompt")?;
    term.read_secure_line().context("Failed to read password")
}
