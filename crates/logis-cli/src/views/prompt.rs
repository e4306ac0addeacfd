//! Interactive input on stdin

use anyhow::{Result, bail};
use std::io::{self, BufRead, Write};

/// Ask for one line of input; the trailing newline is dropped
pub fn ask(label: &str) -> Result<String> {
    let mut out = io::stderr();
    write!(out, "{}: ", label)?;
    out.flush()?;

    let mut line = String::new();
    if io::stdin().lock().read_line(&mut line)? == 0 {
        bail!("No input for {}", label.to_lowercase());
    }
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

/// Use the given value, or ask for it
pub fn value_or_ask(value: Option<String>, label: &str) -> Result<String> {
    match value {
        Some(value) => Ok(value),
        None => ask(label),
    }
}

/// Ask a yes/no question; anything but `y`/`yes` is a no
pub fn confirm(question: &str, assume_yes: bool) -> Result<bool> {
    if assume_yes {
        return Ok(true);
    }
    let answer = ask(&format!("{} [y/N]", question))?;
    Ok(is_yes(&answer))
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}
