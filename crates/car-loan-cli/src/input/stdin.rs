use serde::de::DeserializeOwned;
use std::io::{self, Read};

/// Read a piped loan configuration from stdin straight into `T`.
/// Returns None when stdin is a TTY or the pipe is empty.
pub fn read_stdin<T: DeserializeOwned>() -> Result<Option<T>, Box<dyn std::error::Error>> {
    if atty::is(atty::Stream::Stdin) {
        return Ok(None);
    }

    let mut buffer = String::new();
    io::stdin().read_to_string(&mut buffer)?;
    parse_piped(&buffer)
}

fn parse_piped<T: DeserializeOwned>(text: &str) -> Result<Option<T>, Box<dyn std::error::Error>> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    log::debug!("read {} bytes of configuration from stdin", trimmed.len());
    let value: T = serde_json::from_str(trimmed)
        .map_err(|e| format!("Failed to parse stdin configuration: {}", e))?;
    Ok(Some(value))
}
