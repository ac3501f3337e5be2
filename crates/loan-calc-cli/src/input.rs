use std::error::Error;
use std::fs;
use std::io::{self, Read};
use std::path::Path;

use serde::de::DeserializeOwned;

/// Read a request payload from `--input <file>` or, failing that, from piped
/// stdin. `Ok(None)` means neither source supplied anything.
pub fn read_input<T: DeserializeOwned>(path: Option<&Path>) -> Result<Option<T>, Box<dyn Error>> {
    if let Some(path) = path {
        return read_json_file(path).map(Some);
    }
    match read_piped_stdin()? {
        Some(contents) => Ok(Some(serde_json::from_str(&contents)?)),
        None => Ok(None),
    }
}

/// Deserialise a JSON file into `T`.
pub fn read_json_file<T: DeserializeOwned>(path: &Path) -> Result<T, Box<dyn Error>> {
    if !path.is_file() {
        return Err(format!("Not a readable file: {}", path.display()).into());
    }
    let contents = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read '{}': {}", path.display(), e))?;
    let value = serde_json::from_str(&contents)
        .map_err(|e| format!("Failed to parse '{}': {}", path.display(), e))?;
    Ok(value)
}

/// Everything on stdin when it is a pipe; `None` on a TTY or empty input.
fn read_piped_stdin() -> io::Result<Option<String>> {
    if atty::is(atty::Stream::Stdin) {
        return Ok(None);
    }
    let mut buffer = String::new();
    io::stdin().read_to_string(&mut buffer)?;
    let trimmed = buffer.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    Ok(Some(trimmed.to_string()))
}
