//! Common utilities for output formatters

use serde::Serialize;

/// Placeholder shown instead of a sensitive value
pub const MASKED: &str = "(sensitive)";

/// Print any serializable state as pretty JSON
pub fn output_json<T: Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Error serializing to JSON: {}", e),
    }
}

/// Render a boolean the way tables show it
pub fn yes_no(value: bool) -> &'static str {
    if value {
        "Yes"
    } else {
        "No"
    }
}
