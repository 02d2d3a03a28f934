use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};

/// Indentation used when pretty-printing generated JSON.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Indent {
    Tab,
    Spaces(usize),
}

/// Pretty-print `value` with the given indentation. No trailing newline.
pub fn to_json_string<T: Serialize>(value: &T, indent: Indent) -> Result<String> {
    let indent = match indent {
        Indent::Tab => "\t".to_string(),
        Indent::Spaces(width) => " ".repeat(width),
    };

    let mut buffer = Vec::new();
    let formatter = PrettyFormatter::with_indent(indent.as_bytes());
    let mut serializer = Serializer::with_formatter(&mut buffer, formatter);
    value
        .serialize(&mut serializer)
        .context("Failed to serialize JSON")?;

    String::from_utf8(buffer).context("Serialized JSON is not valid UTF-8")
}
