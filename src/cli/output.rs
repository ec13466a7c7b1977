//! Printing command results for people (text) or scripts (JSON)

use std::io::Write;

use anyhow::Result;
use serde::Serialize;

/// How command results are printed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

/// Print `value` on stdout, as pretty JSON or as the text built by `as_text`
pub fn print_formatted<T, F>(value: &T, format: OutputFormat, as_text: F) -> Result<()>
where
    T: Serialize,
    F: FnOnce(&T) -> String,
{
    let mut out = std::io::stdout().lock();
    write_formatted(&mut out, value, format, as_text)
}

fn write_formatted<W, T, F>(out: &mut W, value: &T, format: OutputFormat, as_text: F) -> Result<()>
where
    W: Write,
    T: Serialize,
    F: FnOnce(&T) -> String,
{
    match format {
        OutputFormat::Text => writeln!(out, "{}", as_text(value))?,
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, value)?;
            writeln!(out)?;
        }
    }
    Ok(())
}

/// Confirmation line for a finished change; silent with `--quiet`
pub fn print_done(message: &str, quiet: bool) {
    if !quiet {
        println!("✔ {}", message);
    }
}

/// Error line on stderr, never silenced
pub fn print_error(message: &str) {
    eprintln!("Error: {}", message);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Serialize)]
    struct Listing {
        documents: Vec<&'static str>,
    }

    #[test]
    fn test_text_uses_formatter() {
        let mut out = Vec::new();
        let listing = Listing { documents: vec!["a.pdf"] };
        write_formatted(&mut out, &listing, OutputFormat::Text, |l| l.documents.join(", ")).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "a.pdf\n");
    }

    #[test]
    fn test_json_ignores_formatter() {
        let mut out = Vec::new();
        let listing = Listing { documents: vec!["a.pdf"] };
        write_formatted(&mut out, &listing, OutputFormat::Json, |_| unreachable!()).unwrap();

        let parsed: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(parsed, serde_json::json!({ "documents": ["a.pdf"] }));
    }
}
