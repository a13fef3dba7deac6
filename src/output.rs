//! JSON output for command results.
//!
//! Every command prints one pretty-printed JSON document to stdout; logs go
//! to stderr so the output can be piped.

use serde::Serialize;
use std::error::Error;
use std::io::Write;

/// Serialize `value` as pretty JSON followed by a newline.
pub fn write_json<T: Serialize + ?Sized, W: Write>(
    value: &T,
    mut writer: W,
) -> Result<(), Box<dyn Error>> {
    serde_json::to_writer_pretty(&mut writer, value)?;
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}

/// [`write_json`] to stdout.
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<(), Box<dyn Error>> {
    write_json(value, std::io::stdout().lock())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Sentiment, SentimentResult};

    #[test]
    fn test_write_json() {
        let mut buf = Vec::new();
        let result = SentimentResult {
            weighted_sum: -1.25,
            overall_sentiment: Sentiment::Negative,
        };
        write_json(&result, &mut buf).unwrap();

        let text = String::from_utf8(buf).unwrap();
        assert!(text.ends_with("}\n"));
        let back: SentimentResult = serde_json::from_str(&text).unwrap();
        assert_eq!(back, result);
    }
}
