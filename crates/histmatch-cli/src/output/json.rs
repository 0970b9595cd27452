//! JSON output adapter.

use anyhow::Result;
use histmatch_core::{MatchResult, ResultOutput};
use serde::Serialize;
use std::io::{self, Write};
use std::sync::Mutex;

/// JSON and JSON Lines output adapter.
pub struct JsonOutput {
    writer: Mutex<Box<dyn Write + Send>>,
}

impl JsonOutput {
    /// Creates a new JSON output writing to stdout.
    #[must_use]
    pub fn stdout() -> Self {
        Self::new(Box::new(io::stdout()))
    }

    /// Creates a new JSON output writing to the given writer.
    #[must_use]
    pub fn new(writer: Box<dyn Write + Send>) -> Self {
        Self {
            writer: Mutex::new(writer),
        }
    }

    /// Writes one value as a single JSON line.
    pub fn write_line<T: Serialize>(&self, value: &T) -> Result<()> {
        let json = serde_json::to_string(value)?;
        self.emit(&json)
    }

    /// Writes a batch of values as a JSON array.
    pub fn write_array<T: Serialize>(&self, values: &[T], pretty: bool) -> Result<()> {
        let json = if pretty {
            serde_json::to_string_pretty(values)?
        } else {
            serde_json::to_string(values)?
        };
        self.emit(&json)
    }

    #[allow(clippy::significant_drop_tightening)]
    fn emit(&self, json: &str) -> Result<()> {
        let mut writer = self
            .writer
            .lock()
            .map_err(|e| anyhow::anyhow!("Lock poisoned: {e}"))?;
        writeln!(writer, "{json}")?;
        Ok(())
    }
}

impl ResultOutput for JsonOutput {
    fn write(&self, result: &MatchResult) -> Result<()> {
        self.write_line(result)
    }

    #[allow(clippy::significant_drop_tightening)]
    fn flush(&self) -> Result<()> {
        let mut writer = self
            .writer
            .lock()
            .map_err(|e| anyhow::anyhow!("Lock poisoned: {e}"))?;
        writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::sync::Arc;

    /// Writer that appends into a shared buffer.
    #[derive(Clone, Default)]
    struct SharedBuf(Arc<Mutex<Vec<u8>>>);

    impl Write for SharedBuf {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl SharedBuf {
        fn contents(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    fn result(path: &str, score: f64) -> MatchResult {
        MatchResult {
            path: path.to_string(),
            score,
        }
    }

    #[test]
    fn test_result_output_writes_jsonl() {
        let buf = SharedBuf::default();
        let output = JsonOutput::new(Box::new(buf.clone()));

        output.write(&result("a.png", 0.0)).unwrap();
        output.write(&result("b.png", 12.5)).unwrap();
        output.flush().unwrap();

        let text = buf.contents();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[1], r#"{"path":"b.png","score":12.5}"#);
    }

    #[test]
    fn test_write_array_compact_and_pretty() {
        let buf = SharedBuf::default();
        let output = JsonOutput::new(Box::new(buf.clone()));
        let results = [result("a.png", 1.0)];

        output.write_array(&results, false).unwrap();
        assert_eq!(buf.contents(), "[{\"path\":\"a.png\",\"score\":1.0}]\n");

        let pretty_buf = SharedBuf::default();
        let pretty = JsonOutput::new(Box::new(pretty_buf.clone()));
        pretty.write_array(&results, true).unwrap();
        assert!(pretty_buf.contents().contains("\n  {\n"));
    }

    #[test]
    fn test_write_empty_array() {
        let buf = SharedBuf::default();
        let output = JsonOutput::new(Box::new(buf.clone()));
        output.write_array::<MatchResult>(&[], false).unwrap();
        assert_eq!(buf.contents(), "[]\n");
    }
}
