use std::io::{self, Write};

/// Write all stdout outputs in the app
///
/// In either plain text mode or structured (JSON). Stage lines and logs go to stderr
/// and are not affected.
#[derive(Default)]
pub struct Writer {
    is_structured: bool,
}

impl Writer {
    pub fn new(is_structured: bool) -> Self {
        Writer { is_structured }
    }

    /// Output a line of plain text
    ///
    /// Prints out nothing but a debug log line when the writer is in structured mode.
    pub fn line(&self, output: &str) -> io::Result<()> {
        if self.is_structured {
            log::debug!("Skipping output (not structured data): {output}");
            return Ok(());
        }

        self.write(&format!("{output}\n"))
    }

    /// Output serialized JSON on its own line
    ///
    /// Prints out nothing but a debug log line when the writer is in plain text mode.
    pub fn json(&self, output: serde_json::Value) -> io::Result<()> {
        if !self.is_structured {
            log::debug!("Skipping output (not plain text): {output}");
            return Ok(());
        }

        self.write(&format!("{output}\n"))
    }

    fn write(&self, output: &str) -> io::Result<()> {
        let mut stdout = io::stdout().lock();

        stdout
            .write_all(output.as_bytes())
            .and_then(|_| stdout.flush())
            .inspect_err(|e| log::error!("Error while writing to stdout: {e:?}"))
    }

    pub fn is_structured(&self) -> bool {
        self.is_structured
    }
}
