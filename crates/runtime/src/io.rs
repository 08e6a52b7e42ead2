//! Host I/O for library functions
//!
//! Library functions never touch stdin/stdout directly; they go through the
//! [`Io`] the evaluator was started with. [`StdIo`] is the process console,
//! [`BufferIo`] keeps everything in memory for tests and embedding hosts.

use std::collections::VecDeque;
use std::io::{self, BufRead, Write};

pub trait Io: Send {
    /// Write one line of output; the newline is added by the implementation.
    fn write_line(&mut self, line: &str) -> io::Result<()>;

    /// Read one line of input without its line terminator.
    /// Returns `Ok(None)` at end of input.
    fn read_line(&mut self) -> io::Result<Option<String>>;
}

/// Process stdin/stdout.
#[derive(Debug, Default)]
pub struct StdIo;

impl StdIo {
    pub fn new() -> Self {
        StdIo
    }
}

impl Io for StdIo {
    fn write_line(&mut self, line: &str) -> io::Result<()> {
        let stdout = io::stdout();
        let mut handle = stdout.lock();
        writeln!(handle, "{}", line)?;
        handle.flush()
    }

    fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut line = String::new();
        let bytes = io::stdin().lock().read_line(&mut line)?;
        if bytes == 0 {
            return Ok(None);
        }
        Ok(Some(trim_line_ending(line)))
    }
}

/// In-memory I/O: queued input lines, captured output lines.
#[derive(Debug, Default, Clone)]
pub struct BufferIo {
    input: VecDeque<String>,
    output: Vec<String>,
}

impl BufferIo {
    pub fn new() -> Self {
        BufferIo::default()
    }

    /// Start with the given input lines queued.
    pub fn with_input<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        BufferIo {
            input: lines.into_iter().map(Into::into).collect(),
            output: Vec::new(),
        }
    }

    pub fn output(&self) -> &[String] {
        &self.output
    }

    pub fn into_output(self) -> Vec<String> {
        self.output
    }
}

impl Io for BufferIo {
    fn write_line(&mut self, line: &str) -> io::Result<()> {
        self.output.push(line.to_string());
        Ok(())
    }

    fn read_line(&mut self) -> io::Result<Option<String>> {
        Ok(self.input.pop_front())
    }
}

fn trim_line_ending(mut line: String) -> String {
    if line.ends_with('\n') {
        line.pop();
        if line.ends_with('\r') {
            line.pop();
        }
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buffer_io_round() {
        let mut io = BufferIo::with_input(["first", "second"]);
        assert_eq!(io.read_line().unwrap(), Some("first".to_string()));
        assert_eq!(io.read_line().unwrap(), Some("second".to_string()));
        assert_eq!(io.read_line().unwrap(), None);

        io.write_line("out").unwrap();
        assert_eq!(io.output(), ["out".to_string()]);
    }

    #[test]
    fn test_trim_line_ending() {
        assert_eq!(trim_line_ending("abc\n".to_string()), "abc");
        assert_eq!(trim_line_ending("abc\r\n".to_string()), "abc");
        assert_eq!(trim_line_ending("abc".to_string()), "abc");
    }
}
