//! I/O seam between the VM and the outside world.
//!
//! PRINT, PRINT_STRING, INPUT and SLEEP_MS go through a [`Host`] so the
//! engine can run against real stdio or against in-memory buffers.

use std::collections::VecDeque;
use std::io::{self, BufRead, Write};
use std::time::Duration;

/// Line-oriented output, line-oriented input, and the sleep primitive.
pub trait Host {
    /// Write one line of output (the terminator is added by the host).
    fn write_line(&mut self, line: &str) -> io::Result<()>;

    /// Read one line of input as raw bytes, without its terminator.
    ///
    /// Returns `Ok(None)` at end of input. Text decoding is left to the
    /// caller so malformed bytes can be told apart from a failed read.
    fn read_line(&mut self) -> io::Result<Option<Vec<u8>>>;

    /// Block the calling thread.
    fn sleep(&mut self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

/// Host backed by the process's stdin and stdout.
#[derive(Debug, Default, Clone, Copy)]
pub struct StdioHost;

impl Host for StdioHost {
    fn write_line(&mut self, line: &str) -> io::Result<()> {
        let mut out = io::stdout().lock();
        writeln!(out, "{line}")?;
        out.flush()
    }

    fn read_line(&mut self) -> io::Result<Option<Vec<u8>>> {
        let mut buf = Vec::new();
        if io::stdin().lock().read_until(b'\n', &mut buf)? == 0 {
            return Ok(None);
        }
        Ok(Some(strip_terminator(buf)))
    }
}

/// In-memory host: scripted input, captured output, recorded sleeps.
///
/// Sleeps are recorded and never block.
#[derive(Debug, Default, Clone)]
pub struct BufferHost {
    input: VecDeque<Vec<u8>>,
    output: Vec<String>,
    sleeps: Vec<Duration>,
}

impl BufferHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// A host whose INPUT reads yield `lines` in order, then end of input.
    ///
    /// Lines may be text or raw bytes.
    pub fn with_input<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<Vec<u8>>,
    {
        Self {
            input: lines.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// Lines written so far.
    pub fn output(&self) -> &[String] {
        &self.output
    }

    /// Durations passed to [`Host::sleep`] so far.
    pub fn sleeps(&self) -> &[Duration] {
        &self.sleeps
    }
}

impl Host for BufferHost {
    fn write_line(&mut self, line: &str) -> io::Result<()> {
        self.output.push(line.to_owned());
        Ok(())
    }

    fn read_line(&mut self) -> io::Result<Option<Vec<u8>>> {
        Ok(self.input.pop_front())
    }

    fn sleep(&mut self, duration: Duration) {
        self.sleeps.push(duration);
    }
}

fn strip_terminator(mut line: Vec<u8>) -> Vec<u8> {
    if line.ends_with(b"\n") {
        line.pop();
        if line.ends_with(b"\r") {
            line.pop();
        }
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strip_terminator_variants() {
        assert_eq!(strip_terminator(b"abc\n".to_vec()), b"abc");
        assert_eq!(strip_terminator(b"abc\r\n".to_vec()), b"abc");
        assert_eq!(strip_terminator(b"abc".to_vec()), b"abc");
        assert_eq!(strip_terminator(b"\n".to_vec()), b"");
        assert_eq!(strip_terminator(b"\xff\xfe\n".to_vec()), b"\xff\xfe");
    }

    #[test]
    fn buffer_host_reads_in_order_then_ends() {
        let mut host = BufferHost::with_input(["1", "two"]);
        assert_eq!(host.read_line().unwrap().as_deref(), Some(&b"1"[..]));
        assert_eq!(host.read_line().unwrap().as_deref(), Some(&b"two"[..]));
        assert_eq!(host.read_line().unwrap(), None);
    }

    #[test]
    fn buffer_host_keeps_raw_bytes() {
        let mut host = BufferHost::with_input([vec![0xff, 0xfe]]);
        assert_eq!(host.read_line().unwrap(), Some(vec![0xff, 0xfe]));
    }

    #[test]
    fn buffer_host_captures_output_and_sleeps() {
        let mut host = BufferHost::new();
        host.write_line("hello").unwrap();
        host.sleep(Duration::from_millis(5));
        assert_eq!(host.output(), ["hello"]);
        assert_eq!(host.sleeps(), [Duration::from_millis(5)]);
    }
}
