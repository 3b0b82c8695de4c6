//! Terminal line I/O for interactive play

use std::io::{self, BufRead, Stdin, Stdout, Write};

use crate::infrastructure::traits::{LineSource, TextSink};

/// Lines typed on stdin.
pub struct StdinLines {
    stdin: Stdin,
}

impl Default for StdinLines {
    fn default() -> Self {
        Self { stdin: io::stdin() }
    }
}

impl LineSource for StdinLines {
    fn next_line(&mut self) -> io::Result<String> {
        let mut buf = String::new();
        if self.stdin.lock().read_line(&mut buf)? == 0 {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "standard input closed",
            ));
        }
        let trimmed = buf.trim_end_matches(['\n', '\r']).len();
        buf.truncate(trimmed);
        Ok(buf)
    }
}

/// Lines printed to stdout, flushed after each line.
pub struct StdoutSink {
    stdout: Stdout,
}

impl Default for StdoutSink {
    fn default() -> Self {
        Self {
            stdout: io::stdout(),
        }
    }
}

impl TextSink for StdoutSink {
    fn write_line(&mut self, line: &str) -> io::Result<()> {
        let mut out = self.stdout.lock();
        writeln!(out, "{}", line)?;
        out.flush()
    }
}
