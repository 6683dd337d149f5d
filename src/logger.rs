use std::io::{self, Result, Write};

/// Controls where logs for a specific channel are routed to
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Policy {
    Stdout,
    Stderr,
    Silent,
}

pub struct Policies {
    /// Pipeline state transitions, like "--- utils/standalone: concatenate ---".
    pub step: Policy,
    /// Files written and copy summaries.
    pub file: Policy,
    /// Failures we recovered from, like a missing minifier.
    pub warning: Policy,
}

impl Default for Policies {
    fn default() -> Self {
        Self {
            step: Policy::Stdout,
            file: Policy::Stdout,
            warning: Policy::Stderr,
        }
    }
}

/// A real standard stream, or an in-memory recording of one.
pub enum Output {
    Stdout(io::Stdout),
    Stderr(io::Stderr),
    Recorded(Vec<u8>),
}

impl Output {
    fn recorded(&self) -> &str {
        match self {
            Self::Recorded(v) => std::str::from_utf8(v).unwrap_or("<invalid utf-8>"),
            _ => "",
        }
    }
}

impl Write for Output {
    fn write(&mut self, bytes: &[u8]) -> Result<usize> {
        match self {
            Self::Stdout(w) => w.write(bytes),
            Self::Stderr(w) => w.write(bytes),
            Self::Recorded(v) => v.write(bytes),
        }
    }

    fn flush(&mut self) -> Result<()> {
        match self {
            Self::Stdout(w) => w.flush(),
            Self::Stderr(w) => w.flush(),
            Self::Recorded(_) => Ok(()),
        }
    }
}

pub enum LogWriter<'a> {
    To(&'a mut Output),
    Silent,
}

impl Write for LogWriter<'_> {
    fn write(&mut self, bytes: &[u8]) -> Result<usize> {
        match self {
            Self::To(w) => w.write(bytes),
            Self::Silent => Ok(bytes.len()),
        }
    }

    fn flush(&mut self) -> Result<()> {
        match self {
            Self::To(w) => w.flush(),
            Self::Silent => Ok(()),
        }
    }
}

pub struct Logger {
    pub stdout: Output,
    pub stderr: Output,
    pub pol: Policies,
}

impl Logger {
    pub fn new(stdout: Output, stderr: Output) -> Self {
        Self {
            stdout: stdout,
            stderr: stderr,
            pol: Policies::default(),
        }
    }

    pub fn new_real() -> Self {
        Self::new(Output::Stdout(io::stdout()), Output::Stderr(io::stderr()))
    }

    pub fn new_vec() -> Self {
        Self::new(Output::Recorded(vec![]), Output::Recorded(vec![]))
    }

    /// What has been written so far, as (stdout, stderr). Empty for real streams.
    pub fn recorded(&self) -> (&str, &str) {
        (self.stdout.recorded(), self.stderr.recorded())
    }

    fn lw_for(&mut self, pol: Policy) -> LogWriter {
        match pol {
            Policy::Stdout => LogWriter::To(&mut self.stdout),
            Policy::Stderr => LogWriter::To(&mut self.stderr),
            Policy::Silent => LogWriter::Silent,
        }
    }

    pub fn step(&mut self) -> LogWriter {
        self.lw_for(self.pol.step)
    }

    pub fn file(&mut self) -> LogWriter {
        self.lw_for(self.pol.file)
    }

    pub fn warning(&mut self) -> LogWriter {
        self.lw_for(self.pol.warning)
    }
}
