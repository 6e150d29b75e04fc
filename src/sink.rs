use crate::config::PrintDestination;
use crate::error::SelpgError;
use std::io::{self, BufWriter, Stdout, Write};
use std::process::{Child, ChildStdin, Command, Stdio};

/// Destination for selected pages, fixed for the whole invocation.
pub enum OutputSink {
    Direct(BufWriter<Stdout>),
    Piped(PrintJob),
}

impl OutputSink {
    pub fn open(destination: Option<&PrintDestination>) -> Result<Self, SelpgError> {
        match destination {
            None => Ok(OutputSink::Direct(BufWriter::new(io::stdout()))),
            Some(dest) => PrintJob::spawn(dest).map(OutputSink::Piped),
        }
    }

    /// Flush and release the sink. A piped sink waits for its print command.
    pub fn close(self) -> Result<(), SelpgError> {
        match self {
            OutputSink::Direct(mut out) => out.flush().map_err(SelpgError::io("writing output")),
            OutputSink::Piped(job) => job.finish(),
        }
    }
}

impl Write for OutputSink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            OutputSink::Direct(out) => out.write(buf),
            OutputSink::Piped(job) => job.write(buf),
        }
    }

    fn write_all(&mut self, buf: &[u8]) -> io::Result<()> {
        match self {
            OutputSink::Direct(out) => out.write_all(buf),
            OutputSink::Piped(job) => job.write_all(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            OutputSink::Direct(out) => out.flush(),
            OutputSink::Piped(job) => job.flush(),
        }
    }
}

/// A running print command fed through its standard input.
pub struct PrintJob {
    command: String,
    child: Child,
    stdin: Option<BufWriter<ChildStdin>>,
}

impl PrintJob {
    fn spawn(dest: &PrintDestination) -> Result<Self, SelpgError> {
        let command_line = format!("{} -d{}", dest.command.join(" "), dest.name);
        let spawn_failed = |source: io::Error| SelpgError::SinkSpawn {
            command: command_line.clone(),
            source,
        };

        let (program, args) = dest.command.split_first().ok_or_else(|| {
            spawn_failed(io::Error::new(
                io::ErrorKind::InvalidInput,
                "empty print command",
            ))
        })?;

        let mut child = Command::new(program)
            .args(args)
            .arg(format!("-d{}", dest.name))
            .stdin(Stdio::piped())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .spawn()
            .map_err(spawn_failed)?;

        let stdin = child.stdin.take().map(BufWriter::new);
        tracing::debug!(command = %command_line, pid = child.id(), "print command started");

        Ok(PrintJob {
            command: command_line,
            child,
            stdin,
        })
    }

    fn pipe(&mut self) -> io::Result<&mut BufWriter<ChildStdin>> {
        self.stdin
            .as_mut()
            .ok_or_else(|| io::Error::new(io::ErrorKind::BrokenPipe, "print command stdin closed"))
    }

    fn finish(mut self) -> Result<(), SelpgError> {
        if let Some(mut stdin) = self.stdin.take() {
            stdin
                .flush()
                .map_err(SelpgError::io("writing to print command"))?;
        }

        let status = self
            .child
            .wait()
            .map_err(SelpgError::io("waiting for print command"))?;
        tracing::debug!(command = %self.command, %status, "print command finished");

        if status.success() {
            Ok(())
        } else {
            Err(SelpgError::SinkFailed {
                command: self.command.clone(),
                status,
            })
        }
    }
}

impl Write for PrintJob {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.pipe()?.write(buf)
    }

    fn write_all(&mut self, buf: &[u8]) -> io::Result<()> {
        self.pipe()?.write_all(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.pipe()?.flush()
    }
}

impl Drop for PrintJob {
    fn drop(&mut self) {
        // Closing stdin lets the print command see end of input before we wait.
        if let Some(mut stdin) = self.stdin.take() {
            let _ = stdin.flush();
        }
        if let Err(e) = self.child.wait() {
            tracing::warn!(command = %self.command, "failed to wait for print command: {}", e);
        }
    }
}
