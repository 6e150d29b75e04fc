use std::io;
use std::path::PathBuf;
use std::process::ExitStatus;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SelpgError {
    /// Start or end page was not supplied.
    #[error("not enough arguments")]
    NotEnoughArguments,
    #[error("invalid start page {0}")]
    InvalidStartPage(String),
    #[error("invalid end page {0}")]
    InvalidEndPage(String),
    #[error("invalid page length {0}")]
    InvalidPageLength(String),
    #[error("page-length (-l) and page-type (-f) flags are mutually exclusive")]
    ExclusiveFlags,
    #[error("input file {} does not exist", .0.display())]
    InputMissing(PathBuf),
    #[error("could not open input file \"{}\"", .path.display())]
    CannotOpenInput {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// The print command could not be started.
    #[error("could not start print command `{command}`")]
    SinkSpawn {
        command: String,
        #[source]
        source: io::Error,
    },
    /// The print command ran but did not exit cleanly.
    #[error("print command `{command}` exited with {status}")]
    SinkFailed { command: String, status: ExitStatus },
    #[error("start_page ({start}) greater than total pages ({total}), no output written")]
    StartPageBeyondInput { start: u64, total: u64 },
    #[error("end_page ({end}) greater than total pages ({total}), less output than expected")]
    EndPageBeyondInput { end: u64, total: u64 },
    #[error("I/O error while {context}")]
    Io {
        context: &'static str,
        #[source]
        source: io::Error,
    },
    #[error("{0}")]
    Usage(String),
}

impl SelpgError {
    pub fn io(context: &'static str) -> impl FnOnce(io::Error) -> Self {
        move |source| SelpgError::Io { context, source }
    }

    /// Process exit status for this error. Success is 0 and is never
    /// produced here.
    pub fn exit_code(&self) -> u8 {
        match self {
            SelpgError::NotEnoughArguments => 1,
            SelpgError::InvalidStartPage(_) => 2,
            SelpgError::InvalidEndPage(_) => 3,
            SelpgError::InvalidPageLength(_) => 4,
            SelpgError::ExclusiveFlags => 5,
            SelpgError::InputMissing(_) => 6,
            SelpgError::CannotOpenInput { .. } => 7,
            SelpgError::SinkSpawn { .. } => 8,
            SelpgError::SinkFailed { .. } => 9,
            SelpgError::StartPageBeyondInput { .. } | SelpgError::EndPageBeyondInput { .. } => 10,
            SelpgError::Io { .. } => 11,
            SelpgError::Usage(_) => 64,
        }
    }

    /// Whether the caller can fix this by changing the invocation.
    pub fn wants_usage(&self) -> bool {
        matches!(
            self,
            SelpgError::NotEnoughArguments
                | SelpgError::InvalidStartPage(_)
                | SelpgError::InvalidEndPage(_)
                | SelpgError::InvalidPageLength(_)
                | SelpgError::ExclusiveFlags
                | SelpgError::Usage(_)
        )
    }
}
