use crate::cli::Cli;
use crate::error::SelpgError;
use crate::page_range::{parse_page_number, PageRange};
use serde::{Serialize, Serializer};
use std::fmt;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::PathBuf;

pub const DEFAULT_PAGE_LENGTH: u64 = 72;

/// How the input is split into pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "page_type", rename_all = "snake_case")]
pub enum DelimiterMode {
    /// Every `page_length` lines form a page.
    LineCount { page_length: u64 },
    /// Every form feed ends a page.
    FormFeed,
}

impl DelimiterMode {
    /// Byte terminating one record read from the input.
    pub fn terminator(&self) -> u8 {
        match self {
            DelimiterMode::LineCount { .. } => b'\n',
            DelimiterMode::FormFeed => b'\x0C',
        }
    }

    pub fn page_length(&self) -> u64 {
        match self {
            DelimiterMode::LineCount { page_length } => *page_length,
            DelimiterMode::FormFeed => DEFAULT_PAGE_LENGTH,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSource {
    Stdin,
    File(PathBuf),
}

impl Serialize for InputSource {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            InputSource::Stdin => serializer.serialize_str("-"),
            InputSource::File(path) => path.serialize(serializer),
        }
    }
}

impl InputSource {
    pub fn open(&self) -> Result<Box<dyn BufRead>, SelpgError> {
        match self {
            InputSource::Stdin => Ok(Box::new(io::stdin().lock())),
            InputSource::File(path) => {
                let cannot_open = |source: io::Error| SelpgError::CannotOpenInput {
                    path: path.clone(),
                    source,
                };
                let file = File::open(path).map_err(cannot_open)?;
                if file.metadata().map_err(cannot_open)?.is_dir() {
                    return Err(cannot_open(io::Error::other("is a directory")));
                }
                Ok(Box::new(BufReader::new(file)))
            }
        }
    }
}

/// Where selected pages go when they are not written to stdout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PrintDestination {
    pub name: String,
    /// Program and leading arguments; `-d<name>` is appended.
    pub command: Vec<String>,
}

/// A fully validated invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Config {
    #[serde(flatten)]
    pub range: PageRange,
    #[serde(flatten)]
    pub mode: DelimiterMode,
    pub input: InputSource,
    pub print_destination: Option<PrintDestination>,
}

impl Config {
    /// Validate parsed command-line arguments. Rules are checked in a fixed
    /// order and the first failure is returned; nothing is opened here.
    pub fn from_cli(cli: &Cli) -> Result<Self, SelpgError> {
        let (Some(start), Some(end)) = (&cli.start_page, &cli.end_page) else {
            return Err(SelpgError::NotEnoughArguments);
        };

        let range = PageRange::parse(start, end)?;

        let page_length = match &cli.page_length {
            Some(raw) => parse_page_number(raw)
                .ok_or_else(|| SelpgError::InvalidPageLength(raw.clone()))?,
            None => DEFAULT_PAGE_LENGTH,
        };

        let mode = if cli.form_feed {
            if page_length != DEFAULT_PAGE_LENGTH {
                return Err(SelpgError::ExclusiveFlags);
            }
            DelimiterMode::FormFeed
        } else {
            DelimiterMode::LineCount { page_length }
        };

        let input = match &cli.input {
            // Other stat failures surface when the file is opened.
            Some(path) if matches!(path.try_exists(), Ok(false)) => {
                return Err(SelpgError::InputMissing(path.clone()))
            }
            Some(path) => InputSource::File(path.clone()),
            None => InputSource::Stdin,
        };

        let print_destination = cli
            .print_dest
            .as_ref()
            .filter(|name| !name.is_empty())
            .map(|name| PrintDestination {
                name: name.clone(),
                command: cli.print_command.split_whitespace().map(String::from).collect(),
            });

        Ok(Config {
            range,
            mode,
            input,
            print_destination,
        })
    }
}

impl fmt::Display for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let input = match &self.input {
            InputSource::Stdin => String::new(),
            InputSource::File(path) => path.display().to_string(),
        };
        let page_type = match self.mode {
            DelimiterMode::LineCount { .. } => "page length",
            DelimiterMode::FormFeed => "end sign \\f",
        };
        let dest = self
            .print_destination
            .as_ref()
            .map(|d| d.name.as_str())
            .unwrap_or("");

        writeln!(f, "start_page: {}", self.range.start)?;
        writeln!(f, "end_page: {}", self.range.end)?;
        writeln!(f, "input_file: {}", input)?;
        writeln!(f, "page_length: {}", self.mode.page_length())?;
        writeln!(f, "page_type: {}", page_type)?;
        write!(f, "print_destination: {}", dest)
    }
}
