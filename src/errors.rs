use std::{path::PathBuf, process::ExitCode};

/// Why a parse stopped early
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// To trigger: --bogus
    #[error("Unknown option '{0}'")]
    UnknownOption(String),
    /// To trigger: --output (no '=')
    #[error("'--{0}' option requires a value, use --{0}=<value>")]
    MalformedValueOption(String),
    /// To trigger: file.md, with no positional handler registered
    #[error("Unexpected argument '{0}'")]
    UnhandledPositional(String),
}

/// Error conditions for exiting the program
#[derive(Debug, thiserror::Error)]
pub enum UsageError {
    /// To trigger: --bogus
    #[error(transparent)]
    Parse(#[from] ParseError),
    /// To trigger: --noemphasizedtext
    #[error("No input file specified")]
    MissingInput,
    /// To trigger: --help
    #[error("Help requested")]
    HelpRequested,
}

impl From<UsageError> for ExitCode {
    fn from(err: UsageError) -> ExitCode {
        eprintln!("{err}");
        ExitCode::FAILURE
    }
}

/// Failures of the read/convert/write pipeline after a successful parse
#[derive(Debug, thiserror::Error)]
pub enum ConvertError {
    #[error("File doesnt exist: '{}'.", .0.display())]
    NotFound(PathBuf),
    #[error("Error reading file: '{}'.", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Error writing file: '{}'.", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl From<ConvertError> for ExitCode {
    fn from(err: ConvertError) -> ExitCode {
        println!("{err}");
        ExitCode::FAILURE
    }
}
