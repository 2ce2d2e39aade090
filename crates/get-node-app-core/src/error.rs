//! Error taxonomy shared by every pipeline stage

use std::fmt;
use std::io;
use thiserror::Error;

/// Failure produced by a pipeline stage
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScaffoldError {
    /// No supported runtime or package manager on the host
    #[error("{message}")]
    Environment { message: String },

    /// Catalog listing or template download failed
    #[error("{message}")]
    Network {
        code: Option<String>,
        syscall: Option<String>,
        message: String,
    },

    /// Directory creation, cache write, or copy failed
    #[error("{message}")]
    Filesystem {
        code: Option<String>,
        message: String,
    },

    /// Package manager install exited unsuccessfully
    #[error("{short_message}")]
    Setup {
        exit_code: i32,
        short_message: String,
    },

    /// The user cancelled a prompt
    #[error("{message}")]
    InputAborted { message: String },
}

/// Discriminant of [`ScaffoldError`], used to key the display policy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Environment,
    Network,
    Filesystem,
    Setup,
    InputAborted,
}

impl ErrorKind {
    pub fn name(&self) -> &'static str {
        match self {
            ErrorKind::Environment => "EnvironmentError",
            ErrorKind::Network => "NetworkError",
            ErrorKind::Filesystem => "FilesystemError",
            ErrorKind::Setup => "SetupError",
            ErrorKind::InputAborted => "InputAborted",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Individual fields an error may expose to the user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Code,
    Syscall,
    Message,
    ExitCode,
    ShortMessage,
}

impl Field {
    pub fn label(&self) -> &'static str {
        match self {
            Field::Code => "code",
            Field::Syscall => "syscall",
            Field::Message => "message",
            Field::ExitCode => "exitCode",
            Field::ShortMessage => "shortMessage",
        }
    }
}

impl ScaffoldError {
    pub fn environment(message: impl Into<String>) -> Self {
        Self::Environment {
            message: message.into(),
        }
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::Network {
            code: None,
            syscall: None,
            message: message.into(),
        }
    }

    pub fn aborted(message: impl Into<String>) -> Self {
        Self::InputAborted {
            message: message.into(),
        }
    }

    /// Wrap an I/O error with a context message, keeping an errno-style code
    pub fn filesystem(err: &io::Error, context: impl fmt::Display) -> Self {
        Self::Filesystem {
            code: Some(io_error_code(err)),
            message: format!("{}: {}", context, err),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Environment { .. } => ErrorKind::Environment,
            Self::Network { .. } => ErrorKind::Network,
            Self::Filesystem { .. } => ErrorKind::Filesystem,
            Self::Setup { .. } => ErrorKind::Setup,
            Self::InputAborted { .. } => ErrorKind::InputAborted,
        }
    }

    /// Value of a single field, if this error carries it
    pub fn field(&self, field: Field) -> Option<String> {
        match (self, field) {
            (Self::Environment { message }, Field::Message)
            | (Self::InputAborted { message }, Field::Message)
            | (Self::Network { message, .. }, Field::Message)
            | (Self::Filesystem { message, .. }, Field::Message) => Some(message.clone()),
            (Self::Network { code, .. }, Field::Code)
            | (Self::Filesystem { code, .. }, Field::Code) => code.clone(),
            (Self::Network { syscall, .. }, Field::Syscall) => syscall.clone(),
            (Self::Setup { exit_code, .. }, Field::ExitCode) => Some(exit_code.to_string()),
            (Self::Setup { short_message, .. }, Field::ShortMessage) => {
                Some(short_message.clone())
            }
            _ => None,
        }
    }
}

/// Map an I/O error to the errno-style name users see in reports
pub fn io_error_code(err: &io::Error) -> String {
    let name = match err.kind() {
        io::ErrorKind::NotFound => "ENOENT",
        io::ErrorKind::PermissionDenied => "EACCES",
        io::ErrorKind::AlreadyExists => "EEXIST",
        io::ErrorKind::ConnectionRefused => "ECONNREFUSED",
        io::ErrorKind::ConnectionReset => "ECONNRESET",
        io::ErrorKind::TimedOut => "ETIMEDOUT",
        io::ErrorKind::InvalidInput | io::ErrorKind::InvalidData => "EINVAL",
        io::ErrorKind::Interrupted => "EINTR",
        _ => {
            return match err.raw_os_error() {
                Some(errno) => format!("E{}", errno),
                None => format!("{:?}", err.kind()),
            }
        }
    };
    name.to_string()
}
