//! CLI-level errors (wraps application errors)

use thiserror::Error;

use crate::application::ApplicationError;
use crate::domain::NodeId;

/// CLI errors are the top-level error type.
/// These are what get displayed to the user.
#[derive(Error, Debug)]
pub enum CliError {
    #[error("{0}")]
    Application(#[from] ApplicationError),

    #[error("node not found: {0}")]
    UnknownNode(NodeId),

    #[error("invalid arguments: {0}")]
    InvalidArgs(String),

    #[error("{0}")]
    Usage(String),
}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

impl CliError {
    /// Get the appropriate exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::InvalidArgs(_) | CliError::Usage(_) => crate::exitcode::USAGE,
            CliError::UnknownNode(_) => crate::exitcode::DATAERR,
            CliError::Application(e) => match e {
                ApplicationError::Io { .. } => crate::exitcode::IOERR,
                ApplicationError::Config { .. } => crate::exitcode::CONFIG,
                ApplicationError::Tree(_)
                | ApplicationError::Hierarchy { .. }
                | ApplicationError::Unreachable { .. } => crate::exitcode::DATAERR,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::TreeError;

    #[test]
    fn given_error_kinds_when_mapping_then_uses_sysexits_codes() {
        assert_eq!(
            CliError::Usage("x".into()).exit_code(),
            crate::exitcode::USAGE
        );
        assert_eq!(CliError::UnknownNode(9).exit_code(), crate::exitcode::DATAERR);
        let config = ApplicationError::Config {
            message: "bad".into(),
        };
        assert_eq!(CliError::from(config).exit_code(), crate::exitcode::CONFIG);
        let tree = ApplicationError::from(TreeError::DeleteRootForbidden(0));
        assert_eq!(CliError::from(tree).exit_code(), crate::exitcode::DATAERR);
    }
}
