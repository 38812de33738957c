//! CLI-level errors (wraps infrastructure errors)

use thiserror::Error;

use crate::application::ApplicationError;
use crate::infrastructure::InfraError;

/// BSD sysexits.h codes used by `refnet`.
pub mod exit {
    pub const USAGE: i32 = 64;
    /// Malformed referral record
    pub const DATAERR: i32 = 65;
    /// No referral matches the requested name
    pub const NOINPUT: i32 = 66;
    /// Referral service unreachable or failing
    pub const UNAVAILABLE: i32 = 69;
    pub const SOFTWARE: i32 = 70;
    pub const IOERR: i32 = 74;
    pub const CONFIG: i32 = 78;
}

/// CLI errors are the top-level error type.
/// These are what get displayed to the user.
#[derive(Error, Debug)]
pub enum CliError {
    #[error("{0}")]
    Infra(#[from] InfraError),

    #[error("invalid arguments: {0}")]
    InvalidArgs(String),

    #[error("no referral matches '{0}'")]
    NotFound(String),

    #[error("{0}")]
    Unavailable(String),
}

impl From<ApplicationError> for CliError {
    fn from(e: ApplicationError) -> Self {
        CliError::Infra(InfraError::Application(e))
    }
}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

impl CliError {
    /// Get the appropriate exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::InvalidArgs(_) => exit::USAGE,
            CliError::NotFound(_) => exit::NOINPUT,
            CliError::Unavailable(_) => exit::UNAVAILABLE,
            CliError::Infra(e) => match e {
                InfraError::Io { .. } => exit::IOERR,
                InfraError::Encode { .. } => exit::SOFTWARE,
                InfraError::Application(app) => match app {
                    ApplicationError::Domain(_) => exit::DATAERR,
                    ApplicationError::Fetch { .. } => exit::UNAVAILABLE,
                    ApplicationError::Config { .. } => exit::CONFIG,
                },
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::DomainError;

    #[test]
    fn given_layered_errors_when_mapping_then_uses_innermost_cause() {
        let missing = CliError::from(ApplicationError::Domain(DomainError::MissingName {
            location: "referralTree".into(),
        }));
        assert_eq!(missing.exit_code(), exit::DATAERR);

        let fetch = CliError::from(ApplicationError::fetch(
            "GET /referrals/u",
            std::io::Error::other("refused"),
        ));
        assert_eq!(fetch.exit_code(), exit::UNAVAILABLE);

        assert_eq!(CliError::NotFound("zed".into()).exit_code(), exit::NOINPUT);
        assert_eq!(CliError::InvalidArgs("x".into()).exit_code(), exit::USAGE);
    }
}
