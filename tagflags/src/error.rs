//! Error types produced while binding and parsing flags.

use clap::error::ErrorKind;
use thiserror::Error;

/// Convenience alias for results returned by this crate.
pub type BindResult<T> = Result<T, BindError>;

/// Errors that can occur while binding a record to command-line flags.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum BindError {
    /// Clap rejected the command line; the message is clap's own.
    #[error(transparent)]
    Cli(#[from] Box<clap::Error>),

    /// A long flag name is malformed.
    #[error("invalid long flag '{long}' for field '{field}': {reason}")]
    InvalidLong {
        /// Field the flag belongs to.
        field: String,
        /// Offending long name.
        long: String,
        /// What is wrong with it.
        reason: &'static str,
    },

    /// A short alias is not ASCII alphanumeric.
    #[error("invalid short flag '{short}' for field '{field}': must be ASCII alphanumeric")]
    InvalidShort {
        /// Field the flag belongs to.
        field: String,
        /// Offending short alias.
        short: char,
    },

    /// A long name collides with one of clap's generated flags.
    #[error("reserved long flag '--{long}' on field '{field}' conflicts with global clap flags")]
    ReservedLong {
        /// Field the flag belongs to.
        field: String,
        /// Reserved long name.
        long: String,
    },

    /// A short alias collides with one of clap's generated flags.
    #[error("reserved short flag '-{short}' on field '{field}' conflicts with global clap flags")]
    ReservedShort {
        /// Field the flag belongs to.
        field: String,
        /// Reserved short alias.
        short: char,
    },

    /// Two fields derive the same long name.
    #[error("duplicate long flag '--{long}' on fields '{first}' and '{second}'")]
    DuplicateLong {
        /// Long name claimed twice.
        long: String,
        /// Field that claimed it first.
        first: String,
        /// Field that tried to claim it again.
        second: String,
    },

    /// Two fields declare the same short alias.
    #[error("duplicate short flag '-{short}' on fields '{first}' and '{second}'")]
    DuplicateShort {
        /// Short alias claimed twice.
        short: char,
        /// Field that claimed it first.
        first: String,
        /// Field that tried to claim it again.
        second: String,
    },
}

impl From<clap::Error> for BindError {
    fn from(e: clap::Error) -> Self {
        Self::Cli(e.into())
    }
}

impl BindError {
    /// Returns the clap error when parsing the command line failed.
    #[must_use]
    pub fn as_clap(&self) -> Option<&clap::Error> {
        match self {
            Self::Cli(err) => Some(&**err),
            _ => None,
        }
    }

    /// Returns `true` when the error is clap answering `--help` or
    /// `--version`.
    ///
    /// Entry points usually call [`clap::Error::exit`] for these so the
    /// process ends with a zero status.
    #[must_use]
    pub fn is_display_request(&self) -> bool {
        self.as_clap().is_some_and(|err| {
            matches!(
                err.kind(),
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion
            )
        })
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for error classification.

    use clap::{Command, error::ErrorKind};
    use rstest::rstest;

    use super::BindError;

    fn build_error(kind: ErrorKind) -> BindError {
        Command::new("demo").error(kind, "demo output").into()
    }

    #[rstest]
    #[case(ErrorKind::DisplayHelp)]
    #[case(ErrorKind::DisplayVersion)]
    fn recognises_display_requests(#[case] kind: ErrorKind) {
        assert!(build_error(kind).is_display_request());
    }

    #[rstest]
    #[case(ErrorKind::UnknownArgument)]
    #[case(ErrorKind::MissingRequiredArgument)]
    fn rejects_regular_errors(#[case] kind: ErrorKind) {
        assert!(!build_error(kind).is_display_request());
    }

    #[test]
    fn bind_errors_are_not_clap_errors() {
        let err = BindError::DuplicateShort {
            short: 's',
            first: "alpha".into(),
            second: "sigma".into(),
        };
        assert!(err.as_clap().is_none());
        assert_eq!(
            err.to_string(),
            "duplicate short flag '-s' on fields 'alpha' and 'sigma'"
        );
    }

    #[test]
    fn clap_errors_display_verbatim() {
        let clap_err = Command::new("demo").error(ErrorKind::UnknownArgument, "boom");
        let expected = clap_err.to_string();
        let err = BindError::from(clap_err);
        assert_eq!(err.to_string(), expected);
    }
}
