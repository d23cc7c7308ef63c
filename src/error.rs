use std::{error::Error, fmt, io};

/// The result type used across the fitting crate.
pub type Result<T> = std::result::Result<T, FitErr>;

/// Failures reported by the solver and the run-file loader.
#[derive(Debug)]
pub enum FitErr {
    /// The input data cannot be fitted (e.g. an empty point set).
    InvalidInput(&'static str),

    /// A tunable option is out of its valid range.
    InvalidConfig {
        /// Name of the offending option.
        what: &'static str,
        /// The rejected value.
        got: f64,
    },

    /// A run file could not be read.
    Io(io::Error),

    /// A run file could not be parsed.
    Parse(serde_json::Error),
}

impl fmt::Display for FitErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FitErr::InvalidInput(msg) => write!(f, "invalid input: {msg}"),
            FitErr::InvalidConfig { what, got } => {
                write!(f, "invalid config: {what} can't be {got}")
            }
            FitErr::Io(e) => write!(f, "io error: {e}"),
            FitErr::Parse(e) => write!(f, "invalid run file: {e}"),
        }
    }
}

impl Error for FitErr {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            FitErr::Io(e) => Some(e),
            FitErr::Parse(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for FitErr {
    fn from(value: io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<serde_json::Error> for FitErr {
    fn from(value: serde_json::Error) -> Self {
        Self::Parse(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_the_offending_option() {
        let err = FitErr::InvalidConfig {
            what: "learning_rate",
            got: -0.5,
        };

        assert_eq!(err.to_string(), "invalid config: learning_rate can't be -0.5");
    }

    #[test]
    fn io_errors_keep_their_source() {
        let err: FitErr = io::Error::new(io::ErrorKind::NotFound, "gone").into();
        assert!(err.source().is_some());
        assert!(FitErr::InvalidInput("empty").source().is_none());
    }
}
