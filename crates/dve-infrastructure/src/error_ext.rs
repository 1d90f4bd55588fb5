//! Error context extension
//!
//! Maps foreign infrastructure errors into the domain taxonomy with a
//! message attached.

use dve_domain::{Error, Result};

/// Attach configuration context to a fallible infrastructure operation
pub trait ErrorContext<T> {
    /// Convert the error into `Error::Configuration` with a message
    fn context(self, message: &str) -> Result<T>;
}

impl<T, E> ErrorContext<T> for std::result::Result<T, E>
where
    E: std::error::Error + Send + Sync + 'static,
{
    fn context(self, message: &str) -> Result<T> {
        self.map_err(|err| Error::configuration_with_source(message, err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn context_wraps_into_configuration() {
        let failed: std::result::Result<(), std::io::Error> =
            Err(std::io::Error::other("disk on fire"));
        let err = failed.context("failed to read config").unwrap_err();
        assert!(matches!(err, Error::Configuration { .. }));
        assert!(err.to_string().contains("failed to read config"));
    }
}
