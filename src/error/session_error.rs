use thiserror::Error;

/// Errors raised by the `R`/`C` command driver.
#[derive(Debug, Error)]
pub enum SessionError {
    /// The command script contains something other than `R` or `C`.
    #[error("command script can contain only R and C, found '{found}' at position {position}")]
    InvalidCommand {
        /// The offending character.
        found:    char,
        /// Its character index in the script.
        position: usize,
    },
    /// A read was requested but the input has no more lines.
    #[error("no more input while reading expression {requested}")]
    InputExhausted {
        /// How many reads had been requested, including this one.
        requested: usize,
    },
    /// Reading input or writing output failed.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_error_converts() {
        let err: SessionError = std::io::Error::other("boom").into();
        assert!(matches!(err, SessionError::Io(_)));
        assert!(err.to_string().contains("boom"));
    }
}
