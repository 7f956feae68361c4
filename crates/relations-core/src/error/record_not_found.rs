use super::Error;

/// Error when a single-row retrieve matches no rows.
#[derive(Debug)]
pub(super) struct RecordNotFoundError {
    model: Box<str>,
}

impl std::error::Error for RecordNotFoundError {}

impl core::fmt::Display for RecordNotFoundError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "{}: none retrieved", self.model)
    }
}

impl Error {
    /// Creates a record not found error for the named model.
    pub fn record_not_found(model: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::RecordNotFound(RecordNotFoundError {
            model: model.into().into(),
        }))
    }

    /// Returns `true` if this error is a record not found error.
    pub fn is_record_not_found(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::RecordNotFound(_))
    }
}
