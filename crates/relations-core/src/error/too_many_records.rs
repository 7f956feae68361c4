use super::Error;

/// Error when a single-row retrieve matches more than one row.
#[derive(Debug)]
pub(super) struct TooManyRecordsError {
    model: Box<str>,
}

impl std::error::Error for TooManyRecordsError {}

impl core::fmt::Display for TooManyRecordsError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "{}: more than one retrieved", self.model)
    }
}

impl Error {
    /// Creates a too many records error for the named model.
    pub fn too_many_records(model: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::TooManyRecords(TooManyRecordsError {
            model: model.into().into(),
        }))
    }

    /// Returns `true` if this error is a too many records error.
    pub fn is_too_many_records(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::TooManyRecords(_))
    }
}
