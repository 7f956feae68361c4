use super::Error;

/// Error when an update targets an instance that was never inserted, so no
/// row exists to update.
#[derive(Debug)]
pub(super) struct RecordNotPersistedError {
    model: Box<str>,
}

impl std::error::Error for RecordNotPersistedError {}

impl core::fmt::Display for RecordNotPersistedError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "{}: not yet created", self.model)
    }
}

impl Error {
    pub fn record_not_persisted(model: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::RecordNotPersisted(RecordNotPersistedError {
            model: model.into().into(),
        }))
    }

    /// Returns `true` if this error is a record not persisted error.
    pub fn is_record_not_persisted(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::RecordNotPersisted(_))
    }
}
