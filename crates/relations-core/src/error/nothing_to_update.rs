use super::Error;

/// Error when an update has no changed, writable field to write.
#[derive(Debug)]
pub(super) struct NothingToUpdateError {
    model: Box<str>,
}

impl std::error::Error for NothingToUpdateError {}

impl core::fmt::Display for NothingToUpdateError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "{}: nothing to update from", self.model)
    }
}

impl Error {
    pub fn nothing_to_update(model: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::NothingToUpdate(NothingToUpdateError {
            model: model.into().into(),
        }))
    }

    pub fn is_nothing_to_update(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::NothingToUpdate(_))
    }
}
