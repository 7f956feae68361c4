use super::Error;

/// Error when an update or delete targets a model that declares no primary
/// key, so no stable identity exists to target.
#[derive(Debug)]
pub(super) struct MissingPrimaryKeyError {
    model: Box<str>,
    action: &'static str,
}

impl std::error::Error for MissingPrimaryKeyError {}

impl core::fmt::Display for MissingPrimaryKeyError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "{}: nothing to {} from", self.model, self.action)
    }
}

impl Error {
    /// Creates a missing primary key error. `action` is the refused
    /// mutation, `"update"` or `"delete"`.
    pub fn missing_primary_key(model: impl Into<String>, action: &'static str) -> Error {
        Error::from(super::ErrorKind::MissingPrimaryKey(MissingPrimaryKeyError {
            model: model.into().into(),
            action,
        }))
    }

    /// Returns `true` if this error is a missing primary key error.
    pub fn is_missing_primary_key(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::MissingPrimaryKey(_))
    }
}
