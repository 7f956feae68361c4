use crate::{err, Result, Source};

use indexmap::IndexMap;

/// Sources by name.
///
/// Closing is explicit: [`Registry::close`] closes every source in
/// registration order, and a removed source is handed back to the caller.
#[derive(Debug, Default)]
pub struct Registry {
    sources: IndexMap<String, Source>,
}

impl Registry {
    pub fn new() -> Registry {
        Registry::default()
    }

    /// Registers a source under its name, returning the one it replaces.
    pub fn insert(&mut self, source: Source) -> Option<Source> {
        tracing::info!(source = source.name(), "registering source");
        self.sources.insert(source.name().to_string(), source)
    }

    pub fn get(&self, name: &str) -> Option<&Source> {
        self.sources.get(name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Source> {
        self.sources.get_mut(name)
    }

    pub fn remove(&mut self, name: &str) -> Option<Source> {
        tracing::info!(source = name, "removing source");
        self.sources.shift_remove(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.sources.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    /// Closes every source. All are closed even if one fails; the first
    /// failure is reported, naming the source it came from.
    pub fn close(self) -> Result<()> {
        let mut result = Ok(());

        for (name, source) in self.sources {
            if let Err(err) = source.close() {
                tracing::warn!(source = %name, error = %err, "failed to close source");
                if result.is_ok() {
                    result = Err(err.context(err!("closing source `{name}`")));
                }
            }
        }

        result
    }
}
