use crate::Result;

use relations_core::{Connection, Error};
use url::Url;

/// Opens a connection for `url`, on `database`.
pub(super) fn connect(url: &str, database: &str) -> Result<Box<dyn Connection>> {
    let parsed =
        Url::parse(url).map_err(|err| Error::invalid_connection_url(format!("{err}; url={url}")))?;

    match parsed.scheme() {
        "postgresql" | "postgres" => connect_postgresql(url, database),
        scheme => Err(Error::invalid_connection_url(format!(
            "unsupported database; scheme={scheme}; url={url}"
        ))),
    }
}

#[cfg(feature = "postgresql")]
fn connect_postgresql(url: &str, database: &str) -> Result<Box<dyn Connection>> {
    let driver = relations_driver_postgresql::PostgreSQL::connect(url, Some(database))?;
    Ok(Box::new(driver))
}

#[cfg(not(feature = "postgresql"))]
fn connect_postgresql(_url: &str, _database: &str) -> Result<Box<dyn Connection>> {
    relations_core::bail!("`postgresql` feature not enabled")
}
