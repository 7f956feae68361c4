mod row;

mod value;
pub(crate) use value::Value;

use postgres::{types::ToSql, Client, Config, NoTls};
use relations_core::{driver, stmt, Connection, Error, Result};
use url::Url;

pub struct PostgreSQL {
    /// The PostgreSQL client.
    client: Client,
}

impl std::fmt::Debug for PostgreSQL {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PostgreSQL").finish_non_exhaustive()
    }
}

impl PostgreSQL {
    /// Wraps an already connected client.
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Connects using a `postgresql://` URL.
    ///
    /// `database`, when given, replaces the database named in the URL path.
    /// One of the two must name a database.
    pub fn connect(url: &str, database: Option<&str>) -> Result<Self> {
        let config = config_from_url(url, database)?;

        tracing::info!(
            host = ?config.get_hosts(),
            dbname = ?config.get_dbname(),
            "connecting to PostgreSQL"
        );

        let client = config.connect(NoTls).map_err(Error::driver)?;
        Ok(Self::new(client))
    }
}

impl From<Client> for PostgreSQL {
    fn from(client: Client) -> Self {
        Self { client }
    }
}

impl Connection for PostgreSQL {
    fn execute(&mut self, sql: &str, params: &[stmt::Value]) -> Result<u64> {
        let params = params.iter().cloned().map(Value::from).collect::<Vec<_>>();

        self.client
            .execute(sql, &args(&params))
            .map_err(Error::driver)
    }

    fn query(&mut self, sql: &str, params: &[stmt::Value]) -> Result<Vec<driver::Row>> {
        let params = params.iter().cloned().map(Value::from).collect::<Vec<_>>();

        self.client
            .query(sql, &args(&params))
            .map_err(Error::driver)?
            .iter()
            .map(row::decode)
            .collect()
    }

    fn close(self: Box<Self>) -> Result<()> {
        self.client.close().map_err(Error::driver)
    }
}

fn args(params: &[Value]) -> Vec<&(dyn ToSql + Sync)> {
    params
        .iter()
        .map(|param| param as &(dyn ToSql + Sync))
        .collect()
}

/// Builds a client configuration from a connection URL.
pub fn config_from_url(url: &str, database: Option<&str>) -> Result<Config> {
    let url = Url::parse(url).map_err(|err| Error::invalid_connection_url(err.to_string()))?;

    if url.scheme() != "postgresql" && url.scheme() != "postgres" {
        return Err(Error::invalid_connection_url(format!(
            "connection URL does not have a `postgresql` scheme; url={url}"
        )));
    }

    let host = url.host_str().ok_or_else(|| {
        Error::invalid_connection_url(format!("missing host in connection URL; url={url}"))
    })?;

    let dbname = match database {
        Some(database) => database,
        None => url.path().trim_start_matches('/'),
    };

    if dbname.is_empty() {
        return Err(Error::invalid_connection_url(format!(
            "no database specified - missing path in connection URL; url={url}"
        )));
    }

    let mut config = Config::new();
    config.host(host);
    config.dbname(dbname);

    if let Some(port) = url.port() {
        config.port(port);
    }

    if !url.username().is_empty() {
        config.user(url.username());
    }

    if let Some(password) = url.password() {
        config.password(password);
    }

    Ok(config)
}
