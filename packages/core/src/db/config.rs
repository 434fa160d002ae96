//! Store connection configuration
//!
//! The process reads a single connection string, `DB_URL`. Embedded engines
//! (`mem://`, `rocksdb://path`) are passed through to the driver untouched.
//! Remote endpoints (`http`, `https`, `ws`, `wss`) may carry credentials as
//! URL userinfo; they are split off here and used for a root sign-in so they
//! never reach logs or error messages.

use super::DatabaseError;
use percent_encoding::percent_decode_str;
use std::fmt;
use url::Url;

/// Environment variable holding the connection string
pub const DB_URL_VAR: &str = "DB_URL";

/// Namespace every collection lives in
pub const NAMESPACE: &str = "bandersnatch";

/// Database every collection lives in
pub const DATABASE: &str = "Database";

/// Storage engine selected by the connection string scheme
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Engine {
    /// Embedded in-memory store, lost on shutdown
    Memory,
    /// Embedded RocksDB store on local disk
    RocksDb,
    /// Remote server over HTTP or WebSocket
    Remote { secure: bool },
}

/// Root credentials taken from the connection string userinfo
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

/// Validated connection settings for [`DocumentClient`](super::DocumentClient)
#[derive(Debug, Clone)]
pub struct StoreConfig {
    endpoint: String,
    engine: Engine,
    credentials: Option<Credentials>,
    namespace: String,
    database: String,
}

impl StoreConfig {
    /// Build configuration from the `DB_URL` environment variable
    pub fn from_env() -> Result<Self, DatabaseError> {
        Self::from_raw(std::env::var(DB_URL_VAR).ok().as_deref())
    }

    fn from_raw(raw: Option<&str>) -> Result<Self, DatabaseError> {
        match raw.map(str::trim) {
            Some(url) if !url.is_empty() => Self::new(url),
            _ => Err(DatabaseError::MissingConnectionString { var: DB_URL_VAR }),
        }
    }

    /// Validate a connection string
    pub fn new(url: &str) -> Result<Self, DatabaseError> {
        if url == "memory" {
            return Ok(Self::with_endpoint(url.to_string(), Engine::Memory, None));
        }

        let parsed = Url::parse(url)
            .map_err(|e| DatabaseError::invalid_connection_string(redact(url), e.to_string()))?;

        let engine = match parsed.scheme() {
            "mem" | "memory" => Engine::Memory,
            "rocksdb" => Engine::RocksDb,
            "http" | "ws" => Engine::Remote { secure: false },
            "https" | "wss" => Engine::Remote { secure: true },
            other => {
                return Err(DatabaseError::invalid_connection_string(
                    redact(url),
                    format!("unsupported scheme '{}'", other),
                ))
            }
        };

        if !matches!(engine, Engine::Remote { .. }) {
            return Ok(Self::with_endpoint(url.to_string(), engine, None));
        }

        if parsed.host_str().map_or(true, str::is_empty) {
            return Err(DatabaseError::invalid_connection_string(
                redact(url),
                "remote endpoint has no host",
            ));
        }

        let credentials = if parsed.username().is_empty() {
            None
        } else {
            Some(Credentials {
                username: decode_userinfo(url, parsed.username())?,
                password: decode_userinfo(url, parsed.password().unwrap_or_default())?,
            })
        };

        let endpoint = if credentials.is_some() {
            let mut stripped = parsed;
            // set_username/set_password only fail for cannot-be-a-base URLs,
            // which were rejected by the host check above
            let _ = stripped.set_username("");
            let _ = stripped.set_password(None);
            stripped.to_string()
        } else {
            url.to_string()
        };

        Ok(Self::with_endpoint(endpoint, engine, credentials))
    }

    fn with_endpoint(endpoint: String, engine: Engine, credentials: Option<Credentials>) -> Self {
        Self {
            endpoint,
            engine,
            credentials,
            namespace: NAMESPACE.to_string(),
            database: DATABASE.to_string(),
        }
    }

    /// Connection string handed to the driver, without credentials
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Connection string safe for logs and error messages
    pub fn redacted_url(&self) -> &str {
        &self.endpoint
    }

    pub fn engine(&self) -> Engine {
        self.engine
    }

    pub fn credentials(&self) -> Option<&Credentials> {
        self.credentials.as_ref()
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn database(&self) -> &str {
        &self.database
    }
}

/// Userinfo arrives percent-encoded; the server expects the raw value
fn decode_userinfo(url: &str, part: &str) -> Result<String, DatabaseError> {
    percent_decode_str(part)
        .decode_utf8()
        .map(|decoded| decoded.into_owned())
        .map_err(|_| {
            DatabaseError::invalid_connection_string(
                redact(url),
                "credentials are not valid percent-encoded UTF-8",
            )
        })
}

/// Mask userinfo in a raw connection string that failed to parse cleanly
fn redact(url: &str) -> String {
    match (url.find("://"), url.rfind('@')) {
        (Some(scheme_end), Some(at)) if at > scheme_end => {
            format!("{}://***@{}", &url[..scheme_end], &url[at + 1..])
        }
        _ => url.to_string(),
    }
}
