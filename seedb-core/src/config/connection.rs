//! Connection parameter bundle and its validation.
//!
//! `DbOptions` carries the recognized fields `{engine, database, user, pass,
//! host, port, schema}`. The password lives inside [`Credentials`] and is
//! never part of `Display` output or log lines.

use super::Credentials;
use crate::{Result, error::SeedbError};
use regex::Regex;
use std::sync::OnceLock;

/// Database engines accepted on the command line.
///
/// Only PostgreSQL has a seeder; the others are recognised so that users
/// get an "unsupported" error rather than a parse error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DatabaseEngine {
    Postgres,
    MySql,
    MongoDb,
    CockroachDb,
    Sqlite,
}

impl DatabaseEngine {
    /// Every accepted engine identifier, in help-text order.
    pub const IDENTIFIERS: [&'static str; 5] =
        ["postgres", "mysql", "mongodb", "cockroachdb", "sqlite"];

    pub fn identifier(self) -> &'static str {
        match self {
            Self::Postgres => "postgres",
            Self::MySql => "mysql",
            Self::MongoDb => "mongodb",
            Self::CockroachDb => "cockroachdb",
            Self::Sqlite => "sqlite",
        }
    }

    /// Returns true if this build can seed the engine.
    pub fn is_supported(self) -> bool {
        matches!(self, Self::Postgres)
    }

    pub fn default_port(self) -> u16 {
        match self {
            Self::Postgres => 5432,
            Self::MySql => 3306,
            Self::MongoDb => 27017,
            Self::CockroachDb => 26257,
            Self::Sqlite => 0,
        }
    }
}

impl std::str::FromStr for DatabaseEngine {
    type Err = SeedbError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "postgres" => Ok(Self::Postgres),
            "mysql" => Ok(Self::MySql),
            "mongodb" => Ok(Self::MongoDb),
            "cockroachdb" => Ok(Self::CockroachDb),
            "sqlite" => Ok(Self::Sqlite),
            _ => Err(SeedbError::configuration(format!(
                "invalid database engine '{}', select from ({})",
                s,
                Self::IDENTIFIERS.join(", ")
            ))),
        }
    }
}

impl std::fmt::Display for DatabaseEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Postgres => write!(f, "PostgreSQL"),
            Self::MySql => write!(f, "MySQL"),
            Self::MongoDb => write!(f, "MongoDB"),
            Self::CockroachDb => write!(f, "CockroachDB"),
            Self::Sqlite => write!(f, "SQLite"),
        }
    }
}

fn host_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^(([a-zA-Z0-9-]{1,63}\.)+[a-zA-Z]{2,}|localhost|(\d{1,3}\.){3}\d{1,3})$")
            .expect("Invalid host pattern")
    })
}

/// Validates a database host: a dotted hostname, `localhost` or an IPv4
/// address.
///
/// # Errors
/// Returns a configuration error describing the accepted shapes.
pub fn validate_host(host: &str) -> Result<()> {
    if host_pattern().is_match(host) {
        Ok(())
    } else {
        Err(SeedbError::configuration(
            "it should be a valid host (e.g.: 127.0.0.1|localhost|192.168.0.1|example.com)",
        ))
    }
}

/// Connection parameters for one seeding run.
///
/// # Example
/// ```rust
/// use seedb_core::config::{DatabaseEngine, DbOptions};
///
/// let options = DbOptions::new(DatabaseEngine::Postgres, "shop")
///     .with_host("localhost")
///     .with_user("admin")
///     .with_password("secret");
///
/// assert!(options.validate().is_ok());
/// assert!(!options.to_string().contains("secret"));
/// ```
#[derive(Debug, Clone)]
pub struct DbOptions {
    pub engine: DatabaseEngine,
    pub database: String,
    pub credentials: Credentials,
    pub host: String,
    pub port: u16,
    pub schema: String,
}

impl DbOptions {
    /// Creates options with the defaults `root@127.0.0.1:5432`, schema `public`.
    pub fn new(engine: DatabaseEngine, database: impl Into<String>) -> Self {
        Self {
            engine,
            database: database.into(),
            credentials: Credentials::new("root".to_string(), None),
            host: "127.0.0.1".to_string(),
            port: engine.default_port(),
            schema: "public".to_string(),
        }
    }

    /// Builder method to set the host.
    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    /// Builder method to set the port.
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Builder method to set the user, keeping any password.
    pub fn with_user(mut self, user: impl Into<String>) -> Self {
        let password = self.credentials.password().map(str::to_string);
        self.credentials = Credentials::new(user.into(), password);
        self
    }

    /// Builder method to set the password.
    pub fn with_password(mut self, password: impl Into<String>) -> Self {
        self.credentials.set_password(password.into());
        self
    }

    /// Builder method to set the schema (namespace) to seed.
    pub fn with_schema(mut self, schema: impl Into<String>) -> Self {
        self.schema = schema.into();
        self
    }

    pub fn user(&self) -> &str {
        self.credentials.username()
    }

    /// Validates every field that the prompts and flags would reject.
    ///
    /// # Errors
    /// Returns the first configuration error found.
    pub fn validate(&self) -> Result<()> {
        if self.database.is_empty() {
            return Err(SeedbError::configuration("database name is required"));
        }
        if self.user().is_empty() {
            return Err(SeedbError::configuration("username is required"));
        }
        if !self.credentials.has_password() {
            return Err(SeedbError::configuration("password is required"));
        }
        if self.schema.is_empty() {
            return Err(SeedbError::configuration("database schema is required"));
        }
        if self.host.is_empty() {
            return Err(SeedbError::configuration("database host is required"));
        }
        validate_host(&self.host)?;
        if self.port == 0 {
            return Err(SeedbError::configuration("port must be greater than 0"));
        }
        Ok(())
    }

    /// Connection URL with the password masked, for log lines.
    pub fn redacted_url(&self) -> String {
        let password = if self.credentials.has_password() {
            ":****"
        } else {
            ""
        };
        format!(
            "{}://{}{}@{}:{}/{}",
            self.engine.identifier(),
            self.user(),
            password,
            self.host,
            self.port,
            self.database
        )
    }
}

impl std::fmt::Display for DbOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Username and password intentionally omitted
        write!(
            f,
            "{}({}:{}/{} schema={})",
            self.engine, self.host, self.port, self.database, self.schema
        )
    }
}
