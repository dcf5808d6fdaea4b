//! Connection-configuration boundary types.
//!
//! The connection manager that consumes these lives outside this crate; the
//! only field read here is `type`, from which the dialect tag is derived.
//! Nothing else is validated.

use crate::dialect::DialectKind;
use crate::error::SqlResult;
use serde::{Deserialize, Serialize};

/// Pool sizing knobs, passed through to the external pool untouched.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PoolConfig {
    pub min: Option<u32>,
    pub max: Option<u32>,
    /// Idle timeout in milliseconds.
    pub idle_timeout: Option<u64>,
    /// Acquire timeout in milliseconds.
    pub acquire_timeout: Option<u64>,
}

/// Database connection configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Database family tag (`postgresql`, `mysql`, `sqlite`).
    #[serde(rename = "type")]
    pub db_type: String,
    pub host: Option<String>,
    pub port: Option<u16>,
    pub database: String,
    pub username: Option<String>,
    pub password: Option<String>,
    pub ssl: Option<bool>,
    pub pool: Option<PoolConfig>,
}

impl DatabaseConfig {
    /// Derive the dialect tag from the `type` field.
    pub fn dialect(&self) -> SqlResult<DialectKind> {
        self.db_type.parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dialect_derives_from_type_tag() {
        let config: DatabaseConfig = serde_json::from_value(serde_json::json!({
            "type": "postgresql",
            "database": "app",
            "pool": { "min": 1, "max": 10 }
        }))
        .unwrap();
        assert_eq!(config.dialect().unwrap(), DialectKind::Postgres);
        assert_eq!(config.pool.as_ref().unwrap().max, Some(10));
    }

    #[test]
    fn unknown_type_tag_is_an_error() {
        let config: DatabaseConfig = serde_json::from_value(serde_json::json!({
            "type": "mssql",
            "database": "app"
        }))
        .unwrap();
        assert!(config.dialect().is_err());
    }
}
