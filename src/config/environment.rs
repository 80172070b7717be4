//! Configuración de variables de entorno
//!
//! Este módulo maneja la configuración del entorno y variables de configuración.
//! Todos los valores tienen un default de desarrollo salvo `JWT_SECRET` en producción.

use anyhow::{bail, Context, Result};
use std::env;
use std::path::PathBuf;
use std::str::FromStr;

use crate::utils::validation::OdometerInputPolicy;

const DEV_JWT_SECRET: &str = "dev-only-jwt-secret-change-me";

/// Límite para JWT_EXPIRATION y RESET_CHALLENGE_TTL (un año)
pub const MAX_DURATION_SECS: u64 = 365 * 24 * 60 * 60;

/// Configuración del entorno
#[derive(Debug, Clone)]
pub struct EnvironmentConfig {
    pub environment: String,
    pub port: u16,
    pub host: String,
    pub database_url: String,
    pub jwt_secret: String,
    pub jwt_expiration: u64,
    pub cors_origins: Vec<String>,
    pub catalog_path: Option<PathBuf>,
    pub odometer_policy: OdometerInputPolicy,
    pub bcrypt_cost: u32,
    pub reset_challenge_ttl: u64,
}

impl Default for EnvironmentConfig {
    fn default() -> Self {
        Self {
            environment: "development".to_string(),
            port: 3000,
            host: "0.0.0.0".to_string(),
            database_url: "sqlite://vehicle_maintenance.db".to_string(),
            jwt_secret: DEV_JWT_SECRET.to_string(),
            jwt_expiration: 86_400,
            cors_origins: Vec::new(),
            catalog_path: None,
            odometer_policy: OdometerInputPolicy::default(),
            bcrypt_cost: bcrypt::DEFAULT_COST,
            reset_challenge_ttl: 300,
        }
    }
}

impl EnvironmentConfig {
    /// Leer la configuración desde las variables de entorno
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();

        let environment = env::var("ENVIRONMENT").unwrap_or(defaults.environment);
        let jwt_secret = match env::var("JWT_SECRET") {
            Ok(secret) if !secret.trim().is_empty() => secret,
            _ if environment == "production" => bail!("JWT_SECRET must be set in production"),
            _ => {
                tracing::warn!("⚠️ JWT_SECRET no definido, usando secreto de desarrollo");
                defaults.jwt_secret
            }
        };

        Ok(Self {
            port: parse_var("PORT", defaults.port)?,
            host: env::var("HOST").unwrap_or(defaults.host),
            database_url: env::var("DATABASE_URL").unwrap_or(defaults.database_url),
            jwt_secret,
            jwt_expiration: parse_duration_var("JWT_EXPIRATION", defaults.jwt_expiration)?,
            cors_origins: env::var("CORS_ORIGINS")
                .map(|origins| {
                    origins
                        .split(',')
                        .map(|s| s.trim().to_string())
                        .filter(|s| !s.is_empty())
                        .collect()
                })
                .unwrap_or(defaults.cors_origins),
            catalog_path: env::var("CATALOG_PATH").ok().map(PathBuf::from),
            odometer_policy: match env::var("ODOMETER_INPUT_POLICY") {
                Ok(value) => value.parse().map_err(anyhow::Error::msg)?,
                Err(_) => defaults.odometer_policy,
            },
            bcrypt_cost: parse_var("BCRYPT_COST", defaults.bcrypt_cost)?,
            reset_challenge_ttl: parse_duration_var("RESET_CHALLENGE_TTL", defaults.reset_challenge_ttl)?,
            environment,
        })
    }

    /// Verificar si estamos en modo producción
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// Obtener la dirección del servidor
    pub fn server_url(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_var<T>(name: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(name) {
        Ok(value) => value
            .trim()
            .parse()
            .with_context(|| format!("{} must be a valid number", name)),
        Err(_) => Ok(default),
    }
}

/// Segundos acotados a `MAX_DURATION_SECS`
fn parse_duration_var(name: &str, default: u64) -> Result<u64> {
    let value = parse_var(name, default)?;
    if value > MAX_DURATION_SECS {
        bail!("{} must be at most {} seconds", name, MAX_DURATION_SECS);
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = EnvironmentConfig::default();
        assert!(!config.is_production());
        assert_eq!(config.server_url(), "0.0.0.0:3000");
        assert_eq!(config.odometer_policy, OdometerInputPolicy::Lenient);
        assert!(config.catalog_path.is_none());
    }

    #[test]
    fn test_parse_var_falls_back_to_default() {
        let value: u64 = parse_var("VEHICLE_MAINTENANCE_UNSET_TEST_VAR", 42).unwrap();
        assert_eq!(value, 42);
    }

    #[test]
    fn test_duration_vars_are_bounded() {
        env::set_var("VEHICLE_MAINTENANCE_TEST_TTL_OK", "300");
        env::set_var("VEHICLE_MAINTENANCE_TEST_TTL_HUGE", "18446744073709551615");
        env::set_var("VEHICLE_MAINTENANCE_TEST_TTL_ABOVE", (MAX_DURATION_SECS + 1).to_string());

        assert_eq!(parse_duration_var("VEHICLE_MAINTENANCE_TEST_TTL_OK", 1).unwrap(), 300);
        assert!(parse_duration_var("VEHICLE_MAINTENANCE_TEST_TTL_HUGE", 1).is_err());
        assert!(parse_duration_var("VEHICLE_MAINTENANCE_TEST_TTL_ABOVE", 1).is_err());
    }
}
