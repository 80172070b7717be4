//! Utilidades de validación
//!
//! Este módulo contiene los patrones compartidos por los DTOs y la
//! interpretación de las lecturas de odómetro enviadas por el cliente.

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::utils::errors::{validation_error, AppError};

lazy_static! {
    /// Número móvil de exactamente 10 dígitos
    pub static ref MOBILE_NUMBER: Regex = Regex::new(r"^\d{10}$").unwrap();
}

/// Lectura de odómetro tal como llega en el JSON: número o texto de formulario.
/// Cualquier otro valor (decimal, null, booleano, fuera de rango) cae en
/// `Other` y lo decide la política, nunca el deserializador.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OdometerInput {
    Number(i64),
    Text(String),
    Other(serde_json::Value),
}

impl From<i64> for OdometerInput {
    fn from(value: i64) -> Self {
        OdometerInput::Number(value)
    }
}

impl From<&str> for OdometerInput {
    fn from(value: &str) -> Self {
        OdometerInput::Text(value.to_string())
    }
}

/// Qué hacer con una lectura de odómetro mal formada
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OdometerInputPolicy {
    /// La lectura inválida se toma como 0 km
    #[default]
    Lenient,
    /// La lectura inválida rechaza toda la actualización
    Strict,
}

impl FromStr for OdometerInputPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "lenient" => Ok(OdometerInputPolicy::Lenient),
            "strict" => Ok(OdometerInputPolicy::Strict),
            other => Err(format!("unknown odometer input policy '{}'", other)),
        }
    }
}

impl OdometerInput {
    /// Valor en km si la lectura es un entero no negativo
    pub fn as_km(&self) -> Option<i64> {
        let value = match self {
            OdometerInput::Number(n) => *n,
            OdometerInput::Text(s) => s.trim().parse::<i64>().ok()?,
            OdometerInput::Other(_) => return None,
        };
        (value >= 0).then_some(value)
    }
}

/// Interpretar una lectura de odómetro según la política configurada
pub fn parse_odometer(input: &OdometerInput, policy: OdometerInputPolicy) -> Result<i64, AppError> {
    match (input.as_km(), policy) {
        (Some(km), _) => Ok(km),
        (None, OdometerInputPolicy::Lenient) => {
            tracing::debug!("Lectura de odómetro inválida {:?}, se usa 0", input);
            Ok(0)
        }
        (None, OdometerInputPolicy::Strict) => Err(validation_error(
            "odometer",
            "Odometer reading must be a non-negative integer",
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mobile_number_pattern() {
        assert!(MOBILE_NUMBER.is_match("9876543210"));
        assert!(!MOBILE_NUMBER.is_match("98765"));
        assert!(!MOBILE_NUMBER.is_match("98765432101"));
        assert!(!MOBILE_NUMBER.is_match("98765abcde"));
    }

    #[test]
    fn test_parse_odometer_accepts_numbers_and_text() {
        let policy = OdometerInputPolicy::Strict;
        assert_eq!(parse_odometer(&OdometerInput::Number(12000), policy).unwrap(), 12000);
        assert_eq!(parse_odometer(&" 4500 ".into(), policy).unwrap(), 4500);
        assert_eq!(parse_odometer(&OdometerInput::Number(0), policy).unwrap(), 0);
    }

    #[test]
    fn test_lenient_policy_coerces_to_zero() {
        let policy = OdometerInputPolicy::Lenient;
        assert_eq!(parse_odometer(&"abc".into(), policy).unwrap(), 0);
        assert_eq!(parse_odometer(&"".into(), policy).unwrap(), 0);
        assert_eq!(parse_odometer(&OdometerInput::Number(-10), policy).unwrap(), 0);
    }

    #[test]
    fn test_non_integer_json_reaches_policy() {
        let inputs: Vec<OdometerInput> = ["12.5", "null", "true", "1e30", "[1]"]
            .iter()
            .map(|raw| serde_json::from_str(raw).unwrap())
            .collect();

        for input in &inputs {
            assert!(matches!(input, OdometerInput::Other(_)), "{:?}", input);
            assert_eq!(parse_odometer(input, OdometerInputPolicy::Lenient).unwrap(), 0);
            assert!(matches!(
                parse_odometer(input, OdometerInputPolicy::Strict),
                Err(AppError::Validation(_))
            ));
        }
    }

    #[test]
    fn test_strict_policy_rejects() {
        let policy = OdometerInputPolicy::Strict;
        assert!(matches!(
            parse_odometer(&"12k".into(), policy),
            Err(AppError::Validation(_))
        ));
        assert!(parse_odometer(&OdometerInput::Number(-1), policy).is_err());
    }

    #[test]
    fn test_policy_from_str() {
        assert_eq!("STRICT".parse::<OdometerInputPolicy>().unwrap(), OdometerInputPolicy::Strict);
        assert_eq!("lenient".parse::<OdometerInputPolicy>().unwrap(), OdometerInputPolicy::Lenient);
        assert!("sometimes".parse::<OdometerInputPolicy>().is_err());
    }
}
