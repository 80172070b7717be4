//! Shared application state
//!
//! Este módulo define el estado compartido de la aplicación que se pasa
//! a través del router de Axum.

use chrono::{DateTime, Duration, Utc};
use rand::Rng;
use sqlx::SqlitePool;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::config::environment::{EnvironmentConfig, MAX_DURATION_SECS};
use crate::models::catalog::VehicleCatalog;
use crate::utils::jwt::JwtConfig;

/// Pregunta aritmética pendiente para recuperar una contraseña
#[derive(Clone, Debug)]
pub struct ResetChallenge {
    pub question: String,
    pub answer: i64,
    pub expires_at: DateTime<Utc>,
}

impl ResetChallenge {
    /// "What is a + b?" con a, b entre 1 y 9
    pub fn generate(ttl_seconds: u64) -> Self {
        let mut rng = rand::thread_rng();
        let a: i64 = rng.gen_range(1..=9);
        let b: i64 = rng.gen_range(1..=9);

        Self {
            question: format!("What is {} + {}?", a, b),
            answer: a + b,
            expires_at: Utc::now() + Duration::seconds(ttl_seconds.min(MAX_DURATION_SECS) as i64),
        }
    }

    pub fn is_expired(&self) -> bool {
        Utc::now() > self.expires_at
    }
}

#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
    pub config: EnvironmentConfig,
    pub catalog: Arc<VehicleCatalog>,
    pub reset_challenges: Arc<RwLock<HashMap<Uuid, ResetChallenge>>>,
    /// jti → expiración del token revocado
    pub revoked_tokens: Arc<RwLock<HashMap<String, DateTime<Utc>>>>,
}

impl AppState {
    pub fn new(pool: SqlitePool, config: EnvironmentConfig, catalog: VehicleCatalog) -> Self {
        Self {
            pool,
            config,
            catalog: Arc::new(catalog),
            reset_challenges: Arc::new(RwLock::new(HashMap::new())),
            revoked_tokens: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    pub fn jwt_config(&self) -> JwtConfig {
        JwtConfig::from(&self.config)
    }

    /// Crear y guardar un desafío nuevo
    pub async fn issue_reset_challenge(&self) -> (Uuid, ResetChallenge) {
        let id = Uuid::new_v4();
        let challenge = ResetChallenge::generate(self.config.reset_challenge_ttl);

        let mut challenges = self.reset_challenges.write().await;
        challenges.retain(|_, c| !c.is_expired());
        challenges.insert(id, challenge.clone());
        tracing::debug!("🔑 Desafío de recuperación emitido ({} pendientes)", challenges.len());

        (id, challenge)
    }

    /// Retirar un desafío; cada desafío sirve para un solo intento
    pub async fn take_reset_challenge(&self, id: Uuid) -> Option<ResetChallenge> {
        let mut challenges = self.reset_challenges.write().await;
        challenges.remove(&id).filter(|c| !c.is_expired())
    }

    pub async fn revoke_token(&self, jti: String, expires_at: DateTime<Utc>) {
        let mut revoked = self.revoked_tokens.write().await;
        revoked.retain(|_, exp| *exp > Utc::now());
        revoked.insert(jti, expires_at);
    }

    pub async fn is_token_revoked(&self, jti: &str) -> bool {
        self.revoked_tokens.read().await.contains_key(jti)
    }
}
