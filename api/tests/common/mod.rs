//! Shared setup for API integration tests

#![allow(dead_code)]

use std::sync::Arc;

use actix_web::web;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use quill_api::AppState;
use quill_core::errors::StoreError;
use quill_core::{InMemoryRevocationStore, RevocationStore, TokenService};
use quill_shared::JwtConfig;

pub const ACCESS_SECRET: &str = "api-access-secret-for-tests-0123456789";
pub const REFRESH_SECRET: &str = "api-refresh-secret-for-tests-0123456789";

pub fn jwt_config() -> JwtConfig {
    JwtConfig::new(ACCESS_SECRET, REFRESH_SECRET)
}

pub fn state_with(store: Arc<dyn RevocationStore>) -> web::Data<AppState> {
    let service = TokenService::from_jwt_config(&jwt_config(), store).unwrap();
    web::Data::new(AppState::new(Arc::new(service)))
}

pub fn state() -> web::Data<AppState> {
    state_with(Arc::new(InMemoryRevocationStore::new()))
}

/// Store whose backend is unreachable
pub struct DownStore;

#[async_trait]
impl RevocationStore for DownStore {
    async fn revoke(&self, _token: &str, _expires_at: DateTime<Utc>) -> Result<bool, StoreError> {
        Err(StoreError::backend("connection refused"))
    }

    async fn is_revoked(&self, _token: &str) -> Result<bool, StoreError> {
        Err(StoreError::backend("connection refused"))
    }

    async fn clear(&self) -> Result<usize, StoreError> {
        Err(StoreError::backend("connection refused"))
    }

    async fn purge_expired(&self, _now: DateTime<Utc>) -> Result<usize, StoreError> {
        Err(StoreError::backend("connection refused"))
    }

    async fn len(&self) -> Result<usize, StoreError> {
        Err(StoreError::backend("connection refused"))
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Err(StoreError::backend("connection refused"))
    }

    fn backend_name(&self) -> &'static str {
        "down"
    }
}
