use anyhow::anyhow;
use bcrypt::{hash, verify};
use supplydesk_core::AppError;

/// Lowest work factor bcrypt accepts. Only suitable for tests.
pub const MIN_HASH_COST: u32 = 4;

pub fn hash_password_with_cost(password: &str, cost: u32) -> Result<String, AppError> {
    hash(password, cost).map_err(|e| AppError::internal(anyhow!("Failed to hash password: {}", e)))
}

pub fn verify_password(password: &str, hash: &str) -> Result<bool, AppError> {
    verify(password, hash)
        .map_err(|e| AppError::internal(anyhow!("Failed to verify password: {}", e)))
}

/// Hashes on the blocking pool so the runtime workers stay free.
pub async fn hash_password_async(password: String, cost: u32) -> Result<String, AppError> {
    tokio::task::spawn_blocking(move || hash_password_with_cost(&password, cost))
        .await
        .map_err(|e| AppError::internal(anyhow!("Task join error: {}", e)))?
}

/// Verifies on the blocking pool so the runtime workers stay free.
pub async fn verify_password_async(password: String, hash: String) -> Result<bool, AppError> {
    tokio::task::spawn_blocking(move || verify_password(&password, &hash))
        .await
        .map_err(|e| AppError::internal(anyhow!("Task join error: {}", e)))?
}
