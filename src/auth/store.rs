use std::path::PathBuf;

use anyhow::Context;
use axum::async_trait;
use serde::{Deserialize, Serialize};

/// A registered account as persisted on disk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: u64,
    pub email: String,
    /// Argon2 hash, never the plaintext.
    pub password: String,
    pub name: String,
}

/// Whole-file persistence for accounts. Readers get the full list and
/// writers replace it, so concurrent writers race (last writer wins).
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn load_all(&self) -> anyhow::Result<Vec<User>>;
    async fn save_all(&self, users: &[User]) -> anyhow::Result<()>;
}

/// Id assigned on registration: one past the highest id present.
pub fn next_user_id(users: &[User]) -> u64 {
    users.iter().map(|u| u.id).max().unwrap_or(0) + 1
}

/// Pretty-printed JSON array in a single file.
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    async fn create_empty(&self) -> anyhow::Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .with_context(|| format!("creating {}", parent.display()))?;
        }
        tokio::fs::write(&self.path, "[]")
            .await
            .with_context(|| format!("initializing {}", self.path.display()))
    }
}

#[async_trait]
impl UserStore for JsonFileStore {
    async fn load_all(&self) -> anyhow::Result<Vec<User>> {
        let raw = match tokio::fs::read_to_string(&self.path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                self.create_empty().await?;
                return Ok(Vec::new());
            }
            Err(e) => {
                return Err(e).with_context(|| format!("reading {}", self.path.display()));
            }
        };
        serde_json::from_str(&raw).with_context(|| format!("parsing {}", self.path.display()))
    }

    async fn save_all(&self, users: &[User]) -> anyhow::Result<()> {
        let raw = serde_json::to_string_pretty(users).context("serializing users")?;
        tokio::fs::write(&self.path, raw)
            .await
            .with_context(|| format!("writing {}", self.path.display()))
    }
}
