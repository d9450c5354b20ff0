// File: src/store.rs
// Purpose: Persistence sink for accepted submissions

use axum::async_trait;
use chrono::Local;
use intake_validation::{sanitize, SanitizedRecord};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;
use tracing::{debug, info};
use uuid::Uuid;

/// Identifier assigned to a stored submission
pub type RecordId = Uuid;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("stored submissions are not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("password hashing failed: {0}")]
    Hash(#[from] bcrypt::BcryptError),

    #[error("background task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

/// A validated submission on its way to storage
#[derive(Debug, Clone)]
pub struct NewSubmission {
    pub fields: SanitizedRecord,
    pub ip_address: String,
}

/// What actually lands on disk: sanitized fields plus bookkeeping.
/// The raw secret is never stored, only its hash.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredSubmission {
    pub id: RecordId,
    #[serde(flatten)]
    pub fields: BTreeMap<String, String>,
    pub password_hash: String,
    pub submitted_at: String,
    pub ip_address: String,
}

impl StoredSubmission {
    pub fn email(&self) -> Option<&str> {
        self.fields.get("email").map(String::as_str)
    }
}

#[async_trait]
pub trait SubmissionStore: Send + Sync {
    /// Persist a submission, hashing `secret` on the way
    async fn save(&self, submission: NewSubmission, secret: &str) -> Result<RecordId, StoreError>;

    /// Whether any stored submission already uses this address
    async fn email_exists(&self, email: &str) -> Result<bool, StoreError>;
}

fn timestamp() -> String {
    Local::now().format("%Y-%m-%d %H:%M:%S").to_string()
}

async fn hash_secret(secret: &str, cost: u32) -> Result<String, StoreError> {
    let secret = secret.to_string();
    let hash = tokio::task::spawn_blocking(move || bcrypt::hash(secret, cost)).await??;
    Ok(hash)
}

/// Stored emails are sanitized, so compare against the sanitized form
fn same_email(stored: Option<&str>, email: &str) -> bool {
    stored.is_some_and(|stored| stored.eq_ignore_ascii_case(&sanitize(email)))
}

// ============================================================================
// JSON FILE STORE
// ============================================================================

/// One pretty-printed JSON array per day: `<dir>/<YYYY-MM-DD>_submissions.json`
pub struct JsonFileStore {
    dir: PathBuf,
    bcrypt_cost: u32,
    // Serializes read-modify-write of the day file
    write_lock: Mutex<()>,
}

impl JsonFileStore {
    pub fn new(dir: impl Into<PathBuf>, bcrypt_cost: u32) -> Self {
        Self {
            dir: dir.into(),
            bcrypt_cost,
            write_lock: Mutex::new(()),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn day_file(&self) -> PathBuf {
        self.dir
            .join(format!("{}_submissions.json", Local::now().format("%Y-%m-%d")))
    }

    async fn read_file(path: &Path) -> Result<Vec<StoredSubmission>, StoreError> {
        match tokio::fs::read(path).await {
            Ok(bytes) if bytes.iter().all(u8::is_ascii_whitespace) => Ok(Vec::new()),
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Vec::new()),
            Err(e) => Err(e.into()),
        }
    }

    /// Every stored submission across all day files
    pub async fn load_all(&self) -> Result<Vec<StoredSubmission>, StoreError> {
        let mut entries = match tokio::fs::read_dir(&self.dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut all = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            let is_day_file = path
                .file_name()
                .and_then(|n| n.to_str())
                .is_some_and(|n| n.ends_with("_submissions.json"));
            if is_day_file {
                all.extend(Self::read_file(&path).await?);
            }
        }
        Ok(all)
    }
}

#[async_trait]
impl SubmissionStore for JsonFileStore {
    async fn save(&self, submission: NewSubmission, secret: &str) -> Result<RecordId, StoreError> {
        let password_hash = hash_secret(secret, self.bcrypt_cost).await?;
        let record = StoredSubmission {
            id: Uuid::new_v4(),
            fields: submission.fields,
            password_hash,
            submitted_at: timestamp(),
            ip_address: submission.ip_address,
        };

        let _guard = self.write_lock.lock().await;
        tokio::fs::create_dir_all(&self.dir).await?;

        let path = self.day_file();
        let mut existing = Self::read_file(&path).await?;
        existing.push(record.clone());
        tokio::fs::write(&path, serde_json::to_vec_pretty(&existing)?).await?;

        info!(id = %record.id, path = ?path, "submission stored");
        Ok(record.id)
    }

    async fn email_exists(&self, email: &str) -> Result<bool, StoreError> {
        let all = self.load_all().await?;
        let exists = all.iter().any(|s| same_email(s.email(), email));
        debug!(exists, "email lookup");
        Ok(exists)
    }
}

// ============================================================================
// IN-MEMORY STORE
// ============================================================================

/// Keeps submissions in memory; used in tests and local runs
pub struct MemoryStore {
    records: Mutex<Vec<StoredSubmission>>,
    bcrypt_cost: u32,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            records: Mutex::new(Vec::new()),
            bcrypt_cost: bcrypt::DEFAULT_COST,
        }
    }

    /// Lower hashing cost, for tests
    pub fn with_cost(bcrypt_cost: u32) -> Self {
        Self {
            records: Mutex::new(Vec::new()),
            bcrypt_cost,
        }
    }

    pub async fn records(&self) -> Vec<StoredSubmission> {
        self.records.lock().await.clone()
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SubmissionStore for MemoryStore {
    async fn save(&self, submission: NewSubmission, secret: &str) -> Result<RecordId, StoreError> {
        let password_hash = hash_secret(secret, self.bcrypt_cost).await?;
        let id = Uuid::new_v4();
        self.records.lock().await.push(StoredSubmission {
            id,
            fields: submission.fields,
            password_hash,
            submitted_at: timestamp(),
            ip_address: submission.ip_address,
        });
        Ok(id)
    }

    async fn email_exists(&self, email: &str) -> Result<bool, StoreError> {
        let records = self.records.lock().await;
        Ok(records.iter().any(|s| same_email(s.email(), email)))
    }
}
