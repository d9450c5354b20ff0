// File: src/activity.rs
// Purpose: Append-only activity log for submission events
//
// Logging here is best effort. A failed write is reported through tracing and
// otherwise ignored; it never changes the outcome of a request.

use anyhow::{Context, Result};
use axum::async_trait;
use chrono::Local;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;
use tracing::warn;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityEntry {
    pub timestamp: String,
    pub message: String,
    pub identifier: String,
    pub severity: Severity,
    pub ip: String,
    pub user_agent: String,
}

impl ActivityEntry {
    pub fn new(message: impl Into<String>, identifier: impl Into<String>, severity: Severity) -> Self {
        Self {
            timestamp: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            message: message.into(),
            identifier: identifier.into(),
            severity,
            ip: "unknown".to_string(),
            user_agent: "unknown".to_string(),
        }
    }

    pub fn with_client(mut self, ip: impl Into<String>, user_agent: impl Into<String>) -> Self {
        self.ip = ip.into();
        self.user_agent = user_agent.into();
        self
    }
}

#[async_trait]
pub trait ActivityLog: Send + Sync {
    async fn record(&self, entry: ActivityEntry) -> Result<()>;
}

/// Record an entry, swallowing any failure
pub async fn log_activity(log: &dyn ActivityLog, entry: ActivityEntry) {
    let message = entry.message.clone();
    if let Err(e) = log.record(entry).await {
        warn!(error = %e, activity = %message, "failed to write activity log");
    }
}

/// One JSON object per line in `<dir>/activity_<YYYY-MM-DD>.log`
pub struct JsonLinesActivityLog {
    dir: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonLinesActivityLog {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn day_file(&self) -> PathBuf {
        self.dir
            .join(format!("activity_{}.log", Local::now().format("%Y-%m-%d")))
    }
}

#[async_trait]
impl ActivityLog for JsonLinesActivityLog {
    async fn record(&self, entry: ActivityEntry) -> Result<()> {
        let mut line = serde_json::to_string(&entry)?;
        line.push('\n');

        let _guard = self.write_lock.lock().await;
        tokio::fs::create_dir_all(&self.dir)
            .await
            .with_context(|| format!("Failed to create log directory: {:?}", self.dir))?;

        let path = self.day_file();
        let mut file = tokio::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .await
            .with_context(|| format!("Failed to open activity log: {:?}", path))?;
        file.write_all(line.as_bytes()).await?;
        file.flush().await?;
        Ok(())
    }
}

/// Collects entries in memory; used in tests
#[derive(Default)]
pub struct MemoryActivityLog {
    entries: Mutex<Vec<ActivityEntry>>,
}

impl MemoryActivityLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn entries(&self) -> Vec<ActivityEntry> {
        self.entries.lock().await.clone()
    }
}

#[async_trait]
impl ActivityLog for MemoryActivityLog {
    async fn record(&self, entry: ActivityEntry) -> Result<()> {
        self.entries.lock().await.push(entry);
        Ok(())
    }
}
