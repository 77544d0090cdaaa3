use std::collections::HashMap;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::errors::{AppError, AppResult};

/// Descriptor for a file handed over by the upload subsystem.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadedFile {
    pub original_filename: String,
    pub mimetype: String,
    pub size: u64,
    pub stored_path: String,
}

#[derive(Clone, Debug)]
pub struct UploadSession {
    pub token: String,
    pub files: Vec<UploadedFile>,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl UploadSession {
    fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now
    }
}

/// Keyed storage for upload sessions. The session token is a generated
/// capability, not a client-supplied value; each session holds at most one
/// active file set (new uploads replace prior ones) and is evicted after its
/// TTL, both lazily on access and via `sweep_expired`.
pub struct UploadSessionStore {
    sessions: RwLock<HashMap<String, UploadSession>>,
    ttl: Duration,
}

impl UploadSessionStore {
    pub fn new(ttl_minutes: i64) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            ttl: Duration::minutes(ttl_minutes),
        }
    }

    pub async fn begin_session(&self) -> UploadSession {
        let now = Utc::now();
        let session = UploadSession {
            token: Uuid::new_v4().to_string(),
            files: Vec::new(),
            created_at: now,
            expires_at: now + self.ttl,
        };

        let mut sessions = self.sessions.write().await;
        sessions.insert(session.token.clone(), session.clone());
        session
    }

    /// Replaces the session's file set and refreshes its expiry, mirroring a
    /// re-upload over the same session.
    pub async fn replace_files(
        &self,
        token: &str,
        files: Vec<UploadedFile>,
    ) -> AppResult<UploadSession> {
        let now = Utc::now();
        let mut sessions = self.sessions.write().await;

        match sessions.get_mut(token) {
            Some(session) if !session.is_expired(now) => {
                session.files = files;
                session.expires_at = now + self.ttl;
                Ok(session.clone())
            }
            Some(_) => {
                sessions.remove(token);
                Err(AppError::NotFound(format!(
                    "Upload session '{}' has expired",
                    token
                )))
            }
            None => Err(AppError::NotFound(format!(
                "Upload session '{}' not found",
                token
            ))),
        }
    }

    pub async fn get_files(&self, token: &str) -> AppResult<Vec<UploadedFile>> {
        let now = Utc::now();

        {
            let sessions = self.sessions.read().await;
            match sessions.get(token) {
                Some(session) if !session.is_expired(now) => {
                    return Ok(session.files.clone());
                }
                None => {
                    return Err(AppError::NotFound(format!(
                        "Upload session '{}' not found",
                        token
                    )));
                }
                Some(_) => {}
            }
        }

        // Expired: evict under the write lock, then report absence.
        let mut sessions = self.sessions.write().await;
        sessions.remove(token);
        Err(AppError::NotFound(format!(
            "Upload session '{}' has expired",
            token
        )))
    }

    /// Removes every expired session; returns how many were evicted.
    pub async fn sweep_expired(&self) -> usize {
        let now = Utc::now();
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, session| !session.is_expired(now));
        before - sessions.len()
    }
}
