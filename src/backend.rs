//! Client for the external review-generation backend
//!
//! The backend is a separate executable speaking JSON over stdin/stdout,
//! one request per process. The core never retries: every failure here is
//! terminal for its request and surfaced with its distinguishing category.

use crate::error::BackendError;
use crate::types::{ReviewRequest, ReviewResponse};
use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::PathBuf;
use std::process::Stdio;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

/// A source of review records for a file's text
#[async_trait]
pub trait ReviewBackend: Send + Sync {
    async fn request_reviews(
        &self,
        request: &ReviewRequest,
    ) -> Result<ReviewResponse, BackendError>;
}

/// Backend that spawns the configured executable per request
pub struct ProcessBackend {
    executable: PathBuf,
}

impl ProcessBackend {
    pub fn new(executable: impl Into<PathBuf>) -> Self {
        Self {
            executable: executable.into(),
        }
    }
}

#[async_trait]
impl ReviewBackend for ProcessBackend {
    async fn request_reviews(
        &self,
        request: &ReviewRequest,
    ) -> Result<ReviewResponse, BackendError> {
        let payload = serde_json::to_vec(request)
            .map_err(|err| BackendError::MalformedRequest(err.to_string()))?;

        let mut command = Command::new(&self.executable);
        command
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        // The backend protocol: key via environment, mock mode when absent.
        match request.api_key.as_deref() {
            Some(key) if !key.is_empty() => {
                command.env("GEMINI_API_KEY", key);
            }
            _ => {
                command.env("MOCK_MODE", "true");
            }
        }

        tracing::debug!("Spawning review backend at {:?}", self.executable);
        let mut child = command.spawn().map_err(|err| {
            if err.kind() == ErrorKind::NotFound {
                BackendError::ExecutableNotFound(self.executable.display().to_string())
            } else {
                BackendError::Io(err.to_string())
            }
        })?;

        let mut stdin = child
            .stdin
            .take()
            .ok_or_else(|| BackendError::Io("backend stdin unavailable".to_string()))?;
        stdin
            .write_all(&payload)
            .await
            .map_err(|err| BackendError::Io(err.to_string()))?;
        drop(stdin);

        let output = child
            .wait_with_output()
            .await
            .map_err(|err| BackendError::Io(err.to_string()))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            return Err(classify_failure(output.status.code().unwrap_or(-1), stderr));
        }

        serde_json::from_slice(&output.stdout)
            .map_err(|err| BackendError::MalformedResponse(err.to_string()))
    }
}

/// Map a non-zero exit onto the error taxonomy using stderr markers
fn classify_failure(code: i32, stderr: String) -> BackendError {
    let lowered = stderr.to_lowercase();
    if lowered.contains("quota")
        || lowered.contains("resource_exhausted")
        || lowered.contains("429")
    {
        BackendError::QuotaExceeded(stderr)
    } else if lowered.contains("api key")
        || lowered.contains("api_key_invalid")
        || lowered.contains("unauthenticated")
    {
        BackendError::InvalidApiKey(stderr)
    } else if lowered.contains("failed to parse json") || lowered.contains("missing required fields")
    {
        BackendError::MalformedRequest(stderr)
    } else {
        BackendError::Failed { code, stderr }
    }
}
