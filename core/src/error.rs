// core/src/error.rs
use thiserror::Error;

/// Feiltyper for kjernen.
///
/// Detektoren selv har ingen feilmoduser: for få samples og ubrukelig dt er
/// vanlig kontrollflyt, ikke feil. Variantene under dekker kamera/pose-laget
/// (som kjernen bare sender videre), konfig, sesjon og JSON-inngang.
#[derive(Debug, Error)]
pub enum KickError {
    #[error("camera device unavailable: {0}")]
    DeviceUnavailable(String),

    #[error("camera permission denied: {0}")]
    PermissionDenied(String),

    #[error("pose tracking failed: {0}")]
    TrackingFailed(String),

    #[error("invalid detector config: {0}")]
    InvalidConfig(String),

    #[error("no active recording session")]
    SessionNotActive,

    #[error("parse error at {path}: {message}")]
    Parse { path: String, message: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl KickError {
    /// Sant for feil som kommer fra tracking-samarbeidspartneren (kamera/pose).
    pub fn is_tracking_failure(&self) -> bool {
        matches!(
            self,
            KickError::DeviceUnavailable(_)
                | KickError::PermissionDenied(_)
                | KickError::TrackingFailed(_)
        )
    }
}

pub type KickResult<T> = Result<T, KickError>;
