//! What the core hands to a QR renderer. The renderer itself is opaque.

use serde::{Deserialize, Serialize};

/// Error-correction level, in the usual L < M < Q < H order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum QrLevel {
    L,
    #[default]
    M,
    Q,
    H,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QrRequest {
    pub payload: String,
    pub level: QrLevel,
    pub quiet_zone: bool,
}

impl QrRequest {
    pub fn new(payload: impl Into<String>, config: &crate::config::QrConfig) -> Self {
        Self {
            payload: payload.into(),
            level: config.level,
            quiet_zone: config.quiet_zone,
        }
    }
}
