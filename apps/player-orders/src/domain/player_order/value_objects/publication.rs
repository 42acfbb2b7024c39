//! Publication window of a published order.

use serde::Serialize;

use crate::domain::shared::Timestamp;

/// When an order went live and when it stops accepting contractors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Publication {
    /// Publication instant.
    pub published_at: Timestamp,
    /// Brief deadline at publication time, if any.
    pub expires_at: Option<Timestamp>,
}
