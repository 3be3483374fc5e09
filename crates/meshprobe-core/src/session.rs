//! Request tokens for callers that may overlap inspections.
//!
//! Each new request supersedes the previous one. A completion is accepted only
//! if it carries the most recently issued token; anything older is dropped.
//!
//! ```
//! use meshprobe_core::{inspect, AssetContent, InspectionMode, InspectionSession};
//!
//! let mut session = InspectionSession::new();
//!
//! // A first file is picked, then replaced before its read completes
//! let first = session.begin();
//! let second = session.begin();
//!
//! let newer = AssetContent::from(r#"{"asset":{"version":"2.0"}}"#);
//! let accepted = session.complete(second, inspect(&newer, InspectionMode::Textual));
//! assert!(accepted.is_some());
//!
//! // The slow read for the first file lands late and is ignored
//! let older = AssetContent::from("not json");
//! let stale = session.complete(first, inspect(&older, InspectionMode::Textual));
//! assert!(stale.is_none());
//! assert!(session.latest().map_or(false, |v| v.is_valid));
//! ```

use crate::verdict::InspectionVerdict;
use tracing::trace;

/// Identifies one inspection request
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestToken(u64);

impl RequestToken {
    /// Raw sequence number
    pub fn get(&self) -> u64 {
        self.0
    }
}

/// Tracks the latest request and its accepted result
#[derive(Debug, Default)]
pub struct InspectionSession {
    issued: u64,
    latest: Option<InspectionVerdict>,
}

impl InspectionSession {
    /// Creates an empty session
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a new request, superseding any pending one
    pub fn begin(&mut self) -> RequestToken {
        self.issued += 1;
        RequestToken(self.issued)
    }

    /// Returns true if the token belongs to the latest request
    pub fn is_current(&self, token: RequestToken) -> bool {
        token.0 == self.issued
    }

    /// Records a completion; stale tokens are discarded and yield `None`
    pub fn complete(
        &mut self,
        token: RequestToken,
        verdict: InspectionVerdict,
    ) -> Option<&InspectionVerdict> {
        if !self.is_current(token) {
            trace!(
                "Discarding stale completion {} (latest is {})",
                token.0,
                self.issued
            );
            return None;
        }
        self.latest = Some(verdict);
        self.latest.as_ref()
    }

    /// Last accepted verdict
    pub fn latest(&self) -> Option<&InspectionVerdict> {
        self.latest.as_ref()
    }
}
