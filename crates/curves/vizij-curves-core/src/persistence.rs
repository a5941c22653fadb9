//! Debounced share-token publishing.
//!
//! Hosts persist the current document by writing the share token somewhere
//! (URL fragment, local storage). Regenerating it on every drag frame is
//! wasteful, so the publisher waits until the document has been quiet for
//! `debounce_ms` and only hands out tokens that actually changed.

use log::{debug, warn};

use crate::codec::token;
use crate::config::EditorConfig;
use crate::data::CurveSet;
use crate::outputs::SessionEvent;

#[derive(Clone, Debug)]
pub struct TokenPublisher {
    debounce_ms: f64,
    max_len: usize,
    /// Host clock (ms) of the most recent unpublished change.
    dirty_since: Option<f64>,
    last_token: Option<String>,
}

impl TokenPublisher {
    pub fn new(debounce_ms: f64, max_len: usize) -> Self {
        Self {
            debounce_ms: debounce_ms.max(0.0),
            max_len,
            dirty_since: None,
            last_token: None,
        }
    }

    pub fn from_config(cfg: &EditorConfig) -> Self {
        Self::new(cfg.token_debounce_ms, cfg.max_token_len)
    }

    /// Record a document change at host time `now_ms`. Restarts the quiet period.
    pub fn mark_dirty(&mut self, now_ms: f64) {
        self.dirty_since = Some(now_ms);
    }

    /// Mark dirty if `events` contain a document change.
    pub fn observe(&mut self, events: &[SessionEvent], now_ms: f64) {
        if events.contains(&SessionEvent::DocumentChanged) {
            self.mark_dirty(now_ms);
        }
    }

    pub fn is_pending(&self) -> bool {
        self.dirty_since.is_some()
    }

    /// Token for `set` once the quiet period has elapsed, if it differs from the
    /// last published one. Tokens longer than `max_len` are dropped with a warning.
    pub fn poll(&mut self, now_ms: f64, set: &CurveSet) -> Option<String> {
        let since = self.dirty_since?;
        if now_ms - since < self.debounce_ms {
            return None;
        }
        self.flush(set)
    }

    /// Publish immediately, ignoring the quiet period.
    pub fn flush(&mut self, set: &CurveSet) -> Option<String> {
        self.dirty_since = None;
        let tok = token::encode(set);
        if self.last_token.as_deref() == Some(tok.as_str()) {
            debug!("share token unchanged, skipping publish");
            return None;
        }
        if tok.len() > self.max_len {
            warn!(
                "share token is {} chars (limit {}), not publishing",
                tok.len(),
                self.max_len
            );
            return None;
        }
        self.last_token = Some(tok.clone());
        Some(tok)
    }

    pub fn last_token(&self) -> Option<&str> {
        self.last_token.as_deref()
    }
}
