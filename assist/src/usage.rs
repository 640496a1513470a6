//! Freemium gate: a bounded allowance of AI interactions plus a premium
//! flag, persisted as one JSON blob under one storage key.

use serde::Deserialize;
use serde::Serialize;

use crate::error::Error;
use crate::error::Result;
use crate::store::KvStore;
use crate::types::PlanTier;

pub const DEFAULT_FREE_INTERACTIONS: u32 = 5;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct UsageState {
    pub ai_uses_left: u32,
    pub total_ai_uses: u32,
    pub documents_uploaded: u32,
    pub is_premium: bool,
}

impl Default for UsageState {
    fn default() -> Self {
        Self::fresh(DEFAULT_FREE_INTERACTIONS)
    }
}

impl UsageState {
    pub fn fresh(allowance: u32) -> Self {
        Self {
            ai_uses_left: allowance,
            total_ai_uses: 0,
            documents_uploaded: 0,
            is_premium: false,
        }
    }
}

/// Owns the usage state; all mutation goes through its methods and is
/// written back to the store immediately. A failed write is logged and the
/// in-memory state stays authoritative.
pub struct UsageLimiter {
    store: Box<dyn KvStore>,
    key: String,
    allowance: u32,
    state: UsageState,
}

impl UsageLimiter {
    pub fn load(store: Box<dyn KvStore>, key: &str) -> Self {
        Self::load_with_allowance(store, key, DEFAULT_FREE_INTERACTIONS)
    }

    pub fn load_with_allowance(store: Box<dyn KvStore>, key: &str, allowance: u32) -> Self {
        let state = match store.get(key) {
            Ok(Some(blob)) => match serde_json::from_str::<UsageState>(&blob) {
                Ok(state) => state,
                Err(e) => {
                    tracing::warn!("usage: discarding unreadable state under {key}: {e}");
                    UsageState::fresh(allowance)
                }
            },
            Ok(None) => UsageState::fresh(allowance),
            Err(e) => {
                tracing::warn!("usage: could not read {key}: {e:#}");
                UsageState::fresh(allowance)
            }
        };
        Self {
            store,
            key: key.to_string(),
            allowance,
            state,
        }
    }

    pub fn state(&self) -> &UsageState {
        &self.state
    }

    pub fn is_premium(&self) -> bool {
        self.state.is_premium
    }

    pub fn tier(&self) -> PlanTier {
        if self.state.is_premium {
            PlanTier::Premium
        } else {
            PlanTier::Free
        }
    }

    /// Spend one interaction. Premium never touches the counters; a free
    /// plan with nothing left returns false and changes nothing.
    pub fn try_consume_interaction(&mut self) -> bool {
        if self.state.is_premium {
            return true;
        }
        if self.state.ai_uses_left == 0 {
            tracing::info!(
                "usage: free allowance exhausted after {} interactions",
                self.state.total_ai_uses
            );
            return false;
        }
        self.state.ai_uses_left -= 1;
        self.state.total_ai_uses += 1;
        self.persist_or_warn();
        true
    }

    /// Same gate as [`Self::try_consume_interaction`], as an error.
    pub fn require_interaction(&mut self) -> Result<()> {
        if self.try_consume_interaction() {
            Ok(())
        } else {
            Err(Error::UsageLimitExceeded {
                used: self.state.total_ai_uses,
            })
        }
    }

    pub fn upgrade(&mut self) {
        if self.state.is_premium {
            return;
        }
        self.state.is_premium = true;
        tracing::info!("usage: upgraded to premium");
        self.persist_or_warn();
    }

    /// Restore the free allowance. The premium flag is kept.
    pub fn reset(&mut self) {
        self.state = UsageState {
            is_premium: self.state.is_premium,
            ..UsageState::fresh(self.allowance)
        };
        self.persist_or_warn();
    }

    pub fn record_upload(&mut self) {
        self.state.documents_uploaded += 1;
        self.persist_or_warn();
    }

    pub fn persist(&self) -> Result<()> {
        let blob = serde_json::to_string(&self.state)?;
        self.store.set(&self.key, &blob)?;
        Ok(())
    }

    fn persist_or_warn(&self) {
        if let Err(e) = self.persist() {
            tracing::warn!("usage: failed to persist {}: {e}", self.key);
        }
    }
}
