//! Confirmation of submitted writes by event correlation.
//!
//! A write counts as successful once the notification index lists the
//! expected event, emitted by the configured contract, for the submitted
//! transaction. The index may lag behind submission; [`ConfirmationPolicy`]
//! decides whether that lag is accepted (one lookup) or waited out with a
//! bounded poll.

use crate::collab::{Notification, NotificationIndex, TxId};
use crate::hash::ScriptHash;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info, warn};

/// Event emitted by the contract when a rental token is minted.
pub const TOKEN_CREATED_EVENT: &str = "TokenCreated";

/// How long to wait for a transaction to show up in the notification index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum ConfirmationPolicy {
    /// Look up notifications exactly once, right after submission.
    #[default]
    SingleShot,
    /// Look up repeatedly while the transaction is not indexed yet.
    Poll { interval_ms: u64, max_attempts: u32 },
}

impl ConfirmationPolicy {
    pub fn poll(interval: Duration, max_attempts: u32) -> Self {
        ConfirmationPolicy::Poll {
            interval_ms: interval.as_millis() as u64,
            max_attempts,
        }
    }

    fn attempts(&self) -> u32 {
        match self {
            ConfirmationPolicy::SingleShot => 1,
            ConfirmationPolicy::Poll { max_attempts, .. } => (*max_attempts).max(1),
        }
    }

    fn interval(&self) -> Duration {
        match self {
            ConfirmationPolicy::SingleShot => Duration::ZERO,
            ConfirmationPolicy::Poll { interval_ms, .. } => Duration::from_millis(*interval_ms),
        }
    }
}

/// What one notification lookup says about the transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lookup {
    /// The expected event is present.
    Matched,
    /// The transaction emitted events, none of them the expected one.
    NotMatched,
    /// No events recorded for the transaction (yet).
    NotIndexed,
}

/// Classify a notification list against the expected contract and event.
pub fn classify(notifications: &[Notification], contract: &ScriptHash, event: &str) -> Lookup {
    if notifications.iter().any(|n| n.matches(contract, event)) {
        Lookup::Matched
    } else if notifications.is_empty() {
        Lookup::NotIndexed
    } else {
        Lookup::NotMatched
    }
}

/// Correlates transactions with events emitted by one contract.
pub struct ConfirmationResolver<'a, N: NotificationIndex + ?Sized> {
    index: &'a N,
    contract: ScriptHash,
    policy: ConfirmationPolicy,
}

impl<'a, N: NotificationIndex + ?Sized> ConfirmationResolver<'a, N> {
    pub fn new(index: &'a N, contract: ScriptHash, policy: ConfirmationPolicy) -> Self {
        Self {
            index,
            contract,
            policy,
        }
    }

    /// Resolve whether `tx_id` emitted `event` from the bound contract.
    ///
    /// Under [`ConfirmationPolicy::SingleShot`] an index error propagates and
    /// an empty lookup resolves to `false`. Under [`ConfirmationPolicy::Poll`]
    /// empty lookups and index errors are retried; the poll stops early once
    /// the transaction's events are known. Running out of attempts yields
    /// `false`, or the last index error if the index never answered.
    #[tracing::instrument(skip_all, fields(tx_id = %tx_id, event = event))]
    pub async fn confirm(&self, tx_id: &TxId, event: &str) -> Result<bool> {
        let attempts = self.policy.attempts();
        let interval = self.policy.interval();
        let mut answered = false;
        let mut last_error: Option<Error> = None;

        for attempt in 1..=attempts {
            match self.index.notifications_for_tx(tx_id).await {
                Ok(notifications) => {
                    answered = true;
                    match classify(&notifications, &self.contract, event) {
                        Lookup::Matched => {
                            info!("Found {} notification after {} lookup(s)", event, attempt);
                            return Ok(true);
                        }
                        Lookup::NotMatched => {
                            debug!(
                                "Transaction emitted {} notification(s), none matching",
                                notifications.len()
                            );
                            return Ok(false);
                        }
                        Lookup::NotIndexed => {
                            debug!("No notifications yet (attempt {}/{})", attempt, attempts);
                        }
                    }
                }
                Err(e) if attempts == 1 => return Err(e),
                Err(e) => {
                    warn!(
                        "Notification lookup failed (attempt {}/{}): {}",
                        attempt, attempts, e
                    );
                    last_error = Some(e);
                }
            }

            if attempt < attempts {
                tokio::time::sleep(interval).await;
            }
        }

        match last_error {
            Some(e) if !answered => Err(e),
            _ => Ok(false),
        }
    }
}
