//! Cooldown gate and coin payout
//!
//! The engine never touches the player's profile directly. It reads and
//! writes only what [`EconomyService`] exposes: cooldown expiry, earn rate,
//! the cosmetic player glyph, and a single payout request per session.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::Timestamp;
use crate::consts::COOLDOWN_MS;
use crate::session::FinishedSession;

const MS_PER_MINUTE: u64 = 60 * 1000;
const MS_PER_HOUR: u64 = 60 * MS_PER_MINUTE;

/// Failure talking to the economy service
#[derive(Debug, Error)]
pub enum EconomyError {
    #[error("ledger I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("ledger serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("payout rejected: {0}")]
    Rejected(String),
}

/// Transaction types in the player's coin history
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Earn,
    Save,
    Spend,
    Donate,
}

/// One entry in the coin history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub kind: TransactionKind,
    pub amount: u64,
    pub description: String,
    pub timestamp: Timestamp,
}

/// Everything a finished session asks the economy to persist, applied as one unit
#[derive(Debug, Clone, PartialEq)]
pub struct PayoutRequest {
    /// Coins to add to the balance
    pub amount: u64,
    /// When the next session may start
    pub cooldown_expiry: Timestamp,
    pub transaction: Transaction,
}

/// External persistence/economy collaborator
pub trait EconomyService {
    /// Persisted time the next session is permitted, if any
    fn cooldown_expiry(&self) -> Option<Timestamp>;

    /// Coins paid per point
    fn earn_rate(&self) -> u64;

    /// Cosmetic glyph drawn for the player
    fn player_glyph(&self) -> &str;

    /// Apply a payout. Balance, cooldown and transaction change together; an
    /// error means they were not confirmed as persisted.
    fn apply_payout(&mut self, request: &PayoutRequest) -> Result<(), EconomyError>;

    fn has_pending_cooldown(&self, now: Timestamp) -> bool {
        self.cooldown_expiry().is_some_and(|expiry| now < expiry)
    }
}

/// Time left on a cooldown, floored to whole hours and minutes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RemainingCooldown {
    pub hours: u64,
    pub minutes: u64,
}

impl RemainingCooldown {
    pub fn between(now: Timestamp, expiry: Timestamp) -> Self {
        let remaining = expiry.saturating_sub(now);
        Self {
            hours: remaining / MS_PER_HOUR,
            minutes: (remaining % MS_PER_HOUR) / MS_PER_MINUTE,
        }
    }
}

impl fmt::Display for RemainingCooldown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.hours, self.minutes) {
            (0, 0) => write!(f, "a few seconds"),
            (h, 0) => write!(f, "{}h", h),
            (0, m) => write!(f, "{}min", m),
            (h, m) => write!(f, "{}h {}min", h, m),
        }
    }
}

/// Whether a session may start right now
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Eligibility {
    Eligible,
    Blocked(RemainingCooldown),
}

/// Outcome of settling a finished session
#[derive(Debug)]
pub struct Settlement {
    pub final_score: u32,
    pub payout: u64,
    /// Set when the payout could not be persisted. The local outcome stands.
    pub error: Option<EconomyError>,
}

impl Settlement {
    /// Payout was requested and the service accepted it
    pub fn persisted(&self) -> bool {
        self.payout > 0 && self.error.is_none()
    }
}

/// Enforces the cooldown between sessions and turns scores into coins
#[derive(Debug, Clone, Copy)]
pub struct CooldownGate {
    /// Minimum time between paid sessions
    pub duration_ms: u64,
}

impl Default for CooldownGate {
    fn default() -> Self {
        Self {
            duration_ms: COOLDOWN_MS,
        }
    }
}

impl CooldownGate {
    pub fn new(duration_ms: u64) -> Self {
        Self { duration_ms }
    }

    pub fn can_start(&self, service: &dyn EconomyService, now: Timestamp) -> Eligibility {
        match service.cooldown_expiry() {
            Some(expiry) if service.has_pending_cooldown(now) => {
                Eligibility::Blocked(RemainingCooldown::between(now, expiry))
            }
            _ => Eligibility::Eligible,
        }
    }

    /// Convert a finished session into a payout
    ///
    /// Consumes the session, so a session can be settled at most once. A zero
    /// payout leaves the economy untouched (no cooldown either).
    pub fn settle(
        &self,
        finished: FinishedSession,
        service: &mut dyn EconomyService,
        now: Timestamp,
    ) -> Settlement {
        let final_score = finished.score;
        let payout = u64::from(final_score).saturating_mul(service.earn_rate());

        if payout == 0 {
            log::info!("Session ended with score {}, nothing to pay out", final_score);
            return Settlement {
                final_score,
                payout,
                error: None,
            };
        }

        let request = PayoutRequest {
            amount: payout,
            cooldown_expiry: now.saturating_add(self.duration_ms),
            transaction: Transaction {
                kind: TransactionKind::Earn,
                amount: payout,
                description: format!("Game reward ({} items)", final_score),
                timestamp: now,
            },
        };

        let error = match service.apply_payout(&request) {
            Ok(()) => {
                log::info!("Paid out {} coins for score {}", payout, final_score);
                None
            }
            Err(e) => {
                log::error!("Failed to persist payout of {} coins: {}", payout, e);
                Some(e)
            }
        };

        Settlement {
            final_score,
            payout,
            error,
        }
    }
}
