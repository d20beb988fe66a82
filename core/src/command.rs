use serde::{Deserialize, Serialize};
use crate::types::{EntryId, Points, Premium, Won};

/// All form actions issued by the front-end.
/// Variants may be added — never removed or reordered.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "cmd", rename_all = "snake_case")]
pub enum FormCommand {
    // ── Contract rows ─────────────────────────────
    AddEntry { product_id: String },
    SetProduct { id: EntryId, product_id: String },
    SetPaymentTerm { id: EntryId, payment_term: String },
    SetPremium { id: EntryId, premium: Premium },
    RemoveEntry { id: EntryId },

    // ── Agent status ──────────────────────────────
    SetDelegation { year: i32, month: u32 },
    SetStandardActivity { achieved: bool },
    SetRetention {
        current: u8,
        at_13th: u8,
        at_25th: u8,
    },
    SetClawback {
        performance: Points,
        amount:      Won,
    },
    SetDirectRecruits { count: u32 },

    // ── Actions ───────────────────────────────────
    Calculate,
}
