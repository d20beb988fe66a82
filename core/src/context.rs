//! Agent-status inputs for one calculation.

use crate::{
    clock::DelegationMonth,
    error::{CalcError, CalcResult},
    rates::standard_retention,
    types::{ContractMonth, Points, Won},
};
use serde::{Deserialize, Serialize};

pub const MAX_DIRECT_RECRUITS: u32 = 99;

/// Fallback for the 13th/25th installment sliders when no standard exists.
const FALLBACK_LATER_RETENTION: u8 = 85;

/// Retention rates in percent.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct RetentionInputs {
    /// Current-month retention.
    pub current:  u8,
    /// Expected retention at the 13th installment.
    pub at_13th:  u8,
    /// Expected retention at the 25th installment.
    pub at_25th:  u8,
}

impl RetentionInputs {
    /// Defaults offered when the delegation month changes: each slider
    /// starts at its standard, or 0 / 85 when there is none.
    pub fn seeded_for(contract_month: ContractMonth) -> Self {
        Self {
            current: standard_retention(contract_month).unwrap_or(0),
            at_13th: standard_retention(13).unwrap_or(FALLBACK_LATER_RETENTION),
            at_25th: standard_retention(25).unwrap_or(FALLBACK_LATER_RETENTION),
        }
    }

    pub fn validate(&self) -> CalcResult<()> {
        for (field, value) in [
            ("current", self.current),
            ("13th-installment", self.at_13th),
            ("25th-installment", self.at_25th),
        ] {
            if value > 100 {
                return Err(CalcError::RetentionOutOfRange { field, value });
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AgentContext {
    pub delegation:        DelegationMonth,
    /// Standard activity achieved this month.
    pub standard_activity: bool,
    pub retention:         RetentionInputs,
    /// Converted premium expected to be clawed back (cancellations,
    /// returns, voids, lapses).
    pub expected_clawback_performance: Points,
    /// Commission expected to be clawed back (recruitment +
    /// performance-1 + initial-settlement-1).
    pub expected_clawback_amount: Won,
    pub direct_recruits:   u32,
}

impl AgentContext {
    pub fn new(delegation: DelegationMonth) -> Self {
        Self {
            delegation,
            standard_activity: false,
            retention: RetentionInputs {
                current: 0,
                at_13th: FALLBACK_LATER_RETENTION,
                at_25th: FALLBACK_LATER_RETENTION,
            },
            expected_clawback_performance: 0.0,
            expected_clawback_amount: 0.0,
            direct_recruits: 0,
        }
    }

    pub fn validate(&self) -> CalcResult<()> {
        self.delegation.validate()?;
        self.retention.validate()?;
        for (field, value) in [
            ("expected clawback performance", self.expected_clawback_performance),
            ("expected clawback amount", self.expected_clawback_amount),
        ] {
            if !(value >= 0.0 && value.is_finite()) {
                return Err(CalcError::NegativeAmount { field, value });
            }
        }
        if self.direct_recruits > MAX_DIRECT_RECRUITS {
            return Err(CalcError::DirectRecruitsOutOfRange {
                value: self.direct_recruits,
            });
        }
        Ok(())
    }
}
