//! Contract-month clock.
//!
//! The engine never reads the wall clock. Callers pass `today`
//! explicitly so a calculation is reproducible.

use crate::{
    error::{CalcError, CalcResult},
    types::ContractMonth,
};
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// Delegation years accepted by the form.
pub const DELEGATION_YEARS: std::ops::RangeInclusive<i32> = 1900..=9999;

/// The year and month an agent was delegated (위임년월).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct DelegationMonth {
    pub year:  i32,
    pub month: u32,
}

impl DelegationMonth {
    pub fn new(year: i32, month: u32) -> CalcResult<Self> {
        let d = Self { year, month };
        d.validate()?;
        Ok(d)
    }

    pub fn validate(&self) -> CalcResult<()> {
        if !(1..=12).contains(&self.month) || !DELEGATION_YEARS.contains(&self.year) {
            return Err(CalcError::InvalidDelegationMonth {
                year:  self.year,
                month: self.month,
            });
        }
        Ok(())
    }

    /// Months elapsed since delegation, counting the delegation month as 1.
    pub fn contract_month(&self, today: NaiveDate) -> CalcResult<ContractMonth> {
        contract_month(*self, today)
    }
}

/// `(years × 12) + months + 1` between the delegation month and `today`.
/// Rejects a delegation month that lies after `today`'s month.
pub fn contract_month(delegation: DelegationMonth, today: NaiveDate) -> CalcResult<ContractMonth> {
    delegation.validate()?;
    let elapsed = (i64::from(today.year()) - i64::from(delegation.year)) * 12
        + (i64::from(today.month()) - i64::from(delegation.month));
    if elapsed < 0 {
        return Err(CalcError::DelegationInFuture {
            year:  delegation.year,
            month: delegation.month,
            today,
        });
    }
    ContractMonth::try_from(elapsed + 1).map_err(|_| CalcError::InvalidDelegationMonth {
        year:  delegation.year,
        month: delegation.month,
    })
}
