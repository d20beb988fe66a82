//! Form state owned by the front-end between calculations.
//!
//! Commands mutate the state; `calculate` takes an immutable snapshot
//! and hands it to the engine.

use crate::{
    clock::{contract_month, DelegationMonth},
    command::FormCommand,
    config::ProductCatalog,
    context::{AgentContext, RetentionInputs},
    engine::{calculate, CommissionResult},
    entry::EntryBook,
    error::CalcResult,
    types::EntryId,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FormState {
    pub entries: EntryBook,
    pub context: AgentContext,
}

/// What a command did to the form.
#[derive(Debug, Clone, PartialEq)]
pub enum Applied {
    Updated,
    EntryAdded(EntryId),
    CalculateRequested,
}

impl FormState {
    /// A fresh form for `delegation`, retention sliders seeded for `today`.
    pub fn new(delegation: DelegationMonth, today: NaiveDate) -> Self {
        let mut context = AgentContext::new(delegation);
        if let Ok(month) = contract_month(delegation, today) {
            context.retention = RetentionInputs::seeded_for(month);
        }
        Self { entries: EntryBook::new(), context }
    }

    /// Apply one command. A rejected command leaves the state untouched.
    pub fn apply(
        &mut self,
        catalog: &ProductCatalog,
        cmd: &FormCommand,
        today: NaiveDate,
    ) -> CalcResult<Applied> {
        match cmd {
            FormCommand::AddEntry { product_id } => {
                let id = self.entries.add(catalog, product_id)?;
                return Ok(Applied::EntryAdded(id));
            }
            FormCommand::SetProduct { id, product_id } => {
                self.entries.set_product(catalog, *id, product_id)?;
            }
            FormCommand::SetPaymentTerm { id, payment_term } => {
                self.entries.set_payment_term(catalog, *id, payment_term)?;
            }
            FormCommand::SetPremium { id, premium } => {
                self.entries.set_premium(*id, *premium)?;
            }
            FormCommand::RemoveEntry { id } => {
                self.entries.remove(*id)?;
            }
            FormCommand::SetDelegation { year, month } => {
                let delegation = DelegationMonth::new(*year, *month)?;
                if delegation != self.context.delegation {
                    // A new delegation month re-anchors the retention sliders.
                    let seeded = RetentionInputs::seeded_for(contract_month(delegation, today)?);
                    self.context.delegation = delegation;
                    self.context.retention = seeded;
                }
            }
            FormCommand::SetStandardActivity { achieved } => {
                self.context.standard_activity = *achieved;
            }
            FormCommand::SetRetention { current, at_13th, at_25th } => {
                let retention = RetentionInputs {
                    current: *current,
                    at_13th: *at_13th,
                    at_25th: *at_25th,
                };
                retention.validate()?;
                self.context.retention = retention;
            }
            FormCommand::SetClawback { performance, amount } => {
                let mut next = self.context.clone();
                next.expected_clawback_performance = *performance;
                next.expected_clawback_amount = *amount;
                next.validate()?;
                self.context = next;
            }
            FormCommand::SetDirectRecruits { count } => {
                let mut next = self.context.clone();
                next.direct_recruits = *count;
                next.validate()?;
                self.context = next;
            }
            FormCommand::Calculate => return Ok(Applied::CalculateRequested),
        }
        Ok(Applied::Updated)
    }

    pub fn calculate(&self, catalog: &ProductCatalog, today: NaiveDate) -> CalcResult<CommissionResult> {
        calculate(catalog, &self.context, self.entries.entries(), today)
    }
}
