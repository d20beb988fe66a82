//! Contract rows entered through the form.
//!
//! RULE: the front-end owns the EntryBook. The engine only ever sees
//! a borrowed slice of entries and keeps no identity of its own.

use crate::{
    config::ProductCatalog,
    error::{CalcError, CalcResult},
    types::{EntryId, Premium, ProductId},
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ContractEntry {
    pub id:           EntryId,
    pub product_id:   ProductId,
    pub payment_term: String,
    /// Monthly premium in won.
    pub premium:      Premium,
}

impl ContractEntry {
    pub fn validate(&self, catalog: &ProductCatalog) -> CalcResult<()> {
        if !catalog.allows_term(&self.product_id, &self.payment_term)? {
            return Err(CalcError::InvalidPaymentTerm {
                product_id: self.product_id.clone(),
                term:       self.payment_term.clone(),
            });
        }
        Ok(())
    }
}

/// Ordered list of contract rows with stable ids.
/// Ids increase monotonically and are never reused after removal.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct EntryBook {
    entries: Vec<ContractEntry>,
    last_id: EntryId,
}

impl EntryBook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[ContractEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, id: EntryId) -> CalcResult<&ContractEntry> {
        self.entries
            .iter()
            .find(|e| e.id == id)
            .ok_or(CalcError::UnknownEntry { id })
    }

    fn get_mut(&mut self, id: EntryId) -> CalcResult<&mut ContractEntry> {
        self.entries
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or(CalcError::UnknownEntry { id })
    }

    /// Append a row for `product_id` with its first payment term and a
    /// zero premium. The same product may be added any number of times.
    pub fn add(&mut self, catalog: &ProductCatalog, product_id: &str) -> CalcResult<EntryId> {
        let payment_term = catalog.first_term(product_id)?;
        self.last_id += 1;
        let id = self.last_id;
        self.entries.push(ContractEntry {
            id,
            product_id: product_id.to_string(),
            payment_term,
            premium: 0,
        });
        Ok(id)
    }

    /// Switch a row to another product. The payment term resets to the
    /// new product's first term; the premium is kept.
    pub fn set_product(
        &mut self,
        catalog: &ProductCatalog,
        id: EntryId,
        product_id: &str,
    ) -> CalcResult<()> {
        let payment_term = catalog.first_term(product_id)?;
        let entry = self.get_mut(id)?;
        if entry.product_id != product_id {
            entry.product_id = product_id.to_string();
            entry.payment_term = payment_term;
        }
        Ok(())
    }

    pub fn set_payment_term(
        &mut self,
        catalog: &ProductCatalog,
        id: EntryId,
        term: &str,
    ) -> CalcResult<()> {
        let entry = self.get_mut(id)?;
        if !catalog.allows_term(&entry.product_id, term)? {
            return Err(CalcError::InvalidPaymentTerm {
                product_id: entry.product_id.clone(),
                term:       term.to_string(),
            });
        }
        entry.payment_term = term.to_string();
        Ok(())
    }

    pub fn set_premium(&mut self, id: EntryId, premium: Premium) -> CalcResult<()> {
        self.get_mut(id)?.premium = premium;
        Ok(())
    }

    pub fn remove(&mut self, id: EntryId) -> CalcResult<ContractEntry> {
        let idx = self
            .entries
            .iter()
            .position(|e| e.id == id)
            .ok_or(CalcError::UnknownEntry { id })?;
        Ok(self.entries.remove(idx))
    }

    pub fn validate(&self, catalog: &ProductCatalog) -> CalcResult<()> {
        self.entries.iter().try_for_each(|e| e.validate(catalog))
    }
}
