//! Shared primitive types used across the commission engine.

/// An amount of money in won. Fractional won survive until display.
pub type Won = f64;

/// Converted premium ("P"): premium × product conversion rate.
pub type Points = f64;

/// A monthly premium as typed into the form, in whole won.
pub type Premium = u64;

/// Stable identifier of one contract row in the form.
pub type EntryId = u32;

/// Stable identifier of a catalog product.
pub type ProductId = String;

/// 1-indexed month count since delegation.
pub type ContractMonth = u32;
