use thiserror::Error;

#[derive(Error, Debug)]
pub enum CalcError {
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Product '{product_id}' not found in catalog")]
    UnknownProduct { product_id: String },

    #[error("Payment term '{term}' is not offered for product '{product_id}'")]
    InvalidPaymentTerm { product_id: String, term: String },

    #[error("Entry {id} not found")]
    UnknownEntry { id: u32 },

    #[error("{field} retention must be between 0 and 100, got {value}")]
    RetentionOutOfRange { field: &'static str, value: u8 },

    #[error("{field} must be a non-negative amount, got {value}")]
    NegativeAmount { field: &'static str, value: f64 },

    #[error("Direct recruit count must be between 0 and 99, got {value}")]
    DirectRecruitsOutOfRange { value: u32 },

    #[error("Invalid delegation month {year}-{month}")]
    InvalidDelegationMonth { year: i32, month: u32 },

    #[error("Delegation month {year}-{month:02} is after {today}")]
    DelegationInFuture { year: i32, month: u32, today: chrono::NaiveDate },

    #[error("Product '{product_id}' has invalid conversion rate {rate}%")]
    InvalidConversionRate { product_id: String, rate: f64 },

    #[error("Product '{product_id}' appears more than once in catalog")]
    DuplicateProduct { product_id: String },

    #[error("Product catalog is empty")]
    EmptyCatalog,

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type CalcResult<T> = Result<T, CalcError>;
