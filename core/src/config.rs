use crate::error::{CalcError, CalcResult};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProductConfig {
    pub product_id: String,
    pub label: String,
    /// Percent of premium counted as converted premium (500 = 5×).
    pub conversion_rate_pct: f64,
    /// Allowed payment-term labels. The first one is the default.
    pub payment_terms: Vec<String>,
    #[serde(default)]
    pub strategic_health: bool,
}

impl ProductConfig {
    pub fn conversion_factor(&self) -> f64 {
        self.conversion_rate_pct / 100.0
    }

    pub fn allows_term(&self, term: &str) -> bool {
        self.payment_terms.iter().any(|t| t == term)
    }

    pub fn first_term(&self) -> Option<&str> {
        self.payment_terms.first().map(String::as_str)
    }
}

#[derive(Debug, Clone, Deserialize)]
struct ProductCatalogFile {
    products: Vec<ProductConfig>,
}

/// The product catalog in selection order. Immutable once loaded.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ProductCatalog {
    products: Vec<ProductConfig>,
}

impl ProductCatalog {
    pub fn new(products: Vec<ProductConfig>) -> CalcResult<Self> {
        if products.is_empty() {
            return Err(CalcError::EmptyCatalog);
        }
        if let Some(p) = products.iter().find(|p| p.payment_terms.is_empty()) {
            return Err(CalcError::Other(anyhow::anyhow!(
                "Product '{}' has no payment terms",
                p.product_id
            )));
        }
        if let Some(p) = products
            .iter()
            .find(|p| !(p.conversion_rate_pct >= 0.0 && p.conversion_rate_pct.is_finite()))
        {
            return Err(CalcError::InvalidConversionRate {
                product_id: p.product_id.clone(),
                rate:       p.conversion_rate_pct,
            });
        }
        let mut seen = HashSet::new();
        if let Some(p) = products.iter().find(|p| !seen.insert(p.product_id.as_str())) {
            return Err(CalcError::DuplicateProduct {
                product_id: p.product_id.clone(),
            });
        }
        Ok(Self { products })
    }

    /// Load from the data/ directory.
    /// In tests, use ProductCatalog::builtin().
    pub fn load(data_dir: &str) -> anyhow::Result<Self> {
        let path = format!("{data_dir}/products/product_catalog.json");
        let content = std::fs::read_to_string(&path)
            .map_err(|e| anyhow::anyhow!("Cannot read {path}: {e}"))?;
        let file: ProductCatalogFile = serde_json::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Cannot parse {path}: {e}"))?;
        let catalog = Self::new(file.products)?;
        log::debug!("loaded {} products from {path}", catalog.products.len());
        Ok(catalog)
    }

    /// The three products sold through the calculator at launch.
    pub fn builtin() -> Self {
        let terms = |ts: &[&str]| ts.iter().map(|t| t.to_string()).collect::<Vec<_>>();
        Self {
            products: vec![
                ProductConfig {
                    product_id: "health_2504".into(),
                    label: "백년친구내가고른건강보험(2504)".into(),
                    conversion_rate_pct: 500.0,
                    payment_terms: terms(&["10년", "20년", "30년"]),
                    strategic_health: true,
                },
                ProductConfig {
                    product_id: "whole_life_700_2506".into(),
                    label: "백년친구700종신보험(2506)".into(),
                    conversion_rate_pct: 400.0,
                    payment_terms: terms(&["20년", "30년"]),
                    strategic_health: true,
                },
                ProductConfig {
                    product_id: "whole_life_plus_2404".into(),
                    label: "백년친구알차고행복한플러스종신보험(2404)".into(),
                    conversion_rate_pct: 300.0,
                    payment_terms: terms(&["5년", "7년", "10년"]),
                    strategic_health: false,
                },
            ],
        }
    }

    pub fn get(&self, product_id: &str) -> CalcResult<&ProductConfig> {
        self.products
            .iter()
            .find(|p| p.product_id == product_id)
            .ok_or_else(|| CalcError::UnknownProduct {
                product_id: product_id.to_string(),
            })
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.products.iter().map(|p| p.product_id.as_str())
    }

    pub fn products(&self) -> &[ProductConfig] {
        &self.products
    }

    /// Default payment term for a product: its first allowed term.
    pub fn first_term(&self, product_id: &str) -> CalcResult<String> {
        let product = self.get(product_id)?;
        // new() guarantees at least one term; builtin() always has one.
        product
            .first_term()
            .map(str::to_string)
            .ok_or_else(|| CalcError::InvalidPaymentTerm {
                product_id: product_id.to_string(),
                term: String::new(),
            })
    }

    pub fn allows_term(&self, product_id: &str, term: &str) -> CalcResult<bool> {
        Ok(self.get(product_id)?.allows_term(term))
    }
}
