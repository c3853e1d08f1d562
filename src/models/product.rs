use serde::{Deserialize, Deserializer, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    pub name: String,
    pub url: String,

    // null when the monitor could not read a price
    #[serde(default)]
    pub current_price: Option<f64>,
    pub target_price: f64,

    // precomputed by the monitor; older files omit it
    #[serde(default)]
    pub alert: Option<bool>,
}

impl Product {
    /// Alert state: the upstream flag wins when present, otherwise the price
    /// comparison decides. No current price never alerts.
    pub fn is_alert(&self) -> bool {
        match self.alert {
            Some(flag) => flag,
            None => self
                .current_price
                .map(|price| price <= self.target_price)
                .unwrap_or(false),
        }
    }

    /// `target - current` when the known price is at or below target.
    ///
    /// Follows the prices even when an upstream flag disagrees, so the
    /// amount is never negative.
    pub fn savings(&self) -> Option<f64> {
        self.current_price
            .filter(|price| *price <= self.target_price)
            .map(|price| self.target_price - price)
    }

    /// `current - target` when the known price is still above target.
    pub fn shortfall(&self) -> Option<f64> {
        self.current_price
            .filter(|price| *price > self.target_price)
            .map(|price| price - self.target_price)
    }
}

/// `null` reads the same as a missing key.
fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CurrentPricesDocument {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub products: Vec<Product>,

    #[serde(default)]
    pub total_savings: Option<f64>,

    #[serde(default)]
    pub last_update: Option<String>,
}

impl CurrentPricesDocument {
    pub fn alerted(&self) -> impl Iterator<Item = &Product> {
        self.products.iter().filter(|p| p.is_alert())
    }

    /// Upstream aggregate when provided, otherwise the savings of alerted products.
    pub fn total_savings(&self) -> f64 {
        match self.total_savings {
            Some(total) => total,
            None => self.alerted().filter_map(Product::savings).sum(),
        }
    }
}
