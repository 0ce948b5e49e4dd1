use crate::utils::error::{CartError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

pub type ProductId = u64;

/// Product metadata kept opaque apart from its id.
pub type ProductDetails = serde_json::Map<String, serde_json::Value>;

/// Product as served by the catalog endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    #[serde(default)]
    pub id: ProductId,
    #[serde(flatten)]
    pub details: ProductDetails,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockRecord {
    #[serde(default)]
    pub id: ProductId,
    pub amount: i64,
}

/// One product line in the cart. Serialized flat, e.g.
/// `{"id": 1, "title": "Tênis", "price": 139.9, "amount": 2}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartEntry {
    pub id: ProductId,
    #[serde(flatten)]
    pub details: ProductDetails,
    pub amount: u32,
}

impl CartEntry {
    pub fn from_product(product: Product) -> Self {
        let mut details = product.details;
        details.remove("amount");
        Self {
            id: product.id,
            details,
            amount: 1,
        }
    }
}

/// Ordered cart contents, at most one entry per product id.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Cart {
    entries: Vec<CartEntry>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a cart, rejecting duplicate ids and zero amounts.
    pub fn from_entries(entries: Vec<CartEntry>) -> Result<Self> {
        let mut seen = HashSet::with_capacity(entries.len());
        for entry in &entries {
            if !seen.insert(entry.id) {
                return Err(CartError::CorruptCart {
                    message: format!("duplicate entry for product {}", entry.id),
                });
            }
            if entry.amount == 0 {
                return Err(CartError::CorruptCart {
                    message: format!("product {} has amount 0", entry.id),
                });
            }
        }
        Ok(Self { entries })
    }

    pub fn from_json(blob: &str) -> Result<Self> {
        let entries: Vec<CartEntry> = serde_json::from_str(blob)?;
        Self::from_entries(entries)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.entries)?)
    }

    pub fn get(&self, product_id: ProductId) -> Option<&CartEntry> {
        self.entries.iter().find(|entry| entry.id == product_id)
    }

    pub fn contains(&self, product_id: ProductId) -> bool {
        self.get(product_id).is_some()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CartEntry> {
        self.entries.iter()
    }

    pub fn entries(&self) -> &[CartEntry] {
        &self.entries
    }

    /// Number of distinct products.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn total_units(&self) -> u64 {
        self.entries.iter().map(|entry| u64::from(entry.amount)).sum()
    }

    pub(crate) fn push(&mut self, entry: CartEntry) {
        debug_assert!(!self.contains(entry.id));
        self.entries.push(entry);
    }

    pub(crate) fn set_amount(&mut self, product_id: ProductId, amount: u32) -> bool {
        match self.entries.iter_mut().find(|entry| entry.id == product_id) {
            Some(entry) => {
                entry.amount = amount;
                true
            }
            None => false,
        }
    }

    pub(crate) fn remove(&mut self, product_id: ProductId) -> Option<CartEntry> {
        let index = self.entries.iter().position(|entry| entry.id == product_id)?;
        Some(self.entries.remove(index))
    }
}

impl<'a> IntoIterator for &'a Cart {
    type Item = &'a CartEntry;
    type IntoIter = std::slice::Iter<'a, CartEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Result of a successful cart operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CartChange {
    Added { product_id: ProductId },
    AmountChanged { product_id: ProductId, amount: u32 },
    Removed { product_id: ProductId },
    Unchanged,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CartOperation {
    Add,
    Remove,
    UpdateAmount,
}

impl CartOperation {
    pub fn failure_message(self) -> &'static str {
        match self {
            CartOperation::Add => "Error adding product",
            CartOperation::Remove => "Error removing product",
            CartOperation::UpdateAmount => "Error updating product quantity",
        }
    }
}

impl fmt::Display for CartOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CartOperation::Add => "add",
            CartOperation::Remove => "remove",
            CartOperation::UpdateAmount => "update",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum NotificationLevel {
    Warning,
    Error,
}

/// User-facing message emitted when an operation is rejected.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Notification {
    pub level: NotificationLevel,
    pub operation: CartOperation,
    pub message: String,
    pub at: DateTime<Utc>,
}

impl Notification {
    pub fn for_failure(operation: CartOperation, error: &CartError) -> Self {
        let (level, message) = if error.is_out_of_stock() {
            (NotificationLevel::Warning, "Requested quantity out of stock")
        } else {
            (NotificationLevel::Error, operation.failure_message())
        };
        Self {
            level,
            operation,
            message: message.to_string(),
            at: Utc::now(),
        }
    }
}
