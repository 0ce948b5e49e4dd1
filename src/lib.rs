pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::{CartCommand, CliConfig};

pub use adapters::{
    ConsoleNotifier, HttpStorefrontApi, LocalStorage, MemoryStorage, RecordingNotifier,
};
pub use config::CartSettings;
pub use crate::core::{cart::CartManager, UpdateProductAmount, CART_STORAGE_KEY};
pub use domain::model::{
    Cart, CartChange, CartEntry, Notification, Product, ProductId, StockRecord,
};
pub use utils::error::{CartError, Result};
