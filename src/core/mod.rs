pub mod cart;

pub use crate::domain::model::{Cart, CartChange, CartEntry, Notification, ProductId};
pub use crate::domain::ports::{ConfigProvider, Notifier, ProductCatalog, StockService, Storage};
pub use crate::utils::error::Result;
pub use cart::{CartManager, UpdateProductAmount, CART_STORAGE_KEY};
