use crate::domain::model::{
    Cart, CartChange, CartEntry, CartOperation, Notification, ProductId, StockRecord,
};
use crate::domain::ports::{Notifier, ProductCatalog, StockService, Storage};
use crate::utils::error::{CartError, Result};
use tokio::sync::watch;

/// Storage key the cart is persisted under unless configured otherwise.
pub const CART_STORAGE_KEY: &str = "@RocketShoes:cart";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UpdateProductAmount {
    pub product_id: ProductId,
    pub amount: i64,
}

/// Owns the cart and keeps it consistent with stock levels and storage.
///
/// Every successful mutation is written to storage before it becomes visible
/// in memory, so a failed operation never leaves a half-applied cart behind.
/// Failures are returned as [`CartError`] and also reported to the
/// [`Notifier`].
pub struct CartManager<S, A, N> {
    storage: S,
    api: A,
    notifier: N,
    storage_key: String,
    cart: Cart,
    snapshots: watch::Sender<Cart>,
}

impl<S, A, N> CartManager<S, A, N>
where
    S: Storage,
    A: StockService + ProductCatalog,
    N: Notifier,
{
    /// Restores the cart persisted under [`CART_STORAGE_KEY`].
    pub async fn restore(storage: S, api: A, notifier: N) -> Result<Self> {
        Self::restore_with_key(storage, api, notifier, CART_STORAGE_KEY).await
    }

    pub async fn restore_with_key(
        storage: S,
        api: A,
        notifier: N,
        storage_key: impl Into<String>,
    ) -> Result<Self> {
        let storage_key = storage_key.into();
        let cart = match storage.read_item(&storage_key).await? {
            Some(blob) if !blob.trim().is_empty() => Cart::from_json(&blob)?,
            _ => Cart::new(),
        };
        tracing::debug!(
            "Restored cart '{}' with {} products",
            storage_key,
            cart.len()
        );

        let (snapshots, _) = watch::channel(cart.clone());
        Ok(Self {
            storage,
            api,
            notifier,
            storage_key,
            cart,
            snapshots,
        })
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Receives a new snapshot after every committed change.
    pub fn subscribe(&self) -> watch::Receiver<Cart> {
        self.snapshots.subscribe()
    }

    pub fn storage_key(&self) -> &str {
        &self.storage_key
    }

    pub async fn add_product(&mut self, product_id: ProductId) -> Result<CartChange> {
        let result = self.try_add_product(product_id).await;
        self.report(CartOperation::Add, result)
    }

    pub async fn remove_product(&mut self, product_id: ProductId) -> Result<CartChange> {
        let result = self.try_remove_product(product_id).await;
        self.report(CartOperation::Remove, result)
    }

    /// Sets the amount of an entry already in the cart. Amounts `<= 0` are
    /// ignored without contacting the stock service.
    pub async fn update_product_amount(
        &mut self,
        request: UpdateProductAmount,
    ) -> Result<CartChange> {
        if request.amount <= 0 {
            tracing::debug!(
                "Ignoring non-positive amount {} for product {}",
                request.amount,
                request.product_id
            );
            return Ok(CartChange::Unchanged);
        }

        let result = self.try_update_product_amount(request).await;
        self.report(CartOperation::UpdateAmount, result)
    }

    async fn try_add_product(&mut self, product_id: ProductId) -> Result<CartChange> {
        let current = self.cart.get(product_id).map(|entry| entry.amount);
        let mut next = self.cart.clone();

        match current {
            Some(current) => {
                let requested = i64::from(current) + 1;
                let stock = self.api.stock(product_id).await?;
                let amount = ensure_in_stock(product_id, requested, &stock)?;

                next.set_amount(product_id, amount);
                self.commit(next).await?;
                tracing::info!("Product {} amount raised to {}", product_id, amount);
                Ok(CartChange::AmountChanged { product_id, amount })
            }
            None => {
                let product = self.api.product(product_id).await?;
                let mut entry = CartEntry::from_product(product);
                entry.id = product_id;

                next.push(entry);
                self.commit(next).await?;
                tracing::info!("Product {} added to cart", product_id);
                Ok(CartChange::Added { product_id })
            }
        }
    }

    async fn try_remove_product(&mut self, product_id: ProductId) -> Result<CartChange> {
        let mut next = self.cart.clone();
        if next.remove(product_id).is_none() {
            return Err(CartError::NotInCart { product_id });
        }

        self.commit(next).await?;
        tracing::info!("Product {} removed from cart", product_id);
        Ok(CartChange::Removed { product_id })
    }

    async fn try_update_product_amount(
        &mut self,
        request: UpdateProductAmount,
    ) -> Result<CartChange> {
        let UpdateProductAmount { product_id, amount } = request;

        let stock = self.api.stock(product_id).await?;
        let amount = ensure_in_stock(product_id, amount, &stock)?;

        let mut next = self.cart.clone();
        if !next.set_amount(product_id, amount) {
            return Err(CartError::NotInCart { product_id });
        }

        self.commit(next).await?;
        tracing::info!("Product {} amount set to {}", product_id, amount);
        Ok(CartChange::AmountChanged { product_id, amount })
    }

    async fn commit(&mut self, next: Cart) -> Result<()> {
        let blob = next.to_json()?;
        tracing::debug!(
            "Persisting cart ({} bytes) under '{}'",
            blob.len(),
            self.storage_key
        );
        self.storage.write_item(&self.storage_key, &blob).await?;

        self.cart = next;
        self.snapshots.send_replace(self.cart.clone());
        Ok(())
    }

    fn report(&self, operation: CartOperation, result: Result<CartChange>) -> Result<CartChange> {
        if let Err(e) = &result {
            if e.is_out_of_stock() {
                tracing::warn!("{} rejected: {}", operation, e);
            } else {
                tracing::error!("{} failed: {} (Category: {:?})", operation, e, e.category());
            }
            self.notifier
                .notify(&Notification::for_failure(operation, e));
        }
        result
    }
}

fn ensure_in_stock(product_id: ProductId, requested: i64, stock: &StockRecord) -> Result<u32> {
    let out_of_stock = || CartError::OutOfStock {
        product_id,
        requested,
        available: stock.amount,
    };

    if stock.amount < requested {
        return Err(out_of_stock());
    }
    u32::try_from(requested).map_err(|_| out_of_stock())
}
