//! The live stock lookup checkout validates against.

use crate::clients::ProductClient;
use crate::model::ProductId;
use crate::product_actor::ProductError;
use async_trait::async_trait;

/// Authoritative stock levels with an atomic compare-and-decrement.
///
/// [`ProductClient`] is the production implementation. The order service
/// tests run checkout against an in-memory ledger that injects conflicts.
#[async_trait]
pub trait StockLedger: Send + Sync {
    async fn current_stock(&self, product_id: ProductId) -> Result<u32, ProductError>;

    /// Takes `quantity` units if stock still equals `expected`, returning the
    /// remainder. Fails with `StockConflict` if it does not.
    async fn compare_and_decrement(
        &self,
        product_id: ProductId,
        expected: u32,
        quantity: u32,
    ) -> Result<u32, ProductError>;

    async fn release(&self, product_id: ProductId, quantity: u32) -> Result<u32, ProductError>;
}

#[async_trait]
impl StockLedger for ProductClient {
    async fn current_stock(&self, product_id: ProductId) -> Result<u32, ProductError> {
        self.check_stock(product_id).await
    }

    async fn compare_and_decrement(
        &self,
        product_id: ProductId,
        expected: u32,
        quantity: u32,
    ) -> Result<u32, ProductError> {
        self.reserve_stock(product_id, expected, quantity).await
    }

    async fn release(&self, product_id: ProductId, quantity: u32) -> Result<u32, ProductError> {
        self.release_stock(product_id, quantity).await
    }
}
