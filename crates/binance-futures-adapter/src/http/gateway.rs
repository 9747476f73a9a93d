/*
[INPUT]:  Order requests from the application layer
[OUTPUT]: Exchange acknowledgements through a swappable backend
[POS]:    HTTP layer - seam between the order flow and the exchange
[UPDATE]: When adding operations every backend must support
*/

use async_trait::async_trait;
use tracing::debug;

use crate::http::{BinanceClient, Result};
use crate::types::{NewOrderResponse, OrderRequest};

/// Anything that can accept an order on behalf of the order flow
#[async_trait]
pub trait OrderGateway: Send + Sync {
    /// Short label for logs
    fn name(&self) -> &'static str;

    /// Check the backend is reachable and the credentials are accepted
    async fn test_connection(&self) -> Result<()>;

    /// Submit one order
    async fn place_order(&self, order: &OrderRequest) -> Result<NewOrderResponse>;
}

#[async_trait]
impl OrderGateway for BinanceClient {
    fn name(&self) -> &'static str {
        "BinanceClient"
    }

    async fn test_connection(&self) -> Result<()> {
        let account = self.account_info().await?;
        debug!(
            can_trade = account.can_trade,
            available_balance = ?account.available_balance,
            "account reachable"
        );
        Ok(())
    }

    async fn place_order(&self, order: &OrderRequest) -> Result<NewOrderResponse> {
        self.new_order(order).await
    }
}
