/*
[INPUT]:  Order requests in demo mode
[OUTPUT]: Simulated acknowledgements shaped like the real exchange's
[POS]:    HTTP layer - offline OrderGateway backend
[UPDATE]: When the acknowledgement shape or demo pricing changes
*/

use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use rust_decimal::Decimal;

use crate::http::{OrderGateway, Result};
use crate::types::{NewOrderResponse, OrderRequest, OrderStatus, OrderType};

const FIRST_ORDER_ID: i64 = 123_456_789;

/// Simulated exchange used by demo mode. No network access.
///
/// MARKET orders fill immediately at a fixed price; LIMIT orders rest as NEW.
#[derive(Debug)]
pub struct MockBinanceClient {
    order_counter: AtomicI64,
    market_price: Decimal,
}

impl Default for MockBinanceClient {
    fn default() -> Self {
        Self::new()
    }
}

impl MockBinanceClient {
    pub fn new() -> Self {
        Self {
            order_counter: AtomicI64::new(FIRST_ORDER_ID),
            // 43250.50
            market_price: Decimal::new(4_325_050, 2),
        }
    }

    pub fn with_market_price(mut self, price: Decimal) -> Self {
        self.market_price = price;
        self
    }

    pub fn market_price(&self) -> Decimal {
        self.market_price
    }
}

#[async_trait]
impl OrderGateway for MockBinanceClient {
    fn name(&self) -> &'static str {
        "MockBinanceClient"
    }

    async fn test_connection(&self) -> Result<()> {
        Ok(())
    }

    async fn place_order(&self, order: &OrderRequest) -> Result<NewOrderResponse> {
        let order_id = self.order_counter.fetch_add(1, Ordering::Relaxed) + 1;
        let now = Utc::now().timestamp_millis();
        let filled = order.order_type() == OrderType::Market;

        let (status, avg_price, executed_qty) = if filled {
            (OrderStatus::Filled, self.market_price, order.quantity())
        } else {
            (OrderStatus::New, Decimal::ZERO, Decimal::ZERO)
        };

        Ok(NewOrderResponse {
            order_id,
            symbol: order.symbol().to_string(),
            status,
            client_order_id: format!("demo_{order_id}"),
            price: order.price().unwrap_or(Decimal::ZERO),
            avg_price,
            orig_qty: order.quantity(),
            executed_qty,
            cum_quote: Some(executed_qty * avg_price),
            time_in_force: order.time_in_force(),
            order_type: order.order_type(),
            side: order.side(),
            time: Some(now),
            update_time: now,
        })
    }
}
