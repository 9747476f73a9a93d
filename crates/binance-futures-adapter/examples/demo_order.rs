/*
[INPUT]:  Hard-coded order parameters
[OUTPUT]: Simulated acknowledgement printed to stdout
[POS]:    Examples - trading operations without credentials
[UPDATE]: When trading API changes
*/

use binance_futures_adapter::*;
use rust_decimal::Decimal;

/// Example: place a MARKET and a LIMIT order against the offline mock.
///
/// Swap `MockBinanceClient` for a `BinanceClient` with credentials to hit
/// the testnet instead.
#[tokio::main]
async fn main() {
    println!("=== Binance Futures Demo Order ===\n");

    let gateway = MockBinanceClient::new();
    let orders = [
        OrderRequest::market("BTCUSDT", Side::Buy, Decimal::new(1, 2)),
        OrderRequest::limit("BTCUSDT", Side::Sell, Decimal::new(1, 2), Decimal::from(50_000)),
    ];

    for order in &orders {
        println!("Order:  {order}");
        println!("Params: {}", order.to_query_string());
        match gateway.place_order(order).await {
            Ok(ack) => println!(
                "  -> id {} status {} executed {} avg {}\n",
                ack.order_id, ack.status, ack.executed_qty, ack.avg_price
            ),
            Err(e) => eprintln!("  -> failed: {e}\n"),
        }
    }
}
