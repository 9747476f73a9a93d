/*
[INPUT]:  Validated OrderRequest, an OrderGateway, a confirmation prompt
[OUTPUT]: OrderResult plus the summary/result blocks written for the user
[POS]:    Order flow - Validate -> (Confirm) -> Send -> Report sequencing
[UPDATE]: When the order flow, result shape, or printed layout changes
*/

use std::io::{self, Write};

use anyhow::{Context, Result};
use binance_futures_adapter::{
    BinanceError, NewOrderResponse, OrderGateway, OrderRequest, OrderStatus, OrderType,
};
use rust_decimal::Decimal;
use tracing::{debug, error, info, warn};

const SUMMARY_RULE: &str = "--------------------------------------------------";
const RESULT_RULE: &str = "==================================================";

/// Outcome label shown to the user
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultStatus {
    Success,
    Failure,
}

/// What came back from one order submission.
#[derive(Debug, Clone, PartialEq)]
pub enum OrderResult {
    /// Exchange acknowledged the order
    Success(NewOrderResponse),
    /// Transport, auth or exchange failure, text kept as reported
    Failure { error: String },
}

impl OrderResult {
    pub fn failure(err: &BinanceError) -> Self {
        OrderResult::Failure {
            error: err.to_string(),
        }
    }

    pub fn status(&self) -> ResultStatus {
        match self {
            OrderResult::Success(_) => ResultStatus::Success,
            OrderResult::Failure { .. } => ResultStatus::Failure,
        }
    }

    pub fn is_success(&self) -> bool {
        self.status() == ResultStatus::Success
    }

    pub fn response(&self) -> Option<&NewOrderResponse> {
        match self {
            OrderResult::Success(response) => Some(response),
            OrderResult::Failure { .. } => None,
        }
    }

    pub fn order_id(&self) -> Option<i64> {
        self.response().map(|r| r.order_id)
    }

    pub fn executed_quantity(&self) -> Option<Decimal> {
        self.response().map(|r| r.executed_qty)
    }

    pub fn average_price(&self) -> Option<Decimal> {
        self.response().map(|r| r.avg_price)
    }

    pub fn order_status(&self) -> Option<OrderStatus> {
        self.response().map(|r| r.status)
    }

    pub fn raw_error(&self) -> Option<&str> {
        match self {
            OrderResult::Failure { error } => Some(error),
            OrderResult::Success(_) => None,
        }
    }
}

/// Yes/no question asked before anything is sent
pub trait ConfirmPrompt {
    fn confirm(&mut self, question: &str) -> Result<bool>;
}

/// `yes`/`y` in any case, surrounding whitespace ignored
pub fn is_affirmative(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "yes" | "y")
}

#[derive(Debug, Clone, Copy, Default)]
pub struct FlowOptions {
    /// Skip the confirmation prompt
    pub auto_confirm: bool,
    /// Probe the gateway before placing the order
    pub verify_connection: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum FlowOutcome {
    /// User declined at the prompt; nothing was sent
    Cancelled,
    /// Order was submitted; success or failure is inside
    Completed(OrderResult),
}

/// Places orders through a gateway and reports the result
pub struct OrderManager<G: OrderGateway> {
    gateway: G,
}

impl<G: OrderGateway> OrderManager<G> {
    pub fn new(gateway: G) -> Self {
        Self { gateway }
    }

    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    /// Submit the order once. Errors are folded into [`OrderResult::Failure`].
    pub async fn place_order(&self, order: &OrderRequest) -> OrderResult {
        info!(
            symbol = order.symbol(),
            side = %order.side(),
            order_type = %order.order_type(),
            quantity = %order.quantity(),
            "Placing {} {} order: {} {}",
            order.order_type(),
            order.side(),
            order.quantity(),
            order.symbol()
        );
        if let Some(price) = order.price() {
            info!(%price, "Limit price: {price}");
        }

        match self.gateway.place_order(order).await {
            Ok(response) => {
                match serde_json::to_string(&response) {
                    Ok(raw) => debug!(response = %raw, "API response"),
                    Err(err) => debug!(error = %err, "API response not serializable"),
                }
                OrderResult::Success(response)
            }
            Err(err) => {
                error!(
                    auth = err.is_auth_error(),
                    network = err.is_network_error(),
                    exchange = err.is_exchange_rejection(),
                    "Order failed: {err}"
                );
                OrderResult::failure(&err)
            }
        }
    }

    /// Run the whole flow: summary, confirmation, optional probe, submit, report.
    ///
    /// A failed connection probe is returned as an error; a failed order is a
    /// [`FlowOutcome::Completed`] carrying [`OrderResult::Failure`].
    pub async fn execute<W: Write>(
        &self,
        order: &OrderRequest,
        options: FlowOptions,
        prompt: &mut dyn ConfirmPrompt,
        out: &mut W,
    ) -> Result<FlowOutcome> {
        write_order_summary(out, order)?;

        if !options.auto_confirm {
            let confirmed = prompt
                .confirm("Do you want to place this order? (yes/no)")
                .context("read confirmation")?;
            if !confirmed {
                writeln!(out, "Order cancelled by user.")?;
                info!("Order cancelled by user");
                return Ok(FlowOutcome::Cancelled);
            }
        }

        if options.verify_connection {
            info!(gateway = self.gateway.name(), "Testing API connection...");
            writeln!(out, "\nTesting API connection...")?;
            if let Err(err) = self.gateway.test_connection().await {
                warn!(error = %err, "API connection test failed");
                return Err(err)
                    .context("could not connect to the exchange API; check your API credentials");
            }
            info!("API connection successful");
            writeln!(out, "API connection successful")?;
        }

        writeln!(out, "\nPlacing order...")?;
        let result = self.place_order(order).await;
        write_order_result(out, &result)?;
        out.flush()?;

        if let Some(order_id) = result.order_id() {
            info!(order_id, "Order placed successfully. Order ID: {order_id}");
        }

        Ok(FlowOutcome::Completed(result))
    }
}

/// Block printed before confirmation
pub fn write_order_summary<W: Write>(out: &mut W, order: &OrderRequest) -> io::Result<()> {
    writeln!(out, "\n{SUMMARY_RULE}")?;
    writeln!(out, "ORDER SUMMARY")?;
    writeln!(out, "{SUMMARY_RULE}")?;
    writeln!(out, "Symbol: {}", order.symbol())?;
    writeln!(out, "Side: {}", order.side())?;
    writeln!(out, "Type: {}", order.order_type())?;
    writeln!(out, "Quantity: {}", order.quantity())?;
    if let Some(price) = order.price() {
        writeln!(out, "Price: {price}")?;
    }
    writeln!(out, "{SUMMARY_RULE}")
}

/// Block printed after submission
pub fn write_order_result<W: Write>(out: &mut W, result: &OrderResult) -> io::Result<()> {
    writeln!(out, "\n{RESULT_RULE}")?;
    writeln!(out, "ORDER RESULT")?;
    writeln!(out, "{RESULT_RULE}")?;

    match result {
        OrderResult::Success(ack) => write_acknowledgement(out, ack)?,
        OrderResult::Failure { error } => {
            writeln!(out, "Status: FAILED")?;
            writeln!(out, "Error: {error}")?;
        }
    }

    writeln!(out, "{RESULT_RULE}")
}

fn write_acknowledgement<W: Write>(out: &mut W, ack: &NewOrderResponse) -> io::Result<()> {
    let label = if ack.status.is_accepted() {
        "SUCCESS"
    } else {
        ack.status.as_str()
    };
    writeln!(out, "Status: {label}")?;
    writeln!(out, "Order ID: {}", ack.order_id)?;
    writeln!(out, "Symbol: {}", ack.symbol)?;
    writeln!(out, "Side: {}", ack.side)?;
    writeln!(out, "Type: {}", ack.order_type)?;
    writeln!(out, "Quantity: {}", ack.orig_qty)?;
    if ack.order_type == OrderType::Limit && !ack.price.is_zero() {
        writeln!(out, "Limit Price: {}", ack.price)?;
    }
    writeln!(out, "Executed Qty: {}", ack.executed_qty)?;
    if !ack.avg_price.is_zero() {
        writeln!(out, "Average Price: {}", ack.avg_price)?;
    }
    writeln!(out, "Order Status: {}", ack.status)
}
