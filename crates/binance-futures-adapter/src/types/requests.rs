/*
[INPUT]:  Order parameters from the caller or a signed query string
[OUTPUT]: OrderRequest and its canonical query parameter encoding
[POS]:    Data layer - type definitions for API communication
[UPDATE]: When API schema changes or new types added
*/

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::Serialize;
use url::form_urlencoded;

use super::enums::{OrderType, Side, TimeInForce};
use crate::http::{BinanceError, Result};

/// A single futures order.
///
/// The price is present exactly when the order type is LIMIT. Fields are
/// private so the only way to build one is through [`OrderRequest::market`],
/// [`OrderRequest::limit`] or [`OrderRequest::from_query`], all of which keep
/// that pairing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderRequest {
    symbol: String,
    side: Side,
    #[serde(rename = "type")]
    order_type: OrderType,
    #[serde(with = "rust_decimal::serde::str")]
    quantity: Decimal,
    #[serde(with = "rust_decimal::serde::str_option")]
    #[serde(skip_serializing_if = "Option::is_none")]
    price: Option<Decimal>,
}

impl OrderRequest {
    pub fn market(symbol: impl Into<String>, side: Side, quantity: Decimal) -> Self {
        Self {
            symbol: symbol.into(),
            side,
            order_type: OrderType::Market,
            quantity,
            price: None,
        }
    }

    pub fn limit(symbol: impl Into<String>, side: Side, quantity: Decimal, price: Decimal) -> Self {
        Self {
            symbol: symbol.into(),
            side,
            order_type: OrderType::Limit,
            quantity,
            price: Some(price),
        }
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn side(&self) -> Side {
        self.side
    }

    pub fn order_type(&self) -> OrderType {
        self.order_type
    }

    pub fn quantity(&self) -> Decimal {
        self.quantity
    }

    pub fn price(&self) -> Option<Decimal> {
        self.price
    }

    /// LIMIT orders rest until cancelled; MARKET orders carry no time in force
    pub fn time_in_force(&self) -> Option<TimeInForce> {
        match self.order_type {
            OrderType::Limit => Some(TimeInForce::Gtc),
            OrderType::Market => None,
        }
    }

    /// Order parameters in the order the exchange documents them.
    ///
    /// `recvWindow`, `timestamp` and `signature` are appended by the client.
    pub fn query_params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("symbol", self.symbol.clone()),
            ("side", self.side.to_string()),
            ("type", self.order_type.to_string()),
        ];
        if let Some(tif) = self.time_in_force() {
            params.push(("timeInForce", tif.as_str().to_string()));
        }
        if let Some(price) = self.price {
            params.push(("price", price.to_string()));
        }
        params.push(("quantity", self.quantity.to_string()));
        params
    }

    /// Form-encoded order parameters, unsigned
    pub fn to_query_string(&self) -> String {
        encode_params(self.query_params().iter().map(|(k, v)| (*k, v.as_str())))
    }

    /// Parse an order back out of a query string.
    ///
    /// Unknown keys (`timestamp`, `signature`, ...) are ignored.
    pub fn from_query(query: &str) -> Result<Self> {
        let mut symbol = None;
        let mut side = None;
        let mut order_type = None;
        let mut quantity = None;
        let mut price = None;

        for (key, value) in form_urlencoded::parse(query.as_bytes()) {
            match key.as_ref() {
                "symbol" => symbol = Some(value.into_owned()),
                "side" => side = Some(value.parse::<Side>().map_err(invalid)?),
                "type" => order_type = Some(value.parse::<OrderType>().map_err(invalid)?),
                "quantity" => quantity = Some(parse_decimal("quantity", &value)?),
                "price" => price = Some(parse_decimal("price", &value)?),
                _ => {}
            }
        }

        let symbol = symbol.ok_or_else(|| missing("symbol"))?;
        let side = side.ok_or_else(|| missing("side"))?;
        let quantity = quantity.ok_or_else(|| missing("quantity"))?;

        match (order_type.ok_or_else(|| missing("type"))?, price) {
            (OrderType::Market, None) => Ok(Self::market(symbol, side, quantity)),
            (OrderType::Limit, Some(price)) => Ok(Self::limit(symbol, side, quantity, price)),
            (OrderType::Market, Some(_)) => Err(BinanceError::InvalidParameter(
                "price is not accepted for MARKET orders".to_string(),
            )),
            (OrderType::Limit, None) => Err(missing("price")),
        }
    }
}

impl fmt::Display for OrderRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {}",
            self.order_type, self.side, self.quantity, self.symbol
        )?;
        if let Some(price) = self.price {
            write!(f, " @ {price}")?;
        }
        Ok(())
    }
}

pub(crate) fn encode_params<'a>(params: impl IntoIterator<Item = (&'a str, &'a str)>) -> String {
    let mut serializer = form_urlencoded::Serializer::new(String::new());
    for (key, value) in params {
        serializer.append_pair(key, value);
    }
    serializer.finish()
}

fn parse_decimal(field: &str, value: &str) -> Result<Decimal> {
    Decimal::from_str(value)
        .map_err(|err| BinanceError::InvalidParameter(format!("{field} '{value}': {err}")))
}

fn invalid(err: super::enums::ParseEnumError) -> BinanceError {
    BinanceError::InvalidParameter(err.to_string())
}

fn missing(field: &str) -> BinanceError {
    BinanceError::InvalidParameter(format!("missing {field}"))
}
