/*
[INPUT]:  Raw order parameters as typed on the command line
[OUTPUT]: Validated OrderRequest or the first rule it breaks
[POS]:    Validation layer - pre-flight checks, no I/O
[UPDATE]: When order rules or accepted input forms change
*/

use std::str::FromStr;

use binance_futures_adapter::{OrderRequest, OrderType, Side};
use rust_decimal::Decimal;
use thiserror::Error;

/// Shortest symbol the exchange lists (e.g. `BNBUSD`)
pub const MIN_SYMBOL_LEN: usize = 6;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("symbol cannot be empty")]
    EmptySymbol,

    #[error("invalid symbol format: '{0}'; use uppercase letters and digits only (e.g. BTCUSDT)")]
    SymbolFormat(String),

    #[error("symbol '{0}' is too short")]
    SymbolTooShort(String),

    #[error("side cannot be empty")]
    EmptySide,

    #[error("invalid side: '{0}'; must be one of: BUY, SELL")]
    UnknownSide(String),

    #[error("order type cannot be empty")]
    EmptyOrderType,

    #[error("invalid order type: '{0}'; must be one of: MARKET, LIMIT")]
    UnknownOrderType(String),

    #[error("quantity cannot be empty")]
    EmptyQuantity,

    #[error("invalid quantity: '{0}'; must be a number")]
    InvalidQuantity(String),

    #[error("quantity must be positive, got: {0}")]
    NonPositiveQuantity(Decimal),

    #[error("price required for LIMIT orders")]
    PriceRequired,

    #[error("invalid price: '{0}'; must be a number")]
    InvalidPrice(String),

    #[error("price must be positive, got: {0}")]
    NonPositivePrice(Decimal),

    #[error("price not allowed for MARKET orders (price is determined by the market)")]
    PriceNotAllowed,
}

/// Check raw inputs and build the order they describe.
///
/// Rules run in a fixed order (symbol, side, type, quantity, price) and the
/// first failure is returned. Side and type are case-insensitive; the symbol
/// is not.
pub fn validate_order(
    symbol: &str,
    side: &str,
    order_type: &str,
    quantity: &str,
    price: Option<&str>,
) -> Result<OrderRequest, ValidationError> {
    let symbol = validate_symbol(symbol)?;
    let side = validate_side(side)?;
    let order_type = validate_order_type(order_type)?;
    let quantity = validate_quantity(quantity)?;
    let price = validate_price(price, order_type)?;

    Ok(match price {
        Some(price) => OrderRequest::limit(symbol, side, quantity, price),
        None => OrderRequest::market(symbol, side, quantity),
    })
}

pub fn validate_symbol(symbol: &str) -> Result<&str, ValidationError> {
    if symbol.is_empty() {
        return Err(ValidationError::EmptySymbol);
    }
    let well_formed = symbol
        .chars()
        .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit());
    if !well_formed {
        return Err(ValidationError::SymbolFormat(symbol.to_string()));
    }
    if symbol.len() < MIN_SYMBOL_LEN {
        return Err(ValidationError::SymbolTooShort(symbol.to_string()));
    }
    Ok(symbol)
}

pub fn validate_side(side: &str) -> Result<Side, ValidationError> {
    if side.is_empty() {
        return Err(ValidationError::EmptySide);
    }
    Side::from_str(side).map_err(|_| ValidationError::UnknownSide(side.to_uppercase()))
}

pub fn validate_order_type(order_type: &str) -> Result<OrderType, ValidationError> {
    if order_type.is_empty() {
        return Err(ValidationError::EmptyOrderType);
    }
    OrderType::from_str(order_type)
        .map_err(|_| ValidationError::UnknownOrderType(order_type.to_uppercase()))
}

pub fn validate_quantity(quantity: &str) -> Result<Decimal, ValidationError> {
    if quantity.is_empty() {
        return Err(ValidationError::EmptyQuantity);
    }
    let qty = parse_decimal(quantity)
        .ok_or_else(|| ValidationError::InvalidQuantity(quantity.to_string()))?;
    if qty <= Decimal::ZERO {
        return Err(ValidationError::NonPositiveQuantity(qty));
    }
    Ok(qty)
}

/// An empty string counts as no price.
pub fn validate_price(
    price: Option<&str>,
    order_type: OrderType,
) -> Result<Option<Decimal>, ValidationError> {
    let price = price.filter(|p| !p.is_empty());
    match (order_type, price) {
        (OrderType::Limit, None) => Err(ValidationError::PriceRequired),
        (OrderType::Limit, Some(raw)) => {
            let value =
                parse_decimal(raw).ok_or_else(|| ValidationError::InvalidPrice(raw.to_string()))?;
            if value <= Decimal::ZERO {
                return Err(ValidationError::NonPositivePrice(value));
            }
            Ok(Some(value))
        }
        (OrderType::Market, Some(_)) => Err(ValidationError::PriceNotAllowed),
        (OrderType::Market, None) => Ok(None),
    }
}

fn parse_decimal(raw: &str) -> Option<Decimal> {
    let raw = raw.trim();
    Decimal::from_str(raw)
        .or_else(|_| Decimal::from_scientific(raw))
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn dec(value: &str) -> Decimal {
        Decimal::from_str(value).unwrap()
    }

    #[test]
    fn test_market_order_accepted() {
        let order = validate_order("BTCUSDT", "BUY", "MARKET", "0.01", None).unwrap();
        assert_eq!(order.symbol(), "BTCUSDT");
        assert_eq!(order.side(), Side::Buy);
        assert_eq!(order.order_type(), OrderType::Market);
        assert_eq!(order.quantity(), dec("0.01"));
        assert_eq!(order.price(), None);
    }

    #[test]
    fn test_limit_order_accepted_with_lowercase_side_and_type() {
        let order = validate_order("ETHUSDT", "sell", "limit", "1.5", Some("3500.25")).unwrap();
        assert_eq!(order.side(), Side::Sell);
        assert_eq!(order.order_type(), OrderType::Limit);
        assert_eq!(order.price(), Some(dec("3500.25")));
    }

    #[test]
    fn test_limit_without_price_is_rejected() {
        let err = validate_order("BTCUSDT", "SELL", "LIMIT", "0.01", None).unwrap_err();
        assert_eq!(err, ValidationError::PriceRequired);
        assert!(err.to_string().contains("price required for LIMIT"));
    }

    #[test]
    fn test_empty_price_counts_as_missing() {
        let err = validate_order("BTCUSDT", "SELL", "LIMIT", "0.01", Some("")).unwrap_err();
        assert_eq!(err, ValidationError::PriceRequired);
        assert!(validate_order("BTCUSDT", "SELL", "MARKET", "0.01", Some("")).is_ok());
    }

    #[test]
    fn test_market_with_price_is_rejected() {
        let err = validate_order("BTCUSDT", "BUY", "MARKET", "0.01", Some("50000")).unwrap_err();
        assert_eq!(err, ValidationError::PriceNotAllowed);
    }

    #[rstest]
    #[case("btcusdt")]
    #[case("BTCusdt")]
    #[case("ETHUSDt")]
    #[case("1000shibUSDT")]
    fn test_lowercase_symbol_is_a_format_error(#[case] symbol: &str) {
        for (order_type, price) in [("MARKET", None), ("LIMIT", Some("100"))] {
            let err = validate_order(symbol, "BUY", order_type, "1", price).unwrap_err();
            assert_eq!(err, ValidationError::SymbolFormat(symbol.to_string()));
        }
    }

    #[rstest]
    #[case("", ValidationError::EmptySymbol)]
    #[case("BTC-USDT", ValidationError::SymbolFormat("BTC-USDT".into()))]
    #[case("BTC", ValidationError::SymbolTooShort("BTC".into()))]
    fn test_symbol_rules(#[case] symbol: &str, #[case] expected: ValidationError) {
        assert_eq!(validate_symbol(symbol).unwrap_err(), expected);
    }

    #[rstest]
    #[case("0")]
    #[case("0.0")]
    #[case("-0.01")]
    #[case("-5")]
    fn test_non_positive_quantity_is_rejected(#[case] quantity: &str) {
        let cases = [
            ("BUY", "MARKET", None),
            ("SELL", "MARKET", None),
            ("BUY", "LIMIT", Some("100")),
            ("SELL", "LIMIT", Some("100")),
        ];
        for (side, order_type, price) in cases {
            let err = validate_order("BTCUSDT", side, order_type, quantity, price).unwrap_err();
            assert!(
                matches!(err, ValidationError::NonPositiveQuantity(_)),
                "{quantity} {side} {order_type}: {err}"
            );
        }
    }

    #[rstest]
    #[case("", ValidationError::EmptyQuantity)]
    #[case("abc", ValidationError::InvalidQuantity("abc".into()))]
    #[case("NaN", ValidationError::InvalidQuantity("NaN".into()))]
    fn test_quantity_rules(#[case] quantity: &str, #[case] expected: ValidationError) {
        assert_eq!(validate_quantity(quantity).unwrap_err(), expected);
    }

    #[test]
    fn test_scientific_quantity() {
        assert_eq!(validate_quantity("1e-2").unwrap(), dec("0.01"));
    }

    #[rstest]
    #[case("", ValidationError::EmptySide)]
    #[case("hold", ValidationError::UnknownSide("HOLD".into()))]
    fn test_side_rules(#[case] side: &str, #[case] expected: ValidationError) {
        assert_eq!(validate_side(side).unwrap_err(), expected);
    }

    #[rstest]
    #[case("", ValidationError::EmptyOrderType)]
    #[case("stop", ValidationError::UnknownOrderType("STOP".into()))]
    fn test_order_type_rules(#[case] order_type: &str, #[case] expected: ValidationError) {
        assert_eq!(validate_order_type(order_type).unwrap_err(), expected);
    }

    #[rstest]
    #[case("0", ValidationError::NonPositivePrice(Decimal::ZERO))]
    #[case("-1", ValidationError::NonPositivePrice(Decimal::NEGATIVE_ONE))]
    #[case("cheap", ValidationError::InvalidPrice("cheap".into()))]
    fn test_limit_price_rules(#[case] price: &str, #[case] expected: ValidationError) {
        assert_eq!(
            validate_price(Some(price), OrderType::Limit).unwrap_err(),
            expected
        );
    }

    #[test]
    fn test_first_failing_rule_wins() {
        let err = validate_order("btc", "hold", "stop", "-1", Some("x")).unwrap_err();
        assert_eq!(err, ValidationError::SymbolFormat("btc".into()));

        let err = validate_order("BTCUSDT", "hold", "stop", "-1", None).unwrap_err();
        assert_eq!(err, ValidationError::UnknownSide("HOLD".into()));
    }
}
