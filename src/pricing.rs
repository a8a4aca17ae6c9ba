//! Pricing

use rust_decimal::Decimal;
use rusty_money::{
    Money,
    iso::{self, Currency},
};

/// Currency every catalog price is expressed in.
pub fn store_currency() -> &'static Currency {
    iso::USD
}

/// Wrap a store price as money in the store currency.
pub fn money(amount: Decimal) -> Money<'static, Currency> {
    Money::from_decimal(amount, store_currency())
}

/// Format a store price for display, e.g. `$30.00`.
pub fn format_price(amount: Decimal) -> String {
    money(amount).to_string()
}
