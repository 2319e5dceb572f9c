use rust_decimal::Decimal;

use crate::errors::CoreError;
use crate::models::money::{Currency, ExchangeRates, Money};

/// Decimal places kept after a conversion.
const CONVERSION_SCALE: u32 = 2;

/// Converts money between currencies using the workspace rate table.
///
/// Rates are quoted against one base currency, so every conversion is a
/// two-step pivot: source → base → target.
pub struct CurrencyService;

impl CurrencyService {
    pub fn new() -> Self {
        Self
    }

    /// Convert `money` into `target`.
    ///
    /// Same-currency and zero amounts never need a rate.
    pub fn convert(
        &self,
        rates: &ExchangeRates,
        money: &Money,
        target: &Currency,
    ) -> Result<Money, CoreError> {
        if &money.currency == target {
            return Ok(money.clone());
        }
        if money.is_zero() {
            return Ok(Money::zero(target.clone()));
        }

        let missing = || CoreError::RateNotAvailable {
            from: money.currency.to_string(),
            to: target.to_string(),
        };
        let from_rate = rates.rate(&money.currency).ok_or_else(missing)?;
        let to_rate = rates.rate(target).ok_or_else(missing)?;

        // Step 1: source → base, step 2: base → target
        let in_base: Decimal = money.amount / from_rate;
        let converted = (in_base * to_rate).round_dp(CONVERSION_SCALE);

        Ok(Money::new(converted, target.clone()))
    }
}

impl Default for CurrencyService {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn rates() -> ExchangeRates {
        let mut rates = ExchangeRates::new(Currency::gbp());
        rates.set_rate(Currency::new("USD").unwrap(), dec!(1.25));
        rates.set_rate(Currency::new("EUR").unwrap(), dec!(1.16));
        rates
    }

    #[test]
    fn pivots_through_base() {
        let usd = Currency::new("USD").unwrap();
        let eur = Currency::new("EUR").unwrap();
        let converted = CurrencyService::new()
            .convert(&rates(), &Money::new(dec!(125), usd), &eur)
            .unwrap();
        assert_eq!(converted, Money::new(dec!(116), eur));
    }

    #[test]
    fn rounds_to_pennies() {
        let usd = Currency::new("USD").unwrap();
        let converted = CurrencyService::new()
            .convert(&rates(), &Money::new(dec!(1), usd), &Currency::gbp())
            .unwrap();
        assert_eq!(converted.amount, dec!(0.80));
    }

    #[test]
    fn same_currency_needs_no_rate() {
        let empty = ExchangeRates::new(Currency::gbp());
        let jpy = Currency::new("JPY").unwrap();
        let money = Money::new(dec!(500), jpy.clone());
        assert_eq!(CurrencyService::new().convert(&empty, &money, &jpy).unwrap(), money);
    }

    #[test]
    fn zero_needs_no_rate() {
        let jpy = Currency::new("JPY").unwrap();
        let converted = CurrencyService::new()
            .convert(&rates(), &Money::zero(jpy), &Currency::gbp())
            .unwrap();
        assert!(converted.is_zero());
        assert_eq!(converted.currency, Currency::gbp());
    }

    #[test]
    fn missing_rate_is_an_error() {
        let jpy = Currency::new("JPY").unwrap();
        let err = CurrencyService::new()
            .convert(&rates(), &Money::new(dec!(1), jpy), &Currency::gbp())
            .unwrap_err();
        assert_eq!(err.to_string(), "Exchange rate not available from JPY to GBP");
    }
}
