//! Conversion of American odds into probabilities, and removal of the bookmaker's margin.
//!
//! The margin is removed multiplicatively: implied probabilities are divided by their sum (the
//! booksum), which spreads the overround across outcomes in proportion to their implied
//! probability. Power and Shin methods are not supported.

use std::fmt::{Display, Formatter};
use std::hash::Hash;

use rustc_hash::FxHashMap;
use strum_macros::Display;

use crate::model::error::DomainError;
use crate::probs::SliceExt;

/// Probability implied by an American `price`, ignoring the margin.
///
/// Positive prices quote the payout per 100 staked; negative prices quote the stake required to
/// win 100. A price of 0 takes the stake formula and implies 0, so such an outcome is never
/// drawn.
pub fn implied_probability(price: i64) -> f64 {
    if price > 0 {
        100.0 / (price as f64 + 100.0)
    } else {
        let stake = price.unsigned_abs() as f64;
        stake / (stake + 100.0)
    }
}

/// Rescales the named `weights` so that they add up to 1.
pub fn normalize<K: Eq + Hash + Clone>(
    weights: &FxHashMap<K, f64>,
) -> Result<FxHashMap<K, f64>, DomainError> {
    let total: f64 = weights.values().sum();
    if total == 0.0 {
        return Err(DomainError::ZeroSum);
    }
    Ok(weights
        .iter()
        .map(|(key, &weight)| (key.clone(), weight / total))
        .collect())
}

#[derive(Debug, Clone, PartialEq, Display)]
pub enum OverroundMethod {
    Multiplicative,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Overround {
    pub method: OverroundMethod,
    pub value: f64,
}
impl Overround {
    /// The bookmaker's margin as a fraction of the fair book, e.g. 0.05 for a 105% book.
    pub fn margin(&self) -> f64 {
        self.value - 1.0
    }
}

impl Display for Overround {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.2}% ({})", self.value * 100.0, self.method)
    }
}

/// A book of mutually exclusive outcomes, quoted in American odds, together with the fair
/// probabilities recovered from those prices.
#[derive(Debug, Clone, PartialEq)]
pub struct Market {
    pub prices: Vec<i64>,
    pub probs: Vec<f64>,
    pub overround: Overround,
}
impl Market {
    pub fn fit(prices: Vec<i64>) -> Result<Self, DomainError> {
        let mut probs: Vec<_> = prices.iter().map(|&price| implied_probability(price)).collect();
        let booksum = probs.sum();
        if booksum == 0.0 {
            return Err(DomainError::ZeroSum);
        }
        probs.normalise(1.0);
        Ok(Self {
            prices,
            probs,
            overround: Overround {
                method: OverroundMethod::Multiplicative,
                value: booksum,
            },
        })
    }

    /// Fair decimal price of the outcome at `index`.
    pub fn fair_price(&self, index: usize) -> f64 {
        1.0 / self.probs[index]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::assert_slice_f64_absolute;
    use assert_float_eq::*;

    #[test]
    fn implied_probability_negative() {
        assert_float_absolute_eq!(0.9230769230769231, implied_probability(-1200), 1e-10);
    }

    #[test]
    fn implied_probability_positive() {
        assert_float_absolute_eq!(0.1111111111111111, implied_probability(800), 1e-10);
    }

    #[test]
    fn implied_probability_even() {
        assert_eq!(0.5, implied_probability(100));
        assert_eq!(0.5, implied_probability(-100));
    }

    #[test]
    fn implied_probability_zero() {
        assert_eq!(0.0, implied_probability(0));
    }

    #[test]
    fn implied_probability_extreme() {
        let prob = implied_probability(i64::MIN);
        assert!(prob > 0.0 && prob <= 1.0);
    }

    #[test]
    fn normalize_pair() {
        let weights = FxHashMap::from_iter([("A", 0.6), ("B", 0.5)]);
        let normalized = normalize(&weights).unwrap();
        assert_float_absolute_eq!(0.5454545454545454, normalized["A"], 1e-10);
        assert_float_absolute_eq!(0.45454545454545453, normalized["B"], 1e-10);
        assert_float_absolute_eq!(1.0, normalized.values().sum::<f64>(), 1e-9);
    }

    #[test]
    fn normalize_single() {
        let weights = FxHashMap::from_iter([("A", 0.5)]);
        assert_eq!(1.0, normalize(&weights).unwrap()["A"]);
    }

    #[test]
    fn normalize_zero_sum() {
        let weights = FxHashMap::from_iter([("A", 0.0), ("B", 0.0)]);
        assert_eq!(DomainError::ZeroSum, normalize(&weights).unwrap_err());
    }

    #[test]
    fn fit_market_removes_margin() {
        let market = Market::fit(vec![-390, 450, 1200, 1300]).unwrap();
        assert_float_absolute_eq!(1.126088, market.overround.value, 1e-6);
        assert_float_absolute_eq!(0.126088, market.overround.margin(), 1e-6);
        assert_float_absolute_eq!(1.0, market.probs.sum(), 1e-9);
        assert_slice_f64_absolute(&[0.706799, 0.161460, 0.068310, 0.063431], &market.probs, 1e-6);
        assert_float_absolute_eq!(1.0 / 0.7067993, market.fair_price(0), 1e-5);
    }

    #[test]
    fn fit_fair_market() {
        let market = Market::fit(vec![100, 100]).unwrap();
        assert_float_absolute_eq!(1.0, market.overround.value, 1e-12);
        assert_slice_f64_absolute(&[0.5, 0.5], &market.probs, 1e-12);
    }

    #[test]
    fn fit_market_with_zero_price() {
        let market = Market::fit(vec![-150, 0, 130]).unwrap();
        assert_eq!(0.0, market.probs[1]);
        assert_float_absolute_eq!(1.0, market.probs.sum(), 1e-9);
        assert!(market.fair_price(1).is_infinite());
    }

    #[test]
    fn fit_empty_market() {
        assert_eq!(DomainError::ZeroSum, Market::fit(vec![]).unwrap_err());
    }
}
