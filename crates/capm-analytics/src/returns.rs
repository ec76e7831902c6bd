//! Log returns.
//!
//! `r[i] = ln(p[i] / p[i-1])`. The first entry has no prior price and is `NaN`.
//! A missing or non-positive price makes the returns on either side of it `NaN`
//! rather than failing the whole computation.

use crate::table::{PriceTable, ReturnTable};
use ndarray::{Array1, ArrayView1};

/// Log returns of a single price column, same length as the input.
pub fn log_returns(prices: ArrayView1<'_, f64>) -> Array1<f64> {
    let mut returns = Array1::from_elem(prices.len(), f64::NAN);
    for i in 1..prices.len() {
        let (previous, current) = (prices[i - 1], prices[i]);
        if previous > 0.0 && current > 0.0 {
            returns[i] = (current / previous).ln();
        }
    }
    returns
}

/// Log returns for every column of a price table.
pub fn compute_log_returns(prices: &PriceTable) -> ReturnTable {
    let columns = prices
        .columns()
        .map(|(symbol, column)| (symbol.clone(), log_returns(column)))
        .collect();

    ReturnTable::from_parts(prices.dates().to_vec(), columns)
}
