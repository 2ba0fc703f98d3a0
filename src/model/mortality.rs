use std::collections::HashMap;

use crate::error::SynthError;
use crate::model::brackets::AgeBrackets;

/// Expand per-bracket annual mortality rates to a per-age table.
pub fn rates_by_age(
    rates_by_bracket: &HashMap<usize, f64>,
    brackets: &AgeBrackets,
) -> HashMap<u32, f64> {
    let mut rates = HashMap::new();
    for (b, rate) in rates_by_bracket {
        if *b >= brackets.count() {
            continue;
        }
        for a in brackets.ages_in(*b) {
            rates.insert(a, *rate);
        }
    }
    rates
}

/// Mortality rate for one individual's age.
pub fn rate_for_age(rates: &HashMap<u32, f64>, age: u32) -> Result<f64, SynthError> {
    rates
        .get(&age)
        .copied()
        .ok_or(SynthError::AgeOutOfRange(age))
}
