use std::collections::HashMap;
use std::hash::Hash;

use rand::Rng;

use crate::error::SynthError;

/// Return a copy of `weights` rescaled to sum to 1. A mapping with a zero
/// total is returned unchanged; callers that intend to sample from it must
/// guard separately (the samplers below reject it).
pub fn normalize_weights<K>(weights: &HashMap<K, f64>) -> HashMap<K, f64>
where
    K: Eq + Hash + Clone,
{
    let total: f64 = weights.values().sum();
    if total == 0.0 {
        return weights.clone();
    }
    weights
        .iter()
        .map(|(k, v)| (k.clone(), v / total))
        .collect()
}

fn check_weights(weights: &[f64]) -> Result<f64, SynthError> {
    if weights.iter().any(|w| *w < 0.0) {
        return Err(SynthError::InvalidDistribution(
            "negative weight".to_string(),
        ));
    }
    let total: f64 = weights.iter().sum();
    if total <= 0.0 {
        return Err(SynthError::InvalidDistribution(
            "all weights are zero".to_string(),
        ));
    }
    Ok(total)
}

/// Draw one index from a dense vector of non-negative weights, with
/// probability proportional to weight. One multinomial trial, implemented as
/// cumulative-sum inversion of a single uniform variate.
pub fn sample_index<R: Rng>(rng: &mut R, weights: &[f64]) -> Result<usize, SynthError> {
    let total = check_weights(weights)?;
    let u = rng.gen::<f64>() * total;
    let mut acc = 0.0;
    for (i, w) in weights.iter().enumerate() {
        acc += w;
        if u < acc {
            return Ok(i);
        }
    }
    // u landed on the total itself (fp rounding); take the last positive bin.
    let last = weights
        .iter()
        .rposition(|w| *w > 0.0)
        .ok_or_else(|| SynthError::InvalidDistribution("all weights are zero".to_string()))?;
    Ok(last)
}

/// Draw one key from a key → weight mapping. Keys are visited in sorted order
/// so results depend only on the RNG stream, never on map iteration order.
pub fn sample_key<R, K>(rng: &mut R, distr: &HashMap<K, f64>) -> Result<K, SynthError>
where
    R: Rng,
    K: Eq + Hash + Ord + Clone,
{
    let mut keys: Vec<&K> = distr.keys().collect();
    keys.sort();
    let weights: Vec<f64> = keys.iter().map(|k| distr[*k]).collect();
    let i = sample_index(rng, &weights)?;
    Ok(keys[i].clone())
}
