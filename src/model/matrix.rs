use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::SynthError;

/// Contact setting contributing its own age-mixing matrix slice.
///
/// The single-letter codes match the data-file naming convention
/// (`M<K>_<location>_<code>.dat`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Setting {
    Household,
    School,
    Work,
    /// Random community contact.
    Community,
}

impl Setting {
    pub const ALL: [Setting; 4] = [
        Setting::Household,
        Setting::School,
        Setting::Work,
        Setting::Community,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            Setting::Household => "H",
            Setting::School => "S",
            Setting::Work => "W",
            Setting::Community => "R",
        }
    }
}

/// Linearly combine setting-specific K×K age-mixing matrices:
/// `M[i][j] = Σ_s weights[s] * matrices[s][i][j]`.
///
/// Settings absent from the weight set contribute zero, so school closures
/// and similar interventions are modelled by zeroing or omitting a weight
/// rather than by editing the matrix itself. All matrices must be K×K.
pub fn combine_matrices(
    matrices: &HashMap<Setting, Vec<Vec<f64>>>,
    weights: &HashMap<Setting, f64>,
    num_brackets: usize,
) -> Result<Vec<Vec<f64>>, SynthError> {
    let k = num_brackets;
    let mut combined = vec![vec![0.0; k]; k];
    for (setting, w) in weights {
        let m = match matrices.get(setting) {
            Some(m) => m,
            None => continue,
        };
        if m.len() != k || m.iter().any(|row| row.len() != k) {
            return Err(SynthError::ShapeMismatch {
                expected: k,
                rows: m.len(),
                cols: m.first().map_or(0, |r| r.len()),
            });
        }
        for i in 0..k {
            for j in 0..k {
                combined[i][j] += w * m[i][j];
            }
        }
    }
    Ok(combined)
}
