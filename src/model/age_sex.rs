use std::collections::HashMap;

use rand::Rng;
use rand_distr::{Distribution, Normal};
use serde::{Deserialize, Serialize};

use crate::error::SynthError;
use crate::math::distr::sample_key;
use crate::model::brackets::AgeBrackets;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Sex {
    Female,
    Male,
}

/// Which path produced a sample: the empirical census distributions, or the
/// parametric stand-in used when those are malformed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AgeSexSource {
    Empirical,
    Fallback,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AgeSex {
    pub age: u32,
    pub sex: Sex,
    pub source: AgeSexSource,
}

/// Parameters for the synthetic fallback distribution: sex uniform, age
/// normal(mean, std) rounded and clamped to `[min_age, max_age]`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FallbackParams {
    pub min_age: u32,
    pub max_age: u32,
    pub age_mean: f64,
    pub age_std: f64,
}

impl Default for FallbackParams {
    fn default() -> Self {
        Self {
            min_age: 0,
            max_age: 99,
            age_mean: 40.0,
            age_std: 20.0,
        }
    }
}

/// Joint (age, sex) sampler over an empirical age-bracket distribution and a
/// per-bracket male-fraction table.
///
/// Sampling never fails: the enumerated validation failures on the empirical
/// path (all-zero bracket distribution, missing male-fraction entry, a
/// bracket reference outside the definitions) divert to the parametric
/// fallback, and the returned [`AgeSexSource`] records which path ran.
pub struct AgeSexSampler {
    brackets: AgeBrackets,
    bracket_distr: HashMap<usize, f64>,
    male_fraction: HashMap<usize, f64>,
    fallback: FallbackParams,
}

impl AgeSexSampler {
    pub fn new(
        brackets: AgeBrackets,
        bracket_distr: HashMap<usize, f64>,
        male_fraction: HashMap<usize, f64>,
        fallback: FallbackParams,
    ) -> Self {
        Self {
            brackets,
            bracket_distr,
            male_fraction,
            fallback,
        }
    }

    /// Draw one (age, sex) pair.
    pub fn sample<R: Rng>(&self, rng: &mut R) -> AgeSex {
        match self.sample_empirical(rng) {
            Ok((age, sex)) => AgeSex {
                age,
                sex,
                source: AgeSexSource::Empirical,
            },
            Err(e) => {
                log::warn!("age-sex sampling fell back to synthetic distribution: {e}");
                let (age, sex) = self.sample_fallback(rng);
                AgeSex {
                    age,
                    sex,
                    source: AgeSexSource::Fallback,
                }
            }
        }
    }

    fn sample_empirical<R: Rng>(&self, rng: &mut R) -> Result<(u32, Sex), SynthError> {
        let b = sample_key(rng, &self.bracket_distr)?;
        if b >= self.brackets.count() {
            return Err(SynthError::AgeOutOfRange(b as u32));
        }
        let age = rng.gen_range(self.brackets.ages_in(b));
        let p_male = *self.male_fraction.get(&b).ok_or_else(|| {
            SynthError::InvalidDistribution(format!("no male fraction for bracket {b}"))
        })?;
        let sex = if rng.gen::<f64>() < p_male {
            Sex::Male
        } else {
            Sex::Female
        };
        Ok((age, sex))
    }

    fn sample_fallback<R: Rng>(&self, rng: &mut R) -> (u32, Sex) {
        let sex = if rng.gen::<bool>() {
            Sex::Male
        } else {
            Sex::Female
        };
        let age = match Normal::new(self.fallback.age_mean, self.fallback.age_std) {
            Ok(normal) => {
                let raw = normal.sample(rng).round().max(0.0) as u32;
                raw.clamp(self.fallback.min_age, self.fallback.max_age)
            }
            // Degenerate std; the mean itself is the best remaining guess.
            Err(_) => (self.fallback.age_mean.round().max(0.0) as u32)
                .clamp(self.fallback.min_age, self.fallback.max_age),
        };
        (age, sex)
    }
}
