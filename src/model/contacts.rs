use std::collections::{HashMap, HashSet};

use rand::seq::SliceRandom;
use rand::Rng;

use crate::error::SynthError;
use crate::math::distr::sample_index;
use crate::model::brackets::AgeBrackets;
use crate::model::matrix::{combine_matrices, Setting};

/// Identifier pool keyed by exact age: every id at a given age is a contact
/// candidate. Built by population-construction code, read-only here.
pub type IdsByAge = HashMap<u32, Vec<u64>>;

/// Sample the age of one contact for an individual of `age`.
///
/// The individual's bracket row of the mixing matrix is a categorical
/// distribution over destination brackets; the concrete age is then uniform
/// within the sampled bracket.
pub fn sample_contact_age<R: Rng>(
    rng: &mut R,
    age: u32,
    brackets: &AgeBrackets,
    mixing_matrix: &[Vec<f64>],
) -> Result<u32, SynthError> {
    let b = brackets.bracket_of(age)?;
    let b_contact = sample_index(rng, &mixing_matrix[b])?;
    Ok(rng.gen_range(brackets.ages_in(b_contact)))
}

/// Sample `n_contacts` contact ages for an individual of `age`, combining the
/// setting-specific matrices by weight first. Draws are independent and
/// identically distributed; repeats are allowed.
///
/// Reduced contact in a setting (school closures, distancing) is modelled by
/// lowering that setting's weight, not by mutating its matrix.
pub fn sample_contact_ages<R: Rng>(
    rng: &mut R,
    age: u32,
    n_contacts: usize,
    brackets: &AgeBrackets,
    matrices: &HashMap<Setting, Vec<Vec<f64>>>,
    weights: &HashMap<Setting, f64>,
) -> Result<Vec<u32>, SynthError> {
    let combined = combine_matrices(matrices, weights, brackets.count())?;
    let mut ages = Vec::with_capacity(n_contacts);
    for _ in 0..n_contacts {
        ages.push(sample_contact_age(rng, age, brackets, &combined)?);
    }
    Ok(ages)
}

/// Resolve sampled contact ages to concrete individual ids.
///
/// Each age draws one id uniformly from the exact-age pool; an empty pool
/// broadens to the union of every age in the surrounding bracket. Duplicates
/// collapse, so the result may hold fewer ids than `contact_ages`.
pub fn contact_ids_for_ages<R: Rng>(
    rng: &mut R,
    contact_ages: &[u32],
    ids_by_age: &IdsByAge,
    brackets: &AgeBrackets,
) -> Result<HashSet<u64>, SynthError> {
    let mut contact_ids = HashSet::new();
    for &contact_age in contact_ages {
        let exact = ids_by_age.get(&contact_age).map_or(&[][..], |v| &v[..]);
        let id = match exact.choose(rng) {
            Some(id) => *id,
            None => {
                let b = brackets.bracket_of(contact_age)?;
                let pooled: Vec<u64> = brackets
                    .ages_in(b)
                    .flat_map(|a| ids_by_age.get(&a).into_iter().flatten().copied())
                    .collect();
                *pooled
                    .choose(rng)
                    .ok_or(SynthError::NoCandidates(contact_age))?
            }
        };
        contact_ids.insert(id);
    }
    Ok(contact_ids)
}
