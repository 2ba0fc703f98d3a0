use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::model::age_sex::{AgeSexSampler, Sex};
use crate::model::contacts::IdsByAge;

/// One synthetic individual. Ids are dense and assigned in generation order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Person {
    pub id: u64,
    pub age: u32,
    pub sex: Sex,
}

/// Generate `n` individuals by repeated (age, sex) draws.
pub fn generate_people<R: Rng>(rng: &mut R, sampler: &AgeSexSampler, n: usize) -> Vec<Person> {
    (0..n as u64)
        .map(|id| {
            let drawn = sampler.sample(rng);
            Person {
                id,
                age: drawn.age,
                sex: drawn.sex,
            }
        })
        .collect()
}

/// Build the age-indexed id pool consumed by contact identity resolution.
pub fn ids_by_age(people: &[Person]) -> IdsByAge {
    let mut pool = IdsByAge::new();
    for p in people {
        pool.entry(p.age).or_default().push(p.id);
    }
    pool
}
