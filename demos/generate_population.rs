use std::collections::HashMap;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use popsynth::model::contacts::{contact_ids_for_ages, sample_contact_ages};
use popsynth::model::population::{generate_people, ids_by_age};
use popsynth::{AgeBrackets, AgeSexSampler, FallbackParams, Setting};

fn main() -> anyhow::Result<()> {
    // Toy 4-bracket demographics; replace with the census loaders for a real
    // location (see popsynth::io).
    let brackets = AgeBrackets::new(vec![(0, 4), (5, 17), (18, 64), (65, 99)])?;

    let bracket_distr: HashMap<usize, f64> =
        [(0, 0.06), (1, 0.16), (2, 0.62), (3, 0.16)].into();
    let male_fraction: HashMap<usize, f64> =
        [(0, 0.51), (1, 0.51), (2, 0.50), (3, 0.44)].into();

    let sampler = AgeSexSampler::new(
        brackets.clone(),
        bracket_distr,
        male_fraction,
        FallbackParams::default(),
    );

    let mut rng = ChaCha8Rng::seed_from_u64(2020);
    let people = generate_people(&mut rng, &sampler, 10_000);
    let pool = ids_by_age(&people);
    println!("generated {} people across {} distinct ages", people.len(), pool.len());

    // Strong household/school mixing for a school-age individual.
    let mut matrices = HashMap::new();
    matrices.insert(
        Setting::Household,
        vec![
            vec![4.0, 2.0, 3.0, 0.5],
            vec![2.0, 5.0, 3.0, 0.5],
            vec![3.0, 3.0, 4.0, 1.0],
            vec![0.5, 0.5, 1.0, 2.0],
        ],
    );
    matrices.insert(
        Setting::School,
        vec![
            vec![1.0, 2.0, 0.5, 0.1],
            vec![2.0, 8.0, 1.0, 0.1],
            vec![0.5, 1.0, 0.5, 0.1],
            vec![0.1, 0.1, 0.1, 0.1],
        ],
    );

    let weights: HashMap<Setting, f64> = [(Setting::Household, 4.11), (Setting::School, 11.41)].into();
    let contact_ages = sample_contact_ages(&mut rng, 12, 20, &brackets, &matrices, &weights)?;
    let contact_ids = contact_ids_for_ages(&mut rng, &contact_ages, &pool, &brackets)?;
    println!("age-12 individual: contact ages {contact_ages:?}");
    println!("resolved to {} distinct contacts", contact_ids.len());

    // School closure: zero the school weight, contacts shift toward household mixing.
    let closed: HashMap<Setting, f64> = [(Setting::Household, 4.11), (Setting::School, 0.0)].into();
    let closed_ages = sample_contact_ages(&mut rng, 12, 20, &brackets, &matrices, &closed)?;
    println!("with schools closed: contact ages {closed_ages:?}");

    Ok(())
}
