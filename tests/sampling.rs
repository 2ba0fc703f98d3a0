use std::collections::HashMap;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use popsynth::math::distr::{normalize_weights, sample_index, sample_key};
use popsynth::model::brackets::AgeBrackets;
use popsynth::model::contacts::{contact_ids_for_ages, sample_contact_ages, IdsByAge};
use popsynth::model::matrix::{combine_matrices, Setting};
use popsynth::model::{age_sex, mortality};
use popsynth::SynthError;

fn two_brackets() -> AgeBrackets {
    AgeBrackets::new(vec![(0, 17), (18, 99)]).expect("valid brackets")
}

#[test]
fn normalize_sums_to_one_and_preserves_ratios() {
    let mut weights = HashMap::new();
    weights.insert("young", 2.0);
    weights.insert("old", 6.0);

    let probs = normalize_weights(&weights);
    let total: f64 = probs.values().sum();
    assert!((total - 1.0).abs() < 1e-12);
    assert!((probs["old"] / probs["young"] - 3.0).abs() < 1e-12);
    // input untouched
    assert_eq!(weights["young"], 2.0);
}

#[test]
fn normalize_zero_total_is_identity() {
    let mut weights = HashMap::new();
    weights.insert(0usize, 0.0);
    weights.insert(1usize, 0.0);
    let out = normalize_weights(&weights);
    assert_eq!(out, weights);
}

#[test]
fn categorical_sampler_is_reproducible_with_fixed_seed() {
    let mut distr = HashMap::new();
    distr.insert("a".to_string(), 0.2);
    distr.insert("b".to_string(), 0.8);

    let draw_ten = || {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        (0..10)
            .map(|_| sample_key(&mut rng, &distr).expect("valid distribution"))
            .collect::<Vec<_>>()
    };
    assert_eq!(draw_ten(), draw_ten());
}

#[test]
fn categorical_sampler_frequencies_converge() {
    let mut distr = HashMap::new();
    distr.insert("a".to_string(), 0.2);
    distr.insert("b".to_string(), 0.8);

    let mut rng = ChaCha8Rng::seed_from_u64(7);
    let n = 20_000;
    let mut count_a = 0usize;
    for _ in 0..n {
        if sample_key(&mut rng, &distr).expect("valid distribution") == "a" {
            count_a += 1;
        }
    }
    let freq_a = count_a as f64 / n as f64;
    assert!((freq_a - 0.2).abs() < 0.02, "freq_a = {freq_a}");
}

#[test]
fn categorical_sampler_rejects_bad_weights() {
    let mut rng = ChaCha8Rng::seed_from_u64(0);
    assert!(matches!(
        sample_index(&mut rng, &[0.0, 0.0]),
        Err(SynthError::InvalidDistribution(_))
    ));
    assert!(matches!(
        sample_index(&mut rng, &[1.0, -0.5]),
        Err(SynthError::InvalidDistribution(_))
    ));
}

#[test]
fn bracket_lookup_round_trips() {
    let brackets = AgeBrackets::new(vec![(0, 4), (5, 17), (18, 64), (65, 99)]).unwrap();
    for b in 0..brackets.count() {
        for age in brackets.ages_in(b) {
            assert_eq!(brackets.bracket_of(age).unwrap(), b);
        }
    }
    assert_eq!(brackets.bracket_of(100), Err(SynthError::AgeOutOfRange(100)));
}

#[test]
fn brackets_reject_gaps_and_overlaps() {
    assert!(AgeBrackets::new(vec![(0, 10), (12, 20)]).is_err());
    assert!(AgeBrackets::new(vec![(0, 10), (10, 20)]).is_err());
    assert!(AgeBrackets::new(vec![]).is_err());
}

#[test]
fn combiner_weighted_sum_and_identity() {
    let h = vec![vec![1.0, 2.0], vec![3.0, 4.0]];
    let s = vec![vec![10.0, 0.0], vec![0.0, 10.0]];
    let mut matrices = HashMap::new();
    matrices.insert(Setting::Household, h.clone());
    matrices.insert(Setting::School, s);

    // all-zero weights -> all-zero matrix of the right shape
    let mut weights = HashMap::new();
    weights.insert(Setting::Household, 0.0);
    weights.insert(Setting::School, 0.0);
    let zero = combine_matrices(&matrices, &weights, 2).unwrap();
    assert_eq!(zero, vec![vec![0.0, 0.0], vec![0.0, 0.0]]);

    // weight 1 on one setting reproduces it exactly
    let mut weights = HashMap::new();
    weights.insert(Setting::Household, 1.0);
    weights.insert(Setting::School, 0.0);
    let only_h = combine_matrices(&matrices, &weights, 2).unwrap();
    assert_eq!(only_h, h);
}

#[test]
fn combiner_rejects_shape_mismatch() {
    let mut matrices = HashMap::new();
    matrices.insert(Setting::Household, vec![vec![1.0, 2.0, 3.0]]);
    let mut weights = HashMap::new();
    weights.insert(Setting::Household, 1.0);
    assert!(matches!(
        combine_matrices(&matrices, &weights, 2),
        Err(SynthError::ShapeMismatch { .. })
    ));
}

#[test]
fn contact_age_sampler_returns_requested_count() {
    let brackets = two_brackets();
    let mut matrices = HashMap::new();
    matrices.insert(Setting::Household, vec![vec![1.0, 1.0], vec![1.0, 1.0]]);
    let mut weights = HashMap::new();
    weights.insert(Setting::Household, 1.0);

    let mut rng = ChaCha8Rng::seed_from_u64(3);
    let none = sample_contact_ages(&mut rng, 10, 0, &brackets, &matrices, &weights).unwrap();
    assert!(none.is_empty());

    let five = sample_contact_ages(&mut rng, 10, 5, &brackets, &matrices, &weights).unwrap();
    assert_eq!(five.len(), 5);
    for age in five {
        assert!(brackets.bracket_of(age).is_ok());
    }
}

#[test]
fn cross_bracket_matrix_forces_cross_bracket_contacts() {
    // Only off-diagonal contact: a child's contacts must all be adults.
    let brackets = two_brackets();
    let mut matrices = HashMap::new();
    matrices.insert(Setting::Household, vec![vec![0.0, 1.0], vec![1.0, 0.0]]);
    let mut weights = HashMap::new();
    weights.insert(Setting::Household, 1.0);

    let mut rng = ChaCha8Rng::seed_from_u64(11);
    let ages = sample_contact_ages(&mut rng, 10, 200, &brackets, &matrices, &weights).unwrap();
    assert_eq!(ages.len(), 200);
    for age in ages {
        assert!((18..=99).contains(&age), "contact age {age} not adult");
    }
}

#[test]
fn identity_resolver_broadens_to_bracket_when_exact_age_is_empty() {
    let brackets = two_brackets();
    let mut pool = IdsByAge::new();
    pool.insert(30, vec![100, 101]);
    // nobody aged 40, but bracket 1 has candidates at age 30

    let mut rng = ChaCha8Rng::seed_from_u64(5);
    let ids = contact_ids_for_ages(&mut rng, &[40], &pool, &brackets).unwrap();
    assert_eq!(ids.len(), 1);
    assert!(ids.contains(&100) || ids.contains(&101));
}

#[test]
fn identity_resolver_fails_when_bracket_is_empty() {
    let brackets = two_brackets();
    let mut pool = IdsByAge::new();
    pool.insert(30, vec![100]);
    // bracket 0 (ages 0-17) is completely empty

    let mut rng = ChaCha8Rng::seed_from_u64(5);
    assert_eq!(
        contact_ids_for_ages(&mut rng, &[5], &pool, &brackets),
        Err(SynthError::NoCandidates(5))
    );
}

#[test]
fn identity_resolver_collapses_duplicates() {
    let brackets = two_brackets();
    let mut pool = IdsByAge::new();
    pool.insert(30, vec![100]);

    let mut rng = ChaCha8Rng::seed_from_u64(5);
    let ids = contact_ids_for_ages(&mut rng, &[30, 30, 30, 30], &pool, &brackets).unwrap();
    assert_eq!(ids.len(), 1);
}

#[test]
fn age_sex_sampler_uses_empirical_path_when_data_is_valid() {
    let brackets = two_brackets();
    let mut bracket_distr = HashMap::new();
    bracket_distr.insert(0usize, 0.3);
    bracket_distr.insert(1usize, 0.7);
    let mut male_fraction = HashMap::new();
    male_fraction.insert(0usize, 0.5);
    male_fraction.insert(1usize, 0.48);

    let sampler = age_sex::AgeSexSampler::new(
        brackets,
        bracket_distr,
        male_fraction,
        age_sex::FallbackParams::default(),
    );

    let mut rng = ChaCha8Rng::seed_from_u64(9);
    for _ in 0..100 {
        let drawn = sampler.sample(&mut rng);
        assert_eq!(drawn.source, age_sex::AgeSexSource::Empirical);
        assert!(drawn.age <= 99);
    }
}

#[test]
fn age_sex_sampler_never_fails_on_malformed_distributions() {
    let brackets = two_brackets();
    let sampler = age_sex::AgeSexSampler::new(
        brackets,
        HashMap::new(), // empty bracket distribution
        HashMap::new(),
        age_sex::FallbackParams::default(),
    );

    let mut rng = ChaCha8Rng::seed_from_u64(13);
    for _ in 0..100 {
        let drawn = sampler.sample(&mut rng);
        assert_eq!(drawn.source, age_sex::AgeSexSource::Fallback);
        assert!(drawn.age <= 99);
        assert!(matches!(drawn.sex, age_sex::Sex::Male | age_sex::Sex::Female));
    }
}

#[test]
fn generated_population_feeds_contact_resolution() {
    let brackets = two_brackets();
    let mut bracket_distr = HashMap::new();
    bracket_distr.insert(0usize, 0.25);
    bracket_distr.insert(1usize, 0.75);
    let mut male_fraction = HashMap::new();
    male_fraction.insert(0usize, 0.51);
    male_fraction.insert(1usize, 0.49);

    let sampler = age_sex::AgeSexSampler::new(
        brackets.clone(),
        bracket_distr,
        male_fraction,
        age_sex::FallbackParams::default(),
    );

    let mut rng = ChaCha8Rng::seed_from_u64(17);
    let people = popsynth::model::population::generate_people(&mut rng, &sampler, 500);
    assert_eq!(people.len(), 500);
    let pool = popsynth::model::population::ids_by_age(&people);
    let pooled: usize = pool.values().map(Vec::len).sum();
    assert_eq!(pooled, 500);

    let mut matrices = HashMap::new();
    matrices.insert(Setting::Household, vec![vec![2.0, 1.0], vec![1.0, 2.0]]);
    matrices.insert(Setting::Community, vec![vec![1.0, 1.0], vec![1.0, 1.0]]);
    let mut weights = HashMap::new();
    weights.insert(Setting::Household, 4.11);
    weights.insert(Setting::Community, 2.79);

    let ages = sample_contact_ages(&mut rng, 30, 10, &brackets, &matrices, &weights).unwrap();
    let ids = contact_ids_for_ages(&mut rng, &ages, &pool, &brackets).unwrap();
    assert!(!ids.is_empty() && ids.len() <= 10);
    let known: std::collections::HashSet<u64> = people.iter().map(|p| p.id).collect();
    for id in &ids {
        assert!(known.contains(id));
    }
}

#[test]
fn mortality_rates_expand_per_bracket_to_per_age() {
    let brackets = two_brackets();
    let mut by_bracket = HashMap::new();
    by_bracket.insert(0usize, 0.001);
    by_bracket.insert(1usize, 0.02);

    let by_age = mortality::rates_by_age(&by_bracket, &brackets);
    assert_eq!(mortality::rate_for_age(&by_age, 3).unwrap(), 0.001);
    assert_eq!(mortality::rate_for_age(&by_age, 80).unwrap(), 0.02);
    assert_eq!(
        mortality::rate_for_age(&by_age, 200),
        Err(SynthError::AgeOutOfRange(200))
    );
}
