use std::collections::HashMap;
use std::path::Path;

use anyhow::Context;
use serde::Deserialize;

use crate::io::config::DataConfig;
use crate::model::brackets::AgeBrackets;

/// Load bracket definitions from a headerless two-column file:
/// `min_age,max_age` per row, ascending.
pub fn load_age_brackets(cfg: &DataConfig, location: &str) -> anyhow::Result<AgeBrackets> {
    let path = cfg.age_brackets_path(location);
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .from_path(&path)
        .with_context(|| format!("Failed to open age brackets file: {}", path.display()))?;

    let mut ranges = Vec::new();
    for result in rdr.deserialize::<(u32, u32)>() {
        ranges.push(result?);
    }
    log::debug!("loaded {} age brackets for {location}", ranges.len());
    AgeBrackets::new(ranges)
        .with_context(|| format!("Malformed age brackets in {}", path.display()))
}

#[derive(Debug, Deserialize)]
struct DistrRow {
    age_bracket: usize,
    percent: f64,
}

/// Load the age distribution by bracket: columns `age_bracket,percent`.
pub fn load_age_bracket_distr(
    cfg: &DataConfig,
    location: &str,
) -> anyhow::Result<HashMap<usize, f64>> {
    let path = cfg.age_bracket_distr_path(location);
    let mut rdr = csv::Reader::from_path(&path)
        .with_context(|| format!("Failed to open age distribution: {}", path.display()))?;
    let mut distr = HashMap::new();
    for result in rdr.deserialize::<DistrRow>() {
        let row = result?;
        distr.insert(row.age_bracket, row.percent.max(0.0));
    }
    Ok(distr)
}

#[derive(Debug, Deserialize)]
struct GenderRow {
    fraction_male: f64,
    fraction_female: f64,
}

/// Gender fractions per bracket, keyed by bracket index in file order.
#[derive(Debug, Clone)]
pub struct GenderFractions {
    pub male: HashMap<usize, f64>,
    pub female: HashMap<usize, f64>,
}

/// Load gender fractions by bracket: columns `fraction_male,fraction_female`,
/// one row per bracket in bracket order.
pub fn load_gender_fractions(cfg: &DataConfig, location: &str) -> anyhow::Result<GenderFractions> {
    let path = cfg.gender_fraction_path(location);
    let mut rdr = csv::Reader::from_path(&path)
        .with_context(|| format!("Failed to open gender fractions: {}", path.display()))?;
    let mut male = HashMap::new();
    let mut female = HashMap::new();
    for (b, result) in rdr.deserialize::<GenderRow>().enumerate() {
        let row = result?;
        male.insert(b, row.fraction_male);
        female.insert(b, row.fraction_female);
    }
    Ok(GenderFractions { male, female })
}

/// Load synthetic age counts: space-delimited headerless `age count` rows.
pub fn load_synthetic_ages(cfg: &DataConfig, location: &str) -> anyhow::Result<HashMap<u32, f64>> {
    let path = cfg.synthetic_ages_path(location);
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .delimiter(b' ')
        .from_path(&path)
        .with_context(|| format!("Failed to open synthetic ages: {}", path.display()))?;
    let mut counts = HashMap::new();
    for result in rdr.deserialize::<(u32, f64)>() {
        let (age, count) = result?;
        counts.insert(age, count.max(0.0));
    }
    Ok(counts)
}

#[derive(Debug, Deserialize)]
struct MortalityRow {
    age_bracket: usize,
    rate: f64,
}

/// Load mortality rates by bracket from an explicit path: columns
/// `age_bracket,rate`.
pub fn load_mortality_rates(path: impl AsRef<Path>) -> anyhow::Result<HashMap<usize, f64>> {
    let path = path.as_ref();
    let mut rdr = csv::Reader::from_path(path)
        .with_context(|| format!("Failed to open mortality rates: {}", path.display()))?;
    let mut rates = HashMap::new();
    for result in rdr.deserialize::<MortalityRow>() {
        let row = result?;
        rates.insert(row.age_bracket, row.rate);
    }
    Ok(rates)
}
