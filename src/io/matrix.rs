use std::collections::HashMap;

use anyhow::Context;

use crate::io::config::DataConfig;
use crate::model::matrix::Setting;

/// Load one setting's age-mixing matrix. The files are space-delimited with
/// no header; every row must yield `num_brackets` numeric cells.
pub fn load_contact_matrix(
    cfg: &DataConfig,
    location: &str,
    setting: Setting,
    num_brackets: usize,
) -> anyhow::Result<Vec<Vec<f64>>> {
    let path = cfg.contact_matrix_path(location, setting, num_brackets);
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .delimiter(b' ')
        .from_path(&path)
        .with_context(|| format!("Failed to open contact matrix: {}", path.display()))?;

    let mut matrix: Vec<Vec<f64>> = Vec::new();
    for result in rdr.records() {
        let record = result?;
        let mut row_vals: Vec<f64> = Vec::new();
        for field in record.iter() {
            if let Ok(v) = field.trim().parse::<f64>() {
                row_vals.push(v);
            }
        }
        if !row_vals.is_empty() {
            matrix.push(row_vals);
        }
    }

    anyhow::ensure!(
        matrix.len() == num_brackets && matrix.iter().all(|r| r.len() == num_brackets),
        "contact matrix {} is not {}x{}",
        path.display(),
        num_brackets,
        num_brackets
    );
    anyhow::ensure!(
        matrix.iter().all(|r| r.iter().all(|v| *v >= 0.0)),
        "contact matrix {} has negative entries",
        path.display()
    );
    Ok(matrix)
}

/// Load the full per-setting matrix dictionary for one location.
pub fn load_contact_matrices(
    cfg: &DataConfig,
    location: &str,
    num_brackets: usize,
) -> anyhow::Result<HashMap<Setting, Vec<Vec<f64>>>> {
    let mut matrices = HashMap::new();
    for setting in Setting::ALL {
        let m = load_contact_matrix(cfg, location, setting, num_brackets)?;
        matrices.insert(setting, m);
    }
    log::debug!("loaded {} setting matrices for {location}", matrices.len());
    Ok(matrices)
}
