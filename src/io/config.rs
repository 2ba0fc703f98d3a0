use std::path::PathBuf;

use crate::model::matrix::Setting;

/// Location of the demographic data tree. Validated once at construction and
/// passed by reference to every loader; there is no process-global setting.
#[derive(Debug, Clone)]
pub struct DataConfig {
    data_dir: PathBuf,
}

impl DataConfig {
    pub fn new(data_dir: impl Into<PathBuf>) -> anyhow::Result<Self> {
        let data_dir = data_dir.into();
        anyhow::ensure!(
            data_dir.is_dir(),
            "data directory not found: {}",
            data_dir.display()
        );
        Ok(Self { data_dir })
    }

    fn age_distributions_dir(&self) -> PathBuf {
        self.data_dir.join("census").join("age distributions")
    }

    pub fn age_brackets_path(&self, location: &str) -> PathBuf {
        self.age_distributions_dir()
            .join(format!("{location}_age_brackets.dat"))
    }

    pub fn age_bracket_distr_path(&self, location: &str) -> PathBuf {
        self.age_distributions_dir()
            .join(format!("{location}_age_bracket_distr.dat"))
    }

    pub fn gender_fraction_path(&self, location: &str) -> PathBuf {
        self.age_distributions_dir()
            .join(format!("{location}_gender_fraction_by_age_bracket.dat"))
    }

    /// Per-setting asymmetric age-mixing matrix, space-delimited, headerless.
    pub fn contact_matrix_path(
        &self,
        location: &str,
        setting: Setting,
        num_brackets: usize,
    ) -> PathBuf {
        let code = setting.code();
        self.data_dir
            .join("SyntheticPopulations")
            .join("asymmetric_matrices")
            .join(format!("data_{code}{num_brackets}"))
            .join(format!("M{num_brackets}_{location}_{code}.dat"))
    }

    pub fn synthetic_ages_path(&self, location: &str) -> PathBuf {
        self.data_dir
            .join("SyntheticPopulations")
            .join("synthetic_ages")
            .join("data_a85")
            .join(format!("a85_{location}.dat"))
    }

    pub fn mortality_rates_path(&self) -> PathBuf {
        self.data_dir.join("mortality_rates_by_age_bracket.dat")
    }
}
