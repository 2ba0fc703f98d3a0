pub mod age_sex;
pub mod brackets;
pub mod contacts;
pub mod matrix;
pub mod mortality;
pub mod population;
