pub mod distr;
