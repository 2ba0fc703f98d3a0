pub mod error;
pub mod math;
pub mod model;
pub mod io;

pub use error::SynthError;
pub use model::age_sex::{AgeSex, AgeSexSampler, AgeSexSource, FallbackParams, Sex};
pub use model::brackets::AgeBrackets;
pub use model::matrix::Setting;
