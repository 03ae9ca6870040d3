mod error;
mod rollguard_toml;

pub use error::*;
pub use rollguard_toml::*;
