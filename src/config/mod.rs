mod engine;
mod options;

pub use engine::{ConfigEngine, expand_home};
pub use options::Config;
