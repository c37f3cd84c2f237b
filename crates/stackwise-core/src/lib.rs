pub mod advisor;
pub mod compatibility;
pub mod config;
pub mod context;
pub mod error;
pub mod gaps;
pub mod insights;
pub mod io;
pub mod open_source;
pub mod paths;
pub mod patterns;
pub mod preferences;
pub mod prompt;
pub mod recommend;
pub mod requirements;
pub mod stack;
pub mod store;
pub mod types;
pub mod validation;

pub use advisor::{Advisor, Recommendation};
pub use error::{AdvisorError, Result};
