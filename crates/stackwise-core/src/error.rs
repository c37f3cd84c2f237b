use thiserror::Error;

#[derive(Debug, Error)]
pub enum AdvisorError {
    #[error("home directory not found: set HOME or STACKWISE_HOME")]
    HomeNotFound,

    #[error("preference table '{table}' is empty: reset preferences or add at least one entry")]
    EmptyPreferences { table: String },

    #[error("invalid project type '{0}': expected webapp, api, mobile, desktop, ai or custom")]
    InvalidProjectType(String),

    #[error("invalid device '{0}': expected web, mobile or desktop")]
    InvalidDevice(String),

    #[error("invalid category: {0}")]
    InvalidCategory(String),

    #[error("invalid config: {0}")]
    Config(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),
}

pub type Result<T> = std::result::Result<T, AdvisorError>;
