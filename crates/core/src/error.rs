use thiserror::Error;

#[derive(Error, Debug)]
pub enum OncallError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("duty table not found: {0}")]
    TableNotFound(String),

    #[error("duty table is missing required columns [{}], found [{}]", missing.join(", "), present.join(", "))]
    MissingColumns {
        missing: Vec<String>,
        present: Vec<String>,
    },

    #[error("duty roster is empty")]
    EmptyRoster,

    #[error("roster has {actual} people, at least {required} required")]
    InsufficientRoster { required: usize, actual: usize },

    #[error("configuration error: {0}")]
    Config(String),

    #[error("{0}")]
    Other(String),
}
