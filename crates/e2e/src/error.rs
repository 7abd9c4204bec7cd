//! Error types for the stub browser

use thiserror::Error;

#[derive(Error, Debug)]
pub enum BrowsingError {
    #[error("No page is open")]
    NoPageOpen,

    #[error("Page not served: {0}")]
    PageNotServed(String),

    #[error("Target not found: {target} on {url}")]
    TargetNotFound { target: String, url: String },

    #[error("Target not interactable: {0}")]
    NotInteractable(String),

    #[error("No target given for: {0}")]
    NoTarget(String),

    #[error("Nothing to type into {0}")]
    NothingToType(String),

    #[error("Site fixture parse error: {0}")]
    SiteParse(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

pub type BrowsingResult<T> = Result<T, BrowsingError>;
