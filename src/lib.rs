pub mod config;
pub mod core;
pub mod domain;
pub mod http;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::CliConfig;

pub use crate::config::{toml_config::TomlConfig, LogFormat, ServiceConfig};
pub use crate::core::{
    classifier::{ClassifierClient, HttpClassifier},
    review_service::ReviewService,
};
pub use crate::http::{router::Router, routes::build_router, server::HttpServer};
pub use crate::utils::error::{ReviewError, Result};
