pub mod config;
pub mod db;
pub mod entities;
pub mod error;
pub mod forms;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod services;
pub mod utils;
pub mod views;

use std::sync::Arc;

use minijinja::Environment;
use sea_orm::DatabaseConnection;

pub use config::Config;
pub use error::{AppError, AppResult};

#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub config: Config,
    pub templates: Arc<Environment<'static>>,
}

impl AppState {
    pub fn new(db: DatabaseConnection, config: Config) -> AppResult<Self> {
        Ok(Self {
            db,
            config,
            templates: Arc::new(views::build_environment()?),
        })
    }
}
