use dotenvy::dotenv;
use serde::Deserialize;
use std::env;

#[derive(Deserialize, Debug, Clone)]
pub struct Config {
    pub db_url: String,
    pub app_name: String,
    pub deployment: String,
    pub host: String,
    pub port: u16,
    pub cors_origins: Vec<String>,
    /// Exposes `GET /biosamples/generate/{n}`, a development aid
    pub enable_sample_generator: bool,
}

impl Config {
    pub fn from_env() -> Self {
        dotenv().ok(); // Load from .env file if available
        let db_url = env::var("DB_URL").ok().unwrap_or_else(|| {
            if let Ok(user) = env::var("DB_USER") {
                format!(
                    "{}://{}:{}@{}:{}/{}",
                    env::var("DB_PREFIX").unwrap_or_else(|_| "postgresql".to_string()),
                    user,
                    env::var("DB_PASSWORD").unwrap_or_default(),
                    env::var("DB_HOST").unwrap_or_else(|_| "localhost".to_string()),
                    env::var("DB_PORT").unwrap_or_else(|_| "5432".to_string()),
                    env::var("DB_NAME").unwrap_or_else(|_| "biosample".to_string()),
                )
            } else {
                "sqlite://biosample.db?mode=rwc".to_string()
            }
        });

        Config {
            app_name: env::var("APP_NAME").unwrap_or_else(|_| "biosample-api".to_string()),
            deployment: env::var("DEPLOYMENT").unwrap_or_else(|_| "local".to_string()),
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("PORT")
                .ok()
                .and_then(|port| port.parse().ok())
                .unwrap_or(8000),
            cors_origins: parse_origins(
                &env::var("CORS_ORIGINS").unwrap_or_else(|_| "http://localhost:5173".to_string()),
            ),
            enable_sample_generator: env::var("ENABLE_SAMPLE_GENERATOR")
                .is_ok_and(|value| parse_flag(&value)),
            db_url,
        }
    }

    #[cfg(test)]
    pub fn for_tests() -> Self {
        Config {
            db_url: "sqlite::memory:".to_string(),
            app_name: "biosample-api-test".to_string(),
            deployment: "test".to_string(),
            host: "127.0.0.1".to_string(),
            port: 0,
            cors_origins: vec!["http://localhost:5173".to_string()],
            enable_sample_generator: true,
        }
    }
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(ToString::to_string)
        .collect()
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

#[cfg(test)]
pub mod test_helpers {
    use super::Config;
    use crate::routes::build_router;
    use axum::Router;
    use migration::{Migrator, MigratorTrait};
    use sea_orm::{ConnectOptions, Database, DatabaseConnection};

    /// Fresh in-memory database with the schema in place. A single pooled
    /// connection keeps every query on the same `SQLite` memory store.
    pub async fn setup_test_db() -> DatabaseConnection {
        let mut options = ConnectOptions::new(Config::for_tests().db_url);
        options
            .max_connections(1)
            .min_connections(1)
            .sqlx_logging(false);

        let db = Database::connect(options)
            .await
            .expect("Failed to connect to test database");

        Migrator::up(&db, None)
            .await
            .expect("Failed to run database migrations");

        db
    }

    pub async fn setup_test_app() -> Router {
        setup_test_app_with_db().await.0
    }

    /// Router plus a handle on its database, for assertions that bypass HTTP
    pub async fn setup_test_app_with_db() -> (Router, DatabaseConnection) {
        let db = setup_test_db().await;
        let router = build_router(&db, &Config::for_tests());
        (router, db)
    }
}
