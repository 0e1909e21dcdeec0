use std::env;

#[derive(Clone, Debug)]
pub struct Config {
    pub database_url: String,
    pub db_max_connections: u32,
    pub server_host: String,
    pub server_port: u16,
    pub rate_limit_period_ms: u64,
    pub rate_limit_burst: u32,
    pub secret_key: String,
    pub csrf_time_limit_secs: i64,
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        Self {
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| "sqlite://cafes.db?mode=rwc".to_string()),
            db_max_connections: env::var("DB_MAX_CONNECTIONS")
                .unwrap_or_else(|_| "5".to_string())
                .parse()
                .expect("DB_MAX_CONNECTIONS must be a number"),
            server_host: env::var("SERVER_HOST")
                .unwrap_or_else(|_| "0.0.0.0".to_string()),
            server_port: env::var("SERVER_PORT")
                .unwrap_or_else(|_| "5000".to_string())
                .parse()
                .expect("SERVER_PORT must be a number"),
            rate_limit_period_ms: env::var("RATE_LIMIT_PERIOD_MS")
                .unwrap_or_else(|_| "60".to_string())
                .parse()
                .expect("RATE_LIMIT_PERIOD_MS must be a number"),
            rate_limit_burst: env::var("RATE_LIMIT_BURST")
                .unwrap_or_else(|_| "1000".to_string())
                .parse()
                .expect("RATE_LIMIT_BURST must be a number"),
            secret_key: env::var("SECRET_KEY")
                .expect("SECRET_KEY must be set"),
            csrf_time_limit_secs: env::var("CSRF_TIME_LIMIT_SECS")
                .unwrap_or_else(|_| "3600".to_string())
                .parse()
                .expect("CSRF_TIME_LIMIT_SECS must be a number"),
        }
    }

    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_url: "sqlite::memory:".to_string(),
            db_max_connections: 1,
            server_host: "127.0.0.1".to_string(),
            server_port: 5000,
            rate_limit_period_ms: 60,
            rate_limit_burst: 1000,
            secret_key: "test-secret-key".to_string(),
            csrf_time_limit_secs: 3600,
        }
    }
}
