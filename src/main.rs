use std::env;
use std::process::ExitCode;

use bookstore_catalog::lifecycle::exit_code;
use bookstore_catalog::models::config::ServerConfig;
use config::{Config, ConfigError, Environment, File};
use dotenvy::dotenv;

fn load_config() -> Result<ServerConfig, ConfigError> {
    // Select config profile (defaults to `local`).
    let app_env = env::var("APP_ENV").unwrap_or_else(|_| "local".into());

    Config::builder()
        .add_source(File::with_name("config/default"))
        .add_source(File::with_name(&format!("config/{app_env}")).required(false))
        // e.g. `APP_PORT=9000`, `APP_RATE_LIMIT__BURST=10`
        .add_source(
            Environment::with_prefix("APP")
                .prefix_separator("_")
                .separator("__"),
        )
        .build()?
        .try_deserialize()
}

#[actix_web::main]
async fn main() -> ExitCode {
    dotenv().ok(); // Load .env file
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let server_config = match load_config() {
        Ok(server_config) => server_config,
        Err(err) => {
            log::error!("Error loading server config: {err}");
            return ExitCode::FAILURE;
        }
    };

    exit_code(&bookstore_catalog::run(server_config).await)
}
