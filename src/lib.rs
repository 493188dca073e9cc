#[cfg(feature = "data")]
pub mod db;
#[cfg(feature = "data")]
pub mod domain;
#[cfg(feature = "data")]
pub mod models;
#[cfg(feature = "data")]
pub mod pagination;
#[cfg(feature = "data")]
pub mod repository;
#[cfg(feature = "data")]
pub mod schema;

#[cfg(feature = "server")]
pub mod admission;
#[cfg(feature = "server")]
pub mod dto;
#[cfg(feature = "server")]
pub mod forms;
#[cfg(feature = "server")]
pub mod lifecycle;
#[cfg(feature = "server")]
pub mod middleware;
#[cfg(feature = "server")]
pub mod renderer;
#[cfg(feature = "server")]
pub mod routes;
#[cfg(feature = "server")]
pub mod services;

#[cfg(feature = "server")]
pub use server::run;

#[cfg(feature = "server")]
mod server {
    use actix_files::Files;
    use actix_web::cookie::Key;
    use actix_web::middleware::{Logger, from_fn};
    use actix_web::{App, HttpServer, web};
    use actix_web_flash_messages::{FlashMessagesFramework, storage::CookieMessageStore};

    use crate::admission::TokenBucket;
    use crate::db::establish_connection_pool;
    use crate::lifecycle::{self, DrainOutcome, Lifecycle};
    use crate::middleware::{admission_gate, track_in_flight};
    use crate::models::config::ServerConfig;
    use crate::renderer::Renderer;
    use crate::repository::DieselRepository;
    use crate::routes;

    /// Builds and runs the Actix-Web HTTP server until a termination signal
    /// arrives, then drains in-flight requests and reports how the drain ended.
    pub async fn run(server_config: ServerConfig) -> std::io::Result<DrainOutcome> {
        // Establish Diesel connection pool for the SQLite database.
        let pool = establish_connection_pool(&server_config.database_url).map_err(|e| {
            std::io::Error::other(format!("Failed to establish database connection: {e}"))
        })?;

        let repo = web::Data::new(DieselRepository::new(pool));

        let secret_key = Key::try_from(server_config.secret.as_bytes())
            .map_err(|e| std::io::Error::other(format!("Invalid secret key: {e}")))?;
        let message_store = CookieMessageStore::builder(secret_key).build();
        let message_framework = FlashMessagesFramework::builder(message_store).build();

        let renderer = Renderer::new(&server_config.templates_dir)
            .map_err(|e| std::io::Error::other(format!("Template parsing error(s): {e}")))?;
        let renderer = web::Data::new(renderer);
        #[cfg(unix)]
        actix_web::rt::spawn(crate::renderer::reload_on_hangup(
            renderer.clone().into_inner(),
        ));

        let bucket = web::Data::new(TokenBucket::new(
            server_config.rate_limit.burst,
            server_config.rate_limit.per_second,
        ));
        let lifecycle = web::Data::new(Lifecycle::new(server_config.drain_timeout()));

        let bind_address = (server_config.address.clone(), server_config.port);
        let assets_dir = server_config.assets_dir.clone();

        let server = {
            let lifecycle = lifecycle.clone();
            HttpServer::new(move || {
                App::new()
                    .wrap(message_framework.clone())
                    .wrap(from_fn(track_in_flight))
                    .wrap(Logger::default())
                    .app_data(repo.clone())
                    .app_data(renderer.clone())
                    .app_data(bucket.clone())
                    .app_data(lifecycle.clone())
                    .service(Files::new("/assets", &assets_dir))
                    .service(
                        web::scope("")
                            .wrap(from_fn(admission_gate))
                            .configure(routes::configure),
                    )
            })
            .disable_signals()
            .shutdown_timeout(server_config.drain_timeout_secs)
            .bind(&bind_address)?
            .run()
        };

        log::info!("Listening on {}:{}", bind_address.0, bind_address.1);

        let handle = server.handle();
        let mut server_task = actix_web::rt::spawn(server);

        tokio::select! {
            () = lifecycle::wait_for_termination() => {}
            joined = &mut server_task => {
                return match joined {
                    Ok(Ok(())) => Err(std::io::Error::other("Server stopped unexpectedly")),
                    Ok(Err(e)) => Err(e),
                    Err(e) => Err(std::io::Error::other(e)),
                };
            }
        }

        lifecycle.begin_drain();
        // Stops the listeners right away; workers keep serving accepted requests.
        let stopping = handle.stop(true);

        let outcome = lifecycle.drain().await;
        match outcome {
            DrainOutcome::Clean => {
                log::info!("All in-flight requests finished");
                stopping.await;
            }
            DrainOutcome::Forced { abandoned } => {
                log::error!("Drain timed out, abandoning {abandoned} in-flight request(s)");
                handle.stop(false).await;
            }
        }

        if let Err(e) = server_task.await {
            log::error!("Server task failed during shutdown: {e}");
        }

        Ok(outcome)
    }
}
