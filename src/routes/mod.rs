//! HTTP handlers and the response helpers they share.

use actix_web::http::StatusCode;
use actix_web::http::header::{self, ContentType};
use actix_web::{HttpResponse, web};
use actix_web_flash_messages::{IncomingFlashMessages, Level};
use tera::Context;

use crate::renderer::Renderer;
use crate::repository::errors::RepositoryError;
use crate::services::ServiceError;

pub mod auth;
pub mod books;
pub mod products;

pub const ERROR_TEMPLATE: &str = "error.html";

/// Registers every rate-limited page of the application.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(books::show_index)
        .service(books::show_book)
        .service(books::save_book)
        .service(books::delete_book)
        .service(products::show_products)
        .service(auth::show_signup)
        .service(auth::signup)
        .service(auth::show_login)
        .service(auth::login);
}

pub fn alert_level_to_str(level: &Level) -> &'static str {
    match level {
        Level::Error => "danger",
        Level::Warning => "warning",
        Level::Success => "success",
        _ => "info",
    }
}

/// Context shared by every page: pending flash alerts and the active menu entry.
pub fn base_context(flash_messages: &IncomingFlashMessages, current_page: &str) -> Context {
    let alerts = flash_messages
        .iter()
        .map(|f| (f.content(), alert_level_to_str(&f.level())))
        .collect::<Vec<_>>();

    let mut context = Context::new();
    context.insert("alerts", &alerts);
    context.insert("current_page", current_page);
    context
}

pub fn redirect(location: &str) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, location))
        .finish()
}

pub fn render_template(renderer: &Renderer, template: &str, context: &Context) -> HttpResponse {
    match renderer.render(template, context) {
        Ok(body) => HttpResponse::Ok().content_type(ContentType::html()).body(body),
        Err(err) => {
            log::error!("Failed to render template '{template}': {err}");
            render_error_page(
                renderer,
                StatusCode::INTERNAL_SERVER_ERROR,
                "The page could not be rendered",
            )
        }
    }
}

/// Renders the error page, or a plain-text body if the error page itself
/// cannot be rendered.
pub fn render_error_page(renderer: &Renderer, status: StatusCode, message: &str) -> HttpResponse {
    let mut context = Context::new();
    context.insert("alerts", &Vec::<(String, String)>::new());
    context.insert("current_page", "error");
    context.insert("status", &status.as_u16());
    context.insert("reason", status.canonical_reason().unwrap_or_default());
    context.insert("message", message);

    match renderer.render(ERROR_TEMPLATE, &context) {
        Ok(body) => HttpResponse::build(status)
            .content_type(ContentType::html())
            .body(body),
        Err(err) => {
            log::error!("Failed to render the error page: {err}");
            HttpResponse::build(status)
                .content_type(ContentType::plaintext())
                .body(message.to_string())
        }
    }
}

/// Maps a service failure to its status code and renders it.
pub fn render_service_error(renderer: &Renderer, err: &ServiceError) -> HttpResponse {
    let (status, message) = match err {
        ServiceError::NotFound => (StatusCode::NOT_FOUND, "Not found".to_string()),
        ServiceError::Unauthorized => (
            StatusCode::UNAUTHORIZED,
            "Invalid username or password".to_string(),
        ),
        ServiceError::Form(err) => (StatusCode::BAD_REQUEST, err.to_string()),
        ServiceError::TypeConstraint(err) => (StatusCode::BAD_REQUEST, err.to_string()),
        ServiceError::Repository(RepositoryError::ConstraintViolation(detail)) => {
            log::warn!("Rejected conflicting write: {detail}");
            (
                StatusCode::CONFLICT,
                "The entry conflicts with existing data".to_string(),
            )
        }
        ServiceError::Repository(err) => {
            log::error!("Catalog store failure: {err}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "The catalog is temporarily unavailable".to_string(),
            )
        }
        ServiceError::Internal(err) => {
            log::error!("Internal error: {err}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_string(),
            )
        }
    };

    render_error_page(renderer, status, &message)
}
