use actix_web::{HttpResponse, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};

use crate::forms::auth::CredentialsForm;
use crate::renderer::Renderer;
use crate::repository::DieselRepository;
use crate::routes::{base_context, redirect, render_service_error, render_template};
use crate::services::auth as auth_service;

#[get("/signup")]
pub async fn show_signup(
    renderer: web::Data<Renderer>,
    flash_messages: IncomingFlashMessages,
) -> HttpResponse {
    let context = base_context(&flash_messages, "signup");
    render_template(&renderer, "auth/signup.html", &context)
}

#[post("/signup")]
pub async fn signup(
    repo: web::Data<DieselRepository>,
    renderer: web::Data<Renderer>,
    web::Form(form): web::Form<CredentialsForm>,
) -> HttpResponse {
    match auth_service::signup(repo.get_ref(), form) {
        Ok(user) => {
            FlashMessage::success(format!("Welcome, {}.", user.username)).send();
            redirect("/products")
        }
        Err(err) => render_service_error(&renderer, &err),
    }
}

#[get("/login")]
pub async fn show_login(
    renderer: web::Data<Renderer>,
    flash_messages: IncomingFlashMessages,
) -> HttpResponse {
    let context = base_context(&flash_messages, "login");
    render_template(&renderer, "auth/login.html", &context)
}

/// Verifies the credentials only; no session is issued.
#[post("/login")]
pub async fn login(
    repo: web::Data<DieselRepository>,
    renderer: web::Data<Renderer>,
    web::Form(form): web::Form<CredentialsForm>,
) -> HttpResponse {
    match auth_service::login(repo.get_ref(), form) {
        Ok(user) => {
            log::info!("User {} signed in", user.username);
            FlashMessage::success(format!("Signed in as {}.", user.username)).send();
            redirect("/products")
        }
        Err(err) => render_service_error(&renderer, &err),
    }
}
