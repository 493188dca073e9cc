use actix_web::{HttpResponse, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};

use crate::dto::books::SaveOutcome;
use crate::forms::books::{BookIdQuery, DATE_FORMAT, SaveBookForm};
use crate::renderer::Renderer;
use crate::repository::DieselRepository;
use crate::routes::{base_context, redirect, render_service_error, render_template};
use crate::services::books as books_service;

#[get("/")]
pub async fn show_index(
    repo: web::Data<DieselRepository>,
    renderer: web::Data<Renderer>,
    flash_messages: IncomingFlashMessages,
) -> HttpResponse {
    match books_service::list_books(repo.get_ref()) {
        Ok(books) => {
            let mut context = base_context(&flash_messages, "index");
            context.insert("books", &books);
            render_template(&renderer, "books/index.html", &context)
        }
        Err(err) => render_service_error(&renderer, &err),
    }
}

#[get("/book")]
pub async fn show_book(
    query: web::Query<BookIdQuery>,
    repo: web::Data<DieselRepository>,
    renderer: web::Data<Renderer>,
    flash_messages: IncomingFlashMessages,
) -> HttpResponse {
    match books_service::load_book(repo.get_ref(), &query) {
        Ok(data) => {
            let mut context = base_context(&flash_messages, "book");
            context.insert("book", &data.book);
            context.insert(
                "publication_date",
                &data.publication_date.format(DATE_FORMAT).to_string(),
            );
            render_template(&renderer, "books/edit.html", &context)
        }
        Err(err) => render_service_error(&renderer, &err),
    }
}

#[post("/save")]
pub async fn save_book(
    repo: web::Data<DieselRepository>,
    renderer: web::Data<Renderer>,
    web::Form(form): web::Form<SaveBookForm>,
) -> HttpResponse {
    match books_service::save_book(repo.get_ref(), form) {
        Ok(SaveOutcome::Created) => {
            FlashMessage::success("Book added.").send();
            redirect("/")
        }
        Ok(SaveOutcome::Updated) => {
            FlashMessage::success("Book updated.").send();
            redirect("/")
        }
        Err(err) => render_service_error(&renderer, &err),
    }
}

#[get("/delete")]
pub async fn delete_book(
    query: web::Query<BookIdQuery>,
    repo: web::Data<DieselRepository>,
    renderer: web::Data<Renderer>,
) -> HttpResponse {
    match books_service::delete_book(repo.get_ref(), &query) {
        Ok(0) => {
            FlashMessage::info("Nothing to delete.").send();
            redirect("/")
        }
        Ok(_) => {
            FlashMessage::success("Book deleted.").send();
            redirect("/")
        }
        Err(err) => render_service_error(&renderer, &err),
    }
}
