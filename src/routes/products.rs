use std::collections::HashMap;

use actix_web::{HttpResponse, get, web};
use actix_web_flash_messages::IncomingFlashMessages;

use crate::renderer::Renderer;
use crate::repository::DieselRepository;
use crate::routes::{base_context, render_service_error, render_template};
use crate::services::products as products_service;

/// Filtered, sorted and paginated catalog listing.
#[get("/products")]
pub async fn show_products(
    params: web::Query<HashMap<String, String>>,
    repo: web::Data<DieselRepository>,
    renderer: web::Data<Renderer>,
    flash_messages: IncomingFlashMessages,
) -> HttpResponse {
    match products_service::list_products(repo.get_ref(), &params) {
        Ok(data) => {
            let mut context = base_context(&flash_messages, "products");
            context.insert("books", &data.books.items);
            context.insert("pagination", &data.books.pagination);
            context.insert("sort_by", &data.sort.as_param());
            context.insert("filter_query", &data.filter_query);
            render_template(&renderer, "products/index.html", &context)
        }
        Err(err) => render_service_error(&renderer, &err),
    }
}
