//! Request-level gates wrapped around the application.
//!
//! [`track_in_flight`] registers every request with the [`Lifecycle`] and
//! refuses new work once draining has started. [`admission_gate`] spends one
//! token from the shared [`TokenBucket`] per request.

use actix_web::body::{EitherBody, MessageBody};
use actix_web::dev::{ServiceRequest, ServiceResponse};
use actix_web::middleware::Next;
use actix_web::{Error, HttpResponse, web};

use crate::admission::TokenBucket;
use crate::lifecycle::Lifecycle;

pub const RATE_LIMITED_MESSAGE: &str = "Rate limit exceeded";
pub const SHUTTING_DOWN_MESSAGE: &str = "Server is shutting down";

fn reject<B>(req: ServiceRequest, response: HttpResponse) -> ServiceResponse<EitherBody<B>> {
    req.into_response(response).map_into_right_body()
}

/// Counts the request as in flight until its response is produced.
pub async fn track_in_flight<B: MessageBody>(
    req: ServiceRequest,
    next: Next<B>,
) -> Result<ServiceResponse<EitherBody<B>>, Error> {
    let Some(lifecycle) = req.app_data::<web::Data<Lifecycle>>().cloned() else {
        log::error!("Lifecycle is not registered as app data");
        return Ok(reject(req, HttpResponse::InternalServerError().finish()));
    };

    let Some(_guard) = lifecycle.enter() else {
        log::debug!("Refusing {} {} while draining", req.method(), req.path());
        return Ok(reject(
            req,
            HttpResponse::ServiceUnavailable().body(SHUTTING_DOWN_MESSAGE),
        ));
    };

    next.call(req).await.map(ServiceResponse::map_into_left_body)
}

/// Rejects the request with `429 Too Many Requests` when the budget is spent.
pub async fn admission_gate<B: MessageBody>(
    req: ServiceRequest,
    next: Next<B>,
) -> Result<ServiceResponse<EitherBody<B>>, Error> {
    let Some(bucket) = req.app_data::<web::Data<TokenBucket>>().cloned() else {
        log::error!("Token bucket is not registered as app data");
        return Ok(reject(req, HttpResponse::InternalServerError().finish()));
    };

    if !bucket.try_admit() {
        log::debug!("Rate limited {} {}", req.method(), req.path());
        return Ok(reject(
            req,
            HttpResponse::TooManyRequests().body(RATE_LIMITED_MESSAGE),
        ));
    }

    next.call(req).await.map(ServiceResponse::map_into_left_body)
}
