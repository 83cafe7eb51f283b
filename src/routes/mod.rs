//! HTTP handlers of the order back office.

use actix_web::HttpResponse;
use serde_json::json;

use crate::services::ServiceError;

pub mod orders;

/// Maps a service failure onto a JSON response.
fn error_response(err: ServiceError, action: &str) -> HttpResponse {
    match err {
        ServiceError::Unauthorized => {
            HttpResponse::Unauthorized().json(json!({"error": "Недостаточно прав."}))
        }
        ServiceError::NotFound => {
            HttpResponse::NotFound().json(json!({"error": "Заказ не найден."}))
        }
        ServiceError::Form(message) => HttpResponse::BadRequest().json(json!({"error": message})),
        err => {
            log::error!("Failed to {action}: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}
