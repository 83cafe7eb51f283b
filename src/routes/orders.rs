//! JSON handlers for the admin order list and order edit form.

use actix_web::{HttpResponse, Responder, get, post, web};

use crate::forms::orders::{OrderSyncForm, OrdersQuery, SaveOrderForm};
use crate::models::auth::AuthenticatedUser;
use crate::repository::DieselRepository;
use crate::routes::error_response;
use crate::services::orders as orders_service;

#[get("/orders")]
pub async fn list_orders(
    params: web::Query<OrdersQuery>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match orders_service::list_orders(repo.get_ref(), &user, params.into_inner()) {
        Ok(data) => HttpResponse::Ok().json(data),
        Err(err) => error_response(err, "list orders"),
    }
}

#[get("/orders/{order_id}")]
pub async fn show_order(
    order_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match orders_service::load_order(repo.get_ref(), &user, order_id.into_inner()) {
        Ok(data) => HttpResponse::Ok().json(data),
        Err(err) => error_response(err, "load order"),
    }
}

/// Called by the edit form after every field change.
#[post("/orders/{order_id}/sync")]
pub async fn sync_order(
    order_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Json(form): web::Json<OrderSyncForm>,
) -> impl Responder {
    match orders_service::sync_order_draft(repo.get_ref(), &user, order_id.into_inner(), form) {
        Ok(outcome) => HttpResponse::Ok().json(outcome),
        Err(err) => error_response(err, "sync order draft"),
    }
}

#[post("/orders/{order_id}")]
pub async fn save_order(
    order_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Json(form): web::Json<SaveOrderForm>,
) -> impl Responder {
    match orders_service::save_order(repo.get_ref(), &user, order_id.into_inner(), form) {
        Ok(outcome) => HttpResponse::Ok().json(outcome),
        Err(err) => error_response(err, "save order"),
    }
}
