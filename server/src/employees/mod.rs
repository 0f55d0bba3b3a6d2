//! Employee resource: wire models, link assembly, controller and routes.

mod assembler;
mod controller;
mod extract;
mod handler;
mod model;

use axum::{Router, http::Method, routing::get};

pub use assembler::EmployeeModelAssembler;
pub use controller::EmployeeController;

use assembler::{COLLECTION_PATH, ITEM_PATH};

use crate::http::{AppState, method_not_allowed};

const COLLECTION_METHODS: &str = "GET, HEAD, POST";
const ITEM_METHODS: &str = "GET, HEAD, PUT, DELETE";

/// Route table for the employee resource. Unsupported methods on a known path
/// answer 405.
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            COLLECTION_PATH,
            get(handler::all)
                .post(handler::create)
                .fallback(|method: Method| method_not_allowed(method, COLLECTION_METHODS)),
        )
        .route(
            ITEM_PATH,
            get(handler::one)
                .put(handler::replace)
                .delete(handler::delete)
                .fallback(|method: Method| method_not_allowed(method, ITEM_METHODS)),
        )
}
