use axum::{
    Router,
    routing::{get, post},
};
use storage::Database;

use super::handlers::{create_training_center, get_training_center, list_training_centers};

pub fn routes() -> Router<Database> {
    Router::new()
        .route("/", post(create_training_center))
        .route("/", get(list_training_centers))
        .route("/:id", get(get_training_center))
}
