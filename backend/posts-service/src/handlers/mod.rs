/// HTTP request handlers
pub mod posts;

pub use posts::{create_post, fetch_posts, update_post};

use crate::middleware::JwtAuthMiddleware;
use actix_web::web;

/// Register the authenticated posts routes.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/posts")
            .wrap(JwtAuthMiddleware)
            .route("", web::post().to(posts::create_post))
            .route("", web::get().to(posts::fetch_posts))
            .route("/{post_id}", web::patch().to(posts::update_post)),
    );
}
