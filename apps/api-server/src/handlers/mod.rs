//! HTTP handlers and route configuration.

mod health;
mod posts;

use actix_web::web;

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .route("/health", web::get().to(health::health_check))
            .service(
                web::scope("/posts")
                    .route("", web::get().to(posts::list_posts))
                    .route("", web::post().to(posts::create_post))
                    .route("/slug/preview", web::get().to(posts::preview_slug))
                    .route("/{slug}", web::get().to(posts::get_post))
                    .route("/{slug}", web::put().to(posts::update_post))
                    .route("/{slug}", web::delete().to(posts::delete_post)),
            ),
    );
}
