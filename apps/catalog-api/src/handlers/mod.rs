//! HTTP handlers and route configuration.

mod movies;

use actix_web::web;

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api").service(
            web::scope("/movies")
                // Fixed segments first so they never match `{id}`
                .route("/popular", web::get().to(movies::popular))
                .route("/now-playing", web::get().to(movies::now_playing))
                .route("/search", web::get().to(movies::search))
                .route("/{id}", web::get().to(movies::details)),
        ),
    );
}
