//! Catalog read handlers.

use actix_web::{HttpResponse, web};

use cinegate_shared::dto::{LanguageQuery, SearchQuery};

use crate::middleware::actor::OptionalActor;
use crate::middleware::error::AppResult;
use crate::state::AppState;

/// GET /api/movies/popular
pub async fn popular(
    state: web::Data<AppState>,
    query: web::Query<LanguageQuery>,
) -> AppResult<HttpResponse> {
    let items = state.catalog.popular(query.language.as_deref()).await?;
    Ok(HttpResponse::Ok().json(items))
}

/// GET /api/movies/now-playing
pub async fn now_playing(
    state: web::Data<AppState>,
    query: web::Query<LanguageQuery>,
) -> AppResult<HttpResponse> {
    let items = state.catalog.now_playing(query.language.as_deref()).await?;
    Ok(HttpResponse::Ok().json(items))
}

/// GET /api/movies/search?query=
pub async fn search(
    state: web::Data<AppState>,
    query: web::Query<SearchQuery>,
) -> AppResult<HttpResponse> {
    let text = query.query.as_deref().unwrap_or_default();
    let items = state
        .catalog
        .search(text, query.language.as_deref())
        .await?;
    Ok(HttpResponse::Ok().json(items))
}

/// GET /api/movies/{id}
pub async fn details(
    state: web::Data<AppState>,
    id: web::Path<u64>,
    query: web::Query<LanguageQuery>,
    actor: OptionalActor,
) -> AppResult<HttpResponse> {
    let details = state
        .catalog
        .details(id.into_inner(), query.language.as_deref(), actor.0)
        .await?;
    Ok(HttpResponse::Ok().json(details))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use actix_web::http::StatusCode;
    use actix_web::{App, test};
    use serde_json::{Value, json};
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use cinegate_core::CatalogService;
    use cinegate_infra::{
        ChannelViewNotifier, InMemoryCache, InMemoryPubSub, TmdbClient, TmdbConfig,
        ViewNotifierConfig,
    };

    use crate::handlers::configure_routes;
    use crate::middleware::actor::ACTOR_ID_HEADER;
    use crate::state::AppState;

    fn state(server: &MockServer) -> AppState {
        let provider = TmdbClient::new(TmdbConfig::new(server.uri(), "test-key")).unwrap();
        let notifier = ChannelViewNotifier::new(
            Arc::new(InMemoryPubSub::default()),
            ViewNotifierConfig::default(),
        );
        AppState {
            catalog: Arc::new(CatalogService::new(
                Arc::new(InMemoryCache::new()),
                Arc::new(provider),
                Arc::new(notifier),
            )),
        }
    }

    macro_rules! app {
        ($server:expr) => {
            test::init_service(
                App::new()
                    .app_data(actix_web::web::Data::new(state($server)))
                    .configure(configure_routes),
            )
            .await
        };
    }

    #[actix_web::test]
    async fn test_details_returns_normalized_item() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/movie/550"))
            .and(query_param("language", "en-US"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": 550,
                "title": "Fight Club",
                "poster_path": "/p.jpg",
                "backdrop_path": null,
                "genres": [{"id": 18, "name": "Drama"}],
                "runtime": 139
            })))
            .expect(1)
            .mount(&server)
            .await;

        let app = app!(&server);
        let req = test::TestRequest::get()
            .uri("/api/movies/550?language=en-US")
            .insert_header((ACTOR_ID_HEADER, "42"))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::OK);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["title"], "Fight Club");
        assert_eq!(body["poster_path"], "https://image.tmdb.org/t/p/w500/p.jpg");
        assert_eq!(body["backdrop_path"], Value::Null);
        assert_eq!(body["genres"][0]["name"], "Drama");
    }

    #[actix_web::test]
    async fn test_popular_route_is_not_taken_as_id() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/movie/popular"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "page": 1,
                "results": [{"id": 1, "title": "Dune"}],
                "total_pages": 1,
                "total_results": 1
            })))
            .mount(&server)
            .await;

        let app = app!(&server);
        let req = test::TestRequest::get()
            .uri("/api/movies/popular")
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::OK);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body[0]["title"], "Dune");
    }

    #[actix_web::test]
    async fn test_upstream_not_found_maps_to_404() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/movie/999999"))
            .respond_with(ResponseTemplate::new(404).set_body_json(json!({
                "status_code": 34,
                "status_message": "The resource you requested could not be found."
            })))
            .mount(&server)
            .await;

        let app = app!(&server);
        let req = test::TestRequest::get()
            .uri("/api/movies/999999")
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["status"], 404);
    }

    #[actix_web::test]
    async fn test_upstream_rate_limit_maps_to_429() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/movie/now_playing"))
            .respond_with(ResponseTemplate::new(429))
            .mount(&server)
            .await;

        let app = app!(&server);
        let req = test::TestRequest::get()
            .uri("/api/movies/now-playing")
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::TOO_MANY_REQUESTS);
    }

    #[actix_web::test]
    async fn test_search_rejects_missing_or_blank_query() {
        let server = MockServer::start().await;
        let app = app!(&server);

        let req = test::TestRequest::get()
            .uri("/api/movies/search")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["type"], "about:blank");
        assert_eq!(body["status"], 400);
        assert_eq!(body["title"], "Bad Request");

        let req = test::TestRequest::get()
            .uri("/api/movies/search?query=%20%20")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        assert!(server.received_requests().await.unwrap_or_default().is_empty());
    }
}
