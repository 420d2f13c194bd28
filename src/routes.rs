use crate::common::state::AppState;
use crate::config::Config;
use crate::{biosamples, comments, operators, sample_types};
use axum::Router;
use axum::http::{HeaderValue, Method, header::CONTENT_TYPE};
use sea_orm::DatabaseConnection;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_axum::router::OpenApiRouter;
use utoipa_scalar::{Scalar, Servable};

pub fn build_router(db: &DatabaseConnection, config: &Config) -> Router {
    #[derive(OpenApi)]
    #[openapi(
        info(
            title = "BioSample API",
            description = "Biosamples, their comments, and the operator and sample type vocabularies"
        ),
        tags(
            (name = "biosamples", description = "Biosample lifecycle"),
            (name = "comments", description = "Comments attached to biosamples"),
            (name = "operators", description = "Operator vocabulary"),
            (name = "sample-types", description = "Sample type vocabulary"),
        )
    )]
    struct ApiDoc;

    let app_state: AppState = AppState::new(db.clone(), config.clone());

    let (router, api) = OpenApiRouter::with_openapi(ApiDoc::openapi())
        .merge(crate::common::views::router(&app_state))
        .merge(biosamples::views::router(&app_state))
        .merge(comments::views::router(&app_state))
        .merge(operators::views::router(&app_state))
        .merge(sample_types::views::router(&app_state))
        .split_for_parts();

    router
        .merge(Scalar::with_url("/api/docs", api))
        .layer(cors_layer(config))
        .layer(TraceLayer::new_for_http())
}

fn cors_layer(config: &Config) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([CONTENT_TYPE]);

    // Browsers refuse credentials together with a wildcard origin
    if config.cors_origins.iter().any(|origin| origin == "*") {
        tracing::warn!("CORS allows any origin, credentials disabled");
        return layer.allow_origin(AllowOrigin::any());
    }

    let origins: Vec<HeaderValue> = config
        .cors_origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(%origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    layer
        .allow_origin(AllowOrigin::list(origins))
        .allow_credentials(true)
}

#[cfg(test)]
mod tests {
    use super::build_router;
    use crate::config::Config;
    use crate::config::test_helpers::{setup_test_app, setup_test_db};
    use crate::test_helpers::{extract_response_body, send};
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use rstest::rstest;
    use tower::ServiceExt;

    #[tokio::test]
    async fn test_cors_preflight_allows_frontend_origin() {
        let app = setup_test_app().await;

        let response = app
            .oneshot(
                Request::builder()
                    .method("OPTIONS")
                    .uri("/biosamples/")
                    .header("origin", "http://localhost:5173")
                    .header("access-control-request-method", "POST")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert!(response.status().is_success());
        assert_eq!(
            response
                .headers()
                .get("access-control-allow-origin")
                .and_then(|value| value.to_str().ok()),
            Some("http://localhost:5173")
        );
    }

    #[tokio::test]
    async fn test_openapi_document_lists_endpoints() {
        let app = setup_test_app().await;

        let response = app
            .oneshot(
                Request::builder()
                    .method("GET")
                    .uri("/api/docs")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        let (status, _) = extract_response_body(response).await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_unknown_route_is_not_found() {
        let app = setup_test_app().await;

        let response = app
            .oneshot(
                Request::builder()
                    .method("GET")
                    .uri("/does-not-exist")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_cors_wildcard_allows_any_origin() {
        let db = setup_test_db().await;
        let config = Config {
            cors_origins: vec!["*".to_string()],
            ..Config::for_tests()
        };
        let app = build_router(&db, &config);

        let response = app
            .oneshot(
                Request::builder()
                    .method("OPTIONS")
                    .uri("/biosamples/")
                    .header("origin", "http://elsewhere.test")
                    .header("access-control-request-method", "GET")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert!(response.status().is_success());
        let headers = response.headers();
        assert_eq!(
            headers
                .get("access-control-allow-origin")
                .and_then(|value| value.to_str().ok()),
            Some("*")
        );
        assert!(headers.get("access-control-allow-credentials").is_none());
    }

    #[rstest]
    #[case("/biosamples")]
    #[case("/biosamples/")]
    #[case("/operators")]
    #[case("/operators/")]
    #[case("/sample-types")]
    #[case("/sample-types/")]
    #[tokio::test]
    async fn test_collections_answer_with_and_without_trailing_slash(#[case] uri: &str) {
        let app = setup_test_app().await;

        let (status, body) = send(&app, "GET", uri, None).await;
        assert_eq!(status, StatusCode::OK, "Unexpected body for {uri}: {body:?}");
    }

    #[tokio::test]
    async fn test_create_without_trailing_slash() {
        let app = setup_test_app().await;

        let (status, body) = send(
            &app,
            "POST",
            "/biosamples",
            Some(serde_json::json!({
                "location": "Rome",
                "samplingDate": "2025-05-20",
                "operatorName": "Mario",
                "sampleTypeName": "water",
            })),
        )
        .await;
        assert_eq!(status, StatusCode::OK, "Unexpected body: {body:?}");

        let (_, page) = send(&app, "GET", "/biosamples", None).await;
        assert_eq!(page["totalCount"], 1);
        assert_eq!(page["results"][0]["operatorName"], "mario");
    }
}
