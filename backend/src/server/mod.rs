//! Server construction and middleware wiring.

mod config;

pub use config::ServerConfig;

use std::sync::Arc;

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};
#[cfg(feature = "metrics")]
use actix_web_prom::{PrometheusMetrics, PrometheusMetricsBuilder};
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

#[cfg(debug_assertions)]
use crate::doc::ApiDoc;
use crate::domain::ports::{FeedbackRepository, FixtureFeedbackRepository};
use crate::inbound::http::error::json_error_handler;
use crate::inbound::http::feedback::{
    create_feedback, delete_feedback, get_feedback, list_feedback, update_feedback,
};
use crate::inbound::http::health::{HealthState, live, ready};
use crate::inbound::http::state::HttpState;
use crate::outbound::persistence::DieselFeedbackRepository;

/// Choose the repository implementation for the configured storage.
///
/// A configured pool selects the PostgreSQL adapter; without one the server
/// runs against the in-memory fixture so local smoke runs work without a
/// database.
fn build_http_state(config: &ServerConfig) -> web::Data<HttpState> {
    let repository: Arc<dyn FeedbackRepository> = match &config.db_pool {
        Some(pool) => Arc::new(DieselFeedbackRepository::new(pool.clone())),
        None => Arc::new(FixtureFeedbackRepository::default()),
    };
    web::Data::new(HttpState::new(repository))
}

#[derive(Clone)]
struct AppDependencies {
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
}

fn build_app(
    deps: AppDependencies,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let AppDependencies {
        health_state,
        http_state,
    } = deps;

    let api = web::scope("/api")
        .service(create_feedback)
        .service(list_feedback)
        .service(get_feedback)
        .service(update_feedback)
        .service(delete_feedback);

    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .service(api)
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));
    #[cfg(not(debug_assertions))]
    let app = app;

    app
}

#[cfg(feature = "metrics")]
fn build_metrics() -> std::io::Result<PrometheusMetrics> {
    PrometheusMetricsBuilder::new("feedback")
        .endpoint("/metrics")
        .build()
        .map_err(|err| std::io::Error::other(format!("configure Prometheus metrics: {err}")))
}

/// Construct an Actix HTTP server using the provided health state and
/// configuration.
///
/// # Parameters
/// - `health_state`: shared readiness state, marked ready once the server is
///   initialised.
/// - `config`: pre-built [`ServerConfig`] with binding and storage settings.
///
/// # Returns
/// A spawned [`Server`] that must be awaited to drive the listener.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket or starting the
/// server fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let server_health_state = health_state.clone();
    let http_state = build_http_state(&config);

    #[cfg(feature = "metrics")]
    let prometheus = build_metrics()?;

    let server = HttpServer::new(move || {
        let app = build_app(AppDependencies {
            health_state: server_health_state.clone(),
            http_state: http_state.clone(),
        });

        #[cfg(feature = "metrics")]
        let app = app.wrap(prometheus.clone());

        app
    })
    .bind(config.bind_addr)?
    .run();

    health_state.mark_ready();
    Ok(server)
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;
    use actix_web::test as actix_test;
    use serde_json::Value;

    fn fixture_dependencies() -> AppDependencies {
        let health_state = web::Data::new(HealthState::new());
        health_state.mark_ready();
        AppDependencies {
            health_state,
            http_state: web::Data::new(HttpState::new(Arc::new(
                FixtureFeedbackRepository::default(),
            ))),
        }
    }

    #[actix_web::test]
    async fn built_app_serves_health_probes() {
        let app = actix_test::init_service(build_app(fixture_dependencies())).await;

        for uri in ["/health/ready", "/health/live"] {
            let request = actix_test::TestRequest::get().uri(uri).to_request();
            let response = actix_test::call_service(&app, request).await;
            assert_eq!(response.status(), StatusCode::OK, "probe {uri}");
        }
    }

    #[actix_web::test]
    async fn built_app_serves_the_feedback_api() {
        let app = actix_test::init_service(build_app(fixture_dependencies())).await;

        let request = actix_test::TestRequest::get().uri("/api").to_request();
        let response = actix_test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::OK);

        let body: Value = actix_test::read_body_json(response).await;
        assert_eq!(body.get("data"), Some(&serde_json::json!([])));
    }
}
