use std::{
    net::{IpAddr, SocketAddr},
    sync::Arc,
};

use anyhow::Context;
use axum::{
    Json, Router,
    extract::State,
    http::{self, HeaderName, HeaderValue, Method, StatusCode, Uri, header},
    response::{IntoResponse, Response},
    routing::get,
};
use platform_api::{ApiError, FieldError, LinkBuilder};
use platform_db::{DbPool, SeaOrmEmployeeStore};
use sea_orm::{ConnectionTrait, Statement};
use serde::Serialize;
use tower::ServiceBuilder;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};
use tracing::{error, info};

use crate::{
    config::AppConfig,
    employees::{self, EmployeeController, EmployeeModelAssembler},
};

const HAL_JSON: &str = "application/hal+json";

#[derive(Clone)]
pub struct AppState {
    pub pool: DbPool,
    pub config: Arc<AppConfig>,
    pub employees: EmployeeController,
}

impl AppState {
    /// Wires the relational store and link assembler into the controller.
    pub fn new(pool: DbPool, config: Arc<AppConfig>) -> Self {
        let store = Arc::new(SeaOrmEmployeeStore::new(pool.clone()));
        let assembler =
            EmployeeModelAssembler::new(LinkBuilder::new(config.public_base_url.clone()));
        Self {
            pool,
            config,
            employees: EmployeeController::new(store, assembler),
        }
    }
}

#[derive(Clone, Debug)]
pub struct ServeConfig {
    addr: SocketAddr,
}

impl ServeConfig {
    pub fn new(host: IpAddr, port: u16) -> Self {
        Self {
            addr: SocketAddr::from((host, port)),
        }
    }
}

pub async fn serve(config: ServeConfig, state: AppState) -> anyhow::Result<()> {
    let router = build_router(state);
    let listener = tokio::net::TcpListener::bind(config.addr)
        .await
        .with_context(|| format!("failed to bind {}", config.addr))?;

    info!(%config.addr, "employee server listening");
    axum::serve(listener, router.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server error")?;
    Ok(())
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let allowed = origins
        .iter()
        .filter_map(|origin| origin.parse::<HeaderValue>().ok())
        .collect::<Vec<_>>();
    let allow_origin = if allowed.is_empty() {
        AllowOrigin::any()
    } else {
        AllowOrigin::list(allowed)
    };
    CorsLayer::new()
        .allow_headers([http::header::CONTENT_TYPE])
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .expose_headers([http::header::LOCATION])
        .allow_origin(allow_origin)
}

pub fn build_router(state: AppState) -> Router {
    let request_id = MakeRequestUuid;
    let header_name = HeaderName::from_static("x-request-id");
    Router::new()
        .route(
            "/health",
            get(health_handler)
                .fallback(|method: Method| method_not_allowed(method, "GET, HEAD")),
        )
        .merge(employees::router())
        .fallback(not_found)
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::new(header_name.clone(), request_id))
                .layer(PropagateRequestIdLayer::new(header_name))
                .layer(TraceLayer::new_for_http())
                .layer(cors_layer(&state.config.cors_allowed_origins)),
        )
        .with_state(state)
}

async fn health_handler(State(state): State<AppState>) -> impl IntoResponse {
    let backend = state.pool.get_database_backend();
    let db_ok = state
        .pool
        .execute(Statement::from_string(backend, "SELECT 1".to_string()))
        .await
        .is_ok();
    Json(HealthResponse {
        ok: db_ok,
        db_ok,
        version: env!("CARGO_PKG_VERSION"),
    })
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct HealthResponse {
    ok: bool,
    db_ok: bool,
    version: &'static str,
}

/// 405 for a routed path, advertising the methods it does serve in `Allow`.
pub async fn method_not_allowed(method: Method, allow: &'static str) -> HttpError {
    let mut err = HttpError::from(ApiError::from(
        platform_api::MalformedRequest::MethodNotAllowed(method.to_string()),
    ));
    err.allow = Some(allow);
    err
}

async fn not_found(method: Method, uri: Uri) -> HttpError {
    HttpError {
        status: StatusCode::NOT_FOUND,
        code: "NOT_FOUND",
        message: format!("No handler found for {} {}", method, uri.path()),
        errors: Vec::new(),
        allow: None,
    }
}

/// Serializes the body as JSON labelled `application/hal+json`.
pub struct Hal<T>(pub T);

impl<T: Serialize> IntoResponse for Hal<T> {
    fn into_response(self) -> Response {
        match serde_json::to_vec(&self.0) {
            Ok(body) => (
                [(header::CONTENT_TYPE, HeaderValue::from_static(HAL_JSON))],
                body,
            )
                .into_response(),
            Err(err) => HttpError::from(ApiError::internal(err.into())).into_response(),
        }
    }
}

pub type HttpResult<T> = Result<T, HttpError>;

#[derive(Debug)]
pub struct HttpError {
    status: StatusCode,
    code: &'static str,
    message: String,
    errors: Vec<FieldError>,
    allow: Option<&'static str>,
}

impl From<ApiError> for HttpError {
    fn from(err: ApiError) -> Self {
        if let ApiError::Internal(source) = &err {
            error!(error = ?source, "request failed");
        }
        let errors = match &err {
            ApiError::ValidationFailed(validation) => validation.errors().to_vec(),
            _ => Vec::new(),
        };
        Self {
            status: err.status(),
            code: err.code(),
            message: err.to_string(),
            errors,
            allow: None,
        }
    }
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    status: u16,
    code: &'static str,
    message: &'a str,
    #[serde(skip_serializing_if = "<[FieldError]>::is_empty")]
    errors: &'a [FieldError],
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            status: self.status.as_u16(),
            code: self.code,
            message: &self.message,
            errors: &self.errors,
        };
        let mut response = (self.status, Json(body)).into_response();
        if let Some(allow) = self.allow {
            response
                .headers_mut()
                .insert(header::ALLOW, HeaderValue::from_static(allow));
        }
        response
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            error!(%err, "failed to install CTRL+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};

        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(err) => {
                error!(%err, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    };
    info!("shutdown signal received");
}
