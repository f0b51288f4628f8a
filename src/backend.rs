use axum::{
    extract::{Request, State},
    http::{header, HeaderValue},
    middleware::{self, Next},
    response::Response,
    Router,
};
use folio::telemetry::{log_event, LogConfig, LogLevel};
use serde_json::json;
use std::{path::PathBuf, time::Instant};
use tower_http::services::{ServeDir, ServeFile};

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_STATIC_DIR: &str = "dist";
const DEFAULT_ASSET_MAX_AGE_SECONDS: u64 = 3_600;
const DEFAULT_LOG_LEVEL: LogLevel = LogLevel::Info;

const ASSET_MAX_AGE_SECONDS_BOUNDS: (u64, u64) = (0, 365 * 24 * 60 * 60);
const INDEX_FILE: &str = "index.html";

#[derive(Clone, Debug)]
struct ServerConfig {
    port: u16,
    static_dir: PathBuf,
    asset_max_age_seconds: u64,
    log: LogConfig,
}

impl ServerConfig {
    fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let port = parse_non_empty_string(lookup("PORT"))
            .and_then(|value| value.parse::<u16>().ok())
            .unwrap_or(DEFAULT_PORT);
        let static_dir = parse_non_empty_string(lookup("STATIC_DIR"))
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_STATIC_DIR));
        let asset_max_age_seconds = parse_u64_with_bounds(
            lookup("ASSET_MAX_AGE_SECONDS"),
            DEFAULT_ASSET_MAX_AGE_SECONDS,
            ASSET_MAX_AGE_SECONDS_BOUNDS,
        );
        let log_level = parse_non_empty_string(lookup("LOG_LEVEL"))
            .and_then(|value| LogLevel::parse(&value))
            .unwrap_or(DEFAULT_LOG_LEVEL);

        Self {
            port,
            static_dir,
            asset_max_age_seconds,
            log: LogConfig::new(log_level),
        }
    }

    fn index_file(&self) -> PathBuf {
        self.static_dir.join(INDEX_FILE)
    }
}

pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = ServerConfig::from_env();
    let bind_address = format!("0.0.0.0:{}", config.port);

    let listener = tokio::net::TcpListener::bind(&bind_address).await?;
    log_event(
        &config.log,
        LogLevel::Info,
        "server.listening",
        json!({
            "url": format!("http://127.0.0.1:{}", config.port),
            "staticDir": config.static_dir.display().to_string(),
        }),
    );
    axum::serve(listener, build_router(config)).await?;
    Ok(())
}

/// Serves the built page; unknown paths fall back to the index document.
fn build_router(config: ServerConfig) -> Router {
    let static_service =
        ServeDir::new(&config.static_dir).fallback(ServeFile::new(config.index_file()));

    Router::new()
        .fallback_service(static_service)
        .layer(middleware::from_fn_with_state(config, finish_response))
}

async fn finish_response(
    State(config): State<ServerConfig>,
    request: Request,
    next: Next,
) -> Response {
    let started = Instant::now();
    let method = request.method().to_string();
    let path = request.uri().path().to_string();

    let mut response = next.run(request).await;
    let status = response.status();

    if status.is_success() {
        response.headers_mut().insert(
            header::CACHE_CONTROL,
            cache_control(&cache_policy_for(&path, config.asset_max_age_seconds)),
        );
    }

    log_event(
        &config.log,
        if status.is_server_error() {
            LogLevel::Warn
        } else {
            LogLevel::Info
        },
        "request.completed",
        json!({
            "method": method,
            "path": path,
            "status": status.as_u16(),
            "durationMs": u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX),
        }),
    );

    response
}

/// Documents revalidate on every load; fingerprinted build assets may be cached.
fn cache_policy_for(path: &str, asset_max_age_seconds: u64) -> String {
    let file_name = path.rsplit('/').next().unwrap_or_default();
    let is_document = file_name.is_empty() || file_name.ends_with(".html") || !file_name.contains('.');

    if is_document || asset_max_age_seconds == 0 {
        "no-cache".to_string()
    } else {
        format!("public, max-age={asset_max_age_seconds}")
    }
}

fn cache_control(value: &str) -> HeaderValue {
    HeaderValue::from_str(value).unwrap_or_else(|_| HeaderValue::from_static("no-store"))
}

fn parse_u64_with_bounds(value: Option<String>, default: u64, bounds: (u64, u64)) -> u64 {
    value
        .and_then(|value| value.trim().parse::<u64>().ok())
        .filter(|value| (bounds.0..=bounds.1).contains(value))
        .unwrap_or(default)
}

fn parse_non_empty_string(value: Option<String>) -> Option<String> {
    value
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}
