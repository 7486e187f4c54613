use std::{
    future::IntoFuture as _,
    io,
    sync::{Arc, OnceLock},
    time,
};

use application::{api, config, graphql, Args, Config, Service};
use axum::{
    extract::MatchedPath,
    routing::{on, MethodFilter},
    Extension, Router,
};
use axum_client_ip::InsecureClientIp;
use futures::{future, TryFutureExt as _};
use service::infra::{Http, JsonFile, Memory};
use tokio::net::TcpListener;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};
use tracing as log;
use tracing_subscriber::{
    filter::filter_fn,
    layer::{Layer as _, SubscriberExt as _},
    util::SubscriberInitExt as _,
};

const STDERR_LEVELS: &[log::Level] = &[log::Level::WARN, log::Level::ERROR];

static LOG_LEVEL: OnceLock<log::Level> = OnceLock::new();

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .compact()
                .with_thread_names(true)
                .with_writer(io::stdout)
                .with_filter(filter_fn(for_stream(false))),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .compact()
                .with_thread_names(true)
                .with_writer(io::stderr)
                .with_filter(filter_fn(for_stream(true))),
        )
        .init();

    _ = run().await;
}

/// Returns a log filter passing all spans, and the events enabled by the
/// [`LOG_LEVEL`] which belong to stderr (if `stderr`) or to stdout.
fn for_stream(
    stderr: bool,
) -> impl Fn(&log::Metadata<'_>) -> bool + Send + Sync + 'static {
    move |meta| {
        let max = LOG_LEVEL.get().copied().unwrap_or(log::Level::INFO);
        meta.is_span()
            || ((STDERR_LEVELS.contains(meta.level()) == stderr)
                && max >= *meta.level())
    }
}

async fn run() -> Result<(), ()> {
    let args = Args::parse().map_err(|e| {
        log::error!("failed to parse command line arguments: {e}");
    })?;

    let mut config = Config::new(&args.config).map_err(|e| {
        log::error!("failed to load `Config` from `{}`: {e}", args.config);
    })?;
    args.override_config(&mut config);
    let Config {
        service,
        server,
        log,
    } = config;

    LOG_LEVEL
        .set(log.level.into())
        .unwrap_or_else(|_| unreachable!("first initialization"));

    let remote = Http::new(service.remote.clone().into()).map_err(|e| {
        log::error!("failed to initialize `Http` client: {e}");
    })?;
    let storage = JsonFile::new(service.storage.dir.clone());
    log::info!(
        remote = %service.remote.url,
        storage = %service.storage.dir.display(),
        "starting users directory",
    );

    let (service, background) = Service::new(
        (&service).into(),
        Arc::new(Memory::new()),
        remote,
        storage,
    );

    let app = router(service, api::schema(), cors(&server.cors)?);

    let addr = (server.host.as_str(), server.port);
    let listener = TcpListener::bind(addr).await.map_err(|e| {
        log::error!("failed to listen on `{}:{}`: {e}", addr.0, addr.1);
    })?;
    log::info!("listening on `{}:{}`", addr.0, addr.1);

    future::try_join(
        axum::serve(listener, app)
            .into_future()
            .map_err(|e| log::error!("webserver failed: {e}")),
        background
            .into_future()
            .map_err(|e| log::error!("background failed: {e}")),
    )
    .await
    .map(drop)
}

/// Builds a [`CorsLayer`] admitting credentialed requests from the configured
/// origins.
///
/// The `*` origin admits any origin by mirroring it back, as browsers reject
/// the wildcard for credentialed requests.
fn cors(config: &config::Cors) -> Result<CorsLayer, ()> {
    let origin = if config.origins.iter().any(|o| o == "*") {
        AllowOrigin::mirror_request()
    } else {
        AllowOrigin::list(
            config
                .origins
                .iter()
                .map(|o| {
                    o.parse::<http::HeaderValue>().map_err(|e| {
                        log::error!("`{o}` is not correct CORS origin: {e}");
                    })
                })
                .collect::<Result<Vec<_>, _>>()?,
        )
    };
    Ok(CorsLayer::new()
        .allow_methods([http::Method::GET, http::Method::POST])
        .allow_headers([http::header::CONTENT_TYPE])
        .allow_credentials(true)
        .allow_origin(origin))
}

/// Builds the HTTP [`Router`] serving the GraphQL API of the provided
/// [`Service`].
fn router(service: Service, schema: api::Schema, cors: CorsLayer) -> Router {
    let trace = TraceLayer::new_for_http()
        .make_span_with(|r: &http::Request<_>| {
            log::info_span!(
                "HTTP request",
                http.client_ip = InsecureClientIp::from(
                    r.headers(),
                    r.extensions(),
                )
                .map(|ip| ip.0.to_string())
                .ok(),
                http.method = r.method().as_str(),
                http.route = r
                    .extensions()
                    .get::<MatchedPath>()
                    .map(MatchedPath::as_str),
                http.target = r
                    .uri()
                    .path_and_query()
                    .map(http::uri::PathAndQuery::as_str),
                http.user_agent = r
                    .headers()
                    .get(http::header::USER_AGENT)
                    .and_then(|h| h.to_str().ok()),
                http.status_code = log::field::Empty,
            )
        })
        .on_response(
            |r: &http::Response<_>, dur: time::Duration, span: &log::Span| {
                let status = r.status();
                _ = span.record("http.status_code", status.as_u16());

                let ms = u64::try_from(dur.as_millis()).unwrap_or(u64::MAX);
                if status.is_server_error() {
                    log::error!(duration_ms = ms, "request failed");
                } else if status.is_client_error() {
                    log::warn!(duration_ms = ms, "request rejected");
                } else {
                    log::info!(duration_ms = ms, "request served");
                }
            },
        );

    Router::new()
        .route(
            "/graphql",
            on(MethodFilter::GET.or(MethodFilter::POST), graphql),
        )
        .layer(Extension(Arc::new(schema)))
        .layer(Extension(service))
        .layer(cors)
        .layer(trace)
}
