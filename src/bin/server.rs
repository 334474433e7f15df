use std::{net::SocketAddr, path::PathBuf, process::ExitCode};

use axum::{
    Router,
    extract::{MatchedPath, Request},
    middleware,
};
use axum_server::Handle;
use clap::Parser;
use tower_http::trace::TraceLayer;

#[cfg(debug_assertions)]
use tower_livereload::LiveReloadLayer;

use tracing_subscriber::{EnvFilter, Layer, layer::SubscriberExt, util::SubscriberInitExt};

use sales_dashboard::{
    AppState, MonthWindow, PaginationConfig, RecordSet, build_router, graceful_shutdown,
    logging_middleware,
};

/// The web server for the sales dashboard.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to the JSON array of transaction records.
    #[arg(long, default_value = "transactions.json")]
    data_path: PathBuf,

    /// Directory containing the static assets (CSS, htmx and ECharts scripts).
    #[arg(long, default_value = "static/")]
    static_dir: PathBuf,

    /// The port to serve the dashboard from.
    #[arg(short, long, default_value_t = 3000)]
    port: u16,

    /// The first month (1 = January) shown by the monthly revenue chart.
    #[arg(long, default_value_t = 1)]
    first_month: u8,

    /// The number of months shown by the monthly revenue chart.
    #[arg(long, default_value_t = 6)]
    month_count: u8,

    /// The number of rows per page of the transaction table.
    #[arg(long, default_value_t = 20)]
    page_size: usize,
}

#[tokio::main]
async fn main() -> ExitCode {
    setup_logging();

    let args = Args::parse();

    let month_window = match MonthWindow::new(args.first_month, args.month_count) {
        Ok(month_window) => month_window,
        Err(error) => {
            tracing::error!("Could not start the server: {error}");
            return ExitCode::FAILURE;
        }
    };

    let records = match RecordSet::load(&args.data_path).await {
        Ok(records) => records,
        Err(error) => {
            tracing::error!("Could not start the server: {error}");
            return ExitCode::FAILURE;
        }
    };

    let pagination_config = PaginationConfig {
        page_size: args.page_size,
        ..Default::default()
    };
    let state = AppState::new(records, month_window, pagination_config);

    let handle = Handle::new();
    tokio::spawn(graceful_shutdown(handle.clone()));

    let router = build_router(state, &args.static_dir)
        .layer(middleware::from_fn(logging_middleware));
    let router = add_tracing_layer(router);

    #[cfg(debug_assertions)]
    let router = router.layer(LiveReloadLayer::new());

    let addr = SocketAddr::from(([127, 0, 0, 1], args.port));
    tracing::info!("HTTP server listening on http://{}", addr);

    if let Err(error) = axum_server::bind(addr)
        .handle(handle)
        .serve(router.into_make_service())
        .await
    {
        tracing::error!("Server error: {error}");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

fn setup_logging() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let stdout_log = tracing_subscriber::fmt::layer()
        .pretty()
        .with_filter(env_filter);

    tracing_subscriber::registry().with(stdout_log).init();
}

fn add_tracing_layer(router: Router) -> Router {
    let tracing_layer = TraceLayer::new_for_http()
        .make_span_with(|req: &Request| {
            let method = req.method();
            let uri = req.uri();

            let matched_path = req
                .extensions()
                .get::<MatchedPath>()
                .map(|matched_path| matched_path.as_str());

            tracing::debug_span!("request", %method, %uri, matched_path)
        })
        // By default, `TraceLayer` will log 5xx responses but we're doing our specific
        // logging of errors so disable that
        .on_failure(());

    router.layer(tracing_layer)
}
