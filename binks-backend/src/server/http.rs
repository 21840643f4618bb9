//! HTTP server implementation
//!
//! Uses hyper http1 with TokioIo for async handling.

use bytes::Bytes;
use http_body_util::{BodyExt, Full};
use hyper::body::Incoming;
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper::{Method, Request, Response};
use hyper_util::rt::TokioIo;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{debug, error, info, warn};

use binks_core::{fixtures, DisposalRecord, InitiativeCatalog, RewardCalculator};

use crate::config::Args;
use crate::db::MongoClient;
use crate::routes;
use crate::types::{BackendError, Result};

/// Shared application state
pub struct AppState {
    pub args: Args,
    /// Database handle, absent when DATABASE_URL is unset or unreachable
    pub mongo: Option<MongoClient>,
    /// Initiative catalog served by /api/initiatives
    pub catalog: InitiativeCatalog,
    /// Reward calculator bound to the campaign calendar
    pub calculator: RewardCalculator,
    /// Disposal history served by /api/disposals
    pub disposals: Vec<DisposalRecord>,
}

impl AppState {
    /// Build state from the built-in program data
    pub fn new(args: Args, mongo: Option<MongoClient>) -> Result<Self> {
        let catalog = InitiativeCatalog::new(fixtures::initiatives()?)?;
        let calculator = RewardCalculator::new(fixtures::environmental_factors()?)?;
        let disposals = fixtures::disposal_history()?;

        debug!(
            initiatives = catalog.len(),
            campaigns = calculator.factors().len(),
            disposals = disposals.len(),
            "Loaded program data"
        );

        Ok(Self {
            args,
            mongo,
            catalog,
            calculator,
            disposals,
        })
    }
}

/// Accept connections until the process is stopped
pub async fn run(state: Arc<AppState>) -> Result<()> {
    let addr = state.args.listen_addr();
    let listener = TcpListener::bind(addr).await?;

    info!("Binks backend listening on {}", addr);

    if state.mongo.is_none() {
        warn!("Running without a database connection");
    }

    loop {
        match listener.accept().await {
            Ok((stream, peer)) => {
                let state = Arc::clone(&state);
                tokio::spawn(async move {
                    let io = TokioIo::new(stream);

                    let service = service_fn(move |req| {
                        let state = Arc::clone(&state);
                        async move { handle_request(state, peer, req).await }
                    });

                    if let Err(err) = http1::Builder::new().serve_connection(io, service).await {
                        error!("Error serving connection from {}: {:?}", peer, err);
                    }
                });
            }
            Err(e) => {
                error!("Error accepting connection: {:?}", e);
            }
        }
    }
}

/// Read the request and hand it to the router
async fn handle_request(
    state: Arc<AppState>,
    peer: SocketAddr,
    req: Request<Incoming>,
) -> std::result::Result<Response<Full<Bytes>>, hyper::Error> {
    let method = req.method().clone();
    let path = req.uri().path().to_string();
    let query = req.uri().query().map(str::to_string);

    info!("[{}] {} {}", peer, method, path);

    let body = match req.into_body().collect().await {
        Ok(collected) => collected.to_bytes(),
        Err(e) => {
            warn!("Failed to read request body from {}: {}", peer, e);
            return Ok(routes::error_response(BackendError::BadRequest(
                "Invalid body".to_string(),
            )));
        }
    };

    Ok(dispatch(state, &method, &path, query.as_deref(), body).await)
}

/// Route a request that has been fully read
pub async fn dispatch(
    state: Arc<AppState>,
    method: &Method,
    path: &str,
    query: Option<&str>,
    body: Bytes,
) -> Response<Full<Bytes>> {
    let query = query.unwrap_or("");

    match (method, path) {
        (&Method::OPTIONS, _) => routes::preflight_response(),

        (&Method::GET, "/") => routes::root_response(),

        (&Method::GET, "/health") => routes::health_check(&state).await,

        (&Method::GET, "/api/materials") => routes::handle_materials(),

        (&Method::GET, "/api/factors") => routes::handle_factors(&state, query),

        (&Method::POST, "/api/rewards/quote") => routes::handle_quote(&state, &body),

        (&Method::GET, "/api/initiatives") => routes::handle_list_initiatives(&state, query),

        (&Method::GET, p) if p.starts_with("/api/initiatives/") => {
            let id = p.trim_start_matches("/api/initiatives/");
            routes::handle_get_initiative(&state, id)
        }

        (&Method::GET, "/api/disposals") => routes::handle_disposals(&state),

        _ => routes::not_found_response(path),
    }
}
