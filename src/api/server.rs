/*!
 * HTTP Server
 * axum router over the process table with graceful shutdown
 */

use super::handlers::{self, PROCESSES_PATH, STATS_PATH};
use super::params::{AddParams, DeleteParams, ListParams};
use super::response;
use crate::core::errors::{ApiError, SerializableError, TaskManagerError};
use crate::monitoring::RequestSpan;
use crate::process::ProcessTable;
use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, Request, State};
use axum::http::StatusCode;
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::Router;
use std::future::Future;
use std::io;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tracing::{error, info, Instrument, Span};

/// Bind `addr` and serve until `shutdown` resolves
pub async fn start_http_server<T, F>(
    addr: SocketAddr,
    table: T,
    shutdown: F,
) -> Result<(), TaskManagerError>
where
    T: ProcessTable + Clone + 'static,
    F: Future<Output = ()> + Send + 'static,
{
    let listener = TcpListener::bind(addr).await?;
    info!(addr = %listener.local_addr()?, "HTTP server listening");
    serve(listener, table, shutdown).await?;
    Ok(())
}

/// Serve connections from an already bound listener until `shutdown` resolves
pub async fn serve<T, F>(listener: TcpListener, table: T, shutdown: F) -> io::Result<()>
where
    T: ProcessTable + Clone + 'static,
    F: Future<Output = ()> + Send + 'static,
{
    let shutdown = async move {
        shutdown.await;
        info!("HTTP server shutting down");
    };

    axum::serve(listener, router(table))
        .with_graceful_shutdown(shutdown)
        .await
}

/// Routes for the process table
///
/// Unknown paths answer 404 and unknown methods on a known path 405.
pub fn router<T>(table: T) -> Router
where
    T: ProcessTable + Clone + 'static,
{
    Router::new()
        .route(
            PROCESSES_PATH,
            post(add_route::<T>)
                .get(list_route::<T>)
                .delete(delete_route::<T>),
        )
        .route(STATS_PATH, get(stats_route::<T>))
        .layer(middleware::from_fn(trace_request))
        .with_state(table)
}

async fn add_route<T>(
    State(table): State<T>,
    query: Result<Query<AddParams>, QueryRejection>,
) -> Response
where
    T: ProcessTable + Clone + 'static,
{
    match query {
        Ok(Query(params)) => {
            run_blocking(table, move |table| handlers::add_process(table, &params)).await
        }
        Err(rejection) => malformed(rejection),
    }
}

async fn list_route<T>(
    State(table): State<T>,
    query: Result<Query<ListParams>, QueryRejection>,
) -> Response
where
    T: ProcessTable + Clone + 'static,
{
    match query {
        Ok(Query(params)) => {
            run_blocking(table, move |table| handlers::list_processes(table, &params)).await
        }
        Err(rejection) => malformed(rejection),
    }
}

async fn delete_route<T>(
    State(table): State<T>,
    query: Result<Query<DeleteParams>, QueryRejection>,
) -> Response
where
    T: ProcessTable + Clone + 'static,
{
    match query {
        Ok(Query(params)) => {
            run_blocking(table, move |table| handlers::delete_processes(table, &params)).await
        }
        Err(rejection) => malformed(rejection),
    }
}

async fn stats_route<T>(State(table): State<T>) -> Response
where
    T: ProcessTable + Clone + 'static,
{
    handlers::stats(&table)
}

fn malformed(rejection: QueryRejection) -> Response {
    ApiError::MalformedRequest(rejection.body_text()).into_response()
}

/// Run a table operation on the blocking pool inside the current request span
async fn run_blocking<T, F>(table: T, op: F) -> Response
where
    T: ProcessTable + 'static,
    F: FnOnce(&T) -> Response + Send + 'static,
{
    let span = Span::current();

    tokio::task::spawn_blocking(move || {
        let _entered = span.enter();
        op(&table)
    })
    .await
    .unwrap_or_else(|e| {
        error!(error = %e, "Request handler failed");
        response::error(
            StatusCode::INTERNAL_SERVER_ERROR,
            SerializableError::new("internal_error", e.to_string()),
        )
    })
}

async fn trace_request(request: Request, next: Next) -> Response {
    let span = RequestSpan::new(request.method().as_str(), request.uri().path());

    let response = next.run(request).instrument(span.span().clone()).await;

    span.record_status(response.status().as_u16());
    response
}
