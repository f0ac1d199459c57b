/*!
 * Request Handlers
 * Process table operations behind each route
 *
 * Synchronous and transport-agnostic: the router decodes parameters and runs these
 * off the async reactor, since admission may wait on the table lock.
 */

use super::params::{AddParams, DeleteParams, DeleteTarget, ListParams};
use super::response;
use crate::core::types::Process;
use crate::process::ProcessTable;
use axum::response::{IntoResponse, Response};
use tracing::{debug, info};

pub const PROCESSES_PATH: &str = "/processes";
pub const STATS_PATH: &str = "/processes/stats";

/// `POST /processes`: 200 when admitted, 204 when not
pub fn add_process<T: ProcessTable + ?Sized>(table: &T, params: &AddParams) -> Response {
    let id = match params.id() {
        Ok(id) => id,
        Err(e) => return e.into_response(),
    };
    let method = params.method();
    let priority = params.priority();

    debug!(id, method = %method, priority = %priority, "Method Add");

    if table.add(method, Process::new(id, priority)) {
        response::ok()
    } else {
        response::no_content()
    }
}

/// `GET /processes`: ordered snapshot as a JSON array
pub fn list_processes<T: ProcessTable + ?Sized>(table: &T, params: &ListParams) -> Response {
    let sort_by = params.sort_by();
    let descending = params.descending();

    debug!(sort_by = %sort_by, descending, "Method Get");
    response::json(table.list(sort_by, descending))
}

/// `DELETE /processes`: one process, one priority group, or everything
pub fn delete_processes<T: ProcessTable + ?Sized>(table: &T, params: &DeleteParams) -> Response {
    match params.target() {
        Ok(DeleteTarget::Process(id)) => table.kill(id),
        Ok(DeleteTarget::Group(priority)) => table.kill_group(priority),
        Ok(DeleteTarget::All) => {
            info!("Method Delete: killing all processes");
            table.kill_all();
        }
        Err(e) => return e.into_response(),
    }
    response::ok()
}

/// `GET /processes/stats`
pub fn stats<T: ProcessTable + ?Sized>(table: &T) -> Response {
    response::json(table.stats())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::params::tests::query;
    use crate::api::response::tests::body_text;
    use crate::core::types::Priority;
    use crate::process::ProcessStore;
    use axum::http::StatusCode;

    fn post(store: &ProcessStore, target: &str) -> StatusCode {
        add_process(store, &query(target)).status()
    }

    fn delete(store: &ProcessStore, target: &str) -> StatusCode {
        delete_processes(store, &query(target)).status()
    }

    async fn listed(store: &ProcessStore, target: &str) -> Vec<i64> {
        let response = list_processes(store, &query(target));
        assert_eq!(response.status(), StatusCode::OK);

        let list: Vec<Process> = serde_json::from_str(&body_text(response).await).unwrap();
        list.into_iter().map(|p| p.id).collect()
    }

    #[test]
    fn test_add_and_reject() {
        let store = ProcessStore::new(1).unwrap();

        assert_eq!(post(&store, "/processes?id=1&priority=High"), StatusCode::OK);
        assert_eq!(post(&store, "/processes?id=2&priority=High"), StatusCode::NO_CONTENT);
        assert_eq!(
            post(&store, "/processes?addMethod=fifo&id=2&priority=Low"),
            StatusCode::OK
        );
        assert_eq!(store.get(2).map(|p| p.priority), Some(Priority::Low));
    }

    #[test]
    fn test_add_defaults_unknown_names() {
        let store = ProcessStore::new(1).unwrap();
        assert_eq!(
            post(&store, "/processes?addMethod=lifo&id=5&priority=urgent"),
            StatusCode::OK
        );
        assert_eq!(store.get(5).map(|p| p.priority), Some(Priority::Low));

        // Unknown method is Default, which never evicts
        assert_eq!(post(&store, "/processes?addMethod=lifo&id=6"), StatusCode::NO_CONTENT);
    }

    #[tokio::test]
    async fn test_add_requires_valid_id() {
        let store = ProcessStore::new(2).unwrap();
        assert_eq!(post(&store, "/processes?priority=Low"), StatusCode::BAD_REQUEST);

        let response = add_process(&store, &query("/processes?id=abc"));
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(body_text(response).await.contains("invalid_parameter"));
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_list_sorting_and_fallback() {
        let store = ProcessStore::new(4).unwrap();
        for target in [
            "/processes?id=3&priority=High",
            "/processes?id=1&priority=Low",
            "/processes?id=2&priority=Medium",
        ] {
            assert_eq!(post(&store, target), StatusCode::OK);
        }

        assert_eq!(listed(&store, "/processes").await, vec![1, 2, 3]);
        assert_eq!(listed(&store, "/processes?sortBy=name").await, vec![1, 2, 3]);
        assert_eq!(
            listed(&store, "/processes?sortBy=creationTime").await,
            vec![3, 1, 2]
        );
        assert_eq!(
            listed(&store, "/processes?sortBy=Priority&descending=true").await,
            vec![3, 2, 1]
        );
    }

    #[test]
    fn test_delete_variants() {
        let store = ProcessStore::new(4).unwrap();
        for target in [
            "/processes?id=1&priority=Low",
            "/processes?id=2&priority=Low",
            "/processes?id=3&priority=High",
            "/processes?id=4&priority=Medium",
        ] {
            post(&store, target);
        }

        assert_eq!(delete(&store, "/processes?id=4"), StatusCode::OK);
        assert_eq!(delete(&store, "/processes?id=4"), StatusCode::OK);
        assert_eq!(store.len(), 3);

        assert_eq!(delete(&store, "/processes?priority=low"), StatusCode::OK);
        assert_eq!(store.len(), 1);

        assert_eq!(delete(&store, "/processes?priority=urgent"), StatusCode::BAD_REQUEST);
        assert_eq!(delete(&store, "/processes?id=x"), StatusCode::BAD_REQUEST);
        assert_eq!(store.len(), 1);

        assert_eq!(delete(&store, "/processes"), StatusCode::OK);
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_stats() {
        let store = ProcessStore::new(1).unwrap();
        post(&store, "/processes?id=1");
        post(&store, "/processes?id=2");

        let body = body_text(stats(&store)).await;
        let body: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(body["admitted"], 1);
        assert_eq!(body["rejected"], 1);
    }
}
