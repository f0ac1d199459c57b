/*!
 * API Module
 * HTTP boundary over the process table
 */

pub mod handlers;
pub mod params;
pub mod response;
pub mod server;

pub use params::{AddParams, DeleteParams, DeleteTarget, ListParams};
pub use server::{router, serve, start_http_server};
