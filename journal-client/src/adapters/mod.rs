pub mod http;

pub use http::{HttpConnection, HttpGateway};
