//! The small slice of HTTP a request scope needs: the request head, a response
//! with buffered or streamed body, and content types.
pub mod body;
pub mod headers;
pub mod mime;
pub mod params;
pub mod request;
pub mod response;
pub mod url;

pub use body::{Body, StreamSender};
pub use headers::Headers;
pub use params::Params;
pub use request::{Method, Request};
pub use response::Response;
pub use url::{urldecode, urlencode};
