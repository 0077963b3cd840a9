//! HTTP response.
use std::marker::Unpin;
use tokio::io::{AsyncWrite, AsyncWriteExt};

use super::{mime, Body, Headers, StreamSender};

/// HTTP response.
#[derive(Debug)]
pub struct Response {
    code: u16,
    headers: Headers,
    body: Body,
}

impl Default for Response {
    fn default() -> Self {
        Self::new()
    }
}

impl Response {
    /// Create empty response.
    pub fn new() -> Self {
        Self {
            code: 200,
            headers: Headers::from([("server", "rwf"), ("connection", "keep-alive")]),
            body: Body::default(),
        }
    }

    /// Set the body.
    ///
    /// `Content-Type` is derived from the body only if it wasn't set already.
    /// Streamed bodies use chunked encoding instead of `Content-Length`.
    pub fn body(mut self, body: Body) -> Self {
        self.set_body(body);
        self
    }

    pub fn set_body(&mut self, body: Body) {
        self.body = body;

        match self.body.len() {
            Some(len) => {
                self.headers.remove("transfer-encoding");
                self.headers.insert("content-length", len);
            }
            None => {
                self.headers.remove("content-length");
                self.headers.insert("transfer-encoding", "chunked");
            }
        }

        if !self.headers.contains("content-type") {
            self.headers
                .insert("content-type", self.body.mime_type());
        }
    }

    /// Replace the body with a stream and return its sending half.
    pub fn stream(&mut self) -> StreamSender {
        let (tx, body) = Body::stream();
        self.set_body(body);
        tx
    }

    /// Create a response with an HTML body.
    ///
    /// # Example
    ///
    /// ```
    /// use rwf_markup::http::Response;
    ///
    /// let response = Response::new().html("<h1>Hello world</h1>");
    /// assert_eq!(response.media_type(), Some("text/html"));
    /// ```
    pub fn html(self, body: impl ToString) -> Self {
        self.body(Body::Html(body.to_string()))
    }

    /// Response status code, e.g. 200.
    pub fn status(&self) -> u16 {
        self.code
    }

    /// Set the `Content-Type` header. Accepts MIME types and short names, e.g. `svg`.
    pub fn set_content_type(&mut self, content_type: &str) {
        self.headers
            .insert("content-type", mime::content_type(content_type));
    }

    pub fn content_type(&self) -> Option<&str> {
        self.headers.get("content-type").map(|s| s.as_str())
    }

    /// Content type without parameters like `charset`.
    pub fn media_type(&self) -> Option<&str> {
        self.content_type().map(mime::media_type)
    }

    pub fn headers(&self) -> &Headers {
        &self.headers
    }

    /// Take the body out of the response, e.g. to read it in tests.
    pub fn into_body(self) -> Body {
        self.body
    }

    /// Send the response to a stream, serialized as bytes.
    pub async fn send(mut self, mut stream: impl AsyncWrite + Unpin) -> Result<(), std::io::Error> {
        let mut response = format!("HTTP/1.1 {} {}\r\n", self.code, reason(self.code))
            .as_bytes()
            .to_vec();

        response.extend_from_slice(&self.headers.to_bytes());
        response.extend_from_slice(b"\r\n");

        stream.write_all(&response).await?;
        self.body.send(&mut stream).await?;
        stream.flush().await
    }
}

fn reason(code: u16) -> &'static str {
    match code {
        200 => "OK",
        201 => "Created",
        302 => "Found",
        400 => "Bad Request",
        404 => "Not Found",
        500 => "Internal Server Error",
        _ => "",
    }
}
