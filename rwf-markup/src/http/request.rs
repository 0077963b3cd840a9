//! HTTP request.
//!
//! Only the request head is read. Views need the path, parameters and headers
//! to build URLs, nothing else.
use std::marker::Unpin;

use tokio::io::{AsyncRead, AsyncReadExt};

use super::{Headers, Params};
use crate::Error;

/// Longest request line or header accepted.
const HEADER_MAX_SIZE: usize = 16 * 1024;

/// HTTP method, e.g. GET, POST, etc.
#[derive(PartialEq, Clone, Debug, Default)]
pub enum Method {
    #[default]
    Get,
    Post,
    Put,
    Delete,
    Head,
    Patch,
    /// Some other request we don't have a name for.
    Other(String),
}

impl From<&str> for Method {
    fn from(value: &str) -> Self {
        match value.to_uppercase().as_str() {
            "GET" => Method::Get,
            "POST" => Method::Post,
            "PUT" => Method::Put,
            "DELETE" => Method::Delete,
            "HEAD" => Method::Head,
            "PATCH" => Method::Patch,
            _ => Method::Other(value.to_string()),
        }
    }
}

/// HTTP request.
#[derive(Debug, Clone)]
pub struct Request {
    method: Method,
    path: String,
    params: Params,
    headers: Headers,
    mount_path: String,
    scheme: String,
}

impl Default for Request {
    fn default() -> Self {
        Self {
            method: Method::Get,
            path: "/".into(),
            params: Params::new(),
            headers: Headers::new(),
            mount_path: String::new(),
            scheme: "http".into(),
        }
    }
}

impl Request {
    /// Create a request for a path, e.g. `/users?id=5`.
    pub fn get(path: &str) -> Self {
        let mut request = Self::default();
        request.set_path(path);
        request
    }

    /// Read the request head from a stream.
    pub async fn read(mut stream: impl AsyncRead + Unpin) -> Result<Self, Error> {
        let line = Self::read_line(&mut stream).await?;
        let mut parts = line.split(' ');

        let method = parts.next().ok_or(Error::MalformedRequest("method"))?;
        let path = parts.next().ok_or(Error::MalformedRequest("path"))?;
        parts.next().ok_or(Error::MalformedRequest("version"))?;

        let mut request = Self::default();
        request.method = Method::from(method);
        request.set_path(path);

        loop {
            let header = Self::read_line(&mut stream).await?;
            if header.is_empty() {
                break;
            }

            // Values can contain colons, e.g. `Host: localhost:8000`.
            let (name, value) = header
                .split_once(':')
                .ok_or(Error::MalformedRequest("header"))?;
            request.headers.insert(name.trim(), value.trim());
        }

        Ok(request)
    }

    /// Read a line from the stream, parsing out \r\n.
    async fn read_line(mut stream: impl AsyncRead + Unpin) -> Result<String, Error> {
        let mut buf = Vec::new();
        let mut cr = false;

        for _ in 0..HEADER_MAX_SIZE {
            let b = stream.read_u8().await?;

            match b {
                b'\r' => cr = true,
                b'\n' if cr => return Ok(String::from_utf8_lossy(&buf).to_string()),
                b'\n' => return Err(Error::MalformedRequest("nl before cr")),
                b => buf.push(b),
            }
        }

        Err(Error::MalformedRequest("header too large"))
    }

    fn set_path(&mut self, path: &str) {
        let path = path.split('#').next().unwrap_or("/");
        let (base, query) = path.split_once('?').unwrap_or((path, ""));

        self.path = if base.starts_with('/') {
            base.to_string()
        } else {
            format!("/{}", base)
        };
        self.params = Params::parse(query);
    }

    /// Set the path the application is mounted at, e.g. `/blog`.
    pub fn with_mount_path(mut self, mount_path: &str) -> Self {
        self.mount_path = mount_path.trim_end_matches('/').to_string();
        self
    }

    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        self.headers.insert(name, value);
        self
    }

    /// Scheme the connection was accepted on, `https` when TLS is terminated by the server.
    pub fn with_scheme(mut self, scheme: &str) -> Self {
        self.scheme = scheme.to_string();
        self
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    /// Request path, without the query.
    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn params(&self) -> &Params {
        &self.params
    }

    pub fn headers(&self) -> &Headers {
        &self.headers
    }

    /// Get a header value by name, if it exists. Case insensitive.
    pub fn header(&self, name: &str) -> Option<&String> {
        self.headers.get(name)
    }

    pub fn mount_path(&self) -> &str {
        &self.mount_path
    }

    /// `http` or `https`. Proxies can override it with `X-Forwarded-Proto`.
    pub fn scheme(&self) -> &str {
        self.header("x-forwarded-proto")
            .map(|proto| proto.split(',').next().unwrap_or(proto).trim())
            .unwrap_or(self.scheme.as_str())
    }

    /// Host the client connected to, with port if it's not the default one.
    pub fn host(&self) -> &str {
        self.header("x-forwarded-host")
            .or(self.header("host"))
            .map(|host| host.as_str())
            .unwrap_or("localhost")
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[tokio::test]
    async fn test_read_line() {
        let line = b"Content-Type: application/json\r\n";
        let result = Request::read_line(&line[..]).await.expect("read_line");
        assert_eq!(result, "Content-Type: application/json");
    }

    #[tokio::test]
    async fn test_read() {
        let body = ("GET /link?full=1&hello=world HTTP/1.1\r\n".to_owned()
            + "Host: foo.example.com:8000\r\n"
            + "Accept: */*\r\n"
            + "\r\n")
            .as_bytes()
            .to_vec();

        let request = Request::read(&body[..]).await.expect("request");
        assert_eq!(request.method(), &Method::Get);
        assert_eq!(request.path(), "/link");
        assert_eq!(request.params().raw("hello"), Some("world"));
        assert_eq!(request.host(), "foo.example.com:8000");
        assert_eq!(request.header("ACCEPT"), Some(&String::from("*/*")));
        assert_eq!(request.scheme(), "http");
    }

    #[tokio::test]
    async fn test_nl_before_cr() {
        let err = Request::read("GET / HTTP/1.1\n\r".as_bytes())
            .await
            .expect_err("parser should throw err");

        assert!(matches!(err, Error::MalformedRequest("nl before cr")));
    }

    #[test]
    fn test_forwarded() {
        let request = Request::get("/")
            .with_header("X-Forwarded-Proto", "https, http")
            .with_header("X-Forwarded-Host", "example.com");

        assert_eq!(request.scheme(), "https");
        assert_eq!(request.host(), "example.com");
    }

    #[test]
    fn test_mount_path() {
        let request = Request::get("bar?a=1").with_mount_path("/foo/");
        assert_eq!(request.path(), "/bar");
        assert_eq!(request.mount_path(), "/foo");
    }
}
