use std::fs::write;
use std::io;
use std::pin::Pin;
use std::sync::{mpsc, Arc};
use std::task::{Context as TaskContext, Poll};
use std::time::Duration;

use parking_lot::Mutex;
use tokio::io::AsyncWrite;

use rwf_markup::http::Body;
use rwf_markup::prelude::*;
use tempdir::TempDir;

struct Foo;

impl View for Foo {
    fn view_template(&self, markup: &mut Markup<'_>) -> Result<(), Error> {
        markup.p(&[], |m| m.text("foo"));
        Ok(())
    }
}

struct Link {
    absolute: bool,
}

impl View for Link {
    fn view_template(&self, markup: &mut Markup<'_>) -> Result<(), Error> {
        let href = markup.url("/bar", self.absolute)?;
        markup.a(&[("href", href.as_str())], |m| m.text("link"));
        Ok(())
    }
}

struct Greeting;

impl View for Greeting {
    fn view_template(&self, markup: &mut Markup<'_>) -> Result<(), Error> {
        let name = markup.helpers()?.params().raw("name").unwrap_or("stranger").to_string();
        markup.h1(&[], |m| m.text(format!("Hello, {}", name)));
        Ok(())
    }
}

struct Square;

impl View for Square {
    fn view_template(&self, markup: &mut Markup<'_>) -> Result<(), Error> {
        markup.svg(&[("viewBox", "0 0 10 10")], |m| {
            m.rect(&[("width", "10"), ("height", "10")], |_| ())
        });
        Ok(())
    }

    fn kind(&self) -> Kind {
        Kind::Svg
    }
}

struct Document;

impl View for Document {
    fn view_template(&self, markup: &mut Markup<'_>) -> Result<(), Error> {
        markup.html(&[], |m| {
            m.head(&[], |m| m.title(&[], |m| m.text("Streaming")));
            m.body(&[], |m| {
                m.p(&[], |m| m.text(1));
                m.flush();
                m.p(&[], |m| m.text(2));
            });
        });
        Ok(())
    }
}

/// Waits for the first chunk to reach the client before writing the second one.
struct Paced {
    events: Arc<Mutex<Vec<String>>>,
    sent: mpsc::Receiver<()>,
}

impl View for Paced {
    fn view_template(&self, markup: &mut Markup<'_>) -> Result<(), Error> {
        markup.p(&[], |m| m.text(1));
        self.events.lock().push("view flushing <p>1</p>".into());
        markup.flush();

        let _ = self.sent.recv_timeout(Duration::from_secs(5));

        markup.p(&[], |m| m.text(2));
        self.events.lock().push("view finished".into());
        Ok(())
    }
}

/// Client connection recording the chunks it receives.
struct Wire {
    events: Arc<Mutex<Vec<String>>>,
    first_chunk: Option<mpsc::Sender<()>>,
}

impl AsyncWrite for Wire {
    fn poll_write(
        mut self: Pin<&mut Self>,
        _cx: &mut TaskContext<'_>,
        buf: &[u8],
    ) -> Poll<io::Result<usize>> {
        let text = String::from_utf8_lossy(buf).to_string();

        if text.starts_with("<p>") {
            self.events.lock().push(format!("wire {}", text));
            if let Some(first_chunk) = self.first_chunk.take() {
                let _ = first_chunk.send(());
            }
        }

        Poll::Ready(Ok(buf.len()))
    }

    fn poll_flush(self: Pin<&mut Self>, _cx: &mut TaskContext<'_>) -> Poll<io::Result<()>> {
        Poll::Ready(Ok(()))
    }

    fn poll_shutdown(self: Pin<&mut Self>, _cx: &mut TaskContext<'_>) -> Poll<io::Result<()>> {
        Poll::Ready(Ok(()))
    }
}

fn settings() -> Settings {
    Settings::default()
        .views("/does/not/exist")
        .default_layout("layout")
        .template("layout", "<html><body><%= yield %></body></html>")
        .template("admin", "<div class=\"admin\">{{ content }}</div>")
}

fn scope(request: Request) -> Scope {
    Scope::new(request, Arc::new(settings()))
}

async fn body(response: Response) -> String {
    String::from_utf8(response.into_body().collect().await).unwrap()
}

#[tokio::test]
async fn test_render_view() {
    let response = scope(Request::get("/foo"))
        .respond(&Foo, RenderOptions::new())
        .unwrap();

    assert_eq!(response.media_type(), Some("text/html"));
    assert_eq!(response.headers().get("content-length").map(|s| s.as_str()), Some("10"));
    assert_eq!(body(response).await, "<p>foo</p>");
}

#[test]
fn test_url_helpers() {
    let mut scope = scope(Request::get("/link"));
    let rendered = scope.markup(&Link { absolute: false }, RenderOptions::new()).unwrap();
    assert_eq!(rendered.body(), Some("<a href=\"/bar\">link</a>"));

    let request = Request::get("/link")
        .with_mount_path("/foo")
        .with_header("Host", "foo.example.com");

    let mut mounted = Scope::new(request, Arc::new(settings()));
    let rendered = mounted.markup(&Link { absolute: false }, RenderOptions::new()).unwrap();
    assert_eq!(rendered.body(), Some("<a href=\"/foo/bar\">link</a>"));

    let rendered = mounted.markup(&Link { absolute: true }, RenderOptions::new()).unwrap();
    assert_eq!(
        rendered.body(),
        Some("<a href=\"http://foo.example.com/foo/bar\">link</a>")
    );
}

#[test]
fn test_url_https() {
    let request = Request::get("/link")
        .with_scheme("https")
        .with_header("Host", "foo.example.com");

    let mut scope = Scope::new(request, Arc::new(settings()));
    let rendered = scope.markup(&Link { absolute: true }, RenderOptions::new()).unwrap();
    assert_eq!(
        rendered.body(),
        Some("<a href=\"https://foo.example.com/bar\">link</a>")
    );
}

#[test]
fn test_params_visible() {
    let mut scope = scope(Request::get("/greet?name=R%C3%BCm+%3C3"));
    let rendered = scope.markup(&Greeting, RenderOptions::new()).unwrap();
    assert_eq!(rendered.body(), Some("<h1>Hello, Rüm &lt;3</h1>"));
}

#[test]
fn test_content_type() {
    let mut scope = scope(Request::get("/"));
    scope
        .markup(&Foo, RenderOptions::new().content_type("xml"))
        .unwrap();
    assert_eq!(scope.response().media_type(), Some("application/xml"));
    assert_eq!(
        scope.response().content_type(),
        Some("application/xml;charset=utf-8")
    );
}

#[test]
fn test_svg() {
    let mut svg = scope(Request::get("/"));
    svg.markup(&Square, RenderOptions::new()).unwrap();
    assert_eq!(svg.response().media_type(), Some("image/svg+xml"));

    let mut with_layout = scope(Request::get("/"));
    let rendered = with_layout
        .markup(&Square, RenderOptions::new().layout(true))
        .unwrap();
    assert_eq!(with_layout.response().media_type(), Some("text/html"));
    assert!(rendered.body().unwrap().starts_with("<html><body><svg"));

    let mut explicit = scope(Request::get("/"));
    explicit
        .markup(&Square, RenderOptions::new().content_type("text"))
        .unwrap();
    assert_eq!(explicit.response().media_type(), Some("text/plain"));

    let mut explicit_with_layout = scope(Request::get("/"));
    let rendered = explicit_with_layout
        .markup(&Square, RenderOptions::new().layout(true).content_type("xml"))
        .unwrap();
    assert_eq!(
        explicit_with_layout.response().media_type(),
        Some("application/xml")
    );
    assert!(rendered.body().unwrap().starts_with("<html><body><svg"));
}

#[test]
fn test_layouts() {
    let mut scope = scope(Request::get("/"));

    let rendered = scope
        .markup(&Foo, RenderOptions::new().layout(true).layout_engine("erb"))
        .unwrap();
    assert_eq!(rendered.body(), Some("<html><body><p>foo</p></body></html>"));

    let rendered = scope
        .markup(&Foo, RenderOptions::new().layout("admin").layout_engine("jinja"))
        .unwrap();
    assert_eq!(rendered.body(), Some("<div class=\"admin\"><p>foo</p></div>"));

    let rendered = scope
        .markup(&Foo, RenderOptions::new().layout(false))
        .unwrap();
    assert_eq!(rendered.body(), Some("<p>foo</p>"));
}

#[test]
fn test_layout_file() {
    let dir = TempDir::new("rwf-markup-layouts").expect("tempdir");
    write(
        dir.path().join("site.erb"),
        "<!DOCTYPE html>\n<main><%= yield %></main>\n",
    )
    .unwrap();

    let settings = Settings::default().views(dir.path());
    let mut scope = Scope::new(Request::get("/"), Arc::new(settings));

    let rendered = scope
        .markup(&Foo, RenderOptions::new().layout("site").layout_engine("erb"))
        .unwrap();
    assert_eq!(
        rendered.body(),
        Some("<!DOCTYPE html>\n<main><p>foo</p></main>\n")
    );

    let err = scope
        .markup(&Foo, RenderOptions::new().layout("missing").layout_engine("erb"))
        .unwrap_err();
    assert!(matches!(err, Error::TemplateDoesNotExist(_)));
    assert_eq!(err.code(), 404);
}

#[test]
fn test_not_a_view() {
    let mut scope = scope(Request::get("/"));

    let err = scope.markup("<p>foo</p>", RenderOptions::new()).unwrap_err();
    assert_eq!(
        err.to_string(),
        "Expected a view instance, received \"<p>foo</p>\""
    );

    let long = "<p>".to_string() + &"a".repeat(100) + "</p>";
    let err = scope.markup(&long, RenderOptions::new()).unwrap_err();
    assert_eq!(
        err.to_string(),
        "Expected a view instance, received \"<p>aaaaaaaaaaaaaaaaaaaaaaaaaaaa…"
    );

    let err = scope
        .markup(&ViewType::<Foo>::new(), RenderOptions::new())
        .unwrap_err();
    assert!(err.to_string().starts_with("Expected a view instance, received "));
    assert!(err.to_string().ends_with("Foo"));

    // Nothing was rendered.
    assert_eq!(scope.response().media_type(), Some("text/html"));
}

#[test]
fn test_layout_with_stream() {
    let mut scope = scope(Request::get("/"));
    let err = scope
        .markup(
            &Foo,
            RenderOptions::new()
                .content_type("xml")
                .layout(true)
                .stream(true),
        )
        .unwrap_err();

    assert!(matches!(err, Error::IncompatibleOption(_)));
    assert_eq!(scope.response().media_type(), Some("text/html"));
    assert!(!scope.response().headers().contains("transfer-encoding"));
}

#[tokio::test]
async fn test_stream() {
    let mut scope = scope(Request::get("/"));
    let rendered = scope
        .markup(&Document, RenderOptions::new().stream(true))
        .unwrap();
    assert_eq!(rendered, Rendered::Streaming);

    let response = scope.finish(rendered);
    assert!(response.headers().get("content-length").is_none());
    assert!(matches!(response.into_body(), Body::Stream(_)));
}

#[tokio::test]
async fn test_stream_serialized() {
    let mut scope = scope(Request::get("/"));
    let rendered = scope
        .markup(&Document, RenderOptions::new().stream(true))
        .unwrap();
    let response = scope.finish(rendered);

    let mut out = vec![];
    response.send(&mut out).await.unwrap();
    let out = String::from_utf8(out).unwrap();

    let (head, body) = out.split_once("\r\n\r\n").unwrap();
    assert!(head.contains("transfer-encoding: chunked"));
    assert!(!head.contains("content-length"));

    let first = "<html><head><title>Streaming</title></head><body><p>1</p>";
    let second = "<p>2</p></body></html>";
    assert_eq!(
        body,
        format!(
            "{:x}\r\n{}\r\n{:x}\r\n{}\r\n0\r\n\r\n",
            first.len(),
            first,
            second.len(),
            second
        )
    );
}

#[tokio::test]
async fn test_stream_collected() {
    let mut scope = scope(Request::get("/"));
    let rendered = scope
        .markup(&Document, RenderOptions::new().stream(true))
        .unwrap();
    let response = scope.finish(rendered);

    assert_eq!(
        body(response).await,
        "<html><head><title>Streaming</title></head><body><p>1</p><p>2</p></body></html>"
    );
}

#[tokio::test]
async fn test_stream_sent_while_rendering() {
    let events = Arc::new(Mutex::new(vec![]));
    let (first_chunk, sent) = mpsc::channel();

    let mut scope = scope(Request::get("/"));
    let pending = scope.pending_stream();

    let view = Paced {
        events: events.clone(),
        sent,
    };
    let render = tokio::task::spawn_blocking(move || {
        scope
            .respond(&view, RenderOptions::new().stream(true))
            .map(|_| ())
    });

    let response = pending.wait().await.unwrap();
    assert!(response.headers().get("content-length").is_none());

    let mut wire = Wire {
        events: events.clone(),
        first_chunk: Some(first_chunk),
    };
    response.send(&mut wire).await.unwrap();
    render.await.unwrap().unwrap();

    assert_eq!(
        *events.lock(),
        vec![
            "view flushing <p>1</p>",
            "wire <p>1</p>",
            "view finished",
            "wire <p>2</p>",
        ]
    );
}
