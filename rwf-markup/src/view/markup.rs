//! Markup writer handed to views.
//!
//! Writing is infallible from the view's point of view: if the output channel fails (e.g. the
//! client went away during streaming), the first error is kept, further output is dropped, and
//! the error is returned once the view finishes.
use std::fmt::Display;

use super::{Channel, Context, Helpers, View};
use crate::{escape, Error};

macro_rules! elements {
    ($($(#[$meta:meta])* $name:ident),* $(,)?) => {
        $(
            $(#[$meta])*
            pub fn $name(&mut self, attributes: &[(&str, &str)], content: impl FnOnce(&mut Self)) {
                self.element(stringify!($name), attributes, content)
            }
        )*
    };
}

macro_rules! void_elements {
    ($($name:ident),* $(,)?) => {
        $(
            pub fn $name(&mut self, attributes: &[(&str, &str)]) {
                self.void_element(stringify!($name), attributes)
            }
        )*
    };
}

pub struct Markup<'a> {
    buffer: String,
    sink: Option<&'a mut dyn Channel>,
    context: &'a Context<'a>,
    error: Option<Error>,
}

impl<'a> Markup<'a> {
    pub(crate) fn new(context: &'a Context<'a>, sink: Option<&'a mut dyn Channel>) -> Self {
        Self {
            buffer: String::new(),
            sink,
            context,
            error: None,
        }
    }

    /// Write an element with its content.
    pub fn element(
        &mut self,
        name: &str,
        attributes: &[(&str, &str)],
        content: impl FnOnce(&mut Self),
    ) {
        self.open_tag(name, attributes);
        content(self);
        self.buffer.push_str("</");
        self.buffer.push_str(name);
        self.buffer.push('>');
    }

    /// Write an element that can't have content, e.g. `<br>`.
    pub fn void_element(&mut self, name: &str, attributes: &[(&str, &str)]) {
        self.open_tag(name, attributes);
    }

    fn open_tag(&mut self, name: &str, attributes: &[(&str, &str)]) {
        self.buffer.push('<');
        self.buffer.push_str(name);

        for (name, value) in attributes {
            self.buffer.push(' ');
            self.buffer.push_str(name);
            self.buffer.push_str("=\"");
            self.buffer.push_str(&escape(value));
            self.buffer.push('"');
        }

        self.buffer.push('>');
    }

    /// Write escaped text.
    pub fn text(&mut self, text: impl Display) {
        self.buffer.push_str(&escape(&text.to_string()));
    }

    /// Write markup as-is, without escaping.
    pub fn raw(&mut self, html: impl AsRef<str>) {
        self.buffer.push_str(html.as_ref());
    }

    /// Render another view in place.
    pub fn render(&mut self, view: &dyn View) {
        if let Err(err) = view.view_template(self) {
            self.fail(err);
        }
    }

    /// Send everything written so far to the output channel.
    ///
    /// Does nothing when the view isn't rendered into a channel.
    pub fn flush(&mut self) {
        if self.error.is_some() {
            self.buffer.clear();
            return;
        }

        if let Some(sink) = self.sink.as_mut() {
            let result = sink.write(&self.buffer);
            self.buffer.clear();

            if let Err(err) = result {
                self.fail(err);
            }
        }
    }

    /// Helpers of the request this view is rendered for.
    pub fn helpers(&self) -> Result<&'a dyn Helpers, Error> {
        self.context.helpers().ok_or(Error::MissingContext)
    }

    /// Build a URL through the request helpers.
    pub fn url(&self, path: &str, absolute: bool) -> Result<String, Error> {
        Ok(self.helpers()?.url(path, absolute))
    }

    fn fail(&mut self, err: Error) {
        if self.error.is_none() {
            self.error = Some(err);
        }
    }

    /// Finish rendering. Buffered output is returned, or flushed if there is a channel.
    pub(crate) fn finish(mut self) -> Result<String, Error> {
        if self.sink.is_some() {
            self.flush();
        }

        match self.error.take() {
            Some(err) => Err(err),
            None => Ok(std::mem::take(&mut self.buffer)),
        }
    }

    elements!(
        a, article, aside, body, button, code, div, em, footer, form, h1, h2, h3, head, header,
        html, label, li, main, nav, ol, option, p, pre, section, select, span, strong, table,
        tbody, td, textarea, th, thead, title, tr, ul,
    );

    elements!(
        /// SVG root element.
        svg,
        circle, ellipse, g, line, path, polygon, polyline, rect,
    );

    void_elements!(br, hr, img, input, link, meta);
}
