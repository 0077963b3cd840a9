//! Component views, the **V** in MVC.
//!
//! A view is a Rust type that writes markup through [`Markup`]. Views can be rendered into a
//! string with [`View::call`], or into an output channel with [`View::call_into`], which is how
//! responses are streamed.
//!
//! # Example
//!
//! ```
//! use rwf_markup::view::*;
//! use rwf_markup::Error;
//!
//! struct Hello {
//!     name: String,
//! }
//!
//! impl View for Hello {
//!     fn view_template(&self, markup: &mut Markup<'_>) -> Result<(), Error> {
//!         markup.h1(&[], |m| m.text(&self.name));
//!         Ok(())
//!     }
//! }
//!
//! let hello = Hello { name: "<Rwf>".into() };
//! let html = hello.call(&Context::new()).unwrap();
//!
//! assert_eq!(html, "<h1>&lt;Rwf&gt;</h1>");
//! ```
pub mod context;
pub mod inspect;
pub mod markup;

pub use context::{Context, Helpers};
pub use inspect::{Inspect, ViewType};
pub use markup::Markup;

use crate::Error;

/// What a view produces. Decides the default content type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Kind {
    #[default]
    Html,
    /// Scalable vector graphics, served as `image/svg+xml`.
    Svg,
}

/// Something a view can write its output into.
pub trait Channel {
    fn write(&mut self, chunk: &str) -> Result<(), Error>;
}

impl Channel for String {
    fn write(&mut self, chunk: &str) -> Result<(), Error> {
        self.push_str(chunk);
        Ok(())
    }
}

impl Channel for Vec<String> {
    fn write(&mut self, chunk: &str) -> Result<(), Error> {
        if !chunk.is_empty() {
            self.push(chunk.to_string());
        }
        Ok(())
    }
}

/// A renderable component.
pub trait View {
    /// Write the view's markup.
    fn view_template(&self, markup: &mut Markup<'_>) -> Result<(), Error>;

    fn kind(&self) -> Kind {
        Kind::Html
    }

    /// Render the view into a string.
    fn call(&self, context: &Context<'_>) -> Result<String, Error> {
        let mut markup = Markup::new(context, None);
        self.view_template(&mut markup)?;
        markup.finish()
    }

    /// Render the view into a channel.
    ///
    /// Output is written every time the view calls [`Markup::flush`], and once more when it's done.
    fn call_into(&self, channel: &mut dyn Channel, context: &Context<'_>) -> Result<(), Error> {
        let mut markup = Markup::new(context, Some(channel));
        self.view_template(&mut markup)?;
        markup.finish().map(|_| ())
    }
}

impl<V: View + ?Sized> View for Box<V> {
    fn view_template(&self, markup: &mut Markup<'_>) -> Result<(), Error> {
        (**self).view_template(markup)
    }

    fn kind(&self) -> Kind {
        (**self).kind()
    }
}
