//! Telling views apart from everything else.
//!
//! Rendering entry points accept any [`Inspect`] value, so handlers can pass whatever they
//! have and get a readable error when it isn't a view.
use std::any::type_name;
use std::marker::PhantomData;

use super::View;

/// A value that may or may not be a view.
pub trait Inspect {
    /// The value as a view, if it is one.
    fn as_view(&self) -> Option<&dyn View> {
        None
    }

    /// Text representation of the value, used in error messages.
    fn preview(&self) -> Option<String> {
        None
    }

    fn type_name(&self) -> &'static str {
        type_name::<Self>()
    }
}

impl<V: View> Inspect for V {
    fn as_view(&self) -> Option<&dyn View> {
        Some(self)
    }
}

/// A view type, as opposed to an instance of it.
///
/// Passing the type where an instance is expected is a common mistake; this
/// makes it reportable.
pub struct ViewType<V: ?Sized>(PhantomData<V>);

impl<V: ?Sized> ViewType<V> {
    pub fn new() -> Self {
        Self(PhantomData)
    }
}

impl<V: ?Sized> Default for ViewType<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: ?Sized> Inspect for ViewType<V> {
    fn type_name(&self) -> &'static str {
        type_name::<V>()
    }
}

impl Inspect for str {
    fn preview(&self) -> Option<String> {
        Some(format!("{:?}", self))
    }
}

impl Inspect for String {
    fn preview(&self) -> Option<String> {
        self.as_str().preview()
    }
}

macro_rules! preview_display {
    ($($ty:ty),*) => {
        $(
            impl Inspect for $ty {
                fn preview(&self) -> Option<String> {
                    Some(self.to_string())
                }
            }
        )*
    };
}

preview_display!(bool, char, i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64);

impl<T: Inspect> Inspect for Option<T> {
    fn as_view(&self) -> Option<&dyn View> {
        self.as_ref().and_then(|value| value.as_view())
    }

    fn preview(&self) -> Option<String> {
        match self {
            Some(value) => value.preview(),
            None => Some("None".into()),
        }
    }
}

impl Inspect for () {
    fn preview(&self) -> Option<String> {
        Some("()".into())
    }
}
