//! A container that arranges a dynamic number of children into a fixed number of
//! columns. Every child is stretched to the same column width; rows are either
//! all the same height or as tall as their tallest child. Optional separators
//! are drawn between columns and between rows.
//!
//! The algorithm lives in [`layout::grid`] as a set of pure functions. The
//! [`StretchGrid`] widget owns configuration and children, runs the algorithm
//! when the host asks it to measure, lay out, or draw, and can populate itself
//! from an [`Adapter`].

mod adapter;
mod color;
mod drawable;
mod error;
mod events;
mod grid;
pub mod layout;
mod measure;
mod view;

pub use adapter::{Adapter, ArrayAdapter, DataSetObservable, DataSetObserver};
pub use color::ColorRef;
pub use drawable::{Canvas, ColorDrawable, Drawable};
pub use error::{Error, Result};
pub use events::{OnItemClickListener, SoundEffect};
pub use grid::builder::{GridAttributes, StretchGridBuilder};
pub use grid::StretchGrid;
pub use layout::{Padding, SeparatorKind, SeparatorRect, SeparatorSize};
pub use measure::{MeasureMode, MeasureSpec};
pub use view::View;

use core::marker::PhantomData;
use static_assertions::assert_not_impl_any;
use std::cell::Cell;
use std::rc::Rc;
#[cfg(debug_assertions)]
use std::thread::{self, ThreadId};

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub struct Size {
    pub width: i32,
    pub height: i32,
}

impl Size {
    pub const ZERO: Size = Size::new(0, 0);

    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }
}

/// A rectangle in the grid's coordinate space. `right` and `bottom` are
/// exclusive.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub struct Rect {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl Rect {
    pub const fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    pub const fn from_origin_size(left: i32, top: i32, size: Size) -> Self {
        Self::new(left, top, left + size.width, top + size.height)
    }

    pub const fn width(&self) -> i32 {
        self.right - self.left
    }

    pub const fn height(&self) -> i32 {
        self.bottom - self.top
    }

    pub const fn size(&self) -> Size {
        Size::new(self.width(), self.height())
    }

    pub const fn is_empty(&self) -> bool {
        self.width() <= 0 || self.height() <= 0
    }
}

/// Wraps a function that can handle an event of a given type.
pub struct EventHandler<E> {
    pub(crate) handler: Box<dyn Fn(E)>,
}

impl<E> EventHandler<E> {
    pub fn new<H>(handler: H) -> Self
    where
        H: Fn(E) + 'static,
    {
        Self {
            handler: Box::new(handler),
        }
    }

    pub(crate) fn call(&self, event: E) {
        (self.handler)(event)
    }
}

impl<E> core::fmt::Debug for EventHandler<E> {
    fn fmt(&self, fmt: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(fmt, "EventHandler")
    }
}

fn clone_cell_opt_rc<T: ?Sized>(rc: &Cell<Option<Rc<T>>>) -> Option<Rc<T>> {
    let value = rc.take();
    let result = value.clone();
    rc.set(value);
    result
}

#[derive(Clone, Debug)]
struct StuckToThread {
    #[cfg(debug_assertions)]
    thread_id: ThreadId,
    not_send: PhantomData<*mut u8>,
}

assert_not_impl_any!(StuckToThread: Sync, Send, Copy);

impl StuckToThread {
    pub fn new() -> Self {
        Self {
            #[cfg(debug_assertions)]
            thread_id: thread::current().id(),
            not_send: PhantomData,
        }
    }

    pub fn check(&self) {
        #[cfg(debug_assertions)]
        {
            debug_assert_eq!(
                thread::current().id(),
                self.thread_id,
                "Expected this object to be used only on the thread that created it."
            );
        }
    }
}
