// Copyright 2026 the Starlit Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shared surface size and pointer bus.
//!
//! A [`Viewport`] is created by the root [`Surface`](crate::surface::Surface)
//! and cloned (by reference) into every layer bind. Backends push size
//! changes and pointer moves into it; every holder sees them immediately.

use alloc::rc::Rc;
use alloc::vec::Vec;
use core::cell::{Cell, RefCell};
use core::fmt;

use kurbo::{Point, Size};

/// A pointer position written by the viewport and read by layers.
///
/// Clones share the same cell.
#[derive(Clone, Default)]
pub struct SharedPointer(Rc<Cell<Point>>);

impl SharedPointer {
    /// Creates a pointer record at the origin.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the current position.
    #[must_use]
    pub fn get(&self) -> Point {
        self.0.get()
    }

    /// Overwrites the current position.
    pub fn set(&self, p: Point) {
        self.0.set(p);
    }

    /// Returns `true` if both handles refer to the same record.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for SharedPointer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("SharedPointer").field(&self.get()).finish()
    }
}

#[derive(Default)]
struct ViewportInner {
    size: Cell<Size>,
    pointers: RefCell<Vec<SharedPointer>>,
}

/// Shared size record and pointer subscriber list.
///
/// Clones are handles to the same viewport.
#[derive(Clone, Default)]
pub struct Viewport {
    inner: Rc<ViewportInner>,
}

impl Viewport {
    /// Creates a zero-sized viewport with no pointer subscribers.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the current surface size.
    #[must_use]
    pub fn size(&self) -> Size {
        self.inner.size.get()
    }

    /// Records a new surface size.
    pub fn resize(&self, size: Size) {
        self.inner.size.set(size);
    }

    /// Subscribes `pointer` to pointer-move dispatches.
    ///
    /// Subscribing the same record twice has no extra effect.
    pub fn subscribe_pointer(&self, pointer: SharedPointer) {
        let mut pointers = self.inner.pointers.borrow_mut();
        if !pointers.iter().any(|p| p.ptr_eq(&pointer)) {
            pointers.push(pointer);
        }
    }

    /// Returns the number of pointer subscribers.
    #[must_use]
    pub fn pointer_subscribers(&self) -> usize {
        self.inner.pointers.borrow().len()
    }

    /// Delivers a pointer move.
    ///
    /// `client` is the pointer in window coordinates and `offset` is the
    /// surface's top-left corner in the same space; subscribers receive
    /// `client - offset`.
    pub fn dispatch_pointer(&self, client: Point, offset: Point) {
        let local = Point::new(client.x - offset.x, client.y - offset.y);
        for pointer in self.inner.pointers.borrow().iter() {
            pointer.set(local);
        }
    }

    /// Moves every pointer subscriber of `self` into `target`.
    pub(crate) fn transfer_pointers(&self, target: &Self) {
        if self.ptr_eq(target) {
            return;
        }
        let pointers = core::mem::take(&mut *self.inner.pointers.borrow_mut());
        for pointer in pointers {
            target.subscribe_pointer(pointer);
        }
    }

    /// Returns `true` if both handles refer to the same viewport.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl fmt::Debug for Viewport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Viewport")
            .field("size", &self.size())
            .field("pointer_subscribers", &self.pointer_subscribers())
            .finish_non_exhaustive()
    }
}
