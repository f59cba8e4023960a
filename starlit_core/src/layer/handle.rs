// Copyright 2026 the Starlit Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shared layer handles.

use alloc::rc::Rc;
use alloc::string::String;
use core::cell::{Ref, RefCell, RefMut};
use core::fmt;

use super::Layer;
use super::registry::WeakRegistry;
use crate::particle::SharedParticles;
use crate::viewport::SharedPointer;

/// Heap slot for one layer: attachment state followed by the layer itself.
///
/// The layer is the last field so `Rc<LayerSlot<L>>` unsizes to
/// `Rc<LayerSlot<dyn Layer>>`.
pub(crate) struct LayerSlot<L: ?Sized> {
    /// Registry this layer was attached to; `None` until attached.
    pub(crate) parent: RefCell<Option<WeakRegistry>>,
    /// Alias assigned at attach time.
    pub(crate) alias: RefCell<Option<String>>,
    pub(crate) layer: RefCell<L>,
}

/// A typed, shared handle to a layer.
///
/// Clones refer to the same layer. Keep a handle to read the layer's state
/// after attaching it (e.g. a starfield's particles).
pub struct LayerHandle<L> {
    slot: Rc<LayerSlot<L>>,
}

impl<L> Clone for LayerHandle<L> {
    fn clone(&self) -> Self {
        Self {
            slot: Rc::clone(&self.slot),
        }
    }
}

impl<L: Layer + 'static> LayerHandle<L> {
    /// Wraps `layer` in a new, unattached handle.
    #[must_use]
    pub fn new(layer: L) -> Self {
        Self {
            slot: Rc::new(LayerSlot {
                parent: RefCell::new(None),
                alias: RefCell::new(None),
                layer: RefCell::new(layer),
            }),
        }
    }

    /// Returns a type-erased handle to the same layer.
    #[must_use]
    pub fn erase(&self) -> AnyLayer {
        let slot: Rc<LayerSlot<dyn Layer>> = self.slot.clone();
        AnyLayer { slot }
    }
}

impl<L> LayerHandle<L> {
    /// Borrows the layer.
    ///
    /// # Panics
    ///
    /// Panics if the layer is currently borrowed mutably (e.g. from inside
    /// its own `draw_frame`).
    #[must_use]
    pub fn borrow(&self) -> Ref<'_, L> {
        self.slot.layer.borrow()
    }

    /// Borrows the layer mutably.
    ///
    /// # Panics
    ///
    /// Panics if the layer is currently borrowed.
    #[must_use]
    pub fn borrow_mut(&self) -> RefMut<'_, L> {
        self.slot.layer.borrow_mut()
    }

    /// The alias assigned when the layer was attached.
    #[must_use]
    pub fn alias(&self) -> Option<String> {
        self.slot.alias.borrow().clone()
    }

    /// Returns `true` once the layer has been attached to a parent.
    #[must_use]
    pub fn is_attached(&self) -> bool {
        self.slot.parent.borrow().is_some()
    }
}

impl<L> fmt::Debug for LayerHandle<L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LayerHandle")
            .field("alias", &self.slot.alias.borrow())
            .field("attached", &self.is_attached())
            .finish_non_exhaustive()
    }
}

impl<L: Layer + 'static> From<LayerHandle<L>> for AnyLayer {
    fn from(handle: LayerHandle<L>) -> Self {
        handle.erase()
    }
}

/// A type-erased, shared handle to a layer.
#[derive(Clone)]
pub struct AnyLayer {
    pub(crate) slot: Rc<LayerSlot<dyn Layer>>,
}

impl AnyLayer {
    /// The alias assigned when the layer was attached.
    #[must_use]
    pub fn alias(&self) -> Option<String> {
        self.slot.alias.borrow().clone()
    }

    /// Returns `true` once the layer has been attached to a parent.
    #[must_use]
    pub fn is_attached(&self) -> bool {
        self.slot.parent.borrow().is_some()
    }

    /// The layer's type name, or `None` if it is mutably borrowed right now.
    #[must_use]
    pub fn type_name(&self) -> Option<&'static str> {
        self.slot.layer.try_borrow().ok().map(|l| l.type_name())
    }

    /// The particle pool the layer publishes.
    ///
    /// `None` if the layer publishes none or is mutably borrowed right now.
    #[must_use]
    pub fn particles(&self) -> Option<SharedParticles> {
        self.slot.layer.try_borrow().ok()?.particles()
    }

    /// The pointer record the layer publishes.
    ///
    /// `None` if the layer publishes none or is mutably borrowed right now.
    #[must_use]
    pub fn pointer(&self) -> Option<SharedPointer> {
        self.slot.layer.try_borrow().ok()?.pointer()
    }

    /// Returns `true` if both handles refer to the same layer.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.slot, &other.slot)
    }

    pub(crate) fn layer(&self) -> &RefCell<dyn Layer> {
        &self.slot.layer
    }

    pub(crate) fn set_attachment(&self, parent: Option<WeakRegistry>, alias: Option<String>) {
        *self.slot.parent.borrow_mut() = parent;
        *self.slot.alias.borrow_mut() = alias;
    }
}

impl fmt::Debug for AnyLayer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnyLayer")
            .field("alias", &self.slot.alias.borrow())
            .field("type_name", &self.type_name())
            .finish_non_exhaustive()
    }
}

/// A reference to a sibling layer: an alias to look up, or the layer itself.
#[derive(Clone, Debug)]
pub enum LayerRef {
    /// Resolve through the registry.
    Alias(String),
    /// Use this layer directly.
    Instance(AnyLayer),
}

impl From<&str> for LayerRef {
    fn from(alias: &str) -> Self {
        Self::Alias(alias.into())
    }
}

impl From<String> for LayerRef {
    fn from(alias: String) -> Self {
        Self::Alias(alias)
    }
}

impl From<AnyLayer> for LayerRef {
    fn from(layer: AnyLayer) -> Self {
        Self::Instance(layer)
    }
}

impl<L: Layer + 'static> From<&LayerHandle<L>> for LayerRef {
    fn from(handle: &LayerHandle<L>) -> Self {
        Self::Instance(handle.erase())
    }
}
