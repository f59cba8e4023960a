// Copyright 2026 the Starlit Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Alias-keyed registry shared by a root surface and its layers.

use alloc::format;
use alloc::rc::{Rc, Weak};
use alloc::string::String;
use alloc::vec::Vec;
use core::cell::RefCell;
use core::fmt;

use super::handle::{AnyLayer, LayerRef};
use crate::error::BindError;

/// The alias reserved for a root surface's own slot.
pub const ROOT_ALIAS: &str = "root";

pub(crate) struct Entry {
    pub(crate) alias: String,
    pub(crate) z_index: i32,
    seq: u64,
    pub(crate) layer: AnyLayer,
}

/// Entries kept sorted by `(z_index, seq)`, i.e. draw order.
#[derive(Default)]
struct Registry {
    entries: Vec<Entry>,
    next_seq: u64,
}

/// A shared handle to a registry.
///
/// Clones refer to the same registry; an insertion through any handle is
/// visible through all of them.
#[derive(Clone)]
pub struct RegistryHandle {
    inner: Rc<RefCell<Registry>>,
}

/// A non-owning registry reference, held by attached layers.
#[derive(Clone)]
pub(crate) struct WeakRegistry(Weak<RefCell<Registry>>);

impl WeakRegistry {
    pub(crate) fn upgrade(&self) -> Option<RegistryHandle> {
        self.0.upgrade().map(|inner| RegistryHandle { inner })
    }
}

impl RegistryHandle {
    pub(crate) fn new() -> Self {
        Self {
            inner: Rc::new(RefCell::new(Registry::default())),
        }
    }

    pub(crate) fn downgrade(&self) -> WeakRegistry {
        WeakRegistry(Rc::downgrade(&self.inner))
    }

    /// Returns `true` if both handles refer to the same registry.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }

    /// Number of entries, root slot included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.borrow().entries.len()
    }

    /// Returns `true` if the registry has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns `true` if an entry is registered under `alias`.
    #[must_use]
    pub fn contains(&self, alias: &str) -> bool {
        self.inner.borrow().entries.iter().any(|e| e.alias == alias)
    }

    /// Returns the layer registered under `alias`.
    #[must_use]
    pub fn get(&self, alias: &str) -> Option<AnyLayer> {
        self.inner
            .borrow()
            .entries
            .iter()
            .find(|e| e.alias == alias)
            .map(|e| e.layer.clone())
    }

    /// Returns the z-index of the entry registered under `alias`.
    #[must_use]
    pub fn z_index(&self, alias: &str) -> Option<i32> {
        self.inner
            .borrow()
            .entries
            .iter()
            .find(|e| e.alias == alias)
            .map(|e| e.z_index)
    }

    /// Returns `(alias, z_index)` for every entry, in draw order.
    #[must_use]
    pub fn entries(&self) -> Vec<(String, i32)> {
        self.inner
            .borrow()
            .entries
            .iter()
            .map(|e| (e.alias.clone(), e.z_index))
            .collect()
    }

    /// Looks up an alias, or passes an instance through unchanged.
    pub fn resolve(&self, target: &LayerRef) -> Result<AnyLayer, BindError> {
        match target {
            LayerRef::Alias(alias) => self
                .get(alias)
                .ok_or_else(|| BindError::UnknownAlias(alias.clone())),
            LayerRef::Instance(layer) => Ok(layer.clone()),
        }
    }

    /// Picks the first free name for a new entry.
    ///
    /// The first non-empty candidate is the base; it is used as is if free,
    /// otherwise `base2`, `base3`, … until one is free.
    pub(crate) fn unique_alias(&self, candidates: &[Option<&str>]) -> String {
        let base = candidates
            .iter()
            .flatten()
            .copied()
            .find(|c| !c.is_empty())
            .unwrap_or("layer");
        if !self.contains(base) {
            return base.into();
        }
        let mut k = 2_u32;
        loop {
            let name = format!("{base}{k}");
            if !self.contains(&name) {
                return name;
            }
            k += 1;
        }
    }

    pub(crate) fn insert(&self, alias: String, z_index: i32, layer: AnyLayer) {
        let mut reg = self.inner.borrow_mut();
        let seq = reg.next_seq;
        reg.next_seq += 1;
        let at = reg
            .entries
            .partition_point(|e| (e.z_index, e.seq) <= (z_index, seq));
        reg.entries.insert(
            at,
            Entry {
                alias,
                z_index,
                seq,
                layer,
            },
        );
    }

    pub(crate) fn remove(&self, alias: &str) -> Option<AnyLayer> {
        let mut reg = self.inner.borrow_mut();
        let at = reg.entries.iter().position(|e| e.alias == alias)?;
        Some(reg.entries.remove(at).layer)
    }

    /// Removes and returns every entry, in draw order.
    pub(crate) fn drain(&self) -> Vec<Entry> {
        core::mem::take(&mut self.inner.borrow_mut().entries)
    }

    /// Snapshot of `(alias, z_index, layer)` in draw order.
    pub(crate) fn draw_order(&self) -> Vec<(String, i32, AnyLayer)> {
        self.inner
            .borrow()
            .entries
            .iter()
            .map(|e| (e.alias.clone(), e.z_index, e.layer.clone()))
            .collect()
    }
}

impl fmt::Debug for RegistryHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.entries()).finish()
    }
}
