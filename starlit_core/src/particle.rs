// Copyright 2026 the Starlit Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Starfield particles.

use alloc::rc::Rc;
use alloc::vec::Vec;
use core::cell::{Ref, RefCell, RefMut};
use core::fmt;

use kurbo::{Point, Size};

/// How far outside the surface particles are seeded and respawned.
pub const MARGIN: f64 = 250.0;

/// A single starfield point.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Particle {
    /// Position in surface coordinates.
    pub position: Point,
    /// Size and brightness factor; also the drawn radius.
    pub scale: f64,
}

/// Per-frame drift. `z` grows particles and pushes them away from the
/// surface center; `x` and `y` translate them in proportion to their scale.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Velocity {
    /// Horizontal drift.
    pub x: f64,
    /// Vertical drift.
    pub y: f64,
    /// Depth drift.
    pub z: f64,
}

impl Velocity {
    /// No motion at all.
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0);

    /// Slow forward motion.
    pub const DEFAULT: Self = Self::new(0.0, 0.0, 0.001);

    /// Creates a velocity from its components.
    #[must_use]
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }
}

impl Default for Velocity {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl Particle {
    /// Creates a particle.
    #[must_use]
    pub const fn new(position: Point, scale: f64) -> Self {
        Self { position, scale }
    }

    /// Advances the particle by one frame within a surface of `size`.
    ///
    /// The scale grows first; the position update uses the grown scale.
    pub fn advance(&mut self, velocity: Velocity, size: Size) {
        self.scale += velocity.z;
        let half = self.scale / 2.0;
        self.position.x +=
            (self.position.x - size.width / 2.0) * half * velocity.z + velocity.x * self.scale;
        self.position.y +=
            (self.position.y - size.height / 2.0) * half * velocity.z + velocity.y * self.scale;
    }

    /// Returns `true` if the particle left the live area and must respawn.
    ///
    /// The live area is `[0, width + MARGIN] × [0, height]`; only the right
    /// edge is extended.
    #[must_use]
    pub fn is_out_of_bounds(&self, size: Size) -> bool {
        let Point { x, y } = self.position;
        x < 0.0 || x > size.width + MARGIN || y < 0.0 || y > size.height
    }
}

/// A particle pool shared between its owning starfield and any readers.
///
/// Clones share the same pool. The owner mutates particles in place; the
/// pool never changes length after allocation.
#[derive(Clone, Default)]
pub struct SharedParticles(Rc<RefCell<Vec<Particle>>>);

impl SharedParticles {
    /// Creates an empty pool.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Borrows the particles.
    ///
    /// # Panics
    ///
    /// Panics if the pool is currently borrowed mutably.
    #[must_use]
    pub fn borrow(&self) -> Ref<'_, Vec<Particle>> {
        self.0.borrow()
    }

    /// Borrows the particles mutably.
    ///
    /// # Panics
    ///
    /// Panics if the pool is currently borrowed.
    #[must_use]
    pub fn borrow_mut(&self) -> RefMut<'_, Vec<Particle>> {
        self.0.borrow_mut()
    }

    /// Returns the number of particles.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.borrow().len()
    }

    /// Returns `true` if the pool holds no particles.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns `true` if both handles refer to the same pool.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for SharedParticles {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SharedParticles")
            .field("len", &self.len())
            .finish_non_exhaustive()
    }
}
