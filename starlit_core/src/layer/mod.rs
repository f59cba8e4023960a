// Copyright 2026 the Starlit Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Layer capability trait and shared registry.
//!
//! A *layer* is one renderable component attached to a root
//! [`Surface`](crate::surface::Surface). Every layer implements [`Layer`]:
//!
//! - [`on_bind`](Layer::on_bind) runs once, after the layer has been entered
//!   into its parent's registry. It may resolve siblings by alias.
//! - [`draw_frame`](Layer::draw_frame) renders exactly one frame. Clearing
//!   the surface and requesting the next frame belong to the root.
//!
//! Layers are held through a [`LayerHandle`]. The root and every attached
//! layer observe one registry: attaching never copies it.
//!
//! # Cross-layer access
//!
//! Layers that publish state for siblings do so through typed accessors on
//! the trait ([`particles`](Layer::particles), [`pointer`](Layer::pointer)).
//! Consumers resolve them once at bind time and keep the shared handle.

mod handle;
mod registry;

pub use handle::{AnyLayer, LayerHandle, LayerRef};
pub use registry::{ROOT_ALIAS, RegistryHandle};

pub(crate) use registry::WeakRegistry;

use kurbo::Size;

use crate::canvas::Canvas2d;
use crate::error::{BindError, DrawError};
use crate::particle::SharedParticles;
use crate::trace::Tracer;
use crate::viewport::{SharedPointer, Viewport};

/// A renderable, independently updatable component.
pub trait Layer {
    /// A short lowercase name for the layer's kind, used as the last-resort
    /// alias (e.g. `"starfield"`).
    fn type_name(&self) -> &'static str;

    /// The alias this layer prefers when the caller supplies none.
    fn default_alias(&self) -> Option<&'static str> {
        None
    }

    /// One-time setup after the layer joined a registry.
    ///
    /// The drawing context may not exist yet; do not draw here.
    fn on_bind(&mut self, cx: &mut BindContext<'_>) -> Result<(), BindError> {
        _ = cx;
        Ok(())
    }

    /// Renders this layer's contribution to one frame.
    fn draw_frame(&mut self, cx: &mut FrameContext<'_, '_>) -> Result<(), DrawError> {
        _ = cx;
        Ok(())
    }

    /// The particle pool this layer publishes, if any.
    fn particles(&self) -> Option<SharedParticles> {
        None
    }

    /// The pointer record this layer publishes, if any.
    fn pointer(&self) -> Option<SharedPointer> {
        None
    }
}

/// What a layer can see while binding.
#[derive(Debug)]
pub struct BindContext<'a> {
    registry: &'a RegistryHandle,
    viewport: &'a Viewport,
    alias: &'a str,
}

impl<'a> BindContext<'a> {
    pub(crate) fn new(registry: &'a RegistryHandle, viewport: &'a Viewport, alias: &'a str) -> Self {
        Self {
            registry,
            viewport,
            alias,
        }
    }

    /// The alias this layer was registered under.
    #[must_use]
    pub fn alias(&self) -> &str {
        self.alias
    }

    /// The shared viewport.
    #[must_use]
    pub fn viewport(&self) -> &Viewport {
        self.viewport
    }

    /// Resolves `target` against the shared registry.
    ///
    /// Aliases are looked up; instances are returned unchanged.
    pub fn resolve_layer(&self, target: &LayerRef) -> Result<AnyLayer, BindError> {
        self.registry.resolve(target)
    }
}

/// What a layer can use while drawing one frame.
pub struct FrameContext<'a, 't> {
    canvas: &'a mut dyn Canvas2d,
    size: Size,
    frame_index: u64,
    tracer: &'a mut Tracer<'t>,
}

impl core::fmt::Debug for FrameContext<'_, '_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("FrameContext")
            .field("size", &self.size)
            .field("frame_index", &self.frame_index)
            .finish_non_exhaustive()
    }
}

impl<'a, 't> FrameContext<'a, 't> {
    /// Creates a frame context.
    ///
    /// The root surface builds these; constructing one directly is useful
    /// for driving a single layer in isolation.
    pub fn new(
        canvas: &'a mut dyn Canvas2d,
        size: Size,
        frame_index: u64,
        tracer: &'a mut Tracer<'t>,
    ) -> Self {
        Self {
            canvas,
            size,
            frame_index,
            tracer,
        }
    }

    /// The drawing context.
    pub fn canvas(&mut self) -> &mut dyn Canvas2d {
        self.canvas
    }

    /// The surface size for this frame.
    #[must_use]
    pub fn size(&self) -> Size {
        self.size
    }

    /// The root surface's frame counter.
    #[must_use]
    pub fn frame_index(&self) -> u64 {
        self.frame_index
    }

    /// The tracer for this frame.
    pub fn tracer(&mut self) -> &mut Tracer<'t> {
        self.tracer
    }
}
