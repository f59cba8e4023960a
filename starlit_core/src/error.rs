// Copyright 2026 the Starlit Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Error types.
//!
//! Every error is raised synchronously where the violation happens and
//! returned to the caller; nothing here is retried. [`Error`] wraps the
//! per-concern enums so callers can use `?` across all of them.

use alloc::string::String;
use core::fmt;

/// Which part of a surface was missing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Missing {
    /// No drawing surface has been bound.
    Canvas,
    /// No drawing context is available to render into.
    Context,
}

/// Which cross-layer dependency was missing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Dependency {
    /// A starfield's particle collection.
    Dots,
    /// A mouse tracker's position.
    MousePosition,
}

impl fmt::Display for Dependency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Dots => f.write_str("dots"),
            Self::MousePosition => f.write_str("mouse position"),
        }
    }
}

/// Errors from [`Surface`](crate::surface::Surface) operations that need a
/// bound drawing surface.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SurfaceError {
    /// The canvas or its context was never bound.
    NotInitialized(Missing),
}

impl fmt::Display for SurfaceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotInitialized(Missing::Canvas) => f.write_str("canvas not initialized"),
            Self::NotInitialized(Missing::Context) => f.write_str("context not initialized"),
        }
    }
}

impl core::error::Error for SurfaceError {}

/// Errors from attaching a layer or resolving a sibling.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BindError {
    /// The layer (or surface) already has a parent.
    AlreadyAttached,
    /// The layer is borrowed elsewhere while being attached.
    LayerBusy,
    /// A bind target could not be interpreted as a drawing surface.
    InvalidSelector(String),
    /// No registry entry carries the given alias.
    UnknownAlias(String),
    /// A resolved sibling does not provide the capability a layer needs.
    MissingDependency(Dependency),
}

impl fmt::Display for BindError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AlreadyAttached => f.write_str("already associated with a parent"),
            Self::LayerBusy => f.write_str("layer is borrowed and cannot be bound"),
            Self::InvalidSelector(target) => write!(f, "invalid bind target `{target}`"),
            Self::UnknownAlias(alias) => write!(f, "no layer registered as `{alias}`"),
            Self::MissingDependency(dep) => write!(f, "{dep} not available from resolved layer"),
        }
    }
}

impl core::error::Error for BindError {}

/// Errors raised while a layer renders a frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DrawError {
    /// The layer was drawn before its dependencies were resolved.
    MissingDependency(Dependency),
}

impl fmt::Display for DrawError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingDependency(dep) => write!(f, "{dep} not initialized"),
        }
    }
}

impl core::error::Error for DrawError {}

/// Errors from parsing configuration values.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// The value is not one of `top`, `bottom`, `left`, `right`, `anywhere`.
    UnknownFeedEdge(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownFeedEdge(value) => write!(f, "unknown feed edge `{value}`"),
        }
    }
}

impl core::error::Error for ConfigError {}

/// Any error this crate can produce.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Error {
    /// See [`SurfaceError`].
    Surface(SurfaceError),
    /// See [`BindError`].
    Bind(BindError),
    /// See [`DrawError`].
    Draw(DrawError),
    /// See [`ConfigError`].
    Config(ConfigError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Surface(e) => e.fmt(f),
            Self::Bind(e) => e.fmt(f),
            Self::Draw(e) => e.fmt(f),
            Self::Config(e) => e.fmt(f),
        }
    }
}

impl core::error::Error for Error {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        match self {
            Self::Surface(e) => Some(e),
            Self::Bind(e) => Some(e),
            Self::Draw(e) => Some(e),
            Self::Config(e) => Some(e),
        }
    }
}

impl From<SurfaceError> for Error {
    fn from(e: SurfaceError) -> Self {
        Self::Surface(e)
    }
}

impl From<BindError> for Error {
    fn from(e: BindError) -> Self {
        Self::Bind(e)
    }
}

impl From<DrawError> for Error {
    fn from(e: DrawError) -> Self {
        Self::Draw(e)
    }
}

impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}
