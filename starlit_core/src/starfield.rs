// Copyright 2026 the Starlit Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drifting starfield layer.
//!
//! A [`StarField`] owns a fixed pool of [`Particle`]s. Every frame each
//! particle drifts according to the configured [`Velocity`]; particles that
//! leave the live area are respawned just outside one edge (see
//! [`FeedFrom`]). The pool is published through [`Layer::particles`] so a
//! [`Constellation`](crate::constellation::Constellation) can read it.

use alloc::string::ToString;
use core::fmt;
use core::str::FromStr;

use kurbo::{Point, Size};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::canvas::Rgb;
use crate::error::{BindError, ConfigError, DrawError};
use crate::layer::{BindContext, FrameContext, Layer};
use crate::particle::{MARGIN, Particle, SharedParticles, Velocity};
use crate::trace::RegenerateEvent;

/// Smallest scale a freshly spawned particle gets.
const MIN_SCALE: f64 = 0.2;
/// Largest scale a freshly spawned particle gets.
const MAX_SCALE: f64 = 1.0;

/// The band respawned particles are placed in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum FeedFrom {
    /// `y` in `[-MARGIN, 0]`.
    Top,
    /// `y` in `[height, height + MARGIN]`.
    Bottom,
    /// `x` in `[-MARGIN, 0]`.
    Left,
    /// `x` in `[width, width + MARGIN]`.
    Right,
    /// Anywhere in the extended box.
    #[default]
    Anywhere,
}

impl FeedFrom {
    /// The lowercase config name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Top => "top",
            Self::Bottom => "bottom",
            Self::Left => "left",
            Self::Right => "right",
            Self::Anywhere => "anywhere",
        }
    }
}

impl fmt::Display for FeedFrom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FeedFrom {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "top" => Ok(Self::Top),
            "bottom" => Ok(Self::Bottom),
            "left" => Ok(Self::Left),
            "right" => Ok(Self::Right),
            "anywhere" => Ok(Self::Anywhere),
            other => Err(ConfigError::UnknownFeedEdge(other.to_string())),
        }
    }
}

/// Starfield configuration.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StarFieldConfig {
    /// Per-frame drift.
    pub velocity: Velocity,
    /// Pool size.
    pub points: usize,
    /// Opacity multiplier applied on top of each particle's scale.
    pub global_alpha: f64,
    /// Where out-of-bounds particles respawn.
    pub feed_from: FeedFrom,
    /// RNG seed for placement and respawns.
    pub seed: u64,
    /// Particle colour.
    pub color: Rgb,
}

impl StarFieldConfig {
    /// Seed used when none is configured.
    pub const DEFAULT_SEED: u64 = 0x5747_4152_4649_454C;

    /// 150 white particles drifting slowly towards the viewer.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            velocity: Velocity::DEFAULT,
            points: 150,
            global_alpha: 1.0,
            feed_from: FeedFrom::Anywhere,
            seed: Self::DEFAULT_SEED,
            color: Rgb::WHITE,
        }
    }

    /// A config that holds every particle still.
    #[must_use]
    pub const fn frozen(points: usize) -> Self {
        let mut config = Self::new();
        config.velocity = Velocity::ZERO;
        config.points = points;
        config
    }
}

impl Default for StarFieldConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// A drifting particle field.
#[derive(Debug)]
pub struct StarField {
    config: StarFieldConfig,
    particles: SharedParticles,
    rng: SmallRng,
}

impl StarField {
    /// Creates a starfield. Particles are allocated when it is attached.
    #[must_use]
    pub fn new(config: StarFieldConfig) -> Self {
        Self {
            config,
            particles: SharedParticles::new(),
            rng: SmallRng::seed_from_u64(config.seed),
        }
    }

    /// The configuration.
    #[must_use]
    pub fn config(&self) -> &StarFieldConfig {
        &self.config
    }

    /// The particle pool.
    #[must_use]
    pub fn shared_particles(&self) -> &SharedParticles {
        &self.particles
    }

    /// A particle anywhere in the extended box around `size`.
    fn spawn(&mut self, size: Size) -> Particle {
        let x = self.rng.gen_range(-MARGIN..=size.width + MARGIN);
        let y = self.rng.gen_range(-MARGIN..=size.height + MARGIN);
        let scale = self.rng.gen_range(MIN_SCALE..=MAX_SCALE);
        Particle::new(Point::new(x, y), scale)
    }

    /// A particle in the [`FeedFrom`] band around `size`.
    fn respawn(&mut self, size: Size) -> Particle {
        let mut p = self.spawn(size);
        match self.config.feed_from {
            FeedFrom::Top => p.position.y = self.rng.gen_range(-MARGIN..=0.0),
            FeedFrom::Bottom => {
                p.position.y = self.rng.gen_range(size.height..=size.height + MARGIN);
            }
            FeedFrom::Left => p.position.x = self.rng.gen_range(-MARGIN..=0.0),
            FeedFrom::Right => {
                p.position.x = self.rng.gen_range(size.width..=size.width + MARGIN);
            }
            FeedFrom::Anywhere => {}
        }
        p
    }
}

impl Default for StarField {
    fn default() -> Self {
        Self::new(StarFieldConfig::default())
    }
}

impl Layer for StarField {
    fn type_name(&self) -> &'static str {
        "starfield"
    }

    fn on_bind(&mut self, cx: &mut BindContext<'_>) -> Result<(), BindError> {
        let size = cx.viewport().size();
        let pool = (0..self.config.points).map(|_| self.spawn(size)).collect();
        *self.particles.borrow_mut() = pool;
        Ok(())
    }

    fn draw_frame(&mut self, cx: &mut FrameContext<'_, '_>) -> Result<(), DrawError> {
        let size = cx.size();
        let velocity = self.config.velocity;

        let particles = self.particles.clone();
        let mut pool = particles.borrow_mut();
        let mut regenerated = 0;
        for p in pool.iter_mut() {
            p.advance(velocity, size);
            if p.is_out_of_bounds(size) {
                *p = self.respawn(size);
                regenerated += 1;
            }
        }
        if regenerated > 0 {
            let frame_index = cx.frame_index();
            cx.tracer().regenerate(&RegenerateEvent {
                frame_index,
                count: regenerated,
            });
        }

        let canvas = cx.canvas();
        for p in pool.iter() {
            let alpha = self.config.global_alpha * p.scale / 2.0;
            canvas.fill_circle(p.position, p.scale, self.config.color.with_alpha(alpha));
        }
        Ok(())
    }

    fn particles(&self) -> Option<SharedParticles> {
        Some(self.particles.clone())
    }
}
