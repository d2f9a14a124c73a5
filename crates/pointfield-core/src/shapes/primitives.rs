//! Primitive point-field generators.
//!
//! Each shape is a pure function of uniform parameters in `[0, 1)` so the
//! geometry can be checked without randomness; `generate_primitive` draws
//! those parameters from the caller's RNG.

use std::f32::consts::TAU;

use glam::Vec3;
use rand::Rng;
use serde::{Deserialize, Serialize};

pub const TORUS_MAJOR_RADIUS: f32 = 1.5;
pub const TORUS_MINOR_RADIUS: f32 = 0.5;
pub const SPHERE_RADIUS: f32 = 1.5;
/// Half the side length of the box volume.
pub const BOX_HALF_EXTENT: f32 = 1.5;

/// Primitive the field is generated from.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrimitiveKind {
    #[default]
    Torus,
    Sphere,
    Box,
}

/// Torus surface in the XY plane. `t` walks the major circle, `s` the tube.
pub fn shape_torus(t: f32, s: f32) -> Vec3 {
    let theta = t * TAU;
    let phi = s * TAU;
    let ring = TORUS_MAJOR_RADIUS + TORUS_MINOR_RADIUS * phi.cos();
    Vec3::new(
        ring * theta.cos(),
        ring * theta.sin(),
        TORUS_MINOR_RADIUS * phi.sin(),
    )
}

/// Sphere surface with uniform area density (`phi = acos(2s - 1)`).
pub fn shape_sphere(t: f32, s: f32) -> Vec3 {
    let theta = t * TAU;
    let phi = (2.0 * s - 1.0).clamp(-1.0, 1.0).acos();
    Vec3::new(
        phi.sin() * theta.cos(),
        phi.sin() * theta.sin(),
        phi.cos(),
    ) * SPHERE_RADIUS
}

/// Solid box volume, one uniform parameter per axis.
pub fn shape_box(u: f32, v: f32, w: f32) -> Vec3 {
    (Vec3::new(u, v, w) - Vec3::splat(0.5)) * (BOX_HALF_EXTENT * 2.0)
}

/// Generate `count` points on (or in) `kind`. `count == 0` yields no points.
pub fn generate_primitive<R: Rng + ?Sized>(kind: PrimitiveKind, count: usize, rng: &mut R) -> Vec<Vec3> {
    (0..count)
        .map(|_| match kind {
            PrimitiveKind::Torus => shape_torus(rng.gen(), rng.gen()),
            PrimitiveKind::Sphere => shape_sphere(rng.gen(), rng.gen()),
            PrimitiveKind::Box => shape_box(rng.gen(), rng.gen(), rng.gen()),
        })
        .collect()
}
