use glam::Vec3;
use serde::{Deserialize, Serialize};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::config::ExplosionConfig;
use crate::math::approach;
use crate::particle::{escape_direction, PointField};

/// Velocity multiplier applied each frame while a point is being pushed.
pub const FRICTION: f32 = 0.88;
/// Velocity multiplier applied each frame while a point is restoring.
pub const RESTORE_DAMPING: f32 = 0.95;
/// Force-to-velocity scale for one frame of push.
pub const IMPULSE_SCALE: f32 = 0.15;
/// Restore rate multiplier for points outside the radius of an active pointer.
pub const ACTIVE_RESTORE_FACTOR: f32 = 0.5;

/// Pointer interaction state seen by the frame update.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum Interaction {
    /// Pointer is off the surface; everything restores.
    #[default]
    Idle,
    /// Pointer is over the surface at world-space `target`.
    Activated { target: Vec3 },
}

impl Interaction {
    pub fn target(&self) -> Option<Vec3> {
        match *self {
            Interaction::Idle => None,
            Interaction::Activated { target } => Some(target),
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self, Interaction::Activated { .. })
    }
}

/// Push force as a function of distance to the pointer target.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Falloff {
    /// `clamp(1 / d², 0, strength)`. No distance floor: `d = 0` gives `strength`.
    #[default]
    InverseSquare,
    /// `strength * (radius - d) / radius`, zero at the radius.
    Linear,
}

impl Falloff {
    /// Force for a point `distance` away. Zero outside `radius`.
    pub fn force(self, distance: f32, radius: f32, strength: f32) -> f32 {
        if !(distance < radius) {
            return 0.0;
        }
        let raw = match self {
            Falloff::InverseSquare => 1.0 / (distance * distance),
            Falloff::Linear => strength * (radius - distance) / radius,
        };
        // f32::clamp panics when strength < 0.
        raw.min(strength).max(0.0)
    }
}

/// One frame of explosion/restore for a single point.
///
/// Returns the new `(position, velocity)`. `escape` is the push direction
/// used when the point sits exactly on the target.
#[inline]
pub fn explode_point(
    original: Vec3,
    current: Vec3,
    velocity: Vec3,
    escape: Vec3,
    interaction: Interaction,
    params: &ExplosionConfig,
) -> (Vec3, Vec3) {
    let Interaction::Activated { target } = interaction else {
        let pos = approach(current, original, params.restore_speed);
        return (pos, velocity * RESTORE_DAMPING);
    };

    let away = current - target;
    let distance = away.length();
    if distance < params.radius {
        let force = params.falloff.force(distance, params.radius, params.strength);
        let dir = away.try_normalize().unwrap_or(escape);
        let velocity = velocity + dir * (force * IMPULSE_SCALE);
        (current + velocity, velocity * FRICTION)
    } else {
        let pos = approach(current, original, params.restore_speed * ACTIVE_RESTORE_FACTOR);
        (pos, velocity * RESTORE_DAMPING)
    }
}

/// Advance every point one frame under `interaction`.
pub fn apply_explosion(field: &mut PointField, interaction: Interaction, params: &ExplosionConfig) {
    let PointField {
        original,
        current,
        velocity,
        offset,
        phase,
        ..
    } = field;

    let update = |(i, (pos, vel)): (usize, (&mut Vec3, &mut Vec3))| {
        let escape = escape_direction(offset[i], phase[i]);
        (*pos, *vel) = explode_point(original[i], *pos, *vel, escape, interaction, params);
    };

    #[cfg(feature = "parallel")]
    current
        .par_iter_mut()
        .zip(velocity.par_iter_mut())
        .enumerate()
        .for_each(update);

    #[cfg(not(feature = "parallel"))]
    current
        .iter_mut()
        .zip(velocity.iter_mut())
        .enumerate()
        .for_each(update);
}

/// Stateless push away from `target`, applied on top of another displacement.
///
/// Same inverse-square clamp as the explosion, but nothing integrates: the
/// offset vanishes as soon as the pointer moves away.
#[inline]
pub fn hover_offset(position: Vec3, target: Vec3, radius: f32, strength: f32) -> Vec3 {
    let seg = position - target;
    let distance = seg.length();
    let force = Falloff::InverseSquare.force(distance, radius, strength);
    if force == 0.0 {
        return Vec3::ZERO;
    }
    seg.normalize_or_zero() * force
}

/// Add [`hover_offset`] to every current position.
pub fn apply_hover(field: &mut PointField, target: Vec3, params: &ExplosionConfig) {
    let update = |pos: &mut Vec3| {
        *pos += hover_offset(*pos, target, params.radius, params.strength);
    };

    #[cfg(feature = "parallel")]
    field.current.par_iter_mut().for_each(update);

    #[cfg(not(feature = "parallel"))]
    field.current.iter_mut().for_each(update);
}
