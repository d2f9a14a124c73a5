use std::f32::consts::TAU;

use glam::Vec3;
use rand::Rng;

use crate::math::{unit_from_angles, Bounds};

/// SoA point storage.
///
/// One entry per point in every array, in stable order. `original` is only
/// written at construction; the frame update writes `current` and
/// `velocity`. Resizing means building a new field.
#[derive(Clone, Debug)]
pub struct PointField {
    pub(crate) count: usize,
    /// Generated rest positions
    pub(crate) original: Vec<Vec3>,
    /// Displaced positions, handed to the renderer
    pub(crate) current: Vec<Vec3>,
    /// Phase of the X/Z wave components, in [0, 2π)
    pub(crate) offset: Vec<f32>,
    /// Phase of the Y wave component, in [0, 2π)
    pub(crate) phase: Vec<f32>,
    /// Explosion velocity, persistent across frames
    pub(crate) velocity: Vec<Vec3>,
    /// Centre of the rest positions' bounding box
    pub(crate) center: Vec3,
}

impl PointField {
    /// Wrap `points` as a field at rest, drawing per-point phases from `rng`.
    pub fn from_points<R: Rng + ?Sized>(points: Vec<Vec3>, rng: &mut R) -> Self {
        let count = points.len();
        let offset = (0..count).map(|_| rng.gen::<f32>() * TAU).collect();
        let phase = (0..count).map(|_| rng.gen::<f32>() * TAU).collect();
        Self::with_phases(points, offset, phase)
    }

    /// Build a field with explicit phases. Panics if the lengths differ.
    pub fn with_phases(points: Vec<Vec3>, offset: Vec<f32>, phase: Vec<f32>) -> Self {
        let count = points.len();
        assert_eq!(offset.len(), count, "offset length must match point count");
        assert_eq!(phase.len(), count, "phase length must match point count");
        let center = Bounds::from_points(&points).map_or(Vec3::ZERO, |b| b.center());
        Self {
            count,
            current: points.clone(),
            original: points,
            offset,
            phase,
            velocity: vec![Vec3::ZERO; count],
            center,
        }
    }

    pub fn empty() -> Self {
        Self::with_phases(Vec::new(), Vec::new(), Vec::new())
    }

    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    pub fn original(&self) -> &[Vec3] {
        &self.original
    }

    pub fn current(&self) -> &[Vec3] {
        &self.current
    }

    pub fn velocity(&self) -> &[Vec3] {
        &self.velocity
    }

    pub fn offset(&self) -> &[f32] {
        &self.offset
    }

    pub fn phase(&self) -> &[f32] {
        &self.phase
    }

    pub fn center(&self) -> Vec3 {
        self.center
    }

    /// Current positions as a flat `[x0, y0, z0, x1, ...]` buffer.
    pub fn positions(&self) -> &[f32] {
        bytemuck::cast_slice(&self.current)
    }

    /// Overwrite one displaced position (e.g. to seed a scripted scene).
    pub fn set_current(&mut self, index: usize, position: Vec3) {
        self.current[index] = position;
    }

    /// Snap every point back to rest and clear velocities.
    pub fn reset(&mut self) {
        self.current.copy_from_slice(&self.original);
        self.velocity.fill(Vec3::ZERO);
    }

    /// Fixed unit direction for point `index`, used when the geometric push
    /// direction is undefined.
    pub fn escape_direction(&self, index: usize) -> Vec3 {
        escape_direction(self.offset[index], self.phase[index])
    }
}

/// Unit push direction for a point with the given wave phases.
#[inline]
pub fn escape_direction(offset: f32, phase: f32) -> Vec3 {
    unit_from_angles(offset, phase)
}
