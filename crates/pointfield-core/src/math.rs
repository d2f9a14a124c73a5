use glam::Vec3;

/// Move `current` toward `target` by the fraction `rate` of the remaining gap.
#[inline]
pub fn approach(current: Vec3, target: Vec3, rate: f32) -> Vec3 {
    current + (target - current) * rate
}

/// Unit vector for azimuth `theta` and polar angle `phi`.
#[inline]
pub fn unit_from_angles(theta: f32, phi: f32) -> Vec3 {
    Vec3::new(phi.sin() * theta.cos(), phi.sin() * theta.sin(), phi.cos())
}

/// Axis-aligned bounding box.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
    pub min: Vec3,
    pub max: Vec3,
}

impl Bounds {
    /// Bounds of `points`, or `None` when the slice is empty.
    pub fn from_points(points: &[Vec3]) -> Option<Self> {
        let first = *points.first()?;
        let (min, max) = points
            .iter()
            .fold((first, first), |(lo, hi), &p| (lo.min(p), hi.max(p)));
        Some(Self { min, max })
    }

    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    /// Length of the largest side.
    pub fn max_extent(&self) -> f32 {
        self.size().max_element()
    }
}
