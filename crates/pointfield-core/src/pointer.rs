//! Screen-space pointer to world-space target.
//!
//! Pointer events arrive in client pixels relative to the page. They are
//! normalised against the render surface's rectangle into clip coordinates
//! (`[-1, 1]`, +Y up) and then mapped into the world either on a fixed
//! plane or along the camera ray through the pointer.

use glam::{Mat4, Vec2, Vec3};
use serde::{Deserialize, Serialize};

use crate::forces::explosion::Interaction;

/// Bounding rectangle of the render surface, in client pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SurfaceRect {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl SurfaceRect {
    pub fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// Clip coordinates of a client-space point. A zero-sized surface maps
    /// everything to the centre.
    pub fn to_ndc(&self, client_x: f32, client_y: f32) -> Vec2 {
        if self.width <= 0.0 || self.height <= 0.0 {
            return Vec2::ZERO;
        }
        Vec2::new(
            (client_x - self.left) / self.width * 2.0 - 1.0,
            -((client_y - self.top) / self.height) * 2.0 + 1.0,
        )
    }

    pub fn aspect(&self) -> f32 {
        if self.height > 0.0 {
            self.width / self.height
        } else {
            1.0
        }
    }
}

/// Perspective camera used to unproject pointer rays.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Camera {
    pub position: Vec3,
    pub look_at: Vec3,
    pub up: Vec3,
    /// Vertical field of view in degrees.
    pub fov_y: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 0.0, 5.0),
            look_at: Vec3::ZERO,
            up: Vec3::Y,
            fov_y: 75.0,
            aspect: 1.0,
            near: 0.1,
            far: 1000.0,
        }
    }
}

impl Camera {
    pub fn view_projection(&self) -> Mat4 {
        let proj = Mat4::perspective_rh(self.fov_y.to_radians(), self.aspect, self.near, self.far);
        let view = Mat4::look_at_rh(self.position, self.look_at, self.up);
        proj * view
    }

    /// Ray from the eye through clip point `ndc`: `(origin, unit direction)`.
    pub fn ray(&self, ndc: Vec2) -> (Vec3, Vec3) {
        let inverse = self.view_projection().inverse();
        let far = inverse.project_point3(ndc.extend(1.0));
        let fallback = (self.look_at - self.position).normalize_or_zero();
        let dir = (far - self.position).try_normalize().unwrap_or(fallback);
        (self.position, dir)
    }
}

/// How a clip-space pointer becomes a world-space target.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ProjectionKind {
    /// `(x * scale, y * scale, depth)`, ignoring the camera.
    Planar { scale: f32, depth: f32 },
    /// `origin + direction * distance` along the camera ray.
    CameraRay { distance: f32 },
}

impl Default for ProjectionKind {
    fn default() -> Self {
        ProjectionKind::CameraRay { distance: 5.0 }
    }
}

impl ProjectionKind {
    pub fn project(&self, ndc: Vec2, camera: &Camera) -> Vec3 {
        match *self {
            ProjectionKind::Planar { scale, depth } => (ndc * scale).extend(depth),
            ProjectionKind::CameraRay { distance } => {
                let (origin, dir) = camera.ray(ndc);
                origin + dir * distance
            }
        }
    }
}

/// Pointer enter/move/leave state, folded into an [`Interaction`].
#[derive(Clone, Copy, Debug)]
pub struct PointerTracker {
    inside: bool,
    ndc: Vec2,
    target: Vec3,
    home: Vec3,
}

impl PointerTracker {
    /// `home` is where the target rests after the pointer leaves.
    pub fn new(home: Vec3) -> Self {
        Self {
            inside: false,
            ndc: Vec2::ZERO,
            target: home,
            home,
        }
    }

    pub fn enter(&mut self) {
        self.inside = true;
    }

    /// Record a pointer sample and recompute the target. No smoothing.
    pub fn move_to(&mut self, ndc: Vec2, projection: &ProjectionKind, camera: &Camera) {
        self.ndc = ndc;
        self.target = projection.project(ndc, camera);
    }

    pub fn leave(&mut self) {
        self.inside = false;
        self.ndc = Vec2::ZERO;
        self.target = self.home;
    }

    /// Re-run the projection for the last sample, e.g. after the camera moved.
    pub fn reproject(&mut self, projection: &ProjectionKind, camera: &Camera) {
        if self.inside {
            self.target = projection.project(self.ndc, camera);
        }
    }

    pub fn set_home(&mut self, home: Vec3) {
        self.home = home;
        if !self.inside {
            self.target = home;
        }
    }

    pub fn ndc(&self) -> Vec2 {
        self.ndc
    }

    pub fn target(&self) -> Vec3 {
        self.target
    }

    pub fn interaction(&self) -> Interaction {
        if self.inside {
            Interaction::Activated {
                target: self.target,
            }
        } else {
            Interaction::Idle
        }
    }
}

impl Default for PointerTracker {
    fn default() -> Self {
        Self::new(Vec3::ZERO)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_rect_maps_to_center() {
        let rect = SurfaceRect::new(10.0, 10.0, 0.0, 0.0);
        assert_eq!(rect.to_ndc(50.0, 50.0), Vec2::ZERO);
        assert_eq!(rect.aspect(), 1.0);
    }

    #[test]
    fn test_leave_resets_target_home() {
        let mut tracker = PointerTracker::new(Vec3::new(0.0, 1.0, 0.0));
        let planar = ProjectionKind::Planar {
            scale: 2.0,
            depth: 0.0,
        };
        tracker.enter();
        tracker.move_to(Vec2::new(1.0, 1.0), &planar, &Camera::default());
        assert_eq!(tracker.target(), Vec3::new(2.0, 2.0, 0.0));
        tracker.leave();
        assert_eq!(tracker.target(), Vec3::new(0.0, 1.0, 0.0));
        assert_eq!(tracker.ndc(), Vec2::ZERO);
        assert_eq!(tracker.interaction(), Interaction::Idle);
    }
}
