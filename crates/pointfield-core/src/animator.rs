use glam::Vec3;
use log::debug;
use rand::rngs::SmallRng;
use rand::SeedableRng;

use crate::config::{AnimationMode, FieldConfig};
use crate::forces::explosion::{apply_explosion, apply_hover, Interaction};
use crate::forces::wave::{apply_wave, WaveClock};
use crate::particle::PointField;
use crate::pointer::{Camera, PointerTracker, SurfaceRect};
use crate::shapes::mesh::{points_from_mesh, MeshStrategy, TriangleMesh};
use crate::shapes::primitives::generate_primitive;

/// Where the field's rest positions come from.
#[derive(Clone, Debug)]
pub enum FieldSource {
    /// Analytic primitive named by `FieldConfig::shape`.
    Primitive,
    /// Normalised samples of a triangle mesh.
    Mesh {
        mesh: TriangleMesh,
        strategy: MeshStrategy,
    },
    /// Caller-supplied points. `FieldConfig::count` follows their number.
    Fixed(Vec<Vec3>),
}

/// Snapshot of the animator after the last frame.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FrameStats {
    /// Frames stepped since construction.
    pub frames: u64,
    /// Wave clock value.
    pub wave_time: f32,
    pub point_count: usize,
    pub pointer_active: bool,
}

/// Owns one animated point field and drives it frame by frame.
///
/// Generation happens in [`Animator::new`] and [`Animator::set_config`], so
/// a regenerated field is always in place before the next [`Animator::step`].
pub struct Animator {
    config: FieldConfig,
    source: FieldSource,
    field: PointField,
    clock: WaveClock,
    pointer: PointerTracker,
    camera: Camera,
    rng: SmallRng,
    frames: u64,
    redraw: bool,
}

impl Animator {
    /// Primitive field seeded from `seed`.
    pub fn new(config: FieldConfig, seed: u64) -> Self {
        Self::with_source(config, FieldSource::Primitive, SmallRng::seed_from_u64(seed))
    }

    /// Primitive field seeded from OS entropy.
    pub fn from_entropy(config: FieldConfig) -> Self {
        Self::with_source(config, FieldSource::Primitive, SmallRng::from_entropy())
    }

    pub fn with_source(mut config: FieldConfig, source: FieldSource, mut rng: SmallRng) -> Self {
        if let FieldSource::Fixed(points) = &source {
            config.count = points.len();
        }
        let field = generate(&config, &source, &mut rng);
        let pointer = PointerTracker::new(field.center());
        Self {
            config,
            source,
            field,
            clock: WaveClock::new(),
            pointer,
            camera: Camera::default(),
            rng,
            frames: 0,
            redraw: true,
        }
    }

    pub fn config(&self) -> &FieldConfig {
        &self.config
    }

    pub fn field(&self) -> &PointField {
        &self.field
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn interaction(&self) -> Interaction {
        self.pointer.interaction()
    }

    /// Apply a new configuration. The field is rebuilt only when the shape
    /// or point count changed; other parameters take effect next frame.
    pub fn set_config(&mut self, mut config: FieldConfig) {
        if let FieldSource::Fixed(points) = &self.source {
            config.count = points.len();
        }
        let regenerate = self.config.regenerates(&config);
        let projection_changed = self.config.projection != config.projection;
        self.config = config;
        if regenerate {
            self.regenerate();
        }
        if projection_changed {
            self.pointer.reproject(&self.config.projection, &self.camera);
        }
    }

    /// Swap the point source and rebuild the field.
    pub fn set_source(&mut self, source: FieldSource) {
        if let FieldSource::Fixed(points) = &source {
            self.config.count = points.len();
        }
        self.source = source;
        self.regenerate();
    }

    pub fn set_camera(&mut self, camera: Camera) {
        self.camera = camera;
        self.pointer.reproject(&self.config.projection, &self.camera);
    }

    /// Pointer entered the render surface.
    pub fn pointer_enter(&mut self) {
        self.pointer.enter();
    }

    /// Pointer moved over the render surface.
    ///
    /// The camera's aspect ratio follows `rect` so the ray matches what is
    /// on screen.
    pub fn pointer_move(&mut self, client_x: f32, client_y: f32, rect: &SurfaceRect) {
        if rect.width > 0.0 && rect.height > 0.0 && rect.aspect() != self.camera.aspect {
            self.camera.aspect = rect.aspect();
        }
        let ndc = rect.to_ndc(client_x, client_y);
        self.pointer.move_to(ndc, &self.config.projection, &self.camera);
    }

    /// Pointer left the render surface; the target returns to the field centre.
    pub fn pointer_leave(&mut self) {
        self.pointer.leave();
    }

    /// Advance one rendered frame of `dt` seconds.
    pub fn step(&mut self, dt: f32) {
        self.frames += 1;
        if self.field.is_empty() {
            return;
        }

        let interaction = self.pointer.interaction();
        match self.config.mode {
            AnimationMode::Wave => {
                self.clock.advance(dt, &self.config.wave);
                apply_wave(&mut self.field, self.clock.time(), &self.config.wave);
                if self.config.hover_displacement {
                    let target = match interaction {
                        Interaction::Activated { target } => Some(target),
                        Interaction::Idle if self.config.hover_requires_enter => None,
                        Interaction::Idle => Some(self.pointer.target()),
                    };
                    if let Some(target) = target {
                        apply_hover(&mut self.field, target, &self.config.explosion);
                    }
                }
            }
            AnimationMode::Explosion => {
                apply_explosion(&mut self.field, interaction, &self.config.explosion);
            }
        }
        self.redraw = true;
    }

    /// Flat `xyz` buffer of current positions, in stable point order.
    pub fn positions(&self) -> &[f32] {
        self.field.positions()
    }

    /// Returns true once after each change to [`Animator::positions`].
    pub fn take_redraw(&mut self) -> bool {
        std::mem::take(&mut self.redraw)
    }

    pub fn stats(&self) -> FrameStats {
        FrameStats {
            frames: self.frames,
            wave_time: self.clock.time(),
            point_count: self.field.len(),
            pointer_active: self.pointer.interaction().is_active(),
        }
    }

    /// Drop every point; later frames and pointer events become no-ops.
    pub fn clear(&mut self) {
        self.pointer.leave();
        self.source = FieldSource::Fixed(Vec::new());
        self.config.count = 0;
        self.field = PointField::empty();
        self.redraw = true;
    }

    fn regenerate(&mut self) {
        self.field = generate(&self.config, &self.source, &mut self.rng);
        self.pointer.set_home(self.field.center());
        self.redraw = true;
    }
}

fn generate(config: &FieldConfig, source: &FieldSource, rng: &mut SmallRng) -> PointField {
    let points = match source {
        FieldSource::Primitive => generate_primitive(config.shape, config.count, rng),
        FieldSource::Mesh { mesh, strategy } => points_from_mesh(mesh, *strategy, config.count, rng),
        FieldSource::Fixed(points) => points.clone(),
    };
    debug!("generated field of {} points ({:?})", points.len(), config.shape);
    PointField::from_points(points, rng)
}
