//! Animated point fields.
//!
//! Generates a cloud of points (torus, sphere, box, or a sampled mesh) and
//! displaces it once per rendered frame, either with a time-driven wave or
//! with a pointer-driven explosion that pulls points back to rest.
//!
//! ```
//! use pointfield_core::{Animator, FieldConfig, SurfaceRect};
//!
//! let mut animator = Animator::new(FieldConfig::default(), 7);
//! let rect = SurfaceRect::new(0.0, 0.0, 800.0, 600.0);
//! animator.pointer_enter();
//! animator.pointer_move(400.0, 300.0, &rect);
//! animator.step(1.0 / 60.0);
//! assert_eq!(animator.positions().len(), 3 * 2000);
//! ```
pub mod animator;
pub mod config;
pub mod error;
pub mod forces;
pub mod math;
pub mod particle;
pub mod pointer;
pub mod shapes;

pub use animator::{Animator, FieldSource, FrameStats};
pub use config::{AnimationMode, Color, ExplosionConfig, FieldConfig, WaveConfig};
pub use error::{ConfigError, MeshError};
pub use forces::explosion::{Falloff, Interaction};
pub use particle::PointField;
pub use pointer::{Camera, ProjectionKind, SurfaceRect};
pub use shapes::mesh::{MeshStrategy, SurfaceSampler, TriangleMesh};
pub use shapes::primitives::PrimitiveKind;
