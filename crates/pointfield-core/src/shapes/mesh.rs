//! Point sources backed by external mesh data.
//!
//! Loading model files is left to the host; this module only sees vertex
//! and index arrays, or an arbitrary [`SurfaceSampler`].

use glam::Vec3;
use log::{debug, warn};
use rand::{Rng, RngCore};

use crate::error::MeshError;
use crate::math::Bounds;

/// Largest bounding-box side after [`normalize_to_unit_box`].
pub const NORMALIZED_EXTENT: f32 = 2.0;

/// Produces one surface point per call.
///
/// Implementations must return finite coordinates; non-finite samples are
/// dropped by [`sample_surface`].
pub trait SurfaceSampler {
    fn sample(&mut self, rng: &mut dyn RngCore) -> Vec3;

    /// A sampler with nothing to sample from yields an empty field.
    fn is_empty(&self) -> bool {
        false
    }

    /// Bounds of the underlying geometry, if known. Used for normalisation
    /// instead of the bounds of the drawn sample.
    fn bounds(&self) -> Option<Bounds> {
        None
    }
}

/// Indexed triangle mesh with area-weighted surface sampling.
///
/// Sampling never mutates the mesh, so the [`SurfaceSampler`] impl lives on
/// `&TriangleMesh`.
#[derive(Clone, Debug)]
pub struct TriangleMesh {
    vertices: Vec<Vec3>,
    triangles: Vec<[u32; 3]>,
    /// Running sum of triangle areas, one entry per triangle.
    cumulative_area: Vec<f32>,
}

impl TriangleMesh {
    /// Build from a flat `xyz` position buffer. Without `indices` every
    /// three consecutive vertices form a triangle.
    pub fn from_flat(positions: &[f32], indices: Option<&[u32]>) -> Result<Self, MeshError> {
        if positions.len() % 3 != 0 {
            return Err(MeshError::PositionStride(positions.len()));
        }
        let vertices: Vec<Vec3> = positions.chunks_exact(3).map(Vec3::from_slice).collect();
        if let Some(bad) = vertices.iter().position(|v| !v.is_finite()) {
            return Err(MeshError::NonFiniteVertex(bad));
        }

        let triangles: Vec<[u32; 3]> = match indices {
            Some(indices) => {
                if indices.len() % 3 != 0 {
                    return Err(MeshError::IndexStride(indices.len()));
                }
                if let Some(&index) = indices.iter().find(|&&i| i as usize >= vertices.len()) {
                    return Err(MeshError::IndexOutOfRange {
                        index,
                        vertex_count: vertices.len(),
                    });
                }
                indices.chunks_exact(3).map(|c| [c[0], c[1], c[2]]).collect()
            }
            None => (0..vertices.len() as u32 / 3)
                .map(|t| [t * 3, t * 3 + 1, t * 3 + 2])
                .collect(),
        };

        Ok(Self::new(vertices, triangles))
    }

    fn new(vertices: Vec<Vec3>, triangles: Vec<[u32; 3]>) -> Self {
        let mut total = 0.0_f32;
        let cumulative_area = triangles
            .iter()
            .map(|tri| {
                let [a, b, c] = tri.map(|i| vertices[i as usize]);
                total += (b - a).cross(c - a).length() * 0.5;
                total
            })
            .collect();
        Self {
            vertices,
            triangles,
            cumulative_area,
        }
    }

    pub fn vertices(&self) -> &[Vec3] {
        &self.vertices
    }

    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    pub fn surface_area(&self) -> f32 {
        self.cumulative_area.last().copied().unwrap_or(0.0)
    }

    fn pick_triangle(&self, rng: &mut dyn RngCore) -> usize {
        let total = self.surface_area();
        if total <= 0.0 {
            // All triangles degenerate: fall back to a uniform choice.
            return rng.gen_range(0..self.triangles.len());
        }
        let r = rng.gen::<f32>() * total;
        self.cumulative_area
            .partition_point(|&area| area <= r)
            .min(self.triangles.len() - 1)
    }
}

impl SurfaceSampler for &TriangleMesh {
    fn sample(&mut self, rng: &mut dyn RngCore) -> Vec3 {
        if self.triangles.is_empty() {
            return Vec3::NAN;
        }
        let [a, b, c] = self.triangles[self.pick_triangle(rng)].map(|i| self.vertices[i as usize]);
        let (mut u, mut v) = (rng.gen::<f32>(), rng.gen::<f32>());
        if u + v > 1.0 {
            u = 1.0 - u;
            v = 1.0 - v;
        }
        a + (b - a) * u + (c - a) * v
    }

    fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    fn bounds(&self) -> Option<Bounds> {
        Bounds::from_points(&self.vertices)
    }
}

/// How points are pulled from a [`TriangleMesh`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum MeshStrategy {
    /// Area-weighted random samples across the surface.
    #[default]
    Surface,
    /// Every n-th vertex of the position buffer.
    Vertices,
}

/// Draw `count` finite samples from `sampler`.
pub fn sample_surface(sampler: &mut dyn SurfaceSampler, count: usize, rng: &mut dyn RngCore) -> Vec<Vec3> {
    if sampler.is_empty() {
        return Vec::new();
    }
    let points: Vec<Vec3> = (0..count)
        .map(|_| sampler.sample(rng))
        .filter(|p| p.is_finite())
        .collect();
    if points.len() < count {
        warn!("surface sampler returned {} non-finite points", count - points.len());
    }
    points
}

/// Take every `max(1, len / count)`-th vertex until `count` points are collected.
pub fn extract_vertices(vertices: &[Vec3], count: usize) -> Vec<Vec3> {
    if count == 0 {
        return Vec::new();
    }
    let step = (vertices.len() / count).max(1);
    vertices.iter().step_by(step).take(count).copied().collect()
}

/// Re-centre on the middle of `bounds` and scale uniformly so its largest
/// side becomes [`NORMALIZED_EXTENT`]. A flat (zero-size) box only re-centres.
pub fn normalize_to_unit_box(points: &mut [Vec3], bounds: Bounds) {
    let center = bounds.center();
    let extent = bounds.max_extent();
    let scale = if extent > f32::EPSILON {
        NORMALIZED_EXTENT / extent
    } else {
        1.0
    };
    for p in points.iter_mut() {
        *p = (*p - center) * scale;
    }
}

/// Sample `count` points from any surface sampler and normalise them.
pub fn points_from_sampler(sampler: &mut dyn SurfaceSampler, count: usize, rng: &mut dyn RngCore) -> Vec<Vec3> {
    let mut points = sample_surface(sampler, count, rng);
    let bounds = sampler.bounds().or_else(|| Bounds::from_points(&points));
    if let Some(bounds) = bounds {
        normalize_to_unit_box(&mut points, bounds);
    }
    if points.is_empty() && count > 0 {
        warn!("mesh produced no usable points; field will be empty");
    }
    points
}

/// Pull `count` normalised points out of `mesh` using `strategy`.
pub fn points_from_mesh(
    mesh: &TriangleMesh,
    strategy: MeshStrategy,
    count: usize,
    rng: &mut dyn RngCore,
) -> Vec<Vec3> {
    debug!(
        "sampling {} points from mesh ({} vertices, {} triangles, {:?})",
        count,
        mesh.vertices.len(),
        mesh.triangles.len(),
        strategy
    );
    match strategy {
        MeshStrategy::Surface => {
            let mut sampler = mesh;
            points_from_sampler(&mut sampler, count, rng)
        }
        MeshStrategy::Vertices => {
            let mut points = extract_vertices(&mesh.vertices, count);
            match Bounds::from_points(&mesh.vertices) {
                Some(bounds) => normalize_to_unit_box(&mut points, bounds),
                None => warn!("mesh has no vertices; field will be empty"),
            }
            points
        }
    }
}
