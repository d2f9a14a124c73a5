use glam::Vec3;
use pointfield_core::math::Bounds;
use pointfield_core::shapes::mesh::*;
use pointfield_core::MeshError;
use rand::rngs::SmallRng;
use rand::{RngCore, SeedableRng};

/// Unit quad in the XY plane, scaled and shifted.
fn quad(scale: f32, shift: Vec3) -> TriangleMesh {
    let corners = [
        Vec3::new(0.0, 0.0, 0.0),
        Vec3::new(1.0, 0.0, 0.0),
        Vec3::new(1.0, 1.0, 0.0),
        Vec3::new(0.0, 1.0, 0.0),
    ];
    let positions: Vec<f32> = corners
        .iter()
        .flat_map(|c| (*c * scale + shift).to_array())
        .collect();
    TriangleMesh::from_flat(&positions, Some(&[0, 1, 2, 0, 2, 3])).unwrap()
}

/// Sampler that always returns the same point.
struct Constant(Vec3);

impl SurfaceSampler for Constant {
    fn sample(&mut self, _rng: &mut dyn RngCore) -> Vec3 {
        self.0
    }
}

/// Sampler that never yields a finite point.
struct Broken;

impl SurfaceSampler for Broken {
    fn sample(&mut self, _rng: &mut dyn RngCore) -> Vec3 {
        Vec3::NAN
    }
}

#[test]
fn test_from_flat_rejects_bad_strides() {
    assert_eq!(
        TriangleMesh::from_flat(&[0.0; 4], None).unwrap_err(),
        MeshError::PositionStride(4)
    );
    assert_eq!(
        TriangleMesh::from_flat(&[0.0; 9], Some(&[0, 1])).unwrap_err(),
        MeshError::IndexStride(2)
    );
}

#[test]
fn test_from_flat_rejects_out_of_range_index() {
    let err = TriangleMesh::from_flat(&[0.0; 9], Some(&[0, 1, 3])).unwrap_err();
    assert_eq!(
        err,
        MeshError::IndexOutOfRange {
            index: 3,
            vertex_count: 3
        }
    );
}

#[test]
fn test_from_flat_rejects_nan_vertex() {
    let mut positions = [0.0_f32; 9];
    positions[4] = f32::NAN;
    assert_eq!(
        TriangleMesh::from_flat(&positions, None).unwrap_err(),
        MeshError::NonFiniteVertex(1)
    );
}

#[test]
fn test_non_indexed_triangles() {
    let mesh = TriangleMesh::from_flat(&[0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0], None).unwrap();
    assert_eq!(mesh.triangle_count(), 1);
    assert!((mesh.surface_area() - 0.5).abs() < 1e-6);
}

#[test]
fn test_surface_samples_normalized() {
    let mesh = quad(10.0, Vec3::new(100.0, -50.0, 3.0));
    let mut rng = SmallRng::seed_from_u64(11);
    let points = points_from_mesh(&mesh, MeshStrategy::Surface, 500, &mut rng);
    assert_eq!(points.len(), 500);

    let bounds = Bounds::from_points(&points).unwrap();
    assert!(bounds.max_extent() <= NORMALIZED_EXTENT + 1e-4, "extent {}", bounds.max_extent());
    for p in &points {
        assert!(p.x.abs() <= 1.0 + 1e-4 && p.y.abs() <= 1.0 + 1e-4, "{p:?}");
        assert!(p.z.abs() < 1e-4, "quad is flat: {p:?}");
    }
}

#[test]
fn test_vertex_strategy_uses_mesh_bounds() {
    let mesh = quad(4.0, Vec3::ZERO);
    let mut rng = SmallRng::seed_from_u64(12);
    let points = points_from_mesh(&mesh, MeshStrategy::Vertices, 2, &mut rng);
    // step = 4 / 2 = 2 -> corners 0 and 2, mapped into [-1, 1]
    assert_eq!(points, vec![Vec3::new(-1.0, -1.0, 0.0), Vec3::new(1.0, 1.0, 0.0)]);
}

#[test]
fn test_empty_mesh_yields_empty_field() {
    let mesh = TriangleMesh::from_flat(&[], None).unwrap();
    let mut rng = SmallRng::seed_from_u64(13);
    assert!(points_from_mesh(&mesh, MeshStrategy::Surface, 100, &mut rng).is_empty());
    assert!(points_from_mesh(&mesh, MeshStrategy::Vertices, 100, &mut rng).is_empty());
}

#[test]
fn test_custom_sampler_single_point() {
    // A degenerate sampler: zero-size bounds only re-centre.
    let mut rng = SmallRng::seed_from_u64(14);
    let points = points_from_sampler(&mut Constant(Vec3::new(3.0, 3.0, 3.0)), 4, &mut rng);
    assert_eq!(points, vec![Vec3::ZERO; 4]);
}

#[test]
fn test_non_finite_samples_dropped() {
    let mut rng = SmallRng::seed_from_u64(15);
    assert!(points_from_sampler(&mut Broken, 10, &mut rng).is_empty());
}
