use std::f32::consts::TAU;

use glam::Vec3;
use pointfield_core::*;
use rand::rngs::SmallRng;
use rand::SeedableRng;

#[test]
fn test_point_field_from_points_initializes_correctly() {
    let points: Vec<Vec3> = (0..10).map(|i| Vec3::new(i as f32, 0.0, -1.0)).collect();
    let field = PointField::from_points(points.clone(), &mut SmallRng::seed_from_u64(0));

    assert_eq!(field.len(), 10);
    assert_eq!(field.original(), &points[..]);
    assert_eq!(field.current(), &points[..]);
    for i in 0..10 {
        assert_eq!(field.velocity()[i], Vec3::ZERO, "velocity[{i}] should be ZERO");
        assert!((0.0..TAU).contains(&field.offset()[i]), "offset[{i}] out of range");
        assert!((0.0..TAU).contains(&field.phase()[i]), "phase[{i}] out of range");
    }
    assert_eq!(field.center(), Vec3::new(4.5, 0.0, -1.0));
}

#[test]
fn test_point_field_zero_count() {
    let field = PointField::from_points(Vec::new(), &mut SmallRng::seed_from_u64(0));

    assert!(field.is_empty());
    assert_eq!(field.original().len(), 0);
    assert_eq!(field.current().len(), 0);
    assert_eq!(field.velocity().len(), 0);
    assert_eq!(field.offset().len(), 0);
    assert_eq!(field.phase().len(), 0);
    assert_eq!(field.positions().len(), 0);
    assert_eq!(field.center(), Vec3::ZERO);
}

#[test]
fn test_positions_flat_layout() {
    let points = vec![Vec3::new(1.0, 2.0, 3.0), Vec3::new(4.0, 5.0, 6.0)];
    let field = PointField::with_phases(points, vec![0.0; 2], vec![0.0; 2]);
    assert_eq!(field.positions(), &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
}

#[test]
fn test_reset_returns_to_rest() {
    let mut field = PointField::with_phases(vec![Vec3::ONE], vec![0.0], vec![0.0]);
    field.set_current(0, Vec3::ZERO);
    field.reset();
    assert_eq!(field.current()[0], Vec3::ONE);
    assert_eq!(field.velocity()[0], Vec3::ZERO);
}

#[test]
fn test_escape_direction_unit() {
    let field = PointField::from_points(vec![Vec3::ZERO; 32], &mut SmallRng::seed_from_u64(5));
    for i in 0..field.len() {
        assert!((field.escape_direction(i).length() - 1.0).abs() < 1e-5);
    }
}

#[test]
fn test_config_default_values() {
    let config = FieldConfig::default();

    assert_eq!(config.shape, PrimitiveKind::Torus);
    assert_eq!(config.count, 2000);
    assert_eq!(config.mode, AnimationMode::Wave);
    assert_eq!(config.wave.enabled, true);
    assert_eq!(config.wave.amplitude, 0.3);
    assert_eq!(config.wave.frequency, 2.0);
    assert_eq!(config.wave.speed, 1.0);
    assert_eq!(config.explosion.strength, 2.0);
    assert_eq!(config.explosion.radius, 3.0);
    assert_eq!(config.explosion.restore_speed, 0.05);
    assert_eq!(config.explosion.falloff, Falloff::InverseSquare);
    assert_eq!(config.projection, ProjectionKind::CameraRay { distance: 5.0 });
    assert_eq!(config.hover_displacement, false);
    assert_eq!(config.hover_requires_enter, false);
    assert_eq!(config.point_size, 0.02);
    assert_eq!(config.color, Color::WHITE);
}

#[test]
fn test_config_partial_json_fills_defaults() {
    let config = FieldConfig::from_json(
        r##"{
            "shape": "sphere",
            "count": 500,
            "mode": "explosion",
            "explosion": { "radius": 1.5 },
            "projection": { "kind": "planar", "scale": 2.0, "depth": 0.0 },
            "color": "#ff0000"
        }"##,
    )
    .unwrap();

    assert_eq!(config.shape, PrimitiveKind::Sphere);
    assert_eq!(config.count, 500);
    assert_eq!(config.mode, AnimationMode::Explosion);
    assert_eq!(config.explosion.radius, 1.5);
    assert_eq!(config.explosion.strength, 2.0);
    assert_eq!(config.wave, WaveConfig::default());
    assert_eq!(
        config.projection,
        ProjectionKind::Planar {
            scale: 2.0,
            depth: 0.0
        }
    );
    assert_eq!(config.color.to_array(), [1.0, 0.0, 0.0]);
}

#[test]
fn test_config_json_round_trip() {
    let mut config = FieldConfig::default();
    config.shape = PrimitiveKind::Box;
    config.explosion.falloff = Falloff::Linear;
    let json = config.to_json().unwrap();
    assert_eq!(FieldConfig::from_json(&json).unwrap(), config);
}

#[test]
fn test_config_bad_color_rejected() {
    let err = FieldConfig::from_json(r#"{ "color": "red" }"#).unwrap_err();
    assert!(matches!(err, ConfigError::Json(_)), "{err}");
    assert!(err.to_string().contains("invalid colour"), "{err}");
}

#[test]
fn test_config_unknown_shape_rejected() {
    assert!(FieldConfig::from_json(r#"{ "shape": "cone" }"#).is_err());
}
