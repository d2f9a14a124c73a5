/// Point field generators.
///
/// Three analytic primitives (torus, sphere, box) plus mesh-backed sources
/// that sample an externally supplied surface and normalise it into the
/// same size range as the primitives.
pub mod primitives;
pub mod mesh;
