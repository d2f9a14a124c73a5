//! Per-frame displacement passes over a [`PointField`](crate::particle::PointField).
pub mod explosion;
pub mod wave;
