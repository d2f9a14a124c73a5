//! Error types for the parsing boundary.
//!
//! The per-frame math never fails; only decoding external input (config
//! JSON, colour strings, raw mesh buffers) can.

use thiserror::Error;

/// Configuration decoding errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Colour string is not `#rgb` or `#rrggbb`.
    #[error("invalid colour {0:?}: expected #rgb or #rrggbb")]
    InvalidColor(String),

    /// Config JSON could not be decoded.
    #[error("malformed config: {0}")]
    Json(#[from] serde_json::Error),
}

/// Mesh buffer validation errors.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MeshError {
    /// Flat position buffer does not hold whole `xyz` triples.
    #[error("position buffer length {0} is not a multiple of 3")]
    PositionStride(usize),

    /// Index buffer does not hold whole triangles.
    #[error("index buffer length {0} is not a multiple of 3")]
    IndexStride(usize),

    /// Triangle references a vertex that does not exist.
    #[error("index {index} out of range for {vertex_count} vertices")]
    IndexOutOfRange {
        /// Offending index
        index: u32,
        /// Number of vertices in the position buffer
        vertex_count: usize,
    },

    /// Vertex contains NaN or infinity.
    #[error("vertex {0} has a non-finite coordinate")]
    NonFiniteVertex(usize),
}
