use glam::Vec3;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::config::WaveConfig;
use crate::particle::PointField;

/// Frequency multipliers of the Y and Z components relative to X.
pub const Y_FREQUENCY_RATIO: f32 = 0.7;
pub const Z_FREQUENCY_RATIO: f32 = 1.3;

/// Accumulated wave time. Advances by `dt * speed` while waves are enabled.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct WaveClock {
    time: f32,
}

impl WaveClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn time(&self) -> f32 {
        self.time
    }

    pub fn advance(&mut self, dt: f32, wave: &WaveConfig) {
        if wave.enabled {
            self.time += dt.max(0.0) * wave.speed;
        }
    }
}

/// Wave offset of a single point at time `t`. Each axis is bounded by `amplitude`.
#[inline]
pub fn wave_displacement(t: f32, frequency: f32, amplitude: f32, offset: f32, phase: f32) -> Vec3 {
    let ft = t * frequency;
    Vec3::new(
        (ft + offset).sin(),
        (ft * Y_FREQUENCY_RATIO + phase).cos(),
        (ft * Z_FREQUENCY_RATIO + offset + phase).sin(),
    ) * amplitude
}

/// Set every point to its rest position plus the wave offset at time `t`.
/// With waves disabled the field is held at rest.
pub fn apply_wave(field: &mut PointField, t: f32, wave: &WaveConfig) {
    let PointField {
        original,
        current,
        offset,
        phase,
        ..
    } = field;

    if !wave.enabled {
        current.copy_from_slice(original);
        return;
    }

    let update = |(i, pos): (usize, &mut Vec3)| {
        *pos = original[i] + wave_displacement(t, wave.frequency, wave.amplitude, offset[i], phase[i]);
    };

    #[cfg(feature = "parallel")]
    current.par_iter_mut().enumerate().for_each(update);

    #[cfg(not(feature = "parallel"))]
    current.iter_mut().enumerate().for_each(update);
}
