use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::forces::explosion::Falloff;
use crate::pointer::ProjectionKind;
use crate::shapes::primitives::PrimitiveKind;

/// Which per-frame update drives the field.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnimationMode {
    /// Time-driven wave displacement around the original positions.
    #[default]
    Wave,
    /// Pointer-driven explosion with restore pull.
    Explosion,
}

/// Wave displacement parameters.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WaveConfig {
    /// When false the wave clock freezes and points sit at their original position.
    pub enabled: bool,
    pub amplitude: f32,
    pub frequency: f32,
    /// Multiplier applied to the frame delta before it reaches the wave clock.
    pub speed: f32,
}

impl Default for WaveConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            amplitude: 0.3,
            frequency: 2.0,
            speed: 1.0,
        }
    }
}

/// Explosion and restore parameters.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExplosionConfig {
    /// Upper bound on the per-frame push force.
    pub strength: f32,
    /// Points closer than this to the pointer target are pushed.
    pub radius: f32,
    /// Fraction of the gap to the original position closed per frame.
    pub restore_speed: f32,
    pub falloff: Falloff,
}

impl Default for ExplosionConfig {
    fn default() -> Self {
        Self {
            strength: 2.0,
            radius: 3.0,
            restore_speed: 0.05,
            falloff: Falloff::InverseSquare,
        }
    }
}

/// Linear RGB colour handed through to the renderer.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    pub const WHITE: Color = Color {
        r: 1.0,
        g: 1.0,
        b: 1.0,
    };

    /// Parse `#rrggbb` or the short `#rgb` form.
    pub fn from_hex(hex: &str) -> Result<Self, ConfigError> {
        let invalid = || ConfigError::InvalidColor(hex.to_string());
        let digits = hex.strip_prefix('#').ok_or_else(invalid)?;
        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(invalid());
        }
        let channel = |s: &str| u8::from_str_radix(s, 16).map_err(|_| invalid());
        let (r, g, b) = match digits.len() {
            6 => (
                channel(&digits[0..2])?,
                channel(&digits[2..4])?,
                channel(&digits[4..6])?,
            ),
            3 => (
                channel(&digits[0..1])? * 17,
                channel(&digits[1..2])? * 17,
                channel(&digits[2..3])? * 17,
            ),
            _ => return Err(invalid()),
        };
        Ok(Self {
            r: r as f32 / 255.0,
            g: g as f32 / 255.0,
            b: b as f32 / 255.0,
        })
    }

    pub fn to_hex(&self) -> String {
        let byte = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        format!("#{:02x}{:02x}{:02x}", byte(self.r), byte(self.g), byte(self.b))
    }

    pub fn to_array(&self) -> [f32; 3] {
        [self.r, self.g, self.b]
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

impl TryFrom<String> for Color {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Color::from_hex(&value)
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_hex()
    }
}

/// Everything that parameterises one animated point field.
///
/// `shape` and `count` decide the generated geometry; changing either
/// regenerates the whole field. The rest is read every frame.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldConfig {
    pub shape: PrimitiveKind,
    pub count: usize,
    pub mode: AnimationMode,
    pub wave: WaveConfig,
    pub explosion: ExplosionConfig,
    pub projection: ProjectionKind,
    /// Push points away from the pointer while waving (stateless, no restore).
    pub hover_displacement: bool,
    /// Only hover-push between pointer enter and leave. When false the push
    /// follows the last pointer target, starting at the field centre.
    pub hover_requires_enter: bool,
    pub point_size: f32,
    pub color: Color,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            shape: PrimitiveKind::Torus,
            count: 2000,
            mode: AnimationMode::Wave,
            wave: WaveConfig::default(),
            explosion: ExplosionConfig::default(),
            projection: ProjectionKind::default(),
            hover_displacement: false,
            hover_requires_enter: false,
            point_size: 0.02,
            color: Color::WHITE,
        }
    }
}

impl FieldConfig {
    /// Decode a possibly partial JSON object; missing fields take defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string(self)?)
    }

    /// True when moving from `self` to `other` requires regenerating the points.
    pub fn regenerates(&self, other: &FieldConfig) -> bool {
        self.shape != other.shape || self.count != other.count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_short_and_long_forms() {
        assert_eq!(Color::from_hex("#fff").unwrap(), Color::WHITE);
        let c = Color::from_hex("#ff8000").unwrap();
        assert!((c.r - 1.0).abs() < 1e-6);
        assert!((c.g - 128.0 / 255.0).abs() < 1e-6);
        assert_eq!(c.b, 0.0);
        assert_eq!(c.to_hex(), "#ff8000");
    }

    #[test]
    fn test_color_rejects_garbage() {
        for bad in ["fff", "#ff", "#gggggg", "#12345", ""] {
            assert!(Color::from_hex(bad).is_err(), "{bad:?} should be rejected");
        }
    }

    #[test]
    fn test_regenerates_only_on_shape_or_count() {
        let base = FieldConfig::default();
        let mut other = base.clone();
        other.wave.amplitude = 1.0;
        other.color = Color::from_hex("#000").unwrap();
        assert!(!base.regenerates(&other));
        other.count = 10;
        assert!(base.regenerates(&other));
    }
}
