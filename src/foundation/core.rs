use crate::foundation::error::{AviaryError, AviaryResult};

pub use kurbo::{Affine, BezPath, Point, Rect, Vec2};

/// Straight (non-premultiplied) RGBA8 color as authored in palettes and scene files.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Rgba8 {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel.
    pub a: u8,
}

impl Rgba8 {
    /// Opaque color from RGB channels.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Color from RGBA channels.
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Same color with a different alpha.
    pub fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }

    /// Same color with alpha multiplied by `factor` (clamped to `[0, 1]`).
    pub fn fade(self, factor: f64) -> Self {
        let f = factor.clamp(0.0, 1.0);
        Self {
            a: (f64::from(self.a) * f).round() as u8,
            ..self
        }
    }

    /// Linear blend towards `other`; `t = 0` keeps `self`.
    pub fn mix(self, other: Rgba8, t: f64) -> Self {
        let t = t.clamp(0.0, 1.0);
        let ch = |a: u8, b: u8| -> u8 {
            (f64::from(a) + (f64::from(b) - f64::from(a)) * t).round() as u8
        };
        Self {
            r: ch(self.r, other.r),
            g: ch(self.g, other.g),
            b: ch(self.b, other.b),
            a: ch(self.a, other.a),
        }
    }

    /// Parse `#rrggbb` or `#rrggbbaa`.
    pub fn from_hex(s: &str) -> AviaryResult<Self> {
        let hex = s
            .trim()
            .strip_prefix('#')
            .ok_or_else(|| AviaryError::validation(format!("color '{s}' must start with '#'")))?;
        if !hex.is_ascii() || (hex.len() != 6 && hex.len() != 8) {
            return Err(AviaryError::validation(format!(
                "color '{s}' must be #rrggbb or #rrggbbaa"
            )));
        }
        let byte = |i: usize| -> AviaryResult<u8> {
            u8::from_str_radix(&hex[i..i + 2], 16)
                .map_err(|_| AviaryError::validation(format!("color '{s}' has invalid hex digits")))
        };
        let a = if hex.len() == 8 { byte(6)? } else { 255 };
        Ok(Self {
            r: byte(0)?,
            g: byte(2)?,
            b: byte(4)?,
            a,
        })
    }

    /// Format as `#rrggbb`, or `#rrggbbaa` when not opaque.
    pub fn to_hex(self) -> String {
        if self.a == 255 {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!("#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
        }
    }
}

impl serde::Serialize for Rgba8 {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> serde::Deserialize<'de> for Rgba8 {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Rgba8::from_hex(&s).map_err(serde::de::Error::custom)
    }
}

/// Axis-aligned boundary rectangle an agent's position is confined to (inclusive edges).
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bounds {
    /// Left edge.
    pub min_x: f64,
    /// Right edge.
    pub max_x: f64,
    /// Top edge.
    pub min_y: f64,
    /// Bottom edge.
    pub max_y: f64,
}

impl Bounds {
    /// Build and validate a boundary.
    pub fn new(min_x: f64, max_x: f64, min_y: f64, max_y: f64) -> AviaryResult<Self> {
        let b = Self {
            min_x,
            max_x,
            min_y,
            max_y,
        };
        b.validate()?;
        Ok(b)
    }

    /// Check that all edges are finite and each axis is non-degenerate.
    pub fn validate(&self) -> AviaryResult<()> {
        let all = [self.min_x, self.max_x, self.min_y, self.max_y];
        if all.iter().any(|v| !v.is_finite()) {
            return Err(AviaryError::validation("bounds must be finite"));
        }
        if self.min_x >= self.max_x || self.min_y >= self.max_y {
            return Err(AviaryError::validation(
                "bounds must satisfy minX < maxX and minY < maxY",
            ));
        }
        Ok(())
    }

    /// Clamp a point into the rectangle.
    pub fn clamp(&self, p: Point) -> Point {
        Point::new(
            p.x.clamp(self.min_x, self.max_x),
            p.y.clamp(self.min_y, self.max_y),
        )
    }

    /// Whether `p` lies inside the rectangle (edges included).
    pub fn contains(&self, p: Point) -> bool {
        (self.min_x..=self.max_x).contains(&p.x) && (self.min_y..=self.max_y).contains(&p.y)
    }

    /// Width of the rectangle.
    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    /// Height of the rectangle.
    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    /// Center point.
    pub fn center(&self) -> Point {
        Point::new(
            (self.min_x + self.max_x) * 0.5,
            (self.min_y + self.max_y) * 0.5,
        )
    }

    /// As a `kurbo` rectangle.
    pub fn to_rect(&self) -> Rect {
        Rect::new(self.min_x, self.min_y, self.max_x, self.max_y)
    }
}

/// Live transform of one agent.
///
/// `heading` is the direction of travel in radians (`0` = +x, y grows downward). The sprite's
/// on-screen rotation is derived from it with a per-creature facing offset.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Transform {
    /// Logical position, always inside the owning controller's bounds.
    pub position: Point,
    /// Direction of travel in radians.
    pub heading: f64,
    /// Uniform sprite scale.
    pub scale: f64,
    /// Purely visual vertical offset (idle bobbing); not part of the logical position.
    pub bob: f64,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Point::ZERO,
            heading: 0.0,
            scale: 1.0,
            bob: 0.0,
        }
    }
}

impl Transform {
    /// Transform at `position` with default heading and scale.
    pub fn at(position: Point) -> Self {
        Self {
            position,
            ..Self::default()
        }
    }

    /// Affine placing a sprite whose local origin is its center.
    pub fn to_affine(self, facing_offset: f64) -> Affine {
        let t_translate = Affine::translate(Vec2::new(self.position.x, self.position.y + self.bob));
        let t_rotate = Affine::rotate(self.heading + facing_offset);
        let t_scale = Affine::scale(self.scale);

        // T(translate) * R(rot) * S(scale)
        t_translate * t_rotate * t_scale
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
