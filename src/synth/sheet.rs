use std::sync::Arc;

use crate::foundation::math::Fnv1a64;
use crate::synth::palette::ColorConfig;
use crate::synth::pose::CreatureKind;
use crate::synth::raster::Raster;

/// Cache key of a synthesized sheet, derived from creature kind and palette.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct SheetKey(String);

impl SheetKey {
    /// Wrap an explicit key.
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// `"<kind>-<palette hash>"`. Equal palettes give equal keys.
    pub fn derive(kind: CreatureKind, palette: &ColorConfig) -> Self {
        let mut h = Fnv1a64::new_default();
        h.write_bytes(kind.name().as_bytes());
        for c in [
            palette.body,
            palette.primary,
            palette.secondary,
            palette.accent_or_default(),
        ] {
            h.write_bytes(&[c.r, c.g, c.b, c.a]);
        }
        h.write_u8(u8::from(palette.shimmer));
        h.write_u8(u8::from(palette.pattern));
        Self(format!("{}-{:016x}", kind.name(), h.finish()))
    }

    /// Name of the cyclic animation that plays this sheet.
    pub fn animation_name(&self, kind: CreatureKind) -> String {
        format!("{}:{}", self.0, kind.cycle_name())
    }

    /// The key as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SheetKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Pixel rectangle of one frame inside a sheet's raster.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct FrameRect {
    /// Left edge.
    pub x: u32,
    /// Top edge.
    pub y: u32,
    /// Width.
    pub width: u32,
    /// Height.
    pub height: u32,
}

/// Immutable strip of equally sized frames laid out left to right in one raster.
#[derive(Debug)]
pub struct AnimationSheet {
    key: SheetKey,
    kind: CreatureKind,
    frame_width: u32,
    frame_height: u32,
    frames: Vec<FrameRect>,
    raster: Raster,
}

impl AnimationSheet {
    pub(crate) fn new(
        key: SheetKey,
        kind: CreatureKind,
        frame_width: u32,
        frame_height: u32,
        frame_count: u32,
        raster: Raster,
    ) -> Self {
        let frames = (0..frame_count)
            .map(|i| FrameRect {
                x: i * frame_width,
                y: 0,
                width: frame_width,
                height: frame_height,
            })
            .collect();
        Self {
            key,
            kind,
            frame_width,
            frame_height,
            frames,
            raster,
        }
    }

    /// Cache key.
    pub fn key(&self) -> &SheetKey {
        &self.key
    }

    /// Creature drawn in the sheet.
    pub fn kind(&self) -> CreatureKind {
        self.kind
    }

    /// Width of one frame.
    pub fn frame_width(&self) -> u32 {
        self.frame_width
    }

    /// Height of one frame.
    pub fn frame_height(&self) -> u32 {
        self.frame_height
    }

    /// Number of frames.
    pub fn frame_count(&self) -> u32 {
        self.frames.len() as u32
    }

    /// Frame rectangles in playback order.
    pub fn frames(&self) -> &[FrameRect] {
        &self.frames
    }

    /// Rectangle of frame `index`.
    pub fn frame(&self, index: u32) -> Option<FrameRect> {
        self.frames.get(index as usize).copied()
    }

    /// Backing raster holding every frame.
    pub fn raster(&self) -> &Raster {
        &self.raster
    }

    /// Pixels of frame `index` as a standalone raster.
    pub fn frame_raster(&self, index: u32) -> Option<Raster> {
        let r = self.frame(index)?;
        Some(self.raster.crop(r.x, r.y, r.width, r.height))
    }
}

/// Shared handles produced by a synthesis request.
#[derive(Clone, Debug)]
pub struct SheetHandle {
    /// The frame strip.
    pub sheet: Arc<AnimationSheet>,
    /// Looping playback descriptor over the strip.
    pub animation: Arc<crate::animation::cyclic::CyclicAnimation>,
}

#[cfg(test)]
#[path = "../../tests/unit/synth/sheet.rs"]
mod tests;
