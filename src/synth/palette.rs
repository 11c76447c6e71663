use crate::foundation::core::Rgba8;
use crate::synth::pose::CreatureKind;

const DEFAULT_ACCENT: Rgba8 = Rgba8::rgb(0xe0, 0x8a, 0x1e);

/// Palette a frame sheet is synthesized from.
///
/// Only read during synthesis; the produced sheet does not keep a reference to it.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ColorConfig {
    /// Torso and head.
    pub body: Rgba8,
    /// Main wing region.
    pub primary: Rgba8,
    /// Secondary region (lower wings, belly, beak).
    pub secondary: Rgba8,
    /// Small details such as beaks and feet. Falls back to a warm orange.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accent: Option<Rgba8>,
    /// Animated highlight on the wings.
    #[serde(default)]
    pub shimmer: bool,
    /// Spots, bars or chevrons depending on the creature.
    #[serde(default)]
    pub pattern: bool,
}

impl ColorConfig {
    /// Palette from the three required colors with no decorations.
    pub fn new(body: Rgba8, primary: Rgba8, secondary: Rgba8) -> Self {
        Self {
            body,
            primary,
            secondary,
            accent: None,
            shimmer: false,
            pattern: false,
        }
    }

    /// Enable or disable the shimmer highlight.
    pub fn with_shimmer(mut self, on: bool) -> Self {
        self.shimmer = on;
        self
    }

    /// Enable or disable the decorative pattern.
    pub fn with_pattern(mut self, on: bool) -> Self {
        self.pattern = on;
        self
    }

    /// Set the accent color.
    pub fn with_accent(mut self, accent: Rgba8) -> Self {
        self.accent = Some(accent);
        self
    }

    /// Accent color, or the default when unset.
    pub fn accent_or_default(&self) -> Rgba8 {
        self.accent.unwrap_or(DEFAULT_ACCENT)
    }
}

/// A named palette bound to the creature it was designed for.
#[derive(Clone, Debug, PartialEq)]
pub struct PalettePreset {
    /// Preset name, kebab-case.
    pub name: &'static str,
    /// Creature the palette suits.
    pub kind: CreatureKind,
    /// The palette.
    pub colors: ColorConfig,
}

/// Names of every built-in palette, in display order.
pub const PRESET_NAMES: &[&str] = &[
    "monarch",
    "morpho",
    "cabbage-white",
    "robin",
    "bluejay",
    "sparrow",
    "barn-owl",
    "snowy-owl",
];

/// Look up a built-in palette by name.
pub fn preset(name: &str) -> Option<PalettePreset> {
    let (kind, colors) = match name {
        "monarch" => (
            CreatureKind::Butterfly,
            ColorConfig::new(
                Rgba8::rgb(0x2b, 0x1d, 0x14),
                Rgba8::rgb(0xf2, 0x8c, 0x28),
                Rgba8::rgb(0xd9, 0x62, 0x1a),
            )
            .with_pattern(true),
        ),
        "morpho" => (
            CreatureKind::Butterfly,
            ColorConfig::new(
                Rgba8::rgb(0x1b, 0x1f, 0x3a),
                Rgba8::rgb(0x2f, 0x8f, 0xff),
                Rgba8::rgb(0x1c, 0x5f, 0xc9),
            )
            .with_shimmer(true),
        ),
        "cabbage-white" => (
            CreatureKind::Butterfly,
            ColorConfig::new(
                Rgba8::rgb(0x4a, 0x4a, 0x40),
                Rgba8::rgb(0xf7, 0xf5, 0xe8),
                Rgba8::rgb(0xe8, 0xe4, 0xc9),
            ),
        ),
        "robin" => (
            CreatureKind::Bird,
            ColorConfig::new(
                Rgba8::rgb(0x5a, 0x4a, 0x3f),
                Rgba8::rgb(0x46, 0x3a, 0x32),
                Rgba8::rgb(0xd8, 0x5a, 0x2b),
            ),
        ),
        "bluejay" => (
            CreatureKind::Bird,
            ColorConfig::new(
                Rgba8::rgb(0x3f, 0x7c, 0xc4),
                Rgba8::rgb(0x2d, 0x5d, 0xa8),
                Rgba8::rgb(0xec, 0xf0, 0xf5),
            )
            .with_pattern(true)
            .with_accent(Rgba8::rgb(0x22, 0x22, 0x2a)),
        ),
        "sparrow" => (
            CreatureKind::Bird,
            ColorConfig::new(
                Rgba8::rgb(0x8a, 0x6b, 0x4e),
                Rgba8::rgb(0x6b, 0x50, 0x3a),
                Rgba8::rgb(0xd9, 0xc9, 0xad),
            )
            .with_pattern(true),
        ),
        "barn-owl" => (
            CreatureKind::Owl,
            ColorConfig::new(
                Rgba8::rgb(0xc8, 0x93, 0x5a),
                Rgba8::rgb(0xa8, 0x74, 0x42),
                Rgba8::rgb(0xf4, 0xe6, 0xd2),
            )
            .with_pattern(true),
        ),
        "snowy-owl" => (
            CreatureKind::Owl,
            ColorConfig::new(
                Rgba8::rgb(0xf2, 0xf2, 0xee),
                Rgba8::rgb(0xdc, 0xdc, 0xd6),
                Rgba8::rgb(0xff, 0xff, 0xff),
            )
            .with_accent(Rgba8::rgb(0x30, 0x30, 0x30)),
        ),
        _ => return None,
    };
    let name = PRESET_NAMES.iter().copied().find(|n| *n == name)?;
    Some(PalettePreset { name, kind, colors })
}

/// First preset designed for `kind`.
pub fn default_preset_for(kind: CreatureKind) -> PalettePreset {
    let name = match kind {
        CreatureKind::Bird => "robin",
        CreatureKind::Butterfly => "monarch",
        CreatureKind::Owl => "barn-owl",
    };
    preset(name).unwrap_or_else(|| PalettePreset {
        name: "fallback",
        kind,
        colors: ColorConfig::new(
            Rgba8::rgb(0x80, 0x80, 0x80),
            Rgba8::rgb(0xa0, 0xa0, 0xa0),
            Rgba8::rgb(0xc0, 0xc0, 0xc0),
        ),
    })
}

#[cfg(test)]
#[path = "../../tests/unit/synth/palette.rs"]
mod tests;
