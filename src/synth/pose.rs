use std::f64::consts::{FRAC_PI_2, PI};

use crate::animation::wave::Wave;
use crate::synth::palette::ColorConfig;

/// The creature families aviary knows how to draw and move.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CreatureKind {
    /// Side-view songbird with a wing flap cycle.
    Bird,
    /// Top-down butterfly with opening and closing wings.
    Butterfly,
    /// Front-facing owl mentor with an idle blink cycle.
    Owl,
}

impl CreatureKind {
    /// Stable lowercase name, used in cache keys.
    pub fn name(self) -> &'static str {
        match self {
            Self::Bird => "bird",
            Self::Butterfly => "butterfly",
            Self::Owl => "owl",
        }
    }

    /// Parse a lowercase name.
    pub fn from_name(s: &str) -> Option<Self> {
        match s {
            "bird" => Some(Self::Bird),
            "butterfly" => Some(Self::Butterfly),
            "owl" => Some(Self::Owl),
            _ => None,
        }
    }

    /// Frames in one loop of the creature's cycle.
    pub fn default_frame_count(self) -> u32 {
        match self {
            Self::Bird => 8,
            Self::Butterfly => 8,
            Self::Owl => 12,
        }
    }

    /// Playback rate of the cycle in frames per second.
    pub fn frame_rate(self) -> f64 {
        match self {
            Self::Bird => 12.0,
            Self::Butterfly => 16.0,
            Self::Owl => 6.0,
        }
    }

    /// Size of one frame in pixels.
    pub fn frame_size(self) -> (u32, u32) {
        match self {
            Self::Bird => (48, 32),
            Self::Butterfly => (32, 32),
            Self::Owl => (48, 48),
        }
    }

    /// Suffix naming the cycle (`flap`, `flutter`, `idle`).
    pub fn cycle_name(self) -> &'static str {
        match self {
            Self::Bird => "flap",
            Self::Butterfly => "flutter",
            Self::Owl => "idle",
        }
    }

    /// Rotation added to a heading to get the sprite's on-screen rotation.
    ///
    /// Butterflies are drawn head-up, so a heading of `0` (+x) needs a quarter turn. Birds
    /// are drawn facing +x. The owl never rotates with its heading.
    pub fn facing_offset(self) -> f64 {
        match self {
            Self::Bird => 0.0,
            Self::Butterfly => FRAC_PI_2,
            Self::Owl => 0.0,
        }
    }

    /// Whether the sprite turns to face its direction of travel.
    pub fn rotates_with_heading(self) -> bool {
        !matches!(self, Self::Owl)
    }
}

impl std::fmt::Display for CreatureKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Pose parameters of one frame, all derived from the frame's phase.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Pose {
    /// Normalized phase in `[0, 1)`.
    pub phase: f64,
    /// Wing elevation in `[-1, 1]`; `1` is fully raised.
    pub wing_lift: f64,
    /// Wing spread in `[0, 1]`; `1` is fully open.
    pub wing_open: f64,
    /// Vertical body offset in pixels.
    pub body_bob: f64,
    /// Eye openness in `[0, 1]`.
    pub eye_open: f64,
    /// Horizontal sway of wings and ear tufts in pixels.
    pub sway: f64,
    /// Highlight intensity in `[0, 1]`.
    pub shimmer: f64,
}

impl Pose {
    /// Compute the pose of `kind` at phase `p`.
    pub fn at(kind: CreatureKind, p: f64, palette: &ColorConfig) -> Self {
        let waves = PoseWaves::for_kind(kind, palette);
        Self {
            phase: p,
            wing_lift: waves.wing_lift.sample(p),
            wing_open: waves.wing_open.sample(p).clamp(0.0, 1.0),
            body_bob: waves.body_bob.sample(p),
            eye_open: waves.eye_open.sample(p).clamp(0.0, 1.0),
            sway: waves.sway.sample(p),
            shimmer: waves.shimmer.sample(p).clamp(0.0, 1.0),
        }
    }

    /// Largest absolute difference between the geometric parameters of two poses.
    pub fn max_delta(&self, other: &Pose) -> f64 {
        [
            self.wing_lift - other.wing_lift,
            self.wing_open - other.wing_open,
            self.body_bob - other.body_bob,
            self.eye_open - other.eye_open,
            self.sway - other.sway,
            self.shimmer - other.shimmer,
        ]
        .into_iter()
        .map(f64::abs)
        .fold(0.0, f64::max)
    }
}

/// Per-kind wave table. Every entry has integer harmonics so poses loop cleanly.
#[derive(Clone, Copy, Debug)]
pub(crate) struct PoseWaves {
    pub(crate) wing_lift: Wave,
    pub(crate) wing_open: Wave,
    pub(crate) body_bob: Wave,
    pub(crate) eye_open: Wave,
    pub(crate) sway: Wave,
    pub(crate) shimmer: Wave,
}

impl PoseWaves {
    pub(crate) fn for_kind(kind: CreatureKind, palette: &ColorConfig) -> Self {
        let flat = |value: f64| Wave::Constant { value };
        let shimmer = if palette.shimmer {
            Wave::Sine {
                amp: 0.5,
                harmonics: 2,
                phase: 0.0,
                offset: 0.5,
            }
        } else {
            flat(0.0)
        };

        match kind {
            CreatureKind::Bird => Self {
                wing_lift: Wave::sine(1.0, 0.0),
                wing_open: flat(1.0),
                // Body dips while the wings push down.
                body_bob: Wave::Sine {
                    amp: 1.5,
                    harmonics: 1,
                    phase: PI,
                    offset: 0.0,
                },
                eye_open: flat(1.0),
                sway: flat(0.0),
                shimmer,
            },
            CreatureKind::Butterfly => Self {
                wing_lift: flat(0.0),
                wing_open: Wave::Sine {
                    amp: 0.4,
                    harmonics: 1,
                    phase: FRAC_PI_2,
                    offset: 0.6,
                },
                body_bob: Wave::Sine {
                    amp: 0.8,
                    harmonics: 2,
                    phase: 0.0,
                    offset: 0.0,
                },
                eye_open: flat(1.0),
                sway: flat(0.0),
                shimmer,
            },
            CreatureKind::Owl => Self {
                wing_lift: flat(0.0),
                wing_open: flat(0.0),
                body_bob: Wave::Sine {
                    amp: 0.8,
                    harmonics: 2,
                    phase: 0.0,
                    offset: 0.0,
                },
                eye_open: Wave::Pulse {
                    amp: -1.0,
                    harmonics: 1,
                    center: 0.75,
                    sharpness: 12,
                    offset: 1.0,
                },
                sway: Wave::sine(1.5, 0.0),
                shimmer,
            },
        }
    }

    #[cfg(test)]
    pub(crate) fn all(&self) -> [Wave; 6] {
        [
            self.wing_lift,
            self.wing_open,
            self.body_bob,
            self.eye_open,
            self.sway,
            self.shimmer,
        ]
    }
}

#[cfg(test)]
#[path = "../../tests/unit/synth/pose.rs"]
mod tests;
