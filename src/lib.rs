//! Aviary synthesizes sprite sheets for small decorative creatures and moves them around a
//! scene on their own.
//!
//! Two halves, sharing nothing mutable:
//!
//! - [`FrameSynthesizer`] draws cyclic frame strips (wing flap, blink) from closed-form pose
//!   functions and caches them in a host-owned [`SheetCache`].
//! - [`Flock`] runs one [`MotionController`] per [`Agent`], choosing among five movement
//!   patterns, keeping agents inside their [`Bounds`] and pushing crowded agents apart.
//!
//! Time is a [`VirtualClock`] advanced by the host through [`Flock::tick`]; nothing in the
//! library sleeps or spawns threads.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod animation;
mod foundation;
mod motion;
mod scene;
mod schedule;
mod synth;

pub use crate::foundation::core::{
    Affine, BezPath, Bounds, Point, Rect, Rgba8, Transform, Vec2,
};
pub use crate::foundation::error::{AviaryError, AviaryResult};

pub use crate::animation::cyclic::{AnimationRegistry, CyclicAnimation, Repeat};
pub use crate::animation::ease::Ease;
pub use crate::animation::wave::{Wave, frame_phase};

pub use crate::synth::cache::{CacheStats, SheetCache};
pub use crate::synth::palette::{
    ColorConfig, PRESET_NAMES, PalettePreset, default_preset_for, preset,
};
pub use crate::synth::pose::{CreatureKind, Pose};
pub use crate::synth::raster::{
    BackendKind, CpuRasterBackend, DisabledBackend, PlacedOp, Raster, RasterBackend,
    create_backend,
};
pub use crate::synth::shapes::{DrawOp, frame_ops};
pub use crate::synth::sheet::{AnimationSheet, FrameRect, SheetHandle, SheetKey};
pub use crate::synth::synthesizer::{FrameSynthesizer, SynthRequest};

pub use crate::schedule::clock::VirtualClock;
pub use crate::schedule::scheduler::{Fired, Scheduler, TaskId};
pub use crate::schedule::tween::{Oscillation, Tween};

pub use crate::motion::avoidance::{avoidance_offsets, overlapping_pairs};
pub use crate::motion::config::{AvoidanceConfig, BobConfig, MotionConfig, Span};
pub use crate::motion::controller::{MotionController, MotionEvent};
pub use crate::motion::pattern::{FloatStage, Pattern, PatternKind, PatternSet, PatternTally};
pub use crate::motion::random::{RandomSource, ThreadRandom};

pub use crate::scene::agent::{Agent, AgentConfig, AgentId, Appearance};
pub use crate::scene::config::SceneConfig;
pub use crate::scene::flock::{AgentSnapshot, Flock, FlockStats};
