use std::fmt;

use crate::foundation::core::Point;
use crate::foundation::error::{AviaryError, AviaryResult};
use crate::motion::random::RandomSource;
use crate::schedule::scheduler::TaskId;
use crate::schedule::tween::{Oscillation, Tween};
use crate::synth::pose::CreatureKind;

/// The five movement behaviors a controller can run.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum PatternKind {
    /// Straight eased move to a random point, then a short rest.
    Drift,
    /// Elliptical loop around the starting point.
    Spiral,
    /// Rise-and-return bounce followed by a sideways drift.
    Float,
    /// Hover in place with a small bob.
    Pause,
    /// Quadratic Bézier sweep to a random point.
    CurvedPath,
}

impl PatternKind {
    /// Every kind, in tally order.
    pub const ALL: [PatternKind; 5] = [
        PatternKind::Drift,
        PatternKind::Spiral,
        PatternKind::Float,
        PatternKind::Pause,
        PatternKind::CurvedPath,
    ];

    /// Snake-case name, as used in scene files.
    pub fn name(self) -> &'static str {
        match self {
            Self::Drift => "drift",
            Self::Spiral => "spiral",
            Self::Float => "float",
            Self::Pause => "pause",
            Self::CurvedPath => "curved_path",
        }
    }

    fn index(self) -> usize {
        match self {
            Self::Drift => 0,
            Self::Spiral => 1,
            Self::Float => 2,
            Self::Pause => 3,
            Self::CurvedPath => 4,
        }
    }
}

impl fmt::Display for PatternKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Non-empty, duplicate-free subset of patterns an agent may select from.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "Vec<PatternKind>", into = "Vec<PatternKind>")]
pub struct PatternSet {
    kinds: Vec<PatternKind>,
}

impl PatternSet {
    /// Set of `kinds` with duplicates dropped. Fails when empty.
    pub fn new(kinds: impl IntoIterator<Item = PatternKind>) -> AviaryResult<Self> {
        let mut out: Vec<PatternKind> = Vec::new();
        for k in kinds {
            if !out.contains(&k) {
                out.push(k);
            }
        }
        if out.is_empty() {
            return Err(AviaryError::validation("pattern set must not be empty"));
        }
        Ok(Self { kinds: out })
    }

    /// All five patterns.
    pub fn all() -> Self {
        Self {
            kinds: PatternKind::ALL.to_vec(),
        }
    }

    /// Default repertoire per creature.
    pub fn for_creature(kind: CreatureKind) -> Self {
        let kinds = match kind {
            CreatureKind::Butterfly => PatternKind::ALL.to_vec(),
            CreatureKind::Bird => vec![
                PatternKind::Drift,
                PatternKind::CurvedPath,
                PatternKind::Float,
                PatternKind::Pause,
            ],
            CreatureKind::Owl => vec![PatternKind::Pause, PatternKind::Float],
        };
        Self { kinds }
    }

    /// Members in insertion order.
    pub fn kinds(&self) -> &[PatternKind] {
        &self.kinds
    }

    /// Whether `kind` may be selected.
    pub fn contains(&self, kind: PatternKind) -> bool {
        self.kinds.contains(&kind)
    }

    /// Uniform pick.
    pub fn pick(&self, rng: &mut dyn RandomSource) -> PatternKind {
        self.kinds
            .get(rng.index(self.kinds.len()))
            .copied()
            .unwrap_or(PatternKind::Pause)
    }
}

impl TryFrom<Vec<PatternKind>> for PatternSet {
    type Error = AviaryError;

    fn try_from(kinds: Vec<PatternKind>) -> Result<Self, Self::Error> {
        Self::new(kinds)
    }
}

impl From<PatternSet> for Vec<PatternKind> {
    fn from(set: PatternSet) -> Self {
        set.kinds
    }
}

/// Float runs a rise-and-return bounce, then a horizontal drift.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FloatStage {
    /// Going up and back down.
    Rise,
    /// Moving sideways.
    Across,
}

/// Scratch state of the running pattern.
#[derive(Clone, Debug, PartialEq)]
pub enum Pattern {
    /// See [`PatternKind::Drift`].
    Drift {
        /// Position when the drift began.
        start: Point,
        /// Clamped destination.
        target: Point,
        /// Eased progress from `start` to `target`.
        travel: Tween,
        /// Visual-only vertical bob.
        bob: Oscillation,
        /// Set once the target is reached; the controller then rests until its reselect fires.
        arrived: bool,
    },
    /// See [`PatternKind::Spiral`].
    Spiral {
        /// Fixed center of the ellipse.
        center: Point,
        /// Horizontal radius in pixels.
        radius: f64,
        /// Accumulated angle in radians.
        angle: f64,
        /// Recurring step task, cancelled when the spiral ends.
        tick_task: TaskId,
    },
    /// See [`PatternKind::Float`].
    Float {
        /// Position when the float began.
        origin: Point,
        /// Height of the bounce in pixels.
        rise: f64,
        /// Signed sideways distance in pixels.
        offset: f64,
        /// Which half of the float is running.
        stage: FloatStage,
        /// Yoyo tween of the bounce.
        bounce: Tween,
        /// Sideways tween, starting when the bounce ends.
        across: Tween,
        /// Previous sampled position, for the heading.
        last: Point,
    },
    /// See [`PatternKind::Pause`].
    Pause {
        /// Idle bob.
        bob: Oscillation,
    },
    /// See [`PatternKind::CurvedPath`].
    CurvedPath {
        /// Curve start.
        start: Point,
        /// Bézier control point.
        control: Point,
        /// Curve end.
        target: Point,
        /// Eased curve parameter.
        travel: Tween,
        /// Previous sampled position, for the heading.
        last: Point,
    },
}

impl Pattern {
    /// Kind of this payload.
    pub fn kind(&self) -> PatternKind {
        match self {
            Self::Drift { .. } => PatternKind::Drift,
            Self::Spiral { .. } => PatternKind::Spiral,
            Self::Float { .. } => PatternKind::Float,
            Self::Pause { .. } => PatternKind::Pause,
            Self::CurvedPath { .. } => PatternKind::CurvedPath,
        }
    }
}

/// Selection counts per pattern kind.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PatternTally {
    counts: [u64; 5],
}

impl PatternTally {
    /// Count one selection of `kind`.
    pub fn record(&mut self, kind: PatternKind) {
        self.counts[kind.index()] += 1;
    }

    /// Selections of `kind` so far.
    pub fn get(&self, kind: PatternKind) -> u64 {
        self.counts[kind.index()]
    }

    /// Selections of any kind.
    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }

    /// `(kind, count)` pairs in [`PatternKind::ALL`] order.
    pub fn iter(&self) -> impl Iterator<Item = (PatternKind, u64)> + '_ {
        PatternKind::ALL.into_iter().map(|k| (k, self.get(k)))
    }
}

impl serde::Serialize for PatternTally {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeMap;

        let mut map = serializer.serialize_map(Some(PatternKind::ALL.len()))?;
        for (kind, n) in self.iter() {
            map.serialize_entry(kind.name(), &n)?;
        }
        map.end()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/motion/pattern.rs"]
mod tests;
