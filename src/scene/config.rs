use std::collections::BTreeMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::foundation::core::Bounds;
use crate::foundation::error::{AviaryError, AviaryResult};
use crate::motion::config::{AvoidanceConfig, MotionConfig};
use crate::motion::random::RandomSource;
use crate::scene::agent::{AgentConfig, AgentId};
use crate::scene::flock::Flock;
use crate::synth::cache::SheetCache;
use crate::synth::sheet::SheetKey;
use crate::synth::synthesizer::{FrameSynthesizer, SynthRequest};

fn default_tick_ms() -> u64 {
    16
}

fn default_avoidance() -> Option<AvoidanceConfig> {
    Some(AvoidanceConfig::default())
}

/// JSON description of a scene: its boundary, motion tunables and creatures.
///
/// `avoidance: null` turns the avoidance pass off.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SceneConfig {
    /// Boundary shared by agents without their own.
    pub bounds: Bounds,
    /// Host tick interval.
    #[serde(default = "default_tick_ms")]
    pub tick_ms: u64,
    /// Motion tunables.
    #[serde(default)]
    pub motion: MotionConfig,
    /// Avoidance settings; `None` disables the pass.
    #[serde(default = "default_avoidance")]
    pub avoidance: Option<AvoidanceConfig>,
    /// Creatures to spawn, in order.
    #[serde(default)]
    pub agents: Vec<AgentConfig>,
}

impl SceneConfig {
    /// Empty scene over `bounds` with default tunables.
    pub fn new(bounds: Bounds) -> Self {
        Self {
            bounds,
            tick_ms: default_tick_ms(),
            motion: MotionConfig::default(),
            avoidance: default_avoidance(),
            agents: Vec::new(),
        }
    }

    /// Parse a scene from a JSON reader. The result is not validated yet.
    pub fn from_reader<R: std::io::Read>(r: R) -> AviaryResult<Self> {
        serde_json::from_reader(r)
            .map_err(|e| AviaryError::config(format!("parse scene JSON: {e}")))
    }

    /// Parse and validate a scene file.
    #[tracing::instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn from_path(path: impl AsRef<Path>) -> AviaryResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            AviaryError::config(format!("open scene JSON '{}': {e}", path.display()))
        })?;
        let scene = Self::from_reader(BufReader::new(f))?;
        scene.validate()?;
        tracing::debug!(agents = scene.agents.len(), "scene loaded");
        Ok(scene)
    }

    /// Check bounds, tick interval, tunables and every agent.
    pub fn validate(&self) -> AviaryResult<()> {
        self.bounds
            .validate()
            .map_err(|e| AviaryError::config(format!("scene bounds: {e}")))?;
        if self.tick_ms == 0 {
            return Err(AviaryError::config("tick_ms must be > 0"));
        }
        self.motion.validate()?;
        if let Some(a) = &self.avoidance {
            a.validate()?;
        }
        for (i, agent) in self.agents.iter().enumerate() {
            agent
                .validate()
                .map_err(|e| AviaryError::config(format!("agents[{i}]: {e}")))?;
        }
        Ok(())
    }

    /// Synthesize every distinct sheet the scene needs, then spawn its agents.
    ///
    /// Sheets that fail to synthesize are skipped; their agents spawn as placeholders.
    pub fn build(
        &self,
        synth: &mut FrameSynthesizer,
        cache: &mut SheetCache,
        rng: Box<dyn RandomSource>,
    ) -> AviaryResult<(Flock, Vec<AgentId>)> {
        self.validate()?;

        let mut requests: BTreeMap<SheetKey, SynthRequest> = BTreeMap::new();
        for agent in &self.agents {
            let palette = agent.palette()?;
            let key = agent.sheet_key()?;
            requests.entry(key.clone()).or_insert_with(|| SynthRequest {
                key,
                kind: agent.kind,
                frame_count: agent.kind.default_frame_count(),
                palette,
            });
        }
        for req in requests.values() {
            let _ = synth.synthesize_or_skip(cache, req);
        }

        let mut flock = Flock::new(self.bounds, self.motion.clone())?
            .with_rng(rng)
            .with_avoidance(self.avoidance)?;
        let ids = self
            .agents
            .iter()
            .map(|agent| flock.spawn(agent.clone(), cache))
            .collect::<AviaryResult<Vec<_>>>()?;
        Ok((flock, ids))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/config.rs"]
mod tests;
