use std::sync::Arc;

use crate::animation::cyclic::CyclicAnimation;
use crate::animation::wave::frame_phase;
use crate::foundation::core::{Affine, Vec2};
use crate::foundation::error::{AviaryError, AviaryResult};
use crate::synth::cache::SheetCache;
use crate::synth::palette::ColorConfig;
use crate::synth::pose::{CreatureKind, Pose};
use crate::synth::raster::{PlacedOp, RasterBackend};
use crate::synth::shapes::frame_ops;
use crate::synth::sheet::{AnimationSheet, SheetHandle, SheetKey};

/// Everything needed to build one sheet.
#[derive(Clone, Debug, PartialEq)]
pub struct SynthRequest {
    /// Cache key; requests with an existing key are answered from the cache.
    pub key: SheetKey,
    /// Creature to draw.
    pub kind: CreatureKind,
    /// Frames in the loop.
    pub frame_count: u32,
    /// Palette, read only during synthesis.
    pub palette: ColorConfig,
}

impl SynthRequest {
    /// Request with the creature's default frame count and a palette-derived key.
    pub fn for_creature(kind: CreatureKind, palette: ColorConfig) -> Self {
        Self {
            key: SheetKey::derive(kind, &palette),
            kind,
            frame_count: kind.default_frame_count(),
            palette,
        }
    }

    /// Override the frame count.
    pub fn with_frame_count(mut self, frame_count: u32) -> Self {
        self.frame_count = frame_count;
        self
    }
}

/// Builds cyclic frame strips from closed-form pose functions.
pub struct FrameSynthesizer {
    backend: Box<dyn RasterBackend>,
}

impl FrameSynthesizer {
    /// Synthesizer drawing through `backend`.
    pub fn new(backend: Box<dyn RasterBackend>) -> Self {
        Self { backend }
    }

    /// Return the cached sheet for `req.key`, or draw, cache and return a new one.
    ///
    /// A new sheet is `frame_width * frame_count` wide; frame `i` shows the pose at phase
    /// `i / frame_count`. The matching looping animation is registered alongside.
    #[tracing::instrument(skip(self, cache, req), fields(key = %req.key, kind = %req.kind))]
    pub fn synthesize(
        &mut self,
        cache: &mut SheetCache,
        req: &SynthRequest,
    ) -> AviaryResult<SheetHandle> {
        if let Some(sheet) = cache.sheet(&req.key) {
            cache.record_hit();
            let animation = ensure_animation(cache, &sheet)?;
            tracing::trace!("sheet cache hit");
            return Ok(SheetHandle { sheet, animation });
        }

        if req.frame_count == 0 {
            return Err(AviaryError::validation("frame_count must be > 0"));
        }

        let (fw, fh) = req.kind.frame_size();
        let sheet_width = fw.checked_mul(req.frame_count).ok_or_else(|| {
            AviaryError::synthesis(format!("{} frames of width {fw} overflow", req.frame_count))
        })?;

        let mut placed = Vec::new();
        for i in 0..req.frame_count {
            let p = frame_phase(i, req.frame_count);
            let pose = Pose::at(req.kind, p, &req.palette);
            let slot = Affine::translate(Vec2::new(f64::from(i * fw), 0.0));
            placed.extend(
                frame_ops(req.kind, &pose, &req.palette, fw, fh)
                    .into_iter()
                    .map(|op| PlacedOp {
                        transform: slot,
                        op,
                    }),
            );
        }

        let raster = self
            .backend
            .rasterize(sheet_width, fh, &placed)
            .map_err(|e| match e {
                AviaryError::Synthesis(_) => e,
                other => AviaryError::synthesis(other.to_string()),
            })?;

        let sheet = AnimationSheet::new(
            req.key.clone(),
            req.kind,
            fw,
            fh,
            req.frame_count,
            raster,
        );
        let sheet = cache.insert_sheet(sheet)?;
        let animation = ensure_animation(cache, &sheet)?;
        tracing::debug!(
            frames = req.frame_count,
            width = sheet_width,
            height = fh,
            ops = placed.len(),
            "synthesized sheet"
        );
        Ok(SheetHandle { sheet, animation })
    }

    /// [`FrameSynthesizer::synthesize`], logging and swallowing failures.
    ///
    /// `None` means the creature is not renderable and should be skipped.
    pub fn synthesize_or_skip(
        &mut self,
        cache: &mut SheetCache,
        req: &SynthRequest,
    ) -> Option<SheetHandle> {
        match self.synthesize(cache, req) {
            Ok(handle) => Some(handle),
            Err(err) => {
                tracing::warn!(key = %req.key, kind = %req.kind, error = %err, "skipping creature");
                None
            }
        }
    }
}

fn ensure_animation(
    cache: &mut SheetCache,
    sheet: &Arc<AnimationSheet>,
) -> AviaryResult<Arc<CyclicAnimation>> {
    let kind = sheet.kind();
    let name = sheet.key().animation_name(kind);
    if let Some(anim) = cache.animation(&name) {
        return Ok(anim);
    }
    let anim = CyclicAnimation::looping(
        name,
        sheet.key().clone(),
        sheet.frame_count(),
        kind.frame_rate(),
    )?;
    cache.create_animation(anim)
}

#[cfg(test)]
#[path = "../../tests/unit/synth/synthesizer.rs"]
mod tests;
