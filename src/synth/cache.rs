use std::collections::HashMap;
use std::sync::Arc;

use crate::animation::cyclic::{AnimationRegistry, CyclicAnimation};
use crate::foundation::error::{AviaryError, AviaryResult};
use crate::synth::sheet::{AnimationSheet, SheetKey};

/// Counters describing how the cache has been used.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize)]
pub struct CacheStats {
    /// Sheets inserted (one rasterization pass each).
    pub sheets_built: u64,
    /// Synthesis requests answered from the cache.
    pub hits: u64,
}

/// Host-owned store of synthesized sheets and their cyclic animations.
///
/// Entries are never replaced: once a key is present it stays bound to the same sheet for the
/// lifetime of the cache.
#[derive(Debug, Default)]
pub struct SheetCache {
    sheets: HashMap<SheetKey, Arc<AnimationSheet>>,
    animations: AnimationRegistry,
    stats: CacheStats,
}

impl SheetCache {
    /// Empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a sheet exists for `key`.
    pub fn contains_sheet(&self, key: &SheetKey) -> bool {
        self.sheets.contains_key(key)
    }

    /// Shared handle to the sheet for `key`.
    pub fn sheet(&self, key: &SheetKey) -> Option<Arc<AnimationSheet>> {
        self.sheets.get(key).cloned()
    }

    /// Whether an animation named `name` exists.
    pub fn contains_animation(&self, name: &str) -> bool {
        self.animations.contains(name)
    }

    /// Shared handle to the animation named `name`.
    pub fn animation(&self, name: &str) -> Option<Arc<CyclicAnimation>> {
        self.animations.get(name)
    }

    /// Animation by name, or a missing-resource error.
    pub fn require_animation(&self, name: &str) -> AviaryResult<Arc<CyclicAnimation>> {
        self.animation(name).ok_or_else(|| {
            AviaryError::missing_resource(format!("animation '{name}' was never synthesized"))
        })
    }

    /// Number of cached sheets.
    pub fn sheet_count(&self) -> usize {
        self.sheets.len()
    }

    /// Number of registered animations.
    pub fn animation_count(&self) -> usize {
        self.animations.len()
    }

    /// Usage counters.
    pub fn stats(&self) -> CacheStats {
        self.stats
    }

    pub(crate) fn record_hit(&mut self) {
        self.stats.hits = self.stats.hits.saturating_add(1);
    }

    /// Insert a freshly built sheet. Inserting over an existing key is refused.
    pub(crate) fn insert_sheet(&mut self, sheet: AnimationSheet) -> AviaryResult<Arc<AnimationSheet>> {
        if self.sheets.contains_key(sheet.key()) {
            return Err(AviaryError::synthesis(format!(
                "sheet '{}' is already cached and cannot be regenerated",
                sheet.key()
            )));
        }
        let handle = Arc::new(sheet);
        self.sheets
            .insert(handle.key().clone(), Arc::clone(&handle));
        self.stats.sheets_built = self.stats.sheets_built.saturating_add(1);
        Ok(handle)
    }

    /// Register `anim` unless its name exists; the sheet it points at must be cached.
    pub fn create_animation(&mut self, anim: CyclicAnimation) -> AviaryResult<Arc<CyclicAnimation>> {
        let Some(sheet) = self.sheets.get(&anim.sheet) else {
            return Err(AviaryError::missing_resource(format!(
                "animation '{}' references unknown sheet '{}'",
                anim.name, anim.sheet
            )));
        };
        if anim.frame_count > sheet.frame_count() {
            return Err(AviaryError::synthesis(format!(
                "animation '{}' wants {} frames but sheet '{}' has {}",
                anim.name,
                anim.frame_count,
                anim.sheet,
                sheet.frame_count()
            )));
        }
        let (handle, _) = self.animations.create(anim)?;
        Ok(handle)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/synth/cache.rs"]
mod tests;
