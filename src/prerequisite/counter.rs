use bevy::prelude::*;

use crate::prerequisite::spec::RequirementSpec;
use crate::store::SaveStore;

/// How many prerequisite items a requirement still needs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CounterResult {
    pub total: u32,
    pub missing: u32,
}

impl CounterResult {
    pub fn new(total: u32, missing: u32) -> Self {
        Self {
            total,
            missing: missing.min(total),
        }
    }

    pub fn collected(&self) -> u32 {
        self.total - self.missing
    }

    pub fn is_satisfied(&self) -> bool {
        self.missing == 0
    }

    /// Fraction collected in `[0, 1]`; `1.0` exactly when nothing is missing
    pub fn progress(&self) -> f32 {
        if self.missing == 0 {
            return 1.0;
        }
        let ratio = self.collected() as f32 / self.total as f32;
        // Rounding must never report a complete bar while something is missing
        ratio.clamp(0.0, 1.0).min(1.0 - f32::EPSILON)
    }
}

/// Counts collected and missing prerequisites for `spec`.
///
/// Reads every member map's collection flag from the store on each call; a
/// failed read counts that map as missing so an unreachable store never reveals
/// anything. When `required_count` is set the totals are rescaled to it and
/// `missing` is clamped at zero.
pub fn count(spec: &RequirementSpec, store: &dyn SaveStore) -> CounterResult {
    if spec.is_malformed() && spec.required_count() != Some(0) {
        // One unreachable requirement keeps the bonus hidden
        let total = spec.required_count().map_or(1, |required| required.max(1) as u32);
        return CounterResult::new(total, total);
    }

    let mut total = 0u32;
    let mut missing = 0u32;
    let mut read_failed = false;

    for map_id in spec.member_maps() {
        total += 1;
        match store.get_flag(&spec.collection_key(map_id)) {
            Ok(true) => {}
            Ok(false) => missing += 1,
            Err(_) => {
                read_failed = true;
                missing += 1;
            }
        }
    }

    if read_failed {
        warn!(
            "Save store unavailable while counting group {:?}; treating unread maps as missing",
            spec.group_id()
        );
    }

    let collected = total - missing;

    if let Some(required) = spec.required_count() {
        let required = required.max(0) as u32;
        return CounterResult::new(required, required.saturating_sub(collected));
    }

    if total == 0 {
        warn!(
            "Group {:?} lists no member maps and no required count; it is always satisfied",
            spec.group_id()
        );
    }

    CounterResult::new(total, missing)
}
