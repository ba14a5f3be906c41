use bevy::prelude::*;

use crate::prerequisite::CounterResult;

const GHOST_COLOR: Srgba = Srgba::new(0.45, 0.75, 1.0, 0.25);
const SOLID_COLOR: Srgba = Srgba::new(1.0, 0.85, 0.3, 1.0);

/// Progress shown by a proxy. Derived from a [`CounterResult`] and never persisted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProxyState {
    pub progress: f32,
    pub collected: u32,
    pub total: u32,
}

impl From<CounterResult> for ProxyState {
    fn from(result: CounterResult) -> Self {
        Self {
            progress: result.progress(),
            collected: result.collected(),
            total: result.total,
        }
    }
}

impl ProxyState {
    pub fn is_complete(&self) -> bool {
        self.progress >= 1.0
    }

    /// `collected/total`, e.g. `2/3`
    pub fn label(&self) -> String {
        format!("{}/{}", self.collected, self.total)
    }

    pub fn color(&self) -> Color {
        proxy_color(self.progress)
    }
}

/// Blend from the ghost tint to the solid item color; alpha rises with progress
pub fn proxy_color(progress: f32) -> Color {
    let t = progress.clamp(0.0, 1.0);
    let lerp = |a: f32, b: f32| a + (b - a) * t;
    Color::srgba(
        lerp(GHOST_COLOR.red, SOLID_COLOR.red),
        lerp(GHOST_COLOR.green, SOLID_COLOR.green),
        lerp(GHOST_COLOR.blue, SOLID_COLOR.blue),
        lerp(GHOST_COLOR.alpha, SOLID_COLOR.alpha),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_from_partial_counter() {
        let state = ProxyState::from(CounterResult::new(3, 1));
        assert_eq!(state.collected, 2);
        assert_eq!(state.total, 3);
        assert!((state.progress - 0.6667).abs() < 1e-3);
        assert_eq!(state.label(), "2/3");
        assert!(!state.is_complete());
    }

    #[test]
    fn test_state_from_satisfied_counter() {
        let state = ProxyState::from(CounterResult::new(3, 0));
        assert_eq!(state.progress, 1.0);
        assert_eq!(state.label(), "3/3");
        assert!(state.is_complete());
    }

    #[test]
    fn test_color_alpha_rises_with_progress() {
        let ghost = proxy_color(0.0).to_srgba();
        let half = proxy_color(0.5).to_srgba();
        let solid = proxy_color(1.0).to_srgba();

        assert!((ghost.alpha - GHOST_COLOR.alpha).abs() < 1e-6);
        assert!(ghost.alpha < half.alpha && half.alpha < solid.alpha);
        assert!((solid.alpha - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_color_clamps_out_of_range_progress() {
        assert_eq!(proxy_color(-1.0), proxy_color(0.0));
        assert_eq!(proxy_color(2.0), proxy_color(1.0));
    }
}
