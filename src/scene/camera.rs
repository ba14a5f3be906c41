use bevy::math::curve::{Curve, EaseFunction};
use bevy::prelude::*;

/// An eased camera move in progress
#[derive(Debug, Clone, Copy)]
pub struct PanTween {
    /// Captured from the camera on the first frame of the pan
    pub from: Option<Vec2>,
    pub to: Vec2,
    pub duration: f32,
    pub elapsed: f32,
    pub ease: EaseFunction,
}

impl PanTween {
    pub fn fraction(&self) -> f32 {
        if self.duration <= 0.0 {
            1.0
        } else {
            (self.elapsed / self.duration).clamp(0.0, 1.0)
        }
    }

    pub fn sample(&self, from: Vec2) -> Vec2 {
        from.lerp(self.to, self.ease.sample_clamped(self.fraction()))
    }
}

/// Scripted camera control.
///
/// While `scripted`, the camera no longer follows the player; it stays wherever
/// the last pan left it until [`CameraPan::release`].
#[derive(Resource, Debug, Default)]
pub struct CameraPan {
    tween: Option<PanTween>,
    scripted: bool,
}

impl CameraPan {
    pub fn start(&mut self, to: Vec2, duration: f32, ease: EaseFunction) {
        self.tween = Some(PanTween {
            from: None,
            to,
            duration: duration.max(0.0),
            elapsed: 0.0,
            ease,
        });
        self.scripted = true;
    }

    /// Hands the camera back to player follow
    pub fn release(&mut self) {
        self.tween = None;
        self.scripted = false;
    }

    pub fn is_scripted(&self) -> bool {
        self.scripted
    }

    pub fn is_panning(&self) -> bool {
        self.tween.is_some()
    }

    pub fn target(&self) -> Option<Vec2> {
        self.tween.map(|tween| tween.to)
    }
}

/// Moves the camera along the active pan. Uses real time so it runs while the scene is frozen.
pub fn apply_camera_pan(
    time: Res<Time<Real>>,
    mut camera_pan: ResMut<CameraPan>,
    mut camera_query: Query<&mut Transform, With<Camera>>,
) {
    let Some(tween) = camera_pan.tween.as_mut() else {
        return;
    };
    let Ok(mut transform) = camera_query.single_mut() else {
        return;
    };

    let from = *tween.from.get_or_insert(transform.translation.truncate());
    tween.elapsed += time.delta_secs();

    let position = tween.sample(from);
    transform.translation.x = position.x;
    transform.translation.y = position.y;

    if tween.fraction() >= 1.0 {
        camera_pan.tween = None;
    }
}
