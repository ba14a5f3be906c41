use bevy::prelude::*;
use bevy_kira_audio::prelude::*;
use std::time::Duration;

/// Background music channel
#[derive(Resource)]
pub struct MusicChannel;

/// Gameplay sound effects channel
#[derive(Resource)]
pub struct SfxChannel;

/// Audio buses an unlock sequence can silence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AudioBus {
    Music,
    Sfx,
}

impl AudioBus {
    pub const ALL: [AudioBus; 2] = [AudioBus::Music, AudioBus::Sfx];
}

/// Fades a channel out and pauses it
pub fn fade_out_channel<T: Resource>(channel: &AudioChannel<T>, fade_secs: f32) {
    channel
        .pause()
        .fade_out(AudioTween::linear(Duration::from_secs_f32(fade_secs.max(0.0))));
}

/// Resumes a paused channel with a fade in
pub fn fade_in_channel<T: Resource>(channel: &AudioChannel<T>, fade_secs: f32) {
    channel
        .resume()
        .fade_in(AudioTween::linear(Duration::from_secs_f32(fade_secs.max(0.0))));
}

pub fn plugin(app: &mut App) {
    app.add_audio_channel::<MusicChannel>()
        .add_audio_channel::<SfxChannel>();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_audio_bus_all_lists_each_bus_once() {
        assert_eq!(AudioBus::ALL.len(), 2);
        assert!(AudioBus::ALL.contains(&AudioBus::Music));
        assert!(AudioBus::ALL.contains(&AudioBus::Sfx));
    }
}
