/// Phases of an unlock reveal, in the only order they can occur
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub enum SequencePhase {
    #[default]
    Idle,
    PlayerControlSuspended,
    CameraFraming,
    Flourish,
    /// The unlock marker is written on entering this phase
    Commit,
    CameraReturn,
    Resuming,
    Done,
}

impl SequencePhase {
    pub const ORDER: [SequencePhase; 8] = [
        SequencePhase::Idle,
        SequencePhase::PlayerControlSuspended,
        SequencePhase::CameraFraming,
        SequencePhase::Flourish,
        SequencePhase::Commit,
        SequencePhase::CameraReturn,
        SequencePhase::Resuming,
        SequencePhase::Done,
    ];

    /// The phase that follows this one; `Done` is terminal
    pub fn next(self) -> SequencePhase {
        match self {
            SequencePhase::Idle => SequencePhase::PlayerControlSuspended,
            SequencePhase::PlayerControlSuspended => SequencePhase::CameraFraming,
            SequencePhase::CameraFraming => SequencePhase::Flourish,
            SequencePhase::Flourish => SequencePhase::Commit,
            SequencePhase::Commit => SequencePhase::CameraReturn,
            SequencePhase::CameraReturn => SequencePhase::Resuming,
            SequencePhase::Resuming => SequencePhase::Done,
            SequencePhase::Done => SequencePhase::Done,
        }
    }

    /// Between trigger and teardown
    pub fn is_running(self) -> bool {
        !matches!(self, SequencePhase::Idle | SequencePhase::Done)
    }
}
