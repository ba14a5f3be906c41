use crate::prerequisite::CounterResult;
use crate::proxy::state::ProxyState;
use crate::store::StoreResult;

/// What a controller spawns for its bonus on level load
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ControllerDecision {
    /// Prerequisites outstanding: proxy only
    ShowProgress(ProxyState),
    /// Prerequisites met, not yet revealed: full proxy, dormant item and a trigger
    AwaitingReveal(ProxyState),
    /// Unlock committed earlier: the item as an ordinary pickup
    Revealed,
    /// The bonus item itself was picked up: nothing
    Collected,
}

impl ControllerDecision {
    pub fn shows_proxy(&self) -> bool {
        matches!(self, Self::ShowProgress(_) | Self::AwaitingReveal(_))
    }

    pub fn spawns_item(&self) -> bool {
        matches!(self, Self::AwaitingReveal(_) | Self::Revealed)
    }
}

/// Decides what to spawn from the counter and the unlock marker.
///
/// Outstanding prerequisites always show the proxy, even over a committed
/// marker. A marker that cannot be read is treated as absent, and no reveal is
/// started on top of it: the proxy is shown and the next load tries again.
pub fn decide(counter: CounterResult, marker: StoreResult<bool>, bonus_collected: bool) -> ControllerDecision {
    if bonus_collected {
        return ControllerDecision::Collected;
    }

    let state = ProxyState::from(counter);
    if !counter.is_satisfied() {
        return ControllerDecision::ShowProgress(state);
    }
    match marker {
        Ok(true) => ControllerDecision::Revealed,
        Ok(false) => ControllerDecision::AwaitingReveal(state),
        Err(_) => ControllerDecision::ShowProgress(state),
    }
}
