use crate::config;

/// Speed-ceiling modifier currently driving the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    Idle,
    SpikePenalty { until_tick: u64 },
    Nitro { until_tick: u64 },
}

/// Time-boxed penalty/boost state. Exactly one effect drives the speed
/// ceiling at any time; nitro replaces an active spike penalty outright
/// and its expiry restores the default ceiling.
#[derive(Debug)]
pub struct EffectState {
    effect: Effect,
    nitro_used: bool,
}

impl EffectState {
    pub fn new() -> Self {
        EffectState {
            effect: Effect::Idle,
            nitro_used: false,
        }
    }

    pub fn effect(&self) -> Effect {
        self.effect
    }

    pub fn nitro_used(&self) -> bool {
        self.nitro_used
    }

    pub fn nitro_active(&self) -> bool {
        matches!(self.effect, Effect::Nitro { .. })
    }

    pub fn spike_active(&self) -> bool {
        matches!(self.effect, Effect::SpikePenalty { .. })
    }

    /// Collision checks are suppressed for the whole nitro window.
    pub fn invulnerable(&self) -> bool {
        self.nitro_active()
    }

    /// Current speed ceiling.
    pub fn max_speed(&self) -> f64 {
        match self.effect {
            Effect::Idle => config::DEFAULT_MAX_SPEED,
            Effect::SpikePenalty { .. } => config::SPIKE_MAX_SPEED,
            Effect::Nitro { .. } => config::NITRO_SPEED,
        }
    }

    /// Enter (or refresh) the spike penalty. A hit while the penalty is
    /// already running resets the deadline. Ignored during nitro.
    pub fn trigger_spike(&mut self, tick: u64) {
        if self.nitro_active() {
            return;
        }
        self.effect = Effect::SpikePenalty {
            until_tick: tick + config::SPIKE_PENALTY_TICKS,
        };
    }

    /// Start the single nitro window of the session. Returns whether it
    /// fired; the latch never resets.
    pub fn activate_nitro(&mut self, tick: u64) -> bool {
        if self.nitro_used {
            return false;
        }
        self.nitro_used = true;
        self.effect = Effect::Nitro {
            until_tick: tick + config::NITRO_TICKS,
        };
        true
    }

    /// Expire whichever effect has run out, restoring the default ceiling.
    pub fn update(&mut self, tick: u64) {
        match self.effect {
            Effect::SpikePenalty { until_tick } | Effect::Nitro { until_tick }
                if tick >= until_tick =>
            {
                self.effect = Effect::Idle;
            }
            _ => {}
        }
    }
}
