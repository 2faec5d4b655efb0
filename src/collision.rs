use crate::audio::AudioManager;
use crate::config;
use crate::debug_collision;
use crate::effects::EffectState;
use crate::obstacles::{ObstacleField, ObstacleKind};
use crate::player::PlayerState;

/// Transient marker drawn at the point of impact. Cosmetic, but its
/// presence shows the car penalty fired exactly once.
#[derive(Debug, Clone, Copy)]
pub struct CrashEffect {
    pub x: f64,
    pub y: f64,
    pub life: u32, // ticks remaining
}

/// Test every live obstacle against the player and apply the one-shot
/// penalty on first overlap. The `hit` latch, not removal, prevents a
/// second penalty while the boxes still intersect. Skipped entirely while
/// nitro invulnerability is up.
pub fn resolve(
    player: &mut PlayerState,
    field: &mut ObstacleField,
    effects: &mut EffectState,
    crashes: &mut Vec<CrashEffect>,
    audio: &AudioManager,
    tick: u64,
) {
    if effects.invulnerable() {
        return;
    }

    let player_box = player.bounds();
    for obstacle in field.obstacles.iter_mut() {
        if obstacle.hit || !player_box.overlaps(&obstacle.bounds(), 0.0) {
            continue;
        }
        obstacle.hit = true;

        match obstacle.kind {
            ObstacleKind::Car => {
                player.speed =
                    (player.speed * config::CAR_CRASH_FACTOR).max(config::CAR_CRASH_MIN_SPEED);
                crashes.push(CrashEffect {
                    x: player.x + config::CAR_WIDTH / 2.0,
                    y: player.y,
                    life: config::CRASH_EFFECT_TICKS,
                });
                audio.play_crash();
                debug_collision!("rear-ended traffic, speed now {:.1}", player.speed);
            }
            ObstacleKind::Spike => {
                player.speed =
                    (player.speed * config::SPIKE_CRASH_FACTOR).max(config::SPIKE_CRASH_MIN_SPEED);
                effects.trigger_spike(tick);
                audio.play_spike();
                debug_collision!("ran over spikes, speed now {:.1}", player.speed);
            }
        }
    }
}

/// Age crash markers and drop the expired ones.
pub fn update_crashes(crashes: &mut Vec<CrashEffect>) {
    for crash in crashes.iter_mut() {
        crash.life -= 1;
    }
    crashes.retain(|c| c.life > 0);
}
