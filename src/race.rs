use crate::audio::AudioManager;
use crate::collision::{self, CrashEffect};
use crate::config;
use crate::debug_race;
use crate::effects::EffectState;
use crate::error::GameError;
use crate::input::InputSnapshot;
use crate::obstacles::ObstacleField;
use crate::player::PlayerState;
use crate::types::MapTheme;
use crate::weather::WeatherSystem;
use log::info;
use rand::SeedableRng;
use rand::rngs::StdRng;

/// Invoked exactly once with the elapsed race time in seconds. This is the
/// seam where the hosting layer reports the run upstream.
pub type FinishCallback = Box<dyn FnOnce(f64)>;

/// Parameters the hosting layer passes in to start a session.
#[derive(Debug, Clone, Copy)]
pub struct RaceConfig {
    pub selected_car: usize,
    pub theme: MapTheme,
    pub track_length: f64,
    /// Obstacle/weather randomness; drawn from entropy when omitted.
    pub seed: Option<u64>,
}

impl Default for RaceConfig {
    fn default() -> Self {
        RaceConfig {
            selected_car: 0,
            theme: MapTheme::Snow,
            track_length: config::TRACK_LENGTH,
            seed: None,
        }
    }
}

/// One complete playthrough. Owns every simulation entity; nothing
/// persists beyond the session.
pub struct RaceSession {
    pub player: PlayerState,
    pub obstacles: ObstacleField,
    pub effects: EffectState,
    pub weather: WeatherSystem,
    pub crashes: Vec<CrashEffect>,
    pub theme: MapTheme,
    audio: AudioManager,
    distance: f64,
    track_length: f64,
    tick: u64,
    start_tick: Option<u64>,
    finished: bool,
    on_finish: Option<FinishCallback>,
}

impl RaceSession {
    pub fn new(
        config: RaceConfig,
        audio: AudioManager,
        on_finish: FinishCallback,
    ) -> Result<Self, GameError> {
        if config.selected_car >= crate::config::PLAYER_CAR_COUNT {
            return Err(GameError::InvalidVehicle {
                index: config.selected_car,
                available: crate::config::PLAYER_CAR_COUNT,
            });
        }
        if config.track_length <= 0.0 {
            return Err(GameError::TrackTooShort(config.track_length));
        }

        let seed = config.seed.unwrap_or_else(rand::random);
        // Separate streams keep obstacle placement reproducible no matter
        // how much the weather system has drawn
        let spawn_rng = StdRng::seed_from_u64(seed);
        let weather_rng = StdRng::seed_from_u64(seed ^ 0x9e37_79b9_7f4a_7c15);

        info!(
            "Race session: car {}, theme {}, track length {:.0}, seed {}",
            config.selected_car,
            config.theme.name(),
            config.track_length,
            seed
        );

        Ok(RaceSession {
            player: PlayerState::new(config.selected_car),
            obstacles: ObstacleField::new(spawn_rng),
            effects: EffectState::new(),
            weather: WeatherSystem::new(config.theme, weather_rng),
            crashes: Vec::new(),
            theme: config.theme,
            audio,
            distance: 0.0,
            track_length: config.track_length,
            tick: 0,
            start_tick: None,
            finished: false,
            on_finish: Some(on_finish),
        })
    }

    pub fn started(&self) -> bool {
        self.start_tick.is_some()
    }

    pub fn finished(&self) -> bool {
        self.finished
    }

    pub fn distance(&self) -> f64 {
        self.distance
    }

    pub fn remaining(&self) -> f64 {
        (self.track_length - self.distance).max(0.0)
    }

    pub fn elapsed_seconds(&self) -> f64 {
        match self.start_tick {
            Some(start) => (self.tick - start) as f64 * config::TICK_DURATION,
            None => 0.0,
        }
    }

    /// Screen y of the finish band's top edge, once the band is in view.
    pub fn finish_line_y(&self) -> Option<f64> {
        let remaining = self.track_length - self.distance;
        if remaining < config::WINDOW_HEIGHT {
            Some(config::WINDOW_HEIGHT - remaining)
        } else {
            None
        }
    }

    /// Advance the simulation by one fixed tick.
    pub fn step(&mut self, input: &InputSnapshot) {
        if self.finished {
            return;
        }

        self.player.update_prev_state();
        self.obstacles.update_prev_state();
        self.weather.update_prev_state();

        // Ambient weather runs even while waiting at the start line
        self.weather.update();

        if self.start_tick.is_none() {
            if input.accelerate {
                self.start();
            } else {
                self.tick += 1;
                return;
            }
        }

        if input.boost_pressed && self.effects.activate_nitro(self.tick) {
            debug_race!("nitro engaged for {} ticks", config::NITRO_TICKS);
        }
        self.effects.update(self.tick);

        self.player
            .update(input, self.effects.max_speed(), self.effects.nitro_active());
        self.distance += self.player.speed;

        self.obstacles.maybe_spawn();
        self.obstacles.advance(self.player.speed);

        collision::resolve(
            &mut self.player,
            &mut self.obstacles,
            &mut self.effects,
            &mut self.crashes,
            &self.audio,
            self.tick,
        );
        collision::update_crashes(&mut self.crashes);

        self.check_finish();
        self.tick += 1;
    }

    fn start(&mut self) {
        self.start_tick = Some(self.tick);
        self.player.speed = config::BASE_SPEED;
        self.audio.play_gate();
        info!("Race started");
    }

    /// The race completes when the finish band's bottom edge catches the
    /// car's nose, not when raw distance crosses the track length.
    fn check_finish(&mut self) {
        let Some(line_y) = self.finish_line_y() else {
            return;
        };
        if line_y + config::FINISH_BAND_HEIGHT >= self.player.y {
            self.finished = true;
            let elapsed = self.elapsed_seconds();
            info!("Race finished in {:.2}s", elapsed);
            if let Some(callback) = self.on_finish.take() {
                callback(elapsed);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn session(config: RaceConfig) -> (RaceSession, Rc<RefCell<Vec<f64>>>) {
        let reported = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&reported);
        let session = RaceSession::new(
            config,
            AudioManager::muted(),
            Box::new(move |elapsed| sink.borrow_mut().push(elapsed)),
        )
        .expect("valid config");
        (session, reported)
    }

    fn accelerate() -> InputSnapshot {
        InputSnapshot {
            accelerate: true,
            ..Default::default()
        }
    }

    #[test]
    fn test_rejects_bad_vehicle_index() {
        let config = RaceConfig {
            selected_car: config::PLAYER_CAR_COUNT,
            ..Default::default()
        };
        let result = RaceSession::new(config, AudioManager::muted(), Box::new(|_| {}));
        assert!(matches!(result, Err(GameError::InvalidVehicle { .. })));
    }

    #[test]
    fn test_rejects_degenerate_track() {
        let config = RaceConfig {
            track_length: 0.0,
            ..Default::default()
        };
        let result = RaceSession::new(config, AudioManager::muted(), Box::new(|_| {}));
        assert!(matches!(result, Err(GameError::TrackTooShort(_))));
    }

    #[test]
    fn test_race_starts_on_first_accelerate() {
        let (mut session, _) = session(RaceConfig {
            seed: Some(1),
            ..Default::default()
        });

        session.step(&Default::default());
        assert!(!session.started());
        assert_approx_eq!(session.distance(), 0.0);

        session.step(&accelerate());
        assert!(session.started());
        assert!(session.distance() > 0.0);
    }

    #[test]
    fn test_elapsed_time_is_monotonic() {
        let (mut session, _) = session(RaceConfig {
            seed: Some(1),
            ..Default::default()
        });
        session.obstacles.spawn_chance = 0.0;

        let mut last = 0.0;
        for _ in 0..300 {
            session.step(&accelerate());
            let elapsed = session.elapsed_seconds();
            assert!(elapsed >= last);
            last = elapsed;
        }
        assert_approx_eq!(last, 300.0 * config::TICK_DURATION);
    }

    #[test]
    fn test_full_run_finishes_with_elapsed_time() {
        let (mut session, reported) = session(RaceConfig {
            seed: Some(1),
            ..Default::default()
        });
        session.obstacles.spawn_chance = 0.0;

        // First step starts the race; pin the speed for a constant-rate run
        session.step(&accelerate());
        session.player.speed = config::DEFAULT_MAX_SPEED;

        for _ in 0..2500 {
            session.step(&accelerate());
            if session.finished() {
                break;
            }
        }
        assert!(session.finished(), "run did not complete in 2500 ticks");
        assert_eq!(reported.borrow().len(), 1);

        // The band catches the car's nose slightly before the raw distance
        // crosses the track length
        assert!(session.distance() <= config::TRACK_LENGTH);
        let expected_finish_distance = config::TRACK_LENGTH
            - (config::WINDOW_HEIGHT - session.player.y + config::FINISH_BAND_HEIGHT);
        assert!(session.distance() >= expected_finish_distance);
        assert_approx_eq!(reported.borrow()[0], session.elapsed_seconds());
    }

    #[test]
    fn test_finish_fires_exactly_once() {
        let (mut session, reported) = session(RaceConfig {
            seed: Some(1),
            track_length: 500.0,
            ..Default::default()
        });
        session.obstacles.spawn_chance = 0.0;

        for _ in 0..2000 {
            session.step(&accelerate());
        }
        assert!(session.finished());
        assert_eq!(reported.borrow().len(), 1);

        // Stepping a finished session is a no-op
        let elapsed = session.elapsed_seconds();
        for _ in 0..100 {
            session.step(&accelerate());
        }
        assert_eq!(reported.borrow().len(), 1);
        assert_approx_eq!(session.elapsed_seconds(), elapsed);
    }

    #[test]
    fn test_nitro_single_use_per_session() {
        let (mut session, _) = session(RaceConfig {
            seed: Some(1),
            ..Default::default()
        });
        session.obstacles.spawn_chance = 0.0;
        session.step(&accelerate());

        let boost = InputSnapshot {
            accelerate: true,
            boost_pressed: true,
            ..Default::default()
        };
        session.step(&boost);
        assert!(session.effects.nitro_active());
        assert_approx_eq!(session.player.speed, config::NITRO_SPEED);

        // Ride out the boost window
        for _ in 0..(config::NITRO_TICKS + 1) {
            session.step(&accelerate());
        }
        assert!(!session.effects.nitro_active());

        // A second press has no effect
        session.step(&boost);
        assert!(!session.effects.nitro_active());
        assert!(session.player.speed < config::NITRO_SPEED);
    }

    #[test]
    fn test_boost_before_start_is_ignored() {
        let (mut session, _) = session(RaceConfig {
            seed: Some(1),
            ..Default::default()
        });
        let boost = InputSnapshot {
            boost_pressed: true,
            ..Default::default()
        };
        session.step(&boost);
        assert!(!session.started());
        assert!(!session.effects.nitro_used());
    }

    #[test]
    fn test_speed_stays_within_bounds_over_long_run() {
        let (mut session, _) = session(RaceConfig {
            seed: Some(77),
            track_length: 1_000_000.0,
            ..Default::default()
        });
        session.step(&accelerate());

        for _ in 0..5000 {
            session.step(&accelerate());
            assert!(session.player.speed >= 0.0);
            assert!(session.player.speed <= session.effects.max_speed());
        }
    }

    #[test]
    fn test_finish_band_position_tracks_remaining() {
        let (mut session, _) = session(RaceConfig {
            seed: Some(1),
            track_length: 700.0,
            ..Default::default()
        });
        session.obstacles.spawn_chance = 0.0;
        // 700 units to go and an 800 px window: the band is already in view
        assert!(session.finish_line_y().is_some());

        session.step(&accelerate());
        let line_y = session.finish_line_y().expect("band in view");
        assert_approx_eq!(line_y, config::WINDOW_HEIGHT - session.remaining());
    }
}
