use crate::config;
use crate::input::InputSnapshot;
use crate::types::Rect;
use crate::utils;

/// The player vehicle. Owned by the race session and mutated once per tick.
#[derive(Debug)]
pub struct PlayerState {
    pub x: f64,
    pub y: f64,
    pub prev_x: f64, // for render interpolation
    pub speed: f64,  // units per tick
    pub sprite: usize,
}

impl PlayerState {
    pub fn new(sprite: usize) -> Self {
        let x = config::WINDOW_WIDTH / 2.0 - config::CAR_WIDTH / 2.0;
        let y = config::WINDOW_HEIGHT - config::CAR_HEIGHT - config::CAR_BOTTOM_GAP;
        PlayerState {
            x,
            y,
            prev_x: x,
            speed: 0.0,
            sprite,
        }
    }

    /// Should be called BEFORE the simulation update for the tick.
    pub fn update_prev_state(&mut self) {
        self.prev_x = self.x;
    }

    /// Integrate speed and lateral position for one tick. The ceiling and
    /// the nitro flag come from the effect state machine.
    pub fn update(&mut self, input: &InputSnapshot, max_speed: f64, nitro: bool) {
        if nitro {
            // Boost pins the speed, bypassing accel/brake/coast entirely
            self.speed = max_speed;
        } else if input.accelerate {
            self.speed = (self.speed + config::ACCELERATION).min(max_speed);
        } else if input.brake {
            self.speed = (self.speed - 2.0 * config::ACCELERATION).max(config::BRAKE_MIN_SPEED);
        } else {
            // Idle roll: the car keeps moving at base speed when coasting
            self.speed = (self.speed - config::DECELERATION).max(config::BASE_SPEED);
        }

        if input.steer_left {
            self.x -= config::STEER_STEP;
        }
        if input.steer_right {
            self.x += config::STEER_STEP;
        }

        let min_x = config::ROAD_MARGIN + config::EDGE_MARGIN;
        let max_x =
            config::WINDOW_WIDTH - config::ROAD_MARGIN - config::EDGE_MARGIN - config::CAR_WIDTH;
        self.x = utils::clamp(self.x, min_x, max_x);
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(self.x, self.y, config::CAR_WIDTH, config::CAR_HEIGHT)
    }
}
