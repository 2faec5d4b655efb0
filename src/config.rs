//! Configuration constants for the Fuel Racer simulation.

// Window / canvas
pub const WINDOW_WIDTH: f64 = 1280.0;
pub const WINDOW_HEIGHT: f64 = 800.0;

// Fixed simulation timestep
pub const TICKS_PER_SECOND: u32 = 60;
pub const TICK_DURATION: f64 = 1.0 / TICKS_PER_SECOND as f64; // seconds

// Road layout. The road is centered in the window with shoulder margins on
// both sides; obstacles are bucketed into fixed-width lanes inside it.
pub const LANE_WIDTH: f64 = 150.0;
pub const LANE_COUNT: u32 = 7;
pub const ROAD_WIDTH: f64 = LANE_WIDTH * LANE_COUNT as f64;
pub const ROAD_MARGIN: f64 = (WINDOW_WIDTH - ROAD_WIDTH) / 2.0;
pub const EDGE_MARGIN: f64 = 20.0; // steering clamp inset inside the road

// Race
pub const TRACK_LENGTH: f64 = 25000.0; // world units
pub const FINISH_BAND_HEIGHT: f64 = 40.0;
pub const FINISH_SQUARE: f64 = 20.0; // checkerboard cell size

// Player car
pub const CAR_WIDTH: f64 = 100.0;
pub const CAR_HEIGHT: f64 = 150.0;
pub const CAR_BOTTOM_GAP: f64 = 175.0; // gap between car and bottom edge
pub const BASE_SPEED: f64 = 5.0; // idle rolling speed, units/tick
pub const DEFAULT_MAX_SPEED: f64 = 10.0;
pub const ACCELERATION: f64 = 0.3; // units/tick per tick
pub const DECELERATION: f64 = 0.2;
pub const BRAKE_MIN_SPEED: f64 = 2.0;
pub const STEER_STEP: f64 = 5.0; // px/tick

// Obstacles
pub const OBSTACLE_WIDTH: f64 = 100.0;
pub const OBSTACLE_HEIGHT: f64 = 150.0;
pub const SPAWN_CHANCE: f64 = 0.05; // spawn attempts per tick
pub const SPAWN_BUFFER: f64 = 20.0; // spacing kept around fresh obstacles
pub const SPAWN_MAX_TRIES: u32 = 30;
pub const FRESH_ZONE: f64 = 200.0; // obstacles above this y count for spacing
pub const CAR_HAZARD_RATIO: f64 = 0.7; // remainder spawn as spikes
pub const OBSTACLE_SPEED_FACTOR: f64 = 0.8; // obstacle scroll vs player speed

// Penalties / boost
pub const CAR_CRASH_FACTOR: f64 = 0.3;
pub const CAR_CRASH_MIN_SPEED: f64 = 2.0;
pub const SPIKE_CRASH_FACTOR: f64 = 0.2;
pub const SPIKE_CRASH_MIN_SPEED: f64 = 1.0;
pub const SPIKE_MAX_SPEED: f64 = 5.0; // reduced ceiling while penalized
pub const SPIKE_PENALTY_TICKS: u64 = 2 * TICKS_PER_SECOND as u64; // 2000 ms
pub const NITRO_SPEED: f64 = 16.0;
pub const NITRO_TICKS: u64 = 3 * TICKS_PER_SECOND as u64; // 3000 ms
pub const CRASH_EFFECT_TICKS: u32 = 30; // lifetime of the crash marker

// Sprite sets
pub const PLAYER_CAR_COUNT: usize = 5;
pub const TRAFFIC_CAR_COUNT: usize = 6;

// Weather particle populations
pub const SNOW_PARTICLE_CAP: usize = 150;
pub const RAIN_PARTICLE_CAP: usize = 220;
pub const DUST_PARTICLE_CAP: usize = 80;
pub const SNOW_SPAWN_PER_TICK: usize = 2;
pub const RAIN_SPAWN_PER_TICK: usize = 3;
pub const DUST_SPAWN_PER_TICK: usize = 1;
