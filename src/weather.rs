use crate::config;
use crate::debug_weather;
use crate::types::MapTheme;
use rand::prelude::*;
use rand::rngs::StdRng;

/// Visual kind of an ambient particle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeatherKind {
    Snow,
    Rain,
    Dust,
}

impl WeatherKind {
    pub fn for_theme(theme: MapTheme) -> Self {
        match theme {
            MapTheme::Snow => WeatherKind::Snow,
            MapTheme::Storm => WeatherKind::Rain,
            MapTheme::Desert => WeatherKind::Dust,
        }
    }

    fn population_cap(self) -> usize {
        match self {
            WeatherKind::Snow => config::SNOW_PARTICLE_CAP,
            WeatherKind::Rain => config::RAIN_PARTICLE_CAP,
            WeatherKind::Dust => config::DUST_PARTICLE_CAP,
        }
    }

    fn spawn_per_tick(self) -> usize {
        match self {
            WeatherKind::Snow => config::SNOW_SPAWN_PER_TICK,
            WeatherKind::Rain => config::RAIN_SPAWN_PER_TICK,
            WeatherKind::Dust => config::DUST_SPAWN_PER_TICK,
        }
    }
}

// Represents a single weather particle
#[derive(Debug, Clone, Copy)]
pub struct Particle {
    pub x: f64,
    pub y: f64,
    pub prev_y: f64,
    pub size: f64,
    pub fall_speed: f64, // px per tick
    pub drift: f64,      // horizontal px per tick
}

/// Ambient precipitation decoupled from race state: a capped population
/// of particles that recycle to the top edge instead of despawning.
#[derive(Debug)]
pub struct WeatherSystem {
    kind: WeatherKind,
    particles: Vec<Particle>,
    rng: StdRng,
}

impl WeatherSystem {
    pub fn new(theme: MapTheme, rng: StdRng) -> Self {
        WeatherSystem {
            kind: WeatherKind::for_theme(theme),
            particles: Vec::new(),
            rng,
        }
    }

    pub fn kind(&self) -> WeatherKind {
        self.kind
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Should be called BEFORE the simulation update for the tick.
    pub fn update_prev_state(&mut self) {
        for p in self.particles.iter_mut() {
            p.prev_y = p.y;
        }
    }

    /// Top the population up to its cap and advance every particle by one
    /// tick, recycling the ones that fell past the bottom edge.
    pub fn update(&mut self) {
        let cap = self.kind.population_cap();
        let was_full = self.particles.len() >= cap;
        for _ in 0..self.kind.spawn_per_tick() {
            if self.particles.len() >= cap {
                break;
            }
            let particle = self.new_particle();
            self.particles.push(particle);
        }
        if !was_full && self.particles.len() >= cap {
            debug_weather!("{:?} population reached cap {}", self.kind, cap);
        }

        for i in 0..self.particles.len() {
            let p = &mut self.particles[i];
            p.y += p.fall_speed;
            p.x += p.drift;
            if p.x < 0.0 {
                p.x += config::WINDOW_WIDTH;
            } else if p.x > config::WINDOW_WIDTH {
                p.x -= config::WINDOW_WIDTH;
            }

            if p.y > config::WINDOW_HEIGHT {
                let recycled = self.new_particle();
                self.particles[i] = recycled;
            }
        }
    }

    fn new_particle(&mut self) -> Particle {
        let x = self.rng.gen_range(0.0..config::WINDOW_WIDTH);
        let y = -self.rng.gen_range(0.0..60.0);
        let (size, fall_speed, drift) = match self.kind {
            WeatherKind::Snow => (
                self.rng.gen_range(2.0..5.0),
                self.rng.gen_range(1.0..2.5),
                self.rng.gen_range(-0.5..0.5),
            ),
            WeatherKind::Rain => (
                self.rng.gen_range(1.0..2.0),
                self.rng.gen_range(6.0..9.0),
                self.rng.gen_range(-0.3..0.0),
            ),
            WeatherKind::Dust => (
                self.rng.gen_range(1.0..3.0),
                self.rng.gen_range(0.5..1.5),
                self.rng.gen_range(-1.5..-0.5),
            ),
        };
        Particle {
            x,
            y,
            prev_y: y,
            size,
            fall_speed,
            drift,
        }
    }
}
