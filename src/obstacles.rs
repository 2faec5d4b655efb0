use crate::config;
use crate::debug_spawn;
use crate::types::Rect;
use rand::prelude::*;
use rand::rngs::StdRng;

/// Hazard classification. Cars damp the player's speed once on contact;
/// spikes also cap it for a fixed window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObstacleKind {
    Car,
    Spike,
}

#[derive(Debug, Clone, Copy)]
pub struct Obstacle {
    pub x: f64,
    pub y: f64,
    pub prev_y: f64, // for render interpolation
    pub kind: ObstacleKind,
    pub sprite: usize, // traffic sprite index, unused for spikes
    pub hit: bool,     // latched on first collision
}

impl Obstacle {
    pub fn bounds(&self) -> Rect {
        Rect::new(self.x, self.y, config::OBSTACLE_WIDTH, config::OBSTACLE_HEIGHT)
    }
}

/// Procedural oncoming traffic. Obstacles are bucketed into fixed-width
/// lanes and placed with a spacing buffer against everything still near
/// the spawn edge.
#[derive(Debug)]
pub struct ObstacleField {
    pub obstacles: Vec<Obstacle>,
    /// Spawn attempts per tick. Exposed so hosts can tune difficulty
    /// (or zero it out for a clear road).
    pub spawn_chance: f64,
    rng: StdRng,
}

impl ObstacleField {
    pub fn new(rng: StdRng) -> Self {
        ObstacleField {
            obstacles: Vec::new(),
            spawn_chance: config::SPAWN_CHANCE,
            rng,
        }
    }

    /// Should be called BEFORE the simulation update for the tick.
    pub fn update_prev_state(&mut self) {
        for obstacle in self.obstacles.iter_mut() {
            obstacle.prev_y = obstacle.y;
        }
    }

    /// Roll the per-tick spawn chance and place one obstacle on success.
    pub fn maybe_spawn(&mut self) {
        if self.rng.r#gen::<f64>() < self.spawn_chance {
            self.spawn();
        }
    }

    /// Try to place one obstacle centered in a random lane just above the
    /// top edge. A pick that would crowd a still-fresh obstacle is
    /// rejected; after SPAWN_MAX_TRIES rejections the attempt is skipped.
    pub fn spawn(&mut self) {
        let y = -config::OBSTACLE_HEIGHT;

        for _ in 0..config::SPAWN_MAX_TRIES {
            let lane = self.rng.gen_range(0..config::LANE_COUNT);
            let x = config::ROAD_MARGIN
                + lane as f64 * config::LANE_WIDTH
                + (config::LANE_WIDTH - config::OBSTACLE_WIDTH) / 2.0;
            let candidate = Rect::new(x, y, config::OBSTACLE_WIDTH, config::OBSTACLE_HEIGHT);

            let blocked = self.obstacles.iter().any(|o| {
                o.y < config::FRESH_ZONE && candidate.overlaps(&o.bounds(), config::SPAWN_BUFFER)
            });
            if blocked {
                continue;
            }

            let kind = if self.rng.r#gen::<f64>() < config::CAR_HAZARD_RATIO {
                ObstacleKind::Car
            } else {
                ObstacleKind::Spike
            };
            let sprite = self.rng.gen_range(0..config::TRAFFIC_CAR_COUNT);
            self.obstacles.push(Obstacle {
                x,
                y,
                prev_y: y,
                kind,
                sprite,
                hit: false,
            });
            debug_spawn!("spawned {:?} in lane {} at x={:.0}", kind, lane, x);
            return;
        }

        debug_spawn!(
            "no free lane slot after {} tries, skipping",
            config::SPAWN_MAX_TRIES
        );
    }

    /// Scroll obstacles toward the player and cull the ones that left the
    /// screen. Traffic closes faster the faster the player drives.
    pub fn advance(&mut self, player_speed: f64) {
        for obstacle in self.obstacles.iter_mut() {
            obstacle.y += player_speed * config::OBSTACLE_SPEED_FACTOR;
        }
        self.obstacles.retain(|o| o.y < config::WINDOW_HEIGHT);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;
    use rand::SeedableRng;

    fn field(seed: u64) -> ObstacleField {
        ObstacleField::new(StdRng::seed_from_u64(seed))
    }

    #[test]
    fn test_fresh_obstacles_never_overlap() {
        let mut field = field(42);
        for _ in 0..1000 {
            field.spawn();
        }

        // Everything sits at the spawn row, so every pair is "fresh"
        for (i, a) in field.obstacles.iter().enumerate() {
            for b in field.obstacles.iter().skip(i + 1) {
                assert!(
                    !a.bounds().overlaps(&b.bounds(), config::SPAWN_BUFFER),
                    "obstacles at x={} and x={} crowd each other",
                    a.x,
                    b.x
                );
            }
        }
        // With one shared spawn row there is at most one obstacle per lane
        assert!(field.obstacles.len() <= config::LANE_COUNT as usize);
    }

    #[test]
    fn test_spawn_exhaustion_is_silent() {
        let mut field = field(7);
        for _ in 0..200 {
            field.spawn();
        }
        let settled = field.obstacles.len();
        // Every further attempt finds all lanes blocked and is skipped
        field.spawn();
        assert_eq!(field.obstacles.len(), settled);
    }

    #[test]
    fn test_obstacles_stay_in_lane_centers() {
        let mut field = field(3);
        for _ in 0..50 {
            field.spawn();
            field.advance(config::DEFAULT_MAX_SPEED);
        }
        for o in &field.obstacles {
            let offset = o.x - config::ROAD_MARGIN
                - (config::LANE_WIDTH - config::OBSTACLE_WIDTH) / 2.0;
            let lane = offset / config::LANE_WIDTH;
            assert_approx_eq!(lane, lane.round());
            assert!(lane >= 0.0 && (lane as u32) < config::LANE_COUNT);
        }
    }

    #[test]
    fn test_advance_scales_with_player_speed() {
        let mut field = field(1);
        field.spawn();
        let before = field.obstacles[0].y;
        field.advance(10.0);
        assert_approx_eq!(
            field.obstacles[0].y,
            before + 10.0 * config::OBSTACLE_SPEED_FACTOR
        );
    }

    #[test]
    fn test_offscreen_obstacles_are_culled() {
        let mut field = field(1);
        field.spawn();
        field.obstacles[0].y = config::WINDOW_HEIGHT - 1.0;
        field.advance(10.0);
        assert!(field.obstacles.is_empty());
    }

    #[test]
    fn test_hazard_mix_matches_ratio() {
        let mut field = field(99);
        let mut cars = 0usize;
        let mut spikes = 0usize;
        for _ in 0..400 {
            field.spawn();
            // Drain between spawns so every attempt sees a clear road
            for o in field.obstacles.drain(..) {
                match o.kind {
                    ObstacleKind::Car => cars += 1,
                    ObstacleKind::Spike => spikes += 1,
                }
            }
        }
        let total = (cars + spikes) as f64;
        let car_share = cars as f64 / total;
        assert!(
            (0.6..0.8).contains(&car_share),
            "car share {:.2} drifted from the 0.7 target",
            car_share
        );
    }

    #[test]
    fn test_seeded_spawns_are_reproducible() {
        let mut a = field(1234);
        let mut b = field(1234);
        for _ in 0..100 {
            a.maybe_spawn();
            b.maybe_spawn();
            a.advance(8.0);
            b.advance(8.0);
        }
        assert_eq!(a.obstacles.len(), b.obstacles.len());
        for (oa, ob) in a.obstacles.iter().zip(b.obstacles.iter()) {
            assert_approx_eq!(oa.x, ob.x);
            assert_approx_eq!(oa.y, ob.y);
            assert_eq!(oa.kind, ob.kind);
        }
    }
}
