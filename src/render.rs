use crate::assets::GameAssets;
use crate::config;
use crate::obstacles::{Obstacle, ObstacleKind};
use crate::race::RaceSession;
use crate::types::MapTheme;
use crate::utils;
use crate::weather::{Particle, WeatherKind};
use macroquad::prelude::*;

const LANE_DASH_PERIOD: f32 = 60.0;
const LANE_DASH_LENGTH: f32 = 30.0;
const LANE_LINE_WIDTH: f32 = 4.0;
const HUD_FONT_SIZE: f32 = 28.0;
const BANNER_FONT_SIZE: f32 = 40.0;

fn road_color(theme: MapTheme) -> Color {
    match theme {
        MapTheme::Snow => Color::from_rgba(58, 60, 72, 255),
        MapTheme::Storm => Color::from_rgba(42, 44, 48, 255),
        MapTheme::Desert => Color::from_rgba(84, 70, 54, 255),
    }
}

fn shoulder_color(theme: MapTheme) -> Color {
    match theme {
        MapTheme::Snow => Color::from_rgba(198, 205, 216, 255),
        MapTheme::Storm => Color::from_rgba(22, 26, 34, 255),
        MapTheme::Desert => Color::from_rgba(204, 172, 116, 255),
    }
}

fn particle_color(kind: WeatherKind) -> Color {
    match kind {
        WeatherKind::Snow => Color::from_rgba(240, 245, 255, 220),
        WeatherKind::Rain => Color::from_rgba(150, 180, 230, 180),
        WeatherKind::Dust => Color::from_rgba(210, 180, 130, 160),
    }
}

// Fallback fills for sprites that did not load
const PLAYER_FALLBACK: Color = Color::new(0.0, 1.0, 0.27, 1.0);
const TRAFFIC_FALLBACK: Color = Color::new(1.0, 0.25, 0.25, 1.0);
const SPIKE_FALLBACK: Color = Color::new(0.55, 0.55, 0.6, 1.0);

/// Draws the simulation state. Positions are interpolated between the
/// previous and current tick using the accumulator alpha, so rendering
/// stays smooth at any refresh rate while gameplay advances in fixed
/// steps.
pub struct Renderer {
    lane_offset: f32,
}

impl Renderer {
    pub fn new() -> Self {
        Renderer { lane_offset: 0.0 }
    }

    pub fn draw_frame(&mut self, session: &RaceSession, assets: &GameAssets, alpha: f32) {
        clear_background(shoulder_color(session.theme));

        self.draw_road(session);
        self.draw_finish_band(session);
        self.draw_obstacles(session, assets, alpha);
        self.draw_crashes(session, assets);
        self.draw_player(session, assets, alpha);
        self.draw_weather(session, alpha);
        self.draw_hud(session);
    }

    fn draw_road(&mut self, session: &RaceSession) {
        let road_left = config::ROAD_MARGIN as f32;
        draw_rectangle(
            road_left,
            0.0,
            config::ROAD_WIDTH as f32,
            config::WINDOW_HEIGHT as f32,
            road_color(session.theme),
        );

        // Lane markings scroll with the player's speed; cosmetic only
        self.lane_offset =
            (self.lane_offset + session.player.speed as f32 * 0.5) % LANE_DASH_PERIOD;
        for lane in 1..config::LANE_COUNT {
            let x = road_left + lane as f32 * config::LANE_WIDTH as f32;
            let mut y = -LANE_DASH_PERIOD + self.lane_offset;
            while y < config::WINDOW_HEIGHT as f32 {
                draw_line(x, y, x, y + LANE_DASH_LENGTH, LANE_LINE_WIDTH, WHITE);
                y += LANE_DASH_PERIOD;
            }
        }
    }

    fn draw_finish_band(&self, session: &RaceSession) {
        let Some(line_y) = session.finish_line_y() else {
            return;
        };
        let line_y = line_y as f32;
        let road_left = config::ROAD_MARGIN as f32;
        let square = config::FINISH_SQUARE as f32;

        // Checkerboard band across the road
        let cols = (config::ROAD_WIDTH / config::FINISH_SQUARE) as u32;
        let rows = (config::FINISH_BAND_HEIGHT / config::FINISH_SQUARE) as u32;
        for row in 0..rows {
            for col in 0..cols {
                let dark = (row + col) % 2 == 0;
                draw_rectangle(
                    road_left + col as f32 * square,
                    line_y + row as f32 * square,
                    square,
                    square,
                    if dark { BLACK } else { WHITE },
                );
            }
        }
        draw_rectangle_lines(
            road_left,
            line_y,
            config::ROAD_WIDTH as f32,
            config::FINISH_BAND_HEIGHT as f32,
            LANE_LINE_WIDTH,
            GOLD,
        );
        let text = "FINISH";
        let dims = measure_text(text, None, BANNER_FONT_SIZE as u16, 1.0);
        draw_text(
            text,
            (config::WINDOW_WIDTH as f32 - dims.width) / 2.0,
            line_y - 16.0,
            BANNER_FONT_SIZE,
            GOLD,
        );
    }

    fn draw_obstacles(&self, session: &RaceSession, assets: &GameAssets, alpha: f32) {
        for obstacle in &session.obstacles.obstacles {
            let y = utils::lerp(obstacle.prev_y as f32, obstacle.y as f32, alpha);
            self.draw_obstacle(obstacle, y, assets);
        }
    }

    fn draw_obstacle(&self, obstacle: &Obstacle, y: f32, assets: &GameAssets) {
        let texture = match obstacle.kind {
            ObstacleKind::Car => assets
                .traffic_cars
                .get(obstacle.sprite)
                .and_then(|t| t.as_ref()),
            ObstacleKind::Spike => assets.spike.as_ref(),
        };
        let fallback = match obstacle.kind {
            ObstacleKind::Car => TRAFFIC_FALLBACK,
            ObstacleKind::Spike => SPIKE_FALLBACK,
        };
        draw_sprite(
            texture,
            obstacle.x as f32,
            y,
            config::OBSTACLE_WIDTH as f32,
            config::OBSTACLE_HEIGHT as f32,
            fallback,
        );
    }

    fn draw_crashes(&self, session: &RaceSession, assets: &GameAssets) {
        for crash in &session.crashes {
            let (x, y) = (crash.x as f32, crash.y as f32);
            if let Some(texture) = assets.crash.as_ref() {
                draw_texture_ex(
                    texture,
                    x - 50.0,
                    y - 50.0,
                    WHITE,
                    DrawTextureParams {
                        dest_size: Some(vec2(100.0, 100.0)),
                        ..Default::default()
                    },
                );
            } else {
                draw_circle(x, y, 40.0, ORANGE);
            }
        }
    }

    fn draw_player(&self, session: &RaceSession, assets: &GameAssets, alpha: f32) {
        let x = utils::lerp(session.player.prev_x as f32, session.player.x as f32, alpha);
        let texture = assets
            .player_cars
            .get(session.player.sprite)
            .and_then(|t| t.as_ref());
        draw_sprite(
            texture,
            x,
            session.player.y as f32,
            config::CAR_WIDTH as f32,
            config::CAR_HEIGHT as f32,
            PLAYER_FALLBACK,
        );
    }

    fn draw_weather(&self, session: &RaceSession, alpha: f32) {
        let kind = session.weather.kind();
        let color = particle_color(kind);
        for particle in session.weather.particles() {
            self.draw_particle(particle, kind, color, alpha);
        }
    }

    fn draw_particle(&self, particle: &Particle, kind: WeatherKind, color: Color, alpha: f32) {
        let x = particle.x as f32;
        let y = utils::lerp(particle.prev_y as f32, particle.y as f32, alpha);
        let size = particle.size as f32;
        match kind {
            // Rain reads better as short streaks than as dots
            WeatherKind::Rain => {
                draw_line(x, y, x + particle.drift as f32 * 2.0, y + size * 6.0, 1.5, color)
            }
            WeatherKind::Snow | WeatherKind::Dust => draw_circle(x, y, size, color),
        }
    }

    fn draw_hud(&self, session: &RaceSession) {
        if !session.started() {
            let text = "Press UP to start the race!";
            let dims = measure_text(text, None, 32, 1.0);
            draw_text(
                text,
                (config::WINDOW_WIDTH as f32 - dims.width) / 2.0,
                config::WINDOW_HEIGHT as f32 / 2.0,
                32.0,
                YELLOW,
            );
            return;
        }

        draw_text(
            &format!("{:.0} m left", session.remaining()),
            20.0,
            40.0,
            HUD_FONT_SIZE,
            WHITE,
        );
        draw_text(
            &format!("{:.2}s", session.elapsed_seconds()),
            20.0,
            70.0,
            HUD_FONT_SIZE,
            WHITE,
        );
        draw_text(
            &format!("Speed: {:.1}", session.player.speed),
            20.0,
            100.0,
            HUD_FONT_SIZE,
            WHITE,
        );

        if session.effects.nitro_active() {
            draw_text("NITRO", 20.0, 130.0, HUD_FONT_SIZE, SKYBLUE);
        } else if !session.effects.nitro_used() {
            draw_text("Nitro ready (SPACE)", 20.0, 130.0, HUD_FONT_SIZE, GRAY);
        }

        if session.effects.spike_active() {
            let text = "Spike hit! Speed reduced!";
            let dims = measure_text(text, None, HUD_FONT_SIZE as u16, 1.0);
            draw_text(
                text,
                (config::WINDOW_WIDTH as f32 - dims.width) / 2.0,
                100.0,
                HUD_FONT_SIZE,
                RED,
            );
        }
    }

    /// Post-race overlay with the final time.
    pub fn draw_finish_overlay(&self, final_time: f64) {
        let (w, h) = (420.0, 120.0);
        let x = (config::WINDOW_WIDTH as f32 - w) / 2.0;
        let y = config::WINDOW_HEIGHT as f32 * 0.4 - h / 2.0;
        draw_rectangle(x, y, w, h, Color::from_rgba(20, 20, 24, 230));
        draw_rectangle_lines(x, y, w, h, 3.0, GOLD);

        let text = format!("Finished in {:.2}s", final_time);
        let dims = measure_text(&text, None, BANNER_FONT_SIZE as u16, 1.0);
        draw_text(
            &text,
            x + (w - dims.width) / 2.0,
            y + 52.0,
            BANNER_FONT_SIZE,
            WHITE,
        );
        let hint = "Press ESC to exit";
        let hint_dims = measure_text(hint, None, 20, 1.0);
        draw_text(
            hint,
            x + (w - hint_dims.width) / 2.0,
            y + 90.0,
            20.0,
            GRAY,
        );
    }
}

// Draw a sprite, or a solid rectangle when the texture is unavailable
fn draw_sprite(texture: Option<&Texture2D>, x: f32, y: f32, w: f32, h: f32, fallback: Color) {
    match texture {
        Some(texture) => draw_texture_ex(
            texture,
            x,
            y,
            WHITE,
            DrawTextureParams {
                dest_size: Some(vec2(w, h)),
                ..Default::default()
            },
        ),
        None => draw_rectangle(x, y, w, h, fallback),
    }
}
