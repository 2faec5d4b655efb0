use crate::config;
use log::warn;
use macroquad::prelude::{FilterMode, Image, Texture2D};
use rust_embed::RustEmbed;
use std::borrow::Cow;

#[derive(RustEmbed)]
#[folder = "assets/"]
pub struct Asset;

pub fn get_asset_bytes(name: &str) -> Option<Cow<'static, [u8]>> {
    Asset::get(name).map(|f| f.data)
}

pub const PLAYER_CAR_FILES: [&str; config::PLAYER_CAR_COUNT] = [
    "fuel_truck.png",
    "mini_cart.png",
    "sport_car.png",
    "van.png",
    "bus.png",
];

pub const TRAFFIC_CAR_FILES: [&str; config::TRAFFIC_CAR_COUNT] = [
    "traffic1.png",
    "traffic2.png",
    "traffic3.png",
    "traffic4.png",
    "traffic5.png",
    "traffic6.png",
];

/// Every texture is optional; the renderer falls back to solid rectangles
/// for anything that failed to load.
pub struct GameAssets {
    pub player_cars: Vec<Option<Texture2D>>,
    pub traffic_cars: Vec<Option<Texture2D>>,
    pub spike: Option<Texture2D>,
    pub crash: Option<Texture2D>,
}

impl GameAssets {
    pub fn load() -> Self {
        GameAssets {
            player_cars: PLAYER_CAR_FILES.iter().map(|f| load_texture(f)).collect(),
            traffic_cars: TRAFFIC_CAR_FILES.iter().map(|f| load_texture(f)).collect(),
            spike: load_texture("spikes.png"),
            crash: load_texture("crash.png"),
        }
    }
}

// Decode one embedded image into a GPU texture
fn load_texture(name: &str) -> Option<Texture2D> {
    let Some(bytes) = get_asset_bytes(name) else {
        warn!("Missing embedded asset '{}'", name);
        return None;
    };
    match Image::from_file_with_format(&bytes, None) {
        Ok(image) => {
            let texture = Texture2D::from_image(&image);
            texture.set_filter(FilterMode::Linear);
            Some(texture)
        }
        Err(e) => {
            warn!("Failed to decode asset '{}': {}", name, e);
            None
        }
    }
}
