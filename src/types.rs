use crate::error::GameError;

/// Axis-aligned bounding box; position is the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, w: f64, h: f64) -> Self {
        Rect { x, y, w, h }
    }

    /// Overlap test with a spacing buffer applied around both boxes.
    /// A buffer of 0.0 is a plain AABB intersection.
    pub fn overlaps(&self, other: &Rect, buffer: f64) -> bool {
        self.x < other.x + other.w + buffer
            && self.x + self.w + buffer > other.x
            && self.y < other.y + other.h + buffer
            && self.y + self.h + buffer > other.y
    }
}

/// Map theme selected by the hosting layer. Picks the background palette
/// and the ambient weather kind, nothing else.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MapTheme {
    Snow,
    Storm,
    Desert,
}

impl MapTheme {
    pub fn parse(name: &str) -> Result<MapTheme, GameError> {
        match name.to_ascii_lowercase().as_str() {
            "snow" => Ok(MapTheme::Snow),
            "storm" => Ok(MapTheme::Storm),
            "desert" => Ok(MapTheme::Desert),
            other => Err(GameError::UnknownTheme(other.to_string())),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            MapTheme::Snow => "snow",
            MapTheme::Storm => "storm",
            MapTheme::Desert => "desert",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_overlap_basic() {
        let a = Rect::new(0.0, 0.0, 100.0, 150.0);
        let b = Rect::new(50.0, 50.0, 100.0, 150.0);
        let c = Rect::new(200.0, 0.0, 100.0, 150.0);
        assert!(a.overlaps(&b, 0.0));
        assert!(b.overlaps(&a, 0.0));
        assert!(!a.overlaps(&c, 0.0));
    }

    #[test]
    fn test_rect_overlap_buffer() {
        let a = Rect::new(0.0, 0.0, 100.0, 100.0);
        let b = Rect::new(110.0, 0.0, 100.0, 100.0);
        // 10 px apart: clear without a buffer, blocked with a 20 px buffer
        assert!(!a.overlaps(&b, 0.0));
        assert!(a.overlaps(&b, 20.0));
    }

    #[test]
    fn test_touching_edges_do_not_overlap() {
        let a = Rect::new(0.0, 0.0, 100.0, 100.0);
        let b = Rect::new(100.0, 0.0, 100.0, 100.0);
        assert!(!a.overlaps(&b, 0.0));
    }

    #[test]
    fn test_theme_parse() {
        assert_eq!(MapTheme::parse("snow"), Ok(MapTheme::Snow));
        assert_eq!(MapTheme::parse("Storm"), Ok(MapTheme::Storm));
        assert_eq!(MapTheme::parse("DESERT"), Ok(MapTheme::Desert));
        assert!(matches!(
            MapTheme::parse("lava"),
            Err(GameError::UnknownTheme(_))
        ));
    }
}
