use serde::{Deserialize, Serialize};

/// A rectangle in logical pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

/// Where a UI toolkit puts the origin of a parent's coordinate space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CoordinateOrigin {
    TopLeft,
    BottomLeft,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rect_clone_and_equality() {
        let r = Rect::new(10.0, 20.0, 800.0, 600.0);
        let r2 = r;
        assert_eq!(r, r2);
    }

    #[test]
    fn rect_default_is_zero() {
        assert_eq!(Rect::default(), Rect::new(0.0, 0.0, 0.0, 0.0));
    }

    #[test]
    fn rect_deserializes_from_host_json() {
        let r: Rect =
            serde_json::from_str(r#"{"x":10,"y":20,"width":300,"height":200}"#).unwrap();
        assert_eq!(r, Rect::new(10.0, 20.0, 300.0, 200.0));
    }

    #[test]
    fn coordinate_origin_serializes_snake_case() {
        let json = serde_json::to_string(&CoordinateOrigin::BottomLeft).unwrap();
        assert_eq!(json, "\"bottom_left\"");
    }
}
