use crate::foundation::core::{Affine, Canvas, Point, Vec2};

/// Unit vector pointing up in scene space (y grows upward).
pub const UP: Vec2 = Vec2::new(0.0, 1.0);
/// Unit vector pointing down.
pub const DOWN: Vec2 = Vec2::new(0.0, -1.0);
/// Unit vector pointing left.
pub const LEFT: Vec2 = Vec2::new(-1.0, 0.0);
/// Unit vector pointing right.
pub const RIGHT: Vec2 = Vec2::new(1.0, 0.0);
/// Upper-left corner direction.
pub const UL: Vec2 = Vec2::new(-1.0, 1.0);
/// Upper-right corner direction.
pub const UR: Vec2 = Vec2::new(1.0, 1.0);
/// Lower-left corner direction.
pub const DL: Vec2 = Vec2::new(-1.0, -1.0);
/// Lower-right corner direction.
pub const DR: Vec2 = Vec2::new(1.0, -1.0);
/// Scene origin (frame center).
pub const ORIGIN: Point = Point::new(0.0, 0.0);

/// Default gap used by `next_to` and `arrange`.
pub const SMALL_BUFF: f64 = 0.25;
/// Default gap used by `to_edge` and `to_corner`.
pub const MED_LARGE_BUFF: f64 = 0.5;

/// Logical frame height in scene units. Width follows the canvas aspect ratio.
pub const FRAME_HEIGHT: f64 = 8.0;

/// Shorthand for a scene-space point.
pub fn pt(x: f64, y: f64) -> Point {
    Point::new(x, y)
}

/// The visible region of scene space and its mapping onto the pixel canvas.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SceneFrame {
    /// Visible width in scene units.
    pub width: f64,
    /// Visible height in scene units.
    pub height: f64,
    /// Output canvas this frame maps onto.
    pub canvas: Canvas,
}

impl SceneFrame {
    /// Frame for `canvas` with the fixed logical height.
    pub fn for_canvas(canvas: Canvas) -> Self {
        let aspect = f64::from(canvas.width.max(1)) / f64::from(canvas.height.max(1));
        Self {
            width: FRAME_HEIGHT * aspect,
            height: FRAME_HEIGHT,
            canvas,
        }
    }

    /// Pixels per scene unit.
    pub fn px_per_unit(&self) -> f64 {
        f64::from(self.canvas.height) / self.height
    }

    /// Affine mapping scene coordinates to pixel coordinates (y flipped).
    pub fn to_px(&self) -> Affine {
        let s = self.px_per_unit();
        Affine::new([
            s,
            0.0,
            0.0,
            -s,
            self.width * 0.5 * s,
            self.height * 0.5 * s,
        ])
    }

    /// Map one scene point to pixels.
    pub fn point_to_px(&self, p: Point) -> Point {
        self.to_px() * p
    }

    /// Scene-space x of the left frame edge.
    pub fn left(&self) -> f64 {
        -self.width * 0.5
    }

    /// Scene-space x of the right frame edge.
    pub fn right(&self) -> f64 {
        self.width * 0.5
    }

    /// Scene-space y of the top frame edge.
    pub fn top(&self) -> f64 {
        self.height * 0.5
    }

    /// Scene-space y of the bottom frame edge.
    pub fn bottom(&self) -> f64 {
        -self.height * 0.5
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/frame.rs"]
mod tests;
