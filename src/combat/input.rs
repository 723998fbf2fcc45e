/// A position on the screen
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Point {
        Point { x, y }
    }
}

/// An axis aligned rectangle in screen space. `x`/`y` is the top left corner
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    #[must_use]
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Rect {
        Rect {
            x,
            y,
            width,
            height,
        }
    }

    /// A rectangle centered around the given point
    #[must_use]
    pub const fn centered(center: Point, width: i32, height: i32) -> Rect {
        Rect {
            x: center.x - width / 2,
            y: center.y - height / 2,
            width,
            height,
        }
    }

    /// Whether the point lies inside this rect. The right and bottom edges
    /// are not part of the rect
    #[must_use]
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.x
            && point.x < self.x + self.width
            && point.y >= self.y
            && point.y < self.y + self.height
    }
}

/// Everything the input layer reports for a single frame
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct FrameInput {
    /// Whether the mouse button went down during this frame
    pub clicked: bool,
    pub cursor: Point,
}

impl FrameInput {
    /// A frame without any click
    #[must_use]
    pub fn idle() -> FrameInput {
        FrameInput::default()
    }

    /// A frame, in which the player clicked at the given position
    #[must_use]
    pub fn click(at: Point) -> FrameInput {
        FrameInput {
            clicked: true,
            cursor: at,
        }
    }
}
