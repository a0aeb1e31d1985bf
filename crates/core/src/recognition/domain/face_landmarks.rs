//! 5-point face landmarks in recognizer order:
//! left eye, right eye, nose, left mouth corner, right mouth corner.
//!
//! Coordinates are image pixels with y increasing downward.

const LEFT_EYE: usize = 0;
const RIGHT_EYE: usize = 1;
const NOSE: usize = 2;
const MOUTH_LEFT: usize = 3;
const MOUTH_RIGHT: usize = 4;

pub const LANDMARK_COUNT: usize = 5;

pub type Point = (f64, f64);

#[derive(Clone, Debug, PartialEq)]
pub struct FaceLandmarks {
    points: [Point; LANDMARK_COUNT],
}

impl FaceLandmarks {
    pub fn new(points: [Point; LANDMARK_COUNT]) -> Self {
        Self { points }
    }

    pub fn points(&self) -> &[Point; LANDMARK_COUNT] {
        &self.points
    }

    pub fn left_eye(&self) -> Point {
        self.points[LEFT_EYE]
    }

    pub fn right_eye(&self) -> Point {
        self.points[RIGHT_EYE]
    }

    pub fn nose(&self) -> Point {
        self.points[NOSE]
    }

    pub fn mouth_left(&self) -> Point {
        self.points[MOUTH_LEFT]
    }

    pub fn mouth_right(&self) -> Point {
        self.points[MOUTH_RIGHT]
    }

    pub fn is_finite(&self) -> bool {
        self.points
            .iter()
            .all(|(x, y)| x.is_finite() && y.is_finite())
    }
}
