//! Connector curve synthesis.

use std::fmt::Write as _;

use egui::epaint::CubicBezierShape;
use egui::{pos2, Color32, Pos2, Shape, Stroke, Vec2};

/// The curve joining two local path endpoints.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Connector {
    /// End lies at or to the right of start: one cubic with both control
    /// points on the horizontal midpoint.
    Smooth {
        from: Pos2,
        controls: [Pos2; 2],
        to: Pos2,
    },
    /// End lies left of start: drop half the vertical distance, cross over
    /// to the end column, then drop the rest. Two cubics joined at `joint`.
    Stepped {
        from: Pos2,
        controls: [Pos2; 4],
        joint: Pos2,
        to: Pos2,
    },
}

impl Connector {
    pub fn between(from: Pos2, to: Pos2) -> Self {
        if from.x <= to.x {
            let mid_x = (from.x + to.x) / 2.0;
            Self::Smooth {
                from,
                controls: [pos2(mid_x, from.y), pos2(mid_x, to.y)],
                to,
            }
        } else {
            let mid_x = (from.x + to.x) / 2.0;
            let mid_y = (from.y + to.y) / 2.0;
            Self::Stepped {
                from,
                controls: [
                    pos2(from.x, mid_y),
                    pos2((from.x + mid_x) / 2.0, mid_y),
                    pos2((mid_x + to.x) / 2.0, mid_y),
                    pos2(to.x, mid_y),
                ],
                joint: pos2(mid_x, mid_y),
                to,
            }
        }
    }

    pub fn from(&self) -> Pos2 {
        match *self {
            Self::Smooth { from, .. } | Self::Stepped { from, .. } => from,
        }
    }

    pub fn to(&self) -> Pos2 {
        match *self {
            Self::Smooth { to, .. } | Self::Stepped { to, .. } => to,
        }
    }

    pub fn control_points(&self) -> &[Pos2] {
        match self {
            Self::Smooth { controls, .. } => controls,
            Self::Stepped { controls, .. } => controls,
        }
    }

    /// Cubic segments as `[start, c1, c2, end]`, in drawing order.
    pub fn segments(&self) -> Vec<[Pos2; 4]> {
        let c = self.control_points();
        match *self {
            Self::Smooth { from, to, .. } => vec![[from, c[0], c[1], to]],
            Self::Stepped { from, joint, to, .. } => {
                vec![[from, c[0], c[1], joint], [joint, c[2], c[3], to]]
            }
        }
    }

    /// Open, unfilled shapes translated by `offset`.
    pub fn to_shapes(&self, offset: Vec2, stroke: Stroke) -> Vec<Shape> {
        self.segments()
            .into_iter()
            .map(|seg| {
                let points = seg.map(|p| p + offset);
                Shape::CubicBezier(CubicBezierShape::from_points_stroke(
                    points,
                    false,
                    Color32::TRANSPARENT,
                    stroke,
                ))
            })
            .collect()
    }

    /// SVG `d` attribute for the curve.
    pub fn svg_path_data(&self) -> String {
        let mut d = String::new();
        let from = self.from();
        let _ = write!(d, "M{},{}", fmt_num(from.x), fmt_num(from.y));
        for [_, c1, c2, end] in self.segments() {
            let _ = write!(
                d,
                " C{},{} {},{} {},{}",
                fmt_num(c1.x),
                fmt_num(c1.y),
                fmt_num(c2.x),
                fmt_num(c2.y),
                fmt_num(end.x),
                fmt_num(end.y),
            );
        }
        d
    }
}

fn fmt_num(v: f32) -> String {
    if v.fract() == 0.0 {
        format!("{}", v as i64)
    } else {
        format!("{:.2}", v)
    }
}
