use kurbo::{Circle, Ellipse, Shape};

use crate::foundation::core::{BezPath, Point, Rgba8, Vec2};
use crate::synth::palette::ColorConfig;
use crate::synth::pose::{CreatureKind, Pose};

const PATH_TOLERANCE: f64 = 0.05;
const INK: Rgba8 = Rgba8::rgb(0x1a, 0x16, 0x14);
const WHITE: Rgba8 = Rgba8::rgb(0xff, 0xff, 0xff);

/// One primitive drawing instruction in frame-local pixel coordinates.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawOp {
    /// Filled circle.
    FillCircle {
        /// Center point.
        center: Point,
        /// Radius in pixels.
        radius: f64,
        /// Fill color.
        color: Rgba8,
    },
    /// Filled, optionally rotated ellipse.
    FillEllipse {
        /// Center point.
        center: Point,
        /// Semi-axes before rotation.
        radii: Vec2,
        /// Rotation in radians.
        rotation: f64,
        /// Fill color.
        color: Rgba8,
    },
    /// Filled triangle.
    FillTriangle {
        /// Vertices.
        points: [Point; 3],
        /// Fill color.
        color: Rgba8,
    },
    /// Open stroked polyline.
    StrokePolyline {
        /// Vertices in order.
        points: Vec<Point>,
        /// Stroke width in pixels.
        width: f64,
        /// Stroke color.
        color: Rgba8,
    },
}

impl DrawOp {
    /// Color the primitive is painted with.
    pub fn color(&self) -> Rgba8 {
        match self {
            Self::FillCircle { color, .. }
            | Self::FillEllipse { color, .. }
            | Self::FillTriangle { color, .. }
            | Self::StrokePolyline { color, .. } => *color,
        }
    }

    /// Whether the primitive is stroked rather than filled.
    pub fn is_stroke(&self) -> bool {
        matches!(self, Self::StrokePolyline { .. })
    }

    /// Outline of the primitive as a path.
    pub fn to_path(&self) -> BezPath {
        match self {
            Self::FillCircle { center, radius, .. } => {
                Circle::new(*center, radius.max(0.0)).to_path(PATH_TOLERANCE)
            }
            Self::FillEllipse {
                center,
                radii,
                rotation,
                ..
            } => Ellipse::new(
                *center,
                Vec2::new(radii.x.max(0.0), radii.y.max(0.0)),
                *rotation,
            )
            .to_path(PATH_TOLERANCE),
            Self::FillTriangle { points, .. } => {
                let mut p = BezPath::new();
                p.move_to(points[0]);
                p.line_to(points[1]);
                p.line_to(points[2]);
                p.close_path();
                p
            }
            Self::StrokePolyline { points, .. } => {
                let mut p = BezPath::new();
                let mut it = points.iter();
                if let Some(first) = it.next() {
                    p.move_to(*first);
                    for pt in it {
                        p.line_to(*pt);
                    }
                }
                p
            }
        }
    }
}

fn circle(center: Point, radius: f64, color: Rgba8) -> DrawOp {
    DrawOp::FillCircle {
        center,
        radius,
        color,
    }
}

fn ellipse(center: Point, rx: f64, ry: f64, rotation: f64, color: Rgba8) -> DrawOp {
    DrawOp::FillEllipse {
        center,
        radii: Vec2::new(rx, ry),
        rotation,
        color,
    }
}

fn triangle(a: Point, b: Point, c: Point, color: Rgba8) -> DrawOp {
    DrawOp::FillTriangle {
        points: [a, b, c],
        color,
    }
}

fn polyline(points: Vec<Point>, width: f64, color: Rgba8) -> DrawOp {
    DrawOp::StrokePolyline {
        points,
        width,
        color,
    }
}

/// Draw list for one frame of `kind` in a `width` x `height` cell.
pub fn frame_ops(
    kind: CreatureKind,
    pose: &Pose,
    palette: &ColorConfig,
    width: u32,
    height: u32,
) -> Vec<DrawOp> {
    let center = Point::new(f64::from(width) * 0.5, f64::from(height) * 0.5);
    match kind {
        CreatureKind::Bird => bird_ops(center, pose, palette),
        CreatureKind::Butterfly => butterfly_ops(center, pose, palette),
        CreatureKind::Owl => owl_ops(center, pose, palette),
    }
}

fn bird_ops(c: Point, pose: &Pose, palette: &ColorConfig) -> Vec<DrawOp> {
    let y = c.y + pose.body_bob;
    let at = |dx: f64, dy: f64| Point::new(c.x + dx, y + dy);
    let far_wing = palette.primary.mix(INK, 0.3);
    let lift = pose.wing_lift;

    let mut ops = vec![
        triangle(at(-9.0, 0.0), at(-20.0, -4.0), at(-20.0, 5.0), palette.primary),
        triangle(at(-5.0, -2.0), at(6.0, -2.0), at(-2.0, -12.0 * lift), far_wing),
        ellipse(at(0.0, 0.0), 12.0, 7.0, 0.0, palette.body),
        ellipse(at(2.0, 3.0), 8.0, 3.5, 0.0, palette.secondary),
        circle(at(10.0, -4.0), 5.5, palette.body),
        triangle(
            at(14.5, -5.5),
            at(20.0, -3.5),
            at(14.5, -2.0),
            palette.accent_or_default(),
        ),
        circle(at(12.0, -5.0), 1.3, INK),
        triangle(at(-7.0, -1.0), at(5.0, -1.0), at(-3.0, -14.0 * lift), palette.primary),
    ];
    if palette.pattern {
        // Wing bar follows the near wing.
        ops.push(polyline(
            vec![at(-5.0, -1.5), at(-3.0, -7.0 * lift), at(2.0, -1.5)],
            1.0,
            palette.secondary,
        ));
    }
    if pose.shimmer > 0.0 {
        ops.push(ellipse(
            at(-2.0, -6.0 * lift),
            3.0,
            1.5,
            0.0,
            WHITE.fade(pose.shimmer * 0.45),
        ));
    }
    ops
}

fn butterfly_ops(c: Point, pose: &Pose, palette: &ColorConfig) -> Vec<DrawOp> {
    let y = c.y + pose.body_bob;
    let at = |dx: f64, dy: f64| Point::new(c.x + dx, y + dy);
    let open = pose.wing_open;
    let spot = palette.body.mix(WHITE, 0.75);

    let mut ops = Vec::with_capacity(16);
    for side in [-1.0, 1.0] {
        ops.push(ellipse(
            at(side * 7.0 * open, -4.0),
            7.0 * open + 0.5,
            6.0,
            side * 0.3,
            palette.primary,
        ));
        ops.push(ellipse(
            at(side * 5.0 * open, 5.0),
            5.0 * open + 0.5,
            4.5,
            -side * 0.25,
            palette.secondary,
        ));
        if palette.pattern {
            ops.push(circle(at(side * 9.0 * open, -6.0), 1.6 * open, spot));
            ops.push(circle(at(side * 6.0 * open, 6.0), 1.1 * open, spot));
        }
        if pose.shimmer > 0.0 {
            ops.push(ellipse(
                at(side * 6.0 * open, -5.5),
                3.5 * open + 0.25,
                2.0,
                side * 0.3,
                WHITE.fade(pose.shimmer * 0.5),
            ));
        }
    }
    ops.push(ellipse(at(0.0, 1.0), 1.6, 8.0, 0.0, palette.body));
    ops.push(circle(at(0.0, -7.5), 2.0, palette.body));
    for side in [-1.0, 1.0] {
        ops.push(polyline(
            vec![at(side * 0.6, -9.0), at(side * 3.0, -13.0), at(side * 4.2, -13.8)],
            0.8,
            palette.body,
        ));
    }
    ops
}

fn owl_ops(c: Point, pose: &Pose, palette: &ColorConfig) -> Vec<DrawOp> {
    let y = c.y + pose.body_bob;
    let at = |dx: f64, dy: f64| Point::new(c.x + dx, y + dy);
    let face = palette.secondary.mix(WHITE, 0.3);
    let eye = pose.eye_open.max(0.08);

    let mut ops = vec![
        triangle(
            at(-11.0, -12.0),
            at(-13.0 - pose.sway * 0.5, -21.0),
            at(-5.0, -14.0),
            palette.body,
        ),
        triangle(
            at(11.0, -12.0),
            at(13.0 + pose.sway * 0.5, -21.0),
            at(5.0, -14.0),
            palette.body,
        ),
        ellipse(at(0.0, 4.0), 13.0, 16.0, 0.0, palette.body),
        ellipse(at(-12.0 - pose.sway, 6.0), 4.0, 11.0, 0.2, palette.primary),
        ellipse(at(12.0 + pose.sway, 6.0), 4.0, 11.0, -0.2, palette.primary),
        ellipse(at(0.0, 9.0), 8.0, 10.0, 0.0, palette.secondary),
        circle(at(0.0, -5.0), 11.0, face),
    ];
    if palette.pattern {
        for row in 0..3 {
            let dy = 5.0 + f64::from(row) * 4.0;
            ops.push(polyline(
                vec![at(-3.0, dy), at(0.0, dy + 2.0), at(3.0, dy)],
                0.9,
                palette.primary,
            ));
        }
    }
    for side in [-1.0, 1.0] {
        ops.push(ellipse(at(side * 5.0, -6.0), 4.0, 4.0 * eye, 0.0, WHITE));
        ops.push(ellipse(at(side * 5.0, -6.0), 2.0, 2.0 * eye, 0.0, INK));
    }
    let accent = palette.accent_or_default();
    ops.push(triangle(at(-2.0, -2.0), at(2.0, -2.0), at(0.0, 2.5), accent));
    for side in [-1.0, 1.0] {
        ops.push(polyline(
            vec![at(side * 5.0, 19.0), at(side * 4.0, 21.5), at(side * 6.0, 21.5)],
            1.2,
            accent,
        ));
    }
    ops
}

#[cfg(test)]
#[path = "../../tests/unit/synth/shapes.rs"]
mod tests;
