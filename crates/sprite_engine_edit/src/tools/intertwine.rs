//! Stroke intertwiners: turn the points of a stroke into point shape calls.
//!
//! Intertwiners are stateless values shared by every tool. The only state
//! that lives across calls, the pixel-perfect point buffer, is kept in an
//! [`IntertwineState`] owned by the gesture and passed in explicitly.

use sprite_engine::Position;

use super::{StrokePoint, algo, stroke::Stroke};

/// Receiver of the point shape calls an intertwiner produces.
pub trait StrokeSink {
    /// True when the gesture draws closed, filled shapes.
    fn is_filled(&self) -> bool;

    /// Runs the point shape centered at (x, y).
    fn point(&mut self, x: i32, y: i32, pressure: f32);

    /// Runs the point shape for every pixel of the row `x1..=x2`.
    fn hline(&mut self, x1: i32, y: i32, x2: i32, pressure: f32);
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Intertwine {
    /// Every stroke point is independent
    #[default]
    None,
    /// Consecutive points are joined with lines
    AsLines,
    /// Each pair of points is a rectangle
    AsRectangles,
    /// Each pair of points is the bounding box of an ellipse
    AsEllipses,
    /// Groups of four points are cubic curves
    AsBezier,
    /// Lines without the doubled pixels at L-shaped corners
    AsPixelPerfect,
}

/// Per-gesture data of the stateful intertwiners.
#[derive(Clone, Debug, Default)]
pub struct IntertwineState {
    pixel_perfect: Vec<StrokePoint>,
}

impl IntertwineState {
    pub fn clear(&mut self) {
        self.pixel_perfect.clear();
    }

    pub fn pixel_perfect_points(&self) -> &[StrokePoint] {
        &self.pixel_perfect
    }
}

impl Intertwine {
    pub const ALL: [Intertwine; 6] = [
        Intertwine::None,
        Intertwine::AsLines,
        Intertwine::AsRectangles,
        Intertwine::AsEllipses,
        Intertwine::AsBezier,
        Intertwine::AsPixelPerfect,
    ];

    pub fn id(self) -> &'static str {
        match self {
            Intertwine::None => "none",
            Intertwine::AsLines => "as_lines",
            Intertwine::AsRectangles => "as_rectangles",
            Intertwine::AsEllipses => "as_ellipses",
            Intertwine::AsBezier => "as_bezier",
            Intertwine::AsPixelPerfect => "as_pixel_perfect",
        }
    }

    /// Line-like shapes snap to 0/45/90 degrees with the square-aspect modifier.
    pub fn snap_by_angle(self) -> bool {
        matches!(self, Intertwine::AsLines)
    }

    /// Called once when the gesture starts.
    pub fn prepare(self, state: &mut IntertwineState) {
        state.clear();
    }

    /// Draws the outline of `stroke`.
    pub fn join_stroke<S: StrokeSink>(self, sink: &mut S, stroke: &Stroke, state: &mut IntertwineState) {
        match self {
            Intertwine::None => {
                for pt in stroke {
                    sink.point(pt.x(), pt.y(), pt.pressure);
                }
            }
            Intertwine::AsLines => join_lines(sink, stroke),
            Intertwine::AsRectangles => join_rectangles(sink, stroke),
            Intertwine::AsEllipses => join_ellipses(sink, stroke),
            Intertwine::AsBezier => join_bezier(sink, stroke),
            Intertwine::AsPixelPerfect => join_pixel_perfect(sink, stroke, state),
        }
    }

    /// Draws the outline and the interior of `stroke`.
    pub fn fill_stroke<S: StrokeSink>(self, sink: &mut S, stroke: &Stroke, state: &mut IntertwineState) {
        match self {
            Intertwine::AsLines => {
                join_lines(sink, stroke);
                if stroke.len() < 3 {
                    return;
                }
                let vertices: Vec<Position> = stroke.iter().map(|p| p.pos).collect();
                let pressure = stroke.last_point().map_or(1.0, |p| p.pressure);
                for (y, x1, x2) in algo::polygon_spans(&vertices) {
                    sink.hline(x1, y, x2, pressure);
                }
            }
            Intertwine::AsRectangles => {
                if stroke.len() < 2 {
                    join_rectangles(sink, stroke);
                    return;
                }
                for (a, b) in pairs(stroke) {
                    let (x1, y1, x2, y2) = normalize(a.pos, b.pos);
                    for y in y1..=y2 {
                        sink.hline(x1, y, x2, b.pressure);
                    }
                }
            }
            Intertwine::AsEllipses => {
                if stroke.len() < 2 {
                    join_ellipses(sink, stroke);
                    return;
                }
                for (a, b) in pairs(stroke) {
                    let (x1, y1, x2, y2) = normalize(a.pos, b.pos);
                    for (y, sx1, sx2) in algo::ellipse_fill_spans(x1, y1, x2, y2) {
                        sink.hline(sx1, y, sx2, b.pressure);
                    }
                }
            }
            Intertwine::None | Intertwine::AsBezier | Intertwine::AsPixelPerfect => self.join_stroke(sink, stroke, state),
        }
    }
}

fn pairs(stroke: &Stroke) -> impl Iterator<Item = (StrokePoint, StrokePoint)> + '_ {
    stroke.points().windows(2).map(|w| (w[0], w[1]))
}

fn normalize(a: Position, b: Position) -> (i32, i32, i32, i32) {
    (a.x.min(b.x), a.y.min(b.y), a.x.max(b.x), a.y.max(b.y))
}

/// Line from `a` to `b` with the pressure interpolated along the walk.
pub fn line_with_pressure(a: StrokePoint, b: StrokePoint) -> Vec<StrokePoint> {
    let points = algo::line_points(a.pos, b.pos);
    let last = points.len().saturating_sub(1).max(1) as f32;
    points
        .into_iter()
        .enumerate()
        .map(|(i, pos)| {
            let f = i as f32 / last;
            StrokePoint {
                pos,
                pressure: a.pressure + (b.pressure - a.pressure) * f,
            }
        })
        .collect()
}

fn draw_line<S: StrokeSink>(sink: &mut S, a: StrokePoint, b: StrokePoint) {
    for pt in line_with_pressure(a, b) {
        sink.point(pt.x(), pt.y(), pt.pressure);
    }
}

fn join_lines<S: StrokeSink>(sink: &mut S, stroke: &Stroke) {
    match stroke.len() {
        0 => {}
        1 => sink.point(stroke[0].x(), stroke[0].y(), stroke[0].pressure),
        len => {
            for (a, b) in pairs(stroke) {
                draw_line(sink, a, b);
            }
            if sink.is_filled() && len >= 3 {
                draw_line(sink, stroke[len - 1], stroke[0]);
            }
        }
    }
}

fn join_rectangles<S: StrokeSink>(sink: &mut S, stroke: &Stroke) {
    if stroke.len() == 1 {
        sink.point(stroke[0].x(), stroke[0].y(), stroke[0].pressure);
        return;
    }
    for (a, b) in pairs(stroke) {
        let (x1, y1, x2, y2) = normalize(a.pos, b.pos);
        let p = b.pressure;
        for x in x1..=x2 {
            sink.point(x, y1, p);
        }
        if y2 != y1 {
            for x in x1..=x2 {
                sink.point(x, y2, p);
            }
        }
        for y in (y1 + 1)..y2 {
            sink.point(x1, y, p);
            if x2 != x1 {
                sink.point(x2, y, p);
            }
        }
    }
}

fn join_ellipses<S: StrokeSink>(sink: &mut S, stroke: &Stroke) {
    if stroke.len() == 1 {
        sink.point(stroke[0].x(), stroke[0].y(), stroke[0].pressure);
        return;
    }
    for (a, b) in pairs(stroke) {
        let (x1, y1, x2, y2) = normalize(a.pos, b.pos);
        for pt in algo::ellipse_points(x1, y1, x2, y2) {
            sink.point(pt.x, pt.y, b.pressure);
        }
    }
}

fn join_bezier<S: StrokeSink>(sink: &mut S, stroke: &Stroke) {
    let pts = stroke.points();
    for chunk in pts.chunks(4) {
        match *chunk {
            [a] => sink.point(a.x(), a.y(), a.pressure),
            [a, b] => draw_line(sink, a, b),
            [a, b, c] => draw_curve(sink, [a, b, b, c]),
            [a, b, c, d] => draw_curve(sink, [a, b, c, d]),
            _ => {}
        }
    }
}

fn draw_curve<S: StrokeSink>(sink: &mut S, ctrl: [StrokePoint; 4]) {
    let samples = algo::bezier_points([ctrl[0].pos, ctrl[1].pos, ctrl[2].pos, ctrl[3].pos]);
    let pressure = ctrl[3].pressure;
    match samples.as_slice() {
        [] => {}
        [only] => sink.point(only.x, only.y, pressure),
        _ => {
            // skip each segment's first point after the first one
            for (i, w) in samples.windows(2).enumerate() {
                let line = algo::line_points(w[0], w[1]);
                let skip = usize::from(i > 0);
                for pt in line.into_iter().skip(skip) {
                    sink.point(pt.x, pt.y, pressure);
                }
            }
        }
    }
}

fn join_pixel_perfect<S: StrokeSink>(sink: &mut S, stroke: &Stroke, state: &mut IntertwineState) {
    if stroke.is_empty() {
        return;
    }
    let buffer = &mut state.pixel_perfect;
    if buffer.is_empty() && stroke.len() == 1 {
        buffer.push(stroke[0]);
    } else {
        for (a, b) in pairs(stroke) {
            for pt in line_with_pressure(a, b) {
                if buffer.last().map(|l| l.pos) != Some(pt.pos) {
                    buffer.push(pt);
                }
            }
        }
    }

    let mut c = 0;
    while c < buffer.len() {
        // a point between two others forming an L is dropped
        if c > 0 && c + 1 < buffer.len() {
            let prev = buffer[c - 1].pos;
            let cur = buffer[c].pos;
            let next = buffer[c + 1].pos;
            if prev.is_orthogonal_to(cur) && next.is_orthogonal_to(cur) && prev.x != next.x && prev.y != next.y {
                c += 1;
            }
        }
        let pt = buffer[c];
        sink.point(pt.x(), pt.y(), pt.pressure);
        c += 1;
    }
}
