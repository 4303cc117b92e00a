//! Raster primitives used by the intertwiners and point shapes.
//!
//! All functions work on plain sprite coordinates and never touch a
//! canvas; callers decide what to do with every point or span.

use std::collections::BTreeMap;

use sprite_engine::{Position, Rectangle};

// ═══════════════════════════════════════════════════════════════════════════
// Bresenham Line Algorithm
// ═══════════════════════════════════════════════════════════════════════════

/// Points of the line from `p0` to `p1`, both ends included.
///
/// The pixel set does not depend on the direction: the walk always starts
/// at the endpoint with the smaller `(x, y)` and is reversed when the caller
/// asked for the other direction.
pub fn line_points(p0: Position, p1: Position) -> Vec<Position> {
    if (p1.x, p1.y) < (p0.x, p0.y) {
        let mut points = walk_line(p1, p0);
        points.reverse();
        return points;
    }
    walk_line(p0, p1)
}

fn walk_line(p0: Position, p1: Position) -> Vec<Position> {
    let dx = (p1.x - p0.x).abs();
    let dy = -(p1.y - p0.y).abs();
    let sx = if p0.x < p1.x { 1 } else { -1 };
    let sy = if p0.y < p1.y { 1 } else { -1 };
    let mut err = dx + dy;

    let mut x = p0.x;
    let mut y = p0.y;
    let mut points = Vec::with_capacity((dx - dy + 1) as usize);

    loop {
        points.push(Position::new(x, y));

        if x == p1.x && y == p1.y {
            break;
        }

        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x += sx;
        }
        if e2 <= dx {
            err += dx;
            y += sy;
        }
    }

    points
}

// ═══════════════════════════════════════════════════════════════════════════
// Ellipse Algorithm
// ═══════════════════════════════════════════════════════════════════════════

/// Outline of the ellipse inscribed in the rectangle with corners
/// (x0, y0) and (x1, y1). Points may repeat.
pub fn ellipse_points(x0: i32, y0: i32, x1: i32, y1: i32) -> Vec<Position> {
    let mut points = Vec::new();
    let (mut x0, mut y0, mut x1) = (x0 as i64, y0 as i64, x1 as i64);
    let y1 = y1 as i64;

    let mut a = (x1 - x0).abs();
    let b = (y1 - y0).abs();
    let mut b1 = b & 1;
    let mut dx = 4 * (1 - a) * b * b;
    let mut dy = 4 * (b1 + 1) * a * a;
    let mut err = dx + dy + b1 * a * a;

    if x0 > x1 {
        x0 = x1;
        x1 += a;
    }
    if y0 > y1 {
        y0 = y1;
    }
    y0 += (b + 1) / 2;
    let mut y1 = y0 - b1;
    a *= 8 * a;
    b1 = 8 * b * b;

    let mut push = |x: i64, y: i64| points.push(Position::new(x as i32, y as i32));
    loop {
        push(x1, y0);
        push(x0, y0);
        push(x0, y1);
        push(x1, y1);
        let e2 = 2 * err;
        if e2 <= dy {
            y0 += 1;
            y1 -= 1;
            dy += a;
            err += dy;
        }
        if e2 >= dx || 2 * err > dy {
            x0 += 1;
            x1 -= 1;
            dx += b1;
            err += dx;
        }
        if x0 > x1 {
            break;
        }
    }

    // flat ellipses stop too early, finish the tips
    while y0 - y1 <= b {
        push(x0 - 1, y0);
        push(x1 + 1, y0);
        y0 += 1;
        push(x0 - 1, y1);
        push(x1 + 1, y1);
        y1 -= 1;
    }

    points
}

/// Horizontal spans `(y, x1, x2)` covering the ellipse and its outline.
pub fn ellipse_fill_spans(x0: i32, y0: i32, x1: i32, y1: i32) -> Vec<(i32, i32, i32)> {
    let mut rows: BTreeMap<i32, (i32, i32)> = BTreeMap::new();
    for p in ellipse_points(x0, y0, x1, y1) {
        rows.entry(p.y)
            .and_modify(|(lo, hi)| {
                *lo = (*lo).min(p.x);
                *hi = (*hi).max(p.x);
            })
            .or_insert((p.x, p.x));
    }
    rows.into_iter().map(|(y, (lo, hi))| (y, lo, hi)).collect()
}

// ═══════════════════════════════════════════════════════════════════════════
// Cubic Bezier
// ═══════════════════════════════════════════════════════════════════════════

/// Samples the cubic curve through the control quad `p`. Consecutive
/// samples are distinct; the first and last control points are included.
pub fn bezier_points(p: [Position; 4]) -> Vec<Position> {
    let dist = |a: Position, b: Position| (((b.x - a.x) as f64).powi(2) + ((b.y - a.y) as f64).powi(2)).sqrt();
    let length = dist(p[0], p[1]) + dist(p[1], p[2]) + dist(p[2], p[3]);
    let samples = ((length.sqrt() * 1.2) as usize).clamp(4, 64);

    let mut points: Vec<Position> = Vec::with_capacity(samples);
    for i in 0..samples {
        let t = i as f64 / (samples - 1) as f64;
        let u = 1.0 - t;
        let w = [u * u * u, 3.0 * u * u * t, 3.0 * u * t * t, t * t * t];
        let x: f64 = (0..4).map(|k| w[k] * p[k].x as f64).sum();
        let y: f64 = (0..4).map(|k| w[k] * p[k].y as f64).sum();
        let pt = Position::new(x.round() as i32, y.round() as i32);
        if points.last() != Some(&pt) {
            points.push(pt);
        }
    }
    points
}

// ═══════════════════════════════════════════════════════════════════════════
// Polygon Fill
// ═══════════════════════════════════════════════════════════════════════════

/// Scanline spans `(y, x1, x2)` inside the closed polygon `vertices`.
///
/// Each edge covers the rows `[min_y, max_y)`, so the outline has to be
/// drawn separately to get the bottom-most pixels.
pub fn polygon_spans(vertices: &[Position]) -> Vec<(i32, i32, i32)> {
    let mut spans = Vec::new();
    if vertices.len() < 3 {
        return spans;
    }
    let min_y = vertices.iter().map(|p| p.y).min().unwrap_or(0);
    let max_y = vertices.iter().map(|p| p.y).max().unwrap_or(0);

    let mut crossings = Vec::new();
    for y in min_y..=max_y {
        crossings.clear();
        for (i, a) in vertices.iter().enumerate() {
            let b = vertices[(i + 1) % vertices.len()];
            if a.y == b.y {
                continue;
            }
            let (lo, hi) = if a.y < b.y { (*a, b) } else { (b, *a) };
            if y >= lo.y && y < hi.y {
                let x = lo.x as f64 + (y - lo.y) as f64 * (hi.x - lo.x) as f64 / (hi.y - lo.y) as f64;
                crossings.push(x);
            }
        }
        crossings.sort_by(f64::total_cmp);
        for pair in crossings.chunks_exact(2) {
            spans.push((y, pair[0].round() as i32, pair[1].round() as i32));
        }
    }
    spans
}

// ═══════════════════════════════════════════════════════════════════════════
// Flood Fill
// ═══════════════════════════════════════════════════════════════════════════

/// 4-connected scanline flood fill limited to `bounds`.
///
/// `is_inside` must not depend on the spans already emitted; every pixel is
/// reported at most once through `hline(x1, y, x2)`.
pub fn flood_fill<F, H>(bounds: Rectangle, seed: Position, is_inside: F, mut hline: H)
where
    F: Fn(i32, i32) -> bool,
    H: FnMut(i32, i32, i32),
{
    if !bounds.contains_pt(seed) || !is_inside(seed.x, seed.y) {
        return;
    }

    let width = bounds.width() as usize;
    let mut visited = vec![false; width * bounds.height() as usize];
    let index = |x: i32, y: i32| (y - bounds.top()) as usize * width + (x - bounds.left()) as usize;

    let mut stack = vec![seed];
    while let Some(p) = stack.pop() {
        if visited[index(p.x, p.y)] {
            continue;
        }

        let mut x1 = p.x;
        while x1 > bounds.left() && !visited[index(x1 - 1, p.y)] && is_inside(x1 - 1, p.y) {
            x1 -= 1;
        }
        let mut x2 = p.x;
        while x2 < bounds.right() && !visited[index(x2 + 1, p.y)] && is_inside(x2 + 1, p.y) {
            x2 += 1;
        }
        for x in x1..=x2 {
            visited[index(x, p.y)] = true;
        }
        hline(x1, p.y, x2);

        for ny in [p.y - 1, p.y + 1] {
            if ny < bounds.top() || ny > bounds.bottom() {
                continue;
            }
            let mut in_run = false;
            for x in x1..=x2 {
                let open = !visited[index(x, ny)] && is_inside(x, ny);
                if open && !in_run {
                    stack.push(Position::new(x, ny));
                }
                in_run = open;
            }
        }
    }
}

/// Every run of pixels inside `bounds` matching `is_inside`, connected or not.
pub fn replace_matching<F, H>(bounds: Rectangle, is_inside: F, mut hline: H)
where
    F: Fn(i32, i32) -> bool,
    H: FnMut(i32, i32, i32),
{
    for y in bounds.y_range() {
        let mut start = None;
        for x in bounds.x_range() {
            match (is_inside(x, y), start) {
                (true, None) => start = Some(x),
                (false, Some(x1)) => {
                    hline(x1, y, x - 1);
                    start = None;
                }
                _ => {}
            }
        }
        if let Some(x1) = start {
            hline(x1, y, bounds.right());
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn test_line_endpoints_and_length() {
        let pts = line_points(Position::new(0, 0), Position::new(5, 2));
        assert_eq!(pts.first(), Some(&Position::new(0, 0)));
        assert_eq!(pts.last(), Some(&Position::new(5, 2)));
        assert_eq!(pts.len(), 6);
        assert_eq!(line_points(Position::new(3, 3), Position::new(3, 3)), vec![Position::new(3, 3)]);
    }

    #[test]
    fn test_line_is_reversible() {
        for end in [(7, 3), (4, 1), (1, 4), (-5, 2), (3, -7)] {
            let end = Position::new(end.0, end.1);
            let forward = line_points(Position::new(0, 0), end);
            let mut backward = line_points(end, Position::new(0, 0));
            let a: HashSet<_> = forward.iter().copied().collect();
            let b: HashSet<_> = backward.iter().copied().collect();
            assert_eq!(a, b, "line to {end}");

            backward.reverse();
            assert_eq!(forward, backward);
            assert_eq!(forward[0], Position::new(0, 0));
        }
    }

    #[test]
    fn test_ellipse_touches_bounding_box() {
        let pts: HashSet<_> = ellipse_points(0, 0, 10, 6).into_iter().collect();
        assert_eq!(pts.iter().map(|p| p.x).min(), Some(0));
        assert_eq!(pts.iter().map(|p| p.x).max(), Some(10));
        assert_eq!(pts.iter().map(|p| p.y).min(), Some(0));
        assert_eq!(pts.iter().map(|p| p.y).max(), Some(6));
        assert!(!pts.contains(&Position::new(0, 0)));
        assert!(pts.contains(&Position::new(5, 0)));
    }

    #[test]
    fn test_ellipse_fill_covers_center() {
        let spans = ellipse_fill_spans(0, 0, 8, 8);
        assert_eq!(spans.len(), 9);
        assert!(spans.iter().any(|&(y, x1, x2)| y == 4 && x1 == 0 && x2 == 8));
    }

    #[test]
    fn test_bezier_hits_endpoints() {
        let p = [Position::new(0, 0), Position::new(0, 10), Position::new(10, 10), Position::new(10, 0)];
        let pts = bezier_points(p);
        assert_eq!(pts.first(), Some(&Position::new(0, 0)));
        assert_eq!(pts.last(), Some(&Position::new(10, 0)));
    }

    #[test]
    fn test_polygon_spans_of_square() {
        let square = [Position::new(0, 0), Position::new(4, 0), Position::new(4, 4), Position::new(0, 4)];
        let spans = polygon_spans(&square);
        assert_eq!(spans, vec![(0, 0, 4), (1, 0, 4), (2, 0, 4), (3, 0, 4)]);
        assert!(polygon_spans(&square[..2]).is_empty());
    }

    #[test]
    fn test_flood_fill_stays_in_region() {
        // 5x5 with a vertical wall at x == 2
        let wall = |x: i32, _y: i32| x != 2;
        let mut filled = HashSet::new();
        flood_fill(Rectangle::from(0, 0, 5, 5), Position::new(0, 0), wall, |x1, y, x2| {
            for x in x1..=x2 {
                assert!(filled.insert((x, y)));
            }
        });
        assert_eq!(filled.len(), 10);
        assert!(filled.iter().all(|&(x, _)| x < 2));
    }

    #[test]
    fn test_replace_matching_is_not_contiguous() {
        let mut count = 0;
        replace_matching(Rectangle::from(0, 0, 5, 1), |x, _| x != 2, |x1, _, x2| count += x2 - x1 + 1);
        assert_eq!(count, 4);
    }
}
