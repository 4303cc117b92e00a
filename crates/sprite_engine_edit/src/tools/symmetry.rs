use sprite_engine::Position;

use super::{SymmetryMode, SymmetryPreferences};

/// Mirror configuration frozen at gesture start.
///
/// A point `p` is reflected to `2 * axis - p + adjust`, where `adjust` is 1
/// for even sized brushes. An even brush centered at `c` covers `c - size/2
/// ..= c + size/2 - 1`, so the shifted center makes the mirrored stamp cover
/// exactly the reflected pixels.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Symmetry {
    mode: SymmetryMode,
    x_axis: i32,
    y_axis: i32,
    adjust_x: i32,
    adjust_y: i32,
}

impl Symmetry {
    /// `brush_width`/`brush_height` are the stamp size of the point shape
    /// (1 for single pixels).
    pub fn new(prefs: &SymmetryPreferences, brush_width: i32, brush_height: i32) -> Self {
        Self {
            mode: prefs.mode,
            x_axis: prefs.x_axis,
            y_axis: prefs.y_axis,
            adjust_x: i32::from(brush_width % 2 == 0),
            adjust_y: i32::from(brush_height % 2 == 0),
        }
    }

    pub fn mode(&self) -> SymmetryMode {
        self.mode
    }

    pub fn mirror_x(&self, x: i32) -> i32 {
        2 * self.x_axis - x + self.adjust_x
    }

    pub fn mirror_y(&self, y: i32) -> i32 {
        2 * self.y_axis - y + self.adjust_y
    }

    /// The point itself followed by its distinct mirror images.
    pub fn points(&self, x: i32, y: i32) -> Vec<Position> {
        let mut result = vec![Position::new(x, y)];
        let mut push = |p: Position| {
            if !result.contains(&p) {
                result.push(p);
            }
        };
        match self.mode {
            SymmetryMode::None => {}
            SymmetryMode::Horizontal => push(Position::new(self.mirror_x(x), y)),
            SymmetryMode::Vertical => push(Position::new(x, self.mirror_y(y))),
            SymmetryMode::Both => {
                push(Position::new(self.mirror_x(x), y));
                push(Position::new(x, self.mirror_y(y)));
                push(Position::new(self.mirror_x(x), self.mirror_y(y)));
            }
        }
        result
    }

    /// The row `x1..=x2` at `y` followed by its distinct mirror images,
    /// each normalized so `x1 <= x2`.
    pub fn hlines(&self, x1: i32, y: i32, x2: i32) -> Vec<(i32, i32, i32)> {
        let mut result = vec![(x1.min(x2), y, x1.max(x2))];
        let mx = |x1: i32, x2: i32| {
            let (a, b) = (self.mirror_x(x1), self.mirror_x(x2));
            (a.min(b), a.max(b))
        };
        let mut push = |h: (i32, i32, i32)| {
            if !result.contains(&h) {
                result.push(h);
            }
        };
        match self.mode {
            SymmetryMode::None => {}
            SymmetryMode::Horizontal => {
                let (a, b) = mx(x1, x2);
                push((a, y, b));
            }
            SymmetryMode::Vertical => push((x1.min(x2), self.mirror_y(y), x1.max(x2))),
            SymmetryMode::Both => {
                let (a, b) = mx(x1, x2);
                push((a, y, b));
                push((x1.min(x2), self.mirror_y(y), x1.max(x2)));
                push((a, self.mirror_y(y), b));
            }
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn prefs(mode: SymmetryMode) -> SymmetryPreferences {
        SymmetryPreferences { mode, x_axis: 50, y_axis: 20 }
    }

    #[test]
    fn test_horizontal_mirror() {
        let sym = Symmetry::new(&prefs(SymmetryMode::Horizontal), 1, 1);
        assert_eq!(sym.points(40, 10), vec![Position::new(40, 10), Position::new(60, 10)]);
        assert_eq!(sym.points(50, 10), vec![Position::new(50, 10)]);
    }

    #[test]
    fn test_even_brush_shifts_center() {
        let sym = Symmetry::new(&prefs(SymmetryMode::Horizontal), 2, 2);
        // stamp at 40 covers 39..=40, mirror covers 60..=61
        assert_eq!(sym.mirror_x(40), 61);
    }

    #[test]
    fn test_both_writes_four_points() {
        let sym = Symmetry::new(&prefs(SymmetryMode::Both), 1, 1);
        let pts = sym.points(40, 10);
        assert_eq!(pts.len(), 4);
        assert!(pts.contains(&Position::new(60, 30)));
    }

    #[test]
    fn test_mirrored_hline_is_normalized() {
        let sym = Symmetry::new(&prefs(SymmetryMode::Horizontal), 1, 1);
        assert_eq!(sym.hlines(40, 3, 45), vec![(40, 3, 45), (55, 3, 60)]);
    }
}
