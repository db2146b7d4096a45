//! Grid model: spacing, snapping and visible line enumeration.

use crate::error::{GridError, GridResult};
use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};

/// Default distance between adjacent grid lines, in world units.
pub const DEFAULT_GRID_SPACING: f64 = 100.0;

/// Default number of grid steps between major lines.
pub const DEFAULT_MAJOR_INTERVAL: u32 = 5;

/// Default tolerance for [`GridModel::is_on_grid`].
pub const DEFAULT_GRID_TOLERANCE: f64 = 0.1;

/// Most lines [`GridModel::grid_lines_in_bounds`] produces on one axis.
pub const MAX_LINES_PER_AXIS: i64 = 100_000;

/// Snap a point to the nearest multiple of `grid_size` on both axes.
pub fn snap_to_grid(point: Point, grid_size: f64) -> Point {
    Point::new(
        (point.x / grid_size).round() * grid_size,
        (point.y / grid_size).round() * grid_size,
    )
}

/// World positions of the grid lines crossing a rectangle.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GridLines {
    /// X coordinates of vertical lines, ascending.
    pub vertical: Vec<f64>,
    /// Y coordinates of horizontal lines, ascending.
    pub horizontal: Vec<f64>,
}

impl GridLines {
    /// Total number of lines on both axes.
    pub fn len(&self) -> usize {
        self.vertical.len() + self.horizontal.len()
    }

    /// Whether no lines were produced.
    pub fn is_empty(&self) -> bool {
        self.vertical.is_empty() && self.horizontal.is_empty()
    }
}

/// Regular square grid with periodic major lines.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridModel {
    spacing: f64,
    major_interval: u32,
}

impl Default for GridModel {
    fn default() -> Self {
        Self::new(DEFAULT_GRID_SPACING, DEFAULT_MAJOR_INTERVAL)
    }
}

impl GridModel {
    /// Create a grid model.
    ///
    /// Values are not validated here; operations that would divide by zero or
    /// loop forever report [`GridError::InvalidConfiguration`] instead.
    pub fn new(spacing: f64, major_interval: u32) -> Self {
        Self {
            spacing,
            major_interval,
        }
    }

    pub fn spacing(&self) -> f64 {
        self.spacing
    }

    pub fn set_spacing(&mut self, spacing: f64) {
        self.spacing = spacing;
    }

    pub fn major_interval(&self) -> u32 {
        self.major_interval
    }

    pub fn set_major_interval(&mut self, major_interval: u32) {
        self.major_interval = major_interval;
    }

    /// Check that spacing is positive and finite and the major interval is non-zero.
    pub fn validate(&self) -> GridResult<()> {
        self.check_spacing()?;
        self.check_major_interval()
    }

    fn check_spacing(&self) -> GridResult<()> {
        if self.spacing.is_finite() && self.spacing > 0.0 {
            Ok(())
        } else {
            Err(GridError::InvalidConfiguration(format!(
                "grid spacing must be a positive finite number, got {}",
                self.spacing
            )))
        }
    }

    fn check_major_interval(&self) -> GridResult<()> {
        if self.major_interval == 0 {
            Err(GridError::InvalidConfiguration(
                "major interval must be at least 1".to_string(),
            ))
        } else {
            Ok(())
        }
    }

    /// Snap a point to the nearest grid intersection.
    pub fn snap(&self, point: Point) -> Point {
        snap_to_grid(point, self.spacing)
    }

    /// Same as [`GridModel::snap`].
    pub fn nearest_grid_point(&self, point: Point) -> Point {
        self.snap(point)
    }

    /// Whether both coordinates are strictly within `tolerance` of the nearest
    /// grid intersection.
    pub fn is_on_grid(&self, point: Point, tolerance: f64) -> bool {
        let snapped = self.snap(point);
        (point.x - snapped.x).abs() < tolerance && (point.y - snapped.y).abs() < tolerance
    }

    /// Index of the grid line nearest to a world coordinate.
    pub fn line_index(&self, coordinate: f64) -> GridResult<i64> {
        self.check_spacing()?;
        Ok((coordinate / self.spacing).round() as i64)
    }

    /// Whether the line at a world coordinate is a major line.
    pub fn is_major(&self, coordinate: f64) -> GridResult<bool> {
        self.check_major_interval()?;
        let index = self.line_index(coordinate)?;
        Ok(index.rem_euclid(i64::from(self.major_interval)) == 0)
    }

    /// Enumerate the grid lines crossing `bounds`, end points inclusive.
    ///
    /// The range is widened outward to whole grid steps, so a rectangle from
    /// 0 to 250 with spacing 100 yields 0, 100, 200 and 300.
    pub fn grid_lines_in_bounds(&self, bounds: Rect) -> GridResult<GridLines> {
        self.check_spacing()?;

        let finite = bounds.x0.is_finite()
            && bounds.y0.is_finite()
            && bounds.x1.is_finite()
            && bounds.y1.is_finite();
        if !finite {
            log::warn!("grid bounds are not finite: {:?}", bounds);
            return Ok(GridLines::default());
        }
        let bounds = bounds.abs();

        match (self.axis_lines(bounds.x0, bounds.x1), self.axis_lines(bounds.y0, bounds.y1)) {
            (Some(vertical), Some(horizontal)) => Ok(GridLines { vertical, horizontal }),
            _ => {
                log::warn!(
                    "spacing {} yields more than {} lines per axis over {:?}",
                    self.spacing,
                    MAX_LINES_PER_AXIS,
                    bounds
                );
                Ok(GridLines::default())
            }
        }
    }

    /// Lines on one axis, or `None` when the count exceeds [`MAX_LINES_PER_AXIS`].
    fn axis_lines(&self, start: f64, end: f64) -> Option<Vec<f64>> {
        let first = (start / self.spacing).floor();
        let last = (end / self.spacing).ceil();
        // Checked in floating point, before the casts can saturate.
        if !(last - first < MAX_LINES_PER_AXIS as f64) {
            return None;
        }
        let (first, last) = (first as i64, last as i64);
        let count = last.checked_sub(first)?.checked_add(1)?;
        if count > MAX_LINES_PER_AXIS {
            return None;
        }
        Some((first..=last).map(|index| index as f64 * self.spacing).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let grid = GridModel::default();
        assert!((grid.spacing() - 100.0).abs() < f64::EPSILON);
        assert_eq!(grid.major_interval(), 5);
        assert!(grid.validate().is_ok());
    }

    #[test]
    fn test_snap_to_grid_exact() {
        let grid = GridModel::new(20.0, 5);
        assert_eq!(grid.snap(Point::new(40.0, 60.0)), Point::new(40.0, 60.0));
    }

    #[test]
    fn test_snap_to_grid_round() {
        let grid = GridModel::new(20.0, 5);
        assert_eq!(grid.snap(Point::new(31.0, 49.0)), Point::new(40.0, 40.0));
        assert_eq!(grid.snap(Point::new(-31.0, -9.0)), Point::new(-40.0, -0.0));
    }

    #[test]
    fn test_snap_ties_away_from_zero() {
        let grid = GridModel::new(100.0, 5);
        assert_eq!(grid.snap(Point::new(50.0, -50.0)), Point::new(100.0, -100.0));
    }

    #[test]
    fn test_snap_idempotent() {
        let grid = GridModel::new(25.0, 4);
        let points = [
            Point::new(0.0, 0.0),
            Point::new(12.4, -12.6),
            Point::new(1234.5, 987.25),
            Point::new(-0.001, 99999.9),
        ];
        for p in points {
            let once = grid.snap(p);
            assert_eq!(grid.snap(once), once);
        }
    }

    #[test]
    fn test_nearest_grid_point_matches_snap() {
        let grid = GridModel::default();
        let p = Point::new(149.0, 251.0);
        assert_eq!(grid.nearest_grid_point(p), grid.snap(p));
    }

    #[test]
    fn test_is_on_grid_boundary() {
        let grid = GridModel::default();
        assert!(grid.is_on_grid(Point::new(200.0, -300.0), DEFAULT_GRID_TOLERANCE));
        assert!(grid.is_on_grid(Point::new(200.05, 299.95), DEFAULT_GRID_TOLERANCE));
        assert!(!grid.is_on_grid(Point::new(0.1, 0.0), DEFAULT_GRID_TOLERANCE));
        assert!(!grid.is_on_grid(Point::new(0.0, 0.1), DEFAULT_GRID_TOLERANCE));
    }

    #[test]
    fn test_grid_lines_in_bounds() {
        let grid = GridModel::default();
        let lines = grid
            .grid_lines_in_bounds(Rect::new(0.0, 0.0, 250.0, 250.0))
            .unwrap();
        assert_eq!(lines.vertical, vec![0.0, 100.0, 200.0, 300.0]);
        assert_eq!(lines.horizontal, vec![0.0, 100.0, 200.0, 300.0]);
        assert_eq!(lines.len(), 8);
    }

    #[test]
    fn test_grid_lines_negative_bounds() {
        let grid = GridModel::new(10.0, 5);
        let lines = grid
            .grid_lines_in_bounds(Rect::new(-25.0, -5.0, 5.0, 12.0))
            .unwrap();
        assert_eq!(lines.vertical, vec![-30.0, -20.0, -10.0, 0.0, 10.0]);
        assert_eq!(lines.horizontal, vec![-10.0, 0.0, 10.0, 20.0]);
    }

    #[test]
    fn test_grid_lines_zero_area() {
        let grid = GridModel::default();
        let lines = grid
            .grid_lines_in_bounds(Rect::new(100.0, 100.0, 100.0, 100.0))
            .unwrap();
        assert_eq!(lines.vertical, vec![100.0]);
        assert_eq!(lines.horizontal, vec![100.0]);
    }

    #[test]
    fn test_grid_lines_non_finite_bounds() {
        let grid = GridModel::default();
        let lines = grid
            .grid_lines_in_bounds(Rect::new(0.0, 0.0, f64::INFINITY, 10.0))
            .unwrap();
        assert!(lines.is_empty());
    }

    #[test]
    fn test_zero_spacing_is_rejected() {
        let grid = GridModel::new(0.0, 5);
        let result = grid.grid_lines_in_bounds(Rect::new(0.0, 0.0, 250.0, 250.0));
        assert!(matches!(result, Err(GridError::InvalidConfiguration(_))));
    }

    #[test]
    fn test_negative_and_nan_spacing_rejected() {
        assert!(GridModel::new(-10.0, 5).validate().is_err());
        assert!(GridModel::new(f64::NAN, 5)
            .grid_lines_in_bounds(Rect::new(0.0, 0.0, 1.0, 1.0))
            .is_err());
    }

    #[test]
    fn test_major_classification() {
        let grid = GridModel::default();
        assert!(grid.is_major(500.0).unwrap());
        assert!(!grid.is_major(400.0).unwrap());
        assert!(grid.is_major(0.0).unwrap());
        assert!(grid.is_major(-500.0).unwrap());
        assert!(!grid.is_major(-100.0).unwrap());
        assert_eq!(grid.line_index(500.0).unwrap(), 5);
    }

    #[test]
    fn test_zero_major_interval_rejected() {
        let grid = GridModel::new(100.0, 0);
        assert!(matches!(
            grid.is_major(500.0),
            Err(GridError::InvalidConfiguration(_))
        ));
        assert!(grid.validate().is_err());
    }

    #[test]
    fn test_setters() {
        let mut grid = GridModel::default();
        grid.set_spacing(20.0);
        grid.set_major_interval(10);
        assert!((grid.spacing() - 20.0).abs() < f64::EPSILON);
        assert_eq!(grid.major_interval(), 10);
        assert!(grid.is_major(200.0).unwrap());
    }

    #[test]
    fn test_free_snap_to_grid() {
        assert_eq!(snap_to_grid(Point::new(31.0, 51.0), 20.0), Point::new(40.0, 60.0));
    }

    #[test]
    fn test_tiny_spacing_yields_no_lines() {
        let grid = GridModel::new(1e-300, 5);
        assert!(grid.validate().is_ok());
        let lines = grid.grid_lines_in_bounds(Rect::new(0.0, 0.0, 800.0, 600.0)).unwrap();
        assert!(lines.is_empty());
    }

    #[test]
    fn test_line_count_is_capped() {
        let grid = GridModel::new(1e-6, 5);
        let lines = grid.grid_lines_in_bounds(Rect::new(0.0, 0.0, 800.0, 600.0)).unwrap();
        assert!(lines.is_empty());

        // Just under the cap still enumerates.
        let grid = GridModel::new(1.0, 5);
        let extent = (MAX_LINES_PER_AXIS - 2) as f64;
        let lines = grid.grid_lines_in_bounds(Rect::new(0.0, 0.0, extent, 10.0)).unwrap();
        assert_eq!(lines.vertical.len() as i64, MAX_LINES_PER_AXIS - 1);
        assert_eq!(lines.horizontal.len(), 11);
    }
}
