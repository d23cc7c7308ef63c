use serde::{Deserialize, Serialize};

use crate::{FitErr, Result};

/// A single observation in the shared 2-D coordinate space.
///
/// The solver never flips axes, so `y` may be either math-up or screen-down
/// depending on what the point provider chose.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "(f64, f64)", into = "(f64, f64)")]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    /// Returns a new `Point`.
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

impl From<Point> for (f64, f64) {
    fn from(point: Point) -> Self {
        (point.x, point.y)
    }
}

/// The points a fitting run works against.
///
/// The ordering is kept so a renderer can correlate rows with what it drew,
/// but no computation depends on it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PointSet {
    points: Vec<Point>,
}

impl PointSet {
    /// Returns a new `PointSet`.
    ///
    /// # Arguments
    /// * `points` - The observations, in display order.
    pub fn new(points: Vec<Point>) -> Self {
        Self { points }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Point> {
        self.points.iter()
    }

    pub fn as_slice(&self) -> &[Point] {
        &self.points
    }

    /// Fails with `FitErr::InvalidInput` when there is nothing to fit.
    pub fn ensure_non_empty(&self) -> Result<()> {
        if self.points.is_empty() {
            return Err(FitErr::InvalidInput("the point set is empty"));
        }

        Ok(())
    }
}

impl<P: Into<Point>> FromIterator<P> for PointSet {
    fn from_iter<I: IntoIterator<Item = P>>(iter: I) -> Self {
        Self::new(iter.into_iter().map(Into::into).collect())
    }
}

impl<'a> IntoIterator for &'a PointSet {
    type Item = &'a Point;
    type IntoIter = std::slice::Iter<'a, Point>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collects_from_pairs_keeping_order() {
        let points: PointSet = [(3.0, 1.0), (1.0, 2.0)].into_iter().collect();

        assert_eq!(points.len(), 2);
        assert_eq!(points.as_slice()[0], Point::new(3.0, 1.0));
        assert_eq!(points.as_slice()[1], Point::new(1.0, 2.0));
    }

    #[test]
    fn empty_set_is_rejected() {
        let points = PointSet::default();
        assert!(matches!(
            points.ensure_non_empty(),
            Err(FitErr::InvalidInput(_))
        ));
    }

    #[test]
    fn deserializes_from_pair_arrays() {
        let points: PointSet = serde_json::from_str("[[0, 1], [2.5, -3]]").unwrap();
        assert_eq!(
            points,
            PointSet::new(vec![Point::new(0.0, 1.0), Point::new(2.5, -3.0)])
        );
    }
}
