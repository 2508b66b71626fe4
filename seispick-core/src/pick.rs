//! Picked dispersion points.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// One picked `(frequency, slowness)` point.
///
/// The `d*` fields are auxiliary columns of the pick-file format; they are
/// carried through unchanged. Points have no id: two points are the same
/// pick when their frequency and slowness compare exactly equal.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PickPoint {
    pub d1: f64,
    pub d2: f64,
    pub frequency: f64,
    pub d3: f64,
    pub slowness: f64,
    pub d4: f64,
    pub d5: f64,
}

impl PickPoint {
    /// A point with zeroed auxiliary fields.
    pub fn new(frequency: f64, slowness: f64) -> Self {
        Self {
            frequency,
            slowness,
            ..Self::default()
        }
    }

    /// Builds a point from the seven file columns
    /// `d1 d2 frequency d3 slowness d4 d5`.
    pub fn from_fields(fields: [f64; 7]) -> Self {
        let [d1, d2, frequency, d3, slowness, d4, d5] = fields;
        Self {
            d1,
            d2,
            frequency,
            d3,
            slowness,
            d4,
            d5,
        }
    }

    /// The seven file columns in order.
    pub fn fields(&self) -> [f64; 7] {
        [
            self.d1,
            self.d2,
            self.frequency,
            self.d3,
            self.slowness,
            self.d4,
            self.d5,
        ]
    }

    /// Value identity: exact frequency and slowness match.
    #[allow(clippy::float_cmp)]
    pub fn same_location(&self, other: &PickPoint) -> bool {
        self.frequency == other.frequency && self.slowness == other.slowness
    }

    /// Hover/drag label.
    pub fn label(&self) -> String {
        format!("(Slow:{:.6}, Freq:{:.6})", self.slowness, self.frequency)
    }
}

/// Ordered collection of picks.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct PickSet {
    points: Vec<PickPoint>,
}

impl PickSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a point.
    pub fn add(&mut self, point: PickPoint) {
        self.points.push(point);
    }

    /// Removes every point at the same location as `point`.
    ///
    /// Returns how many were removed.
    pub fn remove_matching(&mut self, point: &PickPoint) -> usize {
        let before = self.points.len();
        self.points.retain(|p| !p.same_location(point));
        before - self.points.len()
    }

    /// Index of the first point at the same location as `point`.
    pub fn position(&self, point: &PickPoint) -> Option<usize> {
        self.points.iter().position(|p| p.same_location(point))
    }

    /// Replaces the whole set.
    pub fn replace(&mut self, points: Vec<PickPoint>) {
        self.points = points;
    }

    /// Appends `points` after the existing ones.
    pub fn merge(&mut self, points: impl IntoIterator<Item = PickPoint>) {
        self.points.extend(points);
    }

    pub fn clear(&mut self) {
        self.points.clear();
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&PickPoint> {
        self.points.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &PickPoint> {
        self.points.iter()
    }

    pub fn as_slice(&self) -> &[PickPoint] {
        &self.points
    }

    pub fn to_vec(&self) -> Vec<PickPoint> {
        self.points.clone()
    }
}

impl From<Vec<PickPoint>> for PickSet {
    fn from(points: Vec<PickPoint>) -> Self {
        Self { points }
    }
}

impl FromIterator<PickPoint> for PickSet {
    fn from_iter<I: IntoIterator<Item = PickPoint>>(iter: I) -> Self {
        Self {
            points: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a PickSet {
    type Item = &'a PickPoint;
    type IntoIter = std::slice::Iter<'a, PickPoint>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}
