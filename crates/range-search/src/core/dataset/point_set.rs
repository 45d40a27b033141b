//! A `PointSet` is a dataset of fixed-length `f64` vectors stored as a flat vector.

use serde::{Deserialize, Serialize};

use crate::{metric::Metric, RangeSearchError};

/// A `PointSet` is a dataset of points in `R^d` stored as a flat, row-major
/// vector of coordinates.
///
/// Points are identified by their position in the set. The set is immutable
/// once built; trees that need a different order hold their own permuted copy.
///
/// # Example
///
/// ```rust
/// use range_search::PointSet;
///
/// let data = PointSet::from_rows(vec![vec![1.0, 2.0], vec![3.0, 4.0], vec![5.0, 6.0]]).unwrap();
/// assert_eq!(data.cardinality(), 3);
/// assert_eq!(data.dimensionality(), 2);
/// assert_eq!(data.get(1), &[3.0, 4.0]);
///
/// // Every row must have the same length.
/// assert!(PointSet::from_rows(vec![vec![1.0, 2.0], vec![3.0]]).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointSet {
    /// The number of coordinates of every point.
    dimensionality: usize,
    /// The coordinates of all points, one point after another.
    coordinates: Vec<f64>,
}

impl PointSet {
    /// Creates a new `PointSet` from a flat, row-major vector of coordinates.
    ///
    /// # Errors
    ///
    /// * `EmptyInput` if there are no coordinates or `dimensionality` is zero.
    /// * `DimensionMismatch` if the number of coordinates is not a multiple
    ///   of `dimensionality`.
    /// * `NonFiniteCoordinate` if any coordinate is NaN or infinite.
    pub fn from_flat(dimensionality: usize, coordinates: Vec<f64>) -> Result<Self, RangeSearchError> {
        if dimensionality == 0 {
            return Err(RangeSearchError::EmptyInput("points have no coordinates".to_string()));
        }
        if coordinates.is_empty() {
            return Err(RangeSearchError::EmptyInput("the point set has no points".to_string()));
        }
        let remainder = coordinates.len() % dimensionality;
        if remainder != 0 {
            return Err(RangeSearchError::DimensionMismatch {
                expected: dimensionality,
                found: remainder,
            });
        }
        if let Some(i) = coordinates.iter().position(|x| !x.is_finite()) {
            return Err(RangeSearchError::NonFiniteCoordinate {
                point: i / dimensionality,
                dimension: i % dimensionality,
            });
        }
        Ok(Self {
            dimensionality,
            coordinates,
        })
    }

    /// Creates a new `PointSet` where each row is a point.
    ///
    /// # Errors
    ///
    /// * `EmptyInput` if there are no rows or the rows are empty.
    /// * `DimensionMismatch` if the rows do not all have the same length.
    /// * `NonFiniteCoordinate` if any coordinate is NaN or infinite.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self, RangeSearchError> {
        let dimensionality = rows
            .first()
            .map(Vec::len)
            .ok_or_else(|| RangeSearchError::EmptyInput("the point set has no points".to_string()))?;

        if let Some(row) = rows.iter().find(|r| r.len() != dimensionality) {
            return Err(RangeSearchError::DimensionMismatch {
                expected: dimensionality,
                found: row.len(),
            });
        }

        Self::from_flat(dimensionality, rows.into_iter().flatten().collect())
    }

    /// Creates a new `PointSet` from a matrix in which each row is a dimension
    /// and each column is a point.
    ///
    /// This is the layout of column-major numeric libraries, where a `d x n`
    /// matrix holds `n` points.
    ///
    /// # Errors
    ///
    /// See [`PointSet::from_rows`].
    pub fn from_columns(dimensions: &[Vec<f64>]) -> Result<Self, RangeSearchError> {
        let cardinality = dimensions
            .first()
            .map(Vec::len)
            .ok_or_else(|| RangeSearchError::EmptyInput("points have no coordinates".to_string()))?;

        if let Some(dim) = dimensions.iter().find(|d| d.len() != cardinality) {
            return Err(RangeSearchError::DimensionMismatch {
                expected: cardinality,
                found: dim.len(),
            });
        }

        let rows = (0..cardinality)
            .map(|i| dimensions.iter().map(|d| d[i]).collect())
            .collect();
        Self::from_rows(rows)
    }

    /// The number of points in the set.
    #[must_use]
    pub fn cardinality(&self) -> usize {
        self.coordinates.len() / self.dimensionality
    }

    /// The number of coordinates of each point.
    #[must_use]
    pub const fn dimensionality(&self) -> usize {
        self.dimensionality
    }

    /// The coordinates of the point at `index`.
    ///
    /// # Panics
    ///
    /// If `index` is out of bounds.
    #[must_use]
    pub fn get(&self, index: usize) -> &[f64] {
        let start = index * self.dimensionality;
        &self.coordinates[start..(start + self.dimensionality)]
    }

    /// Iterates over the points in order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = &[f64]> + '_ {
        self.coordinates.chunks_exact(self.dimensionality)
    }

    /// Copies the points out as one `Vec` per point.
    #[must_use]
    pub fn to_rows(&self) -> Vec<Vec<f64>> {
        self.iter().map(<[f64]>::to_vec).collect()
    }

    /// The flat, row-major coordinate buffer.
    #[must_use]
    pub fn as_flat(&self) -> &[f64] {
        &self.coordinates
    }

    /// Mutable access to the coordinates, for tampering with a built tree.
    #[cfg(test)]
    pub(crate) fn as_flat_mut(&mut self) -> &mut [f64] {
        &mut self.coordinates
    }

    /// Checks that points of this set can be compared with points of
    /// dimensionality `expected`.
    ///
    /// # Errors
    ///
    /// * `DimensionMismatch` if the dimensionalities differ.
    pub const fn check_dimensionality(&self, expected: usize) -> Result<(), RangeSearchError> {
        if self.dimensionality == expected {
            Ok(())
        } else {
            Err(RangeSearchError::DimensionMismatch {
                expected,
                found: self.dimensionality,
            })
        }
    }

    /// Returns a copy whose `i`-th point is the `permutation[i]`-th point of
    /// this set.
    #[must_use]
    pub fn permuted(&self, permutation: &[usize]) -> Self {
        let coordinates = permutation.iter().flat_map(|&i| self.get(i).iter().copied()).collect();
        Self {
            dimensionality: self.dimensionality,
            coordinates,
        }
    }

    /// The coordinate-wise mean of the points at `indices`.
    #[must_use]
    pub fn centroid(&self, indices: &[usize]) -> Vec<f64> {
        let mut sums = vec![0.0; self.dimensionality];
        for &i in indices {
            for (s, &x) in sums.iter_mut().zip(self.get(i)) {
                *s += x;
            }
        }
        #[allow(clippy::cast_precision_loss)]
        let n = indices.len() as f64;
        sums.into_iter().map(|s| s / n).collect()
    }

    /// Distances from `query` to each of the points at `indices`.
    pub fn query_to_many<'a, M: Metric>(
        &'a self,
        metric: &'a M,
        query: &'a [f64],
        indices: &'a [usize],
    ) -> impl Iterator<Item = (usize, f64)> + 'a {
        indices.iter().map(move |&i| (i, metric.distance(query, self.get(i))))
    }
}
