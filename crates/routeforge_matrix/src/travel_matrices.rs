use fxhash::FxHashMap;

use crate::{
    coordinates::{CoordinateKey, Coordinates},
    error::MatrixError,
};

/// Largest value accepted in either matrix, one year in minutes.
pub const MAX_MATRIX_VALUE: f64 = 60.0 * 24.0 * 365.0;

/// Precomputed distance (km) and time (minutes) matrices.
///
/// Stored as flat vectors, the value for a pair of points is at
/// `from * num_points + to`. Points are matched by their coordinate rounded
/// to 6 decimals.
#[derive(Debug, Clone)]
pub struct TravelMatrices {
    distances_km: Vec<f64>,
    times_min: Vec<f64>,
    num_points: usize,
    point_index: FxHashMap<CoordinateKey, usize>,
}

fn validate_square(
    matrix: &'static str,
    values: &[Vec<f64>],
    num_points: usize,
) -> Result<(), MatrixError> {
    if values.len() != num_points {
        return Err(MatrixError::DimensionMismatch {
            matrix,
            expected: num_points,
            found: values.len(),
        });
    }

    for (row, columns) in values.iter().enumerate() {
        if columns.len() != num_points {
            return Err(MatrixError::RowDimensionMismatch {
                matrix,
                row,
                expected: num_points,
                found: columns.len(),
            });
        }

        if let Some(column) = columns.iter().position(|value| !value.is_finite()) {
            return Err(MatrixError::NonFiniteValue {
                matrix,
                row,
                column,
            });
        }

        if let Some((column, &value)) = columns
            .iter()
            .enumerate()
            .find(|&(_, &value)| !(0.0..=MAX_MATRIX_VALUE).contains(&value))
        {
            return Err(MatrixError::OutOfRange {
                matrix,
                row,
                column,
                value,
                max: MAX_MATRIX_VALUE,
            });
        }
    }

    Ok(())
}

impl TravelMatrices {
    pub fn new(
        distances_km: Vec<Vec<f64>>,
        times_min: Vec<Vec<f64>>,
        points: &[Coordinates],
    ) -> Result<Self, MatrixError> {
        let num_points = points.len();

        validate_square("distance", &distances_km, num_points)?;
        validate_square("time", &times_min, num_points)?;

        // First occurrence wins when two points round to the same key
        let mut point_index = FxHashMap::default();
        for (index, point) in points.iter().enumerate() {
            point_index.entry(point.key()).or_insert(index);
        }

        Ok(TravelMatrices {
            distances_km: distances_km.into_iter().flatten().collect(),
            times_min: times_min.into_iter().flatten().collect(),
            num_points,
            point_index,
        })
    }

    #[inline(always)]
    fn index(&self, from: usize, to: usize) -> usize {
        from * self.num_points + to
    }

    pub fn num_points(&self) -> usize {
        self.num_points
    }

    pub fn point_index(&self, point: &Coordinates) -> Option<usize> {
        self.point_index.get(&point.key()).copied()
    }

    /// Returns `(distance_km, time_min)` when both points are part of the matrices.
    pub fn lookup(&self, from: &Coordinates, to: &Coordinates) -> Option<(f64, f64)> {
        let from = self.point_index(from)?;
        let to = self.point_index(to)?;
        let index = self.index(from, to);

        Some((self.distances_km[index], self.times_min[index]))
    }
}
