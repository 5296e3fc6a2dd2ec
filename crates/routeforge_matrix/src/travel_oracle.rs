use jiff::SignedDuration;
use tracing::debug;

use crate::{
    coordinates::Coordinates,
    error::MatrixError,
    haversine::{estimated_time_min, haversine_km},
    travel_matrices::TravelMatrices,
};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Travel {
    pub distance_km: f64,
    pub time_min: f64,
}

impl Travel {
    pub const ZERO: Travel = Travel {
        distance_km: 0.0,
        time_min: 0.0,
    };

    /// Saturates at `SignedDuration::MAX` when the time does not fit.
    pub fn duration(&self) -> SignedDuration {
        SignedDuration::try_from_secs_f64(self.time_min * 60.0).unwrap_or(SignedDuration::MAX)
    }
}

/// Resolves travel distance and time between two coordinates.
///
/// Uses the haversine distance by default, `time = distance * 2 * traffic_factor`.
/// When matrices are provided they take precedence, lookups that miss fall
/// back to haversine.
#[derive(Debug, Clone)]
pub struct TravelOracle {
    traffic_factor: f64,
    matrices: Option<TravelMatrices>,
}

impl TravelOracle {
    pub fn new(traffic_factor: f64) -> Self {
        TravelOracle {
            traffic_factor,
            matrices: None,
        }
    }

    pub fn traffic_factor(&self) -> f64 {
        self.traffic_factor
    }

    pub fn has_matrices(&self) -> bool {
        self.matrices.is_some()
    }

    pub fn matrices(&self) -> Option<&TravelMatrices> {
        self.matrices.as_ref()
    }

    /// Replaces the precomputed matrices. On error the previous state is kept.
    pub fn use_matrices(
        &mut self,
        distances_km: Vec<Vec<f64>>,
        times_min: Vec<Vec<f64>>,
        points: &[Coordinates],
    ) -> Result<(), MatrixError> {
        let matrices = TravelMatrices::new(distances_km, times_min, points)?;
        debug!("Using precomputed matrices for {} points", points.len());
        self.matrices = Some(matrices);
        Ok(())
    }

    pub fn travel(&self, from: &Coordinates, to: &Coordinates) -> Travel {
        if let Some((distance_km, time_min)) = self
            .matrices
            .as_ref()
            .and_then(|matrices| matrices.lookup(from, to))
        {
            return Travel {
                distance_km,
                time_min,
            };
        }

        let distance_km = haversine_km(from, to);
        Travel {
            distance_km,
            time_min: estimated_time_min(distance_km, self.traffic_factor),
        }
    }
}

impl Default for TravelOracle {
    fn default() -> Self {
        TravelOracle::new(1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn points() -> Vec<Coordinates> {
        vec![
            Coordinates::new(50.0, 4.0),
            Coordinates::new(50.1, 4.1),
            Coordinates::new(50.2, 4.2),
        ]
    }

    #[test]
    fn test_haversine_default() {
        let oracle = TravelOracle::new(1.5);
        let points = points();
        let travel = oracle.travel(&points[0], &points[1]);

        assert_eq!(travel.distance_km, haversine_km(&points[0], &points[1]));
        assert_eq!(travel.time_min, travel.distance_km * 2.0 * 1.5);
    }

    #[test]
    fn test_matrix_lookup_with_rounding() {
        let mut oracle = TravelOracle::default();
        let points = points();
        oracle
            .use_matrices(vec![vec![7.0; 3]; 3], vec![vec![9.0; 3]; 3], &points)
            .unwrap();

        let nearly_first = Coordinates::new(50.000_000_2, 3.999_999_8);
        let travel = oracle.travel(&nearly_first, &points[2]);

        assert_eq!(
            travel,
            Travel {
                distance_km: 7.0,
                time_min: 9.0
            }
        );
    }

    #[test]
    fn test_lookup_miss_falls_back_to_haversine() {
        let mut oracle = TravelOracle::default();
        let points = points();
        oracle
            .use_matrices(vec![vec![7.0; 3]; 3], vec![vec![9.0; 3]; 3], &points)
            .unwrap();

        let outside = Coordinates::new(51.0, 5.0);
        let travel = oracle.travel(&points[0], &outside);

        assert_eq!(travel.distance_km, haversine_km(&points[0], &outside));
    }

    #[test]
    fn test_mismatch_keeps_previous_state() {
        let mut oracle = TravelOracle::default();
        let points = points();
        oracle
            .use_matrices(vec![vec![7.0; 3]; 3], vec![vec![9.0; 3]; 3], &points)
            .unwrap();

        let mut four_points = points.clone();
        four_points.push(Coordinates::new(50.3, 4.3));

        let result = oracle.use_matrices(
            vec![vec![1.0; 4]; 3],
            vec![vec![1.0; 4]; 4],
            &four_points,
        );

        assert!(matches!(
            result,
            Err(MatrixError::DimensionMismatch {
                expected: 4,
                found: 3,
                ..
            })
        ));
        assert_eq!(oracle.matrices().unwrap().num_points(), 3);
        assert_eq!(oracle.travel(&points[0], &points[1]).distance_km, 7.0);
    }

    #[test]
    fn test_mismatch_on_empty_oracle() {
        let mut oracle = TravelOracle::default();
        let result = oracle.use_matrices(vec![vec![1.0; 4]; 3], vec![vec![1.0; 4]; 4], &{
            let mut points = points();
            points.push(Coordinates::new(50.3, 4.3));
            points
        });

        assert!(result.is_err());
        assert!(!oracle.has_matrices());
    }

    #[test]
    fn test_duration() {
        let travel = Travel {
            distance_km: 1.0,
            time_min: 1.5,
        };
        assert_eq!(travel.duration(), SignedDuration::from_secs(90));
    }

    #[test]
    fn test_duration_saturates() {
        let travel = Travel {
            distance_km: 1.0,
            time_min: f64::INFINITY,
        };
        assert_eq!(travel.duration(), SignedDuration::MAX);
    }
}
