use jiff::SignedDuration;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::OptimizerError;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct MutationWeights {
    pub swap: f64,
    pub insert: f64,
    pub route_exchange: f64,
}

impl Default for MutationWeights {
    fn default() -> Self {
        MutationWeights {
            swap: 1.0,
            insert: 1.0,
            route_exchange: 1.0,
        }
    }
}

/// Genetic algorithm parameters, every field can be overridden on its own.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct GaParams {
    pub population_size: usize,
    pub generations: usize,
    pub crossover_rate: f64,
    pub mutation_rate: f64,
    pub elite_size: usize,
    pub tournament_size: usize,

    /// Generations without improvement of the best solution before stopping
    pub stall_generations: usize,
    pub mutation_weights: MutationWeights,

    /// Fixed seed for reproducible runs, a random one is drawn when absent
    pub seed: Option<u64>,

    /// Wall-clock budget, checked between generations
    pub max_duration: Option<SignedDuration>,
}

impl Default for GaParams {
    fn default() -> Self {
        GaParams {
            population_size: 200,
            generations: 500,
            crossover_rate: 0.8,
            mutation_rate: 0.2,
            elite_size: 20,
            tournament_size: 5,
            stall_generations: 50,
            mutation_weights: MutationWeights::default(),
            seed: None,
            max_duration: None,
        }
    }
}

fn check_rate(name: &str, value: f64) -> Result<(), OptimizerError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(OptimizerError::InvalidParams(format!(
            "{name} must be within [0, 1], got {value}"
        )))
    }
}

impl GaParams {
    pub fn validate(&self) -> Result<(), OptimizerError> {
        if self.population_size == 0 {
            return Err(OptimizerError::InvalidParams(
                "population_size must be at least 1".to_owned(),
            ));
        }

        if self.tournament_size == 0 {
            return Err(OptimizerError::InvalidParams(
                "tournament_size must be at least 1".to_owned(),
            ));
        }

        if self.elite_size > self.population_size {
            return Err(OptimizerError::InvalidParams(format!(
                "elite_size ({}) cannot exceed population_size ({})",
                self.elite_size, self.population_size
            )));
        }

        check_rate("crossover_rate", self.crossover_rate)?;
        check_rate("mutation_rate", self.mutation_rate)?;

        let MutationWeights {
            swap,
            insert,
            route_exchange,
        } = self.mutation_weights;
        if [swap, insert, route_exchange]
            .iter()
            .any(|weight| !weight.is_finite() || *weight < 0.0)
        {
            return Err(OptimizerError::InvalidParams(
                "mutation weights must be finite and non-negative".to_owned(),
            ));
        }

        if swap + insert + route_exchange <= 0.0 {
            return Err(OptimizerError::InvalidParams(
                "at least one mutation weight must be positive".to_owned(),
            ));
        }

        if let Some(max_duration) = self.max_duration
            && max_duration.is_negative()
        {
            return Err(OptimizerError::InvalidParams(
                "max_duration cannot be negative".to_owned(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let params = GaParams::default();
        assert_eq!(params.population_size, 200);
        assert_eq!(params.generations, 500);
        assert_eq!(params.elite_size, 20);
        assert_eq!(params.tournament_size, 5);
        assert_eq!(params.stall_generations, 50);
        assert!(params.validate().is_ok());
    }

    #[test]
    fn test_partial_override() {
        let params: GaParams =
            serde_json::from_str(r#"{ "generations": 10, "mutation_weights": { "swap": 0.0 } }"#)
                .unwrap();

        assert_eq!(params.generations, 10);
        assert_eq!(params.population_size, 200);
        assert_eq!(params.mutation_weights.swap, 0.0);
        assert_eq!(params.mutation_weights.insert, 1.0);
    }

    #[test]
    fn test_max_duration_is_iso8601() {
        let params: GaParams = serde_json::from_str(r#"{ "max_duration": "PT30S" }"#).unwrap();
        assert_eq!(params.max_duration, Some(SignedDuration::from_secs(30)));
    }

    #[test]
    fn test_rejects_invalid_params() {
        let invalid = [
            GaParams {
                population_size: 0,
                elite_size: 0,
                ..GaParams::default()
            },
            GaParams {
                tournament_size: 0,
                ..GaParams::default()
            },
            GaParams {
                elite_size: 201,
                ..GaParams::default()
            },
            GaParams {
                crossover_rate: 1.5,
                ..GaParams::default()
            },
            GaParams {
                mutation_rate: f64::NAN,
                ..GaParams::default()
            },
            GaParams {
                mutation_weights: MutationWeights {
                    swap: 0.0,
                    insert: 0.0,
                    route_exchange: 0.0,
                },
                ..GaParams::default()
            },
        ];

        for params in invalid {
            assert!(matches!(
                params.validate(),
                Err(OptimizerError::InvalidParams(_))
            ));
        }
    }
}
