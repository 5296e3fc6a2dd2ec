use jiff::SignedDuration;
use serde::Serialize;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TerminationReason {
    /// All configured generations ran
    Generations,
    /// The best solution did not improve for `stall_generations` generations
    Stalled,
    /// The wall-clock budget ran out
    Deadline,
}

#[derive(Clone, Debug, Serialize)]
pub struct SearchStatistics {
    /// Best fitness after each generation, index 0 is the initial population
    best_fitness_history: Vec<f64>,
    generations: usize,
    termination_reason: TerminationReason,
    elapsed: SignedDuration,
}

impl SearchStatistics {
    pub fn new(
        best_fitness_history: Vec<f64>,
        generations: usize,
        termination_reason: TerminationReason,
        elapsed: SignedDuration,
    ) -> Self {
        SearchStatistics {
            best_fitness_history,
            generations,
            termination_reason,
            elapsed,
        }
    }

    pub fn best_fitness_history(&self) -> &[f64] {
        &self.best_fitness_history
    }

    /// Generations evolved after the initial population.
    pub fn generations(&self) -> usize {
        self.generations
    }

    pub fn termination_reason(&self) -> TerminationReason {
        self.termination_reason
    }

    pub fn elapsed(&self) -> SignedDuration {
        self.elapsed
    }
}
