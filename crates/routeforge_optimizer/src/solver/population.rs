use super::solution::solution::Solution;

/// One generation of individuals, kept ranked by fitness, best first.
#[derive(Debug, Clone)]
pub struct Population {
    individuals: Vec<Solution>,
}

impl Population {
    pub fn new(mut individuals: Vec<Solution>) -> Self {
        individuals.sort_by(|first, second| second.cmp_fitness(first));
        Population { individuals }
    }

    pub fn individuals(&self) -> &[Solution] {
        &self.individuals
    }

    pub fn len(&self) -> usize {
        self.individuals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.individuals.is_empty()
    }

    pub fn best(&self) -> Option<&Solution> {
        self.individuals.first()
    }

    /// Deep copies of the `count` fittest individuals.
    pub fn elites(&self, count: usize) -> Vec<Solution> {
        self.individuals.iter().take(count).cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use crate::test_utils;

    use super::*;

    #[test]
    fn test_ranked_best_first() {
        let problem = test_utils::create_grid_problem(2, 2, 2, 1000.0);
        let full = Solution::new(
            &problem,
            vec![test_utils::create_route(&problem, 0, vec![0, 1, 2, 3])],
        );
        let partial = Solution::new(
            &problem,
            vec![test_utils::create_route(&problem, 0, vec![0])],
        );
        let empty = Solution::new(&problem, vec![]);

        let highest = [&empty, &full, &partial]
            .iter()
            .map(|solution| solution.fitness())
            .fold(f64::MIN, f64::max);

        let population = Population::new(vec![empty, full, partial]);

        let fitnesses = population
            .individuals()
            .iter()
            .map(Solution::fitness)
            .collect::<Vec<_>>();
        assert!(fitnesses.windows(2).all(|pair| pair[0] >= pair[1]));
        assert_eq!(population.best().map(Solution::fitness), Some(highest));
        assert_eq!(population.elites(2).len(), 2);
        assert_eq!(population.elites(10).len(), 3);
    }
}
