use super::curve::Curve;
use super::table::Table;
use crate::matchup::Matrix;
use crate::matchup::Strategy;
use crate::solver::Game;
use crate::Frequency;
use crate::Payoff;
use rayon::iter::IntoParallelRefIterator;
use rayon::iter::ParallelIterator;
use std::time::Duration;

/// sweeps every strategy's forced frequency across a uniform grid on
/// [0, 1], solving one fresh constrained game per point. sweeps are
/// mutually independent and run on a bounded worker pool; a failed point
/// degrades to a gap in the curve rather than aborting the run.
pub struct Sweep {
    division: usize,
    workers: usize,
    budget: Option<Duration>,
}

impl Sweep {
    const DIVISION: usize = 10;

    pub fn new(division: usize) -> Self {
        Self {
            division: division.max(1),
            workers: num_cpus::get(),
            budget: None,
        }
    }

    pub fn workers(mut self, workers: usize) -> Self {
        self.workers = workers.max(1);
        self
    }

    /// wall-clock budget per individual solve
    pub fn budget(mut self, budget: Duration) -> Self {
        self.budget = Some(budget);
        self
    }

    /// division + 1 evenly spaced frequencies, both endpoints inclusive
    pub fn grid(&self) -> Vec<Frequency> {
        (0..=self.division)
            .map(|i| i as Frequency / self.division as Frequency)
            .collect()
    }

    /// one strategy's win-rate curve. infeasible or timed-out points are
    /// recorded as undefined and the sweep moves on.
    pub fn curve(&self, matrix: &Matrix, strategy: &Strategy) -> Curve {
        let points = self
            .grid()
            .into_iter()
            .map(|frequency| (frequency, self.point(matrix, strategy, frequency)))
            .collect();
        Curve::from((strategy.clone(), points))
    }

    /// every strategy's curve, solved on a dedicated pool bounded by
    /// workers. curves come back in matrix order regardless of which
    /// solve finished first; assembly is the only join point.
    pub fn table(&self, matrix: &Matrix) -> Table {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.workers)
            .build()
            .expect("build sweep worker pool");
        let curves = pool.install(|| {
            matrix
                .strategies()
                .par_iter()
                .map(|strategy| self.curve(matrix, strategy))
                .collect::<Vec<_>>()
        });
        log::info!(
            "{:<32}{:<8}{:<8}",
            "swept strategies",
            curves.len(),
            self.division + 1
        );
        Table::from((self.grid(), curves))
    }

    fn point(&self, matrix: &Matrix, strategy: &Strategy, frequency: Frequency) -> Option<Payoff> {
        let game = Game::new(matrix).pin(strategy.clone(), frequency);
        let solved = match self.budget {
            Some(budget) => game.solve_within(budget),
            None => game.solve(),
        };
        match solved {
            Ok(equilibrium) => {
                log::debug!("{:<24}{:<8.3}{:>8.4}", strategy, frequency, equilibrium.value());
                Some(equilibrium.value())
            }
            Err(e) => {
                log::warn!("{:<24}{:<8.3}{}", strategy, frequency, e);
                None
            }
        }
    }
}

impl Default for Sweep {
    fn default() -> Self {
        Self::new(Self::DIVISION)
    }
}
