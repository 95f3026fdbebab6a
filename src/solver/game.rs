use super::equilibrium::Equilibrium;
use crate::matchup::Matrix;
use crate::matchup::Strategy;
use crate::Probability;
use minilp::ComparisonOp;
use minilp::LinearExpr;
use minilp::OptimizationDirection;
use minilp::Problem;
use minilp::Solution;
use minilp::Variable;
use std::collections::BTreeMap;
use std::time::Duration;

/// equality constraint fixing one row strategy's play frequency before
/// solving. an in-range pin can always be absorbed by the normalization
/// constraint, so infeasibility only arises from out-of-range values.
#[derive(Debug, Clone, PartialEq)]
pub struct Pin {
    pub strategy: Strategy,
    pub value: Probability,
}

/// one maximin LP over a payoff matrix: maximize the guaranteed value w
/// subject to the row weights forming a distribution and clearing w
/// against every pure column response. each solve builds a fresh Problem
/// from scratch; concurrent games share nothing but the matrix.
pub struct Game<'a> {
    matrix: &'a Matrix,
    pin: Option<Pin>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolveError {
    /// no distribution satisfies the constraints (incompatible pin)
    Infeasible,
    /// cannot arise from a well-formed maximin program, carried anyway
    Unbounded,
    /// the simplex blew its wall-clock budget
    Timeout,
}

impl std::fmt::Display for SolveError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::Infeasible => write!(f, "infeasible game"),
            Self::Unbounded => write!(f, "unbounded game"),
            Self::Timeout => write!(f, "solver timeout"),
        }
    }
}
impl std::error::Error for SolveError {}

impl From<minilp::Error> for SolveError {
    fn from(e: minilp::Error) -> Self {
        match e {
            minilp::Error::Infeasible => Self::Infeasible,
            minilp::Error::Unbounded => Self::Unbounded,
        }
    }
}

impl<'a> Game<'a> {
    pub fn new(matrix: &'a Matrix) -> Self {
        Self { matrix, pin: None }
    }

    /// fix one strategy's frequency with an equality row. a pin that
    /// cannot be satisfied, whether by value or because the strategy is
    /// not in the matrix at all, surfaces as Infeasible from the solve.
    pub fn pin(mut self, strategy: Strategy, value: Probability) -> Self {
        self.pin = Some(Pin { strategy, value });
        self
    }

    pub fn solve(&self) -> Result<Equilibrium, SolveError> {
        let (program, weights) = self.program()?;
        let solution = program.solve()?;
        Ok(self.equilibrium(&solution, &weights))
    }

    /// same as solve, but abandon the simplex once the budget elapses.
    /// the prepared program moves onto a helper thread so a pathological
    /// solve can be left behind without stalling the whole sweep.
    pub fn solve_within(&self, budget: Duration) -> Result<Equilibrium, SolveError> {
        let (program, weights) = self.program()?;
        let (tx, rx) = std::sync::mpsc::channel();
        std::thread::spawn(move || {
            let _ = tx.send(program.solve());
        });
        match rx.recv_timeout(budget) {
            Ok(solved) => Ok(self.equilibrium(&solved?, &weights)),
            Err(_) => Err(SolveError::Timeout),
        }
    }

    /// build the LP fresh: one non-negative variable per row strategy,
    /// one free variable for the value, normalization and per-column
    /// payoff constraints, plus the optional pin. returned handles sit
    /// parallel to the matrix index.
    fn program(&self) -> Result<(Problem, Vec<Variable>), SolveError> {
        let n = self.matrix.n();
        let mut program = Problem::new(OptimizationDirection::Maximize);
        let value = program.add_var(1., (f64::NEG_INFINITY, f64::INFINITY));
        let weights = (0..n)
            .map(|_| program.add_var(0., (0., f64::INFINITY)))
            .collect::<Vec<_>>();
        let mut normalization = LinearExpr::empty();
        for &weight in &weights {
            normalization.add(weight, 1.);
        }
        program.add_constraint(normalization, ComparisonOp::Eq, 1.);
        for col in 0..n {
            let mut guarantee = LinearExpr::empty();
            for (row, &weight) in weights.iter().enumerate() {
                guarantee.add(weight, self.matrix.payoff(row, col));
            }
            guarantee.add(value, -1.);
            program.add_constraint(guarantee, ComparisonOp::Ge, 0.);
        }
        if let Some(ref pin) = self.pin {
            // a constraint on a strategy outside the universe can never
            // be satisfied, same as an out-of-range value
            let position = self
                .matrix
                .position(&pin.strategy)
                .ok_or(SolveError::Infeasible)?;
            let mut fixed = LinearExpr::empty();
            fixed.add(weights[position], 1.);
            program.add_constraint(fixed, ComparisonOp::Eq, pin.value);
        }
        Ok((program, weights))
    }

    fn equilibrium(&self, solution: &Solution, weights: &[Variable]) -> Equilibrium {
        Equilibrium::from((
            solution.objective(),
            self.matrix
                .strategies()
                .iter()
                .zip(weights.iter())
                .map(|(strategy, &weight)| (strategy.clone(), solution[weight]))
                .collect::<BTreeMap<_, _>>(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matchup::Outcome;
    use crate::TOLERANCE;

    fn matrix(rows: &[(&str, &str, f64)]) -> Matrix {
        Matrix::from_outcomes(rows.iter().copied().map(Outcome::from).collect()).unwrap()
    }

    fn rps() -> Matrix {
        matrix(&[
            ("R", "P", 0.0),
            ("P", "R", 1.0),
            ("P", "S", 0.0),
            ("S", "P", 1.0),
            ("S", "R", 0.0),
            ("R", "S", 1.0),
        ])
    }

    #[test]
    fn even_matchup_is_valueless() {
        let m = matrix(&[("A", "B", 0.5), ("B", "A", 0.5)]);
        let eq = Game::new(&m).solve().unwrap();
        assert!(eq.value().abs() < TOLERANCE);
    }

    #[test]
    fn favored_matchup_plays_pure() {
        let m = matrix(&[("A", "B", 0.8), ("B", "A", 0.2)]);
        let eq = Game::new(&m).solve().unwrap();
        assert!(eq.value().abs() < TOLERANCE);
        assert!(eq.weight(&Strategy::from("A")) > 1. - TOLERANCE);
    }

    #[test]
    fn rps_mixes_evenly() {
        let m = rps();
        let eq = Game::new(&m).solve().unwrap();
        assert!(eq.value().abs() < TOLERANCE);
        for strategy in m.strategies() {
            assert!((eq.weight(strategy) - 1. / 3.).abs() < TOLERANCE);
        }
    }

    #[test]
    fn weights_form_distribution() {
        let m = rps();
        let eq = Game::new(&m).solve().unwrap();
        let total = eq.weights().values().sum::<f64>();
        assert!((total - 1.).abs() < TOLERANCE);
        assert!(eq.weights().values().all(|&w| w >= -TOLERANCE));
    }

    #[test]
    fn pinning_only_restricts() {
        let m = rps();
        let free = Game::new(&m).solve().unwrap();
        for strategy in m.strategies() {
            let pinned = Game::new(&m)
                .pin(strategy.clone(), 0.)
                .solve()
                .unwrap();
            assert!(pinned.value() <= free.value() + TOLERANCE);
        }
    }

    #[test]
    fn pinned_weight_is_respected() {
        let m = rps();
        let pinned = Game::new(&m).pin(Strategy::from("R"), 0.5).solve().unwrap();
        assert!((pinned.weight(&Strategy::from("R")) - 0.5).abs() < TOLERANCE);
        let total = pinned.weights().values().sum::<f64>();
        assert!((total - 1.).abs() < TOLERANCE);
    }

    #[test]
    fn out_of_range_pin_is_infeasible() {
        let m = rps();
        let result = Game::new(&m).pin(Strategy::from("R"), 1.5).solve();
        assert!(result == Err(SolveError::Infeasible));
    }

    #[test]
    fn unknown_strategy_pin_is_infeasible() {
        let m = rps();
        let result = Game::new(&m).pin(Strategy::from("Glass Joe"), 0.5).solve();
        assert!(result == Err(SolveError::Infeasible));
    }

    #[test]
    fn generous_budget_matches_untimed_solve() {
        let m = rps();
        let free = Game::new(&m).solve().unwrap();
        let timed = Game::new(&m)
            .solve_within(Duration::from_secs(5))
            .unwrap();
        assert!((free.value() - timed.value()).abs() < TOLERANCE);
    }

    #[test]
    fn random_matchups_solve_to_distributions() {
        use rand::Rng;
        let mut rng = rand::rng();
        let names = ["A", "B", "C", "D", "E"];
        for _ in 0..16 {
            let mut rows = Vec::new();
            for i in 0..names.len() {
                for j in (i + 1)..names.len() {
                    let p = rng.random_range(0.0..=1.0);
                    rows.push((names[i], names[j], p));
                    rows.push((names[j], names[i], 1. - p));
                }
            }
            let m = matrix(&rows);
            let eq = Game::new(&m).solve().unwrap();
            let total = eq.weights().values().sum::<f64>();
            assert!((total - 1.).abs() < TOLERANCE);
            assert!(eq.weights().values().all(|&w| w >= -TOLERANCE));
            // antisymmetric games are fair by symmetry
            assert!(eq.value().abs() < 1e-4);
        }
    }
}
