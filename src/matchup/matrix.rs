use super::outcome::Outcome;
use super::strategy::Strategy;
use crate::Payoff;
use std::collections::BTreeMap;
use std::collections::BTreeSet;

/// square payoff matrix over a shared row/column strategy universe.
/// cell (i, j) is the expected payoff to row strategy i against column
/// strategy j on a [-1, 1] scale: 2 * P(i beats j) - 1. pairs with no
/// observed data default to the neutral 0 payoff (a 50% win rate); that
/// is a deliberate prior, not an error. noisy input need not pivot into
/// anything antisymmetric and we solve whatever we are given.
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix {
    index: Vec<Strategy>,
    cells: Vec<Payoff>, // row major, n * n
}

/// the strategy universe is not square: some name appears only as a row
/// or only as a column. fatal before any solving happens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchupError {
    MalformedMatchupData {
        rows: Vec<Strategy>,
        cols: Vec<Strategy>,
    },
}

impl std::fmt::Display for MatchupError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::MalformedMatchupData { rows, cols } => write!(
                f,
                "malformed matchup data: row-only strategies {:?}, column-only strategies {:?}",
                rows.iter().map(|s| s.name()).collect::<Vec<_>>(),
                cols.iter().map(|s| s.name()).collect::<Vec<_>>(),
            ),
        }
    }
}
impl std::error::Error for MatchupError {}

impl Matrix {
    /// read the matchup file and pivot it into a payoff matrix
    pub fn load(path: &std::path::Path) -> anyhow::Result<Self> {
        Ok(Self::from_outcomes(Outcome::read(path)?)?)
    }

    /// the Builder: pivot observed ordered pairs into a fully populated
    /// square matrix with a sorted, deterministic index. on a duplicate
    /// ordered pair the last observation wins.
    pub fn from_outcomes(outcomes: Vec<Outcome>) -> Result<Self, MatchupError> {
        let rows = outcomes
            .iter()
            .map(|o| Strategy::from(o.char1.as_str()))
            .collect::<BTreeSet<_>>();
        let cols = outcomes
            .iter()
            .map(|o| Strategy::from(o.char2.as_str()))
            .collect::<BTreeSet<_>>();
        if rows != cols {
            return Err(MatchupError::MalformedMatchupData {
                rows: rows.difference(&cols).cloned().collect(),
                cols: cols.difference(&rows).cloned().collect(),
            });
        }
        let index = rows.into_iter().collect::<Vec<_>>();
        let n = index.len();
        let position = index
            .iter()
            .cloned()
            .zip(0..)
            .collect::<BTreeMap<Strategy, usize>>();
        let mut cells = vec![0.; n * n];
        for o in outcomes {
            let i = position[&Strategy::from(o.char1.as_str())];
            let j = position[&Strategy::from(o.char2.as_str())];
            cells[i * n + j] = 2. * o.win_rate - 1.;
        }
        Ok(Self { index, cells })
    }

    pub fn n(&self) -> usize {
        self.index.len()
    }
    /// shared row/column universe, sorted
    pub fn strategies(&self) -> &[Strategy] {
        &self.index
    }
    pub fn position(&self, strategy: &Strategy) -> Option<usize> {
        self.index.iter().position(|s| s == strategy)
    }
    pub fn payoff(&self, row: usize, col: usize) -> Payoff {
        self.cells[row * self.n() + col]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn outcomes(rows: &[(&str, &str, f64)]) -> Vec<Outcome> {
        rows.iter().copied().map(Outcome::from).collect()
    }

    #[test]
    fn pivots_win_rates_into_payoffs() {
        let matrix = Matrix::from_outcomes(outcomes(&[
            ("A", "B", 0.8),
            ("B", "A", 0.2),
            ("A", "A", 0.5),
            ("B", "B", 0.5),
        ]))
        .unwrap();
        let a = matrix.position(&Strategy::from("A")).unwrap();
        let b = matrix.position(&Strategy::from("B")).unwrap();
        assert!((matrix.payoff(a, b) - 0.6).abs() < crate::TOLERANCE);
        assert!((matrix.payoff(b, a) + 0.6).abs() < crate::TOLERANCE);
        assert!(matrix.payoff(a, a) == 0.);
        assert!(matrix.payoff(b, b) == 0.);
    }

    #[test]
    fn missing_pair_defaults_to_neutral() {
        let matrix = Matrix::from_outcomes(outcomes(&[
            ("A", "B", 0.8),
            ("B", "A", 0.2),
            ("A", "C", 0.5),
            ("C", "A", 0.5),
            ("B", "B", 0.5),
            ("C", "B", 0.5),
            ("B", "C", 0.5),
        ]))
        .unwrap();
        let a = matrix.position(&Strategy::from("A")).unwrap();
        let c = matrix.position(&Strategy::from("C")).unwrap();
        // (A, A) and (C, C) were never observed
        assert!(matrix.payoff(a, a) == 0.);
        assert!(matrix.payoff(c, c) == 0.);
    }

    #[test]
    fn index_is_sorted_and_square() {
        let matrix = Matrix::from_outcomes(outcomes(&[
            ("Zelda", "Fox", 0.4),
            ("Fox", "Zelda", 0.6),
            ("Marth", "Fox", 0.5),
            ("Fox", "Marth", 0.5),
            ("Marth", "Zelda", 0.5),
            ("Zelda", "Marth", 0.5),
        ]))
        .unwrap();
        let names = matrix
            .strategies()
            .iter()
            .map(|s| s.name())
            .collect::<Vec<_>>();
        assert!(names == vec!["Fox", "Marth", "Zelda"]);
        assert!(matrix.n() == 3);
    }

    #[test]
    fn duplicate_pair_keeps_last_observation() {
        let matrix = Matrix::from_outcomes(outcomes(&[
            ("A", "B", 0.1),
            ("A", "B", 0.9),
            ("B", "A", 0.1),
        ]))
        .unwrap();
        let a = matrix.position(&Strategy::from("A")).unwrap();
        let b = matrix.position(&Strategy::from("B")).unwrap();
        assert!((matrix.payoff(a, b) - 0.8).abs() < crate::TOLERANCE);
    }

    #[test]
    fn non_square_universe_is_fatal() {
        let result = Matrix::from_outcomes(outcomes(&[("A", "B", 0.5), ("B", "C", 0.5)]));
        match result {
            Err(MatchupError::MalformedMatchupData { rows, cols }) => {
                assert!(rows == vec![Strategy::from("A")]);
                assert!(cols == vec![Strategy::from("C")]);
            }
            Ok(_) => panic!("expected malformed matchup data"),
        }
    }
}
