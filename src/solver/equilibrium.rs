use crate::matchup::Strategy;
use crate::Payoff;
use crate::Probability;
use std::collections::BTreeMap;

/// a solved game: the guaranteed value w and a mixed strategy that
/// secures it. weights are non-negative and sum to 1 by LP constraint.
/// when the optimum is degenerate the vector is whichever optimal basis
/// the simplex landed on; only the value is contractual.
#[derive(Debug, Clone, PartialEq)]
pub struct Equilibrium {
    value: Payoff,
    weights: BTreeMap<Strategy, Probability>,
}

impl Equilibrium {
    pub fn value(&self) -> Payoff {
        self.value
    }
    pub fn weight(&self, strategy: &Strategy) -> Probability {
        self.weights.get(strategy).copied().unwrap_or_default()
    }
    pub fn weights(&self) -> &BTreeMap<Strategy, Probability> {
        &self.weights
    }
}

impl From<(Payoff, BTreeMap<Strategy, Probability>)> for Equilibrium {
    fn from((value, weights): (Payoff, BTreeMap<Strategy, Probability>)) -> Self {
        Self { value, weights }
    }
}

impl std::fmt::Display for Equilibrium {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        writeln!(f, "{:<24}{:>8.4}", "value", self.value)?;
        for (strategy, weight) in &self.weights {
            writeln!(f, "{:<24}{:>8.4}", strategy, weight)?;
        }
        Ok(())
    }
}
