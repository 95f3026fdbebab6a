use crate::matchup::Strategy;
use crate::Frequency;
use crate::Payoff;

/// the guaranteed game value as a function of one strategy's forced play
/// frequency, sampled at the sweep grid in ascending order. None marks a
/// grid point whose constrained solve came back infeasible or timed out;
/// the rest of the curve is still usable around the gap.
#[derive(Debug, Clone, PartialEq)]
pub struct Curve {
    strategy: Strategy,
    points: Vec<(Frequency, Option<Payoff>)>,
}

impl Curve {
    pub fn strategy(&self) -> &Strategy {
        &self.strategy
    }
    pub fn points(&self) -> &[(Frequency, Option<Payoff>)] {
        &self.points
    }
    pub fn value(&self, row: usize) -> Option<Payoff> {
        self.points[row].1
    }
    /// how many grid points actually solved
    pub fn defined(&self) -> usize {
        self.points.iter().filter(|(_, v)| v.is_some()).count()
    }
}

impl From<(Strategy, Vec<(Frequency, Option<Payoff>)>)> for Curve {
    fn from((strategy, points): (Strategy, Vec<(Frequency, Option<Payoff>)>)) -> Self {
        Self { strategy, points }
    }
}
