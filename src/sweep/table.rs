use super::curve::Curve;
use crate::matchup::Strategy;
use crate::Frequency;

/// the assembled sweep output: grid rows ascending by frequency, one
/// curve column per strategy in matrix order. this is the sole artifact
/// consumed by interval extraction and the unit of cache persistence.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    grid: Vec<Frequency>,
    curves: Vec<Curve>,
}

impl Table {
    pub fn grid(&self) -> &[Frequency] {
        &self.grid
    }
    pub fn curves(&self) -> &[Curve] {
        &self.curves
    }
    pub fn curve(&self, strategy: &Strategy) -> Option<&Curve> {
        self.curves.iter().find(|c| c.strategy() == strategy)
    }
}

impl From<(Vec<Frequency>, Vec<Curve>)> for Table {
    fn from((grid, curves): (Vec<Frequency>, Vec<Curve>)) -> Self {
        Self { grid, curves }
    }
}
