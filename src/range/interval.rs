use crate::matchup::Strategy;
use crate::sweep::Curve;
use crate::Frequency;
use crate::Payoff;

/// the contiguous range of forced frequencies at which one strategy's
/// guaranteed value stays at or above the threshold. bounds are None
/// when no grid point qualifies; the three bar widths stack to 1 and
/// feed the stacked-range chart.
#[derive(Debug, Clone, PartialEq)]
pub struct Interval {
    strategy: Strategy,
    bounds: Option<(Frequency, Frequency)>,
}

impl Interval {
    /// first and last qualifying grid points in ascending frequency
    /// order. undefined curve points never qualify.
    pub fn from_curve(curve: &Curve, threshold: Payoff) -> Self {
        let mut qualifying = curve
            .points()
            .iter()
            .filter(|(_, value)| value.map_or(false, |v| v >= threshold))
            .map(|&(frequency, _)| frequency);
        let bounds = qualifying
            .next()
            .map(|lo| (lo, qualifying.last().unwrap_or(lo)));
        Self {
            strategy: curve.strategy().clone(),
            bounds,
        }
    }

    pub fn strategy(&self) -> &Strategy {
        &self.strategy
    }
    pub fn bounds(&self) -> Option<(Frequency, Frequency)> {
        self.bounds
    }

    /// stacked widths (below, inside, above); they sum to 1 when defined
    pub fn bars(&self) -> Option<[Frequency; 3]> {
        self.bounds.map(|(lo, hi)| [lo, hi - lo, 1. - hi])
    }

    /// sort key: ascending by (max, min); undefined bounds sink last
    pub(crate) fn rank(&self) -> (Frequency, Frequency) {
        match self.bounds {
            Some((lo, hi)) => (hi, lo),
            None => (f64::INFINITY, f64::INFINITY),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::TOLERANCE;

    fn curve(values: &[Option<Payoff>]) -> Curve {
        let n = values.len() - 1;
        let points = values
            .iter()
            .enumerate()
            .map(|(i, &v)| (i as Frequency / n as Frequency, v))
            .collect();
        Curve::from((Strategy::from("A"), points))
    }

    #[test]
    fn finds_first_and_last_qualifying_points() {
        let c = curve(&[
            Some(-1.),
            Some(-0.01),
            Some(0.),
            Some(-0.01),
            Some(-1.),
        ]);
        let interval = Interval::from_curve(&c, -0.02);
        assert!(interval.bounds() == Some((0.25, 0.75)));
        let bars = interval.bars().unwrap();
        assert!((bars[0] - 0.25).abs() < TOLERANCE);
        assert!((bars[1] - 0.5).abs() < TOLERANCE);
        assert!((bars[2] - 0.25).abs() < TOLERANCE);
    }

    #[test]
    fn bars_sum_to_one() {
        let c = curve(&[Some(-1.), Some(0.), Some(0.), Some(-1.), Some(-1.)]);
        let bars = Interval::from_curve(&c, -0.02).bars().unwrap();
        assert!((bars.iter().sum::<f64>() - 1.).abs() < TOLERANCE);
    }

    #[test]
    fn single_qualifying_point_collapses() {
        let c = curve(&[Some(-1.), Some(-1.), Some(0.), Some(-1.), Some(-1.)]);
        let interval = Interval::from_curve(&c, -0.02);
        assert!(interval.bounds() == Some((0.5, 0.5)));
        let bars = interval.bars().unwrap();
        assert!(bars[1] == 0.);
        assert!((bars.iter().sum::<f64>() - 1.).abs() < TOLERANCE);
    }

    #[test]
    fn below_threshold_everywhere_is_undefined() {
        let c = curve(&[Some(-1.), Some(-0.5), Some(-1.)]);
        let interval = Interval::from_curve(&c, -0.02);
        assert!(interval.bounds().is_none());
        assert!(interval.bars().is_none());
    }

    #[test]
    fn undefined_points_never_qualify() {
        let c = curve(&[None, Some(0.), None, Some(0.), None]);
        let interval = Interval::from_curve(&c, -0.02);
        assert!(interval.bounds() == Some((0.25, 0.75)));
    }
}
