use super::interval::Interval;
use crate::sweep::Table;
use crate::Frequency;
use crate::Payoff;
use anyhow::Context;
use colored::Colorize;
use serde::Serialize;

/// per-strategy viable intervals in display order, renderable as a
/// stacked horizontal range chart and exportable as a CSV summary.
/// strategies whose whole curve sits below the threshold are kept with
/// undefined bounds so a partial run still reports best effort.
#[derive(Debug, Clone, PartialEq)]
pub struct Report(Vec<Interval>);

#[derive(Serialize)]
struct Row<'a> {
    strategy: &'a str,
    min: Option<Frequency>,
    max: Option<Frequency>,
    bar1: Option<Frequency>,
    bar2: Option<Frequency>,
    bar3: Option<Frequency>,
}

impl Report {
    const WIDTH: usize = 50;

    /// extract every strategy's interval, in matrix order
    pub fn from_table(table: &Table, threshold: Payoff) -> Self {
        Self(
            table
                .curves()
                .iter()
                .map(|curve| Interval::from_curve(curve, threshold))
                .collect(),
        )
    }

    /// ascending by (max, min); undefined bounds sink to the bottom
    pub fn sorted(mut self) -> Self {
        self.0.sort_by(|a, b| {
            let (ahi, alo) = a.rank();
            let (bhi, blo) = b.rank();
            ahi.total_cmp(&bhi).then(alo.total_cmp(&blo))
        });
        self
    }

    /// the matchup chart's own order, reversed (presentation default)
    pub fn reversed(mut self) -> Self {
        self.0.reverse();
        self
    }

    pub fn intervals(&self) -> &[Interval] {
        &self.0
    }

    /// write the strategy,min,max,bar1,bar2,bar3 summary. undefined
    /// bounds serialize as empty fields.
    pub fn export(&self, path: &std::path::Path) -> anyhow::Result<()> {
        let mut writer = csv::Writer::from_path(path)
            .with_context(|| format!("open interval summary {}", path.display()))?;
        for interval in &self.0 {
            let bounds = interval.bounds();
            let bars = interval.bars();
            writer.serialize(Row {
                strategy: interval.strategy().name(),
                min: bounds.map(|(lo, _)| lo),
                max: bounds.map(|(_, hi)| hi),
                bar1: bars.map(|b| b[0]),
                bar2: bars.map(|b| b[1]),
                bar3: bars.map(|b| b[2]),
            })?;
        }
        writer.flush()?;
        Ok(())
    }
}

impl std::fmt::Display for Report {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        writeln!(f, "{:<24}0{:>width$}", "", "1", width = Self::WIDTH)?;
        for interval in &self.0 {
            match interval.bounds() {
                Some((lo, hi)) => {
                    let from = (lo * Self::WIDTH as f64).round() as usize;
                    let upto = (hi * Self::WIDTH as f64).round() as usize;
                    writeln!(
                        f,
                        "{:<24}{}{}{} [{:.2}, {:.2}]",
                        interval.strategy(),
                        ".".repeat(from),
                        "#".repeat(upto.saturating_sub(from).max(1)).green(),
                        ".".repeat(Self::WIDTH.saturating_sub(upto.max(from + 1))),
                        lo,
                        hi,
                    )?;
                }
                None => {
                    writeln!(
                        f,
                        "{:<24}{} below threshold everywhere",
                        interval.strategy(),
                        ".".repeat(Self::WIDTH).red(),
                    )?;
                }
            }
        }
        Ok(())
    }
}
