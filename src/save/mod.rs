use crate::matchup::Strategy;
use crate::sweep::Curve;
use crate::sweep::Table;
use anyhow::Context;
use std::path::Path;
use std::path::PathBuf;

/// where solved curve tables live between runs. injected into the
/// pipeline so the recomputation policy belongs to the caller instead of
/// a hard-coded path check buried in the sweep.
pub trait Store {
    /// the cached table, if one has been persisted
    fn load(&self) -> anyhow::Result<Option<Table>>;
    /// persist the table for future runs
    fn save(&self, table: &Table) -> anyhow::Result<()>;
}

/// CSV-file store. header row `frequency,<strategy>,...` with one column
/// per strategy in table order, one row per grid point ascending, empty
/// cells for undefined values. cells use the shortest f64 representation,
/// which reparses to the identical value, so load after save reproduces
/// the exact (strategy, frequency) -> value mapping.
pub struct CsvStore(PathBuf);

impl From<PathBuf> for CsvStore {
    fn from(path: PathBuf) -> Self {
        Self(path)
    }
}

impl CsvStore {
    pub fn path(&self) -> &Path {
        &self.0
    }
}

impl Store for CsvStore {
    fn load(&self) -> anyhow::Result<Option<Table>> {
        if !self.0.exists() {
            return Ok(None);
        }
        let mut reader = csv::Reader::from_path(&self.0)
            .with_context(|| format!("open curve table {}", self.0.display()))?;
        let strategies = reader
            .headers()
            .context("read curve table header")?
            .iter()
            .skip(1)
            .map(Strategy::from)
            .collect::<Vec<_>>();
        let mut grid = Vec::new();
        let mut columns = vec![Vec::new(); strategies.len()];
        for record in reader.records() {
            let record = record.context("read curve table row")?;
            let frequency = record
                .get(0)
                .context("missing frequency cell")?
                .parse::<f64>()
                .context("parse frequency cell")?;
            grid.push(frequency);
            for (column, cell) in columns.iter_mut().zip(record.iter().skip(1)) {
                let value = match cell {
                    "" => None,
                    cell => Some(cell.parse::<f64>().context("parse value cell")?),
                };
                column.push((frequency, value));
            }
        }
        let curves = strategies
            .into_iter()
            .zip(columns)
            .map(Curve::from)
            .collect();
        Ok(Some(Table::from((grid, curves))))
    }

    fn save(&self, table: &Table) -> anyhow::Result<()> {
        let mut writer = csv::Writer::from_path(&self.0)
            .with_context(|| format!("open curve table {}", self.0.display()))?;
        let header = std::iter::once("frequency".to_string())
            .chain(table.curves().iter().map(|c| c.strategy().to_string()))
            .collect::<Vec<_>>();
        writer.write_record(&header)?;
        for (row, frequency) in table.grid().iter().enumerate() {
            let record = std::iter::once(frequency.to_string())
                .chain(table.curves().iter().map(|curve| {
                    curve
                        .value(row)
                        .map(|value| value.to_string())
                        .unwrap_or_default()
                }))
                .collect::<Vec<_>>();
            writer.write_record(&record)?;
        }
        writer.flush()?;
        Ok(())
    }
}
