use crate::Probability;
use anyhow::Context;
use serde::Deserialize;
use serde::Serialize;

/// one observed ordered matchup: the empirical probability that char1
/// beats char2. this is the row schema of the CSV handed to us by the
/// data-acquisition side; how it was produced is none of our business.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Outcome {
    pub char1: String,
    pub char2: String,
    pub win_rate: Probability,
}

impl Outcome {
    /// read every row of a char1,char2,win_rate delimited file.
    /// columns are matched by header name, so extra columns
    /// (e.g. a leading index) are tolerated.
    pub fn read(path: &std::path::Path) -> anyhow::Result<Vec<Self>> {
        let mut reader = csv::Reader::from_path(path)
            .with_context(|| format!("open matchup file {}", path.display()))?;
        let mut rows = Vec::new();
        for row in reader.deserialize() {
            rows.push(row.with_context(|| format!("parse matchup row in {}", path.display()))?);
        }
        Ok(rows)
    }
}

impl From<(&str, &str, Probability)> for Outcome {
    fn from((char1, char2, win_rate): (&str, &str, Probability)) -> Self {
        Self {
            char1: char1.to_string(),
            char2: char2.to_string(),
            win_rate,
        }
    }
}
