/// opaque identifier for one selectable option in the matchup chart,
/// e.g. a playable character. Ord so that matrix construction and
/// BTreeMap-keyed weight vectors are deterministic across runs.
#[derive(Debug, Clone, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct Strategy(String);

impl Strategy {
    pub fn name(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Strategy {
    fn from(name: &str) -> Self {
        Self(name.to_string())
    }
}
impl From<String> for Strategy {
    fn from(name: String) -> Self {
        Self(name)
    }
}

impl std::fmt::Display for Strategy {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.pad(&self.0)
    }
}
