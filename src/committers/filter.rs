/// Substring gate deciding which shortlog lines are eligible for aggregation.
///
/// The match is case-sensitive and looks anywhere in the line, so a display
/// name containing the literal suffix text also passes.
pub struct DomainFilter {
    suffixes: Vec<String>,
}

impl DomainFilter {
    pub fn new(suffixes: Vec<String>) -> Self {
        Self { suffixes }
    }

    /// True iff the line contains at least one configured suffix anywhere.
    /// An empty suffix set rejects every line.
    pub fn accepts(&self, line: &str) -> bool {
        self.suffixes.iter().any(|suffix| line.contains(suffix.as_str()))
    }

    pub fn is_empty(&self) -> bool {
        self.suffixes.is_empty()
    }

    pub fn suffixes(&self) -> &[String] {
        &self.suffixes
    }
}
