use serde::{Deserialize, Serialize};
use tracing::{debug, info};

pub mod filter;
pub mod identity;
pub mod parse;
pub mod rank;
pub mod store;

pub use filter::DomainFilter;
pub use parse::{LineParser, ParseError, ShortlogEntry};
pub use rank::Ranking;
pub use store::CommitterStore;

/// One observed committer identity and its accumulated commit count.
#[derive(Debug, Clone)]
pub struct CommitterRecord {
    pub commits: u64,
    /// First-seen `Name <email>` spelling, kept verbatim for display.
    pub author: String,
    /// Set once the record has been extracted into the ranking.
    pub consumed: bool,
}

/// One row of the final leaderboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankedCommitter {
    pub rank: usize,
    pub author: String,
    pub commits: u64,
}

#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct AggregateStats {
    pub lines_seen: usize,
    pub lines_eligible: usize,
    pub lines_parsed: usize,
    pub parse_failures: usize,
}

/// Streams shortlog lines through the domain gate and the line parser into
/// the bucketed store. One writer, built once per run, then drained.
pub struct Aggregator {
    filter: DomainFilter,
    parser: LineParser,
    store: CommitterStore,
    stats: AggregateStats,
}

impl Aggregator {
    pub fn new(filter: DomainFilter) -> anyhow::Result<Self> {
        Ok(Self {
            filter,
            parser: LineParser::new()?,
            store: CommitterStore::new(),
            stats: AggregateStats::default(),
        })
    }

    /// Feed one raw shortlog line. Ineligible and malformed lines are
    /// counted and dropped; nothing here ever aborts the run.
    pub fn consume_line(&mut self, line: &str) {
        self.stats.lines_seen += 1;

        if !self.filter.accepts(line) {
            return;
        }
        self.stats.lines_eligible += 1;

        match self.parser.parse(line) {
            Ok(entry) => {
                self.stats.lines_parsed += 1;
                self.store.insert_or_merge(&entry.author, entry.commits);
            }
            Err(err) => {
                self.stats.parse_failures += 1;
                debug!("Skipping shortlog line {:?}: {}", line, err);
            }
        }
    }

    pub fn stats(&self) -> AggregateStats {
        self.stats
    }

    pub fn committers(&self) -> usize {
        self.store.len()
    }

    /// Hand the filled store to the extractor; aggregation is over.
    pub fn into_ranking(self) -> Ranking {
        info!(
            "Aggregation complete: {} lines seen, {} eligible, {} parse failures, {} distinct committers",
            self.stats.lines_seen,
            self.stats.lines_eligible,
            self.stats.parse_failures,
            self.store.len()
        );
        Ranking::new(self.store)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn aggregator(suffixes: &[&str]) -> Aggregator {
        let suffixes = suffixes.iter().map(|s| s.to_string()).collect();
        Aggregator::new(DomainFilter::new(suffixes)).unwrap()
    }

    #[test]
    fn end_to_end_top_two() {
        let mut agg = aggregator(&["@nokia.com"]);
        for line in [
            "10  Alice<alice@nokia.com>",
            "5  Bob<bob@nokia.com>",
            "3  Alice<alice@nokia.com>",
            "2  Carol<carol@other.com>",
        ] {
            agg.consume_line(line);
        }

        let rows = agg.into_ranking().take_top(2);
        assert_eq!(
            rows,
            vec![
                RankedCommitter {
                    rank: 1,
                    author: "Alice<alice@nokia.com>".to_string(),
                    commits: 13,
                },
                RankedCommitter {
                    rank: 2,
                    author: "Bob<bob@nokia.com>".to_string(),
                    commits: 5,
                },
            ]
        );
    }

    #[test]
    fn empty_input_yields_empty_ranking() {
        let agg = aggregator(&["@nokia.com"]);
        let rows = agg.into_ranking().take_top(5);
        assert!(rows.is_empty());
    }

    #[test]
    fn ineligible_lines_never_reach_the_store() {
        let mut agg = aggregator(&["@nokia.com"]);
        agg.consume_line("100  Outsider <out@other.com>");

        assert_eq!(agg.stats().lines_seen, 1);
        assert_eq!(agg.stats().lines_eligible, 0);
        assert_eq!(agg.committers(), 0);
    }

    #[test]
    fn unparseable_lines_are_counted_and_skipped() {
        let mut agg = aggregator(&["@nokia.com"]);
        agg.consume_line("garbage mentioning @nokia.com without a count");
        agg.consume_line("7  Valid <valid@nokia.com>");

        let stats = agg.stats();
        assert_eq!(stats.parse_failures, 1);
        assert_eq!(stats.lines_parsed, 1);
        assert_eq!(agg.committers(), 1);
    }
}
