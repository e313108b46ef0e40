use super::store::CommitterStore;
use super::RankedCommitter;

/// Destructive top-K extraction over a filled store.
///
/// Every pop scans all live records; draining K entries costs O(K * M) for
/// M records. Consumed records are flagged rather than zeroed, so a
/// committer with a genuine zero count is still reported exactly once.
pub struct Ranking {
    store: CommitterStore,
}

impl Ranking {
    pub fn new(store: CommitterStore) -> Self {
        Self { store }
    }

    /// Snapshot and consume the record with the highest remaining count.
    ///
    /// Ties keep the first record encountered: bucket key order, then
    /// insertion order within the bucket. None once every record is consumed.
    pub fn pop_max(&mut self) -> Option<(String, u64)> {
        let mut best: Option<&mut super::CommitterRecord> = None;

        for record in self.store.buckets.values_mut().flatten() {
            if record.consumed {
                continue;
            }
            let better = match &best {
                Some(current) => record.commits > current.commits,
                None => true,
            };
            if better {
                best = Some(record);
            }
        }

        let record = best?;
        record.consumed = true;
        Some((record.author.clone(), record.commits))
    }

    /// Ranks 1..=K, K = min(n, remaining records).
    pub fn take_top(&mut self, n: usize) -> Vec<RankedCommitter> {
        let mut rows = Vec::new();
        for rank in 1..=n {
            let Some((author, commits)) = self.pop_max() else {
                break;
            };
            rows.push(RankedCommitter {
                rank,
                author,
                commits,
            });
        }
        rows
    }
}
