use std::collections::BTreeMap;

use tracing::debug;

use super::identity::same_committer;
use super::CommitterRecord;

/// Partition key: lowercase first character of the email local part.
/// Non-alphabetic leads (digits, punctuation, non-ASCII) share one bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum BucketKey {
    Letter(char),
    Other,
}

impl BucketKey {
    /// None when the author string carries no character after a `<`.
    pub(crate) fn for_author(author: &str) -> Option<Self> {
        let start = author.find('<')?;
        let lead = author[start + 1..].chars().next()?;
        let lead = lead.to_ascii_lowercase();
        if lead.is_ascii_lowercase() {
            Some(BucketKey::Letter(lead))
        } else {
            Some(BucketKey::Other)
        }
    }
}

/// Committer records bucketed by the first letter of the email local part.
///
/// Within a bucket no two records denote the same person: insertion merges
/// into the first matching record before it ever appends. Records keep the
/// bucket chosen at first insertion for their whole lifetime.
#[derive(Debug, Default)]
pub struct CommitterStore {
    pub(crate) buckets: BTreeMap<BucketKey, Vec<CommitterRecord>>,
    len: usize,
}

impl CommitterStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge `commits` into an existing record for the same person, or append
    /// a new record. The first-seen author spelling wins on merge.
    ///
    /// Returns false (and does nothing) for author strings without a
    /// bracketed email; post-parse inputs always carry one.
    pub fn insert_or_merge(&mut self, author: &str, commits: u64) -> bool {
        let Some(key) = BucketKey::for_author(author) else {
            debug!("Dropping author without bracketed email: {:?}", author);
            return false;
        };

        let bucket = self.buckets.entry(key).or_default();
        for record in bucket.iter_mut() {
            if same_committer(&record.author, author) {
                record.commits += commits;
                return true;
            }
        }

        bucket.push(CommitterRecord {
            commits,
            author: author.to_string(),
            consumed: false,
        });
        self.len += 1;
        true
    }

    /// Number of distinct committer records across all buckets.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}
