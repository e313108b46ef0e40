/// Whether two `Name <email>` strings denote the same person.
///
/// Strings equal under ASCII case-insensitive comparison always match.
/// Otherwise the bracketed emails are scanned in lockstep from each `<` and
/// the comparison stops at the first `@` (or end of string) on either side:
/// equal local parts match regardless of display name or domain, so
/// `Yang Ming <ming.3.yang@nokia.com>` and `m7yang <ming.3.yang@microsoft.com>`
/// count as one committer. The local-part scan is case-sensitive per
/// character. Strings without a `<` fall back to the equality result.
pub fn same_committer(a: &str, b: &str) -> bool {
    if a.eq_ignore_ascii_case(b) {
        return true;
    }

    let (Some(start_a), Some(start_b)) = (a.find('<'), b.find('<')) else {
        return false;
    };

    for (ch_a, ch_b) in a[start_a..].chars().zip(b[start_b..].chars()) {
        if ch_a == '@' || ch_b == '@' {
            return true;
        }
        if ch_a != ch_b {
            return false;
        }
    }

    // one side ran out before reaching '@' with no mismatch
    true
}
