use crate::ban::{BanEntry, DUP_MARKER, eq_fold};

/// Counters for one deduplicated file
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct FileStats {
    /// Entries decoded from the file
    pub read: usize,
    /// Entries that had a duplicate partner
    pub duplicates: usize,
    /// Duplicates whose reasons were combined
    pub combined: usize,
}

/// Merge duplicate usernames within one file's entries.
///
/// Each entry is paired with the first other entry of the same user. A
/// partner with a different reason produces one merged entry carrying
/// both reasons behind [`DUP_MARKER`]; the merged reason is written back so
/// the partner sees it and drops out. Equal reasons keep only the first
/// occurrence. Three or more entries for one user are reconciled only as
/// far as those first pairings go.
pub fn dedup(mut entries: Vec<BanEntry>) -> (Vec<BanEntry>, FileStats) {
    let mut stats = FileStats {
        read: entries.len(),
        ..FileStats::default()
    };
    let mut kept = Vec::with_capacity(entries.len());

    for i in 0..entries.len() {
        let partner = (0..entries.len()).find(|&j| j != i && entries[i].same_user(&entries[j]));

        let Some(j) = partner else {
            kept.push(entries[i].clone());
            continue;
        };
        stats.duplicates += 1;

        let own = &entries[i].reason;
        let other = &entries[j].reason;

        if eq_fold(own, other) {
            if j > i {
                kept.push(entries[i].clone());
            }
            continue;
        }
        if other.starts_with(DUP_MARKER) {
            continue;
        }

        let reason = if !own.is_empty() && !other.is_empty() {
            format!("{DUP_MARKER}{own}, {other}")
        } else {
            format!("{DUP_MARKER}{own}{other}")
        };
        entries[i].reason = reason;
        stats.combined += 1;
        kept.push(entries[i].clone());
    }

    (kept, stats)
}
