//! Merge policy for forgotten-item additions

use std::collections::HashSet;

use tracing::debug;

use crate::domain::PackingItem;

/// What happened when additions were merged into the live list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeOutcome {
    /// The check suggested nothing
    AllGood,
    /// The check suggested items, all already on the list
    NoNewItems,
    /// This many items were appended
    Added(usize),
}

impl std::fmt::Display for MergeOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AllGood => write!(f, "Looks like you've got everything covered!"),
            Self::NoNewItems => write!(f, "No new items to add. Your list looks complete."),
            Self::Added(1) => write!(f, "Added 1 suggested item to your list."),
            Self::Added(n) => write!(f, "Added {} suggested items to your list.", n),
        }
    }
}

/// Append each addition whose normalized name is not already present
///
/// Existing items are never reordered or modified. Additions keep their
/// relative order, and a name repeated within `additions` is appended once.
pub fn merge_additions(live: &mut Vec<PackingItem>, additions: Vec<PackingItem>) -> MergeOutcome {
    debug!(live = live.len(), additions = additions.len(), "merge_additions: called");
    if additions.is_empty() {
        return MergeOutcome::AllGood;
    }

    let mut seen: HashSet<String> = live.iter().map(PackingItem::normalized_name).collect();
    let before = live.len();
    live.extend(additions.into_iter().filter(|item| seen.insert(item.normalized_name())));

    match live.len() - before {
        0 => MergeOutcome::NoNewItems,
        n => MergeOutcome::Added(n),
    }
}
