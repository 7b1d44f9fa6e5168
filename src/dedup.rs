use std::collections::HashSet;

use crate::notice::Notice;

/// Keep the candidates whose link is not already stored, in their original order.
pub fn filter_new(candidates: Vec<Notice>, existing: &HashSet<String>) -> Vec<Notice> {
    candidates
        .into_iter()
        .filter(|n| !existing.contains(&n.link))
        .collect()
}
