use super::renumber;
use crate::common::SortOrder;
use crate::roll::tree::RollTree;
use std::cmp::Ordering;

/// Stable-sorts entries by face and renumbers their `order` to match.
pub(crate) fn sort(entries: &mut [RollTree], order: SortOrder) {
    let by_face = |a: &RollTree, b: &RollTree| {
        a.face()
            .partial_cmp(&b.face())
            .unwrap_or(Ordering::Equal)
    };
    match order {
        SortOrder::Ascending => entries.sort_by(by_face),
        SortOrder::Descending => entries.sort_by(|a, b| by_face(b, a)),
    }
    renumber(entries);
}
