use super::types::{ResolvedEntry, SortResult};
use lamina_graph::NodeId;
use std::cmp::Ordering;

/// Orders entries by barycenter and slots entries without one back in at their original
/// positions. Ties go to the lower original index, or the higher one with `bias_right`.
pub fn sort(entries: Vec<ResolvedEntry>, bias_right: bool) -> SortResult {
    let (mut sortable, mut unsortable): (Vec<ResolvedEntry>, Vec<ResolvedEntry>) =
        entries.into_iter().partition(|e| e.barycenter.is_some());
    unsortable.sort_by(|a, b| b.i.cmp(&a.i));
    sortable.sort_by(|a, b| {
        let by_center = a
            .barycenter
            .partial_cmp(&b.barycenter)
            .unwrap_or(Ordering::Equal);
        by_center.then_with(|| {
            if bias_right {
                b.i.cmp(&a.i)
            } else {
                a.i.cmp(&b.i)
            }
        })
    });

    let mut vs = Vec::new();
    let mut sum = 0.0;
    let mut weight = 0.0;
    let mut index = consume_unsortable(&mut vs, &mut unsortable, 0);
    for entry in sortable {
        index += entry.vs.len();
        if let Some(b) = entry.barycenter {
            sum += b * entry.weight;
            weight += entry.weight;
        }
        vs.extend(entry.vs);
        index = consume_unsortable(&mut vs, &mut unsortable, index);
    }

    SortResult {
        vs,
        barycenter: (weight > 0.0).then(|| sum / weight),
        weight,
    }
}

/// `unsortable` is sorted by descending `i`, so the next candidate is at the end.
fn consume_unsortable(vs: &mut Vec<NodeId>, unsortable: &mut Vec<ResolvedEntry>, mut index: usize) -> usize {
    while let Some(last) = unsortable.last() {
        if last.i > index {
            break;
        }
        if let Some(entry) = unsortable.pop() {
            vs.extend(entry.vs);
            index += 1;
        }
    }
    index
}
