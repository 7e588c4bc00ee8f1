//! Top-K candidate tracking for template scores.

use std::cmp::Ordering;

use crate::kernel::OffsetScore;

/// Best offset score of the template at `index` in library order.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct Scored {
    pub(crate) index: usize,
    pub(crate) best: OffsetScore,
}

/// Library order is lexicographic by label, so lower index wins ties.
pub(crate) fn scored_cmp_desc(a: &Scored, b: &Scored) -> Ordering {
    b.best
        .score
        .total_cmp(&a.best.score)
        .then_with(|| a.index.cmp(&b.index))
}

/// Returns the highest ranked candidate.
pub(crate) fn best_of<I>(scored: I) -> Option<Scored>
where
    I: IntoIterator<Item = Scored>,
{
    scored
        .into_iter()
        .min_by(scored_cmp_desc)
}

/// Top-K container with O(k) insertion cost.
pub(crate) struct TopK {
    k: usize,
    items: Vec<Scored>,
}

impl TopK {
    pub(crate) fn new(k: usize) -> Self {
        Self {
            k,
            items: Vec::with_capacity(k),
        }
    }

    /// Pushes a candidate, evicting the lowest ranked one if at capacity.
    pub(crate) fn push(&mut self, item: Scored) {
        if self.k == 0 {
            return;
        }
        if self.items.len() < self.k {
            self.items.push(item);
            return;
        }

        let mut worst_idx = 0usize;
        for (idx, kept) in self.items.iter().enumerate().skip(1) {
            if scored_cmp_desc(kept, &self.items[worst_idx]) == Ordering::Greater {
                worst_idx = idx;
            }
        }
        if scored_cmp_desc(&item, &self.items[worst_idx]) == Ordering::Less {
            self.items[worst_idx] = item;
        }
    }

    /// Returns candidates from best to worst.
    pub(crate) fn into_sorted_desc(mut self) -> Vec<Scored> {
        self.items.sort_by(scored_cmp_desc);
        self.items
    }
}

#[cfg(test)]
mod tests {
    use super::{best_of, Scored, TopK};
    use crate::kernel::{Offset, OffsetScore};

    fn scored(index: usize, score: f32) -> Scored {
        Scored {
            index,
            best: OffsetScore {
                score,
                offset: Offset::ZERO,
            },
        }
    }

    #[test]
    fn ties_go_to_lower_index() {
        let best = best_of([scored(2, 0.5), scored(0, 0.5), scored(1, 0.4)]).unwrap();
        assert_eq!(best.index, 0);
    }

    #[test]
    fn topk_keeps_best_in_order() {
        let mut topk = TopK::new(2);
        for item in [scored(0, 0.1), scored(1, 0.9), scored(2, 0.5), scored(3, 0.9)] {
            topk.push(item);
        }
        let kept: Vec<_> = topk.into_sorted_desc().iter().map(|s| s.index).collect();
        assert_eq!(kept, vec![1, 3]);
    }

    #[test]
    fn zero_capacity_keeps_nothing() {
        let mut topk = TopK::new(0);
        topk.push(scored(0, 1.0));
        assert!(topk.into_sorted_desc().is_empty());
    }
}
