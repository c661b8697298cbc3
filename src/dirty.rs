use ahash::HashSet;

use crate::handles::HandlerId;

/// Which handlers' externally observable state may have changed in the last
/// committed transition.
///
/// This exists so that handler-scoped subscribers are only woken for
/// transitions that could have affected them. Over-reporting is safe but
/// wasteful; under-reporting starves subscribers and is a bug.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DirtyHandlerIds {
    /// Nothing observable changed for any individual handler.
    None,
    /// Every handler may be affected (begin/publish/drop/end).
    All,
    /// Exactly these handlers may be affected.
    Handlers(HashSet<HandlerId>),
}

impl DirtyHandlerIds {
    pub(crate) fn single(id: HandlerId) -> Self {
        let mut set = HashSet::default();
        set.insert(id);
        Self::Handlers(set)
    }

    /// Dirty set for a hover transition: targets that entered or left the
    /// hover list, plus both ends of an innermost change (the shallow-hover
    /// predicate flips for those two even when both stay in the list).
    pub(crate) fn for_hover(prev: &[HandlerId], next: &[HandlerId]) -> Self {
        let prev_set: HashSet<HandlerId> = prev.iter().copied().collect();
        let next_set: HashSet<HandlerId> = next.iter().copied().collect();

        let mut dirty: HashSet<HandlerId> =
            prev_set.symmetric_difference(&next_set).copied().collect();
        if prev.last() != next.last() {
            dirty.extend(prev.last().copied());
            dirty.extend(next.last().copied());
        }

        if dirty.is_empty() {
            Self::None
        } else {
            Self::Handlers(dirty)
        }
    }

    /// Whether a subscriber scoped to `handler_ids` should be notified.
    pub fn intersects(&self, handler_ids: &[HandlerId]) -> bool {
        match self {
            Self::None => false,
            Self::All => true,
            Self::Handlers(dirty) => handler_ids.iter().any(|id| dirty.contains(id)),
        }
    }
}
