use crate::dirty::DirtyHandlerIds;
use crate::offset::OffsetState;
use crate::operation::OperationState;

/// One committed version of the whole session state.
///
/// `state_id` advances on every committed transition, so "did anything
/// happen" is a single integer comparison. `offset_rev` advances only when
/// the offset sub-state really changed, which is what offset subscribers key
/// off.
#[derive(Clone, Debug)]
pub(crate) struct Snapshot {
    pub(crate) state_id: u64,
    pub(crate) offset_rev: u64,
    pub(crate) operation: OperationState,
    pub(crate) offset: OffsetState,
    /// Output of the dirty tracker for the transition that produced this
    /// snapshot.
    pub(crate) dirty: DirtyHandlerIds,
}

impl Default for Snapshot {
    fn default() -> Self {
        Self {
            state_id: 0,
            offset_rev: 0,
            operation: OperationState::default(),
            offset: OffsetState::default(),
            dirty: DirtyHandlerIds::None,
        }
    }
}
