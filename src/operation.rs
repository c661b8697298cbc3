use serde_json::Value;

use crate::handles::HandlerId;
use crate::types::ItemType;

/// The drag-operation slice of the session state.
///
/// Everything is `None`/empty while idle. `item_type` is `Some` exactly while
/// a drag is in flight; `did_drop` distinguishes the dragging and dropped
/// phases of that flight. Transitions never mutate in place — each one builds
/// the successor state.
#[derive(Clone, Debug, Default, PartialEq)]
pub(crate) struct OperationState {
    pub(crate) item_type: Option<ItemType>,
    pub(crate) item: Option<Value>,
    pub(crate) source_id: Option<HandlerId>,
    /// Hovered targets, ordered outermost → innermost. The last entry is the
    /// shallow (topmost) target.
    pub(crate) target_ids: Vec<HandlerId>,
    pub(crate) drop_result: Option<Value>,
    pub(crate) did_drop: bool,
    pub(crate) is_source_public: bool,
}

impl OperationState {
    pub(crate) fn begin(
        item_type: ItemType,
        item: Value,
        source_id: HandlerId,
        is_source_public: bool,
    ) -> Self {
        Self {
            item_type: Some(item_type),
            item: Some(item),
            source_id: Some(source_id),
            target_ids: Vec::new(),
            drop_result: None,
            did_drop: false,
            is_source_public,
        }
    }

    pub(crate) fn is_dragging(&self) -> bool {
        self.item_type.is_some()
    }

    pub(crate) fn with_targets(&self, target_ids: Vec<HandlerId>) -> Self {
        Self {
            target_ids,
            ..self.clone()
        }
    }

    pub(crate) fn without_target(&self, target_id: HandlerId) -> Self {
        let mut next = self.clone();
        next.target_ids.retain(|&id| id != target_id);
        next
    }

    pub(crate) fn dropped(&self, drop_result: Value) -> Self {
        Self {
            drop_result: Some(drop_result),
            did_drop: true,
            target_ids: Vec::new(),
            ..self.clone()
        }
    }

    pub(crate) fn published(&self) -> Self {
        Self {
            is_source_public: true,
            ..self.clone()
        }
    }
}
