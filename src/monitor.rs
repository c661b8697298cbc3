use serde_json::Value;

use crate::error::DragDropError;
use crate::handles::HandlerId;
use crate::registry::HandlerRegistry;
use crate::snapshot::Snapshot;
use crate::types::{ItemType, Point};

/// Read-only view over the current session state and registry.
///
/// A `Monitor` is a cheap `Copy` borrow handed out by
/// [`DragDropManager::monitor`](crate::DragDropManager::monitor) and passed
/// into every handler callback. No query mutates anything, and every query
/// reads the same committed snapshot for as long as the view lives.
#[derive(Clone, Copy)]
pub struct Monitor<'a> {
    snapshot: &'a Snapshot,
    registry: &'a HandlerRegistry,
}

impl<'a> Monitor<'a> {
    pub(crate) fn new(snapshot: &'a Snapshot, registry: &'a HandlerRegistry) -> Self {
        Self { snapshot, registry }
    }

    /// Monotonic version of the session state; bumps on every committed
    /// transition.
    pub fn state_id(&self) -> u64 {
        self.snapshot.state_id
    }

    pub fn is_dragging(&self) -> bool {
        self.snapshot.operation.is_dragging()
    }

    /// Pre-flight check: could a drag start from this source right now?
    ///
    /// Runs the same predicate `begin_drag` will enforce, without side
    /// effects. Loud on unknown or wrong-kind handles — asking about a
    /// handler that does not exist is a programming error.
    pub fn can_drag_source(&self, source_id: HandlerId) -> Result<bool, DragDropError> {
        let source = self
            .registry
            .get_source(source_id)?
            .ok_or(DragDropError::NotFound(source_id))?;
        if self.is_dragging() {
            return Ok(false);
        }
        Ok(source.can_drag(*self, source_id))
    }

    /// Pre-flight check: would a drop on this target be accepted right now?
    pub fn can_drop_on_target(&self, target_id: HandlerId) -> Result<bool, DragDropError> {
        let target = self
            .registry
            .get_target(target_id)?
            .ok_or(DragDropError::NotFound(target_id))?;
        if !self.is_dragging() || self.did_drop() {
            return Ok(false);
        }
        let target_types = self.registry.get_target_type(target_id)?;
        let Some(item_type) = self.item_type() else {
            return Ok(false);
        };
        Ok(target_types.matches(item_type) && target.can_drop(*self, target_id))
    }

    /// Whether this source should present drag feedback. `false` while the
    /// drag is unpublished, for sources of a different type, and for every
    /// source when idle; unknown handles are quietly not-dragging.
    pub fn is_dragging_source(&self, source_id: HandlerId) -> bool {
        if !self.is_dragging() || !self.is_source_public() {
            return false;
        }
        let Ok(Some(source)) = self.registry.get_source(source_id) else {
            return false;
        };
        let Ok(source_type) = self.registry.get_source_type(source_id) else {
            return false;
        };
        if Some(source_type) != self.item_type() {
            return false;
        }
        source.is_dragging(*self, source_id)
    }

    /// Whether the drag is currently over this target. With `shallow` only
    /// the topmost (last) entry of the hover list counts.
    pub fn is_over_target(&self, target_id: HandlerId, shallow: bool) -> bool {
        if !self.is_dragging() {
            return false;
        }
        let Ok(target_types) = self.registry.get_target_type(target_id) else {
            return false;
        };
        let Some(item_type) = self.item_type() else {
            return false;
        };
        if !target_types.matches(item_type) {
            return false;
        }
        let target_ids = self.target_ids();
        if shallow {
            target_ids.last() == Some(&target_id)
        } else {
            target_ids.contains(&target_id)
        }
    }

    pub fn item_type(&self) -> Option<&'a ItemType> {
        self.snapshot.operation.item_type.as_ref()
    }

    pub fn item(&self) -> Option<&'a Value> {
        self.snapshot.operation.item.as_ref()
    }

    pub fn source_id(&self) -> Option<HandlerId> {
        self.snapshot.operation.source_id
    }

    /// Hovered targets, outermost → innermost.
    pub fn target_ids(&self) -> &'a [HandlerId] {
        &self.snapshot.operation.target_ids
    }

    pub fn drop_result(&self) -> Option<&'a Value> {
        self.snapshot.operation.drop_result.as_ref()
    }

    pub fn did_drop(&self) -> bool {
        self.snapshot.operation.did_drop
    }

    pub fn is_source_public(&self) -> bool {
        self.snapshot.operation.is_source_public
    }

    pub fn initial_source_client_offset(&self) -> Option<Point> {
        self.snapshot.offset.initial_source_client_offset
    }

    pub fn initial_client_offset(&self) -> Option<Point> {
        self.snapshot.offset.initial_client_offset
    }

    pub fn client_offset(&self) -> Option<Point> {
        self.snapshot.offset.client_offset
    }

    pub fn page_offset(&self) -> Option<Point> {
        self.snapshot.offset.page_offset
    }

    pub fn source_client_offset(&self) -> Option<Point> {
        self.snapshot.offset.source_client_offset()
    }

    pub fn difference_from_initial_offset(&self) -> Option<Point> {
        self.snapshot.offset.difference_from_initial_offset()
    }
}
