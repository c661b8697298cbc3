use serde_json::Value;

use crate::handles::HandlerId;
use crate::monitor::Monitor;

/// Behavior of a draggable thing.
///
/// Only [`DragSource::begin_drag`] is required; the other methods default to
/// the conventional behavior. Implementations that need to record state
/// across calls (the methods take `&self` so a handler can be shared with the
/// registry) use interior mutability.
pub trait DragSource {
    /// Produce the dragged item. Must return a plain data object
    /// ([`Value::Object`]); anything else aborts the drag.
    fn begin_drag(&self, monitor: Monitor<'_>, handle: HandlerId) -> Value;

    /// Whether a drag may start from this source right now.
    fn can_drag(&self, _monitor: Monitor<'_>, _handle: HandlerId) -> bool {
        true
    }

    /// Called when the drag operation ends, whether or not a drop happened.
    /// `monitor.drop_result()` holds the final result at this point.
    fn end_drag(&self, _monitor: Monitor<'_>, _handle: HandlerId) {}

    /// Whether this source should present itself as the one being dragged.
    ///
    /// The default compares the handle against the session's active source,
    /// which is right for almost every source.
    fn is_dragging(&self, monitor: Monitor<'_>, handle: HandlerId) -> bool {
        monitor.source_id() == Some(handle)
    }
}

/// Behavior of a place things can be dropped on.
///
/// All methods have defaults; a unit struct is a valid (if inert) target.
pub trait DropTarget {
    /// Whether this target accepts the current drag right now. Type matching
    /// has already been checked when this is consulted.
    fn can_drop(&self, _monitor: Monitor<'_>, _handle: HandlerId) -> bool {
        true
    }

    /// Handle a drop. Return `Some` plain data object to publish a drop
    /// result, or `None` to fall through to the default result (`true`).
    fn drop(&self, _monitor: Monitor<'_>, _handle: HandlerId) -> Option<Value> {
        None
    }

    /// Called while the drag hovers this target.
    fn hover(&self, _monitor: Monitor<'_>, _handle: HandlerId) {}
}
