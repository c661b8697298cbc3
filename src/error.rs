use crate::handles::{HandlerId, HandlerKind};
use crate::types::ItemType;

/// Everything that can go wrong while driving a drag-and-drop session.
///
/// Every variant is a programming-contract violation surfaced at the offending
/// call; none of them is a recoverable runtime condition, and a failed call
/// never leaves the session in a partially-applied state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DragDropError {
    /// A type identifier was rejected at construction (empty or blank).
    InvalidType(String),
    /// A handle of one kind was presented where the other kind was expected.
    WrongKind {
        handle: HandlerId,
        expected: HandlerKind,
    },
    /// The handle is unknown, or was already removed.
    NotFound(HandlerId),
    /// The source's `can_drag` predicate vetoed the drag.
    CanDragDenied(HandlerId),
    /// The source's `begin_drag` did not produce a plain data object.
    InvalidItem,
    /// A drag was begun while another one is still in flight.
    AlreadyDragging,
    /// The operation requires an in-flight drag, but the session is idle.
    NotDragging,
    /// At most one drop is allowed per drag operation.
    AlreadyDropped,
    /// A hovered or dropped-on id did not resolve to a usable drop target.
    InvalidTargets(String),
    /// The target does not accept the dragged item's type.
    TypeMismatch {
        target: HandlerId,
        item_type: ItemType,
    },
    /// The target's `can_drop` predicate vetoed the drop.
    CanDropDenied(HandlerId),
    /// The target's `drop` returned something that is neither `None` nor a
    /// plain data object.
    InvalidDropResult,
}

impl std::fmt::Display for DragDropError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidType(what) => write!(f, "invalid type identifier: {what}"),
            Self::WrongKind { handle, expected } => {
                write!(f, "handle {handle} is not a {expected} handle")
            }
            Self::NotFound(handle) => write!(f, "no registered handler for {handle}"),
            Self::CanDragDenied(handle) => write!(f, "source {handle} cannot be dragged"),
            Self::InvalidItem => write!(f, "begin_drag must return a plain data object"),
            Self::AlreadyDragging => write!(f, "cannot begin a drag while one is in flight"),
            Self::NotDragging => write!(f, "no drag operation is in flight"),
            Self::AlreadyDropped => write!(f, "a drop was already performed in this operation"),
            Self::InvalidTargets(what) => write!(f, "invalid drop target list: {what}"),
            Self::TypeMismatch { target, item_type } => {
                write!(f, "target {target} does not accept items of type `{item_type}`")
            }
            Self::CanDropDenied(handle) => write!(f, "target {handle} cannot accept this drop"),
            Self::InvalidDropResult => {
                write!(f, "drop must return a plain data object or nothing")
            }
        }
    }
}

impl std::error::Error for DragDropError {}
