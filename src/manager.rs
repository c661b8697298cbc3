use std::rc::Rc;

use itertools::Itertools as _;
use serde_json::Value;

use crate::dirty::DirtyHandlerIds;
use crate::error::DragDropError;
use crate::handles::HandlerId;
use crate::handlers::{DragSource, DropTarget};
use crate::monitor::Monitor;
use crate::offset::{OffsetState, PointerOffsets};
use crate::operation::OperationState;
use crate::registry::HandlerRegistry;
use crate::snapshot::Snapshot;
use crate::types::{ItemType, TargetTypes};

/// Options for [`DragDropManager::begin_drag`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BeginDragOptions {
    /// Whether the dragged source is immediately visible to
    /// [`Monitor::is_dragging_source`]. Begin with `false` and call
    /// [`DragDropManager::publish_drag_source`] later to keep the source
    /// looking idle until e.g. the first pointer move.
    pub publish_source: bool,
    /// Pointer position when the drag started.
    pub client_offset: Option<crate::Point>,
    /// Origin of the dragged source when the drag started (for rendering a
    /// preview that keeps the grab point).
    pub source_client_offset: Option<crate::Point>,
    /// Pointer position in page/document space, if the backend has one.
    pub page_offset: Option<crate::Point>,
}

impl Default for BeginDragOptions {
    fn default() -> Self {
        Self {
            publish_source: true,
            client_offset: None,
            source_client_offset: None,
            page_offset: None,
        }
    }
}

/// Identifies one subscription; pass it back to
/// [`DragDropManager::unsubscribe`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// A change listener. Stored by `Rc` so that re-subscribing the same closure
/// can be detected and so the manager can fan out without aliasing trouble.
pub type ChangeListener = Rc<dyn Fn(Monitor<'_>)>;

struct StateSubscription {
    id: SubscriptionId,
    listener: ChangeListener,
    /// `None` = fire on every committed transition.
    handler_ids: Option<Vec<HandlerId>>,
}

struct OffsetSubscription {
    id: SubscriptionId,
    listener: ChangeListener,
}

/// The orchestration entry point: owns the registry, the state snapshot and
/// the subscriptions.
///
/// Registration and the four protocol actions (`begin_drag`, `hover`,
/// `drop`, `end_drag`) are the only ways the state changes. Every action is
/// synchronous and all-or-nothing: it either commits a new snapshot and then
/// notifies subscribers (in registration order, before the call returns), or
/// fails and leaves everything untouched.
///
/// Each manager is one independent session container — construct several for
/// several isolated drag contexts.
#[derive(Default)]
pub struct DragDropManager {
    registry: HandlerRegistry,
    snapshot: Snapshot,
    state_subs: Vec<StateSubscription>,
    offset_subs: Vec<OffsetSubscription>,
    next_subscription: u64,
}

impl DragDropManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// A read-only view of the current committed state.
    pub fn monitor(&self) -> Monitor<'_> {
        Monitor::new(&self.snapshot, &self.registry)
    }

    // ------------------------------------------------------------------
    // Registration surface.

    pub fn add_source(&mut self, item_type: ItemType, source: Rc<dyn DragSource>) -> HandlerId {
        let handle = self.registry.add_source(item_type, source);
        log::debug!("registered drag source {handle}");
        self.commit(None, None, DirtyHandlerIds::single(handle));
        handle
    }

    pub fn add_target(&mut self, types: TargetTypes, target: Rc<dyn DropTarget>) -> HandlerId {
        let handle = self.registry.add_target(types, target);
        log::debug!("registered drop target {handle}");
        self.commit(None, None, DirtyHandlerIds::single(handle));
        handle
    }

    /// Removing the active source mid-drag is allowed; the session stays
    /// endable and `end_drag` will simply skip the handler notification.
    pub fn remove_source(&mut self, handle: HandlerId) -> Result<(), DragDropError> {
        self.registry.remove_source(handle)?;
        log::debug!("removed drag source {handle}");
        self.commit(None, None, DirtyHandlerIds::single(handle));
        Ok(())
    }

    /// A removed target also leaves the current hover list, so the list only
    /// ever names live targets.
    pub fn remove_target(&mut self, handle: HandlerId) -> Result<(), DragDropError> {
        self.registry.remove_target(handle)?;
        log::debug!("removed drop target {handle}");
        let operation = self
            .snapshot
            .operation
            .target_ids
            .contains(&handle)
            .then(|| self.snapshot.operation.without_target(handle));
        self.commit(operation, None, DirtyHandlerIds::single(handle));
        Ok(())
    }

    pub fn get_source(
        &self,
        handle: HandlerId,
    ) -> Result<Option<Rc<dyn DragSource>>, DragDropError> {
        self.registry.get_source(handle)
    }

    pub fn get_target(
        &self,
        handle: HandlerId,
    ) -> Result<Option<Rc<dyn DropTarget>>, DragDropError> {
        self.registry.get_target(handle)
    }

    pub fn get_source_type(&self, handle: HandlerId) -> Result<&ItemType, DragDropError> {
        self.registry.get_source_type(handle)
    }

    pub fn get_target_type(&self, handle: HandlerId) -> Result<&TargetTypes, DragDropError> {
        self.registry.get_target_type(handle)
    }

    // ------------------------------------------------------------------
    // Backend-facing protocol actions.

    /// Start a drag from `source_id`. Legal only while idle.
    pub fn begin_drag(
        &mut self,
        source_id: HandlerId,
        options: BeginDragOptions,
    ) -> Result<(), DragDropError> {
        if self.snapshot.operation.is_dragging() {
            return Err(DragDropError::AlreadyDragging);
        }
        let source = self
            .registry
            .get_source(source_id)?
            .ok_or(DragDropError::NotFound(source_id))?;
        let item_type = self.registry.get_source_type(source_id)?.clone();

        let monitor = self.monitor();
        if !source.can_drag(monitor, source_id) {
            return Err(DragDropError::CanDragDenied(source_id));
        }
        let item = source.begin_drag(monitor, source_id);
        if !item.is_object() {
            return Err(DragDropError::InvalidItem);
        }

        log::debug!("begin drag from {source_id} (type `{item_type}`)");
        let operation =
            OperationState::begin(item_type, item, source_id, options.publish_source);
        let offset = OffsetState::begin(
            options.source_client_offset,
            options.client_offset,
            options.page_offset,
        );
        let offset = (offset != self.snapshot.offset).then_some(offset);
        self.commit(Some(operation), offset, DirtyHandlerIds::All);
        Ok(())
    }

    /// Report the ordered list of targets currently under the pointer
    /// (outermost → innermost) plus the pointer offsets. Legal while
    /// dragging, including after a drop.
    ///
    /// A hover that changes nothing — same targets, same client offset — is
    /// a complete no-op: no snapshot commit, no callbacks, no listeners.
    pub fn hover(
        &mut self,
        target_ids: &[HandlerId],
        offsets: PointerOffsets,
    ) -> Result<(), DragDropError> {
        let Some(item_type) = self.snapshot.operation.item_type.clone() else {
            return Err(DragDropError::NotDragging);
        };

        if let Some(dup) = target_ids.iter().duplicates().next() {
            return Err(DragDropError::InvalidTargets(format!(
                "{dup} appears more than once"
            )));
        }
        let mut targets = Vec::with_capacity(target_ids.len());
        for &id in target_ids {
            let target = self
                .registry
                .get_target(id)
                .ok()
                .flatten()
                .ok_or_else(|| {
                    DragDropError::InvalidTargets(format!("{id} is not a registered target"))
                })?;
            let types = self.registry.get_target_type(id)?;
            if !types.matches(&item_type) {
                return Err(DragDropError::InvalidTargets(format!(
                    "{id} does not accept items of type `{item_type}`"
                )));
            }
            targets.push((id, target));
        }

        let targets_changed = self.snapshot.operation.target_ids != target_ids;
        let offset = self.snapshot.offset.hover(offsets);
        if !targets_changed && offset.is_none() {
            log::trace!("hover suppressed: nothing changed");
            return Ok(());
        }

        let monitor = self.monitor();
        for (id, target) in &targets {
            target.hover(monitor, *id);
        }

        log::trace!("hover over {} target(s)", target_ids.len());
        let dirty = DirtyHandlerIds::for_hover(&self.snapshot.operation.target_ids, target_ids);
        let operation = self.snapshot.operation.with_targets(target_ids.to_vec());
        self.commit(Some(operation), offset, dirty);
        Ok(())
    }

    /// Perform the drop. With `None`, drops on the topmost hovered target.
    /// At most one drop per operation.
    pub fn drop(&mut self, target_id: Option<HandlerId>) -> Result<(), DragDropError> {
        let operation = &self.snapshot.operation;
        let Some(item_type) = operation.item_type.clone() else {
            return Err(DragDropError::NotDragging);
        };
        if operation.did_drop {
            return Err(DragDropError::AlreadyDropped);
        }
        let target_id = match target_id {
            Some(id) => id,
            None => operation
                .target_ids
                .last()
                .copied()
                .ok_or_else(|| {
                    DragDropError::InvalidTargets("no hovered target to drop on".to_owned())
                })?,
        };
        let target = self
            .registry
            .get_target(target_id)
            .ok()
            .flatten()
            .ok_or_else(|| {
                DragDropError::InvalidTargets(format!("{target_id} is not a registered target"))
            })?;
        if !self.registry.get_target_type(target_id)?.matches(&item_type) {
            return Err(DragDropError::TypeMismatch {
                target: target_id,
                item_type,
            });
        }

        let monitor = self.monitor();
        if !target.can_drop(monitor, target_id) {
            return Err(DragDropError::CanDropDenied(target_id));
        }
        let drop_result = match DropTarget::drop(&*target, monitor, target_id) {
            None => Value::Bool(true),
            Some(value) if value.is_object() => value,
            Some(_) => return Err(DragDropError::InvalidDropResult),
        };

        log::debug!("dropped on {target_id}");
        let operation = self.snapshot.operation.dropped(drop_result);
        let offset = self.offset_reset();
        self.commit(Some(operation), offset, DirtyHandlerIds::All);
        Ok(())
    }

    /// End the drag operation and reset to idle.
    ///
    /// The final drop result is the drop handler's object if it produced
    /// one, else `true` if a drop occurred, else `false`. The originating
    /// source's `end_drag` observes it through the monitor — unless the
    /// source was removed mid-drag, in which case the notification is
    /// skipped but the reset still happens. Cleanup is never blocked.
    pub fn end_drag(&mut self) -> Result<(), DragDropError> {
        let operation = &self.snapshot.operation;
        let Some(source_id) = operation.source_id else {
            return Err(DragDropError::NotDragging);
        };
        let final_result = if operation.did_drop {
            operation.drop_result.clone().unwrap_or(Value::Bool(true))
        } else {
            Value::Bool(false)
        };

        log::debug!("end drag from {source_id} (result: {final_result})");
        if let Ok(Some(source)) = self.registry.get_source(source_id) {
            // Staged view: the source sees the computed result, not the
            // not-yet-reset snapshot's pending one.
            let mut staged = self.snapshot.clone();
            staged.operation.drop_result = Some(final_result);
            source.end_drag(Monitor::new(&staged, &self.registry), source_id);
        }

        let offset = self.offset_reset();
        self.commit(Some(OperationState::default()), offset, DirtyHandlerIds::All);
        Ok(())
    }

    /// Make an unpublished drag visible to [`Monitor::is_dragging_source`].
    /// No-op when idle or when the source is already public.
    pub fn publish_drag_source(&mut self) {
        let operation = &self.snapshot.operation;
        if !operation.is_dragging() || operation.is_source_public {
            return;
        }
        log::debug!("published drag source");
        let operation = operation.published();
        self.commit(Some(operation), None, DirtyHandlerIds::All);
    }

    // ------------------------------------------------------------------
    // Subscriptions.

    /// Subscribe to committed state transitions. With `handler_ids`, the
    /// listener only fires when the transition's dirty set intersects them;
    /// without, it fires on every commit.
    ///
    /// Re-subscribing the same `Rc`'d listener with the same filter is a
    /// no-op that returns the existing subscription id.
    pub fn subscribe_to_state_change(
        &mut self,
        listener: ChangeListener,
        handler_ids: Option<&[HandlerId]>,
    ) -> SubscriptionId {
        if let Some(existing) = self.state_subs.iter().find(|sub| {
            Rc::ptr_eq(&sub.listener, &listener)
                && sub.handler_ids.as_deref() == handler_ids
        }) {
            return existing.id;
        }
        let id = self.allocate_subscription();
        self.state_subs.push(StateSubscription {
            id,
            listener,
            handler_ids: handler_ids.map(<[HandlerId]>::to_vec),
        });
        id
    }

    /// Subscribe to changes of the offset sub-state only. Fires only when
    /// an offset actually changed — hovers that keep the pointer still are
    /// invisible here.
    pub fn subscribe_to_offset_change(&mut self, listener: ChangeListener) -> SubscriptionId {
        if let Some(existing) = self
            .offset_subs
            .iter()
            .find(|sub| Rc::ptr_eq(&sub.listener, &listener))
        {
            return existing.id;
        }
        let id = self.allocate_subscription();
        self.offset_subs.push(OffsetSubscription { id, listener });
        id
    }

    /// Idempotent: unknown or already-removed ids are a no-op.
    pub fn unsubscribe(&mut self, id: SubscriptionId) {
        self.state_subs.retain(|sub| sub.id != id);
        self.offset_subs.retain(|sub| sub.id != id);
    }

    // ------------------------------------------------------------------
    // Commit plumbing.

    fn allocate_subscription(&mut self) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        id
    }

    fn offset_reset(&self) -> Option<OffsetState> {
        (self.snapshot.offset != OffsetState::default()).then(OffsetState::default)
    }

    /// Commit a transition and notify subscribers. `None` fields keep their
    /// current value; a `Some` offset also bumps `offset_rev`.
    fn commit(
        &mut self,
        operation: Option<OperationState>,
        offset: Option<OffsetState>,
        dirty: DirtyHandlerIds,
    ) {
        self.snapshot.state_id += 1;
        if let Some(operation) = operation {
            self.snapshot.operation = operation;
        }
        let offset_changed = offset.is_some();
        if let Some(offset) = offset {
            self.snapshot.offset = offset;
            self.snapshot.offset_rev += 1;
        }
        self.snapshot.dirty = dirty;
        self.notify(offset_changed);
    }

    fn notify(&self, offset_changed: bool) {
        // Fix the fan-out list before any listener runs.
        let state_listeners: Vec<ChangeListener> = self
            .state_subs
            .iter()
            .filter(|sub| match &sub.handler_ids {
                None => true,
                Some(ids) => self.snapshot.dirty.intersects(ids),
            })
            .map(|sub| Rc::clone(&sub.listener))
            .collect();
        let offset_listeners: Vec<ChangeListener> = if offset_changed {
            self.offset_subs
                .iter()
                .map(|sub| Rc::clone(&sub.listener))
                .collect()
        } else {
            Vec::new()
        };

        let monitor = Monitor::new(&self.snapshot, &self.registry);
        for listener in state_listeners {
            listener(monitor);
        }
        for listener in offset_listeners {
            listener(monitor);
        }
    }
}
