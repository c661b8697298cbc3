use std::rc::Rc;

use crate::error::DragDropError;
use crate::handles::{HandlerId, HandlerKind};
use crate::handlers::{DragSource, DropTarget};
use crate::types::{ItemType, TargetTypes};

struct SourceEntry {
    item_type: ItemType,
    source: Rc<dyn DragSource>,
}

struct TargetEntry {
    types: TargetTypes,
    target: Rc<dyn DropTarget>,
}

/// Owns every registered handler and the mapping from handles to them.
///
/// Two rules shape the contract:
/// - Lookups degrade gracefully: an unknown or removed handle yields
///   `Ok(None)`, so the state machine can keep querying a source that was
///   unregistered mid-drag.
/// - Kind confusion fails loudly: presenting a target handle to a source
///   operation (or vice versa) is a programming error, not a miss.
#[derive(Default)]
pub struct HandlerRegistry {
    sources: ahash::HashMap<u64, SourceEntry>,
    targets: ahash::HashMap<u64, TargetEntry>,
    next_serial: u64,
}

impl HandlerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    fn allocate(&mut self, kind: HandlerKind) -> HandlerId {
        let serial = self.next_serial;
        self.next_serial += 1;
        HandlerId::new(kind, serial)
    }

    fn check_kind(handle: HandlerId, expected: HandlerKind) -> Result<(), DragDropError> {
        if handle.kind() == expected {
            Ok(())
        } else {
            Err(DragDropError::WrongKind { handle, expected })
        }
    }

    pub fn add_source(&mut self, item_type: ItemType, source: Rc<dyn DragSource>) -> HandlerId {
        let handle = self.allocate(HandlerKind::Source);
        self.sources
            .insert(handle.serial(), SourceEntry { item_type, source });
        handle
    }

    pub fn add_target(&mut self, types: TargetTypes, target: Rc<dyn DropTarget>) -> HandlerId {
        let handle = self.allocate(HandlerKind::Target);
        self.targets
            .insert(handle.serial(), TargetEntry { types, target });
        handle
    }

    pub fn get_source(
        &self,
        handle: HandlerId,
    ) -> Result<Option<Rc<dyn DragSource>>, DragDropError> {
        Self::check_kind(handle, HandlerKind::Source)?;
        Ok(self
            .sources
            .get(&handle.serial())
            .map(|entry| Rc::clone(&entry.source)))
    }

    pub fn get_target(
        &self,
        handle: HandlerId,
    ) -> Result<Option<Rc<dyn DropTarget>>, DragDropError> {
        Self::check_kind(handle, HandlerKind::Target)?;
        Ok(self
            .targets
            .get(&handle.serial())
            .map(|entry| Rc::clone(&entry.target)))
    }

    pub fn get_source_type(&self, handle: HandlerId) -> Result<&ItemType, DragDropError> {
        Self::check_kind(handle, HandlerKind::Source)?;
        self.sources
            .get(&handle.serial())
            .map(|entry| &entry.item_type)
            .ok_or(DragDropError::NotFound(handle))
    }

    pub fn get_target_type(&self, handle: HandlerId) -> Result<&TargetTypes, DragDropError> {
        Self::check_kind(handle, HandlerKind::Target)?;
        self.targets
            .get(&handle.serial())
            .map(|entry| &entry.types)
            .ok_or(DragDropError::NotFound(handle))
    }

    /// Removal is terminal: the handle stays dead forever, and a second
    /// removal of the same handle is an error. Wrong-kind handles are
    /// reported as not-found, matching the "nothing of yours lives here"
    /// reading of the namespaces.
    pub fn remove_source(&mut self, handle: HandlerId) -> Result<(), DragDropError> {
        if !handle.is_source() || self.sources.remove(&handle.serial()).is_none() {
            return Err(DragDropError::NotFound(handle));
        }
        Ok(())
    }

    pub fn remove_target(&mut self, handle: HandlerId) -> Result<(), DragDropError> {
        if !handle.is_target() || self.targets.remove(&handle.serial()).is_none() {
            return Err(DragDropError::NotFound(handle));
        }
        Ok(())
    }
}
