use crate::types::Point;

/// Pointer offsets reported by the input backend along with a hover.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PointerOffsets {
    pub client_offset: Option<Point>,
    pub page_offset: Option<Point>,
}

/// The offset sub-state of a drag operation.
///
/// Set atomically on begin, replaced on hover, cleared on end/drop. The
/// hover transition reports "unchanged" when the incoming client offset is
/// coordinate-equal to the current one, so downstream change detection never
/// has to deep-compare.
#[derive(Clone, Debug, Default, PartialEq)]
pub(crate) struct OffsetState {
    pub(crate) initial_source_client_offset: Option<Point>,
    pub(crate) initial_client_offset: Option<Point>,
    pub(crate) client_offset: Option<Point>,
    pub(crate) page_offset: Option<Point>,
}

impl OffsetState {
    pub(crate) fn begin(
        source_client_offset: Option<Point>,
        client_offset: Option<Point>,
        page_offset: Option<Point>,
    ) -> Self {
        Self {
            initial_source_client_offset: source_client_offset,
            initial_client_offset: client_offset,
            client_offset,
            page_offset,
        }
    }

    /// `None` means the hover did not move the pointer: keep the old state.
    pub(crate) fn hover(&self, offsets: PointerOffsets) -> Option<Self> {
        if self.client_offset == offsets.client_offset {
            return None;
        }
        Some(Self {
            client_offset: offsets.client_offset,
            page_offset: offsets.page_offset,
            ..self.clone()
        })
    }

    /// Where the dragged source's own origin currently is: the pointer
    /// position shifted by the grab offset captured at begin.
    pub(crate) fn source_client_offset(&self) -> Option<Point> {
        let client = self.client_offset?;
        let initial = self.initial_client_offset?;
        let initial_source = self.initial_source_client_offset?;
        Some(client + initial_source - initial)
    }

    /// How far the pointer has travelled since the drag began.
    pub(crate) fn difference_from_initial_offset(&self) -> Option<Point> {
        let client = self.client_offset?;
        let initial = self.initial_client_offset?;
        Some(client - initial)
    }
}
