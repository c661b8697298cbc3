/// Whether a handle refers to a drag source or a drop target.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum HandlerKind {
    Source,
    Target,
}

impl std::fmt::Display for HandlerKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Source => f.write_str("source"),
            Self::Target => f.write_str("target"),
        }
    }
}

/// Opaque identifier for a registered source or target.
///
/// The kind is baked into the handle, so a source handle can always be told
/// apart from a target handle. Serials come from a single monotonically
/// increasing counter and are never reused: once a handler is removed its
/// handle is dead forever.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HandlerId {
    kind: HandlerKind,
    serial: u64,
}

impl HandlerId {
    pub(crate) fn new(kind: HandlerKind, serial: u64) -> Self {
        Self { kind, serial }
    }

    pub fn kind(self) -> HandlerKind {
        self.kind
    }

    pub fn is_source(self) -> bool {
        self.kind == HandlerKind::Source
    }

    pub fn is_target(self) -> bool {
        self.kind == HandlerKind::Target
    }

    pub(crate) fn serial(self) -> u64 {
        self.serial
    }
}

impl std::fmt::Display for HandlerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let prefix = match self.kind {
            HandlerKind::Source => 'S',
            HandlerKind::Target => 'T',
        };
        write!(f, "{prefix}{}", self.serial)
    }
}
