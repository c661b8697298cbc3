use itertools::Itertools as _;

use crate::error::DragDropError;

/// A 2D pointer offset in whatever coordinate space the input backend uses
/// (client pixels, points, cells — this core does not care).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

impl std::ops::Add for Point {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl std::ops::Sub for Point {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// A validated item type identifier.
///
/// Identifiers are arbitrary non-blank strings chosen by the application
/// (`"card"`, `"file/image"`, …). Validation happens here, once, so that a
/// handle is never allocated for a malformed type.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemType(String);

impl ItemType {
    pub fn new(identifier: impl Into<String>) -> Result<Self, DragDropError> {
        let identifier = identifier.into();
        if identifier.trim().is_empty() {
            return Err(DragDropError::InvalidType(
                "identifier must not be empty or blank".to_owned(),
            ));
        }
        Ok(Self(identifier))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ItemType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// The ordered, non-empty set of item types a drop target accepts.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TargetTypes(Vec<ItemType>);

impl TargetTypes {
    pub fn new(types: Vec<ItemType>) -> Result<Self, DragDropError> {
        if types.is_empty() {
            return Err(DragDropError::InvalidType(
                "a target must accept at least one item type".to_owned(),
            ));
        }
        Ok(Self(types))
    }

    /// The matching rule: a target accepting a single type matches by
    /// equality, a target accepting several matches by membership.
    pub fn matches(&self, item_type: &ItemType) -> bool {
        self.0.contains(item_type)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ItemType> {
        self.0.iter()
    }
}

impl From<ItemType> for TargetTypes {
    fn from(item_type: ItemType) -> Self {
        Self(vec![item_type])
    }
}

impl std::fmt::Display for TargetTypes {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0.iter().map(ItemType::as_str).join(" | "))
    }
}
