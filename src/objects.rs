//! Static object catalog: nine objects, weights 1-9, geometric shapes.
//!
//! Weight equals id in this ruleset, but the two stay separate attributes so
//! alternate rulesets can reweight without renumbering.

use serde::{Deserialize, Serialize};

use crate::error::GameError;

/// Number of distinct objects; ids run 1..=9.
pub const OBJECT_COUNT: usize = 9;

/// Shape tag for an object. Cosmetic only, no gameplay effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Shape {
    SmallCircle,
    SmallTriangle,
    SmallSquare,
    MediumPentagon,
    MediumHexagon,
    MediumStar,
    LargeOctagon,
    LargeDiamond,
    LargeCircle,
}

impl Shape {
    /// Stable string tag, matching the shipped puzzle art assets.
    pub fn tag(&self) -> &'static str {
        match self {
            Self::SmallCircle => "small-circle",
            Self::SmallTriangle => "small-triangle",
            Self::SmallSquare => "small-square",
            Self::MediumPentagon => "medium-pentagon",
            Self::MediumHexagon => "medium-hexagon",
            Self::MediumStar => "medium-star",
            Self::LargeOctagon => "large-octagon",
            Self::LargeDiamond => "large-diamond",
            Self::LargeCircle => "large-circle",
        }
    }
}

/// A puzzle piece: unique id, swap weight, shape tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameObject {
    pub id: u8,
    pub weight: u8,
    pub shape: Shape,
}

/// The nine objects, ordered by id. Read-only process-wide data.
pub const GAME_OBJECTS: [GameObject; OBJECT_COUNT] = [
    GameObject { id: 1, weight: 1, shape: Shape::SmallCircle },
    GameObject { id: 2, weight: 2, shape: Shape::SmallTriangle },
    GameObject { id: 3, weight: 3, shape: Shape::SmallSquare },
    GameObject { id: 4, weight: 4, shape: Shape::MediumPentagon },
    GameObject { id: 5, weight: 5, shape: Shape::MediumHexagon },
    GameObject { id: 6, weight: 6, shape: Shape::MediumStar },
    GameObject { id: 7, weight: 7, shape: Shape::LargeOctagon },
    GameObject { id: 8, weight: 8, shape: Shape::LargeDiamond },
    GameObject { id: 9, weight: 9, shape: Shape::LargeCircle },
];

/// Look up an object by id.
pub fn object(id: u8) -> Result<&'static GameObject, GameError> {
    if id < 1 || id as usize > OBJECT_COUNT {
        return Err(GameError::UnknownObjectId(id));
    }
    Ok(&GAME_OBJECTS[id as usize - 1])
}

/// Swap weight of the object with the given id.
pub fn weight(id: u8) -> Result<u8, GameError> {
    Ok(object(id)?.weight)
}

/// Shape of the object with the given id.
pub fn shape(id: u8) -> Result<Shape, GameError> {
    Ok(object(id)?.shape)
}

/// All nine objects in id order.
pub fn all_objects() -> &'static [GameObject; OBJECT_COUNT] {
    &GAME_OBJECTS
}

/// Render hints for an object: point size and weight-graded grayscale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ObjectVisual {
    pub size: u8,
    pub color: &'static str,
    pub description: &'static str,
}

/// Visual metadata by id order. Heavier objects render larger and darker.
pub const OBJECT_VISUALS: [ObjectVisual; OBJECT_COUNT] = [
    ObjectVisual { size: 24, color: "#F5F5F5", description: "Small circle - lightest" },
    ObjectVisual { size: 26, color: "#E8E8E8", description: "Small triangle" },
    ObjectVisual { size: 24, color: "#DADADA", description: "Small square" },
    ObjectVisual { size: 32, color: "#BDBDBD", description: "Medium pentagon" },
    ObjectVisual { size: 34, color: "#9E9E9E", description: "Medium hexagon" },
    ObjectVisual { size: 36, color: "#757575", description: "Medium star" },
    ObjectVisual { size: 42, color: "#616161", description: "Large octagon" },
    ObjectVisual { size: 44, color: "#424242", description: "Large diamond" },
    ObjectVisual { size: 48, color: "#212121", description: "Large circle - heaviest" },
];

/// Visual metadata for an object id.
pub fn visual(id: u8) -> Result<&'static ObjectVisual, GameError> {
    if id < 1 || id as usize > OBJECT_COUNT {
        return Err(GameError::UnknownObjectId(id));
    }
    Ok(&OBJECT_VISUALS[id as usize - 1])
}
