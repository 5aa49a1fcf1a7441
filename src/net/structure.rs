//! P/T 网静态结构元素：库所、迁移、三类弧、替换标签与标识。
use std::fmt;

use serde::Serialize;

use crate::net::ids::{NameId, PlaceId, TransitionId};
use crate::net::index_vec::IndexVec;
use crate::net::names::serialize_lossy;

/// Arc multiplicity. Signed because input arcs use [`TEST_ARC_WEIGHT`].
pub type Weight = i64;

/// Stored in place of a zero input-arc multiplicity.
pub const TEST_ARC_WEIGHT: Weight = -1;

#[derive(Clone, Copy, Serialize, PartialEq, Eq, Hash, Debug)]
pub struct Place {
    pub name: NameId,
    /// Kept as read; only positive counts mark the place.
    pub tokens: i64,
}

impl Place {
    pub fn new(name: NameId, tokens: i64) -> Self {
        Self { name, tokens }
    }
}

#[derive(Clone, Copy, Serialize, PartialEq, Eq, Hash, Debug)]
pub struct Transition {
    pub name: NameId,
    pub labelled: bool,
}

impl Transition {
    pub fn new(name: NameId) -> Self {
        Self {
            name,
            labelled: false,
        }
    }
}

/// place → transition.
#[derive(Clone, Copy, Serialize, PartialEq, Eq, Hash)]
pub struct InputArc {
    pub place: PlaceId,
    pub transition: TransitionId,
    pub weight: Weight,
}

impl InputArc {
    /// Builds an input arc, mapping a non-positive multiplicity to [`TEST_ARC_WEIGHT`].
    pub fn new(place: PlaceId, transition: TransitionId, weight: Weight) -> Self {
        Self {
            place,
            transition,
            weight: if weight > 0 { weight } else { TEST_ARC_WEIGHT },
        }
    }
}

impl fmt::Debug for InputArc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InputArc")
            .field("place", &self.place)
            .field("transition", &self.transition)
            .field("weight", &self.weight)
            .finish()
    }
}

/// transition → place.
#[derive(Clone, Copy, Serialize, PartialEq, Eq, Hash, Debug)]
pub struct OutputArc {
    pub transition: TransitionId,
    pub place: PlaceId,
    pub weight: Weight,
}

impl OutputArc {
    pub fn new(transition: TransitionId, place: PlaceId, weight: Weight) -> Self {
        Self {
            transition,
            place,
            weight,
        }
    }
}

/// transition → transition precedence; carries no multiplicity.
#[derive(Clone, Copy, Serialize, PartialEq, Eq, Hash, Debug)]
pub struct PriorityArc {
    pub dominant: TransitionId,
    pub dominated: TransitionId,
}

impl PriorityArc {
    pub fn new(dominant: TransitionId, dominated: TransitionId) -> Self {
        Self {
            dominant,
            dominated,
        }
    }
}

/// Raw `{*HSN(...)}` payload waiting to be decoded.
#[derive(Clone, Serialize, PartialEq, Eq, Debug)]
pub struct SubstitutionLabel {
    pub transition: TransitionId,
    #[serde(serialize_with = "serialize_lossy")]
    pub payload: Vec<u8>,
}

#[derive(Clone, Serialize, PartialEq, Eq)]
pub struct Marking(pub IndexVec<PlaceId, i64>);

impl Marking {
    pub fn new(initial: IndexVec<PlaceId, i64>) -> Self {
        Self(initial)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (PlaceId, &i64)> {
        self.0.iter_enumerated()
    }

    pub fn tokens(&self, place: PlaceId) -> i64 {
        self.0[place]
    }

    /// Places holding at least one token, in place order.
    pub fn marked(&self) -> impl Iterator<Item = (PlaceId, i64)> {
        self.iter()
            .filter(|(_, tokens)| **tokens > 0)
            .map(|(place, tokens)| (place, *tokens))
    }
}

impl fmt::Debug for Marking {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut map = f.debug_map();
        for (place, tokens) in self.iter() {
            map.entry(&place, tokens);
        }
        map.finish()
    }
}
