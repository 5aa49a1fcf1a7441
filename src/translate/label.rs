//! 替换标签解码：`子网名 (类型 宿主库所 局部序号)*`，按出现顺序编码为有符号数对。
use std::fmt;

use log::trace;
use serde::Serialize;

use crate::error::{Result, TranslateError};
use crate::ndr::scanner::{Cursor, atoi};
use crate::net::core::NetModel;
use crate::net::ids::{PlaceId, TransitionId};
use crate::net::names::{display_name, serialize_lossy};
use crate::net::structure::SubstitutionLabel;

/// Role of a sub-net boundary place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BoundaryRole {
    Input,
    Output,
    Start,
    Finish,
}

impl BoundaryRole {
    pub fn from_tag(tag: &[u8]) -> Option<Self> {
        match tag {
            b"i" => Some(BoundaryRole::Input),
            b"o" => Some(BoundaryRole::Output),
            b"s" => Some(BoundaryRole::Start),
            b"f" => Some(BoundaryRole::Finish),
            _ => None,
        }
    }

    pub fn tag(self) -> char {
        match self {
            BoundaryRole::Input => 'i',
            BoundaryRole::Output => 'o',
            BoundaryRole::Start => 's',
            BoundaryRole::Finish => 'f',
        }
    }

    /// Packs host ordinal `hp` and local index `lp` into the signed LSN pair.
    pub fn encode(self, hp: i64, lp: i64) -> (i64, i64) {
        match self {
            BoundaryRole::Input => (hp, lp),
            BoundaryRole::Output => (hp, -lp),
            BoundaryRole::Start => (-hp, lp),
            BoundaryRole::Finish => (-hp, -lp),
        }
    }
}

impl fmt::Display for BoundaryRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tag())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BoundaryMapping {
    pub role: BoundaryRole,
    pub host: PlaceId,
    pub local: i64,
}

impl BoundaryMapping {
    pub fn encode(&self) -> (i64, i64) {
        self.role.encode(self.host.ordinal(), self.local)
    }
}

/// A substitution label with every host place resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DecodedLabel {
    pub transition: TransitionId,
    #[serde(serialize_with = "serialize_lossy")]
    pub subnet: Vec<u8>,
    pub mappings: Vec<BoundaryMapping>,
}

/// Decodes one pending label against the places of `net`.
pub fn decode_label(net: &NetModel, label: &SubstitutionLabel) -> Result<DecodedLabel> {
    let mut cursor = Cursor::new(&label.payload);
    cursor.skip_space();
    let subnet = cursor.name()?;

    let mut triples = Vec::new();
    loop {
        // A trailing blank still opens a triple.
        if cursor.at_end() {
            break;
        }
        cursor.skip_space();
        let before = cursor.rest().len();
        let tag = cursor.name()?;
        cursor.skip_space();
        let host = cursor.name()?;
        cursor.skip_space();
        let local = cursor.name()?;
        triples.push((tag, host, local));
        if cursor.rest().len() == before {
            // Stuck on a token terminator such as `*`.
            break;
        }
    }

    let mut mappings = Vec::with_capacity(triples.len());
    for (tag, host, local) in triples {
        let host = net
            .find_place(host)
            .ok_or_else(|| TranslateError::InvalidLabelPlaceName {
                transition: label.transition,
                name: display_name(host).into_owned(),
            })?;
        let local = atoi(local);
        let role = BoundaryRole::from_tag(tag).ok_or_else(|| {
            TranslateError::InvalidLabelPlaceType {
                transition: label.transition,
                tag: display_name(tag).into_owned(),
            }
        })?;
        trace!(
            "transition {}: {} {} -> {}",
            label.transition, role, host, local
        );
        mappings.push(BoundaryMapping { role, host, local });
    }

    Ok(DecodedLabel {
        transition: label.transition,
        subnet: subnet.to_vec(),
        mappings,
    })
}

/// Decodes every pending label of `net` in declaration order.
pub fn decode_labels(net: &NetModel) -> Result<Vec<DecodedLabel>> {
    net.labels
        .iter()
        .map(|label| decode_label(net, label))
        .collect()
}
