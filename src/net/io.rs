//! I/O 支持：把解析后的网模型导出为 JSON 或 RON，便于调试与外部工具读取。
use std::borrow::Cow;
use std::fs::File;
use std::io::Write;
use std::path::Path;

use ron::ser::PrettyConfig;
use serde::Serialize;
use thiserror::Error;

use crate::net::core::NetModel;
use crate::net::names::display_name;
use crate::net::structure::Weight;
use crate::translate::label::DecodedLabel;

#[derive(Debug, Error)]
pub enum IoError {
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("ron error: {0}")]
    Ron(#[from] ron::Error),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Serialize)]
pub struct PlaceEntry<'a> {
    pub id: i64,
    pub name: Cow<'a, str>,
    pub tokens: i64,
}

#[derive(Debug, Serialize)]
pub struct TransitionEntry<'a> {
    pub id: i64,
    pub name: Cow<'a, str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<Cow<'a, str>>,
}

#[derive(Debug, Serialize)]
pub struct ArcEntry<'a> {
    pub from: Cow<'a, str>,
    pub to: Cow<'a, str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<Weight>,
}

/// Name-resolved view of a [`NetModel`], the shape written by `--dump-model`.
#[derive(Debug, Serialize)]
pub struct NetSnapshot<'a> {
    pub name: Option<&'a str>,
    pub places: Vec<PlaceEntry<'a>>,
    pub transitions: Vec<TransitionEntry<'a>>,
    pub input_arcs: Vec<ArcEntry<'a>>,
    pub output_arcs: Vec<ArcEntry<'a>>,
    pub priority_arcs: Vec<ArcEntry<'a>>,
    pub substitutions: &'a [DecodedLabel],
}

impl<'a> NetSnapshot<'a> {
    pub fn new(net: &'a NetModel, substitutions: &'a [DecodedLabel]) -> Self {
        let places = net
            .places
            .iter_enumerated()
            .map(|(id, place)| PlaceEntry {
                id: id.ordinal(),
                name: display_name(net.place_name(id)),
                tokens: place.tokens,
            })
            .collect();
        let transitions = net
            .transitions
            .indices()
            .map(|id| TransitionEntry {
                id: id.ordinal(),
                name: display_name(net.transition_name(id)),
                label: net
                    .labels
                    .iter()
                    .find(|label| label.transition == id)
                    .map(|label| display_name(&label.payload)),
            })
            .collect();
        let input_arcs = net
            .input_arcs
            .iter()
            .map(|arc| ArcEntry {
                from: display_name(net.place_name(arc.place)),
                to: display_name(net.transition_name(arc.transition)),
                weight: Some(arc.weight),
            })
            .collect();
        let output_arcs = net
            .output_arcs
            .iter()
            .map(|arc| ArcEntry {
                from: display_name(net.transition_name(arc.transition)),
                to: display_name(net.place_name(arc.place)),
                weight: Some(arc.weight),
            })
            .collect();
        let priority_arcs = net
            .priority_arcs
            .iter()
            .map(|arc| ArcEntry {
                from: display_name(net.transition_name(arc.dominant)),
                to: display_name(net.transition_name(arc.dominated)),
                weight: None,
            })
            .collect();
        Self {
            name: net.name.as_deref(),
            places,
            transitions,
            input_arcs,
            output_arcs,
            priority_arcs,
            substitutions,
        }
    }
}

pub fn to_json_string<T>(value: &T) -> Result<String, IoError>
where
    T: Serialize,
{
    Ok(serde_json::to_string_pretty(value)?)
}

pub fn to_ron_string<T>(value: &T) -> Result<String, IoError>
where
    T: Serialize,
{
    let mut pretty = PrettyConfig::default();
    pretty.new_line = "\n".into();
    Ok(ron::ser::to_string_pretty(value, pretty)?)
}

/// Writes `value` as RON when `path` ends in `.ron`, JSON otherwise.
pub fn write_dump<P: AsRef<Path>, T: Serialize>(path: P, value: &T) -> Result<(), IoError> {
    let path = path.as_ref();
    let content = match path.extension().and_then(|ext| ext.to_str()) {
        Some("ron") => to_ron_string(value)?,
        _ => to_json_string(value)?,
    };
    let mut file = File::create(path)?;
    file.write_all(content.as_bytes())?;
    Ok(())
}
