//! 名字表：按声明顺序保存全部库所与迁移名，索引即句柄。
//!
//! 库所与迁移共享同一命名空间，任意两个已声明实体不得重名。查找总是先查库所、后查迁移，
//! 弧方向的判定依赖这一顺序。名字是输入中的原始字节，逐字节比较，只在日志与错误信息中
//! 转成文本。
use std::borrow::Cow;

use indexmap::IndexMap;
use serde::{Serialize, Serializer};

use crate::error::{Result, TranslateError};
use crate::net::ids::{NameId, PlaceId, TransitionId};
use crate::net::index_vec::Idx;

/// Readable form of a raw name for messages; invalid UTF-8 becomes U+FFFD.
pub fn display_name(text: &[u8]) -> Cow<'_, str> {
    String::from_utf8_lossy(text)
}

/// `serialize_with` helper for raw byte fields.
pub fn serialize_lossy<S: Serializer>(
    text: &[u8],
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    serializer.serialize_str(&display_name(text))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum NameOwner {
    Place(PlaceId),
    Transition(TransitionId),
}

/// Append-only arena of declared names.
#[derive(Debug, Default, Clone)]
pub struct NameTable {
    names: IndexMap<Box<[u8]>, NameOwner>,
}

impl NameTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `text` for `owner` and returns its handle.
    ///
    /// Fails with [`TranslateError::DuplicateName`] when any place or transition already
    /// uses the name.
    pub fn register(&mut self, text: &[u8], owner: NameOwner) -> Result<NameId> {
        if self.is_duplicate(text) {
            return Err(TranslateError::DuplicateName {
                name: display_name(text).into_owned(),
            });
        }
        self.names
            .try_reserve(1)
            .map_err(TranslateError::exhausted("names"))?;
        let (idx, _) = self.names.insert_full(text.into(), owner);
        Ok(NameId::from_usize(idx))
    }

    pub fn text_of(&self, id: NameId) -> &[u8] {
        self.names
            .get_index(id.index())
            .map(|(text, _)| &**text)
            .unwrap_or_default()
    }

    pub fn is_duplicate(&self, text: &[u8]) -> bool {
        self.find_place(text).is_some() || self.find_transition(text).is_some()
    }

    pub fn find_place(&self, text: &[u8]) -> Option<PlaceId> {
        match self.names.get(text) {
            Some(NameOwner::Place(place)) => Some(*place),
            _ => None,
        }
    }

    pub fn find_transition(&self, text: &[u8]) -> Option<TransitionId> {
        match self.names.get(text) {
            Some(NameOwner::Transition(transition)) => Some(*transition),
            _ => None,
        }
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn handles_survive_growth() {
        let mut table = NameTable::new();
        let first = table
            .register(b"p0", NameOwner::Place(PlaceId::new(0)))
            .unwrap();
        for i in 1..2000u32 {
            table
                .register(format!("p{i}").as_bytes(), NameOwner::Place(PlaceId::new(i)))
                .unwrap();
        }
        assert_eq!(table.text_of(first), b"p0");
        assert_eq!(table.len(), 2000);
    }

    #[test]
    fn names_are_unique_across_categories() {
        let mut table = NameTable::new();
        table
            .register(b"a", NameOwner::Place(PlaceId::new(0)))
            .unwrap();
        let err = table
            .register(b"a", NameOwner::Transition(TransitionId::new(0)))
            .unwrap_err();
        assert!(matches!(err, TranslateError::DuplicateName { name } if name == "a"));
        assert!(table.is_duplicate(b"a"));
        assert!(!table.is_duplicate(b"b"));
    }

    #[test]
    fn lookups_respect_category() {
        let mut table = NameTable::new();
        table
            .register(b"p", NameOwner::Place(PlaceId::new(0)))
            .unwrap();
        let id = table
            .register(b"t", NameOwner::Transition(TransitionId::new(0)))
            .unwrap();
        assert_eq!(table.find_place(b"p"), Some(PlaceId::new(0)));
        assert_eq!(table.find_place(b"t"), None);
        assert_eq!(table.find_transition(b"t"), Some(TransitionId::new(0)));
        assert_eq!(table.find_transition(b"p"), None);
        assert_eq!(table.text_of(id), b"t");
    }

    #[test]
    fn bytes_that_decode_alike_stay_distinct() {
        let mut table = NameTable::new();
        table
            .register(b"\xe0", NameOwner::Place(PlaceId::new(0)))
            .unwrap();
        table
            .register(b"\xe1", NameOwner::Place(PlaceId::new(1)))
            .unwrap();
        assert_eq!(display_name(b"\xe0"), display_name(b"\xe1"));
        assert_eq!(table.find_place(b"\xe1"), Some(PlaceId::new(1)));
    }
}
