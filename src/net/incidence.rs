//! 输入、输出弧的稠密邻接矩阵（库所 × 迁移），供矩阵格式输出使用.
use std::fmt;

use serde::Serialize;
use smallvec::SmallVec;

use crate::net::ids::{PlaceId, TransitionId};
use crate::net::index_vec::{Idx, IndexVec};

pub(crate) type SmallRow<T> = SmallVec<[T; 4]>;

#[derive(Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Incidence<T> {
    rows: IndexVec<PlaceId, SmallRow<T>>,
    cols: usize,
}

impl<T> Incidence<T>
where
    T: Clone,
{
    pub fn new(places: usize, transitions: usize, default: T) -> Self {
        Self {
            rows: IndexVec::from_elem(SmallRow::from_elem(default, transitions), places),
            cols: transitions,
        }
    }

    pub fn places(&self) -> usize {
        self.rows.len()
    }

    pub fn transitions(&self) -> usize {
        self.cols
    }

    pub fn set(&mut self, place: PlaceId, transition: TransitionId, value: T) {
        self.rows[place][transition.index()] = value;
    }

    pub fn get(&self, place: PlaceId, transition: TransitionId) -> &T {
        &self.rows[place][transition.index()]
    }

    pub fn rows(&self) -> &IndexVec<PlaceId, SmallRow<T>> {
        &self.rows
    }
}

impl<T> fmt::Debug for Incidence<T>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Incidence")
            .field("rows", &self.rows)
            .field("cols", &self.cols)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn later_writes_overwrite() {
        let mut m = Incidence::new(2, 3, 0i64);
        let p = PlaceId::new(1);
        let t = TransitionId::new(2);
        m.set(p, t, 4);
        m.set(p, t, -1);
        assert_eq!(*m.get(p, t), -1);
        assert_eq!(m.places(), 2);
        assert_eq!(m.transitions(), 3);
        assert!(m.rows()[PlaceId::new(0)].iter().all(|w| *w == 0));
    }
}
