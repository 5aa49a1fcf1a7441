//! 优先弧关系矩阵及其两遍三角传播闭包。
//!
//! 闭包只做一次“下三角 + 上三角”扫描，不迭代到不动点；输出与参考实现逐位一致。
use std::fmt;

use serde::Serialize;
use smallvec::SmallVec;

use crate::net::ids::TransitionId;
use crate::net::index_vec::{Idx, IndexVec};
use crate::net::structure::PriorityArc;

type SmallRow = SmallVec<[bool; 8]>;

/// `R[x][y]` holds when transition `x` has priority over `y`.
#[derive(Clone, PartialEq, Eq, Hash, Serialize)]
pub struct PriorityMatrix {
    rows: IndexVec<TransitionId, SmallRow>,
    size: usize,
}

impl PriorityMatrix {
    pub fn new(size: usize) -> Self {
        Self {
            rows: IndexVec::from_elem(SmallRow::from_elem(false, size), size),
            size,
        }
    }

    pub fn from_arcs<'a>(size: usize, arcs: impl IntoIterator<Item = &'a PriorityArc>) -> Self {
        let mut matrix = Self::new(size);
        for arc in arcs {
            matrix.set(arc.dominant, arc.dominated, true);
        }
        matrix
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn get(&self, x: TransitionId, y: TransitionId) -> bool {
        self.rows[x][y.index()]
    }

    pub fn set(&mut self, x: TransitionId, y: TransitionId, value: bool) {
        self.rows[x][y.index()] = value;
    }

    pub fn rows(&self) -> &IndexVec<TransitionId, SmallRow> {
        &self.rows
    }

    /// Two-pass triangular propagation.
    ///
    /// Pass 1 visits, for each `x`, the rows `y < x` that `x` dominates and merges them into
    /// row `x`; pass 2 does the same for `y > x`. Bits set while a row is being visited are
    /// picked up only if the `y` loop has not yet passed them.
    pub fn close(&mut self) {
        let n = self.size;
        for x in 0..n {
            for y in 0..x {
                self.propagate(x, y);
            }
        }
        for x in 0..n {
            for y in x + 1..n {
                self.propagate(x, y);
            }
        }
    }

    fn propagate(&mut self, x: usize, y: usize) {
        let (x, y) = (TransitionId::from_usize(x), TransitionId::from_usize(y));
        if !self.get(x, y) {
            return;
        }
        for z in 0..self.size {
            let z = TransitionId::from_usize(z);
            if self.get(y, z) {
                self.set(x, z, true);
            }
        }
    }
}

impl fmt::Debug for PriorityMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut list = f.debug_list();
        for row in self.rows.iter() {
            let bits: String = row.iter().map(|b| if *b { '1' } else { '0' }).collect();
            list.entry(&bits);
        }
        list.finish()
    }
}
