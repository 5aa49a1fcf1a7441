//! # P/T 网模型
//!
//! 设库所集合 `P` 与迁移集合 `T`，二者按声明顺序编号（输出时从 1 开始）。模型记录三类关系：
//!
//! * 输入弧 `P × T → ℤ`，重数为 0 的输入弧记为 `-1`（测试弧）；
//! * 输出弧 `T × P → ℤ`，重数按原样保存；
//! * 优先弧 `T × T`，仅表示优先关系，不携带重数。
//!
//! 另有初始标识 `M₀ ∈ ℤ^{|P|}`（按读入值保存，只有正数才算有托肯）以及挂在迁移上的替换标签
//! （待解码的原始字节）。
//!
//! ## 示例
//!
//! ```rust
//! use ndrtosn::net::*;
//!
//! let mut net = NetModel::empty();
//! let p0 = net.add_place("p0", 1).unwrap();
//! let t0 = net.add_transition("t0").unwrap();
//! net.add_input_arc(p0, t0, 0).unwrap();
//!
//! assert_eq!(net.input_arcs[0].weight, -1);
//! assert_eq!(net.initial_marking().tokens(p0), 1);
//! ```

pub mod core;
pub mod ids;
pub mod incidence;
pub mod index_vec;
pub mod io;
pub mod names;
pub mod structure;

pub use self::core::NetModel;
pub use ids::{NameId, PlaceId, TransitionId};
pub use incidence::Incidence;
pub use index_vec::{Idx, IndexVec};
pub use names::{NameOwner, NameTable, display_name};
pub use structure::{
    InputArc, Marking, OutputArc, Place, PriorityArc, SubstitutionLabel, TEST_ARC_WEIGHT,
    Transition, Weight,
};
