//! 输出写出器：LSN/HSN 弧表、C 矩阵头文件与名字表。
//!
//! 写出器只接收已经完成解码与闭包计算的数据，自身不会产生翻译错误，只会返回 I/O 错误。

pub mod lsn;
pub mod matrix;
pub mod name_table;

pub use lsn::write_lsn;
pub use matrix::write_matrix;
pub use name_table::{TableStyle, write_place_table, write_side_tables, write_transition_table};
