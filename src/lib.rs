//! NDR 网描述到 LSN/HSN 弧表或 C 矩阵头文件的翻译器。
//!
//! * [`ndr`]：逐行读取 NDR 文本，构建 [`net::NetModel`]；
//! * [`translate`]：替换标签解码、优先关系闭包以及整个流水线；
//! * [`export`]：两种输出格式与名字表的写出。
#![warn(non_snake_case)]

pub mod config;
pub mod error;
pub mod export;
pub mod ndr;
pub mod net;
pub mod options;
pub mod translate;

pub use error::{Result, TranslateError};
pub use translate::{OutputFormat, Translation};
