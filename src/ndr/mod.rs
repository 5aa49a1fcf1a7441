//! NDR 文本格式读取。
//!
//! 每行以一个标记字符开头：`p` 库所、`t` 迁移、`e` 弧、`h` 网名，`#` 开头为注释，其余行忽略。
//! 弧的类型（输入、输出、优先）不写在文本里，而是由两个端点分别属于哪张名字表推断。

pub mod parser;
pub mod scanner;

pub use parser::{HSN_PREFIX, NdrParser, parse_ndr, parse_ndr_str};
