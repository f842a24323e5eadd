//! 终端前端
//!
//! 命令解析、表格输出与 Tab 补全

mod commands;
mod completer;
mod printer;

pub use commands::{CommandResult, Console};
pub use completer::{CommandCompleter, COMMANDS};
pub use printer::Printer;
