//! 交互式命令行支持
//!
//! 命令解析与执行在 [`commands`]，结果渲染在 [`printer`]，
//! Tab 补全在 [`completer`]。

pub mod commands;
pub mod completer;
pub mod printer;

pub use commands::{CommandResult, Session};
pub use completer::CommandCompleter;
pub use printer::{PrintMode, Printer};

use rustyline::error::ReadlineError;

/// 历史文件尚不存在（首次运行）
pub fn is_missing_history(err: &ReadlineError) -> bool {
    matches!(err, ReadlineError::Io(e) if e.kind() == std::io::ErrorKind::NotFound)
}
