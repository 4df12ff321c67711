//! 命令补全器
//!
//! 基于 rustyline 实现 Tab 补全功能

use rustyline::completion::{Completer, Pair};
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::validate::Validator;
use rustyline::{Context, Helper};

/// 会话命令列表
const COMMANDS: &[&str] = &[
    "help", "quit", "exit", "stats", "info",
    // 图管理
    "graphs", "use", "new", "copy", "drop", "random",
    // 顶点与边
    "vertices", "edges", "addv", "delv", "adde", "dele", "isedge", "cost", "degree", "out", "in",
    // 文件
    "load", "save", "import", "export",
    // 算法
    "reach", "components", "cut", "path", "walk", "ferry",
];

/// 子命令映射
fn get_sub_commands(command: &str) -> Option<&'static [&'static str]> {
    match command {
        "components" | "cc" => Some(&["weak", "partition", "strong", "biconnected"]),
        _ => None,
    }
}

/// 按位置补全的参数（`save <文件> <格式>` 的第二个参数）
fn get_positional(command: &str, index: usize) -> Option<&'static [&'static str]> {
    match (command, index) {
        ("save", 2) => Some(&["counted", "nodelist"]),
        _ => None,
    }
}

fn pairs<'a, I: IntoIterator<Item = &'a &'static str>>(words: I, prefix: &str) -> Vec<Pair> {
    words
        .into_iter()
        .filter(|w| w.starts_with(prefix))
        .map(|w| Pair {
            display: w.to_string(),
            replacement: w.to_string(),
        })
        .collect()
}

/// Digraph CLI 补全器
#[derive(Default)]
pub struct CommandCompleter;

impl CommandCompleter {
    pub fn new() -> Self {
        Self
    }

    /// 返回替换起点与候选
    pub fn candidates(&self, line: &str, pos: usize) -> (usize, Vec<Pair>) {
        let line_to_cursor = &line[..pos];
        let words: Vec<&str> = line_to_cursor.split_whitespace().collect();
        let at_word_end = !line_to_cursor.is_empty() && !line_to_cursor.ends_with(' ');

        let (current, start_pos, index) = match words.last() {
            Some(word) if at_word_end => (word.to_lowercase(), pos - word.len(), words.len() - 1),
            _ => (String::new(), pos, words.len()),
        };

        if index == 0 {
            return (start_pos, pairs(COMMANDS, &current));
        }

        let command = words[0].to_lowercase();
        if index == 1 {
            if let Some(sub_cmds) = get_sub_commands(&command) {
                return (start_pos, pairs(sub_cmds, &current));
            }
        }
        match get_positional(&command, index) {
            Some(options) => (start_pos, pairs(options, &current)),
            None => (start_pos, Vec::new()),
        }
    }
}

impl Completer for CommandCompleter {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        Ok(self.candidates(line, pos))
    }
}

impl Hinter for CommandCompleter {
    type Hint = String;
}

impl Highlighter for CommandCompleter {}

impl Validator for CommandCompleter {}

impl Helper for CommandCompleter {}
