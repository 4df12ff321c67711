//! Digraph CLI 工具
//!
//! 交互式命令行界面

use anyhow::Context;
use clap::Parser;
use colored::Colorize;
use digraph::cli::{is_missing_history, CommandCompleter, CommandResult, Session};
use digraph::logging::init_tracing;
use rustyline::error::ReadlineError;
use rustyline::history::DefaultHistory;
use rustyline::Editor;
use std::path::PathBuf;

const HISTORY_FILE: &str = ".digraph_history";

#[derive(Parser, Debug)]
#[command(name = "digraph-cli")]
#[command(about = "Digraph 交互式命令行工具")]
#[command(version)]
struct Args {
    /// 启动时读取的图文件（文本格式）
    #[arg(short, long)]
    load: Option<PathBuf>,

    /// 执行单个命令后退出
    #[arg(short = 'e', long)]
    execute: Option<String>,

    /// `random` 命令使用的随机种子
    #[arg(long)]
    seed: Option<u64>,

    /// 输出调试日志
    #[arg(short, long)]
    verbose: bool,

    /// 日志级别（如 info、digraph=trace）
    #[arg(long)]
    log_level: Option<String>,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose, args.log_level.as_deref())
        .map_err(|e| anyhow::anyhow!("初始化日志失败: {}", e))?;

    let mut session = match args.seed {
        Some(seed) => Session::with_seed(seed),
        None => Session::new(),
    };

    if let Some(path) = &args.load {
        let name = session
            .load(path, None)
            .with_context(|| format!("读取 {} 失败", path.display()))?;
        let graph = session.catalog().current_graph()?;
        println!(
            "已读取 {} 为图 {}（{} 个顶点, {} 条边）",
            path.display(),
            name.bold(),
            graph.vertex_count(),
            graph.edge_count()
        );
    }

    // 单个命令模式
    if let Some(command) = args.execute {
        match session.execute(&command) {
            CommandResult::Message(text) => println!("{}", text),
            CommandResult::Error(text) => anyhow::bail!(text),
            CommandResult::Continue | CommandResult::Exit => {}
        }
        return Ok(());
    }

    println!("{}", "Digraph CLI - 有向图工具".bold());
    println!("==========================");
    println!("\n输入 'help' 查看命令列表，'quit' 退出\n");

    let mut editor: Editor<CommandCompleter, DefaultHistory> = Editor::new()?;
    editor.set_helper(Some(CommandCompleter::new()));
    let history = dirs::home_dir().map(|home| home.join(HISTORY_FILE));
    if let Some(path) = &history {
        match editor.load_history(path) {
            Ok(()) => {}
            Err(e) if is_missing_history(&e) => {}
            Err(e) => tracing::warn!(error = %e, "failed to load history"),
        }
    }

    loop {
        let prompt = format!("digraph[{}]> ", session.catalog().current_graph_name());
        let line = match editor.readline(&prompt) {
            Ok(line) => line,
            Err(ReadlineError::Interrupted) => continue,
            Err(ReadlineError::Eof) => break,
            Err(e) => return Err(e.into()),
        };
        if !line.trim().is_empty() {
            if let Err(e) = editor.add_history_entry(line.as_str()) {
                tracing::warn!(error = %e, "failed to record history entry");
            }
        }

        match session.execute(&line) {
            CommandResult::Exit => break,
            CommandResult::Continue => {}
            CommandResult::Message(text) => println!("{}", text),
            CommandResult::Error(text) => println!("{} {}", "错误:".red().bold(), text),
        }
    }

    if let Some(path) = &history {
        if let Err(e) = editor.save_history(path) {
            tracing::warn!(error = %e, "failed to save history");
        }
    }
    println!("{}", "再见！".green());
    Ok(())
}
