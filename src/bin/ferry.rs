//! 狼、羊、白菜过河问题求解工具

use clap::Parser;
use colored::Colorize;
use digraph::cli::Printer;
use digraph::logging::init_tracing;
use digraph::search::{RiverCrossing, SearchOutcome};
use serde::Serialize;

#[derive(Parser, Debug)]
#[command(name = "digraph-ferry")]
#[command(about = "用状态图上的 BFS 求解过河问题")]
struct Args {
    /// 以 JSON 输出
    #[arg(long)]
    json: bool,

    /// 输出调试日志
    #[arg(short, long)]
    verbose: bool,

    /// 日志级别
    #[arg(long)]
    log_level: Option<String>,
}

#[derive(Serialize)]
struct Step {
    state: u32,
    left: Vec<String>,
    right: Vec<String>,
}

#[derive(Serialize)]
struct Report<'a> {
    outcome: &'a SearchOutcome,
    trace: Vec<Step>,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose, args.log_level.as_deref())
        .map_err(|e| anyhow::anyhow!("初始化日志失败: {}", e))?;

    let puzzle = RiverCrossing::classic();
    let outcome = puzzle.solve()?;

    if args.json {
        let trace = outcome
            .solution()
            .map(|solution| {
                solution
                    .states
                    .iter()
                    .map(|&state| {
                        let view = puzzle.describe(state);
                        Step {
                            state,
                            left: view.left,
                            right: view.right,
                        }
                    })
                    .collect()
            })
            .unwrap_or_default();
        let report = Report {
            outcome: &outcome,
            trace,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("{}", "狼、羊、白菜过河".bold());
    println!("================");
    match outcome.solution() {
        Some(solution) => {
            print!("{}", Printer::default().print_crossing(&puzzle, &outcome));
            if let Some(&last) = solution.states.last() {
                println!("{} {}", "终态:".green(), puzzle.describe(last));
            }
        }
        None => println!("{}", "无解".red()),
    }

    Ok(())
}
