//! Digraph 随机图生成工具
//!
//! 生成随机有向图并写出为文本或 CSV 文件

use clap::{Parser, ValueEnum};
use digraph::generator::{random_graph, GeneratorConfig};
use digraph::io::{export_edges_csv, write_graph_file, TextFormat};
use digraph::logging::init_tracing;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::PathBuf;
use tracing::info;

#[derive(Clone, Copy, Debug, ValueEnum)]
enum OutputFormat {
    /// `<n> <m>` 表头的文本格式
    Counted,
    /// `nodelist` 表头的文本格式
    Nodelist,
    /// source,target,cost 边表
    Csv,
}

#[derive(Parser, Debug)]
#[command(name = "digraph-gen")]
#[command(about = "Digraph 随机图生成工具")]
struct Args {
    /// 顶点数
    #[arg(short = 'n', long)]
    vertices: usize,

    /// 边数（不超过顶点数的平方）
    #[arg(short = 'm', long)]
    edges: usize,

    /// 输出文件路径
    #[arg(short, long)]
    output: PathBuf,

    /// 输出格式
    #[arg(short, long, value_enum, default_value = "counted")]
    format: OutputFormat,

    /// 最小代价（含）
    #[arg(long, default_value = "-100", allow_hyphen_values = true)]
    min_cost: i64,

    /// 最大代价（含）
    #[arg(long, default_value = "100", allow_hyphen_values = true)]
    max_cost: i64,

    /// 随机种子
    #[arg(short, long)]
    seed: Option<u64>,

    /// 输出调试日志
    #[arg(short, long)]
    verbose: bool,

    /// 日志级别
    #[arg(long)]
    log_level: Option<String>,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose, args.log_level.as_deref())
        .map_err(|e| anyhow::anyhow!("初始化日志失败: {}", e))?;

    println!("Digraph 随机图生成工具");
    println!("========================");
    println!("顶点数: {}", args.vertices);
    println!("边数: {}", args.edges);
    println!("代价范围: [{}, {}]", args.min_cost, args.max_cost);
    println!("输出文件: {:?}", args.output);
    println!("格式: {:?}", args.format);

    let config = GeneratorConfig {
        min_cost: args.min_cost,
        max_cost: args.max_cost,
    };
    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let start = std::time::Instant::now();
    let graph = random_graph(args.vertices, args.edges, &config, &mut rng)?;
    info!(elapsed_ms = start.elapsed().as_millis() as u64, "generated");

    match args.format {
        OutputFormat::Counted => write_graph_file(&args.output, &graph, TextFormat::Counted)?,
        OutputFormat::Nodelist => write_graph_file(&args.output, &graph, TextFormat::NodeList)?,
        OutputFormat::Csv => {
            export_edges_csv(&graph, &args.output)?;
        }
    }

    println!("\n生成完成!");
    println!("  顶点数: {}", graph.vertex_count());
    println!("  边数: {}", graph.edge_count());
    println!("  孤立顶点: {}", graph.isolated_vertices().count());
    println!("  耗时: {} ms", start.elapsed().as_millis());

    Ok(())
}
