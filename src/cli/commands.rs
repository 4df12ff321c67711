//! 会话命令处理
//!
//! 一个会话持有若干命名图，命令总是作用在当前图上。
//! 命令执行失败只返回错误信息，会话继续。

use crate::algorithm::{
    articulation_points, biconnected_components, reachability_partition, reachable_set,
    strongly_connected_components, weakly_connected_components, PathFinder,
};
use crate::cli::printer::{check_vertical_display, PrintMode, Printer};
use crate::error::{Error, Result};
use crate::generator::{random_graph, GeneratorConfig};
use crate::graph::{Cost, Graph, GraphCatalog, VertexId};
use crate::io::{
    export_edges_csv, import_edges_csv, read_graph_file, write_graph_file, TextFormat,
};
use crate::search::RiverCrossing;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::Path;
use std::str::FromStr;
use tracing::debug;

/// 命令执行结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandResult {
    /// 继续运行
    Continue,
    /// 退出程序
    Exit,
    /// 显示消息
    Message(String),
    /// 错误
    Error(String),
}

/// 交互会话
pub struct Session {
    catalog: GraphCatalog,
    generator: GeneratorConfig,
    rng: StdRng,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    /// 固定随机种子（`random` 命令可复现）
    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    fn with_rng(rng: StdRng) -> Self {
        Self {
            catalog: GraphCatalog::new(),
            generator: GeneratorConfig::default(),
            rng,
        }
    }

    pub fn catalog(&self) -> &GraphCatalog {
        &self.catalog
    }

    pub fn catalog_mut(&mut self) -> &mut GraphCatalog {
        &mut self.catalog
    }

    /// 读取文本格式的图并切换过去，返回实际使用的名称
    pub fn load(&mut self, path: &Path, name: Option<&str>) -> Result<String> {
        let graph = read_graph_file(path)?;
        let base = match name {
            Some(name) => name.to_string(),
            None => path
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_else(|| "loaded".to_string()),
        };
        let name = self.catalog.insert_unique(&base, graph);
        self.catalog.use_graph(&name)?;
        Ok(name)
    }

    /// 解析并执行一行命令
    pub fn execute(&mut self, input: &str) -> CommandResult {
        let (line, vertical) = check_vertical_display(input);
        if line.is_empty() {
            return CommandResult::Continue;
        }
        let printer = Printer::new(if vertical {
            PrintMode::Vertical
        } else {
            PrintMode::Table
        });

        let mut parts = line.split_whitespace();
        let cmd = parts.next().unwrap_or("").to_lowercase();
        let args: Vec<&str> = parts.collect();

        debug!(command = %cmd, args = args.len(), "execute");
        match self.dispatch(&cmd, &args, &printer) {
            Ok(result) => result,
            Err(e) => CommandResult::Error(e.to_string()),
        }
    }

    fn graph(&self) -> Result<&Graph> {
        self.catalog.current_graph()
    }

    fn graph_mut(&mut self) -> Result<&mut Graph> {
        self.catalog.current_graph_mut()
    }

    fn dispatch(&mut self, cmd: &str, args: &[&str], printer: &Printer) -> Result<CommandResult> {
        let message = match cmd {
            "quit" | "exit" | "q" => return Ok(CommandResult::Exit),

            "help" | "h" | "?" => Printer::print_help(),

            "stats" | "info" => printer.print_stats(self.catalog.current_graph_name(), self.graph()?),

            // ==================== 图管理 ====================
            "graphs" => {
                let current = self.catalog.current_graph_name().to_string();
                let mut rows = Vec::new();
                for name in self.catalog.list_graphs() {
                    let Some(graph) = self.catalog.get_graph(&name) else {
                        continue;
                    };
                    let marker = if name == current { "*" } else { "" };
                    rows.push(vec![
                        marker.to_string(),
                        name.clone(),
                        graph.vertex_count().to_string(),
                        graph.edge_count().to_string(),
                    ]);
                }
                printer.print_rows(&["", "Name", "Vertices", "Edges"], &rows)
            }

            "use" => {
                let [name] = expect_args::<1>(args, "use <名称>")?;
                self.catalog.use_graph(name)?;
                format!("当前图: {}", name)
            }

            "new" => {
                let (name, count) = match args {
                    [name] => (*name, 0),
                    [name, count] => (*name, parse_arg::<usize>(count, "顶点数")?),
                    _ => return Ok(usage("new <名称> [顶点数]")),
                };
                self.catalog.insert(name, Graph::try_with_vertex_count(count)?)?;
                self.catalog.use_graph(name)?;
                format!("已创建图 {}（{} 个顶点）", name, count)
            }

            "copy" => {
                let copy = self.graph()?.clone();
                let base = match args.first() {
                    Some(name) => name.to_string(),
                    None => format!("{}_copy", self.catalog.current_graph_name()),
                };
                let name = self.catalog.insert_unique(&base, copy);
                self.catalog.use_graph(&name)?;
                format!("已复制为 {}", name)
            }

            "drop" => {
                let [name] = expect_args::<1>(args, "drop <名称>")?;
                self.catalog.drop_graph(name)?;
                format!("已删除图 {}, 当前图: {}", name, self.catalog.current_graph_name())
            }

            "random" => {
                let (vertices, edges, name) = match args {
                    [v, e] => (parse_arg(v, "顶点数")?, parse_arg(e, "边数")?, "random"),
                    [v, e, name] => (parse_arg(v, "顶点数")?, parse_arg(e, "边数")?, *name),
                    _ => return Ok(usage("random <顶点数> <边数> [名称]")),
                };
                let graph = random_graph(vertices, edges, &self.generator, &mut self.rng)?;
                let name = self.catalog.insert_unique(name, graph);
                self.catalog.use_graph(&name)?;
                format!("已生成随机图 {}（{} 个顶点, {} 条边）", name, vertices, edges)
            }

            // ==================== 顶点与边 ====================
            "vertices" => {
                let rows: Vec<Vec<String>> = self
                    .graph()?
                    .vertices()
                    .map(|v| vec![v.to_string()])
                    .collect();
                printer.print_rows(&["Vertex"], &rows)
            }

            "edges" => printer.print_edges(self.graph()?),

            "addv" => {
                let [v] = expect_args::<1>(args, "addv <v>")?;
                let v = parse_vertex(v)?;
                if self.graph_mut()?.add_vertex(v) {
                    format!("已添加顶点 {}", v)
                } else {
                    format!("顶点 {} 已存在", v)
                }
            }

            "delv" => {
                let [v] = expect_args::<1>(args, "delv <v>")?;
                let v = parse_vertex(v)?;
                let removed = self.graph_mut()?.remove_vertex(v)?;
                format!("已删除顶点 {}（连带 {} 条边）", v, removed)
            }

            "adde" => {
                let [u, v, cost] = expect_args::<3>(args, "adde <u> <v> <代价>")?;
                let (u, v) = (parse_vertex(u)?, parse_vertex(v)?);
                let cost: Cost = parse_arg(cost, "代价")?;
                if self.graph_mut()?.add_edge(u, v, cost)? {
                    format!("已添加边 {} -> {} ({})", u, v, cost)
                } else {
                    return Err(Error::DuplicateEdge { src: u, dst: v });
                }
            }

            "dele" => {
                let [u, v] = expect_args::<2>(args, "dele <u> <v>")?;
                let (u, v) = (parse_vertex(u)?, parse_vertex(v)?);
                self.graph_mut()?.remove_edge(u, v)?;
                format!("已删除边 {} -> {}", u, v)
            }

            "isedge" => {
                let [u, v] = expect_args::<2>(args, "isedge <u> <v>")?;
                let (u, v) = (parse_vertex(u)?, parse_vertex(v)?);
                if self.graph()?.is_edge(u, v) {
                    format!("{} -> {} 存在", u, v)
                } else {
                    format!("{} -> {} 不存在", u, v)
                }
            }

            "cost" => match args {
                [u, v] => {
                    let (u, v) = (parse_vertex(u)?, parse_vertex(v)?);
                    format!("{} -> {} 的代价: {}", u, v, self.graph()?.get_cost(u, v)?)
                }
                [u, v, cost] => {
                    let (u, v) = (parse_vertex(u)?, parse_vertex(v)?);
                    let cost: Cost = parse_arg(cost, "代价")?;
                    self.graph_mut()?.modify_cost(u, v, cost)?;
                    format!("{} -> {} 的代价已改为 {}", u, v, cost)
                }
                _ => return Ok(usage("cost <u> <v> [新代价]")),
            },

            "degree" => {
                let [v] = expect_args::<1>(args, "degree <v>")?;
                let v = parse_vertex(v)?;
                let graph = self.graph()?;
                let rows = vec![vec![
                    v.to_string(),
                    graph.in_degree(v)?.to_string(),
                    graph.out_degree(v)?.to_string(),
                ]];
                printer.print_rows(&["Vertex", "In", "Out"], &rows)
            }

            "out" | "in" => {
                let [v] = expect_args::<1>(args, "out <v> / in <v>")?;
                let v = parse_vertex(v)?;
                let graph = self.graph()?;
                let neighbors = if cmd == "out" {
                    graph.outbound_neighbors(v)?
                } else {
                    graph.inbound_neighbors(v)?
                };
                let rows: Vec<Vec<String>> = neighbors
                    .map(|n| {
                        let cost = if cmd == "out" {
                            graph.get_cost(v, n)
                        } else {
                            graph.get_cost(n, v)
                        };
                        vec![n.to_string(), cost.map(|c| c.to_string()).unwrap_or_default()]
                    })
                    .collect();
                printer.print_rows(&["Neighbor", "Cost"], &rows)
            }

            // ==================== 文件 ====================
            "load" => {
                let (path, name) = match args {
                    [path] => (*path, None),
                    [path, name] => (*path, Some(*name)),
                    _ => return Ok(usage("load <文件> [名称]")),
                };
                let name = self.load(Path::new(path), name)?;
                let graph = self.graph()?;
                format!(
                    "已读取 {} 为图 {}（{} 个顶点, {} 条边）",
                    path,
                    name,
                    graph.vertex_count(),
                    graph.edge_count()
                )
            }

            "save" => {
                let (path, format) = match args {
                    [path] => (*path, TextFormat::default()),
                    [path, format] => (*path, TextFormat::from_str(format)?),
                    _ => return Ok(usage("save <文件> [counted|nodelist]")),
                };
                write_graph_file(path, self.graph()?, format)?;
                format!("已写出到 {}", path)
            }

            "import" => {
                let [path] = expect_args::<1>(args, "import <文件.csv>")?;
                let stats = import_edges_csv(self.graph_mut()?, path)?;
                format!(
                    "导入完成: 新顶点 {}, 新边 {}, 重复边 {}",
                    stats.vertices_imported, stats.edges_imported, stats.duplicates
                )
            }

            "export" => {
                let [path] = expect_args::<1>(args, "export <文件.csv>")?;
                let written = export_edges_csv(self.graph()?, path)?;
                format!("已导出 {} 条边到 {}", written, path)
            }

            // ==================== 算法 ====================
            "reach" => {
                let [v] = expect_args::<1>(args, "reach <v>")?;
                let reach = reachable_set(self.graph()?, parse_vertex(v)?)?;
                let rows: Vec<Vec<String>> = reach.iter().map(|v| vec![v.to_string()]).collect();
                printer.print_rows(&["Reachable"], &rows)
            }

            "components" | "cc" => {
                let graph = self.graph()?;
                let components = match args.first().copied().unwrap_or("weak") {
                    "weak" | "w" => weakly_connected_components(graph)?,
                    "partition" | "p" => reachability_partition(graph)?,
                    "strong" | "scc" | "s" => strongly_connected_components(graph)?,
                    "biconnected" | "bcc" | "b" => biconnected_components(graph)?,
                    _ => return Ok(usage("components [weak|partition|strong|biconnected]")),
                };
                printer.print_components(&components)
            }

            "cut" => {
                let rows: Vec<Vec<String>> = articulation_points(self.graph()?)?
                    .iter()
                    .map(|v| vec![v.to_string()])
                    .collect();
                printer.print_rows(&["Articulation"], &rows)
            }

            "path" | "walk" => {
                let [u, v] = expect_args::<2>(args, "path <u> <v> / walk <u> <v>")?;
                let (u, v) = (parse_vertex(u)?, parse_vertex(v)?);
                let finder = PathFinder::new(self.graph()?);
                let found = if cmd == "path" {
                    finder.shortest_path(u, v)?
                } else {
                    finder.min_cost_walk(u, v)?
                };
                match found {
                    Some(path) => printer.print_path(&path),
                    None => format!("{} 到 {} 不可达", u, v),
                }
            }

            "ferry" => {
                let puzzle = RiverCrossing::classic();
                let outcome = puzzle.solve()?;
                printer.print_crossing(&puzzle, &outcome)
            }

            _ => {
                return Ok(CommandResult::Error(format!(
                    "未知命令: {}。输入 'help' 查看帮助。",
                    cmd
                )))
            }
        };

        Ok(CommandResult::Message(message))
    }
}

fn usage(text: &str) -> CommandResult {
    CommandResult::Error(format!("用法: {}", text))
}

fn expect_args<'a, const N: usize>(args: &[&'a str], text: &str) -> Result<[&'a str; N]> {
    <[&str; N]>::try_from(args).map_err(|_| Error::InvalidConstruction(format!("用法: {}", text)))
}

fn parse_arg<T: FromStr>(token: &str, what: &str) -> Result<T> {
    token
        .parse()
        .map_err(|_| Error::InvalidConstruction(format!("{}无效: {}", what, token)))
}

fn parse_vertex(token: &str) -> Result<VertexId> {
    parse_arg(token, "顶点 ID")
}
