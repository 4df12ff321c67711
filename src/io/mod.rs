//! 图的文本编码与 CSV 边表
//!
//! 文本格式：
//!
//! ```text
//! <顶点数> <边数>        或    nodelist
//! <起点> <终点> <代价>         <顶点 ID 列表>
//! ...                          <起点> <终点> <代价>
//! iso                          ...
//! <孤立顶点数>
//! <孤立顶点 ID 列表>
//! ```
//!
//! `iso` 块是可选的，两种表头都可以带。

use crate::error::{Error, Result};
use crate::graph::{Cost, Graph, VertexId, MAX_VERTEX_COUNT};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Read, Write};
use std::path::Path;
use tracing::{debug, warn};

const NODELIST: &str = "nodelist";
const ISO: &str = "iso";

/// 写出格式
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TextFormat {
    /// `<n> <m>` 表头，顶点必须恰好是 `0..n`
    #[default]
    Counted,
    /// `nodelist` 表头，任意顶点 ID
    NodeList,
}

impl std::str::FromStr for TextFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "counted" | "count" => Ok(TextFormat::Counted),
            "nodelist" | "node-list" => Ok(TextFormat::NodeList),
            other => Err(Error::InvalidConstruction(format!(
                "未知的文本格式: {}",
                other
            ))),
        }
    }
}

/// 导入统计
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct ImportStats {
    pub vertices_imported: usize,
    pub edges_imported: usize,
    /// 重复出现而被跳过的边
    pub duplicates: usize,
}

// ==================== 文本读取 ====================

/// 非空行及其行号（从 1 开始）
struct Lines {
    lines: Vec<(usize, String)>,
    pos: usize,
    last_line: usize,
}

impl Lines {
    fn read<R: Read>(reader: R) -> Result<Self> {
        let mut lines = Vec::new();
        let mut last_line = 0;
        for (i, line) in BufReader::new(reader).lines().enumerate() {
            let line = line?;
            last_line = i + 1;
            let trimmed = line.trim();
            if !trimmed.is_empty() {
                lines.push((i + 1, trimmed.to_string()));
            }
        }
        Ok(Self {
            lines,
            pos: 0,
            last_line,
        })
    }

    fn next(&mut self) -> Option<(usize, &str)> {
        let (no, line) = self.lines.get(self.pos)?;
        self.pos += 1;
        Some((*no, line.as_str()))
    }

    fn peek(&self) -> Option<&str> {
        self.lines.get(self.pos).map(|(_, line)| line.as_str())
    }

    /// 必须存在的下一行
    fn require(&mut self, what: &str) -> Result<(usize, String)> {
        let eof = self.last_line + 1;
        self.next()
            .map(|(no, line)| (no, line.to_string()))
            .ok_or_else(|| Error::malformed(eof, format!("缺少{}", what)))
    }
}

fn parse_number<T: std::str::FromStr>(line: usize, token: &str, what: &str) -> Result<T> {
    token
        .parse()
        .map_err(|_| Error::malformed(line, format!("{}不是整数: {:?}", what, token)))
}

fn parse_vertex_list(line: usize, text: &str) -> Result<Vec<VertexId>> {
    text.split_whitespace()
        .map(|token| parse_number::<i64>(line, token, "顶点 ID").map(VertexId::new))
        .collect()
}

fn parse_edge(line: usize, text: &str) -> Result<(VertexId, VertexId, Cost)> {
    let tokens: Vec<&str> = text.split_whitespace().collect();
    if tokens.len() != 3 {
        return Err(Error::malformed(
            line,
            format!("边需要 3 个字段 <起点> <终点> <代价>, 实际 {} 个", tokens.len()),
        ));
    }
    let src = parse_number::<i64>(line, tokens[0], "起点")?;
    let dst = parse_number::<i64>(line, tokens[1], "终点")?;
    let cost = parse_number::<Cost>(line, tokens[2], "代价")?;
    Ok((VertexId::new(src), VertexId::new(dst), cost))
}

/// 从文本读取图
///
/// 计数表头下，超出 `0..n` 的端点会被自动创建；
/// `nodelist` 表头下，端点必须出现在顶点列表里。
/// 重复的边行保留第一次的代价，其余跳过，但仍计入表头边数。
pub fn read_graph<R: Read>(reader: R) -> Result<Graph> {
    let mut lines = Lines::read(reader)?;

    let Some((header_line, header)) = lines.next().map(|(no, text)| (no, text.to_string())) else {
        debug!("empty input, returning empty graph");
        return Ok(Graph::new());
    };

    let (mut graph, expected_edges, auto_create) = if header == NODELIST {
        let has_list = matches!(lines.peek(), Some(next) if next != ISO);
        let vertices = if has_list {
            let (no, text) = lines.require("顶点列表")?;
            parse_vertex_list(no, &text)?
        } else {
            Vec::new()
        };
        (Graph::from_vertices(vertices), None, false)
    } else {
        let tokens: Vec<&str> = header.split_whitespace().collect();
        if tokens.len() != 2 {
            return Err(Error::malformed(
                header_line,
                format!("表头应为 \"<顶点数> <边数>\" 或 \"{}\"", NODELIST),
            ));
        }
        let n: usize = parse_number(header_line, tokens[0], "顶点数")?;
        let m: usize = parse_number(header_line, tokens[1], "边数")?;
        if n > MAX_VERTEX_COUNT {
            return Err(Error::malformed(
                header_line,
                format!("顶点数 {} 超过上限 {}", n, MAX_VERTEX_COUNT),
            ));
        }
        (Graph::with_vertex_count(n), Some(m), true)
    };

    let mut edges_read = 0;
    let mut duplicates = 0;
    let mut saw_iso = false;
    while let Some((no, text)) = lines.next() {
        if text == ISO {
            saw_iso = true;
            break;
        }
        let (src, dst, cost) = parse_edge(no, text)?;
        for endpoint in [src, dst] {
            if graph.contains_vertex(endpoint) {
                continue;
            }
            if !auto_create {
                return Err(Error::malformed(
                    no,
                    format!("顶点 {} 不在顶点列表中", endpoint),
                ));
            }
            graph.add_vertex(endpoint);
        }
        if !graph.add_edge(src, dst, cost)? {
            warn!(line = no, src = %src, dst = %dst, "duplicate edge skipped");
            duplicates += 1;
        }
        edges_read += 1;
    }

    if let Some(m) = expected_edges {
        if m != edges_read {
            return Err(Error::malformed(
                header_line,
                format!("表头声明 {} 条边, 实际读到 {} 条", m, edges_read),
            ));
        }
    }

    if saw_iso {
        let (count_line, count_text) = lines.require("孤立顶点数")?;
        let count: usize = parse_number(count_line, &count_text, "孤立顶点数")?;
        let isolated = if count == 0 {
            Vec::new()
        } else {
            let (no, text) = lines.require("孤立顶点列表")?;
            parse_vertex_list(no, &text)?
        };
        if isolated.len() != count {
            return Err(Error::malformed(
                count_line,
                format!("声明 {} 个孤立顶点, 实际 {} 个", count, isolated.len()),
            ));
        }
        for vertex in isolated {
            graph.add_vertex(vertex);
        }
        if let Some((no, _)) = lines.next() {
            return Err(Error::malformed(no, "iso 块之后不应再有内容"));
        }
    }

    debug!(
        vertices = graph.vertex_count(),
        edges = graph.edge_count(),
        duplicates,
        "graph read"
    );
    Ok(graph)
}

/// 从文件读取图
pub fn read_graph_file<P: AsRef<Path>>(path: P) -> Result<Graph> {
    let file = File::open(path)?;
    read_graph(file)
}

// ==================== 文本写出 ====================

fn join_ids<I: IntoIterator<Item = VertexId>>(ids: I) -> String {
    ids.into_iter()
        .map(|id| id.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

/// 顶点集合是否恰好为 `0..n`
fn is_contiguous(graph: &Graph) -> bool {
    let n = graph.vertex_count() as i64;
    graph.vertices().all(|v| (0..n).contains(&v.as_i64()))
}

/// 写出图
pub fn write_graph<W: Write>(writer: W, graph: &Graph, format: TextFormat) -> Result<()> {
    let mut out = BufWriter::new(writer);

    match format {
        TextFormat::Counted => {
            if !is_contiguous(graph) {
                return Err(Error::InvalidConstruction(
                    "计数格式要求顶点恰好为 0..n, 请改用 nodelist 格式".to_string(),
                ));
            }
            writeln!(out, "{} {}", graph.vertex_count(), graph.edge_count())?;
        }
        TextFormat::NodeList => {
            writeln!(out, "{}", NODELIST)?;
            writeln!(out, "{}", join_ids(graph.vertices()))?;
        }
    }

    for edge in graph.edges() {
        writeln!(out, "{} {} {}", edge.src, edge.dst, edge.cost)?;
    }

    if format == TextFormat::Counted {
        let isolated: Vec<VertexId> = graph.isolated_vertices().collect();
        if !isolated.is_empty() {
            writeln!(out, "{}", ISO)?;
            writeln!(out, "{}", isolated.len())?;
            writeln!(out, "{}", join_ids(isolated))?;
        }
    }

    out.flush()?;
    Ok(())
}

/// 写出图到文件
pub fn write_graph_file<P: AsRef<Path>>(path: P, graph: &Graph, format: TextFormat) -> Result<()> {
    let file = File::create(path)?;
    write_graph(file, graph, format)
}

// ==================== CSV 边表 ====================

/// CSV 边记录
#[derive(Debug, Serialize, Deserialize)]
struct EdgeRecord {
    source: i64,
    target: i64,
    cost: Cost,
}

/// 从 `source,target,cost` 格式的 CSV 导入边，端点不存在时自动创建
pub fn import_edges_csv<P: AsRef<Path>>(graph: &mut Graph, path: P) -> Result<ImportStats> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)?;

    let mut stats = ImportStats::default();
    for record in reader.deserialize() {
        let record: EdgeRecord = record?;
        let src = VertexId::new(record.source);
        let dst = VertexId::new(record.target);

        for endpoint in [src, dst] {
            if graph.add_vertex(endpoint) {
                stats.vertices_imported += 1;
            }
        }
        if graph.add_edge(src, dst, record.cost)? {
            stats.edges_imported += 1;
        } else {
            stats.duplicates += 1;
        }
    }

    if stats.duplicates > 0 {
        warn!(duplicates = stats.duplicates, "duplicate edges skipped");
    }
    debug!(
        vertices = stats.vertices_imported,
        edges = stats.edges_imported,
        "csv imported"
    );
    Ok(stats)
}

/// 导出所有边到 CSV，返回写出的边数（孤立顶点不会出现在边表中）
pub fn export_edges_csv<P: AsRef<Path>>(graph: &Graph, path: P) -> Result<usize> {
    let mut writer = csv::Writer::from_path(path)?;
    let mut written = 0;
    for edge in graph.edges() {
        writer.serialize(EdgeRecord {
            source: edge.src.as_i64(),
            target: edge.dst.as_i64(),
            cost: edge.cost,
        })?;
        written += 1;
    }
    writer.flush()?;
    Ok(written)
}
