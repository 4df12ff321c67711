//! 结果打印器
//!
//! 提供表格和垂直格式的结果输出

use crate::algorithm::PathResult;
use crate::graph::{Graph, VertexId};
use crate::search::{RiverCrossing, SearchOutcome};
use prettytable::{format, row, Cell, Row, Table};

/// 打印模式
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PrintMode {
    /// 表格模式
    Table,
    /// 垂直模式 (\G)
    Vertical,
}

/// 结果打印器
pub struct Printer {
    mode: PrintMode,
}

impl Default for Printer {
    fn default() -> Self {
        Self::new(PrintMode::Table)
    }
}

impl Printer {
    pub fn new(mode: PrintMode) -> Self {
        Self { mode }
    }

    /// 打印行集
    pub fn print_rows(&self, columns: &[&str], rows: &[Vec<String>]) -> String {
        if columns.is_empty() || rows.is_empty() {
            return "Empty set\n".to_string();
        }

        let output = match self.mode {
            PrintMode::Table => self.format_table(columns, rows),
            PrintMode::Vertical => self.format_vertical(columns, rows),
        };

        format!("{}{} row(s) in set\n", output, rows.len())
    }

    /// 表格格式
    fn format_table(&self, columns: &[&str], rows: &[Vec<String>]) -> String {
        let mut table = Table::new();
        table.set_format(*format::consts::FORMAT_BOX_CHARS);

        let header: Vec<Cell> = columns.iter().map(|c| Cell::new(c)).collect();
        table.set_titles(Row::new(header));

        for row_data in rows {
            let cells: Vec<Cell> = row_data.iter().map(|v| Cell::new(v)).collect();
            table.add_row(Row::new(cells));
        }

        table.to_string()
    }

    /// 垂直格式
    fn format_vertical(&self, columns: &[&str], rows: &[Vec<String>]) -> String {
        let max_col_width = columns.iter().map(|c| c.len()).max().unwrap_or(0);
        let mut output = String::new();

        for (i, row_data) in rows.iter().enumerate() {
            output.push_str(&format!(
                "*************************** {}. row ***************************\n",
                i + 1
            ));

            for (j, col) in columns.iter().enumerate() {
                let value = row_data.get(j).map(|s| s.as_str()).unwrap_or("");
                output.push_str(&format!("{:>width$}: {}\n", col, value, width = max_col_width));
            }
        }

        output
    }

    /// 打印统计信息
    pub fn print_stats(&self, name: &str, graph: &Graph) -> String {
        let mut table = Table::new();
        table.set_format(*format::consts::FORMAT_BOX_CHARS);
        table.set_titles(row!["Property", "Value"]);
        table.add_row(row!["Graph", name]);
        table.add_row(row!["Vertex Count", graph.vertex_count().to_string()]);
        table.add_row(row!["Edge Count", graph.edge_count().to_string()]);
        table.add_row(row![
            "Isolated",
            graph.isolated_vertices().count().to_string()
        ]);
        let auto_create = if graph.config().auto_create_vertices {
            "on"
        } else {
            "off"
        };
        table.add_row(row!["Auto Create", auto_create]);
        table.to_string()
    }

    /// 打印边表
    pub fn print_edges(&self, graph: &Graph) -> String {
        let rows: Vec<Vec<String>> = graph
            .edges()
            .map(|e| vec![e.src.to_string(), e.dst.to_string(), e.cost.to_string()])
            .collect();
        self.print_rows(&["Source", "Target", "Cost"], &rows)
    }

    /// 打印分量列表：每个分量一行
    pub fn print_components(&self, components: &[Graph]) -> String {
        let rows: Vec<Vec<String>> = components
            .iter()
            .enumerate()
            .map(|(i, c)| {
                vec![
                    (i + 1).to_string(),
                    c.vertex_count().to_string(),
                    c.edge_count().to_string(),
                    join_ids(c.vertices()),
                ]
            })
            .collect();
        self.print_rows(&["#", "Vertices", "Edges", "Members"], &rows)
    }

    /// 打印路径
    pub fn print_path(&self, path: &PathResult) -> String {
        let rows = vec![vec![
            path.length.to_string(),
            path.total_cost.to_string(),
            path.vertices
                .iter()
                .map(|v| v.to_string())
                .collect::<Vec<_>>()
                .join(" -> "),
        ]];
        self.print_rows(&["Length", "Cost", "Path"], &rows)
    }

    /// 打印过河问题的解
    pub fn print_crossing(&self, puzzle: &RiverCrossing, outcome: &SearchOutcome) -> String {
        let Some(solution) = outcome.solution() else {
            return "无解\n".to_string();
        };
        let width = puzzle.entities().len() + 1;
        let rows: Vec<Vec<String>> = solution
            .states
            .iter()
            .enumerate()
            .map(|(step, &state)| {
                let view = puzzle.describe(state);
                vec![
                    step.to_string(),
                    format!("{:0width$b}", state, width = width),
                    view.left.join(" "),
                    view.right.join(" "),
                ]
            })
            .collect();
        format!(
            "{}共 {} 步\n",
            self.print_rows(&["Step", "State", "Left", "Right"], &rows),
            solution.steps
        )
    }

    /// 打印帮助信息
    pub fn print_help() -> String {
        r#"
═══════════════════════════════════════════════════════════════
                   Digraph CLI 命令帮助
═══════════════════════════════════════════════════════════════

基础命令:
  help, h, ?                 显示帮助
  quit, exit, q              退出程序
  stats, info                显示当前图统计信息

图管理:
  graphs                     列出会话中的所有图
  use <名称>                 切换当前图
  new <名称> [顶点数]        新建图（顶点 0..n）
  copy [名称]                复制当前图并切换过去
  drop <名称>                删除图
  random <顶点数> <边数> [名称]
                             生成随机图并切换过去

顶点与边:
  vertices                   列出顶点
  edges                      列出边
  addv <v>                   添加顶点
  delv <v>                   删除顶点（级联删除关联边）
  adde <u> <v> <代价>        添加边
  dele <u> <v>               删除边
  isedge <u> <v>             判断边是否存在
  cost <u> <v> [新代价]      查看或修改代价
  degree <v>                 入度与出度
  out <v> / in <v>           出边邻居 / 入边邻居

文件:
  load <文件> [名称]         读取文本格式的图
  save <文件> [counted|nodelist]
                             写出当前图
  import <文件.csv>          导入 CSV 边表到当前图
  export <文件.csv>          导出当前图的边表

算法:
  reach <v>                  从 v 出发的可达集
  components [weak|partition|strong|biconnected]
                             连通分量（默认 weak）
  cut                        割点
  path <u> <v>               BFS 最短路径（按边数）
  walk <u> <v>               最小代价游走
  ferry                      求解狼、羊、白菜过河问题

提示: 在命令末尾加 \G 可垂直显示结果

═══════════════════════════════════════════════════════════════
"#
        .to_string()
    }
}

fn join_ids<I: Iterator<Item = VertexId>>(ids: I) -> String {
    ids.map(|id| id.to_string()).collect::<Vec<_>>().join(" ")
}

/// 检查命令是否以 \G 结尾（垂直显示）
pub fn check_vertical_display(input: &str) -> (String, bool) {
    let trimmed = input.trim();
    if trimmed.ends_with("\\G") || trimmed.ends_with("\\g") {
        let clean = trimmed[..trimmed.len() - 2].trim().to_string();
        (clean, true)
    } else {
        (trimmed.to_string(), false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::GraphConfig;

    #[test]
    fn test_check_vertical_display() {
        assert_eq!(check_vertical_display("edges \\G"), ("edges".to_string(), true));
        assert_eq!(check_vertical_display(" stats "), ("stats".to_string(), false));
    }

    #[test]
    fn test_print_rows_modes() {
        let rows = vec![vec!["0".to_string(), "1".to_string(), "5".to_string()]];
        let columns = ["Source", "Target", "Cost"];

        let printer = Printer::default();
        let table = printer.print_rows(&columns, &rows);
        assert!(table.contains("Source"));
        assert!(table.ends_with("1 row(s) in set\n"));

        let vertical = Printer::new(PrintMode::Vertical).print_rows(&columns, &rows);
        assert!(vertical.contains("1. row"));
        assert!(vertical.contains("Target: 1"));

        assert_eq!(printer.print_rows(&columns, &[]), "Empty set\n");
    }

    #[test]
    fn test_print_crossing() {
        let puzzle = RiverCrossing::classic();
        let outcome = puzzle.solve().unwrap();
        let text = Printer::default().print_crossing(&puzzle, &outcome);
        assert!(text.contains("1111"));
        assert!(text.contains("共 7 步"));
        assert_eq!(
            Printer::default().print_crossing(&puzzle, &SearchOutcome::NoSolution),
            "无解\n"
        );
    }

    #[test]
    fn test_print_stats_shows_config() {
        let printer = Printer::default();
        let strict = printer.print_stats("g", &Graph::with_vertex_count(3));
        assert!(strict.contains("Vertex Count"));
        assert!(strict.contains(" off "));

        let lenient = Graph::with_config(GraphConfig {
            auto_create_vertices: true,
        });
        assert!(printer.print_stats("h", &lenient).contains(" on "));
    }
}
