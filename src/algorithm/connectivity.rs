//! 连通性分析
//!
//! 可达集与弱连通分量。所有遍历都使用显式栈，不递归，
//! 大图上也不会耗尽调用栈。

use crate::error::{Error, Result};
use crate::graph::{Graph, VertexId};
use indexmap::IndexSet;
use tracing::debug;

/// 从 `start` 出发沿出边可达的所有顶点（包含 `start`），按发现顺序排列
///
/// 栈式 DFS：弹出最近压入的顶点，把它尚未访问的出边邻居全部压栈。
pub fn reachable_set(graph: &Graph, start: VertexId) -> Result<IndexSet<VertexId>> {
    if !graph.contains_vertex(start) {
        return Err(Error::VertexNotFound(start));
    }

    let mut visited = IndexSet::new();
    let mut stack = vec![start];
    visited.insert(start);

    while let Some(current) = stack.pop() {
        for next in graph.outbound_neighbors(current)? {
            if visited.insert(next) {
                stack.push(next);
            }
        }
    }

    Ok(visited)
}

/// 弱连通分量
///
/// 忽略边的方向（同时沿出边和入边遍历），每个顶点恰好属于一个分量。
/// 种子按顶点枚举顺序选取，分量内顶点按发现顺序排列。
pub fn weakly_connected_components(graph: &Graph) -> Result<Vec<Graph>> {
    let mut visited: IndexSet<VertexId> = IndexSet::new();
    let mut components = Vec::new();

    for seed in graph.vertices() {
        if visited.contains(&seed) {
            continue;
        }

        let mut members = vec![seed];
        let mut stack = vec![seed];
        visited.insert(seed);

        while let Some(current) = stack.pop() {
            let successors = graph.outbound_neighbors(current)?;
            let predecessors = graph.inbound_neighbors(current)?;
            for next in successors.chain(predecessors) {
                if visited.insert(next) {
                    members.push(next);
                    stack.push(next);
                }
            }
        }

        components.push(graph.induced_subgraph(members)?);
    }

    debug!(
        vertices = graph.vertex_count(),
        components = components.len(),
        "weakly connected components"
    );
    Ok(components)
}

/// 按出边可达性划分顶点
///
/// 依枚举顺序取未访问的种子，求其可达集中尚未归属的顶点作为一个分量。
/// 只沿出边遍历，所以结果依赖枚举顺序：只能经入边到达的顶点会被分到
/// 之后的种子里。需要真正的弱连通分量时使用 [`weakly_connected_components`]。
pub fn reachability_partition(graph: &Graph) -> Result<Vec<Graph>> {
    let mut visited: IndexSet<VertexId> = IndexSet::new();
    let mut components = Vec::new();

    for seed in graph.vertices() {
        if visited.contains(&seed) {
            continue;
        }

        let members: Vec<VertexId> = reachable_set(graph, seed)?
            .into_iter()
            .filter(|&v| visited.insert(v))
            .collect();
        components.push(graph.induced_subgraph(members)?);
    }

    debug!(
        vertices = graph.vertex_count(),
        components = components.len(),
        "reachability partition"
    );
    Ok(components)
}
