//! 双连通分量
//!
//! 在忽略方向的底层无向图上做 Hopcroft-Tarjan low-link DFS（迭代实现），
//! 用边栈切分出块（block）。自环不影响割点判定。

use crate::error::Result;
use crate::graph::{Graph, VertexId};
use indexmap::IndexSet;
use tracing::debug;

const UNVISITED: usize = usize::MAX;

/// 块分解结果（顶点用稠密下标表示）
struct BlockDecomposition {
    blocks: Vec<Vec<usize>>,
    articulation: Vec<bool>,
}

/// 底层无向图的邻接表，去重且不含自环
fn undirected_adjacency(graph: &Graph, ids: &IndexSet<VertexId>) -> Result<Vec<Vec<usize>>> {
    let mut adjacency = Vec::with_capacity(ids.len());
    for &vertex in ids {
        let mut neighbors: IndexSet<usize> = IndexSet::new();
        let successors = graph.outbound_neighbors(vertex)?;
        let predecessors = graph.inbound_neighbors(vertex)?;
        for other in successors.chain(predecessors) {
            if other == vertex {
                continue;
            }
            if let Some(i) = ids.get_index_of(&other) {
                neighbors.insert(i);
            }
        }
        adjacency.push(neighbors.into_iter().collect());
    }
    Ok(adjacency)
}

fn decompose(adjacency: &[Vec<usize>]) -> BlockDecomposition {
    let n = adjacency.len();
    let mut disc = vec![UNVISITED; n];
    let mut low = vec![0usize; n];
    let mut articulation = vec![false; n];
    let mut blocks: Vec<Vec<usize>> = Vec::new();
    let mut time = 0;

    for root in 0..n {
        if disc[root] != UNVISITED {
            continue;
        }
        disc[root] = time;
        low[root] = time;
        time += 1;

        if adjacency[root].is_empty() {
            blocks.push(vec![root]);
            continue;
        }

        // 帧：(顶点, 父顶点, 下一个待看的邻居下标)
        let mut frames: Vec<(usize, Option<usize>, usize)> = vec![(root, None, 0)];
        let mut edge_stack: Vec<(usize, usize)> = Vec::new();
        let mut root_children = 0;

        while let Some(frame) = frames.last_mut() {
            let (u, parent) = (frame.0, frame.1);

            if frame.2 < adjacency[u].len() {
                let w = adjacency[u][frame.2];
                frame.2 += 1;
                if Some(w) == parent {
                    continue;
                }
                if disc[w] == UNVISITED {
                    disc[w] = time;
                    low[w] = time;
                    time += 1;
                    edge_stack.push((u, w));
                    if u == root {
                        root_children += 1;
                    }
                    frames.push((w, Some(u), 0));
                } else if disc[w] < disc[u] {
                    // 回边
                    low[u] = low[u].min(disc[w]);
                    edge_stack.push((u, w));
                }
                continue;
            }

            frames.pop();
            let Some(p) = parent else {
                continue;
            };
            low[p] = low[p].min(low[u]);

            if low[u] >= disc[p] {
                if p != root {
                    articulation[p] = true;
                }
                let mut block: IndexSet<usize> = IndexSet::new();
                while let Some((a, b)) = edge_stack.pop() {
                    block.insert(a);
                    block.insert(b);
                    if (a, b) == (p, u) {
                        break;
                    }
                }
                let mut block: Vec<usize> = block.into_iter().collect();
                block.sort_unstable();
                blocks.push(block);
            }
        }

        if root_children > 1 {
            articulation[root] = true;
        }
    }

    BlockDecomposition {
        blocks,
        articulation,
    }
}

/// 双连通分量，每个块是一个诱导子图
///
/// 方向被忽略；割点会出现在多个分量中；孤立顶点单独成为一个分量。
pub fn biconnected_components(graph: &Graph) -> Result<Vec<Graph>> {
    let ids: IndexSet<VertexId> = graph.vertices().collect();
    let adjacency = undirected_adjacency(graph, &ids)?;
    let decomposition = decompose(&adjacency);

    debug!(
        vertices = ids.len(),
        components = decomposition.blocks.len(),
        "biconnected components"
    );

    decomposition
        .blocks
        .into_iter()
        .map(|block| graph.induced_subgraph(block.into_iter().map(|i| ids[i])))
        .collect()
}

/// 割点：删除后会使底层无向图的连通分量增多的顶点，按枚举顺序排列
pub fn articulation_points(graph: &Graph) -> Result<Vec<VertexId>> {
    let ids: IndexSet<VertexId> = graph.vertices().collect();
    let adjacency = undirected_adjacency(graph, &ids)?;
    let decomposition = decompose(&adjacency);

    Ok(ids
        .iter()
        .zip(decomposition.articulation)
        .filter(|(_, is_cut)| *is_cut)
        .map(|(&id, _)| id)
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithm::weakly_connected_components;

    fn v(id: i64) -> VertexId {
        VertexId::new(id)
    }

    fn vertex_sets(components: &[Graph]) -> Vec<Vec<VertexId>> {
        let mut sets: Vec<Vec<VertexId>> = components
            .iter()
            .map(|c| {
                let mut vs: Vec<_> = c.vertices().collect();
                vs.sort();
                vs
            })
            .collect();
        sets.sort();
        sets
    }

    /// 两个三角形共享顶点 2，外加一条桥 4 -> 5 和孤立点 6
    fn bowtie() -> Graph {
        let mut graph = Graph::with_vertex_count(7);
        for (a, b) in [(0, 1), (1, 2), (2, 0), (2, 3), (3, 4), (4, 2), (4, 5)] {
            graph.add_edge(v(a), v(b), 1).unwrap();
        }
        graph
    }

    #[test]
    fn test_biconnected_bowtie() {
        let graph = bowtie();
        let components = biconnected_components(&graph).unwrap();

        assert_eq!(
            vertex_sets(&components),
            vec![
                vec![v(0), v(1), v(2)],
                vec![v(2), v(3), v(4)],
                vec![v(4), v(5)],
                vec![v(6)],
            ]
        );
        assert_eq!(articulation_points(&graph).unwrap(), vec![v(2), v(4)]);
    }

    #[test]
    fn test_biconnected_two_cycle_keeps_both_directions() {
        let mut graph = Graph::with_vertex_count(2);
        graph.add_edge(v(0), v(1), 1).unwrap();
        graph.add_edge(v(1), v(0), 2).unwrap();
        graph.add_edge(v(1), v(1), 3).unwrap();

        let components = biconnected_components(&graph).unwrap();
        assert_eq!(components.len(), 1);
        assert_eq!(components[0].edge_count(), 3);
        assert!(articulation_points(&graph).unwrap().is_empty());
    }

    #[test]
    fn test_path_graph_root_is_articulation() {
        // 1 是 DFS 根且有两个子树
        let mut graph = Graph::from_vertices([v(1), v(0), v(2)]);
        graph.add_edge(v(0), v(1), 1).unwrap();
        graph.add_edge(v(1), v(2), 1).unwrap();

        assert_eq!(articulation_points(&graph).unwrap(), vec![v(1)]);
        assert_eq!(biconnected_components(&graph).unwrap().len(), 2);
    }

    #[test]
    fn test_every_edge_in_exactly_one_block() {
        let graph = bowtie();
        let components = biconnected_components(&graph).unwrap();

        for edge in graph.edges() {
            let holders = components
                .iter()
                .filter(|c| c.is_edge(edge.src, edge.dst))
                .count();
            assert_eq!(holders, 1, "edge {} in {} blocks", edge, holders);
        }

        let covered: usize = weakly_connected_components(&graph).unwrap().len();
        assert_eq!(covered, 2);
    }
}
