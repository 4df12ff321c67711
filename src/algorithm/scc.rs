//! 强连通分量
//!
//! Tarjan 算法的迭代实现：用显式帧栈代替递归。

use crate::error::Result;
use crate::graph::{Graph, Neighbors, VertexId};
use indexmap::IndexSet;
use tracing::debug;

const UNVISITED: usize = usize::MAX;

/// 强连通分量，每个分量是一个诱导子图
///
/// 分量按 Tarjan 完成顺序输出（凝聚图的逆拓扑序），
/// 分量内顶点按原图枚举顺序排列。
pub fn strongly_connected_components(graph: &Graph) -> Result<Vec<Graph>> {
    let ids: IndexSet<VertexId> = graph.vertices().collect();
    let n = ids.len();

    let mut index = vec![UNVISITED; n];
    let mut lowlink = vec![0usize; n];
    let mut on_stack = vec![false; n];
    let mut stack: Vec<usize> = Vec::new();
    let mut next_index = 0;
    let mut groups: Vec<Vec<usize>> = Vec::new();

    for root in 0..n {
        if index[root] != UNVISITED {
            continue;
        }

        let mut frames: Vec<(usize, Neighbors<'_>)> = Vec::new();
        index[root] = next_index;
        lowlink[root] = next_index;
        next_index += 1;
        stack.push(root);
        on_stack[root] = true;
        frames.push((root, graph.outbound_neighbors(ids[root])?));

        loop {
            let Some(frame) = frames.last_mut() else {
                break;
            };
            let v = frame.0;

            match frame.1.next() {
                Some(next) => {
                    let Some(w) = ids.get_index_of(&next) else {
                        continue;
                    };
                    if index[w] == UNVISITED {
                        index[w] = next_index;
                        lowlink[w] = next_index;
                        next_index += 1;
                        stack.push(w);
                        on_stack[w] = true;
                        frames.push((w, graph.outbound_neighbors(next)?));
                    } else if on_stack[w] {
                        lowlink[v] = lowlink[v].min(index[w]);
                    }
                }
                None => {
                    frames.pop();
                    if let Some(parent) = frames.last() {
                        let p = parent.0;
                        lowlink[p] = lowlink[p].min(lowlink[v]);
                    }

                    if lowlink[v] == index[v] {
                        let mut group = Vec::new();
                        while let Some(w) = stack.pop() {
                            on_stack[w] = false;
                            group.push(w);
                            if w == v {
                                break;
                            }
                        }
                        group.sort_unstable();
                        groups.push(group);
                    }
                }
            }
        }
    }

    debug!(
        vertices = n,
        components = groups.len(),
        "strongly connected components"
    );

    groups
        .into_iter()
        .map(|group| graph.induced_subgraph(group.into_iter().map(|i| ids[i])))
        .collect()
}
