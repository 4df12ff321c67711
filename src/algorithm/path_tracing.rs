//! 路径查找算法
//!
//! BFS 最短路径（按边数）与允许重复顶点的最小代价游走（Bellman-Ford）

use crate::error::{Error, Result};
use crate::graph::{Cost, Graph, VertexId};
use indexmap::IndexSet;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, VecDeque};
use tracing::{debug, trace};

/// 路径结果
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathResult {
    /// 路径上的顶点序列（含起点和终点）
    pub vertices: Vec<VertexId>,
    /// 路径长度（边数）
    pub length: usize,
    /// 路径总代价
    pub total_cost: Cost,
}

impl PathResult {
    fn with_start(start: VertexId) -> Self {
        Self {
            vertices: vec![start],
            length: 0,
            total_cost: 0,
        }
    }
}

/// 路径查找器
pub struct PathFinder<'g> {
    graph: &'g Graph,
}

impl<'g> PathFinder<'g> {
    /// 创建路径查找器
    pub fn new(graph: &'g Graph) -> Self {
        Self { graph }
    }

    /// BFS 最短路径查找
    ///
    /// 每个顶点记录第一次发现它的前驱，之后不再覆盖；
    /// 终点出队时结束。不可达时返回 `Ok(None)`。
    pub fn shortest_path(&self, start: VertexId, goal: VertexId) -> Result<Option<PathResult>> {
        if !self.graph.contains_vertex(start) {
            return Err(Error::VertexNotFound(start));
        }
        if !self.graph.contains_vertex(goal) {
            return Err(Error::VertexNotFound(goal));
        }

        let mut distance: HashMap<VertexId, usize> = HashMap::new();
        let mut parent: HashMap<VertexId, VertexId> = HashMap::new();
        let mut queue = VecDeque::new();

        distance.insert(start, 0);
        queue.push_back(start);

        while let Some(current) = queue.pop_front() {
            if current == goal {
                let path = self.reconstruct_path(start, goal, &parent)?;
                debug!(
                    start = %start,
                    goal = %goal,
                    length = path.length,
                    explored = distance.len(),
                    "bfs path found"
                );
                return Ok(Some(path));
            }

            let next_distance = distance.get(&current).copied().unwrap_or(0) + 1;
            for neighbor in self.graph.outbound_neighbors(current)? {
                if distance.contains_key(&neighbor) {
                    continue;
                }
                trace!(from = %current, to = %neighbor, distance = next_distance, "discovered");
                distance.insert(neighbor, next_distance);
                parent.insert(neighbor, current);
                queue.push_back(neighbor);
            }
        }

        debug!(start = %start, goal = %goal, explored = distance.len(), "bfs exhausted");
        Ok(None)
    }

    /// 重构路径：从终点沿前驱走回起点，再反转
    fn reconstruct_path(
        &self,
        start: VertexId,
        goal: VertexId,
        parent: &HashMap<VertexId, VertexId>,
    ) -> Result<PathResult> {
        let mut vertices = vec![goal];
        let mut current = goal;
        while current != start {
            match parent.get(&current) {
                Some(&prev) => {
                    vertices.push(prev);
                    current = prev;
                }
                None => return Err(Error::VertexNotFound(current)),
            }
        }
        vertices.reverse();
        self.priced(vertices)
    }

    /// 按顶点序列计算总代价
    fn priced(&self, vertices: Vec<VertexId>) -> Result<PathResult> {
        let mut path = PathResult::with_start(vertices[0]);
        let mut total_cost: Cost = 0;
        for pair in vertices.windows(2) {
            total_cost = total_cost.saturating_add(self.graph.get_cost(pair[0], pair[1])?);
        }
        path.length = vertices.len() - 1;
        path.vertices = vertices;
        path.total_cost = total_cost;
        Ok(path)
    }

    /// 最小代价游走（顶点可以重复）
    ///
    /// Bellman-Ford：不可达返回 `Ok(None)`；
    /// 若某个从 `src` 可达、又能到达 `dst` 的负权环存在，返回 `NegativeCycle`。
    pub fn min_cost_walk(&self, src: VertexId, dst: VertexId) -> Result<Option<PathResult>> {
        if !self.graph.contains_vertex(src) {
            return Err(Error::VertexNotFound(src));
        }
        if !self.graph.contains_vertex(dst) {
            return Err(Error::VertexNotFound(dst));
        }

        let ids: IndexSet<VertexId> = self.graph.vertices().collect();
        let n = ids.len();
        let edges: Vec<(usize, usize, Cost)> = self
            .graph
            .edges()
            .filter_map(|e| {
                let a = ids.get_index_of(&e.src)?;
                let b = ids.get_index_of(&e.dst)?;
                Some((a, b, e.cost))
            })
            .collect();

        let s = ids.get_index_of(&src).ok_or(Error::VertexNotFound(src))?;
        let t = ids.get_index_of(&dst).ok_or(Error::VertexNotFound(dst))?;

        let mut dist: Vec<Option<Cost>> = vec![None; n];
        let mut pred: Vec<Option<usize>> = vec![None; n];
        dist[s] = Some(0);

        let mut rounds = 0;
        for _ in 1..n.max(1) {
            rounds += 1;
            let mut changed = false;
            for &(a, b, cost) in &edges {
                let Some(da) = dist[a] else {
                    continue;
                };
                let candidate = da.saturating_add(cost);
                if dist[b].map_or(true, |db| candidate < db) {
                    dist[b] = Some(candidate);
                    pred[b] = Some(a);
                    changed = true;
                }
            }
            if !changed {
                break;
            }
        }

        // 仍可松弛的顶点位于负权环上或在其下游
        let mut unbounded = vec![false; n];
        let mut stack = Vec::new();
        for &(a, b, cost) in &edges {
            if let Some(da) = dist[a] {
                if dist[b].map_or(true, |db| da.saturating_add(cost) < db) && !unbounded[b] {
                    unbounded[b] = true;
                    stack.push(b);
                }
            }
        }
        while let Some(i) = stack.pop() {
            for &(a, b, _) in &edges {
                if a == i && !unbounded[b] {
                    unbounded[b] = true;
                    stack.push(b);
                }
            }
        }

        debug!(src = %src, dst = %dst, rounds, "bellman-ford finished");

        if unbounded[t] {
            return Err(Error::NegativeCycle { src, dst });
        }
        if dist[t].is_none() {
            return Ok(None);
        }

        let mut walk = vec![t];
        let mut current = t;
        while current != s {
            match pred[current] {
                Some(prev) if walk.len() <= n => {
                    walk.push(prev);
                    current = prev;
                }
                _ => return Err(Error::NegativeCycle { src, dst }),
            }
        }
        walk.reverse();

        let vertices = walk.into_iter().map(|i| ids[i]).collect();
        self.priced(vertices).map(Some)
    }

    /// 判断两点是否连通
    pub fn is_reachable(&self, start: VertexId, end: VertexId) -> Result<bool> {
        Ok(self.shortest_path(start, end)?.is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(id: i64) -> VertexId {
        VertexId::new(id)
    }

    fn create_test_graph() -> Graph {
        // 0 -> 1 -> 2 -> 3
        //  \-> 4 -> 3
        let mut graph = Graph::with_vertex_count(5);
        graph.add_edge(v(0), v(1), 1).unwrap();
        graph.add_edge(v(1), v(2), 1).unwrap();
        graph.add_edge(v(2), v(3), 1).unwrap();
        graph.add_edge(v(0), v(4), 10).unwrap();
        graph.add_edge(v(4), v(3), 10).unwrap();
        graph
    }

    #[test]
    fn test_shortest_path() {
        let graph = create_test_graph();
        let finder = PathFinder::new(&graph);

        let path = finder.shortest_path(v(0), v(3)).unwrap().unwrap();
        assert_eq!(path.vertices, vec![v(0), v(4), v(3)]);
        assert_eq!(path.length, 2);
        assert_eq!(path.total_cost, 20);

        let same = finder.shortest_path(v(2), v(2)).unwrap().unwrap();
        assert_eq!(same.vertices, vec![v(2)]);
        assert_eq!(same.length, 0);

        assert!(finder.shortest_path(v(3), v(0)).unwrap().is_none());
        assert!(!finder.is_reachable(v(3), v(0)).unwrap());
        assert!(matches!(
            finder.shortest_path(v(0), v(77)),
            Err(Error::VertexNotFound(_))
        ));
    }

    #[test]
    fn test_shortest_path_first_discovery_wins() {
        // 0 -> 1, 0 -> 2, 1 -> 3, 2 -> 3：3 的前驱是先入队的 1
        let mut graph = Graph::with_vertex_count(4);
        graph.add_edge(v(0), v(1), 1).unwrap();
        graph.add_edge(v(0), v(2), 1).unwrap();
        graph.add_edge(v(2), v(3), 1).unwrap();
        graph.add_edge(v(1), v(3), 1).unwrap();

        let path = PathFinder::new(&graph)
            .shortest_path(v(0), v(3))
            .unwrap()
            .unwrap();
        assert_eq!(path.vertices, vec![v(0), v(1), v(3)]);
    }

    #[test]
    fn test_min_cost_walk() {
        let graph = create_test_graph();
        let finder = PathFinder::new(&graph);

        let walk = finder.min_cost_walk(v(0), v(3)).unwrap().unwrap();
        assert_eq!(walk.vertices, vec![v(0), v(1), v(2), v(3)]);
        assert_eq!(walk.total_cost, 3);

        let trivial = finder.min_cost_walk(v(1), v(1)).unwrap().unwrap();
        assert_eq!(trivial.total_cost, 0);
        assert_eq!(trivial.vertices, vec![v(1)]);

        assert!(finder.min_cost_walk(v(3), v(0)).unwrap().is_none());
    }

    #[test]
    fn test_min_cost_walk_negative_edges() {
        let mut graph = Graph::with_vertex_count(4);
        graph.add_edge(v(0), v(1), 4).unwrap();
        graph.add_edge(v(0), v(2), 5).unwrap();
        graph.add_edge(v(2), v(1), -3).unwrap();
        graph.add_edge(v(1), v(3), 2).unwrap();

        let walk = PathFinder::new(&graph)
            .min_cost_walk(v(0), v(3))
            .unwrap()
            .unwrap();
        assert_eq!(walk.vertices, vec![v(0), v(2), v(1), v(3)]);
        assert_eq!(walk.total_cost, 4);
    }

    #[test]
    fn test_min_cost_walk_negative_cycle() {
        // 1 <-> 2 构成负环；3 在环下游，4 不受影响
        let mut graph = Graph::with_vertex_count(5);
        graph.add_edge(v(0), v(1), 1).unwrap();
        graph.add_edge(v(1), v(2), -2).unwrap();
        graph.add_edge(v(2), v(1), 1).unwrap();
        graph.add_edge(v(2), v(3), 1).unwrap();
        graph.add_edge(v(0), v(4), 7).unwrap();

        let finder = PathFinder::new(&graph);
        assert!(matches!(
            finder.min_cost_walk(v(0), v(3)),
            Err(Error::NegativeCycle { .. })
        ));
        assert!(matches!(
            finder.min_cost_walk(v(0), v(1)),
            Err(Error::NegativeCycle { .. })
        ));

        let unaffected = finder.min_cost_walk(v(0), v(4)).unwrap().unwrap();
        assert_eq!(unaffected.total_cost, 7);

        // 负环无法到达终点时结果仍有定义
        assert!(finder.min_cost_walk(v(3), v(3)).unwrap().is_some());
    }
}
