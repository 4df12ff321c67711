//! 图数据结构
//!
//! 三个索引共同维护：出边邻接、入边邻接和代价表。
//! 每个公开操作结束后都满足
//! `v2 ∈ out[v1] ⇔ v1 ∈ in[v2] ⇔ costs 含 (v1, v2)`。

use super::edge::{Cost, Edge, EdgeKey};
use super::index::{AdjacencyIndex, Neighbors};
use super::vertex::VertexId;
use crate::error::{Error, Result};
use std::collections::HashMap;
use tracing::trace;

/// 按数量一次性创建顶点时允许的上限
pub const MAX_VERTEX_COUNT: usize = 1 << 20;

/// 图配置
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GraphConfig {
    /// 加边时自动创建不存在的端点
    pub auto_create_vertices: bool,
}

/// 有向图
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Graph {
    /// 出边索引
    outgoing: AdjacencyIndex,
    /// 入边索引
    incoming: AdjacencyIndex,
    /// 代价表
    costs: HashMap<EdgeKey, Cost>,
    /// 配置
    config: GraphConfig,
}

impl Graph {
    /// 创建空图（加边时端点必须已存在）
    pub fn new() -> Self {
        Self::default()
    }

    /// 按配置创建空图
    pub fn with_config(config: GraphConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// 创建包含顶点 `0..vertex_count` 的图
    ///
    /// 不检查上限，外部输入应走 [`Graph::try_with_vertex_count`]。
    pub fn with_vertex_count(vertex_count: usize) -> Self {
        let mut graph = Self::new();
        let upper = i64::try_from(vertex_count).unwrap_or(i64::MAX);
        for i in 0..upper {
            graph.add_vertex(VertexId::new(i));
        }
        graph
    }

    /// 创建包含顶点 `0..vertex_count` 的图，超过 [`MAX_VERTEX_COUNT`] 时报错
    pub fn try_with_vertex_count(vertex_count: usize) -> Result<Self> {
        if vertex_count > MAX_VERTEX_COUNT {
            return Err(Error::InvalidConstruction(format!(
                "顶点数 {} 超过上限 {}",
                vertex_count, MAX_VERTEX_COUNT
            )));
        }
        Ok(Self::with_vertex_count(vertex_count))
    }

    /// 按给定顶点列表创建图（重复的 ID 被忽略）
    pub fn from_vertices<I>(vertices: I) -> Self
    where
        I: IntoIterator<Item = VertexId>,
    {
        let mut graph = Self::new();
        for vertex in vertices {
            graph.add_vertex(vertex);
        }
        graph
    }

    /// 获取配置
    pub fn config(&self) -> GraphConfig {
        self.config
    }

    // ==================== 顶点操作 ====================

    /// 添加顶点，已存在时返回 false
    pub fn add_vertex(&mut self, id: VertexId) -> bool {
        if !self.outgoing.add_vertex(id) {
            return false;
        }
        self.incoming.add_vertex(id);
        true
    }

    /// 删除顶点，级联删除所有关联边，返回删除的边数
    pub fn remove_vertex(&mut self, id: VertexId) -> Result<usize> {
        let successors = self
            .outgoing
            .remove_vertex(id)
            .ok_or(Error::VertexNotFound(id))?;
        let predecessors = self.incoming.remove_vertex(id).unwrap_or_default();

        let mut removed = 0;
        for dst in &successors {
            if dst != id {
                self.incoming.unlink(dst, id);
            }
            self.costs.remove(&(id, dst));
            removed += 1;
        }
        for src in &predecessors {
            // 自环已在出边一侧计数
            if src == id {
                continue;
            }
            self.outgoing.unlink(src, id);
            self.costs.remove(&(src, id));
            removed += 1;
        }

        trace!(vertex = %id, edges = removed, "vertex removed");
        Ok(removed)
    }

    /// 是否包含顶点
    pub fn contains_vertex(&self, id: VertexId) -> bool {
        self.outgoing.contains(id)
    }

    /// 按插入顺序枚举顶点
    pub fn vertices(&self) -> impl Iterator<Item = VertexId> + '_ {
        self.outgoing.vertices()
    }

    /// 获取顶点数量
    pub fn vertex_count(&self) -> usize {
        self.outgoing.len()
    }

    /// 入度和出度都为 0 的顶点
    pub fn isolated_vertices(&self) -> impl Iterator<Item = VertexId> + '_ {
        self.vertices().filter(|&v| {
            self.outgoing.degree(v) == Some(0) && self.incoming.degree(v) == Some(0)
        })
    }

    // ==================== 边操作 ====================

    /// 添加边
    ///
    /// 点对已有边时返回 false，原代价保持不变。
    pub fn add_edge(&mut self, src: VertexId, dst: VertexId, cost: Cost) -> Result<bool> {
        if self.config.auto_create_vertices {
            self.add_vertex(src);
            self.add_vertex(dst);
        }
        if !self.contains_vertex(src) {
            return Err(Error::VertexNotFound(src));
        }
        if !self.contains_vertex(dst) {
            return Err(Error::VertexNotFound(dst));
        }
        if self.costs.contains_key(&(src, dst)) {
            return Ok(false);
        }

        self.costs.insert((src, dst), cost);
        self.outgoing.link(src, dst);
        self.incoming.link(dst, src);
        Ok(true)
    }

    /// 删除边
    pub fn remove_edge(&mut self, src: VertexId, dst: VertexId) -> Result<()> {
        if self.costs.remove(&(src, dst)).is_none() {
            return Err(Error::EdgeNotFound { src, dst });
        }
        self.outgoing.unlink(src, dst);
        self.incoming.unlink(dst, src);
        Ok(())
    }

    /// 是否存在边（端点不存在时返回 false）
    pub fn is_edge(&self, src: VertexId, dst: VertexId) -> bool {
        self.costs.contains_key(&(src, dst))
    }

    /// 获取边的代价
    pub fn get_cost(&self, src: VertexId, dst: VertexId) -> Result<Cost> {
        self.costs
            .get(&(src, dst))
            .copied()
            .ok_or(Error::EdgeNotFound { src, dst })
    }

    /// 修改边的代价，邻接关系不变
    pub fn modify_cost(&mut self, src: VertexId, dst: VertexId, cost: Cost) -> Result<()> {
        match self.costs.get_mut(&(src, dst)) {
            Some(slot) => {
                *slot = cost;
                Ok(())
            }
            None => Err(Error::EdgeNotFound { src, dst }),
        }
    }

    /// 获取边数量
    pub fn edge_count(&self) -> usize {
        self.costs.len()
    }

    /// 枚举所有边：按顶点顺序，同一源点内按出边插入顺序
    pub fn edges(&self) -> impl Iterator<Item = Edge> + '_ {
        self.outgoing.vertices().flat_map(move |src| {
            self.outgoing
                .neighbors(src)
                .into_iter()
                .flatten()
                .filter_map(move |dst| {
                    self.costs
                        .get(&(src, dst))
                        .map(|&cost| Edge::new(src, dst, cost))
                })
        })
    }

    // ==================== 邻居查询 ====================

    /// 出边邻居（后继）
    pub fn outbound_neighbors(&self, id: VertexId) -> Result<Neighbors<'_>> {
        self.outgoing.neighbors(id).ok_or(Error::VertexNotFound(id))
    }

    /// 入边邻居（前驱）
    pub fn inbound_neighbors(&self, id: VertexId) -> Result<Neighbors<'_>> {
        self.incoming.neighbors(id).ok_or(Error::VertexNotFound(id))
    }

    /// 获取顶点的出度
    pub fn out_degree(&self, id: VertexId) -> Result<usize> {
        self.outgoing.degree(id).ok_or(Error::VertexNotFound(id))
    }

    /// 获取顶点的入度
    pub fn in_degree(&self, id: VertexId) -> Result<usize> {
        self.incoming.degree(id).ok_or(Error::VertexNotFound(id))
    }

    // ==================== 子图 ====================

    /// 导出诱导子图：给定顶点（按给定顺序）及两端都在其中的所有边
    pub fn induced_subgraph<I>(&self, vertices: I) -> Result<Graph>
    where
        I: IntoIterator<Item = VertexId>,
    {
        let mut sub = Graph::with_config(self.config);
        for vertex in vertices {
            if !self.contains_vertex(vertex) {
                return Err(Error::VertexNotFound(vertex));
            }
            sub.add_vertex(vertex);
        }

        let members: Vec<VertexId> = sub.vertices().collect();
        for src in members {
            for dst in self.outgoing.neighbors(src).into_iter().flatten() {
                if !sub.contains_vertex(dst) {
                    continue;
                }
                if let Some(&cost) = self.costs.get(&(src, dst)) {
                    sub.add_edge(src, dst, cost)?;
                }
            }
        }
        Ok(sub)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn v(id: i64) -> VertexId {
        VertexId::new(id)
    }

    /// 三个索引互相一致
    fn assert_consistent(graph: &Graph) {
        let mut seen = 0;
        for src in graph.vertices() {
            for dst in graph.outbound_neighbors(src).unwrap() {
                assert!(graph.inbound_neighbors(dst).unwrap().any(|p| p == src));
                assert!(graph.get_cost(src, dst).is_ok());
                seen += 1;
            }
            for pred in graph.inbound_neighbors(src).unwrap() {
                assert!(graph.outbound_neighbors(pred).unwrap().any(|s| s == src));
            }
        }
        assert_eq!(seen, graph.edge_count());
    }

    #[test]
    fn test_graph_crud() {
        let mut graph = Graph::with_vertex_count(3);

        assert!(graph.add_edge(v(0), v(1), 5).unwrap());
        assert!(graph.add_edge(v(1), v(2), 3).unwrap());
        assert_eq!(graph.edge_count(), 2);
        assert_eq!(graph.get_cost(v(0), v(1)).unwrap(), 5);

        assert_eq!(graph.remove_vertex(v(1)).unwrap(), 2);
        assert_eq!(graph.edge_count(), 0);
        assert_eq!(graph.vertex_count(), 2);
        assert_consistent(&graph);
    }

    #[test]
    fn test_add_vertex_idempotent() {
        let mut graph = Graph::new();
        assert!(graph.add_vertex(v(7)));
        assert!(!graph.add_vertex(v(7)));
        assert_eq!(graph.vertex_count(), 1);
    }

    #[test]
    fn test_add_then_remove_vertex_restores_count() {
        let mut graph = Graph::with_vertex_count(4);
        let before = graph.vertex_count();

        graph.add_vertex(v(100));
        graph.remove_vertex(v(100)).unwrap();

        assert_eq!(graph.vertex_count(), before);
        assert!(matches!(graph.in_degree(v(100)), Err(Error::VertexNotFound(_))));
        assert!(matches!(graph.out_degree(v(100)), Err(Error::VertexNotFound(_))));
        assert!(graph.outbound_neighbors(v(100)).is_err());
        assert!(graph.inbound_neighbors(v(100)).is_err());
        assert!(matches!(graph.remove_vertex(v(100)), Err(Error::VertexNotFound(_))));
    }

    #[test]
    fn test_duplicate_edge_keeps_cost() {
        let mut graph = Graph::with_vertex_count(2);
        assert!(graph.add_edge(v(0), v(1), 10).unwrap());
        assert!(!graph.add_edge(v(0), v(1), 50).unwrap());

        assert_eq!(graph.get_cost(v(0), v(1)).unwrap(), 10);
        assert_eq!(graph.edge_count(), 1);
        assert_eq!(graph.out_degree(v(0)).unwrap(), 1);
    }

    #[test]
    fn test_add_edge_missing_endpoint() {
        let mut graph = Graph::with_vertex_count(1);

        assert!(matches!(
            graph.add_edge(v(0), v(9), 1),
            Err(Error::VertexNotFound(id)) if id == v(9)
        ));
        assert!(matches!(
            graph.add_edge(v(8), v(0), 1),
            Err(Error::VertexNotFound(id)) if id == v(8)
        ));
        assert_eq!(graph.edge_count(), 0);
    }

    #[test]
    fn test_auto_create_vertices() {
        let mut graph = Graph::with_config(GraphConfig {
            auto_create_vertices: true,
        });

        assert!(graph.add_edge(v(3), v(-1), 2).unwrap());
        assert_eq!(graph.vertices().collect::<Vec<_>>(), vec![v(3), v(-1)]);
        assert!(graph.is_edge(v(3), v(-1)));
    }

    #[test]
    fn test_edge_queries() {
        let mut graph = Graph::with_vertex_count(3);
        graph.add_edge(v(0), v(2), 4).unwrap();
        graph.add_edge(v(0), v(1), 7).unwrap();

        assert!(graph.is_edge(v(0), v(2)));
        assert!(!graph.is_edge(v(2), v(0)));
        assert!(!graph.is_edge(v(0), v(42)));

        let out: Vec<_> = graph.outbound_neighbors(v(0)).unwrap().collect();
        assert_eq!(out, vec![v(2), v(1)]);
        let inbound: Vec<_> = graph.inbound_neighbors(v(1)).unwrap().collect();
        assert_eq!(inbound, vec![v(0)]);

        graph.modify_cost(v(0), v(1), -3).unwrap();
        assert_eq!(graph.get_cost(v(0), v(1)).unwrap(), -3);
        assert_eq!(graph.outbound_neighbors(v(0)).unwrap().count(), 2);

        assert!(matches!(
            graph.modify_cost(v(1), v(0), 1),
            Err(Error::EdgeNotFound { .. })
        ));
        assert!(matches!(
            graph.get_cost(v(1), v(0)),
            Err(Error::EdgeNotFound { .. })
        ));
    }

    #[test]
    fn test_remove_edge() {
        let mut graph = Graph::with_vertex_count(3);
        graph.add_edge(v(0), v(1), 1).unwrap();
        graph.add_edge(v(1), v(2), 1).unwrap();

        graph.remove_edge(v(0), v(1)).unwrap();
        assert!(!graph.is_edge(v(0), v(1)));
        assert_eq!(graph.in_degree(v(1)).unwrap(), 0);
        assert!(matches!(
            graph.remove_edge(v(0), v(1)),
            Err(Error::EdgeNotFound { .. })
        ));
        assert_consistent(&graph);
    }

    #[test]
    fn test_self_loop_removal() {
        let mut graph = Graph::with_vertex_count(2);
        graph.add_edge(v(0), v(0), 1).unwrap();
        graph.add_edge(v(0), v(1), 1).unwrap();
        graph.add_edge(v(1), v(0), 1).unwrap();

        assert_eq!(graph.in_degree(v(0)).unwrap(), 2);
        assert_eq!(graph.remove_vertex(v(0)).unwrap(), 3);
        assert_eq!(graph.edge_count(), 0);
        assert_eq!(graph.in_degree(v(1)).unwrap(), 0);
        assert_eq!(graph.out_degree(v(1)).unwrap(), 0);
    }

    #[test]
    fn test_remove_vertex_only_touches_incident_edges() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..20 {
            let mut graph = Graph::with_vertex_count(8);
            for _ in 0..30 {
                let a = v(rng.gen_range(0..8));
                let b = v(rng.gen_range(0..8));
                graph.add_edge(a, b, rng.gen_range(-10..10)).unwrap();
            }
            let victim = v(rng.gen_range(0..8));

            let before: Vec<(VertexId, usize, usize)> = graph
                .vertices()
                .filter(|&x| x != victim)
                .map(|x| {
                    (
                        x,
                        graph.in_degree(x).unwrap(),
                        graph.out_degree(x).unwrap(),
                    )
                })
                .collect();

            let mut expected = Vec::new();
            for &(x, in_deg, out_deg) in &before {
                let from_victim = usize::from(graph.is_edge(victim, x));
                let to_victim = usize::from(graph.is_edge(x, victim));
                expected.push((x, in_deg - from_victim, out_deg - to_victim));
            }

            graph.remove_vertex(victim).unwrap();
            for (x, in_deg, out_deg) in expected {
                assert_eq!(graph.in_degree(x).unwrap(), in_deg);
                assert_eq!(graph.out_degree(x).unwrap(), out_deg);
            }
            assert_consistent(&graph);
        }
    }

    #[test]
    fn test_clone_is_independent() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut original = Graph::with_vertex_count(6);
        for _ in 0..15 {
            let a = v(rng.gen_range(0..6));
            let b = v(rng.gen_range(0..6));
            original.add_edge(a, b, rng.gen_range(-5..5)).unwrap();
        }
        let vertices_before: Vec<_> = original.vertices().collect();
        let edges_before: Vec<_> = original.edges().collect();

        let mut copy = original.clone();
        assert_eq!(copy, original);

        copy.remove_vertex(v(0)).unwrap();
        copy.add_vertex(v(99));
        copy.add_edge(v(99), v(1), 3).unwrap();
        let first_edge = copy.edges().next();
        if let Some(edge) = first_edge {
            copy.modify_cost(edge.src, edge.dst, 1000).unwrap();
            copy.remove_edge(edge.src, edge.dst).unwrap();
        }

        assert_eq!(original.vertices().collect::<Vec<_>>(), vertices_before);
        assert_eq!(original.edges().collect::<Vec<_>>(), edges_before);
        assert_consistent(&original);
    }

    #[test]
    fn test_isolated_vertices_and_edges() {
        let mut graph = Graph::from_vertices([v(4), v(2), v(9)]);
        graph.add_edge(v(4), v(2), 1).unwrap();

        assert_eq!(graph.isolated_vertices().collect::<Vec<_>>(), vec![v(9)]);
        assert_eq!(
            graph.edges().collect::<Vec<_>>(),
            vec![Edge::new(v(4), v(2), 1)]
        );
    }

    #[test]
    fn test_induced_subgraph() {
        let mut graph = Graph::with_vertex_count(4);
        graph.add_edge(v(0), v(1), 1).unwrap();
        graph.add_edge(v(1), v(2), 2).unwrap();
        graph.add_edge(v(2), v(0), 3).unwrap();
        graph.add_edge(v(2), v(3), 4).unwrap();

        let sub = graph.induced_subgraph([v(2), v(0), v(1)]).unwrap();
        assert_eq!(sub.vertices().collect::<Vec<_>>(), vec![v(2), v(0), v(1)]);
        assert_eq!(sub.edge_count(), 3);
        assert_eq!(sub.get_cost(v(2), v(0)).unwrap(), 3);
        assert!(!sub.contains_vertex(v(3)));

        assert!(graph.induced_subgraph([v(0), v(17)]).is_err());
    }

    #[test]
    fn test_try_with_vertex_count_bound() {
        let graph = Graph::try_with_vertex_count(4).unwrap();
        assert_eq!(graph.vertex_count(), 4);
        assert!(matches!(
            Graph::try_with_vertex_count(MAX_VERTEX_COUNT + 1),
            Err(Error::InvalidConstruction(_))
        ));
        assert!(matches!(
            Graph::try_with_vertex_count(usize::MAX),
            Err(Error::InvalidConstruction(_))
        ));
    }

    #[test]
    fn test_remove_oldest_leaves_of_large_star() {
        let leaves = 30_000;
        let hub = v(leaves);
        let mut graph = Graph::with_vertex_count(leaves as usize);
        graph.add_vertex(hub);
        for i in 0..leaves {
            graph.add_edge(v(i), hub, 1).unwrap();
        }

        for i in 0..5_000 {
            assert_eq!(graph.remove_vertex(v(i)).unwrap(), 1);
        }

        assert_eq!(graph.vertex_count(), leaves as usize - 5_000 + 1);
        assert_eq!(graph.in_degree(hub).unwrap(), leaves as usize - 5_000);
        assert_eq!(graph.vertices().next(), Some(v(5_000)));
        assert_eq!(graph.inbound_neighbors(hub).unwrap().next(), Some(v(5_000)));
        assert_eq!(graph.vertices().last(), Some(hub));
    }
}
