//! 随机图生成

use crate::error::{Error, Result};
use crate::graph::{Cost, Graph, VertexId};
use rand::Rng;
use tracing::debug;

/// 生成器配置
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GeneratorConfig {
    /// 最小代价（含）
    pub min_cost: Cost,
    /// 最大代价（含）
    pub max_cost: Cost,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            min_cost: -100,
            max_cost: 100,
        }
    }
}

/// 生成顶点为 `0..vertices`、恰好 `edges` 条不同边的随机图
///
/// 反复抽取有序点对（允许自环），已存在的点对直接丢弃重抽。
/// `edges` 超过 `vertices²` 或顶点数超过 [`MAX_VERTEX_COUNT`](crate::graph::MAX_VERTEX_COUNT) 时无法构造。
pub fn random_graph<R: Rng + ?Sized>(
    vertices: usize,
    edges: usize,
    config: &GeneratorConfig,
    rng: &mut R,
) -> Result<Graph> {
    let capacity = vertices.checked_mul(vertices).ok_or_else(|| {
        Error::InvalidConstruction(format!("顶点数过大: {}", vertices))
    })?;
    if edges > capacity {
        return Err(Error::InvalidConstruction(format!(
            "{} 个顶点最多只能有 {} 条边, 请求 {} 条",
            vertices, capacity, edges
        )));
    }
    if config.min_cost > config.max_cost {
        return Err(Error::InvalidConstruction(format!(
            "代价范围无效: [{}, {}]",
            config.min_cost, config.max_cost
        )));
    }

    let mut graph = Graph::try_with_vertex_count(vertices)?;
    let mut rejected = 0usize;
    while graph.edge_count() < edges {
        let src = VertexId::new(rng.gen_range(0..vertices) as i64);
        let dst = VertexId::new(rng.gen_range(0..vertices) as i64);
        let cost = rng.gen_range(config.min_cost..=config.max_cost);
        if !graph.add_edge(src, dst, cost)? {
            rejected += 1;
        }
    }

    debug!(vertices, edges, rejected, "random graph generated");
    Ok(graph)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::MAX_VERTEX_COUNT;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_too_many_edges() {
        let mut rng = StdRng::seed_from_u64(1);
        let result = random_graph(3, 10, &GeneratorConfig::default(), &mut rng);
        assert!(matches!(result, Err(Error::InvalidConstruction(_))));
    }

    #[test]
    fn test_complete_graph_with_self_loops() {
        let mut rng = StdRng::seed_from_u64(2);
        let graph = random_graph(3, 9, &GeneratorConfig::default(), &mut rng).unwrap();
        assert_eq!(graph.vertex_count(), 3);
        assert_eq!(graph.edge_count(), 9);
        for i in 0..3 {
            assert!(graph.is_edge(VertexId::new(i), VertexId::new(i)));
        }
    }

    #[test]
    fn test_costs_in_range() {
        let mut rng = StdRng::seed_from_u64(3);
        let config = GeneratorConfig {
            min_cost: -5,
            max_cost: 5,
        };
        let graph = random_graph(20, 100, &config, &mut rng).unwrap();
        assert_eq!(graph.edge_count(), 100);
        assert!(graph.edges().all(|e| (-5..=5).contains(&e.cost)));
    }

    #[test]
    fn test_same_seed_same_graph() {
        let config = GeneratorConfig::default();
        let a = random_graph(10, 30, &config, &mut StdRng::seed_from_u64(9)).unwrap();
        let b = random_graph(10, 30, &config, &mut StdRng::seed_from_u64(9)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_edge_cases() {
        let mut rng = StdRng::seed_from_u64(4);
        let config = GeneratorConfig::default();
        assert_eq!(random_graph(0, 0, &config, &mut rng).unwrap().vertex_count(), 0);
        assert!(random_graph(0, 1, &config, &mut rng).is_err());

        let inverted = GeneratorConfig {
            min_cost: 1,
            max_cost: 0,
        };
        assert!(random_graph(2, 1, &inverted, &mut rng).is_err());

        assert!(matches!(
            random_graph(MAX_VERTEX_COUNT + 1, 0, &config, &mut rng),
            Err(Error::InvalidConstruction(_))
        ));
    }
}
