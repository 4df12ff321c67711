//! 边定义
//!
//! 有向边：有序顶点对加整数代价。边本身存在图的代价表里，
//! 这里的 `Edge` 只是枚举和导出时使用的值视图。

use crate::graph::vertex::VertexId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// 边的代价
pub type Cost = i64;

/// 边的键：(源顶点, 目标顶点)
pub type EdgeKey = (VertexId, VertexId);

/// 边
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Edge {
    /// 源顶点 ID
    pub src: VertexId,
    /// 目标顶点 ID
    pub dst: VertexId,
    /// 代价
    pub cost: Cost,
}

impl Edge {
    /// 创建新边
    pub fn new(src: VertexId, dst: VertexId, cost: Cost) -> Self {
        Self { src, dst, cost }
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {} ({})", self.src, self.dst, self.cost)
    }
}
