//! Digraph - 有向图存储与图算法
//!
//! 提供：
//! - 三索引有向图存储（出边、入边、代价表）
//! - 连通性分析（可达集、弱/强连通分量、双连通分量）
//! - 路径查找（BFS 最短路径、最小代价游走）
//! - 隐式状态空间搜索（过河问题）
//! - 文本/CSV 读写与随机图生成

pub mod algorithm;
pub mod cli;
pub mod error;
pub mod generator;
pub mod graph;
pub mod io;
pub mod logging;
pub mod search;

// 重导出常用类型
pub use error::{Error, Result};
pub use graph::{Cost, Edge, Graph, GraphCatalog, GraphConfig, VertexId};
pub use search::{RiverCrossing, SearchOutcome, Solution, StateSpace};

/// 库版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
