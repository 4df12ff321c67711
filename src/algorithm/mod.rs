//! 图算法模块
//!
//! 包含连通性分析（可达集、弱/强连通分量、双连通分量）和路径查找

mod biconnected;
mod connectivity;
mod path_tracing;
mod scc;

pub use biconnected::{articulation_points, biconnected_components};
pub use connectivity::{reachability_partition, reachable_set, weakly_connected_components};
pub use path_tracing::{PathFinder, PathResult};
pub use scc::strongly_connected_components;
