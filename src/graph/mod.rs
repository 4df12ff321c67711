//! 图核心模块
//!
//! 定义顶点、边和有向图存储

mod catalog;
mod edge;
mod graph;
mod index;
mod vertex;

pub use catalog::{GraphCatalog, DEFAULT_GRAPH_NAME};
pub use edge::{Cost, Edge, EdgeKey};
pub use graph::{Graph, GraphConfig, MAX_VERTEX_COUNT};
pub use index::{AdjacencyIndex, Neighbors, OrderedSet};
pub use vertex::VertexId;
