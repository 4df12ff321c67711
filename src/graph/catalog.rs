//! Graph catalog for multi-graph sessions
//!
//! Keeps named graphs in memory and tracks which one is current.

use crate::error::{Error, Result};
use crate::graph::Graph;
use indexmap::IndexMap;

pub const DEFAULT_GRAPH_NAME: &str = "graph1";

/// GraphCatalog maintains a registry of named graph instances.
#[derive(Debug, Clone)]
pub struct GraphCatalog {
    current_graph: String,
    graphs: IndexMap<String, Graph>,
}

impl Default for GraphCatalog {
    fn default() -> Self {
        Self::new()
    }
}

impl GraphCatalog {
    /// Create a catalog holding one empty default graph.
    pub fn new() -> Self {
        let mut graphs = IndexMap::new();
        graphs.insert(DEFAULT_GRAPH_NAME.to_string(), Graph::new());
        Self {
            current_graph: DEFAULT_GRAPH_NAME.to_string(),
            graphs,
        }
    }

    /// Register a graph under a new name. Fails if name exists.
    pub fn insert(&mut self, name: &str, graph: Graph) -> Result<()> {
        if self.graphs.contains_key(name) {
            return Err(Error::GraphAlreadyExists(name.to_string()));
        }
        self.graphs.insert(name.to_string(), graph);
        Ok(())
    }

    /// Register a graph, appending a numeric suffix until the name is free.
    pub fn insert_unique(&mut self, base: &str, graph: Graph) -> String {
        let mut name = base.to_string();
        let mut n = 1;
        while self.graphs.contains_key(&name) {
            name = format!("{}_{}", base, n);
            n += 1;
        }
        self.graphs.insert(name.clone(), graph);
        name
    }

    /// Drop a graph. The last remaining graph cannot be dropped.
    pub fn drop_graph(&mut self, name: &str) -> Result<Graph> {
        if !self.graphs.contains_key(name) {
            return Err(Error::GraphNotFound(name.to_string()));
        }
        if self.graphs.len() == 1 {
            return Err(Error::InvalidConstruction(
                "不能删除最后一个图".to_string(),
            ));
        }
        let graph = self
            .graphs
            .shift_remove(name)
            .ok_or_else(|| Error::GraphNotFound(name.to_string()))?;
        if self.current_graph == name {
            if let Some(next) = self.graphs.keys().next() {
                self.current_graph = next.clone();
            }
        }
        Ok(graph)
    }

    /// Switch current graph.
    pub fn use_graph(&mut self, name: &str) -> Result<()> {
        if !self.graphs.contains_key(name) {
            return Err(Error::GraphNotFound(name.to_string()));
        }
        self.current_graph = name.to_string();
        Ok(())
    }

    pub fn current_graph_name(&self) -> &str {
        &self.current_graph
    }

    /// Get current graph instance.
    pub fn current_graph(&self) -> Result<&Graph> {
        self.graphs
            .get(&self.current_graph)
            .ok_or_else(|| Error::GraphNotFound(self.current_graph.clone()))
    }

    pub fn current_graph_mut(&mut self) -> Result<&mut Graph> {
        self.graphs
            .get_mut(&self.current_graph)
            .ok_or_else(|| Error::GraphNotFound(self.current_graph.clone()))
    }

    /// Get a specific graph by name without switching context.
    pub fn get_graph(&self, name: &str) -> Option<&Graph> {
        self.graphs.get(name)
    }

    /// List graph names in registration order.
    pub fn list_graphs(&self) -> Vec<String> {
        self.graphs.keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.graphs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.graphs.is_empty()
    }
}
