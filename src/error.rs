//! 错误类型定义

use crate::graph::VertexId;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("顶点不存在: {0}")]
    VertexNotFound(VertexId),

    #[error("边不存在: ({src}, {dst})")]
    EdgeNotFound { src: VertexId, dst: VertexId },

    #[error("边已存在: ({src}, {dst})")]
    DuplicateEdge { src: VertexId, dst: VertexId },

    #[error("无法构造: {0}")]
    InvalidConstruction(String),

    #[error("输入格式错误 (第 {line} 行): {reason}")]
    MalformedInput { line: usize, reason: String },

    #[error("存在负权环, {src} 到 {dst} 的最小代价无下界")]
    NegativeCycle { src: VertexId, dst: VertexId },

    #[error("图不存在: {0}")]
    GraphNotFound(String),

    #[error("图已存在: {0}")]
    GraphAlreadyExists(String),

    #[error("IO 错误: {0}")]
    IoError(#[from] std::io::Error),

    #[error("CSV 错误: {0}")]
    CsvError(#[from] csv::Error),
}

impl Error {
    /// 构造输入格式错误
    pub fn malformed(line: usize, reason: impl Into<String>) -> Self {
        Self::MalformedInput {
            line,
            reason: reason.into(),
        }
    }
}
