//! 隐式状态空间搜索
//!
//! 状态是定宽位掩码，合法状态作为顶点、合法转移作为边，
//! 构造出一张显式的有向图后在上面做 BFS。
//! 任何"状态数有界 + 合法性判定 + 转移生成规则"的问题都可以复用这套流程。

mod river;

pub use river::{BankView, RiverCrossing};

use crate::algorithm::PathFinder;
use crate::error::{Error, Result};
use crate::graph::{Graph, VertexId};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::debug;

/// 位掩码状态
pub type State = u32;

/// 候选后继状态
pub type Transitions = SmallVec<[State; 8]>;

/// 允许的最大位宽（状态总数 2^24）
pub const MAX_WIDTH: u32 = 24;

/// 有界位掩码状态空间
pub trait StateSpace {
    /// 状态位宽
    fn width(&self) -> u32;

    /// 状态是否合法
    fn is_valid(&self, state: State) -> bool;

    /// 候选后继（合法性由构图时过滤）
    fn transitions(&self, state: State) -> Transitions;

    /// 状态总数
    fn state_count(&self) -> u64 {
        1u64 << self.width()
    }
}

/// 搜索结果
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum SearchOutcome {
    /// 找到最短转移序列
    Solved(Solution),
    /// 队列耗尽仍未到达目标
    NoSolution,
}

impl SearchOutcome {
    pub fn solution(&self) -> Option<&Solution> {
        match self {
            SearchOutcome::Solved(solution) => Some(solution),
            SearchOutcome::NoSolution => None,
        }
    }
}

/// 从起点到目标的状态序列
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Solution {
    /// 依次经过的状态（含起点和目标）
    pub states: Vec<State>,
    /// 转移次数
    pub steps: usize,
}

fn check_width<S: StateSpace + ?Sized>(space: &S) -> Result<()> {
    if space.width() == 0 || space.width() > MAX_WIDTH {
        return Err(Error::InvalidConstruction(format!(
            "状态位宽必须在 1..={} 之间, 实际为 {}",
            MAX_WIDTH,
            space.width()
        )));
    }
    Ok(())
}

/// 构造状态图：合法状态按数值递增插入，到合法后继各连一条代价为 1 的边
pub fn build_state_graph<S: StateSpace + ?Sized>(space: &S) -> Result<Graph> {
    check_width(space)?;
    let count = space.state_count();

    let valid: Vec<State> = (0..count as State).filter(|&s| space.is_valid(s)).collect();
    let mut graph = Graph::from_vertices(valid.iter().map(|&s| VertexId::from(s)));

    for &state in &valid {
        for next in space.transitions(state) {
            if u64::from(next) >= count || !space.is_valid(next) {
                continue;
            }
            graph.add_edge(VertexId::from(state), VertexId::from(next), 1)?;
        }
    }

    debug!(
        states = count,
        valid = graph.vertex_count(),
        transitions = graph.edge_count(),
        "state graph built"
    );
    Ok(graph)
}

/// 在状态图上做 BFS，求从 `start` 到 `goal` 的最少转移序列
///
/// 起点或目标不是合法状态时返回 `InvalidConstruction`；
/// 目标不可达是正常结果 `SearchOutcome::NoSolution`。
pub fn solve<S: StateSpace + ?Sized>(space: &S, start: State, goal: State) -> Result<SearchOutcome> {
    check_width(space)?;
    for (role, state) in [("起点", start), ("目标", goal)] {
        if u64::from(state) >= space.state_count() || !space.is_valid(state) {
            return Err(Error::InvalidConstruction(format!(
                "{} {:#b} 不是合法状态",
                role, state
            )));
        }
    }

    let graph = build_state_graph(space)?;
    let path = PathFinder::new(&graph).shortest_path(VertexId::from(start), VertexId::from(goal))?;

    let outcome = match path {
        Some(path) => SearchOutcome::Solved(Solution {
            states: path.vertices.iter().map(|v| v.as_i64() as State).collect(),
            steps: path.length,
        }),
        None => SearchOutcome::NoSolution,
    };
    debug!(
        start = start,
        goal = goal,
        solved = outcome.solution().is_some(),
        "state space search finished"
    );
    Ok(outcome)
}
