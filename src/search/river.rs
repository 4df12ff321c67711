//! 过河问题
//!
//! 每个实体占一位，置 1 表示在左岸；看守者（摆渡人）占最高位。
//! 互斥的一对实体同在一岸且看守者不在该岸时，状态非法。

use super::{solve, SearchOutcome, State, StateSpace, Transitions, MAX_WIDTH};
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// 可配置的过河问题
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RiverCrossing {
    entities: Vec<String>,
    supervisor: String,
    conflicts: Vec<(usize, usize)>,
}

impl RiverCrossing {
    /// 创建过河问题
    ///
    /// `entities[i]` 占第 i 位，`supervisor` 占第 `entities.len()` 位；
    /// `conflicts` 中的下标必须指向不同的实体。
    pub fn new(
        entities: Vec<String>,
        supervisor: impl Into<String>,
        conflicts: Vec<(usize, usize)>,
    ) -> Result<Self> {
        if entities.len() + 1 > MAX_WIDTH as usize {
            return Err(Error::InvalidConstruction(format!(
                "实体过多: {} 个（最多 {} 个）",
                entities.len(),
                MAX_WIDTH - 1
            )));
        }
        for &(a, b) in &conflicts {
            if a >= entities.len() || b >= entities.len() || a == b {
                return Err(Error::InvalidConstruction(format!(
                    "无效的互斥对 ({}, {})",
                    a, b
                )));
            }
        }
        Ok(Self {
            entities,
            supervisor: supervisor.into(),
            conflicts,
        })
    }

    /// 狼、羊、白菜与摆渡人
    pub fn classic() -> Self {
        Self {
            entities: vec!["wolf".into(), "goat".into(), "cabbage".into()],
            supervisor: "ferryman".into(),
            conflicts: vec![(0, 1), (1, 2)],
        }
    }

    pub fn entities(&self) -> &[String] {
        &self.entities
    }

    fn supervisor_bit(&self) -> State {
        1 << self.entities.len()
    }

    /// 全部在左岸
    pub fn full_state(&self) -> State {
        (self.supervisor_bit() << 1) - 1
    }

    /// 右岸的位掩码（按位取反后截断到同一宽度）
    pub fn right_side(&self, state: State) -> State {
        !state & self.full_state()
    }

    fn side_is_safe(&self, side: State) -> bool {
        if side & self.supervisor_bit() != 0 {
            return true;
        }
        !self
            .conflicts
            .iter()
            .any(|&(a, b)| side & (1 << a) != 0 && side & (1 << b) != 0)
    }

    /// 两岸各有哪些成员
    pub fn describe(&self, state: State) -> BankView {
        let names = |side: State| -> Vec<String> {
            self.entities
                .iter()
                .chain(std::iter::once(&self.supervisor))
                .enumerate()
                .filter(|(bit, _)| side & (1 << *bit) != 0)
                .map(|(_, name)| name.clone())
                .collect()
        };
        BankView {
            left: names(state),
            right: names(self.right_side(state)),
        }
    }

    /// 从全部在左岸求解到全部在右岸
    pub fn solve(&self) -> Result<SearchOutcome> {
        solve(self, self.full_state(), 0)
    }
}

impl StateSpace for RiverCrossing {
    fn width(&self) -> u32 {
        self.entities.len() as u32 + 1
    }

    fn is_valid(&self, state: State) -> bool {
        state <= self.full_state()
            && self.side_is_safe(state)
            && self.side_is_safe(self.right_side(state))
    }

    /// 看守者单独翻转，或与任意一个实体一起翻转
    fn transitions(&self, state: State) -> Transitions {
        let supervisor = self.supervisor_bit();
        let mut next = Transitions::new();
        next.push(state ^ supervisor);
        for bit in 0..self.entities.len() {
            next.push(state ^ supervisor ^ (1 << bit));
        }
        next
    }
}

/// 某个状态下两岸的成员
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BankView {
    pub left: Vec<String>,
    pub right: Vec<String>,
}

impl fmt::Display for BankView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let bank = |members: &[String]| {
            if members.is_empty() {
                "(空)".to_string()
            } else {
                members.join(" ")
            }
        };
        write!(f, "左岸: {} | 右岸: {}", bank(&self.left), bank(&self.right))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::build_state_graph;

    #[test]
    fn test_classic_validity() {
        let puzzle = RiverCrossing::classic();
        assert_eq!(puzzle.width(), 4);
        assert_eq!(puzzle.full_state(), 0b1111);
        assert!(puzzle.is_valid(0b1111));
        assert!(puzzle.is_valid(0b0000));
        // 狼和羊留在左岸，摆渡人在右岸
        assert!(!puzzle.is_valid(0b0011));
        // 羊和白菜在右岸，摆渡人在左岸
        assert!(!puzzle.is_valid(0b1001));
        // 只剩羊在左岸
        assert!(puzzle.is_valid(0b0010));
    }

    #[test]
    fn test_classic_solves_in_seven_steps() {
        let puzzle = RiverCrossing::classic();
        let outcome = puzzle.solve().unwrap();
        let solution = outcome.solution().unwrap();

        assert_eq!(solution.steps, 7);
        assert_eq!(solution.states.len(), 8);
        assert_eq!(solution.states.first(), Some(&0b1111));
        assert_eq!(solution.states.last(), Some(&0b0000));
        for &state in &solution.states {
            assert!(puzzle.is_valid(state), "state {:#06b} invalid", state);
        }
        // 每一步摆渡人都过河
        for pair in solution.states.windows(2) {
            assert_ne!(pair[0] & 0b1000, pair[1] & 0b1000);
        }
    }

    #[test]
    fn test_state_graph_has_ten_valid_states() {
        let graph = build_state_graph(&RiverCrossing::classic()).unwrap();
        assert_eq!(graph.vertex_count(), 10);
    }

    #[test]
    fn test_describe() {
        let puzzle = RiverCrossing::classic();
        let view = puzzle.describe(0b1010);
        assert_eq!(view.left, vec!["goat", "ferryman"]);
        assert_eq!(view.right, vec!["wolf", "cabbage"]);
        assert_eq!(view.to_string(), "左岸: goat ferryman | 右岸: wolf cabbage");

        let empty = puzzle.describe(0);
        assert!(empty.left.is_empty());
        assert!(empty.to_string().starts_with("左岸: (空)"));
    }

    #[test]
    fn test_new_rejects_bad_conflicts() {
        let names = vec!["a".to_string(), "b".to_string()];
        assert!(RiverCrossing::new(names.clone(), "s", vec![(0, 2)]).is_err());
        assert!(RiverCrossing::new(names.clone(), "s", vec![(1, 1)]).is_err());

        // 没有互斥关系时总能过河：a、b 各一趟，中间摆渡人空手返回一次
        let easy = RiverCrossing::new(names, "s", vec![]).unwrap();
        let outcome = easy.solve().unwrap();
        assert_eq!(outcome.solution().unwrap().steps, 3);
    }
}
