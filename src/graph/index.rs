//! 邻接索引
//!
//! 单方向的邻接表：顶点 -> 按插入顺序排列的邻居集合。
//! 图同时持有出边和入边两份索引。
//!
//! 顶点序列和邻居集合都用 [`OrderedSet`]：删除只留下空槽，
//! 空槽多于存活元素时才整体压缩，删除的均摊代价为 O(1)。

use crate::graph::vertex::VertexId;
use std::collections::HashMap;
use std::hash::Hash;

/// 保持插入顺序、删除均摊 O(1) 的集合
#[derive(Debug, Clone)]
pub struct OrderedSet<T> {
    /// 按插入顺序排列的槽位，`None` 为已删除
    slots: Vec<Option<T>>,
    /// 元素 -> 槽位下标
    positions: HashMap<T, usize>,
}

impl<T> Default for OrderedSet<T> {
    fn default() -> Self {
        Self {
            slots: Vec::new(),
            positions: HashMap::new(),
        }
    }
}

impl<T: Copy + Eq + Hash> OrderedSet<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// 追加到末尾，已存在时返回 false
    pub fn insert(&mut self, value: T) -> bool {
        if self.positions.contains_key(&value) {
            return false;
        }
        self.positions.insert(value, self.slots.len());
        self.slots.push(Some(value));
        true
    }

    /// 删除元素，其余元素顺序不变
    pub fn remove(&mut self, value: &T) -> bool {
        let Some(pos) = self.positions.remove(value) else {
            return false;
        };
        self.slots[pos] = None;
        if self.slots.len() - self.positions.len() > self.positions.len() {
            self.compact();
        }
        true
    }

    fn compact(&mut self) {
        self.slots.retain(Option::is_some);
        for (pos, slot) in self.slots.iter().enumerate() {
            if let Some(value) = slot {
                self.positions.insert(*value, pos);
            }
        }
    }

    pub fn contains(&self, value: &T) -> bool {
        self.positions.contains_key(value)
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// 按插入顺序迭代
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            slots: self.slots.iter(),
            remaining: self.positions.len(),
        }
    }
}

/// 两个集合元素相同即相等，不比较顺序
impl<T: Copy + Eq + Hash> PartialEq for OrderedSet<T> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().all(|value| other.contains(&value))
    }
}

impl<T: Copy + Eq + Hash> Eq for OrderedSet<T> {}

impl<'a, T: Copy + Eq + Hash> IntoIterator for &'a OrderedSet<T> {
    type Item = T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// [`OrderedSet`] 的迭代器，跳过空槽
#[derive(Debug, Clone)]
pub struct Iter<'a, T> {
    slots: std::slice::Iter<'a, Option<T>>,
    remaining: usize,
}

impl<T: Copy> Iterator for Iter<'_, T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let value = self.slots.by_ref().find_map(|slot| *slot)?;
        self.remaining -= 1;
        Some(value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T: Copy> ExactSizeIterator for Iter<'_, T> {}

/// 邻接索引
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AdjacencyIndex {
    /// 顶点插入顺序
    order: OrderedSet<VertexId>,
    /// 顶点到邻居集合的映射
    lists: HashMap<VertexId, OrderedSet<VertexId>>,
}

impl AdjacencyIndex {
    /// 创建新索引
    pub fn new() -> Self {
        Self::default()
    }

    /// 添加顶点，已存在时返回 false
    pub fn add_vertex(&mut self, vertex: VertexId) -> bool {
        if !self.order.insert(vertex) {
            return false;
        }
        self.lists.insert(vertex, OrderedSet::new());
        true
    }

    /// 移除顶点并交出它的邻居集合
    pub fn remove_vertex(&mut self, vertex: VertexId) -> Option<OrderedSet<VertexId>> {
        let neighbors = self.lists.remove(&vertex)?;
        self.order.remove(&vertex);
        Some(neighbors)
    }

    /// 是否包含顶点
    pub fn contains(&self, vertex: VertexId) -> bool {
        self.lists.contains_key(&vertex)
    }

    /// 追加邻居，已存在时返回 false
    pub fn link(&mut self, vertex: VertexId, neighbor: VertexId) -> bool {
        match self.lists.get_mut(&vertex) {
            Some(set) => set.insert(neighbor),
            None => false,
        }
    }

    /// 移除邻居，保持其余邻居的顺序
    pub fn unlink(&mut self, vertex: VertexId, neighbor: VertexId) -> bool {
        match self.lists.get_mut(&vertex) {
            Some(set) => set.remove(&neighbor),
            None => false,
        }
    }

    /// 获取邻居迭代器
    pub fn neighbors(&self, vertex: VertexId) -> Option<Neighbors<'_>> {
        self.lists.get(&vertex).map(|set| Neighbors { inner: set.iter() })
    }

    /// 获取度数
    pub fn degree(&self, vertex: VertexId) -> Option<usize> {
        self.lists.get(&vertex).map(|set| set.len())
    }

    /// 按插入顺序枚举顶点
    pub fn vertices(&self) -> Iter<'_, VertexId> {
        self.order.iter()
    }

    /// 顶点数量
    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

/// 邻居迭代器
///
/// 惰性、有限，按插入顺序产出邻居；`clone()` 即可从头重新遍历。
#[derive(Debug, Clone)]
pub struct Neighbors<'a> {
    inner: Iter<'a, VertexId>,
}

impl Iterator for Neighbors<'_> {
    type Item = VertexId;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl ExactSizeIterator for Neighbors<'_> {}
