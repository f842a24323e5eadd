//! 并查集（不相交集合）
//!
//! 按秩合并 + 路径压缩，Kruskal 用它判断加入一条边是否会成环。

use crate::error::{Error, Result};
use std::collections::HashMap;
use std::fmt::Display;
use std::hash::Hash;

/// 并查集
#[derive(Debug, Clone, Default)]
pub struct UnionFind<K> {
    /// 元素 -> 父节点
    parent: HashMap<K, K>,
    /// 元素 -> 秩（仅对代表元有意义）
    rank: HashMap<K, u32>,
}

impl<K> UnionFind<K>
where
    K: Clone + Eq + Hash + Display,
{
    /// 创建空并查集
    pub fn new() -> Self {
        Self {
            parent: HashMap::new(),
            rank: HashMap::new(),
        }
    }

    /// 为每个元素建立单元素集合
    pub fn from_elements<I: IntoIterator<Item = K>>(elements: I) -> Self {
        let mut uf = Self::new();
        for e in elements {
            uf.make_set(e);
        }
        uf
    }

    /// 注册元素为自身的代表元，秩为 0；已注册的元素保持不变
    pub fn make_set(&mut self, element: K) {
        if self.parent.contains_key(&element) {
            return;
        }
        self.parent.insert(element.clone(), element.clone());
        self.rank.insert(element, 0);
    }

    /// 是否已注册
    pub fn contains(&self, element: &K) -> bool {
        self.parent.contains_key(element)
    }

    /// 已注册元素数量
    pub fn len(&self) -> usize {
        self.parent.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parent.is_empty()
    }

    /// 查找代表元，并把路径上的节点直接指向根
    pub fn find(&mut self, element: &K) -> Result<K> {
        let mut root = self
            .parent
            .get(element)
            .ok_or_else(|| Error::NotRegistered(element.to_string()))?
            .clone();
        loop {
            let next = &self.parent[&root];
            if *next == root {
                break;
            }
            root = next.clone();
        }

        let mut node = element.clone();
        while node != root {
            let next = self.parent.insert(node, root.clone());
            node = match next {
                Some(n) => n,
                None => break,
            };
        }

        Ok(root)
    }

    /// 合并两个元素所在集合
    ///
    /// 已在同一集合时返回 `false`（这条边会成环）。秩相同时第二个参数的根
    /// 挂到第一个参数的根下。
    pub fn union(&mut self, x: &K, y: &K) -> Result<bool> {
        let root_x = self.find(x)?;
        let root_y = self.find(y)?;
        if root_x == root_y {
            return Ok(false);
        }

        let rank_x = self.rank.get(&root_x).copied().unwrap_or(0);
        let rank_y = self.rank.get(&root_y).copied().unwrap_or(0);

        if rank_x < rank_y {
            self.parent.insert(root_x, root_y);
        } else if rank_x > rank_y {
            self.parent.insert(root_y, root_x);
        } else {
            self.parent.insert(root_y, root_x.clone());
            self.rank.insert(root_x, rank_x + 1);
        }
        Ok(true)
    }

    /// 两个元素是否在同一集合
    pub fn same(&mut self, x: &K, y: &K) -> Result<bool> {
        Ok(self.find(x)? == self.find(y)?)
    }

    /// 集合数量
    pub fn set_count(&self) -> usize {
        self.parent.iter().filter(|(k, p)| k == p).count()
    }

    /// 按代表元分组，组内与组间均按 `order` 中的先后排列
    pub fn sets<'a, I>(&mut self, order: I) -> Result<Vec<Vec<K>>>
    where
        I: IntoIterator<Item = &'a K>,
        K: 'a,
    {
        let mut groups: Vec<Vec<K>> = Vec::new();
        let mut slot: HashMap<K, usize> = HashMap::new();
        for element in order {
            let root = self.find(element)?;
            let idx = *slot.entry(root).or_insert_with(|| {
                groups.push(Vec::new());
                groups.len() - 1
            });
            groups[idx].push(element.clone());
        }
        Ok(groups)
    }

    #[cfg(test)]
    fn parent_of(&self, element: &K) -> Option<&K> {
        self.parent.get(element)
    }

    #[cfg(test)]
    fn rank_of(&self, element: &K) -> Option<u32> {
        self.rank.get(element).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};
    use std::collections::{HashSet, VecDeque};

    fn numbered(n: u32) -> UnionFind<u32> {
        UnionFind::from_elements(0..n)
    }

    #[test]
    fn test_make_set_and_find() {
        let mut uf = numbered(3);
        assert_eq!(uf.len(), 3);
        assert_eq!(uf.find(&1).unwrap(), 1);
        assert_eq!(uf.set_count(), 3);
    }

    #[test]
    fn test_find_unregistered_fails() {
        let mut uf = numbered(2);
        assert!(matches!(uf.find(&7), Err(Error::NotRegistered(_))));
        assert!(matches!(uf.union(&0, &7), Err(Error::NotRegistered(_))));
    }

    #[test]
    fn test_make_set_twice_keeps_membership() {
        let mut uf = numbered(2);
        assert!(uf.union(&0, &1).unwrap());
        uf.make_set(1);
        assert!(uf.same(&0, &1).unwrap());
    }

    #[test]
    fn test_union_detects_cycle() {
        let mut uf = numbered(3);
        assert!(uf.union(&0, &1).unwrap());
        assert!(uf.union(&1, &2).unwrap());
        assert!(!uf.union(&0, &2).unwrap());
        assert_eq!(uf.set_count(), 1);
    }

    #[test]
    fn test_equal_rank_attaches_second_under_first() {
        let mut uf = numbered(4);
        uf.union(&0, &1).unwrap();
        assert_eq!(uf.parent_of(&1), Some(&0));
        assert_eq!(uf.rank_of(&0), Some(1));

        // 低秩树挂到高秩树下，与参数顺序无关
        uf.union(&2, &0).unwrap();
        assert_eq!(uf.parent_of(&2), Some(&0));
        assert_eq!(uf.rank_of(&0), Some(1));

        uf.union(&3, &0).unwrap();
        assert_eq!(uf.find(&3).unwrap(), 0);
    }

    #[test]
    fn test_path_compression_keeps_representative() {
        let mut uf = numbered(8);
        // 构造一棵较深的树：((0,1),(2,3)) 再与 ((4,5),(6,7)) 合并
        uf.union(&0, &1).unwrap();
        uf.union(&2, &3).unwrap();
        uf.union(&0, &2).unwrap();
        uf.union(&4, &5).unwrap();
        uf.union(&6, &7).unwrap();
        uf.union(&4, &6).unwrap();
        uf.union(&0, &4).unwrap();

        let root = uf.find(&7).unwrap();
        assert_eq!(root, 0);
        assert_eq!(uf.parent_of(&7), Some(&0));
        for i in 0..8 {
            assert_eq!(uf.find(&i).unwrap(), root);
        }
    }

    #[test]
    fn test_sets_follow_given_order() {
        let mut uf = UnionFind::from_elements(["a", "b", "c", "d"].map(String::from));
        uf.union(&"d".to_string(), &"b".to_string()).unwrap();

        let order: Vec<String> = ["a", "b", "c", "d"].map(String::from).to_vec();
        let groups = uf.sets(order.iter()).unwrap();
        assert_eq!(
            groups,
            vec![
                vec!["a".to_string()],
                vec!["b".to_string(), "d".to_string()],
                vec!["c".to_string()],
            ]
        );
    }

    fn reachable(n: u32, edges: &[(u32, u32)], from: u32) -> HashSet<u32> {
        let mut seen = HashSet::from([from]);
        let mut queue = VecDeque::from([from]);
        while let Some(v) = queue.pop_front() {
            for &(a, b) in edges {
                let next = if a == v {
                    b
                } else if b == v {
                    a
                } else {
                    continue;
                };
                if next < n && seen.insert(next) {
                    queue.push_back(next);
                }
            }
        }
        seen
    }

    #[test]
    fn test_partition_matches_reachability() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..50 {
            let n = rng.gen_range(1..12u32);
            let mut uf = numbered(n);
            let mut edges = Vec::new();
            for _ in 0..rng.gen_range(0..15) {
                let a = rng.gen_range(0..n);
                let b = rng.gen_range(0..n);
                uf.union(&a, &b).unwrap();
                edges.push((a, b));
            }

            for x in 0..n {
                let reach = reachable(n, &edges, x);
                for y in 0..n {
                    assert_eq!(uf.same(&x, &y).unwrap(), reach.contains(&y));
                }
            }
        }
    }
}
