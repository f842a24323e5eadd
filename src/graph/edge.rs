//! 边定义
//!
//! 存储时保留方向（source → target），MST 与连通性计算一律视为无向边

use crate::graph::vertex::VertexId;
use crate::types::{algorithm_weight, display_weight, parse_input_weight};
use serde::{Deserialize, Serialize};
use std::fmt;

/// 边 ID（图内唯一）
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EdgeId(pub String);

impl EdgeId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for EdgeId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for EdgeId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl fmt::Display for EdgeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// 边
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    /// 边 ID
    id: EdgeId,
    /// 源顶点 ID
    source: VertexId,
    /// 目标顶点 ID
    target: VertexId,
    /// 权重（可能缺失）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    weight: Option<f64>,
    /// 显示标签（用户输入的原始文本）
    #[serde(default)]
    label: String,
}

impl Edge {
    /// 创建新边
    pub fn new(id: EdgeId, source: VertexId, target: VertexId, weight: Option<f64>) -> Self {
        let label = weight.map(|w| w.to_string()).unwrap_or_default();
        Self {
            id,
            source,
            target,
            weight,
            label,
        }
    }

    /// 交互式连线创建的边：权重 0，标签为空
    pub fn new_interactive(id: EdgeId, source: VertexId, target: VertexId) -> Self {
        Self {
            id,
            source,
            target,
            weight: Some(0.0),
            label: String::new(),
        }
    }

    /// 替换显示标签
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// 获取边 ID
    pub fn id(&self) -> &EdgeId {
        &self.id
    }

    /// 获取源顶点 ID
    pub fn source(&self) -> &VertexId {
        &self.source
    }

    /// 获取目标顶点 ID
    pub fn target(&self) -> &VertexId {
        &self.target
    }

    /// 是否与顶点相连
    pub fn touches(&self, vertex: &VertexId) -> bool {
        &self.source == vertex || &self.target == vertex
    }

    /// 无向视角下的另一端点
    pub fn other_endpoint(&self, vertex: &VertexId) -> &VertexId {
        if &self.source == vertex {
            &self.target
        } else {
            &self.source
        }
    }

    /// 存储的原始权重
    pub fn weight(&self) -> Option<f64> {
        self.weight
    }

    /// 算法比较用的权重（缺失按 1 计）
    pub fn mst_weight(&self) -> f64 {
        algorithm_weight(self.weight)
    }

    /// 统计用的权重（缺失按 0 计）
    pub fn display_weight(&self) -> f64 {
        display_weight(self.weight)
    }

    /// 按用户输入更新：标签保留原文，权重取解析结果
    pub fn apply_input(&mut self, text: &str) {
        self.label = text.to_string();
        self.weight = Some(parse_input_weight(text));
    }

    /// 获取显示标签
    pub fn label(&self) -> &str {
        &self.label
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn edge(weight: Option<f64>) -> Edge {
        Edge::new(
            EdgeId::from("ab"),
            VertexId::from("a"),
            VertexId::from("b"),
            weight,
        )
    }

    #[test]
    fn test_edge_endpoints() {
        let e = edge(Some(4.0));
        assert!(e.touches(&VertexId::from("a")));
        assert!(!e.touches(&VertexId::from("c")));
        assert_eq!(e.other_endpoint(&VertexId::from("a")).as_str(), "b");
        assert_eq!(e.other_endpoint(&VertexId::from("b")).as_str(), "a");
        assert_eq!(e.label(), "4");
    }

    #[test]
    fn test_edge_weight_views() {
        assert_eq!(edge(Some(4.0)).mst_weight(), 4.0);
        assert_eq!(edge(None).mst_weight(), 1.0);
        assert_eq!(edge(None).display_weight(), 0.0);
    }

    #[test]
    fn test_interactive_edge_defaults() {
        let mut e = Edge::new_interactive(
            EdgeId::from("edge-1"),
            VertexId::from("a"),
            VertexId::from("b"),
        );
        assert_eq!(e.weight(), Some(0.0));
        assert_eq!(e.label(), "");
        // 权重 0 在算法中按 1 比较
        assert_eq!(e.mst_weight(), 1.0);
        assert_eq!(e.display_weight(), 0.0);

        e.apply_input("7.5");
        assert_eq!(e.weight(), Some(7.5));
        assert_eq!(e.label(), "7.5");

        e.apply_input("oops");
        assert_eq!(e.weight(), Some(0.0));
        assert_eq!(e.label(), "oops");
    }
}
