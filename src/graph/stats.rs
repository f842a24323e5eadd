//! 图统计

use super::graph::GraphAccessor;
use crate::algorithm::UnionFind;
use serde::{Deserialize, Serialize};

/// 图统计信息
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphStats {
    pub vertex_count: usize,
    pub edge_count: usize,
    /// 权重总和（缺失按 0 计）
    pub total_weight: f64,
    pub component_count: usize,
}

impl GraphStats {
    /// 统计当前图
    pub fn collect(graph: &dyn GraphAccessor) -> Self {
        let vertices = graph.vertices();
        let edges = graph.edges();

        let mut uf = UnionFind::from_elements(vertices.iter().cloned());
        for edge in &edges {
            // 端点都来自同一张图，不会未注册
            let _ = uf.union(edge.source(), edge.target());
        }

        Self {
            vertex_count: vertices.len(),
            edge_count: edges.len(),
            total_weight: edges.iter().map(|e| e.display_weight()).sum(),
            component_count: uf.set_count(),
        }
    }

    pub fn is_connected(&self) -> bool {
        self.component_count <= 1
    }
}
