//! 图数据结构
//!
//! 内存中的图存储，顶点和边均保持插入顺序

use super::document::GraphDocument;
use super::edge::{Edge, EdgeId};
use super::vertex::{Vertex, VertexId};
use crate::error::{Error, Result};
use crate::types::Position;
use indexmap::IndexMap;
use parking_lot::RwLock;
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// 算法读取图的只读接口
///
/// 所有序列都按图的自然顺序（插入顺序）返回，算法的平局规则依赖这一点。
pub trait GraphAccessor: Send + Sync {
    /// 所有顶点 ID
    fn vertices(&self) -> Vec<VertexId>;

    /// 所有边
    fn edges(&self) -> Vec<Edge>;

    /// 与顶点相连的边（无向，忽略存储方向）
    fn incident_edges(&self, vertex: &VertexId) -> Vec<Edge>;

    /// 顶点数量
    fn vertex_count(&self) -> usize;

    /// 顶点是否存在
    fn contains_vertex(&self, vertex: &VertexId) -> bool;

    /// 修订号，每次编辑递增
    fn revision(&self) -> u64;
}

/// 图存储
pub struct Graph {
    /// 顶点表
    vertices: RwLock<IndexMap<VertexId, Vertex>>,
    /// 边表
    edges: RwLock<IndexMap<EdgeId, Edge>>,
    /// 下一个自动顶点编号
    next_vertex_id: AtomicU64,
    /// 下一个自动边编号
    next_edge_id: AtomicU64,
    /// 修订号
    revision: AtomicU64,
}

impl Graph {
    /// 创建空图
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            vertices: RwLock::new(IndexMap::new()),
            edges: RwLock::new(IndexMap::new()),
            next_vertex_id: AtomicU64::new(1),
            next_edge_id: AtomicU64::new(1),
            revision: AtomicU64::new(0),
        })
    }

    /// 示例图：6 个顶点、12 条带权边（含 ab/ba 平行边）
    pub fn sample() -> Arc<Self> {
        let graph = Self::new();
        let vertices = [
            ("a", "A", 200.0, 100.0),
            ("b", "B", 300.0, 100.0),
            ("c", "C", 400.0, 200.0),
            ("d", "D", 300.0, 300.0),
            ("e", "E", 200.0, 300.0),
            ("f", "F", 100.0, 200.0),
        ];
        for (id, label, x, y) in vertices {
            graph
                .add_vertex(VertexId::from(id), label, Position::new(x, y))
                .expect("示例图顶点 ID 重复");
        }

        let edges = [
            ("ab", "a", "b", 1.0),
            ("ba", "b", "a", 4.0),
            ("fa", "f", "a", 16.0),
            ("ae", "a", "e", 10.0),
            ("fe", "f", "e", 19.0),
            ("fc", "f", "c", 15.0),
            ("eb", "e", "b", 8.0),
            ("ec", "e", "c", 2.0),
            ("cd", "c", "d", 5.0),
            ("de", "d", "e", 3.0),
            ("cb", "c", "b", 6.0),
            ("ca", "c", "a", 11.0),
        ];
        for (id, src, dst, weight) in edges {
            graph
                .add_edge(
                    EdgeId::from(id),
                    VertexId::from(src),
                    VertexId::from(dst),
                    Some(weight),
                )
                .expect("示例图的边引用了不存在的顶点");
        }

        graph
    }

    /// 从文档构建新图
    pub fn from_document(doc: GraphDocument) -> Result<Arc<Self>> {
        let graph = Self::new();
        graph.replace_with(doc)?;
        Ok(graph)
    }

    /// 从 JSON 文件加载
    pub fn load_json<P: AsRef<Path>>(path: P) -> Result<Arc<Self>> {
        Self::from_document(GraphDocument::read_from(path)?)
    }

    fn bump(&self) {
        self.revision.fetch_add(1, Ordering::SeqCst);
    }

    // ==================== 顶点操作 ====================

    /// 添加顶点
    pub fn add_vertex(&self, id: VertexId, label: &str, position: Position) -> Result<VertexId> {
        let mut vertices = self.vertices.write();
        if vertices.contains_key(&id) {
            return Err(Error::VertexAlreadyExists(id.to_string()));
        }
        vertices.insert(id.clone(), Vertex::new(id.clone(), label, position));
        drop(vertices);

        self.bump();
        Ok(id)
    }

    /// 以自动生成的 ID 创建顶点
    pub fn create_vertex(&self, label: &str, position: Position) -> Result<VertexId> {
        let id = loop {
            let n = self.next_vertex_id.fetch_add(1, Ordering::SeqCst);
            let candidate = VertexId::new(format!("node-{}", n));
            if !self.vertices.read().contains_key(&candidate) {
                break candidate;
            }
        };
        self.add_vertex(id, label, position)
    }

    /// 获取顶点
    pub fn vertex(&self, id: &VertexId) -> Option<Vertex> {
        self.vertices.read().get(id).cloned()
    }

    /// 获取全部顶点（按插入顺序）
    pub fn all_vertices(&self) -> Vec<Vertex> {
        self.vertices.read().values().cloned().collect()
    }

    /// 修改顶点标签
    pub fn set_vertex_label(&self, id: &VertexId, label: &str) -> Result<()> {
        let mut vertices = self.vertices.write();
        let vertex = vertices
            .get_mut(id)
            .ok_or_else(|| Error::VertexNotFound(id.to_string()))?;
        vertex.set_label(label);
        drop(vertices);

        self.bump();
        Ok(())
    }

    /// 删除顶点及其关联边
    pub fn remove_vertex(&self, id: &VertexId) -> Result<Vertex> {
        let removed = self
            .vertices
            .write()
            .shift_remove(id)
            .ok_or_else(|| Error::VertexNotFound(id.to_string()))?;
        self.edges.write().retain(|_, e| !e.touches(id));

        self.bump();
        Ok(removed)
    }

    // ==================== 边操作 ====================

    /// 添加边
    pub fn add_edge(
        &self,
        id: EdgeId,
        source: VertexId,
        target: VertexId,
        weight: Option<f64>,
    ) -> Result<EdgeId> {
        self.insert_edge(Edge::new(id, source, target, weight))
    }

    /// 交互式连线：自动 ID，权重 0，标签为空
    pub fn connect(&self, source: &VertexId, target: &VertexId) -> Result<EdgeId> {
        let id = loop {
            let n = self.next_edge_id.fetch_add(1, Ordering::SeqCst);
            let candidate = EdgeId::new(format!("edge-{}", n));
            if !self.edges.read().contains_key(&candidate) {
                break candidate;
            }
        };
        self.insert_edge(Edge::new_interactive(id, source.clone(), target.clone()))
    }

    fn insert_edge(&self, edge: Edge) -> Result<EdgeId> {
        {
            let vertices = self.vertices.read();
            if !vertices.contains_key(edge.source()) {
                return Err(Error::VertexNotFound(edge.source().to_string()));
            }
            if !vertices.contains_key(edge.target()) {
                return Err(Error::VertexNotFound(edge.target().to_string()));
            }
        }

        let id = edge.id().clone();
        let mut edges = self.edges.write();
        if edges.contains_key(&id) {
            return Err(Error::EdgeAlreadyExists(id.to_string()));
        }
        edges.insert(id.clone(), edge);
        drop(edges);

        self.bump();
        Ok(id)
    }

    /// 获取边
    pub fn edge(&self, id: &EdgeId) -> Option<Edge> {
        self.edges.read().get(id).cloned()
    }

    /// 按用户输入文本修改边权重
    pub fn set_edge_weight_input(&self, id: &EdgeId, text: &str) -> Result<()> {
        let mut edges = self.edges.write();
        let edge = edges
            .get_mut(id)
            .ok_or_else(|| Error::EdgeNotFound(id.to_string()))?;
        edge.apply_input(text);
        drop(edges);

        self.bump();
        Ok(())
    }

    /// 删除边
    pub fn remove_edge(&self, id: &EdgeId) -> Result<Edge> {
        let removed = self
            .edges
            .write()
            .shift_remove(id)
            .ok_or_else(|| Error::EdgeNotFound(id.to_string()))?;

        self.bump();
        Ok(removed)
    }

    /// 获取边数量
    pub fn edge_count(&self) -> usize {
        self.edges.read().len()
    }

    // ==================== 整体操作 ====================

    /// 清空图
    pub fn clear(&self) {
        self.edges.write().clear();
        self.vertices.write().clear();
        self.bump();
    }

    /// 用文档内容替换当前图
    pub fn replace_with(&self, doc: GraphDocument) -> Result<()> {
        let mut vertices = IndexMap::new();
        for v in doc.vertices {
            if vertices.contains_key(v.id()) {
                return Err(Error::VertexAlreadyExists(v.id().to_string()));
            }
            vertices.insert(v.id().clone(), v);
        }

        let mut edges = IndexMap::new();
        for e in doc.edges {
            if !vertices.contains_key(e.source()) {
                return Err(Error::VertexNotFound(e.source().to_string()));
            }
            if !vertices.contains_key(e.target()) {
                return Err(Error::VertexNotFound(e.target().to_string()));
            }
            if edges.contains_key(e.id()) {
                return Err(Error::EdgeAlreadyExists(e.id().to_string()));
            }
            edges.insert(e.id().clone(), e);
        }

        *self.vertices.write() = vertices;
        *self.edges.write() = edges;
        self.bump();
        Ok(())
    }

    /// 导出为文档
    pub fn to_document(&self) -> GraphDocument {
        GraphDocument {
            vertices: self.all_vertices(),
            edges: self.edges(),
        }
    }

    /// 保存为 JSON 文件
    pub fn save_json<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        self.to_document().write_to(path)
    }
}

impl GraphAccessor for Graph {
    fn vertices(&self) -> Vec<VertexId> {
        self.vertices.read().keys().cloned().collect()
    }

    fn edges(&self) -> Vec<Edge> {
        self.edges.read().values().cloned().collect()
    }

    fn incident_edges(&self, vertex: &VertexId) -> Vec<Edge> {
        self.edges
            .read()
            .values()
            .filter(|e| e.touches(vertex))
            .cloned()
            .collect()
    }

    fn vertex_count(&self) -> usize {
        self.vertices.read().len()
    }

    fn contains_vertex(&self, vertex: &VertexId) -> bool {
        self.vertices.read().contains_key(vertex)
    }

    fn revision(&self) -> u64 {
        self.revision.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(list: &[VertexId]) -> Vec<&str> {
        list.iter().map(|v| v.as_str()).collect()
    }

    #[test]
    fn test_sample_graph() {
        let graph = Graph::sample();
        assert_eq!(graph.vertex_count(), 6);
        assert_eq!(graph.edge_count(), 12);

        // ab 与 ba 是同一对顶点间的平行边
        let ab = graph.edge(&EdgeId::from("ab")).unwrap();
        let ba = graph.edge(&EdgeId::from("ba")).unwrap();
        assert_eq!(ab.source(), ba.target());
        assert_eq!(ab.target(), ba.source());
        assert_eq!(graph.incident_edges(&VertexId::from("a")).len(), 5);
    }

    #[test]
    fn test_graph_basic() {
        let graph = Graph::new();
        let a = graph
            .add_vertex(VertexId::from("a"), "A", Position::default())
            .unwrap();
        let b = graph
            .add_vertex(VertexId::from("b"), "B", Position::default())
            .unwrap();

        graph
            .add_edge(EdgeId::from("ab"), a.clone(), b.clone(), Some(3.0))
            .unwrap();

        assert_eq!(graph.vertex_count(), 2);
        assert_eq!(graph.edge_count(), 1);
        assert_eq!(ids(&graph.vertices()), vec!["a", "b"]);
        assert_eq!(graph.incident_edges(&b).len(), 1);
        assert_eq!(graph.edge(&EdgeId::from("ab")).unwrap().mst_weight(), 3.0);
    }

    #[test]
    fn test_add_edge_unknown_vertex() {
        let graph = Graph::new();
        graph
            .add_vertex(VertexId::from("a"), "A", Position::default())
            .unwrap();
        let err = graph
            .add_edge(
                EdgeId::from("ax"),
                VertexId::from("a"),
                VertexId::from("x"),
                None,
            )
            .unwrap_err();
        assert!(matches!(err, Error::VertexNotFound(_)));
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let graph = Graph::sample();
        assert!(matches!(
            graph.add_vertex(VertexId::from("a"), "A", Position::default()),
            Err(Error::VertexAlreadyExists(_))
        ));
        assert!(matches!(
            graph.add_edge(
                EdgeId::from("ab"),
                VertexId::from("a"),
                VertexId::from("b"),
                None
            ),
            Err(Error::EdgeAlreadyExists(_))
        ));
    }

    #[test]
    fn test_incident_edges_keep_natural_order() {
        let graph = Graph::sample();
        let incident: Vec<String> = graph
            .incident_edges(&VertexId::from("a"))
            .iter()
            .map(|e| e.id().to_string())
            .collect();
        assert_eq!(incident, vec!["ab", "ba", "fa", "ae", "ca"]);
    }

    #[test]
    fn test_remove_vertex_drops_incident_edges() {
        let graph = Graph::sample();
        let before = graph.revision();

        graph.remove_vertex(&VertexId::from("a")).unwrap();

        assert_eq!(graph.vertex_count(), 5);
        assert_eq!(graph.edge_count(), 7);
        assert!(graph.revision() > before);
        assert!(graph
            .edges()
            .iter()
            .all(|e| !e.touches(&VertexId::from("a"))));
    }

    #[test]
    fn test_connect_creates_zero_weight_edge() {
        let graph = Graph::sample();
        let id = graph
            .connect(&VertexId::from("a"), &VertexId::from("d"))
            .unwrap();
        let edge = graph.edge(&id).unwrap();
        assert!(id.as_str().starts_with("edge-"));
        assert_eq!(edge.weight(), Some(0.0));
        assert_eq!(edge.label(), "");

        graph.set_edge_weight_input(&id, "9").unwrap();
        assert_eq!(graph.edge(&id).unwrap().weight(), Some(9.0));
    }

    #[test]
    fn test_create_vertex_generates_unique_ids() {
        let graph = Graph::new();
        graph
            .add_vertex(VertexId::from("node-1"), "taken", Position::default())
            .unwrap();
        let id = graph.create_vertex("X", Position::new(5.0, 5.0)).unwrap();
        assert_eq!(id.as_str(), "node-2");
        assert_eq!(graph.vertex(&id).unwrap().label(), "X");
    }

    #[test]
    fn test_every_edit_bumps_revision() {
        let graph = Graph::new();
        let r0 = graph.revision();
        let a = graph.create_vertex("A", Position::default()).unwrap();
        let b = graph.create_vertex("B", Position::default()).unwrap();
        let e = graph.connect(&a, &b).unwrap();
        graph.set_vertex_label(&a, "AA").unwrap();
        graph.remove_edge(&e).unwrap();
        graph.clear();
        assert_eq!(graph.revision(), r0 + 6);
    }

    #[test]
    fn test_json_roundtrip_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("graph.json");

        let graph = Graph::sample();
        graph.save_json(&path).unwrap();
        let loaded = Graph::load_json(&path).unwrap();

        assert_eq!(loaded.vertices(), graph.vertices());
        assert_eq!(loaded.edges(), graph.edges());
    }
}
