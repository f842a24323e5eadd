//! 数据导入模块
//!
//! 从边表（源、目标、权重）重建整张图，支持 CSV 与 JSON Lines

use crate::error::{Error, Result};
use crate::graph::{Edge, EdgeId, Graph, GraphDocument, Vertex, VertexId};
use crate::types::{parse_input_weight, Position};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::sync::Arc;

/// 导入统计
#[derive(Debug, Default, Clone)]
pub struct ImportStats {
    pub vertices_imported: usize,
    pub edges_imported: usize,
    /// 端点为空而跳过的行
    pub skipped: usize,
    pub errors: usize,
    pub duration_ms: u64,
}

/// 边表中的一行
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EdgeRow {
    pub source: String,
    pub target: String,
    /// 用户输入的权重文本
    pub weight: String,
}

impl EdgeRow {
    pub fn new(source: &str, target: &str, weight: &str) -> Self {
        Self {
            source: source.to_string(),
            target: target.to_string(),
            weight: weight.to_string(),
        }
    }

    fn is_complete(&self) -> bool {
        !self.source.trim().is_empty() && !self.target.trim().is_empty()
    }
}

/// 顶点的环形布局
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CircleLayout {
    pub center: Position,
    pub radius: f64,
}

impl Default for CircleLayout {
    fn default() -> Self {
        Self {
            center: Position::new(400.0, 300.0),
            radius: 200.0,
        }
    }
}

impl CircleLayout {
    /// 第 `index` 个（共 `total` 个）顶点的位置
    pub fn position(&self, index: usize, total: usize) -> Position {
        let angle = 2.0 * PI * index as f64 / total.max(1) as f64;
        Position::new(
            self.center.x + self.radius * angle.cos(),
            self.center.y + self.radius * angle.sin(),
        )
    }
}

/// 边表导入器
///
/// 导入会替换图中的全部内容。顶点 ID 为去掉首尾空白后的小写标签，
/// 标签保留首次出现时的写法。
pub struct EdgeListImporter {
    graph: Arc<Graph>,
    layout: CircleLayout,
}

impl EdgeListImporter {
    /// 创建导入器
    pub fn new(graph: Arc<Graph>) -> Self {
        Self {
            graph,
            layout: CircleLayout::default(),
        }
    }

    /// 由边表构建文档，不修改图
    pub fn build_document(&self, rows: &[EdgeRow]) -> GraphDocument {
        let mut labels: IndexMap<VertexId, String> = IndexMap::new();
        // 半填的行仍然贡献顶点，只有边需要两个端点
        for row in rows {
            for end in [&row.source, &row.target] {
                let label = end.trim();
                if label.is_empty() {
                    continue;
                }
                labels
                    .entry(VertexId::new(label.to_lowercase()))
                    .or_insert_with(|| label.to_string());
            }
        }

        let total = labels.len();
        let vertices = labels
            .into_iter()
            .enumerate()
            .map(|(i, (id, label))| Vertex::new(id, label, self.layout.position(i, total)))
            .collect();

        // 边 ID 取行号，跳过的行也占号
        let edges = rows
            .iter()
            .enumerate()
            .filter(|(_, row)| row.is_complete())
            .map(|(i, row)| {
                let label = if row.weight.is_empty() {
                    "0".to_string()
                } else {
                    row.weight.clone()
                };
                Edge::new(
                    EdgeId::new(format!("edge-{}", i)),
                    VertexId::new(row.source.trim().to_lowercase()),
                    VertexId::new(row.target.trim().to_lowercase()),
                    Some(parse_input_weight(&row.weight)),
                )
                .with_label(label)
            })
            .collect();

        GraphDocument { vertices, edges }
    }

    /// 用边表替换整张图
    pub fn import_rows(&self, rows: &[EdgeRow]) -> Result<ImportStats> {
        let start = std::time::Instant::now();
        let doc = self.build_document(rows);

        let mut stats = ImportStats {
            vertices_imported: doc.vertices.len(),
            edges_imported: doc.edges.len(),
            skipped: rows.len() - doc.edges.len(),
            ..Default::default()
        };
        self.graph.replace_with(doc)?;

        stats.duration_ms = start.elapsed().as_millis() as u64;
        tracing::info!(
            vertices = stats.vertices_imported,
            edges = stats.edges_imported,
            skipped = stats.skipped,
            "边表导入完成"
        );
        Ok(stats)
    }

    /// 从 CSV 导入（表头 `source,target,weight`）
    pub fn import_csv<P: AsRef<Path>>(&self, path: P) -> Result<ImportStats> {
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_path(path)?;

        let mut rows = Vec::new();
        let mut errors = 0;
        for record in reader.deserialize::<EdgeRow>() {
            match record {
                Ok(row) => rows.push(row),
                Err(e) => {
                    tracing::warn!(error = %e, "跳过无法解析的 CSV 行");
                    errors += 1;
                }
            }
        }

        let mut stats = self.import_rows(&rows)?;
        stats.errors = errors;
        Ok(stats)
    }

    /// 从 JSON Lines 导入，每行一个 `{"source", "target", "weight"}`
    pub fn import_jsonl<P: AsRef<Path>>(&self, path: P) -> Result<ImportStats> {
        let file = File::open(path)?;
        let reader = BufReader::new(file);

        let mut rows = Vec::new();
        let mut errors = 0;
        for line in reader.lines() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            match Self::parse_json_row(&line) {
                Ok(row) => rows.push(row),
                Err(e) => {
                    tracing::warn!(error = %e, "跳过无法解析的 JSON 行");
                    errors += 1;
                }
            }
        }

        let mut stats = self.import_rows(&rows)?;
        stats.errors = errors;
        Ok(stats)
    }

    /// 解析 JSON 行，数值权重按其文本处理
    fn parse_json_row(line: &str) -> Result<EdgeRow> {
        let value: serde_json::Value = serde_json::from_str(line)
            .map_err(|e| Error::ImportError(format!("JSON 解析错误: {}", e)))?;

        let text = |key: &str| -> String {
            match value.get(key) {
                Some(serde_json::Value::String(s)) => s.clone(),
                Some(serde_json::Value::Number(n)) => n.to_string(),
                _ => String::new(),
            }
        };

        Ok(EdgeRow {
            source: text("source"),
            target: text("target"),
            weight: text("weight"),
        })
    }
}
