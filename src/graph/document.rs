//! 图文档
//!
//! 图存储的 JSON 快照，用于保存与加载

use super::edge::Edge;
use super::vertex::Vertex;
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// 图的可序列化快照
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphDocument {
    #[serde(default)]
    pub vertices: Vec<Vertex>,
    #[serde(default)]
    pub edges: Vec<Edge>,
}

impl GraphDocument {
    /// 从 JSON 字符串解析
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// 序列化为带缩进的 JSON
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// 从文件读取
    pub fn read_from<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// 写入文件
    pub fn write_to<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        fs::write(path, self.to_json()?)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn test_parse_document_with_missing_weight() {
        let json = r#"{
            "vertices": [
                {"id": "a", "label": "A", "position": {"x": 0.0, "y": 0.0}},
                {"id": "b", "label": "B"}
            ],
            "edges": [
                {"id": "ab", "source": "a", "target": "b"}
            ]
        }"#;

        let doc = GraphDocument::from_json(json).unwrap();
        assert_eq!(doc.vertices.len(), 2);
        assert_eq!(doc.edges[0].weight(), None);
        assert_eq!(doc.edges[0].mst_weight(), 1.0);
        assert_eq!(doc.edges[0].label(), "");
    }

    #[test]
    fn test_parse_invalid_document() {
        let err = GraphDocument::from_json("{not json").unwrap_err();
        assert!(matches!(err, Error::SerializationError(_)));
    }
}
