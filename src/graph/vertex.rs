//! 顶点定义

use crate::types::Position;
use serde::{Deserialize, Serialize};
use std::fmt;

/// 顶点 ID（图内唯一）
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VertexId(pub String);

impl VertexId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for VertexId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for VertexId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl fmt::Display for VertexId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// 顶点
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vertex {
    /// 顶点 ID
    id: VertexId,
    /// 显示标签
    label: String,
    /// 画布位置
    #[serde(default)]
    position: Position,
}

impl Vertex {
    /// 创建新顶点
    pub fn new(id: VertexId, label: impl Into<String>, position: Position) -> Self {
        Self {
            id,
            label: label.into(),
            position,
        }
    }

    /// 获取顶点 ID
    pub fn id(&self) -> &VertexId {
        &self.id
    }

    /// 获取显示标签
    pub fn label(&self) -> &str {
        &self.label
    }

    /// 设置显示标签
    pub fn set_label(&mut self, label: impl Into<String>) {
        self.label = label.into();
    }

    /// 获取位置
    pub fn position(&self) -> Position {
        self.position
    }

    /// 移动到新位置
    pub fn set_position(&mut self, position: Position) {
        self.position = position;
    }
}
