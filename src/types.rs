//! 通用类型定义
//!
//! 坐标、颜色标记、可视元素 ID 以及边权重的解析规则

use crate::graph::{EdgeId, VertexId};
use serde::{Deserialize, Serialize};
use std::fmt;

/// 顶点在画布上的位置
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// 颜色标记（CSS 颜色字符串）
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ColorToken(pub String);

impl ColorToken {
    pub fn new(color: impl Into<String>) -> Self {
        Self(color.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ColorToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// 可视元素 ID（顶点或边）
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ElementId {
    Vertex(VertexId),
    Edge(EdgeId),
}

impl From<VertexId> for ElementId {
    fn from(id: VertexId) -> Self {
        ElementId::Vertex(id)
    }
}

impl From<EdgeId> for ElementId {
    fn from(id: EdgeId) -> Self {
        ElementId::Edge(id)
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ElementId::Vertex(id) => write!(f, "#{}", id),
            ElementId::Edge(id) => write!(f, "#{}", id),
        }
    }
}

/// 算法比较用的权重：缺失、非数值或为 0 时按 1 计
pub fn algorithm_weight(weight: Option<f64>) -> f64 {
    match weight {
        Some(w) if w != 0.0 && !w.is_nan() => w,
        _ => 1.0,
    }
}

/// 统计面板用的权重：缺失或非数值按 0 计
pub fn display_weight(weight: Option<f64>) -> f64 {
    weight.filter(|w| !w.is_nan()).unwrap_or(0.0)
}

/// 解析用户输入的权重文本
///
/// 取开头最长的十进制数字前缀，无法解析时为 0。
/// 与算法权重的默认值（1）不同，交互创建的边默认权重为 0。
pub fn parse_input_weight(text: &str) -> f64 {
    let s = text.trim_start();
    let end = numeric_prefix_len(s);
    s[..end]
        .parse::<f64>()
        .ok()
        .filter(|w| !w.is_nan())
        .unwrap_or(0.0)
}

fn numeric_prefix_len(s: &str) -> usize {
    let b = s.as_bytes();
    let mut i = 0;
    if i < b.len() && (b[i] == b'+' || b[i] == b'-') {
        i += 1;
    }
    if s[i..].starts_with("Infinity") {
        return i + "Infinity".len();
    }

    let int_start = i;
    while i < b.len() && b[i].is_ascii_digit() {
        i += 1;
    }
    let mut mantissa = i - int_start;

    if i < b.len() && b[i] == b'.' {
        let mut j = i + 1;
        while j < b.len() && b[j].is_ascii_digit() {
            j += 1;
        }
        mantissa += j - i - 1;
        if mantissa > 0 {
            i = j;
        }
    }
    if mantissa == 0 {
        return 0;
    }

    // 指数部分必须带数字才算数
    if i < b.len() && (b[i] == b'e' || b[i] == b'E') {
        let mut j = i + 1;
        if j < b.len() && (b[j] == b'+' || b[j] == b'-') {
            j += 1;
        }
        let exp_start = j;
        while j < b.len() && b[j].is_ascii_digit() {
            j += 1;
        }
        if j > exp_start {
            i = j;
        }
    }

    i
}
