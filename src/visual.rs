//! 可视状态
//!
//! 算法通过 [`VisualState`] 给顶点和边打上高亮、候选、分量颜色等标记。
//! [`VisualBoard`] 是内存实现，前端读取它来渲染。

use crate::types::{ColorToken, ElementId};
use indexmap::IndexSet;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// 可视状态修改接口
pub trait VisualState: Send + Sync {
    /// 标记为高亮（已选入结果）
    fn mark_highlighted(&self, id: &ElementId);

    /// 标记为候选（正在比较）
    fn mark_candidate(&self, id: &ElementId);

    /// 取消候选标记
    fn clear_candidate(&self, id: &ElementId);

    /// 清除所有元素上的算法标记
    fn clear_all_markers(&self);

    /// 设置分量颜色
    fn set_color(&self, id: &ElementId, color: &ColorToken);

    /// 恢复默认样式
    fn restore_default_style(&self, id: &ElementId);

    /// 取消当前选择
    fn clear_selection(&self);
}

/// 单个元素的样式
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElementStyle {
    pub highlighted: bool,
    pub candidate: bool,
    pub color: Option<ColorToken>,
}

impl ElementStyle {
    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }
}

/// 可视状态快照
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BoardSnapshot {
    pub styles: HashMap<ElementId, ElementStyle>,
    pub selected: Vec<ElementId>,
}

/// 内存中的可视状态
///
/// 只记录非默认样式；未出现在表中的元素即为默认样式。
#[derive(Debug, Default)]
pub struct VisualBoard {
    styles: RwLock<HashMap<ElementId, ElementStyle>>,
    selected: RwLock<IndexSet<ElementId>>,
}

impl VisualBoard {
    pub fn new() -> Self {
        Self::default()
    }

    /// 获取元素样式
    pub fn style(&self, id: &ElementId) -> ElementStyle {
        self.styles.read().get(id).cloned().unwrap_or_default()
    }

    pub fn is_highlighted(&self, id: &ElementId) -> bool {
        self.style(id).highlighted
    }

    pub fn is_candidate(&self, id: &ElementId) -> bool {
        self.style(id).candidate
    }

    pub fn color(&self, id: &ElementId) -> Option<ColorToken> {
        self.style(id).color
    }

    /// 当前处于候选状态的元素数量
    pub fn candidate_count(&self) -> usize {
        self.styles.read().values().filter(|s| s.candidate).count()
    }

    /// 选中元素（用户交互）
    pub fn select(&self, id: ElementId) {
        self.selected.write().insert(id);
    }

    /// 当前选择
    pub fn selected(&self) -> Vec<ElementId> {
        self.selected.read().iter().cloned().collect()
    }

    /// 导出快照
    pub fn snapshot(&self) -> BoardSnapshot {
        BoardSnapshot {
            styles: self.styles.read().clone(),
            selected: self.selected(),
        }
    }

    fn update<F: FnOnce(&mut ElementStyle)>(&self, id: &ElementId, f: F) {
        let mut styles = self.styles.write();
        let style = styles.entry(id.clone()).or_default();
        f(style);
        if style.is_default() {
            styles.remove(id);
        }
    }
}

impl VisualState for VisualBoard {
    fn mark_highlighted(&self, id: &ElementId) {
        self.update(id, |s| s.highlighted = true);
    }

    fn mark_candidate(&self, id: &ElementId) {
        self.update(id, |s| s.candidate = true);
    }

    fn clear_candidate(&self, id: &ElementId) {
        self.update(id, |s| s.candidate = false);
    }

    fn clear_all_markers(&self) {
        let mut styles = self.styles.write();
        for style in styles.values_mut() {
            style.highlighted = false;
            style.candidate = false;
            style.color = None;
        }
        styles.retain(|_, s| !s.is_default());
    }

    fn set_color(&self, id: &ElementId, color: &ColorToken) {
        self.update(id, |s| s.color = Some(color.clone()));
    }

    fn restore_default_style(&self, id: &ElementId) {
        self.styles.write().remove(id);
    }

    fn clear_selection(&self) {
        self.selected.write().clear();
    }
}
