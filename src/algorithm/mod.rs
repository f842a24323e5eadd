//! 图算法模块
//!
//! Prim、Kruskal 最小生成树与连通分量遍历。算法以异步过程的形式逐步执行，
//! 通过日志与可视状态讲述每一步。

mod components;
mod kruskal;
mod prim;
mod reset;
mod union_find;

pub use components::{component_color, Component, ComponentExplorer, ComponentReport};
pub use kruskal::Kruskal;
pub use prim::Prim;
pub use reset::reset;
pub use union_find::UnionFind;

use crate::engine::{Pacer, RunTicket};
use crate::error::{Error, Result};
use crate::graph::{EdgeId, GraphAccessor, VertexId};
use crate::log::LogSink;
use crate::types::ColorToken;
use crate::visual::VisualState;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

/// 算法种类
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AlgorithmKind {
    Prim,
    Kruskal,
    Components,
}

impl fmt::Display for AlgorithmKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AlgorithmKind::Prim => f.write_str("prim"),
            AlgorithmKind::Kruskal => f.write_str("kruskal"),
            AlgorithmKind::Components => f.write_str("components"),
        }
    }
}

/// 运行结果
#[derive(Debug, Clone, PartialEq)]
pub enum RunOutcome<T> {
    /// 正常结束（包括图不连通的情况）
    Completed(T),
    /// 被重置或图编辑取代，提前静默结束
    Aborted,
}

impl<T> RunOutcome<T> {
    pub fn completed(self) -> Option<T> {
        match self {
            RunOutcome::Completed(t) => Some(t),
            RunOutcome::Aborted => None,
        }
    }

    pub fn is_aborted(&self) -> bool {
        matches!(self, RunOutcome::Aborted)
    }
}

/// 把内部的失效信号转换为 `Aborted`
pub(crate) fn settle<T>(result: Result<T>) -> Result<RunOutcome<T>> {
    match result {
        Ok(value) => Ok(RunOutcome::Completed(value)),
        Err(Error::Superseded) => Ok(RunOutcome::Aborted),
        Err(e) => Err(e),
    }
}

/// 最小生成树结果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MstReport {
    /// 使用的算法
    pub algorithm: AlgorithmKind,
    /// 选中的边，按选中顺序
    pub edges: Vec<EdgeId>,
    /// 总权重（缺失权重按 1 计）
    pub total_weight: f64,
    /// 被加入生成树的顶点，按加入顺序
    pub vertices: Vec<VertexId>,
    /// 实际比较或尝试合并过的边数
    pub evaluated: usize,
    /// 是否覆盖了全部顶点
    pub spanning: bool,
}

/// 一次运行所需的全部协作者
///
/// 日志与可视状态以参数形式注入，算法不访问任何全局状态。
pub struct RunContext {
    graph: Arc<dyn GraphAccessor>,
    visuals: Arc<dyn VisualState>,
    log: Arc<dyn LogSink>,
    pacer: Pacer,
    palette: Vec<ColorToken>,
    ticket: RunTicket,
    revision: u64,
}

impl RunContext {
    pub fn new(
        graph: Arc<dyn GraphAccessor>,
        visuals: Arc<dyn VisualState>,
        log: Arc<dyn LogSink>,
        pacer: Pacer,
        ticket: RunTicket,
    ) -> Self {
        let revision = graph.revision();
        Self {
            graph,
            visuals,
            log,
            pacer,
            palette: Vec::new(),
            ticket,
            revision,
        }
    }

    /// 设置分量配色
    pub fn with_palette(mut self, palette: Vec<ColorToken>) -> Self {
        self.palette = palette;
        self
    }

    pub fn ticket(&self) -> &RunTicket {
        &self.ticket
    }

    pub(crate) fn graph(&self) -> &dyn GraphAccessor {
        self.graph.as_ref()
    }

    pub(crate) fn visuals(&self) -> &dyn VisualState {
        self.visuals.as_ref()
    }

    pub(crate) fn pacer(&self) -> &Pacer {
        &self.pacer
    }

    pub(crate) fn palette(&self) -> &[ColorToken] {
        &self.palette
    }

    /// 追加一条日志
    pub(crate) fn say(&self, message: impl Into<String>) {
        self.log.append(message.into());
    }

    /// 挂起点：等待后检查本次运行是否仍然有效
    pub(crate) async fn pause(&self, delay: Duration) -> Result<()> {
        self.pacer.wait(delay).await;
        self.ensure_current()
    }

    fn ensure_current(&self) -> Result<()> {
        if !self.ticket.is_current() {
            tracing::warn!(
                algorithm = %self.ticket.kind(),
                generation = self.ticket.generation(),
                "运行已被重置，提前结束"
            );
            return Err(Error::Superseded);
        }
        if self.graph.revision() != self.revision {
            tracing::warn!(
                algorithm = %self.ticket.kind(),
                generation = self.ticket.generation(),
                "图在运行期间被修改，提前结束"
            );
            return Err(Error::Superseded);
        }
        Ok(())
    }
}
