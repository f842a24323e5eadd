//! 算法执行引擎
//!
//! 前端的唯一入口：负责运行互斥、代际失效、节拍配置与指标记录，
//! 具体的算法步骤交给 [`crate::algorithm`]。

mod generation;
mod pacer;

pub use generation::{RunGuard, RunTicket};
pub use pacer::Pacer;

use crate::algorithm::{
    self, AlgorithmKind, ComponentExplorer, ComponentReport, Kruskal, MstReport, Prim,
    RunContext, RunOutcome,
};
use crate::config::EngineConfig;
use crate::error::Result;
use crate::graph::{GraphAccessor, VertexId};
use crate::log::LogSink;
use crate::metrics::{global_metrics, Metrics, RunResult};
use crate::visual::VisualState;
use parking_lot::RwLock;
use std::future::Future;
use std::sync::Arc;

/// 执行引擎
///
/// 克隆开销很小，克隆体共享同一个运行槽位。
#[derive(Clone)]
pub struct Engine {
    graph: Arc<dyn GraphAccessor>,
    visuals: Arc<dyn VisualState>,
    log: Arc<dyn LogSink>,
    config: Arc<RwLock<EngineConfig>>,
    runs: RunGuard,
    metrics: Arc<Metrics>,
}

impl Engine {
    pub fn new(
        graph: Arc<dyn GraphAccessor>,
        visuals: Arc<dyn VisualState>,
        log: Arc<dyn LogSink>,
        config: EngineConfig,
    ) -> Self {
        Self {
            graph,
            visuals,
            log,
            config: Arc::new(RwLock::new(config)),
            runs: RunGuard::new(),
            metrics: global_metrics(),
        }
    }

    /// 使用独立的指标收集器
    pub fn with_metrics(mut self, metrics: Arc<Metrics>) -> Self {
        self.metrics = metrics;
        self
    }

    /// 当前配置
    pub fn config(&self) -> EngineConfig {
        self.config.read().clone()
    }

    /// 调整步长，从下一次运行开始生效
    pub fn set_step_delay(&self, ms: u64) {
        self.config.write().step_delay_ms = ms;
        tracing::info!(step_delay_ms = ms, "步长已调整");
    }

    /// 调整分量遍历的访问间隔
    pub fn set_visit_delay(&self, ms: u64) {
        self.config.write().visit_delay_ms = ms;
        tracing::info!(visit_delay_ms = ms, "访问间隔已调整");
    }

    pub fn metrics(&self) -> &Arc<Metrics> {
        &self.metrics
    }

    /// 是否有运行正在进行
    pub fn is_running(&self) -> bool {
        self.runs.active().is_some()
    }

    /// 正在运行的算法
    pub fn active(&self) -> Option<AlgorithmKind> {
        self.runs.active()
    }

    /// 当前代际
    pub fn generation(&self) -> u64 {
        self.runs.generation()
    }

    /// 从 `source` 开始执行 Prim
    pub async fn prim(&self, source: &VertexId) -> Result<RunOutcome<MstReport>> {
        let outcome = self
            .launch(AlgorithmKind::Prim, |ctx| Prim::new(ctx).run(source))
            .await?;
        self.record_mst(&outcome);
        Ok(outcome)
    }

    /// 执行 Kruskal
    pub async fn kruskal(&self) -> Result<RunOutcome<MstReport>> {
        let outcome = self
            .launch(AlgorithmKind::Kruskal, |ctx| Kruskal::new(ctx).run())
            .await?;
        self.record_mst(&outcome);
        Ok(outcome)
    }

    /// 按连通分量染色
    pub async fn highlight_components(&self) -> Result<RunOutcome<ComponentReport>> {
        let outcome = self
            .launch(AlgorithmKind::Components, |ctx| {
                ComponentExplorer::new(ctx).run()
            })
            .await?;
        if let RunOutcome::Completed(report) = &outcome {
            self.metrics.record_components(report.count());
        }
        Ok(outcome)
    }

    /// 清除可视状态并让正在进行的运行失效
    ///
    /// 日志不受影响。
    pub fn reset(&self) {
        let active = self.runs.active();
        let generation = self.runs.invalidate();
        algorithm::reset(self.graph.as_ref(), self.visuals.as_ref());
        tracing::info!(generation, interrupted = ?active, "可视状态已重置");
    }

    /// 清空执行日志
    pub fn clear_log(&self) {
        self.log.clear();
    }

    fn context(&self, ticket: RunTicket) -> RunContext {
        let config = self.config.read();
        RunContext::new(
            self.graph.clone(),
            self.visuals.clone(),
            self.log.clone(),
            Pacer::from_config(&config),
            ticket,
        )
        .with_palette(config.palette_tokens())
    }

    async fn launch<T, F, Fut>(&self, kind: AlgorithmKind, run: F) -> Result<RunOutcome<T>>
    where
        F: FnOnce(RunContext) -> Fut,
        Fut: Future<Output = Result<RunOutcome<T>>>,
    {
        let ticket = match self.runs.begin(kind) {
            Ok(ticket) => ticket,
            Err(e) => {
                self.metrics.record_rejected(kind);
                tracing::warn!(algorithm = %kind, error = %e, "已有运行在进行，拒绝新的运行");
                return Err(e);
            }
        };

        let generation = ticket.generation();
        tracing::info!(algorithm = %kind, generation, "开始运行");

        let timer = self.metrics.record_run_start(kind);
        let result = run(self.context(ticket)).await;

        match &result {
            Ok(RunOutcome::Completed(_)) => {
                self.metrics.record_run_finish(timer, RunResult::Completed);
                tracing::info!(algorithm = %kind, generation, "运行完成");
            }
            Ok(RunOutcome::Aborted) => {
                self.metrics.record_run_finish(timer, RunResult::Aborted);
                tracing::info!(algorithm = %kind, generation, "运行已中止");
            }
            Err(e) => {
                self.metrics.record_run_finish(timer, RunResult::Failed);
                tracing::error!(algorithm = %kind, generation, error = %e, "运行失败");
            }
        }

        result
    }

    fn record_mst(&self, outcome: &RunOutcome<MstReport>) {
        if let RunOutcome::Completed(report) = outcome {
            self.metrics.record_edges_selected(report.edges.len());
        }
    }
}
