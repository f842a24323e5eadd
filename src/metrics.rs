//! 运行指标收集模块
//!
//! 统计各算法的运行次数、结果与耗时，并支持导出为 Prometheus 文本格式

use crate::algorithm::AlgorithmKind;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// 全局运行指标
#[derive(Debug)]
pub struct Metrics {
    prim: RunStats,
    kruskal: RunStats,
    components: RunStats,
    /// 最小生成树选中的边总数
    edges_selected: AtomicU64,
    /// 找到的连通分量总数
    components_found: AtomicU64,
    /// 启动时间
    start_time: Instant,
}

/// 单个算法的运行统计
#[derive(Debug, Default)]
struct RunStats {
    /// 开始的运行数
    started: AtomicU64,
    /// 正常结束
    completed: AtomicU64,
    /// 被重置或图编辑取代
    aborted: AtomicU64,
    /// 因已有运行被拒绝
    rejected: AtomicU64,
    /// 前置条件失败
    failed: AtomicU64,
    /// 运行总耗时（微秒）
    total_duration_us: AtomicU64,
}

impl RunStats {
    fn snapshot(&self, kind: AlgorithmKind) -> RunStatsSnapshot {
        let completed = self.completed.load(Ordering::Relaxed);
        let aborted = self.aborted.load(Ordering::Relaxed);
        let finished = completed + aborted;
        let total_us = self.total_duration_us.load(Ordering::Relaxed);

        RunStatsSnapshot {
            algorithm: kind,
            started: self.started.load(Ordering::Relaxed),
            completed,
            aborted,
            rejected: self.rejected.load(Ordering::Relaxed),
            failed: self.failed.load(Ordering::Relaxed),
            avg_duration_ms: if finished > 0 {
                (total_us as f64) / (finished as f64) / 1000.0
            } else {
                0.0
            },
        }
    }

    fn reset(&self) {
        self.started.store(0, Ordering::Relaxed);
        self.completed.store(0, Ordering::Relaxed);
        self.aborted.store(0, Ordering::Relaxed);
        self.rejected.store(0, Ordering::Relaxed);
        self.failed.store(0, Ordering::Relaxed);
        self.total_duration_us.store(0, Ordering::Relaxed);
    }
}

/// 单个算法的指标快照
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunStatsSnapshot {
    pub algorithm: AlgorithmKind,
    pub started: u64,
    pub completed: u64,
    pub aborted: u64,
    pub rejected: u64,
    pub failed: u64,
    pub avg_duration_ms: f64,
}

/// 可导出的指标快照
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricsSnapshot {
    pub runs: Vec<RunStatsSnapshot>,
    pub edges_selected: u64,
    pub components_found: u64,
    pub uptime_seconds: u64,
}

impl MetricsSnapshot {
    /// 指定算法的统计
    pub fn run(&self, kind: AlgorithmKind) -> Option<&RunStatsSnapshot> {
        self.runs.iter().find(|r| r.algorithm == kind)
    }
}

/// Prometheus 格式指标
#[derive(Debug, Clone)]
pub struct PrometheusMetrics {
    pub content: String,
}

/// 一次运行的最终结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunResult {
    Completed,
    Aborted,
    Failed,
}

impl Metrics {
    /// 创建新的指标收集器
    pub fn new() -> Self {
        Self {
            prim: RunStats::default(),
            kruskal: RunStats::default(),
            components: RunStats::default(),
            edges_selected: AtomicU64::new(0),
            components_found: AtomicU64::new(0),
            start_time: Instant::now(),
        }
    }

    fn stats(&self, kind: AlgorithmKind) -> &RunStats {
        match kind {
            AlgorithmKind::Prim => &self.prim,
            AlgorithmKind::Kruskal => &self.kruskal,
            AlgorithmKind::Components => &self.components,
        }
    }

    /// 记录运行开始
    pub fn record_run_start(&self, kind: AlgorithmKind) -> RunTimer {
        self.stats(kind).started.fetch_add(1, Ordering::Relaxed);
        RunTimer::new(kind)
    }

    /// 记录运行结束
    pub fn record_run_finish(&self, timer: RunTimer, result: RunResult) {
        let stats = self.stats(timer.kind);
        match result {
            RunResult::Completed => stats.completed.fetch_add(1, Ordering::Relaxed),
            RunResult::Aborted => stats.aborted.fetch_add(1, Ordering::Relaxed),
            RunResult::Failed => stats.failed.fetch_add(1, Ordering::Relaxed),
        };
        stats
            .total_duration_us
            .fetch_add(timer.elapsed().as_micros() as u64, Ordering::Relaxed);
    }

    /// 记录被拒绝的运行
    pub fn record_rejected(&self, kind: AlgorithmKind) {
        self.stats(kind).rejected.fetch_add(1, Ordering::Relaxed);
    }

    /// 记录选中的边
    pub fn record_edges_selected(&self, count: usize) {
        self.edges_selected
            .fetch_add(count as u64, Ordering::Relaxed);
    }

    /// 记录找到的连通分量
    pub fn record_components(&self, count: usize) {
        self.components_found
            .fetch_add(count as u64, Ordering::Relaxed);
    }

    /// 获取指标快照
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            runs: vec![
                self.prim.snapshot(AlgorithmKind::Prim),
                self.kruskal.snapshot(AlgorithmKind::Kruskal),
                self.components.snapshot(AlgorithmKind::Components),
            ],
            edges_selected: self.edges_selected.load(Ordering::Relaxed),
            components_found: self.components_found.load(Ordering::Relaxed),
            uptime_seconds: self.start_time.elapsed().as_secs(),
        }
    }

    /// 导出为 Prometheus 格式
    pub fn to_prometheus(&self) -> PrometheusMetrics {
        let snapshot = self.snapshot();

        let mut content = String::new();

        let counters: [(&str, &str, fn(&RunStatsSnapshot) -> u64); 5] = [
            ("started", "Algorithm runs started", |r| r.started),
            ("completed", "Algorithm runs completed", |r| r.completed),
            ("aborted", "Algorithm runs aborted by reset or graph edit", |r| r.aborted),
            ("rejected", "Algorithm runs rejected while another was active", |r| r.rejected),
            ("failed", "Algorithm runs failed on a precondition", |r| r.failed),
        ];
        for (name, help, value) in counters {
            content.push_str(&format!("# HELP mstgraph_runs_{}_total {}\n", name, help));
            content.push_str(&format!("# TYPE mstgraph_runs_{}_total counter\n", name));
            for run in &snapshot.runs {
                content.push_str(&format!(
                    "mstgraph_runs_{}_total{{algorithm=\"{}\"}} {}\n",
                    name,
                    run.algorithm,
                    value(run)
                ));
            }
        }

        content.push_str("# HELP mstgraph_run_duration_avg_ms Average run duration in milliseconds\n");
        content.push_str("# TYPE mstgraph_run_duration_avg_ms gauge\n");
        for run in &snapshot.runs {
            content.push_str(&format!(
                "mstgraph_run_duration_avg_ms{{algorithm=\"{}\"}} {:.2}\n",
                run.algorithm, run.avg_duration_ms
            ));
        }

        content.push_str("# HELP mstgraph_edges_selected_total Spanning tree edges selected\n");
        content.push_str("# TYPE mstgraph_edges_selected_total counter\n");
        content.push_str(&format!("mstgraph_edges_selected_total {}\n", snapshot.edges_selected));

        content.push_str("# HELP mstgraph_components_found_total Connected components found\n");
        content.push_str("# TYPE mstgraph_components_found_total counter\n");
        content.push_str(&format!("mstgraph_components_found_total {}\n", snapshot.components_found));

        content.push_str("# HELP mstgraph_uptime_seconds Uptime in seconds\n");
        content.push_str("# TYPE mstgraph_uptime_seconds counter\n");
        content.push_str(&format!("mstgraph_uptime_seconds {}\n", snapshot.uptime_seconds));

        PrometheusMetrics { content }
    }

    /// 重置所有指标
    pub fn reset(&self) {
        self.prim.reset();
        self.kruskal.reset();
        self.components.reset();
        self.edges_selected.store(0, Ordering::Relaxed);
        self.components_found.store(0, Ordering::Relaxed);
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

/// 运行计时器
pub struct RunTimer {
    kind: AlgorithmKind,
    start: Instant,
}

impl RunTimer {
    fn new(kind: AlgorithmKind) -> Self {
        Self {
            kind,
            start: Instant::now(),
        }
    }

    fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }
}

/// 全局指标实例
static METRICS: once_cell::sync::Lazy<Arc<Metrics>> =
    once_cell::sync::Lazy::new(|| Arc::new(Metrics::new()));

/// 获取全局指标实例
pub fn global_metrics() -> Arc<Metrics> {
    METRICS.clone()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_snapshot() {
        let metrics = Metrics::new();

        let timer = metrics.record_run_start(AlgorithmKind::Kruskal);
        std::thread::sleep(Duration::from_millis(10));
        metrics.record_run_finish(timer, RunResult::Completed);
        metrics.record_edges_selected(5);

        let timer = metrics.record_run_start(AlgorithmKind::Prim);
        metrics.record_run_finish(timer, RunResult::Aborted);
        metrics.record_rejected(AlgorithmKind::Prim);

        let snapshot = metrics.snapshot();
        let kruskal = snapshot.run(AlgorithmKind::Kruskal).unwrap();
        assert_eq!(kruskal.started, 1);
        assert_eq!(kruskal.completed, 1);
        assert!(kruskal.avg_duration_ms >= 10.0);

        let prim = snapshot.run(AlgorithmKind::Prim).unwrap();
        assert_eq!(prim.aborted, 1);
        assert_eq!(prim.rejected, 1);
        assert_eq!(snapshot.edges_selected, 5);
    }

    #[test]
    fn test_prometheus_export() {
        let metrics = Metrics::new();
        metrics.record_run_start(AlgorithmKind::Components);
        metrics.record_components(3);

        let prom = metrics.to_prometheus();
        assert!(prom
            .content
            .contains("mstgraph_runs_started_total{algorithm=\"components\"} 1"));
        assert!(prom.content.contains("mstgraph_components_found_total 3"));
    }

    #[test]
    fn test_reset() {
        let metrics = Metrics::new();
        metrics.record_rejected(AlgorithmKind::Kruskal);
        metrics.record_edges_selected(2);
        metrics.reset();

        let snapshot = metrics.snapshot();
        assert_eq!(snapshot.run(AlgorithmKind::Kruskal).unwrap().rejected, 0);
        assert_eq!(snapshot.edges_selected, 0);
    }
}
