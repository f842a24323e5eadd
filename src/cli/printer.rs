//! 结果打印器
//!
//! 顶点、边、统计与运行结果的表格输出，以及带颜色的日志行

use crate::algorithm::{ComponentReport, MstReport};
use crate::graph::{Edge, GraphStats, Vertex};
use crate::metrics::MetricsSnapshot;
use crate::types::ElementId;
use crate::visual::{ElementStyle, VisualBoard};
use colored::Colorize;
use prettytable::{format, row, Cell, Row, Table};

/// 结果打印器
pub struct Printer;

impl Printer {
    fn table() -> Table {
        let mut table = Table::new();
        table.set_format(*format::consts::FORMAT_BOX_CHARS);
        table
    }

    /// 样式的简短描述
    fn describe_style(style: &ElementStyle) -> String {
        let mut parts = Vec::new();
        if style.highlighted {
            parts.push("高亮".to_string());
        }
        if style.candidate {
            parts.push("候选".to_string());
        }
        if let Some(color) = &style.color {
            parts.push(color.to_string());
        }
        parts.join(", ")
    }

    /// 顶点表
    pub fn vertices(vertices: &[Vertex], board: &VisualBoard) -> String {
        if vertices.is_empty() {
            return "图中没有顶点\n".to_string();
        }

        let mut table = Self::table();
        table.set_titles(row!["ID", "标签", "X", "Y", "状态"]);
        for v in vertices {
            let style = board.style(&ElementId::Vertex(v.id().clone()));
            table.add_row(Row::new(vec![
                Cell::new(v.id().as_str()),
                Cell::new(v.label()),
                Cell::new(&format!("{:.1}", v.position().x)),
                Cell::new(&format!("{:.1}", v.position().y)),
                Cell::new(&Self::describe_style(&style)),
            ]));
        }
        format!("{}{} 个顶点\n", table, vertices.len())
    }

    /// 边表
    pub fn edges(edges: &[Edge], board: &VisualBoard) -> String {
        if edges.is_empty() {
            return "图中没有边\n".to_string();
        }

        let mut table = Self::table();
        table.set_titles(row!["ID", "源", "目标", "权重", "标签", "状态"]);
        for e in edges {
            let weight = e
                .weight()
                .map(|w| w.to_string())
                .unwrap_or_else(|| "-".to_string());
            let style = board.style(&ElementId::Edge(e.id().clone()));
            table.add_row(Row::new(vec![
                Cell::new(e.id().as_str()),
                Cell::new(e.source().as_str()),
                Cell::new(e.target().as_str()),
                Cell::new(&weight),
                Cell::new(e.label()),
                Cell::new(&Self::describe_style(&style)),
            ]));
        }
        format!("{}{} 条边\n", table, edges.len())
    }

    /// 图统计
    pub fn stats(stats: &GraphStats) -> String {
        let mut table = Self::table();
        table.set_titles(row!["属性", "值"]);
        table.add_row(row!["顶点数", stats.vertex_count.to_string()]);
        table.add_row(row!["边数", stats.edge_count.to_string()]);
        table.add_row(row!["总权重", stats.total_weight.to_string()]);
        table.add_row(row!["连通分量", stats.component_count.to_string()]);
        table.to_string()
    }

    /// 最小生成树结果
    pub fn mst_report(report: &MstReport) -> String {
        let edges: Vec<&str> = report.edges.iter().map(|e| e.as_str()).collect();
        let mut out = format!(
            "{} 完成：选中 {} 条边，总权重 {}，比较 {} 次\n  边: {}\n",
            report.algorithm,
            report.edges.len(),
            report.total_weight,
            report.evaluated,
            edges.join(", ")
        );
        if !report.spanning {
            out.push_str(&format!("  {}\n", "图不连通，结果只覆盖部分顶点".yellow()));
        }
        out
    }

    /// 连通分量结果
    pub fn component_report(report: &ComponentReport) -> String {
        let mut table = Self::table();
        table.set_titles(row!["#", "颜色", "顶点"]);
        for (i, component) in report.components.iter().enumerate() {
            let vertices: Vec<&str> = component.vertices.iter().map(|v| v.as_str()).collect();
            table.add_row(Row::new(vec![
                Cell::new(&(i + 1).to_string()),
                Cell::new(component.color.as_str()),
                Cell::new(&vertices.join(", ")),
            ]));
        }
        format!("{}{} 个连通分量\n", table, report.count())
    }

    /// 运行指标
    pub fn metrics(snapshot: &MetricsSnapshot) -> String {
        let mut table = Self::table();
        table.set_titles(row!["算法", "开始", "完成", "中止", "拒绝", "失败", "平均耗时(ms)"]);
        for run in &snapshot.runs {
            table.add_row(Row::new(vec![
                Cell::new(&run.algorithm.to_string()),
                Cell::new(&run.started.to_string()),
                Cell::new(&run.completed.to_string()),
                Cell::new(&run.aborted.to_string()),
                Cell::new(&run.rejected.to_string()),
                Cell::new(&run.failed.to_string()),
                Cell::new(&format!("{:.2}", run.avg_duration_ms)),
            ]));
        }
        format!(
            "{}选中边 {} 条，找到连通分量 {} 个，运行 {} 秒\n",
            table, snapshot.edges_selected, snapshot.components_found, snapshot.uptime_seconds
        )
    }

    /// 按日志内容着色
    pub fn log_line(line: &str) -> String {
        let trimmed = line.trim_start();
        if trimmed.starts_with('✅') || trimmed.starts_with('✓') {
            line.green().to_string()
        } else if trimmed.starts_with('✗') {
            line.red().to_string()
        } else if trimmed.starts_with("⚠️") {
            line.yellow().to_string()
        } else if trimmed.starts_with('🔍') || trimmed.starts_with('🧩') {
            line.cyan().to_string()
        } else if trimmed.starts_with('🚀') {
            line.bold().to_string()
        } else {
            line.to_string()
        }
    }

    /// 完整日志
    pub fn log(entries: &[String]) -> String {
        if entries.is_empty() {
            return "日志为空\n".to_string();
        }
        let mut out = String::new();
        for (i, line) in entries.iter().enumerate() {
            out.push_str(&format!("{:>4}  {}\n", i + 1, Self::log_line(line)));
        }
        out
    }

    /// 帮助信息
    pub fn help() -> String {
        r#"
═══════════════════════════════════════════════════════════════
                   MstGraph CLI 命令帮助
═══════════════════════════════════════════════════════════════

基础命令:
  help, h, ?                 显示帮助
  quit, exit, q              退出程序
  stats, info                显示图统计信息
  vertices, v                列出顶点
  edges, e                   列出边

编辑:
  add <ID> [标签] [X Y]      添加顶点
  connect <源> <目标>        连线（权重 0）
  weight <边 ID> <权重>      修改边权重
  rename <顶点 ID> <标签>    修改顶点标签
  remove <ID>                删除顶点（连同关联边）或边
  select <ID>                选中顶点或边

算法:
  prim <起点>                执行 Prim 算法
  kruskal                    执行 Kruskal 算法
  components                 按连通分量染色
  reset                      清除可视状态并中止正在进行的运行

日志与文件:
  log                        显示执行日志
  clear-log                  清空执行日志
  save <文件>                保存为 JSON
  load <文件>                从 JSON 加载
  import <CSV 文件>          从边表导入（source,target,weight）

其他:
  speed <毫秒>               设置动画步长
  metrics [reset|prometheus] 显示、清零或导出运行指标

═══════════════════════════════════════════════════════════════
"#
        .to_string()
    }
}
