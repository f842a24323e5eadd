//! 控制台命令处理
//!
//! 解析一行输入并作用于图、引擎与日志。算法默认在后台运行，
//! 运行期间仍可输入 `reset` 等命令。

use super::printer::Printer;
use crate::algorithm::{ComponentReport, MstReport, RunOutcome};
use crate::engine::Engine;
use crate::error::Result;
use crate::graph::{EdgeId, Graph, GraphAccessor, GraphStats, VertexId};
use crate::import::EdgeListImporter;
use crate::log::ExecutionLog;
use crate::types::{ElementId, Position};
use crate::visual::VisualBoard;
use std::future::Future;
use std::sync::Arc;

/// 控制台命令执行结果
#[derive(Debug, Clone, PartialEq)]
pub enum CommandResult {
    /// 继续运行
    Continue,
    /// 退出程序
    Exit,
    /// 显示消息
    Message(String),
    /// 错误
    Error(String),
}

impl<T: ToString> From<Result<T>> for CommandResult {
    fn from(result: Result<T>) -> Self {
        match result {
            Ok(message) => CommandResult::Message(message.to_string()),
            Err(e) => CommandResult::Error(e.to_string()),
        }
    }
}

/// 控制台
pub struct Console {
    graph: Arc<Graph>,
    board: Arc<VisualBoard>,
    log: Arc<ExecutionLog>,
    engine: Engine,
    /// 为 true 时等待算法结束再返回
    foreground: bool,
}

impl Console {
    pub fn new(
        graph: Arc<Graph>,
        board: Arc<VisualBoard>,
        log: Arc<ExecutionLog>,
        engine: Engine,
    ) -> Self {
        Self {
            graph,
            board,
            log,
            engine,
            foreground: false,
        }
    }

    /// 设置是否在前台运行算法
    pub fn with_foreground(mut self, foreground: bool) -> Self {
        self.foreground = foreground;
        self
    }

    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    /// 执行一行命令
    pub async fn execute(&self, input: &str) -> CommandResult {
        let parts: Vec<&str> = input.split_whitespace().collect();
        let Some(first) = parts.first() else {
            return CommandResult::Continue;
        };
        let cmd = first.to_lowercase();
        let args = &parts[1..];

        match cmd.as_str() {
            "quit" | "exit" | "q" => CommandResult::Exit,

            "help" | "h" | "?" => CommandResult::Message(Printer::help()),

            "stats" | "info" => {
                CommandResult::Message(Printer::stats(&GraphStats::collect(self.graph.as_ref())))
            }

            "vertices" | "v" => {
                CommandResult::Message(Printer::vertices(&self.graph.all_vertices(), &self.board))
            }

            "edges" | "e" => CommandResult::Message(Printer::edges(&self.graph.edges(), &self.board)),

            "add" => self.add_vertex(args),

            "connect" => match args {
                [source, target] => self
                    .graph
                    .connect(&VertexId::from(*source), &VertexId::from(*target))
                    .map(|id| format!("已添加边 {}", id))
                    .into(),
                _ => usage("connect <源> <目标>"),
            },

            "weight" => match args {
                [edge, text] => self
                    .graph
                    .set_edge_weight_input(&EdgeId::from(*edge), text)
                    .map(|_| format!("边 {} 的权重已设为 {}", edge, text))
                    .into(),
                _ => usage("weight <边 ID> <权重>"),
            },

            "rename" => match args {
                [vertex, label @ ..] if !label.is_empty() => {
                    let label = label.join(" ");
                    self.graph
                        .set_vertex_label(&VertexId::from(*vertex), &label)
                        .map(|_| format!("顶点 {} 已改名为 {}", vertex, label))
                        .into()
                }
                _ => usage("rename <顶点 ID> <标签>"),
            },

            "remove" | "rm" => match args {
                [id] => self.remove(id),
                _ => usage("remove <ID>"),
            },

            "select" => match args {
                [id] => match self.element(id) {
                    Some(element) => {
                        self.board.select(element);
                        CommandResult::Message(format!("已选中 {}", id))
                    }
                    None => CommandResult::Error(format!("元素不存在: {}", id)),
                },
                _ => usage("select <ID>"),
            },

            "prim" => match args {
                [source] => {
                    let engine = self.engine.clone();
                    let source = VertexId::from(*source);
                    self.launch(async move { render_mst(engine.prim(&source).await) })
                        .await
                }
                _ => usage("prim <起点>"),
            },

            "kruskal" => {
                let engine = self.engine.clone();
                self.launch(async move { render_mst(engine.kruskal().await) })
                    .await
            }

            "components" | "cc" => {
                let engine = self.engine.clone();
                self.launch(async move { render_components(engine.highlight_components().await) })
                    .await
            }

            "reset" => {
                self.engine.reset();
                CommandResult::Message("已重置".to_string())
            }

            "log" => CommandResult::Message(Printer::log(&self.log.entries())),

            "clear-log" => {
                self.engine.clear_log();
                CommandResult::Message("日志已清空".to_string())
            }

            "save" => match args {
                [path] => self
                    .graph
                    .save_json(path)
                    .map(|_| format!("已保存到 {}", path))
                    .into(),
                _ => usage("save <文件>"),
            },

            "load" => match args {
                [path] => self.replace(|graph| {
                    graph.replace_with(crate::graph::GraphDocument::read_from(path)?)?;
                    Ok(format!("已从 {} 加载", path))
                }),
                _ => usage("load <文件>"),
            },

            "import" => match args {
                [path] => self.replace(|graph| {
                    let stats = EdgeListImporter::new(graph.clone()).import_csv(path)?;
                    Ok(format!(
                        "导入 {} 个顶点、{} 条边（跳过 {} 行，错误 {} 行）",
                        stats.vertices_imported, stats.edges_imported, stats.skipped, stats.errors
                    ))
                }),
                _ => usage("import <CSV 文件>"),
            },

            "speed" => match args {
                [ms] => match ms.parse::<u64>() {
                    Ok(ms) => {
                        self.engine.set_step_delay(ms);
                        CommandResult::Message(format!("步长已设为 {} ms", ms))
                    }
                    Err(_) => CommandResult::Error(format!("无效的毫秒数: {}", ms)),
                },
                _ => usage("speed <毫秒>"),
            },

            "metrics" => match args {
                [] => CommandResult::Message(Printer::metrics(&self.engine.metrics().snapshot())),
                ["reset"] => {
                    self.engine.metrics().reset();
                    CommandResult::Message("运行指标已清零".to_string())
                }
                ["prometheus"] => CommandResult::Message(self.engine.metrics().to_prometheus().content),
                _ => usage("metrics [reset|prometheus]"),
            },

            _ => CommandResult::Error(format!("未知命令: {}。输入 'help' 查看帮助。", cmd)),
        }
    }

    fn add_vertex(&self, args: &[&str]) -> CommandResult {
        let (id, label, position) = match args {
            [id] => (*id, *id, Position::default()),
            [id, label] => (*id, *label, Position::default()),
            [id, label, x, y] => match (x.parse::<f64>(), y.parse::<f64>()) {
                (Ok(x), Ok(y)) => (*id, *label, Position::new(x, y)),
                _ => return CommandResult::Error("坐标必须是数字".to_string()),
            },
            _ => return usage("add <ID> [标签] [X Y]"),
        };
        self.graph
            .add_vertex(VertexId::from(id), label, position)
            .map(|id| format!("已添加顶点 {}", id))
            .into()
    }

    fn remove(&self, id: &str) -> CommandResult {
        let vertex = VertexId::from(id);
        if self.graph.contains_vertex(&vertex) {
            return self
                .graph
                .remove_vertex(&vertex)
                .map(|_| format!("已删除顶点 {} 及其关联边", id))
                .into();
        }
        self.graph
            .remove_edge(&EdgeId::from(id))
            .map(|_| format!("已删除边 {}", id))
            .into()
    }

    fn element(&self, id: &str) -> Option<ElementId> {
        let vertex = VertexId::from(id);
        if self.graph.contains_vertex(&vertex) {
            return Some(ElementId::Vertex(vertex));
        }
        let edge = EdgeId::from(id);
        self.graph.edge(&edge).map(|_| ElementId::Edge(edge))
    }

    /// 替换整张图前先重置，旧的可视状态不再有意义
    fn replace<F>(&self, load: F) -> CommandResult
    where
        F: FnOnce(&Arc<Graph>) -> Result<String>,
    {
        self.engine.reset();
        load(&self.graph).into()
    }

    /// 前台模式等待结果，否则在后台运行并在结束时打印
    async fn launch<F>(&self, run: F) -> CommandResult
    where
        F: Future<Output = CommandResult> + Send + 'static,
    {
        if self.foreground {
            return run.await;
        }
        if let Some(active) = self.engine.active() {
            return CommandResult::Error(format!("已有算法正在运行: {}", active));
        }

        tokio::spawn(async move {
            match run.await {
                CommandResult::Message(msg) => println!("{}", msg),
                CommandResult::Error(msg) => eprintln!("错误: {}", msg),
                CommandResult::Continue | CommandResult::Exit => {}
            }
        });
        CommandResult::Continue
    }
}

fn usage(text: &str) -> CommandResult {
    CommandResult::Error(format!("用法: {}", text))
}

fn render_mst(result: Result<RunOutcome<MstReport>>) -> CommandResult {
    match result {
        Ok(RunOutcome::Completed(report)) => CommandResult::Message(Printer::mst_report(&report)),
        Ok(RunOutcome::Aborted) => CommandResult::Message("运行已中止".to_string()),
        Err(e) => CommandResult::Error(e.to_string()),
    }
}

fn render_components(result: Result<RunOutcome<ComponentReport>>) -> CommandResult {
    match result {
        Ok(RunOutcome::Completed(report)) => {
            CommandResult::Message(Printer::component_report(&report))
        }
        Ok(RunOutcome::Aborted) => CommandResult::Message("运行已中止".to_string()),
        Err(e) => CommandResult::Error(e.to_string()),
    }
}
