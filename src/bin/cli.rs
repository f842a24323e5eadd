//! MstGraph CLI 工具
//!
//! 交互式命令行界面：编辑图、逐步观看 Prim / Kruskal / 连通分量的执行过程

use anyhow::Context;
use clap::Parser;
use mstgraph::cli::{CommandCompleter, CommandResult, Console, Printer};
use mstgraph::config::EngineConfig;
use mstgraph::engine::Engine;
use mstgraph::graph::{Graph, GraphAccessor};
use mstgraph::import::EdgeListImporter;
use mstgraph::log::{ExecutionLog, LogEvent};
use mstgraph::visual::VisualBoard;
use rustyline::error::ReadlineError;
use rustyline::history::DefaultHistory;
use rustyline::Editor;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::broadcast::error::RecvError;
use tracing_subscriber::EnvFilter;

/// 命令历史文件（位于用户主目录）
const HISTORY_FILE: &str = ".mstgraph_history";

#[derive(Parser, Debug)]
#[command(name = "mstgraph-cli")]
#[command(about = "最小生成树与连通分量的逐步演示工具")]
struct Args {
    /// 从 JSON 文件加载图（默认使用示例图）
    #[arg(short, long)]
    graph: Option<PathBuf>,

    /// 从 CSV 边表导入图
    #[arg(long)]
    edges: Option<PathBuf>,

    /// 引擎配置文件（JSON）
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// 动画步长（毫秒）
    #[arg(long)]
    step_ms: Option<u64>,

    /// 连通分量遍历的访问间隔（毫秒）
    #[arg(long)]
    visit_ms: Option<u64>,

    /// 执行以分号分隔的命令后退出
    #[arg(short = 'e', long)]
    execute: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("mstgraph=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => EngineConfig::from_file(path)
            .with_context(|| format!("无法加载配置文件 {}", path.display()))?,
        None => EngineConfig::default(),
    };
    if let Some(ms) = args.step_ms {
        config.step_delay_ms = ms;
    }
    if let Some(ms) = args.visit_ms {
        config.visit_delay_ms = ms;
    }
    config.validate()?;

    let graph = match &args.graph {
        Some(path) => Graph::load_json(path)
            .with_context(|| format!("无法加载图文件 {}", path.display()))?,
        None => Graph::sample(),
    };
    if let Some(path) = &args.edges {
        let stats = EdgeListImporter::new(graph.clone())
            .import_csv(path)
            .with_context(|| format!("无法导入边表 {}", path.display()))?;
        tracing::info!(
            vertices = stats.vertices_imported,
            edges = stats.edges_imported,
            "已导入边表"
        );
    }

    let board = Arc::new(VisualBoard::new());
    let log = Arc::new(ExecutionLog::new());
    let engine = Engine::new(graph.clone(), board.clone(), log.clone(), config);

    // 执行日志实时输出
    let mut events = log.subscribe();
    let printer = tokio::spawn(async move {
        loop {
            match events.recv().await {
                Ok(LogEvent::Appended(line)) => println!("{}", Printer::log_line(&line)),
                Ok(LogEvent::Cleared) => {}
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "日志输出跟不上，跳过部分日志");
                }
                Err(RecvError::Closed) => break,
            }
        }
    });

    // 单次执行模式
    if let Some(commands) = args.execute {
        let console = Console::new(graph, board, log, engine).with_foreground(true);
        for command in commands.split(';') {
            if !show(console.execute(command).await) {
                break;
            }
        }
        // 日志的发送端随控制台一起释放，输出任务打印完剩余日志后退出
        drop(console);
        let _ = printer.await;
        return Ok(());
    }

    println!("MstGraph CLI - 最小生成树逐步演示");
    println!("=================================");
    println!("  顶点数: {}", graph.vertex_count());
    println!("  边数: {}", graph.edge_count());
    println!("\n输入 'help' 查看命令列表，'quit' 退出\n");

    let mut editor: Editor<CommandCompleter, DefaultHistory> = Editor::new()?;
    editor.set_helper(Some(CommandCompleter::new(graph.clone())));
    let history = dirs::home_dir().map(|home| home.join(HISTORY_FILE));
    if let Some(path) = &history {
        // 首次运行时没有历史文件
        let _ = editor.load_history(path);
    }
    let console = Console::new(graph, board, log, engine);

    loop {
        let line = tokio::task::block_in_place(|| editor.readline("mstgraph> "));
        match line {
            Ok(line) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }
                let _ = editor.add_history_entry(line);
                if !show(console.execute(line).await) {
                    break;
                }
            }
            Err(ReadlineError::Interrupted) => continue,
            Err(ReadlineError::Eof) => break,
            Err(e) => return Err(e.into()),
        }
    }

    if let Some(path) = &history {
        if let Err(e) = editor.save_history(path) {
            tracing::warn!(error = %e, "无法保存命令历史");
        }
    }

    console.engine().reset();
    printer.abort();
    println!("再见！");
    Ok(())
}

/// 输出命令结果，返回是否继续
fn show(result: CommandResult) -> bool {
    match result {
        CommandResult::Continue => true,
        CommandResult::Exit => false,
        CommandResult::Message(msg) => {
            print!("{}", msg);
            if !msg.ends_with('\n') {
                println!();
            }
            true
        }
        CommandResult::Error(msg) => {
            eprintln!("错误: {}", msg);
            true
        }
    }
}
