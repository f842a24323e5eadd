//! MstGraph 边表导入工具
//!
//! 把 CSV 或 JSON Lines 边表转换为可供 `mstgraph-cli --graph` 加载的 JSON 图文件

use clap::Parser;
use mstgraph::graph::{Graph, GraphAccessor, GraphStats};
use mstgraph::import::EdgeListImporter;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "mstgraph-import")]
#[command(about = "MstGraph 边表导入工具")]
struct Args {
    /// 输入文件路径
    #[arg(short, long)]
    input: PathBuf,

    /// 输出的 JSON 图文件
    #[arg(short, long, default_value = "graph.json")]
    output: PathBuf,

    /// 输入格式: csv, jsonl
    #[arg(short, long, default_value = "csv")]
    format: String,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("mstgraph=info")),
        )
        .init();

    let args = Args::parse();

    println!("MstGraph 边表导入工具");
    println!("=====================");
    println!("输入文件: {:?}", args.input);
    println!("输出文件: {:?}", args.output);
    println!("格式: {}", args.format);

    let graph = Graph::new();
    let importer = EdgeListImporter::new(graph.clone());

    let stats = match args.format.as_str() {
        "csv" => importer.import_csv(&args.input)?,
        "jsonl" | "json" => importer.import_jsonl(&args.input)?,
        other => anyhow::bail!("不支持的格式: {}", other),
    };

    graph.save_json(&args.output)?;

    let summary = GraphStats::collect(graph.as_ref());
    println!("\n导入完成!");
    println!("  顶点导入: {}", stats.vertices_imported);
    println!("  边导入: {}", stats.edges_imported);
    println!("  跳过行数: {}", stats.skipped);
    println!("  错误数: {}", stats.errors);
    println!("  耗时: {} ms", stats.duration_ms);
    println!("\n当前图大小:");
    println!("  顶点数: {}", graph.vertex_count());
    println!("  边数: {}", graph.edge_count());
    println!("  连通分量: {}", summary.component_count);

    Ok(())
}
