//! MstGraph - 最小生成树逐步演示引擎
//!
//! 在可编辑的带权无向图上逐步执行图算法，并通过执行日志与可视标记讲述每一步：
//! - Prim 与 Kruskal 最小生成树
//! - 基于深度优先遍历的连通分量染色
//! - 并查集（路径压缩 + 按秩合并）
//! - 可中止的异步运行：重置或编辑图会让正在进行的运行静默结束

pub mod algorithm;
pub mod cli;
pub mod config;
pub mod engine;
pub mod error;
pub mod graph;
pub mod import;
pub mod log;
pub mod metrics;
pub mod types;
pub mod visual;

// 重导出常用类型
pub use algorithm::{AlgorithmKind, ComponentReport, MstReport, RunOutcome, UnionFind};
pub use config::EngineConfig;
pub use engine::Engine;
pub use error::{Error, Result};
pub use graph::{Edge, EdgeId, Graph, GraphAccessor, Vertex, VertexId};
pub use log::{ExecutionLog, LogSink};
pub use types::{ColorToken, ElementId, Position};
pub use visual::{VisualBoard, VisualState};

/// 库版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
