//! 图核心模块
//!
//! 定义顶点、边、图存储以及算法使用的只读访问接口

mod document;
mod edge;
mod graph;
mod stats;
mod vertex;

pub use document::GraphDocument;
pub use edge::{Edge, EdgeId};
pub use graph::{Graph, GraphAccessor};
pub use stats::GraphStats;
pub use vertex::{Vertex, VertexId};
