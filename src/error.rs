//! 错误类型定义

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("顶点不存在: {0}")]
    VertexNotFound(String),

    #[error("边不存在: {0}")]
    EdgeNotFound(String),

    #[error("顶点已存在: {0}")]
    VertexAlreadyExists(String),

    #[error("边已存在: {0}")]
    EdgeAlreadyExists(String),

    #[error("元素未注册到并查集: {0}")]
    NotRegistered(String),

    #[error("已有算法正在运行: {0}")]
    RunInProgress(String),

    /// 运行已被重置或图编辑取代（内部使用，对外转换为 `RunOutcome::Aborted`）
    #[error("运行已失效")]
    Superseded,

    #[error("解析错误: {0}")]
    ParseError(String),

    #[error("导入错误: {0}")]
    ImportError(String),

    #[error("配置错误: {0}")]
    ConfigError(String),

    #[error("IO 错误: {0}")]
    IoError(#[from] std::io::Error),

    #[error("序列化错误: {0}")]
    SerializationError(String),
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::SerializationError(e.to_string())
    }
}

impl From<csv::Error> for Error {
    fn from(e: csv::Error) -> Self {
        Error::ImportError(e.to_string())
    }
}
