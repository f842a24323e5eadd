//! 执行日志
//!
//! 算法把每一步的说明追加到 [`LogSink`]，前端面板按顺序展示。

use parking_lot::RwLock;
use tokio::sync::broadcast;

/// 日志订阅通道容量
const CHANNEL_CAPACITY: usize = 256;

/// 日志输出接口
pub trait LogSink: Send + Sync {
    /// 追加一条日志
    fn append(&self, message: String);

    /// 清空日志
    fn clear(&self);
}

/// 日志事件
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogEvent {
    Appended(String),
    Cleared,
}

/// 内存中的执行日志
///
/// 只追加，不重排也不去重。每条日志同时以 `tracing` 事件输出，并广播给订阅者。
pub struct ExecutionLog {
    entries: RwLock<Vec<String>>,
    sender: broadcast::Sender<LogEvent>,
}

impl ExecutionLog {
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(CHANNEL_CAPACITY);
        Self {
            entries: RwLock::new(Vec::new()),
            sender,
        }
    }

    /// 日志快照
    pub fn entries(&self) -> Vec<String> {
        self.entries.read().clone()
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    /// 最后一条日志
    pub fn last(&self) -> Option<String> {
        self.entries.read().last().cloned()
    }

    /// 订阅后续日志事件
    pub fn subscribe(&self) -> broadcast::Receiver<LogEvent> {
        self.sender.subscribe()
    }
}

impl Default for ExecutionLog {
    fn default() -> Self {
        Self::new()
    }
}

impl LogSink for ExecutionLog {
    fn append(&self, message: String) {
        tracing::debug!(target: "mstgraph::log", "{}", message);
        self.entries.write().push(message.clone());
        // 没有订阅者时发送失败，忽略即可
        let _ = self.sender.send(LogEvent::Appended(message));
    }

    fn clear(&self) {
        self.entries.write().clear();
        let _ = self.sender.send(LogEvent::Cleared);
    }
}
