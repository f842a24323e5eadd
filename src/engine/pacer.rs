//! 动画节拍

use crate::config::EngineConfig;
use std::time::Duration;

/// 控制每一步之间的等待时长
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pacer {
    step: Duration,
    visit: Duration,
}

impl Pacer {
    pub fn new(step: Duration, visit: Duration) -> Self {
        Self { step, visit }
    }

    pub fn from_config(config: &EngineConfig) -> Self {
        Self::new(config.step_delay(), config.visit_delay())
    }

    /// 不等待
    pub fn instant() -> Self {
        Self::new(Duration::ZERO, Duration::ZERO)
    }

    /// 完整一步
    pub fn step(&self) -> Duration {
        self.step
    }

    /// 半步（候选边标记后）
    pub fn half_step(&self) -> Duration {
        self.step / 2
    }

    /// 三分之一步（跳过成环边后）
    pub fn third_step(&self) -> Duration {
        self.step / 3
    }

    /// 连通分量遍历时每个顶点的停顿
    pub fn visit(&self) -> Duration {
        self.visit
    }

    /// 等待指定时长；时长为 0 时仍让出一次执行权
    pub async fn wait(&self, delay: Duration) {
        if delay.is_zero() {
            tokio::task::yield_now().await;
        } else {
            tokio::time::sleep(delay).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fractions() {
        let pacer = Pacer::new(Duration::from_millis(900), Duration::from_millis(100));
        assert_eq!(pacer.half_step(), Duration::from_millis(450));
        assert_eq!(pacer.third_step(), Duration::from_millis(300));
        assert_eq!(pacer.visit(), Duration::from_millis(100));
    }

    #[tokio::test(start_paused = true)]
    async fn test_wait_uses_tokio_clock() {
        let pacer = Pacer::new(Duration::from_millis(800), Duration::ZERO);
        let start = tokio::time::Instant::now();
        pacer.wait(pacer.step()).await;
        pacer.wait(pacer.visit()).await;
        let elapsed = start.elapsed();
        assert!(elapsed >= Duration::from_millis(800));
        assert!(elapsed < Duration::from_millis(810));
    }
}
