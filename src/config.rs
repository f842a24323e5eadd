//! 引擎配置

use crate::error::{Error, Result};
use crate::types::ColorToken;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use std::time::Duration;

/// 默认分量配色
const DEFAULT_PALETTE: &[&str] = &[
    "#ef4444", "#22c55e", "#3b82f6", "#f59e0b", "#a855f7", "#ec4899", "#14b8a6", "#f97316",
    "#6366f1", "#84cc16",
];

/// 引擎配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// 每一步动画的间隔（毫秒）
    pub step_delay_ms: u64,
    /// 连通分量遍历时每访问一个顶点的间隔（毫秒）
    pub visit_delay_ms: u64,
    /// 分量配色，用尽后按黄金角生成新颜色
    pub palette: Vec<String>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            step_delay_ms: 1000,
            visit_delay_ms: 500,
            palette: DEFAULT_PALETTE.iter().map(|c| c.to_string()).collect(),
        }
    }
}

impl EngineConfig {
    /// 从 JSON 文件加载，缺省字段取默认值
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)
            .map_err(|e| Error::ConfigError(format!("配置文件格式错误: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// 设置步长
    pub fn with_step_delay_ms(mut self, ms: u64) -> Self {
        self.step_delay_ms = ms;
        self
    }

    /// 设置访问间隔
    pub fn with_visit_delay_ms(mut self, ms: u64) -> Self {
        self.visit_delay_ms = ms;
        self
    }

    /// 不等待的配置（测试与批处理使用）
    pub fn instant() -> Self {
        Self::default().with_step_delay_ms(0).with_visit_delay_ms(0)
    }

    /// 校验配置
    pub fn validate(&self) -> Result<()> {
        if self.palette.is_empty() {
            return Err(Error::ConfigError("配色不能为空".to_string()));
        }
        let mut seen = HashSet::new();
        for color in &self.palette {
            if !seen.insert(color.as_str()) {
                return Err(Error::ConfigError(format!("配色重复: {}", color)));
            }
        }
        Ok(())
    }

    pub fn step_delay(&self) -> Duration {
        Duration::from_millis(self.step_delay_ms)
    }

    pub fn visit_delay(&self) -> Duration {
        Duration::from_millis(self.visit_delay_ms)
    }

    pub fn palette_tokens(&self) -> Vec<ColorToken> {
        self.palette.iter().map(ColorToken::new).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = EngineConfig::default();
        assert_eq!(config.step_delay(), Duration::from_millis(1000));
        assert_eq!(config.visit_delay(), Duration::from_millis(500));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_from_file_partial() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"step_delay_ms": 250}}"#).unwrap();

        let config = EngineConfig::from_file(file.path()).unwrap();
        assert_eq!(config.step_delay_ms, 250);
        assert_eq!(config.visit_delay_ms, 500);
        assert_eq!(config.palette.len(), DEFAULT_PALETTE.len());
    }

    #[test]
    fn test_invalid_palette() {
        let mut config = EngineConfig::default();
        config.palette = vec!["#fff".into(), "#fff".into()];
        assert!(matches!(config.validate(), Err(Error::ConfigError(_))));

        config.palette.clear();
        assert!(matches!(config.validate(), Err(Error::ConfigError(_))));
    }
}
