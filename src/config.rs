//! 运行配置

use std::time::Duration;

/// 提取配置, 命令行参数可覆盖
#[derive(Debug, Clone)]
pub struct ExtractConfig {
    pub doxygen: String,
    pub keep_temp: bool,
    pub timeout: Duration,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            doxygen: "doxygen".to_string(),
            keep_temp: false,
            timeout: Duration::from_secs(300),
        }
    }
}

impl ExtractConfig {
    /// 从环境变量加载配置
    pub fn from_env() -> Self {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    fn from_vars(var: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(v) = var("DOXML_DOXYGEN") {
            if !v.trim().is_empty() {
                config.doxygen = v;
            }
        }

        if let Some(v) = var("DOXML_KEEP_TEMP") {
            config.keep_temp = matches!(v.as_str(), "1" | "true" | "yes");
        }

        if let Some(v) = var("DOXML_TIMEOUT") {
            match v.parse::<u64>() {
                Ok(secs) if secs > 0 => config.timeout = Duration::from_secs(secs),
                _ => tracing::warn!("Ignoring invalid DOXML_TIMEOUT: {}", v),
            }
        }

        config
    }
}
