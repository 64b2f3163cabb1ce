// crates/rb_config/src/bridge_config.rs

//! BridgeConfig - 原生库绑定配置
//!
//! 外部可提供的两个参数：
//!
//! - 是否显示原生库诊断输出（环境变量 `CPL_DEBUG`）
//! - 内存数据集的最大字节数，超过时写入改用临时文件再 CreateCopy
//!   （环境变量 `RB_MEMORY_RASTER_MAX_SIZE`）
//!
//! 也可以从 JSON 文件加载。

use rb_foundation::ensure;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::ConfigError;

/// 诊断开关环境变量
pub const NATIVE_DEBUG_ENV: &str = "CPL_DEBUG";

/// 内存数据集上限环境变量
pub const MEMORY_RASTER_MAX_SIZE_ENV: &str = "RB_MEMORY_RASTER_MAX_SIZE";

/// 默认内存数据集上限 (32 MiB)
pub const DEFAULT_MEMORY_RASTER_MAX_SIZE: u64 = 32 * 1024 * 1024;

/// 判断字符串是否为肯定值：`ON`、`TRUE`、`YES`（不区分大小写）
///
/// 空值或其他内容一律视为否定。
pub fn is_affirmative(value: &str) -> bool {
    let value = value.trim();
    ["ON", "TRUE", "YES"]
        .iter()
        .any(|token| value.eq_ignore_ascii_case(token))
}

/// 原生库绑定配置
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BridgeConfig {
    /// 原生库名称（仅用于日志与错误信息）
    #[serde(default = "default_library_name")]
    pub library_name: String,

    /// 是否显示原生库诊断输出
    #[serde(default)]
    pub native_debug: bool,

    /// 内存数据集最大字节数
    #[serde(default = "default_memory_raster_max_size")]
    pub memory_raster_max_size: u64,
}

fn default_library_name() -> String {
    "gdal".to_string()
}

fn default_memory_raster_max_size() -> u64 {
    DEFAULT_MEMORY_RASTER_MAX_SIZE
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            library_name: default_library_name(),
            native_debug: false,
            memory_raster_max_size: default_memory_raster_max_size(),
        }
    }
}

impl BridgeConfig {
    /// 从环境变量构建配置
    ///
    /// 未设置的变量使用默认值；`RB_MEMORY_RASTER_MAX_SIZE` 无法解析时报错。
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// 从任意键值来源构建配置
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(debug) = lookup(NATIVE_DEBUG_ENV) {
            config.native_debug = is_affirmative(&debug);
        }

        if let Some(raw) = lookup(MEMORY_RASTER_MAX_SIZE_ENV) {
            config.memory_raster_max_size =
                raw.trim().parse().map_err(|_| ConfigError::InvalidValue {
                    key: MEMORY_RASTER_MAX_SIZE_ENV.to_string(),
                    value: raw.clone(),
                    reason: "不是有效的字节数".to_string(),
                })?;
        }

        config.validate()?;
        Ok(config)
    }

    /// 从文件加载配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(ConfigError::Io)?;

        let config: BridgeConfig =
            serde_json::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()))?;

        config.validate()?;
        Ok(config)
    }

    /// 验证配置有效性
    pub fn validate(&self) -> Result<(), ConfigError> {
        ensure!(
            self.memory_raster_max_size > 0,
            ConfigError::InvalidValue {
                key: "memory_raster_max_size".to_string(),
                value: self.memory_raster_max_size.to_string(),
                reason: "必须为正".to_string(),
            }
        );

        ensure!(
            !self.library_name.trim().is_empty(),
            ConfigError::InvalidValue {
                key: "library_name".to_string(),
                value: self.library_name.clone(),
                reason: "不能为空".to_string(),
            }
        );

        Ok(())
    }

    /// 保存配置到文件
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let content =
            serde_json::to_string_pretty(self).map_err(|e| ConfigError::Parse(e.to_string()))?;
        std::fs::write(path, content).map_err(ConfigError::Io)?;
        tracing::debug!("配置已保存");
        Ok(())
    }
}
