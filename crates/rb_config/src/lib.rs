// crates/rb_config/src/lib.rs

//! RasterBridge Config Layer (Layer 2)
//!
//! 配置层，提供原生库绑定所需的外部参数。
//!
//! # 模块概览
//!
//! - [`bridge_config`]: BridgeConfig（环境变量 / JSON 文件）
//! - [`error`]: 配置错误类型

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod bridge_config;
pub mod error;

/// 层级标识
pub const LAYER: u8 = 2;

// 重导出核心类型
pub use bridge_config::{is_affirmative, BridgeConfig};
pub use error::ConfigError;
