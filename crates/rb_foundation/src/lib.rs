// crates/rb_foundation/src/lib.rs

//! RasterBridge Foundation Layer
//!
//! 基础层，提供整个项目共享的错误类型与计数器。
//!
//! # 模块概览
//!
//! - [`error`]: 统一错误类型与错误类别
//! - [`metrics`]: 原子计数器
//!
//! # 层级架构
//!
//! ```text
//! Layer 5: rb_cli
//! Layer 4: rb_imageio    ─> 颜色模型、属性类型校验、影像元数据
//! Layer 3: rb_native     ─> 原生库绑定、数据集句柄、驱动能力缓存
//! Layer 2: rb_config     ─> BridgeConfig
//! Layer 1: rb_foundation (本层)
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod metrics;

// 重导出常用类型
pub use error::{ErrorCategory, RbError, RbResult};
pub use metrics::{Counter, SessionStats};

/// 条件不满足时提前返回错误
///
/// ```
/// use rb_foundation::{ensure, RbError, RbResult};
///
/// fn check(bands: usize) -> RbResult<()> {
///     ensure!(bands > 0, RbError::invalid_argument("波段数为零"));
///     Ok(())
/// }
/// assert!(check(0).is_err());
/// ```
#[macro_export]
macro_rules! ensure {
    ($cond:expr, $err:expr) => {
        if !$cond {
            return Err($err.into());
        }
    };
}
