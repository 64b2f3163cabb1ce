// crates/rb_native/src/lib.rs

//! RasterBridge 原生绑定层 (Layer 3)
//!
//! 把 GDAL 这类带手动资源生命周期的原生库安全地暴露给上层影像 I/O。
//!
//! # 模块
//!
//! - [`backend`]: 原生后端 trait 与未链接时的占位实现
//! - [`binding`]: 一次性初始化、会话串行化、元数据便捷读取
//! - [`dataset`]: 独占数据集句柄
//! - [`capability`]: 驱动写入能力与缓存、写入策略
//! - [`domain`]: 元数据域与 `key=value` 条目查找
//! - [`error`]: 错误类型
//!
//! # 可选依赖
//!
//! - `gdal`: 链接系统 GDAL 库；未启用时原生库始终不可用
//!
//! # 使用示例
//!
//! ```rust,ignore
//! use rb_native::{AccessMode, MetadataDomain, NativeLibraryBinding};
//!
//! let binding = NativeLibraryBinding::global();
//! if binding.is_available() {
//!     let capability = binding.capability_of("GTiff")?;
//!     let structure = binding.with_dataset("dem.tif", AccessMode::ReadOnly, |ds| {
//!         ds.metadata(&MetadataDomain::ImageStructure)
//!     })?;
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod backend;
pub mod binding;
pub mod capability;
pub mod dataset;
pub mod domain;
pub mod error;
#[cfg(feature = "gdal")]
pub mod gdal_backend;

/// 层级标识
pub const LAYER: u8 = 3;

// 重导出常用类型
pub use backend::{AccessMode, DefaultBackend, NativeBackend, UnlinkedBackend};
pub use binding::NativeLibraryBinding;
pub use capability::{CreationStrategy, DriverCapability, DriverCapabilityCache};
pub use dataset::DatasetHandle;
pub use domain::{lookup, MetadataDomain, MetadataList, Subdataset};
pub use error::{NativeError, NativeResult};
#[cfg(feature = "gdal")]
pub use gdal_backend::GdalBackend;
