// crates/rb_native/src/backend.rs

//! 原生后端抽象接口
//!
//! [`NativeBackend`] 描述绑定层需要的全部原生调用：加载库、注册驱动、安装静默
//! 错误处理器、打开/关闭数据集、读取驱动与数据集元数据。
//!
//! - 启用 `gdal` feature 时使用 [`crate::gdal_backend::GdalBackend`]
//! - 否则使用 [`UnlinkedBackend`]，加载总是失败，所有依赖原生库的操作返回 `Unavailable`

use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::fmt;

use crate::error::{NativeError, NativeResult};

/// 数据集访问模式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum AccessMode {
    /// 只读
    #[default]
    ReadOnly,
    /// 读写
    ReadWrite,
}

impl fmt::Display for AccessMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ReadOnly => write!(f, "read-only"),
            Self::ReadWrite => write!(f, "read-write"),
        }
    }
}

/// 原生后端 trait
///
/// 实现者只负责转发原生调用；一次性初始化、会话串行化与能力缓存都由
/// [`crate::NativeLibraryBinding`] 完成。
pub trait NativeBackend: Send + Sync {
    /// 原生数据集句柄
    type Dataset: Send;

    /// 加载原生库
    fn load(&self) -> NativeResult<()>;

    /// 注册全部驱动
    fn register_all(&self);

    /// 安装静默错误处理器，原生诊断输出不再进入默认日志
    fn push_quiet_error_handler(&self);

    /// 打开数据集
    fn open(&self, name: &str, mode: AccessMode) -> NativeResult<Self::Dataset>;

    /// 释放数据集
    fn close(&self, dataset: Self::Dataset);

    /// 驱动默认域的元数据条目，驱动未注册时返回 `None`
    fn driver_metadata(&self, driver: &str) -> Option<Vec<String>>;

    /// 数据集指定域的元数据条目，空字符串表示默认域
    fn metadata(&self, dataset: &Self::Dataset, domain: &str) -> Vec<String>;

    /// 数据集报告的域名列表
    fn metadata_domains(&self, _dataset: &Self::Dataset) -> Vec<String> {
        Vec::new()
    }
}

/// 未链接原生库时的占位后端
#[derive(Debug, Default, Clone, Copy)]
pub struct UnlinkedBackend;

impl NativeBackend for UnlinkedBackend {
    type Dataset = Infallible;

    fn load(&self) -> NativeResult<()> {
        Err(NativeError::Native(
            "built without the `gdal` feature".to_string(),
        ))
    }

    fn register_all(&self) {}

    fn push_quiet_error_handler(&self) {}

    fn open(&self, name: &str, _mode: AccessMode) -> NativeResult<Self::Dataset> {
        Err(NativeError::open_failed(name, "native library is not linked"))
    }

    fn close(&self, dataset: Self::Dataset) {
        match dataset {}
    }

    fn driver_metadata(&self, _driver: &str) -> Option<Vec<String>> {
        None
    }

    fn metadata(&self, dataset: &Self::Dataset, _domain: &str) -> Vec<String> {
        match *dataset {}
    }
}

/// 默认后端
#[cfg(feature = "gdal")]
pub type DefaultBackend = crate::gdal_backend::GdalBackend;

/// 默认后端
#[cfg(not(feature = "gdal"))]
pub type DefaultBackend = UnlinkedBackend;
