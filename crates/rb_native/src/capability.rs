// crates/rb_native/src/capability.rs

//! 驱动写入能力
//!
//! 每个驱动的写入能力分为三级：`Create` ⊃ `CreateCopy` ⊃ `ReadOnly`。
//! 能力由驱动元数据中的 `DCAP_CREATE` 与 `DCAP_CREATECOPY` 标志决定，
//! 首次查询后缓存，进程内不再重新计算。

use parking_lot::RwLock;
use rb_config::is_affirmative;
use rb_foundation::Counter;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use tracing::debug;

use crate::domain::lookup;
use crate::error::NativeResult;

/// 驱动元数据中的 Create 标志
pub const DCAP_CREATE: &str = "DCAP_CREATE";
/// 驱动元数据中的 CreateCopy 标志
pub const DCAP_CREATECOPY: &str = "DCAP_CREATECOPY";

/// 驱动写入能力，按能力递减排序
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DriverCapability {
    /// 支持直接创建数据集
    Create,
    /// 仅支持从已有数据集复制创建
    CreateCopy,
    /// 只读
    ReadOnly,
}

impl DriverCapability {
    /// 由两个标志分类，`Create` 优先于 `CreateCopy`
    pub fn from_flags(create: bool, create_copy: bool) -> Self {
        if create {
            Self::Create
        } else if create_copy {
            Self::CreateCopy
        } else {
            Self::ReadOnly
        }
    }

    /// 由驱动默认域元数据分类
    pub fn from_driver_metadata<S: AsRef<str>>(entries: &[S]) -> Self {
        let flag = |key: &str| lookup(entries, key).is_some_and(is_affirmative);
        Self::from_flags(flag(DCAP_CREATE), flag(DCAP_CREATECOPY))
    }

    /// 名称
    pub fn name(&self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::CreateCopy => "create-copy",
            Self::ReadOnly => "read-only",
        }
    }
}

impl fmt::Display for DriverCapability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// 写入策略
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CreationStrategy {
    /// 直接用目标驱动创建
    Direct,
    /// 先写入内存数据集，再 CreateCopy
    CopyFromMemory,
    /// 数据过大，先写入临时文件，再 CreateCopy
    CopyFromTempFile,
    /// 驱动不可写
    NotWritable,
}

impl CreationStrategy {
    /// 根据驱动能力和预估字节数选择写入策略
    ///
    /// 预估大小不超过 `memory_limit` 时允许使用内存数据集。
    pub fn choose(capability: DriverCapability, estimated_bytes: u64, memory_limit: u64) -> Self {
        match capability {
            DriverCapability::Create => Self::Direct,
            DriverCapability::CreateCopy if estimated_bytes <= memory_limit => {
                Self::CopyFromMemory
            }
            DriverCapability::CreateCopy => Self::CopyFromTempFile,
            DriverCapability::ReadOnly => Self::NotWritable,
        }
    }
}

/// 驱动能力缓存
///
/// 条目只增不改。查找先走读锁；未命中时在写锁内再次检查后探测，
/// 保证同一驱动最多探测一次，读者不会看到半初始化的条目。
#[derive(Debug, Default)]
pub struct DriverCapabilityCache {
    entries: RwLock<HashMap<String, DriverCapability>>,
    discoveries: Counter,
}

impl DriverCapabilityCache {
    /// 创建空缓存
    pub fn new() -> Self {
        Self::default()
    }

    /// 已缓存的能力
    pub fn get(&self, driver: &str) -> Option<DriverCapability> {
        self.entries.read().get(driver).copied()
    }

    /// 查找或探测
    ///
    /// `discover` 失败时不写入缓存，错误原样返回。
    pub fn get_or_discover<F>(&self, driver: &str, discover: F) -> NativeResult<DriverCapability>
    where
        F: FnOnce(&str) -> NativeResult<DriverCapability>,
    {
        if let Some(capability) = self.get(driver) {
            return Ok(capability);
        }

        let mut entries = self.entries.write();
        if let Some(capability) = entries.get(driver) {
            return Ok(*capability);
        }

        let capability = discover(driver)?;
        self.discoveries.inc();
        debug!(driver, %capability, "driver capability discovered");
        entries.insert(driver.to_string(), capability);
        Ok(capability)
    }

    /// 缓存条目数
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// 是否为空
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    /// 累计探测次数
    pub fn discoveries(&self) -> u64 {
        self.discoveries.get()
    }
}
