// crates/rb_foundation/src/metrics.rs

//! 基础计数器
//!
//! 提供轻量级的原子计数功能，用于统计原生库加载尝试、驱动能力探测次数、
//! 数据集打开/关闭次数等。

use std::sync::atomic::{AtomicU64, Ordering};

/// 原子计数器（无锁）
#[derive(Debug, Default)]
pub struct Counter(AtomicU64);

impl Counter {
    /// 创建零值计数器
    pub const fn new() -> Self {
        Self(AtomicU64::new(0))
    }

    /// 增加计数
    #[inline]
    pub fn inc(&self) {
        self.0.fetch_add(1, Ordering::Relaxed);
    }

    /// 获取当前值
    #[inline]
    pub fn get(&self) -> u64 {
        self.0.load(Ordering::Relaxed)
    }
}

/// 会话计数快照
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionStats {
    /// 打开次数
    pub opened: u64,
    /// 关闭次数
    pub closed: u64,
}

impl SessionStats {
    /// 当前仍处于打开状态的句柄数
    pub fn outstanding(&self) -> u64 {
        self.opened.saturating_sub(self.closed)
    }
}
