// apps/rb_cli/src/commands/info.rs

//! 信息显示命令
//!
//! 显示原生库可用性、会话统计与当前配置。

use anyhow::{Context, Result};
use clap::Args;
use rb_native::{DefaultBackend, NativeLibraryBinding};
use std::path::PathBuf;
use tracing::info;

/// 信息显示参数
#[derive(Args)]
pub struct InfoArgs {
    /// 以 JSON 输出当前配置
    #[arg(long)]
    pub json: bool,

    /// 把当前配置保存到文件
    #[arg(long)]
    pub save_config: Option<PathBuf>,
}

/// 执行信息命令
pub fn execute(binding: &NativeLibraryBinding<DefaultBackend>, args: InfoArgs) -> Result<()> {
    info!("=== RasterBridge 信息 ===");

    let config = binding.config();

    if args.json {
        println!("{}", serde_json::to_string_pretty(config)?);
    } else {
        println!("=== 原生库 ===");
        println!("RasterBridge CLI 版本: {}", env!("CARGO_PKG_VERSION"));
        println!("原生库: {}", config.library_name);
        println!(
            "编译时链接: {}",
            if cfg!(feature = "gdal") { "是" } else { "否" }
        );
        println!("可用: {}", if binding.is_available() { "✓" } else { "✗" });
        println!("加载尝试次数: {}", binding.load_attempts());

        println!("\n=== 配置 ===");
        println!("原生诊断输出: {}", config.native_debug);
        println!("内存数据集上限: {} 字节", config.memory_raster_max_size);
    }

    if let Some(path) = &args.save_config {
        config
            .save_to_file(path)
            .with_context(|| format!("无法保存配置到 {}", path.display()))?;
        info!("配置已保存到 {}", path.display());
    }

    Ok(())
}
