// apps/rb_cli/src/main.rs

//! RasterBridge 命令行界面
//!
//! 检查原生库可用性、驱动写入能力与数据集元数据。
//!
//! # 架构层级
//!
//! 本模块属于 **Layer 5: Application**，只使用默认后端
//! `NativeLibraryBinding<DefaultBackend>`，不暴露泛型参数。

mod commands;

use anyhow::Context;
use clap::{Parser, Subcommand};
use rb_config::BridgeConfig;
use rb_native::{DefaultBackend, NativeLibraryBinding};
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

/// RasterBridge 原生栅格库检查工具
#[derive(Parser)]
#[command(name = "rb_cli")]
#[command(author = "RasterBridge Team")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Inspect the native raster library binding", long_about = None)]
struct Cli {
    /// 日志级别 (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,

    /// 配置文件路径（缺省时读取环境变量）
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// 显示原生库与配置信息
    Info(commands::info::InfoArgs),
    /// 查询驱动写入能力
    Driver(commands::driver::DriverArgs),
    /// 读取数据集元数据
    Metadata(commands::metadata::MetadataArgs),
    /// 推导采样布局的颜色模型
    ColorModel(commands::color_model::ColorModelArgs),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // 初始化日志
    let level = match cli.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let owned;
    let binding: &NativeLibraryBinding<DefaultBackend> = match &cli.config {
        Some(path) => {
            let config = BridgeConfig::from_file(path)
                .with_context(|| format!("无法加载配置文件 {}", path.display()))?;
            owned = NativeLibraryBinding::new(DefaultBackend::default(), config);
            &owned
        }
        None => NativeLibraryBinding::global(),
    };

    // 执行命令
    match cli.command {
        Commands::Info(args) => commands::info::execute(binding, args),
        Commands::Driver(args) => commands::driver::execute(binding, args),
        Commands::Metadata(args) => commands::metadata::execute(binding, args),
        Commands::ColorModel(args) => commands::color_model::execute(args),
    }
}
