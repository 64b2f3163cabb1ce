// apps/rb_cli/src/commands/color_model.rs

//! 颜色模型命令

use anyhow::{bail, Result};
use clap::Args;
use rb_imageio::{derive_color_model, ComponentHeuristic, SampleLayout, SampleType};
use tracing::info;

/// 颜色模型参数
#[derive(Args)]
pub struct ColorModelArgs {
    /// 波段数
    #[arg(short, long, default_value_t = 1)]
    pub bands: usize,

    /// 采样类型 (byte, ushort, short, int, float, double 或原生类型名)
    #[arg(short = 't', long = "type", default_value = "byte")]
    pub sample_type: String,
}

/// 执行颜色模型命令
pub fn execute(args: ColorModelArgs) -> Result<()> {
    let sample_type: SampleType = args.sample_type.parse()?;
    let layout = SampleLayout::new(args.bands, sample_type);

    let Some(model) = derive_color_model(&layout, &ComponentHeuristic) else {
        bail!(
            "{} 波段 {} 采样没有可用的颜色模型",
            layout.bands,
            sample_type.native_data_type()
        );
    };

    info!(
        bands = layout.bands,
        bits_per_sample = sample_type.bits(),
        "derived color model"
    );
    println!("{}", serde_json::to_string_pretty(&model)?);
    Ok(())
}
