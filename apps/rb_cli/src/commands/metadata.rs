// apps/rb_cli/src/commands/metadata.rs

//! 元数据命令
//!
//! 列出某个域的条目、查找单个键、列出子数据集，
//! 或把影像属性渲染为属性树。

use anyhow::{bail, Result};
use clap::Args;
use rb_imageio::{
    AttributeProfile, DatasetAttributeSource, ImageAttributeMetadata, COMMON_FORMAT_NAME,
};
use rb_native::{AccessMode, DefaultBackend, MetadataDomain, NativeLibraryBinding};
use tracing::info;

/// 元数据参数
#[derive(Args)]
pub struct MetadataArgs {
    /// 数据集名称（文件路径或子数据集名）
    pub dataset: String,

    /// 元数据域，缺省为默认域
    #[arg(short, long)]
    pub domain: Option<String>,

    /// 只输出该键的值
    #[arg(short, long)]
    pub key: Option<String>,

    /// 列出子数据集
    #[arg(long)]
    pub stream: bool,

    /// 输出第 N 幅影像的属性树（JSON）
    #[arg(long, value_name = "IMAGE")]
    pub attributes: Option<usize>,

    /// 属性树格式名，缺省为通用格式
    #[arg(long, requires = "attributes")]
    pub format: Option<String>,
}

/// 执行元数据命令
pub fn execute(binding: &NativeLibraryBinding<DefaultBackend>, args: MetadataArgs) -> Result<()> {
    if let Some(image) = args.attributes {
        return print_attributes(binding, &args.dataset, image, args.format.as_deref());
    }

    if args.stream {
        let stream = binding.stream_metadata(&args.dataset)?;
        let subdatasets = stream.subdatasets();
        if subdatasets.is_empty() {
            info!("{} 不包含子数据集", args.dataset);
        }
        for sub in subdatasets {
            match &sub.description {
                Some(desc) => println!("[{}] {}  {}", sub.index, sub.name, desc),
                None => println!("[{}] {}", sub.index, sub.name),
            }
        }
        return Ok(());
    }

    let domain = args
        .domain
        .as_deref()
        .map(MetadataDomain::parse)
        .unwrap_or_default();

    if let Some(key) = &args.key {
        match binding.domain_metadata(&args.dataset, &domain)?.lookup(key) {
            Some(value) => println!("{value}"),
            None => bail!("{} 的 {} 域中没有键 {}", args.dataset, domain, key),
        }
        return Ok(());
    }

    binding.with_dataset(&args.dataset, AccessMode::ReadOnly, |handle| {
        let list = handle.metadata(&domain)?;
        if let Some(xml) = list.xml_document() {
            println!("{xml}");
        } else {
            for entry in list.entries() {
                println!("{entry}");
            }
        }
        if args.domain.is_none() {
            let domains = handle.metadata_domains()?;
            if !domains.is_empty() {
                let names: Vec<String> = domains.iter().map(|d| format!("'{d}'")).collect();
                info!("可用域: {}", names.join(", "));
            }
        }
        Ok::<_, anyhow::Error>(())
    })
}

fn print_attributes(
    binding: &NativeLibraryBinding<DefaultBackend>,
    dataset: &str,
    image: usize,
    format: Option<&str>,
) -> Result<()> {
    let source = DatasetAttributeSource::load(binding, dataset)?;
    if image >= source.image_count() {
        bail!("{dataset} 只有 {} 幅影像", source.image_count());
    }

    let metadata = ImageAttributeMetadata::from_source(&source, image, AttributeProfile::hdf4_aps());
    let tree = metadata.as_tree(format.unwrap_or(COMMON_FORMAT_NAME))?;
    println!("{}", serde_json::to_string_pretty(tree)?);
    Ok(())
}
