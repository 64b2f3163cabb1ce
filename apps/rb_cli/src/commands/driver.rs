// apps/rb_cli/src/commands/driver.rs

//! 驱动能力命令

use anyhow::{bail, Result};
use clap::Args;
use rb_foundation::RbError;
use rb_native::{DefaultBackend, NativeLibraryBinding};
use tracing::warn;

/// 驱动能力参数
#[derive(Args)]
pub struct DriverArgs {
    /// 驱动名称，如 GTiff、JP2KAK、HDF4
    #[arg(required = true)]
    pub names: Vec<String>,

    /// 预计写入字节数，给出时同时显示写入策略
    #[arg(short, long)]
    pub size: Option<u64>,
}

/// 执行驱动能力命令
pub fn execute(binding: &NativeLibraryBinding<DefaultBackend>, args: DriverArgs) -> Result<()> {
    if !binding.is_available() {
        bail!(RbError::unavailable(binding.config().library_name.as_str()));
    }

    let mut failures = 0usize;
    for name in &args.names {
        match binding.capability_of(name) {
            Ok(capability) => match args.size {
                Some(bytes) => {
                    let strategy = binding.creation_strategy(name, bytes)?;
                    println!("{name}: {capability} ({strategy:?})");
                }
                None => println!("{name}: {capability}"),
            },
            Err(e) => {
                let e = RbError::from(e);
                // 契约违例说明调用方有误，不再继续查询
                if e.category().is_contract_violation() {
                    return Err(e.into());
                }
                warn!(driver = %name, category = ?e.category(), "{e}");
                failures += 1;
            }
        }
    }

    if failures > 0 {
        bail!("{failures} 个驱动查询失败");
    }
    Ok(())
}
