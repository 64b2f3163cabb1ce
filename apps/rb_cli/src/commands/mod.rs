// apps/rb_cli/src/commands/mod.rs

//! 命令实现

pub mod color_model;
pub mod driver;
pub mod info;
pub mod metadata;
