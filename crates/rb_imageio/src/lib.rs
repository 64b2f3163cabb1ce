// crates/rb_imageio/src/lib.rs

//! RasterBridge 影像 I/O 层 (Layer 4)
//!
//! 面向影像 I/O 宿主的一侧：采样布局到颜色模型的推导、
//! 带类型校验的属性写入、逐影像属性元数据及其属性树。
//!
//! # 模块
//!
//! - [`color_model`]: 采样类型、布局与颜色模型推导
//! - [`attribute`]: 属性声明类型与校验写入
//! - [`node`]: 元数据树节点
//! - [`image_metadata`]: 影像属性元数据
//! - [`error`]: 错误类型

#![warn(clippy::all)]

pub mod attribute;
pub mod color_model;
pub mod error;
pub mod image_metadata;
pub mod node;

/// 层级标识
pub const LAYER: u8 = 4;

pub use attribute::{set_typed_attribute, AttributeType};
pub use color_model::{
    derive_color_model, ColorModel, ColorSpace, ComponentHeuristic, Construction,
    MultiBandColorModels, SampleLayout, SampleType, Transparency,
};
pub use error::{MetadataError, MetadataResult};
pub use image_metadata::{
    AttributeProfile, AttributeSource, DatasetAttributeSource, ImageAttributeMetadata,
    ATTRIBUTES_NODE, COMMON_FORMAT_NAME,
};
pub use node::MetadataNode;
