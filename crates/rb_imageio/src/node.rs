// crates/rb_imageio/src/node.rs

//! 元数据树节点

use serde::Serialize;

/// 元数据树节点
///
/// 属性按插入顺序保存，同名属性再次设置时原位覆盖。
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct MetadataNode {
    name: String,
    attributes: Vec<(String, String)>,
    children: Vec<MetadataNode>,
}

impl MetadataNode {
    /// 创建空节点
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    /// 节点名称
    pub fn name(&self) -> &str {
        &self.name
    }

    /// 设置属性
    pub fn set_attribute(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.attributes.iter_mut().find(|(n, _)| *n == name) {
            Some(slot) => slot.1 = value,
            None => self.attributes.push((name, value)),
        }
    }

    /// 读取属性
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// 全部属性
    pub fn attributes(&self) -> &[(String, String)] {
        &self.attributes
    }

    /// 追加子节点
    pub fn append_child(&mut self, child: MetadataNode) {
        self.children.push(child);
    }

    /// 子节点
    pub fn children(&self) -> &[MetadataNode] {
        &self.children
    }

    /// 第一个同名子节点
    pub fn child(&self, name: &str) -> Option<&MetadataNode> {
        self.children.iter().find(|c| c.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_attribute_overwrites_in_place() {
        let mut node = MetadataNode::new("BandInfo");
        node.set_attribute("scale", "1.0");
        node.set_attribute("offset", "0");
        node.set_attribute("scale", "2.0");

        assert_eq!(node.attribute("scale"), Some("2.0"));
        assert_eq!(node.attributes()[0].0, "scale");
        assert_eq!(node.attributes().len(), 2);
    }

    #[test]
    fn test_children() {
        let mut root = MetadataNode::new("root");
        root.append_child(MetadataNode::new("Attributes"));
        assert!(root.child("Attributes").is_some());
        assert!(root.child("Missing").is_none());
    }
}
