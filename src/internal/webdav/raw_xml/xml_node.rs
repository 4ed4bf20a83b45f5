//! 与命名空间无关的轻量 XML 树。
//!
//! 服务器返回的元素前缀并不统一（`D:`、`d:`、`lp1:` 或默认命名空间），
//! 所以建树时只保留元素的本地名，查找时也只比较本地名。

use quick_xml::Reader;
use quick_xml::escape::resolve_predefined_entity;
use quick_xml::events::{BytesRef, Event};

use crate::internal::errors::{WebdavError, WebdavResult};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct XmlNode {
    /// 去掉前缀后的本地名
    pub name: String,
    /// 直接包含的文本（多段文本会拼接）
    pub text: String,
    pub children: Vec<XmlNode>,
}

impl XmlNode {
    fn new(name: String) -> Self {
        Self {
            name,
            ..Self::default()
        }
    }

    /// 解析整个文档并返回根元素
    pub fn parse(body: &[u8]) -> WebdavResult<Self> {
        let mut reader = Reader::from_reader(body);
        let decoder = reader.decoder();
        let mut buf = Vec::new();

        // 栈底是一个虚拟节点，用来收集顶层元素
        let mut stack: Vec<XmlNode> = vec![XmlNode::default()];

        loop {
            match reader.read_event_into(&mut buf) {
                Ok(Event::Start(ref e)) => {
                    let local_name = e.local_name();
                    let name = decoder.decode(local_name.as_ref()).map_err(xml_error)?;
                    stack.push(XmlNode::new(name.into_owned()));
                }
                Ok(Event::Empty(ref e)) => {
                    let local_name = e.local_name();
                    let name = decoder.decode(local_name.as_ref()).map_err(xml_error)?;
                    if let Some(parent) = stack.last_mut() {
                        parent.children.push(XmlNode::new(name.into_owned()));
                    }
                }
                Ok(Event::End(_)) => {
                    if stack.len() < 2 {
                        return Err(WebdavError::Xml("多余的结束标签".to_string()));
                    }
                    if let (Some(node), Some(parent)) = (stack.pop(), stack.last_mut()) {
                        parent.children.push(node);
                    }
                }
                Ok(Event::Text(ref t)) => {
                    let text = t.decode().map_err(xml_error)?;
                    if let Some(node) = stack.last_mut() {
                        node.text.push_str(&text);
                    }
                }
                Ok(Event::CData(ref t)) => {
                    let text = t.decode().map_err(xml_error)?;
                    if let Some(node) = stack.last_mut() {
                        node.text.push_str(&text);
                    }
                }
                Ok(Event::GeneralRef(ref r)) => {
                    let resolved = resolve_reference(r)?;
                    if let Some(node) = stack.last_mut() {
                        node.text.push_str(&resolved);
                    }
                }
                Ok(Event::Eof) => break,
                Err(e) => return Err(xml_error(e)),
                _ => {}
            }
            buf.clear();
        }

        if stack.len() != 1 {
            return Err(WebdavError::Xml("文档提前结束，存在未闭合的元素".to_string()));
        }

        stack
            .pop()
            .and_then(|document| document.children.into_iter().next())
            .ok_or_else(|| WebdavError::Xml("文档中没有根元素".to_string()))
    }

    /// 第一个本地名匹配的直接子元素
    pub fn child(&self, name: &str) -> Option<&XmlNode> {
        self.children.iter().find(|c| c.name == name)
    }

    /// 按 `a/b/c` 形式的相对路径查找第一个匹配的后代。
    ///
    /// 每一级都会尝试所有同名子元素（例如多个 propstat），直到找到完整路径。
    pub fn find(&self, path: &str) -> Option<&XmlNode> {
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        self.find_segments(&segments)
    }

    fn find_segments(&self, segments: &[&str]) -> Option<&XmlNode> {
        let Some((first, rest)) = segments.split_first() else {
            return Some(self);
        };
        self.children
            .iter()
            .filter(|c| c.name == *first)
            .find_map(|c| c.find_segments(rest))
    }

    /// 文档顺序中所有本地名匹配的元素，匹配到的元素内部不再继续向下找
    pub fn descendants(&self, name: &str) -> Vec<&XmlNode> {
        let mut found = Vec::new();
        self.collect_descendants(name, &mut found);
        found
    }

    fn collect_descendants<'a>(&'a self, name: &str, found: &mut Vec<&'a XmlNode>) {
        for child in &self.children {
            if child.name == name {
                found.push(child);
            } else {
                child.collect_descendants(name, found);
            }
        }
    }

    /// 去掉首尾空白后的文本
    pub fn text(&self) -> &str {
        self.text.trim()
    }
}

fn xml_error(e: impl std::fmt::Display) -> WebdavError {
    WebdavError::Xml(e.to_string())
}

/// 字符引用与五个预定义实体交给 quick-xml 解析，未知实体原样保留
fn resolve_reference(r: &BytesRef<'_>) -> WebdavResult<String> {
    if let Some(c) = r.resolve_char_ref().map_err(xml_error)? {
        return Ok(c.to_string());
    }

    let name = r.decode().map_err(xml_error)?;
    match resolve_predefined_entity(&name) {
        Some(value) => Ok(value.to_string()),
        None => {
            tracing::debug!(entity = %name, "未知实体，原样保留");
            Ok(format!("&{name};"))
        }
    }
}
