//! sxd-document 辅助函数

use crate::error::{CombineError, Result};
use std::fs;
use std::path::Path;
use sxd_document::dom::{ChildOfElement, ChildOfRoot, Document, Element};
use sxd_document::Package;

/// 解析 XML 文本, path 仅用于错误信息
pub fn parse_str(text: &str, path: &Path) -> Result<Package> {
    sxd_document::parser::parse(text).map_err(|e| CombineError::Xml {
        path: path.to_path_buf(),
        message: format!("{:?}", e),
    })
}

pub fn parse_file(path: &Path) -> Result<Package> {
    let text = fs::read_to_string(path).map_err(|source| CombineError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_str(&text, path)
}

/// 取根元素并校验名字
pub fn root_element<'d>(doc: &Document<'d>, expected: &'static str, path: &Path) -> Result<Element<'d>> {
    let root = doc.root().children().into_iter().find_map(|child| match child {
        ChildOfRoot::Element(e) => Some(e),
        _ => None,
    });

    match root {
        Some(e) if e.name().local_part() == expected => Ok(e),
        Some(e) => Err(CombineError::UnexpectedRoot {
            path: path.to_path_buf(),
            expected,
            found: e.name().local_part().to_string(),
        }),
        None => Err(CombineError::Xml {
            path: path.to_path_buf(),
            message: "document has no root element".to_string(),
        }),
    }
}

/// 指定名字的直接子元素
pub fn child_elements<'d>(element: Element<'d>, name: &str) -> Vec<Element<'d>> {
    element
        .children()
        .into_iter()
        .filter_map(|child| match child {
            ChildOfElement::Element(e) if e.name().local_part() == name => Some(e),
            _ => None,
        })
        .collect()
}

/// 元素内全部文本 (递归)
pub fn text_of(element: Element<'_>) -> String {
    let mut out = String::new();
    collect_text(element, &mut out);
    out
}

fn collect_text(element: Element<'_>, out: &mut String) {
    for child in element.children() {
        match child {
            ChildOfElement::Text(t) => out.push_str(t.text()),
            ChildOfElement::Element(e) => collect_text(e, out),
            _ => {}
        }
    }
}

/// 将 source 深拷贝到目标文档
pub fn copy_element<'d>(doc: &Document<'d>, source: Element<'_>) -> Element<'d> {
    let target = doc.create_element(source.name());

    for attr in source.attributes() {
        target.set_attribute_value(attr.name(), attr.value());
    }

    for child in source.children() {
        match child {
            ChildOfElement::Element(e) => target.append_child(copy_element(doc, e)),
            ChildOfElement::Text(t) => target.append_child(doc.create_text(t.text())),
            ChildOfElement::Comment(c) => target.append_child(doc.create_comment(c.text())),
            ChildOfElement::ProcessingInstruction(pi) => {
                target.append_child(doc.create_processing_instruction(pi.target(), pi.value()))
            }
        }
    }

    target
}
