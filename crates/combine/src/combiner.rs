use crate::error::{CombineError, Result};
use crate::index::{CompoundKind, CompoundRef, DoxygenIndex};
use crate::xml::{child_elements, copy_element, parse_file, root_element};
use std::collections::HashSet;
use std::path::Path;
use sxd_document::writer::Writer;
use sxd_document::Package;

/// 合并 Doxygen 的逐 compound XML 为单个文档
///
/// 输出形如 `<doxygen version="..."><compounddef/>...</doxygen>`,
/// compounddef 按 index.xml 顺序排列。
pub struct XmlCombiner {
    kinds: Vec<CompoundKind>,
    excluded_kinds: Vec<CompoundKind>,
}

impl XmlCombiner {
    pub fn new() -> Self {
        Self {
            kinds: Vec::new(),
            excluded_kinds: Vec::new(),
        }
    }

    /// 只保留这些类型 (为空时保留全部)
    pub fn with_kinds(mut self, kinds: Vec<CompoundKind>) -> Self {
        self.kinds = kinds;
        self
    }

    pub fn with_excluded_kinds(mut self, kinds: Vec<CompoundKind>) -> Self {
        self.excluded_kinds = kinds;
        self
    }

    #[doc(hidden)]
    pub fn accepts(&self, kind: &CompoundKind) -> bool {
        (self.kinds.is_empty() || self.kinds.contains(kind)) && !self.excluded_kinds.contains(kind)
    }

    /// 过滤并去重后的 compound 列表
    pub fn select<'a>(&self, index: &'a DoxygenIndex) -> Vec<&'a CompoundRef> {
        let mut seen = HashSet::new();
        index
            .compounds
            .iter()
            .filter(|c| self.accepts(&c.kind))
            .filter(|c| seen.insert(c.refid.clone()))
            .collect()
    }

    /// 读取 xml_dir 下的索引与 compound 文件, 返回合并后的 XML
    pub fn combine(&self, xml_dir: &Path) -> Result<String> {
        let index = DoxygenIndex::load(xml_dir)?;
        self.combine_index(&index, xml_dir)
    }

    pub fn combine_index(&self, index: &DoxygenIndex, xml_dir: &Path) -> Result<String> {
        let package = Package::new();
        let doc = package.as_document();

        let root = doc.create_element("doxygen");
        root.set_attribute_value("version", &index.version);
        doc.root().append_child(root);

        let selected = self.select(index);
        tracing::info!(
            "Combining {} of {} compounds from {}",
            selected.len(),
            index.len(),
            xml_dir.display()
        );

        for compound in selected {
            let path = compound.file_in(xml_dir);
            if !path.is_file() {
                return Err(CombineError::MissingCompound {
                    refid: compound.refid.clone(),
                    path,
                });
            }

            let source = parse_file(&path)?;
            let source_doc = source.as_document();
            let source_root = root_element(&source_doc, "doxygen", &path)?;

            let defs = child_elements(source_root, "compounddef");
            if defs.is_empty() {
                tracing::warn!("{} contains no compounddef", path.display());
            }
            for def in defs {
                root.append_child(doc.create_text("\n  "));
                root.append_child(copy_element(&doc, def));
            }
        }
        root.append_child(doc.create_text("\n"));

        let mut out = Vec::new();
        Writer::new()
            .set_single_quotes(false)
            .format_document(&doc, &mut out)?;
        out.push(b'\n');

        Ok(String::from_utf8_lossy(&out).into_owned())
    }
}

impl Default for XmlCombiner {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn index_of(kinds: &[(&str, &str)]) -> DoxygenIndex {
        DoxygenIndex {
            version: "1.9.8".to_string(),
            compounds: kinds
                .iter()
                .map(|(refid, kind)| CompoundRef {
                    refid: refid.to_string(),
                    kind: CompoundKind::from_name(kind),
                    name: refid.to_string(),
                    members: Vec::new(),
                })
                .collect(),
        }
    }

    #[test]
    fn test_accepts_all_by_default() {
        let combiner = XmlCombiner::new();
        assert!(combiner.accepts(&CompoundKind::File));
        assert!(combiner.accepts(&CompoundKind::Other("widget".to_string())));
    }

    #[test]
    fn test_include_and_exclude_kinds() {
        let combiner = XmlCombiner::new()
            .with_kinds(vec![CompoundKind::Struct, CompoundKind::File])
            .with_excluded_kinds(vec![CompoundKind::File]);
        assert!(combiner.accepts(&CompoundKind::Struct));
        assert!(!combiner.accepts(&CompoundKind::File));
        assert!(!combiner.accepts(&CompoundKind::Class));
    }

    #[test]
    fn test_select_deduplicates_in_index_order() {
        let index = index_of(&[("b", "struct"), ("a", "file"), ("b", "struct"), ("d", "dir")]);
        let combiner = XmlCombiner::new().with_excluded_kinds(vec![CompoundKind::Dir]);
        let refids: Vec<_> = combiner.select(&index).into_iter().map(|c| c.refid.as_str()).collect();
        assert_eq!(refids, vec!["b", "a"]);
    }

    #[test]
    fn test_combine_empty_selection() {
        let dir = tempfile::tempdir().unwrap();
        let index = index_of(&[("a", "file")]);
        let xml = XmlCombiner::new()
            .with_kinds(vec![CompoundKind::Class])
            .combine_index(&index, dir.path())
            .unwrap();

        assert!(xml.starts_with("<?xml"));
        assert!(xml.contains("<doxygen version=\"1.9.8\">"));
        assert!(!xml.contains("compounddef"));
    }

    #[test]
    fn test_combine_missing_compound() {
        let dir = tempfile::tempdir().unwrap();
        let index = index_of(&[("ghost", "file")]);
        let err = XmlCombiner::new().combine_index(&index, dir.path()).unwrap_err();
        assert!(matches!(err, CombineError::MissingCompound { refid, .. } if refid == "ghost"));
    }
}
