use crate::error::Result;
use crate::xml::{child_elements, parse_file, parse_str, root_element, text_of};
use serde::{Serialize, Serializer};
use std::fmt;
use std::path::{Path, PathBuf};

pub const INDEX_FILE: &str = "index.xml";

/// Doxygen compound 类型
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CompoundKind {
    Class,
    Struct,
    Union,
    Interface,
    Protocol,
    Category,
    Exception,
    Service,
    Singleton,
    Module,
    Type,
    File,
    Namespace,
    Group,
    Page,
    Example,
    Dir,
    Concept,
    /// 未知类型, 保留原始名字
    Other(String),
}

impl CompoundKind {
    pub const KNOWN: [CompoundKind; 18] = [
        CompoundKind::Class,
        CompoundKind::Struct,
        CompoundKind::Union,
        CompoundKind::Interface,
        CompoundKind::Protocol,
        CompoundKind::Category,
        CompoundKind::Exception,
        CompoundKind::Service,
        CompoundKind::Singleton,
        CompoundKind::Module,
        CompoundKind::Type,
        CompoundKind::File,
        CompoundKind::Namespace,
        CompoundKind::Group,
        CompoundKind::Page,
        CompoundKind::Example,
        CompoundKind::Dir,
        CompoundKind::Concept,
    ];

    pub fn from_name(name: &str) -> Self {
        Self::KNOWN
            .into_iter()
            .find(|k| k.as_str() == name)
            .unwrap_or_else(|| CompoundKind::Other(name.to_string()))
    }

    pub fn as_str(&self) -> &str {
        match self {
            CompoundKind::Class => "class",
            CompoundKind::Struct => "struct",
            CompoundKind::Union => "union",
            CompoundKind::Interface => "interface",
            CompoundKind::Protocol => "protocol",
            CompoundKind::Category => "category",
            CompoundKind::Exception => "exception",
            CompoundKind::Service => "service",
            CompoundKind::Singleton => "singleton",
            CompoundKind::Module => "module",
            CompoundKind::Type => "type",
            CompoundKind::File => "file",
            CompoundKind::Namespace => "namespace",
            CompoundKind::Group => "group",
            CompoundKind::Page => "page",
            CompoundKind::Example => "example",
            CompoundKind::Dir => "dir",
            CompoundKind::Concept => "concept",
            CompoundKind::Other(name) => name,
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, CompoundKind::Other(_))
    }
}

impl fmt::Display for CompoundKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for CompoundKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// index.xml 中的成员引用
#[derive(Debug, Clone, Serialize)]
pub struct MemberRef {
    pub refid: String,
    pub kind: String,
    pub name: String,
}

/// index.xml 中的 compound 引用, 对应 `<refid>.xml`
#[derive(Debug, Clone, Serialize)]
pub struct CompoundRef {
    pub refid: String,
    pub kind: CompoundKind,
    pub name: String,
    pub members: Vec<MemberRef>,
}

impl CompoundRef {
    /// compound 文件路径
    pub fn file_in(&self, xml_dir: &Path) -> PathBuf {
        xml_dir.join(format!("{}.xml", self.refid))
    }
}

/// Doxygen XML 索引
#[derive(Debug, Clone, Serialize)]
pub struct DoxygenIndex {
    pub version: String,
    pub compounds: Vec<CompoundRef>,
}

impl DoxygenIndex {
    /// 读取 xml_dir/index.xml
    pub fn load(xml_dir: &Path) -> Result<Self> {
        let path = xml_dir.join(INDEX_FILE);
        let package = parse_file(&path)?;
        Self::from_package(&package, &path)
    }

    pub fn parse(text: &str) -> Result<Self> {
        let path = Path::new(INDEX_FILE);
        let package = parse_str(text, path)?;
        Self::from_package(&package, path)
    }

    fn from_package(package: &sxd_document::Package, path: &Path) -> Result<Self> {
        let doc = package.as_document();
        let root = root_element(&doc, "doxygenindex", path)?;

        let version = root.attribute_value("version").unwrap_or_default().to_string();
        let mut compounds = Vec::new();

        for compound in child_elements(root, "compound") {
            let Some(refid) = compound.attribute_value("refid") else {
                tracing::warn!("Skipping compound without refid in {}", path.display());
                continue;
            };

            let members = child_elements(compound, "member")
                .into_iter()
                .map(|m| MemberRef {
                    refid: m.attribute_value("refid").unwrap_or_default().to_string(),
                    kind: m.attribute_value("kind").unwrap_or_default().to_string(),
                    name: first_name(m),
                })
                .collect();

            compounds.push(CompoundRef {
                refid: refid.to_string(),
                kind: CompoundKind::from_name(compound.attribute_value("kind").unwrap_or_default()),
                name: first_name(compound),
                members,
            });
        }

        tracing::debug!("Index {} lists {} compounds", path.display(), compounds.len());
        Ok(Self { version, compounds })
    }

    pub fn len(&self) -> usize {
        self.compounds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.compounds.is_empty()
    }
}

fn first_name(element: sxd_document::dom::Element<'_>) -> String {
    child_elements(element, "name")
        .into_iter()
        .next()
        .map(|n| text_of(n).trim().to_string())
        .unwrap_or_default()
}
