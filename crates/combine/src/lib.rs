//! combine - 合并 Doxygen XML 输出
//!
//! 解析 index.xml, 将逐 compound 的 XML 文件合并为单个文档

mod combiner;
mod error;
mod index;
mod xml;

pub use combiner::XmlCombiner;
pub use error::{CombineError, Result};
pub use index::{CompoundKind, CompoundRef, DoxygenIndex, MemberRef, INDEX_FILE};
