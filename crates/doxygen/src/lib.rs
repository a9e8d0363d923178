//! doxygen - 驱动 Doxygen 生成 XML
//!
//! 源文件收集、Doxyfile 生成、进程管理

mod config;
mod generator;
mod runner;
mod sources;

pub use config::{DoxyfileConfig, DOXYFILE_NAME, XML_OUTPUT};
pub use generator::{DoxygenGenerator, GeneratedXml, XmlGenerator};
pub use runner::{DoxygenError, DoxygenRunner, Result, RunOutput};
pub use sources::{collect_sources, is_source_file, SOURCE_EXTENSIONS};
