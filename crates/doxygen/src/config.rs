//! Doxyfile 生成

use crate::runner::Result;
use crate::sources::SOURCE_EXTENSIONS;
use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

pub const DOXYFILE_NAME: &str = "Doxyfile";

/// Doxygen XML 输出所在的子目录
pub const XML_OUTPUT: &str = "xml";

/// 渲染为 Doxyfile 的配置
#[derive(Debug, Clone)]
pub struct DoxyfileConfig {
    pub project_name: String,
    pub inputs: Vec<PathBuf>,
    pub output_directory: PathBuf,
    pub file_patterns: Vec<String>,
    pub recursive: bool,
    pub extract_all: bool,
    pub extract_private: bool,
    pub extract_static: bool,
    pub optimize_for_c: bool,
    /// PREDEFINED 宏, `NAME` 或 `NAME=VALUE`
    pub defines: Vec<String>,
    pub include_paths: Vec<PathBuf>,
}

impl DoxyfileConfig {
    pub fn new(inputs: Vec<PathBuf>) -> Self {
        Self {
            project_name: "doxml".to_string(),
            inputs,
            output_directory: PathBuf::from("."),
            file_patterns: SOURCE_EXTENSIONS.iter().map(|e| format!("*.{}", e)).collect(),
            recursive: false,
            extract_all: true,
            extract_private: false,
            extract_static: false,
            optimize_for_c: false,
            defines: Vec::new(),
            include_paths: Vec::new(),
        }
    }

    pub fn with_project_name(mut self, name: &str) -> Self {
        self.project_name = name.to_string();
        self
    }

    pub fn with_output_directory(mut self, dir: &Path) -> Self {
        self.output_directory = dir.to_path_buf();
        self
    }

    pub fn with_recursive(mut self, recursive: bool) -> Self {
        self.recursive = recursive;
        self
    }

    pub fn with_extract_all(mut self, extract_all: bool) -> Self {
        self.extract_all = extract_all;
        self
    }

    pub fn with_extract_private(mut self, extract_private: bool) -> Self {
        self.extract_private = extract_private;
        self
    }

    pub fn with_extract_static(mut self, extract_static: bool) -> Self {
        self.extract_static = extract_static;
        self
    }

    pub fn with_optimize_for_c(mut self, optimize: bool) -> Self {
        self.optimize_for_c = optimize;
        self
    }

    pub fn with_defines(mut self, defines: Vec<String>) -> Self {
        self.defines = defines;
        self
    }

    pub fn with_include_paths(mut self, paths: Vec<PathBuf>) -> Self {
        self.include_paths = paths;
        self
    }

    /// XML 输出目录
    pub fn xml_dir(&self) -> PathBuf {
        self.output_directory.join(XML_OUTPUT)
    }

    /// 渲染 Doxyfile 文本
    pub fn render(&self) -> String {
        let mut out = String::new();

        push(&mut out, "PROJECT_NAME", &[quote(&self.project_name)]);
        push(&mut out, "OUTPUT_DIRECTORY", &[quote_path(&self.output_directory)]);
        push(&mut out, "INPUT", &self.inputs.iter().map(|p| quote_path(p)).collect::<Vec<_>>());
        push(&mut out, "FILE_PATTERNS", &self.file_patterns.iter().map(|p| quote(p)).collect::<Vec<_>>());
        push(&mut out, "RECURSIVE", &[yes_no(self.recursive)]);

        push(&mut out, "EXTRACT_ALL", &[yes_no(self.extract_all)]);
        push(&mut out, "EXTRACT_PRIVATE", &[yes_no(self.extract_private)]);
        push(&mut out, "EXTRACT_STATIC", &[yes_no(self.extract_static)]);
        push(&mut out, "OPTIMIZE_OUTPUT_FOR_C", &[yes_no(self.optimize_for_c)]);

        push(&mut out, "ENABLE_PREPROCESSING", &[yes_no(true)]);
        push(&mut out, "MACRO_EXPANSION", &[yes_no(!self.defines.is_empty())]);
        push(&mut out, "SEARCH_INCLUDES", &[yes_no(!self.include_paths.is_empty())]);
        push(&mut out, "INCLUDE_PATH", &self.include_paths.iter().map(|p| quote_path(p)).collect::<Vec<_>>());
        push(&mut out, "PREDEFINED", &self.defines.iter().map(|d| quote(d)).collect::<Vec<_>>());

        push(&mut out, "QUIET", &[yes_no(true)]);
        push(&mut out, "WARNINGS", &[yes_no(true)]);
        push(&mut out, "WARN_IF_UNDOCUMENTED", &[yes_no(false)]);

        push(&mut out, "GENERATE_XML", &[yes_no(true)]);
        push(&mut out, "XML_OUTPUT", &[XML_OUTPUT.to_string()]);
        push(&mut out, "XML_PROGRAMLISTING", &[yes_no(false)]);
        for generator in ["GENERATE_HTML", "GENERATE_LATEX", "GENERATE_RTF", "GENERATE_MAN", "GENERATE_DOCBOOK"] {
            push(&mut out, generator, &[yes_no(false)]);
        }

        out
    }

    /// 写入 dir/Doxyfile
    pub fn write_to(&self, dir: &Path) -> Result<PathBuf> {
        let path = dir.join(DOXYFILE_NAME);
        fs::write(&path, self.render())?;
        tracing::debug!("Wrote {}", path.display());
        Ok(path)
    }
}

fn push(out: &mut String, key: &str, values: &[String]) {
    if values.is_empty() {
        let _ = writeln!(out, "{:<24}=", key);
    } else {
        let _ = writeln!(out, "{:<24}= {}", key, values.join(" "));
    }
}

fn yes_no(flag: bool) -> String {
    let value = if flag { "YES" } else { "NO" };
    value.to_string()
}

fn quote_path(path: &Path) -> String {
    quote(&path.to_string_lossy())
}

/// 含空白、引号或 `#` 的值需要加双引号
///
/// doxygen 的引号串里只有 `\"` 是转义, 反斜杠本身原样保留。
#[doc(hidden)]
pub fn quote(value: &str) -> String {
    let needs_quotes = value.is_empty()
        || value.chars().any(|c| c.is_whitespace() || c == '"' || c == '#');
    if !needs_quotes {
        return value.to_string();
    }

    let escaped = value.replace('"', "\\\"");
    format!("\"{}\"", escaped)
}
