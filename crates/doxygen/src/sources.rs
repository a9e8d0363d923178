use crate::runner::{DoxygenError, Result};
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

/// Doxygen 能解析的 C/C++ 扩展名
pub const SOURCE_EXTENSIONS: &[&str] = &[
    "c", "h", "cc", "cp", "cpp", "cxx", "c++", "hh", "hpp", "hxx", "h++", "ipp", "inl", "tcc",
];

/// 是否为 C/C++ 源文件 (扩展名不区分大小写)
pub fn is_source_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| {
            let ext = e.to_ascii_lowercase();
            SOURCE_EXTENSIONS.contains(&ext.as_str())
        })
        .unwrap_or(false)
}

/// 收集输入中的源文件
///
/// 显式给出的文件原样保留; 目录只收集 C/C++ 文件, 跳过隐藏目录和符号链接目录。
/// 结果为规范化的绝对路径, 排序并去重。
pub fn collect_sources(inputs: &[PathBuf], recursive: bool) -> Result<Vec<PathBuf>> {
    let mut files = BTreeSet::new();

    for input in inputs {
        if input.is_file() {
            files.insert(input.canonicalize()?);
        } else if input.is_dir() {
            collect_dir(input, recursive, &mut files)?;
        } else {
            return Err(DoxygenError::InputNotFound(input.clone()));
        }
    }

    if files.is_empty() {
        return Err(DoxygenError::NoSources);
    }

    tracing::debug!("Collected {} source files", files.len());
    Ok(files.into_iter().collect())
}

fn collect_dir(dir: &Path, recursive: bool, files: &mut BTreeSet<PathBuf>) -> Result<()> {
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        let file_type = entry.file_type()?;

        if file_type.is_symlink() && path.is_dir() {
            tracing::debug!("Skipping symlinked directory {}", path.display());
        } else if file_type.is_dir() {
            if recursive && !is_hidden(&path) {
                collect_dir(&path, recursive, files)?;
            }
        } else if is_source_file(&path) && path.is_file() {
            files.insert(path.canonicalize()?);
        }
    }

    Ok(())
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .map(|n| n.starts_with('.'))
        .unwrap_or(false)
}
