use crate::config::DoxyfileConfig;
use crate::runner::{DoxygenError, DoxygenRunner, Result};
use crate::sources::collect_sources;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Doxygen 生成的 XML 输出
///
/// 持有临时目录时, drop 即删除。
#[derive(Debug)]
pub struct GeneratedXml {
    xml_dir: PathBuf,
    warnings: Vec<String>,
    _workdir: Option<TempDir>,
}

impl GeneratedXml {
    /// 包装一个已存在的 XML 目录 (不负责清理)
    pub fn from_dir(xml_dir: &Path) -> Self {
        Self {
            xml_dir: xml_dir.to_path_buf(),
            warnings: Vec::new(),
            _workdir: None,
        }
    }

    pub fn xml_dir(&self) -> &Path {
        &self.xml_dir
    }

    pub fn index_path(&self) -> PathBuf {
        self.xml_dir.join("index.xml")
    }

    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }
}

/// XML 生成器 trait
#[async_trait]
pub trait XmlGenerator: Send + Sync {
    /// 为输入生成 Doxygen XML
    async fn generate(&mut self, inputs: &[PathBuf]) -> Result<GeneratedXml>;
}

/// 基于 doxygen 可执行文件的生成器
pub struct DoxygenGenerator {
    runner: DoxygenRunner,
    template: DoxyfileConfig,
    keep_temp: bool,
}

impl DoxygenGenerator {
    pub fn new(runner: DoxygenRunner) -> Self {
        Self {
            runner,
            template: DoxyfileConfig::new(Vec::new()),
            keep_temp: false,
        }
    }

    /// 除 INPUT/OUTPUT_DIRECTORY 外的设置取自 template
    pub fn with_template(mut self, template: DoxyfileConfig) -> Self {
        self.template = template;
        self
    }

    pub fn with_keep_temp(mut self, keep: bool) -> Self {
        self.keep_temp = keep;
        self
    }

    /// 针对具体输入与输出目录的 Doxyfile 配置
    pub fn doxyfile_for(&self, inputs: &[PathBuf], output_directory: &Path) -> Result<DoxyfileConfig> {
        let sources = collect_sources(inputs, self.template.recursive)?;

        let mut config = self.template.clone().with_output_directory(output_directory);
        config.inputs = sources;
        Ok(config)
    }
}

#[async_trait]
impl XmlGenerator for DoxygenGenerator {
    async fn generate(&mut self, inputs: &[PathBuf]) -> Result<GeneratedXml> {
        let workdir = tempfile::Builder::new().prefix("doxml-").tempdir()?;
        let config = self.doxyfile_for(inputs, workdir.path())?;
        tracing::info!("Extracting XML from {} source files", config.inputs.len());

        let doxyfile = config.write_to(workdir.path())?;
        let output = self.runner.run(&doxyfile, workdir.path()).await?;

        let xml_dir = config.xml_dir();
        if !xml_dir.join("index.xml").is_file() {
            return Err(DoxygenError::MissingIndex(xml_dir));
        }

        let workdir = if self.keep_temp {
            let kept = workdir.keep();
            tracing::info!("Keeping Doxygen output in {}", kept.display());
            None
        } else {
            Some(workdir)
        };

        Ok(GeneratedXml {
            xml_dir,
            warnings: output.warnings,
            _workdir: workdir,
        })
    }
}
