//! 提取命令 - 运行 doxygen 并合并 XML

use crate::config::ExtractConfig;
use anyhow::Context;
use clap::Args;
use combine::{CompoundKind, DoxygenIndex, XmlCombiner};
use doxygen::{DoxyfileConfig, DoxygenGenerator, DoxygenRunner, GeneratedXml, XmlGenerator};
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Args, Debug)]
pub struct ExtractArgs {
    /// C/C++ source files or directories
    #[arg(required_unless_present = "from_xml")]
    pub inputs: Vec<PathBuf>,
    /// Output file (default: stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
    /// Scan input directories recursively
    #[arg(short, long)]
    pub recursive: bool,
    /// Doxygen executable [env: DOXML_DOXYGEN]
    #[arg(long)]
    pub doxygen: Option<String>,
    /// Predefined macro, NAME or NAME=VALUE
    #[arg(short = 'D', long = "define")]
    pub defines: Vec<String>,
    /// Include search path
    #[arg(short = 'I', long = "include")]
    pub include_paths: Vec<PathBuf>,
    /// Only document entities that have documentation comments
    #[arg(long)]
    pub no_extract_all: bool,
    /// Include private class members
    #[arg(long)]
    pub extract_private: bool,
    /// Include static (file-local) members
    #[arg(long)]
    pub extract_static: bool,
    /// Optimize output for C sources
    #[arg(long = "c")]
    pub optimize_for_c: bool,
    /// Only keep compounds of this kind (class, struct, file, ...)
    #[arg(short, long = "kind")]
    pub kinds: Vec<String>,
    /// Drop compounds of this kind
    #[arg(short = 'x', long = "exclude-kind")]
    pub excluded_kinds: Vec<String>,
    /// Print a compound summary instead of XML
    #[arg(long, conflicts_with = "output")]
    pub list: bool,
    /// JSON output (with --list)
    #[arg(long, requires = "list")]
    pub json: bool,
    /// Print the generated Doxyfile and exit
    #[arg(long)]
    pub print_doxyfile: bool,
    /// Keep Doxygen's temporary output directory [env: DOXML_KEEP_TEMP]
    #[arg(long)]
    pub keep_temp: bool,
    /// Doxygen timeout in seconds [env: DOXML_TIMEOUT]
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout: Option<u64>,
    /// Combine an existing Doxygen XML directory instead of running doxygen
    #[arg(long, value_name = "DIR", conflicts_with = "print_doxyfile")]
    pub from_xml: Option<PathBuf>,
}

impl ExtractArgs {
    /// 命令行参数覆盖环境配置
    fn resolve_config(&self) -> ExtractConfig {
        let mut config = ExtractConfig::from_env();
        if let Some(program) = &self.doxygen {
            config.doxygen = program.clone();
        }
        if self.keep_temp {
            config.keep_temp = true;
        }
        if let Some(secs) = self.timeout {
            config.timeout = Duration::from_secs(secs);
        }
        config
    }

    fn doxyfile_template(&self) -> DoxyfileConfig {
        DoxyfileConfig::new(Vec::new())
            .with_recursive(self.recursive)
            .with_extract_all(!self.no_extract_all)
            .with_extract_private(self.extract_private)
            .with_extract_static(self.extract_static)
            .with_optimize_for_c(self.optimize_for_c)
            .with_defines(self.defines.clone())
            .with_include_paths(self.include_paths.clone())
    }

    fn combiner(&self) -> anyhow::Result<XmlCombiner> {
        Ok(XmlCombiner::new()
            .with_kinds(parse_kinds(&self.kinds)?)
            .with_excluded_kinds(parse_kinds(&self.excluded_kinds)?))
    }
}

pub async fn run(args: ExtractArgs) -> anyhow::Result<()> {
    let combiner = args.combiner()?;

    let generated = match &args.from_xml {
        Some(dir) => GeneratedXml::from_dir(dir),
        None => {
            let config = args.resolve_config();
            let runner = DoxygenRunner::new(&config.doxygen).with_timeout(config.timeout);
            let mut generator = DoxygenGenerator::new(runner)
                .with_template(args.doxyfile_template())
                .with_keep_temp(config.keep_temp);

            if args.print_doxyfile {
                let doxyfile = generator.doxyfile_for(&args.inputs, Path::new("."))?;
                print!("{}", doxyfile.render());
                return Ok(());
            }

            let version = DoxygenRunner::new(&config.doxygen)
                .with_timeout(config.timeout)
                .version()
                .await
                .with_context(|| format!("Cannot run {}", config.doxygen))?;
            tracing::info!("Using doxygen {}", version);

            let generated = generator.generate(&args.inputs).await?;
            if !generated.warnings().is_empty() {
                tracing::info!("doxygen reported {} warnings", generated.warnings().len());
            }
            generated
        }
    };

    if args.list {
        let index = DoxygenIndex::load(generated.xml_dir())?;
        print_list(&index, &combiner, args.json)?;
        return Ok(());
    }

    let xml = combiner.combine(generated.xml_dir())?;

    match &args.output {
        Some(file) => {
            std::fs::write(file, &xml).with_context(|| format!("Cannot write {}", file.display()))?;
            tracing::info!("Saved to: {}", file.display());
        }
        None => print!("{}", xml),
    }

    Ok(())
}

fn print_list(index: &DoxygenIndex, combiner: &XmlCombiner, json: bool) -> anyhow::Result<()> {
    let selected = combiner.select(index);

    if json {
        #[derive(serde::Serialize)]
        struct CompoundItem<'a> {
            refid: &'a str,
            kind: &'a str,
            name: &'a str,
            members: usize,
        }

        let items: Vec<_> = selected.iter().map(|c| CompoundItem {
            refid: &c.refid,
            kind: c.kind.as_str(),
            name: &c.name,
            members: c.members.len(),
        }).collect();

        println!("{}", serde_json::to_string_pretty(&items)?);
    } else {
        println!("Doxygen {} - {} compounds\n", index.version, selected.len());
        for compound in selected {
            println!("  {:<10} {} ({} members)", compound.kind.as_str(), compound.name, compound.members.len());
        }
    }

    Ok(())
}

/// 解析命令行中的 compound 类型, 拒绝未知类型
fn parse_kinds(names: &[String]) -> anyhow::Result<Vec<CompoundKind>> {
    names
        .iter()
        .flat_map(|n| n.split(','))
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .map(|name| {
            let kind = CompoundKind::from_name(&name.to_ascii_lowercase());
            if !kind.is_known() {
                anyhow::bail!("Unknown compound kind: {}", name);
            }
            Ok(kind)
        })
        .collect()
}
