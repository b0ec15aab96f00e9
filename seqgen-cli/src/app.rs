use anyhow::{Context, Result};
use seqgen_core::config::GeneratorConfig;
use seqgen_core::constants::config;
use seqgen_core::error::GenError;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::cli::Commands;
use crate::commands;

pub struct CliApp {
    pub config: GeneratorConfig,
    /// 相对路径（如 `table_prop_file`）的解析基准
    pub base_dir: PathBuf,
}

impl CliApp {
    /// 加载配置并初始化 CLI 应用
    ///
    /// 显式指定的配置文件必须存在；使用默认路径且文件不存在时，
    /// 按 `seqgen.toml` -> `.seqgen.toml` 查找，都不存在时使用默认配置。
    pub fn new_with_config(config_path: &Path) -> Result<Self> {
        if config_path.exists() {
            let config = GeneratorConfig::load_from_file(config_path)
                .with_context(|| format!("加载配置文件 {} 失败", config_path.display()))?;
            let base_dir = config_path
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .map_or_else(|| PathBuf::from("."), Path::to_path_buf);
            debug!("使用配置文件: {}", config_path.display());
            return Ok(Self { config, base_dir });
        }

        if config_path != Path::new(config::CONFIG_FILE_NAME) {
            return Err(GenError::ConfigNotFound.into());
        }

        let config = GeneratorConfig::find_and_load_config()?;
        Ok(Self {
            config,
            base_dir: PathBuf::from("."),
        })
    }

    /// 运行应用命令
    pub fn run(&self, command: Commands) -> Result<()> {
        match command {
            Commands::Init { .. } => unreachable!(), // 已经在 main.rs 中处理
            Commands::Generate(args) => commands::run_generate(self, &args),
            Commands::Inspect(args) => commands::run_inspect(self, &args),
        }
    }
}
