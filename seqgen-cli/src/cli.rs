use crate::project_info::{metadata, version_info};
use clap::{Args, Parser, Subcommand};
use seqgen_core::config::TargetVersion;
use seqgen_core::constants::config;
use seqgen_core::datatype::Dialect;
use std::path::PathBuf;

/// Seqgen CLI - 从 MySQL 表结构生成 Sequelize 模型
#[derive(Parser, Debug)]
#[command(name = "seqgen")]
#[command(about = metadata::PROJECT_DESCRIPTION)]
#[command(version = version_info::CLI_VERSION)]
#[command(long_about = metadata::display::DESCRIPTION_LONG)]
#[command(author = metadata::PROJECT_AUTHORS)]
pub struct Cli {
    /// 配置文件路径
    #[arg(short, long, default_value = config::CONFIG_FILE_NAME)]
    pub config: PathBuf,

    /// 详细输出
    #[arg(short, long)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// 创建带注释的默认配置文件
    Init {
        /// 如果配置文件已存在，强制覆盖
        #[arg(long)]
        force: bool,
    },
    /// 解析表结构并生成模型文件
    Generate(GenerateArgs),
    /// 显示推导出的关联和诊断信息，不写入文件
    Inspect(InspectArgs),
}

#[derive(Args, Debug, Clone)]
pub struct GenerateArgs {
    /// 包含 CREATE TABLE 语句的 SQL 文件
    #[arg(short, long)]
    pub schema: PathBuf,

    /// 输出目录（默认: ./models）
    #[arg(short, long)]
    pub out: Option<PathBuf>,

    /// 覆盖配置中的目标版本 (v5, v6, v7)
    #[arg(long)]
    pub target: Option<TargetVersion>,

    /// 覆盖配置中的数据库方言
    #[arg(long)]
    pub dialect: Option<Dialect>,

    /// 只输出生成结果，不写入文件
    #[arg(long)]
    pub dry_run: bool,
}

#[derive(Args, Debug, Clone)]
pub struct InspectArgs {
    /// 包含 CREATE TABLE 语句的 SQL 文件
    #[arg(short, long)]
    pub schema: PathBuf,

    /// 只显示指定表
    #[arg(short, long)]
    pub table: Option<String>,
}
