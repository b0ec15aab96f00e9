mod generate;
mod inspect;

pub use generate::run_generate;
pub use inspect::run_inspect;

use anyhow::{Context, Result};
use seqgen_core::config::GeneratorConfig;
use seqgen_core::diagnostics::Diagnostic;
use seqgen_core::schema::{Schema, SchemaOptions, parse_schema};
use std::path::Path;
use tracing::{info, warn};

/// 读取并解析 SQL 文件
pub(crate) fn load_schema(schema_file: &Path, config: &GeneratorConfig) -> Result<Schema> {
    let sql = std::fs::read_to_string(schema_file)
        .with_context(|| format!("无法读取表结构文件 {}", schema_file.display()))?;
    let schema = parse_schema(&sql, SchemaOptions::from(config))
        .with_context(|| format!("解析表结构文件 {} 失败", schema_file.display()))?;
    info!("📋 已读取 {} 张表: {}", schema.table_count(), schema_file.display());
    Ok(schema)
}

/// 输出诊断日志
pub(crate) fn print_diagnostics(diagnostics: &[Diagnostic]) {
    if diagnostics.is_empty() {
        return;
    }
    info!("🔎 诊断信息 ({} 条):", diagnostics.len());
    for diagnostic in diagnostics {
        warn!("   {}", diagnostic);
    }
}
