use anyhow::{Context, Result};
use seqgen_core::config::GeneratorConfig;
use std::path::Path;
use tracing::{info, warn};

/// 创建带注释的默认配置文件
pub fn run_init(config_path: &Path, force: bool) -> Result<()> {
    info!("🧬 Seqgen 初始化");
    info!("================");

    if config_path.exists() && !force {
        warn!("⚠️  配置文件已存在: {}", config_path.display());
        info!("如果您要重新初始化，请使用 --force 参数");
        info!("示例: seqgen init --force");
        return Ok(());
    }

    let config = GeneratorConfig::default();
    config
        .save_to_file(config_path)
        .with_context(|| format!("写入配置文件 {} 失败", config_path.display()))?;
    info!("   ✅ 创建配置文件: {}", config_path.display());

    info!("🎉 初始化完成！");
    info!("");
    info!("📝 接下来的步骤:");
    info!("   1️⃣  按需编辑 {} (目标版本、命名策略、方言等)", config_path.display());
    info!("   2️⃣  运行 'seqgen inspect --schema schema.sql' 检查推导出的关联");
    info!("   3️⃣  运行 'seqgen generate --schema schema.sql' 生成模型文件");

    Ok(())
}
