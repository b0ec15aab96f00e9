use super::{load_schema, print_diagnostics};
use crate::app::CliApp;
use crate::cli::InspectArgs;
use anyhow::{Result, anyhow};
use seqgen_core::association::{AssociationResolver, ResolverSettings, TargetProfile};
use seqgen_core::diagnostics::DiagnosticLog;
use seqgen_core::schema::{Schema, TableId};
use tracing::info;

/// 显示推导出的关联
pub fn run_inspect(app: &CliApp, args: &InspectArgs) -> Result<()> {
    let config = &app.config;
    let schema = load_schema(&args.schema, config)?;
    let profile = TargetProfile::for_target(config.target);
    let resolver = AssociationResolver::new(&schema, ResolverSettings::new(config, &profile));
    let log = DiagnosticLog::new();

    let ids = select_tables(&schema, args.table.as_deref())?;

    let pairs = resolver.ambiguity().ambiguous_pairs();
    if !pairs.is_empty() {
        info!("⚠️  存在多个外键的模型对:");
        for (a, b, count) in pairs {
            info!("   {} <-> {}: {} 个外键", a, b, count);
        }
    }

    for id in ids {
        let table = schema.table(id);
        let state = if table.external {
            " [外部表]"
        } else if table.collapsed {
            " [多对多中间表，不生成]"
        } else if table.is_many_to_many() {
            " [多对多中间表]"
        } else {
            ""
        };
        info!("📋 {} ({}){}", table.name, table.model_name, state);

        let descriptors = resolver.resolve(id, &log)?;
        if descriptors.is_empty() {
            info!("   (无关联)");
        }
        for descriptor in descriptors {
            info!(
                "   {:<8} {} {} as {}{}",
                descriptor.label.to_string(),
                descriptor.kind,
                descriptor.target_model,
                descriptor.options.alias.as_deref().unwrap_or("-"),
                if descriptor.ambiguous { " (约束已关闭)" } else { "" }
            );
        }
    }

    print_diagnostics(&log.into_entries());
    Ok(())
}

fn select_tables(schema: &Schema, table: Option<&str>) -> Result<Vec<TableId>> {
    match table {
        Some(name) => schema
            .find_table(name)
            .map(|id| vec![id])
            .ok_or_else(|| anyhow!("表 {} 不存在", name)),
        None => Ok(schema.tables().map(|(id, _)| id).collect()),
    }
}
