use super::{load_schema, print_diagnostics};
use crate::app::CliApp;
use crate::cli::GenerateArgs;
use anyhow::{Result, bail};
use seqgen_core::constants::config;
use seqgen_core::generator::{ModelGenerator, write_units};
use tracing::{error, info};

/// 生成模型文件
pub fn run_generate(app: &CliApp, args: &GenerateArgs) -> Result<()> {
    let mut config = app.config.clone();
    if let Some(target) = args.target {
        config.target = target;
    }
    if let Some(dialect) = args.dialect {
        config.dialect = dialect;
    }
    config.validate()?;

    info!("🚀 生成 Sequelize {} 模型 (方言: {})", config.target, config.dialect);

    let schema = load_schema(&args.schema, &config)?;
    let table_props = config.load_table_props(&app.base_dir);
    let report = ModelGenerator::new(&schema, &config)
        .with_table_props(table_props)
        .generate();

    for skipped in &report.skipped {
        info!("   ⏭️  跳过 {} ({})", skipped.table, skipped.reason);
    }

    if args.dry_run {
        for unit in &report.units {
            println!("// ===== {} =====", unit.file_name);
            print!("{}", unit.content);
        }
        info!("🧪 试运行: 共 {} 个模型，未写入文件", report.units.len());
    } else {
        let out_dir = args
            .out
            .clone()
            .unwrap_or_else(config::get_default_output_dir);
        let written = write_units(&report.units, &out_dir)?;
        for path in &written {
            info!("   ✅ {}", path.display());
        }
    }

    print_diagnostics(&report.diagnostics);

    if !report.is_success() {
        for failure in &report.failures {
            error!("   ❌ {}: {}", failure.table, failure.message);
        }
        bail!("{} 张表生成失败", report.failures.len());
    }

    info!("🎉 生成完成！");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use seqgen_core::config::{GeneratorConfig, TargetVersion};
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    const SCHEMA: &str = "
CREATE TABLE `user` (
  `id` int(11) NOT NULL AUTO_INCREMENT,
  `name` varchar(64) NOT NULL,
  PRIMARY KEY (`id`)
);

CREATE TABLE `post` (
  `id` int(11) NOT NULL AUTO_INCREMENT,
  `user_id` int(11) NOT NULL,
  `title` varchar(200) DEFAULT NULL,
  PRIMARY KEY (`id`),
  KEY `idx_user` (`user_id`),
  CONSTRAINT `fk_post_user` FOREIGN KEY (`user_id`) REFERENCES `user` (`id`) ON DELETE CASCADE
);
";

    fn setup(dir: &TempDir) -> (CliApp, GenerateArgs) {
        let schema = dir.path().join("schema.sql");
        fs::write(&schema, SCHEMA).unwrap();
        let app = CliApp {
            config: GeneratorConfig::default(),
            base_dir: dir.path().to_path_buf(),
        };
        let args = GenerateArgs {
            schema,
            out: Some(dir.path().join("models")),
            target: None,
            dialect: None,
            dry_run: false,
        };
        (app, args)
    }

    #[test]
    fn test_generate_writes_models() {
        let temp_dir = TempDir::new().unwrap();
        let (app, args) = setup(&temp_dir);

        run_generate(&app, &args).unwrap();

        let user = fs::read_to_string(temp_dir.path().join("models/User.js")).unwrap();
        assert!(user.contains("User.hasMany(sequelize.models.Post, {"));
        let post = fs::read_to_string(temp_dir.path().join("models/Post.js")).unwrap();
        assert!(post.contains("onDelete: 'CASCADE'"));
    }

    #[test]
    fn test_target_override_and_dry_run() {
        let temp_dir = TempDir::new().unwrap();
        let (app, mut args) = setup(&temp_dir);
        args.target = Some(TargetVersion::V5);
        args.dry_run = true;

        run_generate(&app, &args).unwrap();
        assert!(!temp_dir.path().join("models").exists());
    }

    #[test]
    fn test_table_props_relative_to_config() {
        let temp_dir = TempDir::new().unwrap();
        let (mut app, args) = setup(&temp_dir);
        fs::write(temp_dir.path().join("props.json"), r#"{"paranoid": true}"#).unwrap();
        app.config.table_prop_file = Some(PathBuf::from("props.json"));

        run_generate(&app, &args).unwrap();
        let user = fs::read_to_string(temp_dir.path().join("models/User.js")).unwrap();
        assert!(user.contains("paranoid: true"));
    }

    #[test]
    fn test_missing_schema_file() {
        let temp_dir = TempDir::new().unwrap();
        let (app, mut args) = setup(&temp_dir);
        args.schema = temp_dir.path().join("missing.sql");

        let err = run_generate(&app, &args).unwrap_err();
        assert!(err.to_string().contains("无法读取表结构文件"));
    }
}
