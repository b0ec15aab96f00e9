use crate::constants::{config, generator};
use crate::datatype::Dialect;
use crate::error::{GenError, Result};
use crate::naming::NamingStrategy;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// 生成目标的 Sequelize 版本
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetVersion {
    V5,
    #[default]
    V6,
    V7,
}

impl fmt::Display for TargetVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::V5 => "v5",
            Self::V6 => "v6",
            Self::V7 => "v7",
        };
        f.write_str(name)
    }
}

impl FromStr for TargetVersion {
    type Err = GenError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().trim_start_matches('v') {
            "5" => Ok(Self::V5),
            "6" => Ok(Self::V6),
            "7" => Ok(Self::V7),
            _ => Err(GenError::invalid_config(format!("未知的目标版本: {s}"))),
        }
    }
}

/// 生成器配置
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct GeneratorConfig {
    pub target: TargetVersion,
    pub naming_strategy: NamingStrategy,
    pub dialect: Dialect,
    pub package_name: String,
    pub indentation: usize,
    pub use_tabs: bool,
    pub generate_associations: bool,
    pub generate_foreign_key_fields: bool,
    pub use_semicolons: bool,
    pub use_timestamps: bool,
    pub inject_extend_function: bool,
    pub association_alias_always: bool,
    pub skip_many_to_many_tables: bool,
    pub pluralize_aliases: bool,
    pub add_comment: bool,
    pub header: Option<String>,
    pub file_extension: String,
    pub table_prop_file: Option<PathBuf>,
    pub external_tables: Vec<String>,
    pub ignored_foreign_keys: Vec<String>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            target: TargetVersion::default(),
            naming_strategy: NamingStrategy::default(),
            dialect: Dialect::default(),
            package_name: generator::DEFAULT_PACKAGE_NAME.to_string(),
            indentation: generator::DEFAULT_INDENTATION,
            use_tabs: false,
            generate_associations: true,
            generate_foreign_key_fields: true,
            use_semicolons: true,
            use_timestamps: false,
            inject_extend_function: false,
            association_alias_always: false,
            skip_many_to_many_tables: true,
            pluralize_aliases: false,
            add_comment: true,
            header: None,
            file_extension: generator::DEFAULT_FILE_EXTENSION.to_string(),
            table_prop_file: None,
            external_tables: Vec::new(),
            ignored_foreign_keys: Vec::new(),
        }
    }
}

impl GeneratorConfig {
    /// 智能查找并加载配置文件
    /// 按优先级查找：seqgen.toml -> .seqgen.toml，都不存在时使用默认配置
    pub fn find_and_load_config() -> Result<Self> {
        for config_file in &config::CONFIG_FILE_CANDIDATES {
            if Path::new(config_file).exists() {
                tracing::info!("找到配置文件: {}", config_file);
                return Self::load_from_file(config_file);
            }
        }

        tracing::debug!("未找到配置文件，使用默认配置");
        Ok(Self::default())
    }

    /// 从指定文件加载配置
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path)?;
        let config: GeneratorConfig = toml::from_str(&content)?;
        config.validate()?;

        Ok(config)
    }

    /// 保存配置到文件
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = self.to_toml_with_comments();
        fs::write(&path, content)?;
        Ok(())
    }

    /// 生成带注释的TOML配置
    pub fn to_toml_with_comments(&self) -> String {
        const TEMPLATE: &str = include_str!("../templates/config.toml.template");

        TEMPLATE
            .replace("{target}", &self.target.to_string())
            .replace("{naming_strategy}", &self.naming_strategy.to_string())
            .replace("{dialect}", &self.dialect.to_string())
            .replace("{package_name}", &toml_string(&self.package_name))
            .replace("{indentation}", &self.indentation.to_string())
            .replace("{use_tabs}", &self.use_tabs.to_string())
            .replace(
                "{generate_associations}",
                &self.generate_associations.to_string(),
            )
            .replace(
                "{generate_foreign_key_fields}",
                &self.generate_foreign_key_fields.to_string(),
            )
            .replace("{use_semicolons}", &self.use_semicolons.to_string())
            .replace("{use_timestamps}", &self.use_timestamps.to_string())
            .replace(
                "{inject_extend_function}",
                &self.inject_extend_function.to_string(),
            )
            .replace(
                "{association_alias_always}",
                &self.association_alias_always.to_string(),
            )
            .replace(
                "{skip_many_to_many_tables}",
                &self.skip_many_to_many_tables.to_string(),
            )
            .replace("{pluralize_aliases}", &self.pluralize_aliases.to_string())
            .replace("{add_comment}", &self.add_comment.to_string())
            .replace("{file_extension}", &toml_string(&self.file_extension))
            .replace(
                "{header}",
                &optional_entry("header", self.header.as_deref(), "Copyright (c) My Company"),
            )
            .replace(
                "{table_prop_file}",
                &optional_entry(
                    "table_prop_file",
                    self.table_prop_file
                        .as_deref()
                        .map(|p| p.to_string_lossy())
                        .as_deref(),
                    "table-props.json",
                ),
            )
            .replace("{external_tables}", &toml_array(&self.external_tables))
            .replace("{ignored_foreign_keys}", &toml_array(&self.ignored_foreign_keys))
    }

    /// 校验配置值
    pub fn validate(&self) -> Result<()> {
        if !self.use_tabs && self.indentation == 0 {
            return Err(GenError::invalid_config("indentation 必须大于 0"));
        }
        if self.file_extension.trim().is_empty() {
            return Err(GenError::invalid_config("file_extension 不能为空"));
        }
        if self.package_name.trim().is_empty() {
            return Err(GenError::invalid_config("package_name 不能为空"));
        }
        Ok(())
    }

    /// 单层缩进文本
    pub fn indent_unit(&self) -> String {
        if self.use_tabs {
            "\t".to_string()
        } else {
            " ".repeat(self.indentation)
        }
    }

    /// 语句结束符
    pub fn semicolon(&self) -> &'static str {
        if self.use_semicolons { ";" } else { "" }
    }

    /// 表是否被配置为外部表（不生成模型）
    pub fn is_external_table(&self, table_name: &str) -> bool {
        self.external_tables
            .iter()
            .any(|name| name.eq_ignore_ascii_case(table_name))
    }

    /// 加载公共表属性
    ///
    /// 文件缺失或内容无效时返回空表，不会中断生成。
    /// 相对路径以 `base_dir` 为基准解析。
    pub fn load_table_props(&self, base_dir: &Path) -> IndexMap<String, serde_json::Value> {
        let Some(file) = &self.table_prop_file else {
            return IndexMap::new();
        };

        let path = if file.is_absolute() {
            file.clone()
        } else {
            base_dir.join(file)
        };

        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) => {
                tracing::warn!("无法读取公共表属性文件 {}: {}", path.display(), e);
                return IndexMap::new();
            }
        };

        match serde_json::from_str::<IndexMap<String, serde_json::Value>>(&content) {
            Ok(props) => {
                tracing::debug!("已加载公共表属性 {} 项: {}", props.len(), path.display());
                props
            }
            Err(e) => {
                tracing::warn!("公共表属性文件不是有效的 JSON 对象 {}: {}", path.display(), e);
                IndexMap::new()
            }
        }
    }
}

/// TOML 字符串字面量，处理引号与换行转义
fn toml_string(value: &str) -> String {
    toml::Value::String(value.to_string()).to_string()
}

fn toml_array(values: &[String]) -> String {
    let items: Vec<String> = values.iter().map(|v| toml_string(v)).collect();
    format!("[{}]", items.join(", "))
}

/// 未设置的可选项保留为注释示例
fn optional_entry(key: &str, value: Option<&str>, example: &str) -> String {
    match value {
        Some(value) => format!("{key} = {}", toml_string(value)),
        None => format!("# {key} = {}", toml_string(example)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = GeneratorConfig::default();
        assert_eq!(config.target, TargetVersion::V6);
        assert_eq!(config.indent_unit(), "    ");
        assert!(config.skip_many_to_many_tables);
        assert!(!config.pluralize_aliases);
        assert_eq!(config.semicolon(), ";");
    }

    #[test]
    fn test_template_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("seqgen.toml");

        let config = GeneratorConfig {
            target: TargetVersion::V7,
            dialect: Dialect::Sqlite,
            naming_strategy: NamingStrategy::CamelCase,
            ..Default::default()
        };
        config.save_to_file(&path).unwrap();

        let loaded = GeneratorConfig::load_from_file(&path).unwrap();
        assert_eq!(loaded, config);

        let config = GeneratorConfig {
            header: Some("Copyright (c) \"Acme\"\nAll rights reserved.".to_string()),
            table_prop_file: Some(PathBuf::from("props/table.json")),
            external_tables: vec!["audit_log".to_string(), "legacy user".to_string()],
            ignored_foreign_keys: vec!["fk_post_org".to_string()],
            package_name: "@sequelize/core".to_string(),
            ..Default::default()
        };
        config.save_to_file(&path).unwrap();

        let loaded = GeneratorConfig::load_from_file(&path).unwrap();
        assert_eq!(loaded, config);
        assert_eq!(loaded.external_tables.len(), 2);
        assert_eq!(loaded.header.as_deref(), Some("Copyright (c) \"Acme\"\nAll rights reserved."));
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("seqgen.toml");
        fs::write(&path, "target = \"v5\"\nexternal_tables = [\"audit_log\"]\n").unwrap();

        let loaded = GeneratorConfig::load_from_file(&path).unwrap();
        assert_eq!(loaded.target, TargetVersion::V5);
        assert!(loaded.is_external_table("AUDIT_LOG"));
        assert_eq!(loaded.package_name, "sequelize");
    }

    #[test]
    fn test_invalid_config_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("seqgen.toml");
        fs::write(&path, "indentation = 0\n").unwrap();
        assert!(matches!(
            GeneratorConfig::load_from_file(&path),
            Err(GenError::InvalidConfig(_))
        ));

        fs::write(&path, "target = \"v9\"\n").unwrap();
        assert!(matches!(
            GeneratorConfig::load_from_file(&path),
            Err(GenError::Config(_))
        ));
    }

    #[test]
    fn test_table_props_fallback() {
        let temp_dir = TempDir::new().unwrap();
        let mut config = GeneratorConfig::default();
        assert!(config.load_table_props(temp_dir.path()).is_empty());

        config.table_prop_file = Some(PathBuf::from("missing.json"));
        assert!(config.load_table_props(temp_dir.path()).is_empty());

        fs::write(temp_dir.path().join("bad.json"), "[1, 2]").unwrap();
        config.table_prop_file = Some(PathBuf::from("bad.json"));
        assert!(config.load_table_props(temp_dir.path()).is_empty());

        fs::write(
            temp_dir.path().join("props.json"),
            r#"{"timestamps": true, "paranoid": true}"#,
        )
        .unwrap();
        config.table_prop_file = Some(PathBuf::from("props.json"));
        let props = config.load_table_props(temp_dir.path());
        assert_eq!(
            props.keys().collect::<Vec<_>>(),
            vec!["timestamps", "paranoid"]
        );
    }

    #[test]
    fn test_target_from_str() {
        assert_eq!("v7".parse::<TargetVersion>().unwrap(), TargetVersion::V7);
        assert_eq!("5".parse::<TargetVersion>().unwrap(), TargetVersion::V5);
        assert!("v8".parse::<TargetVersion>().is_err());
    }
}
