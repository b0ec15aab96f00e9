use crate::error::Result;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// 单个模型文件
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeneratedUnit {
    pub table: String,
    pub model_name: String,
    pub file_name: String,
    pub content: String,
}

impl GeneratedUnit {
    pub fn new(table: &str, model_name: &str, extension: &str, content: String) -> Self {
        Self {
            table: table.to_string(),
            model_name: model_name.to_string(),
            file_name: format!("{model_name}.{}", extension.trim_start_matches('.')),
            content,
        }
    }
}

/// 把生成结果写入目录，目录不存在时自动创建
pub fn write_units(units: &[GeneratedUnit], out_dir: &Path) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(out_dir)?;

    let mut written = Vec::with_capacity(units.len());
    for unit in units {
        let path = out_dir.join(&unit.file_name);
        fs::write(&path, &unit.content)?;
        debug!("写入模型文件: {}", path.display());
        written.push(path);
    }

    info!("已写入 {} 个模型文件到 {}", written.len(), out_dir.display());
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_unit_file_name() {
        let unit = GeneratedUnit::new("user_group", "UserGroup", ".js", String::new());
        assert_eq!(unit.file_name, "UserGroup.js");
        let unit = GeneratedUnit::new("post", "Post", "ts", String::new());
        assert_eq!(unit.file_name, "Post.ts");
    }

    #[test]
    fn test_write_units_creates_directory() {
        let temp_dir = TempDir::new().unwrap();
        let out_dir = temp_dir.path().join("models").join("generated");
        let units = vec![
            GeneratedUnit::new("user", "User", "js", "// user\n".to_string()),
            GeneratedUnit::new("post", "Post", "js", "// post\n".to_string()),
        ];

        let written = write_units(&units, &out_dir).unwrap();
        assert_eq!(written.len(), 2);
        assert_eq!(fs::read_to_string(out_dir.join("User.js")).unwrap(), "// user\n");
        assert_eq!(fs::read_to_string(out_dir.join("Post.js")).unwrap(), "// post\n");
    }

    #[test]
    fn test_write_units_overwrites() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("User.js"), "old").unwrap();

        let units = vec![GeneratedUnit::new("user", "User", "js", "new".to_string())];
        write_units(&units, temp_dir.path()).unwrap();
        assert_eq!(fs::read_to_string(temp_dir.path().join("User.js")).unwrap(), "new");
    }

    #[test]
    fn test_write_units_fails_on_file_path() {
        let temp_dir = TempDir::new().unwrap();
        let blocker = temp_dir.path().join("blocker");
        fs::write(&blocker, "x").unwrap();

        let units = vec![GeneratedUnit::new("user", "User", "js", String::new())];
        assert!(write_units(&units, &blocker).is_err());
    }
}
