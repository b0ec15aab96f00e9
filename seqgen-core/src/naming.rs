use heck::{ToLowerCamelCase, ToSnakeCase, ToUpperCamelCase};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::GenError;

/// 命名策略
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NamingStrategy {
    #[default]
    #[serde(alias = "as_is", alias = "none")]
    AsIs,
    #[serde(alias = "camelCase", alias = "camel_case")]
    CamelCase,
    #[serde(alias = "PascalCase", alias = "pascal_case")]
    PascalCase,
    #[serde(alias = "snake_case")]
    SnakeCase,
}

impl NamingStrategy {
    /// 按策略转换名称
    pub fn apply(self, name: &str) -> String {
        match self {
            Self::AsIs => name.to_string(),
            Self::CamelCase => name.to_lower_camel_case(),
            Self::PascalCase => name.to_upper_camel_case(),
            Self::SnakeCase => name.to_snake_case(),
        }
    }

    /// 模型名称上下文中的转换：驼峰命名的模型名首字母必须大写
    pub fn apply_to_model(self, name: &str) -> String {
        match self {
            Self::CamelCase => Self::PascalCase.apply(name),
            other => other.apply(name),
        }
    }
}

impl fmt::Display for NamingStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::AsIs => "as-is",
            Self::CamelCase => "camel-case",
            Self::PascalCase => "pascal-case",
            Self::SnakeCase => "snake-case",
        };
        f.write_str(name)
    }
}

impl FromStr for NamingStrategy {
    type Err = GenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "as-is" | "none" => Ok(Self::AsIs),
            "camel-case" | "camelcase" => Ok(Self::CamelCase),
            "pascal-case" | "pascalcase" => Ok(Self::PascalCase),
            "snake-case" | "snakecase" => Ok(Self::SnakeCase),
            other => Err(GenError::invalid_config(format!("未知的命名策略: {other}"))),
        }
    }
}

/// 由表名推导模型名称
pub fn model_name(table_name: &str) -> String {
    table_name.to_upper_camel_case()
}

/// 别名复数化
///
/// 关闭时原样返回，开启时使用简单的英文复数规则，只处理名称的最后一个单词。
#[derive(Debug, Clone, Copy, Default)]
pub struct Pluralizer {
    enabled: bool,
}

impl Pluralizer {
    pub const fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    pub fn pluralize(&self, word: &str) -> String {
        if !self.enabled || word.is_empty() {
            return word.to_string();
        }
        english_plural(word)
    }
}

fn english_plural(word: &str) -> String {
    let lower = word.to_ascii_lowercase();

    if ["s", "x", "z", "ch", "sh"]
        .iter()
        .any(|suffix| lower.ends_with(suffix))
    {
        return format!("{word}es");
    }

    if lower.ends_with('y') {
        let before = lower.chars().rev().nth(1);
        if before.is_some_and(|c| !"aeiou".contains(c)) {
            return format!("{}ies", &word[..word.len() - 1]);
        }
    }

    format!("{word}s")
}
