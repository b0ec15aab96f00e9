use crate::constants::generator::{CHILD_PREFIX, FK_SUFFIX, RELATED_BY};
use crate::error::Result;
use crate::naming::{NamingStrategy, Pluralizer};
use regex::Regex;

/// 从外键列名中提取限定词
///
/// 删除列名中所有 `(被引用表_)?被引用列` 片段，再去掉首尾各一个下划线，
/// 剩余部分即为限定词：`created_by_user_id` 引用 `user.id` 时得到 `created_by`。
/// 剩余为空时返回 `None`。不符合该命名约定的列名会得到不直观的结果。
pub fn extract_qualifier(
    local_column: &str,
    referenced_table: &str,
    foreign_column: &str,
) -> Result<Option<String>> {
    let pattern = format!(
        "({}_)?{}",
        regex::escape(referenced_table),
        regex::escape(foreign_column)
    );
    let re = Regex::new(&pattern)?;
    let replaced = re.replace_all(local_column, "");
    let stripped: &str = &replaced;

    let trimmed = stripped.strip_prefix('_').unwrap_or(stripped);
    let trimmed = trimmed.strip_suffix('_').unwrap_or(trimmed);

    if trimmed.is_empty() {
        Ok(None)
    } else {
        Ok(Some(trimmed.to_string()))
    }
}

/// 关联别名命名规则
#[derive(Debug, Clone, Copy)]
pub struct AliasNamer {
    pub association_naming: NamingStrategy,
    pub pluralizer: Pluralizer,
    pub alias_always: bool,
}

impl AliasNamer {
    fn assoc(&self, name: &str) -> String {
        self.association_naming.apply_to_model(name)
    }

    /// 与模型同名的别名在未开启 alias-always 时省略
    fn drop_bare(&self, alias: String, model: &str) -> Option<String> {
        if alias == model && !self.alias_always {
            None
        } else {
            Some(alias)
        }
    }

    /// 本表作为 "一" 端时，指向拥有外键一方的别名
    ///
    /// 自引用外键的两端指向同一模型，需要别名时 "一" 端带 `Child` 前缀，
    /// 与 `belongsTo` 一端的别名区分。
    pub fn local_alias(
        &self,
        owner_model: &str,
        local_column: &str,
        ambiguous: bool,
        self_reference: bool,
    ) -> Option<String> {
        let alias = if ambiguous {
            let prefix = if self_reference { CHILD_PREFIX } else { "" };
            self.pluralizer.pluralize(
                &self.assoc(&format!("{prefix}{owner_model}{RELATED_BY}{local_column}")),
            )
        } else {
            self.pluralizer.pluralize(owner_model)
        };
        self.drop_bare(alias, owner_model)
    }

    /// 反向关联别名
    pub fn inverse_alias(
        &self,
        this_model: &str,
        local_column: &str,
        owner_has_model_column: bool,
        ambiguous: bool,
    ) -> Option<String> {
        if ambiguous {
            Some(self.assoc(&format!("{this_model}{RELATED_BY}{local_column}")))
        } else if owner_has_model_column {
            Some(self.assoc(&format!("{this_model}{FK_SUFFIX}")))
        } else if self.alias_always {
            Some(this_model.to_string())
        } else {
            None
        }
    }

    /// 本表拥有外键时，指向被引用表的别名
    pub fn foreign_alias(
        &self,
        referenced_model: &str,
        local_column: &str,
        qualifier: Option<&str>,
        ambiguous: bool,
    ) -> Option<String> {
        let alias = if ambiguous {
            self.assoc(&format!("{referenced_model}{RELATED_BY}{local_column}"))
        } else {
            match qualifier {
                Some(q) => self.assoc(&format!("{q}_{referenced_model}")),
                None => referenced_model.to_string(),
            }
        };
        self.drop_bare(alias, referenced_model)
    }

    /// 多对多关联别名，总是输出
    pub fn many_to_many_alias(&self, referenced_model: &str) -> String {
        self.pluralizer.pluralize(&self.assoc(referenced_model))
    }
}
