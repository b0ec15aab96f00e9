use crate::schema::ForeignKeyId;
use serde::Serialize;
use std::fmt;

/// 关联方法
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AssociationKind {
    HasMany,
    HasOne,
    BelongsTo,
    BelongsToMany,
}

impl AssociationKind {
    /// 生成代码中的方法名
    pub fn method(self) -> &'static str {
        match self {
            Self::HasMany => "hasMany",
            Self::HasOne => "hasOne",
            Self::BelongsTo => "belongsTo",
            Self::BelongsToMany => "belongsToMany",
        }
    }
}

impl fmt::Display for AssociationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.method())
    }
}

/// 关系标签，写在生成代码的注释里
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RelationLabel {
    OneToMany,
    OneToOne,
    ManyToOne,
    ManyToMany,
}

impl fmt::Display for RelationLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::OneToMany => "1 <=> N",
            Self::OneToOne => "1 <=> 1",
            Self::ManyToOne => "N <=> 1",
            Self::ManyToMany => "N <=> N",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct ForeignKeyOption {
    pub name: String,
    /// 物理列名
    pub field: Option<String>,
    pub allow_null: Option<bool>,
}

/// 关联选项，由目标版本的配置整理成对象字面量
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct AssociationOptions {
    pub foreign_key: ForeignKeyOption,
    pub on_update: Option<String>,
    pub on_delete: Option<String>,
    pub source_key: Option<String>,
    pub target_key: Option<String>,
    pub through: Option<String>,
    pub alias: Option<String>,
    /// 未设置表示启用约束
    pub constraints: Option<bool>,
    pub inverse_alias: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AssociationDescriptor {
    pub kind: AssociationKind,
    pub label: RelationLabel,
    pub target_model: String,
    pub options: AssociationOptions,
    /// 产生该关联的外键，多对多关系为指向本表的外键
    pub foreign_key: ForeignKeyId,
    /// 同一对模型之间存在多条外键
    pub ambiguous: bool,
}
