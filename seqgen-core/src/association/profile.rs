use super::types::{AssociationDescriptor, AssociationKind, AssociationOptions};
use crate::config::TargetVersion;
use crate::datatype::TypeFlavour;
use crate::naming::NamingStrategy;
use crate::value::{JsObject, JsValue};

/// 模型文件主体的写法
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyStyle {
    /// `module.exports = function(sequelize, DataTypes) { return sequelize.define(...) }`，不含关联
    Legacy,
    /// `module.exports = sequelize => { ... sequelize.define(...); Model.associate = ... }`
    Define,
}

type ShapeFn = fn(&AssociationOptions) -> JsValue;

/// 目标版本差异
#[derive(Debug, Clone, Copy)]
pub struct TargetProfile {
    pub version: TargetVersion,
    /// 字段定义中物理列名的键
    pub field_key: &'static str,
    /// `references` 中被引用表的键
    pub references_key: &'static str,
    pub association_naming: NamingStrategy,
    pub flavour: TypeFlavour,
    pub body_style: BodyStyle,
    one_to_many: ShapeFn,
    many_to_one: ShapeFn,
    many_to_many: ShapeFn,
}

impl TargetProfile {
    pub fn for_target(version: TargetVersion) -> Self {
        match version {
            TargetVersion::V5 => Self {
                version,
                field_key: "field",
                references_key: "model",
                association_naming: NamingStrategy::PascalCase,
                flavour: TypeFlavour::Standard,
                body_style: BodyStyle::Legacy,
                one_to_many: v6_single,
                many_to_one: v6_single,
                many_to_many: v6_through,
            },
            TargetVersion::V6 => Self {
                version,
                field_key: "field",
                references_key: "model",
                association_naming: NamingStrategy::PascalCase,
                flavour: TypeFlavour::Standard,
                body_style: BodyStyle::Define,
                one_to_many: v6_single,
                many_to_one: v6_single,
                many_to_many: v6_through,
            },
            TargetVersion::V7 => Self {
                version,
                field_key: "columnName",
                references_key: "tableName",
                association_naming: NamingStrategy::PascalCase,
                flavour: TypeFlavour::V7,
                body_style: BodyStyle::Define,
                one_to_many: v7_one_to_many,
                many_to_one: v7_many_to_one,
                many_to_many: v7_through,
            },
        }
    }

    pub fn supports_associations(&self) -> bool {
        self.body_style == BodyStyle::Define
    }

    /// 把关联选项整理成对象字面量
    pub fn shape(&self, descriptor: &AssociationDescriptor) -> JsValue {
        let shape = match descriptor.kind {
            AssociationKind::HasMany | AssociationKind::HasOne => self.one_to_many,
            AssociationKind::BelongsTo => self.many_to_one,
            AssociationKind::BelongsToMany => self.many_to_many,
        };
        shape(&descriptor.options)
    }
}

fn foreign_key_base(options: &AssociationOptions) -> JsObject {
    let fk = &options.foreign_key;
    let mut map = JsObject::new();
    map.insert("name".into(), JsValue::string(&fk.name));
    map.insert("field".into(), JsValue::opt_string(fk.field.as_deref()));
    map.insert("allowNull".into(), fk.allow_null.into());
    map
}

fn v6_single(options: &AssociationOptions) -> JsValue {
    JsValue::object([
        ("foreignKey", JsValue::Object(foreign_key_base(options))),
        ("onUpdate", JsValue::opt_string(options.on_update.as_deref())),
        ("onDelete", JsValue::opt_string(options.on_delete.as_deref())),
        ("targetKey", JsValue::opt_string(options.target_key.as_deref())),
        ("as", JsValue::opt_string(options.alias.as_deref())),
        ("constraints", options.constraints.into()),
    ])
}

fn v6_through(options: &AssociationOptions) -> JsValue {
    JsValue::object([
        ("through", JsValue::opt_string(options.through.as_deref())),
        (
            "foreignKey",
            JsValue::object([("name", JsValue::string(&options.foreign_key.name))]),
        ),
        ("onUpdate", JsValue::opt_string(options.on_update.as_deref())),
        ("onDelete", JsValue::opt_string(options.on_delete.as_deref())),
        ("targetKey", JsValue::opt_string(options.target_key.as_deref())),
        ("as", JsValue::opt_string(options.alias.as_deref())),
    ])
}

fn v7_foreign_key(options: &AssociationOptions) -> JsValue {
    let mut map = foreign_key_base(options);
    map.insert("onUpdate".into(), JsValue::opt_string(options.on_update.as_deref()));
    map.insert("onDelete".into(), JsValue::opt_string(options.on_delete.as_deref()));
    JsValue::Object(map)
}

fn v7_one_to_many(options: &AssociationOptions) -> JsValue {
    let inverse = options
        .inverse_alias
        .as_deref()
        .map_or(JsValue::Null, |alias| JsValue::object([("as", JsValue::string(alias))]));

    JsValue::object([
        ("foreignKey", v7_foreign_key(options)),
        ("sourceKey", JsValue::opt_string(options.source_key.as_deref())),
        ("targetKey", JsValue::opt_string(options.target_key.as_deref())),
        ("as", JsValue::opt_string(options.alias.as_deref())),
        ("inverse", inverse),
        ("foreignKeyConstraints", options.constraints.into()),
    ])
}

fn v7_many_to_one(options: &AssociationOptions) -> JsValue {
    JsValue::object([
        ("foreignKey", v7_foreign_key(options)),
        ("targetKey", JsValue::opt_string(options.target_key.as_deref())),
        ("as", JsValue::opt_string(options.alias.as_deref())),
        ("foreignKeyConstraints", options.constraints.into()),
    ])
}

fn v7_through(options: &AssociationOptions) -> JsValue {
    JsValue::object([
        ("through", JsValue::opt_string(options.through.as_deref())),
        (
            "foreignKey",
            JsValue::object([
                ("name", JsValue::string(&options.foreign_key.name)),
                ("onUpdate", JsValue::opt_string(options.on_update.as_deref())),
                ("onDelete", JsValue::opt_string(options.on_delete.as_deref())),
            ]),
        ),
        ("targetKey", JsValue::opt_string(options.target_key.as_deref())),
        ("as", JsValue::opt_string(options.alias.as_deref())),
    ])
}
