use super::GenContext;
use crate::schema::{Index, Table};
use crate::value::{JsObject, JsValue};

/// v6 / v7 的模型选项
pub(super) fn options(ctx: &GenContext<'_>, table: &Table) -> JsValue {
    let mut result = JsObject::new();
    result.insert("sequelize".into(), JsValue::raw("sequelize"));
    result.insert("modelName".into(), JsValue::string(&table.model_name));
    result.insert("tableName".into(), JsValue::string(&table.name));
    result.insert("indexes".into(), indexes(ctx, table, false));
    result.extend(table_props(ctx));
    JsValue::Object(result)
}

/// v5 的模型选项
pub(super) fn legacy_options(ctx: &GenContext<'_>, table: &Table) -> JsValue {
    let mut result = JsObject::new();
    result.insert("tableName".into(), JsValue::string(&table.name));
    result.insert("indexes".into(), indexes(ctx, table, true));
    result.extend(table_props(ctx));
    JsValue::Object(result)
}

/// 公共表属性：先写默认值，再由属性文件覆盖（覆盖时保留原位置）
fn table_props(ctx: &GenContext<'_>) -> JsObject {
    let mut props = JsObject::new();
    props.insert("timestamps".into(), ctx.config.use_timestamps.into());
    props.insert("underscored".into(), false.into());
    props.insert("syncOnAssociation".into(), false.into());

    for (key, value) in ctx.table_props {
        props.insert(key.clone(), JsValue::from(value.clone()));
    }
    props
}

/// 索引定义，没有索引时返回 null
///
/// 只由外键列组成的索引在既不生成外键字段也不生成关联时省略。
fn indexes(ctx: &GenContext<'_>, table: &Table, include_all: bool) -> JsValue {
    let keep_foreign =
        include_all || ctx.config.generate_foreign_key_fields || ctx.config.generate_associations;

    let items: Vec<JsValue> = table
        .indices
        .iter()
        .filter(|index| index.is_unique() || index.is_index())
        .filter(|index| keep_foreign || !is_foreign_index(table, index))
        .map(|index| {
            let fields = table
                .index_column_names(index)
                .into_iter()
                .map(JsValue::String)
                .collect::<Vec<_>>();
            JsValue::object([
                ("name", JsValue::string(&index.name)),
                ("fields", JsValue::inline(JsValue::Array(fields))),
                ("unique", index.is_unique().then_some(true).into()),
            ])
        })
        .collect();

    if items.is_empty() {
        JsValue::Null
    } else {
        JsValue::Array(items)
    }
}

/// 任意一列带外键即视为外键索引
fn is_foreign_index(table: &Table, index: &Index) -> bool {
    index
        .columns
        .iter()
        .any(|&pos| table.columns[pos].has_foreign_keys())
}
