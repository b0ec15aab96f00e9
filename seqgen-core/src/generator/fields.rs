use super::GenContext;
use crate::datatype::ConvertedType;
use crate::diagnostics::DiagnosticKind;
use crate::schema::{Column, Table};
use crate::value::{JsObject, JsValue, quote};

/// v6 / v7 的字段定义
pub(super) fn attributes(ctx: &GenContext<'_>, table: &Table) -> JsValue {
    let mut result = JsObject::new();

    for column in &table.columns {
        if !ctx.config.generate_foreign_key_fields && column.has_foreign_keys() {
            continue;
        }

        let converted = convert(ctx, table, column);
        let mut field = JsObject::new();
        field.insert("type".into(), type_value(&converted, column));
        field.insert(
            ctx.profile.field_key.into(),
            JsValue::string(&column.name),
        );
        if column.primary {
            field.insert("primaryKey".into(), true.into());
        }
        if column.unique {
            field.insert("unique".into(), true.into());
        }
        if column.auto_increment {
            field.insert("autoIncrement".into(), true.into());
        } else if column.not_null {
            field.insert("allowNull".into(), false.into());
        }
        if let Some(default) = &column.default_value {
            field.insert("defaultValue".into(), default_value(&converted, default));
        }

        for &fk_id in &column.foreign_keys {
            let fk = ctx.schema.foreign_key(fk_id);
            let references = JsValue::object([
                (
                    ctx.profile.references_key,
                    JsValue::string(&ctx.schema.referenced(fk).name),
                ),
                (
                    "key",
                    JsValue::string(ctx.config.naming_strategy.apply(&ctx.schema.foreign_column(fk).name)),
                ),
            ]);
            field.insert("references".into(), references);
            if let Some(rule) = fk.on_update.as_deref().filter(|r| !r.is_empty()) {
                field.insert("onUpdate".into(), JsValue::string(rule.to_uppercase()));
            }
            if let Some(rule) = fk.on_delete.as_deref().filter(|r| !r.is_empty()) {
                field.insert("onDelete".into(), JsValue::string(rule.to_uppercase()));
            }
        }

        result.insert(
            ctx.config.naming_strategy.apply(&column.name),
            JsValue::Object(field),
        );
    }

    JsValue::Object(result)
}

/// v5 的字段定义：以原始列名为键，只包含类型、主键、自增与非空
pub(super) fn legacy_attributes(ctx: &GenContext<'_>, table: &Table) -> JsValue {
    let mut result = JsObject::new();

    for column in &table.columns {
        let converted = convert(ctx, table, column);
        let mut field = JsObject::new();
        field.insert("type".into(), type_value(&converted, column));
        if column.primary {
            field.insert("primaryKey".into(), true.into());
        }
        if column.auto_increment {
            field.insert("autoIncrement".into(), true.into());
        } else if column.not_null {
            field.insert("allowNull".into(), false.into());
        }
        result.insert(column.name.clone(), JsValue::Object(field));
    }

    JsValue::Object(result)
}

fn convert(ctx: &GenContext<'_>, table: &Table, column: &Column) -> ConvertedType {
    let converted = ctx.converter.convert(&column.data_type);
    if !converted.mapped {
        ctx.sink.report(
            DiagnosticKind::UnmappedType,
            &table.name,
            &format!(
                "列 {} 的类型 {} 无法映射，使用 {}",
                column.name, column.data_type, converted.full
            ),
        );
    }
    converted
}

fn type_value(converted: &ConvertedType, column: &Column) -> JsValue {
    if converted.mapped {
        JsValue::raw(converted.expression())
    } else {
        JsValue::raw(format!(
            "{} /* 未映射的列类型: {} */",
            converted.expression(),
            column.data_type
        ))
    }
}

/// 默认值：时间类型转换为 `sequelize.fn` / `sequelize.literal`，布尔类型转换为布尔值，其余原样输出
pub(super) fn default_value(converted: &ConvertedType, default: &str) -> JsValue {
    let default = default.trim();

    if converted.is_temporal() {
        if default.ends_with(')') {
            let function = default.split('(').next().unwrap_or(default).trim();
            JsValue::raw(format!("sequelize.fn({})", quote(function)))
        } else {
            JsValue::raw(format!("sequelize.literal({})", quote(default)))
        }
    } else if converted.is_boolean() {
        let literal = default
            .trim_matches(|c| c == '\'' || c == '"')
            .to_ascii_lowercase();
        JsValue::Bool(!matches!(literal.as_str(), "" | "0" | "false" | "b'0'"))
    } else {
        JsValue::raw(default)
    }
}
