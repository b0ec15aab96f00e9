use super::builder::{ColumnDef, ForeignKeyDef, SchemaBuilder, SchemaOptions, TableDef};
use super::types::IndexKind;
use super::Schema;
use crate::datatype::{SchemaType, TypeSpec};
use crate::error::{GenError, Result};
use regex::Regex;
use sqlparser::ast::{ColumnDef as SqlColumnDef, ColumnOption, DataType, Statement, TableConstraint};
use sqlparser::dialect::MySqlDialect;
use sqlparser::parser::Parser;
use tracing::{debug, info, warn};

/// 解析 SQL 文件中的表结构并构建结构图
pub fn parse_schema(sql_content: &str, options: SchemaOptions) -> Result<Schema> {
    let statements = extract_create_table_statements(sql_content)?;
    let type_regex = type_regex()?;
    let dialect = MySqlDialect {};

    let mut builder = SchemaBuilder::with_options(options);

    for create_table_sql in statements {
        debug!("解析 CREATE TABLE 语句: {}", create_table_sql);

        let parsed = match Parser::parse_sql(&dialect, &create_table_sql) {
            Ok(parsed) => parsed,
            Err(e) => {
                warn!("解析 SQL 语句失败: {} - 错误: {}", create_table_sql, e);
                continue;
            }
        };

        for statement in parsed {
            if let Statement::CreateTable(create_table) = statement {
                let table_name = object_name(&create_table.name.to_string());
                debug!("解析表: {}", table_name);

                let mut table = TableDef::new(&table_name);
                let mut primary_columns = Vec::new();

                for column in &create_table.columns {
                    let parsed_column = parse_column(&table_name, column, &type_regex)?;
                    if parsed_column.primary {
                        primary_columns.push(parsed_column.def.name.clone());
                    }
                    if parsed_column.unique {
                        let name = parsed_column.def.name.clone();
                        table = table.unique(name.clone(), [name]);
                    }
                    if let Some(fk) = parsed_column.foreign_key {
                        table = table.foreign_key(fk);
                    }
                    table = table.column(parsed_column.def);
                }

                if !primary_columns.is_empty() {
                    table = table.primary_key(primary_columns);
                }

                for constraint in &create_table.constraints {
                    table = apply_table_constraint(table, constraint);
                }

                builder.add_table(table);
            }
        }
    }

    if builder.is_empty() && !sql_content.trim().is_empty() {
        warn!("未在 SQL 中找到任何 CREATE TABLE 语句");
    }

    info!("成功解析 {} 个表", builder.len());
    builder.build()
}

/// 从 SQL 内容中提取 CREATE TABLE 语句
pub fn extract_create_table_statements(content: &str) -> Result<Vec<String>> {
    let mut statements = Vec::new();

    let create_table_regex = Regex::new(r"(?i)^\s*CREATE\s+(TEMPORARY\s+)?TABLE")
        .map_err(|e| GenError::parse(format!("正则表达式编译失败: {e}")))?;

    let mut current_statement = String::new();
    let mut in_create_table = false;
    let mut paren_count = 0i32;
    let mut quote: Option<char> = None;
    let mut escape_next = false;

    for line in content.lines() {
        let trimmed = line.trim();

        if quote.is_none()
            && (trimmed.is_empty() || trimmed.starts_with("--") || trimmed.starts_with('#'))
        {
            continue;
        }

        if !in_create_table && create_table_regex.is_match(line) {
            in_create_table = true;
            current_statement.clear();
            paren_count = 0;
            quote = None;
            escape_next = false;
        }

        if !in_create_table {
            continue;
        }

        current_statement.push_str(line);
        current_statement.push('\n');

        for ch in line.chars() {
            if escape_next {
                escape_next = false;
                continue;
            }

            match (ch, quote) {
                ('\\', Some(_)) => escape_next = true,
                (c, Some(q)) if c == q => quote = None,
                (_, Some(_)) => {}
                ('\'' | '"' | '`', None) => quote = Some(ch),
                ('(', None) => paren_count += 1,
                (')', None) => paren_count -= 1,
                (';', None) if paren_count <= 0 => {
                    statements.push(current_statement.trim().to_string());
                    current_statement.clear();
                    in_create_table = false;
                    paren_count = 0;
                    break;
                }
                _ => {}
            }
        }
    }

    // 处理没有分号结尾的语句
    if in_create_table && !current_statement.trim().is_empty() {
        statements.push(current_statement.trim().to_string());
    }

    debug!("提取到 {} 个 CREATE TABLE 语句", statements.len());
    Ok(statements)
}

struct ParsedColumn {
    def: ColumnDef,
    primary: bool,
    unique: bool,
    foreign_key: Option<ForeignKeyDef>,
}

fn parse_column(table_name: &str, column: &SqlColumnDef, type_regex: &Regex) -> Result<ParsedColumn> {
    let column_name = unquote(&column.name.to_string());
    let data_type = parse_data_type(&column.data_type, type_regex)?;

    let mut def = ColumnDef::new(&column_name, data_type);
    let mut primary = false;
    let mut unique = false;
    let mut foreign_key = None;

    for option in &column.options {
        match &option.option {
            ColumnOption::NotNull => def.not_null = true,
            ColumnOption::Default(expr) => {
                let value = expr.to_string();
                if !value.eq_ignore_ascii_case("NULL") {
                    def.default_value = Some(value);
                }
            }
            ColumnOption::Comment(c) => def.comment = Some(c.clone()),
            ColumnOption::Unique { is_primary, .. } => {
                if *is_primary {
                    primary = true;
                    def.not_null = true;
                } else {
                    unique = true;
                }
            }
            ColumnOption::ForeignKey {
                foreign_table,
                referred_columns,
                on_delete,
                on_update,
                ..
            } => {
                let referenced_table = object_name(&foreign_table.to_string());
                let referenced_column = referred_columns
                    .first()
                    .map(|c| unquote(&c.to_string()))
                    .ok_or_else(|| {
                        GenError::schema(format!(
                            "列 {table_name}.{column_name} 的 REFERENCES 缺少被引用列"
                        ))
                    })?;
                let mut fk = ForeignKeyDef::new(
                    format!("fk_{table_name}_{column_name}"),
                    &column_name,
                    referenced_table,
                    referenced_column,
                );
                fk.on_update = on_update.as_ref().map(|a| a.to_string());
                fk.on_delete = on_delete.as_ref().map(|a| a.to_string());
                foreign_key = Some(fk);
            }
            ColumnOption::DialectSpecific(tokens) => {
                let token_str = tokens
                    .iter()
                    .map(|t| t.to_string())
                    .collect::<Vec<_>>()
                    .join(" ")
                    .to_uppercase();
                if token_str.contains("AUTO_INCREMENT") {
                    def.auto_increment = true;
                }
            }
            _ => {}
        }
    }

    Ok(ParsedColumn {
        def,
        primary,
        unique,
        foreign_key,
    })
}

fn apply_table_constraint(table: TableDef, constraint: &TableConstraint) -> TableDef {
    match constraint {
        TableConstraint::PrimaryKey { columns, .. } => {
            table.primary_key(columns.iter().map(|c| index_column_name(&c.to_string())))
        }
        TableConstraint::Unique {
            name,
            index_name,
            columns,
            ..
        } => {
            let column_names: Vec<String> = columns
                .iter()
                .map(|c| index_column_name(&c.to_string()))
                .collect();
            let index_name = index_name
                .as_ref()
                .or(name.as_ref())
                .map(|n| unquote(&n.to_string()))
                .unwrap_or_else(|| format!("unique_{}", column_names.join("_")));
            table.unique(index_name, column_names)
        }
        TableConstraint::Index { name, columns, .. } => {
            let column_names: Vec<String> = columns
                .iter()
                .map(|c| index_column_name(&c.to_string()))
                .collect();
            let index_name = name
                .as_ref()
                .map(|n| unquote(&n.to_string()))
                .unwrap_or_else(|| format!("idx_{}", column_names.join("_")));
            table.index(index_name, IndexKind::Index, column_names)
        }
        TableConstraint::ForeignKey {
            name,
            columns,
            foreign_table,
            referred_columns,
            on_delete,
            on_update,
            ..
        } => {
            let (Some(local), Some(foreign)) = (columns.first(), referred_columns.first()) else {
                warn!("表 {} 的外键约束缺少列定义，已跳过", table.name);
                return table;
            };
            if columns.len() > 1 {
                debug!("表 {} 的复合外键只使用第一列", table.name);
            }

            let local = unquote(&local.to_string());
            let fk_name = name
                .as_ref()
                .map(|n| unquote(&n.to_string()))
                .unwrap_or_else(|| format!("fk_{}_{}", table.name, local));

            let mut fk = ForeignKeyDef::new(
                fk_name,
                local,
                object_name(&foreign_table.to_string()),
                unquote(&foreign.to_string()),
            );
            fk.on_update = on_update.as_ref().map(|a| a.to_string());
            fk.on_delete = on_delete.as_ref().map(|a| a.to_string());
            table.foreign_key(fk)
        }
        _ => table,
    }
}

fn type_regex() -> Result<Regex> {
    Regex::new(
        r"(?i)^\s*([a-z][a-z0-9_]*(?:\s+[a-z][a-z0-9_]*)*?)\s*(?:\((.*)\))?((?:\s+(?:UNSIGNED|SIGNED|ZEROFILL))*)\s*$",
    )
    .map_err(|e| GenError::parse(format!("正则表达式编译失败: {e}")))
}

/// 由渲染后的类型文本解析列类型，例如 `VARCHAR(255)`、`DECIMAL(10,2)`、`ENUM('a','b')`
fn parse_data_type(data_type: &DataType, type_regex: &Regex) -> Result<TypeSpec> {
    let text = data_type.to_string();
    let captures = type_regex
        .captures(&text)
        .ok_or_else(|| GenError::parse(format!("无法识别的列类型: {text}")))?;

    let name = captures.get(1).map_or("", |m| m.as_str());
    let params = captures.get(2).map(|m| m.as_str().trim());
    let ty = SchemaType::from_tag(name);

    let Some(params) = params.filter(|p| !p.is_empty()) else {
        return Ok(TypeSpec::new(ty));
    };

    if matches!(ty, SchemaType::Enum | SchemaType::Set) {
        return Ok(TypeSpec::new(ty).with_params(format!("({params})")));
    }

    let numbers: Vec<u64> = params
        .split(',')
        .filter_map(|p| p.trim().parse().ok())
        .collect();
    let Some(&first) = numbers.first() else {
        debug!("忽略无法识别的类型参数: {}", text);
        return Ok(TypeSpec::new(ty));
    };

    let spec = if ty.takes_length() {
        TypeSpec::new(ty).with_length(first)
    } else if ty.is_temporal() {
        TypeSpec::new(ty.with_fraction()).with_precision(first, None)
    } else {
        TypeSpec::new(ty).with_precision(first, numbers.get(1).copied())
    };
    Ok(spec)
}

/// 去掉标识符两侧的引号
fn unquote(name: &str) -> String {
    name.trim()
        .trim_matches(|c| c == '`' || c == '"' || c == '[' || c == ']')
        .to_string()
}

/// 限定名 `库`.`表` 只保留最后一段，每段分别去掉引号
fn object_name(name: &str) -> String {
    let mut parts = Vec::new();
    let mut current = String::new();
    let mut quote: Option<char> = None;
    for c in name.trim().chars() {
        match (quote, c) {
            (None, '.') => parts.push(std::mem::take(&mut current)),
            (None, '`' | '"') => {
                quote = Some(c);
                current.push(c);
            }
            (None, '[') => {
                quote = Some(']');
                current.push(c);
            }
            (Some(q), _) if c == q => {
                quote = None;
                current.push(c);
            }
            _ => current.push(c),
        }
    }
    parts.push(current);
    parts.last().map(|part| unquote(part)).unwrap_or_default()
}

/// 索引列的显示文本可能带有排序方向或前缀长度
fn index_column_name(text: &str) -> String {
    let name = text.split_whitespace().next().unwrap_or(text);
    let name = name.split('(').next().unwrap_or(name);
    unquote(name)
}
