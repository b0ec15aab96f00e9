use super::types::*;
use super::Schema;
use crate::datatype::TypeSpec;
use crate::error::{GenError, Result};
use crate::naming;
use std::collections::HashMap;
use tracing::{debug, warn};

/// 列定义
#[derive(Debug, Clone)]
pub struct ColumnDef {
    pub name: String,
    pub data_type: TypeSpec,
    pub not_null: bool,
    pub auto_increment: bool,
    pub default_value: Option<String>,
    pub comment: Option<String>,
}

impl ColumnDef {
    pub fn new(name: impl Into<String>, data_type: TypeSpec) -> Self {
        Self {
            name: name.into(),
            data_type,
            not_null: false,
            auto_increment: false,
            default_value: None,
            comment: None,
        }
    }

    pub fn not_null(mut self) -> Self {
        self.not_null = true;
        self
    }

    pub fn auto_increment(mut self) -> Self {
        self.auto_increment = true;
        self
    }

    pub fn default_value(mut self, value: impl Into<String>) -> Self {
        self.default_value = Some(value.into());
        self
    }

    pub fn comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }
}

#[derive(Debug, Clone)]
pub struct IndexDef {
    pub name: String,
    pub columns: Vec<String>,
    pub kind: IndexKind,
}

#[derive(Debug, Clone)]
pub struct ForeignKeyDef {
    pub name: String,
    pub column: String,
    pub referenced_table: String,
    pub referenced_column: String,
    pub on_update: Option<String>,
    pub on_delete: Option<String>,
    pub ignored: bool,
}

impl ForeignKeyDef {
    pub fn new(
        name: impl Into<String>,
        column: impl Into<String>,
        referenced_table: impl Into<String>,
        referenced_column: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            column: column.into(),
            referenced_table: referenced_table.into(),
            referenced_column: referenced_column.into(),
            on_update: None,
            on_delete: None,
            ignored: false,
        }
    }

    pub fn on_update(mut self, rule: impl Into<String>) -> Self {
        self.on_update = Some(rule.into());
        self
    }

    pub fn on_delete(mut self, rule: impl Into<String>) -> Self {
        self.on_delete = Some(rule.into());
        self
    }

    pub fn ignored(mut self) -> Self {
        self.ignored = true;
        self
    }
}

/// 表定义
#[derive(Debug, Clone)]
pub struct TableDef {
    pub name: String,
    pub columns: Vec<ColumnDef>,
    pub indices: Vec<IndexDef>,
    pub foreign_keys: Vec<ForeignKeyDef>,
    pub comment: Option<String>,
}

impl TableDef {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            columns: Vec::new(),
            indices: Vec::new(),
            foreign_keys: Vec::new(),
            comment: None,
        }
    }

    pub fn column(mut self, column: ColumnDef) -> Self {
        self.columns.push(column);
        self
    }

    pub fn primary_key<I, S>(self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.index("PRIMARY", IndexKind::Primary, columns)
    }

    pub fn unique<I, S>(self, name: impl Into<String>, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.index(name, IndexKind::Unique, columns)
    }

    pub fn index<I, S>(mut self, name: impl Into<String>, kind: IndexKind, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.indices.push(IndexDef {
            name: name.into(),
            columns: columns.into_iter().map(Into::into).collect(),
            kind,
        });
        self
    }

    pub fn foreign_key(mut self, fk: ForeignKeyDef) -> Self {
        self.foreign_keys.push(fk);
        self
    }

    pub fn comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }
}

/// 构建选项
#[derive(Debug, Clone, Default)]
pub struct SchemaOptions {
    /// 不生成模型的表
    pub external_tables: Vec<String>,
    /// 需要忽略的外键名称
    pub ignored_foreign_keys: Vec<String>,
    /// 将中间表折叠为两端的多对多关系
    pub collapse_many_to_many: bool,
}

impl From<&crate::config::GeneratorConfig> for SchemaOptions {
    fn from(config: &crate::config::GeneratorConfig) -> Self {
        Self {
            external_tables: config.external_tables.clone(),
            ignored_foreign_keys: config.ignored_foreign_keys.clone(),
            collapse_many_to_many: config.skip_many_to_many_tables,
        }
    }
}

/// 数据库结构构建器
///
/// 收集表定义，在 [`build`](Self::build) 时解析表名、列名引用，
/// 计算唯一列与外键基数，并识别多对多中间表。
#[derive(Debug, Default)]
pub struct SchemaBuilder {
    tables: Vec<TableDef>,
    options: SchemaOptions,
}

impl SchemaBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: SchemaOptions) -> Self {
        Self {
            tables: Vec::new(),
            options,
        }
    }

    pub fn table(mut self, table: TableDef) -> Self {
        self.add_table(table);
        self
    }

    pub fn add_table(&mut self, table: TableDef) {
        if let Some(existing) = self
            .tables
            .iter_mut()
            .find(|t| t.name.eq_ignore_ascii_case(&table.name))
        {
            debug!("表 {} 重复定义，使用后一个定义", table.name);
            *existing = table;
        } else {
            self.tables.push(table);
        }
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    pub fn build(self) -> Result<Schema> {
        let SchemaBuilder { tables: defs, options } = self;

        let ids: HashMap<String, TableId> = defs
            .iter()
            .enumerate()
            .map(|(i, t)| (t.name.to_ascii_lowercase(), TableId(i)))
            .collect();

        let mut tables: Vec<Table> = defs.iter().map(|def| build_table(def, &options)).collect::<Result<_>>()?;
        let mut foreign_keys: Vec<ForeignKey> = Vec::new();
        let mut dangling: Vec<DanglingKey> = Vec::new();

        for (owner_idx, def) in defs.iter().enumerate() {
            let owner = TableId(owner_idx);
            for fk_def in &def.foreign_keys {
                let referenced = ids
                    .get(&fk_def.referenced_table.to_ascii_lowercase())
                    .copied();
                let Some(referenced) = referenced else {
                    dangling.push(drop_dangling(
                        def,
                        fk_def,
                        format!("引用了不存在的表 {}", fk_def.referenced_table),
                    ));
                    continue;
                };

                let Some(local) = tables[owner_idx].column_position(&fk_def.column) else {
                    dangling.push(drop_dangling(
                        def,
                        fk_def,
                        format!("的列 {}.{} 不存在", def.name, fk_def.column),
                    ));
                    continue;
                };

                let Some(foreign) = tables[referenced.0].column_position(&fk_def.referenced_column)
                else {
                    dangling.push(drop_dangling(
                        def,
                        fk_def,
                        format!(
                            "引用的列 {}.{} 不存在",
                            fk_def.referenced_table, fk_def.referenced_column
                        ),
                    ));
                    continue;
                };

                let ignored = fk_def.ignored
                    || options
                        .ignored_foreign_keys
                        .iter()
                        .any(|name| name.eq_ignore_ascii_case(&fk_def.name));

                let id = ForeignKeyId(foreign_keys.len());
                foreign_keys.push(ForeignKey {
                    name: fk_def.name.clone(),
                    owner,
                    local,
                    referenced,
                    foreign,
                    cardinality: cardinality_of(&tables[owner_idx], local),
                    on_update: fk_def.on_update.clone(),
                    on_delete: fk_def.on_delete.clone(),
                    ignored,
                });

                tables[owner_idx].columns[local].foreign_keys.push(id);
                tables[owner_idx].foreign_keys.push(id);
                tables[referenced.0].local_keys.push(id);
            }
        }

        let mut schema = Schema {
            tables,
            foreign_keys,
            dangling,
        };
        mark_junctions(&mut schema, options.collapse_many_to_many);

        debug!(
            "数据库结构构建完成: {} 张表, {} 个外键",
            schema.tables.len(),
            schema.foreign_keys.len()
        );
        Ok(schema)
    }
}

fn drop_dangling(def: &TableDef, fk_def: &ForeignKeyDef, reason: String) -> DanglingKey {
    warn!("外键 {} {}，已忽略", fk_def.name, reason);
    DanglingKey {
        table: def.name.clone(),
        name: fk_def.name.clone(),
        reason,
    }
}

fn build_table(def: &TableDef, options: &SchemaOptions) -> Result<Table> {
    let mut columns: Vec<Column> = def
        .columns
        .iter()
        .map(|c| Column {
            name: c.name.clone(),
            data_type: c.data_type.clone(),
            not_null: c.not_null,
            primary: false,
            unique: false,
            auto_increment: c.auto_increment,
            default_value: c.default_value.clone(),
            foreign_keys: Vec::new(),
            comment: c.comment.clone(),
        })
        .collect();

    let mut indices = Vec::with_capacity(def.indices.len());
    for index_def in &def.indices {
        let positions = index_def
            .columns
            .iter()
            .map(|name| {
                columns
                    .iter()
                    .position(|c| c.name.eq_ignore_ascii_case(name))
                    .ok_or_else(|| {
                        GenError::schema(format!(
                            "索引 {} 的列 {}.{} 不存在",
                            index_def.name, def.name, name
                        ))
                    })
            })
            .collect::<Result<Vec<_>>>()?;

        match index_def.kind {
            IndexKind::Primary => {
                for &pos in &positions {
                    columns[pos].primary = true;
                    columns[pos].not_null = true;
                }
            }
            IndexKind::Unique if positions.len() == 1 => {
                columns[positions[0]].unique = true;
            }
            _ => {}
        }

        indices.push(Index {
            name: index_def.name.clone(),
            columns: positions,
            kind: index_def.kind,
        });
    }

    Ok(Table {
        name: def.name.clone(),
        model_name: naming::model_name(&def.name),
        columns,
        indices,
        local_keys: Vec::new(),
        foreign_keys: Vec::new(),
        many_to_many: Vec::new(),
        junction: false,
        collapsed: false,
        external: options
            .external_tables
            .iter()
            .any(|name| name.eq_ignore_ascii_case(&def.name)),
        comment: def.comment.clone(),
    })
}

/// 本地列唯一，或本地列单独构成主键时为一对一
fn cardinality_of(table: &Table, local: usize) -> Cardinality {
    let sole_primary = table
        .primary_key()
        .is_some_and(|pk| pk.columns.as_slice() == [local]);

    if table.columns[local].unique || sole_primary {
        Cardinality::OneToOne
    } else {
        Cardinality::ManyToOne
    }
}

/// 中间表：恰好两个未忽略的外键指向两张不同的表，其余列都属于主键
fn is_junction(schema: &Schema, table: &Table) -> bool {
    let keys: Vec<&ForeignKey> = table
        .foreign_keys
        .iter()
        .map(|&id| schema.foreign_key(id))
        .filter(|fk| !fk.ignored)
        .collect();

    let [first, second] = keys.as_slice() else {
        return false;
    };
    if first.referenced == second.referenced {
        return false;
    }

    table.columns.iter().enumerate().all(|(pos, column)| {
        pos == first.local || pos == second.local || column.primary
    })
}

fn mark_junctions(schema: &mut Schema, collapse: bool) {
    let junctions: Vec<usize> = (0..schema.tables.len())
        .filter(|&i| is_junction(schema, &schema.tables[i]))
        .collect();

    for idx in junctions {
        schema.tables[idx].junction = true;
        if !collapse {
            continue;
        }

        let keys: Vec<ForeignKeyId> = schema.tables[idx]
            .foreign_keys
            .iter()
            .copied()
            .filter(|&id| !schema.foreign_key(id).ignored)
            .collect();
        let [fk1, fk2] = keys.as_slice() else {
            continue;
        };
        let (fk1, fk2) = (*fk1, *fk2);

        let end1 = schema.foreign_key(fk1).referenced;
        let end2 = schema.foreign_key(fk2).referenced;
        let junction = TableId(idx);

        schema.tables[end1.0].many_to_many.push(ManyToManyRelation {
            reference: fk1,
            target: fk2,
            ref_table: end2,
            junction,
        });
        schema.tables[end2.0].many_to_many.push(ManyToManyRelation {
            reference: fk2,
            target: fk1,
            ref_table: end1,
            junction,
        });

        schema.foreign_keys[fk1.0].ignored = true;
        schema.foreign_keys[fk2.0].ignored = true;
        schema.tables[idx].collapsed = true;

        debug!(
            "中间表 {} 折叠为 {} 与 {} 的多对多关系",
            schema.tables[idx].name, schema.tables[end1.0].name, schema.tables[end2.0].name
        );
    }
}
