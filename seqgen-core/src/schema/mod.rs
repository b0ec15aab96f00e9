//! 数据库结构图
//!
//! 表与外键保存在两个数组中，通过 [`TableId`] / [`ForeignKeyId`] 互相引用，
//! 列通过在所属表中的位置引用。结构图构建完成后只读。

mod builder;
mod parser;
mod types;

pub use builder::{ColumnDef, ForeignKeyDef, IndexDef, SchemaBuilder, SchemaOptions, TableDef};
pub use parser::{extract_create_table_statements, parse_schema};
pub use types::*;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Schema {
    tables: Vec<Table>,
    foreign_keys: Vec<ForeignKey>,
    dangling: Vec<DanglingKey>,
}

impl Schema {
    pub fn table(&self, id: TableId) -> &Table {
        &self.tables[id.0]
    }

    pub fn foreign_key(&self, id: ForeignKeyId) -> &ForeignKey {
        &self.foreign_keys[id.0]
    }

    /// 按声明顺序遍历所有表
    pub fn tables(&self) -> impl Iterator<Item = (TableId, &Table)> {
        self.tables
            .iter()
            .enumerate()
            .map(|(i, t)| (TableId(i), t))
    }

    /// 按声明顺序遍历所有外键
    pub fn foreign_keys(&self) -> impl Iterator<Item = (ForeignKeyId, &ForeignKey)> {
        self.foreign_keys
            .iter()
            .enumerate()
            .map(|(i, fk)| (ForeignKeyId(i), fk))
    }

    /// 构建时丢弃的外键
    pub fn dangling_keys(&self) -> &[DanglingKey] {
        &self.dangling
    }

    pub fn table_count(&self) -> usize {
        self.tables.len()
    }

    pub fn find_table(&self, name: &str) -> Option<TableId> {
        self.tables
            .iter()
            .position(|t| t.name.eq_ignore_ascii_case(name))
            .map(TableId)
    }

    pub fn owner(&self, fk: &ForeignKey) -> &Table {
        self.table(fk.owner)
    }

    pub fn referenced(&self, fk: &ForeignKey) -> &Table {
        self.table(fk.referenced)
    }

    /// 外键的本地列
    pub fn local_column(&self, fk: &ForeignKey) -> &Column {
        &self.owner(fk).columns[fk.local]
    }

    /// 外键引用的列
    pub fn foreign_column(&self, fk: &ForeignKey) -> &Column {
        &self.referenced(fk).columns[fk.foreign]
    }
}
