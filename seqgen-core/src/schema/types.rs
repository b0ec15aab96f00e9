use crate::datatype::TypeSpec;
use serde::Serialize;
use std::fmt;

/// 表在 [`Schema`](super::Schema) 中的编号
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct TableId(pub(crate) usize);

/// 外键在 [`Schema`](super::Schema) 中的编号
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct ForeignKeyId(pub(crate) usize);

impl TableId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl ForeignKeyId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// 外键基数
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Cardinality {
    ManyToOne,
    OneToOne,
}

impl Cardinality {
    pub fn is_many_to_one(self) -> bool {
        matches!(self, Self::ManyToOne)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum IndexKind {
    Primary,
    Unique,
    Index,
}

impl fmt::Display for IndexKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Primary => "PRIMARY",
            Self::Unique => "UNIQUE",
            Self::Index => "INDEX",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    pub name: String,
    pub data_type: TypeSpec,
    pub not_null: bool,
    pub primary: bool,
    /// 仅当唯一索引恰好只覆盖这一列时为 true
    pub unique: bool,
    pub auto_increment: bool,
    /// 原始 SQL 默认值文本
    pub default_value: Option<String>,
    pub foreign_keys: Vec<ForeignKeyId>,
    pub comment: Option<String>,
}

impl Column {
    pub fn has_foreign_keys(&self) -> bool {
        !self.foreign_keys.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Index {
    pub name: String,
    /// 列在所属表中的位置
    pub columns: Vec<usize>,
    pub kind: IndexKind,
}

impl Index {
    pub fn is_unique(&self) -> bool {
        self.kind == IndexKind::Unique
    }

    pub fn is_index(&self) -> bool {
        self.kind == IndexKind::Index
    }

    pub fn is_primary(&self) -> bool {
        self.kind == IndexKind::Primary
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForeignKey {
    pub name: String,
    /// 外键所在（拥有外键列）的表
    pub owner: TableId,
    /// 本地列在 `owner` 中的位置
    pub local: usize,
    pub referenced: TableId,
    /// 被引用列在 `referenced` 中的位置
    pub foreign: usize,
    pub cardinality: Cardinality,
    pub on_update: Option<String>,
    pub on_delete: Option<String>,
    pub ignored: bool,
}

impl ForeignKey {
    pub fn is_self_reference(&self) -> bool {
        self.owner == self.referenced
    }
}

/// 引用了不存在的表或列、构建时被丢弃的外键
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DanglingKey {
    /// 外键所在的表
    pub table: String,
    pub name: String,
    pub reason: String,
}

/// 多对多关系：中间表的两个外键挂到两端的表上
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ManyToManyRelation {
    /// 指向当前表的外键
    pub reference: ForeignKeyId,
    /// 指向另一端的外键
    pub target: ForeignKeyId,
    /// 另一端的表
    pub ref_table: TableId,
    pub junction: TableId,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    pub name: String,
    pub model_name: String,
    pub columns: Vec<Column>,
    pub indices: Vec<Index>,
    /// 引用本表的外键（本表为 "一" 端）
    pub local_keys: Vec<ForeignKeyId>,
    /// 本表拥有的外键
    pub foreign_keys: Vec<ForeignKeyId>,
    pub many_to_many: Vec<ManyToManyRelation>,
    /// 满足中间表条件
    pub junction: bool,
    /// 中间表已折叠为两端的多对多关系，不生成文件
    pub collapsed: bool,
    pub external: bool,
    pub comment: Option<String>,
}

impl Table {
    pub fn is_many_to_many(&self) -> bool {
        self.junction
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.column_position(name).map(|pos| &self.columns[pos])
    }

    pub fn column_position(&self, name: &str) -> Option<usize> {
        self.columns
            .iter()
            .position(|c| c.name.eq_ignore_ascii_case(name))
    }

    pub fn primary_key(&self) -> Option<&Index> {
        self.indices.iter().find(|i| i.is_primary())
    }

    pub fn index_column_names(&self, index: &Index) -> Vec<String> {
        index
            .columns
            .iter()
            .map(|&pos| self.columns[pos].name.clone())
            .collect()
    }

    /// 是否需要生成模型文件
    pub fn is_generated(&self) -> bool {
        !self.external && !self.collapsed
    }
}
