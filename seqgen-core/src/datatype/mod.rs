//! 数据库列类型到 Sequelize `DataTypes` 的转换

mod dialect;

pub use dialect::Dialect;

use crate::constants::generator::FALLBACK_TYPE;
use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::fmt;

/// 数据库结构中的列类型标签
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SchemaType {
    TinyInt,
    SmallInt,
    MediumInt,
    Int,
    BigInt,
    Float,
    Double,
    Decimal,
    Char,
    NChar,
    VarChar,
    NVarChar,
    Json,
    Binary,
    VarBinary,
    TinyText,
    Text,
    MediumText,
    LongText,
    TinyBlob,
    Blob,
    MediumBlob,
    LongBlob,
    DateTime,
    DateTimeF,
    Date,
    DateF,
    Time,
    TimeF,
    Timestamp,
    TimestampF,
    Year,
    Geometry,
    LineString,
    Polygon,
    MultiPoint,
    MultiLineString,
    MultiPolygon,
    GeometryCollection,
    Bit,
    Enum,
    Set,
    // 用户类型
    Boolean,
    Bool,
    Fixed,
    Float4,
    Float8,
    Int1,
    Int2,
    Int3,
    Int4,
    Int8,
    Integer,
    LongVarBinary,
    LongVarChar,
    Long,
    MiddleInt,
    Numeric,
    Dec,
    Character,
    /// 无法识别的类型，保留原始标签
    Other(String),
}

static TAGS: Lazy<HashMap<&'static str, SchemaType>> = Lazy::new(|| {
    use SchemaType::*;
    HashMap::from([
        ("TINYINT", TinyInt),
        ("SMALLINT", SmallInt),
        ("MEDIUMINT", MediumInt),
        ("INT", Int),
        ("BIGINT", BigInt),
        ("FLOAT", Float),
        ("DOUBLE", Double),
        ("DECIMAL", Decimal),
        ("CHAR", Char),
        ("NCHAR", NChar),
        ("VARCHAR", VarChar),
        ("NVARCHAR", NVarChar),
        ("JSON", Json),
        ("BINARY", Binary),
        ("VARBINARY", VarBinary),
        ("TINYTEXT", TinyText),
        ("TEXT", Text),
        ("MEDIUMTEXT", MediumText),
        ("LONGTEXT", LongText),
        ("TINYBLOB", TinyBlob),
        ("BLOB", Blob),
        ("MEDIUMBLOB", MediumBlob),
        ("LONGBLOB", LongBlob),
        ("DATETIME", DateTime),
        ("DATETIME_F", DateTimeF),
        ("DATE", Date),
        ("DATE_F", DateF),
        ("TIME", Time),
        ("TIME_F", TimeF),
        ("TIMESTAMP", Timestamp),
        ("TIMESTAMP_F", TimestampF),
        ("YEAR", Year),
        ("GEOMETRY", Geometry),
        ("LINESTRING", LineString),
        ("POLYGON", Polygon),
        ("MULTIPOINT", MultiPoint),
        ("MULTILINESTRING", MultiLineString),
        ("MULTIPOLYGON", MultiPolygon),
        ("GEOMETRYCOLLECTION", GeometryCollection),
        ("BIT", Bit),
        ("ENUM", Enum),
        ("SET", Set),
        ("BOOLEAN", Boolean),
        ("BOOL", Bool),
        ("FIXED", Fixed),
        ("FLOAT4", Float4),
        ("FLOAT8", Float8),
        ("INT1", Int1),
        ("INT2", Int2),
        ("INT3", Int3),
        ("INT4", Int4),
        ("INT8", Int8),
        ("INTEGER", Integer),
        ("LONG VARBINARY", LongVarBinary),
        ("LONG VARCHAR", LongVarChar),
        ("LONG", Long),
        ("MIDDLEINT", MiddleInt),
        ("NUMERIC", Numeric),
        ("DEC", Dec),
        ("CHARACTER", Character),
    ])
});

impl SchemaType {
    /// 由类型标签解析，忽略大小写与多余空白
    pub fn from_tag(tag: &str) -> Self {
        let normalized = tag
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ")
            .to_ascii_uppercase();
        TAGS.get(normalized.as_str())
            .cloned()
            .unwrap_or(SchemaType::Other(normalized))
    }

    pub fn tag(&self) -> &str {
        if let SchemaType::Other(tag) = self {
            return tag;
        }
        TAGS.iter()
            .find(|(_, ty)| *ty == self)
            .map(|(tag, _)| *tag)
            .unwrap_or(FALLBACK_TYPE)
    }

    /// 带小数秒精度的时间类型变体
    pub fn with_fraction(self) -> Self {
        match self {
            SchemaType::DateTime => SchemaType::DateTimeF,
            SchemaType::Date => SchemaType::DateF,
            SchemaType::Time => SchemaType::TimeF,
            SchemaType::Timestamp => SchemaType::TimestampF,
            other => other,
        }
    }

    pub fn is_temporal(&self) -> bool {
        use SchemaType::*;
        matches!(
            self,
            DateTime | DateTimeF | Date | DateF | Time | TimeF | Timestamp | TimestampF
        )
    }

    /// 括号中的数字表示长度（而不是精度）的类型
    pub fn takes_length(&self) -> bool {
        use SchemaType::*;
        matches!(
            self,
            Char | NChar
                | VarChar
                | NVarChar
                | Binary
                | VarBinary
                | Bit
                | Text
                | Blob
                | LongVarChar
                | LongVarBinary
                | Character
        )
    }
}

impl fmt::Display for SchemaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// 列类型及其参数
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeSpec {
    pub ty: SchemaType,
    pub length: Option<u64>,
    pub precision: Option<u64>,
    pub scale: Option<u64>,
    /// 显式参数，例如 ENUM 的 `('a','b')`
    pub explicit_params: Option<String>,
}

impl TypeSpec {
    pub fn new(ty: SchemaType) -> Self {
        Self {
            ty,
            length: None,
            precision: None,
            scale: None,
            explicit_params: None,
        }
    }

    pub fn with_length(mut self, length: u64) -> Self {
        self.length = Some(length);
        self
    }

    pub fn with_precision(mut self, precision: u64, scale: Option<u64>) -> Self {
        self.precision = Some(precision);
        self.scale = scale;
        self
    }

    pub fn with_params(mut self, params: impl Into<String>) -> Self {
        self.explicit_params = Some(params.into());
        self
    }
}

impl fmt::Display for TypeSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.ty)?;
        if let Some(params) = &self.explicit_params {
            write!(f, "{params}")
        } else if let Some(length) = self.length {
            write!(f, "({length})")
        } else if let Some(precision) = self.precision {
            match self.scale {
                Some(scale) => write!(f, "({precision},{scale})"),
                None => write!(f, "({precision})"),
            }
        } else {
            Ok(())
        }
    }
}

/// 类型风格：v7 区分纯日期与时间
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TypeFlavour {
    #[default]
    Standard,
    V7,
}

/// 转换结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertedType {
    /// 不含尺寸的基础类型，例如 `DATE`、`TEXT('tiny')`
    pub base: String,
    /// 完整类型，例如 `STRING(255)`
    pub full: String,
    /// 是否命中映射表
    pub mapped: bool,
}

impl ConvertedType {
    /// `DataTypes.X` 形式的代码
    pub fn expression(&self) -> String {
        format!("DataTypes.{}", self.full)
    }

    pub fn is_temporal(&self) -> bool {
        matches!(self.base.as_str(), "DATE" | "DATEONLY" | "TIME")
    }

    pub fn is_boolean(&self) -> bool {
        self.base == "BOOLEAN"
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct DatatypeConverter {
    dialect: Dialect,
    flavour: TypeFlavour,
}

impl DatatypeConverter {
    pub fn new(dialect: Dialect, flavour: TypeFlavour) -> Self {
        Self { dialect, flavour }
    }

    /// 映射表查询，包含版本风格与方言调整
    pub fn base_type(&self, ty: &SchemaType) -> Option<&'static str> {
        use SchemaType::*;

        let dialect_ty = match ty {
            TinyText | MediumText | LongText if !self.dialect.supports_sized_lobs() => &Text,
            TinyBlob | MediumBlob | LongBlob if !self.dialect.supports_sized_lobs() => &Blob,
            other => other,
        };

        if self.flavour == TypeFlavour::V7 {
            match dialect_ty {
                Date | DateF => return Some("DATEONLY"),
                Time | TimeF => return Some("TIME"),
                _ => {}
            }
        }

        let mapped = match dialect_ty {
            TinyInt => "TINYINT",
            SmallInt => "SMALLINT",
            MediumInt => "MEDIUMINT",
            Int => "INTEGER",
            BigInt => "BIGINT",
            Float => "FLOAT",
            Double => "DOUBLE",
            Decimal => "DECIMAL",
            Char | NChar | VarChar | NVarChar => "STRING",
            Json => "JSON",
            Binary | VarBinary => "BLOB",
            TinyText => "TEXT('tiny')",
            Text => "TEXT",
            MediumText => "TEXT('medium')",
            LongText => "TEXT('long')",
            TinyBlob => "BLOB('tiny')",
            Blob => "BLOB",
            MediumBlob => "BLOB('medium')",
            LongBlob => "BLOB('long')",
            DateTime | DateTimeF | Date | DateF | Time | TimeF | Timestamp | TimestampF => "DATE",
            Year => "INTEGER",
            Geometry => "GEOMETRY",
            LineString | Polygon | MultiPoint | MultiLineString | MultiPolygon
            | GeometryCollection => "STRING",
            Bit => "INTEGER",
            Enum => "ENUM",
            Set => "STRING",
            Boolean | Bool => "BOOLEAN",
            Fixed | Float4 | Float8 | Int1 | Int2 | Int3 | Int4 | Int8 | Integer => "INTEGER",
            LongVarBinary | LongVarChar => "STRING",
            Long | MiddleInt | Numeric | Dec => "INTEGER",
            Character => "STRING",
            Other(_) => return None,
        };
        Some(mapped)
    }

    /// 转换完整列类型
    pub fn convert(&self, spec: &TypeSpec) -> ConvertedType {
        if spec.ty == SchemaType::TinyInt && spec.precision == Some(1) {
            return ConvertedType {
                base: "BOOLEAN".to_string(),
                full: "BOOLEAN".to_string(),
                mapped: true,
            };
        }

        let (base, mapped) = match self.base_type(&spec.ty) {
            Some(base) => (base.to_string(), true),
            None => {
                tracing::warn!("无法映射的列类型 {}，使用 {}", spec.ty, FALLBACK_TYPE);
                (FALLBACK_TYPE.to_string(), false)
            }
        };

        let full = match (&spec.ty, &spec.explicit_params, spec.precision) {
            (SchemaType::Enum, Some(params), _) => format!("{base}{params}"),
            (SchemaType::Decimal, _, Some(precision)) => {
                format!("{base}({precision}, {})", spec.scale.unwrap_or(0))
            }
            _ => match spec.length {
                Some(length) if length > 0 => format!("{base}({length})"),
                _ => base.clone(),
            },
        };

        ConvertedType { base, full, mapped }
    }
}
