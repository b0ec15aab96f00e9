use crate::error::GenError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 目标数据库方言
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dialect {
    #[default]
    None,
    Db2,
    Ibmi,
    Mariadb,
    Mssql,
    Mysql,
    Postgres,
    Snowflake,
    Sqlite,
}

impl Dialect {
    pub const ALL: [Dialect; 9] = [
        Dialect::None,
        Dialect::Db2,
        Dialect::Ibmi,
        Dialect::Mariadb,
        Dialect::Mssql,
        Dialect::Mysql,
        Dialect::Postgres,
        Dialect::Snowflake,
        Dialect::Sqlite,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Db2 => "db2",
            Self::Ibmi => "ibmi",
            Self::Mariadb => "mariadb",
            Self::Mssql => "mssql",
            Self::Mysql => "mysql",
            Self::Postgres => "postgres",
            Self::Snowflake => "snowflake",
            Self::Sqlite => "sqlite",
        }
    }

    /// SQLite 不支持 TEXT / BLOB 的尺寸变体
    pub fn supports_sized_lobs(self) -> bool {
        !matches!(self, Self::Sqlite)
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Dialect {
    type Err = GenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|d| d.as_str() == wanted)
            .ok_or_else(|| GenError::invalid_config(format!("未知的数据库方言: {s}")))
    }
}
