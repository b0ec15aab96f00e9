use thiserror::Error;

pub type Result<T> = std::result::Result<T, GenError>;

#[derive(Error, Debug)]
pub enum GenError {
    #[error("配置错误: {0}")]
    Config(#[from] toml::de::Error),

    #[error("IO 错误: {0}")]
    Io(#[from] std::io::Error),

    #[error("正则表达式错误: {0}")]
    Regex(#[from] regex::Error),

    #[error("SQL 解析失败: {0}")]
    Parse(String),

    #[error("数据库结构错误: {0}")]
    Schema(String),

    #[error("模型渲染失败: {table}: {message}")]
    Render { table: String, message: String },

    #[error("配置值无效: {0}")]
    InvalidConfig(String),

    #[error("配置文件未找到")]
    ConfigNotFound,
}

impl GenError {
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }

    pub fn schema(msg: impl Into<String>) -> Self {
        Self::Schema(msg.into())
    }

    pub fn render(table: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::Render {
            table: table.into(),
            message: msg.into(),
        }
    }

    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }
}
