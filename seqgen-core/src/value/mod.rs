//! 结构化值与 JavaScript 字面量渲染
//!
//! [`JsValue`] 描述生成代码中嵌入的对象字面量：一部分是需要加引号的字面值，
//! 一部分是原样输出的代码片段（例如 `DataTypes.INTEGER`）。

mod render;

pub use render::{Renderer, quote};

use indexmap::IndexMap;

/// 有序的对象字面量
pub type JsObject = IndexMap<String, JsValue>;

#[derive(Debug, Clone, PartialEq)]
pub enum JsValue {
    Null,
    Bool(bool),
    Number(serde_json::Number),
    String(String),
    /// 原样输出的代码
    Raw(String),
    Object(JsObject),
    Array(Vec<JsValue>),
    /// 强制单行输出的子树
    Inline(Box<JsValue>),
}

impl JsValue {
    pub fn raw(code: impl Into<String>) -> Self {
        Self::Raw(code.into())
    }

    pub fn string(text: impl Into<String>) -> Self {
        Self::String(text.into())
    }

    pub fn inline(value: JsValue) -> Self {
        Self::Inline(Box::new(value))
    }

    pub fn object<K, I>(entries: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, JsValue)>,
    {
        Self::Object(entries.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    /// 可选字符串，`None` 映射为 null
    pub fn opt_string(text: Option<impl Into<String>>) -> Self {
        text.map_or(Self::Null, |t| Self::String(t.into()))
    }

    /// `Inline` 包装不改变取值，同样按内部值判断
    pub fn is_null(&self) -> bool {
        match self {
            Self::Null => true,
            Self::Inline(inner) => inner.is_null(),
            _ => false,
        }
    }

    pub fn as_object(&self) -> Option<&JsObject> {
        match self {
            Self::Object(map) => Some(map),
            Self::Inline(inner) => inner.as_object(),
            _ => None,
        }
    }

    /// 按键取对象成员
    pub fn get(&self, key: &str) -> Option<&JsValue> {
        self.as_object().and_then(|map| map.get(key))
    }
}

impl From<bool> for JsValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for JsValue {
    fn from(value: i64) -> Self {
        Self::Number(value.into())
    }
}

impl From<u64> for JsValue {
    fn from(value: u64) -> Self {
        Self::Number(value.into())
    }
}

impl From<f64> for JsValue {
    fn from(value: f64) -> Self {
        serde_json::Number::from_f64(value).map_or(Self::Null, Self::Number)
    }
}

impl From<&str> for JsValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for JsValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<Vec<JsValue>> for JsValue {
    fn from(value: Vec<JsValue>) -> Self {
        Self::Array(value)
    }
}

impl From<JsObject> for JsValue {
    fn from(value: JsObject) -> Self {
        Self::Object(value)
    }
}

impl<T: Into<JsValue>> From<Option<T>> for JsValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

impl From<serde_json::Value> for JsValue {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Self::Null,
            serde_json::Value::Bool(b) => Self::Bool(b),
            serde_json::Value::Number(n) => Self::Number(n),
            serde_json::Value::String(s) => Self::String(s),
            serde_json::Value::Array(items) => {
                Self::Array(items.into_iter().map(Self::from).collect())
            }
            serde_json::Value::Object(map) => {
                Self::Object(map.into_iter().map(|(k, v)| (k, Self::from(v))).collect())
            }
        }
    }
}
