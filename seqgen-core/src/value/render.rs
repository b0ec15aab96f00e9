use super::{JsObject, JsValue};

/// 对象字面量渲染器
///
/// 多行模式下每层嵌套缩进一个单位；null 成员不输出；
/// 同一个值多次渲染得到相同文本。
#[derive(Debug, Clone)]
pub struct Renderer {
    indent: String,
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new("    ")
    }
}

impl Renderer {
    pub fn new(indent: impl Into<String>) -> Self {
        Self {
            indent: indent.into(),
        }
    }

    /// 多行渲染，首行不缩进，后续行相对 `level` 缩进
    pub fn render(&self, value: &JsValue) -> String {
        self.render_at(value, 0)
    }

    pub fn render_at(&self, value: &JsValue, level: usize) -> String {
        let mut out = String::new();
        self.write_value(&mut out, value, level);
        out
    }

    /// 单行渲染
    pub fn render_inline(&self, value: &JsValue) -> String {
        let mut out = String::new();
        write_inline(&mut out, value);
        out
    }

    fn pad(&self, level: usize) -> String {
        self.indent.repeat(level)
    }

    fn write_value(&self, out: &mut String, value: &JsValue, level: usize) {
        match value {
            JsValue::Object(map) => self.write_object(out, map, level),
            JsValue::Array(items) => self.write_array(out, items, level),
            JsValue::Inline(inner) => write_inline(out, inner),
            JsValue::Raw(code) => self.write_raw(out, code, level),
            scalar => write_inline(out, scalar),
        }
    }

    fn write_object(&self, out: &mut String, map: &JsObject, level: usize) {
        let entries: Vec<_> = map.iter().filter(|(_, v)| !v.is_null()).collect();
        if entries.is_empty() {
            out.push_str("{}");
            return;
        }

        let inner = self.pad(level + 1);
        out.push_str("{\n");
        for (i, (key, value)) in entries.iter().enumerate() {
            out.push_str(&inner);
            write_key(out, key);
            out.push_str(": ");
            self.write_value(out, value, level + 1);
            if i + 1 < entries.len() {
                out.push(',');
            }
            out.push('\n');
        }
        out.push_str(&self.pad(level));
        out.push('}');
    }

    fn write_array(&self, out: &mut String, items: &[JsValue], level: usize) {
        if items.is_empty() {
            out.push_str("[]");
            return;
        }

        let inner = self.pad(level + 1);
        out.push_str("[\n");
        for (i, item) in items.iter().enumerate() {
            out.push_str(&inner);
            self.write_value(out, item, level + 1);
            if i + 1 < items.len() {
                out.push(',');
            }
            out.push('\n');
        }
        out.push_str(&self.pad(level));
        out.push(']');
    }

    fn write_raw(&self, out: &mut String, code: &str, level: usize) {
        let pad = self.pad(level);
        for (i, line) in code.lines().enumerate() {
            if i > 0 {
                out.push('\n');
                if !line.is_empty() {
                    out.push_str(&pad);
                }
            }
            out.push_str(line);
        }
    }
}

fn write_inline(out: &mut String, value: &JsValue) {
    match value {
        JsValue::Null => out.push_str("null"),
        JsValue::Bool(b) => out.push_str(if *b { "true" } else { "false" }),
        JsValue::Number(n) => out.push_str(&n.to_string()),
        JsValue::String(s) => write_string(out, s),
        JsValue::Raw(code) => out.push_str(code),
        JsValue::Inline(inner) => write_inline(out, inner),
        JsValue::Object(map) => {
            let entries: Vec<_> = map.iter().filter(|(_, v)| !v.is_null()).collect();
            if entries.is_empty() {
                out.push_str("{}");
                return;
            }
            out.push_str("{ ");
            for (i, (key, value)) in entries.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                write_key(out, key);
                out.push_str(": ");
                write_inline(out, value);
            }
            out.push_str(" }");
        }
        JsValue::Array(items) => {
            out.push('[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                write_inline(out, item);
            }
            out.push(']');
        }
    }
}

/// 是否可以作为不加引号的对象键
fn is_identifier(key: &str) -> bool {
    let mut chars = key.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' || c == '$' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}

fn write_key(out: &mut String, key: &str) {
    if is_identifier(key) {
        out.push_str(key);
    } else {
        write_string(out, key);
    }
}

/// 单引号字符串字面量
pub(crate) fn write_string(out: &mut String, text: &str) {
    out.push('\'');
    for c in text.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            other => out.push(other),
        }
    }
    out.push('\'');
}

/// 转义为单引号字符串字面量
pub fn quote(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 2);
    write_string(&mut out, text);
    out
}
