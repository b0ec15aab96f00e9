/// 按行收集生成代码，维护当前缩进层级
#[derive(Debug, Clone)]
pub struct CodeWriter {
    lines: Vec<String>,
    indent_unit: String,
    level: usize,
}

impl CodeWriter {
    pub fn new(indent_unit: impl Into<String>) -> Self {
        Self {
            lines: Vec::new(),
            indent_unit: indent_unit.into(),
            level: 0,
        }
    }

    pub fn indent(&mut self) -> &mut Self {
        self.level += 1;
        self
    }

    pub fn outdent(&mut self) -> &mut Self {
        self.level = self.level.saturating_sub(1);
        self
    }

    /// 写入一段文本，多行文本的每一行都按当前层级缩进
    pub fn write(&mut self, text: impl AsRef<str>) -> &mut Self {
        let prefix = self.indent_unit.repeat(self.level);
        let text = text.as_ref();
        if text.is_empty() {
            self.lines.push(String::new());
            return self;
        }
        for line in text.lines() {
            if line.is_empty() {
                self.lines.push(String::new());
            } else {
                self.lines.push(format!("{prefix}{line}"));
            }
        }
        self
    }

    pub fn write_if(&mut self, condition: bool, text: impl AsRef<str>) -> &mut Self {
        if condition {
            self.write(text);
        }
        self
    }

    pub fn blank(&mut self) -> &mut Self {
        self.write("")
    }

    pub fn level(&self) -> usize {
        self.level
    }

    /// 输出文本，以换行结尾
    pub fn finish(self) -> String {
        let mut content = self.lines.join("\n");
        content.push('\n');
        content
    }
}
