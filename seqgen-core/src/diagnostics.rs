//! 生成过程中的诊断记录
//!
//! 诊断日志与 tracing 输出相互独立：每条记录都会保存在本次运行的日志里，
//! 同时以 debug 级别回显到 tracing。

use serde::Serialize;
use std::fmt;
use std::sync::Mutex;

/// 诊断类别
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum DiagnosticKind {
    /// 同一对模型之间存在多条外键，已生成别名并关闭约束
    AmbiguousRelation,
    /// 别名推导未命中，使用了兜底结果
    HeuristicMiss,
    /// 被忽略的外键
    IgnoredForeignKey,
    /// 无法映射的数据类型
    UnmappedType,
    /// 被跳过的表
    SkippedTable,
    /// 单表渲染失败
    RenderFailure,
}

impl fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::AmbiguousRelation => "ambiguous-relation",
            Self::HeuristicMiss => "heuristic-miss",
            Self::IgnoredForeignKey => "ignored-foreign-key",
            Self::UnmappedType => "unmapped-type",
            Self::SkippedTable => "skipped-table",
            Self::RenderFailure => "render-failure",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub table: String,
    pub message: String,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.kind, self.table, self.message)
    }
}

/// 诊断接收端
pub trait DiagnosticSink: Send + Sync {
    fn record(&self, diagnostic: Diagnostic);

    fn report(&self, kind: DiagnosticKind, table: &str, message: &str) {
        self.record(Diagnostic {
            kind,
            table: table.to_string(),
            message: message.to_string(),
        });
    }
}

/// 线程安全的诊断日志
#[derive(Debug, Default)]
pub struct DiagnosticLog {
    entries: Mutex<Vec<Diagnostic>>,
}

impl DiagnosticLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> Vec<Diagnostic> {
        match self.entries.lock() {
            Ok(entries) => entries.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    pub fn len(&self) -> usize {
        match self.entries.lock() {
            Ok(entries) => entries.len(),
            Err(poisoned) => poisoned.into_inner().len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn count(&self, kind: DiagnosticKind) -> usize {
        self.entries().iter().filter(|d| d.kind == kind).count()
    }

    pub fn into_entries(self) -> Vec<Diagnostic> {
        match self.entries.into_inner() {
            Ok(entries) => entries,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

impl DiagnosticSink for DiagnosticLog {
    fn record(&self, diagnostic: Diagnostic) {
        tracing::debug!("{}", diagnostic);
        match self.entries.lock() {
            Ok(mut entries) => entries.push(diagnostic),
            Err(poisoned) => poisoned.into_inner().push(diagnostic),
        }
    }
}
