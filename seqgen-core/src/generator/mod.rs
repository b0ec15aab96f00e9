//! 模型代码生成
//!
//! 每张需要生成的表对应一个 [`GeneratedUnit`]。单表渲染失败会记录在
//! [`GenerationReport`] 中，其余表照常生成。

mod body;
mod fields;
mod options;
mod output;
mod writer;


pub use output::{GeneratedUnit, write_units};
pub use writer::CodeWriter;

use crate::association::{AssociationResolver, BodyStyle, ResolverSettings, TargetProfile};
use crate::config::GeneratorConfig;
use crate::datatype::DatatypeConverter;
use crate::diagnostics::{Diagnostic, DiagnosticKind, DiagnosticLog, DiagnosticSink};
use crate::error::{GenError, Result};
use crate::schema::{Schema, Table, TableId};
use crate::value::Renderer;
use indexmap::IndexMap;
use serde::Serialize;
use std::fmt;
use tracing::{info, warn};

/// 表被跳过的原因
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum SkipReason {
    External,
    ManyToManyJunction,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::External => f.write_str("外部表"),
            Self::ManyToManyJunction => f.write_str("多对多中间表"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedTable {
    pub table: String,
    pub reason: SkipReason,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FailedTable {
    pub table: String,
    pub message: String,
}

/// 一次生成的结果
#[derive(Debug, Clone, Default, Serialize)]
pub struct GenerationReport {
    pub units: Vec<GeneratedUnit>,
    pub skipped: Vec<SkippedTable>,
    pub failures: Vec<FailedTable>,
    pub diagnostics: Vec<Diagnostic>,
}

impl GenerationReport {
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn unit(&self, model_name: &str) -> Option<&GeneratedUnit> {
        self.units.iter().find(|u| u.model_name == model_name)
    }

    pub fn count(&self, kind: DiagnosticKind) -> usize {
        self.diagnostics.iter().filter(|d| d.kind == kind).count()
    }
}

/// 单表渲染时共享的上下文
pub(crate) struct GenContext<'a> {
    pub schema: &'a Schema,
    pub config: &'a GeneratorConfig,
    pub profile: &'a TargetProfile,
    pub converter: DatatypeConverter,
    pub renderer: Renderer,
    pub table_props: &'a IndexMap<String, serde_json::Value>,
    pub sink: &'a dyn DiagnosticSink,
}

/// 模型生成器
pub struct ModelGenerator<'a> {
    schema: &'a Schema,
    config: &'a GeneratorConfig,
    profile: TargetProfile,
    table_props: IndexMap<String, serde_json::Value>,
}

impl<'a> ModelGenerator<'a> {
    pub fn new(schema: &'a Schema, config: &'a GeneratorConfig) -> Self {
        Self {
            schema,
            config,
            profile: TargetProfile::for_target(config.target),
            table_props: IndexMap::new(),
        }
    }

    /// 设置公共表属性（通常来自 `table_prop_file`）
    pub fn with_table_props(mut self, props: IndexMap<String, serde_json::Value>) -> Self {
        self.table_props = props;
        self
    }

    pub fn profile(&self) -> &TargetProfile {
        &self.profile
    }

    fn resolver(&self) -> Option<AssociationResolver<'a>> {
        (self.config.generate_associations && self.profile.supports_associations()).then(|| {
            AssociationResolver::new(
                self.schema,
                ResolverSettings::new(self.config, &self.profile),
            )
        })
    }

    fn skip_reason(&self, table: &Table) -> Option<SkipReason> {
        if table.external || self.config.is_external_table(&table.name) {
            Some(SkipReason::External)
        } else if table.collapsed {
            Some(SkipReason::ManyToManyJunction)
        } else {
            None
        }
    }

    /// 生成所有表的模型代码
    pub fn generate(&self) -> GenerationReport {
        info!(
            "开始生成模型: 目标 {}，共 {} 张表",
            self.profile.version,
            self.schema.table_count()
        );

        let log = DiagnosticLog::new();
        let resolver = self.resolver();
        let mut report = GenerationReport::default();

        for key in self.schema.dangling_keys() {
            log.report(
                DiagnosticKind::IgnoredForeignKey,
                &key.table,
                &format!("外键 {} {}，已忽略", key.name, key.reason),
            );
        }

        for (id, table) in self.schema.tables() {
            if let Some(reason) = self.skip_reason(table) {
                log.report(DiagnosticKind::SkippedTable, &table.name, &reason.to_string());
                report.skipped.push(SkippedTable {
                    table: table.name.clone(),
                    reason,
                });
                continue;
            }

            match self.render_table(id, resolver.as_ref(), &log) {
                Ok(unit) => report.units.push(unit),
                Err(e) => {
                    warn!("表 {} 生成失败: {}", table.name, e);
                    log.report(DiagnosticKind::RenderFailure, &table.name, &e.to_string());
                    report.failures.push(FailedTable {
                        table: table.name.clone(),
                        message: e.to_string(),
                    });
                }
            }
        }

        report.diagnostics = log.into_entries();
        info!(
            "模型生成完成: 生成 {} 个，跳过 {} 个，失败 {} 个，诊断 {} 条",
            report.units.len(),
            report.skipped.len(),
            report.failures.len(),
            report.diagnostics.len()
        );
        report
    }

    /// 生成单张表，不检查是否应跳过
    pub fn generate_table(&self, id: TableId, sink: &dyn DiagnosticSink) -> Result<GeneratedUnit> {
        let resolver = self.resolver();
        self.render_table(id, resolver.as_ref(), sink)
    }

    fn render_table(
        &self,
        id: TableId,
        resolver: Option<&AssociationResolver<'_>>,
        sink: &dyn DiagnosticSink,
    ) -> Result<GeneratedUnit> {
        let table = self.schema.table(id);
        if table.columns.is_empty() {
            return Err(GenError::render(&table.name, "表没有任何列"));
        }

        let ctx = GenContext {
            schema: self.schema,
            config: self.config,
            profile: &self.profile,
            converter: DatatypeConverter::new(self.config.dialect, self.profile.flavour),
            renderer: Renderer::new(self.config.indent_unit()),
            table_props: &self.table_props,
            sink,
        };

        let content = match self.profile.body_style {
            BodyStyle::Legacy => body::legacy_body(&ctx, table),
            BodyStyle::Define => {
                let descriptors = match resolver {
                    Some(resolver) => resolver.resolve(id, sink)?,
                    None => Vec::new(),
                };
                body::define_body(&ctx, table, &descriptors)
            }
        };

        Ok(GeneratedUnit::new(
            &table.name,
            &table.model_name,
            &self.config.file_extension,
            content,
        ))
    }
}
