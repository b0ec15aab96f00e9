use super::alias::{AliasNamer, extract_qualifier};
use super::ambiguity::AmbiguityIndex;
use super::profile::TargetProfile;
use super::types::*;
use crate::config::GeneratorConfig;
use crate::diagnostics::{DiagnosticKind, DiagnosticSink};
use crate::error::Result;
use crate::naming::{NamingStrategy, Pluralizer};
use crate::schema::{Cardinality, ForeignKey, ForeignKeyId, ManyToManyRelation, Schema, Table, TableId};
use std::collections::{HashMap, HashSet};
use tracing::debug;

/// 关联推导设置
#[derive(Debug, Clone, Copy)]
pub struct ResolverSettings {
    /// 字段名（外键名、目标键）的命名策略
    pub naming: NamingStrategy,
    pub aliases: AliasNamer,
}

impl ResolverSettings {
    pub fn new(config: &GeneratorConfig, profile: &TargetProfile) -> Self {
        Self {
            naming: config.naming_strategy,
            aliases: AliasNamer {
                association_naming: profile.association_naming,
                pluralizer: Pluralizer::new(config.pluralize_aliases),
                alias_always: config.association_alias_always,
            },
        }
    }
}

/// 关联推导器
///
/// 创建时对整个结构图的外键做一次歧义计数，之后按表输出有序的关联描述：
/// 先是引用本表的外键，再是本表拥有的外键，最后是多对多关系。
pub struct AssociationResolver<'a> {
    schema: &'a Schema,
    index: AmbiguityIndex,
    settings: ResolverSettings,
}

impl<'a> AssociationResolver<'a> {
    pub fn new(schema: &'a Schema, settings: ResolverSettings) -> Self {
        let index = AmbiguityIndex::build(schema);
        for (a, b, count) in index.ambiguous_pairs() {
            debug!("模型 {} 与 {} 之间有 {} 个外键，将生成别名并关闭约束", a, b, count);
        }
        Self {
            schema,
            index,
            settings,
        }
    }

    pub fn ambiguity(&self) -> &AmbiguityIndex {
        &self.index
    }

    pub fn resolve(&self, table_id: TableId, sink: &dyn DiagnosticSink) -> Result<Vec<AssociationDescriptor>> {
        let table = self.schema.table(table_id);
        let mut descriptors = Vec::new();

        for &fk_id in &table.local_keys {
            let fk = self.schema.foreign_key(fk_id);
            if fk.ignored {
                self.report_ignored(table, fk, sink);
                continue;
            }
            descriptors.push(self.local_relation(table, fk_id, fk, sink));
        }

        for &fk_id in &table.foreign_keys {
            let fk = self.schema.foreign_key(fk_id);
            if fk.ignored {
                self.report_ignored(table, fk, sink);
                continue;
            }
            descriptors.push(self.foreign_relation(table, fk_id, fk, sink)?);
        }

        for relation in &table.many_to_many {
            descriptors.push(self.many_to_many_relation(relation));
        }

        resolve_collisions(table, &mut descriptors, sink);
        Ok(descriptors)
    }

    fn local_relation(
        &self,
        table: &Table,
        fk_id: ForeignKeyId,
        fk: &ForeignKey,
        sink: &dyn DiagnosticSink,
    ) -> AssociationDescriptor {
        let owner = self.schema.owner(fk);
        let local = self.schema.local_column(fk);
        let foreign = self.schema.foreign_column(fk);
        let ambiguous = self.index.is_ambiguous(&table.model_name, &owner.model_name);
        let related_by = self.index.needs_alias(&owner.model_name, &table.model_name);
        let aliases = &self.settings.aliases;

        let alias = aliases.local_alias(
            &owner.model_name,
            &local.name,
            related_by,
            fk.is_self_reference(),
        );
        let owner_has_model_column = owner.columns.iter().any(|c| c.name == table.model_name);
        let inverse_alias =
            aliases.inverse_alias(&table.model_name, &local.name, owner_has_model_column, related_by);

        if ambiguous {
            sink.report(
                DiagnosticKind::AmbiguousRelation,
                &table.name,
                &format!(
                    "{} 的外键 {} 与其他外键指向同一模型，别名 {}，已关闭约束",
                    owner.name,
                    fk.name,
                    alias.as_deref().unwrap_or("-")
                ),
            );
        }

        let (kind, label) = match fk.cardinality {
            Cardinality::ManyToOne => (AssociationKind::HasMany, RelationLabel::OneToMany),
            Cardinality::OneToOne => (AssociationKind::HasOne, RelationLabel::OneToOne),
        };
        debug!(
            "{}: {} {} as {}",
            table.model_name,
            label,
            owner.model_name,
            alias.as_deref().unwrap_or("is")
        );

        let naming = self.settings.naming;
        AssociationDescriptor {
            kind,
            label,
            target_model: owner.model_name.clone(),
            options: AssociationOptions {
                foreign_key: ForeignKeyOption {
                    name: naming.apply(&local.name),
                    field: Some(local.name.clone()),
                    allow_null: Some(!local.not_null),
                },
                on_update: constrained(ambiguous, &fk.on_update),
                on_delete: constrained(ambiguous, &fk.on_delete),
                source_key: Some(naming.apply(&foreign.name)),
                target_key: Some(naming.apply(&foreign.name)),
                through: None,
                alias,
                constraints: ambiguous.then_some(false),
                inverse_alias,
            },
            foreign_key: fk_id,
            ambiguous,
        }
    }

    fn foreign_relation(
        &self,
        table: &Table,
        fk_id: ForeignKeyId,
        fk: &ForeignKey,
        sink: &dyn DiagnosticSink,
    ) -> Result<AssociationDescriptor> {
        let referenced = self.schema.referenced(fk);
        let local = self.schema.local_column(fk);
        let foreign = self.schema.foreign_column(fk);
        let ambiguous = self
            .index
            .is_ambiguous(&table.model_name, &referenced.model_name);
        let related_by = self
            .index
            .needs_alias(&table.model_name, &referenced.model_name);

        let qualifier = extract_qualifier(&local.name, &referenced.name, &foreign.name)?;
        if qualifier.is_none() && !related_by {
            debug!(
                "列 {}.{} 未提取到别名限定词，使用模型名 {}",
                table.name, local.name, referenced.model_name
            );
        }
        let alias = self.settings.aliases.foreign_alias(
            &referenced.model_name,
            &local.name,
            qualifier.as_deref(),
            related_by,
        );

        if ambiguous {
            sink.report(
                DiagnosticKind::AmbiguousRelation,
                &table.name,
                &format!(
                    "外键 {} 与其他外键指向同一模型 {}，别名 {}，已关闭约束",
                    fk.name,
                    referenced.model_name,
                    alias.as_deref().unwrap_or("-")
                ),
            );
        }

        let label = match fk.cardinality {
            Cardinality::ManyToOne => RelationLabel::ManyToOne,
            Cardinality::OneToOne => RelationLabel::OneToOne,
        };
        debug!(
            "{}: {} {} as {}",
            table.model_name,
            label,
            referenced.model_name,
            alias.as_deref().unwrap_or("is")
        );

        let naming = self.settings.naming;
        Ok(AssociationDescriptor {
            kind: AssociationKind::BelongsTo,
            label,
            target_model: referenced.model_name.clone(),
            options: AssociationOptions {
                foreign_key: ForeignKeyOption {
                    name: naming.apply(&local.name),
                    field: Some(local.name.clone()),
                    allow_null: Some(!local.not_null),
                },
                on_update: constrained(ambiguous, &fk.on_update),
                on_delete: constrained(ambiguous, &fk.on_delete),
                source_key: None,
                target_key: Some(naming.apply(&foreign.name)),
                through: None,
                alias,
                constraints: ambiguous.then_some(false),
                inverse_alias: None,
            },
            foreign_key: fk_id,
            ambiguous,
        })
    }

    fn many_to_many_relation(&self, relation: &ManyToManyRelation) -> AssociationDescriptor {
        let reference = self.schema.foreign_key(relation.reference);
        let target = self.schema.foreign_key(relation.target);
        let ref_table = self.schema.table(relation.ref_table);
        let junction = self.schema.table(relation.junction);

        AssociationDescriptor {
            kind: AssociationKind::BelongsToMany,
            label: RelationLabel::ManyToMany,
            target_model: ref_table.model_name.clone(),
            options: AssociationOptions {
                foreign_key: ForeignKeyOption {
                    name: self.schema.local_column(reference).name.clone(),
                    field: None,
                    allow_null: None,
                },
                on_update: reference.on_update.clone(),
                on_delete: reference.on_delete.clone(),
                source_key: None,
                target_key: Some(self.settings.naming.apply(&self.schema.foreign_column(target).name)),
                through: Some(junction.name.clone()),
                alias: Some(self.settings.aliases.many_to_many_alias(&ref_table.model_name)),
                constraints: None,
                inverse_alias: None,
            },
            foreign_key: relation.reference,
            ambiguous: false,
        }
    }

    fn report_ignored(&self, table: &Table, fk: &ForeignKey, sink: &dyn DiagnosticSink) {
        let owner = self.schema.owner(fk);
        let message = if owner.collapsed {
            format!("外键 {} 属于中间表 {}，已折叠为多对多关系", fk.name, owner.name)
        } else {
            format!("外键 {} 已忽略", fk.name)
        };
        sink.report(DiagnosticKind::IgnoredForeignKey, &table.name, &message);
    }
}

/// 存在歧义时不输出更新/删除规则
fn constrained(ambiguous: bool, rule: &Option<String>) -> Option<String> {
    if ambiguous { None } else { rule.clone() }
}

/// 同一表内重复的别名追加序号，保证输出确定且别名唯一
fn resolve_collisions(table: &Table, descriptors: &mut [AssociationDescriptor], sink: &dyn DiagnosticSink) {
    let mut seen: HashSet<String> = descriptors
        .iter()
        .filter_map(|d| d.options.alias.clone())
        .collect();
    let mut used: HashMap<String, (AssociationKind, String)> = HashMap::new();

    for descriptor in descriptors.iter_mut() {
        let Some(alias) = descriptor.options.alias.clone() else {
            continue;
        };
        let Some((kind, target)) = used.get(&alias) else {
            used.insert(alias, (descriptor.kind, descriptor.target_model.clone()));
            continue;
        };

        let mut suffix = 2;
        let mut renamed = format!("{alias}{suffix}");
        while seen.contains(&renamed) {
            suffix += 1;
            renamed = format!("{alias}{suffix}");
        }
        sink.report(
            DiagnosticKind::HeuristicMiss,
            &table.name,
            &format!(
                "别名 {} 已用于 {} {}，{} {} 改用 {}",
                alias, kind, target, descriptor.kind, descriptor.target_model, renamed
            ),
        );
        seen.insert(renamed.clone());
        used.insert(renamed.clone(), (descriptor.kind, descriptor.target_model.clone()));
        descriptor.options.alias = Some(renamed);
    }
}
