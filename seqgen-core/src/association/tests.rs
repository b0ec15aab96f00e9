use super::*;
use crate::config::{GeneratorConfig, TargetVersion};
use crate::datatype::{SchemaType, TypeSpec};
use crate::diagnostics::{DiagnosticKind, DiagnosticLog};
use crate::schema::{ColumnDef, ForeignKeyDef, Schema, SchemaBuilder, SchemaOptions, TableDef};
use crate::value::Renderer;

fn int() -> TypeSpec {
    TypeSpec::new(SchemaType::Int)
}

fn entity(name: &str) -> TableDef {
    TableDef::new(name)
        .column(ColumnDef::new("id", int()).not_null().auto_increment())
        .primary_key(["id"])
}

fn resolve_with(
    schema: &Schema,
    config: &GeneratorConfig,
    table: &str,
) -> (Vec<AssociationDescriptor>, DiagnosticLog) {
    let profile = TargetProfile::for_target(config.target);
    let resolver = AssociationResolver::new(schema, ResolverSettings::new(config, &profile));
    let log = DiagnosticLog::new();
    let descriptors = resolver
        .resolve(schema.find_table(table).unwrap(), &log)
        .unwrap();
    (descriptors, log)
}

fn resolve(schema: &Schema, table: &str) -> Vec<AssociationDescriptor> {
    resolve_with(schema, &GeneratorConfig::default(), table).0
}

fn single_fk_schema() -> Schema {
    SchemaBuilder::new()
        .table(entity("user"))
        .table(
            entity("post")
                .column(ColumnDef::new("user_id", int()).not_null())
                .foreign_key(
                    ForeignKeyDef::new("fk_post_user", "user_id", "user", "id")
                        .on_update("cascade")
                        .on_delete("restrict"),
                ),
        )
        .build()
        .unwrap()
}

fn two_fk_schema() -> Schema {
    SchemaBuilder::new()
        .table(entity("user"))
        .table(
            entity("post")
                .column(ColumnDef::new("author_id", int()).not_null())
                .column(ColumnDef::new("editor_id", int()))
                .foreign_key(
                    ForeignKeyDef::new("fk_post_author", "author_id", "user", "id")
                        .on_delete("cascade"),
                )
                .foreign_key(
                    ForeignKeyDef::new("fk_post_editor", "editor_id", "user", "id")
                        .on_delete("set null"),
                ),
        )
        .build()
        .unwrap()
}

fn tagging_schema(collapse: bool) -> Schema {
    SchemaBuilder::with_options(SchemaOptions {
        collapse_many_to_many: collapse,
        ..Default::default()
    })
    .table(entity("post"))
    .table(entity("tag"))
    .table(
        TableDef::new("post_tag")
            .column(ColumnDef::new("post_id", int()).not_null())
            .column(ColumnDef::new("tag_id", int()).not_null())
            .primary_key(["post_id", "tag_id"])
            .foreign_key(
                ForeignKeyDef::new("fk_pt_post", "post_id", "post", "id").on_delete("cascade"),
            )
            .foreign_key(ForeignKeyDef::new("fk_pt_tag", "tag_id", "tag", "id")),
    )
    .build()
    .unwrap()
}

#[test]
fn test_table_without_keys_has_no_associations() {
    let schema = SchemaBuilder::new().table(entity("setting")).build().unwrap();
    let (descriptors, log) = resolve_with(&schema, &GeneratorConfig::default(), "setting");
    assert!(descriptors.is_empty());
    assert!(log.is_empty());
}

#[test]
fn test_single_foreign_key_has_null_aliases() {
    let schema = single_fk_schema();

    let user = resolve(&schema, "user");
    assert_eq!(user.len(), 1);
    assert_eq!(user[0].kind, AssociationKind::HasMany);
    assert_eq!(user[0].label, RelationLabel::OneToMany);
    assert_eq!(user[0].target_model, "Post");
    assert_eq!(user[0].options.alias, None);
    assert_eq!(user[0].options.constraints, None);
    assert_eq!(user[0].options.on_update.as_deref(), Some("cascade"));
    assert_eq!(user[0].options.foreign_key.name, "user_id");
    assert_eq!(user[0].options.foreign_key.allow_null, Some(false));

    let post = resolve(&schema, "post");
    assert_eq!(post.len(), 1);
    assert_eq!(post[0].kind, AssociationKind::BelongsTo);
    assert_eq!(post[0].label, RelationLabel::ManyToOne);
    assert_eq!(post[0].target_model, "User");
    assert_eq!(post[0].options.alias, None);
    assert_eq!(post[0].options.target_key.as_deref(), Some("id"));
}

#[test]
fn test_two_foreign_keys_get_distinct_aliases_and_no_constraints() {
    let schema = two_fk_schema();

    let user = resolve(&schema, "user");
    let aliases: Vec<_> = user.iter().map(|d| d.options.alias.clone().unwrap()).collect();
    assert_eq!(aliases, vec!["PostRelatedByAuthorId", "PostRelatedByEditorId"]);
    assert_eq!(
        user[0].options.inverse_alias.as_deref(),
        Some("UserRelatedByAuthorId")
    );

    let post = resolve(&schema, "post");
    let aliases: Vec<_> = post.iter().map(|d| d.options.alias.clone().unwrap()).collect();
    assert_eq!(aliases, vec!["UserRelatedByAuthorId", "UserRelatedByEditorId"]);

    for descriptor in user.iter().chain(post.iter()) {
        assert!(descriptor.ambiguous);
        assert_eq!(descriptor.options.constraints, Some(false));
        assert_eq!(descriptor.options.on_update, None);
        assert_eq!(descriptor.options.on_delete, None);
    }
}

#[test]
fn test_ambiguity_counted_once_per_pair() {
    let schema = two_fk_schema();
    let index = AmbiguityIndex::build(&schema);
    assert_eq!(index.count("User", "Post"), 2);
    assert_eq!(index.count("Post", "User"), 2);
    assert_eq!(index.ambiguous_pairs(), vec![("Post", "User", 2)]);

    let index = AmbiguityIndex::build(&single_fk_schema());
    assert_eq!(index.count("Post", "User"), 1);
    assert!(index.ambiguous_pairs().is_empty());
}

#[test]
fn test_junction_gives_belongs_to_many_on_both_ends() {
    let schema = tagging_schema(true);

    let (post, log) = resolve_with(&schema, &GeneratorConfig::default(), "post");
    assert_eq!(post.len(), 1);
    assert_eq!(post[0].kind, AssociationKind::BelongsToMany);
    assert_eq!(post[0].label, RelationLabel::ManyToMany);
    assert_eq!(post[0].target_model, "Tag");
    assert_eq!(post[0].options.through.as_deref(), Some("post_tag"));
    assert_eq!(post[0].options.foreign_key.name, "post_id");
    assert_eq!(post[0].options.on_delete.as_deref(), Some("cascade"));
    assert_eq!(post[0].options.target_key.as_deref(), Some("id"));
    assert_eq!(post[0].options.alias.as_deref(), Some("Tag"));
    assert_eq!(log.count(DiagnosticKind::IgnoredForeignKey), 1);

    let tag = resolve(&schema, "tag");
    assert_eq!(tag.len(), 1);
    assert_eq!(tag[0].target_model, "Post");
    assert_eq!(tag[0].options.foreign_key.name, "tag_id");
    assert_eq!(tag[0].options.on_delete, None);

    assert!(!schema.table(schema.find_table("post_tag").unwrap()).is_generated());
}

#[test]
fn test_junction_without_collapse_keeps_plain_relations() {
    let schema = tagging_schema(false);
    let post = resolve(&schema, "post");
    assert_eq!(post.len(), 1);
    assert_eq!(post[0].kind, AssociationKind::HasMany);
    assert_eq!(post[0].target_model, "PostTag");

    let junction = resolve(&schema, "post_tag");
    assert_eq!(junction.len(), 2);
    assert!(junction.iter().all(|d| d.kind == AssociationKind::BelongsTo));
}

#[test]
fn test_self_reference() {
    let schema = SchemaBuilder::new()
        .table(
            entity("category")
                .column(ColumnDef::new("parent_id", int()))
                .foreign_key(ForeignKeyDef::new("fk_category_parent", "parent_id", "category", "id")),
        )
        .build()
        .unwrap();

    assert_eq!(AmbiguityIndex::build(&schema).count("Category", "Category"), 1);

    let (descriptors, log) = resolve_with(&schema, &GeneratorConfig::default(), "category");
    assert_eq!(descriptors.len(), 2);
    assert_eq!(descriptors[0].kind, AssociationKind::HasMany);
    assert_eq!(descriptors[0].options.alias, None);
    assert_eq!(descriptors[1].kind, AssociationKind::BelongsTo);
    assert_eq!(descriptors[1].options.alias.as_deref(), Some("ParentCategory"));
    assert_eq!(descriptors[1].options.foreign_key.allow_null, Some(true));
    assert!(log.is_empty());
}

#[test]
fn test_ambiguous_self_reference_gets_distinct_aliases() {
    let schema = SchemaBuilder::new()
        .table(
            entity("category")
                .column(ColumnDef::new("parent_id", int()))
                .column(ColumnDef::new("root_id", int()))
                .foreign_key(ForeignKeyDef::new("fk_parent", "parent_id", "category", "id"))
                .foreign_key(ForeignKeyDef::new("fk_root", "root_id", "category", "id")),
        )
        .build()
        .unwrap();

    let (descriptors, log) = resolve_with(&schema, &GeneratorConfig::default(), "category");
    assert_eq!(descriptors.len(), 4);
    let aliases: Vec<_> = descriptors
        .iter()
        .map(|d| (d.kind, d.options.alias.clone().unwrap()))
        .collect();
    assert_eq!(
        aliases,
        vec![
            (AssociationKind::HasMany, "ChildCategoryRelatedByParentId".to_string()),
            (AssociationKind::HasMany, "ChildCategoryRelatedByRootId".to_string()),
            (AssociationKind::BelongsTo, "CategoryRelatedByParentId".to_string()),
            (AssociationKind::BelongsTo, "CategoryRelatedByRootId".to_string()),
        ]
    );
    assert_eq!(log.count(DiagnosticKind::HeuristicMiss), 0);
    assert_eq!(log.count(DiagnosticKind::AmbiguousRelation), 4);
}

#[test]
fn test_colliding_alias_gets_numbered_fallback() {
    let schema = SchemaBuilder::new()
        .table(
            entity("category")
                .column(ColumnDef::new("category_id", int()))
                .foreign_key(ForeignKeyDef::new("fk_category", "category_id", "category", "id")),
        )
        .build()
        .unwrap();
    let config = GeneratorConfig {
        association_alias_always: true,
        ..Default::default()
    };

    let (descriptors, log) = resolve_with(&schema, &config, "category");
    assert_eq!(descriptors.len(), 2);
    assert_eq!(descriptors[0].options.alias.as_deref(), Some("Category"));
    assert_eq!(descriptors[1].options.alias.as_deref(), Some("Category2"));
    assert_eq!(log.count(DiagnosticKind::HeuristicMiss), 1);
}

#[test]
fn test_reciprocal_keys_keep_plain_aliases_but_drop_constraints() {
    let schema = SchemaBuilder::new()
        .table(
            entity("user")
                .column(ColumnDef::new("favorite_post_id", int()))
                .foreign_key(
                    ForeignKeyDef::new("fk_user_post", "favorite_post_id", "post", "id")
                        .on_delete("set null"),
                ),
        )
        .table(
            entity("post")
                .column(ColumnDef::new("user_id", int()).not_null())
                .foreign_key(
                    ForeignKeyDef::new("fk_post_user", "user_id", "user", "id").on_delete("cascade"),
                ),
        )
        .build()
        .unwrap();

    let index = AmbiguityIndex::build(&schema);
    assert_eq!(index.count("User", "Post"), 2);
    assert_eq!(index.directed_count("Post", "User"), 1);
    assert_eq!(index.directed_count("User", "Post"), 1);
    assert!(!index.needs_alias("Post", "User"));

    let post = resolve(&schema, "post");
    assert_eq!(post.len(), 2);
    assert_eq!(post[0].kind, AssociationKind::HasMany);
    assert_eq!(post[0].target_model, "User");
    assert_eq!(post[1].kind, AssociationKind::BelongsTo);
    assert_eq!(post[1].options.alias, None);

    let user = resolve(&schema, "user");
    assert_eq!(user[0].options.alias, None);
    assert_eq!(user[0].options.inverse_alias, None);
    assert_eq!(user[1].options.alias.as_deref(), Some("FavoritePost"));

    for descriptor in post.iter().chain(user.iter()) {
        assert!(descriptor.ambiguous);
        assert_eq!(descriptor.options.constraints, Some(false));
        assert_eq!(descriptor.options.on_delete, None);
    }
}

#[test]
fn test_qualifier_extraction() {
    assert_eq!(
        extract_qualifier("created_by_user_id", "user", "id").unwrap().as_deref(),
        Some("created_by")
    );
    assert_eq!(extract_qualifier("user_id", "user", "id").unwrap(), None);
    assert_eq!(extract_qualifier("id", "user", "id").unwrap(), None);
    assert_eq!(
        extract_qualifier("user_id_owner", "user", "id").unwrap().as_deref(),
        Some("owner")
    );
    assert_eq!(
        extract_qualifier("parent_id", "category", "id").unwrap().as_deref(),
        Some("parent")
    );
    assert_eq!(
        extract_qualifier("a.b_id", "a.b", "id").unwrap().as_deref(),
        None
    );
}

#[test]
fn test_qualified_foreign_alias() {
    let schema = SchemaBuilder::new()
        .table(entity("user"))
        .table(
            entity("document")
                .column(ColumnDef::new("created_by_user_id", int()))
                .foreign_key(ForeignKeyDef::new("fk_doc_creator", "created_by_user_id", "user", "id")),
        )
        .build()
        .unwrap();

    let document = resolve(&schema, "document");
    assert_eq!(document[0].options.alias.as_deref(), Some("CreatedByUser"));
}

#[test]
fn test_pluralize_and_alias_always() {
    let schema = single_fk_schema();

    let config = GeneratorConfig {
        pluralize_aliases: true,
        ..Default::default()
    };
    let (user, _) = resolve_with(&schema, &config, "user");
    assert_eq!(user[0].options.alias.as_deref(), Some("Posts"));

    let config = GeneratorConfig {
        association_alias_always: true,
        ..Default::default()
    };
    let (user, _) = resolve_with(&schema, &config, "user");
    assert_eq!(user[0].options.alias.as_deref(), Some("Post"));
    assert_eq!(user[0].options.inverse_alias.as_deref(), Some("User"));
    let (post, _) = resolve_with(&schema, &config, "post");
    assert_eq!(post[0].options.alias.as_deref(), Some("User"));

    let config = GeneratorConfig {
        pluralize_aliases: true,
        ..Default::default()
    };
    let (post, _) = resolve_with(&tagging_schema(true), &config, "post");
    assert_eq!(post[0].options.alias.as_deref(), Some("Tags"));
}

#[test]
fn test_naming_strategy_applies_to_keys() {
    let schema = single_fk_schema();
    let config = GeneratorConfig {
        naming_strategy: crate::naming::NamingStrategy::CamelCase,
        ..Default::default()
    };
    let (post, _) = resolve_with(&schema, &config, "post");
    assert_eq!(post[0].options.foreign_key.name, "userId");
    assert_eq!(post[0].options.foreign_key.field.as_deref(), Some("user_id"));
}

#[test]
fn test_descriptor_order_local_foreign_many_to_many() {
    let schema = SchemaBuilder::with_options(SchemaOptions {
        collapse_many_to_many: true,
        ..Default::default()
    })
    .table(entity("user"))
    .table(
        entity("post")
            .column(ColumnDef::new("user_id", int()))
            .foreign_key(ForeignKeyDef::new("fk_post_user", "user_id", "user", "id")),
    )
    .table(entity("tag"))
    .table(
        entity("comment")
            .column(ColumnDef::new("post_id", int()))
            .foreign_key(ForeignKeyDef::new("fk_comment_post", "post_id", "post", "id")),
    )
    .table(
        TableDef::new("post_tag")
            .column(ColumnDef::new("post_id", int()))
            .column(ColumnDef::new("tag_id", int()))
            .primary_key(["post_id", "tag_id"])
            .foreign_key(ForeignKeyDef::new("fk_pt_post", "post_id", "post", "id"))
            .foreign_key(ForeignKeyDef::new("fk_pt_tag", "tag_id", "tag", "id")),
    )
    .build()
    .unwrap();

    let post = resolve(&schema, "post");
    let kinds: Vec<_> = post.iter().map(|d| (d.kind, d.target_model.as_str())).collect();
    assert_eq!(
        kinds,
        vec![
            (AssociationKind::HasMany, "Comment"),
            (AssociationKind::BelongsTo, "User"),
            (AssociationKind::BelongsToMany, "Tag"),
        ]
    );
    assert_eq!(resolve(&schema, "post"), post);
}

#[test]
fn test_ignored_key_is_skipped_and_reported() {
    let schema = SchemaBuilder::new()
        .table(entity("user"))
        .table(
            entity("post")
                .column(ColumnDef::new("user_id", int()))
                .foreign_key(ForeignKeyDef::new("fk_post_user", "user_id", "user", "id").ignored()),
        )
        .build()
        .unwrap();

    let (post, log) = resolve_with(&schema, &GeneratorConfig::default(), "post");
    assert!(post.is_empty());
    assert_eq!(log.count(DiagnosticKind::IgnoredForeignKey), 1);
    assert!(log.entries()[0].message.contains("fk_post_user"));
}

#[test]
fn test_one_to_one_local_relation() {
    let schema = SchemaBuilder::new()
        .table(entity("user"))
        .table(
            TableDef::new("profile")
                .column(ColumnDef::new("user_id", int()).not_null())
                .primary_key(["user_id"])
                .foreign_key(ForeignKeyDef::new("fk_profile_user", "user_id", "user", "id")),
        )
        .build()
        .unwrap();

    let user = resolve(&schema, "user");
    assert_eq!(user[0].kind, AssociationKind::HasOne);
    assert_eq!(user[0].label, RelationLabel::OneToOne);
    let profile = resolve(&schema, "profile");
    assert_eq!(profile[0].label, RelationLabel::OneToOne);
}

fn render_options(version: TargetVersion, descriptor: &AssociationDescriptor) -> String {
    Renderer::default().render_inline(&TargetProfile::for_target(version).shape(descriptor))
}

#[test]
fn test_v6_shape_keeps_delete_rule() {
    let post = resolve(&single_fk_schema(), "post");
    let rendered = render_options(TargetVersion::V6, &post[0]);
    assert_eq!(
        rendered,
        "{ foreignKey: { name: 'user_id', field: 'user_id', allowNull: false }, \
         onUpdate: 'cascade', onDelete: 'restrict', targetKey: 'id' }"
    );
}

#[test]
fn test_v7_shape_nests_rules_and_uses_foreign_key_constraints() {
    let schema = single_fk_schema();
    let user = resolve(&schema, "user");
    assert_eq!(
        render_options(TargetVersion::V7, &user[0]),
        "{ foreignKey: { name: 'user_id', field: 'user_id', allowNull: false, \
         onUpdate: 'cascade', onDelete: 'restrict' }, sourceKey: 'id', targetKey: 'id' }"
    );

    let post = resolve(&two_fk_schema(), "post");
    let rendered = render_options(TargetVersion::V7, &post[0]);
    assert!(rendered.contains("foreignKeyConstraints: false"));
    assert!(rendered.contains("as: 'UserRelatedByAuthorId'"));
    assert!(!rendered.contains("onDelete"));

    let user = resolve(&two_fk_schema(), "user");
    let rendered = render_options(TargetVersion::V7, &user[0]);
    assert!(rendered.contains("inverse: { as: 'UserRelatedByAuthorId' }"));
}

#[test]
fn test_many_to_many_shapes() {
    let post = resolve(&tagging_schema(true), "post");
    assert_eq!(
        render_options(TargetVersion::V6, &post[0]),
        "{ through: 'post_tag', foreignKey: { name: 'post_id' }, onDelete: 'cascade', \
         targetKey: 'id', as: 'Tag' }"
    );
    assert_eq!(
        render_options(TargetVersion::V7, &post[0]),
        "{ through: 'post_tag', foreignKey: { name: 'post_id', onDelete: 'cascade' }, \
         targetKey: 'id', as: 'Tag' }"
    );
}
