use super::writer::CodeWriter;
use super::{GenContext, fields, options};
use crate::association::AssociationDescriptor;
use crate::schema::Table;

const BANNER: &str = "// 由 seqgen 生成，请勿手动修改";

const ATTR_CALLBACK_DOC: &str = "/**
 * Model attributes callback.
 *
 * @callback attrCallback
 * @param {object} attributes Model attributes
 * @returns {object}
 */";

const OPT_CALLBACK_DOC: &str = "/**
 * Model options callback.
 *
 * @callback optCallback
 * @param {object} options Model options
 * @returns {object}
 */";

/// v6 / v7 模型文件
pub(super) fn define_body(
    ctx: &GenContext<'_>,
    table: &Table,
    descriptors: &[AssociationDescriptor],
) -> String {
    let semi = ctx.config.semicolon();
    let model = &table.model_name;
    let extendable = ctx.config.inject_extend_function;
    let mut w = CodeWriter::new(ctx.config.indent_unit());

    write_preamble(ctx, &mut w);
    w.write(format!(
        "const {{ Sequelize, DataTypes }} = require('{}'){semi}",
        ctx.config.package_name
    ));
    w.blank();

    if extendable {
        w.write(ATTR_CALLBACK_DOC);
        w.blank();
        w.write(OPT_CALLBACK_DOC);
        w.blank();
    }

    w.write("/**");
    w.write(format!(" * Define Sequelize model `{model}`."));
    w.write(" *");
    w.write(" * @param {Sequelize} sequelize Sequelize");
    w.write_if(extendable, " * @param {attrCallback} attrCallback Attributes callback");
    w.write_if(extendable, " * @param {optCallback} optCallback Options callback");
    w.write(" */");
    if extendable {
        w.write("module.exports = (sequelize, attrCallback = null, optCallback = null) => {");
    } else {
        w.write("module.exports = sequelize => {");
    }

    w.indent();
    let attributes = ctx.renderer.render(&fields::attributes(ctx, table));
    let options = ctx.renderer.render(&options::options(ctx, table));
    w.write(format!("let attributes = {attributes}{semi}"));
    w.write(format!("let options = {options}{semi}"));

    if extendable {
        w.write("if (typeof attrCallback === 'function') {");
        w.indent().write(format!("attributes = attrCallback(attributes){semi}"));
        w.outdent().write("}");
        w.write("if (typeof optCallback === 'function') {");
        w.indent().write(format!("options = optCallback(options){semi}"));
        w.outdent().write("}");
    }

    w.blank();
    w.write(format!(
        "const {model} = sequelize.define('{model}', attributes, options){semi}"
    ));

    if ctx.config.generate_associations && ctx.profile.supports_associations() {
        w.blank();
        w.write(format!("{model}.associate = () => {{"));
        w.indent();
        for descriptor in descriptors {
            let shape = ctx.renderer.render(&ctx.profile.shape(descriptor));
            w.write(format!("// {}", descriptor.label));
            w.write(format!(
                "{model}.{}(sequelize.models.{}, {shape}){semi}",
                descriptor.kind.method(),
                descriptor.target_model
            ));
        }
        w.outdent();
        w.write(format!("}}{semi}"));
    }

    w.blank();
    w.write(format!("return {model}{semi}"));
    w.outdent();
    w.write(format!("}}{semi}"));

    w.finish()
}

/// v5 模型文件，不包含关联
pub(super) fn legacy_body(ctx: &GenContext<'_>, table: &Table) -> String {
    let semi = ctx.config.semicolon();
    let mut w = CodeWriter::new(ctx.config.indent_unit());

    write_preamble(ctx, &mut w);
    w.write("module.exports = function(sequelize, DataTypes) {");
    w.indent();
    let attributes = ctx.renderer.render(&fields::legacy_attributes(ctx, table));
    let options = ctx.renderer.render(&options::legacy_options(ctx, table));
    w.write(format!(
        "return sequelize.define('{}', {attributes}, {options}){semi}",
        table.model_name
    ));
    w.outdent();
    w.write(format!("}}{semi}"));

    w.finish()
}

fn write_preamble(ctx: &GenContext<'_>, w: &mut CodeWriter) {
    if let Some(header) = ctx.config.header.as_deref().filter(|h| !h.trim().is_empty()) {
        w.write("/*");
        for line in header.lines() {
            w.write(format!(" * {line}").trim_end());
        }
        w.write(" */");
        w.blank();
    }
    if ctx.config.add_comment {
        w.write(BANNER);
        w.blank();
    }
}
