//! Purpose: Render catalog parameter templates against a context mapping.
//! Exports: `RenderedParams`, `expand_templates`.
//! Role: Small adapter around `handlebars` for parameter expansion plus
//! static tracking of which context variables no template referenced.
//! Invariants: Compile/render failures surface as `Template` errors naming
//! the offending parameter key; engine errors ride along as `source`.
//! Invariants: Variables absent from the context render as the empty string
//! (the engine's non-strict contract, not reimplemented here).
//! Invariants: Output is plain text; the engine's HTML entity escaping stays
//! disabled.

use std::collections::{BTreeMap, BTreeSet};

use handlebars::Handlebars;
use handlebars::template::{HelperTemplate, Parameter, Template, TemplateElement};
use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::{Error, ErrorKind};

/// Outcome of expanding a set of parameter templates.
#[derive(Debug, Clone, Serialize)]
pub struct RenderedParams {
    /// Rendered value per parameter, same keys as the input mapping.
    pub params: BTreeMap<String, String>,
    /// Context variables declared by the caller but referenced by no template.
    pub unused_context: BTreeSet<String>,
}

/// Render every template in `params` against `context`.
///
/// Each value is a handlebars source string; the usual substitution, block,
/// and conditional directives are available. The result carries the rendered
/// strings plus the subset of context keys that no template referenced,
/// computed by walking each parsed template rather than by observing the
/// render.
pub fn expand_templates(
    params: &BTreeMap<String, String>,
    context: &Map<String, Value>,
) -> Result<RenderedParams, Error> {
    let mut registry = Handlebars::new();
    // Parameters are plain text (urlpaths, query strings, storage options),
    // not HTML; the engine's default entity escaping must stay off.
    registry.register_escape_fn(handlebars::no_escape);
    let context_value = Value::Object(context.clone());

    let mut unused: BTreeSet<String> = context.keys().cloned().collect();
    let mut rendered = BTreeMap::new();

    for (key, source) in params {
        let template = Template::compile(source).map_err(|err| template_error(key, err))?;
        for root in referenced_roots(&template) {
            unused.remove(&root);
        }
        registry.register_template(key, template);
        let output = registry
            .render(key, &context_value)
            .map_err(|err| render_error(key, err))?;
        tracing::debug!(param = %key, bytes = output.len(), "rendered parameter template");
        rendered.insert(key.clone(), output);
    }

    Ok(RenderedParams {
        params: rendered,
        unused_context: unused,
    })
}

fn template_error(key: &str, err: handlebars::TemplateError) -> Error {
    Error::new(ErrorKind::Template)
        .with_message("invalid parameter template")
        .with_key(key)
        .with_hint("Check the directive syntax, e.g. {{ name }} or {{#each items}}...{{/each}}.")
        .with_source(err)
}

fn render_error(key: &str, err: handlebars::RenderError) -> Error {
    Error::new(ErrorKind::Template)
        .with_message("parameter template failed to render")
        .with_key(key)
        .with_source(err)
}

/// Root context variables a parsed template references.
fn referenced_roots(template: &Template) -> BTreeSet<String> {
    let mut roots = BTreeSet::new();
    collect_template(template, &mut roots);
    roots
}

fn collect_template(template: &Template, roots: &mut BTreeSet<String>) {
    for element in &template.elements {
        collect_element(element, roots);
    }
}

fn collect_element(element: &TemplateElement, roots: &mut BTreeSet<String>) {
    match element {
        TemplateElement::Expression(helper)
        | TemplateElement::HtmlExpression(helper)
        | TemplateElement::HelperBlock(helper) => collect_helper(helper, roots),
        TemplateElement::RawString(_) | TemplateElement::Comment(_) => {}
        // Decorators and partials carry no context-variable references we
        // track for catalog parameters.
        _ => {}
    }
}

fn collect_helper(helper: &HelperTemplate, roots: &mut BTreeSet<String>) {
    // A bare expression's name is a variable reference ({{ y }}); once params
    // or hash arguments appear, the name is a helper ({{uppercase y}}).
    // Known approximation: a parameterless mustache section ({{#items}}...)
    // is treated as a helper too, so its subject is not recorded as a root.
    if helper.params.is_empty() && helper.hash.is_empty() && helper.template.is_none() {
        collect_parameter(&helper.name, roots);
    }
    for param in &helper.params {
        collect_parameter(param, roots);
    }
    for value in helper.hash.values() {
        collect_parameter(value, roots);
    }
    if let Some(inner) = &helper.template {
        collect_template(inner, roots);
    }
    if let Some(inverse) = &helper.inverse {
        collect_template(inverse, roots);
    }
}

fn collect_parameter(param: &Parameter, roots: &mut BTreeSet<String>) {
    match param {
        Parameter::Subexpression(sub) => collect_element(sub.as_element(), roots),
        Parameter::Literal(_) => {}
        other => {
            if let Some(raw) = other.as_name() {
                push_root(raw, roots);
            }
        }
    }
}

/// Reduce a raw path like `a.b`, `this.a`, or `./a` to its root segment.
///
/// Parent-scope markers dissolve during splitting (`.` is a separator), so
/// `../label` reduces to `label` — for the common one-level block nesting
/// that is the enclosing context key being referenced.
fn push_root(raw: &str, roots: &mut BTreeSet<String>) {
    for seg in raw.split(['.', '/']) {
        match seg {
            "" | "this" => continue,
            seg if seg.starts_with('@') => {
                // @root/foo keeps walking; @index and friends are locals.
                if seg == "@root" {
                    continue;
                }
                return;
            }
            seg => {
                let seg = seg
                    .strip_prefix('[')
                    .and_then(|s| s.strip_suffix(']'))
                    .unwrap_or(seg);
                roots.insert(seg.to_string());
                return;
            }
        }
    }
}
