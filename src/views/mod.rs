use axum::response::Html;
use minijinja::value::{Value, ValueKind};
use minijinja::Environment;

use crate::error::AppResult;
use crate::utils::text::yes_no;

const TEMPLATES: &[(&str, &str)] = &[
    ("base.html", include_str!("../../templates/base.html")),
    ("_form.html", include_str!("../../templates/_form.html")),
    ("index.html", include_str!("../../templates/index.html")),
    ("cafes.html", include_str!("../../templates/cafes.html")),
    ("add.html", include_str!("../../templates/add.html")),
    ("search.html", include_str!("../../templates/search.html")),
    ("edit.html", include_str!("../../templates/edit.html")),
    ("delete.html", include_str!("../../templates/delete.html")),
];

/// Template environment with every page registered.
pub fn build_environment() -> AppResult<Environment<'static>> {
    let mut env = Environment::new();
    env.add_filter("cell", cell);

    for &(name, source) in TEMPLATES {
        env.add_template(name, source)?;
    }

    Ok(env)
}

pub fn render(env: &Environment<'_>, name: &str, ctx: Value) -> AppResult<Html<String>> {
    let template = env.get_template(name)?;
    Ok(Html(template.render(ctx)?))
}

/// Table cell text: booleans as Yes/No, missing values blank.
fn cell(value: Value) -> String {
    match value.kind() {
        ValueKind::Bool => yes_no(value.is_true()).to_string(),
        ValueKind::None | ValueKind::Undefined => String::new(),
        _ => value.to_string(),
    }
}
