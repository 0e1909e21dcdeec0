use axum::{
    extract::{Query, State},
    response::Html,
    Form,
};
use minijinja::context;
use serde::{Deserialize, Serialize};

use crate::entities::cafe;
use crate::error::AppResult;
use crate::forms::{csrf::CsrfField, CafeForm, FieldErrors, FormSchema, SearchForm};
use crate::services::catalog::{CatalogService, CreateOutcome, SearchOutcome};
use crate::views::render;
use crate::AppState;

/// Acknowledgement shown on the add page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AddStatus {
    NotSubmitted,
    Created,
    Exists,
}

#[derive(Debug, Deserialize)]
pub struct NameQuery {
    #[serde(default)]
    pub name: String,
}

// ============ Listing ============

/// List all cafes
pub async fn list_cafes(State(state): State<AppState>) -> AppResult<Html<String>> {
    let cafes = CatalogService::new(&state.db).list().await?;
    render_cafes(&state, &cafes)
}

fn render_cafes(state: &AppState, cafes: &[cafe::Model]) -> AppResult<Html<String>> {
    let rows = cafes
        .iter()
        .map(cafe::Model::to_attributes)
        .collect::<AppResult<Vec<_>>>()?;

    render(
        &state.templates,
        "cafes.html",
        context! { columns => cafe::column_names(), cafes => rows },
    )
}

// ============ Add ============

pub async fn add_form(State(state): State<AppState>) -> AppResult<Html<String>> {
    render_add(&state, &CafeForm::default(), &FieldErrors::new(), AddStatus::NotSubmitted, "")
}

/// Validate and insert a new cafe
pub async fn add_cafe(
    State(state): State<AppState>,
    Form(form): Form<CafeForm>,
) -> AppResult<Html<String>> {
    if let Err(errors) = form.validate_submission(&state.config) {
        tracing::debug!(fields = ?errors.keys().collect::<Vec<_>>(), "Add form rejected");
        return render_add(&state, &form, &errors, AddStatus::NotSubmitted, "");
    }

    let draft = form.to_draft();
    let name = draft.name.clone();

    let status = match CatalogService::new(&state.db).create(draft).await? {
        CreateOutcome::Created(_) => AddStatus::Created,
        CreateOutcome::DuplicateName => AddStatus::Exists,
    };

    render_add(&state, &form, &FieldErrors::new(), status, &name)
}

fn render_add(
    state: &AppState,
    form: &CafeForm,
    errors: &FieldErrors,
    status: AddStatus,
    cafe_name: &str,
) -> AppResult<Html<String>> {
    render(
        &state.templates,
        "add.html",
        context! {
            fields => form.view(errors),
            csrf => CsrfField::issue(&state.config, errors)?,
            status => status,
            cafe_name => cafe_name,
        },
    )
}

// ============ Search ============

pub async fn search_form(State(state): State<AppState>) -> AppResult<Html<String>> {
    render_search(&state, &SearchForm::default(), &FieldErrors::new(), false)
}

/// Filter cafes on a single category
pub async fn search_cafes(
    State(state): State<AppState>,
    Form(form): Form<SearchForm>,
) -> AppResult<Html<String>> {
    if let Err(errors) = form.validate_submission(&state.config) {
        return render_search(&state, &form, &errors, false);
    }
    let Some(category) = form.category() else {
        return render_search(&state, &form, &FieldErrors::new(), false);
    };

    match CatalogService::new(&state.db).search(category, &form.query).await? {
        SearchOutcome::Found(cafes) => render_cafes(&state, &cafes),
        SearchOutcome::NoResults => render_search(&state, &form, &FieldErrors::new(), true),
    }
}

fn render_search(
    state: &AppState,
    form: &SearchForm,
    errors: &FieldErrors,
    no_results: bool,
) -> AppResult<Html<String>> {
    render(
        &state.templates,
        "search.html",
        context! {
            fields => form.view(errors),
            csrf => CsrfField::issue(&state.config, errors)?,
            no_results => no_results,
        },
    )
}

// ============ Edit ============

/// Show the edit form prefilled from the stored cafe
pub async fn edit_form(
    State(state): State<AppState>,
    Query(query): Query<NameQuery>,
) -> AppResult<Html<String>> {
    let cafe = CatalogService::new(&state.db).find_by_name(&query.name).await?;
    render_edit(&state, &cafe.name, &CafeForm::from_model(&cafe), &FieldErrors::new(), false)
}

/// Overwrite the named cafe with the submitted values
pub async fn edit_cafe(
    State(state): State<AppState>,
    Query(query): Query<NameQuery>,
    Form(form): Form<CafeForm>,
) -> AppResult<Html<String>> {
    let service = CatalogService::new(&state.db);

    if let Err(errors) = form.validate_submission(&state.config) {
        let cafe = service.find_by_name(&query.name).await?;
        return render_edit(&state, &cafe.name, &form, &errors, false);
    }

    let updated = service.update(&query.name, form.to_draft()).await?;
    render_edit(&state, &updated.name, &CafeForm::from_model(&updated), &FieldErrors::new(), true)
}

fn render_edit(
    state: &AppState,
    name: &str,
    form: &CafeForm,
    errors: &FieldErrors,
    updated: bool,
) -> AppResult<Html<String>> {
    render(
        &state.templates,
        "edit.html",
        context! {
            name => name,
            fields => form.view(errors),
            csrf => CsrfField::issue(&state.config, errors)?,
            updated => updated,
        },
    )
}

// ============ Delete ============

/// Delete the named cafe
pub async fn delete_cafe(
    State(state): State<AppState>,
    Query(query): Query<NameQuery>,
) -> AppResult<Html<String>> {
    let removed = CatalogService::new(&state.db).delete(&query.name).await?;
    render(&state.templates, "delete.html", context! { name => removed.name })
}
