use crate::forms::{FieldErrors, FieldKind, FormSpec, RawInput};
use axum::http::StatusCode;
use core_types::{Game, Record, RecordKind};
use handlebars::{Handlebars, RenderError, TemplateError};
use serde::Serialize;
use serde_json::json;

/// The compiled page templates. Built once at startup and shared through
/// [`crate::AppState`].
pub struct Views {
    registry: Handlebars<'static>,
}

#[derive(Debug, Serialize)]
struct SectionView {
    kind: RecordKind,
    title: &'static str,
    columns: &'static [&'static str],
    count: usize,
    has_rows: bool,
    has_links: bool,
    rows: Vec<RowView>,
}

#[derive(Debug, Serialize)]
struct RowView {
    kind: RecordKind,
    cells: Vec<String>,
    link: Option<String>,
}

#[derive(Debug, Serialize)]
struct FieldView<'a> {
    name: &'static str,
    label: &'static str,
    input_type: &'static str,
    is_select: bool,
    is_radio: bool,
    placeholder: Option<&'static str>,
    has_bounds: bool,
    min: u32,
    max: u32,
    required: bool,
    value: &'a str,
    options: Vec<OptionView>,
    error: Option<&'static str>,
}

#[derive(Debug, Serialize)]
struct OptionView {
    name: &'static str,
    value: &'static str,
    selected: bool,
}

impl Views {
    pub fn new() -> Result<Self, TemplateError> {
        let mut registry = Handlebars::new();
        registry.register_partial("header", include_str!("../templates/partials/header.hbs"))?;
        registry.register_partial("footer", include_str!("../templates/partials/footer.hbs"))?;
        registry.register_template_string("index", include_str!("../templates/index.hbs"))?;
        registry.register_template_string("form", include_str!("../templates/form.hbs"))?;
        registry.register_template_string("game", include_str!("../templates/game.hbs"))?;
        registry.register_template_string("error", include_str!("../templates/error.hbs"))?;
        Ok(Self { registry })
    }

    /// The home page: every record, grouped by kind, one table per kind.
    pub fn render_index(&self, records: &[Record]) -> Result<String, RenderError> {
        let sections: Vec<SectionView> = RecordKind::ALL
            .into_iter()
            .map(|kind| {
                let rows: Vec<RowView> = records
                    .iter()
                    .filter(|r| r.kind() == kind)
                    .map(|r| RowView {
                        kind,
                        cells: r.cells(),
                        link: (kind == RecordKind::Game).then(|| format!("/game/{}", r.id())),
                    })
                    .collect();
                SectionView {
                    kind,
                    title: kind.title(),
                    columns: kind.columns(),
                    count: rows.len(),
                    has_rows: !rows.is_empty(),
                    has_links: kind == RecordKind::Game,
                    rows,
                }
            })
            .collect();

        self.registry.render(
            "index",
            &json!({ "title": "Game Records", "sections": sections }),
        )
    }

    /// A data-entry form, pre-filled with `values` and annotated with `errors`.
    pub fn render_form(&self, form: &FormSpec, values: &RawInput, errors: &FieldErrors) -> Result<String, RenderError> {
        let fields: Vec<FieldView> = form
            .fields
            .iter()
            .map(|field| {
                let value = values.get(field.name).map(String::as_str).unwrap_or_default();
                let options = match &field.kind {
                    FieldKind::Select(choices) | FieldKind::Radio(choices) => choices
                        .iter()
                        .map(|choice| OptionView {
                            name: field.name,
                            value: choice,
                            selected: *choice == value,
                        })
                        .collect(),
                    _ => Vec::new(),
                };
                let (input_type, placeholder, bounds) = match &field.kind {
                    FieldKind::Text { hint } => ("text", *hint, None),
                    FieldKind::Number { min, max } => ("number", None, Some((*min, *max))),
                    FieldKind::Date => ("text", Some("dd/mm/yyyy"), None),
                    FieldKind::Time => ("time", None, None),
                    FieldKind::Select(_) | FieldKind::Radio(_) => ("", None, None),
                };
                let (min, max) = bounds.unwrap_or_default();
                FieldView {
                    name: field.name,
                    label: field.label,
                    input_type,
                    is_select: matches!(field.kind, FieldKind::Select(_)),
                    is_radio: matches!(field.kind, FieldKind::Radio(_)),
                    placeholder,
                    has_bounds: bounds.is_some(),
                    min,
                    max,
                    required: field.required,
                    value,
                    options,
                    error: errors.get(field.name).copied(),
                }
            })
            .collect();

        self.registry.render(
            "form",
            &json!({
                "title": form.title,
                "action": form.action,
                "has_errors": !errors.is_empty(),
                "fields": fields,
            }),
        )
    }

    /// The detail page for one game.
    pub fn render_game(&self, game: &Game) -> Result<String, RenderError> {
        let details = [
            ("Home Team", game.home.as_str()),
            ("Away Team", game.away.as_str()),
            ("Date", game.date.as_str()),
            ("Start Time", game.time.as_str()),
            ("Weather", game.weather.as_str()),
            ("Stadium", game.stadium.as_str()),
        ]
        .map(|(label, value)| json!({ "label": label, "value": value }));

        self.registry.render(
            "game",
            &json!({
                "title": format!("Game {}: {} vs {}", game.id, game.home, game.away),
                "details": details,
            }),
        )
    }

    pub fn render_error(&self, status: StatusCode, message: &str) -> Result<String, RenderError> {
        let title = match status.canonical_reason() {
            Some(reason) => format!("{} {}", status.as_u16(), reason),
            None => status.as_u16().to_string(),
        };
        self.registry
            .render("error", &json!({ "title": title, "message": message }))
    }
}
