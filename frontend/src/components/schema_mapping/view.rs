use common::model::schema::{ColumnMapping, TableMode};
use common::schema::wizard::SchemaStep;
use common::schema::{infer_data_type, normalize_column_name, DATA_TYPES};
use web_sys::{HtmlInputElement, HtmlSelectElement};
use yew::prelude::*;

use crate::components::activity_log::ActivityLogView;

use super::messages::{ColumnEdit, Msg};
use super::state::SchemaMapping;

fn select_value(e: Event) -> String {
    e.target_unchecked_into::<HtmlSelectElement>().value()
}

fn input_value(e: InputEvent) -> String {
    e.target_unchecked_into::<HtmlInputElement>().value()
}

fn checked(e: Event) -> bool {
    e.target_unchecked_into::<HtmlInputElement>().checked()
}

pub fn view(component: &SchemaMapping, ctx: &Context<SchemaMapping>) -> Html {
    let link = ctx.link();
    let wizard = &component.wizard;
    let step = wizard.current();
    let busy = component.loading_columns || component.saving.is_running();
    let last = step == SchemaStep::Preview;

    let body = match step {
        SchemaStep::ReviewParameters => review_parameters(component),
        SchemaStep::ChooseTable => choose_table(component, ctx),
        SchemaStep::ConfigureColumns => configure_columns(component, ctx),
        SchemaStep::Preview => preview(component),
    };

    let forward = if last {
        link.callback(|_: MouseEvent| Msg::Save)
    } else {
        link.callback(|_: MouseEvent| Msg::Next)
    };
    let forward_label = match (last, component.saving.is_running()) {
        (true, true) => "Saving...",
        (true, false) => "Save mapping",
        (false, _) => "Next",
    };

    html! {
        <section class="schema-mapping">
            <h2>{ format!("Schema mapping · {}", ctx.props().project.display_name()) }</h2>
            <ol class="sub-steps">
                { for SchemaStep::ALL.iter().map(|s| html! {
                    <li class={classes!((*s == step).then_some("current"), (*s < step).then_some("done"))}>
                        { format!("{}. {}", s.number(), s.title()) }
                    </li>
                }) }
            </ol>

            { body }

            <div class="wizard-actions">
                <button class="btn" onclick={link.callback(|_| Msg::Back)}>{ "Back" }</button>
                <button
                    class="btn btn-primary"
                    disabled={busy || !wizard.can_proceed()}
                    onclick={forward}
                >
                    { forward_label }
                </button>
            </div>

            <ActivityLogView
                log={component.log.clone()}
                on_clear={link.callback(|_: ()| Msg::ClearLog)}
            />
        </section>
    }
}

fn review_parameters(component: &SchemaMapping) -> Html {
    let parameters = &component.wizard.parameters;
    if component.loading_parameters {
        return html! { <p class="muted">{ "Loading extracted parameters..." }</p> };
    }
    if parameters.is_empty() {
        return html! {
            <p class="muted">{ "This project has no extracted parameters yet. Run an extraction first." }</p>
        };
    }
    html! {
        <table class="table">
            <thead>
                <tr>
                    <th>{ "Parameter" }</th>
                    <th>{ "Column" }</th>
                    <th>{ "Suggested type" }</th>
                </tr>
            </thead>
            <tbody>
                { for parameters.iter().map(|p| html! {
                    <tr>
                        <td>{ p }</td>
                        <td><code>{ normalize_column_name(p) }</code></td>
                        <td>{ infer_data_type(p) }</td>
                    </tr>
                }) }
            </tbody>
        </table>
    }
}

fn choose_table(component: &SchemaMapping, ctx: &Context<SchemaMapping>) -> Html {
    let link = ctx.link();
    let wizard = &component.wizard;
    let new_mode = wizard.table_mode == TableMode::New;
    let name_taken = new_mode
        && component
            .tables
            .iter()
            .any(|t| t.eq_ignore_ascii_case(wizard.new_table_name.trim()));

    html! {
        <div class="choose-table">
            <label>
                { "Schema" }
                <select onchange={link.callback(|e| Msg::SetSchema(select_value(e)))}>
                    if component.schemas.is_empty() {
                        <option value={wizard.schema_name.clone()} selected=true>{ &wizard.schema_name }</option>
                    }
                    { for component.schemas.iter().map(|schema| html! {
                        <option value={schema.clone()} selected={*schema == wizard.schema_name}>{ schema }</option>
                    }) }
                </select>
            </label>

            <div class="radio-group">
                <label>
                    <input
                        type="radio"
                        name="table-mode"
                        checked={new_mode}
                        onchange={link.callback(|_| Msg::SetTableMode(TableMode::New))}
                    />
                    { "Create a new table" }
                </label>
                <label>
                    <input
                        type="radio"
                        name="table-mode"
                        checked={!new_mode}
                        onchange={link.callback(|_| Msg::SetTableMode(TableMode::Existing))}
                    />
                    { "Use an existing table" }
                </label>
            </div>

            if new_mode {
                <label>
                    { "Table name" }
                    <input
                        type="text"
                        value={wizard.new_table_name.clone()}
                        oninput={link.callback(|e| Msg::SetNewTableName(input_value(e)))}
                    />
                </label>
                if name_taken {
                    <div class="alert alert-warning">
                        { "A table with this name already exists. Choose it as an existing table instead." }
                    </div>
                }
            } else {
                <label>
                    { "Table" }
                    <select onchange={link.callback(|e| Msg::SelectTable(select_value(e)))}>
                        <option value="" selected={wizard.existing_table.is_none()}>{ "Select a table" }</option>
                        { for component.tables.iter().map(|table| html! {
                            <option
                                value={table.clone()}
                                selected={wizard.existing_table.as_deref() == Some(table.as_str())}
                            >
                                { table }
                            </option>
                        }) }
                    </select>
                </label>
                if component.loading_columns {
                    <p class="muted">{ "Reading table columns..." }</p>
                } else if wizard.existing_table.is_some() {
                    <p class="muted">{ format!("{} existing columns", wizard.existing_columns.len()) }</p>
                }
            }
        </div>
    }
}

fn configure_columns(component: &SchemaMapping, ctx: &Context<SchemaMapping>) -> Html {
    let link = ctx.link();
    let wizard = &component.wizard;
    let issues = wizard.issues();

    html! {
        <div class="configure-columns">
            <table class="table">
                <thead>
                    <tr>
                        <th>{ "Column" }</th>
                        <th>{ "Type" }</th>
                        <th>{ "Source parameter" }</th>
                        <th>{ "Nullable" }</th>
                        <th>{ "Primary key" }</th>
                        <th>{ "Default" }</th>
                        <th></th>
                    </tr>
                </thead>
                <tbody>
                    { for wizard.columns.iter().enumerate().map(|(i, c)| column_row(component, ctx, i, c)) }
                </tbody>
            </table>
            <div class="inline-form">
                <button class="btn" onclick={link.callback(|_| Msg::AddColumn)}>{ "Add column" }</button>
                <button class="btn btn-link" onclick={link.callback(|_| Msg::ResetColumns)}>
                    { "Reset to proposal" }
                </button>
            </div>
            if !issues.is_empty() {
                <ul class="issues">
                    { for issues.iter().map(|issue| html! { <li class="error">{ issue.to_string() }</li> }) }
                </ul>
            }
        </div>
    }
}

fn column_row(
    component: &SchemaMapping,
    ctx: &Context<SchemaMapping>,
    index: usize,
    column: &ColumnMapping,
) -> Html {
    let link = ctx.link();
    let existing = column.is_existing_column;
    let edit = move |make: fn(String) -> ColumnEdit| {
        link.callback(move |e: Event| Msg::EditColumn(index, make(select_value(e))))
    };
    let on_name = link.callback(move |e: InputEvent| {
        Msg::EditColumn(index, ColumnEdit::Name(input_value(e)))
    });
    let on_default = link.callback(move |e: InputEvent| {
        Msg::EditColumn(index, ColumnEdit::Default(input_value(e)))
    });
    let on_source = link.callback(move |e: Event| {
        let value = select_value(e);
        Msg::EditColumn(index, ColumnEdit::Source(Some(value).filter(|v| !v.is_empty())))
    });
    let on_nullable =
        link.callback(move |e: Event| Msg::EditColumn(index, ColumnEdit::Nullable(checked(e))));
    let on_primary_key =
        link.callback(move |e: Event| Msg::EditColumn(index, ColumnEdit::PrimaryKey(checked(e))));

    let known_type = DATA_TYPES
        .iter()
        .any(|t| t.eq_ignore_ascii_case(&column.data_type));

    html! {
        <tr class={classes!(existing.then_some("existing"), column.will_be_added.then_some("added"))}>
            <td>
                <input type="text" value={column.column_name.clone()} disabled={existing} oninput={on_name} />
                if existing {
                    <span class="badge">{ "existing" }</span>
                } else if column.will_be_added {
                    <span class="badge badge-success">{ "new" }</span>
                }
            </td>
            <td>
                <select disabled={existing} onchange={edit(ColumnEdit::DataType)}>
                    if !known_type {
                        <option value={column.data_type.clone()} selected=true>{ &column.data_type }</option>
                    }
                    { for DATA_TYPES.iter().map(|t| html! {
                        <option value={*t} selected={t.eq_ignore_ascii_case(&column.data_type)}>{ *t }</option>
                    }) }
                </select>
            </td>
            <td>
                <select onchange={on_source}>
                    <option value="" selected={column.source_parameter.is_none()}>{ "(none)" }</option>
                    { for component.wizard.parameters.iter().map(|p| html! {
                        <option value={p.clone()} selected={column.source_parameter.as_deref() == Some(p.as_str())}>
                            { p }
                        </option>
                    }) }
                </select>
            </td>
            <td>
                <input type="checkbox" checked={column.nullable} disabled={existing || column.primary_key} onchange={on_nullable} />
            </td>
            <td>
                <input type="checkbox" checked={column.primary_key} disabled={existing} onchange={on_primary_key} />
            </td>
            <td>
                <input
                    type="text"
                    value={column.default_value.clone().unwrap_or_default()}
                    disabled={existing}
                    oninput={on_default}
                />
            </td>
            <td>
                if !existing {
                    <button class="btn btn-link" onclick={link.callback(move |_| Msg::RemoveColumn(index))}>
                        { "Remove" }
                    </button>
                }
            </td>
        </tr>
    }
}

fn preview(component: &SchemaMapping) -> Html {
    let wizard = &component.wizard;
    let sql = wizard.sql_preview();
    let issues = wizard.issues();

    html! {
        <div class="preview">
            <h3>{ format!("{} columns", wizard.columns.len()) }</h3>
            if sql.is_empty() {
                <p class="muted">{ "The table already has every column; only the mapping is saved." }</p>
            } else {
                <pre class="sql">{ sql }</pre>
            }
            if !issues.is_empty() {
                <ul class="issues">
                    { for issues.iter().map(|issue| html! { <li class="error">{ issue.to_string() }</li> }) }
                </ul>
            }
            if let Some(report) = &component.validation {
                <div class={classes!("alert", if report.is_valid { "alert-success" } else { "alert-error" })}>
                    { if report.is_valid { "Validated by the server." } else { "The server rejected the mapping." } }
                    <ul>
                        { for report.errors.iter().map(|e| html! { <li class="error">{ e }</li> }) }
                        { for report.warnings.iter().map(|w| html! { <li class="warning">{ w }</li> }) }
                    </ul>
                </div>
            }
        </div>
    }
}
