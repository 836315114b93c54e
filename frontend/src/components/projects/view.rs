use common::model::project::{Project, ProjectStatus};
use web_sys::{HtmlInputElement, HtmlSelectElement, HtmlTextAreaElement};
use yew::prelude::*;

use crate::helpers::format_count;
use crate::tops_sheet::yw_material_top_sheet::YwMaterialTopSheet;

use super::messages::Msg;
use super::state::ProjectList;

const FREQUENCIES: [(&str, &str); 4] = [
    ("", "Manual"),
    ("hourly", "Hourly"),
    ("daily", "Daily"),
    ("weekly", "Weekly"),
];

pub fn view(component: &ProjectList, ctx: &Context<ProjectList>) -> Html {
    let link = ctx.link();
    let auto_refresh = component.auto_refresh.is_enabled();

    html! {
        <div class="project-list">
            <div class="toolbar">
                <h2>{ "Projects" }</h2>
                <button class="btn btn-primary" onclick={link.callback(|_| Msg::OpenCreate)}>
                    { "New project" }
                </button>
                <button class="btn" onclick={link.callback(|_| Msg::Load)}>{ "Refresh" }</button>
                <label class="toggle">
                    <input
                        type="checkbox"
                        checked={auto_refresh}
                        onchange={link.callback(move |_| Msg::SetAutoRefresh(!auto_refresh))}
                    />
                    { "Auto-refresh" }
                </label>
            </div>

            if let Some(error) = &component.error {
                <div class="alert alert-error">{ error }</div>
            }

            if component.loading {
                <p class="muted">{ "Loading projects..." }</p>
            } else if component.projects.is_empty() {
                <p class="muted">{ "No projects yet. Create one to get started." }</p>
            } else {
                <table class="table">
                    <thead>
                        <tr>
                            <th>{ "Name" }</th>
                            <th>{ "Status" }</th>
                            <th>{ "Template" }</th>
                            <th>{ "Files" }</th>
                            <th>{ "Progress" }</th>
                            <th>{ "Actions" }</th>
                        </tr>
                    </thead>
                    <tbody>
                        { for component.projects.iter().map(|p| project_row(component, ctx, p)) }
                    </tbody>
                </table>
            }

            { project_dialog(component, ctx) }
        </div>
    }
}

fn status_label(project: &Project) -> String {
    match project.status() {
        ProjectStatus::Draft => "Draft".to_string(),
        ProjectStatus::InProgress => match project.last_step {
            Some(step) => format!("In progress (step {})", step),
            None => "In progress".to_string(),
        },
        ProjectStatus::Saved => "Saved".to_string(),
        ProjectStatus::Active => "Active".to_string(),
        ProjectStatus::Completed => "Completed".to_string(),
        ProjectStatus::Other(other) => other,
    }
}

fn project_row(component: &ProjectList, ctx: &Context<ProjectList>, project: &Project) -> Html {
    let link = ctx.link();
    let snapshot = component.statuses.get(&project.id);
    let progress = snapshot
        .map(|s| s.progress_percent())
        .unwrap_or_else(|| project.progress_percent());
    let running = component.running.contains(&project.id);

    let on = |make: fn(Project) -> Msg| {
        let project = project.clone();
        link.callback(move |_: MouseEvent| make(project.clone()))
    };
    let load_status = {
        let id = project.id.clone();
        link.callback(move |_: MouseEvent| Msg::LoadStatus(id.clone()))
    };

    html! {
        <>
            <tr>
                <td>
                    <strong>{ project.display_name() }</strong>
                    if let Some(description) = &project.description {
                        <div class="muted">{ description }</div>
                    }
                </td>
                <td>{ status_label(project) }</td>
                <td>{ project.template_type.map(|t| t.label()).unwrap_or("Not set") }</td>
                <td>
                    { format_count(project.file_count.unwrap_or(0)) }
                    if let Some(processed) = project.processed_count {
                        <span class="muted">{ format!(" ({} processed)", format_count(processed)) }</span>
                    }
                </td>
                <td>
                    <progress max="100" value={progress.to_string()} />
                    <span>{ format!(" {}%", progress) }</span>
                </td>
                <td class="actions">
                    <button class="btn" onclick={on(Msg::Select)}>{ "Open" }</button>
                    <button class="btn" onclick={on(Msg::ViewResults)}>{ "Results" }</button>
                    <button class="btn" onclick={on(Msg::SchemaMapping)}>{ "Schema" }</button>
                    <button class="btn" onclick={on(Msg::BatchProcessing)}>{ "Batch" }</button>
                    <button class="btn" disabled={running} onclick={on(Msg::Run)}>
                        { if running { "Starting..." } else { "Run now" } }
                    </button>
                    <button class="btn" onclick={load_status}>{ "Status" }</button>
                    <button class="btn" onclick={on(Msg::OpenEdit)}>{ "Edit" }</button>
                    <button class="btn btn-danger" onclick={on(Msg::Delete)}>{ "Delete" }</button>
                </td>
            </tr>
            if let Some(snapshot) = snapshot {
                <tr class="status-row">
                    <td colspan="6">
                        <span>{ format!(
                            "{} of {} files processed, {} failed",
                            format_count(snapshot.processed_files),
                            format_count(snapshot.total_files),
                            format_count(snapshot.failed_files),
                        ) }</span>
                        if let Some(last_run) = &snapshot.last_run {
                            <span class="muted">{ format!(" · last run {}", last_run) }</span>
                        }
                        if let Some(message) = &snapshot.message {
                            <span class="muted">{ format!(" · {}", message) }</span>
                        }
                    </td>
                </tr>
            }
        </>
    }
}

fn project_dialog(component: &ProjectList, ctx: &Context<ProjectList>) -> Html {
    let link = ctx.link();
    let form = &component.form;
    let schedule = form.schedule.clone().unwrap_or_default();
    let scheduled = schedule.enabled;
    let title = if component.editing.is_some() { "Edit project" } else { "New project" };

    html! {
        <YwMaterialTopSheet node_ref={component.dialog_ref.clone()} {title}>
            <form
                class="project-form"
                onsubmit={link.callback(|e: SubmitEvent| {
                    e.prevent_default();
                    Msg::Submit
                })}
            >
                <label>
                    { "Name" }
                    <input
                        type="text"
                        value={form.name.clone()}
                        oninput={link.callback(|e: InputEvent| {
                            Msg::SetName(e.target_unchecked_into::<HtmlInputElement>().value())
                        })}
                    />
                </label>
                <label>
                    { "Description" }
                    <textarea
                        value={form.description.clone().unwrap_or_default()}
                        oninput={link.callback(|e: InputEvent| {
                            Msg::SetDescription(e.target_unchecked_into::<HtmlTextAreaElement>().value())
                        })}
                    />
                </label>
                <label class="toggle">
                    <input
                        type="checkbox"
                        checked={scheduled}
                        onchange={link.callback(move |_| Msg::SetScheduleEnabled(!scheduled))}
                    />
                    { "Scheduled runs" }
                </label>
                <label>
                    { "Frequency" }
                    <select
                        onchange={link.callback(|e: Event| {
                            Msg::SetFrequency(e.target_unchecked_into::<HtmlSelectElement>().value())
                        })}
                    >
                        { for FREQUENCIES.iter().map(|(value, label)| html! {
                            <option
                                value={*value}
                                selected={schedule.frequency.as_deref().unwrap_or("") == *value}
                            >
                                { *label }
                            </option>
                        }) }
                    </select>
                </label>

                if let Some(error) = &component.form_error {
                    <div class="alert alert-error">{ error }</div>
                }

                <div class="dialog-actions">
                    <button type="button" class="btn" onclick={link.callback(|_| Msg::CloseDialog)}>
                        { "Cancel" }
                    </button>
                    <button type="submit" class="btn btn-primary" disabled={component.saving}>
                        { if component.saving { "Saving..." } else { "Save" } }
                    </button>
                </div>
            </form>
        </YwMaterialTopSheet>
    }
}
