//! Elm-style update of the project list: mutate state for `msg`, start any
//! request it implies, and report whether to re-render.

use common::activity::Level;
use common::model::project::{Project, Schedule};
use common::requests::ProjectRequest;
use gloo_console::log;
use gloo_timers::callback::Interval;
use yew::platform::spawn_local;
use yew::prelude::*;

use crate::helpers::{confirm, show_toast};
use crate::tops_sheet::yw_material_top_sheet::{close_top_sheet, open_top_sheet};

use super::messages::Msg;
use super::state::ProjectList;

pub fn update(component: &mut ProjectList, ctx: &Context<ProjectList>, msg: Msg) -> bool {
    let api = ctx.props().api.clone();
    let link = ctx.link().clone();

    match msg {
        Msg::Load => {
            component.loading = component.projects.is_empty();
            spawn_local(async move {
                link.send_message(Msg::Loaded(api.list_projects().await));
            });
            true
        }
        Msg::Loaded(Ok(projects)) => {
            component.loading = false;
            component.error = None;
            let refresh: Vec<String> = component
                .statuses
                .keys()
                .filter(|id| projects.iter().any(|p| &p.id == *id))
                .cloned()
                .collect();
            component.statuses.retain(|id, _| refresh.contains(id));
            component.projects = projects;
            // Keep the status panels that are open in sync with the list.
            if component.auto_refresh.is_enabled() {
                for id in refresh {
                    ctx.link().send_message(Msg::LoadStatus(id));
                }
            }
            true
        }
        Msg::Loaded(Err(error)) => {
            component.loading = false;
            component.error = Some(error.user_message());
            true
        }
        Msg::LoadStatus(id) => {
            spawn_local(async move {
                let status = api.project_status(&id).await;
                link.send_message(Msg::StatusLoaded(id, status));
            });
            false
        }
        Msg::StatusLoaded(id, Ok(snapshot)) => {
            component.statuses.insert(id, snapshot);
            true
        }
        Msg::StatusLoaded(_, Err(error)) => {
            show_toast(
                &format!("Could not load the project status: {}", error.user_message()),
                Level::Error,
            );
            false
        }
        Msg::SetAutoRefresh(enabled) => {
            component.auto_refresh.set(enabled, |period| {
                let link = ctx.link().clone();
                Interval::new(period, move || link.send_message(Msg::Load))
            });
            true
        }

        Msg::OpenCreate => {
            component.editing = None;
            component.form = ProjectRequest {
                master_project_id: api.master_project_id().map(str::to_string),
                ..Default::default()
            };
            component.form_error = None;
            open_top_sheet(&component.dialog_ref);
            true
        }
        Msg::OpenEdit(project) => {
            component.form = ProjectRequest {
                name: project.name.clone(),
                description: project.description.clone(),
                master_project_id: project
                    .master_project_id
                    .clone()
                    .or_else(|| api.master_project_id().map(str::to_string)),
                schedule: project.schedule.clone(),
            };
            component.editing = Some(project.id);
            component.form_error = None;
            open_top_sheet(&component.dialog_ref);
            true
        }
        Msg::CloseDialog => {
            close_top_sheet(&component.dialog_ref);
            component.form_error = None;
            true
        }
        Msg::SetName(name) => {
            component.form.name = name;
            component.form_error = None;
            true
        }
        Msg::SetDescription(description) => {
            component.form.description = Some(description).filter(|d| !d.trim().is_empty());
            true
        }
        Msg::SetScheduleEnabled(enabled) => {
            component
                .form
                .schedule
                .get_or_insert_with(Schedule::default)
                .enabled = enabled;
            true
        }
        Msg::SetFrequency(frequency) => {
            component
                .form
                .schedule
                .get_or_insert_with(Schedule::default)
                .frequency = Some(frequency).filter(|f| !f.is_empty());
            true
        }
        Msg::Submit => {
            if component.saving {
                return false;
            }
            if let Err(reason) = component.form.validate() {
                component.form_error = Some(reason);
                return true;
            }
            component.saving = true;
            let request = component.form.clone();
            let editing = component.editing.clone();
            spawn_local(async move {
                let saved = match editing {
                    Some(id) => api.update_project(&id, &request).await,
                    None => api.create_project(&request).await,
                };
                link.send_message(Msg::Saved(saved));
            });
            true
        }
        Msg::Saved(Ok(project)) => {
            component.saving = false;
            close_top_sheet(&component.dialog_ref);
            let verb = if component.editing.is_some() { "updated" } else { "created" };
            show_toast(
                &format!("Project '{}' {}.", project.display_name(), verb),
                Level::Success,
            );
            upsert(&mut component.projects, project);
            component.editing = None;
            ctx.link().send_message(Msg::Load);
            true
        }
        Msg::Saved(Err(error)) => {
            component.saving = false;
            component.form_error = Some(error.user_message());
            true
        }

        Msg::Delete(project) => {
            let question = format!(
                "Delete project '{}'? Its files and results are removed as well.",
                project.display_name()
            );
            if !confirm(&question) {
                return false;
            }
            spawn_local(async move {
                let deleted = api.delete_project(&project.id).await;
                link.send_message(Msg::Deleted(project.id, deleted));
            });
            false
        }
        Msg::Deleted(id, Ok(())) => {
            component.projects.retain(|p| p.id != id);
            component.statuses.remove(&id);
            show_toast("Project deleted.", Level::Success);
            true
        }
        Msg::Deleted(_, Err(error)) => {
            show_toast(
                &format!("Could not delete the project: {}", error.user_message()),
                Level::Error,
            );
            false
        }
        Msg::Run(project) => {
            if !component.running.insert(project.id.clone()) {
                return false;
            }
            spawn_local(async move {
                let started = api.run_project(&project.id).await;
                link.send_message(Msg::RunStarted(project.id, started));
            });
            true
        }
        Msg::RunStarted(id, result) => {
            component.running.remove(&id);
            match result {
                Ok(_) => {
                    log!(format!("Run triggered for project {}", id));
                    show_toast("Run started.", Level::Success);
                    ctx.link().send_message(Msg::LoadStatus(id));
                }
                Err(error) => show_toast(
                    &format!("Could not start the run: {}", error.user_message()),
                    Level::Error,
                ),
            }
            true
        }

        Msg::Select(project) => {
            ctx.props().on_select.emit(project);
            false
        }
        Msg::ViewResults(project) => {
            ctx.props().on_view_results.emit(project);
            false
        }
        Msg::SchemaMapping(project) => {
            ctx.props().on_schema_mapping.emit(project);
            false
        }
        Msg::BatchProcessing(project) => {
            ctx.props().on_batch_processing.emit(project);
            false
        }
    }
}

fn upsert(projects: &mut Vec<Project>, project: Project) {
    match projects.iter_mut().find(|p| p.id == project.id) {
        Some(existing) => *existing = project,
        None => projects.push(project),
    }
}
