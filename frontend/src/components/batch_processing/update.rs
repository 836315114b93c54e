use common::activity::Level;
use common::api::routes::{BatchAction, DbAction};
use common::jobs::JobStatus;
use gloo_timers::callback::Interval;
use yew::html::Scope;
use yew::platform::spawn_local;
use yew::prelude::*;

use crate::api::ApiClient;
use crate::helpers::{confirm, show_toast};

use super::messages::{Msg, Target};
use super::state::BatchProcessing;

fn fetch_status(api: &ApiClient, link: &Scope<BatchProcessing>, project_id: &str) {
    let (api, link, id) = (api.clone(), link.clone(), project_id.to_string());
    spawn_local(async move {
        link.send_message(Msg::StatusLoaded(api.batch_status(&id).await));
    });
}

fn fetch_db_status(api: &ApiClient, link: &Scope<BatchProcessing>, project_id: &str) {
    let (api, link, id) = (api.clone(), link.clone(), project_id.to_string());
    spawn_local(async move {
        link.send_message(Msg::DbStatusLoaded(api.db_status(&id).await));
    });
}

fn fetch_files(api: &ApiClient, link: &Scope<BatchProcessing>, project_id: &str) {
    let (api, link, id) = (api.clone(), link.clone(), project_id.to_string());
    spawn_local(async move {
        link.send_message(Msg::FilesLoaded(api.batch_files(&id).await));
    });
}

fn fetch_results(api: &ApiClient, link: &Scope<BatchProcessing>, project_id: &str, target: Target) {
    let (api, link, id) = (api.clone(), link.clone(), project_id.to_string());
    spawn_local(async move {
        let msg = match target {
            Target::Batch => Msg::ResultsLoaded(api.batch_results(&id).await),
            Target::Database => Msg::DbResultsLoaded(api.db_results(&id).await),
        };
        link.send_message(msg);
    });
}

pub fn update(component: &mut BatchProcessing, ctx: &Context<BatchProcessing>, msg: Msg) -> bool {
    let props = ctx.props();
    let api = &props.api;
    let link = ctx.link();
    let project_id = props.project.id.as_str();

    match msg {
        Msg::Refresh => {
            fetch_status(api, link, project_id);
            fetch_db_status(api, link, project_id);
            fetch_files(api, link, project_id);
            false
        }
        Msg::StatusLoaded(result) => match result {
            Ok(status) => {
                component.status = Some(status);
                true
            }
            Err(error) => {
                component.record(
                    Level::Error,
                    format!("Could not load the batch status: {}", error.user_message()),
                );
                true
            }
        },
        Msg::DbStatusLoaded(result) => match result {
            Ok(status) => {
                component.db_status = Some(status);
                true
            }
            // Projects without a database sink answer 404.
            Err(error) if error.is_not_found() => false,
            Err(error) => {
                component.record(
                    Level::Error,
                    format!("Could not load the database status: {}", error.user_message()),
                );
                true
            }
        },
        Msg::FilesLoaded(result) => match result {
            Ok(files) => {
                component.files = Some(files);
                true
            }
            Err(error) => {
                component.record(
                    Level::Warning,
                    format!("Could not list batch files: {}", error.user_message()),
                );
                true
            }
        },
        Msg::LoadResults => {
            fetch_results(api, link, project_id, Target::Batch);
            fetch_results(api, link, project_id, Target::Database);
            false
        }
        Msg::ResultsLoaded(result) => {
            match result {
                Ok(results) => component.results = Some(results),
                Err(error) => component.record(
                    Level::Error,
                    format!("Could not load batch results: {}", error.user_message()),
                ),
            }
            true
        }
        Msg::DbResultsLoaded(result) => match result {
            Ok(results) => {
                component.db_results = Some(results);
                true
            }
            Err(error) if error.is_not_found() => false,
            Err(error) => {
                component.record(
                    Level::Error,
                    format!("Could not load database results: {}", error.user_message()),
                );
                true
            }
        },
        Msg::SetAutoRefresh(enabled) => {
            component.auto_refresh.set(enabled, |period| {
                let link = link.clone();
                Interval::new(period, move || link.send_message(Msg::Refresh))
            });
            component.record(
                Level::Info,
                if enabled { "Auto-refresh on." } else { "Auto-refresh off." },
            );
            true
        }

        Msg::SetEnabled(target, enabled) => {
            let (api, link, id) = (api.clone(), link.clone(), project_id.to_string());
            spawn_local(async move {
                let result = match (target, enabled) {
                    (Target::Batch, true) => api.batch_action(&id, BatchAction::Enable).await,
                    (Target::Batch, false) => api.batch_action(&id, BatchAction::Disable).await,
                    (Target::Database, true) => api.db_action(&id, DbAction::Enable).await,
                    (Target::Database, false) => api.db_action(&id, DbAction::Disable).await,
                };
                link.send_message(Msg::Toggled(target, enabled, result));
            });
            false
        }
        Msg::Toggled(target, enabled, result) => {
            match result {
                Ok(_) => {
                    let state = if enabled { "enabled" } else { "disabled" };
                    component.record(Level::Success, format!("{} {}.", target.label(), state));
                }
                Err(error) => {
                    component.record(
                        Level::Error,
                        format!("{}: {}", target.label(), error.user_message()),
                    );
                    show_toast(&error.user_message(), Level::Error);
                }
            }
            match target {
                Target::Batch => fetch_status(api, link, project_id),
                Target::Database => fetch_db_status(api, link, project_id),
            }
            true
        }
        Msg::Process(target) => {
            if !component.job_mut(target).begin() {
                return false;
            }
            component.record(Level::Info, format!("{} started...", target.label()));
            let (api, link, id) = (api.clone(), link.clone(), project_id.to_string());
            spawn_local(async move {
                let result = match target {
                    Target::Batch => api.batch_action(&id, BatchAction::Process).await,
                    Target::Database => api.db_action(&id, DbAction::Process).await,
                };
                link.send_message(Msg::Processed(target, result));
            });
            true
        }
        Msg::Processed(target, result) => {
            match result {
                Ok(_) => {
                    let done = format!("{} finished.", target.label());
                    component.record(Level::Success, done.clone());
                    *component.job_mut(target) = JobStatus::Completed(done);
                    show_toast(&format!("{} finished.", target.label()), Level::Success);
                }
                Err(error) => {
                    let reason = error.user_message();
                    component.record(
                        Level::Error,
                        format!("{} failed: {}", target.label(), reason),
                    );
                    show_toast(&reason, Level::Error);
                    *component.job_mut(target) = JobStatus::Failed(reason);
                }
            }
            // Independent reads; each one overwrites its own slice of state.
            match target {
                Target::Batch => {
                    fetch_status(api, link, project_id);
                    fetch_files(api, link, project_id);
                }
                Target::Database => fetch_db_status(api, link, project_id),
            }
            fetch_results(api, link, project_id, target);
            true
        }
        Msg::Cleanup => {
            if !confirm("Remove processed and failed files from the batch folders?") {
                return false;
            }
            let (api, link, id) = (api.clone(), link.clone(), project_id.to_string());
            spawn_local(async move {
                let result = api.batch_action(&id, BatchAction::Cleanup).await;
                link.send_message(Msg::CleanedUp(result));
            });
            false
        }
        Msg::CleanedUp(result) => {
            match result {
                Ok(_) => component.record(Level::Success, "Batch folders cleaned up."),
                Err(error) => component.record(
                    Level::Error,
                    format!("Cleanup failed: {}", error.user_message()),
                ),
            }
            fetch_files(api, link, project_id);
            fetch_status(api, link, project_id);
            true
        }

        Msg::ClearLog => {
            component.log.clear();
            true
        }
        Msg::Finish => {
            props.on_complete.emit(());
            false
        }
        Msg::Back => {
            props.on_back.emit(());
            false
        }
    }
}
