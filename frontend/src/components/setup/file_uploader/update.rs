use common::activity::Level;
use common::model::file::{Removal, UploadState, SIMULATED_PROGRESS_TICK_MS};
use common::workflow::gates::files_ready;
use gloo_console::log;
use gloo_timers::callback::Interval;
use web_sys::HtmlInputElement;
use yew::platform::spawn_local;
use yew::prelude::*;

use crate::api::upload::upload_file;
use crate::helpers::{random_progress_increment, show_toast};

use super::messages::Msg;
use super::state::FileUploader;

pub fn update(component: &mut FileUploader, ctx: &Context<FileUploader>, msg: Msg) -> bool {
    let props = ctx.props();

    match msg {
        Msg::LoadExisting => {
            component.loading_existing = true;
            let api = props.api.clone();
            let project_id = props.project_id.clone();
            let link = ctx.link().clone();
            spawn_local(async move {
                link.send_message(Msg::ExistingLoaded(api.list_files(&project_id).await));
            });
            true
        }
        Msg::ExistingLoaded(result) => {
            component.loading_existing = false;
            match result {
                Ok(records) => component.queue.add_existing(records),
                Err(error) if error.is_not_found() => {}
                Err(error) => show_toast(
                    &format!("Could not list stored files: {}", error.user_message()),
                    Level::Warning,
                ),
            }
            true
        }

        Msg::Add(files) => {
            component.dragging = false;
            let mut skipped = 0;
            for file in files {
                match component
                    .queue
                    .enqueue(&file.name(), file.size() as u64, &file.type_())
                {
                    Some(key) => {
                        component.pending.insert(key, file);
                    }
                    None => skipped += 1,
                }
            }
            if skipped > 0 {
                log!(format!("Ignored {} non-PDF file(s)", skipped));
            }
            ctx.link().send_message(Msg::StartNext);
            true
        }
        Msg::DragOver => {
            let changed = !component.dragging;
            component.dragging = true;
            changed
        }
        Msg::DragLeave => {
            component.dragging = false;
            true
        }
        Msg::OpenPicker => {
            if let Some(input) = component.input_ref.cast::<HtmlInputElement>() {
                input.set_value("");
                input.click();
            }
            false
        }

        Msg::StartNext => {
            if component.upload.is_some() {
                return false;
            }
            let Some(key) = component.queue.next_pending() else {
                return false;
            };
            let Some(file) = component.pending.remove(&key) else {
                component.queue.fail(&key, "The file is no longer available");
                ctx.link().send_message(Msg::StartNext);
                return true;
            };
            if !component.queue.start(&key) {
                return false;
            }

            component.ticker = Some({
                let link = ctx.link().clone();
                let key = key.clone();
                Interval::new(SIMULATED_PROGRESS_TICK_MS, move || {
                    link.send_message(Msg::Tick(key.clone()))
                })
            });

            let on_progress = {
                let key = key.clone();
                ctx.link().callback(move |percent| Msg::Progress(key.clone(), percent))
            };
            let on_done = {
                let key = key.clone();
                ctx.link().callback(move |result| Msg::Finished(key.clone(), result))
            };
            let url = props.api.file_upload_url(&props.project_id);
            match upload_file(&url, &file, on_progress, on_done) {
                Ok(handle) => component.upload = Some(handle),
                Err(error) => ctx.link().send_message(Msg::Finished(key, Err(error))),
            }
            true
        }
        Msg::Tick(key) => {
            component
                .queue
                .simulate_tick(&key, random_progress_increment());
            true
        }
        Msg::Progress(key, percent) => {
            component.queue.report_progress(&key, percent);
            true
        }
        Msg::Finished(key, result) => {
            let uploading = matches!(
                component.queue.get(&key).map(|f| &f.state),
                Some(UploadState::Uploading { .. })
            );
            if !uploading {
                return false;
            }
            component.settle();
            match result {
                Ok(record) => {
                    component.queue.complete(&key, record);
                }
                Err(error) => {
                    let name = component
                        .queue
                        .get(&key)
                        .map(|f| f.display_name())
                        .unwrap_or_default();
                    show_toast(
                        &format!("Upload of {} failed: {}", name, error.user_message()),
                        Level::Error,
                    );
                    component.queue.fail(&key, error.user_message());
                }
            }
            ctx.link().send_message(Msg::StartNext);
            true
        }

        Msg::Remove(key) => {
            let was_in_flight = component.queue.in_flight().is_some_and(|f| f.key == key);
            match component.queue.remove(&key) {
                Some(Removal::Remote(file_id)) => {
                    let api = props.api.clone();
                    let project_id = props.project_id.clone();
                    let link = ctx.link().clone();
                    let key = key.clone();
                    spawn_local(async move {
                        let removed = api.delete_file(&project_id, &file_id).await;
                        link.send_message(Msg::Removed(key, removed));
                    });
                }
                Some(Removal::Local) => {
                    component.pending.remove(&key);
                }
                None => return false,
            }
            if was_in_flight {
                component.settle();
                ctx.link().send_message(Msg::StartNext);
            }
            true
        }
        Msg::Removed(key, Ok(())) => {
            component.queue.confirm_removal(&key);
            show_toast("File deleted.", Level::Success);
            true
        }
        Msg::Removed(key, Err(error)) => {
            component.queue.cancel_removal(&key);
            show_toast(
                &format!("Could not delete the file: {}", error.user_message()),
                Level::Error,
            );
            true
        }

        Msg::Continue => {
            if files_ready(&component.queue) && component.upload.is_none() {
                props.on_complete.emit(component.queue.uploaded());
            }
            false
        }
        Msg::Back => {
            props.on_back.emit(());
            false
        }
    }
}
