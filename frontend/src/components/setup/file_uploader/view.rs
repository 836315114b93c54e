use common::model::file::{format_size, FileKey, UploadState, UploadedFile, PDF_MIME};
use common::workflow::gates::files_ready;
use web_sys::{DragEvent, File, FileList, HtmlInputElement};
use yew::prelude::*;

use super::messages::Msg;
use super::state::FileUploader;

fn files_of(list: Option<FileList>) -> Vec<File> {
    list.map(|list| (0..list.length()).filter_map(|i| list.get(i)).collect())
        .unwrap_or_default()
}

pub fn view(component: &FileUploader, ctx: &Context<FileUploader>) -> Html {
    let link = ctx.link();
    let queue = &component.queue;
    let busy = component.upload.is_some();
    let can_continue = files_ready(queue) && !busy;

    let ondragover = link.callback(|e: DragEvent| {
        e.prevent_default();
        Msg::DragOver
    });
    let ondragleave = link.callback(|_: DragEvent| Msg::DragLeave);
    let ondrop = link.callback(|e: DragEvent| {
        e.prevent_default();
        Msg::Add(files_of(e.data_transfer().and_then(|t| t.files())))
    });
    let onchange = link.callback(|e: Event| {
        Msg::Add(files_of(e.target_unchecked_into::<HtmlInputElement>().files()))
    });

    html! {
        <section class="file-uploader">
            <h2>{ "Upload sample documents" }</h2>
            <div
                class={classes!("drop-zone", component.dragging.then_some("dragging"))}
                {ondragover}
                {ondragleave}
                {ondrop}
                onclick={link.callback(|_| Msg::OpenPicker)}
            >
                <p>{ "Drop PDF files here or click to choose them." }</p>
            </div>
            <input
                ref={component.input_ref.clone()}
                type="file"
                accept={PDF_MIME}
                multiple=true
                hidden=true
                {onchange}
            />

            if component.loading_existing {
                <p class="muted">{ "Loading stored files..." }</p>
            }

            if !queue.is_empty() {
                <p class="muted">
                    { format!("{} of {} files finished", queue.finished_count(), queue.len()) }
                </p>
                <ul class="file-list">
                    { for queue.files().iter().map(|file| file_row(ctx, file)) }
                </ul>
            }

            <div class="wizard-actions">
                <button class="btn" onclick={link.callback(|_| Msg::Back)}>{ "Back" }</button>
                <button
                    class="btn btn-primary"
                    disabled={!can_continue}
                    onclick={link.callback(|_| Msg::Continue)}
                >
                    { format!("Continue with {} file(s)", queue.uploaded_count()) }
                </button>
            </div>
        </section>
    }
}

fn file_row(ctx: &Context<FileUploader>, file: &UploadedFile) -> Html {
    let props = ctx.props();
    let remove = {
        let key = file.key.clone();
        ctx.link().callback(move |_: MouseEvent| Msg::Remove(key.clone()))
    };

    let status = match &file.state {
        UploadState::Pending => html! { <span class="muted">{ "Waiting" }</span> },
        UploadState::Uploading { progress, .. } => html! {
            <>
                <progress max="100" value={progress.to_string()} />
                <span>{ format!(" {}%", progress) }</span>
            </>
        },
        UploadState::Uploaded(record) => {
            let pages = record
                .page_count
                .map(|n| format!("{} pages", n))
                .unwrap_or_default();
            let preview = record
                .preview_url
                .clone()
                .unwrap_or_else(|| props.api.file_preview_url(&props.project_id, &record.id));
            let download = record
                .download_url
                .clone()
                .unwrap_or_else(|| props.api.file_download_url(&props.project_id, &record.id));
            html! {
                <>
                    <span class="ok">{ "Uploaded" }</span>
                    <span class="muted">{ pages }</span>
                    <a href={preview} target="_blank" rel="noopener">{ "Preview" }</a>
                    <a href={download} download="">{ "Download" }</a>
                </>
            }
        }
        UploadState::Removing(_) => html! { <span class="muted">{ "Deleting..." }</span> },
        UploadState::Failed(reason) => html! { <span class="error">{ reason }</span> },
    };
    let removing = matches!(file.state, UploadState::Removing(_));

    let local = matches!(file.key, FileKey::Local(_));
    html! {
        <li class="file-row">
            <span class="file-name">{ file.display_name() }</span>
            <span class="file-size">{ format_size(file.size) }</span>
            { status }
            <button
                class="btn btn-link"
                title={if local { "Remove from the list" } else { "Delete from the server" }}
                disabled={removing}
                onclick={remove}
            >
                { "Remove" }
            </button>
        </li>
    }
}
