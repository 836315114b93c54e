use common::jobs::JobStatus;
use common::model::batch::{BatchFile, BatchResults};
use common::model::file::format_size;
use yew::prelude::*;

use crate::components::activity_log::ActivityLogView;
use crate::helpers::format_count;

use super::messages::{Msg, Target};
use super::state::BatchProcessing;

pub fn view(component: &BatchProcessing, ctx: &Context<BatchProcessing>) -> Html {
    let link = ctx.link();
    let props = ctx.props();
    let auto_refresh = component.auto_refresh.is_enabled();
    let download_url = props.api.batch_download_url(&props.project.id);

    html! {
        <section class="batch-processing">
            <div class="toolbar">
                <h2>{ format!("Batch processing · {}", props.project.display_name()) }</h2>
                <button class="btn" onclick={link.callback(|_| Msg::Refresh)}>{ "Refresh" }</button>
                <label class="toggle">
                    <input
                        type="checkbox"
                        checked={auto_refresh}
                        onchange={link.callback(move |_| Msg::SetAutoRefresh(!auto_refresh))}
                    />
                    { "Auto-refresh" }
                </label>
            </div>

            <div class="panels">
                { batch_panel(component, ctx) }
                { db_panel(component, ctx) }
            </div>

            <div class="panel">
                <h3>{ "Files" }</h3>
                <div class="inline-form">
                    <button class="btn" onclick={link.callback(|_| Msg::LoadResults)}>{ "Load results" }</button>
                    <a class="btn" href={download_url} download="">{ "Download output" }</a>
                    <button class="btn btn-danger" onclick={link.callback(|_| Msg::Cleanup)}>{ "Clean up" }</button>
                </div>
                {
                    match &component.files {
                        None => html! { <p class="muted">{ "Loading files..." }</p> },
                        Some(files) if files.total() == 0 => html! { <p class="muted">{ "The batch folders are empty." }</p> },
                        Some(files) => html! {
                            <div class="folders">
                                { folder("Input", &files.input) }
                                { folder("Output", &files.output) }
                                { folder("Failed", &files.failed) }
                            </div>
                        },
                    }
                }
            </div>

            if let Some(results) = &component.results {
                { results_table("Batch results", results) }
            }
            if let Some(results) = &component.db_results {
                { results_table("Database results", results) }
            }

            <ActivityLogView
                log={component.log.clone()}
                on_clear={link.callback(|_: ()| Msg::ClearLog)}
            />

            <div class="wizard-actions">
                <button class="btn" onclick={link.callback(|_| Msg::Back)}>{ "Back to projects" }</button>
                <button class="btn btn-primary" onclick={link.callback(|_| Msg::Finish)}>{ "Finish" }</button>
            </div>
        </section>
    }
}

fn job_line(job: &JobStatus) -> Html {
    match job {
        JobStatus::Idle => html! {},
        JobStatus::InProgress => html! { <p class="muted">{ "Running..." }</p> },
        JobStatus::Completed(message) => html! { <p class="ok">{ message }</p> },
        JobStatus::Failed(reason) => html! { <p class="error">{ reason }</p> },
    }
}

fn toggle(ctx: &Context<BatchProcessing>, target: Target, enabled: bool) -> Html {
    html! {
        <label class="toggle">
            <input
                type="checkbox"
                checked={enabled}
                onchange={ctx.link().callback(move |_| Msg::SetEnabled(target, !enabled))}
            />
            { if enabled { "Enabled" } else { "Disabled" } }
        </label>
    }
}

fn batch_panel(component: &BatchProcessing, ctx: &Context<BatchProcessing>) -> Html {
    let Some(status) = &component.status else {
        return html! { <div class="panel"><h3>{ Target::Batch.label() }</h3><p class="muted">{ "Loading status..." }</p></div> };
    };
    let running = component.batch_job.is_running() || status.processing;

    html! {
        <div class="panel">
            <h3>{ Target::Batch.label() }</h3>
            { toggle(ctx, Target::Batch, status.enabled) }
            <dl class="counts">
                <dt>{ "Input" }</dt><dd>{ format_count(status.input_files) }</dd>
                <dt>{ "Output" }</dt><dd>{ format_count(status.output_files) }</dd>
                <dt>{ "Failed" }</dt><dd>{ format_count(status.failed_files) }</dd>
                if let Some(last_run) = &status.last_run {
                    <dt>{ "Last run" }</dt><dd>{ last_run }</dd>
                }
            </dl>
            if let Some(message) = &status.message {
                <p class="muted">{ message }</p>
            }
            <button
                class="btn btn-primary"
                disabled={running || !status.enabled}
                onclick={ctx.link().callback(|_| Msg::Process(Target::Batch))}
            >
                { if running { "Processing..." } else { "Process now" } }
            </button>
            { job_line(&component.batch_job) }
        </div>
    }
}

fn db_panel(component: &BatchProcessing, ctx: &Context<BatchProcessing>) -> Html {
    let Some(status) = &component.db_status else {
        return html! {
            <div class="panel">
                <h3>{ Target::Database.label() }</h3>
                <p class="muted">{ "No database sink configured for this project." }</p>
            </div>
        };
    };
    let running = component.db_job.is_running() || status.processing;

    html! {
        <div class="panel">
            <h3>{ Target::Database.label() }</h3>
            { toggle(ctx, Target::Database, status.enabled) }
            <dl class="counts">
                if let Some(table) = &status.table_name {
                    <dt>{ "Table" }</dt><dd><code>{ table }</code></dd>
                }
                <dt>{ "Pending" }</dt><dd>{ format_count(status.pending_files) }</dd>
                <dt>{ "Loaded" }</dt><dd>{ format_count(status.processed_files) }</dd>
                <dt>{ "Failed" }</dt><dd>{ format_count(status.failed_files) }</dd>
                if let Some(last_run) = &status.last_run {
                    <dt>{ "Last run" }</dt><dd>{ last_run }</dd>
                }
            </dl>
            <button
                class="btn btn-primary"
                disabled={running || !status.enabled}
                onclick={ctx.link().callback(|_| Msg::Process(Target::Database))}
            >
                { if running { "Loading..." } else { "Load into database" } }
            </button>
            { job_line(&component.db_job) }
        </div>
    }
}

fn folder(title: &str, files: &[BatchFile]) -> Html {
    html! {
        <div class="folder">
            <h4>{ format!("{} ({})", title, files.len()) }</h4>
            <ul>
                { for files.iter().map(|file| html! {
                    <li>
                        <span>{ &file.name }</span>
                        <span class="muted">{ format!(" {}", format_size(file.size)) }</span>
                        if let Some(modified) = &file.modified {
                            <span class="muted">{ format!(" · {}", modified) }</span>
                        }
                    </li>
                }) }
            </ul>
        </div>
    }
}

fn results_table(title: &str, results: &BatchResults) -> Html {
    html! {
        <div class="panel">
            <h3>{ format!("{}: {} processed, {} failed", title, results.processed, results.failed) }</h3>
            <table class="table">
                <thead>
                    <tr>
                        <th>{ "File" }</th>
                        <th>{ "Status" }</th>
                        <th>{ "Output / error" }</th>
                        <th>{ "Processed at" }</th>
                    </tr>
                </thead>
                <tbody>
                    { for results.results.iter().map(|item| html! {
                        <tr class={if item.succeeded() { "ok" } else { "error" }}>
                            <td>{ &item.file_name }</td>
                            <td>{ &item.status }</td>
                            <td>{ item.error.clone().or_else(|| item.output_file.clone()).unwrap_or_default() }</td>
                            <td>{ item.processed_at.clone().unwrap_or_default() }</td>
                        </tr>
                    }) }
                </tbody>
            </table>
        </div>
    }
}
