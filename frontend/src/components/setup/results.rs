//! Step 4 and the standalone results view: the summarized configuration of
//! a project.

use common::model::configuration::ConfigurationEnvelope;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct ResultsProps {
    pub envelope: Option<ConfigurationEnvelope>,
    #[prop_or_default]
    pub file_count: usize,
    pub on_next: Callback<()>,
    pub on_back: Callback<()>,
}

#[function_component(ResultsView)]
pub fn results_view(props: &ResultsProps) -> Html {
    let on_next = {
        let on_next = props.on_next.clone();
        Callback::from(move |_: MouseEvent| on_next.emit(()))
    };
    let on_back = {
        let on_back = props.on_back.clone();
        Callback::from(move |_: MouseEvent| on_back.emit(()))
    };

    let body = match &props.envelope {
        None => html! { <p class="muted">{ "No project selected." }</p> },
        Some(envelope) => html! {
            <>
                <dl class="summary">
                    <dt>{ "Project" }</dt>
                    <dd>{ &envelope.project_name }</dd>
                    <dt>{ "Template type" }</dt>
                    <dd>{ envelope.template_type.label() }</dd>
                    if props.file_count > 0 {
                        <dt>{ "Sample files" }</dt>
                        <dd>{ props.file_count }</dd>
                    }
                </dl>
                {
                    match &envelope.results {
                        None => html! {
                            <p class="muted">
                                { "This project's configuration is stored on the server. Continue to map its parameters to a table." }
                            </p>
                        },
                        Some(results) => html! {
                            <>
                                <p>
                                    { format!(
                                        "{} sections, {} parameters extracted.",
                                        results.total_sections, results.total_parameters
                                    ) }
                                </p>
                                <table class="table">
                                    <thead>
                                        <tr>
                                            <th>{ "Section" }</th>
                                            <th>{ "Parameters" }</th>
                                            <th>{ "Extracted" }</th>
                                        </tr>
                                    </thead>
                                    <tbody>
                                        { for results.sections.iter().map(|section| html! {
                                            <tr class={classes!((!section.counted).then_some("muted"))}>
                                                <td>
                                                    { &section.name }
                                                    if section.is_parameter_section {
                                                        <span class="badge">{ "parameter section" }</span>
                                                    }
                                                </td>
                                                <td>{ section.parameters.join(", ") }</td>
                                                <td>{ if section.counted { "yes" } else { "no" } }</td>
                                            </tr>
                                        }) }
                                    </tbody>
                                </table>
                            </>
                        },
                    }
                }
            </>
        },
    };

    html! {
        <section class="results">
            <h2>{ "Configuration results" }</h2>
            { body }
            <div class="wizard-actions">
                <button class="btn" onclick={on_back}>{ "Back" }</button>
                <button class="btn btn-primary" disabled={props.envelope.is_none()} onclick={on_next}>
                    { "Continue to schema mapping" }
                </button>
            </div>
        </section>
    }
}
