//! Step 1: choose how the project's documents are laid out.
//!
//! The choice is stored on the backend before the wizard moves on, so a
//! resumed project finds it again.

use common::activity::Level;
use common::model::project::TemplateType;
use common::workflow::gates::template_ready;
use yew::platform::spawn_local;
use yew::prelude::*;

use crate::api::ApiClient;
use crate::helpers::show_toast;

#[derive(Properties, PartialEq)]
pub struct TemplateSelectionProps {
    pub api: ApiClient,
    pub project_id: AttrValue,
    /// Previously stored choice, if any.
    #[prop_or_default]
    pub selected: Option<TemplateType>,
    pub on_select: Callback<TemplateType>,
    pub on_back: Callback<()>,
}

const CHOICES: [(TemplateType, &str); 2] = [
    (
        TemplateType::Fixed,
        "Every document has the same layout. Only sections marked as parameter sections are extracted.",
    ),
    (
        TemplateType::Running,
        "Content flows freely across pages. Every parameter found is extracted.",
    ),
];

#[function_component(TemplateSelection)]
pub fn template_selection(props: &TemplateSelectionProps) -> Html {
    let choice = use_state(|| props.selected);
    let saving = use_state(|| false);

    let on_continue = {
        let choice = choice.clone();
        let saving = saving.clone();
        let api = props.api.clone();
        let project_id = props.project_id.clone();
        let on_select = props.on_select.clone();
        Callback::from(move |_: MouseEvent| {
            let Some(template_type) = *choice else {
                return;
            };
            saving.set(true);
            let api = api.clone();
            let project_id = project_id.clone();
            let on_select = on_select.clone();
            let saving = saving.clone();
            spawn_local(async move {
                match api.set_template_type(&project_id, template_type).await {
                    Ok(_) => on_select.emit(template_type),
                    Err(error) => {
                        saving.set(false);
                        show_toast(
                            &format!("Could not save the template type: {}", error.user_message()),
                            Level::Error,
                        );
                    }
                }
            });
        })
    };

    let on_back = {
        let on_back = props.on_back.clone();
        Callback::from(move |_: MouseEvent| on_back.emit(()))
    };

    html! {
        <section class="template-selection">
            <h2>{ "Choose a template type" }</h2>
            <div class="cards">
                { for CHOICES.iter().map(|(template_type, description)| {
                    let template_type = *template_type;
                    let active = *choice == Some(template_type);
                    let onclick = {
                        let choice = choice.clone();
                        Callback::from(move |_: MouseEvent| choice.set(Some(template_type)))
                    };
                    html! {
                        <div class={classes!("card", active.then_some("selected"))} {onclick}>
                            <h3>{ template_type.label() }</h3>
                            <p>{ *description }</p>
                        </div>
                    }
                }) }
            </div>
            <div class="wizard-actions">
                <button class="btn" onclick={on_back}>{ "Back" }</button>
                <button
                    class="btn btn-primary"
                    disabled={!template_ready(*choice) || *saving}
                    onclick={on_continue}
                >
                    { if *saving { "Saving..." } else { "Continue" } }
                </button>
            </div>
        </section>
    }
}
