use common::model::configuration::Section;
use common::model::project::TemplateType;
use common::workflow::gates::configuration_ready;
use web_sys::{HtmlInputElement, HtmlSelectElement};
use yew::prelude::*;

use super::messages::Msg;
use super::state::ConfigurationEditor;

fn input_value(e: InputEvent) -> String {
    e.target_unchecked_into::<HtmlInputElement>().value()
}

pub fn view(component: &ConfigurationEditor, ctx: &Context<ConfigurationEditor>) -> Html {
    let link = ctx.link();
    let props = ctx.props();
    let fixed = props.template_type == TemplateType::Fixed;
    let draft = &component.draft;

    html! {
        <section class="configuration">
            <h2>{ "Configure extraction" }</h2>
            <p class="muted">
                { format!("Template type: {}", props.template_type.label()) }
                if component.is_dirty() {
                    <span class="badge badge-warning">{ "unsaved changes" }</span>
                }
            </p>

            <div class="panel">
                <h3>{ "Sections" }</h3>
                <div class="inline-form">
                    <input
                        type="text"
                        placeholder="Section name"
                        value={component.section_form.name.clone()}
                        oninput={link.callback(|e| Msg::SetSectionName(input_value(e)))}
                    />
                    <input
                        type="text"
                        placeholder="Description"
                        value={component.section_form.description.clone()}
                        oninput={link.callback(|e| Msg::SetSectionDescription(input_value(e)))}
                    />
                    if fixed {
                        <label class="toggle">
                            <input
                                type="checkbox"
                                checked={component.section_form.is_parameter_section}
                                onchange={link.callback(|e: Event| {
                                    Msg::SetSectionIsParameter(
                                        e.target_unchecked_into::<HtmlInputElement>().checked(),
                                    )
                                })}
                            />
                            { "Parameter section" }
                        </label>
                    }
                    <button class="btn" onclick={link.callback(|_| Msg::AddSection)}>{ "Add section" }</button>
                </div>

                { for draft.sections.iter().map(|section| section_card(component, ctx, section, fixed)) }
            </div>

            <div class="panel">
                <h3>{ "Parameters" }</h3>
                if draft.sections.is_empty() {
                    <p class="muted">{ "Add a section first." }</p>
                } else {
                    <div class="inline-form">
                        <select
                            onchange={link.callback(|e: Event| {
                                Msg::SelectSection(e.target_unchecked_into::<HtmlSelectElement>().value())
                            })}
                        >
                            { for draft.sections.iter().map(|section| html! {
                                <option
                                    value={section.id.clone()}
                                    selected={component.parameter_form.section_id.as_deref() == Some(section.id.as_str())}
                                >
                                    { &section.name }
                                </option>
                            }) }
                        </select>
                        <input
                            type="text"
                            placeholder="Parameter name"
                            value={component.parameter_form.name.clone()}
                            oninput={link.callback(|e| Msg::SetParameterName(input_value(e)))}
                        />
                        <input
                            type="text"
                            placeholder="What to extract"
                            value={component.parameter_form.description.clone()}
                            oninput={link.callback(|e| Msg::SetParameterDescription(input_value(e)))}
                        />
                        <button class="btn" onclick={link.callback(|_| Msg::AddParameter)}>{ "Add parameter" }</button>
                    </div>
                }
            </div>

            if let Some(error) = &component.error {
                <div class="alert alert-error">{ error }</div>
            }

            <div class="wizard-actions">
                <button class="btn" onclick={link.callback(|_| Msg::Back)}>{ "Back" }</button>
                <button
                    class="btn"
                    disabled={component.saves.is_saving() || draft.is_empty()}
                    onclick={link.callback(|_| Msg::Save)}
                >
                    { if component.saves.is_saving() { "Saving..." } else { "Save Configuration" } }
                </button>
                <button
                    class="btn btn-primary"
                    disabled={!configuration_ready(draft)}
                    onclick={link.callback(|_| Msg::Continue)}
                >
                    { "Continue" }
                </button>
            </div>
        </section>
    }
}

fn section_card(
    component: &ConfigurationEditor,
    ctx: &Context<ConfigurationEditor>,
    section: &Section,
    fixed: bool,
) -> Html {
    let link = ctx.link();
    let id = section.id.clone();
    let remove = {
        let id = id.clone();
        link.callback(move |_: MouseEvent| Msg::RemoveSection(id.clone()))
    };
    let toggle = link.callback(move |_: Event| Msg::ToggleParameterSection(id.clone()));

    html! {
        <div class="section-card">
            <header>
                <strong>{ &section.name }</strong>
                if !section.description.is_empty() {
                    <span class="muted">{ format!(" · {}", section.description) }</span>
                }
                if fixed {
                    <label class="toggle">
                        <input type="checkbox" checked={section.is_parameter_section} onchange={toggle} />
                        { "Parameter section" }
                    </label>
                }
                <button class="btn btn-link" onclick={remove}>{ "Remove" }</button>
            </header>
            <ul>
                { for component.draft.parameters_in(&section.id).map(|parameter| {
                    let section_id = parameter.section_id.clone();
                    let name = parameter.name.clone();
                    let remove = link.callback(move |_: MouseEvent| Msg::RemoveParameter {
                        section_id: section_id.clone(),
                        name: name.clone(),
                    });
                    html! {
                        <li>
                            <code>{ &parameter.name }</code>
                            if !parameter.description.is_empty() {
                                <span class="muted">{ format!(" · {}", parameter.description) }</span>
                            }
                            <button class="btn btn-link" onclick={remove}>{ "×" }</button>
                        </li>
                    }
                }) }
            </ul>
        </div>
    }
}
