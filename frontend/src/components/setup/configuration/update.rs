use common::activity::Level;
use common::requests::SaveConfigurationRequest;
use common::workflow::gates::configuration_ready;
use uuid::Uuid;
use yew::platform::spawn_local;
use yew::prelude::*;

use crate::helpers::{set_window_dirty_flag, show_toast};

use super::messages::Msg;
use super::state::{ConfigurationEditor, ParameterForm, SectionForm};

pub fn update(
    component: &mut ConfigurationEditor,
    ctx: &Context<ConfigurationEditor>,
    msg: Msg,
) -> bool {
    let props = ctx.props();

    match msg {
        Msg::SetSectionName(name) => component.section_form.name = name,
        Msg::SetSectionDescription(description) => {
            component.section_form.description = description
        }
        Msg::SetSectionIsParameter(flag) => component.section_form.is_parameter_section = flag,
        Msg::AddSection => {
            let form = &component.section_form;
            let id = Uuid::new_v4().to_string();
            if !component.draft.add_section(
                id.clone(),
                &form.name,
                &form.description,
                form.is_parameter_section,
            ) {
                component.error = Some("Section names must be unique and not empty.".into());
                return true;
            }
            component.section_form = SectionForm::default();
            component.parameter_form.section_id.get_or_insert(id);
            changed(component, ctx);
        }
        Msg::RemoveSection(id) => {
            component.draft.remove_section(&id);
            if component.parameter_form.section_id.as_deref() == Some(id.as_str()) {
                component.parameter_form.section_id =
                    component.draft.sections.first().map(|s| s.id.clone());
            }
            changed(component, ctx);
        }
        Msg::ToggleParameterSection(id) => {
            component.draft.toggle_parameter_section(&id);
            changed(component, ctx);
        }

        Msg::SelectSection(id) => {
            component.parameter_form.section_id = Some(id).filter(|id| !id.is_empty())
        }
        Msg::SetParameterName(name) => component.parameter_form.name = name,
        Msg::SetParameterDescription(description) => {
            component.parameter_form.description = description
        }
        Msg::AddParameter => {
            let form = &component.parameter_form;
            let Some(section_id) = form.section_id.clone() else {
                component.error = Some("Pick a section for the parameter.".into());
                return true;
            };
            if !component
                .draft
                .add_parameter(&section_id, &form.name, &form.description)
            {
                component.error =
                    Some("Parameter names must be unique within a section and not empty.".into());
                return true;
            }
            component.parameter_form = ParameterForm {
                section_id: Some(section_id),
                ..Default::default()
            };
            changed(component, ctx);
        }
        Msg::RemoveParameter { section_id, name } => {
            component.draft.remove_parameter(&section_id, &name);
            changed(component, ctx);
        }

        Msg::Save => {
            if !component.saves.begin(component.digest()) {
                return false;
            }
            let request = SaveConfigurationRequest::new(props.template_type, &component.draft);
            let api = props.api.clone();
            let project_id = props.project_id.clone();
            let link = ctx.link().clone();
            spawn_local(async move {
                let saved = api.save_configuration(&project_id, &request).await;
                link.send_message(Msg::Saved(saved));
            });
        }
        Msg::Saved(Ok(_)) => {
            component.saves.succeeded();
            set_window_dirty_flag(component.is_dirty());
            show_toast("Configuration saved.", Level::Success);
        }
        Msg::Saved(Err(error)) => {
            component.saves.failed();
            show_toast(
                &format!("Could not save the configuration: {}", error.user_message()),
                Level::Error,
            );
        }
        Msg::Continue => {
            if configuration_ready(&component.draft) {
                props.on_complete.emit(());
            }
            return false;
        }
        Msg::Back => {
            props.on_back.emit(());
            return false;
        }
    }
    true
}

/// Publishes the edited draft and refreshes the unsaved-changes flag.
fn changed(component: &mut ConfigurationEditor, ctx: &Context<ConfigurationEditor>) {
    component.error = None;
    set_window_dirty_flag(component.is_dirty());
    ctx.props().on_change.emit(component.draft.clone());
}
