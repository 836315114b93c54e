use common::api::ApiError;

pub enum Msg {
    SetSectionName(String),
    SetSectionDescription(String),
    SetSectionIsParameter(bool),
    AddSection,
    RemoveSection(String),
    ToggleParameterSection(String),

    SelectSection(String),
    SetParameterName(String),
    SetParameterDescription(String),
    AddParameter,
    RemoveParameter { section_id: String, name: String },

    Save,
    Saved(Result<serde_json::Value, ApiError>),
    Continue,
    Back,
}
