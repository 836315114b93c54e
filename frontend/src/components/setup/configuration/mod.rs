//! Step 3: define the sections of the document and the parameters to
//! extract from each.
//!
//! The draft is edited locally and mirrored to the coordinator on every
//! change. "Save Configuration" posts it to the backend; an MD5 digest of the
//! last saved draft drives the unsaved-changes flag.

use yew::prelude::*;

mod messages;
mod props;
mod state;
mod update;
mod view;

pub use messages::Msg;
pub use props::ConfigurationProps;
pub use state::ConfigurationEditor;

impl Component for ConfigurationEditor {
    type Message = Msg;
    type Properties = ConfigurationProps;

    fn create(ctx: &Context<Self>) -> Self {
        ConfigurationEditor::new(ctx.props().draft.clone())
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        update::update(self, ctx, msg)
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        view::view(self, ctx)
    }

    fn destroy(&mut self, _ctx: &Context<Self>) {
        crate::helpers::set_window_dirty_flag(false);
    }
}
