//! Project list: the console's landing screen.
//!
//! Lists the sub-projects of the active master project, creates and edits
//! them in a top sheet, deletes them after confirmation, triggers immediate
//! runs and shows per-project run status. An optional auto-refresh reloads
//! the list every five seconds while the screen is mounted.

use yew::prelude::*;

mod messages;
mod props;
mod state;
mod update;
mod view;

pub use messages::Msg;
pub use props::ProjectListProps;
pub use state::ProjectList;

impl Component for ProjectList {
    type Message = Msg;
    type Properties = ProjectListProps;

    fn create(ctx: &Context<Self>) -> Self {
        ctx.link().send_message(Msg::Load);
        ProjectList::new()
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        update::update(self, ctx, msg)
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        view::view(self, ctx)
    }
}
