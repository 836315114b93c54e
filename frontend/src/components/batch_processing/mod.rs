//! Batch processing: run the extraction over the project's input folder and
//! load the results into the database.
//!
//! Status is fetched once on mount. An optional auto-refresh polls every
//! five seconds through an [`AutoRefresh`](common::jobs::AutoRefresh) slot,
//! so toggling it off or leaving the screen stops the timer.

use yew::prelude::*;

mod messages;
mod props;
mod state;
mod update;
mod view;

pub use messages::Msg;
pub use props::BatchProcessingProps;
pub use state::BatchProcessing;

impl Component for BatchProcessing {
    type Message = Msg;
    type Properties = BatchProcessingProps;

    fn create(ctx: &Context<Self>) -> Self {
        ctx.link().send_message(Msg::Refresh);
        BatchProcessing::new()
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        update::update(self, ctx, msg)
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        view::view(self, ctx)
    }
}
