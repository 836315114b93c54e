//! Step 2: upload sample PDFs.
//!
//! Files are picked or dropped, filtered to PDFs, and uploaded strictly one
//! after another through [`UploadQueue`](common::model::file::UploadQueue).
//! While a file is in flight a 300 ms ticker advances a simulated progress
//! value (capped at 95 %) until the transport reports real byte progress.
//! Files the backend already stores for the project are listed on mount.

use yew::prelude::*;

mod messages;
mod props;
mod state;
mod update;
mod view;

pub use messages::Msg;
pub use props::FileUploaderProps;
pub use state::FileUploader;

impl Component for FileUploader {
    type Message = Msg;
    type Properties = FileUploaderProps;

    fn create(ctx: &Context<Self>) -> Self {
        let props = ctx.props();
        if props.files.is_empty() {
            ctx.link().send_message(Msg::LoadExisting);
        }
        FileUploader::new(props.files.clone())
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        update::update(self, ctx, msg)
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        view::view(self, ctx)
    }
}
