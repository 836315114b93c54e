//! Schema mapping: bind the extracted parameters to columns of a database
//! table.
//!
//! Drives a [`SchemaWizard`](common::schema::wizard::SchemaWizard) through
//! its four steps. On mount it loads the project's parameters, the saved
//! mapping (unless the coordinator already carries one) and the database
//! schemas. Saving validates on the server, creates or alters the table,
//! stores the mapping and finally pushes the source binding of every
//! existing column.

use yew::prelude::*;

mod messages;
mod props;
mod state;
mod update;
mod view;

pub use messages::Msg;
pub use props::SchemaMappingProps;
pub use state::SchemaMapping;

impl Component for SchemaMapping {
    type Message = Msg;
    type Properties = SchemaMappingProps;

    fn create(ctx: &Context<Self>) -> Self {
        ctx.link().send_message(Msg::Load);
        SchemaMapping::new(ctx.props().saved.clone())
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        update::update(self, ctx, msg)
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        view::view(self, ctx)
    }
}
