use uuid::Uuid;
use yew::{html, AttrValue, Component, Context, Html, NodeRef, Properties};

/// Sliding sheet used for the console's modal forms.
pub struct YwMaterialTopSheet {
    pub id: String,
}

#[derive(Properties, PartialEq)]
pub struct Props {
    #[prop_or_default]
    pub children: Html,
    #[prop_or_default]
    pub title: AttrValue,
    pub node_ref: NodeRef,
}

impl Component for YwMaterialTopSheet {
    type Message = ();
    type Properties = Props;

    fn create(_ctx: &Context<Self>) -> Self {
        Self {
            id: format!("id-{}", Uuid::new_v4()),
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let props = ctx.props();
        html! {
            <div class="top-sheet" id={self.id.clone()} ref={props.node_ref.clone()}>
                if !props.title.is_empty() {
                    <h3 class="top-sheet-title">{ props.title.clone() }</h3>
                }
                { props.children.clone() }
            </div>
        }
    }
}

const SHOW_CLASS: &str = "show";

pub fn open_top_sheet(top_sheet_ref: &NodeRef) {
    if let Some(top_sheet) = top_sheet_ref.cast::<web_sys::HtmlElement>() {
        top_sheet.class_list().add_1(SHOW_CLASS).ok();
    }
}

pub fn close_top_sheet(top_sheet_ref: &NodeRef) {
    if let Some(top_sheet) = top_sheet_ref.cast::<web_sys::HtmlElement>() {
        top_sheet.class_list().remove_1(SHOW_CLASS).ok();
    }
}
