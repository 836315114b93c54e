use common::activity::ActivityLog;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct ActivityLogProps {
    pub log: ActivityLog,
    #[prop_or_default]
    pub on_clear: Option<Callback<()>>,
}

/// Timestamped operator log of a screen, newest entry on top.
#[function_component(ActivityLogView)]
pub fn activity_log_view(props: &ActivityLogProps) -> Html {
    let clear = props.on_clear.clone().map(|on_clear| {
        html! {
            <button class="btn btn-link" onclick={move |_| on_clear.emit(())}>{ "Clear" }</button>
        }
    });

    html! {
        <section class="activity-log">
            <header>
                <h4>{ "Activity" }</h4>
                { for clear }
            </header>
            if props.log.is_empty() {
                <p class="muted">{ "Nothing happened yet." }</p>
            } else {
                <ul>
                    { for props.log.entries().iter().map(|entry| html! {
                        <li class={entry.level.css_class()}>
                            <time>{ &entry.timestamp }</time>
                            <span>{ &entry.message }</span>
                        </li>
                    }) }
                </ul>
            }
        </section>
    }
}
