use common::workflow::steps::STEPS;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct StepIndicatorProps {
    /// Highlighted step, `1..=5`.
    pub current: u8,
}

#[function_component(StepIndicator)]
pub fn step_indicator(props: &StepIndicatorProps) -> Html {
    html! {
        <ol class="step-indicator">
            { for STEPS.iter().map(|step| {
                let class = classes!(
                    "step",
                    (step.id < props.current).then_some("done"),
                    (step.id == props.current).then_some("current"),
                );
                html! {
                    <li {class} title={step.description}>
                        <span class="step-number">{ step.id }</span>
                        <span class="step-title">{ step.title }</span>
                    </li>
                }
            }) }
        </ol>
    }
}
