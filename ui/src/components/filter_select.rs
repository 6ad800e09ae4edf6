use payloads::Selection;
use payloads::filter::ALL;
use web_sys::HtmlSelectElement;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct FilterSelectProps {
    pub label: AttrValue,
    pub value: Selection,
    /// (value, label) pairs shown after "Todos".
    pub options: Vec<(&'static str, &'static str)>,
    pub onchange: Callback<Selection>,
}

/// One criterion of a listing filter. The first option lifts the
/// restriction.
#[function_component]
pub fn FilterSelect(props: &FilterSelectProps) -> Html {
    let onchange = props.onchange.reform(|e: Event| {
        let select: HtmlSelectElement = e.target_unchecked_into();
        Selection::from(select.value())
    });
    let current = props.value.as_str();

    html! {
        <label class="flex flex-col text-sm text-neutral-700 dark:text-neutral-300">
            <span class="mb-1 font-medium">{&props.label}</span>
            <select
                {onchange}
                class="px-3 py-2 border border-neutral-300 dark:border-neutral-600 rounded-md bg-white dark:bg-neutral-700"
            >
                <option value={ALL} selected={props.value == Selection::All}>{"Todos"}</option>
                {for props.options.iter().map(|(value, label)| html! {
                    <option value={*value} selected={current.eq_ignore_ascii_case(value)}>
                        {*label}
                    </option>
                })}
            </select>
        </label>
    }
}
