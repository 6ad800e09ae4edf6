//! Labelled inputs used by the admin forms. Each reports its raw string
//! value through `onchange`; parsing is left to the form.

use wasm_bindgen::JsCast;
use web_sys::{HtmlInputElement, HtmlSelectElement, HtmlTextAreaElement};
use yew::prelude::*;

const LABEL_CLASS: &str =
    "block text-sm font-medium text-neutral-700 dark:text-neutral-300 mb-2";
const INPUT_CLASS: &str = "w-full px-3 py-2 border border-neutral-300 \
    dark:border-neutral-600 rounded-md bg-white dark:bg-neutral-700 \
    text-neutral-900 dark:text-neutral-100 focus:outline-none \
    focus:ring-2 focus:ring-neutral-500";

fn event_value(e: &Event) -> Option<String> {
    let target = e.target()?;
    if let Some(input) = target.dyn_ref::<HtmlInputElement>() {
        return Some(input.value());
    }
    if let Some(select) = target.dyn_ref::<HtmlSelectElement>() {
        return Some(select.value());
    }
    target.dyn_ref::<HtmlTextAreaElement>().map(|area| area.value())
}

fn value_callback(onchange: &Callback<String>) -> Callback<Event> {
    let onchange = onchange.clone();
    Callback::from(move |e: Event| {
        if let Some(value) = event_value(&e) {
            onchange.emit(value);
        }
    })
}

#[derive(Properties, PartialEq)]
pub struct TextFieldProps {
    pub id: AttrValue,
    pub label: AttrValue,
    pub value: String,
    pub onchange: Callback<String>,
    /// Input type: text, number, datetime-local, ...
    #[prop_or(AttrValue::Static("text"))]
    pub kind: AttrValue,
    #[prop_or_default]
    pub required: bool,
    #[prop_or_default]
    pub placeholder: Option<AttrValue>,
    #[prop_or_default]
    pub disabled: bool,
}

#[function_component]
pub fn TextField(props: &TextFieldProps) -> Html {
    html! {
        <div>
            <label for={props.id.clone()} class={LABEL_CLASS}>
                {&props.label}
                if props.required {
                    <span class="text-red-600">{" *"}</span>
                }
            </label>
            <input
                id={props.id.clone()}
                type={props.kind.clone()}
                class={INPUT_CLASS}
                value={props.value.clone()}
                placeholder={props.placeholder.clone()}
                disabled={props.disabled}
                step={(props.kind.as_str() == "number").then_some(AttrValue::Static("any"))}
                onchange={value_callback(&props.onchange)}
            />
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct TextAreaProps {
    pub id: AttrValue,
    pub label: AttrValue,
    pub value: String,
    pub onchange: Callback<String>,
    #[prop_or_default]
    pub disabled: bool,
}

#[function_component]
pub fn TextArea(props: &TextAreaProps) -> Html {
    html! {
        <div>
            <label for={props.id.clone()} class={LABEL_CLASS}>{&props.label}</label>
            <textarea
                id={props.id.clone()}
                rows="4"
                class={INPUT_CLASS}
                value={props.value.clone()}
                disabled={props.disabled}
                onchange={value_callback(&props.onchange)}
            />
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct SelectFieldProps {
    pub id: AttrValue,
    pub label: AttrValue,
    pub value: String,
    /// (value, label) pairs.
    pub options: Vec<(&'static str, &'static str)>,
    pub onchange: Callback<String>,
    #[prop_or_default]
    pub disabled: bool,
}

#[function_component]
pub fn SelectField(props: &SelectFieldProps) -> Html {
    html! {
        <div>
            <label for={props.id.clone()} class={LABEL_CLASS}>{&props.label}</label>
            <select
                id={props.id.clone()}
                class={INPUT_CLASS}
                disabled={props.disabled}
                onchange={value_callback(&props.onchange)}
            >
                {for props.options.iter().map(|(value, label)| html! {
                    <option
                        value={*value}
                        selected={props.value.eq_ignore_ascii_case(value)}
                    >
                        {*label}
                    </option>
                })}
            </select>
        </div>
    }
}
