//! Labelled form inputs with invalid-field markers.

use dioxus::prelude::*;

fn field_class(invalid: bool) -> &'static str {
    if invalid {
        "field invalid"
    } else {
        "field"
    }
}

#[component]
pub fn TextField(
    #[props(into)] label: String,
    value: String,
    on_input: EventHandler<String>,
    #[props(default = false)] invalid: bool,
    #[props(default = false)] required: bool,
    #[props(default = "text".to_string(), into)] input_type: String,
    #[props(default, into)] placeholder: String,
    #[props(default, into)] hint: String,
) -> Element {
    rsx! {
        label { class: field_class(invalid),
            span { "{label}" if required { " *" } }
            input {
                r#type: "{input_type}",
                value: "{value}",
                placeholder: "{placeholder}",
                aria_invalid: if invalid { "true" } else { "false" },
                oninput: move |e| on_input.call(e.value()),
            }
            if !hint.is_empty() {
                small { class: "field-hint", "{hint}" }
            }
        }
    }
}

#[component]
pub fn TextArea(
    #[props(into)] label: String,
    value: String,
    on_input: EventHandler<String>,
    #[props(default = false)] invalid: bool,
    #[props(default = false)] required: bool,
    #[props(default = 3)] rows: u32,
    #[props(default, into)] hint: String,
) -> Element {
    rsx! {
        label { class: field_class(invalid),
            span { "{label}" if required { " *" } }
            textarea {
                rows: "{rows}",
                value: "{value}",
                aria_invalid: if invalid { "true" } else { "false" },
                oninput: move |e| on_input.call(e.value()),
            }
            if !hint.is_empty() {
                small { class: "field-hint", "{hint}" }
            }
        }
    }
}

/// Number input reporting `None` while the text does not parse.
#[component]
pub fn NumberField(
    #[props(into)] label: String,
    #[props(!optional)] value: Option<f64>,
    on_input: EventHandler<Option<f64>>,
    #[props(default = false)] invalid: bool,
    #[props(default = false)] required: bool,
    #[props(default = "any".to_string(), into)] step: String,
) -> Element {
    let text = value.map(|v| v.to_string()).unwrap_or_default();
    rsx! {
        label { class: field_class(invalid),
            span { "{label}" if required { " *" } }
            input {
                r#type: "number",
                step: "{step}",
                value: "{text}",
                aria_invalid: if invalid { "true" } else { "false" },
                oninput: move |e| on_input.call(e.value().trim().parse().ok()),
            }
        }
    }
}

#[component]
pub fn CheckboxField(#[props(into)] label: String, checked: bool, on_change: EventHandler<bool>) -> Element {
    rsx! {
        label { class: "checkbox-field",
            input {
                r#type: "checkbox",
                checked,
                onchange: move |e| on_change.call(e.checked()),
            }
            "{label}"
        }
    }
}

/// `options` are `(value, label)` pairs; a non-empty `placeholder` adds an empty first choice.
#[component]
pub fn SelectField(
    #[props(into)] label: String,
    value: String,
    options: Vec<(String, String)>,
    on_change: EventHandler<String>,
    #[props(default = false)] invalid: bool,
    #[props(default = false)] required: bool,
    #[props(default, into)] placeholder: String,
) -> Element {
    rsx! {
        label { class: field_class(invalid),
            span { "{label}" if required { " *" } }
            select {
                value: "{value}",
                aria_invalid: if invalid { "true" } else { "false" },
                onchange: move |e| on_change.call(e.value()),
                if !placeholder.is_empty() {
                    option { value: "", selected: value.is_empty(), "{placeholder}" }
                }
                for (option_value, option_label) in options {
                    option {
                        key: "{option_value}",
                        selected: option_value == value,
                        value: "{option_value}",
                        "{option_label}"
                    }
                }
            }
        }
    }
}

/// Tri-state filter select: any / yes / no.
#[component]
pub fn BoolFilter(
    #[props(into)] label: String,
    #[props(into)] yes: String,
    #[props(into)] no: String,
    #[props(!optional)] value: Option<bool>,
    on_change: EventHandler<Option<bool>>,
) -> Element {
    let current = match value {
        Some(true) => "true",
        Some(false) => "false",
        None => "",
    };
    rsx! {
        select {
            aria_label: "{label}",
            value: "{current}",
            onchange: move |e| {
                on_change.call(match e.value().as_str() {
                    "true" => Some(true),
                    "false" => Some(false),
                    _ => None,
                })
            },
            option { value: "", selected: value.is_none(), "{label}: all" }
            option { value: "true", selected: value == Some(true), "{yes}" }
            option { value: "false", selected: value == Some(false), "{no}" }
        }
    }
}
