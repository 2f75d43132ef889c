//! Table chrome: paginator, status badges, empty/loading rows.

use dioxus::prelude::*;

/// Page navigation plus page-size choice for a server-paginated table.
#[component]
pub fn Paginator(
    page: u32,
    total_pages: u32,
    page_size: u32,
    page_sizes: Vec<u32>,
    first_row: u64,
    last_row: u64,
    total: u64,
    on_page: EventHandler<u32>,
    on_page_size: EventHandler<u32>,
) -> Element {
    let has_prev = page > 1;
    let has_next = page < total_pages;

    rsx! {
        div { class: "paginator",
            small { "{first_row}-{last_row} of {total}" }
            div { class: "paginator-pages",
                button {
                    class: "btn btn-outline btn-sm",
                    disabled: !has_prev,
                    onclick: move |_| on_page.call(1),
                    "«"
                }
                button {
                    class: "btn btn-outline btn-sm",
                    disabled: !has_prev,
                    onclick: move |_| on_page.call(page.saturating_sub(1)),
                    "‹"
                }
                span { "Page {page} of {total_pages}" }
                button {
                    class: "btn btn-outline btn-sm",
                    disabled: !has_next,
                    onclick: move |_| on_page.call(page + 1),
                    "›"
                }
                button {
                    class: "btn btn-outline btn-sm",
                    disabled: !has_next,
                    onclick: move |_| on_page.call(total_pages),
                    "»"
                }
            }
            select {
                aria_label: "Rows per page",
                value: "{page_size}",
                onchange: move |e| {
                    if let Ok(size) = e.value().parse() {
                        on_page_size.call(size);
                    }
                },
                for size in page_sizes {
                    option { key: "{size}", value: "{size}", selected: size == page_size, "{size} / page" }
                }
            }
        }
    }
}

#[component]
pub fn StatusBadge(on: bool, #[props(into)] on_label: String, #[props(into)] off_label: String) -> Element {
    rsx! {
        if on {
            span { class: "badge badge-ok", "{on_label}" }
        } else {
            span { class: "badge badge-muted", "{off_label}" }
        }
    }
}

fn table_card_class(loading: bool) -> &'static str {
    if loading {
        "card p-6 table-wrap is-loading"
    } else {
        "card p-6 table-wrap"
    }
}

/// Card around a list table. Busy for as long as a fetch is out, including
/// page changes and refreshes over rows that are already shown.
#[component]
pub fn TableCard(loading: bool, children: Element) -> Element {
    rsx! {
        div {
            class: table_card_class(loading),
            aria_busy: if loading { "true" } else { "false" },
            if loading {
                div { class: "table-refreshing", role: "status", "Loading..." }
            }
            {children}
        }
    }
}

/// Placeholder row while loading or when the page is empty.
#[component]
pub fn TableNotice(columns: u32, loading: bool, #[props(into)] empty_text: String) -> Element {
    rsx! {
        tr {
            td { colspan: "{columns}", class: "table-notice",
                if loading {
                    span { aria_busy: "true", "Loading..." }
                } else {
                    "{empty_text}"
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_card_marks_loading_over_existing_rows() {
        assert_eq!(table_card_class(true), "card p-6 table-wrap is-loading");
        assert_eq!(table_card_class(false), "card p-6 table-wrap");
    }
}
