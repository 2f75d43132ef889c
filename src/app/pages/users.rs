//! Users page: searchable accounts with activation.

use dioxus::prelude::*;

use admin_wire::User;

use crate::app::components::{ConfirmDialog, Paginator, StatusBadge, TableCard, TableNotice};
use crate::app::state::{use_action, use_admin, use_filter, use_list, use_paging};
use crate::controller::ConfirmGate;
use crate::resources::short_date;
use crate::resources::users::{activation_confirm, UsersResource};

#[component]
pub fn Users() -> Element {
    let ctx = use_admin();
    let list = use_list::<UsersResource>();
    let paging = use_paging(list);
    let on_search = use_filter(list, |f, search: String| f.search = search);
    let run = use_action(list, "User updated.");
    let mut confirm = use_signal(ConfirmGate::default);

    let view = list.read();
    let users = view.items().to_vec();
    let search = view.filter().search.clone();

    rsx! {
        div { class: "toolbar",
            input {
                r#type: "search",
                placeholder: "Search by name or email",
                value: "{search}",
                oninput: move |e| on_search.call(e.value()),
            }
        }

        TableCard { loading: view.is_loading(),
            table {
                thead {
                    tr {
                        th { "Name" }
                        th { "Email" }
                        th { "Role" }
                        th { "Status" }
                        th { "Joined" }
                        th {}
                    }
                }
                tbody {
                    if users.is_empty() {
                        TableNotice { columns: 6, loading: view.is_loading(), empty_text: "No users found." }
                    }
                    for user in users {
                        UserRow {
                            key: "{user.id}",
                            user: user.clone(),
                            on_toggle: move |user: User| confirm.write().request(activation_confirm(&user)),
                        }
                    }
                }
            }
            Paginator {
                page: view.page(),
                total_pages: view.total_pages(),
                page_size: view.page_size(),
                page_sizes: ctx.config.page_sizes(),
                first_row: view.first_row(),
                last_row: view.last_row(),
                total: view.total(),
                on_page: paging.on_page,
                on_page_size: paging.on_page_size,
            }
        }

        ConfirmDialog { gate: confirm, on_accept: run }
    }
}

#[component]
fn UserRow(user: User, on_toggle: EventHandler<User>) -> Element {
    let name = user.full_name();
    let joined = short_date(&user.created_at);
    let email = user.email.clone();
    let role = user.role.label();
    let active = user.is_active;

    rsx! {
        tr {
            td { "{name}" }
            td { "{email}" }
            td { "{role}" }
            td { StatusBadge { on: active, on_label: "Active", off_label: "Inactive" } }
            td { "{joined}" }
            td {
                button {
                    class: "btn btn-outline btn-sm",
                    onclick: move |_| on_toggle.call(user.clone()),
                    if active { "Deactivate" } else { "Activate" }
                }
            }
        }
    }
}
