use drive_model::{ContextMenuState, NodeTree, TreeRow};

use super::*;

#[component]
pub(super) fn Sidebar(
    runtime: DriveRuntimeContext,
    /// All-nodes query owned by the dashboard.
    nodes: Resource<u64, Result<Vec<FileNode>, ApiError>>,
) -> impl IntoView {
    let rows = move || {
        let expanded = runtime
            .state
            .with(|state| state.file_system.expanded_folders.clone());
        nodes.get().map(|result| {
            result.map(|nodes| NodeTree::new(nodes).visible_rows(&expanded))
        })
    };

    let logging_out = create_rw_signal(false);
    let on_logout = move |_| {
        if logging_out.get_untracked() {
            return;
        }
        logging_out.set(true);
        let client = runtime.host.get_value().client();
        spawn_local(async move {
            if let Err(err) = client.logout().await {
                logging::warn!("logout request failed: {err}");
            }
            runtime.dispatch_action(DriveAction::Logout);
            logging_out.set(false);
        });
    };

    let user_name = move || {
        runtime
            .state
            .with(|state| state.auth.display_name().to_string())
    };
    let user_email = move || {
        runtime.state.with(|state| {
            state
                .auth
                .user
                .as_ref()
                .map(|user| user.email.clone())
                .unwrap_or_default()
        })
    };

    view! {
        <div class="drive-sidebar-inner">
            <header class="drive-brand">
                <span class="drive-brand-logo" aria-hidden="true"></span>
                <h2>"Orbit" <span class="drive-brand-accent">"Drive"</span></h2>
            </header>

            <nav class="drive-tree" aria-label="Folders">
                <p class="drive-tree-heading">"Storage Explorer"</p>
                {move || match rows() {
                    None => view! { <SidebarSkeleton /> }.into_view(),
                    Some(Err(err)) => {
                        view! {
                            <p class="drive-tree-error" role="alert">
                                {err.user_message("Failed to load files")}
                            </p>
                        }
                        .into_view()
                    }
                    Some(Ok(rows)) if rows.is_empty() => {
                        view! {
                            <div class="drive-tree-empty">
                                <p>"No elements discovered"</p>
                            </div>
                        }
                        .into_view()
                    }
                    Some(Ok(rows)) => {
                        view! {
                            <ul class="drive-tree-list" role="tree">
                                {rows
                                    .into_iter()
                                    .map(|row| view! { <SidebarRow runtime row /> })
                                    .collect_view()}
                            </ul>
                        }
                        .into_view()
                    }
                }}
            </nav>

            <footer class="drive-user">
                <div class="drive-user-avatar" aria-hidden="true"></div>
                <div class="drive-user-meta">
                    <p class="drive-user-name">{user_name}</p>
                    <p class="drive-user-email">{user_email}</p>
                </div>
                <button
                    class="drive-logout"
                    type="button"
                    disabled=move || logging_out.get()
                    on:click=on_logout
                >
                    {move || if logging_out.get() { "Logging out..." } else { "Log Out" }}
                </button>
            </footer>
        </div>
    }
}

#[component]
fn SidebarRow(runtime: DriveRuntimeContext, row: TreeRow) -> impl IntoView {
    let TreeRow {
        node,
        level,
        expanded,
    } = row;
    let node_id = node.id.clone();
    let is_folder = node.is_folder();
    let active = {
        let node_id = node_id.clone();
        move || runtime.state.with(|state| state.file_system.current_folder_id == node_id)
    };
    let indent = format!("margin-left:{}px;", level * 12);
    let glyph = node_glyph(node.kind);
    let name = node.name.clone();

    let on_click = move |_| {
        runtime.dispatch_action(DriveAction::ActivateNode { node: node.clone() });
    };
    let on_context_menu = {
        let node_id = node_id.clone();
        move |ev: web_sys::MouseEvent| {
            stop_mouse_event(&ev);
            runtime.dispatch_action(DriveAction::SetContextMenu {
                menu: Some(ContextMenuState::item(
                    ev.client_x(),
                    ev.client_y(),
                    node_id.clone(),
                )),
            });
        }
    };
    let on_toggle = move |ev: web_sys::MouseEvent| {
        ev.stop_propagation();
        runtime.dispatch_action(DriveAction::ToggleFolderExpansion {
            folder_id: node_id.clone(),
        });
    };

    view! {
        <li
            class="drive-tree-row"
            class:active=active
            role="treeitem"
            aria-expanded=move || is_folder.then_some(if expanded { "true" } else { "false" })
            style=indent
            on:click=on_click
            on:contextmenu=on_context_menu
        >
            {if is_folder {
                view! {
                    <button
                        class="drive-tree-chevron"
                        type="button"
                        aria-label={if expanded { "Collapse folder" } else { "Expand folder" }}
                        on:click=on_toggle
                    >
                        {if expanded { "▾" } else { "▸" }}
                    </button>
                }
                .into_view()
            } else {
                view! { <span class="drive-tree-spacer"></span> }.into_view()
            }}
            <span class="drive-tree-icon" aria-hidden="true">{glyph}</span>
            <span class="drive-tree-name">{name}</span>
        </li>
    }
}

#[component]
fn SidebarSkeleton() -> impl IntoView {
    view! {
        <ul class="drive-tree-list drive-skeleton" aria-busy="true">
            {(0..6).map(|_| view! { <li class="drive-skeleton-row"></li> }).collect_view()}
        </ul>
    }
}
