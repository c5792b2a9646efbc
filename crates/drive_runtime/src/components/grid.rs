use drive_model::{ContextMenuState, ROOT_FOLDER_ID};

use super::*;

const SKELETON_CARDS: usize = 8;

#[component]
pub(super) fn FileGrid(runtime: DriveRuntimeContext) -> impl IntoView {
    let current_folder = move || {
        runtime
            .state
            .with(|state| state.file_system.current_folder_id.clone())
    };
    let children = create_local_resource(
        move || (current_folder(), runtime.query_generation.get()),
        move |(folder_id, _)| {
            let client = runtime.host.get_value().client();
            async move { client.nodes_by_parent(&folder_id).await }
        },
    );

    let on_background_menu = move |ev: web_sys::MouseEvent| {
        stop_mouse_event(&ev);
        runtime.dispatch_action(DriveAction::SetContextMenu {
            menu: Some(ContextMenuState::background(ev.client_x(), ev.client_y())),
        });
    };

    view! {
        <section class="drive-grid-area" on:contextmenu=on_background_menu>
            {move || match children.get() {
                None => view! { <GridSkeleton /> }.into_view(),
                Some(Err(err)) => {
                    view! {
                        <p class="drive-grid-error" role="alert">
                            {err.user_message("Failed to load folder")}
                        </p>
                    }
                    .into_view()
                }
                Some(Ok(nodes)) if nodes.iter().all(|node| node.is_deleted) => {
                    view! {
                        <div class="drive-grid-empty">
                            <p class="drive-grid-empty-title">"Empty folder"</p>
                            <p class="drive-grid-empty-hint">"Right-click to create items"</p>
                        </div>
                    }
                    .into_view()
                }
                Some(Ok(nodes)) => {
                    view! {
                        <div class="drive-grid" role="list">
                            {nodes
                                .into_iter()
                                .filter(|node| !node.is_deleted)
                                .map(|node| view! { <GridCard runtime node /> })
                                .collect_view()}
                        </div>
                    }
                    .into_view()
                }
            }}
        </section>
    }
}

#[component]
fn GridCard(runtime: DriveRuntimeContext, node: FileNode) -> impl IntoView {
    let glyph = node_glyph(node.kind);
    let subtitle = node_subtitle(&node);
    let name = node.name.clone();
    let title = node.name.clone();
    let node_id = node.id.clone();
    let is_folder = node.is_folder();

    let on_click = move |_| {
        if is_folder {
            runtime.dispatch_action(DriveAction::OpenFolder {
                folder_id: node.id.clone(),
            });
        } else {
            runtime.dispatch_action(DriveAction::ActivateNode { node: node.clone() });
        }
    };
    let on_context_menu = move |ev: web_sys::MouseEvent| {
        stop_mouse_event(&ev);
        runtime.dispatch_action(DriveAction::SetContextMenu {
            menu: Some(ContextMenuState::item(
                ev.client_x(),
                ev.client_y(),
                node_id.clone(),
            )),
        });
    };

    view! {
        <button
            class="drive-card"
            class:drive-card-folder=is_folder
            type="button"
            role="listitem"
            title=title
            on:click=on_click
            on:contextmenu=on_context_menu
        >
            <span class="drive-card-icon" aria-hidden="true">{glyph}</span>
            <span class="drive-card-name">{name}</span>
            <span class="drive-card-meta">{subtitle}</span>
        </button>
    }
}

#[component]
fn GridSkeleton() -> impl IntoView {
    view! {
        <div class="drive-grid drive-skeleton" aria-busy="true">
            {(0..SKELETON_CARDS)
                .map(|_| view! { <div class="drive-card drive-skeleton-card"></div> })
                .collect_view()}
        </div>
    }
}

#[component]
pub(super) fn Breadcrumbs(runtime: DriveRuntimeContext) -> impl IntoView {
    let current_folder = move || {
        runtime
            .state
            .with(|state| state.file_system.current_folder_id.clone())
    };
    let trail = create_local_resource(
        move || (current_folder(), runtime.query_generation.get()),
        move |(folder_id, _)| {
            let client = runtime.host.get_value().client();
            async move { client.breadcrumbs(&folder_id).await }
        },
    );
    let at_root = move || runtime.state.with(|state| state.file_system.is_at_root());

    let navigate_to = move |folder_id: String| {
        runtime.dispatch_action(DriveAction::SetCurrentFolder { folder_id });
    };

    view! {
        <header class="drive-breadcrumbs">
            <button
                class="drive-sidebar-toggle"
                type="button"
                aria-label="Toggle sidebar"
                on:click=move |_| runtime.dispatch_action(DriveAction::ToggleSidebar)
            >
                "☰"
            </button>
            <nav aria-label="Breadcrumb">
                <ol class="drive-breadcrumb-list">
                    <li>
                        <button
                            class="drive-breadcrumb"
                            class:active=at_root
                            type="button"
                            on:click=move |_| navigate_to(ROOT_FOLDER_ID.to_string())
                        >
                            "Home"
                        </button>
                    </li>
                    {move || {
                        let crumbs = match trail.get() {
                            Some(Ok(crumbs)) => crumbs,
                            Some(Err(err)) => {
                                logging::warn!("loading breadcrumbs failed: {err}");
                                Vec::new()
                            }
                            None => Vec::new(),
                        };
                        let last = crumbs.len().saturating_sub(1);
                        crumbs
                            .into_iter()
                            .enumerate()
                            .map(|(index, crumb)| {
                                let id = crumb.id.clone();
                                view! {
                                    <li>
                                        <span class="drive-breadcrumb-sep" aria-hidden="true">
                                            "/"
                                        </span>
                                        <button
                                            class="drive-breadcrumb"
                                            class:active=index == last
                                            type="button"
                                            on:click=move |_| navigate_to(id.clone())
                                        >
                                            {crumb.name}
                                        </button>
                                    </li>
                                }
                            })
                            .collect_view()
                    }}
                </ol>
            </nav>
        </header>
    }
}
