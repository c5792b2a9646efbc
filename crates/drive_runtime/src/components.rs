//! Dashboard UI composition, route guard, and shared widgets.

mod a11y;
mod auth_pages;
mod dialogs;
mod grid;
mod sidebar;
mod viewer;

use drive_api::ApiError;
use drive_model::{FileNode, NodeKind};
use leptos::*;
use leptos_router::Redirect;
use wasm_bindgen::JsCast;

pub use self::auth_pages::{
    ForgotPasswordPage, LoginPage, RegisterPage, ResetPasswordPage, VerifyEmailPage,
};
use self::{
    dialogs::{DriveContextMenu, DriveModal},
    grid::{Breadcrumbs, FileGrid},
    sidebar::Sidebar,
    viewer::FileViewer,
};

use crate::{
    config::UPLOAD_ACCEPT,
    model::ToastLevel,
    reducer::DriveAction,
    runtime_context::{use_drive_runtime, DriveRuntimeContext},
};

/// DOM id of the hidden upload input opened by the context menu.
pub const UPLOAD_INPUT_ID: &str = "drive-upload-input";

pub(crate) const CONTEXT_MENU_SELECTOR: &str = ".drive-context-menu";

pub(crate) fn node_glyph(kind: NodeKind) -> &'static str {
    match kind {
        NodeKind::Folder => "📁",
        NodeKind::Text => "📄",
        NodeKind::Image => "🖼",
        NodeKind::Audio => "🎵",
        NodeKind::Video => "🎞",
        NodeKind::Document => "📑",
        NodeKind::Archive => "🗜",
        NodeKind::Other => "📦",
    }
}

pub(crate) fn format_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    if unit == 0 {
        format!("{bytes} B")
    } else {
        format!("{value:.1} {}", UNITS[unit])
    }
}

pub(crate) fn node_subtitle(node: &FileNode) -> String {
    match (node.kind, node.size) {
        (NodeKind::Folder, _) => "Folder".to_string(),
        (kind, Some(size)) => format!("{} · {}", kind.as_str(), format_size(size)),
        (kind, None) => kind.as_str().to_string(),
    }
}

pub(crate) fn menu_position_style(x: i32, y: i32) -> String {
    format!("left:{}px;top:{}px;", x.max(0), y.max(0))
}

pub(crate) fn stop_mouse_event(ev: &web_sys::MouseEvent) {
    ev.prevent_default();
    ev.stop_propagation();
}

#[component]
/// Full-screen placeholder shown while the session is resolved.
pub fn InitializingScreen() -> impl IntoView {
    view! {
        <div class="drive-initializing" role="status" aria-live="polite">
            <div class="drive-initializing-logo" aria-hidden="true"></div>
            <p>"OrbitDrive is initializing..."</p>
        </div>
    }
}

#[component]
/// Renders `children` for a signed-in session and redirects to `/login` otherwise.
///
/// While signed in the account is refreshed through `getMe`; a `401` ends the session.
pub fn ProtectedRoute(children: ChildrenFn) -> impl IntoView {
    let runtime = use_drive_runtime();
    let boot_complete = move || runtime.state.with(|state| state.boot_complete);
    let authenticated = move || runtime.state.with(|state| state.auth.is_authenticated);

    let me = create_local_resource(
        move || (boot_complete(), authenticated()),
        move |(booted, signed_in)| {
            let client = runtime.host.get_value().client();
            async move {
                if booted && signed_in {
                    Some(client.me().await)
                } else {
                    None
                }
            }
        },
    );

    create_effect(move |_| match me.get() {
        Some(Some(Ok(user))) => runtime.dispatch_action(DriveAction::UpdateUser { user }),
        Some(Some(Err(err))) if err.is_unauthorized() => {
            runtime.dispatch_action(DriveAction::Logout)
        }
        Some(Some(Err(err))) => logging::warn!("session refresh failed: {err}"),
        _ => {}
    });

    let waiting_for_user = move || {
        runtime.state.with(|state| state.auth.user.is_none()) && me.loading().get()
    };

    view! {
        {move || {
            if !boot_complete() || (authenticated() && waiting_for_user()) {
                view! { <InitializingScreen /> }.into_view()
            } else if !authenticated() {
                view! { <Redirect path="/login" /> }.into_view()
            } else {
                children().into_view()
            }
        }}
    }
}

/// Reducer actions for one all-nodes load: reconcile on success, sign out on `401`.
pub(crate) fn all_nodes_actions(result: Result<Vec<FileNode>, ApiError>) -> Vec<DriveAction> {
    match result {
        Ok(nodes) => vec![DriveAction::ReconcileWithNodes { nodes }],
        Err(err) => {
            logging::warn!("loading all nodes failed: {err}");
            if err.is_unauthorized() {
                vec![DriveAction::Logout]
            } else {
                Vec::new()
            }
        }
    }
}

/// A press closes the open context menu unless it lands inside the menu.
pub(crate) fn press_dismisses_menu(menu_open: bool, pressed_inside_menu: bool) -> bool {
    menu_open && !pressed_inside_menu
}

#[component]
/// File manager shell: sidebar, breadcrumbs, grid, and every overlay.
pub fn Dashboard() -> impl IntoView {
    let runtime = use_drive_runtime();
    let sidebar_open = move || runtime.state.with(|state| state.file_system.sidebar_open);

    // Owned here so reconciliation keeps running while the sidebar is closed.
    let all_nodes = create_local_resource(
        move || runtime.query_generation.get(),
        move |_| {
            let client = runtime.host.get_value().client();
            async move { client.all_nodes().await }
        },
    );
    create_effect(move |_| {
        if let Some(result) = all_nodes.get() {
            for action in all_nodes_actions(result) {
                runtime.dispatch_action(action);
            }
        }
    });

    let outside_press_listener = window_event_listener(ev::mousedown, move |ev| {
        let menu_open = runtime
            .state
            .with_untracked(|state| state.file_system.context_menu.is_some());
        if press_dismisses_menu(menu_open, a11y::event_within(&ev, CONTEXT_MENU_SELECTOR)) {
            runtime.dispatch_action(DriveAction::CloseContextMenu);
        }
    });
    on_cleanup(move || outside_press_listener.remove());

    view! {
        <div class="drive-dashboard" class:sidebar-collapsed=move || !sidebar_open()>
            <Show when=sidebar_open fallback=|| ()>
                <div
                    class="drive-sidebar-backdrop"
                    aria-hidden="true"
                    on:click=move |_| {
                        runtime.dispatch_action(DriveAction::SetSidebarOpen { open: false })
                    }
                ></div>
                <aside class="drive-sidebar" aria-label="Storage explorer">
                    <Sidebar runtime nodes=all_nodes />
                </aside>
            </Show>
            <main class="drive-main">
                <Breadcrumbs runtime />
                <FileGrid runtime />
            </main>
            <DriveContextMenu runtime />
            <DriveModal runtime />
            <FileViewer runtime />
            <BusyOverlay runtime />
            <ToastStack runtime />
            <UploadInput runtime />
        </div>
    }
}

#[component]
fn BusyOverlay(runtime: DriveRuntimeContext) -> impl IntoView {
    let label = move || runtime.dashboard.with(|dashboard| dashboard.overlay_label());

    view! {
        {move || {
            label().map(|label| {
                view! {
                    <div class="drive-busy-overlay" role="status" aria-live="polite">
                        <span class="drive-spinner" aria-hidden="true"></span>
                        <span>{label}</span>
                    </div>
                }
            })
        }}
    }
}

#[component]
fn ToastStack(runtime: DriveRuntimeContext) -> impl IntoView {
    view! {
        <div class="drive-toasts" aria-live="assertive">
            <For
                each=move || runtime.dashboard.with(|dashboard| dashboard.toasts.clone())
                key=|toast| toast.id
                let:toast
            >
                <div
                    class="drive-toast"
                    class:drive-toast-error={toast.level == ToastLevel::Error}
                    class:drive-toast-success={toast.level == ToastLevel::Success}
                    role="alert"
                    on:click=move |_| {
                        runtime.dispatch_action(DriveAction::DismissToast { id: toast.id })
                    }
                >
                    {toast.message.clone()}
                </div>
            </For>
        </div>
    }
}

#[component]
fn UploadInput(runtime: DriveRuntimeContext) -> impl IntoView {
    let on_change = move |ev: ev::Event| {
        let Some(input) = event_target_input(&ev) else {
            return;
        };
        let Some(list) = input.files() else {
            return;
        };
        if list.length() == 0 {
            return;
        }
        spawn_local(async move {
            match drive_web::read_upload_files(&list).await {
                Ok(files) => runtime.dispatch_action(DriveAction::StartUpload { files }),
                Err(err) => {
                    logging::warn!("reading selected files failed: {err}");
                    runtime.dispatch_action(DriveAction::PushToast {
                        level: ToastLevel::Error,
                        message: err.user_message("Failed to upload files"),
                    });
                }
            }
            input.set_value("");
        });
    };

    view! {
        <input
            id=UPLOAD_INPUT_ID
            class="drive-upload-input"
            type="file"
            multiple=true
            accept=UPLOAD_ACCEPT
            hidden=true
            on:change=on_change
        />
    }
}

fn event_target_input(ev: &ev::Event) -> Option<web_sys::HtmlInputElement> {
    ev.target()
        .and_then(|target| target.dyn_into::<web_sys::HtmlInputElement>().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sizes_scale_to_readable_units() {
        assert_eq!(format_size(512), "512 B");
        assert_eq!(format_size(2048), "2.0 KB");
        assert_eq!(format_size(5 * 1024 * 1024 + 512 * 1024), "5.5 MB");
    }

    #[test]
    fn all_nodes_load_reconciles_or_signs_out() {
        let nodes = vec![FileNode {
            id: "f1".into(),
            name: "f1".into(),
            kind: NodeKind::Folder,
            parent_id: None,
            content: None,
            url: None,
            size: None,
            mime_type: None,
            is_deleted: false,
            created_at: String::new(),
            updated_at: String::new(),
        }];
        assert_eq!(
            all_nodes_actions(Ok(nodes.clone())),
            vec![DriveAction::ReconcileWithNodes { nodes }]
        );
        assert_eq!(
            all_nodes_actions(Err(ApiError::status(401, "expired"))),
            vec![DriveAction::Logout]
        );
        assert!(all_nodes_actions(Err(ApiError::Network("offline".into()))).is_empty());
    }

    #[test]
    fn presses_inside_the_menu_keep_it_open() {
        assert!(press_dismisses_menu(true, false));
        assert!(!press_dismisses_menu(true, true));
        assert!(!press_dismisses_menu(false, false));
    }

    #[test]
    fn menu_position_clamps_to_viewport_origin() {
        assert_eq!(menu_position_style(-4, 30), "left:0px;top:30px;");
    }

    #[test]
    fn folders_have_no_size_subtitle() {
        let mut node = FileNode {
            id: "n".into(),
            name: "n".into(),
            kind: NodeKind::Folder,
            parent_id: None,
            content: None,
            url: None,
            size: Some(10),
            mime_type: None,
            is_deleted: false,
            created_at: String::new(),
            updated_at: String::new(),
        };
        assert_eq!(node_subtitle(&node), "Folder");
        node.kind = NodeKind::Image;
        assert_eq!(node_subtitle(&node), "image · 10 B");
        assert_eq!(node_glyph(NodeKind::Folder), "📁");
    }
}
