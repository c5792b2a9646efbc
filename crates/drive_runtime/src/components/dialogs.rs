use super::{
    a11y::{focus_element_by_id, is_confirm_key, is_dismiss_key},
    *,
};
use crate::{model::ModalKind, reducer::ContextMenuCommand};

const MODAL_INPUT_ID: &str = "drive-modal-input";
const MODAL_CONFIRM_ID: &str = "drive-modal-confirm";

#[component]
pub(super) fn DriveContextMenu(runtime: DriveRuntimeContext) -> impl IntoView {
    let menu = move || runtime.state.with(|state| state.file_system.context_menu.clone());

    view! {
        {move || {
            menu().map(|menu| {
                let commands = ContextMenuCommand::for_target(menu.item_id.is_some());
                view! {
                    <div
                        class="drive-context-menu"
                        role="menu"
                        style=menu_position_style(menu.x, menu.y)
                        on:click=|ev| ev.stop_propagation()
                        on:contextmenu=|ev| stop_mouse_event(&ev)
                        on:keydown=move |ev| {
                            if is_dismiss_key(&ev) {
                                runtime.dispatch_action(DriveAction::CloseContextMenu);
                            }
                        }
                    >
                        {commands
                            .iter()
                            .copied()
                            .map(|command| {
                                view! {
                                    <button
                                        class="drive-context-item"
                                        class:danger={command == ContextMenuCommand::Delete}
                                        type="button"
                                        role="menuitem"
                                        on:click=move |_| {
                                            runtime
                                                .dispatch_action(DriveAction::ContextMenuCommand(command))
                                        }
                                    >
                                        {command.label()}
                                    </button>
                                }
                            })
                            .collect_view()}
                    </div>
                }
            })
        }}
    }
}

#[component]
pub(super) fn DriveModal(runtime: DriveRuntimeContext) -> impl IntoView {
    // Keyed on the kind alone so typing does not rebuild the input.
    let open_kind = create_memo(move |_| {
        runtime
            .dashboard
            .with(|dashboard| dashboard.modal.as_ref().map(|modal| modal.kind.clone()))
    });
    let value = move || {
        runtime.dashboard.with(|dashboard| {
            dashboard
                .modal
                .as_ref()
                .map(|modal| modal.value.clone())
                .unwrap_or_default()
        })
    };
    let can_confirm = move || {
        runtime.dashboard.with(|dashboard| {
            dashboard
                .modal
                .as_ref()
                .is_some_and(|modal| modal.can_confirm())
        })
    };

    create_effect(move |_| {
        if let Some(kind) = open_kind.get() {
            let target = if kind.requires_name() {
                MODAL_INPUT_ID
            } else {
                MODAL_CONFIRM_ID
            };
            request_animation_frame(move || {
                let _ = focus_element_by_id(target);
            });
        }
    });

    let confirm = move || runtime.dispatch_action(DriveAction::ConfirmModal);
    let cancel = move || runtime.dispatch_action(DriveAction::CancelModal);

    view! {
        {move || {
            open_kind.get().map(|kind| {
                let busy_kind = kind.mutation_kind();
                let disabled = move || {
                    !can_confirm()
                        || runtime.dashboard.with(|dashboard| dashboard.is_busy(busy_kind))
                };
                let is_delete = matches!(kind, ModalKind::Delete { .. });
                let body = if is_delete {
                    view! {
                        <p class="drive-modal-text">
                            "Are you sure you want to delete this item? This action cannot be undone."
                        </p>
                    }
                    .into_view()
                } else {
                    view! {
                        <input
                            id=MODAL_INPUT_ID
                            class="drive-modal-input"
                            type="text"
                            placeholder="Enter name..."
                            prop:value=value
                            on:input=move |ev| {
                                runtime.dispatch_action(DriveAction::SetModalValue {
                                    value: event_target_value(&ev),
                                })
                            }
                        />
                    }
                    .into_view()
                };

                view! {
                    <div class="drive-modal-backdrop" on:click=move |_| cancel()>
                        <div
                            class="drive-modal"
                            role="dialog"
                            aria-modal="true"
                            aria-labelledby="drive-modal-title"
                            on:click=|ev| ev.stop_propagation()
                            on:keydown=move |ev| {
                                if is_dismiss_key(&ev) {
                                    ev.prevent_default();
                                    cancel();
                                } else if is_confirm_key(&ev) {
                                    ev.prevent_default();
                                    confirm();
                                }
                            }
                        >
                            <h3 id="drive-modal-title">{kind.title()}</h3>
                            {body}
                            <div class="drive-modal-actions">
                                <button
                                    class="drive-button secondary"
                                    type="button"
                                    on:click=move |_| cancel()
                                >
                                    "Cancel"
                                </button>
                                <button
                                    id=MODAL_CONFIRM_ID
                                    class="drive-button"
                                    class:danger=is_delete
                                    type="button"
                                    disabled=disabled
                                    on:click=move |_| confirm()
                                >
                                    {kind.confirm_label()}
                                </button>
                            </div>
                        </div>
                    </div>
                }
            })
        }}
    }
}
