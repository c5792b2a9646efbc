use crate::model::MutationKind;

use super::*;

#[component]
pub(super) fn FileViewer(runtime: DriveRuntimeContext) -> impl IntoView {
    let open_file = create_memo(move |_| runtime.state.with(|state| state.file_system.open_file.clone()));
    let draft = create_rw_signal(String::new());

    create_effect(move |previous: Option<Option<String>>| {
        let file = open_file.get();
        let id = file.as_ref().map(|file| file.id.clone());
        // Reset the draft only when a different file is opened.
        if previous.as_ref() != Some(&id) {
            draft.set(file.and_then(|file| file.content).unwrap_or_default());
        }
        id
    });

    let saving = move || {
        runtime
            .dashboard
            .with(|dashboard| dashboard.is_busy(MutationKind::SaveContent))
    };
    let close = move || runtime.dispatch_action(DriveAction::SetOpenFile { file: None });

    view! {
        {move || {
            open_file.get().map(|file| {
                let glyph = node_glyph(file.kind);
                let subtitle = node_subtitle(&file);
                let body = match file.kind {
                    NodeKind::Text => {
                        view! {
                            <textarea
                                class="drive-viewer-editor"
                                placeholder="Initialize data stream..."
                                spellcheck="false"
                                prop:value=move || draft.get()
                                on:input=move |ev| draft.set(event_target_value(&ev))
                            ></textarea>
                            <div class="drive-viewer-actions">
                                <button
                                    class="drive-button"
                                    type="button"
                                    disabled=saving
                                    on:click=move |_| {
                                        runtime.dispatch_action(DriveAction::SaveFileContent {
                                            content: draft.get_untracked(),
                                        })
                                    }
                                >
                                    {move || if saving() { "Syncing..." } else { "Apply Changes" }}
                                </button>
                            </div>
                        }
                        .into_view()
                    }
                    kind if kind.has_media_preview() => media_preview(&file).into_view(),
                    _ => file_metadata(&file).into_view(),
                };

                view! {
                    <div class="drive-viewer-backdrop" on:click=move |_| close()>
                        <section
                            class="drive-viewer"
                            role="dialog"
                            aria-modal="true"
                            aria-labelledby="drive-viewer-title"
                            on:click=|ev| ev.stop_propagation()
                            on:keydown=move |ev| {
                                if super::a11y::is_dismiss_key(&ev) {
                                    close();
                                }
                            }
                        >
                            <header class="drive-viewer-header">
                                <span class="drive-viewer-icon" aria-hidden="true">{glyph}</span>
                                <div>
                                    <h3 id="drive-viewer-title">{file.name.clone()}</h3>
                                    <p class="drive-viewer-meta">{subtitle}</p>
                                </div>
                                <button
                                    class="drive-viewer-close"
                                    type="button"
                                    aria-label="Close"
                                    on:click=move |_| close()
                                >
                                    "✕"
                                </button>
                            </header>
                            <div class="drive-viewer-body">{body}</div>
                        </section>
                    </div>
                }
            })
        }}
    }
}

fn media_preview(file: &FileNode) -> impl IntoView {
    let Some(url) = file.url.clone() else {
        return file_metadata(file).into_view();
    };
    let name = file.name.clone();
    match file.kind {
        NodeKind::Image => view! { <img class="drive-viewer-media" src=url alt=name /> }.into_view(),
        NodeKind::Audio => {
            view! { <audio class="drive-viewer-media" src=url controls=true></audio> }.into_view()
        }
        _ => view! { <video class="drive-viewer-media" src=url controls=true></video> }.into_view(),
    }
}

fn file_metadata(file: &FileNode) -> impl IntoView {
    let mime = file.mime_type.clone().unwrap_or_else(|| "unknown".to_string());
    let size = file.size.map(format_size).unwrap_or_else(|| "-".to_string());
    let url = file.url.clone();

    view! {
        <dl class="drive-viewer-details">
            <dt>"Type"</dt>
            <dd>{mime}</dd>
            <dt>"Size"</dt>
            <dd>{size}</dd>
            <dt>"Modified"</dt>
            <dd>{file.updated_at.clone()}</dd>
        </dl>
        {url.map(|url| {
            view! {
                <a class="drive-button" href=url target="_blank" rel="noopener noreferrer">
                    "Open original"
                </a>
            }
        })}
    }
}
