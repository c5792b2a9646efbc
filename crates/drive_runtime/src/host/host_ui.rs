use std::time::Duration;

use leptos::set_timeout;
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::JsCast;

use crate::{config::TOAST_TIMEOUT_MS, reducer::DriveAction, runtime_context::DriveRuntimeContext};

pub(super) fn open_upload_picker() {
    #[cfg(target_arch = "wasm32")]
    {
        let Some(document) = web_sys::window().and_then(|window| window.document()) else {
            return;
        };
        let Some(element) = document.get_element_by_id(crate::components::UPLOAD_INPUT_ID) else {
            return;
        };
        if let Ok(input) = element.dyn_into::<web_sys::HtmlElement>() {
            input.click();
        }
    }
}

pub(super) fn schedule_toast_dismiss(runtime: DriveRuntimeContext, id: u64) {
    set_timeout(
        move || runtime.dispatch_action(DriveAction::DismissToast { id }),
        Duration::from_millis(TOAST_TIMEOUT_MS),
    );
}
