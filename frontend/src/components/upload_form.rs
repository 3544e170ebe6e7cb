//! IFC upload form controller.
//!
//! Takes over every upload form on the page: validates the form's own file
//! input on `change`, inserts a progress bar right after it, and replaces
//! the synchronous form submission with an `XMLHttpRequest` upload. The
//! form's submit button is driven from the same [`UploadUiState`] the
//! progress bar renders from.

use leptos::*;
use wasm_bindgen::convert::FromWasmAbi;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::{
    Element, Event, EventTarget, HtmlButtonElement, HtmlElement, HtmlFormElement, HtmlInputElement, SubmitEvent,
};

use super::ProgressBar;
use crate::config::{
    named_file_input_selector, UploadConfig, CONFIG_ATTRIBUTE, FILE_INPUT_SELECTOR, MOUNTED_ATTRIBUTE,
    PROGRESS_ATTRIBUTE, SUBMIT_SELECTOR, UPLOAD_FORM_SELECTOR,
};
use crate::services::{alert, navigate, review_selection, send_form, SelectionVerdict, UploadRequest};
use crate::types::MountError;
use crate::{Locale, Messages, SelectedFile, UploadError, UploadUiState};

/// Spinner already present in a host button (Bootstrap markup).
const SPINNER_SELECTOR: &str = ".spinner-border";

/// Attach a controller to every upload form in the document.
///
/// Forms already carrying the mounted marker are skipped, so calling this
/// twice is harmless. Returns the number of forms mounted.
pub fn mount_upload_forms() -> usize {
    let forms = match gloo_utils::document().query_selector_all(UPLOAD_FORM_SELECTOR) {
        Ok(forms) => forms,
        Err(e) => {
            log::error!("Failed to query upload forms: {:?}", e);
            return 0;
        }
    };

    let mut mounted = 0;
    for i in 0..forms.length() {
        let Some(form) = forms.get(i).and_then(|node| node.dyn_into::<HtmlFormElement>().ok()) else {
            continue;
        };
        if form.has_attribute(MOUNTED_ATTRIBUTE) {
            continue;
        }
        match mount_upload_form(form) {
            Ok(()) => mounted += 1,
            Err(e) => log::warn!("⚠️  Upload form skipped: {}", e),
        }
    }

    log::info!("🧩 {} upload form(s) ready", mounted);
    mounted
}

fn mount_upload_form(form: HtmlFormElement) -> Result<(), MountError> {
    let config = UploadConfig::from_attribute(form.get_attribute(CONFIG_ATTRIBUTE).as_deref());
    let messages = Messages::new(config.locale.unwrap_or_else(Locale::from_document));

    let input = find_file_input(&form, &config.field_name)?;
    let (submit, idle_label) = match form.query_selector(SUBMIT_SELECTOR).map_err(dom_error)? {
        Some(element) => {
            let (control, label) = SubmitControl::prepare(element, messages.idle_label)?;
            (Some(control), label)
        }
        None => {
            log::warn!("Upload form has no submit control");
            (None, messages.idle_label.to_string())
        }
    };
    let progress_host = progress_host(&form, &input)?;

    form.set_attribute(MOUNTED_ATTRIBUTE, "").map_err(dom_error)?;
    mount_to(progress_host, move || {
        view! {
            <UploadForm
                form=form
                input=input
                submit=submit
                config=config
                messages=messages
                idle_label=idle_label
            />
        }
    });
    Ok(())
}

/// The file input named after the configured field, else the first one.
fn find_file_input(form: &HtmlFormElement, field_name: &str) -> Result<HtmlInputElement, MountError> {
    let element = match form.query_selector(&named_file_input_selector(field_name)).map_err(dom_error)? {
        Some(element) => element,
        None => form
            .query_selector(FILE_INPUT_SELECTOR)
            .map_err(dom_error)?
            .ok_or(MountError::MissingFileInput)?,
    };
    element.dyn_into::<HtmlInputElement>().map_err(|_| MountError::MissingFileInput)
}

/// Container for the progress bar: the page's own `[data-ifc-upload-progress]`
/// element if there is one, else a new `div` right after the file input.
fn progress_host(form: &HtmlFormElement, input: &HtmlInputElement) -> Result<HtmlElement, MountError> {
    let selector = format!("[{}]", PROGRESS_ATTRIBUTE);
    let container = match form.query_selector(&selector).map_err(dom_error)? {
        Some(existing) => {
            existing.set_inner_html("");
            existing
        }
        None => {
            let container = gloo_utils::document().create_element("div").map_err(dom_error)?;
            container.set_attribute(PROGRESS_ATTRIBUTE, "").map_err(dom_error)?;
            let parent = input.parent_node().ok_or(MountError::DetachedInput)?;
            parent
                .insert_before(&container, input.next_sibling().as_ref())
                .map_err(dom_error)?;
            container
        }
    };
    container
        .dyn_into::<HtmlElement>()
        .map_err(|_| MountError::Dom("progress container is not an HTML element".to_string()))
}

/// The host form's submit control, as the controller drives it.
#[derive(Clone)]
pub enum SubmitControl {
    /// `<button>`: a spinner element followed by a label element.
    Button {
        button: HtmlButtonElement,
        spinner: Element,
        label: Element,
    },
    /// `<input type=submit>`: only the value can change.
    Input(HtmlInputElement),
}

impl SubmitControl {
    /// Take over `element` and return it with its idle label.
    ///
    /// A button keeps (or gets) a `.spinner-border` child; its text moves
    /// into a label `span` so it can be swapped without touching the spinner.
    fn prepare(element: Element, fallback_label: &str) -> Result<(Self, String), MountError> {
        let element = match element.dyn_into::<HtmlInputElement>() {
            Ok(input) => {
                let label = idle_button_label(&input.value(), "", fallback_label);
                return Ok((SubmitControl::Input(input), label));
            }
            Err(element) => element,
        };
        let button = element
            .dyn_into::<HtmlButtonElement>()
            .map_err(|_| MountError::Dom("unsupported submit control".to_string()))?;

        let document = gloo_utils::document();
        let spinner = match button.query_selector(SPINNER_SELECTOR).map_err(dom_error)? {
            Some(spinner) => spinner,
            None => {
                let spinner = document.create_element("span").map_err(dom_error)?;
                spinner.set_class_name("spinner-border spinner-border-sm d-none");
                spinner.set_attribute("role", "status").map_err(dom_error)?;
                spinner.set_attribute("aria-hidden", "true").map_err(dom_error)?;
                spinner
            }
        };

        let idle_label = idle_button_label(
            &button.text_content().unwrap_or_default(),
            &spinner.text_content().unwrap_or_default(),
            fallback_label,
        );

        let label = document.create_element("span").map_err(dom_error)?;
        button.set_text_content(None);
        button.append_child(&spinner).map_err(dom_error)?;
        button.append_child(&label).map_err(dom_error)?;

        Ok((SubmitControl::Button { button, spinner, label }, idle_label))
    }

    /// Project `state` onto the control.
    fn render(&self, state: &UploadUiState) {
        match self {
            SubmitControl::Button { button, spinner, label } => {
                button.set_disabled(state.disabled);
                if let Err(e) = spinner.class_list().toggle_with_force("d-none", !state.spinner_visible) {
                    log::warn!("Failed to toggle spinner: {:?}", e);
                }
                label.set_text_content(Some(&state.button_label));
            }
            SubmitControl::Input(input) => {
                input.set_disabled(state.disabled);
                input.set_value(state.button_label.trim());
            }
        }
    }
}

/// Controller of one upload form.
///
/// Mounted into the progress container; the file input, the submit
/// control and every other field belong to the host page.
#[component]
pub fn UploadForm(
    form: HtmlFormElement,
    input: HtmlInputElement,
    submit: Option<SubmitControl>,
    config: UploadConfig,
    messages: Messages,
    idle_label: String,
) -> impl IntoView {
    let state = create_rw_signal(UploadUiState::new(idle_label, messages.busy_label));
    let upload_failed = messages.upload_failed;

    if let Some(submit) = submit {
        create_effect(move |_| state.with(|s| submit.render(s)));
    }

    // Change handler: keep only files that pass validation
    let change_input = input.clone();
    add_listener(&input, "change", move |_: Event| {
        let file = change_input
            .files()
            .and_then(|files| files.get(0))
            .map(|file| SelectedFile::from_file(&file));

        let verdict = review_selection(file, &config);
        match &verdict {
            SelectionVerdict::Empty => log::debug!("File selection cleared"),
            SelectionVerdict::Accepted(file) => log::info!("📄 Selected {}", file),
            SelectionVerdict::Rejected(e) => {
                log::warn!("⚠️  Rejected selection: {}", e);
                alert(&messages.selection_error(e));
            }
        }
        if verdict.clears_input() {
            change_input.set_value("");
        }
    });

    let submit_form = form.clone();
    add_listener(&form, "submit", move |ev: SubmitEvent| {
        ev.prevent_default();
        submit_upload(&submit_form, state, upload_failed);
    });

    view! { <ProgressBar state=state/> }
}

/// Register `handler` for `event` on `target` for the lifetime of the page.
fn add_listener<E>(target: &EventTarget, event: &str, handler: impl FnMut(E) + 'static)
where
    E: FromWasmAbi + 'static,
{
    let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(E)>);
    if let Err(e) = target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref()) {
        log::error!("Failed to attach {} handler: {:?}", event, e);
    }
    closure.forget();
}

/// Start an upload of `form`, unless one is already in flight.
fn submit_upload(form: &HtmlFormElement, state: RwSignal<UploadUiState>, failure_message: &'static str) {
    if !state.try_update(|s| s.begin_submit()).unwrap_or(false) {
        log::debug!("Upload already in progress, submit ignored");
        return;
    }

    let request = match UploadRequest::from_form(form) {
        Ok(request) => request,
        Err(e) => {
            fail_upload(state, failure_message, &e);
            return;
        }
    };

    spawn_local(async move {
        let result = send_form(request, move |sent, total| {
            state.update(|s| s.record_progress(sent, total));
        })
        .await;

        let outcome = state
            .try_update(|s| s.finish(result))
            .unwrap_or(Err(UploadError::Transport));

        match outcome.and_then(|location| navigate(&location)) {
            Ok(()) => log::info!("✅ Upload accepted"),
            Err(e) => fail_upload(state, failure_message, &e),
        }
    });
}

fn fail_upload(state: RwSignal<UploadUiState>, message: &str, error: &UploadError) {
    log::error!("❌ Upload failed: {}", error);
    alert(message);
    state.update(|s| s.fail());
}

/// Idle label of a host button: its text without the spinner's, or
/// `fallback` when nothing is left.
fn idle_button_label(button_text: &str, spinner_text: &str, fallback: &str) -> String {
    let text = if spinner_text.is_empty() {
        button_text.to_string()
    } else {
        button_text.replacen(spinner_text, "", 1)
    };
    match text.trim() {
        "" => fallback.to_string(),
        label => label.to_string(),
    }
}

fn dom_error(e: JsValue) -> MountError {
    MountError::Dom(format!("{:?}", e))
}
