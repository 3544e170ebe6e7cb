//! HTTP upload of a form to the IFC converter backend.
//!
//! `fetch` cannot report upload progress, so this goes through
//! `XMLHttpRequest` directly. The request callbacks are bridged into a
//! future with a oneshot channel, which lets the component drive the
//! upload from `spawn_local` like any other async call.

use std::cell::RefCell;
use std::rc::Rc;

use futures::channel::oneshot;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Event, FormData, HtmlFormElement, ProgressEvent, XmlHttpRequest, XmlHttpRequestUpload};

use crate::config::DEFAULT_METHOD;
use crate::types::{UploadError, UploadResult};

/// A multipart upload ready to be sent.
pub struct UploadRequest {
    pub action: String,
    pub method: String,
    pub body: FormData,
}

impl UploadRequest {
    /// Package every field of `form`, file included, using the form's own
    /// action and method.
    pub fn from_form(form: &HtmlFormElement) -> UploadResult<Self> {
        let body = FormData::new_with_form(form).map_err(setup_error)?;

        Ok(Self {
            action: form.action(),
            method: request_method(form.get_attribute("method").as_deref()),
            body,
        })
    }
}

/// HTTP method for a form's raw `method` attribute.
///
/// `HTMLFormElement.method` reports `get` for a missing attribute, so the
/// attribute itself is read: absent or blank means POST.
pub fn request_method(attribute: Option<&str>) -> String {
    match attribute.map(str::trim) {
        Some(method) if !method.is_empty() => method.to_uppercase(),
        _ => DEFAULT_METHOD.to_string(),
    }
}

/// How the request ended, before interpretation.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Completion {
    Loaded {
        status: u16,
        response_url: String,
        body: String,
    },
    Failed,
}

/// Send `request` and wait for the server's answer.
///
/// `on_progress(loaded, total)` is called for every upload progress event
/// whose total is known. On success returns the location to navigate to.
pub async fn send_form<F>(request: UploadRequest, mut on_progress: F) -> UploadResult<String>
where
    F: FnMut(f64, f64) + 'static,
{
    let xhr = XmlHttpRequest::new().map_err(setup_error)?;
    xhr.open_with_async(&request.method, &request.action, true)
        .map_err(setup_error)?;
    let upload = xhr.upload().map_err(setup_error)?;

    let (tx, rx) = oneshot::channel::<Completion>();
    let tx = Rc::new(RefCell::new(Some(tx)));

    let onprogress = Closure::wrap(Box::new(move |event: ProgressEvent| {
        if event.length_computable() {
            on_progress(event.loaded(), event.total());
        }
    }) as Box<dyn FnMut(ProgressEvent)>);
    upload.set_onprogress(Some(onprogress.as_ref().unchecked_ref()));

    let load_tx = Rc::clone(&tx);
    let load_xhr = xhr.clone();
    let onload = Closure::wrap(Box::new(move |_: Event| {
        let completion = Completion::Loaded {
            status: load_xhr.status().unwrap_or(0),
            response_url: load_xhr.response_url(),
            body: load_xhr.response_text().ok().flatten().unwrap_or_default(),
        };
        if let Some(tx) = load_tx.borrow_mut().take() {
            let _ = tx.send(completion);
        }
    }) as Box<dyn FnMut(Event)>);
    xhr.set_onload(Some(onload.as_ref().unchecked_ref()));

    let fail_tx = Rc::clone(&tx);
    let onfailure = Closure::wrap(Box::new(move |_: Event| {
        if let Some(tx) = fail_tx.borrow_mut().take() {
            let _ = tx.send(Completion::Failed);
        }
    }) as Box<dyn FnMut(Event)>);
    xhr.set_onerror(Some(onfailure.as_ref().unchecked_ref()));
    xhr.set_onabort(Some(onfailure.as_ref().unchecked_ref()));

    log::info!("📤 {} {}", request.method, request.action);
    if let Err(e) = xhr.send_with_opt_form_data(Some(&request.body)) {
        detach_handlers(&xhr, &upload);
        return Err(setup_error(e));
    }

    // A dropped sender means no handler will ever fire
    let completion = rx.await.unwrap_or(Completion::Failed);
    detach_handlers(&xhr, &upload);

    match completion {
        Completion::Loaded {
            status,
            response_url,
            body,
        } => resolve_location(status, &response_url, &body),
        Completion::Failed => Err(UploadError::Transport),
    }
}

/// Decide where to go after the server answered.
///
/// 200 and 302 are success. The final response URL wins (the browser has
/// already followed any redirect); otherwise the body is taken as the
/// location.
pub fn resolve_location(status: u16, response_url: &str, body: &str) -> UploadResult<String> {
    match status {
        200 | 302 => {}
        0 => return Err(UploadError::Transport),
        status => return Err(UploadError::Rejected { status }),
    }

    let response_url = response_url.trim();
    if !response_url.is_empty() {
        return Ok(response_url.to_string());
    }

    let body = body.trim();
    if !body.is_empty() {
        return Ok(body.to_string());
    }

    Err(UploadError::MissingLocation)
}

/// Unregister every callback before the closures backing them are dropped.
fn detach_handlers(xhr: &XmlHttpRequest, upload: &XmlHttpRequestUpload) {
    upload.set_onprogress(None);
    xhr.set_onload(None);
    xhr.set_onerror(None);
    xhr.set_onabort(None);
}

fn setup_error(e: JsValue) -> UploadError {
    UploadError::Setup(format!("{:?}", e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_redirected_upload_goes_to_final_url() {
        let location = resolve_location(200, "https://app.example/preview/7", "<html>...</html>");
        assert_eq!(location, Ok("https://app.example/preview/7".to_string()));
    }

    #[test]
    fn test_body_used_when_no_response_url() {
        assert_eq!(resolve_location(200, "", " /preview/7\n"), Ok("/preview/7".to_string()));
        assert_eq!(resolve_location(302, "", "/preview/8"), Ok("/preview/8".to_string()));
    }

    #[test]
    fn test_success_without_location() {
        assert_eq!(resolve_location(200, "", "  "), Err(UploadError::MissingLocation));
    }

    #[test]
    fn test_other_statuses_are_rejected() {
        for status in [201, 204, 301, 400, 413, 500, 503] {
            assert_eq!(
                resolve_location(status, "https://app.example/upload", "/upload"),
                Err(UploadError::Rejected { status })
            );
        }
    }

    #[test]
    fn test_missing_method_defaults_to_post() {
        assert_eq!(request_method(None), "POST");
        assert_eq!(request_method(Some("")), "POST");
        assert_eq!(request_method(Some("  ")), "POST");
        assert_eq!(request_method(Some("post")), "POST");
        assert_eq!(request_method(Some("Put")), "PUT");
    }

    #[test]
    fn test_status_zero_is_transport_failure() {
        assert_eq!(resolve_location(0, "", ""), Err(UploadError::Transport));
    }
}
