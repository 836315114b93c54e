//! Multipart PDF upload with byte-level progress.
//!
//! `gloo-net` has no upload progress events, so this goes through
//! `XmlHttpRequest` directly. The returned [`UploadHandle`] owns the JS
//! callbacks; dropping it detaches them and aborts a request still in flight.

use common::api::{decode_response, ApiError};
use common::model::file::{transport_progress, FileRecord, UPLOAD_TIMEOUT_MS};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Event, File, FormData, ProgressEvent, XmlHttpRequest};
use yew::Callback;

const FILE_FIELD: &str = "file";

pub struct UploadHandle {
    xhr: XmlHttpRequest,
    _progress: Closure<dyn FnMut(ProgressEvent)>,
    _loaded: Closure<dyn FnMut(Event)>,
    _failed: Closure<dyn FnMut(Event)>,
    _timed_out: Closure<dyn FnMut(Event)>,
}

impl Drop for UploadHandle {
    fn drop(&mut self) {
        if let Ok(upload) = self.xhr.upload() {
            upload.set_onprogress(None);
        }
        self.xhr.set_onload(None);
        self.xhr.set_onerror(None);
        self.xhr.set_ontimeout(None);
        // No-op once the request has completed.
        self.xhr.abort().ok();
    }
}

fn js_error(value: JsValue) -> ApiError {
    ApiError::Transport(
        value
            .as_string()
            .unwrap_or_else(|| "could not start the upload".to_string()),
    )
}

/// Starts uploading `file` to `url` as the `file` field of a multipart form.
///
/// `on_progress` receives transport percentages; `on_done` fires exactly once
/// with the acknowledged record or the failure.
pub fn upload_file(
    url: &str,
    file: &File,
    on_progress: Callback<u8>,
    on_done: Callback<Result<FileRecord, ApiError>>,
) -> Result<UploadHandle, ApiError> {
    let xhr = XmlHttpRequest::new().map_err(js_error)?;
    xhr.open_with_async("POST", url, true).map_err(js_error)?;
    xhr.set_timeout(UPLOAD_TIMEOUT_MS);

    let form = FormData::new().map_err(js_error)?;
    form.append_with_blob_and_filename(FILE_FIELD, file, &file.name())
        .map_err(js_error)?;

    let progress = Closure::<dyn FnMut(ProgressEvent)>::new(move |event: ProgressEvent| {
        if event.length_computable() {
            if let Some(percent) = transport_progress(event.loaded(), event.total()) {
                on_progress.emit(percent);
            }
        }
    });
    xhr.upload()
        .map_err(js_error)?
        .set_onprogress(Some(progress.as_ref().unchecked_ref()));

    let loaded = {
        let xhr = xhr.clone();
        let on_done = on_done.clone();
        Closure::<dyn FnMut(Event)>::new(move |_: Event| {
            let status = xhr.status().unwrap_or(0);
            let body = xhr.response_text().ok().flatten().unwrap_or_default();
            on_done.emit(decode_response(status, &body, &["file", "data"]));
        })
    };
    xhr.set_onload(Some(loaded.as_ref().unchecked_ref()));

    let failed = {
        let on_done = on_done.clone();
        Closure::<dyn FnMut(Event)>::new(move |_: Event| {
            on_done.emit(Err(ApiError::Transport(
                "the upload was interrupted".to_string(),
            )));
        })
    };
    xhr.set_onerror(Some(failed.as_ref().unchecked_ref()));

    let timed_out = Closure::<dyn FnMut(Event)>::new(move |_: Event| {
        on_done.emit(Err(ApiError::Transport(format!(
            "the upload timed out after {} s",
            UPLOAD_TIMEOUT_MS / 1000
        ))));
    });
    xhr.set_ontimeout(Some(timed_out.as_ref().unchecked_ref()));

    xhr.send_with_opt_form_data(Some(&form)).map_err(js_error)?;

    Ok(UploadHandle {
        xhr,
        _progress: progress,
        _loaded: loaded,
        _failed: failed,
        _timed_out: timed_out,
    })
}
