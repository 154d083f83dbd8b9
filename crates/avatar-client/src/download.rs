//! Triggering a browser download for in-memory bytes.

use js_sys::{Array, Uint8Array};
use wasm_bindgen::JsCast;
use web_sys::{Blob, BlobPropertyBag, HtmlAnchorElement, Url};

use crate::error::ClientError;

pub fn download_bytes(bytes: &[u8], filename: &str, mime: &str) -> Result<(), ClientError> {
    let array = Uint8Array::from(bytes);
    let parts = Array::of1(&array);

    let options = BlobPropertyBag::new();
    options.set_type(mime);
    let blob = Blob::new_with_u8_array_sequence_and_options(&parts, &options)?;
    let url = Url::create_object_url_with_blob(&blob)?;

    let anchor = gloo::utils::document()
        .create_element("a")?
        .dyn_into::<HtmlAnchorElement>()
        .map_err(|_| ClientError::MissingElement("anchor"))?;
    anchor.set_href(&url);
    anchor.set_download(filename);
    anchor.click();

    // Revoke after the click has been dispatched
    gloo::timers::callback::Timeout::new(0, move || {
        if let Err(e) = Url::revoke_object_url(&url) {
            tracing::debug!("revoke_object_url failed: {:?}", e);
        }
    })
    .forget();

    Ok(())
}
