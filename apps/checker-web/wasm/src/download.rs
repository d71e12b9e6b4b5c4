//! Browser download of generated reports
//!
//! The object URL backing a download is owned by [`ObjectUrl`] and revoked
//! when it drops, so every exit path releases it.

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Blob, BlobPropertyBag, HtmlElement, Url};

pub const PDF_MIME: &str = "application/pdf";

/// A `blob:` URL revoked on drop
pub struct ObjectUrl {
    url: String,
}

impl ObjectUrl {
    pub fn from_bytes(bytes: &[u8], mime: &str) -> Result<Self, JsValue> {
        let array = js_sys::Uint8Array::from(bytes);
        let parts = js_sys::Array::new();
        parts.push(&array);

        let options = BlobPropertyBag::new();
        options.set_type(mime);
        let blob = Blob::new_with_u8_array_sequence_and_options(&parts, &options)?;

        let url = Url::create_object_url_with_blob(&blob)?;
        Ok(Self { url })
    }

    pub fn as_str(&self) -> &str {
        &self.url
    }
}

impl Drop for ObjectUrl {
    fn drop(&mut self) {
        if Url::revoke_object_url(&self.url).is_err() {
            web_sys::console::warn_1(&format!("Failed to revoke {}", self.url).into());
        }
    }
}

/// Save `bytes` as `filename` through a temporary anchor element
pub fn trigger_download(bytes: &[u8], filename: &str) -> Result<(), JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("No window available"))?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("No document available"))?;
    let body = document
        .body()
        .ok_or_else(|| JsValue::from_str("Document has no body"))?;

    let url = ObjectUrl::from_bytes(bytes, PDF_MIME)?;

    let anchor = document
        .create_element("a")?
        .dyn_into::<HtmlElement>()
        .map_err(|_| JsValue::from_str("Failed to create download link"))?;
    anchor.set_attribute("href", url.as_str())?;
    anchor.set_attribute("download", filename)?;
    anchor.style().set_property("display", "none")?;

    body.append_child(&anchor)?;
    anchor.click();
    anchor.remove();

    Ok(())
}

#[cfg(all(test, target_arch = "wasm32"))]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_object_url_is_blob_url() {
        let url = ObjectUrl::from_bytes(b"%PDF-1.5", PDF_MIME).unwrap();
        assert!(url.as_str().starts_with("blob:"));
    }

    #[wasm_bindgen_test]
    fn test_download_succeeds_in_browser() {
        assert!(trigger_download(b"%PDF-1.5", "report.pdf").is_ok());
    }
}
