//! Reading picked files into uploads.

#[cfg(test)]
#[path = "files_test.rs"]
mod files_test;

#[cfg(feature = "hydrate")]
use resources::Upload;

/// Files currently selected in a file input.
#[cfg(feature = "hydrate")]
pub async fn read_input(input: &web_sys::HtmlInputElement) -> Vec<Upload> {
    let Some(list) = input.files() else {
        return Vec::new();
    };
    let mut uploads = Vec::with_capacity(list.length() as usize);
    for index in 0..list.length() {
        let Some(file) = list.get(index) else {
            continue;
        };
        match wasm_bindgen_futures::JsFuture::from(file.array_buffer()).await {
            Ok(buffer) => uploads.push(Upload {
                file_name: file.name(),
                mime: mime_or_default(&file.type_()),
                bytes: js_sys::Uint8Array::new(&buffer).to_vec(),
            }),
            Err(err) => log::warn!("could not read {}: {err:?}", file.name()),
        }
    }
    uploads
}

/// Browsers report an empty type for unknown files.
pub fn mime_or_default(mime: &str) -> String {
    if mime.trim().is_empty() {
        "application/octet-stream".to_owned()
    } else {
        mime.to_owned()
    }
}
