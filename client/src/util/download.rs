//! CSV export download.

#[cfg(test)]
#[path = "download_test.rs"]
mod download_test;

use resources::ResourceKind;
use resources::table::{self, TableRow};
use resources::Record;

/// `trips.csv`, `carousels.csv`, ...
pub fn export_filename(kind: ResourceKind) -> String {
    format!("{}.csv", kind.slug())
}

/// CSV text for `rows` in the table's column order.
pub fn export_csv<R: TableRow>(kind: ResourceKind, rows: &[&R]) -> String {
    table::to_csv(&table::export_rows(kind.columns(), rows))
}

/// Offer `rows` as a CSV file download.
pub fn download_csv(kind: ResourceKind, rows: &[&Record]) {
    let csv = export_csv(kind, rows);
    #[cfg(feature = "hydrate")]
    {
        if let Err(err) = trigger_download(&export_filename(kind), &csv) {
            log::warn!("csv download failed: {err:?}");
        }
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = csv;
    }
}

#[cfg(feature = "hydrate")]
fn trigger_download(filename: &str, csv: &str) -> Result<(), wasm_bindgen::JsValue> {
    use wasm_bindgen::JsCast as _;

    let sequence = js_sys::Array::of1(&wasm_bindgen::JsValue::from_str(csv));
    let options = web_sys::BlobPropertyBag::new();
    options.set_type("text/csv;charset=utf-8");
    let blob = web_sys::Blob::new_with_str_sequence_and_options(&sequence, &options)?;
    let url = web_sys::Url::create_object_url_with_blob(&blob)?;

    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| wasm_bindgen::JsValue::from_str("no document"))?;
    let anchor: web_sys::HtmlAnchorElement = document.create_element("a")?.dyn_into()?;
    anchor.set_href(&url);
    anchor.set_download(filename);
    anchor.click();
    web_sys::Url::revoke_object_url(&url)
}
