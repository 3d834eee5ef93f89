//! Opening links outside the app: new browser tabs and file downloads.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::JsCast;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkTarget {
    NewTab,
    /// Save under the given file name where the platform supports it.
    Download(String),
}

/// Open a URL in a new tab, or trigger a download via a temporary anchor.
#[cfg(target_arch = "wasm32")]
pub fn open_link(url: &str, target: &LinkTarget) -> Result<(), String> {
    let window = web_sys::window().ok_or("Window object not available")?;
    match target {
        LinkTarget::NewTab => {
            window
                .open_with_url_and_target(url, "_blank")
                .map_err(|e| format!("window.open failed: {e:?}"))?;
        }
        LinkTarget::Download(file_name) => {
            let document = window.document().ok_or("Document not available")?;
            let anchor = document
                .create_element("a")
                .map_err(|e| format!("Failed to create anchor: {e:?}"))?
                .dyn_into::<web_sys::HtmlAnchorElement>()
                .map_err(|_| "Created element is not an anchor".to_string())?;
            anchor.set_href(url);
            anchor.set_download(file_name);
            anchor.click();
        }
    }
    Ok(())
}

/// Native builds hand every link to the system browser.
#[cfg(not(target_arch = "wasm32"))]
pub fn open_link(url: &str, _target: &LinkTarget) -> Result<(), String> {
    webbrowser::open(url).map_err(|e| format!("Failed to open {url}: {e}"))
}
