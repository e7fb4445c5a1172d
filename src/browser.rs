use anyhow::{anyhow, Result};
use serde::de::DeserializeOwned;
use std::future::Future;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;

#[rustfmt::skip]
use web_sys::{
    Document,
    Element,
    Event,
    HtmlElement,
    Response,
    Window,
};

// console.log on wasm, stdout everywhere else so native tests can log too
macro_rules! log {
    ($($t:tt)*) => {{
        #[cfg(target_arch = "wasm32")]
        web_sys::console::log_1(&format!($($t)*).into());
        #[cfg(not(target_arch = "wasm32"))]
        println!($($t)*);
    }};
}

macro_rules! error {
    ($($t:tt)*) => {{
        #[cfg(target_arch = "wasm32")]
        web_sys::console::error_1(&format!($($t)*).into());
        #[cfg(not(target_arch = "wasm32"))]
        eprintln!($($t)*);
    }};
}

pub type EventClosure = Closure<dyn FnMut(Event)>;

pub fn window() -> Result<Window> {
    web_sys::window().ok_or_else(|| anyhow!("Window not found"))
}

pub fn document() -> Result<Document> {
    window()?
        .document()
        .ok_or_else(|| anyhow!("No Document Found"))
}

/// Looks up `#id` and casts it to an `HtmlElement`, so callers get `style()`
/// and click listeners without repeating the cast.
pub fn html_element_by_id(id: &str) -> Result<HtmlElement> {
    document()?
        .get_element_by_id(id)
        .ok_or_else(|| anyhow!("No Element found with ID : '{}'", id))?
        .dyn_into::<HtmlElement>()
        .map_err(|element| anyhow!("Error converting {:#?} to HtmlElement", element))
}

pub fn create_element(tag: &str) -> Result<Element> {
    document()?
        .create_element(tag)
        .map_err(|err| anyhow!("Could not create <{}> element : {:#?}", tag, err))
}

pub fn create_event_closure(f: impl FnMut(Event) + 'static) -> EventClosure {
    Closure::wrap(Box::new(f) as Box<dyn FnMut(Event)>)
}

/// Attaches `f` as a click listener for the lifetime of the page.
pub fn on_click(target: &HtmlElement, f: impl FnMut(Event) + 'static) -> Result<()> {
    let closure = create_event_closure(f);
    target
        .add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())
        .map_err(|err| anyhow!("Could not attach click listener : {:#?}", err))?;
    // listeners live as long as the page, so the closure is never dropped
    closure.forget();
    Ok(())
}

/// Id of the element an event was dispatched to, if it has one.
pub fn event_target_id(event: &Event) -> Option<String> {
    event
        .target()
        .and_then(|target| target.dyn_into::<Element>().ok())
        .map(|element| element.id())
        .filter(|id| !id.is_empty())
}

pub fn spawn_local<F>(future: F)
where
    F: Future<Output = ()> + 'static,
{
    wasm_bindgen_futures::spawn_local(future);
}

pub async fn fetch_json<T>(url: &str) -> Result<T>
where
    T: DeserializeOwned,
{
    let resp_value = fetch_with_str(url).await?;
    let resp: Response = resp_value
        .dyn_into()
        .map_err(|element| anyhow!("error converting [{:#?}] to Response", element))?;
    if !resp.ok() {
        return Err(anyhow!(
            "request to {} failed : {} {}",
            url,
            resp.status(),
            resp.status_text()
        ));
    }
    let json = resp
        .json()
        .map_err(|err| anyhow!("Could not get JSON from response [{:#?}]", err))?;

    let json_value = JsFuture::from(json)
        .await
        .map_err(|err| anyhow!("error reading body of {} : {:#?}", url, err))?;

    serde_wasm_bindgen::from_value(json_value)
        .map_err(|err| anyhow!("error converting response from {} : {}", url, err))
}

async fn fetch_with_str(resource: &str) -> Result<JsValue> {
    let resp = window()?.fetch_with_str(resource);

    JsFuture::from(resp)
        .await
        .map_err(|err| anyhow!("error fetching {} : {:#?}", resource, err))
}
