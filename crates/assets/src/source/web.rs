use super::{FetchFuture, Source, failed};
use crate::config::LoaderConfig;
use crate::error::LoadError;
use futures::channel::oneshot;
use js_sys::Uint8Array;
use std::{cell::RefCell, rc::Rc};
use wasm_bindgen::{JsCast, JsValue, closure::Closure};
use web_sys::{ProgressEvent, XmlHttpRequest, XmlHttpRequestResponseType};

type Sender = Rc<RefCell<Option<oneshot::Sender<Result<Vec<u8>, LoadError>>>>>;
type Listener = Closure<dyn FnMut(ProgressEvent)>;

/// Fetches locators with `XmlHttpRequest`
#[derive(Clone, Default)]
pub struct XhrSource;

impl XhrSource {
    pub fn new(_config: &LoaderConfig) -> Result<Self, LoadError> {
        Ok(Self)
    }
}

impl Source for XhrSource {
    fn fetch(&self, locator: &str) -> FetchFuture {
        let (rx, listeners) = match request(locator) {
            Ok(req) => req,
            Err(err) => return failed(err),
        };

        let locator = locator.to_owned();
        Box::pin(async move {
            let res = rx
                .await
                .unwrap_or_else(|_| Err(LoadError::fetch(&locator, "The request was dropped.")));

            // the callbacks must outlive the request
            drop(listeners);
            res
        })
    }
}

fn request(
    url: &str,
) -> Result<(oneshot::Receiver<Result<Vec<u8>, LoadError>>, [Listener; 2]), LoadError> {
    let xhr = XmlHttpRequest::new().map_err(|e| LoadError::fetch(url, js_err(&e)))?;
    xhr.open("GET", url)
        .map_err(|e| LoadError::fetch(url, js_err(&e)))?;
    xhr.set_response_type(XmlHttpRequestResponseType::Arraybuffer);

    let (tx, rx) = oneshot::channel();
    let tx: Sender = Rc::new(RefCell::new(Some(tx)));

    let onload = {
        let tx = tx.clone();
        let xhr = xhr.clone();
        let url = url.to_owned();
        Closure::<dyn FnMut(ProgressEvent)>::new(move |_: ProgressEvent| {
            send(&tx, read_response(&xhr, &url));
        })
    };

    let onerror = {
        let url = url.to_owned();
        Closure::<dyn FnMut(ProgressEvent)>::new(move |_: ProgressEvent| {
            send(&tx, Err(LoadError::fetch(&url, "network error")));
        })
    };

    xhr.set_onload(Some(onload.as_ref().unchecked_ref()));
    xhr.set_onerror(Some(onerror.as_ref().unchecked_ref()));
    xhr.send().map_err(|e| LoadError::fetch(url, js_err(&e)))?;

    Ok((rx, [onload, onerror]))
}

fn send(tx: &Sender, res: Result<Vec<u8>, LoadError>) {
    if let Some(tx) = tx.borrow_mut().take() {
        let _ = tx.send(res);
    }
}

fn read_response(xhr: &XmlHttpRequest, url: &str) -> Result<Vec<u8>, LoadError> {
    let status = xhr.status().map_err(|e| LoadError::fetch(url, js_err(&e)))?;
    if !(200..300).contains(&status) {
        return Err(LoadError::fetch(url, format!("status {status}")));
    }

    let buffer = xhr
        .response()
        .map_err(|e| LoadError::fetch(url, js_err(&e)))?;
    Ok(Uint8Array::new(&buffer).to_vec())
}

fn js_err(value: &JsValue) -> String {
    value.as_string().unwrap_or_else(|| format!("{value:?}"))
}
