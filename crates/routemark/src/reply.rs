//! Response values.

use http::HeaderMap;
use serde::Serialize;

/// A handler response, serialized as the JSON body.
///
/// Implementing types may add response headers by overriding
/// [`Reply::headers`]; the default adds none.
///
/// ```ignore
/// #[derive(Serialize)]
/// pub struct HelloResponse { pub msg: String }
///
/// impl routemark::Reply for HelloResponse {
///     fn headers(&self) -> HeaderMap {
///         let mut headers = HeaderMap::new();
///         headers.insert("x-greeting", HeaderValue::from_static("hi"));
///         headers
///     }
/// }
/// ```
pub trait Reply: Serialize + Send {
    fn headers(&self) -> HeaderMap {
        HeaderMap::new()
    }
}

impl Reply for serde_json::Value {}

impl Reply for () {}

impl<T: Reply> Reply for Vec<T> {}

impl<T: Reply> Reply for Option<T> {
    fn headers(&self) -> HeaderMap {
        self.as_ref().map(Reply::headers).unwrap_or_default()
    }
}

/// Object-safe view of a [`Reply`], used once the concrete type is erased.
pub trait ErasedReply: Send {
    fn to_json(&self) -> serde_json::Result<Vec<u8>>;

    fn headers(&self) -> HeaderMap;
}

impl<T: Reply> ErasedReply for T {
    fn to_json(&self) -> serde_json::Result<Vec<u8>> {
        serde_json::to_vec(self)
    }

    fn headers(&self) -> HeaderMap {
        Reply::headers(self)
    }
}
