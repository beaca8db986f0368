use routemark::Reply;
use routemark::axum::http::{HeaderMap, HeaderValue};
use serde::{Deserialize, Serialize};

#[derive(Debug, Default, Deserialize)]
pub struct HelloRequest {
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Serialize)]
pub struct HelloResponse {
    pub msg: String,
}

impl Reply for HelloResponse {
    fn headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert("aaa", HeaderValue::from_static("bbb"));
        headers
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct PetQuery {
    #[serde(default)]
    pub species: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Pet {
    pub name: String,
    pub species: String,
}

impl Reply for Pet {}
