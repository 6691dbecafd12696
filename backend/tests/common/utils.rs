use axum::response::Response;
use http_body_util::BodyExt;

/// Parse response body to JSON
pub async fn parse_response_body(response: Response) -> serde_json::Value {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&body).unwrap()
}

/// Query parameters of a signed URL
pub fn query_pairs(signed_url: &str) -> Vec<(String, String)> {
    url::Url::parse(signed_url)
        .unwrap()
        .query_pairs()
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect()
}

/// Value of a single query parameter of a signed URL
pub fn query_param(signed_url: &str, name: &str) -> Option<String> {
    query_pairs(signed_url)
        .into_iter()
        .find(|(k, _)| k == name)
        .map(|(_, v)| v)
}
