use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use mock_server::{app, SearchPage, UpstreamError};
use tower::ServiceExt;

const KEY: &str = "test-key";

async fn body_json<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn body_bytes(response: axum::response::Response) -> bytes::Bytes {
    response.into_body().collect().await.unwrap().to_bytes()
}

fn get(uri: &str) -> Request<String> {
    Request::builder().uri(uri).body(String::new()).unwrap()
}

// --- auth ---

#[tokio::test]
async fn missing_api_key_returns_401() {
    let resp = app(KEY)
        .oneshot(get("/3/search/movie?query=matrix"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let err: UpstreamError = body_json(resp).await;
    assert_eq!(err.status_code, 7);
    assert!(!err.success);
}

#[tokio::test]
async fn wrong_api_key_returns_401() {
    let resp = app(KEY)
        .oneshot(get("/3/search/movie?api_key=nope&query=matrix"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

// --- search ---

#[tokio::test]
async fn search_matches_titles_case_insensitively() {
    let resp = app(KEY)
        .oneshot(get(
            "/3/search/movie?api_key=test-key&adult=false&language=pt-BR&query=MATRIX",
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let page: SearchPage = body_json(resp).await;
    let ids: Vec<i64> = page.results.iter().map(|m| m.id).collect();
    assert_eq!(ids, vec![603, 604, 605]);
    assert_eq!(page.total_results, 3);
    assert_eq!(page.page, 1);
}

#[tokio::test]
async fn search_decodes_plus_as_space() {
    let resp = app(KEY)
        .oneshot(get("/3/search/movie?api_key=test-key&query=matrix+reloaded"))
        .await
        .unwrap();

    let page: SearchPage = body_json(resp).await;
    assert_eq!(page.results.len(), 1);
    assert_eq!(page.results[0].title, "Matrix Reloaded");
}

#[tokio::test]
async fn adult_titles_need_adult_flag() {
    let resp = app(KEY)
        .oneshot(get("/3/search/movie?api_key=test-key&adult=true&query=parody"))
        .await
        .unwrap();
    let page: SearchPage = body_json(resp).await;
    assert_eq!(page.results.len(), 1);
    assert!(page.results[0].adult);

    let resp = app(KEY)
        .oneshot(get("/3/search/movie?api_key=test-key&adult=false&query=parody"))
        .await
        .unwrap();
    let page: SearchPage = body_json(resp).await;
    assert!(page.results.is_empty());
}

#[tokio::test]
async fn empty_query_returns_no_results() {
    let resp = app(KEY)
        .oneshot(get("/3/search/movie?api_key=test-key&query="))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let page: SearchPage = body_json(resp).await;
    assert!(page.results.is_empty());
    assert_eq!(page.total_pages, 0);
}

#[tokio::test]
async fn null_image_paths_are_serialized_as_null() {
    let resp = app(KEY)
        .oneshot(get("/3/search/movie?api_key=test-key&query=revolutions"))
        .await
        .unwrap();

    let raw = body_bytes(resp).await;
    let value: serde_json::Value = serde_json::from_slice(&raw).unwrap();
    let first = &value["results"][0];
    assert!(first["poster_path"].is_null());
    assert!(first["backdrop_path"].is_null());
    assert_eq!(first["overview"], "");
}

#[tokio::test]
async fn malformed_adult_flag_returns_400() {
    let resp = app(KEY)
        .oneshot(get("/3/search/movie?api_key=test-key&adult=maybe&query=x"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn unknown_route_returns_404() {
    let resp = app(KEY).oneshot(get("/3/movie/603")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}
