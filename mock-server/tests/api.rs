use axum::body::Bytes;
use axum::http::{self, header, Request, StatusCode};
use axum::response::IntoResponse;
use github_mock::endpoints::{
    GET_ORGS_REPOS_BY_ORG, GET_REPOS_RELEASES_BY_OWNER_BY_REPO, GET_USERS_BY_USERNAME,
    POST_REPOS_RELEASES_BY_OWNER_BY_REPO,
};
use github_mock::{
    app, build_router, with_request_match, with_request_match_handler, with_request_match_pages,
    write_error, MockBackendOption, MockRequest, PathParams,
};
use http_body_util::BodyExt;
use tower::ServiceExt;

async fn body_bytes(response: axum::response::Response) -> Bytes {
    response.into_body().collect().await.unwrap().to_bytes()
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}

fn get(uri: &str) -> Request<String> {
    Request::builder().uri(uri).body(String::new()).unwrap()
}

fn mock_app(options: Vec<MockBackendOption>) -> axum::Router {
    app(build_router(options).unwrap())
}

// --- routing ---

#[tokio::test]
async fn unmatched_request_gets_not_found_envelope() {
    let app = mock_app(vec![with_request_match(GET_USERS_BY_USERNAME, [r#"{"login":"x"}"#])]);
    let resp = app.oneshot(get("/users/x/orgs")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert_eq!(resp.headers()[header::CONTENT_TYPE], "application/json");
    let body = body_json(resp).await;
    assert_eq!(body["message"], "mock response not found for /users/x/orgs");
}

#[tokio::test]
async fn method_must_match() {
    let app = mock_app(vec![with_request_match(GET_USERS_BY_USERNAME, [r#"{"login":"x"}"#])]);
    let resp = app
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri("/users/x")
                .body(String::new())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn query_string_does_not_affect_matching() {
    let app = mock_app(vec![with_request_match(GET_USERS_BY_USERNAME, [r#"{"login":"x"}"#])]);
    let resp = app.oneshot(get("/users/x?per_page=100")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_json(resp).await["login"], "x");
}

// --- sequenced ---

#[tokio::test]
async fn sequence_is_served_in_order_across_requests() {
    use tower::Service;

    let mut app = mock_app(vec![with_request_match(
        GET_USERS_BY_USERNAME,
        [r#"{"login":"first"}"#, r#"{"login":"second"}"#],
    )])
    .into_service();

    for expected in ["first", "second"] {
        let resp = ServiceExt::ready(&mut app)
            .await
            .unwrap()
            .call(get("/users/anyone"))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(body_json(resp).await["login"], expected);
    }
}

#[tokio::test]
async fn empty_sequence_answers_empty_body() {
    use tower::Service;

    let mut app = mock_app(vec![with_request_match(
        GET_REPOS_RELEASES_BY_OWNER_BY_REPO,
        Vec::<Bytes>::new(),
    )])
    .into_service();

    for _ in 0..3 {
        let resp = ServiceExt::ready(&mut app)
            .await
            .unwrap()
            .call(get("/repos/o/r/releases"))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        assert!(body_bytes(resp).await.is_empty());
    }
}

// --- paginated ---

#[tokio::test]
async fn pages_carry_link_header() {
    let pages = [r#"["p1"]"#, r#"["p2"]"#, r#"["p3"]"#];

    let resp = mock_app(vec![with_request_match_pages(GET_ORGS_REPOS_BY_ORG, pages)])
        .oneshot(get("/orgs/acme/repos"))
        .await
        .unwrap();
    let link = resp.headers()[header::LINK].to_str().unwrap().to_string();
    assert!(link.contains(r#"<?page=1>; rel="first""#));
    assert!(link.contains(r#"<?page=3>; rel="last""#));
    assert!(link.contains(r#"<?page=2>; rel="next""#));
    assert!(!link.contains(r#"rel="prev""#));
    assert_eq!(body_json(resp).await, serde_json::json!(["p1"]));

    let resp = mock_app(vec![with_request_match_pages(GET_ORGS_REPOS_BY_ORG, pages)])
        .oneshot(get("/orgs/acme/repos?page=3"))
        .await
        .unwrap();
    let link = resp.headers()[header::LINK].to_str().unwrap().to_string();
    assert!(!link.contains(r#"rel="next""#));
    assert!(link.contains(r#"<?page=2>; rel="prev""#));
    assert_eq!(body_json(resp).await, serde_json::json!(["p3"]));
}

// --- custom handlers ---

#[tokio::test]
async fn custom_handler_sees_params_headers_and_body() {
    let app = mock_app(vec![with_request_match_handler(
        POST_REPOS_RELEASES_BY_OWNER_BY_REPO,
        |req: &MockRequest| {
            let params = req.extensions().get::<PathParams>().cloned().unwrap_or_default();
            let input: serde_json::Value = match serde_json::from_slice(req.body()) {
                Ok(input) => input,
                Err(_) => return write_error(StatusCode::UNPROCESSABLE_ENTITY, "Problems parsing JSON"),
            };
            let release = serde_json::json!({
                "tag_name": input["tag_name"],
                "name": format!("{}/{}", params.get("owner").unwrap_or("?"), params.get("repo").unwrap_or("?")),
                "draft": req.headers().contains_key("x-draft"),
            });
            (StatusCode::CREATED, axum::Json(release)).into_response()
        },
    )]);

    let resp = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/repos/acme/widgets/releases")
                .header(http::header::CONTENT_TYPE, "application/json")
                .header("x-draft", "1")
                .body(r#"{"tag_name":"v1.2.0"}"#.to_string())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);
    let release = body_json(resp).await;
    assert_eq!(release["tag_name"], "v1.2.0");
    assert_eq!(release["name"], "acme/widgets");
    assert_eq!(release["draft"], true);

    let resp = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/repos/acme/widgets/releases")
                .body("not json".to_string())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body_json(resp).await["message"], "Problems parsing JSON");
}
