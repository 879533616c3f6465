use gt_stack::errors::StackError;
use gt_stack::github::{CreatePullRequest, GitHubClient, MergeMethod, PullRequestClient};
use serde_json::json;

fn pull_request_json(number: u64, head: &str, base: &str, draft: bool) -> serde_json::Value {
    json!({
        "number": number,
        "title": format!("Change on {head}"),
        "html_url": format!("https://github.com/acme/widgets/pull/{number}"),
        "draft": draft,
        "state": "open",
        "head": { "ref": head, "sha": "abc123" },
        "base": { "ref": base, "sha": "def456" }
    })
}

/// Listing open pull requests
#[tokio::test]
async fn test_list_pull_requests() {
    let mut server = mockito::Server::new_async().await;

    let list_mock = server
        .mock("GET", "/repos/acme/widgets/pulls")
        .match_query(mockito::Matcher::AllOf(vec![
            mockito::Matcher::UrlEncoded("state".into(), "open".into()),
            mockito::Matcher::UrlEncoded("per_page".into(), "100".into()),
        ]))
        .match_header("authorization", "Bearer test-token")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!([
                pull_request_json(1, "feature-a", "main", false),
                pull_request_json(2, "feature-b", "feature-a", true)
            ])
            .to_string(),
        )
        .create_async()
        .await;

    let client = GitHubClient::new(&server.url(), "acme", "widgets", "test-token").unwrap();
    let prs = client.list_pull_requests().await.unwrap();

    list_mock.assert_async().await;
    assert_eq!(prs.len(), 2);
    assert_eq!(prs[0].head, "feature-a");
    assert_eq!(prs[1].base, "feature-a");
    assert!(prs[1].draft);
}

/// Open pull requests beyond the first page are fetched through the `Link` header
#[tokio::test]
async fn test_list_pull_requests_follows_pages() {
    let mut server = mockito::Server::new_async().await;
    let next = format!(
        "<{}/repos/acme/widgets/pulls?state=open&per_page=100&page=2>; rel=\"next\"",
        server.url()
    );

    let first_page: Vec<serde_json::Value> = (1..=100)
        .map(|n| pull_request_json(n, &format!("branch-{n}"), "main", false))
        .collect();
    let first_mock = server
        .mock("GET", "/repos/acme/widgets/pulls")
        .match_query(mockito::Matcher::UrlEncoded("page".into(), "1".into()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_header("link", &next)
        .with_body(serde_json::Value::Array(first_page).to_string())
        .create_async()
        .await;

    let second_mock = server
        .mock("GET", "/repos/acme/widgets/pulls")
        .match_query(mockito::Matcher::UrlEncoded("page".into(), "2".into()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(json!([pull_request_json(101, "feature-x", "main", false)]).to_string())
        .create_async()
        .await;

    let client = GitHubClient::new(&server.url(), "acme", "widgets", "test-token").unwrap();
    let prs = client.list_pull_requests().await.unwrap();

    first_mock.assert_async().await;
    second_mock.assert_async().await;
    assert_eq!(prs.len(), 101);
    assert!(prs.iter().any(|pr| pr.head == "feature-x"));
}

/// Creating a stacked pull request sends head, base and draft
#[tokio::test]
async fn test_create_pull_request() {
    let mut server = mockito::Server::new_async().await;

    let create_mock = server
        .mock("POST", "/repos/acme/widgets/pulls")
        .match_body(mockito::Matcher::PartialJson(json!({
            "head": "feature-b",
            "base": "feature-a",
            "draft": true
        })))
        .with_status(201)
        .with_header("content-type", "application/json")
        .with_body(pull_request_json(7, "feature-b", "feature-a", true).to_string())
        .create_async()
        .await;

    let client = GitHubClient::new(&server.url(), "acme", "widgets", "test-token").unwrap();
    let pr = client
        .create_pull_request(CreatePullRequest {
            title: "Change on feature-b".to_string(),
            body: "Stacked on `feature-a`.".to_string(),
            head: "feature-b".to_string(),
            base: "feature-a".to_string(),
            draft: true,
        })
        .await
        .unwrap();

    create_mock.assert_async().await;
    assert_eq!(pr.number, 7);
    assert_eq!(pr.html_url, "https://github.com/acme/widgets/pull/7");
}

/// Merging sends the chosen method and surfaces a refused merge
#[tokio::test]
async fn test_merge_pull_request() {
    let mut server = mockito::Server::new_async().await;

    let merge_mock = server
        .mock("PUT", "/repos/acme/widgets/pulls/7/merge")
        .match_body(mockito::Matcher::Json(json!({ "merge_method": "squash" })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(json!({ "merged": true, "message": "Pull Request successfully merged" }).to_string())
        .create_async()
        .await;

    let _refused_mock = server
        .mock("PUT", "/repos/acme/widgets/pulls/8/merge")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(json!({ "merged": false, "message": "Base branch was modified" }).to_string())
        .create_async()
        .await;

    let client = GitHubClient::new(&server.url(), "acme", "widgets", "test-token").unwrap();

    client
        .merge_pull_request(7, MergeMethod::Squash)
        .await
        .unwrap();
    merge_mock.assert_async().await;

    let refused = client.merge_pull_request(8, MergeMethod::Merge).await;
    assert!(matches!(refused, Err(StackError::Network(msg)) if msg.contains("Base branch was modified")));
}

/// API failures map onto the error kinds callers branch on
#[tokio::test]
async fn test_error_responses() {
    let mut server = mockito::Server::new_async().await;

    let _unauthorized = server
        .mock("GET", "/repos/acme/widgets/pulls")
        .match_query(mockito::Matcher::Any)
        .with_status(401)
        .with_body(json!({ "message": "Bad credentials" }).to_string())
        .create_async()
        .await;

    let _unprocessable = server
        .mock("POST", "/repos/acme/widgets/pulls")
        .with_status(422)
        .with_body(json!({ "message": "A pull request already exists" }).to_string())
        .create_async()
        .await;

    let client = GitHubClient::new(&server.url(), "acme", "widgets", "bad-token").unwrap();

    let listed = client.list_pull_requests().await;
    assert!(matches!(listed, Err(StackError::Auth(_))));

    let created = client
        .create_pull_request(CreatePullRequest {
            title: "t".to_string(),
            body: String::new(),
            head: "feature".to_string(),
            base: "main".to_string(),
            draft: false,
        })
        .await;
    match created {
        Err(StackError::Network(msg)) => {
            assert!(msg.contains("422"));
            assert!(msg.contains("already exists"));
        }
        other => panic!("expected a network error, got {other:?}"),
    }
}

/// Network failures are reported rather than panicking
#[tokio::test]
async fn test_unreachable_server() {
    let client = GitHubClient::new("http://127.0.0.1:1", "acme", "widgets", "token").unwrap();
    let result = client.list_pull_requests().await;
    assert!(matches!(result, Err(StackError::Network(_))));
}
