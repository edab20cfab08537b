//! Wire-level tests for the Galaxy client.
//!
//! These run against a local mock of the `tool_shed_repositories` API and
//! verify the request shapes the client produces and the outcome/error
//! mapping it applies to responses.

use serde_json::json;
use shedsync_core::Error;
use shedsync_galaxy::{
    GalaxyClient, GalaxyConfig, InstallOutcome, InstallRequest, Placement, ToolShedRepositories,
};
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> GalaxyClient {
    GalaxyClient::new(GalaxyConfig::new(server.uri()).with_api_key("test-key"))
        .expect("client construction")
}

fn request() -> InstallRequest {
    InstallRequest {
        tool_shed: "toolshed.example.org".into(),
        owner: "devteam".into(),
        name: "fastqc".into(),
        changeset_revision: String::new(),
        install_tool_dependencies: false,
        install_repository_dependencies: false,
        install_resolver_dependencies: false,
        placement: Placement::Default,
    }
}

fn repo_body(id: &str) -> serde_json::Value {
    json!({
        "id": id,
        "name": "fastqc",
        "owner": "devteam",
        "status": "Installed",
        "deleted": false,
        "ctx_rev": "7",
        "error_message": "",
        "installed_changeset_revision": "9e2b4b4b4b4b",
        "changeset_revision": "9e2b4b4b4b4b",
        "tool_shed": "toolshed.example.org",
        "url": format!("/api/tool_shed_repositories/{id}"),
        "dist_to_shed": false,
        "uninstalled": false,
        "include_datatypes": true,
        "latest_installable_revision": "9e2b4b4b4b4b",
        "revision_update": "False",
        "revision_upgrade": "False",
        "repository_deprecated": "False"
    })
}

/// Exact-body match: default placement sends neither panel field, and the
/// empty revision travels verbatim.
#[tokio::test]
async fn install_sends_exact_payload_and_api_key() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/tool_shed_repositories"))
        .and(header("x-api-key", "test-key"))
        .and(body_json(json!({
            "tool_shed_url": "toolshed.example.org",
            "name": "fastqc",
            "owner": "devteam",
            "changeset_revision": "",
            "install_tool_dependencies": false,
            "install_repository_dependencies": false,
            "install_resolver_dependencies": false
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([repo_body("abc123")])))
        .expect(1)
        .mount(&server)
        .await;

    let outcome = client_for(&server).install(&request()).await.unwrap();
    match outcome {
        InstallOutcome::One(repo) => {
            assert_eq!(repo.id, "abc123");
            assert_eq!(repo.status, "Installed");
            assert_eq!(repo.installed_changeset_revision, "9e2b4b4b4b4b");
        }
        other => panic!("expected one result, got {other:?}"),
    }
}

#[tokio::test]
async fn install_sends_existing_section_only() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/tool_shed_repositories"))
        .and(body_json(json!({
            "tool_shed_url": "toolshed.example.org",
            "name": "fastqc",
            "owner": "devteam",
            "changeset_revision": "",
            "install_tool_dependencies": false,
            "install_repository_dependencies": false,
            "install_resolver_dependencies": false,
            "tool_panel_section_id": "sec1"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([repo_body("abc123")])))
        .expect(1)
        .mount(&server)
        .await;

    let mut request = request();
    request.placement = Placement::ExistingSection { id: "sec1".into() };
    client_for(&server).install(&request).await.unwrap();
}

#[tokio::test]
async fn install_decodes_empty_list_as_none() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/tool_shed_repositories"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let outcome = client_for(&server).install(&request()).await.unwrap();
    assert_eq!(outcome, InstallOutcome::None);
}

/// The registry answers an install of an already-present repository with a
/// bare message object rather than a list.
#[tokio::test]
async fn install_decodes_message_object_as_none() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/tool_shed_repositories"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "message": "No repositories were installed, possibly because the selected repository has already been installed."
        })))
        .mount(&server)
        .await;

    let outcome = client_for(&server).install(&request()).await.unwrap();
    assert!(outcome.is_empty());
}

#[tokio::test]
async fn install_decodes_many() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/tool_shed_repositories"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([repo_body("abc123"), repo_body("def456")])),
        )
        .mount(&server)
        .await;

    let outcome = client_for(&server).install(&request()).await.unwrap();
    match outcome {
        InstallOutcome::Many(repos) => {
            assert_eq!(repos.len(), 2);
            assert_eq!(repos[0].id, "abc123");
            assert_eq!(repos[1].id, "def456");
        }
        other => panic!("expected many, got {other:?}"),
    }
}

#[tokio::test]
async fn install_maps_rejection_to_api_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/tool_shed_repositories"))
        .respond_with(ResponseTemplate::new(400).set_body_string("bad changeset revision"))
        .mount(&server)
        .await;

    let err = client_for(&server).install(&request()).await.unwrap_err();
    match err {
        Error::Api { status, message } => {
            assert_eq!(status, 400);
            assert_eq!(message, "bad changeset revision");
        }
        other => panic!("expected api error, got {other:?}"),
    }
}

#[tokio::test]
async fn get_fetches_by_id() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/tool_shed_repositories/abc123"))
        .and(header("x-api-key", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(repo_body("abc123")))
        .expect(1)
        .mount(&server)
        .await;

    let repo = client_for(&server).get("abc123").await.unwrap();
    assert_eq!(repo.id, "abc123");
    assert!(repo.include_datatypes);
}

#[tokio::test]
async fn get_maps_404_to_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/tool_shed_repositories/gone"))
        .respond_with(ResponseTemplate::new(404).set_body_string("not found"))
        .mount(&server)
        .await;

    let err = client_for(&server).get("gone").await.unwrap_err();
    assert!(matches!(err, Error::RepositoryNotFound { ref id } if id == "gone"));
}

#[tokio::test]
async fn list_returns_all_installed_repositories() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/tool_shed_repositories"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([repo_body("abc123"), repo_body("def456")])),
        )
        .mount(&server)
        .await;

    let repos = client_for(&server).list().await.unwrap();
    assert_eq!(repos.len(), 2);
}

#[tokio::test]
async fn uninstall_carries_the_exact_boolean() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/api/tool_shed_repositories/abc123"))
        .and(body_json(json!({ "remove_from_disk": false })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "message": "The repository named fastqc has been deactivated."
        })))
        .expect(1)
        .mount(&server)
        .await;

    client_for(&server)
        .uninstall("abc123", false)
        .await
        .unwrap();
}

#[tokio::test]
async fn uninstall_surfaces_api_errors() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/api/tool_shed_repositories/abc123"))
        .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .uninstall("abc123", true)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Api { status: 503, .. }));
}
