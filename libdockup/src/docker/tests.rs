use super::*;
use mockito::Matcher;

fn engine_for(server: &mockito::ServerGuard) -> DockerEngine {
    let config = EngineConfig {
        host: Some(server.url()),
        timeout: 5,
    };
    DockerEngine::connect(&config).unwrap()
}

fn api_path(path: &str) -> Matcher {
    Matcher::Regex(format!(r"^(/v\d+\.\d+)?{path}"))
}

const IMAGE_LIST: &str = r#"[
  {
    "Id": "sha256:aaa",
    "ParentId": "",
    "RepoTags": ["alpine:3.18", "alpine:latest"],
    "RepoDigests": [],
    "Created": 1700000000,
    "Size": 7340032,
    "SharedSize": -1,
    "Labels": {},
    "Containers": -1
  },
  {
    "Id": "sha256:bbb",
    "ParentId": "",
    "RepoTags": null,
    "RepoDigests": [],
    "Created": 1700000001,
    "Size": 1024,
    "SharedSize": -1,
    "Labels": {},
    "Containers": -1
  }
]"#;

#[test]
fn test_connect_with_http_host() {
    let config = EngineConfig {
        host: Some("tcp://127.0.0.1:2375".to_string()),
        timeout: 10,
    };
    assert!(DockerEngine::connect(&config).is_ok());
}

#[test]
fn test_connect_with_unix_host() {
    let dir = tempfile::tempdir().unwrap();
    let socket = dir.path().join("docker.sock");
    std::fs::write(&socket, "").unwrap();
    let config = EngineConfig {
        host: Some(format!("unix://{}", socket.display())),
        timeout: 10,
    };

    assert!(DockerEngine::connect(&config).is_ok());
}

#[test]
fn test_connect_with_missing_unix_socket_fails() {
    let dir = tempfile::tempdir().unwrap();
    let config = EngineConfig {
        host: Some(format!("unix://{}", dir.path().join("absent.sock").display())),
        timeout: 10,
    };

    let err = DockerEngine::connect(&config).unwrap_err();

    assert!(matches!(err, DockupError::Connection { .. }));
    assert!(err.to_string().contains("absent.sock"));
}

#[tokio::test]
async fn test_list_images_maps_repo_tags() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", api_path("/images/json"))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(IMAGE_LIST)
        .create_async()
        .await;

    let images = engine_for(&server).list_images().await.unwrap();

    mock.assert_async().await;
    assert_eq!(
        images,
        vec![
            LocalImage::new(["alpine:3.18", "alpine:latest"]),
            LocalImage::default(),
        ]
    );
}

#[tokio::test]
async fn test_inspect_image_maps_fields() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", api_path("/images/x/json"))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{
              "Id": "sha256:0123abcd",
              "RepoTags": ["x:latest"],
              "Created": "2024-01-01T00:00:00Z",
              "Architecture": "amd64",
              "Os": "linux",
              "Size": 42,
              "Config": {
                "Labels": {"a": "b"},
                "Env": ["FOO=1", "PATH=/usr/bin"]
              }
            }"#,
        )
        .create_async()
        .await;

    let inspected = engine_for(&server).inspect_image("x").await.unwrap();

    assert_eq!(inspected.id, "sha256:0123abcd");
    assert_eq!(inspected.repo_tags, vec!["x:latest"]);
    assert_eq!(inspected.architecture.as_deref(), Some("amd64"));
    assert_eq!(inspected.size, Some(42));
    assert_eq!(inspected.config.labels.get("a").map(String::as_str), Some("b"));
    assert_eq!(inspected.config.env, vec!["FOO=1", "PATH=/usr/bin"]);
}

#[tokio::test]
async fn test_inspect_image_without_config_is_empty() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", api_path("/images/bare/json"))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"Id": "sha256:bare"}"#)
        .create_async()
        .await;

    let inspected = engine_for(&server).inspect_image("bare").await.unwrap();

    assert_eq!(inspected.id, "sha256:bare");
    assert!(inspected.config.labels.is_empty());
    assert!(inspected.config.env.is_empty());
}

#[tokio::test]
async fn test_inspect_unknown_image_keeps_status() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", api_path("/images/nope/json"))
        .with_status(404)
        .with_header("content-type", "application/json")
        .with_body(r#"{"message": "No such image: nope:latest"}"#)
        .create_async()
        .await;

    let err = engine_for(&server).inspect_image("nope").await.unwrap_err();

    assert!(err.is_not_found());
    assert!(err.to_string().contains("No such image"));
}

#[tokio::test]
async fn test_pull_image_drains_progress_stream() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", api_path("/images/create"))
        .match_query(Matcher::UrlEncoded(
            "fromImage".to_string(),
            "busybox:latest".to_string(),
        ))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            "{\"status\":\"Pulling from library/busybox\",\"id\":\"latest\"}\n\
             {\"status\":\"Download complete\",\"id\":\"a1b2c3\"}\n\
             {\"status\":\"Status: Downloaded newer image for busybox:latest\"}\n",
        )
        .create_async()
        .await;

    let mut handle = engine_for(&server).pull_image("busybox:latest").unwrap();

    assert!(handle.wait(Duration::from_secs(5)).await);
    assert!(handle.take_error().is_none());
    mock.assert_async().await;
}

#[tokio::test]
async fn test_pull_image_failure_is_kept_on_handle() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", api_path("/images/create"))
        .with_status(404)
        .with_header("content-type", "application/json")
        .with_body(r#"{"message": "pull access denied for private/app"}"#)
        .create_async()
        .await;

    let mut handle = engine_for(&server).pull_image("private/app:1").unwrap();

    assert!(handle.wait(Duration::from_secs(5)).await);
    let err = handle.take_error().expect("pull should fail");
    assert!(err.is_not_found());
}

#[tokio::test]
async fn test_pull_image_error_item_fails_the_pull() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", api_path("/images/create"))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            "{\"status\":\"Pulling from library/app\",\"id\":\"1\"}\n\
             {\"status\":\"Downloading\",\"id\":\"d4e5f6\"}\n\
             {\"errorDetail\":{\"message\":\"unexpected EOF\"},\"error\":\"unexpected EOF\"}\n",
        )
        .create_async()
        .await;

    let mut handle = engine_for(&server).pull_image("app:1").unwrap();

    assert!(handle.wait(Duration::from_secs(5)).await);
    let err = handle.take_error().expect("pull should fail");
    assert!(matches!(err, DockupError::Engine { status_code: None, .. }));
    assert!(err.to_string().contains("unexpected EOF"));
}
