use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use futures_util::TryStreamExt;
use mockito::Matcher;
use pan123::file::list::ListFilesParams;
use pan123::upload::{CompletionPolicy, UploadOptions};
use pan123::{Client, Credentials};
use rand::distributions::Alphanumeric;
use rand::Rng;

fn init() {
    let filter = std::env::var("RUST_LOG").unwrap_or_else(|_| "debug".into());
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_test_writer()
        .try_init();
}

fn random_name() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(16)
        .map(char::from)
        .collect()
}

fn random_content(size: usize) -> Vec<u8> {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(size)
        .collect()
}

fn md5_hex(content: &[u8]) -> String {
    pan123::upload::digest::md5_hex(content)
}

#[tokio::test]
async fn should_create_folder_upload_and_list() {
    init();
    let folder_name = random_name();
    let filename = format!("{}.bin", random_name());
    let content = random_content(300);

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(&filename);
    std::fs::write(&path, &content).unwrap();

    let mut api = mockito::Server::new_async().await;
    let mut storage = mockito::Server::new_async().await;

    let m_token = api
        .mock("POST", "/api/v1/access_token")
        .match_body(Matcher::Json(serde_json::json!({
            "clientID": "client-id",
            "clientSecret": "client-secret",
        })))
        .with_status(200)
        .with_body(r#"{"code": 0, "message": "ok", "data": {"accessToken": "workflow-token", "expiredAt": "2099-01-01T00:00:00+08:00"}}"#)
        .expect(1)
        .create_async()
        .await;
    let m_mkdir = api
        .mock("POST", "/upload/v1/file/mkdir")
        .match_header("authorization", "Bearer workflow-token")
        .match_body(Matcher::Json(serde_json::json!({
            "parentID": 0,
            "name": folder_name,
        })))
        .with_status(200)
        .with_body(r#"{"code": 0, "message": "ok", "data": {"dirID": 4200}}"#)
        .create_async()
        .await;
    let m_create = api
        .mock("POST", "/upload/v2/file/create")
        .match_body(Matcher::PartialJson(serde_json::json!({
            "parentFileID": 4200,
            "filename": filename,
            "etag": md5_hex(&content),
            "size": 300,
        })))
        .with_status(200)
        .with_body(
            serde_json::json!({
                "code": 0,
                "message": "ok",
                "data": {
                    "reuse": false,
                    "preuploadID": "workflow-upload",
                    "sliceSize": 128,
                    "servers": [format!("{}/", storage.url())],
                },
            })
            .to_string(),
        )
        .create_async()
        .await;
    let m_slices = storage
        .mock("POST", "/upload/v2/file/slice")
        .match_header("authorization", "Bearer workflow-token")
        .match_body(Matcher::Regex("workflow-upload".into()))
        .with_status(200)
        .with_body(r#"{"code": 0, "message": "ok"}"#)
        .expect(3)
        .create_async()
        .await;
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = calls.clone();
    let m_complete = api
        .mock("POST", "/upload/v2/file/upload_complete")
        .match_body(Matcher::Json(serde_json::json!({ "preuploadID": "workflow-upload" })))
        .with_status(200)
        .with_body_from_request(move |_| {
            if counter.fetch_add(1, Ordering::SeqCst) == 0 {
                br#"{"code": 0, "message": "ok", "data": {"completed": false, "fileID": 0}}"#.to_vec()
            } else {
                br#"{"code": 0, "message": "ok", "data": {"completed": true, "fileID": 4201}}"#.to_vec()
            }
        })
        .expect(2)
        .create_async()
        .await;
    let m_list = api
        .mock("GET", "/api/v2/file/list")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("parentFileId".into(), "4200".into()),
            Matcher::UrlEncoded("limit".into(), "100".into()),
        ]))
        .with_status(200)
        .with_body(
            serde_json::json!({
                "code": 0,
                "message": "ok",
                "data": {
                    "lastFileId": -1,
                    "fileList": [{
                        "fileId": 4201,
                        "filename": filename,
                        "type": 0,
                        "size": 300,
                        "etag": md5_hex(&content),
                        "status": 2,
                        "parentFileId": 4200,
                        "category": 0,
                        "trashed": 0,
                    }],
                },
            })
            .to_string(),
        )
        .create_async()
        .await;

    let client = Client::new(api.url(), Credentials::new("client-id", "client-secret")).unwrap();

    let folder_id = client.create_folder(0, folder_name.as_str()).await.unwrap();
    assert_eq!(folder_id, 4200);

    let mut progress = Vec::new();
    let options = UploadOptions::default()
        .with_completion(CompletionPolicy::new(3, Duration::from_millis(10)))
        .with_progress(|sent, total| progress.push((sent, total)));
    let file_id = client.upload_file(&path, folder_id, options).await.unwrap();
    assert_eq!(file_id, 4201);
    assert_eq!(progress, vec![(128, 300), (256, 300), (300, 300)]);

    let files: Vec<_> = client
        .list_all_files(ListFilesParams::new(folder_id))
        .try_collect()
        .await
        .unwrap();
    assert_eq!(files.len(), 1);
    assert_eq!(files[0].file_id, file_id);
    assert_eq!(files[0].etag, md5_hex(&content));
    assert!(!files[0].trashed);

    m_token.assert_async().await;
    m_mkdir.assert_async().await;
    m_create.assert_async().await;
    m_slices.assert_async().await;
    m_complete.assert_async().await;
    m_list.assert_async().await;
}

#[tokio::test]
async fn should_validate_before_calling_the_api() {
    init();
    let mut api = mockito::Server::new_async().await;
    let m_any = api
        .mock("POST", Matcher::Any)
        .expect(0)
        .create_async()
        .await;
    let client = Client::new(api.url(), Credentials::new("client-id", "client-secret")).unwrap();

    let dir = tempfile::tempdir().unwrap();
    let empty = dir.path().join("empty.bin");
    std::fs::write(&empty, b"").unwrap();
    let err = client
        .upload_file(&empty, 0, UploadOptions::default())
        .await
        .unwrap_err();
    assert!(err.is_validation());

    let err = client
        .upload_file(dir.path(), 0, UploadOptions::default())
        .await
        .unwrap_err();
    assert!(err.is_validation());

    let err = client.create_folder(0, "bad/name").await.unwrap_err();
    assert!(err.is_validation());

    m_any.assert_async().await;
}
