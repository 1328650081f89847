use serde_json::{json, Value};
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[allow(dead_code)]
pub fn temp_config_file(contents: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().expect("failed to create tempdir");
    let config_path = temp_dir.path().join("config.yaml");
    fs::write(&config_path, contents).expect("failed to write config file");
    (temp_dir, config_path)
}

/// Body of a non-streaming Ollama `/api/chat` response
#[allow(dead_code)]
pub fn ollama_reply(content: &str) -> Value {
    json!({
        "model": "llama3.2:latest",
        "created_at": "2024-01-15T14:05:59Z",
        "message": {"role": "assistant", "content": content},
        "done": true,
        "prompt_eval_count": 10,
        "eval_count": 5
    })
}

/// Body of an OpenAI `/chat/completions` response
#[allow(dead_code)]
pub fn completion_reply(content: &str) -> Value {
    json!({
        "id": "chatcmpl-123",
        "object": "chat.completion",
        "choices": [{
            "index": 0,
            "message": {"role": "assistant", "content": content},
            "finish_reason": "stop"
        }],
        "usage": {"prompt_tokens": 10, "completion_tokens": 5, "total_tokens": 15}
    })
}

/// Mounts one Ollama reply per entry, served in order
#[allow(dead_code)]
pub async fn mount_ollama_replies(server: &MockServer, replies: &[&str]) {
    for reply in replies {
        Mock::given(method("POST"))
            .and(path("/api/chat"))
            .respond_with(ResponseTemplate::new(200).set_body_json(ollama_reply(reply)))
            .up_to_n_times(1)
            .mount(server)
            .await;
    }
}

/// `messages` array of every request the server received, oldest first
#[allow(dead_code)]
pub async fn sent_messages(server: &MockServer) -> Vec<Value> {
    server
        .received_requests()
        .await
        .unwrap_or_default()
        .iter()
        .map(|request| {
            let body: Value = serde_json::from_slice(&request.body).expect("request body is JSON");
            body["messages"].clone()
        })
        .collect()
}
