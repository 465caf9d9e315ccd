#![allow(dead_code)]

use dish_explorer::{create_router, AppConfig, LiveExplorer};
use httpmock::prelude::*;
use httpmock::Mock;
use serde_json::json;

pub const KUNG_PAO_REPLY: &str = "Here is a detailed description of Kung Pao Chicken.\n\
1. English Translation: Kung Pao Chicken\n\
2. Key Ingredients: chicken, peanuts, dried chilies, Sichuan peppercorns\n\
3. Flavor Profile: spicy, slightly sweet, numbing\n\
4. Regional Origin: Sichuan Province\n\
5. Cooking Method: stir-fried in a wok\n\
6. Recommendation: Yes: it is familiar and not too exotic for first-timers";

/// OpenAI 與 Mapbox 共用同一個 mock server
pub fn config_for(server: &MockServer) -> AppConfig {
    let toml_content = format!(
        r#"
[openai]
api_key = "sk-test"
base_url = "{}"

[mapbox]
access_token = "pk-test"
base_url = "{}"

[server]
request_timeout_seconds = 5
"#,
        server.url("/v1"),
        server.base_url()
    );
    AppConfig::from_toml_str(&toml_content).expect("test config should parse")
}

pub fn mock_chat_reply<'a>(server: &'a MockServer, content: &str) -> Mock<'a> {
    let content = content.to_string();
    server.mock(|when, then| {
        when.method(POST)
            .path("/v1/chat/completions")
            .header("authorization", "Bearer sk-test");
        then.status(200).json_body(json!({
            "id": "chatcmpl-1",
            "object": "chat.completion",
            "choices": [{
                "index": 0,
                "message": { "role": "assistant", "content": content },
                "finish_reason": "stop"
            }]
        }));
    })
}

pub fn mock_image_url<'a>(server: &'a MockServer, url: &str) -> Mock<'a> {
    let url = url.to_string();
    server.mock(|when, then| {
        when.method(POST)
            .path("/v1/images/generations")
            .header("authorization", "Bearer sk-test");
        then.status(200).json_body(json!({
            "created": 1700000000,
            "data": [{ "url": url }]
        }));
    })
}

pub async fn spawn_app(config: &AppConfig) -> String {
    let explorer = LiveExplorer::from_config(config).expect("explorer should build");
    let app = create_router(explorer);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind ephemeral port");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("server should run");
    });

    format!("http://{}", addr)
}
