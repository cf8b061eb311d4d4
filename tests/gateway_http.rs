use clickatell::{
    Credentials, GatewayClient, GatewayError, MessageId, MessageText, RawPhoneNumber,
    SendMessage, SendOptions,
};
use mockito::Matcher;

fn client_for(server: &mockito::ServerGuard) -> GatewayClient {
    GatewayClient::builder(Credentials::new("3456789", "user", "pass").unwrap())
        .base_url(server.url())
        .build()
        .unwrap()
}

fn encoded(key: &str, value: &str) -> Matcher {
    Matcher::UrlEncoded(key.to_owned(), value.to_owned())
}

#[tokio::test]
async fn balance_query_sends_credentials_in_query_string() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/http/getbalance")
        .match_query(Matcher::AllOf(vec![
            encoded("api_id", "3456789"),
            encoded("user", "user"),
            encoded("password", "pass"),
        ]))
        .with_status(200)
        .with_body("Credit: 42.5\n")
        .create_async()
        .await;

    let balance = client_for(&server).account_balance().await.unwrap();
    assert_eq!(balance.credit, "42.5");
    mock.assert_async().await;
}

#[tokio::test]
async fn session_replaces_credentials_after_authenticate() {
    let mut server = mockito::Server::new_async().await;
    let auth = server
        .mock("GET", "/http/auth")
        .match_query(Matcher::AllOf(vec![
            encoded("api_id", "3456789"),
            encoded("user", "user"),
            encoded("password", "pass"),
        ]))
        .with_body("OK: 3d1a9c")
        .create_async()
        .await;
    let ping = server
        .mock("GET", "/http/ping")
        .match_query(encoded("session_id", "3d1a9c"))
        .with_body("OK:")
        .create_async()
        .await;

    let mut client = client_for(&server);
    let session = client.authenticate().await.unwrap();
    assert_eq!(session.as_str(), "3d1a9c");
    client.ping().await.unwrap();

    auth.assert_async().await;
    ping.assert_async().await;
}

#[tokio::test]
async fn send_message_posts_form_and_reads_per_recipient_lines() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/http/sendmsg")
        .match_header("content-type", "application/x-www-form-urlencoded")
        .match_body(Matcher::AllOf(vec![
            encoded("to", "27999000001,27999000002"),
            encoded("text", &"a".repeat(161)),
            encoded("concat", "2"),
        ]))
        .with_body("ID: 5f2e To: 27999000001\nERR: 114, Cannot route message To: 27999000002\n")
        .create_async()
        .await;

    let request = SendMessage::new(
        vec![
            RawPhoneNumber::new("27999000001").unwrap(),
            RawPhoneNumber::new("27999000002").unwrap(),
        ],
        MessageText::new("a".repeat(161)).unwrap(),
        SendOptions::default(),
    )
    .unwrap();
    let response = client_for(&server).send_message(request).await.unwrap();

    assert_eq!(
        response.ids().map(MessageId::as_str).collect::<Vec<_>>(),
        vec!["5f2e"]
    );
    let failures = response.failures().collect::<Vec<_>>();
    assert_eq!(failures.len(), 1);
    assert_eq!(failures[0].0.map(RawPhoneNumber::raw), Some("27999000002"));
    assert_eq!(failures[0].1.code.as_str(), "114");
    mock.assert_async().await;
}

#[tokio::test]
async fn gateway_error_line_surfaces_as_api_error() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/http/getbalance")
        .match_query(Matcher::Any)
        .with_body("ERR: 001, Authentication failed")
        .create_async()
        .await;

    let err = client_for(&server).account_balance().await.unwrap_err();
    match err {
        GatewayError::Api(err) => {
            assert_eq!(err.code.as_str(), "001");
            assert!(err.code.is_auth_error());
            assert_eq!(err.message, "Authentication failed");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn http_failure_keeps_status_and_body() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/http/querymsg")
        .match_query(Matcher::Any)
        .with_status(502)
        .with_body("bad gateway")
        .create_async()
        .await;

    let err = client_for(&server)
        .message_status(MessageId::new("abc").unwrap())
        .await
        .unwrap_err();
    match err {
        GatewayError::HttpStatus { status, body } => {
            assert_eq!(status, 502);
            assert_eq!(body.as_deref(), Some("bad gateway"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}
