//! HTTP transport handed to the client.
//!
//! [`Transport`] is the capability the client needs: send one request, get
//! one response. [`ReqwestTransport`] is the default; applications that need
//! a different pooling or timeout policy build their own `reqwest::Client`,
//! and anything else (a proxy layer, a test double) implements the trait.

use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, OnceLock};

use reqwest::{Client, Request, Response};
use thiserror::Error;
use tracing::trace;

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("transport request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("transport rejected request: {0}")]
    Rejected(String),
}

/// Future returned by [`Transport::send`].
pub type SendFuture<'a> = Pin<Box<dyn Future<Output = Result<Response, TransportError>> + Send + 'a>>;

pub trait Transport: Send + Sync {
    /// Execute one request. Retries are the caller's business.
    fn send(&self, request: Request) -> SendFuture<'_>;
}

/// Transport backed by a `reqwest::Client`. Cheap to clone.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
}

static DEFAULT_TRANSPORT: OnceLock<Arc<ReqwestTransport>> = OnceLock::new();

impl ReqwestTransport {
    pub fn from_client(client: Client) -> Self {
        Self { client }
    }

    /// Process-wide default transport, built once on first use.
    ///
    /// Panics if the TLS backend cannot be initialised.
    pub fn shared() -> Arc<ReqwestTransport> {
        DEFAULT_TRANSPORT
            .get_or_init(|| Arc::new(ReqwestTransport::from_client(Client::new())))
            .clone()
    }

    pub fn client(&self) -> &Client {
        &self.client
    }
}

impl From<Client> for ReqwestTransport {
    fn from(client: Client) -> Self {
        Self::from_client(client)
    }
}

impl Transport for ReqwestTransport {
    fn send(&self, request: Request) -> SendFuture<'_> {
        trace!(method = %request.method(), url = %request.url(), "sending request");
        Box::pin(async move { Ok(self.client.execute(request).await?) })
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::sync::Mutex;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Remembers every request URL and refuses to send anything.
    #[derive(Default)]
    pub(crate) struct RecordingTransport {
        pub urls: Mutex<Vec<String>>,
    }

    impl Transport for RecordingTransport {
        fn send(&self, request: Request) -> SendFuture<'_> {
            self.urls.lock().unwrap().push(request.url().to_string());
            Box::pin(async { Err(TransportError::Rejected("recorded only".into())) })
        }
    }

    #[test]
    fn shared_is_built_once() {
        let a = ReqwestTransport::shared();
        let b = ReqwestTransport::shared();
        assert!(Arc::ptr_eq(&a, &b));
    }

    #[tokio::test]
    async fn send_reaches_local_listener() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let server = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut received = Vec::new();
            let mut buf = [0u8; 1024];
            while !received.ends_with(b"\r\n\r\n{}") {
                let n = socket.read(&mut buf).await.unwrap();
                if n == 0 {
                    break;
                }
                received.extend_from_slice(&buf[..n]);
            }
            let head = String::from_utf8_lossy(&received).to_string();
            socket
                .write_all(b"HTTP/1.1 200 OK\r\ncontent-length: 2\r\nconnection: close\r\n\r\nok")
                .await
                .unwrap();
            head
        });

        let transport = ReqwestTransport::from_client(Client::new());
        let request = transport
            .client()
            .post(format!("http://{addr}/v1/batch"))
            .body("{}")
            .build()
            .unwrap();
        let response = transport.send(request).await.unwrap();
        assert_eq!(response.status(), reqwest::StatusCode::OK);
        assert_eq!(response.text().await.unwrap(), "ok");

        let head = server.await.unwrap();
        assert!(head.starts_with("POST /v1/batch"));
    }

    #[tokio::test]
    async fn send_reports_connection_failure() {
        // Bind then drop to get a port nothing listens on.
        let addr = {
            let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
            listener.local_addr().unwrap()
        };
        let transport = ReqwestTransport::from(Client::new());
        let request = transport
            .client()
            .get(format!("http://{addr}/"))
            .build()
            .unwrap();
        let err = transport.send(request).await.unwrap_err();
        assert!(err.to_string().contains("transport request failed"));
    }

    #[tokio::test]
    async fn trait_object_dispatches_to_implementation() {
        let recorder = Arc::new(RecordingTransport::default());
        let transport: Arc<dyn Transport> = recorder.clone();
        let request = Client::new()
            .post("https://collector.example.com/v1/batch")
            .build()
            .unwrap();
        let err = transport.send(request).await.unwrap_err();
        assert!(matches!(err, TransportError::Rejected(_)));
        assert_eq!(
            *recorder.urls.lock().unwrap(),
            vec!["https://collector.example.com/v1/batch"]
        );
    }
}
