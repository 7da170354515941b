//! Shared infrastructure for relay integration tests
//!
//! Starts the real relay router on an ephemeral port, backed by a
//! recording `MockLlmService` the test keeps a handle to.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use relaychat_client::{ChatClient, ClientConfig, HttpRelayClient, SessionOptions};
use relaychat_common::Config;
use relaychat_llm::MockLlmService;
use relaychat_relay::RelayState;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

pub const PROVIDER_TIMEOUT: Duration = Duration::from_secs(30);
pub const CLIENT_TIMEOUT: Duration = Duration::from_secs(5);

/// A relay server running in the background for one test
pub struct TestRelay {
    pub addr: SocketAddr,
    pub llm: MockLlmService,
    handle: JoinHandle<()>,
}

impl TestRelay {
    pub async fn start(llm: MockLlmService) -> Result<Self> {
        Self::start_with_timeout(llm, PROVIDER_TIMEOUT).await
    }

    pub async fn start_with_timeout(
        llm: MockLlmService,
        provider_timeout: Duration,
    ) -> Result<Self> {
        let llm = llm.recording();
        let state = RelayState::new(Arc::new(llm.clone()), provider_timeout);
        let app = relaychat_app::with_middleware(relaychat_app::router(state), &Config::default());

        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;

        let handle = tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, app).await {
                eprintln!("test relay stopped: {e}");
            }
        });

        Ok(Self { addr, llm, handle })
    }

    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn chat_url(&self) -> String {
        format!("{}/api/chat", self.url())
    }

    pub fn transport(&self, timeout: Duration) -> Result<HttpRelayClient> {
        Ok(HttpRelayClient::new(ClientConfig {
            relay_url: self.url(),
            timeout,
        })?)
    }

    pub fn chat_client(&self) -> Result<ChatClient<HttpRelayClient>> {
        Ok(ChatClient::new(
            self.transport(CLIENT_TIMEOUT)?,
            SessionOptions::default(),
        ))
    }
}

impl Drop for TestRelay {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
