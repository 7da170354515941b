// relaychat - Terminal Chat Client

use std::future::Future;
use std::io::Write;
use std::pin::Pin;
use std::sync::Arc;

use relaychat_client::render::{TerminalView, PENDING_INDICATOR, REJECTED_NOTICE};
use relaychat_client::reveal::{TextReveal, REVEAL_INTERVAL, TITLE};
use relaychat_client::{
    ClientConfig, ConversationState, HttpRelayClient, RelayTransport, SubmitOutcome,
    TransportError,
};
use relaychat_common::ChatReply;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{error, info};

type InFlight = Pin<Box<dyn Future<Output = Result<ChatReply, TransportError>> + Send>>;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let config = ClientConfig::from_env().map_err(|e| {
        error!("Failed to load client configuration: {}", e);
        e
    })?;

    info!(relay_url = %config.relay_url, "Starting relaychat terminal client");

    let transport = Arc::new(HttpRelayClient::new(config)?);

    let mut flushed = Ok(());
    TextReveal::new(TITLE)
        .play(REVEAL_INTERVAL, |frame| {
            print!("\r{frame}");
            if flushed.is_ok() {
                flushed = std::io::stdout().flush();
            }
        })
        .await;
    flushed?;
    println!();

    let mut state = ConversationState::default();
    let mut view = TerminalView::new();
    print_lines(view.drain_new(&state));

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut in_flight: Option<InFlight> = None;

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                match state.submit(&line) {
                    SubmitOutcome::Dispatched(request) => {
                        print_lines(view.drain_new(&state));
                        println!("{PENDING_INDICATOR}");
                        let transport = Arc::clone(&transport);
                        in_flight = Some(Box::pin(async move { transport.send(&request).await }));
                    }
                    SubmitOutcome::Rejected => println!("{REJECTED_NOTICE}"),
                    SubmitOutcome::Ignored => {}
                }
            }
            result = async {
                match in_flight.as_mut() {
                    Some(request) => request.await,
                    None => std::future::pending().await,
                }
            }, if in_flight.is_some() => {
                in_flight = None;
                state.resolve(result)?;
                print_lines(view.drain_new(&state));
            }
        }
    }

    info!("Input closed, exiting");
    Ok(())
}

fn print_lines(lines: Vec<String>) {
    for line in lines {
        println!("{line}");
    }
}
