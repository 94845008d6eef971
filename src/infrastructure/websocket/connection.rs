use std::time::Duration;

use async_trait::async_trait;
use futures_util::stream::{SplitSink, SplitStream};
use futures_util::{SinkExt, StreamExt};
use tokio::net::TcpStream;
use tokio::sync::mpsc;
use tokio::time::timeout;
use tokio_tungstenite::tungstenite::Message as WsMessage;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async};
use tracing::{debug, info, trace, warn};

use super::constants::{CLOSE_ABNORMAL, CLOSE_NORMAL};
use crate::domain::{ConnectionError, ConnectionEvent, ConnectionResult};

type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;
type WsWriter = SplitSink<WsStream, WsMessage>;
type WsReader = SplitStream<WsStream>;

/// Frames queued by the handle for the driver task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutboundCommand {
    Text(String),
    Close,
}

#[async_trait]
pub trait WebSocketTransport: Send {
    async fn connect(&mut self, url: &str) -> ConnectionResult<()>;
    async fn send_text(&mut self, text: &str) -> ConnectionResult<()>;
    /// Next inbound payload. Closes surface as `ConnectionError::ConnectionClosed`.
    async fn receive(&mut self) -> ConnectionResult<Option<String>>;
    async fn close(&mut self) -> ConnectionResult<()>;
    fn is_connected(&self) -> bool;
}

pub struct WebSocketConnection {
    writer: Option<WsWriter>,
    reader: Option<WsReader>,
    connect_timeout: Duration,
    connected: bool,
}

impl WebSocketConnection {
    #[must_use]
    pub const fn new(connect_timeout: Duration) -> Self {
        Self {
            writer: None,
            reader: None,
            connect_timeout,
            connected: false,
        }
    }
}

#[async_trait]
impl WebSocketTransport for WebSocketConnection {
    async fn connect(&mut self, url: &str) -> ConnectionResult<()> {
        let (ws_stream, _) = timeout(self.connect_timeout, connect_async(url))
            .await
            .map_err(|_| ConnectionError::timeout("connection"))?
            .map_err(|e| ConnectionError::connection_failed(e.to_string()))?;

        let (writer, reader) = ws_stream.split();
        self.writer = Some(writer);
        self.reader = Some(reader);
        self.connected = true;

        Ok(())
    }

    async fn send_text(&mut self, text: &str) -> ConnectionResult<()> {
        let writer = self.writer.as_mut().ok_or(ConnectionError::NotConnected)?;

        writer
            .send(WsMessage::Text(text.to_string().into()))
            .await
            .map_err(|e| ConnectionError::websocket(e.to_string()))
    }

    async fn receive(&mut self) -> ConnectionResult<Option<String>> {
        let reader = self.reader.as_mut().ok_or(ConnectionError::NotConnected)?;

        loop {
            match reader.next().await {
                Some(Ok(WsMessage::Text(text))) => {
                    return Ok(Some(text.as_str().to_owned()));
                }
                Some(Ok(WsMessage::Binary(data))) => {
                    return Ok(Some(String::from_utf8_lossy(&data).into_owned()));
                }
                Some(Ok(WsMessage::Close(frame))) => {
                    self.connected = false;
                    let (code, reason) = frame.map_or_else(
                        || (CLOSE_NORMAL, String::new()),
                        |f| (f.code.into(), f.reason.to_string()),
                    );

                    return Err(ConnectionError::ConnectionClosed { code, reason });
                }
                Some(Ok(WsMessage::Ping(data))) => {
                    if let Some(writer) = self.writer.as_mut() {
                        let _ = writer.send(WsMessage::Pong(data)).await;
                    }
                }
                Some(Ok(WsMessage::Pong(_) | WsMessage::Frame(_))) => {}
                Some(Err(e)) => {
                    self.connected = false;
                    return Err(ConnectionError::websocket(e.to_string()));
                }
                None => {
                    self.connected = false;
                    return Err(ConnectionError::ConnectionClosed {
                        code: CLOSE_ABNORMAL,
                        reason: "Stream ended".to_string(),
                    });
                }
            }
        }
    }

    async fn close(&mut self) -> ConnectionResult<()> {
        if let Some(mut writer) = self.writer.take() {
            let _ = writer.close().await;
        }
        self.reader = None;
        self.connected = false;
        debug!("WebSocket connection closed");
        Ok(())
    }

    fn is_connected(&self) -> bool {
        self.connected
    }
}

/// Drives one connection until it closes. Never reconnects.
///
/// Emits `Open` after the handshake, `Message` per inbound payload, and ends
/// with `Closed`, preceded by `Error` when the transport failed. A failed send
/// ends the connection like a failed receive.
pub async fn run_connection(
    mut transport: Box<dyn WebSocketTransport>,
    url: String,
    event_tx: mpsc::UnboundedSender<ConnectionEvent>,
    mut command_rx: mpsc::UnboundedReceiver<OutboundCommand>,
) {
    if let Err(e) = transport.connect(&url).await {
        warn!(endpoint = %url, error = %e, "Failed to open connection");
        let _ = event_tx.send(ConnectionEvent::error(e.to_string()));
        let _ = event_tx.send(ConnectionEvent::closed(CLOSE_ABNORMAL, e.to_string()));
        return;
    }

    info!(endpoint = %url, "Connection opened");
    let _ = event_tx.send(ConnectionEvent::Open);

    loop {
        tokio::select! {
            result = transport.receive() => {
                match result {
                    Ok(Some(payload)) => {
                        trace!(len = payload.len(), "Inbound frame");
                        let _ = event_tx.send(ConnectionEvent::Message(payload));
                    }
                    Ok(None) => {}
                    Err(ConnectionError::ConnectionClosed { code, reason }) => {
                        info!(code, reason = %reason, "Connection closed by server");
                        let _ = event_tx.send(ConnectionEvent::closed(code, reason));
                        break;
                    }
                    Err(e) => {
                        warn!(error = %e, "Connection failed");
                        let _ = event_tx.send(ConnectionEvent::error(e.to_string()));
                        let _ = event_tx.send(ConnectionEvent::closed(CLOSE_ABNORMAL, e.to_string()));
                        break;
                    }
                }
            }

            command = command_rx.recv() => {
                match command {
                    Some(OutboundCommand::Text(text)) => {
                        if let Err(e) = transport.send_text(&text).await {
                            warn!(error = %e, "Failed to send frame");
                            let _ = transport.close().await;
                            let _ = event_tx.send(ConnectionEvent::error(e.to_string()));
                            let _ = event_tx.send(ConnectionEvent::closed(CLOSE_ABNORMAL, e.to_string()));
                            break;
                        }
                    }
                    Some(OutboundCommand::Close) | None => {
                        let _ = transport.close().await;
                        let _ = event_tx.send(ConnectionEvent::closed(CLOSE_NORMAL, "Closed by client"));
                        break;
                    }
                }
            }
        }
    }
}


#[cfg(test)]
mod tests {
    use super::mock::MockTransport;
    use super::*;
    use std::future::Future;
    use tokio::net::TcpListener;
    use tokio::task::JoinHandle;
    use tokio_tungstenite::accept_async;
    use tokio_tungstenite::tungstenite::protocol::CloseFrame;
    use tokio_tungstenite::tungstenite::protocol::frame::coding::CloseCode;

    const TEST_TIMEOUT: Duration = Duration::from_secs(5);

    type ServerStream = WebSocketStream<TcpStream>;

    /// Accepts one WebSocket client on a local port and hands it to `script`.
    async fn serve_once<F, Fut>(script: F) -> (String, JoinHandle<()>)
    where
        F: FnOnce(ServerStream) -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let server = tokio::spawn(async move {
            let (stream, _) = listener.accept().await.unwrap();
            let ws = accept_async(stream).await.unwrap();
            script(ws).await;
        });
        (format!("ws://{addr}/"), server)
    }

    async fn connected(url: &str) -> WebSocketConnection {
        let mut conn = WebSocketConnection::new(TEST_TIMEOUT);
        conn.connect(url).await.unwrap();
        assert!(conn.is_connected());
        conn
    }

    async fn collect(mut rx: mpsc::UnboundedReceiver<ConnectionEvent>) -> Vec<ConnectionEvent> {
        let mut events = Vec::new();
        while let Some(event) = rx.recv().await {
            events.push(event);
        }
        events
    }

    #[test]
    fn test_websocket_connection_initial_state() {
        let conn = WebSocketConnection::new(Duration::from_secs(1));
        assert!(!conn.is_connected());
    }

    #[tokio::test]
    async fn test_connect_failure_emits_error_then_closed() {
        let mut transport = MockTransport::new();
        transport.fail_connect = true;
        let (event_tx, event_rx) = mpsc::unbounded_channel();
        let (_command_tx, command_rx) = mpsc::unbounded_channel();

        run_connection(Box::new(transport), "ws://x/".into(), event_tx, command_rx).await;

        let events = collect(event_rx).await;
        assert_eq!(events.len(), 2);
        assert!(matches!(events[0], ConnectionEvent::Error { .. }));
        assert!(matches!(
            events[1],
            ConnectionEvent::Closed { code: CLOSE_ABNORMAL, .. }
        ));
    }

    #[tokio::test]
    async fn test_inbound_frames_then_server_close() {
        let mut transport = MockTransport::new();
        transport.inbound.push_back(Ok(Some("hello".to_string())));
        transport.inbound.push_back(Ok(Some("world".to_string())));
        transport
            .inbound
            .push_back(Err(ConnectionError::ConnectionClosed {
                code: 1001,
                reason: "going away".to_string(),
            }));
        let (event_tx, event_rx) = mpsc::unbounded_channel();
        let (_command_tx, command_rx) = mpsc::unbounded_channel();

        run_connection(Box::new(transport), "ws://x/".into(), event_tx, command_rx).await;

        assert_eq!(
            collect(event_rx).await,
            vec![
                ConnectionEvent::Open,
                ConnectionEvent::Message("hello".to_string()),
                ConnectionEvent::Message("world".to_string()),
                ConnectionEvent::closed(1001, "going away"),
            ]
        );
    }

    #[tokio::test]
    async fn test_transport_error_emits_error_then_closed() {
        let mut transport = MockTransport::new();
        transport
            .inbound
            .push_back(Err(ConnectionError::websocket("reset")));
        let (event_tx, event_rx) = mpsc::unbounded_channel();
        let (_command_tx, command_rx) = mpsc::unbounded_channel();

        run_connection(Box::new(transport), "ws://x/".into(), event_tx, command_rx).await;

        let events = collect(event_rx).await;
        assert_eq!(events[0], ConnectionEvent::Open);
        assert_eq!(events[1], ConnectionEvent::error("websocket error: reset"));
        assert!(matches!(events[2], ConnectionEvent::Closed { .. }));
    }

    #[tokio::test]
    async fn test_outbound_text_and_client_close() {
        let transport = MockTransport::new();
        let sent = transport.sent.clone();
        let closed = transport.closed.clone();
        let (event_tx, event_rx) = mpsc::unbounded_channel();
        let (command_tx, command_rx) = mpsc::unbounded_channel();

        command_tx
            .send(OutboundCommand::Text("transform".to_string()))
            .unwrap();
        command_tx.send(OutboundCommand::Close).unwrap();

        run_connection(Box::new(transport), "ws://x/".into(), event_tx, command_rx).await;

        assert_eq!(*sent.lock().unwrap(), vec!["transform".to_string()]);
        assert!(*closed.lock().unwrap());
        assert_eq!(
            collect(event_rx).await,
            vec![
                ConnectionEvent::Open,
                ConnectionEvent::closed(CLOSE_NORMAL, "Closed by client"),
            ]
        );
    }

    #[tokio::test]
    async fn test_send_failure_ends_connection() {
        let mut transport = MockTransport::new();
        transport.fail_sends = true;
        let closed = transport.closed.clone();
        let (event_tx, event_rx) = mpsc::unbounded_channel();
        let (command_tx, command_rx) = mpsc::unbounded_channel();

        command_tx
            .send(OutboundCommand::Text("transform".to_string()))
            .unwrap();

        timeout(
            TEST_TIMEOUT,
            run_connection(Box::new(transport), "ws://x/".into(), event_tx, command_rx),
        )
        .await
        .unwrap();

        assert!(*closed.lock().unwrap());
        assert_eq!(
            collect(event_rx).await,
            vec![
                ConnectionEvent::Open,
                ConnectionEvent::error("websocket error: send broke"),
                ConnectionEvent::closed(CLOSE_ABNORMAL, "websocket error: send broke"),
            ]
        );
        drop(command_tx);
    }

    #[tokio::test]
    async fn test_dropped_handle_closes_connection() {
        let transport = MockTransport::new();
        let closed = transport.closed.clone();
        let (event_tx, event_rx) = mpsc::unbounded_channel();
        let (command_tx, command_rx) = mpsc::unbounded_channel::<OutboundCommand>();
        drop(command_tx);

        run_connection(Box::new(transport), "ws://x/".into(), event_tx, command_rx).await;

        assert!(*closed.lock().unwrap());
        assert_eq!(collect(event_rx).await.len(), 2);
    }

    #[tokio::test]
    async fn test_text_frame_reaches_server() {
        let (url, server) = serve_once(|mut ws| async move {
            let frame = ws.next().await.unwrap().unwrap();
            assert_eq!(frame, WsMessage::Text("transform".into()));
        })
        .await;

        let mut conn = connected(&url).await;
        conn.send_text("transform").await.unwrap();

        timeout(TEST_TIMEOUT, server).await.unwrap().unwrap();
    }

    #[tokio::test]
    async fn test_server_close_maps_code_and_reason() {
        let (url, server) = serve_once(|mut ws| async move {
            ws.send(WsMessage::Close(Some(CloseFrame {
                code: CloseCode::Away,
                reason: "bye".into(),
            })))
            .await
            .unwrap();
            while let Some(Ok(_)) = ws.next().await {}
        })
        .await;

        let mut conn = connected(&url).await;
        let first = timeout(TEST_TIMEOUT, conn.receive()).await.unwrap();
        assert!(matches!(
            first,
            Err(ConnectionError::ConnectionClosed { code: 1001, ref reason }) if reason == "bye"
        ));
        assert!(!conn.is_connected());

        // The stream ends once the close handshake completes.
        let second = timeout(TEST_TIMEOUT, conn.receive()).await.unwrap();
        assert!(matches!(
            second,
            Err(ConnectionError::ConnectionClosed { code: CLOSE_ABNORMAL, ref reason })
                if reason == "Stream ended"
        ));

        timeout(TEST_TIMEOUT, server).await.unwrap().unwrap();
    }

    #[tokio::test]
    async fn test_binary_frame_is_decoded_lossily() {
        let (url, server) = serve_once(|mut ws| async move {
            ws.send(WsMessage::Binary(vec![b'h', 0xff, b'i'].into()))
                .await
                .unwrap();
            while let Some(Ok(_)) = ws.next().await {}
        })
        .await;

        let mut conn = connected(&url).await;
        let payload = timeout(TEST_TIMEOUT, conn.receive()).await.unwrap().unwrap();
        assert_eq!(payload.as_deref(), Some("h\u{fffd}i"));

        conn.close().await.unwrap();
        timeout(TEST_TIMEOUT, server).await.unwrap().unwrap();
    }

    #[tokio::test]
    async fn test_ping_is_answered() {
        let (url, server) = serve_once(|mut ws| async move {
            ws.send(WsMessage::Ping(b"beat".to_vec().into()))
                .await
                .unwrap();
            let reply = ws.next().await.unwrap().unwrap();
            assert_eq!(reply, WsMessage::Pong(b"beat".to_vec().into()));
            ws.send(WsMessage::Text("after ping".into())).await.unwrap();
            while let Some(Ok(_)) = ws.next().await {}
        })
        .await;

        let mut conn = connected(&url).await;
        let payload = timeout(TEST_TIMEOUT, conn.receive()).await.unwrap().unwrap();
        assert_eq!(payload.as_deref(), Some("after ping"));

        conn.close().await.unwrap();
        timeout(TEST_TIMEOUT, server).await.unwrap().unwrap();
    }

    #[tokio::test]
    async fn test_driver_over_real_socket() {
        let (url, server) = serve_once(|mut ws| async move {
            ws.send(WsMessage::Text("welcome".into())).await.unwrap();
            let frame = ws.next().await.unwrap().unwrap();
            assert_eq!(frame, WsMessage::Text("transform".into()));
            while let Some(Ok(_)) = ws.next().await {}
        })
        .await;

        let (event_tx, mut event_rx) = mpsc::unbounded_channel();
        let (command_tx, command_rx) = mpsc::unbounded_channel();
        let driver = tokio::spawn(run_connection(
            Box::new(WebSocketConnection::new(TEST_TIMEOUT)),
            url,
            event_tx,
            command_rx,
        ));

        assert_eq!(event_rx.recv().await, Some(ConnectionEvent::Open));
        assert_eq!(
            event_rx.recv().await,
            Some(ConnectionEvent::Message("welcome".to_string()))
        );

        command_tx
            .send(OutboundCommand::Text("transform".to_string()))
            .unwrap();
        command_tx.send(OutboundCommand::Close).unwrap();

        timeout(TEST_TIMEOUT, driver).await.unwrap().unwrap();
        timeout(TEST_TIMEOUT, server).await.unwrap().unwrap();
        assert_eq!(
            collect(event_rx).await,
            vec![ConnectionEvent::closed(CLOSE_NORMAL, "Closed by client")]
        );
    }
}
