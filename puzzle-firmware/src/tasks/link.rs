// Link Task - TCP-Verbindung zum gekoppelten Gerät
use core::sync::atomic::{AtomicBool, Ordering};

use defmt::{Debug2Format, debug, error, info, warn};
use embassy_futures::select::{Either, select};
use embassy_net::Stack;
use embassy_net::tcp::{self, AcceptError, TcpSocket};
use embassy_time::Duration;
use embedded_io_async::Write;
use puzzle_core::{Command, LINE_END, Link, LinkError, decode_chunk};

use crate::config::{
    LINK_KEEP_ALIVE_SECS, LINK_PORT, LINK_READ_BUFFER_SIZE, LINK_TIMEOUT_SECS, TCP_RX_BUFFER_SIZE,
    TCP_TX_BUFFER_SIZE,
};
use crate::{CommandReceiver, CommandSender};

/// Verbindungs-Status, geteilt zwischen Link Task und Spiel-Loop
pub struct LinkStatus {
    connected: AtomicBool,
    fatal: AtomicBool,
}

impl LinkStatus {
    pub const fn new() -> Self {
        Self {
            connected: AtomicBool::new(false),
            fatal: AtomicBool::new(false),
        }
    }

    /// `true` solange ein Peer verbunden ist
    pub fn is_connected(&self) -> bool {
        self.connected.load(Ordering::Acquire)
    }

    /// `true` wenn der Link-Port nicht nutzbar ist (nur ein Neustart hilft)
    pub fn is_fatal(&self) -> bool {
        self.fatal.load(Ordering::Acquire)
    }

    fn set_connected(&self, connected: bool) {
        self.connected.store(connected, Ordering::Release);
    }

    fn set_fatal(&self) {
        self.fatal.store(true, Ordering::Release);
    }
}

impl Default for LinkStatus {
    fn default() -> Self {
        Self::new()
    }
}

/// `Link` für den Spiel-Loop
///
/// Reicht Kommandos nur an die Queues weiter, die eigentliche
/// Socket-Arbeit macht `link_task`.
pub struct ChannelLink {
    outbound: CommandSender,
    inbound: CommandReceiver,
    status: &'static LinkStatus,
}

impl ChannelLink {
    /// # Parameter
    /// - `outbound`: Spiel → Link Task
    /// - `inbound`: Link Task → Spiel
    /// - `status`: Verbindungs-Status des Link Tasks
    pub fn new(
        outbound: CommandSender,
        inbound: CommandReceiver,
        status: &'static LinkStatus,
    ) -> Self {
        Self {
            outbound,
            inbound,
            status,
        }
    }
}

impl Link for ChannelLink {
    fn send_command(&mut self, command: Command) -> Result<(), LinkError> {
        if !self.status.is_connected() {
            return Err(LinkError::NotConnected);
        }
        self.outbound
            .try_send(command)
            .map_err(|_| LinkError::QueueFull)
    }

    fn poll(&mut self) -> Option<Command> {
        self.inbound.try_receive().ok()
    }

    fn is_connected(&self) -> bool {
        self.status.is_connected()
    }
}

/// Link Task - läuft parallel zum Spiel-Loop
///
/// Dieser Task übernimmt die Verbindung zum Peer:
/// - Wartet auf genau einen Peer am Link-Port
/// - Schreibt ausgehende Kommandos als `TAG\n`
/// - Zerlegt Empfangenes in Kommandos und reicht sie an den Spiel-Loop
/// - Nach Verbindungsende wieder zurück zum Warten
///
/// Ist der Port nicht nutzbar, wird `LinkStatus::is_fatal()` gesetzt und der
/// Task beendet sich; der Spiel-Loop startet dann das Gerät neu.
#[embassy_executor::task]
pub async fn link_task(
    stack: Stack<'static>,
    status: &'static LinkStatus,
    inbound: CommandSender,
    outbound: CommandReceiver,
) {
    let mut rx_buffer = [0u8; TCP_RX_BUFFER_SIZE];
    let mut tx_buffer = [0u8; TCP_TX_BUFFER_SIZE];

    info!("Link: Waiting for network...");
    stack.wait_link_up().await;
    info!("Link: Listening on port {}", LINK_PORT);

    loop {
        let mut socket = TcpSocket::new(stack, &mut rx_buffer, &mut tx_buffer);
        socket.set_timeout(Some(Duration::from_secs(LINK_TIMEOUT_SECS)));
        socket.set_keep_alive(Some(Duration::from_secs(LINK_KEEP_ALIVE_SECS)));

        match socket.accept(LINK_PORT).await {
            Ok(()) => {}
            Err(AcceptError::InvalidPort) => {
                error!("Link: Port {} is unusable, requesting restart", LINK_PORT);
                status.set_fatal();
                return;
            }
            Err(e) => {
                warn!("Link: Accept failed: {}", Debug2Format(&e));
                continue;
            }
        }

        info!(
            "Link: Peer connected from {}",
            Debug2Format(&socket.remote_endpoint())
        );

        // Kommandos aus der Zeit ohne Peer sind veraltet
        while outbound.try_receive().is_ok() {}
        status.set_connected(true);

        match serve_peer(&mut socket, inbound, outbound).await {
            Ok(()) => info!("Link: Peer disconnected"),
            Err(e) => warn!("Link: Connection error: {}", Debug2Format(&e)),
        }

        status.set_connected(false);
        socket.abort();
        let _ = socket.flush().await;
    }
}

/// Bedient eine Verbindung bis der Peer sie schließt oder ein Fehler auftritt
async fn serve_peer(
    socket: &mut TcpSocket<'_>,
    inbound: CommandSender,
    outbound: CommandReceiver,
) -> Result<(), tcp::Error> {
    let mut buffer = [0u8; LINK_READ_BUFFER_SIZE];

    loop {
        let event = select(socket.read(&mut buffer), outbound.receive()).await;

        match event {
            Either::First(Ok(0)) => return Ok(()),
            Either::First(Ok(len)) => deliver(&buffer[..len], inbound),
            Either::First(Err(e)) => return Err(e),
            Either::Second(command) => {
                debug!("Link: Sending {}", command);
                socket.write_all(command.as_str().as_bytes()).await?;
                socket.write_all(LINE_END).await?;
                socket.flush().await?;
            }
        }
    }
}

/// Reicht empfangene Kommandos an den Spiel-Loop weiter
fn deliver(data: &[u8], inbound: CommandSender) {
    for decoded in decode_chunk(data) {
        match decoded {
            Ok(command) => {
                debug!("Link: Received {}", command);
                if inbound.try_send(command).is_err() {
                    warn!("Link: Inbound queue full, dropped {}", command);
                }
            }
            Err(e) => warn!("Link: Ignoring line: {}", e),
        }
    }
}
