// SPDX-License-Identifier: Apache-2.0

use std::{
    net::{Ipv6Addr, SocketAddr},
    sync::Arc,
};

use tokio::net::UdpSocket;

use crate::{
    DhcpError, DhcpV6AddressPool, DhcpV6BootConfig, DhcpV6Message,
    DhcpV6PacketBuilder, DhcpV6Response, DhcpV6ServerConfig, ErrorKind,
};

/// RFC 8415: All_DHCP_Relay_Agents_and_Servers
const ALL_DHCP_RELAY_AGENTS_AND_SERVERS: Ipv6Addr =
    Ipv6Addr::new(0xff02, 0, 0, 0, 0, 0, 1, 2);

// Largest payload the 16 bits UDP length field allows, so no datagram is
// truncated on receive.
const MAX_UDP_PAYLOAD: usize = 65535;

/// UDP front end answering DHCPv6 requests with `DhcpV6PacketBuilder`.
///
/// Datagrams are handled one at a time in the order received.
#[derive(Debug)]
pub struct DhcpV6Server<B, P> {
    builder: DhcpV6PacketBuilder,
    boot_config: Arc<B>,
    address_pool: Arc<P>,
    socket: UdpSocket,
}

impl<B, P> DhcpV6Server<B, P>
where
    B: DhcpV6BootConfig,
    P: DhcpV6AddressPool,
{
    pub async fn new(
        config: &DhcpV6ServerConfig,
        boot_config: Arc<B>,
        address_pool: Arc<P>,
    ) -> Result<Self, DhcpError> {
        let builder = DhcpV6PacketBuilder::new(config)?;
        log::debug!("Creating UDP socket on {}", config.listen_addr);
        let socket = UdpSocket::bind(config.listen_addr).await?;
        if let SocketAddr::V6(addr) = config.listen_addr {
            if addr.ip().is_unspecified() {
                socket.join_multicast_v6(
                    &ALL_DHCP_RELAY_AGENTS_AND_SERVERS,
                    addr.scope_id(),
                )?;
            }
        }
        log::debug!("Finished UDP socket creation");
        Ok(Self {
            builder,
            boot_config,
            address_pool,
            socket,
        })
    }

    pub fn local_addr(&self) -> Result<SocketAddr, DhcpError> {
        Ok(self.socket.local_addr()?)
    }

    /// Serve until the socket becomes unusable.
    ///
    /// Failing to answer a single client is logged and does not stop the
    /// loop.
    pub async fn run(&self) -> Result<(), DhcpError> {
        let mut buffer = vec![0u8; MAX_UDP_PAYLOAD];
        loop {
            let (received, src) = match self.recv(&mut buffer).await {
                Ok(Some(v)) => v,
                Ok(None) => continue,
                Err(e) => {
                    log::error!("DHCPv6 server socket failed: {e}");
                    return Err(e);
                }
            };
            if let Err(e) = self.reply_to(&buffer[..received], src).await {
                log::warn!("Failed to reply DHCPv6 client {src}: {e}");
            }
        }
    }

    /// Receive one datagram and send the reply if any.
    pub async fn process_one(&self) -> Result<(), DhcpError> {
        let mut buffer = vec![0u8; MAX_UDP_PAYLOAD];
        match self.recv(&mut buffer).await? {
            Some((received, src)) => {
                self.reply_to(&buffer[..received], src).await
            }
            None => Ok(()),
        }
    }

    // `None` on errors the socket survives, like ICMP errors reported by
    // the kernel for an earlier reply.
    async fn recv(
        &self,
        buffer: &mut [u8],
    ) -> Result<Option<(usize, SocketAddr)>, DhcpError> {
        match self.socket.recv_from(buffer).await {
            Ok((received, src)) => {
                log::trace!(
                    "Received packet from {src}: {:?}",
                    &buffer[..received]
                );
                Ok(Some((received, src)))
            }
            Err(e) if is_transient_io_error(&e) => {
                log::warn!("Ignoring DHCPv6 socket receive error: {e}");
                Ok(None)
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn reply_to(
        &self,
        payload: &[u8],
        dst: SocketAddr,
    ) -> Result<(), DhcpError> {
        if let Some(reply) = self.handle_packet(payload) {
            log::trace!("Sending reply to {dst}: {reply:?}");
            self.socket.send_to(&reply, dst).await?;
        }
        Ok(())
    }

    /// Encoded response to `payload`, `None` when nothing should be sent.
    pub fn handle_packet(&self, payload: &[u8]) -> Option<Vec<u8>> {
        let request = match DhcpV6Message::parse(payload) {
            Ok(m) => m,
            Err(e) => {
                log::debug!("Dropping invalid DHCPv6 packet: {e}");
                return None;
            }
        };
        log::debug!(
            "Got DHCPv6 {} message, xid {:?}",
            request.msg_type,
            request.xid
        );
        match self.builder.build_response(
            &request,
            self.boot_config.as_ref(),
            self.address_pool.as_ref(),
        ) {
            Ok(DhcpV6Response::Ignored) => None,
            Ok(response) => match response.message().map(|m| m.emit()) {
                Some(Ok(reply)) => Some(reply),
                Some(Err(e)) => {
                    log::warn!(
                        "Dropping reply to DHCPv6 {} message: {e}",
                        request.msg_type
                    );
                    None
                }
                None => None,
            },
            Err(e) => {
                if e.kind() == ErrorKind::InvalidDhcpMessage {
                    log::debug!("Dropping DHCPv6 {}: {e}", request.msg_type);
                } else {
                    log::error!(
                        "No reply for DHCPv6 {} message: {e}",
                        request.msg_type
                    );
                }
                None
            }
        }
    }
}

fn is_transient_io_error(e: &std::io::Error) -> bool {
    matches!(
        e.kind(),
        std::io::ErrorKind::ConnectionRefused
            | std::io::ErrorKind::ConnectionReset
            | std::io::ErrorKind::Interrupted
    )
}
