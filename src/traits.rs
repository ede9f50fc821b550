// SPDX-License-Identifier: Apache-2.0

use std::net::Ipv6Addr;

use crate::{DhcpError, DhcpV6ClientArchType, DhcpV6Reservation};

/// Boot policy consulted for every Solicit, Request and Information-Request.
///
/// Implementations are shared between concurrent requests and should be
/// internally synchronized.
pub trait DhcpV6BootConfig {
    /// Boot file URL for the client identified by `id` (link-layer address or
    /// DUID payload). An error means no boot policy matched and no reply
    /// will be sent.
    fn boot_url(
        &self,
        id: &[u8],
        arch: DhcpV6ClientArchType,
    ) -> Result<String, DhcpError>;

    /// Server preference placed in Advertise, `None` to omit the option.
    fn preference(&self) -> Option<u8>;

    fn recursive_dns(&self) -> Vec<Ipv6Addr>;
}

/// Address allocation backend.
///
/// Concurrent reservations of the same IAID must not both succeed with
/// conflicting addresses.
pub trait DhcpV6AddressPool {
    fn reserve_addresses(
        &self,
        client_id: &[u8],
        iaids: &[Vec<u8>],
    ) -> DhcpV6Reservation;

    fn release_addresses(
        &self,
        client_id: &[u8],
        iaids: &[Vec<u8>],
    ) -> Result<(), DhcpError>;
}
