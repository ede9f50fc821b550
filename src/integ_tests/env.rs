// SPDX-License-Identifier: Apache-2.0

use std::{net::Ipv6Addr, sync::Mutex};

use crate::{
    DhcpError, DhcpV6AddressPool, DhcpV6BootConfig, DhcpV6ClientArchType,
    DhcpV6Duid, DhcpV6DuidLinkLayerAddr, DhcpV6IdentityAssociation,
    DhcpV6Message, DhcpV6MessageType, DhcpV6OptionCode, DhcpV6Options,
    DhcpV6PacketBuilder, DhcpV6Reservation, DhcpV6ServerConfig, ErrorKind,
};

pub(crate) const TEST_XID: [u8; 3] = [0xab, 0xcd, 0xef];
pub(crate) const TEST_CLIENT_MAC: [u8; 6] =
    [0x52, 0x54, 0x00, 0x12, 0x34, 0x56];
pub(crate) const OTHER_CLIENT_MAC: [u8; 6] =
    [0x52, 0x54, 0x00, 0x65, 0x43, 0x21];
pub(crate) const TEST_SERVER_DUID: &[u8] =
    &[0x00, 0x03, 0x00, 0x01, 0x52, 0x54, 0x00, 0xaa, 0xbb, 0xcc];
pub(crate) const TEST_BOOT_URL: &str = "http://[2001:db8::10]/ipxe.efi";
pub(crate) const TEST_PREFERRED_TIME_SEC: u32 = 3600;
pub(crate) const TEST_VALID_TIME_SEC: u32 = 7200;
pub(crate) const IAID_A: [u8; 4] = [0x00, 0x00, 0x00, 0x0a];
pub(crate) const IAID_B: [u8; 4] = [0x00, 0x00, 0x00, 0x0b];
pub(crate) const ADDR_A: Ipv6Addr =
    Ipv6Addr::new(0x2001, 0xdb8, 0, 0, 0, 0, 0, 1);
pub(crate) const DNS_SRV: Ipv6Addr =
    Ipv6Addr::new(0x2001, 0xdb8, 0, 0, 0, 0, 0, 0x53);

pub(crate) fn init_log() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub(crate) fn test_builder() -> DhcpV6PacketBuilder {
    DhcpV6PacketBuilder::new(&test_config()).unwrap()
}

pub(crate) fn test_config() -> DhcpV6ServerConfig {
    DhcpV6ServerConfig::new(
        DhcpV6Duid::Raw(TEST_SERVER_DUID.to_vec()),
        TEST_PREFERRED_TIME_SEC,
        TEST_VALID_TIME_SEC,
    )
}

pub(crate) fn test_client_id() -> Vec<u8> {
    client_id_of(&TEST_CLIENT_MAC)
}

/// DUID-LL of Ethernet `mac`
pub(crate) fn client_id_of(mac: &[u8]) -> Vec<u8> {
    DhcpV6Duid::LinkLayerAddress(DhcpV6DuidLinkLayerAddr::new(1, mac))
        .to_vec()
}

pub(crate) fn gen_request(
    msg_type: DhcpV6MessageType,
    iaids: &[&[u8]],
    arch: DhcpV6ClientArchType,
) -> DhcpV6Message {
    gen_request_of(msg_type, &TEST_CLIENT_MAC, TEST_XID, iaids, arch)
}

pub(crate) fn gen_request_of(
    msg_type: DhcpV6MessageType,
    mac: &[u8],
    xid: [u8; 3],
    iaids: &[&[u8]],
    arch: DhcpV6ClientArchType,
) -> DhcpV6Message {
    let mut opts = DhcpV6Options::new();
    opts.add_raw(DhcpV6OptionCode::ClientId, client_id_of(mac));
    for iaid in iaids {
        let mut ia_na = iaid.to_vec();
        // T1 and T2 set to 0 by client
        ia_na.extend_from_slice(&[0u8; 8]);
        opts.add_raw(DhcpV6OptionCode::IANA, ia_na);
    }
    opts.add_raw(
        DhcpV6OptionCode::ClientArchType,
        u16::from(arch).to_be_bytes().to_vec(),
    );
    DhcpV6Message::new(msg_type, xid, opts)
}

/// Boot configuration knowing `TEST_CLIENT_MAC` plus the clients listed in
/// `boot_urls`.
#[derive(Debug, Default)]
pub(crate) struct TestBootConfig {
    pub(crate) preference: Option<u8>,
    pub(crate) boot_urls: Vec<(Vec<u8>, String)>,
    /// Used instead of `DNS_SRV` when not empty
    pub(crate) dns_servers: Vec<Ipv6Addr>,
}

impl DhcpV6BootConfig for TestBootConfig {
    fn boot_url(
        &self,
        id: &[u8],
        _arch: DhcpV6ClientArchType,
    ) -> Result<String, DhcpError> {
        if id == TEST_CLIENT_MAC.as_slice() {
            Ok(TEST_BOOT_URL.to_string())
        } else if let Some((_, url)) =
            self.boot_urls.iter().find(|(mac, _)| mac.as_slice() == id)
        {
            Ok(url.clone())
        } else {
            Err(DhcpError::new(
                ErrorKind::NoBootConfig,
                format!("No boot configuration for {id:?}"),
            ))
        }
    }

    fn preference(&self) -> Option<u8> {
        self.preference
    }

    fn recursive_dns(&self) -> Vec<Ipv6Addr> {
        if self.dns_servers.is_empty() {
            vec![DNS_SRV]
        } else {
            self.dns_servers.clone()
        }
    }
}

/// Address pool granting fixed addresses per IAID and failing the rest.
#[derive(Debug, Default)]
pub(crate) struct TestAddressPool {
    pub(crate) leases: Vec<(Vec<u8>, Ipv6Addr)>,
    pub(crate) fail_release: bool,
    pub(crate) released: Mutex<Vec<Vec<u8>>>,
}

impl TestAddressPool {
    pub(crate) fn new(leases: &[(&[u8], Ipv6Addr)]) -> Self {
        Self {
            leases: leases.iter().map(|(i, a)| (i.to_vec(), *a)).collect(),
            ..Default::default()
        }
    }
}

impl DhcpV6AddressPool for TestAddressPool {
    fn reserve_addresses(
        &self,
        _client_id: &[u8],
        iaids: &[Vec<u8>],
    ) -> DhcpV6Reservation {
        let mut associations = Vec::new();
        for iaid in iaids {
            if let Some((_, addr)) =
                self.leases.iter().find(|(i, _)| i == iaid)
            {
                associations.push(DhcpV6IdentityAssociation::new(iaid, *addr));
            }
        }
        let error = if associations.len() == iaids.len() {
            None
        } else {
            Some(DhcpError::new(
                ErrorKind::NoAddrAvailable,
                "pool exhausted".to_string(),
            ))
        };
        DhcpV6Reservation::new(associations, error)
    }

    fn release_addresses(
        &self,
        _client_id: &[u8],
        iaids: &[Vec<u8>],
    ) -> Result<(), DhcpError> {
        if let Ok(mut released) = self.released.lock() {
            released.extend_from_slice(iaids);
        }
        if self.fail_release {
            Err(DhcpError::new(
                ErrorKind::Bug,
                "lease database unavailable".to_string(),
            ))
        } else {
            Ok(())
        }
    }
}
