// SPDX-License-Identifier: Apache-2.0

use std::net::Ipv6Addr;

use super::builder::DhcpV6PacketBuilder;
use crate::{
    DhcpError, DhcpV6ClientArchType, DhcpV6IaNaPayload,
    DhcpV6IdentityAssociation, DhcpV6Message, DhcpV6MessageType,
    DhcpV6OptionCode, DhcpV6OptionDnsServers, DhcpV6OptionIaAddr,
    DhcpV6OptionIaNa, DhcpV6OptionStatus, DhcpV6OptionStatusCode,
    DhcpV6OptionVendorClass, DhcpV6Options,
};

const RELEASE_RECEIVED: &str = "Release received.";
const NO_ADDRS_AVAIL: &str = "No addresses available";

// The gen_* functions only assemble options, no collaborator is invoked.
// Option order: client ID, IA_NA, server ID, vendor class, boot file URL,
// preference, DNS servers.
// Assemblers with nested options fail with ErrorKind::InvalidArgument when a
// nested option does not fit its 16 bits length field.
impl DhcpV6PacketBuilder {
    #[allow(clippy::too_many_arguments)]
    pub fn gen_advertise(
        &self,
        xid: [u8; 3],
        client_id: &[u8],
        arch: DhcpV6ClientArchType,
        associations: &[DhcpV6IdentityAssociation],
        boot_url: &str,
        preference: Option<u8>,
        dns_servers: &[Ipv6Addr],
    ) -> Result<DhcpV6Message, DhcpError> {
        let mut opts = DhcpV6Options::new();
        opts.add_raw(DhcpV6OptionCode::ClientId, client_id.to_vec());
        self.add_ia_with_addrs(&mut opts, associations)?;
        self.add_server_info(&mut opts, arch, boot_url)?;
        if let Some(preference) = preference {
            opts.add_raw(DhcpV6OptionCode::Preference, vec![preference]);
        }
        opts.add(DhcpV6OptionDnsServers::new(dns_servers).to_raw_option());

        Ok(DhcpV6Message::new(DhcpV6MessageType::Advertise, xid, opts))
    }

    /// Reply to Request. `ias_without_addrs` get an IA_NA holding
    /// NoAddrsAvail status with the message of `error`.
    #[allow(clippy::too_many_arguments)]
    pub fn gen_reply(
        &self,
        xid: [u8; 3],
        client_id: &[u8],
        arch: DhcpV6ClientArchType,
        associations: &[DhcpV6IdentityAssociation],
        ias_without_addrs: &[Vec<u8>],
        boot_url: &str,
        dns_servers: &[Ipv6Addr],
        error: Option<&DhcpError>,
    ) -> Result<DhcpV6Message, DhcpError> {
        let mut opts = DhcpV6Options::new();
        opts.add_raw(DhcpV6OptionCode::ClientId, client_id.to_vec());
        self.add_ia_with_addrs(&mut opts, associations)?;

        let status = DhcpV6OptionStatus::new(
            DhcpV6OptionStatusCode::NoAddrsAvail,
            error.map(|e| e.msg()).unwrap_or(NO_ADDRS_AVAIL),
        );
        for iaid in ias_without_addrs {
            opts.add(
                DhcpV6OptionIaNa::new(
                    iaid,
                    self.timer.t1_sec,
                    self.timer.t2_sec,
                    DhcpV6IaNaPayload::Status(status.clone()),
                )
                .to_raw_option()?,
            );
        }
        self.add_server_info(&mut opts, arch, boot_url)?;
        opts.add(DhcpV6OptionDnsServers::new(dns_servers).to_raw_option());

        Ok(DhcpV6Message::new(DhcpV6MessageType::Reply, xid, opts))
    }

    pub fn gen_information_request_reply(
        &self,
        xid: [u8; 3],
        client_id: &[u8],
        arch: DhcpV6ClientArchType,
        boot_url: &str,
        dns_servers: &[Ipv6Addr],
    ) -> Result<DhcpV6Message, DhcpError> {
        let mut opts = DhcpV6Options::new();
        opts.add_raw(DhcpV6OptionCode::ClientId, client_id.to_vec());
        self.add_server_info(&mut opts, arch, boot_url)?;
        opts.add(DhcpV6OptionDnsServers::new(dns_servers).to_raw_option());

        Ok(DhcpV6Message::new(DhcpV6MessageType::Reply, xid, opts))
    }

    pub fn gen_release_reply(
        &self,
        xid: [u8; 3],
        client_id: &[u8],
    ) -> DhcpV6Message {
        let mut opts = DhcpV6Options::new();
        opts.add_raw(DhcpV6OptionCode::ClientId, client_id.to_vec());
        opts.add_raw(DhcpV6OptionCode::ServerId, self.server_duid.clone());
        opts.add(
            DhcpV6OptionStatus::new(
                DhcpV6OptionStatusCode::Success,
                RELEASE_RECEIVED,
            )
            .to_raw_option(),
        );

        DhcpV6Message::new(DhcpV6MessageType::Reply, xid, opts)
    }

    pub fn gen_advertise_no_addrs(
        &self,
        xid: [u8; 3],
        client_id: &[u8],
        error: &DhcpError,
    ) -> DhcpV6Message {
        let mut opts = DhcpV6Options::new();
        opts.add_raw(DhcpV6OptionCode::ClientId, client_id.to_vec());
        opts.add_raw(DhcpV6OptionCode::ServerId, self.server_duid.clone());
        opts.add(
            DhcpV6OptionStatus::new(
                DhcpV6OptionStatusCode::NoAddrsAvail,
                error.msg(),
            )
            .to_raw_option(),
        );

        DhcpV6Message::new(DhcpV6MessageType::Advertise, xid, opts)
    }

    fn add_ia_with_addrs(
        &self,
        opts: &mut DhcpV6Options,
        associations: &[DhcpV6IdentityAssociation],
    ) -> Result<(), DhcpError> {
        for association in associations {
            opts.add(
                DhcpV6OptionIaNa::new(
                    &association.iaid,
                    self.timer.t1_sec,
                    self.timer.t2_sec,
                    DhcpV6IaNaPayload::Address(DhcpV6OptionIaAddr::new(
                        association.address,
                        self.preferred_time_sec,
                        self.valid_time_sec,
                    )),
                )
                .to_raw_option()?,
            );
        }
        Ok(())
    }

    // Server ID, optional HTTPClient vendor class and boot file URL.
    fn add_server_info(
        &self,
        opts: &mut DhcpV6Options,
        arch: DhcpV6ClientArchType,
        boot_url: &str,
    ) -> Result<(), DhcpError> {
        opts.add_raw(DhcpV6OptionCode::ServerId, self.server_duid.clone());
        if arch == DhcpV6ClientArchType::X64UefiHttp {
            opts.add(DhcpV6OptionVendorClass::http_client().to_raw_option()?);
        }
        opts.add_raw(
            DhcpV6OptionCode::BootfileUrl,
            boot_url.as_bytes().to_vec(),
        );
        Ok(())
    }
}
