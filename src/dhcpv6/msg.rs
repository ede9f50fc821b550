// SPDX-License-Identifier: Apache-2.0

use crate::{
    buffer::{Buffer, BufferMut},
    DhcpError, DhcpV6Options, ErrorContext,
};

const SOLICIT: u8 = 1;
const ADVERTISE: u8 = 2;
const REQUEST: u8 = 3;
const CONFIRM: u8 = 4;
const RENEW: u8 = 5;
const REBIND: u8 = 6;
const REPLY: u8 = 7;
const RELEASE: u8 = 8;
const DECLINE: u8 = 9;
const RECONFIGURE: u8 = 10;
const INFORMATION_REQUEST: u8 = 11;

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum DhcpV6MessageType {
    Solicit,
    Advertise,
    Request,
    Confirm,
    Renew,
    Rebind,
    Reply,
    Release,
    Decline,
    Reconfigure,
    InformationRequest,
    Other(u8),
}

impl Default for DhcpV6MessageType {
    fn default() -> Self {
        Self::Other(0)
    }
}

impl From<DhcpV6MessageType> for u8 {
    fn from(v: DhcpV6MessageType) -> u8 {
        match v {
            DhcpV6MessageType::Solicit => SOLICIT,
            DhcpV6MessageType::Advertise => ADVERTISE,
            DhcpV6MessageType::Request => REQUEST,
            DhcpV6MessageType::Confirm => CONFIRM,
            DhcpV6MessageType::Renew => RENEW,
            DhcpV6MessageType::Rebind => REBIND,
            DhcpV6MessageType::Reply => REPLY,
            DhcpV6MessageType::Release => RELEASE,
            DhcpV6MessageType::Decline => DECLINE,
            DhcpV6MessageType::Reconfigure => RECONFIGURE,
            DhcpV6MessageType::InformationRequest => INFORMATION_REQUEST,
            DhcpV6MessageType::Other(d) => d,
        }
    }
}

impl From<u8> for DhcpV6MessageType {
    fn from(d: u8) -> Self {
        match d {
            SOLICIT => Self::Solicit,
            ADVERTISE => Self::Advertise,
            REQUEST => Self::Request,
            CONFIRM => Self::Confirm,
            RENEW => Self::Renew,
            REBIND => Self::Rebind,
            REPLY => Self::Reply,
            RELEASE => Self::Release,
            DECLINE => Self::Decline,
            RECONFIGURE => Self::Reconfigure,
            INFORMATION_REQUEST => Self::InformationRequest,
            _ => Self::Other(d),
        }
    }
}

impl std::fmt::Display for DhcpV6MessageType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Solicit => write!(f, "solicit"),
            Self::Advertise => write!(f, "advertise"),
            Self::Request => write!(f, "request"),
            Self::Confirm => write!(f, "confirm"),
            Self::Renew => write!(f, "renew"),
            Self::Rebind => write!(f, "rebind"),
            Self::Reply => write!(f, "reply"),
            Self::Release => write!(f, "release"),
            Self::Decline => write!(f, "decline"),
            Self::Reconfigure => write!(f, "reconfigure"),
            Self::InformationRequest => write!(f, "information-request"),
            Self::Other(d) => write!(f, "unknown({d})"),
        }
    }
}

/// DHCPv6 client/server message (RFC 8415 section 8)
#[derive(Debug, PartialEq, Eq, Clone, Default)]
#[non_exhaustive]
pub struct DhcpV6Message {
    pub msg_type: DhcpV6MessageType,
    /// Transaction ID, echoed back unchanged in the response.
    pub xid: [u8; 3],
    pub options: DhcpV6Options,
}

impl DhcpV6Message {
    pub fn new(
        msg_type: DhcpV6MessageType,
        xid: [u8; 3],
        options: DhcpV6Options,
    ) -> Self {
        Self {
            msg_type,
            xid,
            options,
        }
    }

    pub fn parse(payload: &[u8]) -> Result<Self, DhcpError> {
        let mut buf = Buffer::new(payload);
        let msg_type: DhcpV6MessageType = buf
            .get_u8()
            .context("Invalid DHCPv6 message type")?
            .into();
        let raw_xid = buf
            .get_bytes(3)
            .context("Invalid DHCPv6 transaction ID")?;
        let xid = [raw_xid[0], raw_xid[1], raw_xid[2]];
        let options = DhcpV6Options::parse(&mut buf)
            .context(&format!("Invalid DHCPv6 {msg_type} message"))?;
        Ok(Self {
            msg_type,
            xid,
            options,
        })
    }

    /// Encode the message. Fails with [crate::ErrorKind::InvalidArgument]
    /// when any option data exceeds 65535 bytes.
    pub fn emit(&self) -> Result<Vec<u8>, DhcpError> {
        let mut buf = BufferMut::with_capacity(512);
        buf.write_u8(self.msg_type.into());
        buf.write_bytes(&self.xid);
        self.options.emit(&mut buf).context(&format!(
            "Failed to emit DHCPv6 {} message",
            self.msg_type
        ))?;
        Ok(buf.data)
    }
}
