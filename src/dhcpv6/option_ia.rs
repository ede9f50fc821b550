// SPDX-License-Identifier: Apache-2.0

use std::net::Ipv6Addr;

use crate::{
    buffer::{Buffer, BufferMut},
    DhcpError, DhcpV6OptionCode, DhcpV6OptionStatus, DhcpV6RawOption,
    ErrorContext, ErrorKind,
};

const IAID_LEN: usize = 4;

/// Option nested in `OPTION_IA_NA`: either the leased address or the status
/// explaining why no address was assigned.
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum DhcpV6IaNaPayload {
    Address(DhcpV6OptionIaAddr),
    Status(DhcpV6OptionStatus),
}

#[derive(Debug, PartialEq, Eq, Clone)]
#[non_exhaustive]
pub struct DhcpV6OptionIaNa {
    /// Opaque IAID copied from the client request.
    pub iaid: Vec<u8>,
    pub t1_sec: u32,
    pub t2_sec: u32,
    pub payload: DhcpV6IaNaPayload,
}

impl DhcpV6OptionIaNa {
    pub fn new(
        iaid: &[u8],
        t1_sec: u32,
        t2_sec: u32,
        payload: DhcpV6IaNaPayload,
    ) -> Self {
        Self {
            iaid: iaid.to_vec(),
            t1_sec,
            t2_sec,
            payload,
        }
    }

    /// Parse the option data (without code and length) of `OPTION_IA_NA`.
    pub fn parse_data(data: &[u8]) -> Result<Self, DhcpError> {
        let mut buf = Buffer::new(data);
        let iaid = buf
            .get_bytes(IAID_LEN)
            .context("Invalid DHCPv6 option OPTION_IA_NA IAID")?
            .to_vec();
        let t1_sec = buf
            .get_u32_be()
            .context("Invalid DHCPv6 option OPTION_IA_NA T1")?;
        let t2_sec = buf
            .get_u32_be()
            .context("Invalid DHCPv6 option OPTION_IA_NA T2")?;
        let code: DhcpV6OptionCode = buf
            .peek_u16_be()
            .context("Invalid DHCPv6 option OPTION_IA_NA without IA option")?
            .into();
        let payload = match code {
            DhcpV6OptionCode::IAAddr => {
                DhcpV6IaNaPayload::Address(DhcpV6OptionIaAddr::parse(&mut buf)?)
            }
            DhcpV6OptionCode::StatusCode => {
                DhcpV6IaNaPayload::Status(DhcpV6OptionStatus::parse(&mut buf)?)
            }
            _ => {
                return Err(DhcpError::new(
                    ErrorKind::InvalidDhcpMessage,
                    format!(
                        "Expecting OPTION_IAADDR or OPTION_STATUS_CODE in \
                         OPTION_IA_NA, but got {code}"
                    ),
                ));
            }
        };
        Ok(Self {
            iaid,
            t1_sec,
            t2_sec,
            payload,
        })
    }

    pub(crate) fn emit_data(
        &self,
        buf: &mut BufferMut,
    ) -> Result<(), DhcpError> {
        buf.write_bytes(&self.iaid);
        buf.write_u32_be(self.t1_sec);
        buf.write_u32_be(self.t2_sec);
        let ret = match &self.payload {
            DhcpV6IaNaPayload::Address(a) => a.emit(buf),
            DhcpV6IaNaPayload::Status(s) => s.emit(buf),
        };
        ret.context("Failed to emit DHCPv6 option OPTION_IA_NA")
    }

    pub fn to_raw_option(&self) -> Result<DhcpV6RawOption, DhcpError> {
        let mut value_buf = BufferMut::with_capacity(40);
        self.emit_data(&mut value_buf)?;
        Ok(DhcpV6RawOption::new(DhcpV6OptionCode::IANA, value_buf.data))
    }
}

#[derive(Debug, PartialEq, Eq, Clone)]
#[non_exhaustive]
pub struct DhcpV6OptionIaAddr {
    pub addr: Ipv6Addr,
    pub preferred_time_sec: u32,
    pub valid_time_sec: u32,
}

impl Default for DhcpV6OptionIaAddr {
    fn default() -> Self {
        Self {
            addr: Ipv6Addr::UNSPECIFIED,
            preferred_time_sec: 0,
            valid_time_sec: 0,
        }
    }
}

impl DhcpV6OptionIaAddr {
    pub fn new(
        addr: Ipv6Addr,
        preferred_time_sec: u32,
        valid_time_sec: u32,
    ) -> Self {
        Self {
            addr,
            preferred_time_sec,
            valid_time_sec,
        }
    }

    pub(crate) fn parse(buf: &mut Buffer) -> Result<Self, DhcpError> {
        let code = buf
            .get_u16_be()
            .context("Invalid DHCPv6 option OPTION_IAADDR code")?;
        if code != DhcpV6OptionCode::IAAddr.into() {
            return Err(DhcpError::new(
                ErrorKind::InvalidDhcpMessage,
                format!(
                    "Expecting OPTION_IAADDR({}), but got {code}",
                    u16::from(DhcpV6OptionCode::IAAddr)
                ),
            ));
        }
        let len: usize = buf
            .get_u16_be()
            .context("Invalid DHCPv6 option OPTION_IAADDR length")?
            .into();
        let raw = buf
            .get_bytes(len)
            .context("Invalid DHCPv6 option OPTION_IAADDR")?;
        let mut buf = Buffer::new(raw);

        Ok(Self {
            addr: buf
                .get_ipv6()
                .context("Invalid DHCPv6 option OPTION_IAADDR address")?,
            preferred_time_sec: buf.get_u32_be().context(
                "Invalid DHCPv6 option OPTION_IAADDR preferred time",
            )?,
            valid_time_sec: buf
                .get_u32_be()
                .context("Invalid DHCPv6 option OPTION_IAADDR valid time")?,
        })
    }

    pub(crate) fn emit(&self, buf: &mut BufferMut) -> Result<(), DhcpError> {
        let mut value_buf = BufferMut::with_capacity(24);
        value_buf.write_ipv6(self.addr);
        value_buf.write_u32_be(self.preferred_time_sec);
        value_buf.write_u32_be(self.valid_time_sec);

        buf.write_tlv(DhcpV6OptionCode::IAAddr.into(), &value_buf.data)
    }
}
