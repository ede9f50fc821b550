// SPDX-License-Identifier: Apache-2.0

use crate::{
    buffer::{Buffer, BufferMut},
    DhcpError, DhcpV6OptionCode, DhcpV6RawOption, ErrorContext, ErrorKind,
};

#[derive(Debug, PartialEq, Eq, Clone)]
pub struct DhcpV6OptionStatus {
    pub status: DhcpV6OptionStatusCode,
    pub message: String,
}

impl DhcpV6OptionStatus {
    pub fn new(status: DhcpV6OptionStatusCode, message: &str) -> Self {
        Self {
            status,
            message: message.to_string(),
        }
    }

    pub(crate) const fn code() -> DhcpV6OptionCode {
        DhcpV6OptionCode::StatusCode
    }

    /// Parse the option data (without code and length) of
    /// `OPTION_STATUS_CODE`.
    pub fn parse_data(data: &[u8]) -> Result<Self, DhcpError> {
        let mut buf = Buffer::new(data);
        let status = buf
            .get_u16_be()
            .context("Invalid DHCPv6 option OPTION_STATUS_CODE status-code")?
            .into();
        let remain_len = buf.remain_len();
        Ok(Self {
            status,
            message: buf
                .get_string_without_null(remain_len)
                .context("Invalid DHCPv6 option OPTION_STATUS_CODE message")?,
        })
    }

    pub(crate) fn parse(buf: &mut Buffer) -> Result<Self, DhcpError> {
        let code = buf.get_u16_be().context("Invalid DHCPv6 option code")?;
        if code != Self::code().into() {
            return Err(DhcpError::new(
                ErrorKind::InvalidDhcpMessage,
                format!(
                    "Expecting DHCPv6 option {} code {}, got {}",
                    Self::code(),
                    u16::from(Self::code()),
                    code
                ),
            ));
        }
        let len: usize = buf
            .get_u16_be()
            .context("Invalid DHCPv6 option len")?
            .into();
        let raw = buf
            .get_bytes(len)
            .context("Invalid DHCPv6 option OPTION_STATUS_CODE")?;
        Self::parse_data(raw)
    }

    pub(crate) fn emit_data(&self, buf: &mut BufferMut) {
        buf.write_u16_be(self.status.into());
        buf.write_string_without_null(&self.message);
    }

    pub(crate) fn emit(&self, buf: &mut BufferMut) -> Result<(), DhcpError> {
        let mut value_buf = BufferMut::with_capacity(self.message.len() + 2);
        self.emit_data(&mut value_buf);
        buf.write_tlv(Self::code().into(), &value_buf.data)
    }

    pub fn to_raw_option(&self) -> DhcpV6RawOption {
        let mut value_buf = BufferMut::with_capacity(self.message.len() + 2);
        self.emit_data(&mut value_buf);
        DhcpV6RawOption::new(Self::code(), value_buf.data)
    }
}

const STATUS_CODE_SUCCESS: u16 = 0;
const STATUS_CODE_UNSPEC_FAIL: u16 = 1;
const STATUS_CODE_NO_ADDRS_AVAIL: u16 = 2;
const STATUS_CODE_NO_BINDING: u16 = 3;
const STATUS_CODE_NOT_ON_LINK: u16 = 4;
const STATUS_CODE_USE_MULTICAST: u16 = 5;

#[derive(Debug, PartialEq, Eq, Clone, Copy, PartialOrd, Ord, Hash)]
pub enum DhcpV6OptionStatusCode {
    Success,
    UnspecFail,
    NoAddrsAvail,
    NoBinding,
    NotOnLink,
    UseMulticast,
    Other(u16),
}

impl std::fmt::Display for DhcpV6OptionStatusCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Success => write!(f, "success"),
            Self::UnspecFail => write!(f, "unspec_fail"),
            Self::NoAddrsAvail => write!(f, "no_addrs_avail"),
            Self::NoBinding => write!(f, "no_binding"),
            Self::NotOnLink => write!(f, "not_on_link"),
            Self::UseMulticast => write!(f, "use_multicast"),
            Self::Other(d) => write!(f, "other({d})"),
        }
    }
}

impl From<DhcpV6OptionStatusCode> for u16 {
    fn from(v: DhcpV6OptionStatusCode) -> u16 {
        match v {
            DhcpV6OptionStatusCode::Success => STATUS_CODE_SUCCESS,
            DhcpV6OptionStatusCode::UnspecFail => STATUS_CODE_UNSPEC_FAIL,
            DhcpV6OptionStatusCode::NoAddrsAvail => STATUS_CODE_NO_ADDRS_AVAIL,
            DhcpV6OptionStatusCode::NoBinding => STATUS_CODE_NO_BINDING,
            DhcpV6OptionStatusCode::NotOnLink => STATUS_CODE_NOT_ON_LINK,
            DhcpV6OptionStatusCode::UseMulticast => STATUS_CODE_USE_MULTICAST,
            DhcpV6OptionStatusCode::Other(d) => d,
        }
    }
}

impl From<u16> for DhcpV6OptionStatusCode {
    fn from(d: u16) -> Self {
        match d {
            STATUS_CODE_SUCCESS => Self::Success,
            STATUS_CODE_UNSPEC_FAIL => Self::UnspecFail,
            STATUS_CODE_NO_ADDRS_AVAIL => Self::NoAddrsAvail,
            STATUS_CODE_NO_BINDING => Self::NoBinding,
            STATUS_CODE_NOT_ON_LINK => Self::NotOnLink,
            STATUS_CODE_USE_MULTICAST => Self::UseMulticast,
            _ => Self::Other(d),
        }
    }
}
