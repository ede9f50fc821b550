// SPDX-License-Identifier: Apache-2.0

use crate::{
    buffer::{Buffer, BufferMut},
    DhcpError, DhcpV6ClientArchType, ErrorContext,
};

const OPTION_CLIENTID: u16 = 1;
const OPTION_SERVERID: u16 = 2;
const OPTION_IA_NA: u16 = 3;
const OPTION_IAADDR: u16 = 5;
const OPTION_ORO: u16 = 6;
const OPTION_PREFERENCE: u16 = 7;
const OPTION_ELAPSED_TIME: u16 = 8;
const OPTION_STATUS_CODE: u16 = 13;
const OPTION_VENDOR_CLASS: u16 = 16;
const OPTION_DNS_SERVERS: u16 = 23;
const OPTION_BOOTFILE_URL: u16 = 59;
const OPTION_BOOTFILE_PARAM: u16 = 60;
const OPTION_CLIENT_ARCH_TYPE: u16 = 61;

/// DHCPv6 option code defined by RFC 8415, RFC 3646 and RFC 5970
#[derive(Debug, PartialEq, Eq, Clone, Copy, PartialOrd, Ord, Hash)]
pub enum DhcpV6OptionCode {
    ClientId,
    ServerId,
    IANA,
    IAAddr,
    OptionRequestOption,
    Preference,
    ElapsedTime,
    StatusCode,
    VendorClass,
    DnsServers,
    BootfileUrl,
    BootfileParam,
    ClientArchType,
    Other(u16),
}

impl From<DhcpV6OptionCode> for u16 {
    fn from(v: DhcpV6OptionCode) -> u16 {
        match v {
            DhcpV6OptionCode::ClientId => OPTION_CLIENTID,
            DhcpV6OptionCode::ServerId => OPTION_SERVERID,
            DhcpV6OptionCode::IANA => OPTION_IA_NA,
            DhcpV6OptionCode::IAAddr => OPTION_IAADDR,
            DhcpV6OptionCode::OptionRequestOption => OPTION_ORO,
            DhcpV6OptionCode::Preference => OPTION_PREFERENCE,
            DhcpV6OptionCode::ElapsedTime => OPTION_ELAPSED_TIME,
            DhcpV6OptionCode::StatusCode => OPTION_STATUS_CODE,
            DhcpV6OptionCode::VendorClass => OPTION_VENDOR_CLASS,
            DhcpV6OptionCode::DnsServers => OPTION_DNS_SERVERS,
            DhcpV6OptionCode::BootfileUrl => OPTION_BOOTFILE_URL,
            DhcpV6OptionCode::BootfileParam => OPTION_BOOTFILE_PARAM,
            DhcpV6OptionCode::ClientArchType => OPTION_CLIENT_ARCH_TYPE,
            DhcpV6OptionCode::Other(d) => d,
        }
    }
}

impl From<u16> for DhcpV6OptionCode {
    fn from(d: u16) -> Self {
        match d {
            OPTION_CLIENTID => Self::ClientId,
            OPTION_SERVERID => Self::ServerId,
            OPTION_IA_NA => Self::IANA,
            OPTION_IAADDR => Self::IAAddr,
            OPTION_ORO => Self::OptionRequestOption,
            OPTION_PREFERENCE => Self::Preference,
            OPTION_ELAPSED_TIME => Self::ElapsedTime,
            OPTION_STATUS_CODE => Self::StatusCode,
            OPTION_VENDOR_CLASS => Self::VendorClass,
            OPTION_DNS_SERVERS => Self::DnsServers,
            OPTION_BOOTFILE_URL => Self::BootfileUrl,
            OPTION_BOOTFILE_PARAM => Self::BootfileParam,
            OPTION_CLIENT_ARCH_TYPE => Self::ClientArchType,
            _ => Self::Other(d),
        }
    }
}

impl std::fmt::Display for DhcpV6OptionCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ClientId => write!(f, "OPTION_CLIENTID"),
            Self::ServerId => write!(f, "OPTION_SERVERID"),
            Self::IANA => write!(f, "OPTION_IA_NA"),
            Self::IAAddr => write!(f, "OPTION_IAADDR"),
            Self::OptionRequestOption => write!(f, "OPTION_ORO"),
            Self::Preference => write!(f, "OPTION_PREFERENCE"),
            Self::ElapsedTime => write!(f, "OPTION_ELAPSED_TIME"),
            Self::StatusCode => write!(f, "OPTION_STATUS_CODE"),
            Self::VendorClass => write!(f, "OPTION_VENDOR_CLASS"),
            Self::DnsServers => write!(f, "OPTION_DNS_SERVERS"),
            Self::BootfileUrl => write!(f, "OPT_BOOTFILE_URL"),
            Self::BootfileParam => write!(f, "OPT_BOOTFILE_PARAM"),
            Self::ClientArchType => write!(f, "OPTION_CLIENT_ARCH_TYPE"),
            Self::Other(d) => write!(f, "Unknown({d})"),
        }
    }
}

/// Single DHCPv6 option holding its undecoded option data.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct DhcpV6RawOption {
    pub code: DhcpV6OptionCode,
    pub data: Vec<u8>,
}

impl DhcpV6RawOption {
    pub fn new(code: DhcpV6OptionCode, data: Vec<u8>) -> Self {
        Self { code, data }
    }

    pub(crate) fn parse(buf: &mut Buffer) -> Result<Self, DhcpError> {
        let code: DhcpV6OptionCode = buf
            .get_u16_be()
            .context("Invalid DHCPv6 option code")?
            .into();
        let len: usize = buf
            .get_u16_be()
            .context("Invalid DHCPv6 option length")?
            .into();
        let data = buf
            .get_bytes(len)
            .context(&format!("Invalid DHCPv6 option {code}"))?
            .to_vec();
        Ok(Self { code, data })
    }

    pub(crate) fn emit(&self, buf: &mut BufferMut) -> Result<(), DhcpError> {
        buf.write_tlv(self.code.into(), &self.data)
            .context(&format!("Failed to emit DHCPv6 option {}", self.code))
    }
}

/// Ordered collection of DHCPv6 options.
///
/// Insertion order is the order on the wire. The same option code may appear
/// more than once (e.g. one `OPTION_IA_NA` per identity association).
#[derive(Debug, PartialEq, Eq, Clone, Default)]
pub struct DhcpV6Options {
    data: Vec<DhcpV6RawOption>,
}

impl DhcpV6Options {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, opt: DhcpV6RawOption) -> &mut Self {
        self.data.push(opt);
        self
    }

    pub fn add_raw(
        &mut self,
        code: DhcpV6OptionCode,
        data: Vec<u8>,
    ) -> &mut Self {
        self.add(DhcpV6RawOption::new(code, data))
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &DhcpV6RawOption> {
        self.data.iter()
    }

    /// Option codes in wire order.
    pub fn codes(&self) -> Vec<DhcpV6OptionCode> {
        self.data.iter().map(|o| o.code).collect()
    }

    /// Data of the first option with specified code.
    pub fn get(&self, code: DhcpV6OptionCode) -> Option<&[u8]> {
        self.data
            .iter()
            .find(|o| o.code == code)
            .map(|o| o.data.as_slice())
    }

    pub fn get_all(&self, code: DhcpV6OptionCode) -> Vec<&[u8]> {
        self.data
            .iter()
            .filter(|o| o.code == code)
            .map(|o| o.data.as_slice())
            .collect()
    }

    pub fn client_id(&self) -> Option<&[u8]> {
        self.get(DhcpV6OptionCode::ClientId)
    }

    /// IAID of every `OPTION_IA_NA` in request order. Options too short to
    /// hold an IAID are ignored.
    pub fn ia_na_ids(&self) -> Vec<Vec<u8>> {
        self.get_all(DhcpV6OptionCode::IANA)
            .into_iter()
            .filter_map(|d| {
                if d.len() < 4 {
                    log::debug!("Ignoring OPTION_IA_NA without IAID: {d:?}");
                    None
                } else {
                    Some(d[..4].to_vec())
                }
            })
            .collect()
    }

    /// First architecture type of `OPTION_CLIENT_ARCH_TYPE`, or
    /// `DhcpV6ClientArchType::X86Bios` (0) when absent.
    pub fn client_arch_type(&self) -> DhcpV6ClientArchType {
        match self.get(DhcpV6OptionCode::ClientArchType) {
            Some(d) if d.len() >= 2 => u16::from_be_bytes([d[0], d[1]]).into(),
            _ => DhcpV6ClientArchType::X86Bios,
        }
    }

    pub(crate) fn parse(buf: &mut Buffer) -> Result<Self, DhcpError> {
        let mut ret = Self::new();
        while !buf.is_empty() {
            ret.add(DhcpV6RawOption::parse(buf)?);
        }
        Ok(ret)
    }

    pub(crate) fn emit(&self, buf: &mut BufferMut) -> Result<(), DhcpError> {
        for opt in self.data.iter() {
            opt.emit(buf)?;
        }
        Ok(())
    }
}
