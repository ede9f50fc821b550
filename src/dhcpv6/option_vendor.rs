// SPDX-License-Identifier: Apache-2.0

use crate::{
    buffer::{Buffer, BufferMut},
    DhcpError, DhcpV6OptionCode, DhcpV6RawOption, ErrorContext, ErrorKind,
};

const HTTP_CLIENT_VENDOR_CLASS: &str = "HTTPClient";

/// RFC 8415 21.16. Vendor Class Option
#[derive(Debug, PartialEq, Eq, Clone)]
#[non_exhaustive]
pub struct DhcpV6OptionVendorClass {
    pub enterprise_number: u32,
    pub data: Vec<Vec<u8>>,
}

impl DhcpV6OptionVendorClass {
    pub fn new(enterprise_number: u32, data: Vec<Vec<u8>>) -> Self {
        Self {
            enterprise_number,
            data,
        }
    }

    /// Vendor class telling UEFI firmware the boot file URL is meant for its
    /// HTTP boot client (UEFI 2.5 section 24.7).
    pub fn http_client() -> Self {
        Self::new(0, vec![HTTP_CLIENT_VENDOR_CLASS.as_bytes().to_vec()])
    }

    pub fn parse_data(data: &[u8]) -> Result<Self, DhcpError> {
        let mut buf = Buffer::new(data);
        let enterprise_number = buf
            .get_u32_be()
            .context("Invalid DHCPv6 option OPTION_VENDOR_CLASS enterprise")?;
        let mut class_data = Vec::new();
        while !buf.is_empty() {
            let len: usize = buf
                .get_u16_be()
                .context("Invalid DHCPv6 option OPTION_VENDOR_CLASS length")?
                .into();
            class_data.push(
                buf.get_bytes(len)
                    .context("Invalid DHCPv6 option OPTION_VENDOR_CLASS data")?
                    .to_vec(),
            );
        }
        Ok(Self::new(enterprise_number, class_data))
    }

    pub fn to_raw_option(&self) -> Result<DhcpV6RawOption, DhcpError> {
        let mut buf = BufferMut::with_capacity(16);
        buf.write_u32_be(self.enterprise_number);
        for d in self.data.iter() {
            let len = u16::try_from(d.len()).map_err(|_| {
                DhcpError::new(
                    ErrorKind::InvalidArgument,
                    format!(
                        "OPTION_VENDOR_CLASS data length {} exceeds the \
                         maximum {}",
                        d.len(),
                        u16::MAX
                    ),
                )
            })?;
            buf.write_u16_be(len);
            buf.write_bytes(d);
        }
        Ok(DhcpV6RawOption::new(DhcpV6OptionCode::VendorClass, buf.data))
    }
}
