use std::fmt;

/// Represents the decomposed components of a virtual address
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VirtualAddress {
    pub raw: usize,
    pub page: usize,
    pub offset: usize,
}

impl VirtualAddress {
    /// Split a raw virtual address into page number and offset.
    ///
    /// No bounds check against any process's size happens here; an address
    /// past the end of a process's table is caught by the presence lookup
    /// downstream.
    pub fn decompose(raw: usize, page_size: usize) -> Self {
        VirtualAddress {
            raw,
            page: raw / page_size,
            offset: raw % page_size,
        }
    }
}

impl fmt::Display for VirtualAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "VA({}) = (page={}, offset={})",
            self.raw, self.page, self.offset
        )
    }
}

/// Compose a physical address from a frame binding and a page offset.
#[inline]
pub fn compose(frame: usize, offset: usize, page_size: usize) -> usize {
    frame * page_size + offset
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decompose_page_boundaries() {
        let va = VirtualAddress::decompose(0, 4096);
        assert_eq!(va.page, 0);
        assert_eq!(va.offset, 0);

        let va = VirtualAddress::decompose(4096, 4096);
        assert_eq!(va.page, 1);
        assert_eq!(va.offset, 0);

        let va = VirtualAddress::decompose(12288, 4096);
        assert_eq!(va.page, 3);
        assert_eq!(va.offset, 0);
    }

    #[test]
    fn test_decompose_mid_page() {
        let va = VirtualAddress::decompose(5000, 4096);
        assert_eq!(va.page, 1);
        assert_eq!(va.offset, 904);

        // Last byte of page 0
        let va = VirtualAddress::decompose(4095, 4096);
        assert_eq!(va.page, 0);
        assert_eq!(va.offset, 4095);
    }

    #[test]
    fn test_decompose_reconstruction_property() {
        // page * page_size + offset == raw, and offset < page_size
        for page_size in [512, 1024, 4096] {
            for raw in [0, 1, 511, 512, 4095, 4096, 5000, 12288, 99999] {
                let va = VirtualAddress::decompose(raw, page_size);
                assert_eq!(va.page * page_size + va.offset, raw, "raw={}", raw);
                assert!(va.offset < page_size, "raw={}", raw);
            }
        }
    }

    #[test]
    fn test_compose() {
        assert_eq!(compose(0, 0, 4096), 0);
        assert_eq!(compose(2, 10, 4096), 8202);
        assert_eq!(compose(3, 4095, 4096), 16383);
    }

    #[test]
    fn test_compose_inverts_decompose_for_identity_mapping() {
        // If page == frame, composing gives back the raw address
        let va = VirtualAddress::decompose(8202, 4096);
        assert_eq!(compose(va.page, va.offset, 4096), 8202);
    }

    #[test]
    fn test_display() {
        let va = VirtualAddress::decompose(5000, 4096);
        let display = format!("{}", va);
        assert!(display.contains("5000"));
        assert!(display.contains("page=1"));
        assert!(display.contains("offset=904"));
    }
}
