use mockall::mock;
use uartverif_core::common::addr::BusAddr;
use uartverif_core::common::error::TransportError;
use uartverif_core::config::BusWidth;
use uartverif_core::soc::traits::{BurstKind, RawTransport};

mock! {
    pub Transport {}
    impl RawTransport for Transport {
        fn native_width(&self) -> BusWidth;
        fn read(
            &mut self,
            address: BusAddr,
            length: usize,
            burst: BurstKind,
            size: u8,
        ) -> Result<Vec<u8>, TransportError>;
        fn write(
            &mut self,
            address: BusAddr,
            data: &[u8],
            burst: BurstKind,
            size: u8,
        ) -> Result<(), TransportError>;
    }
}

/// Creates a mock reporting `width` as its native width.
pub fn mock_with_width(width: BusWidth) -> MockTransport {
    let mut mock = MockTransport::new();
    let _ = mock.expect_native_width().return_const(width);
    mock
}
