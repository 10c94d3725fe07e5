//! Duty cycle quantization against a simulated register file

use motorwing_drivers::Pca9685;
use motorwing_hal::mock::{RecordingDelay, RegisterFile};
use proptest::prelude::*;

proptest! {
    #[test]
    fn duty_cycle_reads_back_quantized(channel in 0u8..16, value in 0u16..0xFFFF) {
        let mut file = RegisterFile::new();
        let mut pca = Pca9685::new(&mut file, RecordingDelay::new()).unwrap();
        let mut ch = pca.channel(channel).unwrap();

        ch.set_duty_cycle(value).unwrap();
        let expected = ((value as u32 + 1) >> 4) << 4;
        prop_assert_eq!(ch.duty_cycle().unwrap() as u32, expected);
    }

    #[test]
    fn out_of_range_duty_is_rejected(value in 0x1_0000u32..=u32::MAX) {
        let mut file = RegisterFile::new();
        let mut pca = Pca9685::new(&mut file, RecordingDelay::new()).unwrap();

        prop_assert!(pca.channel(0).unwrap().set_duty_cycle(value).is_err());
        prop_assert_eq!(pca.channel_registers(0).unwrap(), (0, 0));
    }

    #[test]
    fn channels_do_not_overlap(a in 0u8..16, b in 0u8..16, value in 0u16..0xFFFF) {
        prop_assume!(a != b);
        let mut file = RegisterFile::new();
        let mut pca = Pca9685::new(&mut file, RecordingDelay::new()).unwrap();

        pca.channel(a).unwrap().set_duty_cycle(value).unwrap();
        prop_assert_eq!(pca.channel(b).unwrap().duty_cycle().unwrap(), 0);
    }
}

#[test]
fn full_on_reads_back_exactly() {
    let mut file = RegisterFile::new();
    let mut pca = Pca9685::new(&mut file, RecordingDelay::new()).unwrap();

    pca.channel(15).unwrap().set_duty_cycle(0xFFFFu16).unwrap();
    assert_eq!(pca.channel(15).unwrap().duty_cycle().unwrap(), 0xFFFF);
    assert_eq!(pca.channel_registers(15).unwrap(), (0x1000, 0));
}
