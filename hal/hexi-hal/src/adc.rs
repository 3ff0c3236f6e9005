//! Analog input abstraction
//!
//! The battery sense line is the only analog input the board crates use.

/// A single ADC channel
///
/// Samples are left-aligned to 16 bits regardless of the converter's
/// native resolution, so full scale is always `u16::MAX`.
pub trait AdcChannel {
    /// Error type for conversions
    type Error;

    /// Take one blocking sample
    fn read(&mut self) -> Result<u16, Self::Error>;
}

/// Full-scale ADC count
pub const ADC_FULL_SCALE: u16 = u16::MAX;

/// Convert a 16-bit sample to microvolts against a reference voltage
pub fn sample_to_microvolts(sample: u16, vref_uv: u32) -> u32 {
    (sample as u64 * vref_uv as u64 / ADC_FULL_SCALE as u64) as u32
}
