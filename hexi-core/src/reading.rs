//! Physical reading types

/// Three-axis measurement in physical units
///
/// Units depend on the source: m/s² for acceleration, µT for the
/// magnetometer, °/s for the gyroscope.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Vector3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vector3 {
    /// Create a vector from its components
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Components as an `[x, y, z]` array
    pub fn to_array(self) -> [f32; 3] {
        [self.x, self.y, self.z]
    }
}

impl From<[f32; 3]> for Vector3 {
    fn from([x, y, z]: [f32; 3]) -> Self {
        Self { x, y, z }
    }
}

/// Raw three-axis sample as read from the sensor registers
///
/// This is the representation forwarded to the KW40Z, which expects
/// unsigned 16-bit words per axis.
pub type RawAxes = [u16; 3];
