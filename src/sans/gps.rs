//! States processing positioning fixes.

use tartan_bitfield::bitfield;
use zerocopy::FromBytes;

use super::io::IoHeader;

bitfield! {
    /// A geographic coordinate, as transmitted.
    ///
    /// Coordinates are carried as a 32-bit signed-magnitude fixed-point word:
    /// the top bit marks the hemisphere, the remaining bits the magnitude.
    /// The word is passed through undigested; interpreting the fixed-point
    /// units is left to the application.
    pub struct Coordinate(u32) {
        /// Fixed-point magnitude of the coordinate.
        [0..31] pub magnitude: u32,
        /// Whether the coordinate lies in the western or southern hemisphere.
        [31] pub is_negative,
    }
}

/// A positioning fix, with values passed through as transmitted.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct GpsFix {
    pub longitude: Coordinate,
    pub latitude: Coordinate,
    /// Altitude, in meters.
    pub altitude: u16,
    /// Heading, in tenths of a degree.
    pub angle: u16,
    /// Number of satellites used for the fix.
    pub satellites: u8,
    /// Ground speed, in kilometers per hour.
    pub speed: u16,
}

/// State token to decode a positioning fix.
#[derive(Debug)]
pub struct Gps(pub(super) ());

impl Gps {
    /// Transition to another state by decoding a positioning fix.
    ///
    /// Returns the fix and a successor state token.
    pub fn advance(self, r: [u8; 15]) -> (GpsFix, IoHeader) {
        #[repr(C, packed)]
        #[derive(FromBytes)]
        struct GpsElement {
            longitude: [u8; 4],
            latitude: [u8; 4],
            altitude: [u8; 2],
            angle: [u8; 2],
            satellites: u8,
            speed: [u8; 2],
        }

        let GpsElement {
            longitude,
            latitude,
            altitude,
            angle,
            satellites,
            speed,
        } = zerocopy::transmute!(r);

        let fix = GpsFix {
            longitude: Coordinate(u32::from_be_bytes(longitude)),
            latitude: Coordinate(u32::from_be_bytes(latitude)),
            altitude: u16::from_be_bytes(altitude),
            angle: u16::from_be_bytes(angle),
            satellites,
            speed: u16::from_be_bytes(speed),
        };

        (fix, IoHeader(()))
    }
}
