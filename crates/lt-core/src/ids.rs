use core::fmt;
use core::num::NonZeroU32;

/// Compact, stable identifier for a pump asset in the station.
///
/// - `u32` keeps memory small
/// - `NonZero` enables `Option<PumpId>` to be pointer-optimized
///
/// Pumps are numbered from 1 on the station P&ID, so `PumpId` stores the
/// asset number directly and exposes a 0-based `index` for array access.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PumpId(NonZeroU32);

impl PumpId {
    /// Create a PumpId from a 0-based index by storing index+1.
    pub fn from_index(index: u32) -> Self {
        // index+1 must be nonzero
        Self(NonZeroU32::new(index + 1).expect("index+1 is nonzero"))
    }

    /// Recover the 0-based index.
    pub fn index(self) -> u32 {
        self.0.get() - 1
    }

    /// 1-based asset number as tagged on the P&ID (`PU3` has number 3).
    pub fn number(self) -> u32 {
        self.0.get()
    }
}

impl fmt::Debug for PumpId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PumpId({})", self.number())
    }
}

impl fmt::Display for PumpId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PU{}", self.number())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn id_round_trip_index() {
        for i in [0_u32, 1, 2, 7, 10_000] {
            let id = PumpId::from_index(i);
            assert_eq!(id.index(), i);
            assert_eq!(id.number(), i + 1);
        }
    }

    #[test]
    fn display_uses_asset_tag() {
        assert_eq!(PumpId::from_index(0).to_string(), "PU1");
        assert_eq!(PumpId::from_index(2).to_string(), "PU3");
    }

    #[test]
    fn option_id_is_small() {
        // This is a classic reason for NonZero: Option<PumpId> can be same size as PumpId.
        assert_eq!(
            core::mem::size_of::<PumpId>(),
            core::mem::size_of::<Option<PumpId>>()
        );
    }
}
