// lt-core/src/units.rs

use uom::si::f64::{
    Length as UomLength, Power as UomPower, Pressure as UomPressure,
    VolumeRate as UomVolumeRate,
};

// Public canonical unit types (SI, f64)
pub type Length = UomLength;
pub type Power = UomPower;
pub type Pressure = UomPressure;
pub type VolumeRate = UomVolumeRate;

#[inline]
pub fn bar(v: f64) -> Pressure {
    use uom::si::pressure::bar;
    Pressure::new::<bar>(v)
}

#[inline]
pub fn pa(v: f64) -> Pressure {
    use uom::si::pressure::pascal;
    Pressure::new::<pascal>(v)
}

#[inline]
pub fn kw(v: f64) -> Power {
    use uom::si::power::kilowatt;
    Power::new::<kilowatt>(v)
}

#[inline]
pub fn m3ph(v: f64) -> VolumeRate {
    use uom::si::volume_rate::cubic_meter_per_hour;
    VolumeRate::new::<cubic_meter_per_hour>(v)
}

#[inline]
pub fn m(v: f64) -> Length {
    use uom::si::length::meter;
    Length::new::<meter>(v)
}

/// Discharge-pressure telemetry arrives in bar; the efficiency formula
/// wants pascals. 1 bar = 100 000 Pa exactly.
#[inline]
pub fn bar_to_pa(v: f64) -> f64 {
    use uom::si::pressure::pascal;
    bar(v).get::<pascal>()
}

/// Power-draw telemetry arrives in kW; the efficiency formula wants watts.
#[inline]
pub fn kw_to_w(v: f64) -> f64 {
    use uom::si::power::watt;
    kw(v).get::<watt>()
}

/// Flow telemetry arrives in m³/h; hydraulic power wants m³/s.
#[inline]
pub fn m3h_to_m3s(v: f64) -> f64 {
    use uom::si::volume_rate::cubic_meter_per_second;
    m3ph(v).get::<cubic_meter_per_second>()
}

pub mod constants {
    /// Meters of water column per bar at standard density (1 bar ≈ 10.197 m H₂O).
    pub const M_H2O_PER_BAR: f64 = 10.197;

    /// Gravitational acceleration used by the brake-power formula (m/s²).
    pub const G_MPS2: f64 = 9.81;

    /// Density of water used by the brake-power formula (kg/m³).
    pub const RHO_WATER_KGPM3: f64 = 1000.0;
}
