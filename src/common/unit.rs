//! Length units used by PresentationML geometry.

pub const EMUS_PER_INCH: i64 = 914_400;
pub const EMUS_PER_PT: i64 = 12_700;

#[inline]
pub fn pt_to_emu_f64(pt: f64) -> i64 {
    (pt * EMUS_PER_PT as f64) as i64
}

#[inline]
pub fn emu_to_pt_f64(emu: i64) -> f64 {
    emu as f64 / EMUS_PER_PT as f64
}

#[inline]
pub fn emu_to_inch_f64(emu: i64) -> f64 {
    emu as f64 / EMUS_PER_INCH as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_conversions() {
        assert_eq!(pt_to_emu_f64(18.0), 228_600);
        assert_eq!(emu_to_pt_f64(228_600), 18.0);
        assert_eq!(emu_to_inch_f64(9_144_000), 10.0);
    }
}
