//! PLL divider search.
//!
//! The sensor derives its VCO from the external clock as
//! `extclk * multiplier / pre_div`. Both stages of the PLL are programmed
//! with the same pair.

pub const EXTCLK_MIN_HZ: u32 = 6_000_000;
pub const EXTCLK_MAX_HZ: u32 = 48_000_000;

pub const PLL_MIN_HZ: u64 = 320_000_000;
pub const PLL_MAX_HZ: u64 = 1_200_000_000;

pub const PRE_DIV_MAX: u32 = 63;
pub const MULTIPLIER_MIN: u32 = 32;
pub const MULTIPLIER_MAX: u32 = 254;

/// Pixel clock the VCO target is derived from.
pub const PIXEL_CLOCK_RATE: u32 = 184_000_000;

/// A divider pair and the PLL frequency it produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PllSolution {
    pub pll_hz: u32,
    pub pre_div: u8,
    pub multiplier: u8,
}

/// Finds the pair with the lowest PLL frequency at or above `target_hz`.
///
/// Every pre-divider is tried with the smallest multiplier that reaches the
/// target. Returns `None` when no pair satisfies the multiplier and PLL
/// frequency limits.
pub fn compute(extclk_hz: u32, target_hz: u32) -> Option<PllSolution> {
    if extclk_hz == 0 {
        return None;
    }

    let extclk = u64::from(extclk_hz);
    let target = u64::from(target_hz);
    let mut best: Option<(u64, u64)> = None;

    for pre in 1..=u64::from(PRE_DIV_MAX) {
        let mult = (target * pre).div_ceil(extclk);
        if mult < u64::from(MULTIPLIER_MIN) {
            continue;
        }
        // The multiplier only grows with the pre-divider.
        if mult > u64::from(MULTIPLIER_MAX) {
            break;
        }

        let vco = extclk * mult;
        if vco < PLL_MIN_HZ * pre || vco > PLL_MAX_HZ * pre {
            continue;
        }

        // extclk * m / p < extclk * bm / bp, compared exactly
        let lower = best.is_none_or(|(bp, bm)| mult * bp < bm * pre);
        if lower {
            best = Some((pre, mult));
        }
    }

    let (pre, mult) = best?;
    let pll_hz = (extclk * mult + pre / 2) / pre;
    Some(PllSolution {
        pll_hz: u32::try_from(pll_hz).ok()?,
        pre_div: pre as u8,
        multiplier: mult as u8,
    })
}

/// Full PLL register plan for one output bit depth.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PllConfig {
    pub pre_div: u8,
    pub multiplier: u8,
    pub pre_div2: u8,
    pub multiplier2: u8,
    pub vt_pix_clk_div: u8,
    pub op_pix_clk_div: u8,
    pub pll_hz: u32,
}

impl PllConfig {
    /// VCO target for `bpp` bits per pixel.
    pub const fn target_hz(bpp: u8) -> u32 {
        PIXEL_CLOCK_RATE * (bpp as u32 / 2)
    }

    pub fn for_depth(extclk_hz: u32, bpp: u8) -> Option<Self> {
        let vt_pix_clk_div = bpp / 2;
        let solution = compute(extclk_hz, Self::target_hz(bpp))?;
        Some(Self {
            pre_div: solution.pre_div,
            multiplier: solution.multiplier,
            pre_div2: solution.pre_div,
            multiplier2: solution.multiplier,
            vt_pix_clk_div,
            op_pix_clk_div: vt_pix_clk_div * 2,
            pll_hz: solution.pll_hz,
        })
    }

    /// Output pixel rate over `lanes` MIPI lanes.
    pub fn pixel_rate(&self, lanes: u8, bpp: u8) -> u32 {
        let rate = u64::from(self.pll_hz) * u64::from(lanes) / u64::from(bpp.max(1));
        u32::try_from(rate).unwrap_or(u32::MAX)
    }

    /// MIPI link frequency; data is clocked on both edges.
    pub fn link_freq(&self) -> u32 {
        self.pll_hz / 2
    }

    /// Register values for the burst starting at the PLL base register:
    /// vt_pix_clk_div, vt_sys_clk_div, pre_pll_clk_div, pll_multiplier,
    /// op_pix_clk_div, op_sys_clk_div.
    pub fn burst(&self) -> [u16; 6] {
        [
            u16::from(self.vt_pix_clk_div),
            1,
            u16::from(self.pre_div2) << 8 | u16::from(self.pre_div),
            u16::from(self.multiplier2) << 8 | u16::from(self.multiplier),
            u16::from(self.op_pix_clk_div),
            1,
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Exact PLL frequency of a pair as a reduced comparison key.
    fn exact(extclk: u32, pre: u64, mult: u64) -> (u64, u64) {
        (u64::from(extclk) * mult, pre)
    }

    fn brute_force_min(extclk: u32, target: u32) -> Option<(u64, u64)> {
        let mut best: Option<(u64, u64)> = None;
        for pre in 1..=63u64 {
            let mult = (u64::from(target) * pre).div_ceil(u64::from(extclk));
            if !(32..=254).contains(&mult) {
                continue;
            }
            let (num, den) = exact(extclk, pre, mult);
            if num < PLL_MIN_HZ * den || num > PLL_MAX_HZ * den {
                continue;
            }
            if best.is_none_or(|(bn, bd)| num * bd < bn * den) {
                best = Some((num, den));
            }
        }
        best
    }

    #[test]
    fn ten_bit_at_24mhz() {
        let pll = compute(24_000_000, 920_000_000).unwrap();
        assert_eq!(
            pll,
            PllSolution {
                pll_hz: 920_000_000,
                pre_div: 3,
                multiplier: 115,
            }
        );
    }

    #[test]
    fn low_extclk_uses_single_predivider() {
        let pll = compute(6_000_000, 920_000_000).unwrap();
        assert_eq!(pll.pre_div, 1);
        assert_eq!(pll.multiplier, 154);
        assert_eq!(pll.pll_hz, 924_000_000);
    }

    #[test]
    fn final_frequency_rounds_to_nearest() {
        // Best pair is 191 / 7, which does not divide evenly.
        let pll = compute(27_000_000, 736_000_000).unwrap();
        let exact_hz = 27_000_000u64 * u64::from(pll.multiplier) / u64::from(pll.pre_div);
        let remainder = 27_000_000u64 * u64::from(pll.multiplier) % u64::from(pll.pre_div);
        let expected = if remainder * 2 >= u64::from(pll.pre_div) {
            exact_hz + 1
        } else {
            exact_hz
        };
        assert_eq!(u64::from(pll.pll_hz), expected);
    }

    #[test]
    fn unreachable_target_has_no_solution() {
        assert_eq!(compute(24_000_000, 100_000_000), None);
        assert_eq!(compute(24_000_000, 2_000_000_000), None);
        assert_eq!(compute(0, 920_000_000), None);
    }

    #[test]
    fn results_respect_limits_and_are_minimal() {
        for extclk in (EXTCLK_MIN_HZ..=EXTCLK_MAX_HZ).step_by(1_000_000) {
            for bpp in [8u8, 10] {
                let target = PllConfig::target_hz(bpp);
                let pll = compute(extclk, target).unwrap();

                assert!((1..=63).contains(&pll.pre_div));
                assert!((32..=254).contains(&pll.multiplier));

                let (num, den) = exact(extclk, u64::from(pll.pre_div), u64::from(pll.multiplier));
                assert!(num >= PLL_MIN_HZ * den && num <= PLL_MAX_HZ * den);

                let (bn, bd) = brute_force_min(extclk, target).unwrap();
                assert_eq!(num * bd, bn * den, "extclk {extclk} bpp {bpp}");
            }
        }
    }

    #[test]
    fn config_for_ten_bit() {
        let cfg = PllConfig::for_depth(24_000_000, 10).unwrap();
        assert_eq!(cfg.vt_pix_clk_div, 5);
        assert_eq!(cfg.op_pix_clk_div, 10);
        assert_eq!(cfg.burst(), [5, 1, 0x0303, 0x7373, 10, 1]);
        assert_eq!(cfg.pixel_rate(4, 10), 368_000_000);
        assert_eq!(cfg.link_freq(), 460_000_000);
    }

    #[test]
    fn config_for_eight_bit() {
        let cfg = PllConfig::for_depth(24_000_000, 8).unwrap();
        assert_eq!(cfg.vt_pix_clk_div, 4);
        assert_eq!(cfg.pll_hz, 736_000_000);
        assert_eq!(cfg.pixel_rate(2, 8), 184_000_000);
    }
}
