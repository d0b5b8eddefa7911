//! Grisu3 shortest digit generation.
//!
//! Produces the shortest decimal digit string that uniquely identifies a
//! positive finite double, together with its decimal exponent. Grisu3 works
//! entirely in 64-bit fixed point and can prove its own result; for the
//! roughly 0.5% of inputs where that proof fails it returns `None` and the
//! caller must use an exact method instead.
//!
//! See Florian Loitsch, "Printing Floating-Point Numbers Quickly and
//! Accurately with Integers" (PLDI 2010).

/// Upper bound on shortest digits for any double.
pub(crate) const MAX_DIGITS: usize = 17;

const SIGNIFICAND_MASK: u64 = 0x000F_FFFF_FFFF_FFFF;
const HIDDEN_BIT: u64 = 0x0010_0000_0000_0000;
const EXPONENT_MASK: u64 = 0x7FF0_0000_0000_0000;
const PHYSICAL_SIGNIFICAND_SIZE: u32 = 52;
const EXPONENT_BIAS: i32 = 0x3FF + PHYSICAL_SIGNIFICAND_SIZE as i32;
const DENORMAL_EXPONENT: i32 = -EXPONENT_BIAS + 1;

// Scaled values must land in this binary exponent window so that the
// integral part of `w * 10^-k` fits in 32 bits.
const MINIMAL_TARGET_EXPONENT: i32 = -60;
const MAXIMAL_TARGET_EXPONENT: i32 = -32;

/// A "do it yourself" floating point number: `f * 2^e` with no hidden bit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct DiyFp {
    f: u64,
    e: i32,
}

impl DiyFp {
    const SIGNIFICAND_SIZE: i32 = 64;

    #[inline]
    const fn new(f: u64, e: i32) -> Self {
        DiyFp { f, e }
    }

    fn from_bits(bits: u64) -> Self {
        let biased_e = ((bits & EXPONENT_MASK) >> PHYSICAL_SIGNIFICAND_SIZE) as i32;
        let significand = bits & SIGNIFICAND_MASK;
        if biased_e == 0 {
            DiyFp::new(significand, DENORMAL_EXPONENT)
        } else {
            DiyFp::new(significand + HIDDEN_BIT, biased_e - EXPONENT_BIAS)
        }
    }

    #[inline]
    fn normalize(self) -> Self {
        let shift = self.f.leading_zeros();
        DiyFp::new(self.f << shift, self.e - shift as i32)
    }

    /// Product rounded to the upper 64 bits. Error is at most half a ulp.
    #[inline]
    fn mul(self, other: DiyFp) -> Self {
        let product = u128::from(self.f) * u128::from(other.f);
        let rounded = (product + (1u128 << 63)) >> 64;
        DiyFp::new(rounded as u64, self.e + other.e + Self::SIGNIFICAND_SIZE)
    }

    #[inline]
    fn minus(self, other: DiyFp) -> u64 {
        debug_assert_eq!(self.e, other.e);
        self.f - other.f
    }
}

/// Returns `(m_minus, m_plus)`, the normalized half-way points to the
/// neighbouring doubles. Both share the exponent of `m_plus`.
fn normalized_boundaries(bits: u64) -> (DiyFp, DiyFp) {
    let v = DiyFp::from_bits(bits);
    let m_plus = DiyFp::new((v.f << 1) + 1, v.e - 1).normalize();

    let biased_e = (bits & EXPONENT_MASK) >> PHYSICAL_SIGNIFICAND_SIZE;
    let lower_boundary_is_closer = bits & SIGNIFICAND_MASK == 0 && biased_e > 1;
    let m_minus = if lower_boundary_is_closer {
        DiyFp::new((v.f << 2) - 1, v.e - 2)
    } else {
        DiyFp::new((v.f << 1) - 1, v.e - 1)
    };

    let m_minus = DiyFp::new(m_minus.f << (m_minus.e - m_plus.e), m_plus.e);
    (m_minus, m_plus)
}

const CACHED_POWERS_OFFSET: i32 = 348;
const DECIMAL_EXPONENT_DISTANCE: i32 = 8;
const D_1_LOG2_10: f64 = 0.301_029_995_663_981_14;

/// Normalized `10^k` as `(significand, binary exponent, k)`, rounded to nearest.
#[rustfmt::skip]
static CACHED_POWERS: [(u64, i16, i16); 87] = [
    (0xfa8fd5a0081c0288, -1220, -348),
    (0xbaaee17fa23ebf76, -1193, -340),
    (0x8b16fb203055ac76, -1166, -332),
    (0xcf42894a5dce35ea, -1140, -324),
    (0x9a6bb0aa55653b2d, -1113, -316),
    (0xe61acf033d1a45df, -1087, -308),
    (0xab70fe17c79ac6ca, -1060, -300),
    (0xff77b1fcbebcdc4f, -1034, -292),
    (0xbe5691ef416bd60c, -1007, -284),
    (0x8dd01fad907ffc3c, -980, -276),
    (0xd3515c2831559a83, -954, -268),
    (0x9d71ac8fada6c9b5, -927, -260),
    (0xea9c227723ee8bcb, -901, -252),
    (0xaecc49914078536d, -874, -244),
    (0x823c12795db6ce57, -847, -236),
    (0xc21094364dfb5637, -821, -228),
    (0x9096ea6f3848984f, -794, -220),
    (0xd77485cb25823ac7, -768, -212),
    (0xa086cfcd97bf97f4, -741, -204),
    (0xef340a98172aace5, -715, -196),
    (0xb23867fb2a35b28e, -688, -188),
    (0x84c8d4dfd2c63f3b, -661, -180),
    (0xc5dd44271ad3cdba, -635, -172),
    (0x936b9fcebb25c996, -608, -164),
    (0xdbac6c247d62a584, -582, -156),
    (0xa3ab66580d5fdaf6, -555, -148),
    (0xf3e2f893dec3f126, -529, -140),
    (0xb5b5ada8aaff80b8, -502, -132),
    (0x87625f056c7c4a8b, -475, -124),
    (0xc9bcff6034c13053, -449, -116),
    (0x964e858c91ba2655, -422, -108),
    (0xdff9772470297ebd, -396, -100),
    (0xa6dfbd9fb8e5b88f, -369, -92),
    (0xf8a95fcf88747d94, -343, -84),
    (0xb94470938fa89bcf, -316, -76),
    (0x8a08f0f8bf0f156b, -289, -68),
    (0xcdb02555653131b6, -263, -60),
    (0x993fe2c6d07b7fac, -236, -52),
    (0xe45c10c42a2b3b06, -210, -44),
    (0xaa242499697392d3, -183, -36),
    (0xfd87b5f28300ca0e, -157, -28),
    (0xbce5086492111aeb, -130, -20),
    (0x8cbccc096f5088cc, -103, -12),
    (0xd1b71758e219652c, -77, -4),
    (0x9c40000000000000, -50, 4),
    (0xe8d4a51000000000, -24, 12),
    (0xad78ebc5ac620000, 3, 20),
    (0x813f3978f8940984, 30, 28),
    (0xc097ce7bc90715b3, 56, 36),
    (0x8f7e32ce7bea5c70, 83, 44),
    (0xd5d238a4abe98068, 109, 52),
    (0x9f4f2726179a2245, 136, 60),
    (0xed63a231d4c4fb27, 162, 68),
    (0xb0de65388cc8ada8, 189, 76),
    (0x83c7088e1aab65db, 216, 84),
    (0xc45d1df942711d9a, 242, 92),
    (0x924d692ca61be758, 269, 100),
    (0xda01ee641a708dea, 295, 108),
    (0xa26da3999aef774a, 322, 116),
    (0xf209787bb47d6b85, 348, 124),
    (0xb454e4a179dd1877, 375, 132),
    (0x865b86925b9bc5c2, 402, 140),
    (0xc83553c5c8965d3d, 428, 148),
    (0x952ab45cfa97a0b3, 455, 156),
    (0xde469fbd99a05fe3, 481, 164),
    (0xa59bc234db398c25, 508, 172),
    (0xf6c69a72a3989f5c, 534, 180),
    (0xb7dcbf5354e9bece, 561, 188),
    (0x88fcf317f22241e2, 588, 196),
    (0xcc20ce9bd35c78a5, 614, 204),
    (0x98165af37b2153df, 641, 212),
    (0xe2a0b5dc971f303a, 667, 220),
    (0xa8d9d1535ce3b396, 694, 228),
    (0xfb9b7cd9a4a7443c, 720, 236),
    (0xbb764c4ca7a44410, 747, 244),
    (0x8bab8eefb6409c1a, 774, 252),
    (0xd01fef10a657842c, 800, 260),
    (0x9b10a4e5e9913129, 827, 268),
    (0xe7109bfba19c0c9d, 853, 276),
    (0xac2820d9623bf429, 880, 284),
    (0x80444b5e7aa7cf85, 907, 292),
    (0xbf21e44003acdd2d, 933, 300),
    (0x8e679c2f5e44ff8f, 960, 308),
    (0xd433179d9c8cb841, 986, 316),
    (0x9e19db92b4e31ba9, 1013, 324),
    (0xeb96bf6ebadf77d9, 1039, 332),
    (0xaf87023b9bf0ee6b, 1066, 340),
];

/// Picks a cached `10^k` whose product with a value of binary exponent `e`
/// lands in the target window. Returns the power and its decimal exponent.
fn cached_power_for_binary_exponent(min_exponent: i32) -> (DiyFp, i32) {
    let k = ((min_exponent + DiyFp::SIGNIFICAND_SIZE - 1) as f64 * D_1_LOG2_10).ceil() as i32;
    let index = ((CACHED_POWERS_OFFSET + k - 1) / DECIMAL_EXPONENT_DISTANCE + 1) as usize;
    let (f, e, decimal_exponent) = CACHED_POWERS[index];
    (DiyFp::new(f, i32::from(e)), i32::from(decimal_exponent))
}

const SMALL_POWERS_OF_TEN: [u32; 11] = [
    0,
    1,
    10,
    100,
    1_000,
    10_000,
    100_000,
    1_000_000,
    10_000_000,
    100_000_000,
    1_000_000_000,
];

/// Largest power of ten `<= number` and its exponent plus one. Zero maps to `(0, 0)`.
#[inline]
fn biggest_power_ten(number: u32) -> (u32, i32) {
    let mut i = SMALL_POWERS_OF_TEN.len() - 1;
    while i > 0 && SMALL_POWERS_OF_TEN[i] > number {
        i -= 1;
    }
    (SMALL_POWERS_OF_TEN[i], i as i32)
}

/// Shortest digits of a positive double: `digits[..len] * 10^exponent`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Digits {
    pub buf: [u8; MAX_DIGITS],
    pub len: usize,
    pub exponent: i32,
}

impl Digits {
    pub(crate) const fn empty() -> Self {
        Digits {
            buf: [0; MAX_DIGITS],
            len: 0,
            exponent: 0,
        }
    }

    #[inline]
    pub(crate) fn as_bytes(&self) -> &[u8] {
        &self.buf[..self.len]
    }

    #[inline]
    fn push(&mut self, digit: u8) -> Option<()> {
        *self.buf.get_mut(self.len)? = b'0' + digit;
        self.len += 1;
        Some(())
    }
}

/// Moves the last digit towards `w` while it stays inside the safe interval,
/// then checks that the result is provably the closest shortest candidate.
fn round_weed(
    digits: &mut Digits,
    distance_too_high_w: u64,
    unsafe_interval: u64,
    mut rest: u64,
    ten_kappa: u64,
    unit: u64,
) -> bool {
    let small_distance = distance_too_high_w - unit;
    let big_distance = distance_too_high_w + unit;

    while rest < small_distance
        && unsafe_interval - rest >= ten_kappa
        && (rest + ten_kappa < small_distance
            || small_distance - rest >= rest + ten_kappa - small_distance)
    {
        digits.buf[digits.len - 1] -= 1;
        rest += ten_kappa;
    }

    if rest < big_distance
        && unsafe_interval - rest >= ten_kappa
        && (rest + ten_kappa < big_distance
            || big_distance - rest > rest + ten_kappa - big_distance)
    {
        return false;
    }

    match unsafe_interval.checked_sub(4 * unit) {
        Some(upper) => 2 * unit <= rest && rest <= upper,
        None => false,
    }
}

/// Generates digits of `high` until the remainder falls inside the unsafe
/// interval `(low, high)`. Returns the decimal exponent `kappa` of the last
/// generated digit.
fn digit_gen(low: DiyFp, w: DiyFp, high: DiyFp, digits: &mut Digits) -> Option<i32> {
    debug_assert!(low.e == w.e && w.e == high.e);
    debug_assert!((MINIMAL_TARGET_EXPONENT..=MAXIMAL_TARGET_EXPONENT).contains(&w.e));

    let mut unit: u64 = 1;
    let too_low = DiyFp::new(low.f - unit, low.e);
    let too_high = DiyFp::new(high.f + unit, high.e);
    let mut unsafe_interval = too_high.minus(too_low);

    let shift = (-w.e) as u32;
    let one = DiyFp::new(1u64 << shift, w.e);
    let mut integrals = (too_high.f >> shift) as u32;
    let mut fractionals = too_high.f & (one.f - 1);

    let (mut divisor, mut kappa) = biggest_power_ten(integrals);

    while kappa > 0 {
        let digit = integrals / divisor;
        digits.push(digit as u8)?;
        integrals %= divisor;
        kappa -= 1;

        let rest = (u64::from(integrals) << shift) + fractionals;
        if rest < unsafe_interval {
            let ok = round_weed(
                digits,
                too_high.minus(w),
                unsafe_interval,
                rest,
                u64::from(divisor) << shift,
                unit,
            );
            return ok.then_some(kappa);
        }
        divisor /= 10;
    }

    loop {
        fractionals *= 10;
        unit *= 10;
        unsafe_interval *= 10;

        let digit = (fractionals >> shift) as u8;
        digits.push(digit)?;
        fractionals &= one.f - 1;
        kappa -= 1;

        if fractionals < unsafe_interval {
            let ok = round_weed(
                digits,
                too_high.minus(w) * unit,
                unsafe_interval,
                fractionals,
                one.f,
                unit,
            );
            return ok.then_some(kappa);
        }
    }
}

/// Shortest, closest digits for a positive finite non-zero double given as
/// raw bits (sign bit clear). `None` when Grisu3 cannot guarantee the result.
pub(crate) fn grisu3(bits: u64) -> Option<Digits> {
    debug_assert!(bits != 0 && bits < EXPONENT_MASK);

    let w = DiyFp::from_bits(bits).normalize();
    let (boundary_minus, boundary_plus) = normalized_boundaries(bits);
    debug_assert_eq!(boundary_plus.e, w.e);

    let min_exponent = MINIMAL_TARGET_EXPONENT - (w.e + DiyFp::SIGNIFICAND_SIZE);
    let (ten_mk, mk) = cached_power_for_binary_exponent(min_exponent);

    let scaled_w = w.mul(ten_mk);
    let scaled_minus = boundary_minus.mul(ten_mk);
    let scaled_plus = boundary_plus.mul(ten_mk);

    let mut digits = Digits::empty();
    let kappa = digit_gen(scaled_minus, scaled_w, scaled_plus, &mut digits)?;
    digits.exponent = kappa - mk;
    Some(digits)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn digits_of(v: f64) -> Option<(String, i32)> {
        grisu3(v.to_bits()).map(|d| {
            (
                String::from_utf8(d.as_bytes().to_vec()).unwrap(),
                d.exponent,
            )
        })
    }

    #[test]
    fn test_simple_values() {
        assert_eq!(digits_of(1.0), Some(("1".to_string(), 0)));
        assert_eq!(digits_of(0.5), Some(("5".to_string(), -1)));
        assert_eq!(digits_of(1.5), Some(("15".to_string(), -1)));
        assert_eq!(digits_of(100.0), Some(("1".to_string(), 2)));
        assert_eq!(digits_of(0.1), Some(("1".to_string(), -1)));
    }

    #[test]
    fn test_extremes() {
        assert_eq!(digits_of(5e-324), Some(("5".to_string(), -324)));
        assert_eq!(
            digits_of(f64::MAX),
            Some(("17976931348623157".to_string(), 292))
        );
        assert_eq!(
            digits_of(f64::MIN_POSITIVE),
            Some(("22250738585072014".to_string(), -324))
        );
    }

    #[test]
    fn test_cached_power_window() {
        for bits in [1u64, 0x0010_0000_0000_0000, 0x3FF0_0000_0000_0000, 0x7FEF_FFFF_FFFF_FFFF] {
            let w = DiyFp::from_bits(bits).normalize();
            let min_exponent = MINIMAL_TARGET_EXPONENT - (w.e + DiyFp::SIGNIFICAND_SIZE);
            let (ten_mk, _) = cached_power_for_binary_exponent(min_exponent);
            let e = w.e + ten_mk.e + DiyFp::SIGNIFICAND_SIZE;
            assert!((MINIMAL_TARGET_EXPONENT..=MAXIMAL_TARGET_EXPONENT).contains(&e));
        }
    }

    #[test]
    fn test_cached_powers_are_normalized() {
        for (f, _, _) in CACHED_POWERS.iter() {
            assert_eq!(f.leading_zeros(), 0);
        }
        assert_eq!(CACHED_POWERS[0].2, -348);
        assert_eq!(CACHED_POWERS[86].2, 340);
    }

    #[test]
    fn test_biggest_power_ten() {
        assert_eq!(biggest_power_ten(0), (0, 0));
        assert_eq!(biggest_power_ten(5), (1, 1));
        assert_eq!(biggest_power_ten(10), (10, 2));
        assert_eq!(biggest_power_ten(999), (100, 3));
        assert_eq!(biggest_power_ten(u32::MAX), (1_000_000_000, 10));
    }

    #[test]
    fn test_boundaries_power_of_two() {
        // 2.0: lower neighbour is half as far as the upper one.
        let (minus, plus) = normalized_boundaries(2.0f64.to_bits());
        let w = DiyFp::from_bits(2.0f64.to_bits()).normalize();
        assert_eq!(plus.e, w.e);
        assert_eq!(w.f - minus.f, (plus.f - w.f) / 2);
    }
}
