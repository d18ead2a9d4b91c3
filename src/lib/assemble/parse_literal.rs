use hexf_parse::parse_hexf32;

/// Parse a decimal or `0x` prefixed integer literal into any integer type it fits in.
pub fn int<T>(s: &str) -> Option<T>
where
    T: std::str::FromStr,
    T: TryFrom<i64>,
{
    let s = s.trim_start_matches('+');
    // Hack to support parsing '-0' as unsigned types
    let s = if s == "-0" { "0" } else { s };

    if let Some(hex) = s.strip_prefix("-0x") {
        let m = u64::from_str_radix(hex, 16).ok()?;
        if m > 1 << 63 {
            return None;
        }
        let m = (m as i64).wrapping_neg();
        m.try_into().ok()
    } else if let Some(hex) = s.strip_prefix("0x") {
        let m = i64::from_str_radix(hex, 16).ok()?;
        m.try_into().ok()
    } else {
        s.parse().ok()
    }
}

/// Digits of a fused constant mnemonic such as `iconst_m1`, where `m` stands for minus.
pub fn fused_int<T>(s: &str) -> Option<T>
where
    T: std::str::FromStr,
    T: TryFrom<i64>,
{
    match s.strip_prefix('m') {
        Some(digits) if digits.bytes().all(|b| b.is_ascii_digit()) => int(&format!("-{}", digits)),
        Some(_) => None,
        None => int(s),
    }
}

/// Parse a decimal or hex float, with an optional Java style `f`/`d` suffix.
pub fn float(s: &str) -> Option<f32> {
    let s = s.trim_start_matches('+');
    let hex = s.starts_with("0x") || s.starts_with("-0x");
    // in hex literals a suffix can only follow the binary exponent
    let s = if !hex || s.contains('p') {
        s.strip_suffix(|c: char| matches!(c, 'f' | 'F' | 'd' | 'D')).unwrap_or(s)
    } else {
        s
    };

    if hex {
        parse_hexf32(s, false).ok()
    } else {
        s.parse().ok()
    }
}
