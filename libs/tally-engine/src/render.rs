//! Canonical numeric rendering

/// Render an `f64` as its shortest round-trip decimal string.
///
/// Integral values keep a decimal point (`15.0`, not `15`), so results
/// and history lines have one canonical form everywhere.
pub fn format_value(value: f64) -> String {
    let mut buf = ryu::Buffer::new();
    buf.format(value).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integral_values_keep_the_decimal_point() {
        assert_eq!(format_value(15.0), "15.0");
        assert_eq!(format_value(-4.0), "-4.0");
        assert_eq!(format_value(0.0), "0.0");
    }

    #[test]
    fn fractional_values_render_shortest_round_trip() {
        assert_eq!(format_value(2.5), "2.5");
        assert_eq!(format_value(0.1), "0.1");
    }

    #[test]
    fn rendering_round_trips() {
        for value in [15.0, -2.75, 0.1, 1e10, 1.0 / 3.0] {
            let parsed: f64 = format_value(value).parse().unwrap();
            assert_eq!(parsed, value);
        }
    }
}
