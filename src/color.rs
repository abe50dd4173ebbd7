// Simple color struct, created from an unsigned 32 representing RRGGBBAA
// or from a css hex literal like "#fff" / "#ff6600"

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const WHITE: Color = Color { r: 0xff, g: 0xff, b: 0xff, a: 0xff };

    pub fn from_u32(num: u32) -> Color {
        let r = (num >> 24) as u8;
        let g = (num >> 16) as u8;
        let b = (num >> 8) as u8;
        let a = num as u8;

        Color { r, g, b, a }
    }

    // Unparseable literals come back as opaque white
    pub fn from_hex(hex: &str) -> Color {
        Color::parse_hex(hex).unwrap_or(Color::WHITE)
    }

    fn parse_hex(hex: &str) -> Option<Color> {
        let digits = hex.strip_prefix('#')?;
        // from_str_radix would also take a leading sign
        if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }
        let value = u32::from_str_radix(digits, 16).ok()?;
        match digits.len() {
            3 => {
                // Each nibble is doubled: #f60 -> #ff6600
                let expand = |nibble: u32| ((nibble & 0xf) * 0x11) as u8;
                Some(Color {
                    r: expand(value >> 8),
                    g: expand(value >> 4),
                    b: expand(value),
                    a: 0xff,
                })
            }
            6 => Some(Color::from_u32((value << 8) | 0xff)),
            8 => Some(Color::from_u32(value)),
            _ => None,
        }
    }

    pub fn to_css(&self) -> String {
        if self.a == 0xff {
            format!("rgb({}, {}, {})", self.r, self.g, self.b)
        } else {
            format!(
                "rgba({}, {}, {}, {:.3})",
                self.r,
                self.g,
                self.b,
                self.a as f64 / 255.0
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_hex_expands_nibbles() {
        assert_eq!(Color::from_hex("#f60"), Color::from_hex("#ff6600"));
        assert_eq!(Color::from_hex("#fff"), Color::WHITE);
    }

    #[test]
    fn long_hex_matches_u32() {
        assert_eq!(Color::from_hex("#c0392b"), Color::from_u32(0xc0392bff));
    }

    #[test]
    fn garbage_falls_back_to_white() {
        assert_eq!(Color::from_hex("orange"), Color::WHITE);
        assert_eq!(Color::from_hex("#12"), Color::WHITE);
        assert_eq!(Color::from_hex("#zzzzzz"), Color::WHITE);
    }

    #[test]
    fn signed_digits_are_rejected() {
        assert_eq!(Color::from_hex("#+fffff"), Color::WHITE);
        assert_eq!(Color::from_hex("#+ff"), Color::WHITE);
        assert_eq!(Color::from_hex("#-1234567"), Color::WHITE);
    }

    #[test]
    fn css_output() {
        assert_eq!(Color::from_hex("#ff6600").to_css(), "rgb(255, 102, 0)");
        assert_eq!(Color::from_u32(0x00000000).to_css(), "rgba(0, 0, 0, 0.000)");
    }
}
