//! Country metadata used by country selects and phone composition.

/// A country with its ISO 3166-1 alpha-2 code and international dial code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Country {
    pub iso: &'static str,
    pub name: &'static str,
    pub dial_code: &'static str,
}

impl Country {
    const fn new(iso: &'static str, name: &'static str, dial_code: &'static str) -> Self {
        Self {
            iso,
            name,
            dial_code,
        }
    }

    /// Flag emoji built from the regional indicator symbols of the ISO code.
    pub fn flag(&self) -> String {
        self.iso
            .chars()
            .filter_map(|c| {
                let offset = u32::from(c.to_ascii_uppercase()).checked_sub(u32::from('A'))?;
                char::from_u32(0x1F1E6 + offset)
            })
            .collect()
    }
}

/// Supported countries, sorted by name.
pub const COUNTRIES: &[Country] = &[
    Country::new("AR", "Argentina", "+54"),
    Country::new("AU", "Australia", "+61"),
    Country::new("AT", "Austria", "+43"),
    Country::new("BD", "Bangladesh", "+880"),
    Country::new("BE", "Belgium", "+32"),
    Country::new("BR", "Brazil", "+55"),
    Country::new("BG", "Bulgaria", "+359"),
    Country::new("CA", "Canada", "+1"),
    Country::new("CN", "China", "+86"),
    Country::new("HR", "Croatia", "+385"),
    Country::new("CY", "Cyprus", "+357"),
    Country::new("CZ", "Czechia", "+420"),
    Country::new("DK", "Denmark", "+45"),
    Country::new("EG", "Egypt", "+20"),
    Country::new("EE", "Estonia", "+372"),
    Country::new("FI", "Finland", "+358"),
    Country::new("FR", "France", "+33"),
    Country::new("DE", "Germany", "+49"),
    Country::new("GR", "Greece", "+30"),
    Country::new("HK", "Hong Kong", "+852"),
    Country::new("HU", "Hungary", "+36"),
    Country::new("IS", "Iceland", "+354"),
    Country::new("IN", "India", "+91"),
    Country::new("ID", "Indonesia", "+62"),
    Country::new("IE", "Ireland", "+353"),
    Country::new("IL", "Israel", "+972"),
    Country::new("IT", "Italy", "+39"),
    Country::new("JP", "Japan", "+81"),
    Country::new("KE", "Kenya", "+254"),
    Country::new("KR", "Korea, Republic of", "+82"),
    Country::new("LV", "Latvia", "+371"),
    Country::new("LT", "Lithuania", "+370"),
    Country::new("LU", "Luxembourg", "+352"),
    Country::new("MY", "Malaysia", "+60"),
    Country::new("MT", "Malta", "+356"),
    Country::new("MX", "Mexico", "+52"),
    Country::new("MC", "Monaco", "+377"),
    Country::new("NL", "Netherlands", "+31"),
    Country::new("NZ", "New Zealand", "+64"),
    Country::new("NG", "Nigeria", "+234"),
    Country::new("NO", "Norway", "+47"),
    Country::new("PK", "Pakistan", "+92"),
    Country::new("PH", "Philippines", "+63"),
    Country::new("PL", "Poland", "+48"),
    Country::new("PT", "Portugal", "+351"),
    Country::new("RO", "Romania", "+40"),
    Country::new("RU", "Russian Federation", "+7"),
    Country::new("SA", "Saudi Arabia", "+966"),
    Country::new("RS", "Serbia", "+381"),
    Country::new("SG", "Singapore", "+65"),
    Country::new("SK", "Slovakia", "+421"),
    Country::new("SI", "Slovenia", "+386"),
    Country::new("ZA", "South Africa", "+27"),
    Country::new("ES", "Spain", "+34"),
    Country::new("SE", "Sweden", "+46"),
    Country::new("CH", "Switzerland", "+41"),
    Country::new("TH", "Thailand", "+66"),
    Country::new("TR", "Turkey", "+90"),
    Country::new("UA", "Ukraine", "+380"),
    Country::new("AE", "United Arab Emirates", "+971"),
    Country::new("GB", "United Kingdom", "+44"),
    Country::new("US", "United States", "+1"),
    Country::new("VN", "Viet Nam", "+84"),
];

pub fn find_by_iso(iso: &str) -> Option<&'static Country> {
    COUNTRIES.iter().find(|c| c.iso.eq_ignore_ascii_case(iso))
}

pub fn find_by_name(name: &str) -> Option<&'static Country> {
    COUNTRIES.iter().find(|c| c.name.eq_ignore_ascii_case(name))
}

/// First country using `dial_code`. Shared codes resolve to the country
/// listed first by name.
pub fn find_by_dial_code(dial_code: &str) -> Option<&'static Country> {
    COUNTRIES.iter().find(|c| c.dial_code == dial_code)
}

/// Extracts the first `+<digits>` sequence of `value`.
pub fn extract_dial_code(value: &str) -> Option<&str> {
    let start = value.find('+')?;
    let digits = value[start + 1..]
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(value.len() - start - 1);
    (digits > 0).then(|| &value[start..start + 1 + digits])
}

/// Resolved dial code and region of a country field value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DialTarget {
    pub dial_code: String,
    pub region: Option<&'static str>,
}

/// Resolves a country field value to a dial code: an explicit `+<digits>`
/// (as in `"🇺🇸 United States (+1)"`), an ISO code such as `"US"`, or a
/// country name. Returns `None` when nothing matches.
pub fn resolve(value: &str) -> Option<DialTarget> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    if let Some(dial_code) = extract_dial_code(value) {
        let region = COUNTRIES
            .iter()
            .find(|c| c.dial_code == dial_code && value.contains(c.name))
            .or_else(|| find_by_dial_code(dial_code))
            .map(|c| c.iso);
        return Some(DialTarget {
            dial_code: dial_code.to_string(),
            region,
        });
    }
    find_by_iso(value)
        .or_else(|| find_by_name(value))
        .map(|c| DialTarget {
            dial_code: c.dial_code.to_string(),
            region: Some(c.iso),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flag_from_iso() {
        let us = find_by_iso("us").expect("US");
        assert_eq!(us.flag(), "\u{1F1FA}\u{1F1F8}");
        assert_eq!(us.dial_code, "+1");
    }

    #[test]
    fn test_table_sorted_by_name() {
        assert!(COUNTRIES.windows(2).all(|w| w[0].name <= w[1].name));
    }

    #[test]
    fn test_extract_dial_code() {
        assert_eq!(extract_dial_code("\u{1F1E9}\u{1F1EA} Germany (+49)"), Some("+49"));
        assert_eq!(extract_dial_code("+1"), Some("+1"));
        assert_eq!(extract_dial_code("+"), None);
        assert_eq!(extract_dial_code("US"), None);
    }

    #[test]
    fn test_resolve_variants() {
        let us = resolve("US").expect("iso");
        assert_eq!(us.dial_code, "+1");
        assert_eq!(us.region, Some("US"));

        let by_name = resolve("united kingdom").expect("name");
        assert_eq!(by_name.dial_code, "+44");

        let labelled = resolve("United States (+1)").expect("label");
        assert_eq!(labelled.region, Some("US"));

        assert_eq!(resolve("Atlantis"), None);
        assert_eq!(resolve(" "), None);
    }
}
