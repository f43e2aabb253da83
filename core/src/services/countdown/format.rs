//! Localized rendering of a countdown remainder.

use af_shared::types::Language;

/// Render a remainder in seconds for display
///
/// Whole minutes render without a seconds part, sub-minute values without
/// a minutes part, and zero renders empty so the caller can hide the
/// countdown entirely.
pub fn format_remaining(seconds: u32, language: Language) -> String {
    let minutes = seconds / 60;
    let rest = seconds % 60;
    let (minute_unit, second_unit) = units(language, minutes, rest);

    match (minutes, rest) {
        (0, 0) => String::new(),
        (m, 0) => format!("{} {}", m, minute_unit),
        (0, s) => format!("{} {}", s, second_unit),
        (m, s) => format!("{} {} {} {}", m, minute_unit, s, second_unit),
    }
}

fn units(language: Language, minutes: u32, seconds: u32) -> (&'static str, &'static str) {
    match language {
        Language::Indonesian => ("menit", "detik"),
        Language::English => (
            if minutes == 1 { "minute" } else { "minutes" },
            if seconds == 1 { "second" } else { "seconds" },
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_indonesian_rendering() {
        assert_eq!(format_remaining(90, Language::Indonesian), "1 menit 30 detik");
        assert_eq!(format_remaining(30, Language::Indonesian), "30 detik");
        assert_eq!(format_remaining(60, Language::Indonesian), "1 menit");
        assert_eq!(format_remaining(0, Language::Indonesian), "");
    }

    #[test]
    fn test_english_rendering() {
        assert_eq!(format_remaining(90, Language::English), "1 minute 30 seconds");
        assert_eq!(format_remaining(1, Language::English), "1 second");
        assert_eq!(format_remaining(120, Language::English), "2 minutes");
        assert_eq!(format_remaining(0, Language::English), "");
    }

    #[test]
    fn test_long_remainders() {
        assert_eq!(
            format_remaining(3599, Language::Indonesian),
            "59 menit 59 detik"
        );
    }
}
