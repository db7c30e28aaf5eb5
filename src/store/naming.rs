//! Filename generation for stored photos.
//!
//! Names look like `photo_2026-10-18_14-03-59_9f3a01bc.jpg`: the server's
//! local capture second plus an 8-character random hex suffix. The suffix
//! only makes same-second collisions unlikely; `persist` refuses to overwrite
//! and asks for a new name when one happens anyway.

use chrono::{DateTime, TimeZone};

use super::sniff::ImageKind;

/// Prefix shared by every generated name.
pub const NAME_PREFIX: &str = "photo_";

/// `chrono` format for the date/time part.
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d_%H-%M-%S";

/// Length of the random suffix.
pub const SUFFIX_LEN: usize = 8;

/// Build a filename for a photo captured at `now`.
pub fn generate_filename<Tz>(now: &DateTime<Tz>, kind: ImageKind) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    format!(
        "{NAME_PREFIX}{}_{}.{}",
        now.format(TIMESTAMP_FORMAT),
        random_suffix(),
        kind.extension()
    )
}

fn random_suffix() -> String {
    let mut suffix = uuid::Uuid::new_v4().simple().to_string();
    suffix.truncate(SUFFIX_LEN);
    suffix
}

/// Whether `name` has the shape `photo_YYYY-MM-DD_HH-MM-SS_<alnum>.<ext>`.
///
/// Only used to sanity-check generated names; the listing accepts any file
/// with a recognised extension.
#[must_use]
pub fn is_generated_name(name: &str) -> bool {
    let Some(rest) = name.strip_prefix(NAME_PREFIX) else {
        return false;
    };
    let Some((stem, ext)) = rest.rsplit_once('.') else {
        return false;
    };
    if ext.is_empty() || !ext.bytes().all(|b| b.is_ascii_alphanumeric()) {
        return false;
    }
    // "YYYY-MM-DD_HH-MM-SS" is 19 bytes, then '_' and the suffix
    if stem.len() < 21 || !stem.is_char_boundary(19) {
        return false;
    }
    let (stamp, suffix) = stem.split_at(19);
    let Some(suffix) = suffix.strip_prefix('_') else {
        return false;
    };
    let stamp_ok = stamp.bytes().enumerate().all(|(i, b)| match i {
        4 | 7 | 13 | 16 => b == b'-',
        10 => b == b'_',
        _ => b.is_ascii_digit(),
    });
    stamp_ok && !suffix.is_empty() && suffix.bytes().all(|b| b.is_ascii_alphanumeric())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Local, Utc};
    use proptest::prelude::*;

    #[test]
    fn test_generate_uses_timestamp_and_extension() {
        let now = Utc.with_ymd_and_hms(2026, 3, 7, 9, 5, 1).unwrap();
        let name = generate_filename(&now, ImageKind::Jpeg);
        assert!(name.starts_with("photo_2026-03-07_09-05-01_"), "{name}");
        assert!(name.ends_with(".jpg"));
        assert_eq!(name.len(), "photo_2026-03-07_09-05-01_".len() + SUFFIX_LEN + 4);
        assert!(is_generated_name(&name));
    }

    #[test]
    fn test_generate_png_extension() {
        let name = generate_filename(&Local::now(), ImageKind::Png);
        assert!(name.ends_with(".png"));
    }

    #[test]
    fn test_same_second_names_differ() {
        let now = Local::now();
        let a = generate_filename(&now, ImageKind::Jpeg);
        let b = generate_filename(&now, ImageKind::Jpeg);
        assert_ne!(a, b);
    }

    #[test]
    fn test_is_generated_name_rejects_other_shapes() {
        assert!(is_generated_name("photo_2026-10-18_14-03-59_9f3a01bc.jpg"));
        assert!(is_generated_name("photo_2026-10-18_14-03-59_A1.JPG"));
        assert!(!is_generated_name("IMG_0001.jpg"));
        assert!(!is_generated_name("photo_2026-10-18_14-03-59_.jpg"));
        assert!(!is_generated_name("photo_2026-10-18_14-03-59_ab-cd.jpg"));
        assert!(!is_generated_name("photo_2026-10-18-14-03-59_abcd.jpg"));
        assert!(!is_generated_name("photo_2026-10-18_14-03-59_abcd"));
        assert!(!is_generated_name("photo_ü026-10-18_14-03-59_abcd.jpg"));
    }

    proptest! {
        #[test]
        fn prop_generated_names_match_pattern(secs in 0i64..4_102_444_800) {
            let now = Utc.timestamp_opt(secs, 0).unwrap();
            let name = generate_filename(&now, ImageKind::Jpeg);
            prop_assert!(is_generated_name(&name), "bad name: {}", name);
        }
    }
}
