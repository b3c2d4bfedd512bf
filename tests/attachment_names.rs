//! Property tests for content-id part-name extraction.
//!
//! Content-ids follow the WSI AP 1.0 part encoding
//! `<name=unique@domain>`; ids that do not carry both delimiters must be
//! treated as unmatched, never as errors.

use partwire::message::Attachment;
use proptest::prelude::*;

fn attachment(content_id: &str) -> Attachment {
    Attachment::new(content_id, "application/octet-stream", &b""[..])
}

proptest! {
    #[test]
    fn bracketed_part_encoding_recovers_the_name(
        name in "[A-Za-z][A-Za-z0-9_.-]{0,16}",
        unique in "[0-9a-f]{8,32}",
        domain in "[a-z]{1,10}\\.(com|org|net)",
    ) {
        let att = attachment(&format!("<{name}={unique}@{domain}>"));
        // The leading '<' survives extraction; matching accepts both forms.
        prop_assert_eq!(att.part_name(), Some(format!("<{name}")));
    }

    #[test]
    fn bare_part_encoding_recovers_the_name(
        name in "[A-Za-z][A-Za-z0-9_.-]{0,16}",
        unique in "[0-9a-f]{8,32}",
        domain in "[a-z]{1,10}\\.(com|org|net)",
    ) {
        let att = attachment(&format!("{name}={unique}@{domain}"));
        prop_assert_eq!(att.part_name(), Some(name));
    }

    #[test]
    fn percent_escapes_decode_as_utf8(
        name in "[A-Za-z]{1,8}",
        suffix in "[\\u{00e0}-\\u{00ff}]{1,4}",
    ) {
        let decoded = format!("{name}{suffix}");
        let escapes: String = suffix.bytes().map(|b| format!("%{b:02X}")).collect();
        let escaped = format!("{name}{escapes}");
        let att = attachment(&format!("{escaped}=u@example.com"));
        prop_assert_eq!(att.part_name(), Some(decoded));
    }

    #[test]
    fn ids_without_an_at_sign_never_match(id in "[A-Za-z0-9=_.-]{1,32}") {
        prop_assert_eq!(attachment(&id).part_name(), None);
    }

    #[test]
    fn ids_without_an_equals_never_match(
        local in "[A-Za-z0-9_.-]{1,16}",
        domain in "[a-z]{1,10}\\.com",
    ) {
        let att = attachment(&format!("{local}@{domain}"));
        prop_assert_eq!(att.part_name(), None);
    }
}
