//! Step gates - decide whether the draft holds enough data to leave a step.
//!
//! A failing gate is not an error; it only keeps the wizard where it is.

use crate::core::booking::BookingDraft;
use crate::core::step::Step;

/// Number of digits in a valid mobile number.
pub const MOBILE_DIGITS: usize = 10;
/// Number of digits in a valid pincode.
pub const PINCODE_DIGITS: usize = 6;

/// Whether the draft satisfies the gate for `step`.
#[must_use]
pub fn can_advance(step: Step, draft: &BookingDraft) -> bool {
    match step {
        Step::CATEGORY => draft.category.is_some(),
        Step::SERVICE => !draft.sub_category.is_empty(),
        Step::LOCATION => !draft.location.address.is_empty(),
        Step::SCHEDULE => !draft.date.is_empty() && !draft.time.is_empty(),
        Step::DETAILS => {
            !draft.user_details.name.is_empty() && is_valid_mobile(&draft.user_details.mobile)
        }
        Step::ADDRESS => {
            let address = &draft.address;
            !address.house.is_empty()
                && !address.street.is_empty()
                && !address.place.is_empty()
                && !address.district.is_empty()
                && is_valid_pincode(&address.pincode)
        }
        _ => true,
    }
}

/// Strips every non-digit character and keeps the first 10 digits.
#[must_use]
pub fn normalize_mobile(raw: &str) -> String {
    raw.chars()
        .filter(char::is_ascii_digit)
        .take(MOBILE_DIGITS)
        .collect()
}

/// Exactly 10 ASCII digits.
#[must_use]
pub fn is_valid_mobile(mobile: &str) -> bool {
    is_digits_of_len(mobile, MOBILE_DIGITS)
}

/// Exactly 6 ASCII digits. No normalization is applied.
#[must_use]
pub fn is_valid_pincode(pincode: &str) -> bool {
    is_digits_of_len(pincode, PINCODE_DIGITS)
}

fn is_digits_of_len(value: &str, len: usize) -> bool {
    value.len() == len && value.bytes().all(|b| b.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::booking::{Address, DraftUpdate, Location, UserDetails};
    use crate::core::catalog::ServiceCategory;
    use crate::test_utils::filled_draft;

    #[test]
    fn test_empty_draft_fails_every_data_gate() {
        let draft = BookingDraft::default();
        for step in Step::all().take(6) {
            assert!(!can_advance(step, &draft), "gate {step} should be closed");
        }
        assert!(can_advance(Step::REVIEW, &draft));
    }

    #[test]
    fn test_filled_draft_passes_every_gate() {
        let draft = filled_draft();
        for step in Step::all() {
            assert!(can_advance(step, &draft), "gate {step} should be open");
        }
    }

    #[test]
    fn test_gates_open_one_field_at_a_time() {
        let mut draft = BookingDraft::default();

        draft.merge(DraftUpdate::default().category(ServiceCategory::Home));
        assert!(can_advance(Step::CATEGORY, &draft));

        draft.merge(DraftUpdate::default().sub_category("plumbing"));
        assert!(can_advance(Step::SERVICE, &draft));

        draft.merge(DraftUpdate::default().location(Location::from_address("12 Oak Rd")));
        assert!(can_advance(Step::LOCATION, &draft));

        draft.merge(DraftUpdate::default().date("2025-06-01"));
        assert!(!can_advance(Step::SCHEDULE, &draft));
        draft.merge(DraftUpdate::default().time("10:00 AM"));
        assert!(can_advance(Step::SCHEDULE, &draft));
    }

    #[test]
    fn test_details_gate_requires_ten_digit_mobile() {
        let mut draft = filled_draft();
        draft.user_details = UserDetails::from_input("Asha", "98765");
        assert!(!can_advance(Step::DETAILS, &draft));

        draft.user_details = UserDetails::from_input("", "9876543210");
        assert!(!can_advance(Step::DETAILS, &draft));

        draft.user_details = UserDetails::from_input("Asha", "+91 98765 43210");
        // Leading country code digits are kept; truncation drops the tail
        assert_eq!(draft.user_details.mobile, "9198765432");
        assert!(can_advance(Step::DETAILS, &draft));
    }

    #[test]
    fn test_address_gate_requires_six_digit_pincode() {
        let mut draft = filled_draft();
        draft.address.pincode = "56001".to_string();
        assert!(!can_advance(Step::ADDRESS, &draft));

        draft.address.pincode.push('9');
        assert!(can_advance(Step::ADDRESS, &draft));

        draft.address.pincode = "56 001".to_string();
        assert!(!can_advance(Step::ADDRESS, &draft));
    }

    #[test]
    fn test_address_gate_requires_every_field() {
        let blanked: [fn(&mut Address); 4] = [
            |a: &mut Address| a.house.clear(),
            |a: &mut Address| a.street.clear(),
            |a: &mut Address| a.place.clear(),
            |a: &mut Address| a.district.clear(),
        ];
        for blank in blanked {
            let mut draft = filled_draft();
            blank(&mut draft.address);
            assert!(!can_advance(Step::ADDRESS, &draft));
        }
    }

    #[test]
    fn test_normalize_mobile() {
        assert_eq!(normalize_mobile("9876543210"), "9876543210");
        assert_eq!(normalize_mobile("98-7654 3210"), "9876543210");
        assert_eq!(normalize_mobile("987654321012"), "9876543210");
        assert_eq!(normalize_mobile("abc"), "");
    }

    #[test]
    fn test_normalize_mobile_is_idempotent() {
        for raw in ["98-7654 3210", "12345", "(987) 654-3210 ext 99", ""] {
            let once = normalize_mobile(raw);
            assert_eq!(normalize_mobile(&once), once);
        }
    }

    #[test]
    fn test_non_ascii_digits_are_not_digits() {
        // Devanagari digits are numeric but not ASCII
        assert!(!is_valid_pincode("५६०००१"));
        assert_eq!(normalize_mobile("९८७६५४३२१०"), "");
    }
}
