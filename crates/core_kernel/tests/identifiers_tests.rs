//! Tests for identifiers and the identifier generator
//!
//! Covers the numeric and UUID id spaces, configuration checks and the
//! check-and-retry helper used by the ledger store.

use std::collections::HashSet;

use core_kernel::identifiers::is_uuid;
use core_kernel::{ClientId, CoreError, IdGenerator, IdSpace, PaymentId, ReservationId};

mod numeric_space {
    use super::*;

    #[test]
    fn test_fixed_width_ids() {
        let mut generator = IdGenerator::new(IdSpace::Numeric { digits: 8 }).unwrap();
        for _ in 0..100 {
            let id = generator.new_id();
            assert_eq!(id.len(), 8);
            assert!(id.chars().all(|c| c.is_ascii_digit()));
            assert!(!id.starts_with('0'));
        }
    }

    #[test]
    fn test_capacity() {
        assert_eq!(IdSpace::Numeric { digits: 5 }.capacity(), Some(90_000));
        assert_eq!(IdSpace::Numeric { digits: 1 }.capacity(), Some(9));
        assert_eq!(IdSpace::Uuid.capacity(), None);
    }

    #[test]
    fn test_widest_supported_space() {
        let mut generator = IdGenerator::new(IdSpace::Numeric { digits: 18 }).unwrap();
        assert_eq!(generator.new_id().len(), 18);
    }

    #[test]
    fn test_too_wide_rejected() {
        let result = IdGenerator::new(IdSpace::Numeric { digits: 19 });
        assert!(matches!(result, Err(CoreError::Configuration(_))));
    }

    #[test]
    fn test_unique_id_exhausted_space() {
        let mut generator = IdGenerator::seeded(IdSpace::Numeric { digits: 1 }, 11).unwrap();
        assert!(generator.new_unique_id(64, |_| true).is_none());
    }

    #[test]
    fn test_unique_ids_until_full() {
        let mut generator = IdGenerator::seeded(IdSpace::Numeric { digits: 1 }, 5).unwrap();
        let mut taken = HashSet::new();
        for _ in 0..50 {
            if let Some(id) = generator.new_unique_id(16, |c| taken.contains(c)) {
                assert!(taken.insert(id));
            }
        }
        assert!(taken.len() <= 9);
    }
}

mod uuid_space {
    use super::*;

    #[test]
    fn test_uuid_ids_parse() {
        let mut generator = IdGenerator::new(IdSpace::Uuid).unwrap();
        let id = generator.new_id();
        assert!(is_uuid(&id));
        assert_eq!(id.len(), 36);
    }

    #[test]
    fn test_seeded_uuid_ids_repeat() {
        let mut a = IdGenerator::seeded(IdSpace::Uuid, 42).unwrap();
        let mut b = IdGenerator::seeded(IdSpace::Uuid, 42).unwrap();
        assert_eq!(a.new_id(), b.new_id());
    }
}

mod typed_ids {
    use super::*;

    #[test]
    fn test_kinds() {
        assert_eq!(ClientId::kind(), "client");
        assert_eq!(ReservationId::kind(), "reservation");
        assert_eq!(PaymentId::kind(), "payment");
    }

    #[test]
    fn test_string_conversions() {
        let id = ReservationId::from("54321");
        assert_eq!(id.as_str(), "54321");
        let raw: String = id.clone().into();
        assert_eq!(raw, "54321");
        assert_eq!(ReservationId::new(raw), id);
    }

    #[test]
    fn test_json_is_transparent() {
        let id = PaymentId::new("77777");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"77777\"");
        let back: PaymentId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }

    #[test]
    fn test_id_space_serde_shape() {
        let space: IdSpace = serde_json::from_str(r#"{"kind":"numeric","digits":6}"#).unwrap();
        assert_eq!(space, IdSpace::Numeric { digits: 6 });
        let space: IdSpace = serde_json::from_str(r#"{"kind":"uuid"}"#).unwrap();
        assert_eq!(space, IdSpace::Uuid);
    }
}
