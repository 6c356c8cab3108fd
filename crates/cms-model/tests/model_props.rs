use cms_model::{Abcd, AbcdError, AbcdField, PeoId, Semester, SemesterSlot, SequentialId};
use proptest::prelude::*;

fn semester() -> impl Strategy<Value = Semester> {
    prop_oneof![
        Just(Semester::First),
        Just(Semester::Second),
        Just(Semester::Midyear)
    ]
}

proptest! {
    #[test]
    fn prop_next_id_is_max_plus_one(raw in proptest::collection::vec(0..10_000u32, 0..20)) {
        let ids: Vec<PeoId> = raw.iter().copied().map(PeoId).collect();
        let next = PeoId::next_after(ids.iter().copied());
        prop_assert!(ids.iter().all(|id| *id < next));
        prop_assert_eq!(next.get(), raw.iter().copied().max().unwrap_or(0) + 1);
    }

    #[test]
    fn prop_disjoint_phrases_validate(
        behavior in "[a-c]{1,6}",
        condition in "[d-f]{1,6}",
        degree in "[g-i]{1,6}",
    ) {
        let statement = format!("{condition}, students {behavior} {degree}");
        let abcd = Abcd {
            audience: "students".to_string(),
            behavior,
            condition,
            degree,
        };
        prop_assert_eq!(abcd.validate(&statement), Ok(()));
    }

    #[test]
    fn prop_absent_behavior_is_reported(
        behavior in "[j-k]{1,4}",
        condition in "[d-f]{1,6}",
        degree in "[g-i]{1,6}",
    ) {
        let statement = format!("{condition} {degree}");
        let abcd = Abcd {
            audience: String::new(),
            behavior: behavior.clone(),
            condition,
            degree,
        };
        prop_assert_eq!(
            abcd.validate(&statement),
            Err(AbcdError::NotInStatement { field: AbcdField::Behavior, text: behavior })
        );
    }

    #[test]
    fn prop_slots_order_by_year_then_semester(
        a in (1..6u8, semester()),
        b in (1..6u8, semester()),
    ) {
        let (x, y) = (SemesterSlot::new(a.0, a.1), SemesterSlot::new(b.0, b.1));
        if a.0 != b.0 {
            prop_assert_eq!(x < y, a.0 < b.0);
        } else {
            prop_assert_eq!(x.cmp(&y), a.1.cmp(&b.1));
        }
    }
}
