//! Property tests for merge and membership invariants.

use ipv4range::{Ipv4Range, Matcher};
use proptest::prelude::*;
use std::net::Ipv4Addr;

/// Bases for the windows ranges are drawn from, including the very top of
/// the address space.
fn arb_base() -> impl Strategy<Value = u32> {
    prop_oneof![Just(0u32), Just(0x0A00_0000u32), Just(u32::MAX - 1023)]
}

fn arb_range() -> impl Strategy<Value = Ipv4Range> {
    (arb_base(), 0u32..=960, 0u32..=63).prop_map(|(base, offset, len)| {
        let from = base + offset;
        Ipv4Range::new(Ipv4Addr::from(from), Ipv4Addr::from(from + len)).unwrap()
    })
}

fn arb_addr() -> impl Strategy<Value = Ipv4Addr> {
    (arb_base(), 0u32..=1023).prop_map(|(base, offset)| Ipv4Addr::from(base + offset))
}

fn arb_ranges() -> impl Strategy<Value = Vec<Ipv4Range>> {
    prop::collection::vec(arb_range(), 0..50)
}

proptest! {
    #[test]
    fn test_merged_ranges_disjoint(ranges in arb_ranges()) {
        let matcher = Matcher::from_ranges(ranges);
        for pair in matcher.ranges().windows(2) {
            let (_, prev_to) = pair[0].bounds();
            let (next_from, _) = pair[1].bounds();
            prop_assert!(u64::from(prev_to) + 1 < u64::from(next_from));
        }
    }

    #[test]
    fn test_merge_idempotent(ranges in arb_ranges()) {
        let matcher = Matcher::from_ranges(ranges);
        let rebuilt = Matcher::from_ranges(matcher.ranges().to_vec());
        prop_assert_eq!(rebuilt, matcher);
    }

    #[test]
    fn test_membership_matches_inputs(
        ranges in arb_ranges(),
        probes in prop::collection::vec(arb_addr(), 0..100),
    ) {
        let matcher = Matcher::from_ranges(ranges.clone());
        for ip in probes {
            let expected = ranges.iter().any(|r| r.contains(ip));
            prop_assert_eq!(matcher.contains_ip(ip), expected, "{}", ip);
            prop_assert_eq!(matcher.contains(&ip.to_string()), expected, "{}", ip);
        }
    }

    #[test]
    fn test_order_invariant(
        (ranges, shuffled) in arb_ranges().prop_flat_map(|v| (Just(v.clone()), Just(v).prop_shuffle())),
    ) {
        prop_assert_eq!(Matcher::from_ranges(ranges), Matcher::from_ranges(shuffled));
    }

    #[test]
    fn test_bounds_inclusive(ranges in arb_ranges()) {
        let matcher = Matcher::from_ranges(ranges.clone());
        for r in &ranges {
            prop_assert!(matcher.contains_ip(r.start()));
            prop_assert!(matcher.contains_ip(r.end()));

            let (from, to) = r.bounds();
            if let Some(before) = from.checked_sub(1) {
                let covered = ranges.iter().any(|o| o.contains(Ipv4Addr::from(before)));
                prop_assert_eq!(matcher.contains_ip(Ipv4Addr::from(before)), covered);
            }
            if let Some(after) = to.checked_add(1) {
                let covered = ranges.iter().any(|o| o.contains(Ipv4Addr::from(after)));
                prop_assert_eq!(matcher.contains_ip(Ipv4Addr::from(after)), covered);
            }
        }
    }

    #[test]
    fn test_display_parses_back(range in arb_range()) {
        prop_assert_eq!(range.to_string().parse::<Ipv4Range>().unwrap(), range);
    }
}
