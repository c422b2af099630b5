//! Property tests for the card-stack algebra.

use parliament_engine::cards::{Card, CardStack, Suit};
use parliament_engine::StackError;
use proptest::prelude::*;

/// An arbitrary stack: any subset of the unique cards plus a few jokers.
fn any_stack() -> impl Strategy<Value = CardStack> {
    (any::<u64>(), 0u64..8).prop_map(|(unique, jokers)| {
        let unique_mask = (1u64 << 52) - 1;
        CardStack::from_bits((unique & unique_mask) | (jokers << 52))
    })
}

/// A stack and a sub-stack of it.
fn stack_and_subset() -> impl Strategy<Value = (CardStack, CardStack)> {
    (any_stack(), any::<u64>(), any::<u32>()).prop_map(|(whole, mask, jokers)| {
        let unique = whole.unique() & mask;
        let jokers = u64::from(jokers % (whole.joker_count() + 1));
        (whole, CardStack::from_bits(unique | (jokers << 52)))
    })
}

proptest! {
    #[test]
    fn prop_empty_is_contained_everywhere(stack in any_stack()) {
        prop_assert!(stack.contains(CardStack::EMPTY));
        prop_assert!(stack.contains(stack));
        prop_assert_eq!(CardStack::EMPTY.contains(stack), stack.is_empty());
    }

    #[test]
    fn prop_containment_is_transitive((b, a) in stack_and_subset(), mask in any::<u64>()) {
        // c is a subset of a, which is a subset of b.
        let c = CardStack::from_bits(a.unique() & mask);
        prop_assert!(a.contains(c));
        prop_assert!(b.contains(a));
        prop_assert!(b.contains(c));
    }

    #[test]
    fn prop_remove_then_insert_restores((whole, part) in stack_and_subset()) {
        let mut stack = whole;
        stack.remove(part).unwrap();
        prop_assert_eq!(stack.size(), whole.size() - part.size());
        prop_assert!(stack.is_disjoint(CardStack::from_bits(part.unique())));
        stack.insert(part).unwrap();
        prop_assert_eq!(stack, whole);
    }

    #[test]
    fn prop_move_conserves_cards((from, part) in stack_and_subset(), to in any_stack()) {
        let mut source = from;
        let mut dest = CardStack::from_bits(to.unique() & !from.unique());
        let before = source.size() + dest.size();

        CardStack::move_cards(&mut dest, &mut source, part).unwrap();
        prop_assert_eq!(source.size() + dest.size(), before);
        prop_assert!(dest.contains(part));
        prop_assert!(source.is_disjoint(part));
    }

    #[test]
    fn prop_failed_remove_changes_nothing(stack in any_stack(), other in any_stack()) {
        let mut copy = stack;
        match copy.remove(other) {
            Ok(()) => prop_assert!(stack.contains(other)),
            Err(e) => {
                prop_assert_eq!(e, StackError::NotContained);
                prop_assert_eq!(copy, stack);
            }
        }
    }

    #[test]
    fn prop_suits_partition_the_unique_cards(stack in any_stack()) {
        let by_suit: u32 = Suit::ALL.iter().map(|&s| stack.count_suit(s)).sum();
        prop_assert_eq!(by_suit + stack.joker_count(), stack.size());
        prop_assert_eq!(stack.cards().count() as u32, stack.size() - stack.joker_count());
        prop_assert!(stack.cards().all(|c: Card| !c.is_joker() && stack.contains_card(c)));
    }
}
