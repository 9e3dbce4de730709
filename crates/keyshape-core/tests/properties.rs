//! Property-based tests for registry and identifier laws.

use keyshape_core::{properties, IdentOptions, Identifier, IdentifierSet, SyntaxRegistry};
use proptest::prelude::*;

fn name_list() -> impl Strategy<Value = Vec<String>> {
    proptest::collection::btree_set("[a-z]{1,6}", 1..5)
        .prop_map(|names| names.into_iter().collect::<Vec<_>>())
        .prop_shuffle()
}

proptest! {
    #[test]
    fn parse_of_to_string_round_trips(
        names in name_list(),
        values in proptest::collection::vec("[A-Za-z0-9_.@-]{1,8}", 5),
    ) {
        let registry = SyntaxRegistry::new();
        let source = properties(names.iter().cloned().zip(values.iter().cloned()));
        let options = IdentOptions::with_syntax(names.clone());
        let id = Identifier::new(&source, &registry, &options);

        let parsed = Identifier::new(&id.to_string(), &registry, &options);
        prop_assert_eq!(parsed.to_json(), id.to_json());
    }

    #[test]
    fn registering_twice_does_not_grow(names in name_list()) {
        let registry = SyntaxRegistry::new();
        registry.register([names.clone()]);
        let count = registry.len();

        let mut reversed = names.clone();
        reversed.reverse();
        registry.register([names.clone(), reversed]);

        prop_assert_eq!(registry.len(), count);
        let all = registry.resolve("", false);
        prop_assert_eq!(all[0].names(), names.as_slice());
    }

    #[test]
    fn set_is_same_is_or_of_members(
        type_value in "[a-z]{1,4}",
        id_value in "[0-9]{1,4}",
        other_type in "[a-z]{1,4}",
        other_id in "[0-9]{1,4}",
    ) {
        let registry = SyntaxRegistry::new();
        registry.register(["type/id", "id"]);
        let set = IdentifierSet::new(
            &properties([("type", type_value.as_str()), ("id", id_value.as_str())]),
            &registry,
            &IdentOptions::default(),
        );
        let candidate = properties([("type", other_type.as_str()), ("id", other_id.as_str())]);

        let any_member = set.iter().any(|(_, member)| member.is_same(&candidate));
        prop_assert_eq!(set.is_same(&candidate), any_member);
    }
}
