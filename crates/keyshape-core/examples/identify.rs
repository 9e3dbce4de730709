use keyshape_core::{properties, IdentOptions, IdentifierSet, SyntaxInput, SyntaxRegistry};

fn main() {
    let registry = SyntaxRegistry::new();
    registry.register(["type/id", "username/domain"]);

    let user = properties([
        ("type", "user"),
        ("id", "123"),
        ("username", "alice"),
        ("domain", "example.com"),
    ]);
    let set = IdentifierSet::new(&user, &registry, &IdentOptions::default());

    for (key, member) in set.iter() {
        println!("{:<20} {}", key, member);
    }

    let by_id = SyntaxInput::from("type/id");
    println!("user/123 -> {}", set.is_same_with("user/123", &registry, Some(&by_id)));
    println!("alice/example.org -> {}", set.is_same("alice/example.org"));
    println!("{}", serde_json::to_string_pretty(&set).unwrap_or_else(|_| "{}".to_string()));
}
