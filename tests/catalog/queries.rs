//! Query behaviour: tier filtering, lookups, copy isolation.

use media_catalog::catalog::messages;
use media_catalog::{Catalog, Tier};

use crate::support::{item_titled, new_item, INVALID_TIERS};

#[test]
fn created_item_appears_only_under_its_tier() {
    for tier in Tier::ALL {
        let catalog = Catalog::new();
        let title = format!("{} feature", tier);
        assert_eq!(
            catalog.create_item(new_item(&title, tier.as_str())),
            messages::ITEM_CREATED
        );

        for other in Tier::ALL {
            let count = catalog
                .items_by_tier(other.as_str())
                .iter()
                .filter(|item| item.title == title)
                .count();
            assert_eq!(count, usize::from(other == tier), "tier {other} for {tier}");
        }
    }
}

#[test]
fn invalid_tier_query_is_empty() {
    let catalog = Catalog::with_sample_data();
    for tier in INVALID_TIERS {
        assert!(catalog.items_by_tier(tier).is_empty());
    }
}

#[test]
fn round_trip_through_item_by_id() {
    let catalog = Catalog::new();
    catalog.create_item(new_item("Stalker", "PREMIUM"));
    let created = item_titled(&catalog, "Stalker");

    let loaded = catalog.item_by_id(&created.id).unwrap();
    assert_eq!(loaded.title, "Stalker");
    assert_eq!(loaded.description, "About Stalker");
    assert_eq!(loaded.tier, Tier::Premium);
    assert_eq!(loaded.image_url, "https://img.example/Stalker.jpg");
    assert_eq!(loaded.trailer_url, "7-trailer");
    assert!(!loaded.id.is_empty());

    let again = catalog.item_by_id(&created.id).unwrap();
    assert_eq!(again.id, loaded.id);
    assert_eq!(again.created_at, loaded.created_at);
}

#[test]
fn reads_are_equal_but_not_aliased() {
    let catalog = Catalog::new();
    catalog.create_item(new_item("Ran", "BASIC"));
    let id = item_titled(&catalog, "Ran").id;

    let mut first = catalog.item_by_id(&id).unwrap();
    let second = catalog.item_by_id(&id).unwrap();
    assert_eq!(first, second);

    first.title.push_str(" (edited)");
    first.tier = Tier::Premium;
    assert_eq!(catalog.item_by_id(&id).unwrap(), second);
    assert_eq!(catalog.items_by_tier("BASIC"), vec![second]);
}

#[test]
fn listing_keeps_insertion_order() {
    let catalog = Catalog::new();
    for title in ["Zodiac", "Alien", "Memento"] {
        catalog.create_item(new_item(title, "STANDARD"));
    }
    let titles: Vec<String> = catalog
        .items_by_tier("STANDARD")
        .into_iter()
        .map(|item| item.title)
        .collect();
    assert_eq!(titles, vec!["Zodiac", "Alien", "Memento"]);
}

#[test]
fn unknown_ids_are_none() {
    let catalog = Catalog::with_sample_data();
    assert!(catalog.item_by_id("does-not-exist").is_none());
    assert!(catalog.subscriber_by_id("does-not-exist").is_none());
}

#[test]
fn all_subscribers_returns_copies() {
    let catalog = Catalog::with_sample_data();
    let mut listed = catalog.all_subscribers();
    assert_eq!(listed.len(), 3);

    listed[0].password = "leaked".to_string();
    assert_eq!(catalog.all_subscribers()[0].password, "123456");
}
