//! Mutation behaviour: validation, merge law, deletion.

use std::collections::HashSet;
use std::thread;

use media_catalog::catalog::{messages, Channel};
use media_catalog::model::{MediaItemPatch, SubscriberPatch};
use media_catalog::{Catalog, Tier};

use crate::support::{
    item_titled, new_item, new_subscriber, subscriber_with_email, INVALID_TIERS,
};

#[test]
fn invalid_tier_create_is_rejected_without_side_effects() {
    let catalog = Catalog::with_sample_data();
    let items_before = catalog.items().len();
    let subscribers_before = catalog.subscribers().len();

    for tier in INVALID_TIERS {
        assert_eq!(
            catalog.create_item(new_item("Nope", tier)),
            messages::INVALID_TIER
        );
        assert_eq!(
            catalog.create_subscriber(new_subscriber("nope@example.com", "x", tier)),
            messages::INVALID_TIER
        );
    }

    assert_eq!(catalog.items().len(), items_before);
    assert_eq!(catalog.subscribers().len(), subscribers_before);
}

#[test]
fn update_changes_only_supplied_fields() {
    let catalog = Catalog::new();
    catalog.create_item(new_item("Brazil", "BASIC"));
    let before = item_titled(&catalog, "Brazil");

    assert_eq!(
        catalog.update_item(&before.id, MediaItemPatch::default().title("Brazil (1985)")),
        messages::ITEM_UPDATED
    );

    let after = catalog.item_by_id(&before.id).unwrap();
    assert_eq!(after.title, "Brazil (1985)");
    assert_eq!(after.description, before.description);
    assert_eq!(after.tier, before.tier);
    assert_eq!(after.image_url, before.image_url);
    assert_eq!(after.trailer_url, before.trailer_url);
    assert_eq!(after.id, before.id);
    assert_eq!(after.created_at, before.created_at);
}

#[test]
fn empty_update_leaves_item_unchanged() {
    let catalog = Catalog::new();
    catalog.create_item(new_item("Heat", "STANDARD"));
    let before = item_titled(&catalog, "Heat");

    assert_eq!(
        catalog.update_item(&before.id, MediaItemPatch::default()),
        messages::ITEM_UPDATED
    );
    let blanked = MediaItemPatch::default()
        .title("")
        .description("")
        .tier("")
        .image_url("")
        .trailer_url("");
    assert_eq!(catalog.update_item(&before.id, blanked), messages::ITEM_UPDATED);

    assert_eq!(catalog.item_by_id(&before.id).unwrap(), before);
}

#[test]
fn update_moves_item_between_tiers() {
    let catalog = Catalog::new();
    catalog.create_item(new_item("Ikiru", "BASIC"));
    let id = item_titled(&catalog, "Ikiru").id;

    catalog.update_item(&id, MediaItemPatch::default().tier("PREMIUM"));

    assert!(catalog.items_by_tier("BASIC").is_empty());
    assert_eq!(catalog.items_by_tier("PREMIUM")[0].id, id);
}

#[test]
fn update_with_invalid_tier_is_rejected() {
    let catalog = Catalog::new();
    catalog.create_item(new_item("Ikiru", "BASIC"));
    let before = item_titled(&catalog, "Ikiru");

    let patch = MediaItemPatch::default().title("Changed").tier("GOLD");
    assert_eq!(catalog.update_item(&before.id, patch), messages::INVALID_TIER);
    assert_eq!(catalog.item_by_id(&before.id).unwrap(), before);
}

#[test]
fn update_unknown_id_is_not_found() {
    let catalog = Catalog::new();
    assert_eq!(
        catalog.update_item("missing", MediaItemPatch::default().title("x")),
        messages::ITEM_NOT_FOUND
    );
    assert_eq!(
        catalog.update_subscriber("missing", SubscriberPatch::default().name("x")),
        messages::SUBSCRIBER_NOT_FOUND
    );
}

#[test]
fn delete_then_get_is_not_found() {
    let catalog = Catalog::new();
    catalog.create_item(new_item("Tenet", "PREMIUM"));
    let id = item_titled(&catalog, "Tenet").id;

    assert_eq!(catalog.delete_item(&id), messages::ITEM_DELETED);
    assert!(catalog.item_by_id(&id).is_none());
    assert_eq!(catalog.delete_item(&id), messages::ITEM_NOT_FOUND);
}

#[test]
fn delete_keeps_other_records_in_order() {
    let catalog = Catalog::new();
    for title in ["One", "Two", "Three"] {
        catalog.create_item(new_item(title, "BASIC"));
    }
    let two = item_titled(&catalog, "Two").id;
    catalog.delete_item(&two);

    let titles: Vec<String> = catalog
        .items_by_tier("BASIC")
        .into_iter()
        .map(|item| item.title)
        .collect();
    assert_eq!(titles, vec!["One", "Three"]);
}

#[test]
fn subscriber_lifecycle() {
    let catalog = Catalog::new();
    assert_eq!(
        catalog.create_subscriber(new_subscriber("sam@example.com", "pw", "BASIC")),
        messages::SUBSCRIBER_CREATED
    );
    let created = subscriber_with_email(&catalog, "sam@example.com");
    assert_eq!(created.tier, Tier::Basic);

    assert_eq!(
        catalog.update_subscriber(&created.id, SubscriberPatch::default().tier("STANDARD")),
        messages::SUBSCRIBER_UPDATED
    );
    let updated = catalog.subscriber_by_id(&created.id).unwrap();
    assert_eq!(updated.tier, Tier::Standard);
    assert_eq!(updated.email, created.email);
    assert_eq!(updated.password, created.password);

    assert_eq!(catalog.delete_subscriber(&created.id), messages::SUBSCRIBER_DELETED);
    assert_eq!(catalog.delete_subscriber(&created.id), messages::SUBSCRIBER_NOT_FOUND);
    assert!(catalog.all_subscribers().is_empty());
}

#[test]
fn duplicate_emails_are_accepted() {
    let catalog = Catalog::new();
    catalog.create_subscriber(new_subscriber("dup@example.com", "a", "BASIC"));
    catalog.create_subscriber(new_subscriber("dup@example.com", "b", "PREMIUM"));
    assert_eq!(catalog.all_subscribers().len(), 2);
}

#[test]
fn parallel_creates_are_all_stored_and_announced() {
    const THREADS: usize = 8;
    const PER_THREAD: usize = 200;

    let catalog = Catalog::new();
    let mut announced = catalog.subscribe(Channel::ItemCreated);

    thread::scope(|scope| {
        for t in 0..THREADS {
            let catalog = catalog.clone();
            scope.spawn(move || {
                let tier = ["BASIC", "STANDARD", "PREMIUM"][t % 3];
                for n in 0..PER_THREAD {
                    let title = format!("Reel {t}-{n}");
                    assert_eq!(
                        catalog.create_item(new_item(&title, tier)),
                        messages::ITEM_CREATED
                    );
                }
            });
        }
    });

    let items = catalog.items().all();
    assert_eq!(items.len(), THREADS * PER_THREAD);
    let ids: HashSet<_> = items.iter().map(|item| item.id.as_str()).collect();
    assert_eq!(ids.len(), THREADS * PER_THREAD);

    let mut delivered = 0;
    while announced.try_recv().is_some() {
        delivered += 1;
    }
    assert_eq!(delivered, THREADS * PER_THREAD);
}
