//! Creation fan-out to channel streams.

use std::time::Duration;

use media_catalog::catalog::{topics, Channel, Notification};
use media_catalog::model::MediaItemPatch;
use media_catalog::{Catalog, Tier};
use tokio::time::timeout;
use tokio_stream::StreamExt;

use crate::support::{item_titled, new_item, new_subscriber};

#[test]
fn premium_create_reaches_generic_and_premium_streams_once() {
    let catalog = Catalog::new();
    let mut all = catalog.subscribe(Channel::ItemCreated);
    let mut premium = catalog.subscribe(Channel::ItemCreatedPremium);
    let mut basic = catalog.subscribe(Channel::ItemCreatedBasic);

    catalog.create_item(new_item("Oldboy", "PREMIUM"));
    let stored = item_titled(&catalog, "Oldboy");

    let from_all = all.try_recv().expect("generic stream notified");
    let from_premium = premium.try_recv().expect("premium stream notified");
    assert_eq!(from_all, Notification::Item(stored.clone()));
    assert_eq!(from_premium, Notification::Item(stored));

    assert!(all.try_recv().is_none());
    assert!(premium.try_recv().is_none());
    assert!(basic.try_recv().is_none());
}

#[test]
fn each_tier_channel_sees_only_its_tier() {
    let catalog = Catalog::new();
    let mut streams: Vec<_> = Tier::ALL
        .into_iter()
        .map(|tier| (tier, catalog.subscribe(Channel::for_tier(tier))))
        .collect();

    for tier in Tier::ALL {
        catalog.create_item(new_item(&format!("{tier} title"), tier.as_str()));
    }

    for (tier, stream) in streams.iter_mut() {
        let delivered = stream.try_recv().expect("one notification");
        assert_eq!(delivered.as_item().map(|item| item.tier), Some(*tier));
        assert!(stream.try_recv().is_none());
    }
}

#[test]
fn independent_streams_on_the_same_channel() {
    let catalog = Catalog::new();
    let mut first = catalog.subscribe(Channel::ItemCreated);
    let mut second = catalog.subscribe(Channel::ItemCreated);

    catalog.create_item(new_item("A", "BASIC"));
    catalog.create_item(new_item("B", "STANDARD"));

    for stream in [&mut first, &mut second] {
        let titles: Vec<String> = std::iter::from_fn(|| stream.try_recv())
            .filter_map(|n| n.as_item().map(|item| item.title.clone()))
            .collect();
        assert_eq!(titles, vec!["A", "B"]);
    }
}

#[test]
fn streams_only_see_events_after_opening() {
    let catalog = Catalog::new();
    catalog.create_item(new_item("Before", "BASIC"));

    let mut late = catalog.subscribe(Channel::ItemCreated);
    assert!(late.try_recv().is_none());

    catalog.create_item(new_item("After", "BASIC"));
    assert_eq!(
        late.try_recv().and_then(|n| n.as_item().map(|i| i.title.clone())),
        Some("After".to_string())
    );
}

#[test]
fn closing_a_stream_leaves_others_untouched() {
    let catalog = Catalog::new();
    let closed = catalog.subscribe(Channel::ItemCreated);
    let mut open = catalog.subscribe(Channel::ItemCreated);
    assert_eq!(catalog.bus().subscriber_count(topics::ITEM_CREATED), 2);

    closed.close();
    assert_eq!(catalog.bus().subscriber_count(topics::ITEM_CREATED), 1);

    catalog.create_item(new_item("Still", "BASIC"));
    assert!(open.try_recv().is_some());
}

#[test]
fn update_and_delete_are_silent() {
    let catalog = Catalog::new();
    catalog.create_item(new_item("Quiet", "BASIC"));
    let id = item_titled(&catalog, "Quiet").id;

    let mut all = catalog.subscribe(Channel::ItemCreated);
    catalog.update_item(&id, MediaItemPatch::default().title("Louder"));
    catalog.delete_item(&id);

    assert!(all.try_recv().is_none());
}

#[test]
fn subscriber_channel_ignores_items() {
    let catalog = Catalog::new();
    let mut subscribers = catalog.subscribe(Channel::SubscriberCreated);

    catalog.create_item(new_item("Not a subscriber", "BASIC"));
    catalog.create_subscriber(new_subscriber("new@example.com", "pw", "STANDARD"));

    let delivered = subscribers.try_recv().expect("subscriber notification");
    assert_eq!(
        delivered.as_subscriber().map(|s| s.email.as_str()),
        Some("new@example.com")
    );
    assert!(subscribers.try_recv().is_none());
}

#[tokio::test]
async fn stream_is_driven_by_an_async_consumer() {
    let catalog = Catalog::new();
    let mut premium = catalog.subscribe(Channel::ItemCreatedPremium);

    let producer = catalog.clone();
    let handle = tokio::spawn(async move {
        for title in ["First", "Second"] {
            tokio::time::sleep(Duration::from_millis(10)).await;
            producer.create_item(new_item(title, "PREMIUM"));
        }
    });

    let mut titles = Vec::new();
    for _ in 0..2 {
        let next = timeout(Duration::from_secs(1), premium.next())
            .await
            .expect("timeout")
            .expect("stream open");
        titles.push(next.as_item().unwrap().title.clone());
    }
    handle.await.unwrap();

    assert_eq!(titles, vec!["First", "Second"]);
}

#[tokio::test]
async fn bus_teardown_ends_streams() {
    let catalog = Catalog::new();
    let mut all = catalog.subscribe(Channel::ItemCreated);

    catalog.create_item(new_item("Last", "BASIC"));
    catalog.bus().close();

    let last = timeout(Duration::from_secs(1), all.recv()).await.expect("timeout");
    assert!(last.is_some());
    let end = timeout(Duration::from_secs(1), all.recv()).await.expect("timeout");
    assert!(end.is_none());
    assert!(all.is_finished());
}
