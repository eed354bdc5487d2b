//! Sample records loaded at startup when seeding is enabled.

use chrono::{DateTime, Utc};

use crate::model::{MediaItem, Subscriber, Tier};

// 2024-05-07T16:54:52.212Z
const SAMPLE_CREATED_AT_MS: i64 = 1_715_100_892_212;

const TITLE: &str = "Harry Potter and the Philosopher's Stone";
const DESCRIPTION: &str = "Harry Potter has lived under the stairs at his aunt and uncle's house \
his whole life. But on his 11th birthday, he learns he's a powerful wizard -- with a place \
waiting for him at the Hogwarts School of Witchcraft and Wizardry.";
const TRAILER: &str = "VyHV0BRtdxo";

fn created_at() -> DateTime<Utc> {
    DateTime::from_timestamp_millis(SAMPLE_CREATED_AT_MS).unwrap_or_default()
}

pub fn items() -> Vec<MediaItem> {
    [
        (
            "3faedc9b7e8104a5b623c129",
            "https://th.bing.com/th/id/OIP.eGj4A1QtOZ-xrhWhups6BwHaEK?rs=1&pid=ImgDetMain",
        ),
        (
            "6d48b5fa07e3c9a2f1e48d53",
            "https://i.ebayimg.com/images/g/dEUAAOSwECtkD628/s-l1200.webp",
        ),
        (
            "e2f5a394d7b68e1c40b9a82f",
            "https://img.buzzfeed.com/buzzfeed-static/complex/images/gdv2pu6io6ekpg5r8mta/back-to-the-future.jpg?output-format=jpg&output-quality=auto",
        ),
        (
            "e2f5a394d7b48e1c40b9a82f",
            "https://artofthemovies.co.uk/cdn/shop/files/IMG_4154_1-780453_de0cc110-550d-4448-a7ec-d3ff945c0739.jpg?v=1696169470",
        ),
    ]
    .into_iter()
    .map(|(id, image_url)| MediaItem {
        id: id.to_string(),
        title: TITLE.to_string(),
        description: DESCRIPTION.to_string(),
        tier: Tier::Basic,
        image_url: image_url.to_string(),
        trailer_url: TRAILER.to_string(),
        created_at: created_at(),
    })
    .collect()
}

pub fn subscribers() -> Vec<Subscriber> {
    [
        ("b7d4e3a8f6c90e4b1f25d63a", "example1@example.com", Tier::Basic),
        ("8c5a1d9f7e4b36a0b2e7f5d8", "example2@example.com", Tier::Standard),
        ("9a7b3e4f8c6d2e1b5f9a0c47", "example3@example.com", Tier::Premium),
    ]
    .into_iter()
    .map(|(id, email, tier)| Subscriber {
        id: id.to_string(),
        name: "John Doe".to_string(),
        email: email.to_string(),
        password: "123456".to_string(),
        tier,
        created_at: created_at(),
    })
    .collect()
}
