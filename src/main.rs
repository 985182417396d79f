//! # Delivery Resolver demo
//!
//! Starts a [`DeliverySystem`], registers a two-locale space with a `cat`
//! content type, ingests two cats that point at each other and reads their
//! fields across locales.

use delivery_resolver::engine::FieldOptions;
use delivery_resolver::lifecycle::tracing::setup_tracing;
use delivery_resolver::lifecycle::DeliverySystem;
use delivery_resolver::model::{
    ContentType, Field, FieldType, Locale, LocaleGraph, LinkType, SystemProperties,
};
use serde_json::json;
use tracing::{info, Instrument};

const SPACE: &str = "cfexampleapi";

fn cat_type() -> ContentType {
    ContentType::new(SystemProperties::new("cat", "ContentType").with_space(SPACE), "Cat")
        .with_display_field("name")
        .with_field(Field::new("name", "Name", FieldType::Text).localized().required())
        .with_field(Field::array("likes", "Likes", FieldType::Symbol))
        .with_field(Field::new("color", "Color", FieldType::Symbol))
        .with_field(Field::link("bestFriend", "Best Friend", LinkType::Entry))
        .with_field(Field::new("birthday", "Birthday", FieldType::Date))
        .with_field(Field::new("lives", "Lives", FieldType::Integer))
        .with_field(Field::link("image", "Image", LinkType::Asset).disabled())
}

fn cat(id: &str, names: serde_json::Value, friend: &str) -> serde_json::Value {
    json!({
        "sys": {
            "id": id,
            "type": "Entry",
            "space": {"sys": {"type": "Link", "linkType": "Space", "id": SPACE}},
            "contentType": {"sys": {"type": "Link", "linkType": "ContentType", "id": "cat"}},
            "revision": 5,
            "createdAt": "2013-06-27T22:46:19.513Z",
            "updatedAt": "2013-09-04T09:19:39.027Z"
        },
        "fields": {
            "name": names,
            "likes": {"en-US": ["rainbows", "fish"]},
            "color": {"en-US": "rainbow"},
            "bestFriend": {"en-US": {"sys": {"type": "Link", "linkType": "Entry", "id": friend}}},
            "birthday": {"en-US": "2011-04-04T22:00:00Z"},
            "lives": {"en-US": 1337}
        }
    })
}

#[tokio::main]
async fn main() -> Result<(), String> {
    setup_tracing();

    info!("Starting delivery system");
    let system = DeliverySystem::new();

    let locales = LocaleGraph::new(vec![
        Locale::new("en-US", "English (United States)").as_default(),
        Locale::new("tlh", "Klingon").with_fallback("en-US"),
    ])
    .map_err(|e| e.to_string())?;

    let span = tracing::info_span!("space_setup");
    async {
        system.register_space(SPACE, locales).await?;
        system.register_content_type(cat_type()).await
    }
    .instrument(span)
    .await
    .map_err(|e| e.to_string())?;

    let nyancat = system
        .ingest(cat("nyancat", json!({"en-US": "Nyan Cat", "tlh": "Nyan vIghro'"}), "happycat"))
        .await
        .map_err(|e| e.to_string())?;
    system
        .ingest(cat("happycat", json!({"en-US": "Happy Cat"}), "nyancat"))
        .await
        .map_err(|e| e.to_string())?;

    for locale in ["en-US", "tlh"] {
        let nyancat = nyancat.with_locale(locale).map_err(|e| e.to_string())?;
        let name = nyancat
            .get_field("name", FieldOptions::default())
            .await
            .map_err(|e| e.to_string())?;
        let friend = nyancat
            .get_field("bestFriend", FieldOptions::default())
            .await
            .map_err(|e| e.to_string())?
            .into_entry()
            .ok_or("bestFriend is not set")?;
        let friend_name = friend.display_value().await.map_err(|e| e.to_string())?;
        info!(
            locale,
            name = ?name.as_str(),
            best_friend = ?friend_name.as_str(),
            "Read nyancat"
        );
    }

    let friend_id = nyancat
        .get_field("bestFriendId", FieldOptions::default())
        .await
        .map_err(|e| e.to_string())?;
    info!(best_friend_id = ?friend_id.as_str(), resolved = nyancat.resolved_links(), "Link cache");

    let json = nyancat.to_json().map_err(|e| e.to_string())?;
    println!("{}", serde_json::to_string_pretty(&json).map_err(|e| e.to_string())?);

    drop(nyancat);
    system.shutdown().await?;
    Ok(())
}
