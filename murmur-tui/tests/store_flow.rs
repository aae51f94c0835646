//! End-to-end flow over the shared post store and carousel, the way the
//! feed and detail views drive them together.

use chrono::{Duration, TimeZone, Utc};
use murmur::carousel::Carousel;
use murmur::store::PostStore;
use murmur_types::{ImageSet, Post, Reply};
use uuid::Uuid;

fn post(id: Uuid) -> Post {
    Post {
        id,
        posted_by: Uuid::new_v4(),
        text: "a post".to_string(),
        img: None,
        video: None,
        location: None,
        created_at: Utc.with_ymd_and_hms(2024, 4, 1, 12, 0, 0).unwrap(),
        replies: Vec::new(),
        likes: Vec::new(),
    }
}

fn reply(id: Uuid, minutes: i64) -> Reply {
    Reply {
        id,
        user_id: Uuid::new_v4(),
        text: "a reply".to_string(),
        user_profile_pic: String::new(),
        username: "someone".to_string(),
        created_at: Utc.with_ymd_and_hms(2024, 4, 1, 12, 0, 0).unwrap()
            + Duration::minutes(minutes),
    }
}

#[test]
fn feed_then_detail_then_reply_then_delete() {
    let mut store = PostStore::new();

    // Feed load fills the store
    let (a, b, c) = (Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4());
    store.replace_all(vec![post(a), post(b), post(c)]);
    assert_eq!(store.len(), 3);

    // Opening a detail view fetches an authoritative copy and replaces
    // the cached entry in place
    let mut fetched = post(b);
    fetched.text = "authoritative".to_string();
    fetched.img = Some(ImageSet::Many(vec![
        "a.png".to_string(),
        "b.png".to_string(),
        "c.png".to_string(),
    ]));
    store.upsert_replace(fetched);
    assert_eq!(store.len(), 3);
    assert_eq!(store.posts()[1].id, b);
    assert_eq!(store.posts()[1].text, "authoritative");

    // The carousel is sized from the displayed image set; opening the
    // viewer at inline index 1 and stepping twice wraps to the first image
    let urls = store.get(b).unwrap().image_urls();
    let mut carousel = Carousel::new(urls.len());
    carousel.jump(1);
    carousel.next();
    carousel.next();
    assert_eq!(carousel.index(), 0);
    assert_eq!(urls[carousel.index()], "a.png");

    // A new reply merges optimistically, newest first, exactly once
    let reply_id = Uuid::new_v4();
    assert!(store.merge_reply(b, reply(reply_id, 5)));
    assert!(!store.merge_reply(b, reply(reply_id, 5)));
    assert_eq!(store.get(b).unwrap().replies.len(), 1);

    // Reconciliation replaces the whole entry with the server's copy
    let mut reconciled = post(b);
    reconciled.replies = vec![reply(Uuid::new_v4(), 7), reply(reply_id, 5)];
    store.upsert_replace(reconciled);
    let replies = &store.get(b).unwrap().replies;
    assert_eq!(replies.len(), 2);
    assert!(replies[0].created_at >= replies[1].created_at);

    // Deleting removes by id and leaves the rest untouched
    assert!(store.remove_by_id(b));
    assert_eq!(store.len(), 2);
    assert!(store.get(a).is_some());
    assert!(store.get(c).is_some());

    // A detail fetch for a post the feed never saw is prepended, so
    // sibling views pick it up without another fetch
    let d = Uuid::new_v4();
    store.upsert_replace(post(d));
    assert_eq!(store.posts()[0].id, d);
    assert_eq!(store.len(), 3);
}
