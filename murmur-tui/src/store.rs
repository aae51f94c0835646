use murmur_types::{Post, Reply};
use uuid::Uuid;

/// Shared post collection: the session-lifetime store of posts read and
/// written by every view. Mutations are whole-entry replaces or removals,
/// never partial field edits, so a reader can never observe a torn post.
#[derive(Debug, Default)]
pub struct PostStore {
    posts: Vec<Post>,
}

impl PostStore {
    pub fn new() -> Self {
        Self { posts: Vec::new() }
    }

    pub fn posts(&self) -> &[Post] {
        &self.posts
    }

    pub fn len(&self) -> usize {
        self.posts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }

    pub fn get(&self, id: Uuid) -> Option<&Post> {
        self.posts.iter().find(|p| p.id == id)
    }

    fn position(&self, id: Uuid) -> Option<usize> {
        self.posts.iter().position(|p| p.id == id)
    }

    /// Replace the whole collection, keeping the first occurrence of each id.
    pub fn replace_all(&mut self, posts: Vec<Post>) {
        self.posts.clear();
        for post in posts {
            if self.position(post.id).is_none() {
                self.posts.push(post);
            }
        }
    }

    /// Replace the entry with the same id in place, preserving its
    /// sequence position, or prepend when absent. Either way the
    /// collection holds at most one entry per id.
    pub fn upsert_replace(&mut self, post: Post) {
        match self.position(post.id) {
            Some(index) => self.posts[index] = post,
            None => self.posts.insert(0, post),
        }
    }

    /// Remove the entry with the given id. Returns whether one was removed.
    pub fn remove_by_id(&mut self, id: Uuid) -> bool {
        let before = self.posts.len();
        self.posts.retain(|p| p.id != id);
        self.posts.len() != before
    }

    /// Merge a freshly created reply into a post's reply list.
    ///
    /// No-op when the post is unknown or a reply with that id is already
    /// present, so repeated delivery of the same reply cannot duplicate
    /// it. The merged list is rebuilt newest-first.
    pub fn merge_reply(&mut self, post_id: Uuid, reply: Reply) -> bool {
        let Some(index) = self.position(post_id) else {
            return false;
        };
        let post = &mut self.posts[index];
        if post.replies.iter().any(|r| r.id == reply.id) {
            return false;
        }

        let mut replies = Vec::with_capacity(post.replies.len() + 1);
        replies.push(reply);
        replies.append(&mut post.replies);
        replies.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        post.replies = replies;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};

    fn post(id: Uuid) -> Post {
        Post {
            id,
            posted_by: Uuid::new_v4(),
            text: "post".to_string(),
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
            text: "reply".to_string(),
            user_profile_pic: String::new(),
            username: "someone".to_string(),
            created_at: Utc.with_ymd_and_hms(2024, 4, 1, 12, 0, 0).unwrap()
                + Duration::minutes(minutes),
        }
    }

    #[test]
    fn upsert_replaces_in_place() {
        let mut store = PostStore::new();
        let (a, b, c) = (Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4());
        store.replace_all(vec![post(a), post(b), post(c)]);

        let mut fresh = post(b);
        fresh.text = "updated".to_string();
        store.upsert_replace(fresh);

        assert_eq!(store.len(), 3);
        assert_eq!(store.posts()[1].id, b, "position must be preserved");
        assert_eq!(store.posts()[1].text, "updated");
    }

    #[test]
    fn upsert_prepends_when_absent() {
        let mut store = PostStore::new();
        let (a, b) = (Uuid::new_v4(), Uuid::new_v4());
        store.replace_all(vec![post(a)]);

        store.upsert_replace(post(b));

        assert_eq!(store.posts()[0].id, b);
        assert_eq!(store.posts()[1].id, a);
    }

    #[test]
    fn upsert_never_duplicates_ids() {
        let mut store = PostStore::new();
        let id = Uuid::new_v4();
        store.upsert_replace(post(id));
        store.upsert_replace(post(id));
        store.upsert_replace(post(id));

        assert_eq!(store.len(), 1);
    }

    #[test]
    fn replace_all_drops_duplicate_ids() {
        let mut store = PostStore::new();
        let id = Uuid::new_v4();
        let mut first = post(id);
        first.text = "first".to_string();
        store.replace_all(vec![first, post(id), post(Uuid::new_v4())]);

        assert_eq!(store.len(), 2);
        assert_eq!(store.posts()[0].text, "first");
    }

    #[test]
    fn remove_by_id_filters_the_entry() {
        let mut store = PostStore::new();
        let (a, b) = (Uuid::new_v4(), Uuid::new_v4());
        store.replace_all(vec![post(a), post(b)]);

        assert!(store.remove_by_id(a));
        assert!(!store.remove_by_id(a));
        assert_eq!(store.len(), 1);
        assert!(store.get(a).is_none());
        assert!(store.get(b).is_some());
    }

    #[test]
    fn merge_reply_is_idempotent() {
        let mut store = PostStore::new();
        let post_id = Uuid::new_v4();
        store.upsert_replace(post(post_id));

        let reply_id = Uuid::new_v4();
        assert!(store.merge_reply(post_id, reply(reply_id, 5)));
        assert!(!store.merge_reply(post_id, reply(reply_id, 5)));

        let replies = &store.get(post_id).unwrap().replies;
        assert_eq!(replies.iter().filter(|r| r.id == reply_id).count(), 1);
    }

    #[test]
    fn merge_reply_sorts_newest_first() {
        let mut store = PostStore::new();
        let post_id = Uuid::new_v4();
        let mut target = post(post_id);
        target.replies = vec![reply(Uuid::new_v4(), 10), reply(Uuid::new_v4(), 2)];
        store.upsert_replace(target);

        store.merge_reply(post_id, reply(Uuid::new_v4(), 6));

        let replies = &store.get(post_id).unwrap().replies;
        assert_eq!(replies.len(), 3);
        assert!(replies.windows(2).all(|w| w[0].created_at >= w[1].created_at));
    }

    #[test]
    fn merge_reply_into_unknown_post_is_a_noop() {
        let mut store = PostStore::new();
        assert!(!store.merge_reply(Uuid::new_v4(), reply(Uuid::new_v4(), 0)));
        assert!(store.is_empty());
    }
}
