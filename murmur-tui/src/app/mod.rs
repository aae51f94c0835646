use std::collections::HashSet;

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use murmur_types::{Post, Reply, UserProfile};
use uuid::Uuid;

use crate::api::{ApiClient, ApiResult};
use crate::store::PostStore;
use crate::toast::Toasts;

pub mod state;
pub use state::*;

impl App {
    pub fn new(api_client: ApiClient) -> Self {
        Self {
            running: true,
            api_client,
            store: PostStore::new(),
            current_user: None,
            route: Route::Feed,
            route_stack: Vec::new(),
            feed_state: FeedState::new(),
            detail_state: None,
            profiles: std::collections::HashMap::new(),
            delete_confirm: None,
            toasts: Toasts::new(),
            input_mode: InputMode::Navigation,
            color_scheme: crate::ui::theme::ColorScheme::Dark,
            log_config: crate::logging::LogConfig::default(),
        }
    }

    // ------------------------------------------------------------------
    // Feed
    // ------------------------------------------------------------------

    /// Load the feed from the network and replace the store contents.
    pub async fn load_feed(&mut self) -> Result<()> {
        self.feed_state.loading = true;
        self.feed_state.error = None;

        let result = self.api_client.get_feed().await;
        self.apply_feed_result(result);
        Ok(())
    }

    pub(crate) fn apply_feed_result(&mut self, result: ApiResult<Vec<Post>>) {
        match result {
            Ok(posts) => {
                self.store.replace_all(posts);
                if self.store.is_empty() {
                    self.feed_state.list_state.select(None);
                } else {
                    self.feed_state.list_state.select(Some(0));
                }
                self.feed_state.loading = false;
            }
            Err(e) => {
                self.feed_state.error = Some(e.to_string());
                self.toasts.error("Error", e.to_string());
                self.feed_state.loading = false;
            }
        }
    }

    /// Feed posts whose author has resolved. Items with a pending or
    /// failed author are withheld entirely, never shown as placeholders.
    pub fn visible_feed_posts(&self) -> Vec<&Post> {
        self.store
            .posts()
            .iter()
            .filter(|p| self.is_feed_item_visible(p))
            .collect()
    }

    pub fn is_feed_item_visible(&self, post: &Post) -> bool {
        self.profile_for(&post.posted_by.to_string()).is_some()
    }

    pub fn selected_feed_post(&self) -> Option<&Post> {
        let visible = self.visible_feed_posts();
        self.feed_state
            .list_state
            .selected()
            .and_then(|i| visible.get(i).copied())
    }

    pub fn select_next_post(&mut self) {
        let len = self.visible_feed_posts().len();
        if len == 0 {
            return;
        }
        let next = match self.feed_state.list_state.selected() {
            Some(i) => (i + 1).min(len - 1),
            None => 0,
        };
        self.feed_state.list_state.select(Some(next));
    }

    pub fn select_prev_post(&mut self) {
        if self.visible_feed_posts().is_empty() {
            return;
        }
        let prev = match self.feed_state.list_state.selected() {
            Some(i) => i.saturating_sub(1),
            None => 0,
        };
        self.feed_state.list_state.select(Some(prev));
    }

    // ------------------------------------------------------------------
    // Profile resolution
    // ------------------------------------------------------------------

    /// Record that resolution for `key` has started. Returns false when a
    /// slot already exists, so each identifier resolves at most once.
    pub(crate) fn begin_profile_resolution(&mut self, key: &str) -> bool {
        if self.profiles.contains_key(key) {
            return false;
        }
        self.profiles.insert(key.to_string(), ProfileSlot::Pending);
        true
    }

    pub async fn resolve_profile(&mut self, key: String) -> Result<()> {
        if !self.begin_profile_resolution(&key) {
            return Ok(());
        }
        log_api_call!(self.log_config, "resolving profile {}", key);
        let result = self.api_client.get_user_profile(&key).await;
        self.apply_profile_result(&key, result);
        Ok(())
    }

    /// Apply a finished resolution. A failure marks the slot so the item
    /// stays hidden, and reports the error exactly once.
    pub(crate) fn apply_profile_result(&mut self, key: &str, result: ApiResult<UserProfile>) {
        match result {
            Ok(profile) => {
                self.profiles
                    .insert(key.to_string(), ProfileSlot::Ready(profile));
            }
            Err(e) => {
                self.toasts.error("Error", e.to_string());
                self.profiles.insert(key.to_string(), ProfileSlot::Failed);
            }
        }
    }

    pub fn profile_for(&self, key: &str) -> Option<&UserProfile> {
        match self.profiles.get(key) {
            Some(ProfileSlot::Ready(profile)) => Some(profile),
            _ => None,
        }
    }

    /// Authors the feed has not started resolving yet, in feed order.
    pub fn unresolved_authors(&self) -> Vec<String> {
        let mut seen = HashSet::new();
        self.store
            .posts()
            .iter()
            .map(|p| p.posted_by.to_string())
            .filter(|key| !self.profiles.contains_key(key) && seen.insert(key.clone()))
            .collect()
    }

    // ------------------------------------------------------------------
    // Navigation
    // ------------------------------------------------------------------

    pub fn navigate_back(&mut self) {
        if let Some(route) = self.route_stack.pop() {
            if matches!(self.route, Route::PostDetail(_)) {
                self.detail_state = None;
            }
            self.route = route;
        }
    }

    pub fn open_profile(&mut self, username: String) {
        self.route_stack.push(self.route.clone());
        self.route = Route::Profile(username);
    }

    fn open_selected_author_profile(&mut self) {
        let username = self
            .selected_feed_post()
            .and_then(|p| self.profile_for(&p.posted_by.to_string()))
            .map(|profile| profile.username.clone());
        if let Some(username) = username {
            self.open_profile(username);
        }
    }

    fn open_detail_author_profile(&mut self) {
        let username = self
            .detail_state
            .as_ref()
            .and_then(|d| self.store.get(d.post_id))
            .and_then(|p| self.profile_for(&p.posted_by.to_string()))
            .map(|profile| profile.username.clone());
        if let Some(username) = username {
            self.open_profile(username);
        }
    }

    // ------------------------------------------------------------------
    // Post detail
    // ------------------------------------------------------------------

    /// Open the detail view for a post. A cached copy renders right away,
    /// but the network fetch is always issued: the cache only bridges the
    /// loading state, the response is authoritative.
    pub async fn open_post_detail(&mut self, post_id: Uuid) -> Result<()> {
        self.route_stack.push(self.route.clone());
        self.route = Route::PostDetail(post_id);

        let mut detail = PostDetailState::new(post_id);
        if let Some(cached) = self.store.get(post_id) {
            let urls = cached.image_urls().to_vec();
            detail.sync_images(&urls);
            if !cached.replies.is_empty() {
                detail.reply_list_state.select(Some(0));
            }
        }
        self.detail_state = Some(detail);

        self.fetch_post(post_id).await
    }

    pub async fn fetch_post(&mut self, post_id: Uuid) -> Result<()> {
        log_api_call!(self.log_config, "fetching post {}", post_id);
        let result = self.api_client.get_post(post_id).await;
        self.apply_post_fetch(post_id, result);
        Ok(())
    }

    /// Apply the authoritative fetch for the detail view. A result for a
    /// post the view has moved away from is discarded.
    pub(crate) fn apply_post_fetch(&mut self, post_id: Uuid, result: ApiResult<Post>) {
        let Some(detail) = self.detail_state.as_mut() else {
            return;
        };
        if detail.post_id != post_id {
            return;
        }

        match result {
            Ok(post) => {
                let urls = post.image_urls().to_vec();
                detail.sync_images(&urls);
                detail.loading = false;
                detail.error = None;
                if post.replies.is_empty() {
                    detail.reply_list_state.select(None);
                } else {
                    let selected = detail
                        .reply_list_state
                        .selected()
                        .unwrap_or(0)
                        .min(post.replies.len() - 1);
                    detail.reply_list_state.select(Some(selected));
                }
                self.store.upsert_replace(post);
            }
            Err(e) => {
                detail.error = Some(e.to_string());
                detail.loading = false;
                self.toasts.error("Error", e.to_string());
            }
        }
    }

    pub fn detail_post(&self) -> Option<&Post> {
        self.detail_state
            .as_ref()
            .and_then(|d| self.store.get(d.post_id))
    }

    // ------------------------------------------------------------------
    // Replies
    // ------------------------------------------------------------------

    /// Merge a freshly created reply into the displayed post, then
    /// re-fetch the authoritative copy. The re-fetch is best effort: a
    /// failure is logged and the optimistic merge stands.
    pub async fn handle_reply_added(&mut self, reply: Reply) -> Result<()> {
        let Some(post_id) = self.detail_state.as_ref().map(|d| d.post_id) else {
            return Ok(());
        };

        self.store.merge_reply(post_id, reply);

        log_api_call!(self.log_config, "reconciling post {} after reply", post_id);
        let result = self.api_client.get_post(post_id).await;
        self.apply_reconciliation(post_id, result);
        Ok(())
    }

    pub(crate) fn apply_reconciliation(&mut self, post_id: Uuid, result: ApiResult<Post>) {
        match result {
            Ok(post) => {
                let relevant = self
                    .detail_state
                    .as_ref()
                    .map(|d| d.post_id == post_id)
                    .unwrap_or(false);
                if !relevant {
                    return;
                }
                if let Some(detail) = self.detail_state.as_mut() {
                    let urls = post.image_urls().to_vec();
                    detail.sync_images(&urls);
                }
                self.store.upsert_replace(post);
            }
            Err(e) => {
                log::warn!("reconciliation fetch for post {} failed: {}", post_id, e);
            }
        }
    }

    pub fn open_reply_composer(&mut self) {
        if let Some(detail) = self.detail_state.as_mut() {
            detail.show_reply_composer = true;
            detail.reply_draft.clear();
            self.input_mode = InputMode::Typing;
        }
    }

    pub fn close_reply_composer(&mut self) {
        if let Some(detail) = self.detail_state.as_mut() {
            detail.show_reply_composer = false;
            detail.reply_draft.clear();
        }
        self.input_mode = InputMode::Navigation;
    }

    pub async fn submit_reply(&mut self) -> Result<()> {
        let Some((post_id, draft)) = self
            .detail_state
            .as_ref()
            .map(|d| (d.post_id, d.reply_draft.trim().to_string()))
        else {
            return Ok(());
        };

        if draft.is_empty() {
            if let Some(detail) = self.detail_state.as_mut() {
                detail.error = Some("Cannot send an empty reply".to_string());
            }
            return Ok(());
        }

        match self.api_client.reply_to_post(post_id, draft).await {
            Ok(reply) => {
                self.close_reply_composer();
                self.handle_reply_added(reply).await?;
            }
            Err(e) => {
                if let Some(detail) = self.detail_state.as_mut() {
                    detail.error = Some(e.to_string());
                }
                self.toasts.error("Error", e.to_string());
            }
        }
        Ok(())
    }

    fn push_reply_char(&mut self, c: char) {
        if let Some(detail) = self.detail_state.as_mut() {
            if detail.reply_draft.len() < 500 {
                detail.reply_draft.push(c);
            }
        }
    }

    fn pop_reply_char(&mut self) {
        if let Some(detail) = self.detail_state.as_mut() {
            detail.reply_draft.pop();
        }
    }

    fn select_next_reply(&mut self) {
        let len = self.detail_post().map(|p| p.replies.len()).unwrap_or(0);
        let Some(detail) = self.detail_state.as_mut() else {
            return;
        };
        if len == 0 {
            return;
        }
        let next = match detail.reply_list_state.selected() {
            Some(i) => (i + 1).min(len - 1),
            None => 0,
        };
        detail.reply_list_state.select(Some(next));
    }

    fn select_prev_reply(&mut self) {
        let Some(detail) = self.detail_state.as_mut() else {
            return;
        };
        let prev = detail
            .reply_list_state
            .selected()
            .map(|i| i.saturating_sub(1))
            .unwrap_or(0);
        detail.reply_list_state.select(Some(prev));
    }

    // ------------------------------------------------------------------
    // Carousel
    // ------------------------------------------------------------------

    pub fn next_image(&mut self) {
        if let Some(detail) = self.detail_state.as_mut() {
            detail.carousel.next();
            detail.strip_offset = detail.carousel.index() as f64;
        }
    }

    pub fn prev_image(&mut self) {
        if let Some(detail) = self.detail_state.as_mut() {
            detail.carousel.prev();
            detail.strip_offset = detail.carousel.index() as f64;
        }
    }

    pub fn jump_to_image(&mut self, index: usize) {
        if let Some(detail) = self.detail_state.as_mut() {
            detail.carousel.jump(index);
            detail.strip_offset = detail.carousel.index() as f64;
        }
    }

    /// Fine horizontal scroll of the inline strip, measured in panes. The
    /// index is derived by rounding so it tracks whichever pane is closest.
    pub fn scroll_strip(&mut self, delta: f64) {
        if let Some(detail) = self.detail_state.as_mut() {
            if detail.carousel.is_empty() {
                return;
            }
            let max = (detail.carousel.count() - 1) as f64;
            detail.strip_offset = (detail.strip_offset + delta).clamp(0.0, max);
            detail.carousel.sync_scroll(detail.strip_offset, 1.0);
        }
    }

    /// Open the full-screen viewer at the index active in the inline strip.
    pub fn open_viewer(&mut self) {
        if let Some(detail) = self.detail_state.as_mut() {
            if !detail.carousel.is_empty() {
                detail.viewer_open = true;
            }
        }
    }

    pub fn close_viewer(&mut self) {
        if let Some(detail) = self.detail_state.as_mut() {
            detail.viewer_open = false;
        }
    }

    fn viewer_open(&self) -> bool {
        self.detail_state
            .as_ref()
            .map(|d| d.viewer_open)
            .unwrap_or(false)
    }

    // ------------------------------------------------------------------
    // Delete
    // ------------------------------------------------------------------

    pub fn can_delete(&self, post: &Post) -> bool {
        self.current_user
            .as_ref()
            .map(|u| u.id == post.posted_by)
            .unwrap_or(false)
    }

    /// Ask for confirmation before deleting the post in focus. Only the
    /// post's author gets the dialog at all.
    pub fn request_delete(&mut self) {
        let target = match &self.route {
            Route::PostDetail(_) => self.detail_post(),
            Route::Feed => self.selected_feed_post(),
            Route::Profile(_) => None,
        };
        let Some((post_id, author)) = target.map(|p| (p.id, p.posted_by)) else {
            return;
        };
        let owns = self
            .current_user
            .as_ref()
            .map(|u| u.id == author)
            .unwrap_or(false);
        if owns {
            self.delete_confirm = Some(post_id);
        }
    }

    pub fn cancel_delete(&mut self) {
        self.delete_confirm = None;
    }

    /// Issue the delete the user just confirmed. At most one request per
    /// confirmation: the pending id is taken before the call.
    pub async fn confirm_delete(&mut self) -> Result<()> {
        let Some(post_id) = self.delete_confirm.take() else {
            return Ok(());
        };
        log_api_call!(self.log_config, "deleting post {}", post_id);
        let result = self.api_client.delete_post(post_id).await;
        self.apply_delete_result(post_id, result);
        Ok(())
    }

    /// On success the post leaves the store and every sibling view sees it
    /// gone; on failure the store is untouched.
    pub(crate) fn apply_delete_result(&mut self, post_id: Uuid, result: ApiResult<()>) {
        match result {
            Ok(()) => {
                self.store.remove_by_id(post_id);
                self.toasts.success("Success", "Post deleted");

                let len = self.visible_feed_posts().len();
                if len == 0 {
                    self.feed_state.list_state.select(None);
                } else if let Some(selected) = self.feed_state.list_state.selected() {
                    if selected >= len {
                        self.feed_state.list_state.select(Some(len - 1));
                    }
                }

                let showing_deleted = self
                    .detail_state
                    .as_ref()
                    .map(|d| d.post_id == post_id)
                    .unwrap_or(false);
                if showing_deleted {
                    self.navigate_back();
                }
            }
            Err(e) => {
                self.toasts.error("Error", e.to_string());
            }
        }
    }

    // ------------------------------------------------------------------
    // Key dispatch
    // ------------------------------------------------------------------

    /// Synchronous key handling. Keys that issue network requests (Enter
    /// on the feed, `y` on the delete dialog, Enter in the composer) are
    /// dispatched by the event loop instead.
    pub fn handle_key_event(&mut self, key: KeyEvent) -> Result<()> {
        // The confirmation dialog swallows everything else.
        if self.delete_confirm.is_some() {
            match key.code {
                KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => self.cancel_delete(),
                _ => {}
            }
            return Ok(());
        }

        if self.input_mode == InputMode::Typing {
            match key.code {
                KeyCode::Esc => self.close_reply_composer(),
                KeyCode::Backspace => self.pop_reply_char(),
                KeyCode::Char(c) => self.push_reply_char(c),
                _ => {}
            }
            return Ok(());
        }

        if self.viewer_open() {
            match key.code {
                KeyCode::Esc | KeyCode::Char('q') => self.close_viewer(),
                KeyCode::Left | KeyCode::Char('h') => self.prev_image(),
                KeyCode::Right | KeyCode::Char('l') => self.next_image(),
                _ => {}
            }
            return Ok(());
        }

        match self.route {
            Route::Feed => self.handle_feed_keys(key),
            Route::PostDetail(_) => self.handle_detail_keys(key),
            Route::Profile(_) => self.handle_profile_keys(key),
        }
        Ok(())
    }

    fn handle_feed_keys(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => self.running = false,
            KeyCode::Down | KeyCode::Char('j') => self.select_next_post(),
            KeyCode::Up | KeyCode::Char('k') => self.select_prev_post(),
            KeyCode::Char('r') => self.feed_state.pending_load = true,
            KeyCode::Char('d') => self.request_delete(),
            KeyCode::Char('p') => self.open_selected_author_profile(),
            _ => {}
        }
    }

    fn handle_detail_keys(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc | KeyCode::Char('q') => self.navigate_back(),
            KeyCode::Left | KeyCode::Char('h') => self.prev_image(),
            KeyCode::Right | KeyCode::Char('l') => self.next_image(),
            KeyCode::Char('[') => self.scroll_strip(-0.5),
            KeyCode::Char(']') => self.scroll_strip(0.5),
            KeyCode::Char('v') | KeyCode::Enter => self.open_viewer(),
            KeyCode::Char(c @ '1'..='9') => {
                // Activating an image jumps to it and opens the viewer there
                let index = c as usize - '1' as usize;
                self.jump_to_image(index);
                self.open_viewer();
            }
            KeyCode::Char('r') => self.open_reply_composer(),
            KeyCode::Char('d') => self.request_delete(),
            KeyCode::Char('p') => self.open_detail_author_profile(),
            KeyCode::Down | KeyCode::Char('j') => self.select_next_reply(),
            KeyCode::Up | KeyCode::Char('k') => self.select_prev_reply(),
            _ => {}
        }
    }

    fn handle_profile_keys(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc | KeyCode::Char('q') => self.navigate_back(),
            _ => {}
        }
    }
}
