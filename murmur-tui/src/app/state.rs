use std::collections::HashMap;

use murmur_types::UserProfile;
use ratatui::widgets::ListState;
use uuid::Uuid;

use crate::api::ApiClient;
use crate::carousel::Carousel;
use crate::store::PostStore;
use crate::toast::Toasts;
use crate::ui::theme::ColorScheme;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputMode {
    Navigation, // Browsing content, shortcuts active
    Typing,     // In text input, shortcuts disabled
}

/// Where the client currently is. Visited routes form a stack so Esc
/// walks back the way the user came.
#[derive(Debug, Clone, PartialEq)]
pub enum Route {
    Feed,
    PostDetail(Uuid),
    Profile(String),
}

/// Resolution state of a user profile. A slot is created when resolution
/// first starts and is never retried automatically.
#[derive(Debug, Clone)]
pub enum ProfileSlot {
    Pending,
    Ready(UserProfile),
    Failed,
}

/// Feed screen state
pub struct FeedState {
    pub list_state: ListState,
    pub loading: bool,
    pub error: Option<String>,
    /// Set to trigger a load on the next loop turn, after the loading
    /// state has rendered once.
    pub pending_load: bool,
}

impl FeedState {
    pub fn new() -> Self {
        Self {
            list_state: ListState::default(),
            loading: false,
            error: None,
            pending_load: false,
        }
    }
}

impl Default for FeedState {
    fn default() -> Self {
        Self::new()
    }
}

/// Post detail screen state
pub struct PostDetailState {
    pub post_id: Uuid,
    pub loading: bool,
    pub error: Option<String>,
    pub carousel: Carousel,
    /// Image urls the carousel was built for; a changed list resets it.
    pub image_set: Vec<String>,
    /// Fractional pane offset of the inline image strip.
    pub strip_offset: f64,
    pub viewer_open: bool,
    pub show_reply_composer: bool,
    pub reply_draft: String,
    pub reply_list_state: ListState,
}

impl PostDetailState {
    pub fn new(post_id: Uuid) -> Self {
        Self {
            post_id,
            loading: true,
            error: None,
            carousel: Carousel::new(0),
            image_set: Vec::new(),
            strip_offset: 0.0,
            viewer_open: false,
            show_reply_composer: false,
            reply_draft: String::new(),
            reply_list_state: ListState::default(),
        }
    }

    /// Rebuild carousel state whenever the displayed image set changes.
    /// The index has no meaning against a different set of images.
    pub fn sync_images(&mut self, urls: &[String]) {
        if self.image_set != urls {
            self.image_set = urls.to_vec();
            self.carousel = Carousel::new(urls.len());
            self.strip_offset = 0.0;
        }
    }
}

/// Main application state
pub struct App {
    pub running: bool,
    pub api_client: ApiClient,
    pub store: PostStore,
    pub current_user: Option<UserProfile>,
    pub route: Route,
    pub route_stack: Vec<Route>,
    pub feed_state: FeedState,
    pub detail_state: Option<PostDetailState>,
    /// Profile directory keyed by the identifier used to resolve
    /// (author id or username).
    pub profiles: HashMap<String, ProfileSlot>,
    /// Post id awaiting delete confirmation, if the dialog is open.
    pub delete_confirm: Option<Uuid>,
    pub toasts: Toasts,
    pub input_mode: InputMode,
    pub color_scheme: ColorScheme,
    pub log_config: crate::logging::LogConfig,
}
