//! View model
//!
//! Plain data describing what the dashboard shows. The controller mutates
//! it; the render functions turn it into a [`Node`](super::Node) tree.

use crate::api::{
    ApiError, ApiResult, BlogPost, Channel, ContentSuggestions, Pagination, PostQuery, User,
    Video, VideoQuery,
};
use crate::notify::Notification;

/// Top-level, mutually exclusive sections
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Welcome,
    Login,
    Register,
    Dashboard,
}

impl Section {
    pub const ALL: [Section; 4] = [
        Section::Welcome,
        Section::Login,
        Section::Register,
        Section::Dashboard,
    ];

    /// Container id in the rendered page
    pub fn dom_id(&self) -> &'static str {
        match self {
            Section::Welcome => "welcome-section",
            Section::Login => "login-section",
            Section::Register => "register-section",
            Section::Dashboard => "dashboard-section",
        }
    }

    /// Whether the navigation shows the logout control for this section
    pub fn is_authenticated_view(&self) -> bool {
        matches!(self, Section::Dashboard)
    }
}

/// State of data fetched for a view
#[derive(Debug, Clone, PartialEq)]
pub enum Loadable<T> {
    Loading,
    Ready(T),
    /// The server answered with an error message
    Rejected(String),
    /// No usable answer arrived
    Failed,
}

impl<T> Loadable<T> {
    pub fn from_result(result: ApiResult<T>) -> Self {
        match result {
            Ok(value) => Loadable::Ready(value),
            Err(ApiError::ServerRejected { message, .. }) => Loadable::Rejected(message),
            Err(_) => Loadable::Failed,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Loadable::Loading)
    }

    pub fn ready(&self) -> Option<&T> {
        match self {
            Loadable::Ready(value) => Some(value),
            _ => None,
        }
    }
}

/// Which dashboard sub-view is active
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentKind {
    Empty,
    Onboarding,
    Channels,
    Videos,
    SearchResults,
    VideoDetail,
    Suggestions,
    BlogPosts,
    PostEditor,
}

/// Content of the dashboard region
#[derive(Debug, Clone, PartialEq)]
pub enum DashboardContent {
    Empty,
    Onboarding {
        channels: Loadable<Vec<Channel>>,
    },
    Channels {
        channels: Loadable<Vec<Channel>>,
    },
    Videos {
        query: VideoQuery,
        videos: Loadable<Vec<Video>>,
        pagination: Option<Pagination>,
    },
    SearchResults {
        query: String,
        page: u32,
        videos: Loadable<Vec<Video>>,
        pagination: Option<Pagination>,
    },
    VideoDetail {
        video_id: i64,
        video: Loadable<Video>,
    },
    Suggestions {
        video_id: i64,
        suggestions: Loadable<ContentSuggestions>,
    },
    BlogPosts {
        query: PostQuery,
        posts: Loadable<Vec<BlogPost>>,
        pagination: Option<Pagination>,
    },
    PostEditor {
        post_id: i64,
        post: Loadable<BlogPost>,
    },
}

impl DashboardContent {
    pub fn kind(&self) -> ContentKind {
        match self {
            DashboardContent::Empty => ContentKind::Empty,
            DashboardContent::Onboarding { .. } => ContentKind::Onboarding,
            DashboardContent::Channels { .. } => ContentKind::Channels,
            DashboardContent::Videos { .. } => ContentKind::Videos,
            DashboardContent::SearchResults { .. } => ContentKind::SearchResults,
            DashboardContent::VideoDetail { .. } => ContentKind::VideoDetail,
            DashboardContent::Suggestions { .. } => ContentKind::Suggestions,
            DashboardContent::BlogPosts { .. } => ContentKind::BlogPosts,
            DashboardContent::PostEditor { .. } => ContentKind::PostEditor,
        }
    }
}

/// Active section and dashboard content, versioned by a generation counter.
///
/// Every switch bumps the generation. Work started under an older
/// generation must not write into the view.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewState {
    pub section: Section,
    pub content: DashboardContent,
    pub generation: u64,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            section: Section::Welcome,
            content: DashboardContent::Empty,
            generation: 0,
        }
    }
}

impl ViewState {
    /// Switch the top-level section. Leaving the dashboard drops its content.
    pub fn show_section(&mut self, section: Section) -> u64 {
        self.section = section;
        if section != Section::Dashboard {
            self.content = DashboardContent::Empty;
        }
        self.bump()
    }

    /// Replace the dashboard content and start a new generation
    pub fn begin(&mut self, content: DashboardContent) -> u64 {
        self.section = Section::Dashboard;
        self.content = content;
        self.bump()
    }

    pub fn is_current(&self, generation: u64) -> bool {
        self.generation == generation
    }

    fn bump(&mut self) -> u64 {
        self.generation += 1;
        self.generation
    }
}

/// Everything needed to render one frame of the dashboard
#[derive(Debug, Clone)]
pub struct Screen {
    pub section: Section,
    pub user: Option<User>,
    pub content: DashboardContent,
    pub notifications: Vec<Notification>,
}

impl Screen {
    /// Navigation shows logout instead of login/register
    pub fn logged_in(&self) -> bool {
        self.section.is_authenticated_view()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generation_bumps_on_every_switch() {
        let mut view = ViewState::default();
        let g1 = view.show_section(Section::Login);
        let g2 = view.begin(DashboardContent::Videos {
            query: VideoQuery::default(),
            videos: Loadable::Loading,
            pagination: None,
        });

        assert!(g2 > g1);
        assert!(view.is_current(g2));
        assert!(!view.is_current(g1));
        assert_eq!(view.section, Section::Dashboard);
    }

    #[test]
    fn test_leaving_dashboard_drops_content() {
        let mut view = ViewState::default();
        view.begin(DashboardContent::Channels {
            channels: Loadable::Loading,
        });
        view.show_section(Section::Welcome);

        assert_eq!(view.content.kind(), ContentKind::Empty);
    }

    #[test]
    fn test_loadable_from_result() {
        let ok: Loadable<u32> = Loadable::from_result(Ok(3));
        assert_eq!(ok.ready(), Some(&3));

        let rejected: Loadable<u32> = Loadable::from_result(Err(ApiError::ServerRejected {
            status: 404,
            message: "Video not found".to_string(),
        }));
        assert_eq!(rejected, Loadable::Rejected("Video not found".to_string()));

        let failed: Loadable<u32> =
            Loadable::from_result(Err(ApiError::Unreachable("refused".to_string())));
        assert_eq!(failed, Loadable::Failed);
    }
}
