//! Render functions
//!
//! Pure mapping from the view model to a [`Node`] tree. Nothing here touches
//! the network or the session.

use super::format::{format_count, format_date, truncate};
use super::model::{DashboardContent, Loadable, Screen, Section};
use super::node::{Action, Element, Node};
use crate::api::{
    BlogPost, Channel, ContentSuggestions, Pagination, PostQuery, PostStatus, Suggestion, Video,
    VideoQuery,
};
use crate::notify::{Level, Notification};

/// Characters of a channel description shown on its card
pub const CHANNEL_DESCRIPTION_CHARS: usize = 100;

/// Characters of a video title shown on its card
pub const VIDEO_TITLE_CHARS: usize = 50;

pub const NO_CHANNELS_ONBOARDING: &str = "No channels yet. Add your first channel above.";
pub const NO_CHANNELS: &str = "No channels yet. Add one from the onboarding page.";
pub const CHANNELS_REJECTED: &str = "No channels found.";
pub const CHANNELS_FAILED: &str = "Failed to load channels. Please try again.";

pub const NO_VIDEOS: &str = "No videos yet. Add a channel and index it to see your videos here.";
pub const VIDEOS_REJECTED: &str = "No videos found. Please add a channel first.";
pub const VIDEOS_FAILED: &str = "Failed to load videos. Please try again.";
pub const VIDEO_FAILED: &str = "Failed to load video. Please try again.";

pub const NO_SEARCH_RESULTS: &str = "No videos match your search.";
pub const SEARCH_REJECTED: &str = "No videos found for this search.";
pub const SEARCH_FAILED: &str = "Failed to search videos. Please try again.";

pub const NO_SUGGESTIONS: &str = "No suggestions available for this video yet.";
pub const SUGGESTIONS_FAILED: &str = "Failed to load suggestions. Please try again.";

pub const NO_POSTS: &str = "No blog posts yet. Generate some from your videos!";
pub const POSTS_REJECTED: &str = "No blog posts found.";
pub const POSTS_FAILED: &str = "Failed to load blog posts. Please try again.";
pub const POST_FAILED: &str = "Failed to load blog post. Please try again.";

/// Placeholder alerts for the three non-list outcomes of a list fetch
struct Placeholders {
    empty: &'static str,
    rejected: &'static str,
    failed: &'static str,
}

/// Whole page: navigation, alert region and every section, with all but the
/// active one hidden
pub fn render_screen(screen: &Screen) -> Node {
    let sections = Section::ALL.iter().map(|&section| {
        let body = match section {
            Section::Welcome => welcome(),
            Section::Login => login_form(),
            Section::Register => register_form(),
            Section::Dashboard => dashboard(screen),
        };

        let mut container = Element::new("section").id(section.dom_id());
        if section != screen.section {
            container = container.class("d-none");
        }
        container.child(body).into()
    });

    Element::new("div")
        .id("app")
        .child(navbar(screen.logged_in()))
        .child(notifications(&screen.notifications))
        .child(Element::new("main").class("container").children(sections))
        .into()
}

/// Top navigation. Anonymous visitors get login/register, signed-in users
/// get logout.
pub fn navbar(logged_in: bool) -> Node {
    let hidden_if = |hide: bool, el: Element| if hide { el.class("d-none") } else { el };

    Element::new("nav")
        .class("navbar navbar-dark bg-dark")
        .child(
            Element::new("span")
                .class("navbar-brand")
                .text("DupeTube"),
        )
        .child(
            Element::new("div")
                .class("navbar-nav")
                .child(hidden_if(
                    logged_in,
                    Element::new("button")
                        .id("loginBtn")
                        .class("btn btn-outline-light")
                        .action(Action::ShowLogin)
                        .text("Login"),
                ))
                .child(hidden_if(
                    logged_in,
                    Element::new("button")
                        .id("registerBtn")
                        .class("btn btn-light")
                        .action(Action::ShowRegister)
                        .text("Register"),
                ))
                .child(hidden_if(
                    !logged_in,
                    Element::new("button")
                        .id("logoutBtn")
                        .class("btn btn-outline-light")
                        .action(Action::Logout)
                        .text("Logout"),
                )),
        )
        .into()
}

/// Live notifications, oldest first
pub fn notifications(notifications: &[Notification]) -> Node {
    Element::new("div")
        .id("alerts")
        .children(notifications.iter().map(notification))
        .into()
}

fn notification(n: &Notification) -> Node {
    let id = n.id.to_string();
    Element::new("div")
        .class(&format!("alert alert-{} alert-dismissible", n.level.as_str()))
        .id(&format!("alert-{}", id))
        .attr("role", "alert")
        .text(n.message.clone())
        .child(
            Element::new("button")
                .class("btn-close")
                .attr("aria-label", "Close")
                .action(Action::DismissNotification(id))
                .text("x"),
        )
        .into()
}

/// A static alert box
pub fn alert(level: Level, message: &str) -> Node {
    Element::new("div")
        .class(&format!("alert alert-{}", level.as_str()))
        .text(message)
        .into()
}

pub fn loading() -> Node {
    Element::new("div")
        .class("loading")
        .child(
            Element::new("div")
                .class("spinner-border")
                .attr("role", "status")
                .child(
                    Element::new("span")
                        .class("visually-hidden")
                        .text("Loading..."),
                ),
        )
        .into()
}

fn welcome() -> Node {
    Element::new("div")
        .class("text-center")
        .child(Element::new("h1").text("Welcome to DupeTube"))
        .child(
            Element::new("p")
                .class("lead")
                .text("Turn your YouTube videos into blog posts."),
        )
        .child(
            Element::new("div")
                .child(
                    Element::new("button")
                        .class("btn btn-primary")
                        .action(Action::ShowRegister)
                        .text("Get Started"),
                )
                .child(
                    Element::new("button")
                        .class("btn btn-outline-primary")
                        .action(Action::ShowLogin)
                        .text("Login"),
                ),
        )
        .into()
}

fn input(id: &str, kind: &str, placeholder: &str) -> Element {
    Element::new("input")
        .id(id)
        .class("form-control")
        .attr("type", kind)
        .attr("name", id)
        .attr("placeholder", placeholder)
}

fn login_form() -> Node {
    Element::new("div")
        .class("card")
        .child(
            Element::new("div")
                .class("card-header")
                .child(Element::new("h4").text("Login")),
        )
        .child(
            Element::new("form")
                .id("loginForm")
                .class("card-body")
                .action(Action::Login)
                .child(input("loginUsername", "text", "Username"))
                .child(input("loginPassword", "password", "Password"))
                .child(
                    Element::new("button")
                        .class("btn btn-primary")
                        .attr("type", "submit")
                        .action(Action::Login)
                        .text("Login"),
                ),
        )
        .into()
}

fn register_form() -> Node {
    Element::new("div")
        .class("card")
        .child(
            Element::new("div")
                .class("card-header")
                .child(Element::new("h4").text("Register")),
        )
        .child(
            Element::new("form")
                .id("registerForm")
                .class("card-body")
                .action(Action::Register)
                .child(input("registerUsername", "text", "Username"))
                .child(input("registerEmail", "email", "Email"))
                .child(input("registerPassword", "password", "Password"))
                .child(
                    Element::new("button")
                        .class("btn btn-primary")
                        .attr("type", "submit")
                        .action(Action::Register)
                        .text("Register"),
                ),
        )
        .into()
}

fn dashboard(screen: &Screen) -> Node {
    let greeting = match &screen.user {
        Some(user) => format!("Signed in as {}", user.username),
        None => String::new(),
    };

    let tab = |label: &str, action: Action| -> Node {
        Element::new("button")
            .class("nav-link")
            .action(action)
            .text(label)
            .into()
    };

    Element::new("div")
        .child(Element::new("p").class("text-muted").text(greeting))
        .child(
            Element::new("div")
                .class("nav nav-tabs")
                .child(tab("Get Started", Action::ShowOnboarding))
                .child(tab("Channels", Action::ShowChannels))
                .child(tab("Videos", Action::ShowVideos))
                .child(tab("Blog Posts", Action::ShowBlogPosts)),
        )
        .child(
            Element::new("div")
                .id("dashboard-content")
                .child(render_content(&screen.content)),
        )
        .into()
}

/// Dashboard region for the active sub-view
pub fn render_content(content: &DashboardContent) -> Node {
    match content {
        DashboardContent::Empty => Element::new("div").into(),
        DashboardContent::Onboarding { channels } => onboarding(channels),
        DashboardContent::Channels { channels } => channels_view(channels),
        DashboardContent::Videos {
            query,
            videos,
            pagination,
        } => videos_view(query, videos, pagination.as_ref()),
        DashboardContent::SearchResults {
            query,
            videos,
            pagination,
            ..
        } => search_results_view(query, videos, pagination.as_ref()),
        DashboardContent::VideoDetail { video, .. } => video_detail(video),
        DashboardContent::Suggestions {
            video_id,
            suggestions,
        } => suggestions_view(*video_id, suggestions),
        DashboardContent::BlogPosts {
            query,
            posts,
            pagination,
        } => blog_posts_view(query, posts, pagination.as_ref()),
        DashboardContent::PostEditor { post, .. } => post_editor(post),
    }
}

fn list<T>(
    state: &Loadable<Vec<T>>,
    placeholders: &Placeholders,
    wrap: impl FnOnce(Vec<Node>) -> Node,
    card: impl Fn(&T) -> Node,
) -> Node {
    match state {
        Loadable::Loading => loading(),
        Loadable::Ready(items) if items.is_empty() => alert(Level::Info, placeholders.empty),
        Loadable::Ready(items) => wrap(items.iter().map(card).collect()),
        Loadable::Rejected(_) => alert(Level::Warning, placeholders.rejected),
        Loadable::Failed => alert(Level::Danger, placeholders.failed),
    }
}

fn onboarding(channels: &Loadable<Vec<Channel>>) -> Node {
    let next_steps = [
        "We'll fetch your channel information",
        "Index all your existing videos",
        "Suggest content ideas for books and courses",
        "Start generating blog posts",
    ];

    let form = Element::new("form")
        .id("addChannelForm")
        .action(Action::AddChannel)
        .child(
            Element::new("label")
                .class("form-label")
                .attr("for", "channelUrl")
                .text("YouTube Channel URL"),
        )
        .child(input(
            "channelUrl",
            "url",
            "https://www.youtube.com/@yourchannel",
        ))
        .child(Element::new("div").class("form-text").text(
            "Supports @username, /c/channel, /user/username and /channel/ID URLs",
        ))
        .child(
            Element::new("button")
                .class("btn btn-primary")
                .attr("type", "submit")
                .action(Action::AddChannel)
                .text("Add Channel"),
        );

    let placeholders = Placeholders {
        empty: NO_CHANNELS_ONBOARDING,
        rejected: CHANNELS_REJECTED,
        failed: CHANNELS_FAILED,
    };

    Element::new("div")
        .child(
            Element::new("div")
                .class("card")
                .child(
                    Element::new("div")
                        .class("card-header")
                        .child(Element::new("h4").text("Welcome to DupeTube!")),
                )
                .child(
                    Element::new("div")
                        .class("card-body")
                        .child(
                            Element::new("p")
                                .class("lead")
                                .text("Let's get you started by adding your YouTube channel."),
                        )
                        .child(form)
                        .child(
                            Element::new("div")
                                .class("card bg-light")
                                .child(Element::new("h6").text("What happens next?"))
                                .child(Element::new("ul").class("small").children(
                                    next_steps
                                        .iter()
                                        .map(|step| Element::new("li").text(*step).into()),
                                )),
                        ),
                ),
        )
        .child(
            Element::new("div")
                .id("channels-list")
                .class("mt-4")
                .child(Element::new("h5").text("Your Channels"))
                .child(list(
                    channels,
                    &placeholders,
                    |cards| Element::new("div").children(cards).into(),
                    channel_card,
                )),
        )
        .into()
}

fn card_header(title: &str, refresh: Action) -> Element {
    Element::new("div")
        .class("card-header d-flex justify-content-between align-items-center")
        .child(Element::new("h4").text(title))
        .child(
            Element::new("button")
                .class("btn btn-outline-primary")
                .action(refresh)
                .text("Refresh"),
        )
}

fn channels_view(channels: &Loadable<Vec<Channel>>) -> Node {
    let placeholders = Placeholders {
        empty: NO_CHANNELS,
        rejected: CHANNELS_REJECTED,
        failed: CHANNELS_FAILED,
    };

    Element::new("div")
        .class("card")
        .child(card_header("Your Channels", Action::ShowChannels))
        .child(
            Element::new("div")
                .id("channels-list")
                .class("card-body")
                .child(list(
                    channels,
                    &placeholders,
                    |cards| Element::new("div").children(cards).into(),
                    channel_card,
                )),
        )
        .into()
}

fn stat(value: u64, label: &str) -> Node {
    Element::new("div")
        .class("col-4 text-center")
        .child(Element::new("strong").text(format_count(value)))
        .child(Element::new("small").text(format!(" {}", label)))
        .into()
}

/// Card for one channel with its counts and index/sync actions
pub fn channel_card(channel: &Channel) -> Node {
    let description = truncate(
        channel.description.as_deref().unwrap_or_default(),
        CHANNEL_DESCRIPTION_CHARS,
    );

    Element::new("div")
        .class("card channel-card mt-3")
        .attr("data-channel-id", channel.id.to_string())
        .child(
            Element::new("div")
                .class("card-body")
                .child(Element::new("h5").text(channel.title.clone()))
                .child(
                    Element::new("p")
                        .class("small channel-description")
                        .text(description),
                )
                .child(
                    Element::new("div")
                        .class("channel-stats row")
                        .child(stat(channel.subscriber_count, "Subscribers"))
                        .child(stat(channel.video_count, "Videos"))
                        .child(stat(channel.view_count, "Views")),
                )
                .child(
                    Element::new("div")
                        .class("mt-3")
                        .child(
                            Element::new("button")
                                .class("btn btn-light btn-sm")
                                .action(Action::IndexChannel(channel.id))
                                .text("Index Videos"),
                        )
                        .child(
                            Element::new("button")
                                .class("btn btn-light btn-sm")
                                .action(Action::SyncChannel(channel.id))
                                .text("Sync New Videos"),
                        )
                        .child(
                            Element::new("button")
                                .class("btn btn-light btn-sm")
                                .action(Action::ShowChannelVideos(channel.id))
                                .text("View Videos"),
                        ),
                ),
        )
        .into()
}

/// Previous/next controls for a paged list; nothing when it fits one page
pub fn pager(pagination: Option<&Pagination>) -> Option<Node> {
    let p = pagination.filter(|p| p.pages > 1)?;

    let mut nav = Element::new("nav")
        .class("pagination-controls d-flex justify-content-between align-items-center mt-3");
    nav = if p.has_prev {
        nav.child(
            Element::new("button")
                .class("btn btn-sm btn-outline-secondary")
                .action(Action::GoToPage(p.page.saturating_sub(1)))
                .text("Previous"),
        )
    } else {
        nav.child(Element::new("span"))
    };
    nav = nav.child(
        Element::new("span")
            .class("small text-muted page-info")
            .text(format!(
                "Page {} of {} ({} total)",
                p.page,
                p.pages,
                format_count(p.total)
            )),
    );
    if p.has_next {
        nav = nav.child(
            Element::new("button")
                .class("btn btn-sm btn-outline-secondary")
                .action(Action::GoToPage(p.page + 1))
                .text("Next"),
        );
    }

    Some(nav.into())
}

fn search_form(query: &str) -> Node {
    Element::new("form")
        .id("videoSearchForm")
        .class("d-flex gap-2 mb-3")
        .action(Action::SearchVideos)
        .child(input("videoSearch", "search", "Search videos").attr("value", query))
        .child(
            Element::new("button")
                .class("btn btn-outline-primary")
                .attr("type", "submit")
                .action(Action::SearchVideos)
                .text("Search"),
        )
        .into()
}

/// Video cards in a grid, followed by the pager
fn video_grid(
    videos: &Loadable<Vec<Video>>,
    placeholders: &Placeholders,
    pagination: Option<&Pagination>,
) -> Element {
    let mut body = Element::new("div").id("videos-list").child(list(
        videos,
        placeholders,
        |cards| Element::new("div").class("row").children(cards).into(),
        video_card,
    ));
    if videos.ready().is_some() {
        if let Some(pager) = pager(pagination) {
            body = body.child(pager);
        }
    }
    body
}

fn videos_view(
    query: &VideoQuery,
    videos: &Loadable<Vec<Video>>,
    pagination: Option<&Pagination>,
) -> Node {
    let placeholders = Placeholders {
        empty: NO_VIDEOS,
        rejected: VIDEOS_REJECTED,
        failed: VIDEOS_FAILED,
    };

    let mut body = Element::new("div").class("card-body").child(search_form(""));
    if let Some(channel_id) = query.channel_id {
        body = body.child(
            Element::new("p")
                .class("small text-muted channel-filter")
                .text(format!("Showing videos of channel {} ", channel_id))
                .child(
                    Element::new("button")
                        .class("btn btn-link btn-sm")
                        .action(Action::ShowVideos)
                        .text("All Videos"),
                ),
        );
    }
    if let Some(videos) = videos.ready().filter(|v| !v.is_empty()) {
        body = body.child(
            Element::new("button")
                .class("btn btn-sm btn-outline-primary mb-3")
                .action(Action::BulkGenerate(videos.iter().map(|v| v.id).collect()))
                .text("Generate Posts for This Page"),
        );
    }

    Element::new("div")
        .class("card")
        .child(card_header("Your Videos", Action::RefreshVideos))
        .child(body.child(video_grid(videos, &placeholders, pagination)))
        .into()
}

fn search_results_view(
    query: &str,
    videos: &Loadable<Vec<Video>>,
    pagination: Option<&Pagination>,
) -> Node {
    let placeholders = Placeholders {
        empty: NO_SEARCH_RESULTS,
        rejected: SEARCH_REJECTED,
        failed: SEARCH_FAILED,
    };

    Element::new("div")
        .class("card search-results")
        .child(
            Element::new("div")
                .class("card-header d-flex justify-content-between align-items-center")
                .child(Element::new("h4").text(format!("Search results for \"{}\"", query)))
                .child(
                    Element::new("button")
                        .class("btn btn-outline-secondary")
                        .action(Action::ShowVideos)
                        .text("All Videos"),
                ),
        )
        .child(
            Element::new("div")
                .class("card-body")
                .child(search_form(query))
                .child(video_grid(videos, &placeholders, pagination)),
        )
        .into()
}

/// Card for one video with generate/detail actions
pub fn video_card(video: &Video) -> Node {
    let mut card = Element::new("div").class("card video-card h-100");
    if let Some(thumbnail) = &video.thumbnail_url {
        card = card.child(
            Element::new("img")
                .class("video-thumbnail")
                .attr("src", thumbnail.clone())
                .attr("alt", video.title.clone()),
        );
    }

    let meta = format!(
        "{} views • {}",
        format_count(video.view_count),
        format_date(video.published_at.as_deref())
    );

    let card = card.child(
        Element::new("div")
            .class("card-body")
            .child(
                Element::new("h6")
                    .class("card-title")
                    .text(truncate(&video.title, VIDEO_TITLE_CHARS)),
            )
            .child(Element::new("p").class("card-text small text-muted").text(meta))
            .child(
                Element::new("div")
                    .class("d-flex gap-2")
                    .child(
                        Element::new("button")
                            .class("btn btn-sm btn-outline-primary")
                            .action(Action::GenerateBlogPost(video.id))
                            .text("Generate Blog"),
                    )
                    .child(
                        Element::new("button")
                            .class("btn btn-sm btn-outline-secondary")
                            .action(Action::ViewVideo(video.id))
                            .text("View Details"),
                    ),
            ),
    );

    Element::new("div")
        .class("col-md-6 col-lg-4 mb-3")
        .attr("data-video-id", video.id.to_string())
        .child(card)
        .into()
}

fn detail_row(label: &str, value: String) -> Node {
    Element::new("li")
        .child(Element::new("strong").text(format!("{}: ", label)))
        .text(value)
        .into()
}

fn video_detail(video: &Loadable<Video>) -> Node {
    let video = match video {
        Loadable::Loading => return loading(),
        Loadable::Rejected(message) => return alert(Level::Warning, message),
        Loadable::Failed => return alert(Level::Danger, VIDEO_FAILED),
        Loadable::Ready(video) => video,
    };

    let tags = video.tag_list();
    let mut facts = vec![
        detail_row("Published", format_date(video.published_at.as_deref())),
        detail_row("Views", format_count(video.view_count)),
        detail_row("Likes", format_count(video.like_count)),
        detail_row("Comments", format_count(video.comment_count)),
    ];
    if let Some(duration) = &video.duration {
        facts.insert(0, detail_row("Duration", duration.clone()));
    }
    if !tags.is_empty() {
        facts.push(detail_row("Tags", tags.join(", ")));
    }

    let mut body = Element::new("div").class("card-body");
    if video.blog_ready {
        body = body.child(
            Element::new("span")
                .class("badge bg-success blog-ready")
                .text("Ready for blogging"),
        );
    }
    if let Some(description) = video.description.as_deref().filter(|d| !d.is_empty()) {
        body = body.child(Element::new("p").class("video-description").text(description));
    }
    body = body.child(Element::new("ul").class("list-unstyled").children(facts));
    if let Some(summary) = video.summary.as_deref().filter(|s| !s.is_empty()) {
        body = body
            .child(Element::new("h6").text("Summary"))
            .child(Element::new("p").class("video-summary").text(summary));
    }

    Element::new("div")
        .class("card video-detail")
        .attr("data-video-id", video.id.to_string())
        .child(
            Element::new("div")
                .class("card-header d-flex justify-content-between align-items-center")
                .child(Element::new("h4").text(video.title.clone()))
                .child(
                    Element::new("div")
                        .child(
                            Element::new("button")
                                .class("btn btn-primary")
                                .action(Action::GenerateBlogPost(video.id))
                                .text("Generate Blog"),
                        )
                        .child(
                            Element::new("button")
                                .class("btn btn-outline-primary")
                                .action(Action::ProcessVideo(video.id))
                                .text("Process Video"),
                        )
                        .child(
                            Element::new("button")
                                .class("btn btn-outline-primary")
                                .action(Action::ShowSuggestions(video.id))
                                .text("Content Ideas"),
                        )
                        .child(
                            Element::new("button")
                                .class("btn btn-outline-secondary")
                                .action(Action::ShowVideos)
                                .text("Back to Videos"),
                        ),
                ),
        )
        .child(body)
        .into()
}

fn suggestion_group(heading: &str, ideas: &[Suggestion]) -> Option<Node> {
    if ideas.is_empty() {
        return None;
    }

    let items = ideas.iter().map(|idea| {
        Element::new("li")
            .child(Element::new("strong").text(idea.title.clone()))
            .text(if idea.description.is_empty() {
                String::new()
            } else {
                format!(": {}", idea.description)
            })
            .into()
    });

    Some(
        Element::new("div")
            .class("suggestion-group mb-3")
            .child(Element::new("h6").text(heading))
            .child(Element::new("ul").children(items))
            .into(),
    )
}

fn suggestions_view(video_id: i64, suggestions: &Loadable<ContentSuggestions>) -> Node {
    let body = match suggestions {
        Loadable::Loading => loading(),
        Loadable::Rejected(message) => alert(Level::Warning, message),
        Loadable::Failed => alert(Level::Danger, SUGGESTIONS_FAILED),
        Loadable::Ready(s) if s.is_empty() => alert(Level::Info, NO_SUGGESTIONS),
        Loadable::Ready(s) => Element::new("div")
            .children(
                [
                    suggestion_group("Book Ideas", &s.book_suggestions),
                    suggestion_group("Course Ideas", &s.course_suggestions),
                    suggestion_group("Blog Post Ideas", &s.blog_post_ideas),
                ]
                .into_iter()
                .flatten(),
            )
            .into(),
    };

    Element::new("div")
        .class("card suggestions")
        .attr("data-video-id", video_id.to_string())
        .child(
            Element::new("div")
                .class("card-header d-flex justify-content-between align-items-center")
                .child(Element::new("h4").text("Content Ideas"))
                .child(
                    Element::new("button")
                        .class("btn btn-outline-secondary")
                        .action(Action::ViewVideo(video_id))
                        .text("Back to Video"),
                ),
        )
        .child(Element::new("div").class("card-body").child(body))
        .into()
}

fn blog_posts_view(
    query: &PostQuery,
    posts: &Loadable<Vec<BlogPost>>,
    pagination: Option<&Pagination>,
) -> Node {
    let placeholders = Placeholders {
        empty: NO_POSTS,
        rejected: POSTS_REJECTED,
        failed: POSTS_FAILED,
    };

    let mut body = Element::new("div").class("card-body");
    if let Some(filter) = query.status {
        body = body.child(
            Element::new("p")
                .class("small text-muted post-filter")
                .text(format!("Showing {} posts", filter)),
        );
    }

    let mut list_container = Element::new("div").id("blog-posts-list").child(list(
        posts,
        &placeholders,
        |cards| Element::new("div").children(cards).into(),
        blog_post_card,
    ));
    if posts.ready().is_some() {
        if let Some(pager) = pager(pagination) {
            list_container = list_container.child(pager);
        }
    }

    Element::new("div")
        .class("card")
        .child(card_header("Blog Posts", Action::RefreshBlogPosts))
        .child(body.child(list_container))
        .into()
}

/// Badge class for a post status
pub fn status_badge_class(status: PostStatus) -> &'static str {
    match status {
        PostStatus::Published => "bg-success",
        _ => "bg-warning",
    }
}

/// Card for one blog post with edit/publish/delete actions
pub fn blog_post_card(post: &BlogPost) -> Node {
    let mut dates = format!("Created: {}", format_date(post.created_at.as_deref()));
    if post.published_at.is_some() {
        dates.push_str(&format!(
            " • Published: {}",
            format_date(post.published_at.as_deref())
        ));
    }

    let mut buttons = Element::new("div").class("btn-group-vertical").child(
        Element::new("button")
            .class("btn btn-sm btn-outline-primary")
            .action(Action::EditBlogPost(post.id))
            .text("Edit"),
    );
    if post.status == PostStatus::Draft {
        buttons = buttons.child(
            Element::new("button")
                .class("btn btn-sm btn-success")
                .action(Action::PublishBlogPost(post.id))
                .text("Publish"),
        );
    }
    buttons = buttons.child(
        Element::new("button")
            .class("btn btn-sm btn-outline-danger")
            .action(Action::DeleteBlogPost(post.id))
            .text("Delete"),
    );

    Element::new("div")
        .class("card blog-post-card mb-3")
        .attr("data-post-id", post.id.to_string())
        .child(
            Element::new("div")
                .class("card-body d-flex justify-content-between align-items-start")
                .child(
                    Element::new("div")
                        .class("flex-grow-1")
                        .child(Element::new("h5").text(post.title.clone()))
                        .child(
                            Element::new("p")
                                .class("text-muted")
                                .text(post.excerpt.clone().unwrap_or_default()),
                        )
                        .child(Element::new("small").class("text-muted").text(dates)),
                )
                .child(
                    Element::new("div")
                        .class("d-flex flex-column gap-2")
                        .child(
                            Element::new("span")
                                .class("badge status-badge")
                                .class(status_badge_class(post.status))
                                .text(post.status.as_str()),
                        )
                        .child(buttons),
                ),
        )
        .into()
}

fn post_editor(post: &Loadable<BlogPost>) -> Node {
    let post = match post {
        Loadable::Loading => return loading(),
        Loadable::Rejected(message) => return alert(Level::Warning, message),
        Loadable::Failed => return alert(Level::Danger, POST_FAILED),
        Loadable::Ready(post) => post,
    };

    Element::new("div")
        .class("card post-editor")
        .attr("data-post-id", post.id.to_string())
        .child(
            Element::new("div")
                .class("card-header d-flex justify-content-between align-items-center")
                .child(Element::new("h4").text("Edit Blog Post"))
                .child(
                    Element::new("span")
                        .class("badge status-badge")
                        .class(status_badge_class(post.status))
                        .text(post.status.as_str()),
                ),
        )
        .child(
            Element::new("form")
                .id("editPostForm")
                .class("card-body")
                .action(Action::SaveBlogPost(post.id))
                .child(input("postTitle", "text", "Title").attr("value", post.title.clone()))
                .child(
                    input("postExcerpt", "text", "Excerpt")
                        .attr("value", post.excerpt.clone().unwrap_or_default()),
                )
                .child(
                    Element::new("textarea")
                        .id("postContent")
                        .class("form-control")
                        .attr("name", "postContent")
                        .attr("rows", "12")
                        .text(post.content.clone()),
                )
                .child(
                    Element::new("div")
                        .class("mt-3")
                        .child(
                            Element::new("button")
                                .class("btn btn-primary")
                                .attr("type", "submit")
                                .action(Action::SaveBlogPost(post.id))
                                .text("Save"),
                        )
                        .child(
                            Element::new("button")
                                .class("btn btn-outline-secondary")
                                .action(Action::ShowBlogPosts)
                                .text("Cancel"),
                        ),
                ),
        )
        .into()
}
