//! Built-in demo batch used by the sample endpoint and the CLI.

use informint_core::{PostRecord, PostType};

#[allow(clippy::too_many_arguments)]
fn sample(
    id: &str,
    username: &str,
    likes: u64,
    comments: u64,
    followers: u64,
    views: u64,
    verified: bool,
    post_type: PostType,
) -> PostRecord {
    PostRecord {
        id: Some(id.to_string()),
        post_type: Some(post_type),
        owner_username: username.to_string(),
        owner_followers_count: followers,
        owner_is_verified: verified,
        likes_count: likes,
        comments_count: comments,
        video_view_count: views,
        ..PostRecord::default()
    }
}

/// Three posts from three creators covering video and image content.
#[must_use]
pub fn sample_posts() -> Vec<PostRecord> {
    vec![
        sample("sample1", "creator1", 1_500, 45, 25_000, 8_000, true, PostType::Video),
        sample("sample2", "creator2", 800, 32, 15_000, 0, false, PostType::Image),
        sample("sample3", "creator3", 2_200, 67, 45_000, 12_000, true, PostType::Video),
    ]
}
