// ABOUTME: In-memory post feed and the figures shown on the analytics screen
// Totals, likes per platform, the synthetic 7-day sparkline and the post
// synthesized when a publish run completes

use crate::catalog::{self, Trend};
use crate::media::MediaStore;
use crate::wizard::{Platform, WizardState};
use chrono::{DateTime, Duration, Utc};
use rand::Rng;
use serde::Serialize;
use tracing::info;

pub const SPARKLINE_LEN: usize = 7;
pub const SPARKLINE_WIDTH: f64 = 260.0;
pub const SPARKLINE_HEIGHT: f64 = 80.0;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Comment {
    pub id: String,
    pub author: String,
    pub text: String,
}

impl Comment {
    fn new(id: &str, author: &str, text: &str) -> Self {
        Self {
            id: id.to_string(),
            author: author.to_string(),
            text: text.to_string(),
        }
    }
}

/// Clip attached to a post. Merged clips are referenced by their download
/// name, never by a store handle, so releasing the handle cannot leave a
/// post pointing at freed media.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum PostMedia {
    Asset(String),
    Merged(String),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalyticsPost {
    pub id: String,
    pub caption: String,
    pub hashtags: Vec<String>,
    pub cover_url: String,
    pub media: Option<PostMedia>,
    pub platform: Platform,
    pub created_at: DateTime<Utc>,
    pub views: u64,
    pub likes: u64,
    pub comments: Vec<Comment>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnalyticsSummary {
    pub total_views: u64,
    pub total_likes: u64,
    pub total_comments: usize,
    /// Likes summed per platform, in order of first appearance
    pub platform_likes: Vec<(Platform, u64)>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlatformBar {
    pub platform: Platform,
    pub likes: u64,
    /// 0 ..= 100
    pub percent: u8,
}

/// Newest first. Grows for the whole session; nothing is ever removed.
#[derive(Debug, Clone, Default)]
pub struct AnalyticsFeed {
    posts: Vec<AnalyticsPost>,
}

impl AnalyticsFeed {
    /// The three sample posts every session starts with
    pub fn seeded(now: DateTime<Utc>) -> Self {
        let tags = |list: &[&str]| list.iter().map(|t| (*t).to_string()).collect::<Vec<_>>();
        let posts = vec![
            AnalyticsPost {
                id: "p1".to_string(),
                caption: "POV: You’re the final boss landing in Ibiza ✈️".to_string(),
                hashtags: tags(&["#ibizafinalboss", "#finalboss", "#Ibiza"]),
                cover_url: "/ibizafinalboss.png".to_string(),
                media: None,
                platform: Platform::TikTok,
                created_at: now - Duration::days(2),
                views: 128_400,
                likes: 9_240,
                comments: vec![
                    Comment::new("c1", "@maria", "This trend still hits 😂"),
                    Comment::new("c2", "@leo", "Final boss energy fr"),
                ],
            },
            AnalyticsPost {
                id: "p2".to_string(),
                caption: "Labubu goes gold for Q1 wins".to_string(),
                hashtags: tags(&["#labubu", "#gold", "#labubuthemonsters"]),
                cover_url: "/labubu.png".to_string(),
                media: None,
                platform: Platform::Instagram,
                created_at: now - Duration::days(5),
                views: 64_900,
                likes: 4_310,
                comments: vec![
                    Comment::new("c3", "@soph", "So cute omg"),
                    Comment::new("c4", "@kim", "Where can I get this?!"),
                ],
            },
            AnalyticsPost {
                id: "p3".to_string(),
                caption: "‘Ok Garmin’ but make it retail checkout".to_string(),
                hashtags: tags(&["#garmin", "#okgarmin", "#dashcam"]),
                cover_url: "/okgarmin.png".to_string(),
                media: None,
                platform: Platform::YouTube,
                created_at: now - Duration::days(7),
                views: 42_120,
                likes: 2_640,
                comments: vec![Comment::new("c5", "@jules", "LMFAO the cut at 0:05")],
            },
        ];
        Self { posts }
    }

    pub fn posts(&self) -> &[AnalyticsPost] {
        &self.posts
    }

    pub fn len(&self) -> usize {
        self.posts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }

    pub fn prepend(&mut self, post: AnalyticsPost) {
        info!("New post {} on {}", post.id, post.platform.id());
        self.posts.insert(0, post);
    }

    pub fn summary(&self) -> AnalyticsSummary {
        let mut platform_likes: Vec<(Platform, u64)> = Vec::new();
        for post in &self.posts {
            match platform_likes.iter_mut().find(|(p, _)| *p == post.platform) {
                Some((_, likes)) => *likes += post.likes,
                None => platform_likes.push((post.platform, post.likes)),
            }
        }
        AnalyticsSummary {
            total_views: self.posts.iter().map(|p| p.views).sum(),
            total_likes: self.posts.iter().map(|p| p.likes).sum(),
            total_comments: self.posts.iter().map(|p| p.comments.len()).sum(),
            platform_likes,
        }
    }
}

/// Synthetic daily views: a smooth curve plus noise, not drawn from the feed
pub fn sparkline<R: Rng + ?Sized>(rng: &mut R) -> [u64; SPARKLINE_LEN] {
    let mut values = [0u64; SPARKLINE_LEN];
    for (i, value) in values.iter_mut().enumerate() {
        let wave = (i as f64 / 2.0).sin() * 80.0;
        let noise = rng.random::<f64>() * 100.0;
        // Lowest possible value is 200 - 80, never negative
        *value = (200.0 + (wave + noise).round()) as u64;
    }
    values
}

/// Sparkline values mapped into the 260x80 chart box, y growing downwards
pub fn sparkline_points(values: &[u64]) -> Vec<(f64, f64)> {
    let max = values.iter().copied().max().unwrap_or(0).max(1) as f64;
    let last = values.len().saturating_sub(1).max(1) as f64;
    values
        .iter()
        .enumerate()
        .map(|(i, v)| {
            let x = i as f64 / last * SPARKLINE_WIDTH;
            let y = SPARKLINE_HEIGHT - (*v as f64 / max) * SPARKLINE_HEIGHT;
            (x, y)
        })
        .collect()
}

pub fn bar_percentages(platform_likes: &[(Platform, u64)]) -> Vec<PlatformBar> {
    let max = platform_likes.iter().map(|(_, l)| *l).max().unwrap_or(0).max(1);
    platform_likes
        .iter()
        .map(|(platform, likes)| {
            let pct = (*likes as f64 / max as f64 * 100.0).round().min(100.0);
            PlatformBar {
                platform: *platform,
                likes: *likes,
                percent: pct as u8,
            }
        })
        .collect()
}

/// "128400" -> "128,400"
pub fn format_count(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

fn fallback_caption(trend: Option<&Trend>, brand: &str) -> String {
    match trend {
        Some(t) => {
            let brand = if brand.is_empty() { "your brand" } else { brand };
            format!("Using {} for {}", t.title, brand)
        }
        None => "New meme post".to_string(),
    }
}

/// Post created from the current session when every upload has finished
pub fn synthesize_post<R: Rng + ?Sized>(
    wizard: &WizardState,
    store: &MediaStore,
    now: DateTime<Utc>,
    rng: &mut R,
) -> AnalyticsPost {
    let id = format!("new_{}", now.timestamp_millis());
    let trend = wizard.trend();

    let caption = if wizard.caption().is_empty() {
        fallback_caption(trend, wizard.brand())
    } else {
        wizard.caption().to_string()
    };

    let hashtags = if wizard.hashtags().is_empty() {
        trend.map(Trend::hashtags).unwrap_or_default()
    } else {
        wizard.hashtags().to_vec()
    };

    let merged = wizard
        .merged()
        .and_then(|h| store.get(h))
        .map(|blob| PostMedia::Merged(blob.download_name.clone()));
    let media = merged.or_else(|| {
        let video = trend.map_or_else(|| catalog::TRENDS[0].media(), Trend::media).video_src;
        Some(PostMedia::Asset(video.to_string()))
    });

    let views = 48 + (rng.random::<f64>() * 2_800.0).floor() as u64;
    let likes = (views as f64 * (0.06 + rng.random::<f64>() * 0.004)).floor() as u64;

    AnalyticsPost {
        comments: vec![
            Comment::new(&format!("cm_{id}_1"), "@alex", "Already seeing this everywhere 🔥"),
            Comment::new(&format!("cm_{id}_2"), "@tay", "Algorithm picked it up quick"),
        ],
        id,
        caption,
        hashtags,
        cover_url: trend.map_or(catalog::FALLBACK_COVER, |t| t.cover_url).to_string(),
        media,
        platform: Platform::TikTok,
        created_at: now,
        views,
        likes,
    }
}
