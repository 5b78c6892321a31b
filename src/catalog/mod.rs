// ABOUTME: Static catalog of meme trends and brands plus the trend/brand compatibility table
// Every lookup that depends on which brand belongs to which trend goes through this module

use serde::Serialize;

/// A meme template the user can build a post around
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Trend {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub default_hashtags: &'static [&'static str],
    pub cover_url: &'static str,
}

impl Trend {
    pub fn hashtags(&self) -> Vec<String> {
        self.default_hashtags.iter().map(|t| (*t).to_string()).collect()
    }

    /// Ribbon shown on the trend tile, if any
    pub fn badge(&self) -> Option<&'static str> {
        BADGES
            .iter()
            .find(|(trend, _)| *trend == self.id)
            .map(|(_, badge)| *badge)
    }

    /// Fixed media assets used for this trend's pre-recorded clip
    pub fn media(&self) -> TrendMedia {
        TREND_MEDIA
            .iter()
            .find(|(trend, _)| *trend == self.id)
            .map_or(DEFAULT_MEDIA, |(_, media)| *media)
    }
}

/// An advertiser the post is branded for
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Brand {
    pub id: &'static str,
    pub name: &'static str,
    pub logo_url: &'static str,
}

/// Asset paths backing the review step for a trend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TrendMedia {
    pub video_src: &'static str,
    pub audio_src: Option<&'static str>,
    pub merged_download_name: &'static str,
}

pub const TRENDS: &[Trend] = &[
    Trend {
        id: "italian-brainrot",
        title: "Italian Brainrot",
        description: "A meme trend characterized by absurd, AI-generated creatures with nonsensical Italian-sounding names and narratives, typically accompanied Italian-accented voiceovers.",
        default_hashtags: &["#italianbrainrot", "#brainrot", "#tungtungtung"],
        cover_url: "/tungtungtungsahur.png",
    },
    Trend {
        id: "ibiza-final-boss",
        title: "Ibiza Final Boss",
        description: "The Ibiza final boss: the typical Englishman flying Ryanair to ibiza and partying like it's his life's calling.",
        default_hashtags: &["#ibizafinalboss", "#finalboss", "#Ibiza"],
        cover_url: "/ibizafinalboss.png",
    },
    Trend {
        id: "labubu",
        title: "Labubu",
        description: "A Labubu, a little plush toy that looks cute and sinister at the same time, yet for some reason everybody wants one.",
        default_hashtags: &["#labubu", "#gold", "#labubuthemonsters"],
        cover_url: "/labubu.png",
    },
    Trend {
        id: "ok-garmin",
        title: "Ok Garmin",
        description: "Near collision? Scream “Ok Garmin, video speichern” and you'll become famous.",
        default_hashtags: &["#garmin", "#okaygarmin", "#okgarmin", "#videospeichern", "#dashcam"],
        cover_url: "/okgarmin.png",
    },
];

pub const BRANDS: &[Brand] = &[
    Brand { id: "apple", name: "Apple", logo_url: "https://cdn.simpleicons.org/apple/ffffff" },
    Brand { id: "openai", name: "OpenAI", logo_url: "https://cdn.simpleicons.org/openai/ffffff" },
    Brand { id: "nike", name: "Nike", logo_url: "https://cdn.simpleicons.org/nike/ffffff" },
    Brand { id: "starbucks", name: "Starbucks", logo_url: "https://cdn.simpleicons.org/starbucks/ffffff" },
    Brand { id: "tesla", name: "Tesla", logo_url: "https://cdn.simpleicons.org/tesla/ffffff" },
];

/// Trend id -> the single brand id allowed to pair with it
pub const COMPATIBILITY: &[(&str, &str)] = &[
    ("italian-brainrot", "apple"),
    ("ibiza-final-boss", "nike"),
    ("ok-garmin", "tesla"),
    ("labubu", "starbucks"),
];

/// Trend id -> ribbon on its tile
const BADGES: &[(&str, &str)] = &[
    ("italian-brainrot", "🔥 Most popular"),
    ("ibiza-final-boss", "Newcomer"),
];

const DEFAULT_MEDIA: TrendMedia = TrendMedia {
    video_src: "/apple_tungtung.mp4",
    audio_src: Some("/apple_tungtung.mp3"),
    merged_download_name: "merged_apple_tungtung.mp4",
};

/// Trend id -> pre-recorded clip. Trends without an entry use [`DEFAULT_MEDIA`].
const TREND_MEDIA: &[(&str, TrendMedia)] = &[
    ("italian-brainrot", DEFAULT_MEDIA),
    (
        "ibiza-final-boss",
        TrendMedia {
            video_src: "/ibiza_boss.mp4",
            audio_src: Some("/ibiza_boss.mp3"),
            merged_download_name: "merged_ibiza_boss.mp4",
        },
    ),
    (
        "ok-garmin",
        TrendMedia {
            video_src: "/tesla_okgarmin.mp4",
            audio_src: Some("/tesla_okgarmin.mp3"),
            merged_download_name: "merged_tesla_okgarmin.mp4",
        },
    ),
    (
        "labubu",
        TrendMedia {
            video_src: "/starbucks_labubu.mp4",
            audio_src: None,
            merged_download_name: "merged_starbucks_labubu.mp4",
        },
    ),
];

/// (trend id, brand names, caption) for brand-specific default captions
const CAPTIONS: &[(&str, &[&str], &str)] = &[
    ("italian-brainrot", &["Apple", "OpenAI"], "We got a new friend"),
    ("ok-garmin", &["Tesla"], "Activate the autopilot anytime"),
    ("ibiza-final-boss", &["Nike"], "Even the Ibiza final boss is waring Nike"),
    ("labubu", &["Starbucks"], "All the Labubus love our coffee☕"),
];

/// Shown when the user picks a brand the current trend does not support
pub const INCOMPATIBLE_BRAND_NOTICE: &str =
    "The backend is currently mocked due to unavailable API credits for the models.";

/// Cover used for a published post when no trend is selected
pub const FALLBACK_COVER: &str = "/tungtungtungsahur.png";

const DEFAULT_BRAND_LABEL: &str = "your brand";

pub fn find_trend(id: &str) -> Option<&'static Trend> {
    TRENDS.iter().find(|t| t.id == id)
}

pub fn find_brand_by_name(name: &str) -> Option<&'static Brand> {
    BRANDS.iter().find(|b| b.name == name)
}

/// The only brand id allowed for `trend_id`
pub fn compatible_brand_id(trend_id: &str) -> Option<&'static str> {
    COMPATIBILITY
        .iter()
        .find(|(trend, _)| *trend == trend_id)
        .map(|(_, brand)| *brand)
}

pub fn compatible_brand(trend_id: &str) -> Option<&'static Brand> {
    compatible_brand_id(trend_id).and_then(|id| BRANDS.iter().find(|b| b.id == id))
}

/// Whether the brand with display name `brand_name` may pair with `trend_id`
pub fn is_compatible(trend_id: &str, brand_name: &str) -> bool {
    compatible_brand(trend_id).is_some_and(|b| b.name == brand_name)
}

fn brand_label(brand_name: &str) -> &str {
    let trimmed = brand_name.trim();
    if trimmed.is_empty() {
        DEFAULT_BRAND_LABEL
    } else {
        trimmed
    }
}

/// Default caption for the review step
pub fn default_caption(trend: &Trend, brand_name: &str) -> String {
    let brand = brand_name.trim();
    CAPTIONS
        .iter()
        .find(|(trend_id, brands, _)| *trend_id == trend.id && brands.contains(&brand))
        .map_or_else(
            || format!("Using {} for: {}", trend.title, brand_label(brand)),
            |(_, _, caption)| (*caption).to_string(),
        )
}

/// Generation prompt derived from the current selection
pub fn build_prompt(trend: Option<&Trend>, brand_name: &str) -> String {
    let brand = brand_label(brand_name);
    match trend {
        None => format!(
            "Create a short, catchy vertical video concept for {brand} using a trending meme. \
             Keep it fast-paced with bold captions and include 3-5 relevant hashtags."
        ),
        Some(trend) => format!(
            "Create a short vertical video for {brand} using the \"{}\" meme. Style: {} \
             Captions should be bold and punchy. Include on-screen callout to {brand}. \
             Keep it authentic, playful, and shareable. Hashtags: {}.",
            trend.title,
            trend.description,
            trend.default_hashtags.join(" ")
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn trend(id: &str) -> &'static Trend {
        find_trend(id).unwrap()
    }

    #[test]
    fn test_every_trend_has_exactly_one_compatible_brand() {
        for t in TRENDS {
            let brand = compatible_brand(t.id);
            assert!(brand.is_some(), "{} has no compatible brand", t.id);
        }
        assert_eq!(COMPATIBILITY.len(), TRENDS.len());
    }

    #[test]
    fn test_compatibility_lookup() {
        assert!(is_compatible("ok-garmin", "Tesla"));
        assert!(is_compatible("labubu", "Starbucks"));
        assert!(!is_compatible("ok-garmin", "Apple"));
        assert!(!is_compatible("italian-brainrot", "OpenAI"));
        assert!(!is_compatible("unknown", "Tesla"));
    }

    #[test]
    fn test_brand_specific_caption() {
        assert_eq!(
            default_caption(trend("ok-garmin"), "Tesla"),
            "Activate the autopilot anytime"
        );
        assert_eq!(
            default_caption(trend("italian-brainrot"), "OpenAI"),
            "We got a new friend"
        );
        assert_eq!(
            default_caption(trend("labubu"), "  Starbucks "),
            "All the Labubus love our coffee☕"
        );
    }

    #[test]
    fn test_fallback_caption() {
        assert_eq!(
            default_caption(trend("ok-garmin"), "Nike"),
            "Using Ok Garmin for: Nike"
        );
        assert_eq!(
            default_caption(trend("labubu"), ""),
            "Using Labubu for: your brand"
        );
    }

    #[test]
    fn test_build_prompt_without_trend() {
        let prompt = build_prompt(None, "");
        assert!(prompt.starts_with("Create a short, catchy vertical video concept for your brand"));
    }

    #[test]
    fn test_build_prompt_with_trend() {
        let prompt = build_prompt(Some(trend("labubu")), "Starbucks");
        assert!(prompt.contains("for Starbucks using the \"Labubu\" meme"));
        assert!(prompt.contains("callout to Starbucks"));
        assert!(prompt.ends_with("Hashtags: #labubu #gold #labubuthemonsters."));
    }

    #[test]
    fn test_labubu_has_no_audio() {
        let media = trend("labubu").media();
        assert!(media.audio_src.is_none());
        assert_eq!(trend("ok-garmin").media().video_src, "/tesla_okgarmin.mp4");
    }

    #[test]
    fn test_media_and_badges_come_from_tables() {
        for t in TRENDS {
            assert!(TREND_MEDIA.iter().any(|(id, _)| *id == t.id), "{}", t.id);
        }
        let mut names: Vec<_> = TRENDS.iter().map(|t| t.media().merged_download_name).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), TRENDS.len());

        assert_eq!(trend("italian-brainrot").badge(), Some("🔥 Most popular"));
        assert_eq!(trend("ibiza-final-boss").badge(), Some("Newcomer"));
        assert_eq!(trend("ok-garmin").badge(), None);

        let unknown = Trend {
            id: "unknown",
            ..trend("labubu").clone()
        };
        assert_eq!(unknown.media(), DEFAULT_MEDIA);
        assert_eq!(unknown.badge(), None);
    }
}
