use reqwest::Url;

use crate::models::Story;

pub const MAX_SUGGESTIONS: usize = 5;

/// Hostname of `url` without a leading `www.`, or an empty string if it does not parse.
pub fn domain_of(url: &str) -> String {
    let Ok(parsed) = Url::parse(url) else {
        return String::new();
    };
    let host = parsed.host_str().unwrap_or_default();
    host.strip_prefix("www.").unwrap_or(host).to_string()
}

/// Distinct domains of the loaded stories that contain `partial`, case-insensitively.
pub fn suggest_domains(stories: &[Story], partial: &str) -> Vec<String> {
    let needle = partial.trim().to_lowercase();
    if needle.is_empty() {
        return Vec::new();
    }

    let mut seen: Vec<String> = Vec::new();
    for story in stories {
        let Some(url) = story.url.as_deref() else {
            continue;
        };
        let domain = domain_of(url);
        if domain.is_empty() || seen.contains(&domain) {
            continue;
        }
        seen.push(domain);
    }

    seen.into_iter()
        .filter(|d| d.to_lowercase().contains(&needle))
        .take(MAX_SUGGESTIONS)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn story_with_url(url: &str) -> Story {
        Story {
            id: url.to_string(),
            title: String::new(),
            author: String::new(),
            created_at: 0,
            points: 0,
            comments_count: 0,
            url: Some(url.to_string()),
            score: 1.0,
            saved: false,
        }
    }

    #[test]
    fn strips_leading_www_only() {
        assert_eq!(domain_of("https://www.example.com/a?b=c"), "example.com");
        assert_eq!(domain_of("https://blog.www.example.com/"), "blog.www.example.com");
        assert_eq!(domain_of("http://github.com"), "github.com");
    }

    #[test]
    fn malformed_urls_yield_empty() {
        assert_eq!(domain_of("not a url"), "");
        assert_eq!(domain_of(""), "");
        assert_eq!(domain_of("/relative/path"), "");
    }

    #[test]
    fn medium_matches_both_hosts_once() {
        let stories = vec![
            story_with_url("https://medium.com/@a/post-1"),
            story_with_url("https://blog.medium.com/post-2"),
            story_with_url("https://www.medium.com/@b/post-3"),
            story_with_url("https://github.com/rust-lang/rust"),
        ];
        assert_eq!(
            suggest_domains(&stories, "medium"),
            vec!["medium.com".to_string(), "blog.medium.com".to_string()]
        );
    }

    #[test]
    fn caps_at_five_and_ignores_case() {
        let stories: Vec<Story> = (0..8)
            .map(|i| story_with_url(&format!("https://site{i}.Example.org/x")))
            .collect();
        let suggestions = suggest_domains(&stories, "EXAMPLE");
        assert_eq!(suggestions.len(), MAX_SUGGESTIONS);
        assert_eq!(suggestions[0], "site0.example.org");
    }

    #[test]
    fn empty_input_suggests_nothing() {
        let stories = vec![story_with_url("https://medium.com")];
        assert!(suggest_domains(&stories, "").is_empty());
        assert!(suggest_domains(&stories, "   ").is_empty());
    }
}
