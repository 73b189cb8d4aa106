use crate::models::{SearchHit, Story};

const DECAY_EXPONENT: f64 = 1.2;
const SCORE_FLOOR: f64 = 0.01;

/// Recency-decayed engagement score.
///
/// Always positive and finite; malformed or future timestamps fall back to the floor.
pub fn rank_score(points: i64, comments: i64, created_at: i64, now: i64) -> f64 {
    let age_hours = now.saturating_sub(created_at) as f64 / 3600.0;
    let engagement = points as f64 + 0.5 * comments as f64 + 1.0;
    let raw = engagement / (age_hours + 1.0).powf(DECAY_EXPONENT);
    if raw > 0.0 && raw.is_finite() {
        raw
    } else {
        SCORE_FLOOR
    }
}

/// Turns a page of hits into stories sorted by descending score.
///
/// Hits without an id are dropped. `sort_by` is stable, so equal scores keep the API order.
pub fn rank_hits(hits: Vec<SearchHit>, now: i64) -> Vec<Story> {
    let mut stories: Vec<Story> = hits
        .into_iter()
        .filter(|hit| !hit.object_id.is_empty())
        .map(|hit| {
            let mut story = Story::from(hit);
            story.score = rank_score(story.points, story.comments_count, story.created_at, now);
            story
        })
        .collect();
    stories.sort_by(|a, b| b.score.total_cmp(&a.score));
    stories
}

#[cfg(test)]
mod tests {
    use super::*;

    const NOW: i64 = 1_700_000_000;

    fn hit(id: &str, points: i64, comments: i64, created_at: i64) -> SearchHit {
        SearchHit {
            object_id: id.to_string(),
            points: Some(points),
            num_comments: Some(comments),
            created_at_i: Some(created_at),
            ..Default::default()
        }
    }

    #[test]
    fn score_is_positive_for_any_non_negative_input() {
        for points in [0, 1, 10, 10_000] {
            for age in [0, 60, 3600, 86400 * 30, 86400 * 365 * 20] {
                let score = rank_score(points, points / 2, NOW - age, NOW);
                assert!(score > 0.0 && score.is_finite(), "points={points} age={age}");
            }
        }
    }

    #[test]
    fn future_timestamps_hit_the_floor() {
        // (age_hours + 1) goes negative and the power is NaN
        assert_eq!(rank_score(100, 10, NOW + 86400, NOW), 0.01);
        // exactly one hour ahead divides by zero
        assert_eq!(rank_score(100, 10, NOW + 3600, NOW), 0.01);
    }

    #[test]
    fn older_stories_never_score_higher() {
        let mut previous = f64::INFINITY;
        for hours in 0..200 {
            let score = rank_score(50, 20, NOW - hours * 3600, NOW);
            assert!(score <= previous);
            previous = score;
        }
    }

    #[test]
    fn more_engagement_never_scores_lower() {
        let created = NOW - 5 * 3600;
        let mut previous = 0.0;
        for points in 0..100 {
            let score = rank_score(points, points, created, NOW);
            assert!(score >= previous);
            previous = score;
        }
    }

    #[test]
    fn one_hour_old_beats_one_day_old() {
        let fresh = rank_score(100, 50, NOW - 3600, NOW);
        let stale = rank_score(100, 50, NOW - 86400, NOW);
        assert!(fresh > stale);
    }

    #[test]
    fn equal_scores_keep_api_order() {
        let hits = vec![
            hit("a", 10, 0, NOW - 7200),
            hit("b", 500, 0, NOW - 60),
            hit("c", 10, 0, NOW - 7200),
            hit("d", 10, 0, NOW - 7200),
        ];
        let ids: Vec<String> = rank_hits(hits, NOW).into_iter().map(|s| s.id).collect();
        assert_eq!(ids, vec!["b", "a", "c", "d"]);
    }

    #[test]
    fn missing_fields_count_as_zero() {
        let stories = rank_hits(
            vec![SearchHit {
                object_id: "x".into(),
                ..Default::default()
            }],
            NOW,
        );
        // created_at 0 means decades old
        assert!(stories[0].score > 0.0);
        assert!(stories[0].score < 0.001);
    }

    #[test]
    fn extreme_timestamps_do_not_overflow() {
        let page = crate::hn_client::parse_search_page(
            r#"{"hits":[{"objectID":"1","points":1,"num_comments":0,"created_at_i":-9223372036854775808},
                {"objectID":"2","points":1,"num_comments":0,"created_at_i":9223372036854775807}],"nbPages":1}"#,
        )
        .unwrap();
        let stories = rank_hits(page.hits, NOW);
        assert_eq!(stories.len(), 2);
        for story in &stories {
            assert!(story.score > 0.0 && story.score.is_finite(), "id={}", story.id);
        }
        assert_eq!(rank_score(1, 0, i64::MAX, NOW), 0.01);
    }

    #[test]
    fn hits_without_an_id_are_skipped() {
        let page = crate::hn_client::parse_search_page(
            r#"{"hits":[{"title":"no id","points":99},{"objectID":null,"points":5},
                {"objectID":"7","title":"kept","points":3}],"nbPages":1}"#,
        )
        .unwrap();
        assert_eq!(page.hits.len(), 3);
        let stories = rank_hits(page.hits, NOW);
        assert_eq!(stories.len(), 1);
        assert_eq!(stories[0].id, "7");
    }
}
