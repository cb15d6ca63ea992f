use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use super::{Hall, Movie};
use crate::scheduling::TimeWindow;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Show {
    pub id: i32,
    pub movie: Movie,
    pub hall: Hall,
    pub start_time: NaiveDateTime,
}

impl Show {
    /// End of the show, derived from the movie's current duration.
    #[must_use]
    pub fn end_time(&self) -> NaiveDateTime {
        self.window().end()
    }

    #[must_use]
    pub fn window(&self) -> TimeWindow {
        TimeWindow::from_duration(self.start_time, self.movie.duration_in_minutes)
    }
}

/// Criteria for listing shows. Every criterion is optional and they combine with AND.
///
/// Title and genre are case-sensitive substring matches. `from` is inclusive
/// and `to` exclusive, both taken at midnight.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShowFilter {
    pub title: Option<String>,
    pub genre: Option<String>,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

impl ShowFilter {
    #[must_use]
    pub fn lower_bound(&self) -> Option<NaiveDateTime> {
        self.from.map(|d| d.and_time(NaiveTime::MIN))
    }

    #[must_use]
    pub fn upper_bound(&self) -> Option<NaiveDateTime> {
        self.to.map(|d| d.and_time(NaiveTime::MIN))
    }

    #[must_use]
    pub fn matches(&self, show: &Show) -> bool {
        self.title
            .as_deref()
            .is_none_or(|t| show.movie.title.contains(t))
            && self
                .genre
                .as_deref()
                .is_none_or(|g| show.movie.genre.name.contains(g))
            && self.lower_bound().is_none_or(|from| show.start_time >= from)
            && self.upper_bound().is_none_or(|to| show.start_time < to)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Genre;
    use uuid::Uuid;

    fn show(title: &str, genre: &str, start: &str, minutes: i32) -> Show {
        Show {
            id: 1,
            movie: Movie {
                id: Uuid::new_v4(),
                title: title.to_string(),
                description: "desc".to_string(),
                duration_in_minutes: minutes,
                release_date: NaiveDate::from_ymd_opt(2020, 1, 1).unwrap(),
                genre: Genre {
                    id: 1,
                    name: genre.to_string(),
                },
            },
            hall: Hall {
                id: 1,
                name: "A1".to_string(),
                capacity: 100,
            },
            start_time: NaiveDateTime::parse_from_str(start, "%Y-%m-%d %H:%M:%S").unwrap(),
        }
    }

    #[test]
    fn test_end_time() {
        let s = show("Tenet", "Action", "2020-09-28 13:00:00", 120);
        assert_eq!(
            s.end_time(),
            NaiveDateTime::parse_from_str("2020-09-28 15:00:00", "%Y-%m-%d %H:%M:%S").unwrap()
        );
    }

    #[test]
    fn test_empty_filter_matches_everything() {
        let s = show("Tenet", "Action", "2020-09-28 13:00:00", 120);
        assert!(ShowFilter::default().matches(&s));
    }

    #[test]
    fn test_fragments_are_case_sensitive() {
        let s = show("The Matrix", "Science Fiction", "2020-09-28 13:00:00", 120);

        let hit = ShowFilter {
            title: Some("Matr".to_string()),
            genre: Some("Fiction".to_string()),
            ..Default::default()
        };
        assert!(hit.matches(&s));

        let miss = ShowFilter {
            title: Some("matrix".to_string()),
            ..Default::default()
        };
        assert!(!miss.matches(&s));
    }

    #[test]
    fn test_date_bounds() {
        let s = show("Tenet", "Action", "2020-09-28 13:00:00", 120);
        let day = |d: u32| NaiveDate::from_ymd_opt(2020, 9, d).unwrap();

        let same_day = ShowFilter {
            from: Some(day(28)),
            to: Some(day(29)),
            ..Default::default()
        };
        assert!(same_day.matches(&s));

        let to_is_exclusive = ShowFilter {
            to: Some(day(28)),
            ..Default::default()
        };
        assert!(!to_is_exclusive.matches(&s));

        let from_later = ShowFilter {
            from: Some(day(29)),
            ..Default::default()
        };
        assert!(!from_later.matches(&s));
    }
}
