use std::sync::Arc;
use std::time::Duration;

use chrono::{NaiveDate, NaiveDateTime};
use marquee::config::Config;
use marquee::domain::{HallId, MovieId, ShowId};
use marquee::models::{Hall, Movie, ShowFilter};
use marquee::scheduling::HallLocks;
use marquee::services::{
    HallInput, MovieError, MovieInput, SeaOrmShowService, ShowError, ShowQuery, ShowService,
};
use marquee::state::SharedState;

async fn setup() -> SharedState {
    let mut config = Config::default();
    config.general.database_path = "sqlite::memory:".to_string();

    SharedState::new(config)
        .await
        .expect("Failed to create shared state")
}

/// File-backed database with a real connection pool, so transactions can run side by side.
async fn setup_pooled(serialize_hall_bookings: bool) -> SharedState {
    let db_path =
        std::env::temp_dir().join(format!("marquee-pool-test-{}.db", uuid::Uuid::new_v4()));

    let mut config = Config::default();
    config.general.database_path = format!("sqlite:{}", db_path.display());
    config.general.max_db_connections = 8;
    config.general.min_db_connections = 2;
    config.scheduling.serialize_hall_bookings = serialize_hall_bookings;

    SharedState::new(config)
        .await
        .expect("Failed to create shared state")
}

async fn book_concurrently(
    state: &SharedState,
    movie: &Movie,
    hall: &Hall,
    start: &'static str,
    attempts: usize,
) -> Vec<Result<(), ShowError>> {
    let mut handles = Vec::new();
    for _ in 0..attempts {
        let service = state.show_service.clone();
        let (m, h) = (movie_id(movie), hall_id(hall));
        handles.push(tokio::spawn(async move {
            service.create_show(m, h, start).await.map(|_| ())
        }));
    }

    let mut outcomes = Vec::new();
    for handle in handles {
        outcomes.push(handle.await.unwrap());
    }
    outcomes
}

async fn add_movie(state: &SharedState, title: &str, genre: &str, minutes: i32) -> Movie {
    state
        .movie_service
        .create_movie(MovieInput {
            title: title.to_string(),
            description: format!("{title} description"),
            duration_in_minutes: minutes,
            release_date: "2020-08-26".to_string(),
            genre: genre.to_string(),
        })
        .await
        .expect("Failed to create movie")
}

async fn add_hall(state: &SharedState, name: &str) -> Hall {
    state
        .hall_service
        .create_hall(HallInput {
            name: name.to_string(),
            capacity: 100,
        })
        .await
        .expect("Failed to create hall")
}

fn movie_id(movie: &Movie) -> MovieId {
    MovieId::new(movie.id)
}

fn hall_id(hall: &Hall) -> HallId {
    HallId::new(hall.id)
}

fn at(value: &str) -> NaiveDateTime {
    NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S").unwrap()
}

#[tokio::test]
async fn test_overlapping_show_is_rejected_with_hall_name() {
    let state = setup().await;
    let movie = add_movie(&state, "Tenet", "Action", 60).await;
    let other = add_movie(&state, "Soul", "Animation", 100).await;
    let hall = add_hall(&state, "A1").await;

    state
        .show_service
        .create_show(movie_id(&movie), hall_id(&hall), "2020-09-28 12:00:00")
        .await
        .unwrap();

    let err = state
        .show_service
        .create_show(movie_id(&other), hall_id(&hall), "2020-09-28 12:30:00")
        .await
        .unwrap_err();

    assert!(matches!(err, ShowError::HallUnavailable { ref hall, .. } if hall == "A1"));
    assert!(err.to_string().contains("A1"));
    assert_eq!(state.store.count_shows().await.unwrap(), 1);
}

#[tokio::test]
async fn test_back_to_back_show_is_allowed() {
    let state = setup().await;
    let movie = add_movie(&state, "Tenet", "Action", 60).await;
    let hall = add_hall(&state, "A1").await;

    state
        .show_service
        .create_show(movie_id(&movie), hall_id(&hall), "2020-09-28 12:00:00")
        .await
        .unwrap();

    let show = state
        .show_service
        .create_show(movie_id(&movie), hall_id(&hall), "2020-09-28 13:00:00")
        .await
        .unwrap();

    assert_eq!(show.start_time, at("2020-09-28 13:00:00"));
    assert_eq!(show.end_time(), at("2020-09-28 14:00:00"));
}

#[tokio::test]
async fn test_same_time_in_another_hall_is_allowed() {
    let state = setup().await;
    let movie = add_movie(&state, "Tenet", "Action", 60).await;
    let first = add_hall(&state, "A1").await;
    let second = add_hall(&state, "B1").await;

    for hall in [&first, &second] {
        state
            .show_service
            .create_show(movie_id(&movie), hall_id(hall), "2020-09-28 12:00:00")
            .await
            .unwrap();
    }

    assert_eq!(state.store.count_shows().await.unwrap(), 2);
}

#[tokio::test]
async fn test_show_can_move_within_its_own_slot() {
    let state = setup().await;
    let movie = add_movie(&state, "Tenet", "Action", 60).await;
    let hall = add_hall(&state, "A1").await;

    let show = state
        .show_service
        .create_show(movie_id(&movie), hall_id(&hall), "2020-09-28 12:00:00")
        .await
        .unwrap();

    state
        .show_service
        .update_show(
            ShowId::new(show.id),
            movie_id(&movie),
            hall_id(&hall),
            "2020-09-28 12:30:00",
        )
        .await
        .unwrap();

    let reloaded = state.show_service.get_show(ShowId::new(show.id)).await.unwrap();
    assert_eq!(reloaded.start_time, at("2020-09-28 12:30:00"));
    assert_eq!(reloaded.end_time(), at("2020-09-28 13:30:00"));
}

#[tokio::test]
async fn test_update_moves_show_to_other_movie_and_hall() {
    let state = setup().await;
    let short = add_movie(&state, "Short", "Drama", 60).await;
    let long = add_movie(&state, "Long", "Drama", 120).await;
    let hall_a = add_hall(&state, "A").await;
    let hall_b = add_hall(&state, "B").await;

    let show = state
        .show_service
        .create_show(movie_id(&short), hall_id(&hall_a), "2020-09-28 12:00:00")
        .await
        .unwrap();

    let updated = state
        .show_service
        .update_show(
            ShowId::new(show.id),
            movie_id(&long),
            hall_id(&hall_b),
            "2020-09-28 13:00:00",
        )
        .await
        .unwrap();

    assert_eq!(updated.hall.name, "B");
    assert_eq!(updated.movie.title, "Long");
    assert_eq!(updated.end_time(), at("2020-09-28 15:00:00"));

    let in_a = state
        .show_service
        .list_shows_for_hall(hall_id(&hall_a))
        .await
        .unwrap();
    let in_b = state
        .show_service
        .list_shows_for_hall(hall_id(&hall_b))
        .await
        .unwrap();
    assert!(in_a.is_empty());
    assert_eq!(in_b.len(), 1);

    let of_short = state
        .show_service
        .list_shows_for_movie(movie_id(&short))
        .await
        .unwrap();
    assert!(of_short.is_empty());
}

#[tokio::test]
async fn test_update_into_occupied_slot_is_rejected() {
    let state = setup().await;
    let movie = add_movie(&state, "Tenet", "Action", 60).await;
    let hall = add_hall(&state, "A1").await;

    let first = state
        .show_service
        .create_show(movie_id(&movie), hall_id(&hall), "2020-09-28 12:00:00")
        .await
        .unwrap();
    state
        .show_service
        .create_show(movie_id(&movie), hall_id(&hall), "2020-09-28 14:00:00")
        .await
        .unwrap();

    let err = state
        .show_service
        .update_show(
            ShowId::new(first.id),
            movie_id(&movie),
            hall_id(&hall),
            "2020-09-28 13:30:00",
        )
        .await
        .unwrap_err();
    assert!(matches!(err, ShowError::HallUnavailable { .. }));

    let unchanged = state
        .show_service
        .get_show(ShowId::new(first.id))
        .await
        .unwrap();
    assert_eq!(unchanged.start_time, at("2020-09-28 12:00:00"));
}

#[tokio::test]
async fn test_unknown_movie_writes_nothing() {
    let state = setup().await;
    let hall = add_hall(&state, "A1").await;

    let err = state
        .show_service
        .create_show(MovieId::generate(), hall_id(&hall), "2020-09-28 12:00:00")
        .await
        .unwrap_err();

    assert!(matches!(err, ShowError::MovieNotFound(_)));
    assert_eq!(state.store.count_shows().await.unwrap(), 0);
}

#[tokio::test]
async fn test_unknown_genre_writes_no_movie() {
    let state = setup().await;

    let err = state
        .movie_service
        .create_movie(MovieInput {
            title: "Tenet".to_string(),
            description: "Time inversion".to_string(),
            duration_in_minutes: 150,
            release_date: "2020-08-26".to_string(),
            genre: "Nonexistent".to_string(),
        })
        .await
        .unwrap_err();

    assert!(matches!(err, MovieError::GenreNotFound(ref name) if name == "Nonexistent"));
    assert_eq!(state.store.count_movies().await.unwrap(), 0);
}

#[tokio::test]
async fn test_lookup_order_decides_the_error() {
    let state = setup().await;
    let movie = add_movie(&state, "Tenet", "Action", 60).await;
    let hall = add_hall(&state, "A1").await;

    let err = state
        .show_service
        .create_show(MovieId::generate(), HallId::new(999), "garbage")
        .await
        .unwrap_err();
    assert!(matches!(err, ShowError::MovieNotFound(_)));

    let err = state
        .show_service
        .create_show(movie_id(&movie), HallId::new(999), "garbage")
        .await
        .unwrap_err();
    assert!(matches!(err, ShowError::HallNotFound(_)));

    let err = state
        .show_service
        .create_show(movie_id(&movie), hall_id(&hall), "garbage")
        .await
        .unwrap_err();
    assert!(matches!(err, ShowError::Validation(ref f) if f.get("startTime").is_some()));
}

#[tokio::test]
async fn test_delete_show_frees_the_slot() {
    let state = setup().await;
    let movie = add_movie(&state, "Tenet", "Action", 60).await;
    let hall = add_hall(&state, "A1").await;

    let show = state
        .show_service
        .create_show(movie_id(&movie), hall_id(&hall), "2020-09-28 12:00:00")
        .await
        .unwrap();
    state
        .show_service
        .delete_show(ShowId::new(show.id))
        .await
        .unwrap();

    let err = state
        .show_service
        .delete_show(ShowId::new(show.id))
        .await
        .unwrap_err();
    assert!(matches!(err, ShowError::NotFound(_)));

    state
        .show_service
        .create_show(movie_id(&movie), hall_id(&hall), "2020-09-28 12:30:00")
        .await
        .unwrap();
}

#[tokio::test]
async fn test_referenced_movie_and_hall_cannot_be_deleted() {
    let state = setup().await;
    let movie = add_movie(&state, "Tenet", "Action", 60).await;
    let hall = add_hall(&state, "A1").await;

    let show = state
        .show_service
        .create_show(movie_id(&movie), hall_id(&hall), "2020-09-28 12:00:00")
        .await
        .unwrap();

    assert!(matches!(
        state.movie_service.delete_movie(movie_id(&movie)).await,
        Err(MovieError::Conflict(_))
    ));
    assert!(state.hall_service.delete_hall(hall_id(&hall)).await.is_err());

    state
        .show_service
        .delete_show(ShowId::new(show.id))
        .await
        .unwrap();
    state
        .movie_service
        .delete_movie(movie_id(&movie))
        .await
        .unwrap();
    state.hall_service.delete_hall(hall_id(&hall)).await.unwrap();
}

#[tokio::test]
async fn test_filters_combine_and_results_are_ordered() {
    let state = setup().await;
    let matrix = add_movie(&state, "The Matrix", "Science Fiction", 120).await;
    let tenet = add_movie(&state, "Tenet", "Action", 150).await;
    let hall = add_hall(&state, "A1").await;
    let other_hall = add_hall(&state, "B1").await;

    let schedule = [
        (&tenet, &hall, "2020-09-29 18:00:00"),
        (&matrix, &hall, "2020-09-28 12:00:00"),
        (&tenet, &other_hall, "2020-09-28 10:00:00"),
        (&matrix, &other_hall, "2020-09-30 20:00:00"),
    ];
    for (movie, hall, start) in schedule {
        state
            .show_service
            .create_show(movie_id(movie), hall_id(hall), start)
            .await
            .unwrap();
    }

    let all = state
        .show_service
        .list_shows(ShowFilter::default())
        .await
        .unwrap();
    let starts: Vec<_> = all.iter().map(|s| s.start_time).collect();
    let mut sorted = starts.clone();
    sorted.sort();
    assert_eq!(starts, sorted);
    assert_eq!(all.len(), 4);

    let matrix_only = state
        .show_service
        .list_shows(ShowFilter {
            title: Some("Matrix".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(matrix_only.len(), 2);

    let lowercase = state
        .show_service
        .list_shows(ShowFilter {
            title: Some("matrix".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert!(lowercase.is_empty());

    let combined = state
        .show_service
        .list_shows(ShowFilter {
            genre: Some("Action".to_string()),
            from: NaiveDate::from_ymd_opt(2020, 9, 29),
            to: NaiveDate::from_ymd_opt(2020, 9, 30),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(combined.len(), 1);
    assert_eq!(combined[0].start_time, at("2020-09-29 18:00:00"));
}

#[tokio::test]
async fn test_concurrent_bookings_of_one_slot_admit_one() {
    let state = setup_pooled(true).await;
    let movie = add_movie(&state, "Tenet", "Action", 60).await;
    let hall = add_hall(&state, "A1").await;

    let outcomes = book_concurrently(&state, &movie, &hall, "2020-09-28 12:00:00", 8).await;

    let created = outcomes.iter().filter(|o| o.is_ok()).count();
    assert_eq!(created, 1);
    for outcome in &outcomes {
        assert!(
            matches!(outcome, Ok(()) | Err(ShowError::HallUnavailable { .. })),
            "unexpected outcome: {outcome:?}"
        );
    }
    assert_eq!(state.store.count_shows().await.unwrap(), 1);
}

#[tokio::test]
async fn test_unserialized_bookings_never_exceed_one() {
    let state = setup_pooled(false).await;
    let movie = add_movie(&state, "Tenet", "Action", 60).await;
    let hall = add_hall(&state, "A1").await;

    let outcomes = book_concurrently(&state, &movie, &hall, "2020-09-28 12:00:00", 8).await;

    // Losers either see the committed show or fail on a stale read; SQLite never lets both write.
    let created = outcomes.iter().filter(|o| o.is_ok()).count();
    assert!(created <= 1);
    for outcome in &outcomes {
        assert!(
            matches!(
                outcome,
                Ok(())
                    | Err(
                        ShowError::HallUnavailable { .. }
                            | ShowError::Database(_)
                            | ShowError::Internal(_)
                    )
            ),
            "unexpected outcome: {outcome:?}"
        );
    }
    assert_eq!(
        state.store.count_shows().await.unwrap(),
        u64::try_from(created).unwrap()
    );
}

#[tokio::test]
async fn test_booking_waits_for_the_hall_lock() {
    let state = setup_pooled(true).await;
    let movie = add_movie(&state, "Tenet", "Action", 60).await;
    let hall = add_hall(&state, "A1").await;

    let locks = HallLocks::new(true);
    let service: Arc<dyn ShowService> = Arc::new(SeaOrmShowService::with_locks(
        state.store.clone(),
        state.movie_service.clone(),
        state.hall_service.clone(),
        locks.clone(),
    ));

    let guard = locks.acquire(hall_id(&hall)).await;
    assert!(guard.is_some());

    let booking = {
        let service = service.clone();
        let (m, h) = (movie_id(&movie), hall_id(&hall));
        tokio::spawn(async move { service.create_show(m, h, "2020-09-28 12:00:00").await })
    };

    tokio::time::sleep(Duration::from_millis(100)).await;
    assert!(!booking.is_finished());
    assert_eq!(state.store.count_shows().await.unwrap(), 0);

    drop(guard);
    booking.await.unwrap().unwrap();
    assert_eq!(state.store.count_shows().await.unwrap(), 1);
}

#[tokio::test]
async fn test_other_halls_are_not_held_up_by_a_lock() {
    let state = setup_pooled(true).await;
    let movie = add_movie(&state, "Tenet", "Action", 60).await;
    let busy = add_hall(&state, "A1").await;
    let free = add_hall(&state, "B1").await;

    let locks = HallLocks::new(true);
    let service = SeaOrmShowService::with_locks(
        state.store.clone(),
        state.movie_service.clone(),
        state.hall_service.clone(),
        locks.clone(),
    );

    let _guard = locks.acquire(hall_id(&busy)).await;
    let booked = tokio::time::timeout(
        Duration::from_secs(5),
        service.create_show(movie_id(&movie), hall_id(&free), "2020-09-28 12:00:00"),
    )
    .await
    .expect("booking in another hall should not wait");
    assert_eq!(booked.unwrap().hall.name, "B1");
}

#[tokio::test]
async fn test_shows_starting_together_are_listed_by_id() {
    let state = setup().await;
    let tenet = add_movie(&state, "Tenet", "Action", 150).await;
    let matrix = add_movie(&state, "The Matrix", "Science Fiction", 120).await;
    let hall_b = add_hall(&state, "B1").await;
    let hall_a = add_hall(&state, "A1").await;

    let first = state
        .show_service
        .create_show(movie_id(&tenet), hall_id(&hall_b), "2020-09-28 18:00:00")
        .await
        .unwrap();
    let second = state
        .show_service
        .create_show(movie_id(&matrix), hall_id(&hall_a), "2020-09-28 18:00:00")
        .await
        .unwrap();
    let earlier = state
        .show_service
        .create_show(movie_id(&matrix), hall_id(&hall_b), "2020-09-28 12:00:00")
        .await
        .unwrap();

    for _ in 0..3 {
        let ids: Vec<i32> = state
            .show_service
            .list_shows(ShowFilter::default())
            .await
            .unwrap()
            .iter()
            .map(|s| s.id)
            .collect();
        assert_eq!(ids, vec![earlier.id, first.id, second.id]);
    }
}

#[tokio::test]
async fn test_start_beyond_year_9999_is_rejected() {
    let state = setup().await;
    let movie = add_movie(&state, "Tenet", "Action", 60).await;
    let hall = add_hall(&state, "A1").await;

    state
        .show_service
        .create_show(movie_id(&movie), hall_id(&hall), "9999-12-31 23:30:00")
        .await
        .unwrap();

    let err = state
        .show_service
        .create_show(movie_id(&movie), hall_id(&hall), "+10000-01-01 00:00:00")
        .await
        .unwrap_err();
    assert!(
        matches!(err, ShowError::Validation(ref fields) if fields.get("startTime").is_some()),
        "{err:?}"
    );
    assert_eq!(state.store.count_shows().await.unwrap(), 1);

    let filter = ShowQuery {
        from: Some("+10000-01-01".to_string()),
        ..Default::default()
    }
    .into_filter();
    assert!(filter.unwrap_err().get("from").is_some());
}

#[tokio::test]
async fn test_window_running_past_year_9999_still_conflicts() {
    let state = setup().await;
    let short = add_movie(&state, "Tenet", "Action", 60).await;
    let long = add_movie(&state, "The Irishman", "Crime", 210).await;
    let hall = add_hall(&state, "A1").await;

    state
        .show_service
        .create_show(movie_id(&short), hall_id(&hall), "9999-12-31 23:00:00")
        .await
        .unwrap();

    let err = state
        .show_service
        .create_show(movie_id(&long), hall_id(&hall), "9999-12-31 22:00:00")
        .await
        .unwrap_err();
    assert!(matches!(err, ShowError::HallUnavailable { .. }), "{err:?}");
    assert_eq!(state.store.count_shows().await.unwrap(), 1);
}
