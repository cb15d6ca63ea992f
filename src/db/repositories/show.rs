use std::collections::{HashMap, HashSet};

use crate::domain::ShowId;
use crate::entities::{hall, movie, prelude::*, show};
use crate::models::{Hall, Movie, Show, ShowFilter};
use crate::scheduling::Booking;
use anyhow::Result;
use chrono::NaiveDateTime;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set,
};
use uuid::Uuid;

use super::movie::to_movie;

pub struct ShowRepository {
    conn: DatabaseConnection,
}

impl ShowRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn get(&self, id: i32) -> Result<Option<Show>> {
        let Some(row) = Shows::find_by_id(id).one(&self.conn).await? else {
            return Ok(None);
        };

        Ok(self.hydrate(vec![row]).await?.into_iter().next())
    }

    /// Shows matching `filter`, ordered by start time then id.
    pub async fn list(&self, filter: &ShowFilter) -> Result<Vec<Show>> {
        let mut query = Shows::find();

        if let Some(from) = filter.lower_bound() {
            query = query.filter(show::Column::StartTime.gte(from));
        }
        if let Some(to) = filter.upper_bound() {
            query = query.filter(show::Column::StartTime.lt(to));
        }

        let rows = query
            .order_by_asc(show::Column::StartTime)
            .order_by_asc(show::Column::Id)
            .all(&self.conn)
            .await?;

        // SQLite LIKE folds ASCII case, so fragments are matched in Rust.
        let shows = self.hydrate(rows).await?;
        Ok(shows.into_iter().filter(|s| filter.matches(s)).collect())
    }

    pub async fn list_for_hall(&self, hall_id: i32) -> Result<Vec<Show>> {
        let rows = Shows::find()
            .filter(show::Column::HallId.eq(hall_id))
            .order_by_asc(show::Column::StartTime)
            .order_by_asc(show::Column::Id)
            .all(&self.conn)
            .await?;

        self.hydrate(rows).await
    }

    pub async fn list_for_movie(&self, movie_id: Uuid) -> Result<Vec<Show>> {
        let rows = Shows::find()
            .filter(show::Column::MovieId.eq(movie_id))
            .order_by_asc(show::Column::StartTime)
            .order_by_asc(show::Column::Id)
            .all(&self.conn)
            .await?;

        self.hydrate(rows).await
    }

    pub async fn delete(&self, id: i32) -> Result<bool> {
        let result = Shows::delete_by_id(id).exec(&self.conn).await?;
        Ok(result.rows_affected > 0)
    }

    pub async fn count(&self) -> Result<u64> {
        Ok(Shows::find().count(&self.conn).await?)
    }

    pub async fn count_for_hall(&self, hall_id: i32) -> Result<u64> {
        Ok(Shows::find()
            .filter(show::Column::HallId.eq(hall_id))
            .count(&self.conn)
            .await?)
    }

    pub async fn count_for_movie(&self, movie_id: Uuid) -> Result<u64> {
        Ok(Shows::find()
            .filter(show::Column::MovieId.eq(movie_id))
            .count(&self.conn)
            .await?)
    }

    /// Every show in `hall_id` with its movie duration.
    ///
    /// Takes any connection so the read can share a transaction with the
    /// write that depends on it. No time bound is applied here: a window end
    /// past year 9999 does not compare correctly against the stored text.
    pub async fn bookings_in_hall<C: ConnectionTrait>(
        db: &C,
        hall_id: i32,
    ) -> Result<Vec<Booking>> {
        let rows = Shows::find()
            .filter(show::Column::HallId.eq(hall_id))
            .find_also_related(Movies)
            .order_by_asc(show::Column::StartTime)
            .all(db)
            .await?;

        rows.into_iter()
            .map(|(s, m)| {
                let m = m.ok_or_else(|| {
                    anyhow::anyhow!("Show {} references missing movie {}", s.id, s.movie_id)
                })?;
                Ok(Booking {
                    show_id: ShowId::new(s.id),
                    start: s.start_time,
                    duration_minutes: m.duration_in_minutes,
                })
            })
            .collect()
    }

    pub async fn insert<C: ConnectionTrait>(
        db: &C,
        movie_id: Uuid,
        hall_id: i32,
        start_time: NaiveDateTime,
    ) -> Result<i32> {
        let result = Shows::insert(show::ActiveModel {
            movie_id: Set(movie_id),
            hall_id: Set(hall_id),
            start_time: Set(start_time),
            ..Default::default()
        })
        .exec(db)
        .await?;

        Ok(result.last_insert_id)
    }

    /// Points an existing show at a new movie, hall and start time.
    pub async fn reschedule<C: ConnectionTrait>(
        db: &C,
        id: i32,
        movie_id: Uuid,
        hall_id: i32,
        start_time: NaiveDateTime,
    ) -> Result<bool> {
        let result = Shows::update_many()
            .col_expr(show::Column::MovieId, Expr::value(movie_id))
            .col_expr(show::Column::HallId, Expr::value(hall_id))
            .col_expr(show::Column::StartTime, Expr::value(start_time))
            .filter(show::Column::Id.eq(id))
            .exec(db)
            .await?;

        Ok(result.rows_affected > 0)
    }

    async fn hydrate(&self, rows: Vec<show::Model>) -> Result<Vec<Show>> {
        if rows.is_empty() {
            return Ok(Vec::new());
        }

        let movie_ids: HashSet<Uuid> = rows.iter().map(|r| r.movie_id).collect();
        let hall_ids: HashSet<i32> = rows.iter().map(|r| r.hall_id).collect();

        let movies: HashMap<Uuid, Movie> = Movies::find()
            .filter(movie::Column::Id.is_in(movie_ids))
            .find_also_related(Genres)
            .all(&self.conn)
            .await?
            .into_iter()
            .map(|(m, g)| to_movie(m, g).map(|movie| (movie.id, movie)))
            .collect::<Result<_>>()?;

        let halls: HashMap<i32, Hall> = Halls::find()
            .filter(hall::Column::Id.is_in(hall_ids))
            .all(&self.conn)
            .await?
            .into_iter()
            .map(|h| (h.id, Hall::from(h)))
            .collect();

        rows.into_iter()
            .map(|row| {
                let movie = movies.get(&row.movie_id).cloned().ok_or_else(|| {
                    anyhow::anyhow!("Show {} references missing movie {}", row.id, row.movie_id)
                })?;
                let hall = halls.get(&row.hall_id).cloned().ok_or_else(|| {
                    anyhow::anyhow!("Show {} references missing hall {}", row.id, row.hall_id)
                })?;

                Ok(Show {
                    id: row.id,
                    movie,
                    hall,
                    start_time: row.start_time,
                })
            })
            .collect()
    }
}
