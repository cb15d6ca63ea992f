//! Genre, hall and movie listing command handlers

use crate::state::SharedState;

pub async fn cmd_list_genres(state: &SharedState) -> anyhow::Result<()> {
    let genres = state.genre_service.list_genres().await?;

    println!("Genres ({} total)", genres.len());
    println!("{:-<40}", "");
    for genre in genres {
        println!("{:>4}  {}", genre.id, genre.name);
    }

    Ok(())
}

pub async fn cmd_list_halls(state: &SharedState) -> anyhow::Result<()> {
    let halls = state.hall_service.list_halls().await?;

    if halls.is_empty() {
        println!("No halls configured.");
        return Ok(());
    }

    println!("Halls ({} total)", halls.len());
    println!("{:-<40}", "");
    for hall in halls {
        println!("{:>4}  {:<24} {:>5} seats", hall.id, hall.name, hall.capacity);
    }

    Ok(())
}

pub async fn cmd_list_movies(state: &SharedState) -> anyhow::Result<()> {
    let movies = state.movie_service.list_movies().await?;

    if movies.is_empty() {
        println!("No movies in the catalogue.");
        return Ok(());
    }

    println!("Movies ({} total)", movies.len());
    println!("{:-<70}", "");
    for movie in movies {
        println!("{} ({})", movie.title, movie.release_date.format("%Y"));
        println!(
            "  ID: {} | {} min | {}",
            movie.id, movie.duration_in_minutes, movie.genre.name
        );
    }

    Ok(())
}
