//! Show schedule command handler

use crate::constants::formats;
use crate::models::Show;
use crate::services::ShowQuery;
use crate::state::SharedState;

pub async fn cmd_list_shows(state: &SharedState, query: ShowQuery) -> anyhow::Result<()> {
    let filter = query
        .into_filter()
        .map_err(|e| anyhow::anyhow!("Invalid filter: {e}"))?;
    let shows = state.show_service.list_shows(filter).await?;

    if shows.is_empty() {
        println!("No shows scheduled.");
        return Ok(());
    }

    println!("Shows ({} total)", shows.len());
    println!("{:-<70}", "");
    for show in shows {
        println!(
            "{}  {:<12} {}",
            format_slot(&show),
            show.hall.name,
            show.movie.title
        );
    }

    Ok(())
}

/// `start - end`, repeating the date on the end only when the show crosses midnight.
fn format_slot(show: &Show) -> String {
    let end = show.end_time();
    let end_format = if end.date() == show.start_time.date() {
        "%H:%M"
    } else {
        formats::DATETIME
    };

    format!(
        "{} - {}",
        show.start_time.format(formats::DATETIME),
        end.format(end_format)
    )
}
