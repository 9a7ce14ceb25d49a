//! Output formatting for the CLI.

use bound_resource::{LoadMoreState, PageRequest, Resource};
use clap::ValueEnum;
use movie_store::Movie;
use serde::Serialize;

/// Output format.
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Print a value as one JSON line.
fn print_json<T: Serialize + ?Sized>(value: &T) {
    match serde_json::to_string(value) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Error: failed to encode output: {}", e),
    }
}

/// Print a success message.
pub fn print_success(message: &str, format: &OutputFormat) {
    match format {
        OutputFormat::Text => println!("{}", message),
        OutputFormat::Json => print_json(&serde_json::json!({
            "status": "success",
            "message": message,
        })),
    }
}

/// Print one event of a collection refresh.
pub fn print_movies_event(event: &Resource<Vec<Movie>>, format: &OutputFormat) {
    match format {
        OutputFormat::Text => {
            let cached = event.data().map(Vec::len).unwrap_or(0);
            match event {
                Resource::Loading { .. } => println!("loading  ({} cached)", cached),
                Resource::Success { .. } => println!("success  ({} movies)", cached),
                Resource::Error { message, .. } => {
                    println!("error    {} ({} cached)", message, cached)
                }
            }
        }
        OutputFormat::Json => print_json(event),
    }
}

/// Print one event of a single movie refresh.
pub fn print_movie_event(event: &Resource<Movie>, format: &OutputFormat) {
    match format {
        OutputFormat::Text => {
            let label = match event {
                Resource::Loading { .. } => "loading".to_string(),
                Resource::Success { .. } => "success".to_string(),
                Resource::Error { message, .. } => format!("error: {}", message),
            };
            println!("{}", label);
            match event.data() {
                Some(movie) => print_movie(movie),
                None => println!("  (not cached)"),
            }
        }
        OutputFormat::Json => print_json(event),
    }
}

/// Print a paging state transition.
pub fn print_state(state: &LoadMoreState, format: &OutputFormat) {
    match format {
        OutputFormat::Text => match state {
            LoadMoreState::Idle => println!("paging   idle"),
            LoadMoreState::Loading => println!("paging   loading"),
            LoadMoreState::Success => println!("paging   success"),
            LoadMoreState::Error { message } => println!("paging   error: {}", message),
        },
        OutputFormat::Json => print_json(state),
    }
}

/// Print what a single page request did.
pub fn print_page_request(outcome: &PageRequest, format: &OutputFormat) {
    let (result, page, detail) = match outcome {
        PageRequest::Completed { page, has_more } => (
            "completed",
            Some(*page),
            if *has_more { "more pages available" } else { "last page" }.to_string(),
        ),
        PageRequest::Failed { page, message } => ("failed", Some(*page), message.clone()),
        PageRequest::Discarded { page } => ("discarded", Some(*page), "reset while loading".to_string()),
        PageRequest::AlreadyLoading => ("ignored", None, "a page is already loading".to_string()),
        PageRequest::Exhausted => ("exhausted", None, "no more pages".to_string()),
    };

    match format {
        OutputFormat::Text => match page {
            Some(page) => println!("page {:<4} {} ({})", page, result, detail),
            None => println!("page      {} ({})", result, detail),
        },
        OutputFormat::Json => print_json(&serde_json::json!({
            "page_request": result,
            "page": page,
            "detail": detail,
        })),
    }
}

/// Print a list of cached movies.
pub fn print_movie_list(movies: &[Movie], format: &OutputFormat) {
    match format {
        OutputFormat::Text => {
            if movies.is_empty() {
                println!("No cached movies");
                return;
            }
            println!("{:<10} {:<8} {:<12} {}", "ID", "Rating", "Released", "Title");
            print_divider();
            for movie in movies {
                println!(
                    "{:<10} {:<8.1} {:<12} {}",
                    movie.id,
                    movie.vote_average,
                    movie.release_date.as_deref().unwrap_or("-"),
                    movie.title
                );
            }
        }
        OutputFormat::Json => print_json(movies),
    }
}

fn print_movie(movie: &Movie) {
    print_row("ID", &movie.id);
    print_row("Title", &movie.title);
    print_row("Released", movie.release_date.as_deref().unwrap_or("-"));
    print_row("Rating", &format!("{:.1}", movie.vote_average));
    print_row("Poster", movie.poster_url.as_deref().unwrap_or("-"));
    if !movie.overview.is_empty() {
        print_row("Overview", &movie.overview);
    }
}

/// Print a table row.
fn print_row(label: &str, value: &str) {
    println!("  {:<16} {}", format!("{}:", label), value);
}

/// Print a divider line.
fn print_divider() {
    println!("{}", "-".repeat(60));
}
