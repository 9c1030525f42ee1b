//! Bulk catalog import from the TMDB "popular movies" endpoint.
//!
//! When `TMDB_API_KEY` is not configured the fetch falls back to a small
//! built-in demo list so the import path stays usable in development.

use movies_db::models::title::CreateTitle;
use movies_db::repositories::TitleRepo;
use movies_db::DbPool;
use serde::{Deserialize, Serialize};
use tracker_core::error::CoreError;
use tracker_web::AppResult;

const TMDB_POPULAR_URL: &str = "https://api.themoviedb.org/3/movie/popular";

/// Demo movies used when no API key is configured.
const DEMO_MOVIES: &[(&str, &str, i32)] = &[
    ("The Shawshank Redemption", "Drama", 1994),
    ("The Godfather", "Crime", 1972),
    ("The Dark Knight", "Action", 2008),
    ("Pulp Fiction", "Crime", 1994),
    ("Forrest Gump", "Drama", 1994),
    ("Inception", "Science Fiction", 2010),
    ("The Matrix", "Science Fiction", 1999),
    ("Interstellar", "Science Fiction", 2014),
    ("Parasite", "Thriller", 2019),
    ("Spirited Away", "Animation", 2001),
];

/// A movie fetched from the external catalog, before insertion.
#[derive(Debug, Clone, Serialize)]
pub struct FetchedMovie {
    pub name: String,
    pub genre: Option<String>,
    pub year: Option<i32>,
}

#[derive(Debug, Deserialize)]
struct PopularResponse {
    results: Vec<TmdbMovie>,
}

#[derive(Debug, Deserialize)]
struct TmdbMovie {
    title: String,
    #[serde(default)]
    genre_ids: Vec<i64>,
    release_date: Option<String>,
}

/// Map a TMDB numeric genre id to its display name.
fn genre_name(id: i64) -> Option<&'static str> {
    let name = match id {
        28 => "Action",
        12 => "Adventure",
        16 => "Animation",
        35 => "Comedy",
        80 => "Crime",
        99 => "Documentary",
        18 => "Drama",
        10751 => "Family",
        14 => "Fantasy",
        36 => "History",
        27 => "Horror",
        10402 => "Music",
        9648 => "Mystery",
        10749 => "Romance",
        878 => "Science Fiction",
        10770 => "TV Movie",
        53 => "Thriller",
        10752 => "War",
        37 => "Western",
        _ => return None,
    };
    Some(name)
}

fn demo_movies(limit: usize) -> Vec<FetchedMovie> {
    DEMO_MOVIES
        .iter()
        .take(limit)
        .map(|&(name, genre, year)| FetchedMovie {
            name: name.to_string(),
            genre: Some(genre.to_string()),
            year: Some(year),
        })
        .collect()
}

/// Fetch one page of popular movies, truncated to `limit`.
pub async fn fetch_popular(page: i64, limit: usize) -> AppResult<Vec<FetchedMovie>> {
    let api_key = match std::env::var("TMDB_API_KEY") {
        Ok(key) if !key.is_empty() => key,
        _ => {
            tracing::info!("TMDB_API_KEY not set, using demo movie list");
            return Ok(demo_movies(limit));
        }
    };

    let response = reqwest::Client::new()
        .get(TMDB_POPULAR_URL)
        .query(&[("api_key", api_key.as_str()), ("page", &page.to_string())])
        .send()
        .await
        .map_err(|e| CoreError::Internal(format!("TMDB request failed: {e}")))?
        .error_for_status()
        .map_err(|e| CoreError::Internal(format!("TMDB returned an error status: {e}")))?;

    let body: PopularResponse = response
        .json()
        .await
        .map_err(|e| CoreError::Internal(format!("TMDB response was not valid JSON: {e}")))?;

    let movies = body
        .results
        .into_iter()
        .take(limit)
        .map(|m| FetchedMovie {
            name: m.title,
            genre: m
                .genre_ids
                .first()
                .and_then(|&id| genre_name(id))
                .map(str::to_string),
            // Release dates come back as "YYYY-MM-DD".
            year: m
                .release_date
                .as_deref()
                .and_then(|d| d.get(..4))
                .and_then(|y| y.parse().ok()),
        })
        .collect();

    Ok(movies)
}

/// Fetch and insert movies that are not already in the catalog (by exact
/// name). Returns how many rows were inserted.
pub async fn load_movies(pool: &DbPool, page: i64, limit: usize) -> AppResult<u64> {
    let movies = fetch_popular(page, limit).await?;

    let mut inserted = 0;
    for movie in movies {
        if TitleRepo::find_by_name(pool, &movie.name).await?.is_some() {
            continue;
        }
        TitleRepo::create(
            pool,
            &CreateTitle {
                name: movie.name,
                kind: Some("movie".to_string()),
                genre: movie.genre,
                year: movie.year,
            },
        )
        .await?;
        inserted += 1;
    }

    Ok(inserted)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_genres_resolve_unknown_are_none() {
        assert_eq!(genre_name(878), Some("Science Fiction"));
        assert_eq!(genre_name(18), Some("Drama"));
        assert_eq!(genre_name(0), None);
    }

    #[test]
    fn demo_list_respects_limit() {
        assert_eq!(demo_movies(3).len(), 3);
        assert_eq!(demo_movies(100).len(), DEMO_MOVIES.len());
        assert_eq!(demo_movies(3)[0].name, "The Shawshank Redemption");
    }
}
