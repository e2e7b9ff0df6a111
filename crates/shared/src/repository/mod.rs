mod admin;
mod cart;
mod dashboard;
mod homepage;
mod newsletter;
mod order;
mod product;
mod referral;
mod taxonomy;
mod user;

pub use self::admin::AdminRepository;
pub use self::cart::CartRepository;
pub use self::dashboard::DashboardRepository;
pub use self::homepage::{CarouselRepository, FeaturedRepository};
pub use self::newsletter::NewsletterRepository;
pub use self::order::OrderRepository;
pub use self::product::ProductRepository;
pub use self::referral::ReferralRepository;
pub use self::taxonomy::TaxonomyRepository;
pub use self::user::UserRepository;

use crate::errors::RepositoryError;
use sqlx::{FromRow, Row, postgres::PgRow};
use std::future::Future;

/// Splits rows selected with `COUNT(*) OVER() AS total_count` into the mapped
/// items and the total.
pub(crate) fn split_counted<T>(rows: Vec<PgRow>) -> Result<(Vec<T>, i64), RepositoryError>
where
    T: for<'r> FromRow<'r, PgRow>,
{
    let total = match rows.first() {
        Some(row) => row.try_get::<i64, _>("total_count")?,
        None => 0,
    };

    let items = rows
        .iter()
        .map(T::from_row)
        .collect::<Result<Vec<_>, _>>()?;

    Ok((items, total))
}

/// Runs `fetch(limit, offset)`. A page past the end returns no rows, so the
/// first row is fetched instead and `true` says the page itself was empty.
pub(crate) async fn fetch_page<R, E, F, Fut>(
    limit: i64,
    offset: i64,
    fetch: F,
) -> Result<(Vec<R>, bool), E>
where
    F: Fn(i64, i64) -> Fut,
    Fut: Future<Output = Result<Vec<R>, E>>,
{
    let rows = fetch(limit, offset).await?;
    if rows.is_empty() && offset > 0 {
        return Ok((fetch(1, 0).await?, true));
    }
    Ok((rows, false))
}

/// [`fetch_page`] over a `COUNT(*) OVER()` query; the total survives pages
/// past the end.
pub(crate) async fn fetch_counted<T, F, Fut>(
    limit: i64,
    offset: i64,
    fetch: F,
) -> Result<(Vec<T>, i64), RepositoryError>
where
    T: for<'r> FromRow<'r, PgRow>,
    F: Fn(i64, i64) -> Fut,
    Fut: Future<Output = Result<Vec<PgRow>, sqlx::Error>>,
{
    let (rows, past_end) = fetch_page(limit, offset, fetch).await?;
    let (items, total) = split_counted(rows)?;

    if past_end {
        return Ok((Vec::new(), total));
    }
    Ok((items, total))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{cell::Cell, convert::Infallible};

    async fn page_of(rows: &[i64], limit: i64, offset: i64) -> (Vec<i64>, bool, usize) {
        let calls = Cell::new(0);
        let calls_ref = &calls;
        let (page, past_end) = fetch_page(limit, offset, move |limit, offset| async move {
            calls_ref.set(calls_ref.get() + 1);
            Ok::<_, Infallible>(
                rows.iter()
                    .copied()
                    .skip(offset as usize)
                    .take(limit as usize)
                    .collect(),
            )
        })
        .await
        .unwrap();
        (page, past_end, calls.get())
    }

    #[tokio::test]
    async fn page_inside_the_range_is_fetched_once() {
        let rows = [1, 2, 3, 4, 5];
        assert_eq!(page_of(&rows, 2, 2).await, (vec![3, 4], false, 1));
    }

    #[tokio::test]
    async fn page_past_the_end_falls_back_to_the_first_row() {
        let rows = [1, 2, 3];
        assert_eq!(page_of(&rows, 10, 20).await, (vec![1], true, 2));
    }

    #[tokio::test]
    async fn empty_first_page_is_not_refetched() {
        assert_eq!(page_of(&[], 10, 0).await, (vec![], false, 1));
    }
}
