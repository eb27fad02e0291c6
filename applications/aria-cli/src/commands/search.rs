/// `aria search`
use std::io::Write;

use aria_catalog::CatalogClient;
use clap::ValueEnum;

use crate::error::Result;
use crate::output;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SearchKind {
    Songs,
    Artists,
    Albums,
}

/// Print one page of results; returns how many were printed
pub async fn run(
    catalog: &CatalogClient,
    kind: SearchKind,
    query: &str,
    page: u32,
    out: &mut impl Write,
) -> Result<usize> {
    let (rows, total, page) = match kind {
        SearchKind::Songs => {
            let results = catalog.search_songs(query, page).await?;
            let rows = results
                .items
                .iter()
                .map(|t| (t.id.clone(), output::track_line(t)))
                .collect::<Vec<_>>();
            (rows, results.total, results.page)
        }
        SearchKind::Artists => {
            let results = catalog.search_artists(query, page).await?;
            let rows = results
                .items
                .iter()
                .map(|a| (a.id.clone(), output::artist_line(a)))
                .collect::<Vec<_>>();
            (rows, results.total, results.page)
        }
        SearchKind::Albums => {
            let results = catalog.search_albums(query, page).await?;
            let rows = results
                .items
                .iter()
                .map(|a| (a.id.clone(), output::album_line(a)))
                .collect::<Vec<_>>();
            (rows, results.total, results.page)
        }
    };

    if rows.is_empty() {
        writeln!(out, "No results for {query:?}")?;
        return Ok(0);
    }

    writeln!(
        out,
        "{} result(s) for {:?}, page {} ({} total)",
        rows.len(),
        query,
        page,
        total
    )?;

    let id_width = rows.iter().map(|(id, _)| id.len()).max().unwrap_or(0);
    for (id, line) in &rows {
        writeln!(out, "  {id:<id_width$}  {line}")?;
    }

    let page_size = u64::from(catalog.page_size());
    if u64::from(page) * page_size < total {
        writeln!(out, "More results: --page {}", page + 1)?;
    }

    Ok(rows.len())
}
