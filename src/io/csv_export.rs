use std::path::Path;

use crate::error::Result;
use crate::model::Session;

/// Export the session's links to a semicolon-delimited CSV file.
///
/// Columns: Start Id ; Start Title ; End Id ; End Title
/// Links whose items no longer exist are written with an empty title.
/// Returns the number of links written.
pub fn export_links_csv(session: &Session, path: &Path) -> Result<usize> {
    let wtr = csv::WriterBuilder::new()
        .delimiter(b';')
        .from_path(path)?;
    write_links(session, wtr)
}

fn write_links<W: std::io::Write>(session: &Session, mut wtr: csv::Writer<W>) -> Result<usize> {
    wtr.write_record(["Start Id", "Start Title", "End Id", "End Title"])?;
    for link in &session.links {
        let title = |id| session.item(id).map(|i| i.title.as_str()).unwrap_or("");
        wtr.write_record([
            link.start.to_string().as_str(),
            title(link.start),
            link.end.to_string().as_str(),
            title(link.end),
        ])?;
    }
    wtr.flush().map_err(csv::Error::from)?;
    Ok(session.links.len())
}
