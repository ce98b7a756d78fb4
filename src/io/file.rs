use std::path::Path;

use tracing::info;

use crate::error::{AppError, Result};
use crate::model::Session;

/// Save a session (groups, items and links) to a JSON file.
pub fn save_session(session: &Session, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(session)?;
    std::fs::write(path, json).map_err(|e| AppError::io(path, e))?;
    info!(path = %path.display(), links = session.links.len(), "session saved");
    Ok(())
}

/// Load a session from a JSON file.
pub fn load_session(path: &Path) -> Result<Session> {
    let json = std::fs::read_to_string(path).map_err(|e| AppError::io(path, e))?;
    let session: Session = serde_json::from_str(&json)?;
    info!(path = %path.display(), items = session.items.len(), "session loaded");
    Ok(session)
}
