//! Envelope export to JSON.

use std::path::Path;

use super::UpdateEnvelope;
use crate::types::Result;

/// Pretty (two-space) JSON bytes, as saved next to the curl command.
pub fn to_json_pretty(envelope: &UpdateEnvelope) -> Result<Vec<u8>> {
    Ok(serde_json::to_vec_pretty(envelope)?)
}

/// Compact JSON bytes, as sent on the wire.
pub fn to_json(envelope: &UpdateEnvelope) -> Result<Vec<u8>> {
    Ok(serde_json::to_vec(envelope)?)
}

/// Write the envelope as pretty JSON, replacing any existing file.
pub fn write_to_file(envelope: &UpdateEnvelope, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let bytes = to_json_pretty(envelope)?;
    std::fs::write(path, &bytes)?;
    tracing::info!(path = %path.display(), bytes = bytes.len(), "wrote update envelope");
    Ok(())
}
