use std::{
    fs::File,
    io::BufWriter,
    path::Path,
};

use serde_jsonlines::JsonLinesWriter;

use crate::{SagbookError, setup::SetupRecord};

/// Write setups to a JSON Lines file, one setup per line. Returns the number written.
pub fn export_json_lines(records: &[SetupRecord], path: &Path) -> Result<usize, SagbookError> {
    let export_error = |e: std::io::Error| SagbookError::Export {
        path: path.to_path_buf(),
        source: e,
    };

    let export_file = File::create(path).map_err(export_error)?;
    let mut writer = JsonLinesWriter::new(BufWriter::new(export_file));
    for record in records {
        writer.write(record).map_err(export_error)?;
    }
    writer.flush().map_err(export_error)?;

    log::info!("Exported {} setups to {:?}", records.len(), path);
    Ok(records.len())
}
