//! SQL dump decompression

use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write};
use std::path::Path;

use flate2::read::GzDecoder;

use super::errors::{DbError, DbResult};

/// Decompress a `.sql.gz` dump into `dest`.
///
/// Overwrites any existing file at `dest`, so re-running a restore is safe:
/// a stale dump from an earlier attempt is simply replaced.
pub fn decompress_dump(archive: &Path, dest: &Path) -> DbResult<()> {
    let input = File::open(archive).map_err(|e| DbError::Decompress {
        path: archive.to_path_buf(),
        source: e,
    })?;

    let mut decoder = GzDecoder::new(BufReader::new(input));

    let output = File::create(dest).map_err(|e| DbError::Decompress {
        path: dest.to_path_buf(),
        source: e,
    })?;
    let mut writer = BufWriter::new(output);

    io::copy(&mut decoder, &mut writer).map_err(|e| DbError::Decompress {
        path: archive.to_path_buf(),
        source: e,
    })?;

    writer.flush().map_err(|e| DbError::Decompress {
        path: dest.to_path_buf(),
        source: e,
    })?;

    Ok(())
}
