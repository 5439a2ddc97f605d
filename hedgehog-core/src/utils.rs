use std::ffi::OsStr;
use std::fs::File;
use std::io::prelude::*;
use std::io::BufReader;
use std::path::Path;

use anyhow::{Context, Result};
use flate2::read::MultiGzDecoder;

///
/// Check whether a path points at a gzip'd file (by extension).
///
pub fn is_gzipped(path: &Path) -> bool {
    path.extension() == Some(OsStr::new("gz"))
}

///
/// Get a reader for either a gzip'd or non-gzip'd file.
///
/// # Arguments
///
/// - path: path to the file to read
///
pub fn get_dynamic_reader(path: &Path) -> Result<BufReader<Box<dyn Read>>> {
    let file = File::open(path).with_context(|| format!("Failed to open file: {:?}", path))?;
    let file: Box<dyn Read> = match is_gzipped(path) {
        true => Box::new(MultiGzDecoder::new(file)),
        false => Box::new(file),
    };

    let reader = BufReader::new(file);

    Ok(reader)
}

///
/// Create the parent directory of `path` if it doesn't exist yet.
///
pub fn ensure_parent_dir(path: &Path) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::io::Write;

    use flate2::Compression;
    use flate2::write::GzEncoder;
    use pretty_assertions::assert_eq;
    use rstest::*;

    #[rstest]
    fn test_dynamic_reader_plain_and_gz() {
        let dir = tempfile::tempdir().unwrap();

        let plain = dir.path().join("loci.bed");
        std::fs::write(&plain, "chr1\t10\n").unwrap();

        let gz = dir.path().join("loci.bed.gz");
        let mut enc = GzEncoder::new(File::create(&gz).unwrap(), Compression::default());
        enc.write_all(b"chr1\t10\n").unwrap();
        enc.finish().unwrap();

        for path in [plain, gz] {
            let mut contents = String::new();
            get_dynamic_reader(&path)
                .unwrap()
                .read_to_string(&mut contents)
                .unwrap();
            assert_eq!(contents, "chr1\t10\n");
        }
    }

    #[rstest]
    fn test_missing_file_errors() {
        let result = get_dynamic_reader(Path::new("does/not/exist.bed"));
        assert!(result.is_err());
    }

    #[rstest]
    #[case("genome.fa.gz", true)]
    #[case("genome.fa", false)]
    #[case("genome", false)]
    fn test_is_gzipped(#[case] name: &str, #[case] expected: bool) {
        assert_eq!(is_gzipped(Path::new(name)), expected);
    }
}
