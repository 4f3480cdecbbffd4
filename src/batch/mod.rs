//! Batch processing of newline-delimited target lists
//!
//! Lines are trimmed, blank lines skipped, and every remaining line is resolved
//! exactly once in file order. What happens with each outcome is up to the caller:
//! the callback either reports it and carries on, or returns an error that ends
//! the batch.

use crate::backend::Resolver;
use crate::error::{LocipError, Result};
use std::fs::File;
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

/// An opened target list
pub struct Batch<B> {
    path: PathBuf,
    reader: B,
}

impl Batch<BufReader<File>> {
    /// Open a list file
    pub fn open(path: &Path) -> Result<Self> {
        let file = File::open(path).map_err(|source| LocipError::InputOpen {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::from_reader(path, BufReader::new(file)))
    }
}

impl<B: BufRead> Batch<B> {
    pub fn from_reader(path: &Path, reader: B) -> Self {
        Self {
            path: path.to_path_buf(),
            reader,
        }
    }

    /// Resolve every target with `resolver`, handing each outcome to `on_result`
    ///
    /// Returns the number of targets processed. Lines that are not valid UTF-8 are
    /// resolved like any other line. An I/O error stops the loop; the results
    /// already written stay written and the error is returned.
    pub async fn run<R, W, F>(self, resolver: &R, out: &mut W, mut on_result: F) -> Result<usize>
    where
        R: Resolver,
        W: Write,
        F: FnMut(&mut W, &str, Result<R::Record>) -> Result<()>,
    {
        writeln!(
            out,
            "[*] Processing IPs from file: {} (using {})",
            self.path.display(),
            resolver.name()
        )?;

        let mut processed = 0;
        let mut read_error = None;
        let mut reader = self.reader;
        let mut buf = Vec::new();

        loop {
            buf.clear();
            match reader.read_until(b'\n', &mut buf) {
                Ok(0) => break,
                Ok(_) => {}
                Err(e) => {
                    read_error = Some(e);
                    break;
                }
            }

            // Undecodable bytes become a target that fails lookup
            let line = String::from_utf8_lossy(&buf);
            let target = line.trim();
            if target.is_empty() {
                continue;
            }

            log::debug!("Resolving {} via {}", target, resolver.name());
            let outcome = resolver.resolve(target).await;
            processed += 1;
            on_result(out, target, outcome)?;
        }

        if processed == 0 {
            writeln!(out, "No IP addresses found in {}.", self.path.display())?;
        }

        match read_error {
            Some(source) => Err(LocipError::InputRead {
                path: self.path,
                source,
            }),
            None => Ok(processed),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::io::Cursor;

    /// Records every call; fails for targets starting with "bad"
    struct Recorder {
        calls: RefCell<Vec<String>>,
    }

    impl Recorder {
        fn new() -> Self {
            Self {
                calls: RefCell::new(Vec::new()),
            }
        }
    }

    impl Resolver for Recorder {
        type Record = String;

        fn name(&self) -> &str {
            "recorder"
        }

        async fn resolve(&self, target: &str) -> Result<String> {
            self.calls.borrow_mut().push(target.to_string());
            if target.starts_with("bad") {
                Err(LocipError::InvalidIp(target.to_string()))
            } else {
                Ok(target.to_uppercase())
            }
        }
    }

    fn report(out: &mut Vec<u8>, target: &str, outcome: Result<String>) -> Result<()> {
        match outcome {
            Ok(record) => writeln!(out, "ok {} {}", target, record)?,
            Err(e) => writeln!(out, "err {} {}", target, e)?,
        }
        Ok(())
    }

    fn batch(content: &[u8]) -> Batch<Cursor<Vec<u8>>> {
        Batch::from_reader(Path::new("list.txt"), Cursor::new(content.to_vec()))
    }

    #[tokio::test]
    async fn test_each_target_once_in_order() {
        let resolver = Recorder::new();
        let mut out = Vec::new();

        let count = batch(b"  1.1.1.1 \n\nbad-one\n\t\n2.2.2.2\n")
            .run(&resolver, &mut out, report)
            .await
            .unwrap();

        assert_eq!(count, 3);
        assert_eq!(*resolver.calls.borrow(), vec!["1.1.1.1", "bad-one", "2.2.2.2"]);

        let text = String::from_utf8(out).unwrap();
        assert_eq!(
            text,
            "[*] Processing IPs from file: list.txt (using recorder)\n\
             ok 1.1.1.1 1.1.1.1\n\
             err bad-one invalid IP address: bad-one\n\
             ok 2.2.2.2 2.2.2.2\n"
        );
    }

    #[tokio::test]
    async fn test_no_targets() {
        let resolver = Recorder::new();
        let mut out = Vec::new();

        let count = batch(b"\n   \n\r\n").run(&resolver, &mut out, report).await.unwrap();

        assert_eq!(count, 0);
        assert!(resolver.calls.borrow().is_empty());
        assert!(String::from_utf8(out).unwrap().ends_with("No IP addresses found in list.txt.\n"));
    }

    #[tokio::test]
    async fn test_callback_error_ends_batch() {
        let resolver = Recorder::new();
        let mut out = Vec::new();

        let result = batch(b"1.1.1.1\nbad\n3.3.3.3\n")
            .run(&resolver, &mut out, |_, _, outcome| outcome.map(|_| ()))
            .await;

        assert!(matches!(result, Err(LocipError::InvalidIp(_))));
        assert_eq!(*resolver.calls.borrow(), vec!["1.1.1.1", "bad"]);
    }

    /// Serves `data` once, then fails every read
    struct FailingReader {
        data: Cursor<Vec<u8>>,
    }

    impl std::io::Read for FailingReader {
        fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
            let n = std::io::Read::read(&mut self.data, buf)?;
            if n == 0 {
                return Err(std::io::Error::other("device unplugged"));
            }
            Ok(n)
        }
    }

    #[tokio::test]
    async fn test_read_error_keeps_partial_output() {
        let resolver = Recorder::new();
        let mut out = Vec::new();
        let reader = std::io::BufReader::new(FailingReader {
            data: Cursor::new(b"1.1.1.1\n".to_vec()),
        });

        let result = Batch::from_reader(Path::new("list.txt"), reader)
            .run(&resolver, &mut out, report)
            .await;

        match result {
            Err(LocipError::InputRead { source, .. }) => {
                assert_eq!(source.to_string(), "device unplugged")
            }
            other => panic!("expected InputRead, got {:?}", other),
        }
        assert_eq!(*resolver.calls.borrow(), vec!["1.1.1.1"]);
        assert!(String::from_utf8(out).unwrap().contains("ok 1.1.1.1"));
    }

    #[tokio::test]
    async fn test_non_utf8_line_is_a_failed_target() {
        let resolver = Recorder::new();
        let mut out = Vec::new();

        let count = batch(b"1.1.1.1\nbad\xe9\n2.2.2.2")
            .run(&resolver, &mut out, report)
            .await
            .unwrap();

        assert_eq!(count, 3);
        assert_eq!(
            *resolver.calls.borrow(),
            vec!["1.1.1.1", "bad\u{FFFD}", "2.2.2.2"]
        );
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("err bad\u{FFFD} invalid IP address"));
        assert!(text.ends_with("ok 2.2.2.2 2.2.2.2\n"));
    }

    #[tokio::test]
    async fn test_open_from_disk() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("ips.txt");
        std::fs::write(&path, "9.9.9.9\n").unwrap();

        let resolver = Recorder::new();
        let mut out = Vec::new();
        let count = Batch::open(&path)
            .unwrap()
            .run(&resolver, &mut out, report)
            .await
            .unwrap();
        assert_eq!(count, 1);
    }

    #[test]
    fn test_open_missing_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("absent.txt");
        match Batch::open(&path) {
            Err(LocipError::InputOpen { source, .. }) => {
                assert_eq!(source.kind(), std::io::ErrorKind::NotFound)
            }
            _ => panic!("expected InputOpen"),
        }
    }
}
