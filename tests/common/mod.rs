#![allow(dead_code)]

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, Once};
use log::LevelFilter;
use sb3_tools::core::constants::SCRATCH_PREFIX;
use sb3_tools::ProgressSink;
use tempfile::TempDir;
use zip::write::SimpleFileOptions;
use zip::{ZipArchive, ZipWriter};

static INIT: Once = Once::new();

pub fn setup() {
    INIT.call_once(|| {
        env_logger::builder()
            .filter_level(LevelFilter::Debug)
            .is_test(true)
            .try_init()
            .ok();
    });
}

/// Scratch area holding an input archive and an output directory.
pub struct TestFixtures {
    pub temp_dir: TempDir,
    pub output_dir: PathBuf,
}

impl TestFixtures {
    pub fn new() -> Self {
        setup();
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let output_dir = temp_dir.path().join("out");
        std::fs::create_dir(&output_dir).expect("Failed to create output directory");
        Self { temp_dir, output_dir }
    }

    /// Writes a zip with the given entries; names ending in `/` become directories.
    pub fn create_archive(&self, name: &str, entries: &[(&str, &[u8])]) -> PathBuf {
        let path = self.temp_dir.path().join(name);
        let mut zip = ZipWriter::new(File::create(&path).expect("Failed to create archive"));
        for (entry, data) in entries {
            if entry.ends_with('/') {
                zip.add_directory(*entry, SimpleFileOptions::default()).unwrap();
            } else {
                zip.start_file(*entry, SimpleFileOptions::default()).unwrap();
                zip.write_all(data).unwrap();
            }
        }
        zip.finish().unwrap();
        path
    }

    /// A packaged application layout with `main.js` and `assets/icon.png`.
    pub fn create_app_archive(&self) -> PathBuf {
        self.create_archive("app.zip", &[
            ("LICENSE", b"MIT"),
            ("resources/", b""),
            ("resources/app/", b""),
            ("resources/app/main.js", b"console.log('hello');"),
            ("resources/app/assets/", b""),
            ("resources/app/assets/icon.png", b"\x89PNG\r\n\x1a\n"),
            ("resources/electron.asar", b"asar"),
        ])
    }

    pub fn scratch_dirs(&self) -> Vec<PathBuf> {
        std::fs::read_dir(&self.output_dir)
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_name().to_string_lossy().starts_with(SCRATCH_PREFIX))
            .map(|e| e.path())
            .collect()
    }
}

impl Default for TestFixtures {
    fn default() -> Self {
        Self::new()
    }
}

/// Reads every entry of an archive into name -> contents.
pub fn read_archive(path: &Path) -> BTreeMap<String, Vec<u8>> {
    let mut archive = ZipArchive::new(File::open(path).expect("Failed to open archive")).unwrap();
    let mut entries = BTreeMap::new();
    for i in 0..archive.len() {
        let mut entry = archive.by_index(i).unwrap();
        let mut data = Vec::new();
        entry.read_to_end(&mut data).unwrap();
        entries.insert(entry.name().to_string(), data);
    }
    entries
}

#[derive(Default)]
pub struct RecordingSink {
    pub progress: Mutex<Vec<(u8, String)>>,
    pub lines: Mutex<Vec<(String, bool)>>,
}

impl RecordingSink {
    pub fn percents(&self) -> Vec<u8> {
        self.progress.lock().unwrap().iter().map(|(p, _)| *p).collect()
    }

    pub fn error_lines(&self) -> Vec<String> {
        self.lines
            .lock()
            .unwrap()
            .iter()
            .filter(|(_, is_error)| *is_error)
            .map(|(line, _)| line.clone())
            .collect()
    }
}

impl ProgressSink for RecordingSink {
    fn report_progress(&self, percent: u8, message: &str) {
        self.progress.lock().unwrap().push((percent, message.to_string()));
    }

    fn log_line(&self, message: &str, is_error: bool) {
        self.lines.lock().unwrap().push((message.to_string(), is_error));
    }
}
