#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use chrono::NaiveDateTime;
use image::{Rgb, RgbImage};
use rcheckin::db::StorageLayout;
use rcheckin::repo::Store;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub fn rci() -> Command {
    cargo_bin_cmd!("rcheckin")
}

/// A throwaway storage root; removed when dropped.
pub struct TestEnv {
    pub dir: TempDir,
}

impl TestEnv {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("create temp dir"),
        }
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn data_dir(&self) -> String {
        self.root().join("data").to_string_lossy().to_string()
    }

    pub fn layout(&self) -> StorageLayout {
        StorageLayout::new(self.root().join("data"))
    }

    pub fn store(&self) -> Store {
        Store::open(self.layout())
    }

    /// CLI command bound to this environment, config file untouched.
    pub fn cmd(&self) -> Command {
        let mut cmd = rci();
        cmd.args(["--test", "--data-dir", &self.data_dir()]);
        cmd
    }

    pub fn init(&self) {
        self.cmd().arg("init").assert().success();
    }

    /// Write a small solid-colour PNG and return its path.
    pub fn photo(&self, name: &str, width: u32, height: u32) -> PathBuf {
        let path = self.root().join(name);
        RgbImage::from_pixel(width, height, Rgb([200, 40, 40]))
            .save(&path)
            .expect("write test photo");
        path
    }

    pub fn file(&self, name: &str) -> PathBuf {
        self.root().join(name)
    }
}

pub fn ts(s: &str) -> NaiveDateTime {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").expect("valid timestamp")
}
