// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Frame image loading.
//!
//! Frame paths in a search result are usually server-relative URLs such as
//! `/static/temporary/images/L01_V001_12.jpg`. They are fetched in the
//! background, decoded to RGBA, and uploaded as egui textures on the UI
//! thread.

use crate::config::join_url;
use crate::models::image_slot::{SlotState, SlotTable};
use anyhow::{Context, Result};
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::mpsc::{channel, Receiver, Sender};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Number of background threads fetching frames.
const FETCH_WORKERS: usize = 4;

/// Where to read a frame from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FrameLocation {
    Remote(String),
    Local(PathBuf),
}

/// Resolve a frame path against the server.
///
/// Absolute URLs are used as-is and paths to existing local files are read
/// from disk; anything else is taken relative to `server_url`.
pub fn resolve_frame_url(server_url: &str, path: &str) -> FrameLocation {
    if path.starts_with("http://") || path.starts_with("https://") {
        return FrameLocation::Remote(path.to_string());
    }
    let local = PathBuf::from(path);
    if local.is_file() {
        return FrameLocation::Local(local);
    }
    FrameLocation::Remote(join_url(server_url, path))
}

/// Decoded RGBA8 image.
pub struct LoadedImage {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

/// Decode an encoded image (JPEG, PNG, ...) into RGBA8.
pub fn decode_image(bytes: &[u8]) -> Result<LoadedImage> {
    let img = image::load_from_memory(bytes)?.to_rgba8();
    let (width, height) = img.dimensions();
    Ok(LoadedImage {
        width,
        height,
        pixels: img.into_raw(),
    })
}

/// Fetch and decode one frame.
pub fn load_frame(
    client: &reqwest::blocking::Client,
    location: &FrameLocation,
) -> Result<LoadedImage> {
    let bytes = match location {
        FrameLocation::Remote(url) => client
            .get(url)
            .send()?
            .error_for_status()?
            .bytes()?
            .to_vec(),
        FrameLocation::Local(path) => {
            std::fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?
        }
    };
    decode_image(&bytes)
}

/// What the UI should draw for a frame.
pub enum FrameView<'a> {
    Ready(&'a egui::TextureHandle),
    Loading,
    Broken,
}

struct FetchJob {
    location: String,
    target: FrameLocation,
}

struct Fetched {
    location: String,
    result: Result<LoadedImage, String>,
}

/// Start `count` workers that take jobs off a shared queue until every
/// sender is gone.
fn spawn_workers(
    count: usize,
    client: reqwest::blocking::Client,
    jobs: Receiver<FetchJob>,
    results: Sender<Fetched>,
) -> Result<()> {
    let jobs = Arc::new(Mutex::new(jobs));
    for i in 0..count {
        let jobs = Arc::clone(&jobs);
        let results = results.clone();
        let client = client.clone();
        std::thread::Builder::new()
            .name(format!("frame-fetch-{}", i))
            .spawn(move || loop {
                let job = match jobs.lock() {
                    Ok(queue) => queue.recv(),
                    Err(_) => return,
                };
                let Ok(job) = job else {
                    return;
                };
                let result = load_frame(&client, &job.target).map_err(|e| format!("{:#}", e));
                let fetched = Fetched {
                    location: job.location,
                    result,
                };
                if results.send(fetched).is_err() {
                    return;
                }
            })
            .context("Failed to start frame fetch worker")?;
    }
    Ok(())
}

/// Background loader and texture cache for the frames on screen.
pub struct FrameImages {
    server_url: String,
    placeholder: String,
    table: SlotTable,
    textures: HashMap<String, egui::TextureHandle>,
    jobs: Sender<FetchJob>,
    results: Receiver<Fetched>,
}

impl FrameImages {
    pub fn new(server_url: &str, placeholder: &str, timeout: Option<Duration>) -> Result<Self> {
        let client = reqwest::blocking::Client::builder().timeout(timeout).build()?;
        let (jobs, job_queue) = channel();
        let (result_sender, results) = channel();
        spawn_workers(FETCH_WORKERS, client, job_queue, result_sender)?;
        Ok(Self {
            server_url: server_url.to_string(),
            placeholder: placeholder.to_string(),
            table: SlotTable::new(placeholder),
            textures: HashMap::new(),
            jobs,
            results,
        })
    }

    /// Start over with a new set of frames.
    pub fn reset(&mut self, frames: &[String]) {
        let placeholder = self.placeholder.clone();
        self.textures.retain(|location, _| *location == placeholder);
        for location in self.table.reset(frames) {
            self.spawn_fetch(location);
        }
    }

    /// Load a frame that may not be part of the current grid.
    pub fn ensure(&mut self, path: &str) {
        if let Some(location) = self.table.ensure(path) {
            self.spawn_fetch(location);
        }
    }

    fn spawn_fetch(&self, location: String) {
        let target = resolve_frame_url(&self.server_url, &location);
        if self.jobs.send(FetchJob { location, target }).is_err() {
            log::error!("Frame fetch workers have stopped");
        }
    }

    /// Upload finished loads. Returns true if anything changed.
    pub fn poll(&mut self, ctx: &egui::Context) -> bool {
        let mut changed = false;
        while let Ok(fetched) = self.results.try_recv() {
            changed = true;
            let ok = match fetched.result {
                // Left over from a previous result set: nothing to upload it for.
                Ok(_) if !self.table.is_awaited(&fetched.location) => {
                    log::debug!("Dropping stale image {}", fetched.location);
                    true
                }
                Ok(image) => {
                    let size = [image.width as usize, image.height as usize];
                    let color_image = egui::ColorImage::from_rgba_unmultiplied(size, &image.pixels);
                    let texture = ctx.load_texture(
                        fetched.location.clone(),
                        color_image,
                        egui::TextureOptions::LINEAR,
                    );
                    self.textures.insert(fetched.location.clone(), texture);
                    true
                }
                Err(e) => {
                    log::error!("Failed to load image {}: {}", fetched.location, e);
                    false
                }
            };

            for location in self.table.complete(&fetched.location, ok) {
                self.spawn_fetch(location);
            }
        }
        changed
    }

    pub fn view(&self, path: &str) -> FrameView<'_> {
        let location = match self.table.slot(path).map(|slot| slot.state()) {
            Some(SlotState::Ready(source)) => source.location(),
            Some(SlotState::Broken) => return FrameView::Broken,
            Some(SlotState::Loading(_)) | None => return FrameView::Loading,
        };
        match self.textures.get(location) {
            Some(texture) => FrameView::Ready(texture),
            None => FrameView::Loading,
        }
    }

    /// (settled, expected) for the current result set.
    pub fn progress(&self) -> (usize, usize) {
        self.table.progress()
    }
}
