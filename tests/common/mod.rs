#![allow(dead_code)]

use std::io::Cursor;
use std::sync::Arc;

use imagevault::coordinator::ImageService;
use imagevault::normalize::Normalizer;
use imagevault_blob::{FsBlobStore, MemoryBlobStore};
use imagevault_db::pool::init_memory_pool;
use imagevault_db::{MemoryMetadataStore, SqliteMetadataStore};

/// Encode a solid-color PNG of the given dimensions in memory.
pub fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    let mut img = image::RgbImage::new(width, height);
    for pixel in img.pixels_mut() {
        *pixel = image::Rgb([200, 40, 40]);
    }
    let mut buf = Cursor::new(Vec::new());
    image::DynamicImage::ImageRgb8(img)
        .write_to(&mut buf, image::ImageFormat::Png)
        .unwrap();
    buf.into_inner()
}

/// A coordinator wired to in-memory fakes, with handles kept for fault
/// injection and direct state inspection.
pub struct FakeStores {
    pub blobs: Arc<MemoryBlobStore>,
    pub metadata: Arc<MemoryMetadataStore>,
    pub service: ImageService,
}

/// Build a coordinator over the in-memory fakes.
pub fn fake_service() -> FakeStores {
    let blobs = Arc::new(MemoryBlobStore::new());
    let metadata = Arc::new(MemoryMetadataStore::new());
    let service = ImageService::new(blobs.clone(), metadata.clone(), Normalizer::default());
    FakeStores {
        blobs,
        metadata,
        service,
    }
}

/// Build a coordinator over the real backends: a filesystem blob store in a
/// temp directory and an in-memory SQLite metadata store.
pub fn real_service() -> (tempfile::TempDir, ImageService) {
    let dir = tempfile::tempdir().unwrap();
    let blobs = Arc::new(FsBlobStore::new(dir.path().join("blobs")));
    let metadata = Arc::new(SqliteMetadataStore::new(init_memory_pool().unwrap()));
    let service = ImageService::new(blobs, metadata, Normalizer::default());
    (dir, service)
}
