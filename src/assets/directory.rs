//! On-disk asset folders.
//!
//! Layout per deck:
//!
//! ```text
//! <root>/<deck_id>/thumb.jpg
//! <root>/<deck_id>/back.png
//! <root>/<deck_id>/image/00.jpg ... 77.jpg
//! ```
//!
//! Card images may live in `image/` or `images/`, be named `7` or `07`,
//! and use jpg, jpeg or png in either case.

use std::path::{Path, PathBuf};

use super::AssetResolver;
use crate::cards::AssetRef;

const IMAGE_EXTENSIONS: [&str; 6] = ["jpg", "jpeg", "png", "JPG", "JPEG", "PNG"];
const THUMB_EXTENSIONS: [&str; 2] = ["jpg", "png"];
const BACK_EXTENSIONS: [&str; 3] = ["jpg", "jpeg", "png"];
const IMAGE_DIRS: [&str; 2] = ["image", "images"];

/// Resolver over a directory of deck folders.
#[derive(Clone, Debug)]
pub struct DirectoryAssets {
    root: PathBuf,
}

impl DirectoryAssets {
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn first_existing<'a>(
        &self,
        stems: impl IntoIterator<Item = PathBuf>,
        extensions: &'a [&'a str],
    ) -> Option<AssetRef> {
        stems
            .into_iter()
            .flat_map(|stem| extensions.iter().map(move |ext| stem.with_extension(ext)))
            .find(|candidate| candidate.is_file())
            .map(|found| AssetRef::new(found.to_string_lossy()))
    }
}

impl AssetResolver for DirectoryAssets {
    fn thumbnail(&self, deck_id: &str) -> Option<AssetRef> {
        let stem = self.root.join(deck_id).join("thumb");
        self.first_existing([stem], &THUMB_EXTENSIONS)
    }

    fn back(&self, deck_id: &str) -> Option<AssetRef> {
        let stem = self.root.join(deck_id).join("back");
        self.first_existing([stem], &BACK_EXTENSIONS)
    }

    fn card_image(&self, deck_id: &str, slot: usize) -> Option<AssetRef> {
        let deck_dir = self.root.join(deck_id);
        let names = [slot.to_string(), format!("{:02}", slot)];
        let mut stems = Vec::with_capacity(IMAGE_DIRS.len() * names.len());
        for dir in IMAGE_DIRS {
            for name in &names {
                stems.push(deck_dir.join(dir).join(name));
            }
        }
        self.first_existing(stems, &IMAGE_EXTENSIONS)
    }
}
