//! Cygwin installation tree.
//!
//! No package manager metadata here; the staged tree itself is the
//! deliverable. Documentation lands at the tree root in `.txt` form.

use super::common;
use crate::packager::{error::Result, settings::Settings, staging::StagingTree};

/// Finishes the installation tree over a populated staging tree.
pub async fn generate(settings: &Settings, staging: &StagingTree) -> Result<()> {
    common::copy_doc_texts(settings.project_root(), staging.root()).await
}
