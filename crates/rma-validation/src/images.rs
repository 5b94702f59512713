//! # Image Batch Contract
//!
//! Enforces the evidence-image metadata contract against policy: batch
//! count bounds, per-file size cap, and the accepted content-type set.
//! File violations are reported per file by name, alongside any batch
//! count violation, so the customer can fix everything at once. The
//! bytes themselves never pass through this core.

use serde::Deserialize;

use rma_core::{ImageContentType, ImageKind, ReturnPolicy, ValidationError};
use rma_state::ImageMetadata;

use crate::violations::Violations;

/// One uploaded file's metadata as reported by the upload collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ImageFileInput {
    /// Original file name.
    pub file_name: String,
    /// MIME type string.
    pub content_type: String,
    /// File size in bytes.
    pub size_bytes: u64,
    /// What the image documents (wire name; defaults to `other`).
    #[serde(default)]
    pub kind: Option<String>,
}

/// Validate an image batch against policy bounds.
pub fn validate_image_batch(
    files: Vec<ImageFileInput>,
    policy: &ReturnPolicy,
) -> Result<Vec<ImageMetadata>, ValidationError> {
    let mut violations = Violations::new();

    if files.len() < policy.min_images {
        violations.add(
            "images",
            format!(
                "at least {} image(s) required, got {}",
                policy.min_images,
                files.len()
            ),
        );
    } else if files.len() > policy.max_images {
        violations.add(
            "images",
            format!(
                "at most {} image(s) allowed, got {}",
                policy.max_images,
                files.len()
            ),
        );
    }

    let mut batch = Vec::with_capacity(files.len());
    for (index, file) in files.iter().enumerate() {
        let label = if file.file_name.trim().is_empty() {
            format!("images[{index}]")
        } else {
            format!("images[{index}] ({})", file.file_name)
        };
        let mut file_ok = true;

        let content_type = match ImageContentType::from_mime(file.content_type.trim()) {
            Some(ct) if policy.accepts_content_type(ct) => Some(ct),
            Some(ct) => {
                violations.add(label.as_str(), format!("content type {} is not accepted", ct.mime()));
                file_ok = false;
                None
            }
            None => {
                violations.add(
                    label.as_str(),
                    format!("unrecognized content type \"{}\"", file.content_type),
                );
                file_ok = false;
                None
            }
        };

        if file.size_bytes > policy.max_image_bytes {
            violations.add(
                label.as_str(),
                format!(
                    "file of {} bytes exceeds the {} byte cap",
                    file.size_bytes, policy.max_image_bytes
                ),
            );
            file_ok = false;
        }

        let kind = match file.kind.as_deref().map(str::trim) {
            None | Some("") => Some(ImageKind::Other),
            Some(name) => {
                let parsed = ImageKind::from_name(name);
                if parsed.is_none() {
                    violations.add(label.as_str(), format!("unrecognized image kind \"{name}\""));
                    file_ok = false;
                }
                parsed
            }
        };

        if file_ok {
            batch.push(ImageMetadata {
                kind: kind.expect("checked above"),
                file_name: file.file_name.trim().to_string(),
                content_type: content_type.expect("checked above"),
                size_bytes: file.size_bytes,
            });
        }
    }

    violations.finish(batch)
}
