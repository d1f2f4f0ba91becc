use crate::catalog::{ContentDescriptor, Region, TaskKind};
use crate::dataid::DataIdAllocator;
use crate::error::{BossError, Result};

/// Base URL the spoofed clients fetch payload blobs from.
pub const SPOOF_CONTENT_URL: &str = "https://rexisp.github.io/p01/content/";

pub const SERVICE_STATUS_OPEN: &str = "open";
pub const FILE_TYPE_APPDATA: &str = "AppData";
/// Notification policy: new-content banner on, LED pulse off.
pub const NOTIFY_NEW: &str = "app";
pub const NOTIFY_LED: &str = "false";

/// One catalog entry bound to its allocated id and ciphertext for the
/// current generation pass. Never persisted.
#[derive(Debug)]
pub struct AllocatedItem {
    pub descriptor: ContentDescriptor,
    pub data_id: u64,
    pub cipher: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    pub filename: String,
    pub data_id: u64,
    pub url: String,
    pub size: u64,
}

/// In-memory manifest for one (region, task) pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskSheet {
    pub title_id: &'static str,
    pub task_id: TaskKind,
    pub files: Vec<FileEntry>,
}

impl TaskSheet {
    /// Compose the sheet. Catalog order is the wire order; entries are
    /// appended verbatim, never sorted.
    pub fn build(region: Region, task: TaskKind, items: &[AllocatedItem]) -> TaskSheet {
        let files = items
            .iter()
            .map(|item| FileEntry {
                filename: item.descriptor.file_name.to_string(),
                data_id: item.data_id,
                url: format!(
                    "{SPOOF_CONTENT_URL}{}/{}",
                    region.token(),
                    item.descriptor.file_name
                ),
                size: item.cipher.len() as u64,
            })
            .collect();
        TaskSheet {
            title_id: region.title_id(),
            task_id: task,
            files,
        }
    }
}

/// Pair descriptors with their ciphertext and freshly allocated ids.
///
/// A sheet is only built when every file's ciphertext is present: one absent
/// result fails the whole pair with `MissingCiphertext`, and no ids are
/// consumed for it. Allocation order follows catalog order.
pub fn allocate_items(
    descriptors: &[ContentDescriptor],
    ciphers: Vec<Option<Vec<u8>>>,
    ids: &mut DataIdAllocator,
) -> Result<Vec<AllocatedItem>> {
    let ciphers = descriptors
        .iter()
        .zip(ciphers)
        .map(|(desc, cipher)| {
            cipher.ok_or_else(|| BossError::MissingCiphertext(desc.file_name.to_string()))
        })
        .collect::<Result<Vec<_>>>()?;

    descriptors
        .iter()
        .zip(ciphers)
        .map(|(desc, cipher)| {
            Ok(AllocatedItem {
                descriptor: *desc,
                data_id: ids.next()?,
                cipher,
            })
        })
        .collect()
}
