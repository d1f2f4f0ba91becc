use std::fs;
use std::path::PathBuf;

use tracing::{info, warn};

use crate::catalog::{Catalog, Region, TaskKind};
use crate::crypto::envelope::PayloadKeys;
use crate::dataid::{DataIdAllocator, ID_STORE_FILE};
use crate::error::{BossError, Result};
use crate::gateway::{EncryptionGateway, PayloadCipher};
use crate::sheet::document::{TaskSheet, allocate_items};
use crate::sheet::xml;

pub const CONTENT_DIR: &str = "content";
pub const TASKSHEET_DIR: &str = "tasksheet";
pub const CEMUSHEET_DIR: &str = "cemusheet";

#[derive(Clone)]
pub struct DeployOptions {
    /// Plaintext payload root; also hosts the id store.
    pub src_dir: PathBuf,
    /// Root the artifact trees are recreated under.
    pub out_dir: PathBuf,
    pub keys: PayloadKeys,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DeployStats {
    pub sheets: usize,
    pub withheld: usize,
    pub payloads: usize,
}

/// Full rebuild: wipe and recreate the artifact trees, then walk the
/// region × task matrix encrypting, allocating, building and writing.
///
/// A per-item encryption failure withholds that one (region, task) sheet and
/// its blobs; a counter-store failure aborts the whole run.
pub fn deploy(
    catalog: &Catalog,
    cipher: &dyn PayloadCipher,
    options: &DeployOptions,
) -> Result<DeployStats> {
    let mut ids = DataIdAllocator::load(&options.src_dir.join(ID_STORE_FILE))?;
    info!("data-id counter at {}", ids.peek());

    for dir in [CONTENT_DIR, TASKSHEET_DIR, CEMUSHEET_DIR] {
        let path = options.out_dir.join(dir);
        if path.exists() {
            fs::remove_dir_all(&path)?;
        }
        fs::create_dir_all(&path)?;
    }

    let gateway = EncryptionGateway::new(cipher, options.keys, options.src_dir.clone());
    let mut stats = DeployStats::default();

    for region in Region::ALL {
        for task in TaskKind::ALL {
            let descriptors = catalog.descriptors_for(region, task)?;
            let ciphers = gateway.encrypt_all(descriptors);
            let items = match allocate_items(descriptors, ciphers, &mut ids) {
                Ok(items) => items,
                Err(e @ BossError::MissingCiphertext(_)) => {
                    warn!("{}/{}: {e}, sheet withheld", region.token(), task.token());
                    stats.withheld += 1;
                    continue;
                }
                Err(e) => return Err(e),
            };

            let sheet = TaskSheet::build(region, task, &items);
            let sheet_xml = xml::serialize(&sheet);

            let sheet_dir = options
                .out_dir
                .join(TASKSHEET_DIR)
                .join("1")
                .join(region.token());
            fs::create_dir_all(&sheet_dir)?;
            fs::write(sheet_dir.join(task.token()), &sheet_xml)?;

            let emu_dir = options
                .out_dir
                .join(CEMUSHEET_DIR)
                .join("1")
                .join(region.token());
            fs::create_dir_all(&emu_dir)?;
            fs::write(
                emu_dir.join(task.token()),
                xml::derive_emulator_sheet(&sheet_xml),
            )?;

            // The blobs written here are the same bytes the sheet sized.
            let blob_dir = options.out_dir.join(CONTENT_DIR).join(region.token());
            fs::create_dir_all(&blob_dir)?;
            for item in &items {
                fs::write(blob_dir.join(item.descriptor.file_name), &item.cipher)?;
                stats.payloads += 1;
            }

            stats.sheets += 1;
            info!(
                "{}/{}: {} files",
                region.token(),
                task.token(),
                items.len()
            );
        }
    }

    Ok(stats)
}
