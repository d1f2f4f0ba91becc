use crate::error::{BossError, Result};

/// Distribution locale. Each region owns an opaque routing token (the path
/// segment the client requests) and the platform title id stamped into its
/// task sheets.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Region {
    Eur,
    Usa,
    Jpn,
}

impl Region {
    /// Deployment order; also the order sheets are generated in.
    pub const ALL: [Region; 3] = [Region::Eur, Region::Usa, Region::Jpn];

    pub fn token(self) -> &'static str {
        match self {
            Region::Eur => "zvGSM4kOrXpkKnpT",
            Region::Usa => "rjVlM7hUXPxmYQJh",
            Region::Jpn => "bb6tOEckvgZ50ciH",
        }
    }

    pub fn title_id(self) -> &'static str {
        match self {
            Region::Eur => "0005000010176a00",
            Region::Usa => "0005000010176900",
            Region::Jpn => "0005000010162c00",
        }
    }
}

/// Class of distribution task: the versus-schedule feed or the optional
/// festival data set.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TaskKind {
    SchData,
    OptData,
}

impl TaskKind {
    pub const ALL: [TaskKind; 2] = [TaskKind::SchData, TaskKind::OptData];

    pub fn token(self) -> &'static str {
        match self {
            TaskKind::SchData => "schdata",
            TaskKind::OptData => "optdata",
        }
    }
}

/// One payload in the registry. `source_path` is relative to the plaintext
/// source root and is only resolved at encryption time.
#[derive(Clone, Copy, Debug)]
pub struct ContentDescriptor {
    pub file_name: &'static str,
    pub source_path: &'static str,
}

const fn d(file_name: &'static str, source_path: &'static str) -> ContentDescriptor {
    ContentDescriptor {
        file_name,
        source_path,
    }
}

// The schedule file is shared across regions; festival payloads are per-region.
const SCHDATA: &[ContentDescriptor] = &[d("VSSetting.byaml", "VSSetting.byaml")];

const EUR_OPTDATA: &[ContentDescriptor] = &[
    d("Festival3003.byaml", "EUR/Festival3003.byaml"),
    d("HapTexture3003.bfres", "EUR/HapTexture3003.bfres"),
    d("PanelTexture3003.bfres", "EUR/PanelTexture3003.bfres"),
];

const USA_OPTDATA: &[ContentDescriptor] = &[
    d("Festival2003.byaml", "USA/Festival2003.byaml"),
    d("HapTexture2003.bfres", "USA/HapTexture2003.bfres"),
    d("PanelTexture2003.bfres", "USA/PanelTexture2003.bfres"),
];

const JPN_OPTDATA: &[ContentDescriptor] = &[
    d("Festival1003.byaml", "JPN/Festival1003.byaml"),
    d("HapTexture1003.bfres", "JPN/HapTexture1003.bfres"),
    d("PanelTexture1003.bfres", "JPN/PanelTexture1003.bfres"),
];

const BUILTIN: &[((Region, TaskKind), &[ContentDescriptor])] = &[
    ((Region::Eur, TaskKind::SchData), SCHDATA),
    ((Region::Eur, TaskKind::OptData), EUR_OPTDATA),
    ((Region::Usa, TaskKind::SchData), SCHDATA),
    ((Region::Usa, TaskKind::OptData), USA_OPTDATA),
    ((Region::Jpn, TaskKind::SchData), SCHDATA),
    ((Region::Jpn, TaskKind::OptData), JPN_OPTDATA),
];

/// Static content registry. Read-only after construction; lookups that miss
/// report `NotFound` rather than handing back an empty list.
#[derive(Clone, Copy, Debug)]
pub struct Catalog {
    entries: &'static [((Region, TaskKind), &'static [ContentDescriptor])],
}

impl Catalog {
    pub fn builtin() -> Self {
        Self { entries: BUILTIN }
    }

    pub fn descriptors_for(&self, region: Region, task: TaskKind) -> Result<&'static [ContentDescriptor]> {
        self.entries
            .iter()
            .find(|(key, list)| *key == (region, task) && !list.is_empty())
            .map(|(_, list)| *list)
            .ok_or_else(|| BossError::NotFound(format!("{}/{}", region.token(), task.token())))
    }

    /// Search all task kinds of one region for a file name.
    pub fn descriptor_for(&self, region: Region, file_name: &str) -> Result<&'static ContentDescriptor> {
        for task in TaskKind::ALL {
            if let Some(found) = self
                .descriptors_for(region, task)?
                .iter()
                .find(|desc| desc.file_name == file_name)
            {
                return Ok(found);
            }
        }
        Err(BossError::NotFound(format!(
            "{}/{}",
            region.token(),
            file_name
        )))
    }
}
