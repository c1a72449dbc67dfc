use crate::core::Storage;
use crate::domain::model::RegionDescriptor;
use crate::utils::error::{BmkgError, Result};
use serde_json::Value;

/// Partitions compiled into the binary, in catalog order.
pub const BUNDLED_PARTITIONS: [(&str, &str); 5] = [
    (
        "kabupaten/kediri.json",
        include_str!("../../data/regions/kabupaten/kediri.json"),
    ),
    (
        "kabupaten/blitar.json",
        include_str!("../../data/regions/kabupaten/blitar.json"),
    ),
    (
        "kabupaten/trenggalek.json",
        include_str!("../../data/regions/kabupaten/trenggalek.json"),
    ),
    (
        "kota/kotaKediri.json",
        include_str!("../../data/regions/kota/kotaKediri.json"),
    ),
    (
        "kota/kotaBlitar.json",
        include_str!("../../data/regions/kota/kotaBlitar.json"),
    ),
];

/// Region descriptors merged from several partitions.
///
/// Order follows the partitions as given. Nothing is deduplicated or checked:
/// a code declared by two partitions appears twice.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RegionCatalog {
    regions: Vec<RegionDescriptor>,
}

impl RegionCatalog {
    /// Concatenates already-parsed partitions. An array partition contributes
    /// each of its elements; any other value contributes itself.
    pub fn merge<I>(partitions: I) -> Self
    where
        I: IntoIterator<Item = Value>,
    {
        let regions = partitions
            .into_iter()
            .flat_map(|partition| match partition {
                Value::Array(items) => items,
                other => vec![other],
            })
            .map(RegionDescriptor)
            .collect();

        Self { regions }
    }

    /// Parses `(name, json)` sources and merges them. `name` only shows up in errors.
    pub fn from_sources<'a, I>(sources: I) -> Result<Self>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let partitions = sources
            .into_iter()
            .map(|(name, json)| {
                serde_json::from_str::<Value>(json).map_err(|e| BmkgError::ConfigError {
                    message: format!("Region partition '{}' is not valid JSON: {}", name, e),
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self::merge(partitions))
    }

    pub fn bundled() -> Result<Self> {
        Self::from_sources(BUNDLED_PARTITIONS)
    }

    /// Reads each partition through `storage`, in the order given.
    pub async fn load<S: Storage>(storage: &S, paths: &[String]) -> Result<Self> {
        let mut sources = Vec::with_capacity(paths.len());
        for path in paths {
            let bytes = storage.read_file(path).await?;
            let text = String::from_utf8(bytes).map_err(|e| BmkgError::ConfigError {
                message: format!("Region partition '{}' is not UTF-8: {}", path, e),
            })?;
            sources.push((path.as_str(), text));
        }

        let catalog =
            Self::from_sources(sources.iter().map(|(name, text)| (*name, text.as_str())))?;
        tracing::info!(
            "Loaded {} region(s) from {} partition(s)",
            catalog.len(),
            paths.len()
        );
        Ok(catalog)
    }

    pub fn regions(&self) -> &[RegionDescriptor] {
        &self.regions
    }

    pub fn iter(&self) -> std::slice::Iter<'_, RegionDescriptor> {
        self.regions.iter()
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    /// Every descriptor that declares `code` somewhere inside it.
    pub fn find_by_code(&self, code: &str) -> Vec<&RegionDescriptor> {
        self.regions
            .iter()
            .filter(|region| region.codes().contains(&code))
            .collect()
    }
}

impl<'a> IntoIterator for &'a RegionCatalog {
    type Item = &'a RegionDescriptor;
    type IntoIter = std::slice::Iter<'a, RegionDescriptor>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
