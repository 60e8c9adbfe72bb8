//! composer.json model and parser
//!
//! Only the fields discovery looks at are modelled. Every map-shaped field is
//! read into an [`OrderedMap`] so declaration order survives parsing: PSR-4
//! source roots and dependency edge order both depend on it.

use crate::diagnostics::Diagnostics;
use crate::error::ManifestError;
use crate::fs::FileSystem;
use serde::de::{self, Deserialize, Deserializer, IgnoredAny, MapAccess, SeqAccess, Visitor};
use std::fmt;
use std::marker::PhantomData;
use std::path::Path;
use tracing::debug;

pub const MANIFEST_FILE: &str = "composer.json";
pub const LOCK_FILE: &str = "composer.lock";

/// String-keyed map that keeps entries in the order they were declared.
///
/// Accepts `null` and `[]` as empty maps, since PHP serializes empty
/// associative arrays as JSON lists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderedMap<V>(Vec<(String, V)>);

impl<V> OrderedMap<V> {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn get(&self, key: &str) -> Option<&V> {
        self.0.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|(k, _)| k.as_str())
    }

    pub fn values(&self) -> impl Iterator<Item = &V> {
        self.0.iter().map(|(_, v)| v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &V)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<V> Default for OrderedMap<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> FromIterator<(String, V)> for OrderedMap<V> {
    fn from_iter<I: IntoIterator<Item = (String, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (key, value) in iter {
            // Later duplicates replace the value but keep the first position.
            match map.0.iter_mut().find(|(k, _)| *k == key) {
                Some(slot) => slot.1 = value,
                None => map.0.push((key, value)),
            }
        }
        map
    }
}

struct OrderedMapVisitor<V>(PhantomData<V>);

impl<'de, V: Deserialize<'de>> Visitor<'de> for OrderedMapVisitor<V> {
    type Value = OrderedMap<V>;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a map, null, or an empty list")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut entries = Vec::with_capacity(access.size_hint().unwrap_or(0));
        while let Some((key, value)) = access.next_entry::<String, V>()? {
            entries.push((key, value));
        }
        Ok(entries.into_iter().collect())
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        if access.next_element::<IgnoredAny>()?.is_some() {
            return Err(de::Error::invalid_type(
                de::Unexpected::Seq,
                &"a map or an empty list",
            ));
        }
        Ok(OrderedMap::new())
    }

    fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(OrderedMap::new())
    }

    fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(OrderedMap::new())
    }
}

impl<'de, V: Deserialize<'de>> Deserialize<'de> for OrderedMap<V> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(OrderedMapVisitor(PhantomData))
    }
}

/// A composer script: one command or a list run in sequence.
#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize)]
#[serde(untagged)]
pub enum Script {
    Command(String),
    Steps(Vec<String>),
}

impl Script {
    /// Shell form of the script. Steps are chained with `&&`.
    pub fn to_command(&self) -> String {
        match self {
            Script::Command(command) => command.clone(),
            Script::Steps(steps) => steps.join(" && "),
        }
    }
}

/// PSR-4 mapping target: one directory or several fallback directories.
#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize)]
#[serde(untagged)]
pub enum AutoloadPath {
    Single(String),
    Multiple(Vec<String>),
}

impl AutoloadPath {
    pub fn first(&self) -> Option<&str> {
        match self {
            AutoloadPath::Single(dir) => Some(dir.as_str()),
            AutoloadPath::Multiple(dirs) => dirs.first().map(String::as_str),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Deserialize)]
pub struct Autoload {
    #[serde(default, rename = "psr-4")]
    pub psr4: Option<OrderedMap<AutoloadPath>>,
}

/// The parts of a `composer.json` that discovery reads.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Deserialize)]
pub struct ComposerManifest {
    #[serde(default)]
    pub name: Option<String>,

    #[serde(default, rename = "type")]
    pub package_type: Option<String>,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub keywords: Option<Vec<String>>,

    #[serde(default)]
    pub require: OrderedMap<String>,

    #[serde(default, rename = "require-dev")]
    pub require_dev: OrderedMap<String>,

    #[serde(default)]
    pub autoload: Option<Autoload>,

    #[serde(default)]
    pub scripts: OrderedMap<Script>,
}

impl ComposerManifest {
    pub fn keywords(&self) -> &[String] {
        self.keywords.as_deref().unwrap_or_default()
    }

    /// PSR-4 mapping when the manifest declares one, even if it is empty.
    pub fn psr4(&self) -> Option<&OrderedMap<AutoloadPath>> {
        self.autoload.as_ref().and_then(|a| a.psr4.as_ref())
    }

    /// Production then development requirements, each in declaration order.
    pub fn requirements(&self) -> impl Iterator<Item = &str> {
        self.require.keys().chain(self.require_dev.keys())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ManifestFormat {
    Json,
    Yaml,
}

impl ManifestFormat {
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some("yaml") | Some("yml") => ManifestFormat::Yaml,
            _ => ManifestFormat::Json,
        }
    }
}

pub fn parse_manifest(
    content: &str,
    format: ManifestFormat,
) -> Result<ComposerManifest, ManifestError> {
    match format {
        ManifestFormat::Json => Ok(serde_json::from_str(content)?),
        ManifestFormat::Yaml => Ok(serde_yaml::from_str(content)?),
    }
}

/// Reads manifests through the injected filesystem.
///
/// Missing or broken manifests come back as `None`; broken ones also produce a
/// warning on the diagnostics sink.
pub struct ManifestParser<'a> {
    fs: &'a dyn FileSystem,
    diagnostics: &'a dyn Diagnostics,
}

impl<'a> ManifestParser<'a> {
    pub fn new(fs: &'a dyn FileSystem, diagnostics: &'a dyn Diagnostics) -> Self {
        Self { fs, diagnostics }
    }

    pub fn parse(&self, path: &Path) -> Option<ComposerManifest> {
        if !self.fs.is_file(path) {
            debug!("No manifest at {}", path.display());
            return None;
        }

        let content = match self.fs.read_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                self.diagnostics.warn(&format!(
                    "Failed to read {} at {}: {:#}",
                    MANIFEST_FILE,
                    path.display(),
                    e
                ));
                return None;
            }
        };

        match parse_manifest(&content, ManifestFormat::from_path(path)) {
            Ok(manifest) => Some(manifest),
            Err(e) => {
                self.diagnostics.warn(&format!(
                    "Failed to parse {} at {}: {}",
                    MANIFEST_FILE,
                    path.display(),
                    e
                ));
                None
            }
        }
    }
}
