use std::collections::BTreeMap;
use std::env;
use std::path::{Path, PathBuf};
use std::sync::{PoisonError, RwLock};
use std::time::SystemTime;

use proc_macro2::Span;
use toml_edit::{DocumentMut, Item, Table};

/// Locate the path of a workspace crate as seen from the caller's Cargo.toml.
///
/// Derive output must name the runtime crate by a path that is valid in the
/// invoking crate, which may depend on `jg_encode` directly or only on the
/// `jsongen` facade.
///
/// # Example
///
/// ```rust
/// # use jg_macro_utils::Manifest;
/// let p: syn::Path = Manifest::shared(|m| m.get_crate_path("jg_encode"));
/// ```
///
/// # Resolution rules
///
/// 1. If the requested crate is listed in `dependencies`, return `::crate_name`.
/// 2. If the requested crate name begins with `jg_` and the caller depends on
///    the facade `jsongen`, return `::jsongen::short_name`
///    (e.g. `jg_encode` -> `::jsongen::encode`).
/// 3. Repeat step 1-2 in `dev-dependencies`.
/// 4. Otherwise, fall back to the absolute path `::crate_name`.
///
/// A crate that derives on its own types should add
/// `extern crate self as jg_encode;` so that the fallback path also
/// resolves inside it.
#[derive(Debug)]
pub struct Manifest {
    pub manifest: DocumentMut,
    pub modified_time: Option<SystemTime>,
}

const FACADE_NAME: &str = "jsongen";
const CRATE_PREFIX: &str = "jg_";

impl Manifest {
    /// Parse a manifest from text, `None` if it is not valid TOML.
    pub fn parse(text: &str) -> Option<Self> {
        text.parse::<DocumentMut>().ok().map(|manifest| Self {
            manifest,
            modified_time: None,
        })
    }

    #[inline(never)]
    fn manifest_path() -> Option<PathBuf> {
        env::var_os("CARGO_MANIFEST_DIR").map(|dir| {
            let mut path = PathBuf::from(dir);
            path.push("Cargo.toml");
            path
        })
    }

    #[inline(never)]
    fn modified_time(path: &Path) -> Option<SystemTime> {
        std::fs::metadata(path)
            .and_then(|metadata| metadata.modified())
            .ok()
    }

    #[inline(never)]
    fn read(path: &Path, modified_time: Option<SystemTime>) -> Option<Self> {
        let text = std::fs::read_to_string(path).ok()?;
        let mut manifest = Self::parse(&text)?;
        manifest.modified_time = modified_time;
        Some(manifest)
    }

    fn absolute(segments: &[&str]) -> syn::Path {
        let mut path = syn::Path {
            leading_colon: Some(Default::default()),
            segments: Default::default(),
        };
        for segment in segments {
            path.segments
                .push(syn::PathSegment::from(syn::Ident::new(segment, Span::call_site())));
        }
        path
    }

    fn find_in_deps(deps: &Table, name: &str) -> Option<syn::Path> {
        if deps.contains_key(name) {
            return Some(Self::absolute(&[name]));
        }
        let module = name.strip_prefix(CRATE_PREFIX)?;
        deps.contains_key(FACADE_NAME)
            .then(|| Self::absolute(&[FACADE_NAME, module]))
    }

    /// Return a [`syn::Path`] for the package named `name` as resolved from this
    /// manifest. See the type-level documentation for the resolution order.
    #[inline(never)]
    pub fn get_crate_path(&self, name: &str) -> syn::Path {
        for table in ["dependencies", "dev-dependencies"] {
            if let Some(Item::Table(deps)) = self.manifest.get(table)
                && let Some(path) = Self::find_in_deps(deps, name)
            {
                return path;
            }
        }
        Self::absolute(&[name])
    }

    /// Run `func` with the [`Manifest`] of the caller's Cargo.toml.
    ///
    /// Manifests are cached per path and re-read when the file changes. If
    /// the manifest cannot be read, `func` sees an empty one, so every
    /// lookup falls back to `::crate_name`.
    pub fn shared<R>(func: impl FnOnce(&Self) -> R) -> R {
        static MANIFESTS: RwLock<BTreeMap<PathBuf, Manifest>> = RwLock::new(BTreeMap::new());

        let Some(path) = Self::manifest_path() else {
            return func(&Self::empty());
        };
        let modified_time = Self::modified_time(&path);

        let manifests = MANIFESTS.read().unwrap_or_else(PoisonError::into_inner);
        if let Some(manifest) = manifests.get(&path)
            && manifest.modified_time.is_some()
            && manifest.modified_time == modified_time
        {
            return func(manifest);
        }
        drop(manifests);

        let Some(manifest) = Self::read(&path, modified_time) else {
            return func(&Self::empty());
        };

        let result = func(&manifest);

        MANIFESTS
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(path, manifest);

        result
    }

    fn empty() -> Self {
        Self {
            manifest: DocumentMut::new(),
            modified_time: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Manifest;

    fn path_string(path: &syn::Path) -> String {
        let segments: Vec<_> = path.segments.iter().map(|s| s.ident.to_string()).collect();
        let prefix = if path.leading_colon.is_some() { "::" } else { "" };
        format!("{prefix}{}", segments.join("::"))
    }

    #[test]
    fn direct_dependency() {
        let m = Manifest::parse("[dependencies]\njg_encode = \"0.0.1\"\n").unwrap();
        assert_eq!(path_string(&m.get_crate_path("jg_encode")), "::jg_encode");
    }

    #[test]
    fn through_facade() {
        let m = Manifest::parse("[dependencies]\njsongen = { path = \"..\" }\n").unwrap();
        assert_eq!(path_string(&m.get_crate_path("jg_encode")), "::jsongen::encode");
    }

    #[test]
    fn dev_dependency_and_fallback() {
        let m = Manifest::parse("[dev-dependencies]\njsongen = \"0.0.1\"\n").unwrap();
        assert_eq!(path_string(&m.get_crate_path("jg_encode")), "::jsongen::encode");
        assert_eq!(path_string(&m.get_crate_path("serde")), "::serde");

        let empty = Manifest::parse("").unwrap();
        assert_eq!(path_string(&empty.get_crate_path("jg_encode")), "::jg_encode");
    }
}
