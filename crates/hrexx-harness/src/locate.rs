//! Script lookup: probe the search candidates on the filesystem.

use std::path::{Path, PathBuf};

use hrexx_core::search::SearchConventions;

/// First candidate for `script` that names an existing regular file.
#[must_use]
pub fn locate(conventions: &SearchConventions, script: &str) -> Option<PathBuf> {
    locate_with(conventions, script, |path| path.is_file())
}

/// Like [`locate`], with a caller-supplied existence check.
pub fn locate_with(
    conventions: &SearchConventions,
    script: &str,
    exists: impl Fn(&Path) -> bool,
) -> Option<PathBuf> {
    conventions
        .candidates(script)
        .into_iter()
        .find(|candidate| exists(candidate))
}

#[cfg(test)]
mod tests {
    use super::*;
    use hrexx_core::search::{DIR_SEPARATOR, PATH_DELIM};

    fn conventions(dirs: &[&str]) -> SearchConventions {
        let paths = dirs.join(PATH_DELIM.to_string().as_str());
        SearchConventions::from_lists(Some(&paths), None)
    }

    #[test]
    fn prefers_bare_name_over_extension() {
        let conv = conventions(&[]);
        let found = locate_with(&conv, "hello", |p| {
            p == Path::new("hello") || p == Path::new("hello.rexx")
        });
        assert_eq!(found, Some(PathBuf::from("hello")));
    }

    #[test]
    fn extension_order_is_respected() {
        let conv = conventions(&[]);
        let found = locate_with(&conv, "hello", |p| {
            p == Path::new("hello.rex") || p == Path::new("hello.cmd")
        });
        assert_eq!(found, Some(PathBuf::from("hello.rex")));
    }

    #[test]
    fn falls_back_to_search_directories() {
        let conv = conventions(&["scripts", "more"]);
        let target = PathBuf::from(format!("more{DIR_SEPARATOR}hello.rx"));
        let found = locate_with(&conv, "hello", |p| p == target);
        assert_eq!(found, Some(target));
    }

    #[test]
    fn nothing_exists() {
        let conv = conventions(&["scripts"]);
        assert_eq!(locate_with(&conv, "hello", |_| false), None);
    }

    #[test]
    fn real_file_in_temp_dir() {
        let dir = std::env::temp_dir().join(format!("hrexx-locate-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("probe.rexx"), "say 'hi'\n").unwrap();

        let dir_str = dir.to_string_lossy().into_owned();
        let conv = SearchConventions::from_lists(Some(&dir_str), None);
        let found = locate(&conv, "probe").unwrap();
        assert!(found.ends_with("probe.rexx"));

        std::fs::remove_dir_all(&dir).unwrap();
    }
}
