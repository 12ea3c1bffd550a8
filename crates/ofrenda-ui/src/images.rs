//! Image source resolution
//!
//! The egui image loaders only fetch absolute `http(s)://`, `file://` and
//! `bytes://` URIs, while entries and the default assets use paths relative to
//! the page. Relative paths are joined onto the API base URL, which in the
//! browser is the page origin.

use url::Url;

/// Absolute URI for `src`, or `src` unchanged if it cannot be joined
pub fn resolve(base: &Url, src: &str) -> String {
    if Url::parse(src).is_ok() {
        return src.to_string();
    }
    match base.join(src) {
        Ok(url) => url.to_string(),
        Err(e) => {
            tracing::debug!("Cannot resolve image '{}' against {}: {}", src, base, e);
            src.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn origin() -> Url {
        Url::parse("http://altar.local:3000").unwrap()
    }

    #[test]
    fn relative_assets_resolve_against_origin() {
        assert_eq!(
            resolve(&origin(), "assets/skull.svg"),
            "http://altar.local:3000/assets/skull.svg"
        );
        assert_eq!(
            resolve(&origin(), "/photos/ana.png"),
            "http://altar.local:3000/photos/ana.png"
        );
    }

    #[test]
    fn absolute_sources_are_untouched() {
        assert_eq!(
            resolve(&origin(), "https://cdn.example/frida.jpg"),
            "https://cdn.example/frida.jpg"
        );
        assert_eq!(resolve(&origin(), "bytes://skull.svg"), "bytes://skull.svg");
    }
}
