//! Static files compiled into the binary

use std::borrow::Cow;

use rust_embed::RustEmbed;

#[derive(RustEmbed)]
#[folder = "assets/"]
struct Assets;

pub struct Asset {
    pub data: Cow<'static, [u8]>,
    pub mime: String,
}

/// Look up an embedded file by its path under `assets/`.
pub fn get(path: &str) -> Option<Asset> {
    let file = Assets::get(path)?;
    let mime = mime_guess::from_path(path)
        .first_or_octet_stream()
        .to_string();
    Some(Asset {
        data: file.data,
        mime,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_assets() {
        let js = get("calendar.js").unwrap();
        assert!(js.mime.contains("javascript"));
        assert!(!js.data.is_empty());

        let css = get("style.css").unwrap();
        assert_eq!(css.mime, "text/css");
    }

    #[test]
    fn test_unknown_asset() {
        assert!(get("missing.png").is_none());
    }
}
